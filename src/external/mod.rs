pub mod open_route_service;
