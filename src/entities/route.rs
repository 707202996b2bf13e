use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Route {
    pub path: Vec<String>,
    pub meters: f64,
    pub travel_seconds: f64,
    pub eta: String,
}

impl Route {
    pub fn new(path: Vec<String>, meters: f64, travel_seconds: f64, eta: String) -> Self {
        Self {
            path,
            meters,
            travel_seconds,
            eta,
        }
    }

    pub fn kilometers(&self) -> f64 {
        self.meters / 1000.0
    }
}
