use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::{api::DynAPI, entities::Route, error::Error};

#[derive(Serialize, Deserialize)]
pub struct PlanRouteParams {
    origin: String,
    destination: String,
    speed_kmh: f64,
}

#[derive(Serialize, Deserialize)]
pub struct PlanRouteResponse {
    // null when no path exists; the UI branches on it
    route: Option<Route>,
}

pub async fn plan(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<PlanRouteParams>,
) -> Result<Json<PlanRouteResponse>, Error> {
    let route = api
        .plan_route(params.origin, params.destination, params.speed_kmh)
        .await?;

    Ok(Json(PlanRouteResponse { route }))
}
