use axum::extract::{Extension, Json};

use crate::{api::DynAPI, entities::MapSummary, error::Error};

pub async fn describe(Extension(api): Extension<DynAPI>) -> Result<Json<MapSummary>, Error> {
    let summary = api.describe_map().await?;

    Ok(summary.into())
}
