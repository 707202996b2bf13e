use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Location;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapSummary {
    pub built_at: DateTime<Utc>,
    pub locations: Vec<Location>,
}
