//! DTOs for the aggregate report endpoints.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

/// Query parameters for `GET /api/top`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct TopQueryParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<usize>,
}
