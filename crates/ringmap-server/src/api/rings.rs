//! GET /api/v1/sites/{site_id}/rings: ring classification around one site.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Extension, Json,
};
use ringmap_core::{ring_circles, ring_query, BandSummary, RingCircle, SiteFilter};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::sites::SitePinItem;
use super::{map_core_error, map_query_rejection, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct RingsQuery {
    pub category: Option<String>,
    pub area: Option<String>,
    #[serde(default)]
    pub include_self: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct RingEntryItem {
    pub site: SitePinItem,
    pub distance_m: f64,
    pub band: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct RingsData {
    pub reference: SitePinItem,
    pub circles: Vec<RingCircle>,
    pub entries: Vec<RingEntryItem>,
    pub summary: Vec<BandSummary>,
    pub unassigned: usize,
}

pub(super) async fn site_rings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(site_id): Path<String>,
    query: Result<Query<RingsQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<RingsData>>, ApiError> {
    let Query(params) = query.map_err(|e| map_query_rejection(req_id.0.clone(), &e))?;
    let filter = SiteFilter {
        category: params.category,
        area: params.area,
    };
    let result = ring_query(
        &state.dataset,
        &site_id,
        &filter,
        &state.bands,
        !params.include_self,
    )
    .map_err(|e| map_core_error(req_id.0.clone(), &e))?;

    let summary = result.summary();
    let unassigned = result.unassigned();
    let circles = ring_circles(result.reference.location, &result.bands);
    let entries = result
        .entries
        .iter()
        .map(|entry| RingEntryItem {
            site: SitePinItem::from(&entry.site),
            distance_m: entry.distance_m,
            band: entry.band.clone(),
        })
        .collect();

    Ok(Json(ApiResponse {
        data: RingsData {
            reference: SitePinItem::from(&result.reference),
            circles,
            entries,
            summary,
            unassigned,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
