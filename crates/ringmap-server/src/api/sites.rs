use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use ringmap_core::{AreaCount, MarkerStyle, Site, SiteFilter};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_query_rejection, ApiError, ApiResponse, AppState, ResponseMeta};

/// A site as a map pin, with its marker convention attached.
#[derive(Debug, Serialize)]
pub(super) struct SitePinItem {
    pub id: String,
    pub name: Option<String>,
    pub category: String,
    pub area: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub marker: MarkerStyle,
}

impl From<&Site> for SitePinItem {
    fn from(site: &Site) -> Self {
        Self {
            id: site.id.clone(),
            name: site.name.clone(),
            category: site.category.clone(),
            area: site.area.clone(),
            latitude: site.location.latitude(),
            longitude: site.location.longitude(),
            marker: MarkerStyle::for_category(&site.category),
        }
    }
}

pub(super) async fn list_sites(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<SiteFilter>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<SitePinItem>>>, ApiError> {
    let Query(filter) = query.map_err(|e| map_query_rejection(req_id.0.clone(), &e))?;
    let data = state
        .dataset
        .filter(&filter)
        .iter()
        .map(SitePinItem::from)
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_areas(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<AreaCount>>> {
    Json(ApiResponse {
        data: state.dataset.areas(),
        meta: ResponseMeta::new(req_id.0),
    })
}
