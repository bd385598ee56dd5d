use std::sync::Arc;
use axum::{Extension, Json, Router};
use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use reqwest::StatusCode;
use tracing::{info, warn};
use crate::controller::AppState;
use crate::errors::ApiError;
use crate::models::search_request::{SearchRequest, SearchRequestBody};
use crate::services::nearby_restaurants::NearbyRestaurantsService;

pub fn router(app_state: AppState) -> Router {
    let nearby_service = Arc::new(NearbyRestaurantsService::new(
        app_state.places_repo,
        app_state.media_timeout,
    ));

    Router::new()
        .route("/api/res", post(search_nearby_restaurants))
        .route("/api/res/:id", get(retrieve_restaurant_details))
        .route_layer(Extension(nearby_service))
}

pub async fn search_nearby_restaurants(
    Extension(nearby_service): Extension<Arc<NearbyRestaurantsService>>,
    payload: Result<Json<SearchRequestBody>, JsonRejection>,
) -> impl IntoResponse {
    let search_request = match payload
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid request body: {}", e)))
        .and_then(|Json(body)| SearchRequest::try_from(body))
    {
        Ok(search_request) => search_request,
        Err(e) => {
            warn!("Rejected nearby search request: {}", e);
            return e.into_response();
        }
    };

    info!(
        "Searching restaurants near ({}, {}) within {}m",
        search_request.latitude, search_request.longitude, search_request.radius_meters
    );

    return match nearby_service.find_nearby(&search_request).await {
        Ok(restaurants) => (StatusCode::OK, Json(restaurants)).into_response(),
        Err(e) => e.into_response(),
    };
}

pub async fn retrieve_restaurant_details(
    Extension(nearby_service): Extension<Arc<NearbyRestaurantsService>>,
    Path(place_id): Path<String>,
) -> impl IntoResponse {
    return match nearby_service.restaurant_details(&place_id).await {
        Ok(details) => (StatusCode::OK, Json(details)).into_response(),
        Err(e) => {
            warn!("Something went wrong retrieving restaurant details due to: {}", e);
            e.into_response()
        }
    };
}
