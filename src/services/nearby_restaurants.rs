use std::sync::Arc;
use std::time::Duration;
use futures::future::join_all;
use tracing::{error, info, warn};
use crate::errors::{ApiError, MediaUnresolved, PlacesError};
use crate::models::restaurant::{RawPlace, RestaurantDetails, RestaurantSummary};
use crate::models::search_request::SearchRequest;
use crate::repositories::google_places_repo::PlacesApi;

/// Turns a nearby search into client-facing restaurant summaries, resolving
/// one display photo per place.
///
/// The search is all-or-nothing. Photo lookups run concurrently and fail
/// independently: a place whose photo cannot be resolved is still returned,
/// with an empty `imageUri`.
pub struct NearbyRestaurantsService {
    places_repo: Arc<dyn PlacesApi>,
    media_timeout: Duration,
}

impl NearbyRestaurantsService {
    pub fn new(places_repo: Arc<dyn PlacesApi>, media_timeout: Duration) -> Self {
        Self {
            places_repo,
            media_timeout,
        }
    }

    pub async fn find_nearby(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<RestaurantSummary>, ApiError> {
        let places = self
            .places_repo
            .search_nearby(request)
            .await
            .map_err(|e| {
                error!("Nearby search failed due to: {}", e);
                ApiError::UpstreamUnavailable(e)
            })?;

        info!(
            "Found {} restaurants near ({}, {}), resolving photos",
            places.len(),
            request.latitude,
            request.longitude
        );

        // join_all keeps input order, so each image lands next to its place.
        let images = join_all(places.iter().map(|place| self.resolve_image(place))).await;

        let summaries = places
            .into_iter()
            .zip(images)
            .map(|(place, image)| {
                let image_uri = match image {
                    Ok(uri) => uri.unwrap_or_default(),
                    Err(e) => {
                        warn!("Falling back to empty image for place {}: {}", place.id, e);
                        String::new()
                    }
                };
                RestaurantSummary::from_place(place, image_uri)
            })
            .collect();

        Ok(summaries)
    }

    /// Only the first photo reference is tried. `Ok(None)` means the place
    /// has no photos at all.
    async fn resolve_image(&self, place: &RawPlace) -> Result<Option<String>, MediaUnresolved> {
        let Some(photo) = place.first_photo() else {
            return Ok(None);
        };

        match tokio::time::timeout(
            self.media_timeout,
            self.places_repo.resolve_photo(&photo.name),
        )
        .await
        {
            Ok(resolved) => resolved.map(Some),
            Err(_) => Err(MediaUnresolved {
                photo_name: photo.name.clone(),
                source: PlacesError::Timeout,
            }),
        }
    }

    pub async fn restaurant_details(&self, place_id: &str) -> Result<RestaurantDetails, ApiError> {
        if !is_valid_place_id(place_id) {
            return Err(ApiError::InvalidRequest(format!(
                "Invalid restaurant id: {}",
                place_id
            )));
        }

        let details = self.places_repo.place_details(place_id).await.map_err(|e| {
            warn!("Detail lookup for {} failed due to: {}", place_id, e);
            ApiError::from(e)
        })?;

        Ok(RestaurantDetails::from(details))
    }
}

fn is_valid_place_id(place_id: &str) -> bool {
    !place_id.is_empty()
        && place_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
