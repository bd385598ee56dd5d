use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, warn};
use crate::config::PlacesSettings;
use crate::errors::{MediaUnresolved, PlacesError};
use crate::models::restaurant::{NearbySearchResponse, PlaceDetails, RawPlace};
use crate::models::restaurant_image::RestaurantImage;
use crate::models::search_request::SearchRequest;

pub const INCLUDED_TYPE: &str = "restaurant";
pub const MAX_RESULT_COUNT: u32 = 10;
pub const SEARCH_FIELD_MASK: &str = "places.id,places.displayName.text,places.formattedAddress,\
places.websiteUri,places.rating,places.photos.name";
pub const DETAILS_FIELD_MASK: &str =
    "currentOpeningHours.openNow,currentOpeningHours.weekdayDescriptions,reviews";

const API_KEY_HEADER: &str = "X-Goog-Api-Key";
const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";

/// Outbound calls the aggregation pipeline depends on.
#[async_trait]
pub trait PlacesApi: Send + Sync {
    async fn search_nearby(&self, request: &SearchRequest) -> Result<Vec<RawPlace>, PlacesError>;

    async fn resolve_photo(&self, photo_name: &str) -> Result<String, MediaUnresolved>;

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError>;
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SearchNearbyBody {
    included_types: [&'static str; 1],
    max_result_count: u32,
    location_restriction: LocationRestriction,
}

#[derive(Serialize, Debug)]
struct LocationRestriction {
    circle: Circle,
}

#[derive(Serialize, Debug)]
struct Circle {
    center: LatLng,
    radius: f64,
}

#[derive(Serialize, Debug)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

pub struct GooglePlacesRepo {
    http_client: Client,
    settings: PlacesSettings,
}

impl GooglePlacesRepo {
    pub fn new(settings: PlacesSettings) -> Result<Self, PlacesError> {
        let http_client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(PlacesError::Network)?;

        Ok(Self {
            http_client,
            settings,
        })
    }

    async fn ensure_success(response: Response) -> Result<Response, PlacesError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(PlacesError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn fetch_photo_uri(&self, photo_name: &str) -> Result<String, PlacesError> {
        let url = format!("{}/{}/media", self.settings.base_url, photo_name);
        let max_px = self.settings.photo_max_px.to_string();

        let response = self
            .http_client
            .get(&url)
            .header(API_KEY_HEADER, &self.settings.api_key)
            .query(&[
                ("maxHeightPx", max_px.as_str()),
                ("maxWidthPx", max_px.as_str()),
                ("skipHttpRedirect", "true"),
            ])
            .send()
            .await
            .map_err(PlacesError::from_reqwest)?;

        let image: RestaurantImage = Self::ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| PlacesError::InvalidResponse(e.to_string()))?;

        image
            .photo_uri
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| PlacesError::InvalidResponse("photoUri missing".to_string()))
    }
}

#[async_trait]
impl PlacesApi for GooglePlacesRepo {
    async fn search_nearby(&self, request: &SearchRequest) -> Result<Vec<RawPlace>, PlacesError> {
        let url = format!("{}/places:searchNearby", self.settings.base_url);
        let body = SearchNearbyBody {
            included_types: [INCLUDED_TYPE],
            max_result_count: MAX_RESULT_COUNT,
            location_restriction: LocationRestriction {
                circle: Circle {
                    center: LatLng {
                        latitude: request.latitude,
                        longitude: request.longitude,
                    },
                    radius: f64::from(request.radius_meters),
                },
            },
        };

        let response = self
            .http_client
            .post(&url)
            .header(API_KEY_HEADER, &self.settings.api_key)
            .header(FIELD_MASK_HEADER, SEARCH_FIELD_MASK)
            .json(&body)
            .send()
            .await
            .map_err(PlacesError::from_reqwest)?;

        let search_response: NearbySearchResponse = Self::ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| PlacesError::InvalidResponse(e.to_string()))?;

        debug!(
            "Nearby search around ({}, {}) within {}m returned {} places",
            request.latitude,
            request.longitude,
            request.radius_meters,
            search_response.places.len()
        );
        Ok(search_response.places)
    }

    async fn resolve_photo(&self, photo_name: &str) -> Result<String, MediaUnresolved> {
        debug!("Resolving photo: {}", photo_name);
        self.fetch_photo_uri(photo_name)
            .await
            .map_err(|source| MediaUnresolved {
                photo_name: photo_name.to_string(),
                source,
            })
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let url = format!("{}/places/{}", self.settings.base_url, place_id);

        let response = self
            .http_client
            .get(&url)
            .header(API_KEY_HEADER, &self.settings.api_key)
            .header(FIELD_MASK_HEADER, DETAILS_FIELD_MASK)
            .send()
            .await
            .map_err(PlacesError::from_reqwest)?;

        // Unknown ids come back as 404, malformed ones as 400.
        if matches!(response.status(), StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST) {
            warn!("Places provider has no details for place: {}", place_id);
            return Err(PlacesError::NotFound(place_id.to_string()));
        }

        Self::ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| PlacesError::InvalidResponse(e.to_string()))
    }
}
