use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::errors::ApiError;

pub const DEFAULT_RADIUS_METERS: u32 = 500;
pub const ALLOWED_RADII_METERS: [u32; 4] = [500, 1000, 2000, 3000];

/// Body of `POST /api/res` as sent by the client. Fields stay untyped so
/// that wrong types can be reported as a 400 instead of a serde rejection.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct SearchRequestBody {
    #[serde(default)]
    pub latitude: Option<Value>,
    #[serde(default)]
    pub longitude: Option<Value>,
    #[serde(default)]
    pub distance: Option<Value>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: u32,
}

impl TryFrom<SearchRequestBody> for SearchRequest {
    type Error = ApiError;

    fn try_from(body: SearchRequestBody) -> Result<Self, Self::Error> {
        let latitude = body.latitude.as_ref().and_then(Value::as_f64);
        let longitude = body.longitude.as_ref().and_then(Value::as_f64);

        let (latitude, longitude) = match (latitude, longitude) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => {
                return Err(ApiError::InvalidRequest(
                    "Invalid or missing latitude/longitude".to_string(),
                ))
            }
        };

        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(ApiError::InvalidRequest(
                "Latitude/longitude out of range".to_string(),
            ));
        }

        let radius_meters = match body.distance {
            None | Some(Value::Null) => DEFAULT_RADIUS_METERS,
            Some(distance) => parse_radius(&distance)?,
        };

        Ok(Self {
            latitude,
            longitude,
            radius_meters,
        })
    }
}

fn parse_radius(distance: &Value) -> Result<u32, ApiError> {
    distance
        .as_f64()
        .filter(|meters| meters.fract() == 0.0)
        .and_then(|meters| {
            ALLOWED_RADII_METERS
                .iter()
                .copied()
                .find(|allowed| f64::from(*allowed) == meters)
        })
        .ok_or_else(|| {
            ApiError::InvalidRequest(format!(
                "Invalid distance, expected one of {:?}",
                ALLOWED_RADII_METERS
            ))
        })
}
