use serde::{Deserialize, Serialize};

/// Body returned by the media endpoint when redirects are skipped.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantImage {
    #[serde(default)]
    pub photo_uri: Option<String>,
}
