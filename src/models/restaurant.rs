use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

/// One place as returned by the upstream nearby search, limited to the
/// fields requested through the field mask.
#[serde_as]
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawPlace {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<LocalizedText>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub website_uri: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub photos: Vec<Photo>,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct LocalizedText {
    #[serde(default)]
    pub text: String,
}

/// Photo reference, exchanged for a URL through the media endpoint.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Photo {
    pub name: String,
}

#[serde_as]
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct NearbySearchResponse {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub places: Vec<RawPlace>,
}

impl RawPlace {
    pub fn first_photo(&self) -> Option<&Photo> {
        self.photos.first()
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSummary {
    pub id: String,
    pub name: String,
    pub address: String,
    pub website_uri: String,
    pub rating: Option<f64>,
    pub image_uri: String,
}

impl RestaurantSummary {
    pub fn from_place(place: RawPlace, image_uri: String) -> Self {
        Self {
            id: place.id,
            name: place.display_name.map(|name| name.text).unwrap_or_default(),
            address: place.formatted_address.unwrap_or_default(),
            website_uri: place.website_uri.unwrap_or_default(),
            rating: place.rating,
            image_uri,
        }
    }
}

/// Extended place data as returned by the upstream details endpoint.
#[serde_as]
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetails {
    #[serde(default)]
    pub current_opening_hours: Option<OpeningHours>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub reviews: Vec<PlaceReview>,
}

#[serde_as]
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub weekday_descriptions: Vec<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlaceReview {
    #[serde(default)]
    pub author_attribution: Option<AuthorAttribution>,
    #[serde(default)]
    pub text: Option<LocalizedText>,
    #[serde(default)]
    pub relative_publish_time_description: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuthorAttribution {
    #[serde(default)]
    pub display_name: String,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDetails {
    pub is_open_now: bool,
    pub opening_hours: Vec<String>,
    pub reviews: Vec<Review>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub author: String,
    pub text: String,
    pub relative_time: String,
}

impl From<PlaceDetails> for RestaurantDetails {
    fn from(details: PlaceDetails) -> Self {
        let (is_open_now, opening_hours) = match details.current_opening_hours {
            Some(hours) => (hours.open_now.unwrap_or(false), hours.weekday_descriptions),
            None => (false, Vec::new()),
        };

        let reviews = details
            .reviews
            .into_iter()
            .map(|review| Review {
                author: review
                    .author_attribution
                    .map(|author| author.display_name)
                    .unwrap_or_default(),
                text: review.text.map(|text| text.text).unwrap_or_default(),
                relative_time: review.relative_publish_time_description.unwrap_or_default(),
            })
            .collect();

        Self {
            is_open_now,
            opening_hours,
            reviews,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn place_without_optional_fields_maps_to_empty_strings() {
        let place: RawPlace = serde_json::from_value(json!({
            "id": "abc",
            "displayName": { "text": "Noodle Bar" },
            "formattedAddress": "1 Main St",
        }))
        .unwrap();

        assert!(place.first_photo().is_none());
        let summary = RestaurantSummary::from_place(place, String::new());
        assert_eq!(summary.website_uri, "");
        assert_eq!(summary.image_uri, "");
        assert_eq!(summary.rating, None);
        assert_eq!(summary.name, "Noodle Bar");
    }

    #[test]
    fn summary_serializes_camel_case_and_keeps_rating_verbatim() {
        let place = RawPlace {
            id: "abc".to_string(),
            display_name: Some(LocalizedText { text: "Cafe".to_string() }),
            formatted_address: Some("2 Side St".to_string()),
            website_uri: Some("https://cafe.example".to_string()),
            rating: Some(7.5),
            photos: vec![],
        };
        let value = serde_json::to_value(RestaurantSummary::from_place(
            place,
            "https://img.example/1".to_string(),
        ))
        .unwrap();

        assert_eq!(
            value,
            json!({
                "id": "abc",
                "name": "Cafe",
                "address": "2 Side St",
                "websiteUri": "https://cafe.example",
                "rating": 7.5,
                "imageUri": "https://img.example/1",
            })
        );
    }

    #[test]
    fn empty_search_response_has_no_places() {
        let response: NearbySearchResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.places.is_empty());
    }

    #[test]
    fn null_photos_are_treated_as_empty() {
        let place: RawPlace =
            serde_json::from_value(json!({ "id": "abc", "photos": null })).unwrap();
        assert!(place.photos.is_empty());
    }

    #[test]
    fn details_are_reshaped() {
        let details: PlaceDetails = serde_json::from_value(json!({
            "currentOpeningHours": {
                "openNow": true,
                "weekdayDescriptions": ["Monday: 9:00 AM – 5:00 PM", "Tuesday: Closed"]
            },
            "reviews": [{
                "authorAttribution": { "displayName": "Sam" },
                "text": { "text": "Great dumplings" },
                "relativePublishTimeDescription": "a week ago"
            }]
        }))
        .unwrap();

        let details = RestaurantDetails::from(details);
        assert!(details.is_open_now);
        assert_eq!(details.opening_hours.len(), 2);
        assert_eq!(
            details.reviews,
            vec![Review {
                author: "Sam".to_string(),
                text: "Great dumplings".to_string(),
                relative_time: "a week ago".to_string(),
            }]
        );
    }

    #[test]
    fn details_without_hours_are_closed() {
        let details = RestaurantDetails::from(PlaceDetails::default());
        assert!(!details.is_open_now);
        assert!(details.opening_hours.is_empty());
        assert!(details.reviews.is_empty());
    }
}
