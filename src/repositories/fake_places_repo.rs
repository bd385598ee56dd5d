use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use async_trait::async_trait;
use crate::errors::{MediaUnresolved, PlacesError};
use crate::models::restaurant::{LocalizedText, Photo, PlaceDetails, RawPlace};
use crate::models::search_request::SearchRequest;
use crate::repositories::google_places_repo::PlacesApi;

/// How the fake answers a media lookup for one photo name.
#[derive(Clone, Debug)]
pub enum PhotoOutcome {
    Resolved(String),
    Failed,
    ResolvedAfter(Duration, String),
}

/// In-memory places provider that records how often it was called.
#[derive(Default)]
pub struct FakePlacesRepo {
    pub places: Vec<RawPlace>,
    pub search_fails: bool,
    pub photos: HashMap<String, PhotoOutcome>,
    pub details: HashMap<String, PlaceDetails>,
    pub search_calls: AtomicUsize,
    pub media_calls: AtomicUsize,
    pub details_calls: AtomicUsize,
}

impl FakePlacesRepo {
    pub fn with_places(places: Vec<RawPlace>) -> Self {
        Self {
            places,
            ..Default::default()
        }
    }

    pub fn failing_search() -> Self {
        Self {
            search_fails: true,
            ..Default::default()
        }
    }

    pub fn photo(mut self, name: &str, outcome: PhotoOutcome) -> Self {
        self.photos.insert(name.to_string(), outcome);
        self
    }

    pub fn outbound_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
            + self.media_calls.load(Ordering::SeqCst)
            + self.details_calls.load(Ordering::SeqCst)
    }
}

pub fn place(id: &str, photo_names: &[&str]) -> RawPlace {
    RawPlace {
        id: id.to_string(),
        display_name: Some(LocalizedText {
            text: format!("Restaurant {}", id),
        }),
        formatted_address: Some(format!("{} Food Street", id)),
        website_uri: None,
        rating: Some(4.2),
        photos: photo_names
            .iter()
            .map(|name| Photo {
                name: name.to_string(),
            })
            .collect(),
    }
}

#[async_trait]
impl PlacesApi for FakePlacesRepo {
    async fn search_nearby(&self, _request: &SearchRequest) -> Result<Vec<RawPlace>, PlacesError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.search_fails {
            return Err(PlacesError::Status {
                status: 503,
                body: "backend unavailable".to_string(),
            });
        }
        Ok(self.places.clone())
    }

    async fn resolve_photo(&self, photo_name: &str) -> Result<String, MediaUnresolved> {
        self.media_calls.fetch_add(1, Ordering::SeqCst);
        let unresolved = || MediaUnresolved {
            photo_name: photo_name.to_string(),
            source: PlacesError::Status {
                status: 500,
                body: String::new(),
            },
        };

        match self.photos.get(photo_name) {
            Some(PhotoOutcome::Resolved(uri)) => Ok(uri.clone()),
            Some(PhotoOutcome::ResolvedAfter(delay, uri)) => {
                tokio::time::sleep(*delay).await;
                Ok(uri.clone())
            }
            Some(PhotoOutcome::Failed) | None => Err(unresolved()),
        }
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        self.details
            .get(place_id)
            .cloned()
            .ok_or_else(|| PlacesError::NotFound(place_id.to_string()))
    }
}
