pub mod google_places_repo;
#[cfg(test)]
pub mod fake_places_repo;
