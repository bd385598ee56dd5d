pub mod restaurant;
pub mod restaurant_image;
pub mod search_request;
