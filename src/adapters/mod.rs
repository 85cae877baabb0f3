// Adapters layer: reqwest-backed implementations of the domain ports.

pub mod decrypt_api;
pub mod google_places;

pub use decrypt_api::DecryptApi;
pub use google_places::GooglePlaces;
