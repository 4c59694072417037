pub mod geo;
pub mod models;

// Re-export commonly used items
pub use geo::{GeoPoint, haversine_distance_km};
