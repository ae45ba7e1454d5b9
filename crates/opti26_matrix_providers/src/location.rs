use serde::{Deserialize, Serialize};

/// A point on the map, longitude first like the routing service expects.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, PartialEq)]
pub struct Location {
    pub lng: f64,
    pub lat: f64,
}

impl Location {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl From<Location> for geo_types::Point {
    fn from(value: Location) -> Self {
        geo_types::Point::new(value.lng, value.lat)
    }
}

impl From<&Location> for geo_types::Point {
    fn from(value: &Location) -> Self {
        geo_types::Point::new(value.lng, value.lat)
    }
}
