use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of decimals used when matching a coordinate against a precomputed matrix.
pub const COORDINATE_PRECISION: f64 = 1_000_000.0;

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A coordinate rounded to 6 decimal places, usable as a hash key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinateKey(i64, i64);

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Coordinates { lat, lng }
    }

    pub fn key(&self) -> CoordinateKey {
        CoordinateKey(
            (self.lat * COORDINATE_PRECISION).round() as i64,
            (self.lng * COORDINATE_PRECISION).round() as i64,
        )
    }
}

impl From<&Coordinates> for geo::Point<f64> {
    fn from(coordinates: &Coordinates) -> Self {
        geo::Point::new(coordinates.lng, coordinates.lat)
    }
}

impl From<Coordinates> for geo::Point<f64> {
    fn from(coordinates: Coordinates) -> Self {
        geo::Point::new(coordinates.lng, coordinates.lat)
    }
}
