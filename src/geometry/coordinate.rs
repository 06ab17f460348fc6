use crate::Degrees;
use crate::Energy;

/// A (longitude, latitude) pair in the plane.
///
/// Distances are taken directly on the degree values, without projection.
/// At the scale of a single delivery import the distortion is uniform enough
/// that it does not change which cluster a stop belongs to.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    lon: Degrees,
    lat: Degrees,
}

impl Coordinate {
    pub fn lon(&self) -> Degrees {
        self.lon
    }
    pub fn lat(&self) -> Degrees {
        self.lat
    }
    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
    /// Squared Euclidean distance.
    pub fn distance(&self, other: &Self) -> Energy {
        let dx = self.lon - other.lon;
        let dy = self.lat - other.lat;
        dx * dx + dy * dy
    }
    /// Moves this coordinate by polar offset (radius, angle in radians).
    pub fn nudge(&self, radius: Degrees, angle: f64) -> Self {
        Self {
            lon: self.lon + radius * angle.cos(),
            lat: self.lat + radius * angle.sin(),
        }
    }
}

impl From<(Degrees, Degrees)> for Coordinate {
    fn from((lon, lat): (Degrees, Degrees)) -> Self {
        Self { lon, lat }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}
