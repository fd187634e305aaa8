//! Stop identity and location types.

use std::fmt;
use std::sync::Arc;

const DEG_TO_RAD: f64 = 0.017_453_292_38;
const EARTH_RADIUS_IN_METERS: f64 = 6_372_797.560_856;

/// Error returned when parsing an invalid stop name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop name: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// The unique name of a stop.
///
/// Stop names are non-empty and carry no surrounding whitespace. Cloning is
/// cheap, since edges and search maps hold many copies of the same name.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::StopId;
///
/// let stop = StopId::parse("  Rondo Grunwaldzkie ").unwrap();
/// assert_eq!(stop.as_str(), "Rondo Grunwaldzkie");
///
/// assert!(StopId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(Arc<str>);

impl StopId {
    /// Parse a stop name, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }
        Ok(Self(Arc::from(trimmed)))
    }

    /// Returns the stop name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.as_str())
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns true if both components are finite and within WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Great-circle distance in metres (haversine).
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        let longitude_arc = (self.lon - other.lon) * DEG_TO_RAD;
        let latitude_arc = (self.lat - other.lat) * DEG_TO_RAD;
        let latitude_h = (latitude_arc * 0.5).sin();
        let latitude_h = latitude_h * latitude_h;
        let longitude_h = (longitude_arc * 0.5).sin();
        let longitude_h = longitude_h * longitude_h;
        let tmp = (self.lat * DEG_TO_RAD).cos() * (other.lat * DEG_TO_RAD).cos();
        EARTH_RADIUS_IN_METERS * 2.0 * (latitude_h + tmp * longitude_h).sqrt().asin()
    }
}

/// A named stop with its location. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    id: StopId,
    location: Coordinates,
}

impl Stop {
    pub fn new(id: StopId, location: Coordinates) -> Self {
        Self { id, location }
    }

    pub fn id(&self) -> &StopId {
        &self.id
    }

    pub fn location(&self) -> Coordinates {
        self.location
    }

    /// Great-circle distance to another stop in metres.
    pub fn distance_to(&self, other: &Stop) -> f64 {
        self.location.distance_to(&other.location)
    }
}
