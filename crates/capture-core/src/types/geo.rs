//! Geographic helpers: great-circle distance, distance labels, and the
//! fixed distance buckets used by the session list filter.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Coordinates {
    /// Create a new coordinate pair.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to another point in kilometres (Haversine).
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

/// Format a distance in kilometres for display.
///
/// Below 1 km the distance is shown in whole metres ("490m"); at or above
/// 1 km it is shown with one decimal ("1.0km").
pub fn format_distance_km(km: f64) -> String {
    if km < 1.0 {
        format!("{}m", (km * 1000.0).round() as i64)
    } else {
        format!("{:.1}km", km)
    }
}

/// The five fixed distance buckets offered by the session list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceBucket {
    /// Under 1 km.
    Under1,
    /// 1 to 3 km.
    From1To3,
    /// 3 to 5 km.
    From3To5,
    /// 5 to 10 km.
    From5To10,
    /// 10 km or more.
    Over10,
}

impl DistanceBucket {
    /// Whether a distance in kilometres falls inside this bucket.
    pub fn contains(&self, km: f64) -> bool {
        match self {
            Self::Under1 => km < 1.0,
            Self::From1To3 => (1.0..3.0).contains(&km),
            Self::From3To5 => (3.0..5.0).contains(&km),
            Self::From5To10 => (5.0..10.0).contains(&km),
            Self::Over10 => km >= 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_known_distance() {
        // Seoul City Hall to Gangnam Station is roughly 9 km.
        let city_hall = Coordinates::new(37.5663, 126.9779);
        let gangnam = Coordinates::new(37.4979, 127.0276);
        let d = city_hall.distance_km(&gangnam);
        assert!((8.0..10.0).contains(&d), "got {d}");
    }

    #[test]
    fn haversine_zero_for_same_point() {
        let p = Coordinates::new(37.0, 127.0);
        assert!(p.distance_km(&p) < 1e-9);
    }

    #[test]
    fn formats_metres_below_one_km() {
        assert_eq!(format_distance_km(0.49), "490m");
        assert_eq!(format_distance_km(0.0005), "1m");
        assert_eq!(format_distance_km(0.999), "999m");
    }

    #[test]
    fn formats_one_decimal_km_at_or_above_one() {
        assert_eq!(format_distance_km(1.0), "1.0km");
        assert_eq!(format_distance_km(12.34), "12.3km");
    }

    #[test]
    fn buckets_partition_the_line() {
        for (km, bucket) in [
            (0.5, DistanceBucket::Under1),
            (1.0, DistanceBucket::From1To3),
            (2.99, DistanceBucket::From1To3),
            (3.0, DistanceBucket::From3To5),
            (5.0, DistanceBucket::From5To10),
            (10.0, DistanceBucket::Over10),
            (42.0, DistanceBucket::Over10),
        ] {
            assert!(bucket.contains(km), "{km} should be in {bucket:?}");
        }
        assert!(!DistanceBucket::Under1.contains(1.0));
        assert!(!DistanceBucket::From5To10.contains(10.0));
    }
}
