//! Great-circle distance on a spherical Earth model.

use dispatch_core::Location;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two points, in meters.
pub fn haversine_m(a: Location, b: Location) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance() {
        let p = Location::new(-26.2041, 28.0473);
        assert_eq!(haversine_m(p, p), 0.0);
    }

    #[test]
    fn test_known_distance() {
        // Johannesburg to Pretoria, roughly 54 km.
        let jhb = Location::new(-26.2041, 28.0473);
        let pta = Location::new(-25.7479, 28.2293);
        let d = haversine_m(jhb, pta);
        assert!((50_000.0..60_000.0).contains(&d), "got {}", d);
    }

    #[test]
    fn test_symmetric() {
        let a = Location::new(10.0, 20.0);
        let b = Location::new(-5.0, 140.0);
        let d1 = haversine_m(a, b);
        let d2 = haversine_m(b, a);
        assert!((d1 - d2).abs() < 1e-6);
    }

    #[test]
    fn test_high_latitude_not_distorted() {
        // One degree of longitude near the pole is far shorter than at the
        // equator; a flat model would report them equal.
        let polar = haversine_m(Location::new(89.0, 0.0), Location::new(89.0, 1.0));
        let equatorial = haversine_m(Location::new(0.0, 0.0), Location::new(0.0, 1.0));
        assert!(polar < equatorial / 10.0);
    }
}
