//! Great-circle distance shared by route construction and 2-opt.
//!
//! Straight-line only; campus paths are not modelled.

use crate::model::Location;

/// Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance in meters between two (lat, lng) points in degrees.
///
/// Inputs are not range-checked.
pub fn haversine_m(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Distance in meters between two locations.
pub fn distance(from: &Location, to: &Location) -> f64 {
    haversine_m(from.coords(), to.coords())
}

/// Sum of consecutive legs along `path`, starting at `origin` when given.
pub fn path_length<'a, I>(origin: Option<&Location>, path: I) -> f64
where
    I: IntoIterator<Item = &'a Location>,
{
    let mut total = 0.0;
    let mut prev = origin;
    for location in path {
        if let Some(prev) = prev {
            total += distance(prev, location);
        }
        prev = Some(location);
    }
    total
}
