//! Nearest-neighbor route construction.
//!
//! Starting at the depot, repeatedly travel to the closest location not yet
//! visited. O(n²) in the number of locations, which is fine for the handful of
//! drop-offs a single courier carries.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::PlannerConfig;
use crate::haversine;
use crate::model::{secs_to_duration, shift, Location, RoutePlan, Stop};

/// Build the initial itinerary for one courier.
///
/// Ties on distance go to the location that appears first in `locations`.
/// An empty `locations` yields a plan with no stops and zero totals. Locations
/// whose distance is NaN are visited last and contribute no travel time.
pub fn construct_route(
    delivery_person_id: &str,
    depot: &Location,
    locations: &[Location],
    start_time: DateTime<Utc>,
    config: &PlannerConfig,
) -> RoutePlan {
    let mut plan = RoutePlan::new(delivery_person_id, depot.clone(), start_time);
    plan.points.reserve(locations.len());

    let mut remaining: Vec<&Location> = locations.iter().collect();
    let mut current = depot;
    let mut current_time = start_time;
    let dwell = secs_to_duration(config.dwell_secs);

    while !remaining.is_empty() {
        let (next_index, distance) = nearest(current, &remaining);
        let next = remaining.remove(next_index);

        let travel_secs = config.travel_secs(distance);
        let arrival = shift(current_time, secs_to_duration(travel_secs));
        let stop = Stop::new(next.clone(), arrival, dwell);

        plan.total_distance_m += distance;
        plan.estimated_duration_secs += travel_secs + config.dwell_secs;
        current = next;
        current_time = stop.estimated_departure;
        plan.points.push(stop);
    }

    debug!(
        route_id = %plan.id,
        stops = plan.points.len(),
        total_distance_m = plan.total_distance_m,
        "constructed nearest-neighbor route"
    );

    plan
}

/// Index into `candidates` of the closest location and its distance.
///
/// `candidates` must be non-empty.
fn nearest(from: &Location, candidates: &[&Location]) -> (usize, f64) {
    let mut best_index = 0;
    let mut best_distance = haversine::distance(from, candidates[0]);
    for (index, candidate) in candidates.iter().enumerate().skip(1) {
        let distance = haversine::distance(from, candidate);
        let closer = distance < best_distance || (best_distance.is_nan() && !distance.is_nan());
        if closer {
            best_index = index;
            best_distance = distance;
        }
    }
    (best_index, best_distance)
}
