//! 2-opt improvement of a constructed route.
//!
//! # Algorithm
//!
//! The stop sequence is treated as an open path (no return to the depot). For
//! each pair `(i, j)` with `i + 2 <= j`, reverse the segment `[i+1..=j]` and
//! keep the result if the path gets strictly shorter, then restart the scan
//! from the top (first improvement). The pair `(0, n-1)` is skipped. Because
//! position 0 is never inside a reversed segment, the first stop and the depot
//! leg stay fixed.
//!
//! The result is 2-opt locally optimal, not globally optimal. Running it again
//! on its own output changes nothing.

use tracing::debug;

use crate::config::PlannerConfig;
use crate::haversine;
use crate::model::{secs_to_duration, shift, Location, RoutePlan, Stop};

/// Return an improved copy of `plan`.
///
/// Plans with fewer than 3 stops, or with no improving swap, come back
/// unchanged. Stops carry their own status, order ids and dwell to their new
/// position.
pub fn optimize_route(plan: &RoutePlan, config: &PlannerConfig) -> RoutePlan {
    if plan.points.len() < 3 {
        return plan.clone();
    }

    let locations: Vec<&Location> = plan.locations().collect();
    let (order, swaps) = two_opt_order(&locations);
    if swaps == 0 {
        debug!(route_id = %plan.id, "route already 2-opt optimal");
        return plan.clone();
    }

    let mut improved = plan.clone();
    improved.points = order.iter().map(|&index| plan.points[index].clone()).collect();
    retime(&mut improved, config);
    improved.recompute_totals();

    debug!(
        route_id = %plan.id,
        swaps,
        before_m = plan.total_distance_m,
        after_m = improved.total_distance_m,
        "2-opt improved route"
    );

    improved
}

/// Improved visiting order as indices into `locations`, plus the number of
/// accepted swaps.
pub fn two_opt_order(locations: &[&Location]) -> (Vec<usize>, usize) {
    let n = locations.len();
    let mut best: Vec<usize> = (0..n).collect();
    if n < 3 {
        return (best, 0);
    }

    let mut best_distance = order_length(locations, &best);
    let mut swaps = 0;

    loop {
        let mut improved = false;

        'scan: for i in 0..n - 2 {
            for j in i + 2..n {
                if i == 0 && j == n - 1 {
                    continue;
                }

                let mut candidate = best.clone();
                candidate[i + 1..=j].reverse();
                let distance = order_length(locations, &candidate);

                if distance < best_distance {
                    best = candidate;
                    best_distance = distance;
                    swaps += 1;
                    improved = true;
                    break 'scan;
                }
            }
        }

        if !improved {
            break;
        }
    }

    (best, swaps)
}

fn order_length(locations: &[&Location], order: &[usize]) -> f64 {
    haversine::path_length(None, order.iter().map(|&index| locations[index]))
}

/// Re-derive arrival/departure along the current stop order, keeping each
/// stop's own dwell.
fn retime(plan: &mut RoutePlan, config: &PlannerConfig) {
    let mut prev_location = &plan.depot;
    let mut prev_departure = plan.start_time;

    for stop in plan.points.iter_mut() {
        let dwell = stop.dwell();
        let travel = config.travel_secs(haversine::distance(prev_location, &stop.location));
        stop.estimated_arrival = shift(prev_departure, secs_to_duration(travel));
        stop.estimated_departure = shift(stop.estimated_arrival, dwell);

        prev_location = &stop.location;
        prev_departure = stop.estimated_departure;
    }
}

/// True when no 2-opt move shortens the path through `stops`.
pub fn is_locally_optimal(stops: &[Stop]) -> bool {
    let locations: Vec<&Location> = stops.iter().map(|stop| &stop.location).collect();
    two_opt_order(&locations).1 == 0
}
