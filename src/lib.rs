//! campus-route-planner core
//!
//! Delivery route planning for a campus food-delivery platform: nearest-neighbor
//! construction, 2-opt improvement, per-stop time estimates and the route/stop
//! lifecycle that delivery dashboards poll and mutate.

pub mod config;
pub mod construct;
pub mod error;
pub mod haversine;
pub mod model;
pub mod notify;
pub mod service;
pub mod store;
pub mod traits;
pub mod two_opt;
pub mod webhook;

pub use config::PlannerConfig;
pub use error::PlannerError;
pub use model::{Location, RouteId, RoutePlan, RouteStatus, Stop, StopStatus};
pub use service::{PlanRequest, RoutePlanningService};
