//! Error type shared by every fallible planner operation.

use thiserror::Error;

use crate::model::RouteId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    /// A route- or stop-level state change would break the forward-only ordering.
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("route {0} not found")]
    RouteNotFound(RouteId),

    #[error("stop {index} not found in route {route_id}")]
    StopNotFound { route_id: RouteId, index: usize },

    #[error("invalid planner configuration: {0}")]
    InvalidConfig(String),
}

impl PlannerError {
    pub(crate) fn transition(from: impl ToString, to: impl ToString) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// True for both the route and the stop flavour of "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RouteNotFound(_) | Self::StopNotFound { .. })
    }
}
