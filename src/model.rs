//! Route plan data model and its lifecycle.
//!
//! A [`RoutePlan`] owns its [`Stop`]s. After construction and optimization the
//! stop order is frozen; only route status, stop status and attached order ids
//! change from then on.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PlannerError;
use crate::haversine;

/// Unique identifier of a route plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(Uuid);

impl RouteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RouteId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RouteId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A place a courier starts from or delivers to.
///
/// Two locations are equal when their ids are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            address: String::new(),
            latitude,
            longitude,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Coordinates as (lat, lng).
    pub fn coords(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopStatus {
    Pending,
    Arrived,
    Completed,
}

impl StopStatus {
    /// The only status a stop may move to from `self`.
    pub fn next(self) -> Option<StopStatus> {
        match self {
            StopStatus::Pending => Some(StopStatus::Arrived),
            StopStatus::Arrived => Some(StopStatus::Completed),
            StopStatus::Completed => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StopStatus::Pending => "pending",
            StopStatus::Arrived => "arrived",
            StopStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for StopStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    Planning,
    InProgress,
    Completed,
    Cancelled,
}

impl RouteStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, RouteStatus::Completed | RouteStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RouteStatus::Planning => "planning",
            RouteStatus::InProgress => "in_progress",
            RouteStatus::Completed => "completed",
            RouteStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scheduled visit to a location within a route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stop {
    pub location: Location,
    pub estimated_arrival: DateTime<Utc>,
    pub estimated_departure: DateTime<Utc>,
    pub status: StopStatus,
    /// Orders handed over here. Filled in by the order system, never computed.
    pub order_ids: BTreeSet<String>,
}

impl Stop {
    pub fn new(location: Location, estimated_arrival: DateTime<Utc>, dwell: Duration) -> Self {
        Self {
            location,
            estimated_arrival,
            estimated_departure: shift(estimated_arrival, dwell),
            status: StopStatus::Pending,
            order_ids: BTreeSet::new(),
        }
    }

    /// Time spent at the stop.
    pub fn dwell(&self) -> Duration {
        self.estimated_departure - self.estimated_arrival
    }
}

/// Read-only summary of how far a courier has got along a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteProgress {
    pub pending: usize,
    pub arrived: usize,
    pub completed: usize,
    /// First stop in itinerary order that is not completed yet.
    pub next_stop: Option<usize>,
}

/// The aggregate produced by planning: an ordered itinerary plus its lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePlan {
    pub id: RouteId,
    pub delivery_person_id: String,
    pub depot: Location,
    pub points: Vec<Stop>,
    /// Meters, depot through every stop in order.
    pub total_distance_m: f64,
    /// Seconds from leaving the depot to leaving the last stop, depot leg included.
    pub estimated_duration_secs: f64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: RouteStatus,
}

impl RoutePlan {
    pub(crate) fn new(
        delivery_person_id: impl Into<String>,
        depot: Location,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RouteId::new(),
            delivery_person_id: delivery_person_id.into(),
            depot,
            points: Vec::new(),
            total_distance_m: 0.0,
            estimated_duration_secs: 0.0,
            start_time,
            end_time: None,
            status: RouteStatus::Planning,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.points.iter().map(|stop| &stop.location)
    }

    pub fn stop(&self, index: usize) -> Result<&Stop, PlannerError> {
        self.points.get(index).ok_or(PlannerError::StopNotFound {
            route_id: self.id,
            index,
        })
    }

    /// Recompute distance and duration from the current stop order and timestamps.
    pub fn recompute_totals(&mut self) {
        self.total_distance_m = haversine::path_length(Some(&self.depot), self.locations());
        self.estimated_duration_secs = match self.points.last() {
            Some(last) => duration_secs(last.estimated_departure - self.start_time),
            None => 0.0,
        };
    }

    /// Move one stop forward: `pending -> arrived -> completed`.
    ///
    /// Returns the status the stop had before. Nothing changes on error.
    pub fn advance_stop(
        &mut self,
        index: usize,
        to: StopStatus,
    ) -> Result<StopStatus, PlannerError> {
        if self.status.is_terminal() {
            return Err(PlannerError::transition(
                format!("{} route", self.status),
                format!("{} stop", to),
            ));
        }
        let route_id = self.id;
        let stop = self
            .points
            .get_mut(index)
            .ok_or(PlannerError::StopNotFound { route_id, index })?;

        let from = stop.status;
        if from.next() != Some(to) {
            return Err(PlannerError::transition(from, to));
        }
        stop.status = to;
        Ok(from)
    }

    /// `planning -> in_progress`.
    pub fn start(&mut self) -> Result<(), PlannerError> {
        if self.status != RouteStatus::Planning {
            return Err(PlannerError::transition(self.status, RouteStatus::InProgress));
        }
        self.status = RouteStatus::InProgress;
        Ok(())
    }

    /// `in_progress -> completed`, stamping `end_time`.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<(), PlannerError> {
        if self.status != RouteStatus::InProgress {
            return Err(PlannerError::transition(self.status, RouteStatus::Completed));
        }
        self.status = RouteStatus::Completed;
        self.end_time = Some(now);
        Ok(())
    }

    /// Any non-terminal status `-> cancelled`, stamping `end_time`.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<(), PlannerError> {
        if self.status.is_terminal() {
            return Err(PlannerError::transition(self.status, RouteStatus::Cancelled));
        }
        self.status = RouteStatus::Cancelled;
        self.end_time = Some(now);
        Ok(())
    }

    pub fn attach_orders<I, S>(&mut self, index: usize, order_ids: I) -> Result<(), PlannerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let route_id = self.id;
        let stop = self
            .points
            .get_mut(index)
            .ok_or(PlannerError::StopNotFound { route_id, index })?;
        stop.order_ids.extend(order_ids.into_iter().map(Into::into));
        Ok(())
    }

    pub fn progress(&self) -> RouteProgress {
        let count = |status: StopStatus| {
            self.points
                .iter()
                .filter(|stop| stop.status == status)
                .count()
        };
        RouteProgress {
            pending: count(StopStatus::Pending),
            arrived: count(StopStatus::Arrived),
            completed: count(StopStatus::Completed),
            next_stop: self
                .points
                .iter()
                .position(|stop| stop.status != StopStatus::Completed),
        }
    }
}

/// Seconds (fractional) to a millisecond-precision duration.
///
/// NaN maps to zero; values beyond the representable range saturate.
pub(crate) fn secs_to_duration(secs: f64) -> Duration {
    if secs.is_nan() {
        return Duration::zero();
    }
    let millis = (secs * 1000.0).round();
    if millis >= Duration::MAX.num_milliseconds() as f64 {
        Duration::MAX
    } else if millis <= Duration::MIN.num_milliseconds() as f64 {
        Duration::MIN
    } else {
        Duration::milliseconds(millis as i64)
    }
}

/// `time + offset`, clamped to the representable timestamp range.
pub(crate) fn shift(time: DateTime<Utc>, offset: Duration) -> DateTime<Utc> {
    time.checked_add_signed(offset).unwrap_or(if offset > Duration::zero() {
        DateTime::<Utc>::MAX_UTC
    } else {
        DateTime::<Utc>::MIN_UTC
    })
}

pub(crate) fn duration_secs(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 1000.0
}
