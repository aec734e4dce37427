//! Planner events handed to the notification collaborator.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PlannerError;
use crate::model::{RouteId, RoutePlan};
use crate::traits::NotificationSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    RouteOptimized,
    RouteStarted,
    RouteCompleted,
    RouteCancelled,
    StopArrived,
    StopCompleted,
}

/// A single `{type, title, message}` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub route_id: RouteId,
    pub title: String,
    pub message: String,
}

impl Notification {
    fn new(
        kind: NotificationKind,
        plan: &RoutePlan,
        title: impl Into<String>,
        message: String,
    ) -> Self {
        Self {
            kind,
            route_id: plan.id,
            title: title.into(),
            message,
        }
    }

    pub fn route_optimized(plan: &RoutePlan) -> Self {
        Self::new(
            NotificationKind::RouteOptimized,
            plan,
            "Route optimized",
            format!(
                "{} stops, {:.2} km total",
                plan.points.len(),
                plan.total_distance_m / 1000.0
            ),
        )
    }

    pub fn route_started(plan: &RoutePlan) -> Self {
        Self::new(
            NotificationKind::RouteStarted,
            plan,
            "Route started",
            format!("Delivery run with {} stops is under way", plan.points.len()),
        )
    }

    pub fn route_completed(plan: &RoutePlan) -> Self {
        Self::new(
            NotificationKind::RouteCompleted,
            plan,
            "Route completed",
            format!(
                "All deliveries done, total time {}",
                format_duration(plan.estimated_duration_secs)
            ),
        )
    }

    pub fn route_cancelled(plan: &RoutePlan) -> Self {
        let progress = plan.progress();
        Self::new(
            NotificationKind::RouteCancelled,
            plan,
            "Route cancelled",
            format!(
                "Route cancelled with {} of {} stops completed",
                progress.completed,
                plan.points.len()
            ),
        )
    }

    /// Fails with `StopNotFound` when `index` is out of range.
    pub fn stop_arrived(plan: &RoutePlan, index: usize) -> Result<Self, PlannerError> {
        let location = &plan.stop(index)?.location;
        Ok(Self::new(
            NotificationKind::StopArrived,
            plan,
            "Reached location",
            format!("Arrived at {}", describe(&location.name, &location.address)),
        ))
    }

    /// Fails with `StopNotFound` when `index` is out of range.
    pub fn stop_completed(plan: &RoutePlan, index: usize) -> Result<Self, PlannerError> {
        let location = &plan.stop(index)?.location;
        Ok(Self::new(
            NotificationKind::StopCompleted,
            plan,
            "Stop finished",
            format!("Finished delivery at {}", location.name),
        ))
    }
}

fn describe(name: &str, address: &str) -> String {
    if address.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, address)
    }
}

/// Human-readable duration: `45s`, `12m 30s`, `1h 05m`.
pub fn format_duration(secs: f64) -> String {
    let total = secs.max(0.0).round() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}h {:02}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Writes every event to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        info!(
            route_id = %notification.route_id,
            kind = ?notification.kind,
            title = %notification.title,
            "{}",
            notification.message
        );
    }
}

/// Keeps every event in memory, for hosts that poll instead of push.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Notification> {
        self.events.lock().clone()
    }

    pub fn kinds(&self) -> Vec<NotificationKind> {
        self.events.lock().iter().map(|event| event.kind).collect()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.events.lock().push(notification.clone());
    }
}
