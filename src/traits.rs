//! Seams to the collaborators around the planner.
//!
//! The planner owns no persistence and no delivery channel. Hosts implement
//! these for their own storage and messaging.

use std::sync::Arc;

use crate::error::PlannerError;
use crate::model::{RouteId, RoutePlan};
use crate::notify::Notification;

/// Receives fire-and-forget planner events.
///
/// Implementations swallow their own delivery failures; the planner never
/// retries or queues.
pub trait NotificationSink {
    fn notify(&self, notification: &Notification);
}

impl<T: NotificationSink + ?Sized> NotificationSink for &T {
    fn notify(&self, notification: &Notification) {
        (**self).notify(notification)
    }
}

impl<T: NotificationSink + ?Sized> NotificationSink for Arc<T> {
    fn notify(&self, notification: &Notification) {
        (**self).notify(notification)
    }
}

impl<T: NotificationSink + ?Sized> NotificationSink for Box<T> {
    fn notify(&self, notification: &Notification) {
        (**self).notify(notification)
    }
}

/// Stores route plans by id.
///
/// `update` must run `f` while holding exclusive access to that one plan, so
/// concurrent status changes on the same route are applied one at a time.
pub trait RouteStore {
    fn insert(&self, plan: RoutePlan);

    /// Snapshot of the stored plan.
    fn get(&self, id: &RouteId) -> Option<RoutePlan>;

    /// Mutate a stored plan in place. Fails with `RouteNotFound` for unknown ids.
    fn update<T, F>(&self, id: &RouteId, f: F) -> Result<T, PlannerError>
    where
        F: FnOnce(&mut RoutePlan) -> Result<T, PlannerError>;
}
