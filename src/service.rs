//! Route planning service: construction, optimization and lifecycle updates.
//!
//! Planning is a pure, synchronous computation. Lifecycle operations go through
//! a [`RouteStore`], which serializes changes to any single route. Events are
//! emitted to the [`NotificationSink`] after the store has released the route.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::info;

use crate::config::PlannerConfig;
use crate::construct::construct_route;
use crate::error::PlannerError;
use crate::model::{Location, RouteId, RoutePlan, StopStatus};
use crate::notify::{Notification, TracingNotifier};
use crate::traits::{NotificationSink, RouteStore};
use crate::two_opt::optimize_route;

/// One courier's planning input.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub delivery_person_id: String,
    pub depot: Location,
    pub locations: Vec<Location>,
}

impl PlanRequest {
    pub fn new(
        delivery_person_id: impl Into<String>,
        depot: Location,
        locations: Vec<Location>,
    ) -> Self {
        Self {
            delivery_person_id: delivery_person_id.into(),
            depot,
            locations,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RoutePlanningService<N = TracingNotifier> {
    config: PlannerConfig,
    notifier: N,
}

impl Default for RoutePlanningService<TracingNotifier> {
    fn default() -> Self {
        Self::new(TracingNotifier)
    }
}

impl<N: NotificationSink> RoutePlanningService<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            config: PlannerConfig::default(),
            notifier,
        }
    }

    pub fn with_config(config: PlannerConfig, notifier: N) -> Result<Self, PlannerError> {
        config.validate()?;
        Ok(Self { config, notifier })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Construct and optimize a route starting now.
    ///
    /// Never fails. Coordinates are not validated: a NaN location is visited
    /// last and makes the route totals NaN.
    pub fn plan_route(
        &self,
        delivery_person_id: &str,
        depot: &Location,
        locations: &[Location],
    ) -> RoutePlan {
        self.plan_route_at(delivery_person_id, depot, locations, Utc::now())
    }

    /// Construct and optimize a route with an explicit start time.
    pub fn plan_route_at(
        &self,
        delivery_person_id: &str,
        depot: &Location,
        locations: &[Location],
        start_time: DateTime<Utc>,
    ) -> RoutePlan {
        let initial =
            construct_route(delivery_person_id, depot, locations, start_time, &self.config);
        let plan = optimize_route(&initial, &self.config);

        info!(
            route_id = %plan.id,
            delivery_person_id,
            stops = plan.points.len(),
            total_distance_m = plan.total_distance_m,
            estimated_duration_secs = plan.estimated_duration_secs,
            "route planned"
        );
        self.notifier.notify(&Notification::route_optimized(&plan));

        plan
    }

    pub fn update_stop_status<S: RouteStore>(
        &self,
        store: &S,
        route_id: &RouteId,
        stop_index: usize,
        status: StopStatus,
    ) -> Result<RoutePlan, PlannerError> {
        let (plan, event) = store.update(route_id, |plan| {
            plan.advance_stop(stop_index, status)?;
            let event = match status {
                StopStatus::Completed => Notification::stop_completed(plan, stop_index)?,
                _ => Notification::stop_arrived(plan, stop_index)?,
            };
            Ok((plan.clone(), event))
        })?;

        info!(route_id = %route_id, stop_index, status = %status, "stop status updated");
        self.notifier.notify(&event);
        Ok(plan)
    }

    pub fn start_route<S: RouteStore>(
        &self,
        store: &S,
        route_id: &RouteId,
    ) -> Result<RoutePlan, PlannerError> {
        let plan = store.update(route_id, |plan| {
            plan.start()?;
            Ok(plan.clone())
        })?;

        info!(route_id = %route_id, "route started");
        self.notifier.notify(&Notification::route_started(&plan));
        Ok(plan)
    }

    pub fn complete_route<S: RouteStore>(
        &self,
        store: &S,
        route_id: &RouteId,
    ) -> Result<RoutePlan, PlannerError> {
        let plan = store.update(route_id, |plan| {
            plan.complete(Utc::now())?;
            Ok(plan.clone())
        })?;

        info!(route_id = %route_id, "route completed");
        self.notifier.notify(&Notification::route_completed(&plan));
        Ok(plan)
    }

    pub fn cancel_route<S: RouteStore>(
        &self,
        store: &S,
        route_id: &RouteId,
    ) -> Result<RoutePlan, PlannerError> {
        let plan = store.update(route_id, |plan| {
            plan.cancel(Utc::now())?;
            Ok(plan.clone())
        })?;

        info!(route_id = %route_id, "route cancelled");
        self.notifier.notify(&Notification::route_cancelled(&plan));
        Ok(plan)
    }

    /// Record the orders fulfilled at a stop. No notification is sent.
    pub fn attach_orders<S, I, T>(
        &self,
        store: &S,
        route_id: &RouteId,
        stop_index: usize,
        order_ids: I,
    ) -> Result<RoutePlan, PlannerError>
    where
        S: RouteStore,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        store.update(route_id, |plan| {
            plan.attach_orders(stop_index, order_ids)?;
            Ok(plan.clone())
        })
    }
}

impl<N: NotificationSink + Sync> RoutePlanningService<N> {
    /// Plan independent requests in parallel. Output order matches input order.
    pub fn plan_routes(&self, requests: &[PlanRequest]) -> Vec<RoutePlan> {
        let start_time = Utc::now();
        requests
            .par_iter()
            .map(|request| {
                self.plan_route_at(
                    &request.delivery_person_id,
                    &request.depot,
                    &request.locations,
                    start_time,
                )
            })
            .collect()
    }
}
