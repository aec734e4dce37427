//! In-memory route store with one lock per route.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::error::PlannerError;
use crate::model::{RouteId, RoutePlan};
use crate::traits::RouteStore;

/// Route plans kept in process memory.
///
/// The map lock is only held long enough to find a route; mutations then run
/// under that route's own mutex, so different routes never block each other.
#[derive(Debug, Default)]
pub struct InMemoryRouteStore {
    routes: RwLock<HashMap<RouteId, Arc<Mutex<RoutePlan>>>>,
}

impl InMemoryRouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.routes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.read().is_empty()
    }

    pub fn remove(&self, id: &RouteId) -> Option<RoutePlan> {
        let entry = self.routes.write().remove(id)?;
        let plan = entry.lock().clone();
        Some(plan)
    }

    /// Ids of every plan assigned to `delivery_person_id`.
    pub fn routes_for(&self, delivery_person_id: &str) -> Vec<RouteId> {
        self.routes
            .read()
            .iter()
            .filter(|(_, plan)| plan.lock().delivery_person_id == delivery_person_id)
            .map(|(id, _)| *id)
            .collect()
    }

    fn entry(&self, id: &RouteId) -> Option<Arc<Mutex<RoutePlan>>> {
        self.routes.read().get(id).cloned()
    }
}

impl RouteStore for InMemoryRouteStore {
    fn insert(&self, plan: RoutePlan) {
        self.routes.write().insert(plan.id, Arc::new(Mutex::new(plan)));
    }

    fn get(&self, id: &RouteId) -> Option<RoutePlan> {
        self.entry(id).map(|entry| entry.lock().clone())
    }

    fn update<T, F>(&self, id: &RouteId, f: F) -> Result<T, PlannerError>
    where
        F: FnOnce(&mut RoutePlan) -> Result<T, PlannerError>,
    {
        let entry = self.entry(id).ok_or(PlannerError::RouteNotFound(*id))?;
        let mut plan = entry.lock();
        f(&mut *plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    use chrono::Utc;

    use crate::config::PlannerConfig;
    use crate::construct::construct_route;
    use crate::model::{Location, StopStatus};

    fn plan() -> RoutePlan {
        let depot = Location::new("depot", 39.9042, 116.4074);
        let locations = vec![
            Location::new("a", 39.9052, 116.4084),
            Location::new("b", 39.9062, 116.4094),
        ];
        construct_route("courier-1", &depot, &locations, Utc::now(), &PlannerConfig::default())
    }

    #[test]
    fn test_insert_get_remove() {
        let store = InMemoryRouteStore::new();
        let plan = plan();
        let id = plan.id;
        store.insert(plan);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).map(|p| p.id), Some(id));
        assert_eq!(store.routes_for("courier-1"), vec![id]);
        assert!(store.routes_for("courier-2").is_empty());

        assert!(store.remove(&id).is_some());
        assert!(store.is_empty());
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn test_update_unknown_route() {
        let store = InMemoryRouteStore::new();
        let id = RouteId::new();
        let result = store.update(&id, |_| Ok(()));
        assert_eq!(result, Err(PlannerError::RouteNotFound(id)));
    }

    #[test]
    fn test_concurrent_arrivals_apply_once() {
        let store = Arc::new(InMemoryRouteStore::new());
        let plan = plan();
        let id = plan.id;
        store.insert(plan);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store.update(&id, |plan| plan.advance_stop(0, StopStatus::Arrived))
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(Result::is_ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(store.get(&id).unwrap().points[0].status, StopStatus::Arrived);
    }
}
