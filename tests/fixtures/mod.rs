//! Test fixtures for campus-route-planner.
//!
//! Provides real coordinates around a university campus in Haidian, Beijing
//! plus the scenario points used throughout the docs.

pub mod campus_locations;

pub use campus_locations::*;
