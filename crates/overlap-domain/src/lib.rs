//! Domain models and services for interval overlap checks

pub mod model;
pub mod service;
