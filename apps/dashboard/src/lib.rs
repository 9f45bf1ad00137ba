//! TaskTrove dashboard library
//!
//! State core for the project and task dashboard: entity collections, the
//! persisted auth session, the role gate, a mock auth backend and the route
//! table, with a thin axum surface on top.

pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod infrastructure;
pub mod routes;
pub mod store;
pub mod views;
