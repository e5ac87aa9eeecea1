//! Folio API server library.
//!
//! Exposes config, state, error handling, routes and the router builder so
//! integration tests, the server binary and the seed tool share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod form;
pub mod handlers;
pub mod maintenance;
pub mod middleware;
pub mod query;
pub mod router;
pub mod routes;
pub mod state;
pub mod telemetry;
