//! HTTP server: routing, state, handlers.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
