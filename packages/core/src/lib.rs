// Library root. Exposes internal modules for integration tests in `tests/`.
// Production entry point remains `src/main.rs`.

pub mod analytics;
pub mod api;
pub mod display;
pub mod error;
pub mod metrics;
pub mod scheduler;
pub mod services;
pub mod store;

// Binary plumbing, public so integration tests can reach it.
pub mod cli;
pub mod config;
pub mod logging;
