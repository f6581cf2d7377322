// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod logging;
pub mod mode;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod state;
pub mod stats;
pub mod timer;
pub mod ui;

/// How often the event loop wakes up when no key arrives.
pub const TICK_RATE_MS: u64 = 100;
