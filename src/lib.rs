// Library surface for the binary, headless drivers and integration tests.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod corpus;
pub mod error;
pub mod game;
pub mod logging;
pub mod pursuit;
pub mod runtime;
pub mod timer;
pub mod tracker;
pub mod ui;

pub use error::{GameError, Result};
