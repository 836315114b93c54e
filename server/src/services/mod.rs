//! HTTP surface of the console host.
//!
//! - `console_config`: `GET /console/config.json`, the runtime settings the
//!   browser application reads on startup.
//! - `assets`: every other path, answered from the embedded frontend build
//!   with an `index.html` fallback for client-side routes.

pub mod assets;
pub mod console_config;
