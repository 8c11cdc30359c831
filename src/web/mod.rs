//! Web server for browser-based workout planning.
//!
//! This module provides an interactive web interface using Axum. Users pick
//! exercise types, sports and muscle targets and get back a random plan of up
//! to five matching exercises.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! workout-planner serve
//!
//! # Custom port and auto-open browser
//! workout-planner serve --port 3000 --open
//!
//! # Bind to all interfaces
//! workout-planner serve --address 0.0.0.0
//! ```
//!
//! ## Endpoints
//!
//! - `GET /` - Main page with the facet selection form
//! - `POST /generate_workout` - Generate a plan from a JSON selection
//! - `GET /api/catalog` - List all exercises in the catalog

pub mod server;
