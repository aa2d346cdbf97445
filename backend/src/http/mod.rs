//! HTTP server module for the occupancy dashboard.
//!
//! This module provides an axum-based HTTP server that exposes the pipeline
//! as a small REST API plus a rendered dashboard page. It reuses the service
//! layer and DTOs from the core library.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Query parsing and validation                           │
//! │  - JSON / HTML responses                                  │
//! │  - CORS, compression, error handling                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │ spawn_blocking
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - Dataset cache, dashboard assembly, rendering           │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Pipeline (pipeline/)                                     │
//! │  - Load, filter, bucket, aggregate, pivot                 │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
