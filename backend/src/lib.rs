//! # RSF Occupancy Backend
//!
//! Gym occupancy analysis for the RSF dashboard.
//!
//! This crate turns scraped occupancy samples (a CSV of timestamps and fill
//! fractions) into two views: a weekday × time-of-day heatmap of average
//! occupancy and a per-weekday timeline. It ships an HTTP server for the
//! interactive dashboard and a static HTML exporter.
//!
//! ## Features
//!
//! - **Data Loading**: Lenient CSV parsing with configurable column names
//! - **Open Hours**: Optional restriction to the facility's opening times
//! - **Aggregation**: 15-minute buckets averaged per weekday
//! - **Rendering**: Plotly heatmap and timeline in a single HTML page
//! - **HTTP API**: JSON endpoints and the rendered dashboard
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) shared by all outputs
//! - [`models`]: Weekdays, time buckets, samples and datasets
//! - [`pipeline`]: Loader, open-hours filter, bucketer, aggregator and pivoter
//! - [`services`]: Dataset cache, dashboard assembly and rendering
//! - [`config`]: Layered configuration (defaults, `rsf.toml`, environment)
//! - [`routes`]: Route-specific data types
//! - `http`: Axum-based HTTP server and request handlers (feature `http-server`)

pub mod api;
pub mod config;

pub mod models;
pub mod pipeline;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
