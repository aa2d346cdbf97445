//! Data Transfer Objects for the HTTP API.
//!
//! Response payloads are re-exported from the routes module since they
//! already derive Serialize/Deserialize. Query types live here.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    // Dashboard
    DatasetSummary, OccupancyData,
    // Heatmap
    PivotMatrix,
    // Timeline
    AggregateRow, TimelineSeries,
};

/// Query parameters shared by the occupancy and dashboard endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OccupancyQuery {
    /// Restrict to opening hours (default from configuration)
    #[serde(default)]
    pub filter_open: Option<bool>,
    /// Colour-scale maximum in percent, 60..=140
    #[serde(default)]
    pub zmax: Option<f64>,
    /// Weekday for the timeline view
    #[serde(default)]
    pub weekday: Option<String>,
    /// Alternative CSV source, only honoured when enabled in configuration
    #[serde(default)]
    pub path: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Crate version
    pub version: String,
    /// Configured CSV source
    pub data_path: String,
}
