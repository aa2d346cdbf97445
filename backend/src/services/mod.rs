//! Service layer for business logic and orchestration.
//!
//! Services sit between the pipeline and the entry points: they load sources
//! through the dataset cache, run the pipeline and render the dashboard.

pub mod cache;
pub mod dashboard;
pub mod export;
pub mod render;

pub use cache::{calculate_checksum, load_cached, CacheKey, DatasetCache, InMemoryDatasetCache};
pub use dashboard::{build_occupancy, load_occupancy, render_dashboard, select_series};
pub use export::{export_dashboard, ExportReport};
pub use render::{render_document, RenderOptions};
