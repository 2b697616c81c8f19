// Pagination engine: page geometry, block height measurement, greedy page packing.
// CPU-bound packing runs inside tokio::task::spawn_blocking (see pipeline).

pub mod document;
pub mod font_metrics;
pub mod geometry;
pub mod measure;
pub mod packer;
pub mod page_fill;
pub mod pipeline;

// Re-export the public API consumed by other modules (handlers, state, main).
pub use geometry::{PageGeometry, PaperSize};
pub use measure::{HeightMeasurer, MetricMeasurer};
