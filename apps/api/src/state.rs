use std::sync::Arc;

use crate::layout::{HeightMeasurer, PageGeometry};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Page geometry used when a request does not supply its own.
    pub geometry: PageGeometry,
    /// Pluggable height measurer. Default: MetricMeasurer (static font tables).
    pub measurer: Arc<dyn HeightMeasurer>,
}
