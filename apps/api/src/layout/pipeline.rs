//! Background pagination — runs the packer off the async executor.
//!
//! # spawn_blocking pattern
//! Measuring every block exercises the text-layout code and is CPU-bound.
//! `spawn_blocking` keeps the tokio scheduler unblocked. The closure takes
//! owned data (required for `'static` bounds): the block list, a geometry
//! clone and an `Arc` of the measurer. The packer itself never suspends.

use std::sync::Arc;

use tracing::info;

use crate::errors::AppError;
use crate::layout::document::PaginatedDocument;
use crate::layout::geometry::PageGeometry;
use crate::layout::measure::HeightMeasurer;
use crate::layout::packer::paginate;
use crate::report::blocks::ContentBlock;

/// Paginates `blocks` on a blocking worker and annotates the result.
pub async fn run_pagination(
    blocks: Vec<ContentBlock>,
    geometry: PageGeometry,
    measurer: Arc<dyn HeightMeasurer>,
) -> Result<PaginatedDocument, AppError> {
    let block_count = blocks.len();
    let cfg = geometry.clone();

    let pagination = tokio::task::spawn_blocking(move || paginate(blocks, &cfg, measurer.as_ref()))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in pagination: {e}"))
        })??;

    info!(
        blocks = block_count,
        pages = pagination.page_count(),
        warnings = pagination.warnings.len(),
        "Report paginated"
    );

    Ok(PaginatedDocument::new(pagination, geometry))
}
