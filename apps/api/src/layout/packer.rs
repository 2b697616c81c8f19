//! Page Packer — distributes an ordered block list across fixed-height pages.
//!
//! # Algorithm
//! Greedy, single forward pass, no backtracking. For each block:
//! 1. Fits on the current page (inclusive `<=`, spacing only between blocks) → append.
//! 2. Technique card with suggestions whose head fits → head closes the current
//!    page, the suggestions tail opens the next one.
//! 3. Otherwise → close the current page, the block opens a new page on its own.
//!    A block taller than a page still gets placed; the page overflows and a
//!    warning is recorded instead of dropping content.
//!
//! The scan is an explicit `try_fold` over `PackState`. Measurement errors
//! abort the run and are returned unchanged.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::LayoutError;
use crate::layout::geometry::PageGeometry;
use crate::layout::measure::HeightMeasurer;
use crate::report::blocks::{BlockId, ContentBlock};

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// One packed page: a non-empty, ordered list of blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub blocks: Vec<ContentBlock>,
    /// Sum of block heights plus inter-block spacing, in points.
    pub used_height: f32,
}

/// Non-fatal conditions noticed while packing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaginationWarning {
    /// A block taller than a full page was placed alone and overflows it.
    OversizedBlock {
        block: BlockId,
        height: f32,
        max_height: f32,
        page_index: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub pages: Vec<Page>,
    pub warnings: Vec<PaginationWarning>,
}

impl Pagination {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Packs `blocks` onto pages of `geometry`, measuring each with `measurer`.
///
/// An empty block list yields zero pages.
pub fn paginate(
    blocks: Vec<ContentBlock>,
    geometry: &PageGeometry,
    measurer: &dyn HeightMeasurer,
) -> Result<Pagination, LayoutError> {
    geometry.validate()?;

    let ctx = PackContext {
        measurer,
        content_width: geometry.content_width(),
        max_height: geometry.max_height(),
        spacing: geometry.block_spacing,
    };

    let block_count = blocks.len();
    let pagination = blocks
        .into_iter()
        .try_fold(PackState::default(), |state, block| state.place(block, &ctx))?
        .finish();

    debug!(
        blocks = block_count,
        pages = pagination.pages.len(),
        warnings = pagination.warnings.len(),
        "Pagination complete"
    );
    Ok(pagination)
}

// ────────────────────────────────────────────────────────────────────────────
// Fold state
// ────────────────────────────────────────────────────────────────────────────

struct PackContext<'a> {
    measurer: &'a dyn HeightMeasurer,
    content_width: f32,
    max_height: f32,
    spacing: f32,
}

impl PackContext<'_> {
    fn measure(&self, block: &ContentBlock) -> Result<f32, LayoutError> {
        let height = self.measurer.measure_height(block, self.content_width)?;
        if !height.is_finite() || height < 0.0 {
            return Err(LayoutError::Measurement {
                block: block.id(),
                reason: format!("measurer returned invalid height {height}"),
            });
        }
        Ok(height)
    }
}

#[derive(Default)]
struct PackState {
    pages: Vec<Page>,
    current: Vec<ContentBlock>,
    current_height: f32,
    warnings: Vec<PaginationWarning>,
}

impl PackState {
    fn place(mut self, block: ContentBlock, ctx: &PackContext<'_>) -> Result<Self, LayoutError> {
        let spacing = if self.current.is_empty() {
            0.0
        } else {
            ctx.spacing
        };
        let block_height = ctx.measure(&block)?;

        if self.fits(spacing + block_height, ctx) {
            self.append(block, spacing + block_height);
            return Ok(self);
        }

        if let Some((head, tail)) = block.split_technique() {
            let head_height = ctx.measure(&head)?;
            if self.fits(spacing + head_height, ctx) {
                let tail_height = ctx.measure(&tail)?;
                debug!(
                    block = %block.id(),
                    kind = block.kind(),
                    head_height,
                    tail_height,
                    "Splitting technique card at suggestions"
                );
                self.append(head, spacing + head_height);
                self.close_page();
                self.open_page(tail, tail_height, ctx);
                return Ok(self);
            }
        }

        self.close_page();
        self.open_page(block, block_height, ctx);
        Ok(self)
    }

    fn fits(&self, extra: f32, ctx: &PackContext<'_>) -> bool {
        self.current_height + extra <= ctx.max_height
    }

    fn append(&mut self, block: ContentBlock, extra: f32) {
        self.current.push(block);
        self.current_height += extra;
    }

    fn close_page(&mut self) {
        if self.current.is_empty() {
            return;
        }
        self.pages.push(Page {
            blocks: std::mem::take(&mut self.current),
            used_height: self.current_height,
        });
        self.current_height = 0.0;
    }

    /// Starts a page with `block` as its first element. Only called on an empty page.
    fn open_page(&mut self, block: ContentBlock, height: f32, ctx: &PackContext<'_>) {
        if height > ctx.max_height {
            let page_index = self.pages.len();
            warn!(
                block = %block.id(),
                kind = block.kind(),
                height,
                max_height = ctx.max_height,
                page_index,
                "Block taller than a page; placing it alone and letting the page overflow"
            );
            self.warnings.push(PaginationWarning::OversizedBlock {
                block: block.id(),
                height,
                max_height: ctx.max_height,
                page_index,
            });
        }
        self.current.push(block);
        self.current_height = height;
    }

    fn finish(mut self) -> Pagination {
        self.close_page();
        Pagination {
            pages: self.pages,
            warnings: self.warnings,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
