//! Page Fill Analysis — how well each packed page uses its height.
//!
//! Diagnostic only: the analysis never changes the partition. Renderers and
//! clients use it to spot overflowing pages and pages left mostly empty by a
//! large block that had to move to the next page.
//!
//! # Rules
//! - fill > 100%                    → Overflow (single oversized block)
//! - fill < 50% on a non-final page → Sparse
//! - otherwise                      → Balanced

use serde::{Deserialize, Serialize};

use crate::layout::geometry::PageGeometry;
use crate::layout::packer::Pagination;

const SPARSE_FILL_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFillVerdict {
    Balanced,
    Sparse,
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFillAnalysis {
    pub page_index: usize,
    pub used_height: f32,
    pub available_height: f32,
    pub fill_fraction: f32,
    pub verdict: PageFillVerdict,
}

/// Analyzes every page of a finished pagination.
pub fn analyze_page_fill(pagination: &Pagination, geometry: &PageGeometry) -> Vec<PageFillAnalysis> {
    let available = geometry.max_height();
    let last_index = pagination.pages.len().saturating_sub(1);

    pagination
        .pages
        .iter()
        .enumerate()
        .map(|(page_index, page)| {
            let fill_fraction = page.used_height / available;
            let verdict = if fill_fraction > 1.0 {
                PageFillVerdict::Overflow
            } else if fill_fraction < SPARSE_FILL_THRESHOLD && page_index != last_index {
                PageFillVerdict::Sparse
            } else {
                PageFillVerdict::Balanced
            };

            PageFillAnalysis {
                page_index,
                used_height: page.used_height,
                available_height: available,
                fill_fraction,
                verdict,
            }
        })
        .collect()
}

/// Mean fill fraction across pages; 0.0 for an empty document.
pub fn average_fill(analyses: &[PageFillAnalysis]) -> f32 {
    if analyses.is_empty() {
        return 0.0;
    }
    analyses.iter().map(|a| a.fill_fraction).sum::<f32>() / analyses.len() as f32
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::packer::Page;

    fn make_geometry() -> PageGeometry {
        PageGeometry {
            page_width: 500.0,
            page_height: 700.0,
            margin: 0.0,
            header_height: 0.0,
            footer_height: 0.0,
            block_spacing: 12.0,
        }
    }

    fn make_pagination(heights: &[f32]) -> Pagination {
        Pagination {
            pages: heights
                .iter()
                .map(|h| Page {
                    blocks: vec![crate::report::blocks::ContentBlock::RatingLegend],
                    used_height: *h,
                })
                .collect(),
            warnings: vec![],
        }
    }

    #[test]
    fn test_empty_pagination_has_no_analysis() {
        let analyses = analyze_page_fill(&Pagination::default(), &make_geometry());
        assert!(analyses.is_empty());
        assert_eq!(average_fill(&analyses), 0.0);
    }

    #[test]
    fn test_verdicts() {
        let analyses = analyze_page_fill(&make_pagination(&[650.0, 200.0, 900.0, 100.0]), &make_geometry());
        let verdicts: Vec<PageFillVerdict> = analyses.iter().map(|a| a.verdict).collect();
        assert_eq!(
            verdicts,
            vec![
                PageFillVerdict::Balanced,
                PageFillVerdict::Sparse,
                PageFillVerdict::Overflow,
                // last page may be short
                PageFillVerdict::Balanced,
            ]
        );
    }

    #[test]
    fn test_exactly_full_page_is_balanced() {
        let analyses = analyze_page_fill(&make_pagination(&[700.0]), &make_geometry());
        assert_eq!(analyses[0].verdict, PageFillVerdict::Balanced);
        assert!((analyses[0].fill_fraction - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_average_fill() {
        let analyses = analyze_page_fill(&make_pagination(&[700.0, 350.0]), &make_geometry());
        assert!((average_fill(&analyses) - 0.75).abs() < 1e-6);
    }
}
