//! Paginated document — packed pages annotated with what a renderer needs to
//! draw running headers and footers.

use serde::{Deserialize, Serialize};

use crate::layout::geometry::PageGeometry;
use crate::layout::packer::{Pagination, PaginationWarning};
use crate::layout::page_fill::{analyze_page_fill, average_fill, PageFillAnalysis};
use crate::report::blocks::ContentBlock;

/// Per-page header/footer data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// 0-based.
    pub index: usize,
    /// 1-based, as printed.
    pub number: usize,
    pub page_count: usize,
    pub title: Option<String>,
    pub date: Option<String>,
}

impl PageMetadata {
    pub fn footer_label(&self) -> String {
        format!("Page {} of {}", self.number, self.page_count)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPage {
    pub metadata: PageMetadata,
    pub footer_label: String,
    pub blocks: Vec<ContentBlock>,
    pub used_height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedDocument {
    pub geometry: PageGeometry,
    pub page_count: usize,
    pub pages: Vec<DocumentPage>,
    pub warnings: Vec<PaginationWarning>,
    pub fill: Vec<PageFillAnalysis>,
    pub average_fill: f32,
}

impl PaginatedDocument {
    /// Annotates a pagination. Title and date are taken from the document
    /// header block when one was packed.
    pub fn new(pagination: Pagination, geometry: PageGeometry) -> Self {
        let fill = analyze_page_fill(&pagination, &geometry);
        let (title, date) = header_fields(&pagination);
        let page_count = pagination.pages.len();

        let pages = pagination
            .pages
            .into_iter()
            .enumerate()
            .map(|(index, page)| {
                let metadata = PageMetadata {
                    index,
                    number: index + 1,
                    page_count,
                    title: title.clone(),
                    date: date.clone(),
                };
                DocumentPage {
                    footer_label: metadata.footer_label(),
                    metadata,
                    blocks: page.blocks,
                    used_height: page.used_height,
                }
            })
            .collect();

        Self {
            geometry,
            page_count,
            pages,
            warnings: pagination.warnings,
            average_fill: average_fill(&fill),
            fill,
        }
    }
}

fn header_fields(pagination: &Pagination) -> (Option<String>, Option<String>) {
    pagination
        .pages
        .iter()
        .flat_map(|page| page.blocks.iter())
        .find_map(|block| match block {
            ContentBlock::DocumentHeader(header) => {
                Some((Some(header.title.clone()), Some(header.date.clone())))
            }
            _ => None,
        })
        .unwrap_or((None, None))
}
