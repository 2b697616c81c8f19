//! Page geometry — the fixed dimensions a pagination run is performed against.
//!
//! All values are in PostScript points (1/72 inch).

use serde::{Deserialize, Serialize};

use crate::errors::LayoutError;

pub const LETTER_WIDTH_PT: f32 = 612.0;
pub const LETTER_HEIGHT_PT: f32 = 792.0;
pub const A4_WIDTH_PT: f32 = 595.0;
pub const A4_HEIGHT_PT: f32 = 842.0;

pub const DEFAULT_MARGIN_PT: f32 = 40.0;
pub const DEFAULT_HEADER_HEIGHT_PT: f32 = 28.0;
pub const DEFAULT_FOOTER_HEIGHT_PT: f32 = 24.0;
pub const DEFAULT_BLOCK_SPACING_PT: f32 = 12.0;

/// Paper size presets accepted in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperSize {
    Letter,
    A4,
}

impl std::str::FromStr for PaperSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letter" | "us-letter" => Ok(PaperSize::Letter),
            "a4" => Ok(PaperSize::A4),
            other => Err(format!("unknown paper size '{other}' (expected letter or a4)")),
        }
    }
}

/// Layout parameters for every page of a report.
///
/// `content_width` and `max_height` are derived, never stored, so a geometry
/// deserialized from a request cannot disagree with itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub header_height: f32,
    pub footer_height: f32,
    pub block_spacing: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}

impl PageGeometry {
    /// US Letter with the default margins and reserved header/footer bands.
    pub fn letter() -> Self {
        Self::for_paper(PaperSize::Letter)
    }

    pub fn for_paper(paper: PaperSize) -> Self {
        let (page_width, page_height) = match paper {
            PaperSize::Letter => (LETTER_WIDTH_PT, LETTER_HEIGHT_PT),
            PaperSize::A4 => (A4_WIDTH_PT, A4_HEIGHT_PT),
        };
        Self {
            page_width,
            page_height,
            margin: DEFAULT_MARGIN_PT,
            header_height: DEFAULT_HEADER_HEIGHT_PT,
            footer_height: DEFAULT_FOOTER_HEIGHT_PT,
            block_spacing: DEFAULT_BLOCK_SPACING_PT,
        }
    }

    /// Width available to a block: page width minus both side margins.
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Usable height per page once margins and header/footer bands are removed.
    pub fn max_height(&self) -> f32 {
        self.page_height - 2.0 * self.margin - self.header_height - self.footer_height
    }

    /// Rejects geometries that leave no room for content.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let fields = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("margin", self.margin),
            ("header_height", self.header_height),
            ("footer_height", self.footer_height),
            ("block_spacing", self.block_spacing),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidGeometry(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }

        if self.content_width() <= 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "margins leave no content width ({}pt wide page, {}pt margin)",
                self.page_width, self.margin
            )));
        }
        if self.max_height() <= 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "margins, header and footer leave no content height ({}pt tall page)",
                self.page_height
            )));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
