//! Height measurement — how tall a block renders at a given content width.
//!
//! The packer only sees the `HeightMeasurer` trait. `MetricMeasurer` is the
//! default backend: it lays blocks out with the static font tables in
//! `font_metrics`, mirroring the structure the PDF renderer draws (headings,
//! wrapped paragraphs, indented lists, padded technique cards).
//!
//! `AppState` holds an `Arc<dyn HeightMeasurer>`; tests inject lookup tables
//! or closures instead.

use crate::errors::LayoutError;
use crate::layout::font_metrics::{get_metrics, FontWeight};
use crate::report::blocks::{
    ContentBlock, DocumentHeader, StrengthsAndGrowth, TechniqueCard,
    TechniqueSuggestionsContinued, EVIDENCE_LABEL, GROWTH_AREAS_LABEL, NEXT_STEPS_HEADING,
    NOT_OBSERVED_LABEL, RATING_LEGEND, RATING_LEGEND_HEADING, STRENGTHS_AND_GROWTH_HEADING,
    STRENGTHS_LABEL, SUGGESTIONS_LABEL, SUMMARY_HEADING,
};

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Reports the rendered height of a block, in points, at `content_width` points.
///
/// Implementations must be deterministic for a fixed width and must not have
/// observable side effects. An error aborts the whole pagination run.
pub trait HeightMeasurer: Send + Sync {
    fn measure_height(&self, block: &ContentBlock, content_width: f32)
        -> Result<f32, LayoutError>;
}

impl<F> HeightMeasurer for F
where
    F: Fn(&ContentBlock, f32) -> Result<f32, LayoutError> + Send + Sync,
{
    fn measure_height(
        &self,
        block: &ContentBlock,
        content_width: f32,
    ) -> Result<f32, LayoutError> {
        self(block, content_width)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Typography
// ────────────────────────────────────────────────────────────────────────────

/// Type sizes and spacing the renderer uses, in points.
#[derive(Debug, Clone, PartialEq)]
pub struct Typography {
    pub title_size: f32,
    pub heading_size: f32,
    pub subheading_size: f32,
    pub body_size: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    /// Gap between a heading and the content under it.
    pub heading_gap: f32,
    /// Gap between paragraphs or sub-sections within one block.
    pub paragraph_gap: f32,
    pub list_item_gap: f32,
    /// Horizontal space taken by a bullet glyph or step number.
    pub list_indent: f32,
    pub card_padding: f32,
    pub column_gutter: f32,
    /// Width reserved next to a technique name for its "4/5" badge.
    pub rating_badge_width: f32,
    /// Narrowest text column we agree to lay out.
    pub min_text_width: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            title_size: 20.0,
            heading_size: 13.0,
            subheading_size: 11.0,
            body_size: 10.5,
            line_height: 1.35,
            heading_gap: 6.0,
            paragraph_gap: 8.0,
            list_item_gap: 3.0,
            list_indent: 14.0,
            card_padding: 12.0,
            column_gutter: 18.0,
            rating_badge_width: 44.0,
            min_text_width: 36.0,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// MetricMeasurer — default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Measures blocks with static Helvetica metrics and greedy word wrap.
#[derive(Debug, Clone, Default)]
pub struct MetricMeasurer {
    pub typography: Typography,
}

impl MetricMeasurer {
    fn line_height(&self, size: f32) -> f32 {
        size * self.typography.line_height
    }

    fn text(&self, weight: FontWeight, size: f32, text: &str, width: f32) -> f32 {
        let lines = get_metrics(weight).wrapped_lines(text, size, width);
        lines as f32 * self.line_height(size)
    }

    fn body(&self, text: &str, width: f32) -> f32 {
        self.text(FontWeight::Regular, self.typography.body_size, text, width)
    }

    fn heading(&self, text: &str, width: f32) -> f32 {
        self.text(FontWeight::Bold, self.typography.heading_size, text, width)
            + self.typography.heading_gap
    }

    fn subheading(&self, text: &str, width: f32) -> f32 {
        self.text(FontWeight::Bold, self.typography.subheading_size, text, width)
            + self.typography.heading_gap
    }

    /// Bulleted or numbered list; each item wraps beside its marker.
    fn list(&self, items: &[String], width: f32) -> f32 {
        if items.is_empty() {
            return 0.0;
        }
        let text_width = width - self.typography.list_indent;
        let items_height: f32 = items.iter().map(|item| self.body(item, text_width)).sum();
        items_height + self.typography.list_item_gap * (items.len() - 1) as f32
    }

    /// Fails when a text column would be narrower than `min_text_width`.
    fn require_width(&self, block: &ContentBlock, width: f32) -> Result<(), LayoutError> {
        if width < self.typography.min_text_width {
            return Err(LayoutError::Measurement {
                block: block.id(),
                reason: format!(
                    "text column of {width:.1}pt is narrower than the {:.1}pt minimum",
                    self.typography.min_text_width
                ),
            });
        }
        Ok(())
    }

    fn measure_header(&self, header: &DocumentHeader, width: f32) -> f32 {
        let meta_line = format!("{} · {}", header.duration_label, header.date);
        self.text(
            FontWeight::Bold,
            self.typography.title_size,
            &header.title,
            width,
        ) + self.typography.heading_gap
            + self.body(&meta_line, width)
            + self.typography.paragraph_gap
    }

    fn measure_strengths(&self, section: &StrengthsAndGrowth, width: f32) -> f32 {
        let heading = self.heading(STRENGTHS_AND_GROWTH_HEADING, width);
        let column = |label: &str, items: &[String], col_width: f32| {
            if items.is_empty() {
                0.0
            } else {
                self.subheading(label, col_width) + self.list(items, col_width)
            }
        };

        if section.stacked {
            let parts = [
                column(STRENGTHS_LABEL, &section.strengths, width),
                column(GROWTH_AREAS_LABEL, &section.growth_areas, width),
            ];
            let present = parts.iter().filter(|h| **h > 0.0).count();
            heading
                + parts.iter().sum::<f32>()
                + self.typography.paragraph_gap * present.saturating_sub(1) as f32
        } else {
            let col_width = (width - self.typography.column_gutter) / 2.0;
            let left = column(STRENGTHS_LABEL, &section.strengths, col_width);
            let right = column(GROWTH_AREAS_LABEL, &section.growth_areas, col_width);
            heading + left.max(right)
        }
    }

    fn measure_legend(&self, width: f32) -> f32 {
        let rows: Vec<String> = RATING_LEGEND
            .iter()
            .map(|(rating, label)| format!("{rating} – {label}"))
            .collect();
        self.heading(RATING_LEGEND_HEADING, width) + self.list(&rows, width)
    }

    fn measure_card(&self, card: &TechniqueCard, width: f32) -> f32 {
        let t = &self.typography;
        let inner = width - 2.0 * t.card_padding;
        let name_width = if card.display_rating().is_some() {
            inner - t.rating_badge_width
        } else {
            inner
        };

        let mut height = 2.0 * t.card_padding
            + self.text(FontWeight::Bold, t.heading_size, &card.name, name_width);

        if !card.observed {
            height += t.heading_gap + self.body(NOT_OBSERVED_LABEL, inner);
        }
        if !card.feedback.trim().is_empty() {
            height += t.heading_gap + self.body(&card.feedback, inner);
        }
        if !card.evidence.is_empty() {
            height += t.paragraph_gap
                + self.subheading(EVIDENCE_LABEL, inner)
                + self.list(&card.evidence, inner);
        }
        if !card.suggestions.is_empty() {
            height += t.paragraph_gap
                + self.subheading(SUGGESTIONS_LABEL, inner)
                + self.list(&card.suggestions, inner);
        }
        height
    }

    fn measure_continued(&self, tail: &TechniqueSuggestionsContinued, width: f32) -> f32 {
        let t = &self.typography;
        let inner = width - 2.0 * t.card_padding;
        2.0 * t.card_padding
            + self.text(FontWeight::Bold, t.heading_size, &tail.heading(), inner)
            + t.paragraph_gap
            + self.subheading(SUGGESTIONS_LABEL, inner)
            + self.list(&tail.suggestions, inner)
    }

    /// Narrowest text column a block would be laid out in.
    fn narrowest_column(&self, block: &ContentBlock, width: f32) -> f32 {
        let t = &self.typography;
        match block {
            ContentBlock::DocumentHeader(_) | ContentBlock::Summary { .. } => width,
            ContentBlock::StrengthsAndGrowth(section) if !section.stacked => {
                (width - t.column_gutter) / 2.0 - t.list_indent
            }
            ContentBlock::StrengthsAndGrowth(_)
            | ContentBlock::RatingLegend
            | ContentBlock::NextSteps { .. } => width - t.list_indent,
            ContentBlock::TechniqueCard(card) => {
                let inner = width - 2.0 * t.card_padding;
                let name_width = if card.display_rating().is_some() {
                    inner - t.rating_badge_width
                } else {
                    inner
                };
                name_width.min(inner - t.list_indent)
            }
            ContentBlock::TechniqueSuggestionsContinued(_) => {
                width - 2.0 * t.card_padding - t.list_indent
            }
        }
    }
}

impl HeightMeasurer for MetricMeasurer {
    fn measure_height(
        &self,
        block: &ContentBlock,
        content_width: f32,
    ) -> Result<f32, LayoutError> {
        if !content_width.is_finite() || content_width <= 0.0 {
            return Err(LayoutError::Measurement {
                block: block.id(),
                reason: format!("content width must be positive, got {content_width}"),
            });
        }
        self.require_width(block, self.narrowest_column(block, content_width))?;

        let height = match block {
            ContentBlock::DocumentHeader(header) => self.measure_header(header, content_width),
            ContentBlock::Summary { text } => {
                self.heading(SUMMARY_HEADING, content_width) + self.body(text, content_width)
            }
            ContentBlock::StrengthsAndGrowth(section) => {
                self.measure_strengths(section, content_width)
            }
            ContentBlock::RatingLegend => self.measure_legend(content_width),
            ContentBlock::TechniqueCard(card) => self.measure_card(card, content_width),
            ContentBlock::TechniqueSuggestionsContinued(tail) => {
                self.measure_continued(tail, content_width)
            }
            ContentBlock::NextSteps { steps } => {
                self.heading(NEXT_STEPS_HEADING, content_width) + self.list(steps, content_width)
            }
        };
        Ok(height)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
