//! Report assembly — turns an analysis and an export selection into the
//! ordered block list the packer consumes.
//!
//! Block order is the read order of the final document:
//! header → summary → strengths/growth → rating legend → technique cards → next steps.

use std::collections::HashSet;

use tracing::debug;

use crate::errors::ReportError;
use crate::models::analysis::{AnalysisResult, ExportConfig, TechniqueEvaluation};
use crate::report::blocks::{
    ContentBlock, DocumentHeader, StrengthsAndGrowth, TechniqueCard, RATING_SCALE_MAX,
};

pub const DEFAULT_REPORT_TITLE: &str = "Coaching Analysis Report";

/// Above this many combined items the two-column layout gets too tall and narrow.
const SIDE_BY_SIDE_MAX_ITEMS: usize = 8;

/// Builds the ordered block list for one export request.
pub fn assemble_blocks(
    analysis: &AnalysisResult,
    export: &ExportConfig,
) -> Result<Vec<ContentBlock>, ReportError> {
    let selected = select_techniques(analysis, export)?;

    let mut blocks = Vec::with_capacity(selected.len() + 5);
    blocks.push(ContentBlock::DocumentHeader(build_header(analysis, export)));

    if export.include_summary && !analysis.summary.trim().is_empty() {
        blocks.push(ContentBlock::Summary {
            text: analysis.summary.trim().to_string(),
        });
    }

    if let Some(section) = build_strengths_and_growth(analysis, export) {
        blocks.push(ContentBlock::StrengthsAndGrowth(section));
    }

    if export.show_ratings && !selected.is_empty() {
        blocks.push(ContentBlock::RatingLegend);
    }

    blocks.extend(selected.into_iter().map(|technique| {
        ContentBlock::TechniqueCard(TechniqueCard {
            id: technique.id,
            name: technique.name.clone(),
            rating: technique.rating.filter(|_| export.show_ratings),
            ratings_enabled: export.show_ratings,
            observed: technique.observed,
            feedback: technique.feedback.clone(),
            evidence: non_blank(&technique.evidence),
            suggestions: non_blank(&technique.suggestions),
        })
    }));

    let steps = non_blank(&analysis.next_steps);
    if export.include_next_steps && !steps.is_empty() {
        blocks.push(ContentBlock::NextSteps { steps });
    }

    debug!(blocks = blocks.len(), "Assembled report blocks");
    Ok(blocks)
}

/// Techniques selected for export, in analysis order.
///
/// Duplicate ids are rejected across the whole analysis. Ratings are only
/// checked on techniques that are exported with ratings shown.
fn select_techniques<'a>(
    analysis: &'a AnalysisResult,
    export: &ExportConfig,
) -> Result<Vec<&'a TechniqueEvaluation>, ReportError> {
    let mut seen = HashSet::new();
    let mut selected = Vec::new();

    for technique in &analysis.techniques {
        if !seen.insert(technique.id) {
            return Err(ReportError::DuplicateTechnique(technique.id));
        }
        if !export.includes_technique(technique.id) {
            continue;
        }
        if let Some(rating) = technique.rating.filter(|_| export.show_ratings) {
            if !(1..=RATING_SCALE_MAX).contains(&rating) {
                return Err(ReportError::InvalidRating {
                    technique: technique.name.clone(),
                    rating,
                });
            }
        }
        selected.push(technique);
    }

    Ok(selected)
}

fn build_header(analysis: &AnalysisResult, export: &ExportConfig) -> DocumentHeader {
    let title = [export.title.as_deref(), analysis.session_title.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|t| !t.is_empty())
        .unwrap_or(DEFAULT_REPORT_TITLE)
        .to_string();

    DocumentHeader {
        title,
        duration_label: format_duration(analysis.duration_seconds),
        date: analysis.recorded_at.format("%B %-d, %Y").to_string(),
    }
}

fn build_strengths_and_growth(
    analysis: &AnalysisResult,
    export: &ExportConfig,
) -> Option<StrengthsAndGrowth> {
    let strengths = if export.include_strengths {
        non_blank(&analysis.strengths)
    } else {
        Vec::new()
    };
    let growth_areas = if export.include_growth_areas {
        non_blank(&analysis.growth_areas)
    } else {
        Vec::new()
    };

    if strengths.is_empty() && growth_areas.is_empty() {
        return None;
    }

    let stacked = strengths.is_empty()
        || growth_areas.is_empty()
        || strengths.len() + growth_areas.len() > SIDE_BY_SIDE_MAX_ITEMS;

    Some(StrengthsAndGrowth {
        strengths,
        growth_areas,
        stacked,
    })
}

/// Formats a session length: `"12m 5s"`, `"1h 4m"`, or a placeholder when unknown.
pub fn format_duration(seconds: Option<u32>) -> String {
    match seconds {
        None => "Duration unavailable".to_string(),
        Some(total) if total >= 3600 => format!("{}h {}m", total / 3600, (total % 3600) / 60),
        Some(total) => format!("{}m {}s", total / 60, total % 60),
    }
}

fn non_blank(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
