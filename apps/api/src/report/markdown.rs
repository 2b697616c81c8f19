//! Markdown export — renders a block list as a single, unpaginated document.

use std::fmt::Write;

use crate::report::blocks::{
    ContentBlock, StrengthsAndGrowth, TechniqueCard, EVIDENCE_LABEL, GROWTH_AREAS_LABEL,
    NEXT_STEPS_HEADING, NOT_OBSERVED_LABEL, RATING_LEGEND, RATING_LEGEND_HEADING,
    RATING_SCALE_MAX, STRENGTHS_AND_GROWTH_HEADING, STRENGTHS_LABEL, SUGGESTIONS_LABEL,
    SUMMARY_HEADING,
};

/// Renders blocks to Markdown in input order.
pub fn render_markdown(blocks: &[ContentBlock]) -> String {
    let sections: Vec<String> = blocks.iter().map(render_block).collect();
    let mut out = sections.join("\n");
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn render_block(block: &ContentBlock) -> String {
    let mut out = String::new();
    match block {
        ContentBlock::DocumentHeader(header) => {
            let _ = writeln!(out, "# {}\n", header.title);
            let _ = writeln!(out, "*{} · {}*", header.date, header.duration_label);
        }
        ContentBlock::Summary { text } => {
            let _ = writeln!(out, "## {SUMMARY_HEADING}\n");
            let _ = writeln!(out, "{}", text.trim());
        }
        ContentBlock::StrengthsAndGrowth(section) => render_strengths(&mut out, section),
        ContentBlock::RatingLegend => {
            let _ = writeln!(out, "## {RATING_LEGEND_HEADING}\n");
            for (rating, label) in RATING_LEGEND {
                let _ = writeln!(out, "- **{rating}** – {label}");
            }
        }
        ContentBlock::TechniqueCard(card) => render_card(&mut out, card),
        ContentBlock::TechniqueSuggestionsContinued(tail) => {
            let _ = writeln!(out, "### {}\n", tail.heading());
            render_list(&mut out, SUGGESTIONS_LABEL, &tail.suggestions);
        }
        ContentBlock::NextSteps { steps } => {
            let _ = writeln!(out, "## {NEXT_STEPS_HEADING}\n");
            for (i, step) in steps.iter().enumerate() {
                let _ = writeln!(out, "{}. {step}", i + 1);
            }
        }
    }
    out
}

fn render_strengths(out: &mut String, section: &StrengthsAndGrowth) {
    let _ = writeln!(out, "## {STRENGTHS_AND_GROWTH_HEADING}\n");
    let lists = [
        (STRENGTHS_LABEL, &section.strengths),
        (GROWTH_AREAS_LABEL, &section.growth_areas),
    ];
    let mut first = true;
    for (label, items) in lists {
        if items.is_empty() {
            continue;
        }
        if !first {
            out.push('\n');
        }
        render_list(out, label, items);
        first = false;
    }
}

fn render_card(out: &mut String, card: &TechniqueCard) {
    match card.display_rating() {
        Some(rating) => {
            let _ = writeln!(out, "### {} ({rating}/{RATING_SCALE_MAX})\n", card.name);
        }
        None => {
            let _ = writeln!(out, "### {}\n", card.name);
        }
    }
    if !card.observed {
        let _ = writeln!(out, "*{NOT_OBSERVED_LABEL}*\n");
    }
    if !card.feedback.trim().is_empty() {
        let _ = writeln!(out, "{}\n", card.feedback.trim());
    }
    if !card.evidence.is_empty() {
        render_list(out, EVIDENCE_LABEL, &card.evidence);
        out.push('\n');
    }
    if !card.suggestions.is_empty() {
        render_list(out, SUGGESTIONS_LABEL, &card.suggestions);
    }
    while out.ends_with("\n\n") {
        out.pop();
    }
}

fn render_list(out: &mut String, label: &str, items: &[String]) {
    let _ = writeln!(out, "**{label}**\n");
    for item in items {
        let _ = writeln!(out, "- {item}");
    }
}
