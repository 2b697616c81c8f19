//! Content blocks — the semantically atomic units a report is paginated in.
//!
//! Blocks are immutable value data. They are built once per export request,
//! consumed by a single packing run and then dropped.
//!
//! Only `TechniqueCard` may be split, and only at the suggestions boundary:
//! the head keeps everything but the suggestions, the tail is a
//! `TechniqueSuggestionsContinued` block carrying them to the next page.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Fixed labels
// ────────────────────────────────────────────────────────────────────────────

pub const SUMMARY_HEADING: &str = "Summary";
pub const STRENGTHS_AND_GROWTH_HEADING: &str = "Strengths & Growth Areas";
pub const STRENGTHS_LABEL: &str = "Strengths";
pub const GROWTH_AREAS_LABEL: &str = "Growth Areas";
pub const RATING_LEGEND_HEADING: &str = "Rating Scale";
pub const EVIDENCE_LABEL: &str = "Evidence";
pub const SUGGESTIONS_LABEL: &str = "Suggestions";
pub const NOT_OBSERVED_LABEL: &str = "Not observed in this session";
pub const NEXT_STEPS_HEADING: &str = "Next Steps";

pub const RATING_SCALE_MAX: u8 = 5;

/// Fixed rows of the rating legend, highest rating first.
pub const RATING_LEGEND: [(u8, &str); 5] = [
    (5, "Exemplary: used skillfully and consistently throughout the session"),
    (4, "Strong: used well with only minor missed opportunities"),
    (3, "Developing: used at times, with clear room to deepen the practice"),
    (2, "Emerging: attempted, but inconsistently or with limited effect"),
    (1, "Not yet evident: the technique was largely absent when it was needed"),
];

// ────────────────────────────────────────────────────────────────────────────
// Block identity
// ────────────────────────────────────────────────────────────────────────────

/// Stable identity of a block within one packing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "technique_id", rename_all = "snake_case")]
pub enum BlockId {
    Header,
    Summary,
    StrengthsAndGrowth,
    RatingLegend,
    Technique(Uuid),
    TechniqueContinued(Uuid),
    NextSteps,
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Header => f.write_str("header"),
            BlockId::Summary => f.write_str("summary"),
            BlockId::StrengthsAndGrowth => f.write_str("strengths-and-growth"),
            BlockId::RatingLegend => f.write_str("rating-legend"),
            BlockId::Technique(id) => write!(f, "technique-{id}"),
            BlockId::TechniqueContinued(id) => write!(f, "technique-{id}-continued"),
            BlockId::NextSteps => f.write_str("next-steps"),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Block payloads
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentHeader {
    pub title: String,
    pub duration_label: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthsAndGrowth {
    pub strengths: Vec<String>,
    pub growth_areas: Vec<String>,
    /// Render the two lists one above the other instead of in two columns.
    pub stacked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechniqueCard {
    pub id: Uuid,
    pub name: String,
    pub rating: Option<u8>,
    pub ratings_enabled: bool,
    pub observed: bool,
    pub feedback: String,
    pub evidence: Vec<String>,
    pub suggestions: Vec<String>,
}

impl TechniqueCard {
    /// Rating shown on the card, if any. Hidden when ratings are disabled
    /// or the technique was not observed.
    pub fn display_rating(&self) -> Option<u8> {
        if self.ratings_enabled && self.observed {
            self.rating
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechniqueSuggestionsContinued {
    pub technique_id: Uuid,
    pub technique_name: String,
    pub suggestions: Vec<String>,
}

impl TechniqueSuggestionsContinued {
    pub fn heading(&self) -> String {
        format!("{} (continued)", self.technique_name)
    }
}

/// One unit of report content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    DocumentHeader(DocumentHeader),
    Summary { text: String },
    StrengthsAndGrowth(StrengthsAndGrowth),
    RatingLegend,
    TechniqueCard(TechniqueCard),
    TechniqueSuggestionsContinued(TechniqueSuggestionsContinued),
    NextSteps { steps: Vec<String> },
}

impl ContentBlock {
    pub fn id(&self) -> BlockId {
        match self {
            ContentBlock::DocumentHeader(_) => BlockId::Header,
            ContentBlock::Summary { .. } => BlockId::Summary,
            ContentBlock::StrengthsAndGrowth(_) => BlockId::StrengthsAndGrowth,
            ContentBlock::RatingLegend => BlockId::RatingLegend,
            ContentBlock::TechniqueCard(card) => BlockId::Technique(card.id),
            ContentBlock::TechniqueSuggestionsContinued(tail) => {
                BlockId::TechniqueContinued(tail.technique_id)
            }
            ContentBlock::NextSteps { .. } => BlockId::NextSteps,
        }
    }

    /// Short variant name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::DocumentHeader(_) => "document_header",
            ContentBlock::Summary { .. } => "summary",
            ContentBlock::StrengthsAndGrowth(_) => "strengths_and_growth",
            ContentBlock::RatingLegend => "rating_legend",
            ContentBlock::TechniqueCard(_) => "technique_card",
            ContentBlock::TechniqueSuggestionsContinued(_) => "technique_suggestions_continued",
            ContentBlock::NextSteps { .. } => "next_steps",
        }
    }

    /// True only for technique cards that still carry suggestions.
    pub fn is_splittable(&self) -> bool {
        matches!(self, ContentBlock::TechniqueCard(card) if !card.suggestions.is_empty())
    }

    /// Splits a technique card at its suggestions boundary.
    ///
    /// Returns `None` for every other block and for cards without suggestions.
    pub fn split_technique(&self) -> Option<(ContentBlock, ContentBlock)> {
        if !self.is_splittable() {
            return None;
        }
        let ContentBlock::TechniqueCard(card) = self else {
            return None;
        };

        let head = ContentBlock::TechniqueCard(TechniqueCard {
            suggestions: Vec::new(),
            ..card.clone()
        });
        let tail = ContentBlock::TechniqueSuggestionsContinued(TechniqueSuggestionsContinued {
            technique_id: card.id,
            technique_name: card.name.clone(),
            suggestions: card.suggestions.clone(),
        });
        Some((head, tail))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_card(suggestions: &[&str]) -> TechniqueCard {
        TechniqueCard {
            id: Uuid::new_v4(),
            name: "Reflective listening".to_string(),
            rating: Some(4),
            ratings_enabled: true,
            observed: true,
            feedback: "Mirrored the client's language well.".to_string(),
            evidence: vec!["\"So what I'm hearing is...\"".to_string()],
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_split_technique_produces_head_and_tail() {
        let card = make_card(&["Pause longer", "Summarize feelings"]);
        let id = card.id;
        let block = ContentBlock::TechniqueCard(card.clone());

        let (head, tail) = block.split_technique().unwrap();

        let ContentBlock::TechniqueCard(head_card) = &head else {
            panic!("head should stay a technique card");
        };
        assert!(head_card.suggestions.is_empty());
        assert_eq!(head_card.evidence, card.evidence);
        assert_eq!(head_card.feedback, card.feedback);
        assert_eq!(head.id(), BlockId::Technique(id));

        let ContentBlock::TechniqueSuggestionsContinued(tail_block) = &tail else {
            panic!("tail should be a continuation");
        };
        assert_eq!(tail_block.technique_name, "Reflective listening");
        assert_eq!(tail_block.suggestions, card.suggestions);
        assert_eq!(tail.id(), BlockId::TechniqueContinued(id));
        assert_ne!(head.id(), tail.id());
    }

    #[test]
    fn test_split_technique_without_suggestions_is_none() {
        let block = ContentBlock::TechniqueCard(make_card(&[]));
        assert!(!block.is_splittable());
        assert!(block.split_technique().is_none());
    }

    #[test]
    fn test_only_technique_cards_are_splittable() {
        let blocks = [
            ContentBlock::Summary {
                text: "A calm, focused session.".to_string(),
            },
            ContentBlock::RatingLegend,
            ContentBlock::NextSteps {
                steps: vec!["Practice silence".to_string()],
            },
            ContentBlock::TechniqueSuggestionsContinued(TechniqueSuggestionsContinued {
                technique_id: Uuid::new_v4(),
                technique_name: "Goal setting".to_string(),
                suggestions: vec!["Write goals down".to_string()],
            }),
        ];
        for block in &blocks {
            assert!(!block.is_splittable(), "{} must stay atomic", block.kind());
            assert!(block.split_technique().is_none());
        }
        assert!(ContentBlock::TechniqueCard(make_card(&["x"])).is_splittable());

        let (head, _) = ContentBlock::TechniqueCard(make_card(&["x"]))
            .split_technique()
            .unwrap();
        assert!(!head.is_splittable());
    }

    #[test]
    fn test_display_rating_hidden_when_disabled_or_unobserved() {
        let mut card = make_card(&[]);
        assert_eq!(card.display_rating(), Some(4));
        card.ratings_enabled = false;
        assert_eq!(card.display_rating(), None);
        card.ratings_enabled = true;
        card.observed = false;
        assert_eq!(card.display_rating(), None);
    }

    #[test]
    fn test_block_serializes_with_type_tag() {
        let json = serde_json::to_value(ContentBlock::Summary {
            text: "Hello".to_string(),
        })
        .unwrap();
        assert_eq!(json["type"], "summary");
        assert_eq!(json["text"], "Hello");

        let legend = serde_json::to_value(ContentBlock::RatingLegend).unwrap();
        assert_eq!(legend["type"], "rating_legend");
    }

    #[test]
    fn test_block_id_display_is_stable() {
        let id = Uuid::nil();
        assert_eq!(BlockId::Header.to_string(), "header");
        assert_eq!(
            BlockId::TechniqueContinued(id).to_string(),
            format!("technique-{id}-continued")
        );
    }
}
