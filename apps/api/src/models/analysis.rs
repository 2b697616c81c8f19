use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The coaching analysis a report is generated from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub session_title: Option<String>,
    pub recorded_at: DateTime<Utc>,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub growth_areas: Vec<String>,
    #[serde(default)]
    pub techniques: Vec<TechniqueEvaluation>,
    #[serde(default)]
    pub next_steps: Vec<String>,
}

/// Evaluation of a single coaching technique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechniqueEvaluation {
    pub id: Uuid,
    pub name: String,
    /// 1–5 when present.
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default = "default_true")]
    pub observed: bool,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub evidence: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// User's selection of what goes into an exported report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_true")]
    pub include_summary: bool,
    #[serde(default = "default_true")]
    pub include_strengths: bool,
    #[serde(default = "default_true")]
    pub include_growth_areas: bool,
    #[serde(default = "default_true")]
    pub include_next_steps: bool,
    /// `None` selects every technique in the analysis.
    #[serde(default)]
    pub technique_ids: Option<Vec<Uuid>>,
    #[serde(default = "default_true")]
    pub show_ratings: bool,
    #[serde(default)]
    pub title: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            include_summary: true,
            include_strengths: true,
            include_growth_areas: true,
            include_next_steps: true,
            technique_ids: None,
            show_ratings: true,
            title: None,
        }
    }
}

impl ExportConfig {
    pub fn includes_technique(&self, id: Uuid) -> bool {
        match &self.technique_ids {
            Some(ids) => ids.contains(&id),
            None => true,
        }
    }
}

fn default_true() -> bool {
    true
}
