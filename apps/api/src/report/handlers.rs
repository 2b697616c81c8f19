//! Axum route handlers for the Report API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::layout::document::PaginatedDocument;
use crate::layout::geometry::PageGeometry;
use crate::layout::pipeline::run_pagination;
use crate::models::analysis::{AnalysisResult, ExportConfig};
use crate::report::assembly::assemble_blocks;
use crate::report::blocks::ContentBlock;
use crate::report::markdown::render_markdown;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub analysis: AnalysisResult,
    #[serde(default)]
    pub export: ExportConfig,
    /// Overrides the configured page geometry for this request.
    #[serde(default)]
    pub geometry: Option<PageGeometry>,
}

#[derive(Debug, Serialize)]
pub struct BlocksResponse {
    pub blocks: Vec<ContentBlock>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/reports/paginate
///
/// Assembles the report blocks and packs them onto pages.
pub async fn handle_paginate(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<PaginatedDocument>, AppError> {
    let blocks = assemble_blocks(&request.analysis, &request.export)?;
    let geometry = request.geometry.unwrap_or_else(|| state.geometry.clone());

    let document = run_pagination(blocks, geometry, state.measurer.clone()).await?;
    Ok(Json(document))
}

/// POST /api/v1/reports/blocks
///
/// Returns the assembled block list without packing it.
pub async fn handle_blocks(
    Json(request): Json<ReportRequest>,
) -> Result<Json<BlocksResponse>, AppError> {
    let blocks = assemble_blocks(&request.analysis, &request.export)?;
    Ok(Json(BlocksResponse { blocks }))
}

/// POST /api/v1/reports/markdown
pub async fn handle_markdown(Json(request): Json<ReportRequest>) -> Result<Response, AppError> {
    let blocks = assemble_blocks(&request.analysis, &request.export)?;
    let body = render_markdown(&blocks);
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        body,
    )
        .into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
