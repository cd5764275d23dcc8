//! Document generation routes: template preview, adviser emails, candidate
//! letters and panel minutes.
//!
//! The caller owns the records and the object store; these handlers only
//! turn the records they are sent into rendered text.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use panel_core::{Adviser, Candidate, Interview, Nda, TemplateRecord};
use panel_docs::letter::{self, GeneratedLetter, LetterInputs};
use panel_docs::minutes::{self, MinutesEntry};
use panel_docs::{adviser_email, AdviserEmailDraft, SubstitutionContext, Template};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/templates/render", post(render_template))
        .route("/documents/adviser-email", post(adviser_email_draft))
        .route("/documents/candidate-letter", post(candidate_letter))
        .route("/documents/minutes", post(panel_minutes))
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub content: String,
    #[serde(default)]
    pub values: HashMap<String, String>,
    /// Optional sections to keep, e.g. `secondInterview`.
    #[serde(default)]
    pub sections: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub content: String,
}

/// POST /api/templates/render — substitute arbitrary values into a template.
async fn render_template(
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> ApiResult<Json<RenderResponse>> {
    let Json(req) = payload?;
    let mut ctx = SubstitutionContext::new();
    for (token, value) in req.values {
        ctx.insert(token, value);
    }
    for section in req.sections {
        ctx.enable_section(section);
    }
    Ok(Json(RenderResponse {
        content: Template::parse(&req.content).render(&ctx),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviserEmailRequest {
    pub candidate: Candidate,
    pub interview: Interview,
    #[serde(default)]
    pub advisers: Vec<Adviser>,
    #[serde(default)]
    pub templates: Vec<TemplateRecord>,
    #[serde(default)]
    pub panel_date: Option<String>,
}

/// POST /api/documents/adviser-email
async fn adviser_email_draft(
    payload: Result<Json<AdviserEmailRequest>, JsonRejection>,
) -> ApiResult<Json<AdviserEmailDraft>> {
    let Json(req) = payload?;
    let draft = adviser_email::draft(
        &req.candidate,
        &req.interview,
        &req.advisers,
        &req.templates,
        req.panel_date.as_deref().unwrap_or_default(),
    )?;
    Ok(Json(draft))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateLetterRequest {
    pub candidate: Candidate,
    /// Template to use. When absent one is chosen from `templates`.
    #[serde(default)]
    pub template: Option<TemplateRecord>,
    #[serde(default)]
    pub templates: Vec<TemplateRecord>,
    #[serde(default)]
    pub interviews: Vec<Interview>,
    #[serde(default)]
    pub advisers: Vec<Adviser>,
    #[serde(default)]
    pub nda: Option<Nda>,
    #[serde(default)]
    pub panel_date: Option<String>,
}

/// POST /api/documents/candidate-letter
async fn candidate_letter(
    payload: Result<Json<CandidateLetterRequest>, JsonRejection>,
) -> ApiResult<Json<GeneratedLetter>> {
    let Json(req) = payload?;
    let template = match &req.template {
        Some(template) => template,
        None => letter::select_template(&req.templates, &req.candidate, &req.interviews)?,
    };

    let inputs = LetterInputs {
        candidate: &req.candidate,
        interviews: &req.interviews,
        advisers: &req.advisers,
        nda: req.nda.as_ref(),
        panel_date: req.panel_date.as_deref().unwrap_or_default(),
        today: chrono::Local::now().date_naive(),
    };
    let generated = letter::generate(template, &inputs, chrono::Utc::now().timestamp_millis())?;
    Ok(Json(generated))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinutesRequest {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub interviews: Vec<Interview>,
    #[serde(default)]
    pub advisers: Vec<Adviser>,
    #[serde(default)]
    pub ndas: Vec<Nda>,
    #[serde(default)]
    pub category_order: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MinutesResponse {
    pub entries: Vec<MinutesEntry>,
    pub text: String,
    pub html: String,
}

/// POST /api/documents/minutes
async fn panel_minutes(
    payload: Result<Json<MinutesRequest>, JsonRejection>,
) -> ApiResult<Json<MinutesResponse>> {
    let Json(req) = payload?;
    let minutes = minutes::build(
        &req.candidates,
        &req.interviews,
        &req.advisers,
        &req.ndas,
        &req.category_order,
    );
    let text = minutes.render_text();
    let html = minutes.render_html();
    Ok(Json(MinutesResponse {
        entries: minutes.entries,
        text,
        html,
    }))
}
