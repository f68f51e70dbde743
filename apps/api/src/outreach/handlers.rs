use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::candidates::handlers::OrgQuery;
use crate::candidates::store::get_candidate;
use crate::errors::AppError;
use crate::llm_client::prompts::FACTS_ONLY_INSTRUCTION;
use crate::llm_client::{decode, GatewayError, ModelGateway};
use crate::models::candidate::CandidateRow;
use crate::models::template::MessageTemplateRow;
use crate::outreach::personalize::render;
use crate::outreach::prompts::{POLISH_PROMPT_TEMPLATE, POLISH_SYSTEM};
use crate::outreach::templates::{get_template, insert_template, list_templates};
use crate::state::AppState;

fn default_channel() -> String {
    "email".to_string()
}

#[derive(Debug, Deserialize)]
pub struct CreateTemplateRequest {
    pub org_id: Uuid,
    pub name: String,
    #[serde(default = "default_channel")]
    pub channel: String,
    pub body: String,
}

/// POST /api/v1/outreach/templates
pub async fn handle_create_template(
    State(state): State<AppState>,
    Json(req): Json<CreateTemplateRequest>,
) -> Result<Json<MessageTemplateRow>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Template name must not be empty".to_string()));
    }
    if req.body.trim().is_empty() {
        return Err(AppError::Validation("Template body must not be empty".to_string()));
    }

    let template =
        insert_template(&state.db, req.org_id, req.name.trim(), &req.channel, &req.body).await?;
    info!("Created template {} for org {}", template.id, req.org_id);
    Ok(Json(template))
}

/// GET /api/v1/outreach/templates
pub async fn handle_list_templates(
    State(state): State<AppState>,
    Query(params): Query<OrgQuery>,
) -> Result<Json<Vec<MessageTemplateRow>>, AppError> {
    let templates = list_templates(&state.db, params.org_id).await?;
    Ok(Json(templates))
}

#[derive(Debug, Deserialize)]
pub struct PersonalizeRequest {
    pub org_id: Uuid,
    pub template_id: Uuid,
    pub candidate_id: Uuid,
    /// Ask the model to smooth the rendered text. The deterministic render is
    /// kept whenever the gateway fails — personalization never errors on it.
    #[serde(default)]
    pub polish: bool,
}

#[derive(Debug, Serialize)]
pub struct PersonalizeResponse {
    pub template_id: Uuid,
    pub candidate_id: Uuid,
    pub message: String,
    pub quality_score: f64,
    pub personalized_fields: Vec<String>,
    pub defaulted_fields: Vec<String>,
    pub polished: bool,
}

/// POST /api/v1/outreach/personalize
pub async fn handle_personalize(
    State(state): State<AppState>,
    Json(req): Json<PersonalizeRequest>,
) -> Result<Json<PersonalizeResponse>, AppError> {
    let template = get_template(&state.db, req.template_id, req.org_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Template {} not found", req.template_id)))?;
    let candidate = get_candidate(&state.db, req.candidate_id, req.org_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {} not found", req.candidate_id)))?;

    let rendered = render(&template.body, &candidate);

    let (message, polished) = if req.polish {
        match polish_message(state.gateway.as_ref(), &rendered.text, &candidate).await {
            Ok(text) => (text, true),
            Err(e) => {
                warn!("Polish call failed, keeping deterministic render: {e}");
                (rendered.text.clone(), false)
            }
        }
    } else {
        (rendered.text.clone(), false)
    };

    Ok(Json(PersonalizeResponse {
        template_id: template.id,
        candidate_id: candidate.id,
        message,
        quality_score: rendered.quality_score,
        personalized_fields: rendered.personalized_fields,
        defaulted_fields: rendered.defaulted_fields,
        polished,
    }))
}

#[derive(Debug, Deserialize)]
struct PolishedMessage {
    message: String,
}

async fn polish_message(
    gateway: &dyn ModelGateway,
    message: &str,
    candidate: &CandidateRow,
) -> Result<String, GatewayError> {
    let candidate_json = serde_json::json!({
        "name": candidate.full_name,
        "title": candidate.title,
        "company": candidate.company,
        "skills": candidate.skills,
        "location": candidate.location,
    })
    .to_string();

    let prompt = POLISH_PROMPT_TEMPLATE
        .replace("{facts_instruction}", FACTS_ONLY_INSTRUCTION)
        .replace("{candidate_json}", &candidate_json)
        .replace("{message}", message);

    let value = gateway.submit(&prompt, POLISH_SYSTEM).await?;
    let polished: PolishedMessage = decode(value)?;
    if polished.message.trim().is_empty() {
        return Err(GatewayError::InvalidResponseFormat {
            reason: "polished message was empty".to_string(),
        });
    }
    Ok(polished.message)
}
