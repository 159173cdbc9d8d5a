//! Content section handlers: public reads, admin saves.
//!
//! Reads return the in-memory shape (list sections unwrapped from their
//! `{ "data": [...] }` documents). Saves validate the body against the typed
//! section model before persisting, so a malformed admin payload can never
//! corrupt a stored document.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{Map, Value};

use folio_core::{
    AppError, ExperienceEntry, Profile, Project, Section, SiteSettings, Skill, Stat,
};

use crate::error::HttpAppError;
use crate::state::AppState;

fn parse_section(name: &str) -> Result<Section, HttpAppError> {
    Section::from_str(name)
        .map_err(|_| HttpAppError(AppError::NotFound(format!("Unknown section: {}", name))))
}

fn validate_section_body(section: Section, body: &Value) -> Result<(), AppError> {
    let result = match section {
        Section::Profile => serde_json::from_value::<Profile>(body.clone()).map(|_| ()),
        Section::Settings => serde_json::from_value::<SiteSettings>(body.clone()).map(|_| ()),
        Section::Skills => serde_json::from_value::<Vec<Skill>>(body.clone()).map(|_| ()),
        Section::Projects => serde_json::from_value::<Vec<Project>>(body.clone()).map(|_| ()),
        Section::Experience => {
            serde_json::from_value::<Vec<ExperienceEntry>>(body.clone()).map(|_| ())
        }
        Section::Stats => serde_json::from_value::<Vec<Stat>>(body.clone()).map(|_| ()),
    };
    result.map_err(|e| AppError::InvalidInput(format!("Invalid {} payload: {}", section, e)))
}

/// All sections at once, for the page bootstrap. Sections that have never
/// been saved are omitted; the frontend falls back to its defaults.
#[tracing::instrument(skip(state))]
pub async fn get_content(State(state): State<Arc<AppState>>) -> Result<Json<Value>, HttpAppError> {
    let mut result = Map::new();
    for section in Section::ALL {
        if let Some(document) = state.content.load(section).await? {
            result.insert(section.to_string(), section.unwrap_payload(document));
        }
    }
    Ok(Json(Value::Object(result)))
}

#[tracing::instrument(skip(state))]
pub async fn get_section(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Value>, HttpAppError> {
    let section = parse_section(&name)?;

    let document = state
        .content
        .load(section)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Section not yet saved: {}", section)))?;

    Ok(Json(section.unwrap_payload(document)))
}

#[tracing::instrument(skip(state, body))]
pub async fn save_section(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, HttpAppError> {
    let section = parse_section(&name)?;
    validate_section_body(section, &body)?;

    let document = section.wrap_payload(body);
    state.content.save(section, &document).await?;

    tracing::info!(section = %section, "Content section saved");
    Ok(Json(section.unwrap_payload(document)))
}
