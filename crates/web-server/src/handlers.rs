use crate::{error::AppError, response::PrettyJson, AppState};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use core_types::{
    MissionDetail, MissionPayload, Planet, Scientist, ScientistDetail, ScientistPatch,
    ScientistPayload,
};
use std::sync::Arc;

const SCIENTIST: &str = "Scientist";
const MISSION: &str = "Mission";

/// A scientist id that is not an integer names no row, so it is a 404.
fn scientist_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            tracing::debug!(cause = %rejection.body_text(), "Unparsable scientist id.");
            Err(AppError::not_found(SCIENTIST))
        }
    }
}

/// # GET /
pub async fn home() -> StatusCode {
    StatusCode::OK
}

/// # GET /scientists
/// Lists every scientist in the reduced `{id, name, field_of_study}` shape.
pub async fn get_scientists(
    State(state): State<Arc<AppState>>,
) -> Result<PrettyJson<Vec<Scientist>>, AppError> {
    let scientists = state.db_repo.list_scientists().await?;
    Ok(PrettyJson(scientists))
}

/// # POST /scientists
pub async fn create_scientist(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScientistPayload>, JsonRejection>,
) -> Result<(StatusCode, PrettyJson<ScientistDetail>), AppError> {
    let Json(payload) = payload?;
    let new = payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let scientist = state
        .db_repo
        .create_scientist(&new)
        .await
        .map_err(|e| AppError::from_mutation(e, SCIENTIST))?;

    tracing::info!(id = scientist.scientist.id, "Scientist created.");
    Ok((StatusCode::CREATED, PrettyJson(scientist)))
}

/// # GET /scientists/:id
pub async fn get_scientist(
    path: Result<Path<i64>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<PrettyJson<ScientistDetail>, AppError> {
    let id = scientist_id(path)?;
    let scientist = state
        .db_repo
        .get_scientist(id)
        .await
        .map_err(|e| AppError::from_lookup(e, SCIENTIST))?;
    Ok(PrettyJson(scientist))
}

/// # PATCH /scientists/:id
/// Only `name` and `field_of_study` may be updated; any other key is a 400.
pub async fn update_scientist(
    path: Result<Path<i64>, PathRejection>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScientistPatch>, JsonRejection>,
) -> Result<(StatusCode, PrettyJson<ScientistDetail>), AppError> {
    let id = scientist_id(path)?;
    let patch = match payload {
        Ok(Json(patch)) => patch,
        Err(rejection) => {
            // An unknown id is reported ahead of a bad body.
            if !state.db_repo.scientist_exists(id).await? {
                return Err(AppError::not_found(SCIENTIST));
            }
            return Err(rejection.into());
        }
    };

    let scientist = state
        .db_repo
        .update_scientist(id, patch)
        .await
        .map_err(|e| AppError::from_mutation(e, SCIENTIST))?;

    tracing::info!(id, "Scientist updated.");
    Ok((StatusCode::ACCEPTED, PrettyJson(scientist)))
}

/// # DELETE /scientists/:id
/// Removes the scientist and all of their missions.
pub async fn delete_scientist(
    path: Result<Path<i64>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, AppError> {
    let id = scientist_id(path)?;
    let missions = state
        .db_repo
        .delete_scientist(id)
        .await
        .map_err(|e| AppError::from_lookup(e, SCIENTIST))?;

    tracing::info!(id, missions, "Scientist deleted.");
    Ok(StatusCode::NO_CONTENT)
}

/// # GET /planets
pub async fn get_planets(
    State(state): State<Arc<AppState>>,
) -> Result<PrettyJson<Vec<Planet>>, AppError> {
    let planets = state.db_repo.list_planets().await?;
    Ok(PrettyJson(planets))
}

/// # POST /missions
pub async fn create_mission(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MissionPayload>, JsonRejection>,
) -> Result<(StatusCode, PrettyJson<MissionDetail>), AppError> {
    let Json(payload) = payload?;
    let new = payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let mission = state
        .db_repo
        .create_mission(&new)
        .await
        .map_err(|e| AppError::from_mutation(e, MISSION))?;

    tracing::info!(
        id = mission.mission.id,
        planet_id = mission.mission.planet_id,
        scientist_id = mission.mission.scientist_id,
        "Mission created."
    );
    Ok((StatusCode::CREATED, PrettyJson(mission)))
}
