use crate::{
    error::{ApiError, AppError},
    forms::{FieldErrors, FormSpec, RawInput},
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use core_types::{Game, Record};
use database::DbError;
use std::sync::Arc;

/// # GET /
/// Lists every game, drive and play.
pub async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let records = state.db_repo.get_all_records().await?;
    Ok(Html(state.views.render_index(&records)?))
}

/// # GET /addgame
pub async fn game_form(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    empty_form(&state, &FormSpec::game())
}

/// # POST /addgame
pub async fn add_game(
    State(state): State<Arc<AppState>>,
    Form(input): Form<RawInput>,
) -> Result<Response, AppError> {
    let form = FormSpec::game();
    match form.validate(&input) {
        Ok(submission) => {
            state.db_repo.save_game(submission.into_new_game()).await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(errors) => rejected(&state, &form, &input, &errors),
    }
}

/// # GET /drive
pub async fn drive_form(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    empty_form(&state, &FormSpec::drive())
}

/// # POST /drive
pub async fn add_drive(
    State(state): State<Arc<AppState>>,
    Form(input): Form<RawInput>,
) -> Result<Response, AppError> {
    let form = FormSpec::drive();
    match form.validate(&input) {
        Ok(submission) => {
            state.db_repo.save_drive(submission.into_new_drive()).await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(errors) => rejected(&state, &form, &input, &errors),
    }
}

/// # GET /play
pub async fn play_form(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    empty_form(&state, &FormSpec::play())
}

/// # POST /play
pub async fn add_play(
    State(state): State<Arc<AppState>>,
    Form(input): Form<RawInput>,
) -> Result<Response, AppError> {
    let form = FormSpec::play();
    match form.validate(&input) {
        Ok(submission) => {
            state.db_repo.save_play(submission.into_new_play()).await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(errors) => rejected(&state, &form, &input, &errors),
    }
}

/// # GET /game/:id
/// Shows the game whose identifier is `id`.
pub async fn game_details(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    let game = find_game(&state, id).await?;
    Ok(Html(state.views.render_game(&game)?))
}

/// # GET /api/records
/// All records, each tagged with its `kind`.
pub async fn api_records(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Record>>, ApiError> {
    let records = state.db_repo.get_all_records().await?;
    Ok(Json(records))
}

/// # GET /api/games/:id
pub async fn api_game(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Game>, ApiError> {
    let game = find_game(&state, id).await?;
    Ok(Json(game))
}

/// Fallback for unknown paths.
pub async fn not_found() -> AppError {
    AppError::NotFound("There is no page at this address".to_string())
}

async fn find_game(state: &AppState, id: i64) -> Result<Game, AppError> {
    state.db_repo.get_game(id).await.map_err(|e| match e {
        DbError::NotFound => AppError::NotFound(format!("No game with id {}", id)),
        other => other.into(),
    })
}

fn empty_form(state: &AppState, form: &FormSpec) -> Result<Html<String>, AppError> {
    let html = state.views.render_form(form, &RawInput::new(), &FieldErrors::new())?;
    Ok(Html(html))
}

/// Re-renders a form that failed validation. Nothing has been stored.
fn rejected(state: &AppState, form: &FormSpec, input: &RawInput, errors: &FieldErrors) -> Result<Response, AppError> {
    tracing::debug!(form = form.action, fields = ?errors.keys().collect::<Vec<_>>(), "Rejected submission.");
    let html = state.views.render_form(form, input, errors)?;
    Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
}
