//! Routes for the board game session.

use axum::extract::State;
use axum::{
    Json, Router,
    routing::{get, post},
};
use awaji_board::Branch;
use awaji_progression::application::query_handlers::GameView;
use awaji_progression::domain::commands::{Action, GameCommand};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /choose-branch.
#[derive(Debug, Deserialize)]
pub struct ChooseBranchRequest {
    /// `"A"` or `"B"`.
    pub branch: Branch,
}

/// Response body for GET /share.
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    /// Text ready to post.
    pub text: String,
}

fn run(state: &AppState, action: Action) -> Result<Json<GameView>, ApiError> {
    let command = GameCommand::new(action);
    info!(correlation_id = %command.correlation_id, action = action.name(), "handling game command");
    Ok(Json(state.session.dispatch(&command)?))
}

/// GET /
#[instrument(skip(state))]
async fn get_game(State(state): State<AppState>) -> Result<Json<GameView>, ApiError> {
    Ok(Json(state.session.snapshot()?))
}

/// POST /start
#[instrument(skip(state))]
async fn start(State(state): State<AppState>) -> Result<Json<GameView>, ApiError> {
    run(&state, Action::StartGame)
}

/// POST /roll
#[instrument(skip(state))]
async fn roll(State(state): State<AppState>) -> Result<Json<GameView>, ApiError> {
    run(&state, Action::RollDie)
}

/// POST /acknowledge-roll
#[instrument(skip(state))]
async fn acknowledge_roll(State(state): State<AppState>) -> Result<Json<GameView>, ApiError> {
    run(&state, Action::AcknowledgeRoll)
}

/// POST /choose-branch
#[instrument(skip(state, request), fields(branch = %request.branch))]
async fn choose_branch(
    State(state): State<AppState>,
    Json(request): Json<ChooseBranchRequest>,
) -> Result<Json<GameView>, ApiError> {
    run(&state, Action::ChooseBranch(request.branch))
}

/// POST /acknowledge-stop
#[instrument(skip(state))]
async fn acknowledge_stop(State(state): State<AppState>) -> Result<Json<GameView>, ApiError> {
    run(&state, Action::AcknowledgeStop)
}

/// POST /reset
#[instrument(skip(state))]
async fn reset(State(state): State<AppState>) -> Result<Json<GameView>, ApiError> {
    run(&state, Action::Reset)
}

/// GET /share
#[instrument(skip(state))]
async fn share(State(state): State<AppState>) -> Result<Json<ShareResponse>, ApiError> {
    let text = state.session.share_text()?;
    Ok(Json(ShareResponse { text }))
}

/// Returns the router for the game session.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_game))
        .route("/start", post(start))
        .route("/roll", post(roll))
        .route("/acknowledge-roll", post(acknowledge_roll))
        .route("/choose-branch", post(choose_branch))
        .route("/acknowledge-stop", post(acknowledge_stop))
        .route("/reset", post(reset))
        .route("/share", get(share))
}
