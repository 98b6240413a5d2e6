use crate::error::AppError;
use crate::models::LedgerInfo;
use crate::state::AppState;
use axum::{Json, extract::State};

pub async fn get_ledger(State(state): State<AppState>) -> Result<Json<LedgerInfo>, AppError> {
    let (manifest, stats) = state.ledger.read(|ledger| (ledger.manifest(), ledger.stats()));
    Ok(Json(LedgerInfo { manifest, stats }))
}
