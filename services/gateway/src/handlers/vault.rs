use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{AmountRequest, Receipt, ReleasedView, VaultView};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use bank_types::ids::AccountId;

fn amount_body(payload: Result<Json<AmountRequest>, JsonRejection>) -> Result<AmountRequest, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

pub async fn deposit(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    payload: Result<Json<AmountRequest>, JsonRejection>,
) -> Result<Json<Receipt>, AppError> {
    state
        .rate_limiter
        .check_rate_limit(&format!("{}:deposit", user.account_id))?;
    let request = amount_body(payload)?;

    let (event, vault) = state
        .ledger
        .deposit_with_vault(user.account_id, request.amount)?;

    tracing::info!(
        account = %user.account_id,
        amount = %request.amount,
        seq = event.seq(),
        "Deposit confirmed"
    );
    Ok(Json(Receipt::confirmed(event, vault)))
}

pub async fn withdraw(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    payload: Result<Json<AmountRequest>, JsonRejection>,
) -> Result<Json<Receipt>, AppError> {
    state
        .rate_limiter
        .check_rate_limit(&format!("{}:withdraw", user.account_id))?;
    let request = amount_body(payload)?;

    let mut payout = state.credits.clone();
    let (event, vault) =
        state
            .ledger
            .withdraw_with_vault(user.account_id, request.amount, &mut payout)?;

    tracing::info!(
        account = %user.account_id,
        amount = %request.amount,
        seq = event.seq(),
        "Withdrawal confirmed"
    );
    Ok(Json(Receipt::confirmed(event, vault)))
}

/// Read any account's vault. Unknown accounts read as all zeros.
pub async fn get_vault(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<Json<VaultView>, AppError> {
    let account_id: AccountId = account_id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid account id: {}", account_id)))?;

    Ok(Json(VaultView {
        account_id,
        vault: state.ledger.vault(&account_id),
    }))
}

/// Value released to the caller by past withdrawals.
pub async fn get_released(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ReleasedView>, AppError> {
    Ok(Json(ReleasedView {
        account_id: user.account_id,
        released: state.credits.released(&user.account_id),
    }))
}
