use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{CreditsResponse, TopUpRequest, TopUpResponse};
use crate::state::AppState;
use axum::{extract::State, Json};

/// GET /v1/credits
///
/// Provisions the account on first contact, so a brand-new caller sees
/// their starting balance instead of a not-found.
pub async fn get_credits(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<CreditsResponse>, AppError> {
    state
        .rate_limiter
        .check_rate_limit(&format!("{}:credits_query", user.user_id), 60, 1.0)?;

    let view = state
        .credit_service
        .ensure_account(&user.user_id, user.hints)
        .await?;

    Ok(Json(CreditsResponse::from(view)))
}

/// POST /v1/credits/topup
///
/// Reached only after the purchase has been verified upstream; the
/// gateway treats the authenticated caller as entitled to the amount.
pub async fn topup_credits(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<TopUpRequest>,
) -> Result<Json<TopUpResponse>, AppError> {
    state
        .rate_limiter
        .check_rate_limit(&format!("{}:topup", user.user_id), 30, 0.5)?;

    let new_total = state
        .credit_service
        .credit(&user.user_id, payload.amount)
        .await?;

    Ok(Json(TopUpResponse { new_total }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::account::ProfileHints;
    use types::ids::UserId;

    fn make_user(id: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: UserId::new(id),
            hints: ProfileHints {
                email: Some("a@example.com".to_string()),
                display_name: Some("Alice".to_string()),
            },
        }
    }

    #[tokio::test]
    async fn test_get_credits_provisions_new_caller() {
        let state = AppState::for_tests("test-secret");

        let Json(response) = get_credits(State(state), make_user("uid_1")).await.unwrap();

        assert_eq!(response.credits, 5);
        assert_eq!(response.profile.email.as_deref(), Some("a@example.com"));
        assert_eq!(response.profile.display_name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn test_get_credits_is_stable_across_calls() {
        let state = AppState::for_tests("test-secret");

        let Json(first) = get_credits(State(state.clone()), make_user("uid_1"))
            .await
            .unwrap();
        let Json(second) = get_credits(State(state), make_user("uid_1")).await.unwrap();

        assert_eq!(second.credits, first.credits);
        assert_eq!(second.profile.created_at, first.profile.created_at);
    }

    #[tokio::test]
    async fn test_topup_returns_new_total() {
        let state = AppState::for_tests("test-secret");

        let Json(response) = topup_credits(
            State(state),
            make_user("uid_1"),
            Json(TopUpRequest { amount: 10 }),
        )
        .await
        .unwrap();

        // Provisioning seeds 5, the top-up adds 10.
        assert_eq!(response.new_total, 15);
    }

    #[tokio::test]
    async fn test_topup_of_zero_is_rejected() {
        let state = AppState::for_tests("test-secret");

        let err = topup_credits(
            State(state),
            make_user("uid_1"),
            Json(TopUpRequest { amount: 0 }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
