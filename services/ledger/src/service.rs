//! Credit service
//!
//! Business rules over the versioned store. Accounts are provisioned
//! implicitly the first time an identity is observed; debits are guarded
//! by the balance while credits are not. Every operation is a single
//! store transaction, so a brand-new identity can be seeded and charged
//! against the same snapshot.

use crate::config::CreditConfig;
use crate::store::{run_transaction, LedgerStore, TxDecision};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use types::account::{Account, ProfileHints};
use types::errors::LedgerError;
use types::ids::UserId;

/// Snapshot of an account as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceView {
    pub credits: u32,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

impl From<&Account> for BalanceView {
    fn from(account: &Account) -> Self {
        Self {
            credits: account.credits,
            email: account.email.clone(),
            display_name: account.display_name.clone(),
            created_at: account.created_at,
            last_used_at: account.last_used_at,
        }
    }
}

/// The credit ledger's business operations.
#[derive(Clone)]
pub struct CreditService {
    store: Arc<dyn LedgerStore>,
    config: CreditConfig,
}

impl CreditService {
    pub fn new(store: Arc<dyn LedgerStore>, config: CreditConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &CreditConfig {
        &self.config
    }

    /// Provision the account if the identity is new, otherwise record the
    /// read. Returns the committed snapshot either way.
    pub async fn ensure_account(
        &self,
        user_id: &UserId,
        hints: ProfileHints,
    ) -> Result<BalanceView, LedgerError> {
        let defaults = self.config.default_credits;
        let (view, provisioned) = run_transaction(
            self.store.as_ref(),
            user_id,
            self.config.tx_retry_limit,
            |snapshot| {
                let now = Utc::now();
                match snapshot {
                    None => {
                        let account =
                            Account::provision(user_id.clone(), defaults, hints.clone(), now);
                        let view = BalanceView::from(&account);
                        TxDecision::Commit {
                            account,
                            result: (view, true),
                        }
                    }
                    Some(existing) => {
                        let mut account = existing.clone();
                        account.touch(now);
                        let view = BalanceView::from(&account);
                        TxDecision::Commit {
                            account,
                            result: (view, false),
                        }
                    }
                }
            },
        )
        .await?;

        if provisioned {
            tracing::info!(
                "provisioned account {} with {} starting credits",
                user_id,
                defaults
            );
        }
        Ok(view)
    }

    /// Charge `amount` credits, returning the post-debit balance.
    ///
    /// A new identity is seeded with the default balance and charged in
    /// the same transaction, so the first paid call needs no prior
    /// balance fetch. An insufficient balance aborts without committing
    /// anything, including the seed.
    pub async fn debit(&self, user_id: &UserId, amount: u32) -> Result<u32, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let defaults = self.config.default_credits;
        let credits_left = run_transaction(
            self.store.as_ref(),
            user_id,
            self.config.tx_retry_limit,
            |snapshot| {
                let now = Utc::now();
                let mut account = match snapshot {
                    Some(existing) => existing.clone(),
                    None => {
                        Account::provision(user_id.clone(), defaults, ProfileHints::empty(), now)
                    }
                };
                match account.debit(amount, now) {
                    Ok(left) => TxDecision::Commit {
                        account,
                        result: left,
                    },
                    Err(err) => TxDecision::Abort(err),
                }
            },
        )
        .await?;

        tracing::info!(
            "debited {} credit(s) from {}, {} left",
            amount,
            user_id,
            credits_left
        );
        Ok(credits_left)
    }

    /// Add `amount` credits, returning the new total.
    ///
    /// A new identity is seeded first, so the result for a fresh account
    /// is the default balance plus `amount`.
    pub async fn credit(&self, user_id: &UserId, amount: u32) -> Result<u32, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let defaults = self.config.default_credits;
        let new_total = run_transaction(
            self.store.as_ref(),
            user_id,
            self.config.tx_retry_limit,
            |snapshot| {
                let now = Utc::now();
                let mut account = match snapshot {
                    Some(existing) => existing.clone(),
                    None => {
                        Account::provision(user_id.clone(), defaults, ProfileHints::empty(), now)
                    }
                };
                match account.credit(amount, now) {
                    Ok(total) => TxDecision::Commit {
                        account,
                        result: total,
                    },
                    Err(err) => TxDecision::Abort(err),
                }
            },
        )
        .await?;

        tracing::info!(
            "credited {} credit(s) to {}, new total {}",
            amount,
            user_id,
            new_total
        );
        Ok(new_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryLedgerStore;
    use types::errors::StoreError;

    fn make_service() -> (CreditService, Arc<MemoryLedgerStore>) {
        let store = Arc::new(MemoryLedgerStore::new());
        let service = CreditService::new(store.clone(), CreditConfig::default());
        (service, store)
    }

    fn hints(email: &str, name: &str) -> ProfileHints {
        ProfileHints {
            email: Some(email.to_string()),
            display_name: Some(name.to_string()),
        }
    }

    #[tokio::test]
    async fn test_ensure_account_provisions_fresh_identity() {
        let (service, store) = make_service();
        let user = UserId::new("uid_new");

        let view = service
            .ensure_account(&user, hints("a@example.com", "Alice"))
            .await
            .unwrap();

        assert_eq!(view.credits, 5);
        assert_eq!(view.email.as_deref(), Some("a@example.com"));
        assert_eq!(view.created_at, view.last_used_at);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_ensure_account_is_idempotent_on_balance() {
        let (service, store) = make_service();
        let user = UserId::new("uid_1");

        let first = service
            .ensure_account(&user, hints("a@example.com", "Alice"))
            .await
            .unwrap();
        let second = service
            .ensure_account(&user, ProfileHints::empty())
            .await
            .unwrap();

        assert_eq!(second.credits, first.credits);
        assert_eq!(second.created_at, first.created_at);
        // Later hints never overwrite the stored profile.
        assert_eq!(second.email.as_deref(), Some("a@example.com"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_debit_decrements_balance() {
        let (service, _) = make_service();
        let user = UserId::new("uid_1");
        service.ensure_account(&user, ProfileHints::empty()).await.unwrap();

        let left = service.debit(&user, 1).await.unwrap();
        assert_eq!(left, 4);

        let view = service.ensure_account(&user, ProfileHints::empty()).await.unwrap();
        assert_eq!(view.credits, 4);
    }

    #[tokio::test]
    async fn test_debit_without_prior_ensure_seeds_and_charges() {
        let (service, store) = make_service();
        let user = UserId::new("uid_first_render");

        // First observed use of the identity goes straight to a charge.
        let left = service.debit(&user, 1).await.unwrap();
        assert_eq!(left, 4);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_debit_insufficient_aborts_cleanly() {
        let (service, _) = make_service();
        let user = UserId::new("uid_1");
        service.ensure_account(&user, ProfileHints::empty()).await.unwrap();

        let err = service.debit(&user, 6).await.unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientCredits {
                available: 5,
                requested: 6
            }
        );
        assert!(!err.is_retryable());

        let view = service.ensure_account(&user, ProfileHints::empty()).await.unwrap();
        assert_eq!(view.credits, 5);
    }

    #[tokio::test]
    async fn test_debit_on_fresh_identity_beyond_seed_commits_nothing() {
        let (service, store) = make_service();
        let user = UserId::new("uid_overdraw");

        let err = service.debit(&user, 7).await.unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientCredits {
                available: 5,
                requested: 7
            }
        );
        // The abort also rolls back the implicit seed.
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_zero_amounts_rejected_before_store_access() {
        let (service, store) = make_service();
        let user = UserId::new("uid_1");

        assert_eq!(
            service.debit(&user, 0).await,
            Err(LedgerError::InvalidAmount)
        );
        assert_eq!(
            service.credit(&user, 0).await,
            Err(LedgerError::InvalidAmount)
        );
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_credit_then_debit_round_trip() {
        let (service, _) = make_service();
        let user = UserId::new("uid_1");
        service.ensure_account(&user, ProfileHints::empty()).await.unwrap();

        assert_eq!(service.credit(&user, 4).await.unwrap(), 9);
        assert_eq!(service.debit(&user, 4).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_new_user_burns_through_default_balance() {
        let (service, _) = make_service();
        let user = UserId::new("uid_lifecycle");

        for expected_left in (0..5).rev() {
            assert_eq!(service.debit(&user, 1).await.unwrap(), expected_left);
        }

        let err = service.debit(&user, 1).await.unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientCredits {
                available: 0,
                requested: 1
            }
        );
        let view = service.ensure_account(&user, ProfileHints::empty()).await.unwrap();
        assert_eq!(view.credits, 0);
    }

    #[tokio::test]
    async fn test_topup_existing_account() {
        let (service, _) = make_service();
        let user = UserId::new("uid_1");

        // Bring the account to 3 credits, then top up.
        service.ensure_account(&user, ProfileHints::empty()).await.unwrap();
        service.debit(&user, 2).await.unwrap();
        assert_eq!(service.credit(&user, 10).await.unwrap(), 13);
    }

    #[tokio::test]
    async fn test_credit_provisions_fresh_identity_with_seed_plus_amount() {
        let (service, _) = make_service();
        let user = UserId::new("uid_purchaser");

        assert_eq!(service.credit(&user, 10).await.unwrap(), 15);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_retryable() {
        struct DownStore;

        #[async_trait::async_trait]
        impl LedgerStore for DownStore {
            async fn get(&self, _user_id: &UserId) -> Result<Option<Account>, StoreError> {
                Err(StoreError::Unavailable("backend down".to_string()))
            }

            async fn commit(
                &self,
                _user_id: &UserId,
                _expected: Option<u64>,
                _account: Account,
            ) -> Result<(), StoreError> {
                Err(StoreError::Unavailable("backend down".to_string()))
            }
        }

        let service = CreditService::new(Arc::new(DownStore), CreditConfig::default());
        let err = service.debit(&UserId::new("uid_1"), 1).await.unwrap_err();
        assert!(err.is_retryable());
    }
}
