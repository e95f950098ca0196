//! Per-user credit account
//!
//! One account exists per caller identity, created implicitly the first
//! time the identity is observed. The balance is an unsigned integer, so
//! a committed account can never hold a negative number of credits; the
//! mutation methods below are the only code paths that touch it.

use crate::errors::LedgerError;
use crate::ids::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile hints supplied by the identity provider.
///
/// Applied once, at first provisioning; later hints never overwrite the
/// stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileHints {
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl ProfileHints {
    /// Hints with no profile information (used when a debit provisions
    /// an account before the caller ever fetched their balance).
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A caller's credit account.
///
/// Invariant: every successful debit strictly decreases `credits` by the
/// requested amount; every successful credit strictly increases it.
/// `created_at` is written exactly once, at provisioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub user_id: UserId,
    pub credits: u32,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
    /// Commit counter for optimistic concurrency control. Assigned by the
    /// store on commit; never meaningful to business logic.
    pub version: u64,
}

impl Account {
    /// Create a fresh account for an identity observed for the first time.
    pub fn provision(
        user_id: UserId,
        credits: u32,
        hints: ProfileHints,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            credits,
            email: hints.email,
            display_name: hints.display_name,
            created_at: now,
            last_used_at: now,
            version: 0,
        }
    }

    /// Deduct `amount` credits, returning the post-debit balance.
    ///
    /// Fails with `InsufficientCredits` when the balance cannot cover the
    /// amount, leaving the account untouched. A zero amount is rejected:
    /// a successful debit must move the balance.
    pub fn debit(&mut self, amount: u32, now: DateTime<Utc>) -> Result<u32, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        if self.credits < amount {
            return Err(LedgerError::InsufficientCredits {
                available: self.credits,
                requested: amount,
            });
        }

        self.credits -= amount;
        self.last_used_at = now;
        Ok(self.credits)
    }

    /// Add `amount` credits, returning the new total.
    ///
    /// A zero amount is rejected; an addition that would overflow the
    /// balance fails with `BalanceOverflow` and leaves the account
    /// untouched.
    pub fn credit(&mut self, amount: u32, now: DateTime<Utc>) -> Result<u32, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }

        self.credits = self
            .credits
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        self.last_used_at = now;
        Ok(self.credits)
    }

    /// Record a read of the account without changing the balance.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_used_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 17, 9, 30, 0).unwrap()
    }

    fn t1() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 17, 9, 31, 0).unwrap()
    }

    fn make_account(credits: u32) -> Account {
        Account::provision(UserId::new("uid_1"), credits, ProfileHints::empty(), t0())
    }

    #[test]
    fn test_provision_sets_timestamps_once() {
        let hints = ProfileHints {
            email: Some("a@example.com".to_string()),
            display_name: Some("Alice".to_string()),
        };
        let account = Account::provision(UserId::new("uid_1"), 5, hints, t0());

        assert_eq!(account.credits, 5);
        assert_eq!(account.email.as_deref(), Some("a@example.com"));
        assert_eq!(account.display_name.as_deref(), Some("Alice"));
        assert_eq!(account.created_at, t0());
        assert_eq!(account.last_used_at, t0());
        assert_eq!(account.version, 0);
    }

    #[test]
    fn test_debit_decreases_balance_and_touches() {
        let mut account = make_account(5);
        let left = account.debit(1, t1()).unwrap();

        assert_eq!(left, 4);
        assert_eq!(account.credits, 4);
        assert_eq!(account.last_used_at, t1());
        // created_at is immutable after provisioning
        assert_eq!(account.created_at, t0());
    }

    #[test]
    fn test_debit_insufficient_leaves_account_unchanged() {
        let mut account = make_account(2);
        let before = account.clone();

        let err = account.debit(3, t1()).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientCredits {
                available: 2,
                requested: 3
            }
        );
        assert_eq!(account, before);
    }

    #[test]
    fn test_debit_zero_rejected() {
        let mut account = make_account(5);
        assert_eq!(account.debit(0, t1()), Err(LedgerError::InvalidAmount));
        assert_eq!(account.credits, 5);
        assert_eq!(account.last_used_at, t0());
    }

    #[test]
    fn test_debit_entire_balance_reaches_zero() {
        let mut account = make_account(3);
        assert_eq!(account.debit(3, t1()).unwrap(), 0);
        assert_eq!(
            account.debit(1, t1()),
            Err(LedgerError::InsufficientCredits {
                available: 0,
                requested: 1
            })
        );
    }

    #[test]
    fn test_credit_increases_balance() {
        let mut account = make_account(3);
        assert_eq!(account.credit(10, t1()).unwrap(), 13);
        assert_eq!(account.credits, 13);
        assert_eq!(account.last_used_at, t1());
    }

    #[test]
    fn test_credit_zero_rejected() {
        let mut account = make_account(3);
        assert_eq!(account.credit(0, t1()), Err(LedgerError::InvalidAmount));
        assert_eq!(account.credits, 3);
    }

    #[test]
    fn test_credit_overflow_rejected() {
        let mut account = make_account(u32::MAX - 1);
        assert_eq!(account.credit(2, t1()), Err(LedgerError::BalanceOverflow));
        assert_eq!(account.credits, u32::MAX - 1);
    }

    #[test]
    fn test_credit_then_debit_round_trip() {
        let mut account = make_account(7);
        account.credit(4, t1()).unwrap();
        account.debit(4, t1()).unwrap();
        assert_eq!(account.credits, 7);
    }

    #[test]
    fn test_touch_only_moves_last_used() {
        let mut account = make_account(5);
        account.touch(t1());
        assert_eq!(account.credits, 5);
        assert_eq!(account.created_at, t0());
        assert_eq!(account.last_used_at, t1());
    }

    #[test]
    fn test_mutations_never_rewrite_profile() {
        let hints = ProfileHints {
            email: Some("a@example.com".to_string()),
            display_name: None,
        };
        let mut account = Account::provision(UserId::new("uid_1"), 5, hints, t0());
        account.debit(1, t1()).unwrap();
        account.credit(2, t1()).unwrap();

        assert_eq!(account.email.as_deref(), Some("a@example.com"));
        assert_eq!(account.display_name, None);
    }
}
