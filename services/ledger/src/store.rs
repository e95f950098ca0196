//! Versioned account store
//!
//! The store is a keyed record store with optimistic concurrency control:
//! every committed account carries a version, and a write must name the
//! version it read (or claim the key is still absent). A mismatch rejects
//! the write, and the shared transaction loop re-reads and re-decides.
//!
//! Lost updates on the balance are impossible under any interleaving: two
//! writers that read the same version cannot both commit.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use types::account::Account;
use types::errors::{LedgerError, StoreError};
use types::ids::UserId;

/// Outcome of a transaction decision function.
#[derive(Debug)]
pub enum TxDecision<T> {
    /// Persist `account` and hand `result` back to the caller.
    Commit { account: Account, result: T },
    /// Write nothing and surface the error verbatim.
    Abort(LedgerError),
}

/// Backend contract for the versioned account store.
///
/// `commit` enforces the version check: `expected` is the version the
/// caller read, or `None` when the caller observed the key absent. The
/// store itself assigns the version of the committed record, so callers
/// never manufacture version numbers.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Point read, no side effects.
    async fn get(&self, user_id: &UserId) -> Result<Option<Account>, StoreError>;

    /// Version-checked write of the full record.
    async fn commit(
        &self,
        user_id: &UserId,
        expected: Option<u64>,
        account: Account,
    ) -> Result<(), StoreError>;
}

/// Read-decide-commit loop shared by every backend.
///
/// Runs the synchronous decision function against a snapshot of the
/// account, then commits with the snapshot's version. A version conflict
/// re-reads and re-decides up to `retry_limit` attempts; exhausting the
/// budget surfaces `RetryExhausted`. Domain aborts are returned on the
/// first pass and never retried.
pub async fn run_transaction<S, T, F>(
    store: &S,
    user_id: &UserId,
    retry_limit: u32,
    mut decide: F,
) -> Result<T, LedgerError>
where
    S: LedgerStore + ?Sized,
    F: FnMut(Option<&Account>) -> TxDecision<T>,
{
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        let snapshot = store.get(user_id).await?;
        let expected = snapshot.as_ref().map(|account| account.version);

        match decide(snapshot.as_ref()) {
            TxDecision::Abort(err) => return Err(err),
            TxDecision::Commit { account, result } => {
                match store.commit(user_id, expected, account).await {
                    Ok(()) => return Ok(result),
                    Err(StoreError::Conflict { .. }) if attempts < retry_limit => {
                        tracing::debug!(
                            "version conflict on account {}, attempt {} of {}",
                            user_id,
                            attempts,
                            retry_limit
                        );
                    }
                    Err(StoreError::Conflict { .. }) => {
                        return Err(LedgerError::Store(StoreError::RetryExhausted {
                            user_id: user_id.as_str().to_string(),
                            attempts,
                        }));
                    }
                    Err(err) => return Err(LedgerError::Store(err)),
                }
            }
        }
    }
}

/// In-memory backend over a sharded concurrent map.
///
/// The version check and the write happen under the shard lock for the
/// key, so a commit is a single atomic step. Suitable for tests and
/// single-process deployments.
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    accounts: DashMap<UserId, Account>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Number of provisioned accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.get(user_id).map(|entry| entry.clone()))
    }

    async fn commit(
        &self,
        user_id: &UserId,
        expected: Option<u64>,
        mut account: Account,
    ) -> Result<(), StoreError> {
        let conflict = || StoreError::Conflict {
            user_id: user_id.as_str().to_string(),
        };

        match self.accounts.entry(user_id.clone()) {
            Entry::Vacant(slot) => match expected {
                None => {
                    account.version = 1;
                    slot.insert(account);
                    Ok(())
                }
                // Caller read a record that has since disappeared.
                Some(_) => Err(conflict()),
            },
            Entry::Occupied(mut slot) => match expected {
                Some(version) if slot.get().version == version => {
                    account.version = version + 1;
                    slot.insert(account);
                    Ok(())
                }
                // Stale read, or a create raced with another create.
                _ => Err(conflict()),
            },
        }
    }
}
