//! Ledger tunables.

/// Knobs for the credit service, constructed once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditConfig {
    /// Balance seeded into an account the first time its identity is seen.
    pub default_credits: u32,
    /// Credits charged per render.
    pub deduction_per_render: u32,
    /// Transaction attempts before a version conflict is surfaced to the
    /// caller as an infrastructure error.
    pub tx_retry_limit: u32,
}

impl Default for CreditConfig {
    fn default() -> Self {
        Self {
            default_credits: 5,
            deduction_per_render: 1,
            tx_retry_limit: 5,
        }
    }
}
