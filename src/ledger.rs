//! Coin ledger
//!
//! The slice of the player's profile the mini-game is allowed to touch,
//! persisted as JSON. Stands in for the remote profile store behind
//! [`EconomyService`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Timestamp;
use crate::economy::{EconomyError, EconomyService, PayoutRequest, Transaction, TransactionKind};

/// Maximum number of transactions to keep
pub const MAX_TRANSACTIONS: usize = 50;

/// Badge awarded for the first earned coins
pub const FIRST_EARN_BADGE: &str = "first_earn";

/// Player glyph used when the profile has no pet
pub const DEFAULT_PET_GLYPH: &str = "🐷";

/// Persisted economy fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Ledger {
    /// Coin balance
    pub coins: u64,
    /// When the next game may start (ms since epoch)
    pub game_cooldown_end: Option<Timestamp>,
    /// Coins per point
    pub earn_rate: u64,
    /// Glyph of the selected pet
    pub pet_glyph: String,
    /// Newest first, capped at [`MAX_TRANSACTIONS`]
    pub transactions: Vec<Transaction>,
    /// Badge IDs (other parts of the app award their own)
    pub badges: Vec<String>,
    /// Backing file; `None` keeps the ledger in memory only
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            coins: 0,
            game_cooldown_end: None,
            earn_rate: 1,
            pet_glyph: DEFAULT_PET_GLYPH.to_string(),
            transactions: Vec::new(),
            badges: Vec::new(),
            path: None,
        }
    }
}

impl Ledger {
    /// Create an in-memory ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `path`. A missing file gives a fresh ledger bound to that
    /// path; an unreadable or malformed one is an error so it never gets
    /// overwritten with defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EconomyError> {
        let path = path.as_ref();
        let mut ledger = if path.exists() {
            let json = fs::read_to_string(path)?;
            let ledger: Ledger = serde_json::from_str(&json)?;
            log::info!(
                "Loaded ledger: {} coins, {} transactions",
                ledger.coins,
                ledger.transactions.len()
            );
            ledger
        } else {
            log::info!("No ledger at {}, starting fresh", path.display());
            Self::default()
        };
        ledger.path = Some(path.to_path_buf());
        Ok(ledger)
    }

    /// Write to the backing file (no-op for in-memory ledgers)
    ///
    /// Writes a temp file first and renames it over the old one, so a failed
    /// write never leaves a truncated ledger behind.
    pub fn save(&self) -> Result<(), EconomyError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        log::info!("Ledger saved ({} coins)", self.coins);
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Prepend a transaction, dropping the oldest beyond the cap
    pub fn record_transaction(&mut self, transaction: Transaction) {
        self.transactions.insert(0, transaction);
        self.transactions.truncate(MAX_TRANSACTIONS);
    }

    /// Award a badge. Returns true if it was new.
    pub fn award_badge(&mut self, badge: &str) -> bool {
        if self.badges.iter().any(|b| b == badge) {
            return false;
        }
        self.badges.push(badge.to_string());
        log::info!("New badge: {}", badge);
        true
    }

    /// Award badges earned through the coin history
    pub fn check_badges(&mut self) {
        let has_earned = self
            .transactions
            .iter()
            .any(|t| t.kind == TransactionKind::Earn);
        if has_earned && self.coins > 0 {
            self.award_badge(FIRST_EARN_BADGE);
        }
    }
}

impl EconomyService for Ledger {
    fn cooldown_expiry(&self) -> Option<Timestamp> {
        self.game_cooldown_end
    }

    fn earn_rate(&self) -> u64 {
        self.earn_rate
    }

    fn player_glyph(&self) -> &str {
        &self.pet_glyph
    }

    /// Applies the payout in memory, then saves. A failed save is returned
    /// but the payout stays applied, so the next successful `save` persists it.
    fn apply_payout(&mut self, request: &PayoutRequest) -> Result<(), EconomyError> {
        self.coins = self.coins.saturating_add(request.amount);
        self.game_cooldown_end = Some(request.cooldown_expiry);
        self.record_transaction(request.transaction.clone());
        self.check_badges();
        self.save()
    }
}
