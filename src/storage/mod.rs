// ABOUTME: Persistence seam for ledgers and goals with pluggable backends
// ABOUTME: Trait contract requires serialized mutations per (user, day) key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Storage abstraction
//!
//! The ledger and the goal are the only shared mutable state in the core.
//! [`NutritionStore`] is the seam a persistence backend implements; the
//! in-memory implementation in [`memory`] is the reference. Whatever the
//! backend, every mutating operation against one (user, day) key must be
//! serialized — at least the equivalent of serializable isolation at the
//! ledger-row granularity — while operations on different users or days
//! remain fully independent.
//!
//! Index-based entry addressing is resolved to the stable entry id inside
//! the same critical section as the mutation, so a stale index can never
//! target an entry that moved under a concurrent delete.

/// In-memory store implementation
pub mod memory;

pub use memory::InMemoryStore;

use crate::errors::AppResult;
use crate::models::{CalorieGoal, DailyLedger, MealEntry, MealEntryInput};
use chrono::NaiveDate;
use uuid::Uuid;

/// Persistence contract for ledgers (one per user per day, lazily created)
/// and goals (one per user, replace-on-write)
#[async_trait::async_trait]
pub trait NutritionStore: Send + Sync {
    /// Append an entry to the day's ledger, creating the ledger if absent
    ///
    /// Returns the created entry and the post-mutation ledger snapshot.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEntry` when the payload fails validation
    async fn add_entry(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        input: MealEntryInput,
    ) -> AppResult<(MealEntry, DailyLedger)>;

    /// Replace the entry at the given display index
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` when the day has no ledger or the index is
    /// out of range, `InvalidEntry` when the payload fails validation
    async fn edit_entry(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        index: usize,
        input: MealEntryInput,
    ) -> AppResult<DailyLedger>;

    /// Remove the entry at the given display index
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` when the day has no ledger or the index is
    /// out of range
    async fn delete_entry(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        index: usize,
    ) -> AppResult<DailyLedger>;

    /// Apply a cumulative step report to the day's ledger, creating the
    /// ledger if absent
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails
    async fn sync_steps(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        reported: u64,
    ) -> AppResult<DailyLedger>;

    /// Read the day's ledger, or the empty default view when none exists
    ///
    /// Never an error for an absent day; reads do not create ledgers.
    async fn ledger(&self, user_id: Uuid, date: NaiveDate) -> AppResult<DailyLedger>;

    /// Ledgers for the user within `from..=to`, ascending by date
    ///
    /// Days without a ledger are omitted.
    async fn history(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<DailyLedger>>;

    /// Replace the user's goal wholesale (upsert semantics)
    async fn upsert_goal(&self, goal: CalorieGoal) -> AppResult<CalorieGoal>;

    /// Read the user's goal, if one has been set
    async fn goal(&self, user_id: Uuid) -> AppResult<Option<CalorieGoal>>;
}
