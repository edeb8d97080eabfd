// ABOUTME: Daily ledger aggregate-maintenance engine for meal entries and running totals
// ABOUTME: Enforces totals==sum(entries) net of calorie burn across add/edit/delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Daily ledger engine
//!
//! Mutation methods on [`DailyLedger`], the single source of truth for one
//! user's nutrition on one calendar day. Entries are addressed by their
//! stable id; positional index is a display-order hint that callers resolve
//! to an id via [`DailyLedger::entry_id_at`] inside the same critical
//! section as the mutation (see the storage layer).
//!
//! Totals are recomputed from the entry list inside every mutation commit,
//! so the ledger invariants hold by construction:
//! - `totals.calories == sum(entries.calories) - burned_calories`
//! - `totals.{protein,carbs,fats} == sum(entries.{protein,carbs,fats})`
//!
//! Recomputing (rather than incrementally adjusting) also makes the edit
//! round-trip exact: restoring an entry's original values restores the
//! identical entry sequence, hence the identical totals.

use crate::errors::{AppError, AppResult};
use crate::models::{DailyLedger, MacroTotals, MealEntry, MealEntryInput};
use tracing::debug;
use uuid::Uuid;

impl DailyLedger {
    /// Append a validated entry and fold it into the day's totals
    ///
    /// Always succeeds for a well-formed entry; the owning store creates the
    /// ledger lazily when this is the first write of the day.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEntry` when the payload fails validation
    pub fn add_entry(&mut self, input: MealEntryInput) -> AppResult<MealEntry> {
        let entry = MealEntry::from_input(input)?;
        self.entries.push(entry.clone());
        self.recompute_totals();

        debug!(
            user_id = %self.user_id,
            date = %self.date,
            entry_id = %entry.id,
            entry_count = self.entries.len(),
            "Meal entry added"
        );
        Ok(entry)
    }

    /// Replace the entry with the given id, keeping its identity and position
    ///
    /// The input is validated before any state changes, so a failure never
    /// leaves totals reflecting only one side of the swap.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` when no entry has this id, `InvalidEntry`
    /// when the replacement payload fails validation
    pub fn edit_entry(&mut self, entry_id: Uuid, input: MealEntryInput) -> AppResult<&MealEntry> {
        input.validate()?;
        let position = self.position_of(entry_id)?;

        self.entries[position] = MealEntry {
            id: entry_id,
            meal_text: input.meal_text,
            calories: input.calories,
            protein: input.protein,
            carbs: input.carbs,
            fats: input.fats,
            image: input.image,
            barcode: input.barcode,
        };
        self.recompute_totals();

        debug!(
            user_id = %self.user_id,
            date = %self.date,
            entry_id = %entry_id,
            position,
            "Meal entry edited"
        );
        Ok(&self.entries[position])
    }

    /// Remove the entry with the given id and subtract its contribution
    ///
    /// Order of the remaining entries is preserved; positional identity
    /// shifts for every entry after the removed one.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` when no entry has this id
    pub fn delete_entry(&mut self, entry_id: Uuid) -> AppResult<MealEntry> {
        let position = self.position_of(entry_id)?;
        let removed = self.entries.remove(position);
        self.recompute_totals();

        debug!(
            user_id = %self.user_id,
            date = %self.date,
            entry_id = %entry_id,
            position,
            entry_count = self.entries.len(),
            "Meal entry deleted"
        );
        Ok(removed)
    }

    /// Resolve a display-order index to the stable entry id
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` when the index is out of range for the
    /// day's entries
    pub fn entry_id_at(&self, index: usize) -> AppResult<Uuid> {
        self.entries
            .get(index)
            .map(|entry| entry.id)
            .ok_or_else(|| AppError::entry_not_found(index))
    }

    /// Whether the L1/L2 invariants currently hold (test support)
    #[must_use]
    pub fn invariants_hold(&self) -> bool {
        let expected = self.expected_totals();
        self.totals == expected
    }

    fn position_of(&self, entry_id: Uuid) -> AppResult<usize> {
        self.entries
            .iter()
            .position(|entry| entry.id == entry_id)
            .ok_or_else(|| AppError::entry_not_found_by_id(entry_id))
    }

    fn expected_totals(&self) -> MacroTotals {
        let mut totals = MacroTotals::zero();
        for entry in &self.entries {
            totals.add(&entry.contribution());
        }
        totals.calories -= self.burned_calories;
        totals
    }

    /// Commit step: derive totals from the entry list and the burn adjustment
    pub(crate) fn recompute_totals(&mut self) {
        self.totals = self.expected_totals();
    }
}
