// ABOUTME: In-memory nutrition store with per-(user, day) mutation serialization
// ABOUTME: DashMap of ledger cells, each guarded by its own async mutex
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

use super::NutritionStore;
use crate::errors::{AppError, AppResult};
use crate::models::{CalorieGoal, DailyLedger, LedgerKey, MealEntry, MealEntryInput};
use crate::step_sync::apply_step_sync;
use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// In-memory store
///
/// Each (user, day) key maps to its own `Arc<Mutex<DailyLedger>>` cell, so
/// mutations against one day serialize on that cell's lock while different
/// keys proceed in parallel. Read paths clone a snapshot and never create
/// ledgers; the write paths that upsert (add, step sync) insert the cell on
/// first use.
#[derive(Default)]
pub struct InMemoryStore {
    ledgers: DashMap<LedgerKey, Arc<Mutex<DailyLedger>>>,
    goals: DashMap<Uuid, CalorieGoal>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch or create the cell for a key; the map guard is dropped before
    /// the cell lock is taken, so no lock is held across an await point
    fn upsert_cell(&self, key: LedgerKey) -> Arc<Mutex<DailyLedger>> {
        self.ledgers
            .entry(key)
            .or_insert_with(|| {
                debug!(user_id = %key.user_id, date = %key.date, "Creating ledger for first write of the day");
                Arc::new(Mutex::new(DailyLedger::empty(key.user_id, key.date)))
            })
            .clone()
    }

    fn existing_cell(&self, key: &LedgerKey) -> Option<Arc<Mutex<DailyLedger>>> {
        self.ledgers.get(key).map(|cell| cell.clone())
    }
}

#[async_trait::async_trait]
impl NutritionStore for InMemoryStore {
    async fn add_entry(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        input: MealEntryInput,
    ) -> AppResult<(MealEntry, DailyLedger)> {
        let cell = self.upsert_cell(LedgerKey::new(user_id, date));
        let mut ledger = cell.lock().await;
        let entry = ledger.add_entry(input)?;
        Ok((entry, ledger.clone()))
    }

    async fn edit_entry(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        index: usize,
        input: MealEntryInput,
    ) -> AppResult<DailyLedger> {
        let cell = self
            .existing_cell(&LedgerKey::new(user_id, date))
            .ok_or_else(|| AppError::entry_not_found(index))?;
        let mut ledger = cell.lock().await;
        // Index resolution and mutation share the critical section
        let entry_id = ledger.entry_id_at(index)?;
        ledger.edit_entry(entry_id, input)?;
        Ok(ledger.clone())
    }

    async fn delete_entry(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        index: usize,
    ) -> AppResult<DailyLedger> {
        let cell = self
            .existing_cell(&LedgerKey::new(user_id, date))
            .ok_or_else(|| AppError::entry_not_found(index))?;
        let mut ledger = cell.lock().await;
        let entry_id = ledger.entry_id_at(index)?;
        ledger.delete_entry(entry_id)?;
        Ok(ledger.clone())
    }

    async fn sync_steps(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        reported: u64,
    ) -> AppResult<DailyLedger> {
        let cell = self.upsert_cell(LedgerKey::new(user_id, date));
        let mut ledger = cell.lock().await;
        // `previous` is read from the locked current-day ledger, never from
        // a cached value, so a new day's sync starts from zero
        apply_step_sync(&mut ledger, reported);
        Ok(ledger.clone())
    }

    async fn ledger(&self, user_id: Uuid, date: NaiveDate) -> AppResult<DailyLedger> {
        match self.existing_cell(&LedgerKey::new(user_id, date)) {
            Some(cell) => Ok(cell.lock().await.clone()),
            None => Ok(DailyLedger::empty(user_id, date)),
        }
    }

    async fn history(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<DailyLedger>> {
        let mut cells: Vec<(NaiveDate, Arc<Mutex<DailyLedger>>)> = self
            .ledgers
            .iter()
            .filter(|item| {
                let key = item.key();
                key.user_id == user_id && key.date >= from && key.date <= to
            })
            .map(|item| (item.key().date, item.value().clone()))
            .collect();
        cells.sort_by_key(|(date, _)| *date);

        let mut ledgers = Vec::with_capacity(cells.len());
        for (_, cell) in cells {
            ledgers.push(cell.lock().await.clone());
        }
        Ok(ledgers)
    }

    async fn upsert_goal(&self, goal: CalorieGoal) -> AppResult<CalorieGoal> {
        self.goals.insert(goal.user_id, goal);
        Ok(goal)
    }

    async fn goal(&self, user_id: Uuid) -> AppResult<Option<CalorieGoal>> {
        Ok(self.goals.get(&user_id).map(|goal| *goal))
    }
}
