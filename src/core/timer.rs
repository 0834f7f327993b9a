//! Session timer: one active or paused work interval.

use crate::core::calculator::earnings::EarningsCalculator;
use crate::core::clock::Clock;
use crate::core::ledger::Ledger;
use crate::errors::AppResult;
use crate::models::daily_total::DailyTotal;
use chrono::{DateTime, Duration, Local, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Elapsed time frozen at `accumulated_ms`.
    Idle { accumulated_ms: i64 },
    /// Elapsed time is `now - started_at`.
    Running { started_at: DateTime<Local> },
}

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedSession {
    pub date: NaiveDate,
    pub elapsed_ms: i64,
    pub wage: f64,
    pub hours: f64,
    pub earnings: f64,
    /// Ledger entry after the increment.
    pub total: DailyTotal,
}

pub struct SessionTimer<C: Clock> {
    clock: C,
    state: TimerState,
}

impl<C: Clock> SessionTimer<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            state: TimerState::Idle { accumulated_ms: 0 },
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    fn elapsed_at(&self, now: DateTime<Local>) -> i64 {
        match self.state {
            TimerState::Idle { accumulated_ms } => accumulated_ms,
            TimerState::Running { started_at } => (now - started_at).num_milliseconds().max(0),
        }
    }

    pub fn elapsed_ms(&self) -> i64 {
        self.elapsed_at(self.clock.now())
    }

    /// Idle → Running. Frozen time is kept, so a stopped session resumes.
    pub fn start(&mut self) {
        if let TimerState::Idle { accumulated_ms } = self.state {
            let started_at = self.clock.now() - Duration::milliseconds(accumulated_ms);
            self.state = TimerState::Running { started_at };
        }
    }

    /// Running → Idle, freezing the elapsed time.
    pub fn stop(&mut self) {
        if self.is_active() {
            let accumulated_ms = self.elapsed_ms();
            self.state = TimerState::Idle { accumulated_ms };
        }
    }

    /// Discard unsaved time. Always ends Idle.
    pub fn clear(&mut self) {
        self.state = TimerState::Idle { accumulated_ms: 0 };
    }

    /// Elapsed time for display. Never changes state.
    pub fn tick(&self) -> i64 {
        self.elapsed_ms()
    }

    /// Add the current elapsed time to today's ledger entry and restart the
    /// count from zero. A running timer keeps running.
    ///
    /// The timer is untouched if the ledger write fails.
    pub fn save(
        &mut self,
        ledger: &Ledger<'_>,
        calc: &EarningsCalculator,
        wage: f64,
    ) -> AppResult<SavedSession> {
        let now = self.clock.now();
        let elapsed_ms = self.elapsed_at(now);
        let wage = calc.effective_wage(Some(wage));
        let (hours, earnings) = calc.increment(elapsed_ms, Some(wage));
        let date = now.date_naive();

        let total = ledger.upsert_daily(date, hours, earnings)?;

        self.state = match self.state {
            TimerState::Running { .. } => TimerState::Running { started_at: now },
            TimerState::Idle { .. } => TimerState::Idle { accumulated_ms: 0 },
        };

        Ok(SavedSession {
            date,
            elapsed_ms,
            wage,
            hours,
            earnings,
            total,
        })
    }
}
