//! # Scheduler
//!
//! Virtual clock and queue of timed continuations.
//!
//! Battle sequencing ("apply damage now, show the result, resolve the next
//! turn later") is expressed as continuations scheduled on this queue. Time
//! only moves when the store is told to advance, so tests can step through a
//! whole battle synchronously.

use crate::{BattleId, Side};
use log::trace;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A state transition waiting for its due time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Continuation {
    /// Clears the walking flag set by movement step `step`
    ClearMoving { step: u64 },
    /// The wild creature strikes back
    OpponentTurn { battle: BattleId },
    /// Announces that `side`'s creature fainted
    AnnounceFaint { battle: BattleId, side: Side },
    /// Resets the battle to its inactive defaults
    EndBattle { battle: BattleId },
}

impl Continuation {
    /// The battle this continuation belongs to, if any.
    pub fn battle(&self) -> Option<BattleId> {
        match self {
            Continuation::ClearMoving { .. } => None,
            Continuation::OpponentTurn { battle }
            | Continuation::AnnounceFaint { battle, .. }
            | Continuation::EndBattle { battle } => Some(*battle),
        }
    }
}

/// Queue entry. Ordered so the heap pops the earliest due time first and,
/// for equal due times, the one scheduled first.
#[derive(Debug, Clone)]
struct Pending {
    due: u64,
    seq: u64,
    continuation: Continuation,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Pending {}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Virtual clock with an ordered continuation queue.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: u64,
    next_seq: u64,
    queue: BinaryHeap<Pending>,
}

impl Scheduler {
    /// Creates a scheduler at time 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of continuations waiting.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Schedules `continuation` to run `delay_ms` after now.
    pub fn schedule(&mut self, delay_ms: u64, continuation: Continuation) {
        let due = self.now.saturating_add(delay_ms);
        trace!("scheduling {:?} at t={}", continuation, due);
        self.queue.push(Pending {
            due,
            seq: self.next_seq,
            continuation,
        });
        self.next_seq += 1;
    }

    /// Pops the next continuation due at or before `until`, moving the clock
    /// to its due time.
    pub fn pop_due(&mut self, until: u64) -> Option<Continuation> {
        if self.queue.peek().map_or(true, |next| next.due > until) {
            return None;
        }
        let next = self.queue.pop()?;
        self.now = self.now.max(next.due);
        Some(next.continuation)
    }

    /// Pops the next continuation whatever its due time.
    pub fn pop_next(&mut self) -> Option<Continuation> {
        let until = self.queue.peek()?.due;
        self.pop_due(until)
    }

    /// Moves the clock forward to `time`. The clock never runs backwards.
    pub fn advance_to(&mut self, time: u64) {
        self.now = self.now.max(time);
    }

    /// Drops every continuation belonging to `battle`. Returns how many were dropped.
    pub fn cancel_battle(&mut self, battle: BattleId) -> usize {
        let before = self.queue.len();
        self.queue
            .retain(|pending| pending.continuation.battle() != Some(battle));
        let dropped = before - self.queue.len();
        if dropped > 0 {
            trace!("cancelled {} continuations of battle {}", dropped, battle);
        }
        dropped
    }
}
