// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Debounce state machine
//!
//! Listener changes start or restart a quiet-period timer; evaluation of the
//! listened set only happens once the timer expires. A new chain position
//! triggers an evaluation immediately against the last settled set, without
//! disturbing a pending timer.
//!
//! ```text
//! Idle ──listeners──▶ Pending ──expiry──▶ Evaluating ──▶ Idle
//!                       ▲   │                  │
//!                       └───┘ listeners        └──▶ Pending (resumed timer)
//! ```

use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::Instant;

use crate::call::{Call, CallKey};

/// Why an evaluation started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Trigger {
    /// The listener set was quiet for the full debounce period
    Settled,
    /// A new chain position was observed
    NewBlock,
}

impl Trigger {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Trigger::Settled => "settled",
            Trigger::NewBlock => "new_block",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SchedulerState {
    Idle,
    Pending { deadline: Instant },
    Evaluating { resume: Option<Instant> },
}

#[derive(Debug)]
pub(crate) struct Scheduler {
    debounce: Duration,
    state: SchedulerState,
    settled: BTreeMap<CallKey, Call>,
}

impl Scheduler {
    pub(crate) fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            state: SchedulerState::Idle,
            settled: BTreeMap::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> SchedulerState {
        self.state
    }

    /// Deadline of the quiet-period timer, if one is running
    pub(crate) fn deadline(&self) -> Option<Instant> {
        match self.state {
            SchedulerState::Pending { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// The listener set changed at `now`; restart the quiet period
    ///
    /// Evaluations run to completion inside the updater loop, so this is
    /// never observed mid-evaluation.
    pub(crate) fn listeners_changed(&mut self, now: Instant) {
        self.state = SchedulerState::Pending {
            deadline: now + self.debounce,
        };
    }

    /// Start an evaluation if the quiet period has elapsed at `now`
    ///
    /// `active` is the listened set at expiry and becomes the settled set.
    pub(crate) fn begin_settled(
        &mut self,
        now: Instant,
        active: impl FnOnce() -> BTreeMap<CallKey, Call>,
    ) -> Option<Trigger> {
        match self.state {
            SchedulerState::Pending { deadline } if deadline <= now => {
                self.settled = active();
                self.state = SchedulerState::Evaluating { resume: None };
                Some(Trigger::Settled)
            }
            _ => None,
        }
    }

    /// Start an evaluation for a new chain position
    ///
    /// A running quiet-period timer is resumed once the evaluation finishes.
    pub(crate) fn begin_new_block(&mut self) -> Trigger {
        let resume = self.deadline();
        self.state = SchedulerState::Evaluating { resume };
        Trigger::NewBlock
    }

    /// Finish the running evaluation
    pub(crate) fn finish(&mut self) {
        self.state = match self.state {
            SchedulerState::Evaluating {
                resume: Some(deadline),
            } => SchedulerState::Pending { deadline },
            SchedulerState::Evaluating { resume: None } => SchedulerState::Idle,
            other => other,
        };
    }

    /// The listened set as of the last settled quiet period
    pub(crate) fn settled(&self) -> &BTreeMap<CallKey, Call> {
        &self.settled
    }
}
