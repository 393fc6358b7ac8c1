//! Two-key normal-mode commands (`gg`, `dd`, `yy`, `cc`).
//!
//! A leader key arms the chord with a deadline. Every later key first
//! checks the deadline, then either completes the chord or clears it and
//! runs as an ordinary key.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of the current time. Injected so chord expiry is testable.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to, for tests and scripted replay.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Keys that start a chord.
pub const LEADERS: [char; 4] = ['d', 'g', 'y', 'c'];

/// A completed chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chord {
    /// `gg`
    FirstLine,
    /// `dd`
    DeleteLine,
    /// `yy`
    YankLine,
    /// `cc`
    ChangeLine,
}

impl Chord {
    fn from_keys(leader: char, second: char) -> Option<Self> {
        match (leader, second) {
            ('g', 'g') => Some(Chord::FirstLine),
            ('d', 'd') => Some(Chord::DeleteLine),
            ('y', 'y') => Some(Chord::YankLine),
            ('c', 'c') => Some(Chord::ChangeLine),
            _ => None,
        }
    }
}

/// Outcome of feeding one key to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordStep {
    /// A leader was pressed; the key is consumed.
    Armed,
    Complete(Chord),
    /// The key is handled on its own. A pending chord it did not
    /// complete is dropped.
    Passthrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingChord {
    leader: char,
    deadline: Instant,
}

#[derive(Debug, Clone)]
pub struct ChordTracker {
    pending: Option<PendingChord>,
    timeout: Duration,
}

impl ChordTracker {
    pub fn new(timeout: Duration) -> Self {
        Self {
            pending: None,
            timeout,
        }
    }

    /// Leader of the pending chord, if it has not expired at `now`.
    pub fn pending(&self, now: Instant) -> Option<char> {
        self.pending
            .filter(|p| now < p.deadline)
            .map(|p| p.leader)
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Feed a key; `None` stands for a key without a character.
    pub fn feed(&mut self, key: Option<char>, now: Instant) -> ChordStep {
        if let Some(pending) = self.pending {
            if now >= pending.deadline {
                log::debug!("Chord '{}' timed out", pending.leader);
                self.pending = None;
            }
        }

        if let Some(pending) = self.pending.take() {
            if let Some(chord) = key.and_then(|k| Chord::from_keys(pending.leader, k)) {
                return ChordStep::Complete(chord);
            }
            log::debug!("Chord '{}' cleared by {:?}", pending.leader, key);
        }

        match key {
            Some(leader) if LEADERS.contains(&leader) => {
                self.pending = Some(PendingChord {
                    leader,
                    deadline: now + self.timeout,
                });
                ChordStep::Armed
            }
            _ => ChordStep::Passthrough,
        }
    }
}
