// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Rotation pulse counter shared between the edge interrupt and the tick interrupt.
//!
//! The count is only reachable through [`PulseCounter::record_edge`] and [`PulseCounter::take`],
//! both of which run inside a critical section, so the tick handler can never observe a
//! half-updated value or lose an edge that lands between the snapshot and the reset.

use core::cell::Cell;
use critical_section::Mutex;

/// Pulses seen in one window.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PulseSnapshot {
    pub count: u16,
    /// More edges arrived than `u16` can hold; `count` is pinned at `u16::MAX`.
    pub saturated: bool,
}

pub struct PulseCounter {
    tally: Mutex<Cell<PulseSnapshot>>,
}

impl Default for PulseCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseCounter {
    /// `const` so the counter can live in a `static` shared with interrupt handlers.
    pub const fn new() -> Self {
        Self {
            tally: Mutex::new(Cell::new(PulseSnapshot {
                count: 0,
                saturated: false,
            })),
        }
    }

    /// Count one edge. No debouncing: every call is a pulse.
    #[inline]
    pub fn record_edge(&self) {
        critical_section::with(|cs| {
            let cell = self.tally.borrow(cs);
            let mut tally = cell.get();
            match tally.count.checked_add(1) {
                Some(next) => tally.count = next,
                None => tally.saturated = true,
            }
            cell.set(tally);
        });
    }

    /// Snapshot the count and reset it to zero in one step.
    pub fn take(&self) -> PulseSnapshot {
        critical_section::with(|cs| self.tally.borrow(cs).replace(PulseSnapshot::default()))
    }

    /// Current count without resetting it.
    pub fn peek(&self) -> u16 {
        critical_section::with(|cs| self.tally.borrow(cs).get().count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_returns_edges_since_last_take() {
        let counter = PulseCounter::new();
        for _ in 0..37 {
            counter.record_edge();
        }
        assert_eq!(counter.peek(), 37);
        assert_eq!(
            counter.take(),
            PulseSnapshot {
                count: 37,
                saturated: false
            }
        );
        assert_eq!(counter.peek(), 0);

        counter.record_edge();
        assert_eq!(counter.take().count, 1);
    }

    #[test]
    fn saturates_instead_of_wrapping() {
        let counter = PulseCounter::new();
        for _ in 0..(u16::MAX as u32 + 5) {
            counter.record_edge();
        }
        let snap = counter.take();
        assert_eq!(snap.count, u16::MAX);
        assert!(snap.saturated);

        // The flag clears with the reset.
        counter.record_edge();
        assert_eq!(
            counter.take(),
            PulseSnapshot {
                count: 1,
                saturated: false
            }
        );
    }

    #[test]
    fn concurrent_edges_are_never_lost() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;
        use std::thread;

        static COUNTER: PulseCounter = PulseCounter::new();
        const EDGES: u32 = 50_000;

        let done = Arc::new(AtomicBool::new(false));
        let edges = {
            let done = done.clone();
            thread::spawn(move || {
                for _ in 0..EDGES {
                    COUNTER.record_edge();
                }
                done.store(true, Ordering::Release);
            })
        };

        let mut total = 0u32;
        while !done.load(Ordering::Acquire) {
            total += COUNTER.take().count as u32;
        }
        edges.join().unwrap();
        total += COUNTER.take().count as u32;

        assert_eq!(total, EDGES);
    }
}
