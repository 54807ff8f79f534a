// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! 1 ms timebase that closes a measurement window every 100 ticks.
//!
//! The tick handler runs every millisecond and asks the timebase whether the window just closed.
//! Work that happens once per window is therefore checked on every tick and acted on every
//! [`TICKS_PER_WINDOW`]th one. Windows are counted from the first tick after construction.

use crate::config::{TICKS_PER_DECADE, TICKS_PER_WINDOW};

/// Result of one timebase tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Still inside the current window.
    Running,
    /// This tick completed a window.
    WindowClosed,
}

pub struct Timebase {
    /// Ticks since the last window closed, `0..TICKS_PER_WINDOW`.
    phase: u16,
    windows: u32,
}

impl Default for Timebase {
    fn default() -> Self {
        Self::new()
    }
}

impl Timebase {
    pub const fn new() -> Self {
        Self {
            phase: 0,
            windows: 0,
        }
    }

    /// Advance by one tick.
    #[inline]
    pub fn tick(&mut self) -> Tick {
        self.phase += 1;
        if self.phase == TICKS_PER_WINDOW {
            self.phase = 0;
            self.windows = self.windows.wrapping_add(1);
            Tick::WindowClosed
        } else {
            Tick::Running
        }
    }

    /// Position in the window as `(ms, tens of ms)`, each in `0..=9`.
    #[inline]
    pub fn decades(&self) -> (u8, u8) {
        (
            (self.phase % TICKS_PER_DECADE) as u8,
            (self.phase / TICKS_PER_DECADE) as u8,
        )
    }

    #[inline]
    pub fn phase(&self) -> u16 {
        self.phase
    }

    /// Windows closed since start (wraps).
    #[inline]
    pub fn windows_closed(&self) -> u32 {
        self.windows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_window_per_hundred_ticks() {
        let mut tb = Timebase::new();
        let mut closed_at = std::vec::Vec::new();

        for n in 1..=1_000u32 {
            if tb.tick() == Tick::WindowClosed {
                closed_at.push(n);
            }
        }

        assert_eq!(closed_at, (1..=10).map(|w| w * 100).collect::<std::vec::Vec<_>>());
        assert_eq!(tb.windows_closed(), 10);
    }

    #[test]
    fn decades_match_cascaded_counters() {
        let mut tb = Timebase::new();
        // Two-stage cascade as the reference: ones roll into tens, tens roll into a window.
        let (mut ones, mut tens) = (0u8, 0u8);

        for _ in 0..10_000 {
            let tick = tb.tick();

            ones += 1;
            let mut closed = false;
            if ones == 10 {
                ones = 0;
                tens += 1;
                if tens == 10 {
                    tens = 0;
                    closed = true;
                }
            }

            assert_eq!(tb.decades(), (ones, tens));
            assert_eq!(tick == Tick::WindowClosed, closed);
            let (o, t) = tb.decades();
            assert!(o <= 9 && t <= 9);
        }
    }

    #[test]
    fn first_window_needs_a_full_hundred_ticks() {
        let mut tb = Timebase::new();
        for _ in 0..99 {
            assert_eq!(tb.tick(), Tick::Running);
        }
        assert_eq!(tb.decades(), (9, 9));
        assert_eq!(tb.tick(), Tick::WindowClosed);
        assert_eq!(tb.phase(), 0);
    }
}
