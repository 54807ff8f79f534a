// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Infrared carrier generator.
//!
//! The carrier is a software square wave: a fixed-rate timer interrupt calls [`Carrier::toggle`],
//! which flips one output pin. Two toggles make one carrier period, so the timer runs at
//! [`CARRIER_TOGGLE_HZ`](crate::config::CARRIER_TOGGLE_HZ).

use embedded_hal::digital::OutputPin;

/// Square-wave output that remembers its last driven level.
pub struct Carrier<PIN: OutputPin> {
    pin: PIN,
    high: bool,
    toggles: u32,
}

impl<PIN: OutputPin> Carrier<PIN> {
    /// Take ownership of the pin and drive it low.
    pub fn new(mut pin: PIN) -> Self {
        pin.set_low().ok();
        Self {
            pin,
            high: false,
            toggles: 0,
        }
    }

    /// Flip the output. Called once per carrier timer update event.
    #[inline]
    pub fn toggle(&mut self) {
        self.high = !self.high;
        if self.high {
            self.pin.set_high().ok();
        } else {
            self.pin.set_low().ok();
        }
        self.toggles = self.toggles.wrapping_add(1);
    }

    #[inline]
    pub fn is_high(&self) -> bool {
        self.high
    }

    /// Number of edges produced since construction (wraps).
    #[inline]
    pub fn toggles(&self) -> u32 {
        self.toggles
    }

    pub fn free(self) -> PIN {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    /// Records every level written to it.
    #[derive(Default)]
    struct Probe {
        writes: std::vec::Vec<bool>,
    }

    impl ErrorType for Probe {
        type Error = Infallible;
    }

    impl OutputPin for Probe {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.writes.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.writes.push(true);
            Ok(())
        }
    }

    #[test]
    fn starts_low() {
        let carrier = Carrier::new(Probe::default());
        assert!(!carrier.is_high());
        assert_eq!(carrier.free().writes, [false]);
    }

    #[test]
    fn every_tick_flips_exactly_once() {
        const TICKS: u32 = 100_000;
        let mut carrier = Carrier::new(Probe::default());

        for _ in 0..TICKS {
            carrier.toggle();
        }

        assert_eq!(carrier.toggles(), TICKS);
        // Even number of toggles brings the line back to where it started.
        assert!(!carrier.is_high());

        let writes = carrier.free().writes;
        assert_eq!(writes.len(), TICKS as usize + 1);
        // No missed or doubled edge: consecutive writes always alternate.
        assert!(writes.windows(2).all(|w| w[0] != w[1]));
        let highs = writes.iter().filter(|&&w| w).count();
        assert_eq!(highs, TICKS as usize / 2);
    }
}
