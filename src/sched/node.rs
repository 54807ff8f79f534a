// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Work done by the 1 ms tick interrupt.
//!
//! Each tick advances the timebase. When a window closes the pulse counter is snapshotted and
//! reset and the reporter stages a packet with freshly sampled sensor levels. Every tick, window
//! or not, gives the reporter a chance to push pending bytes into the link.

use crate::drivers::ir_sensors::SensorBank;
use crate::link::ByteSink;
use crate::sched::pulse::PulseCounter;
use crate::sched::reporter::{Reporter, ReporterStats};
use crate::sched::timebase::{Tick, Timebase};

pub struct TelemetryNode<'a> {
    timebase: Timebase,
    pulses: &'a PulseCounter,
    reporter: Reporter,
}

impl<'a> TelemetryNode<'a> {
    pub const fn new(pulses: &'a PulseCounter) -> Self {
        Self {
            timebase: Timebase::new(),
            pulses,
            reporter: Reporter::new(),
        }
    }

    /// Run one tick.
    pub fn on_tick<S, B>(&mut self, sink: &mut S, sensors: &mut B) -> Tick
    where
        S: ByteSink,
        B: SensorBank,
    {
        let tick = self.timebase.tick();
        if tick == Tick::WindowClosed {
            let pulses = self.pulses.take();
            self.reporter.close_window(pulses, sensors.sample());
        }
        self.reporter.service(sink);
        tick
    }

    #[inline]
    pub fn speed(&self) -> u16 {
        self.reporter.speed()
    }

    #[inline]
    pub fn timebase(&self) -> &Timebase {
        &self.timebase
    }

    #[inline]
    pub fn stats(&self) -> ReporterStats {
        self.reporter.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::ir_sensors::SensorBits;
    use crate::error::LinkError;
    use std::vec::Vec;

    #[derive(Default)]
    struct Wire {
        sent: Vec<u8>,
        stalled: bool,
    }

    impl ByteSink for Wire {
        fn try_write(&mut self, byte: u8) -> nb::Result<(), LinkError> {
            if self.stalled {
                return Err(nb::Error::WouldBlock);
            }
            self.sent.push(byte);
            Ok(())
        }
    }

    struct Fixed(SensorBits);

    impl SensorBank for Fixed {
        fn sample(&mut self) -> SensorBits {
            self.0
        }
    }

    #[test]
    fn window_reports_edges_since_previous_window() {
        let pulses = PulseCounter::new();
        let mut node = TelemetryNode::new(&pulses);
        let mut wire = Wire::default();
        let mut sensors = Fixed(SensorBits::default());

        for n in 0..5u16 {
            for _ in 0..(n * 3) {
                pulses.record_edge();
            }
            for _ in 0..100 {
                node.on_tick(&mut wire, &mut sensors);
            }
            assert_eq!(node.speed(), n * 3);
            assert_eq!(pulses.peek(), 0);
        }

        assert_eq!(wire.sent.len(), 5 * 6);
        assert_eq!(node.stats().sent, 5);
    }

    #[test]
    fn stalled_link_does_not_stop_the_timebase() {
        let pulses = PulseCounter::new();
        let mut node = TelemetryNode::new(&pulses);
        let mut wire = Wire {
            stalled: true,
            ..Default::default()
        };
        let mut sensors = Fixed(SensorBits::default());

        let mut closed = 0;
        for _ in 0..1_000 {
            pulses.record_edge();
            if node.on_tick(&mut wire, &mut sensors) == Tick::WindowClosed {
                closed += 1;
                assert_eq!(node.speed(), 100);
            }
        }

        assert_eq!(closed, 10);
        assert!(wire.sent.is_empty());
        let stats = node.stats();
        assert_eq!(stats.sent, 0);
        assert_eq!(stats.skipped, 9);
    }
}
