// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Digital IR obstacle sensors.
//!
//! Nine sensors, labelled IR1..IR9 on the board, each read as a plain logic level. The telemetry
//! packet carries them in two bytes:
//!
//! | Byte | Bit 7 | Bit 6 | Bit 5 | Bit 4 | Bit 3 | Bit 2 | Bit 1 | Bit 0 |
//! | ---- | ----- | ----- | ----- | ----- | ----- | ----- | ----- | ----- |
//! | 4    | 0     | 0     | 0     | 0     | 0     | 0     | 0     | IR8   |
//! | 5    | IR9   | IR1   | IR2   | IR3   | IR4   | IR5   | IR6   | IR7   |

use embedded_hal::digital::InputPin;

pub const SENSOR_COUNT: usize = 9;

/// Index of IR8, the only sensor carried in byte 4.
const BYTE4_SENSOR: usize = 7;

/// `(sensor index, bit position)` for every sensor carried in byte 5.
const BYTE5_LAYOUT: [(usize, u8); 8] = [
    (8, 7), // IR9
    (0, 6), // IR1
    (1, 5), // IR2
    (2, 4), // IR3
    (3, 3), // IR4
    (4, 2), // IR5
    (5, 1), // IR6
    (6, 0), // IR7
];

/// Snapshot of all sensor levels. Index 0 is IR1, index 8 is IR9.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SensorBits {
    states: [bool; SENSOR_COUNT],
}

impl SensorBits {
    #[inline]
    pub const fn new(states: [bool; SENSOR_COUNT]) -> Self {
        Self { states }
    }

    #[inline]
    pub fn states(&self) -> &[bool; SENSOR_COUNT] {
        &self.states
    }

    /// Level of sensor `IRn`, `n` in `1..=9`. Out-of-range numbers read as `false`.
    #[inline]
    pub fn sensor(&self, n: usize) -> bool {
        n.checked_sub(1)
            .and_then(|i| self.states.get(i))
            .copied()
            .unwrap_or(false)
    }

    /// Pack into telemetry bytes 4 and 5.
    pub fn pack(&self) -> [u8; 2] {
        let byte4 = self.states[BYTE4_SENSOR] as u8;
        let byte5 = BYTE5_LAYOUT
            .iter()
            .fold(0u8, |acc, &(idx, bit)| acc | ((self.states[idx] as u8) << bit));
        [byte4, byte5]
    }

    /// Inverse of [`pack`](Self::pack). Reserved bits of byte 4 are ignored.
    pub fn unpack(bytes: [u8; 2]) -> Self {
        let mut states = [false; SENSOR_COUNT];
        states[BYTE4_SENSOR] = bytes[0] & 0x01 != 0;
        for &(idx, bit) in BYTE5_LAYOUT.iter() {
            states[idx] = bytes[1] & (1 << bit) != 0;
        }
        Self { states }
    }
}

/// Anything that can sample the nine sensors at once.
pub trait SensorBank {
    fn sample(&mut self) -> SensorBits;
}

/// Nine discrete input pins, IR1 first. A pin that fails to read reports `false`.
impl<P: InputPin> SensorBank for [P; SENSOR_COUNT] {
    fn sample(&mut self) -> SensorBits {
        let mut states = [false; SENSOR_COUNT];
        for (state, pin) in states.iter_mut().zip(self.iter_mut()) {
            *state = pin.is_high().unwrap_or(false);
        }
        SensorBits::new(states)
    }
}
