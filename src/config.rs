// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Compiled-in configuration for the IR node.
//!
//! Nothing here is adjustable at runtime. Timer prescalers and auto-reload values are derived from
//! the clock constants so that changing `SYSCLK_HZ` or a target rate keeps every timer consistent.

/// System clock. `rcc.cfgr.freeze()` with no further configuration runs from the 16 MHz HSI.
pub const SYSCLK_HZ: u32 = 16_000_000;

/// Clock feeding the APB1 timers (TIM6/TIM7). APB1 is undivided at this SYSCLK.
pub const TIMER_CLK_HZ: u32 = SYSCLK_HZ;

// IR carrier
pub const CARRIER_HZ: u32 = 38_000;
/// The carrier pin flips twice per carrier period.
pub const CARRIER_TOGGLE_HZ: u32 = 2 * CARRIER_HZ;
pub const CARRIER_PSC: u16 = 0;
pub const CARRIER_ARR: u16 = auto_reload_for(TIMER_CLK_HZ / (CARRIER_PSC as u32 + 1), CARRIER_TOGGLE_HZ);

// Timebase
pub const TICK_HZ: u32 = 1_000;
/// TIM7 counts at 1 MHz so the 1 ms reload is exact.
pub const TICK_COUNTER_HZ: u32 = 1_000_000;
pub const TICK_PSC: u16 = prescaler_for(TIMER_CLK_HZ, TICK_COUNTER_HZ);
pub const TICK_ARR: u16 = auto_reload_for(TICK_COUNTER_HZ, TICK_HZ);

pub const TICKS_PER_DECADE: u16 = 10;
pub const DECADES_PER_WINDOW: u16 = 10;
/// Ticks in one measurement window.
pub const TICKS_PER_WINDOW: u16 = TICKS_PER_DECADE * DECADES_PER_WINDOW;
pub const WINDOW_MS: u32 = TICKS_PER_WINDOW as u32 * 1_000 / TICK_HZ;

// Serial
/// Telemetry / command link to the host, 8N1.
pub const LINK_BAUD: u32 = 9_600;
/// Debug console.
pub const CONSOLE_BAUD: u32 = 115_200;

/// Prescaler that divides `timer_clk` down to `counter_hz`.
pub const fn prescaler_for(timer_clk: u32, counter_hz: u32) -> u16 {
    (timer_clk / counter_hz - 1) as u16
}

/// Auto-reload value that makes a counter running at `counter_hz` overflow at `rate_hz`.
pub const fn auto_reload_for(counter_hz: u32, rate_hz: u32) -> u16 {
    (counter_hz / rate_hz - 1) as u16
}

/// Update-event rate a basic timer produces for the given prescaler and auto-reload.
pub const fn update_rate(timer_clk: u32, psc: u16, arr: u16) -> u32 {
    timer_clk / ((psc as u32 + 1) * (arr as u32 + 1))
}

const fn within_one_percent(actual: u32, target: u32) -> bool {
    let diff = if actual > target {
        actual - target
    } else {
        target - actual
    };
    diff * 100 <= target
}

const _: () = assert!(
    TIMER_CLK_HZ / (CARRIER_PSC as u32 + 1) / CARRIER_TOGGLE_HZ <= 0x1_0000,
    "carrier reload does not fit TIMx_ARR"
);
const _: () = assert!(
    within_one_percent(update_rate(TIMER_CLK_HZ, CARRIER_PSC, CARRIER_ARR), CARRIER_TOGGLE_HZ),
    "carrier toggle rate off by more than 1%"
);
const _: () = assert!(
    update_rate(TIMER_CLK_HZ, TICK_PSC, TICK_ARR) == TICK_HZ,
    "timebase tick is not exact"
);
const _: () = assert!(WINDOW_MS == 100);
