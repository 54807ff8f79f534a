// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use core::cell::RefCell;

use cortex_m::peripheral::NVIC;
use cortex_m_rt::entry;
use critical_section::Mutex;
use panic_halt as _;

use hal::{
    pac::{self, interrupt, Interrupt},
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use irnode::{
    config,
    drivers::Carrier,
    hw::{self, BasicTimer, BoardPins, Dac, OutputLine, PulseLine, SensorPins, SerialTx},
    logging,
    protocol::Parser,
    sched::{PulseCounter, TelemetryNode},
};

// Interrupt priorities, lower is more urgent. The carrier must never wait on anything.
const PRIO_CARRIER: u8 = 0x00;
const PRIO_EDGE: u8 = 0x40;
const PRIO_TICK: u8 = 0x80;

struct CarrierContext {
    timer: BasicTimer<pac::TIM6>,
    carrier: Carrier<OutputLine<'C', 6>>,
}

struct TickContext {
    timer: BasicTimer<pac::TIM7>,
    node: TelemetryNode<'static>,
    link: SerialTx<pac::USART2>,
    sensors: SensorPins,
}

static PULSES: PulseCounter = PulseCounter::new();

// Handed from `main` to each interrupt handler once, at startup.
static CARRIER: Mutex<RefCell<Option<CarrierContext>>> = Mutex::new(RefCell::new(None));
static TICK: Mutex<RefCell<Option<TickContext>>> = Mutex::new(RefCell::new(None));
static EDGE: Mutex<RefCell<Option<PulseLine>>> = Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let mut cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    // GPIO
    let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD, dp.GPIOE);

    // USART1 (DBG)
    let console_cfg = Config {
        baud_rate: config::CONSOLE_BAUD.bps(),
        ..Default::default()
    };
    let mut console = hw::usart::console(Serial::new(
        dp.USART1,
        (pins.usart1.tx, pins.usart1.rx),
        &clocks,
        console_cfg,
    ));
    logging::init(log::LevelFilter::Info);

    log::info!(
        "irnode up: carrier {} Hz, window {} ms, link {} baud",
        config::update_rate(config::TIMER_CLK_HZ, config::CARRIER_PSC, config::CARRIER_ARR) / 2,
        config::WINDOW_MS,
        config::LINK_BAUD
    );

    // USART2 (host link, 8N1)
    let link_cfg = Config {
        baud_rate: config::LINK_BAUD.bps(),
        ..Default::default()
    };
    let link = Serial::new(dp.USART2, (pins.usart2.tx, pins.usart2.rx), &clocks, link_cfg);
    let (link_tx, mut link_rx) = hw::usart::split(link);

    // DAC (PA4 already in analog mode)
    let _dac_out = pins.dac_out;
    let mut dac = Dac::dac1(dp.DAC);

    // Rotation pulse input
    let _pulse = pins.pulse;
    let pulse_line = PulseLine::pa0_falling(dp.EXTI, &dp.SYSCFG);

    // Timers
    let mut carrier_timer = BasicTimer::tim6(dp.TIM6, config::CARRIER_PSC, config::CARRIER_ARR);
    let mut tick_timer = BasicTimer::tim7(dp.TIM7, config::TICK_PSC, config::TICK_ARR);
    carrier_timer.start();
    tick_timer.start();

    critical_section::with(|cs| {
        CARRIER.borrow(cs).replace(Some(CarrierContext {
            timer: carrier_timer,
            carrier: Carrier::new(OutputLine::new(pins.carrier)),
        }));
        TICK.borrow(cs).replace(Some(TickContext {
            timer: tick_timer,
            node: TelemetryNode::new(&PULSES),
            link: link_tx,
            sensors: pins.sensors,
        }));
        EDGE.borrow(cs).replace(Some(pulse_line));
    });

    // Everything is in place; let the interrupts run.
    unsafe {
        cp.NVIC.set_priority(Interrupt::TIM6_DAC, PRIO_CARRIER);
        cp.NVIC.set_priority(Interrupt::EXTI0, PRIO_EDGE);
        cp.NVIC.set_priority(Interrupt::TIM7, PRIO_TICK);
        NVIC::unmask(Interrupt::TIM6_DAC);
        NVIC::unmask(Interrupt::EXTI0);
        NVIC::unmask(Interrupt::TIM7);
    }

    // Main loop: feed the console, then take at most one command byte. Neither step waits.
    let mut parser = Parser::new();
    loop {
        logging::drain(&mut console);

        match parser.poll(&mut link_rx, &mut dac) {
            Ok(Some(cmd)) => log::debug!("setpoint {:#06x}", cmd.setpoint),
            Ok(None) | Err(nb::Error::WouldBlock) => {}
            Err(nb::Error::Other(e)) => log::warn!("link receive: {}", e),
        }
    }
}

#[interrupt]
fn TIM6_DAC() {
    static mut CTX: Option<CarrierContext> = None;

    if CTX.is_none() {
        *CTX = critical_section::with(|cs| CARRIER.borrow(cs).take());
    }
    if let Some(ctx) = CTX {
        ctx.timer.clear_update();
        ctx.carrier.toggle();
    }
}

#[interrupt]
fn EXTI0() {
    static mut LINE: Option<PulseLine> = None;

    if LINE.is_none() {
        *LINE = critical_section::with(|cs| EDGE.borrow(cs).take());
    }
    if let Some(line) = LINE {
        line.clear_pending();
        PULSES.record_edge();
    }
}

#[interrupt]
fn TIM7() {
    static mut CTX: Option<TickContext> = None;

    if CTX.is_none() {
        *CTX = critical_section::with(|cs| TICK.borrow(cs).take());
    }
    if let Some(ctx) = CTX {
        ctx.timer.clear_update();
        ctx.node.on_tick(&mut ctx.link, &mut ctx.sensors);
    }
}
