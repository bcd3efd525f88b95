//! patchpage-hw-interface
//!
//! MIDI program-change controller firmware for the Raspberry Pi Pico 2.
//! Wires the library crates into a running loop:
//!
//! 1. A button pin changes level.
//! 2. Its edge task publishes the new level and posts a `RawEdge` on the
//!    edge channel.
//! 3. The controller loop in `main` feeds the edge to the engine, which
//!    restarts that button's debounce window.
//! 4. When the window (or the page hold-off, blink or readout timer) runs
//!    out, the engine fires it: confirmed presses reach the controller,
//!    program changes go out on UART0 and the selection is saved to flash.
//! 5. On every 60 Hz tick the engine renders a frame to the TM1637 display
//!    and the LEDs.

#![no_std]
#![no_main]

mod board;

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::select::{select3, Either3};
use embassy_rp::block::ImageDef;
use embassy_rp::flash::Flash;
use embassy_rp::gpio::{Input, Level, Output, OutputOpenDrain, Pull};
use embassy_rp::pwm::{self, Pwm};
use embassy_rp::uart::{self, UartTx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Delay, Duration, Instant, Ticker, Timer};
use {defmt_rtt as _, panic_probe as _};

use patchpage::hardware::HardwareHandle;
use patchpage::input::{Button, Edge};
use patchpage::midi::{MidiTransport, MIDI_BAUD_RATE};
use patchpage::{ControllerConfig, Engine};
use patchpage_panel_rs::{PanelConfig, PanelDriver, PatchLeds};
use tm1637_driver::Tm1637;

use board::{FlashStore, SharedLevels, UartMidi};

// ---------------------------------------------------------------------------
// Boot block
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// A raw level change seen by an edge task.
struct RawEdge {
    button: Button,
    edge: Edge,
    at_ms: u64,
}

/// Raw edges from the button tasks to the controller loop. Sized for a
/// bounce burst on every button at once.
static EDGES: Channel<CriticalSectionRawMutex, RawEdge, 32> = Channel::new();

/// One edge task per physical button.
const BUTTON_TASKS: usize = 6;

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Edge monitor for one button pin.
///
/// Publishes the pin level for the debounce sampler, then hands the edge
/// to the controller loop. No debouncing happens here.
#[embassy_executor::task(pool_size = BUTTON_TASKS)]
async fn button_task(mut pin: Input<'static>, button: Button) {
    debug!("Edge task started for {}", button);

    loop {
        pin.wait_for_any_edge().await;

        let high = pin.is_high();
        SharedLevels::publish(button, high);

        EDGES
            .send(RawEdge {
                button,
                edge: Edge::from_level(high),
                at_ms: Instant::now().as_millis(),
            })
            .await;
    }
}

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("patchpage-hw-interface starting");

    // —— Pin assignments ————————————————————————————————————————————————————
    // MIDI_TX    → GP0   (UART0 TX, 31250 baud)
    // LED_PATCH  → GP2, GP3, GP4  (PWM1 A/B, PWM2 A)
    // BTN_PATCH  → GP14, GP15, GP16  active-low, pull-up
    // BTN_DOWN   → GP17  active-low, pull-up
    // BTN_UP     → GP19  active-low, pull-up
    // BTN_CFG    → GP20  active-low, pull-up
    // LED_STATUS → GP25  (onboard LED)
    // TM_CLK     → GP26  open-drain
    // TM_DIO     → GP27  open-drain
    // ———————————————————————————————————————————————————————————————————————

    let config = ControllerConfig::default();

    // —— Buttons ————————————————————————————————————————————————————————————

    let buttons = [
        (Input::new(p.PIN_14, Pull::Up), Button::Patch(0)),
        (Input::new(p.PIN_15, Pull::Up), Button::Patch(1)),
        (Input::new(p.PIN_16, Pull::Up), Button::Patch(2)),
        (Input::new(p.PIN_17, Pull::Up), Button::PageDown),
        (Input::new(p.PIN_19, Pull::Up), Button::PageUp),
        (Input::new(p.PIN_20, Pull::Up), Button::Config),
    ];

    // Seed levels before the engine samples them, so a button held
    // through reset is not seen as a press.
    for (pin, button) in buttons.iter() {
        SharedLevels::publish(*button, pin.is_high());
    }

    // —— MIDI out ———————————————————————————————————————————————————————————

    let mut uart_config = uart::Config::default();
    uart_config.baudrate = MIDI_BAUD_RATE;
    let midi_tx = UartTx::new_blocking(p.UART0, p.PIN_0, uart_config);
    let midi = MidiTransport::new(UartMidi::new(midi_tx));

    // —— Display ————————————————————————————————————————————————————————————

    let clk = OutputOpenDrain::new(p.PIN_26, Level::High);
    let dio = OutputOpenDrain::new(p.PIN_27, Level::High);
    let mut digits = Tm1637::new(clk, dio, Delay);
    if let Err(e) = digits.init() {
        error!("TM1637 init failed: {}", e);
    }

    // —— LEDs ———————————————————————————————————————————————————————————————

    let pwm_ab = Pwm::new_output_ab(p.PWM_SLICE1, p.PIN_2, p.PIN_3, pwm::Config::default());
    let pwm_a = Pwm::new_output_a(p.PWM_SLICE2, p.PIN_4, pwm::Config::default());
    let (led_0, led_1) = pwm_ab.split();
    let (led_2, _) = pwm_a.split();
    let leds = PatchLeds::new([unwrap!(led_0), unwrap!(led_1), unwrap!(led_2)]);

    let status = Output::new(p.PIN_25, Level::Low);

    let panel = PanelDriver::new(
        digits,
        leds,
        status,
        PanelConfig {
            led_count: config.patch_count,
            status_active_high: true,
        },
    );

    // —— Storage ————————————————————————————————————————————————————————————

    let store = FlashStore::new(Flash::new_blocking(p.FLASH));

    // —— Engine —————————————————————————————————————————————————————————————

    let hw = HardwareHandle::new(SharedLevels, panel, midi, store);
    let mut engine = match Engine::new(config, hw) {
        Ok(engine) => engine,
        Err(e) => defmt::panic!("Invalid controller config: {}", e),
    };

    // —— Spawn tasks ————————————————————————————————————————————————————————

    for (pin, button) in buttons {
        spawner.spawn(unwrap!(button_task(pin, button)));
    }

    info!("All tasks spawned");

    // —— Controller loop ————————————————————————————————————————————————————
    //
    // Sleeps until the next raw edge, tick or timer deadline.

    let mut ticker = Ticker::every(Duration::from_millis(config.tick_period_ms()));

    loop {
        let deadline = engine.next_deadline();
        let wake = async move {
            match deadline {
                Some(ms) => Timer::at(Instant::from_millis(ms)).await,
                None => core::future::pending::<()>().await,
            }
        };

        match select3(EDGES.receive(), ticker.next(), wake).await {
            Either3::First(raw) => engine.on_raw_edge(raw.button, raw.edge, raw.at_ms),
            Either3::Second(()) => engine.tick(now_ms()),
            Either3::Third(()) => engine.poll(now_ms()),
        }
    }
}
