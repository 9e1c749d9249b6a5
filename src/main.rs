//! rust-ble-remote firmware entry point.
//!
//! Wires the gesture engine to the remote's three buttons:
//!   - play/pause (GPIO15)
//!   - volume up  (GPIO18)
//!   - volume down (GPIO19)
//! plus a status LED on GPIO13.
//!
//! Each button pin gets an any-edge interrupt whose handler is exactly
//! [`capture_edge`]: debounce gate check, direction from the live level,
//! lock-free enqueue. The main loop runs the dispatch tick every ~10 ms,
//! re-arms the pin interrupts, and drains the ISR log ring into the
//! system logger.
//!
//! Gesture callbacks log their action; in the full device they emit BLE
//! HID reports (media keys), which is outside the engine's scope.

// The firmware only builds for the device; on the host only the library
// (and its tests) compile.
#[cfg(target_os = "espidf")]
use std::thread;
#[cfg(target_os = "espidf")]
use std::time::Duration;

#[cfg(target_os = "espidf")]
use esp_idf_hal::gpio::{InterruptType, PinDriver, Pull};
#[cfg(target_os = "espidf")]
use esp_idf_hal::prelude::Peripherals;

#[cfg(target_os = "espidf")]
use rust_ble_remote::logging::LogLevel;
#[cfg(target_os = "espidf")]
use rust_ble_remote::{
    capture_edge, isr_debug, DebounceGate, EdgeQueue, GestureConfig, GestureEngine, LevelSource,
    LogStream, Pin,
};

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("rust-ble-remote firmware runs only on ESP-IDF targets");
}

#[cfg(target_os = "espidf")]
const PIN_PLAY_PAUSE: Pin = 15;
#[cfg(target_os = "espidf")]
const PIN_VOL_UP: Pin = 18;
#[cfg(target_os = "espidf")]
const PIN_VOL_DOWN: Pin = 19;

/// How often the dispatch tick runs.
#[cfg(target_os = "espidf")]
const TICK_INTERVAL_MS: u64 = 10;

/// How often drop/suppression counters are reported.
#[cfg(target_os = "espidf")]
const STATS_INTERVAL_MS: u32 = 10_000;

// Shared between interrupt and cooperative context. Atomics only.
#[cfg(target_os = "espidf")]
static EDGE_QUEUE: EdgeQueue = EdgeQueue::new();
#[cfg(target_os = "espidf")]
static DEBOUNCE: DebounceGate = DebounceGate::new();
#[cfg(target_os = "espidf")]
static ISR_LOG: LogStream = LogStream::new();

/// Milliseconds since boot (wraps at ~49 days; all elapsed math in the
/// engine is wraparound-safe).
#[cfg(target_os = "espidf")]
fn now_ms() -> u32 {
    unsafe { (esp_idf_svc::sys::esp_timer_get_time() / 1000) as u32 }
}

/// Live pin levels via the raw GPIO register read.
#[cfg(target_os = "espidf")]
struct GpioLevels;

#[cfg(target_os = "espidf")]
impl LevelSource for GpioLevels {
    fn is_low(&self, pin: Pin) -> bool {
        unsafe { esp_idf_svc::sys::gpio_get_level(pin as i32) == 0 }
    }
}

/// Interrupt handler body, shared by all button pins.
///
/// Reads the level synchronously (further transitions may already have
/// happened; direction reflects where the pin ended up) and captures the
/// edge. Atomics only, no allocation, no blocking.
#[cfg(target_os = "espidf")]
fn button_isr(pin: Pin) {
    let now = now_ms();
    let low = unsafe { esp_idf_svc::sys::gpio_get_level(pin as i32) == 0 };
    if capture_edge(&EDGE_QUEUE, &DEBOUNCE, pin, low, now) {
        isr_debug!(ISR_LOG, now, "edge pin={} low={}", pin, low);
    }
}

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("{} starting", env!("VERSION_STRING"));

    let peripherals = Peripherals::take()?;

    // ---- Buttons: pull-up, active low, any-edge interrupt ------------------
    let mut play_pause = PinDriver::input(peripherals.pins.gpio15)?;
    play_pause.set_pull(Pull::Up)?;
    play_pause.set_interrupt_type(InterruptType::AnyEdge)?;
    // SAFETY: the handler runs in ISR context and touches only lock-free
    // statics (capture_edge + log ring).
    unsafe {
        play_pause.subscribe(|| button_isr(PIN_PLAY_PAUSE))?;
    }

    let mut vol_up = PinDriver::input(peripherals.pins.gpio18)?;
    vol_up.set_pull(Pull::Up)?;
    vol_up.set_interrupt_type(InterruptType::AnyEdge)?;
    unsafe {
        vol_up.subscribe(|| button_isr(PIN_VOL_UP))?;
    }

    let mut vol_down = PinDriver::input(peripherals.pins.gpio19)?;
    vol_down.set_pull(Pull::Up)?;
    vol_down.set_interrupt_type(InterruptType::AnyEdge)?;
    unsafe {
        vol_down.subscribe(|| button_isr(PIN_VOL_DOWN))?;
    }

    // ---- Status LED --------------------------------------------------------
    let mut led = PinDriver::output(peripherals.pins.gpio13)?;

    // ---- Gesture registration (before the first tick) ----------------------
    let mut engine = GestureEngine::new(&EDGE_QUEUE, &DEBOUNCE, GestureConfig::default());

    engine
        .on_click(
            PIN_PLAY_PAUSE,
            Box::new(move || {
                let _ = led.toggle();
                log::info!("gesture: play/pause");
            }),
        )
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    engine
        .on_press_hold(
            PIN_PLAY_PAUSE,
            Box::new(|| log::info!("gesture: play/pause hold (power menu)")),
        )
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    engine
        .on_click(PIN_VOL_UP, Box::new(|| log::info!("gesture: volume up")))
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    engine
        .on_multi_click(
            PIN_VOL_UP,
            Box::new(|n| log::info!("gesture: volume up x{}", n)),
        )
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    engine
        .on_click(PIN_VOL_DOWN, Box::new(|| log::info!("gesture: volume down")))
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    engine
        .on_multi_click(
            PIN_VOL_DOWN,
            Box::new(|n| log::info!("gesture: volume down x{}", n)),
        )
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    log::info!("gesture engine ready, entering dispatch loop");

    // ---- Dispatch loop -----------------------------------------------------
    let levels = GpioLevels;
    let mut last_stats_ms = now_ms();

    loop {
        let now = now_ms();

        engine.dispatch_tick(now, &levels);

        // esp-idf disarms a pin interrupt after it fires; re-arm each tick.
        play_pause.enable_interrupt()?;
        vol_up.enable_interrupt()?;
        vol_down.enable_interrupt()?;

        while let Some(entry) = ISR_LOG.drain() {
            let level = match entry.level {
                LogLevel::Error => log::Level::Error,
                LogLevel::Warn => log::Level::Warn,
                LogLevel::Info => log::Level::Info,
                LogLevel::Debug => log::Level::Debug,
            };
            log::log!(level, "[isr t={}] {}", entry.timestamp_ms, entry.text());
        }

        if now.wrapping_sub(last_stats_ms) > STATS_INTERVAL_MS {
            last_stats_ms = now;
            let dropped = engine.dropped_edges();
            let suppressed = engine.suppressed_edges();
            let log_dropped = ISR_LOG.dropped();
            if dropped > 0 || suppressed > 0 || log_dropped > 0 {
                log::debug!(
                    "edge stats: dropped={} debounce-suppressed={} log-dropped={}",
                    dropped,
                    suppressed,
                    log_dropped
                );
            }
        }

        thread::sleep(Duration::from_millis(TICK_INTERVAL_MS));
    }
}
