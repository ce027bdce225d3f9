//! Vitrine - RGB smart display module firmware
//!
//! Firmware binary for the ESP32-S3 based 7" RGB touch panel module
//! (800x480 panel on the LCD_CAM DPI engine, GT911 touch on I2C).
//!
//! Named after the French "vitrine" (a glass display case) - the module
//! is a panel behind glass, and this firmware is what puts pixels on it.

#![no_std]
#![no_main]

extern crate alloc;

use core::alloc::Layout;

use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_time::Timer;
use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use esp_hal::gpio::{Input, InputConfig, Level, Output, OutputConfig, Pin, Pull};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;
use static_cell::StaticCell;

use vitrine_core::component::Lifecycle;
use vitrine_drivers::backlight::Backlight;
use vitrine_drivers::display::PanelDisplay;
use vitrine_drivers::panel::RgbPanel;
use vitrine_drivers::touch::Gt911;
use vitrine_hal::panel::{PanelPolarity, PanelTimingConfig};
use vitrine_hal_esp32s3::{DpiPanel, DpiPins};

use crate::channels::DisplayMutex;

mod channels;
mod render;
mod tasks;

const FRAME_WIDTH: u16 = 800;
const FRAME_HEIGHT: u16 = 480;
const FRAME_BYTES: usize = FRAME_WIDTH as usize * FRAME_HEIGHT as usize * 2;

// DMA descriptor chunk size; must stay a multiple of the 64-byte PSRAM
// burst
const DMA_CHUNK: usize = 4032;

static DISPLAY: StaticCell<DisplayMutex> = StaticCell::new();

/// Panel timing for the 7" 800x480 module
fn panel_timing() -> PanelTimingConfig {
    PanelTimingConfig {
        pclk_hz: 16_000_000,
        h_res: FRAME_WIDTH,
        v_res: FRAME_HEIGHT,
        hsync_pulse_width: 10,
        hsync_back_porch: 10,
        hsync_front_porch: 20,
        vsync_pulse_width: 10,
        vsync_back_porch: 10,
        vsync_front_porch: 10,
        polarity: PanelPolarity {
            pclk_active_falling: true,
            ..Default::default()
        },
        red_pins: [45, 48, 47, 21, 14],
        green_pins: [5, 6, 7, 15, 16, 4],
        blue_pins: [8, 3, 46, 9, 1],
        de_pin: 40,
        pclk_pin: 42,
        hsync_pin: 39,
        vsync_pin: 41,
        enable_pin: None,
    }
}

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    let peripherals = esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::max()));

    // Internal heap for small allocations, PSRAM for the framebuffers
    esp_alloc::heap_allocator!(size: 64 * 1024);
    esp_alloc::psram_allocator!(peripherals.PSRAM, esp_hal::psram);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_hal_embassy::init(timg0.timer0);

    info!("Vitrine firmware starting");

    // RGB interface pin map; must agree with the timing config above
    let pins = DpiPins {
        vsync: peripherals.GPIO41.degrade(),
        hsync: peripherals.GPIO39.degrade(),
        de: peripherals.GPIO40.degrade(),
        pclk: peripherals.GPIO42.degrade(),
        red: [
            peripherals.GPIO45.degrade(),
            peripherals.GPIO48.degrade(),
            peripherals.GPIO47.degrade(),
            peripherals.GPIO21.degrade(),
            peripherals.GPIO14.degrade(),
        ],
        green: [
            peripherals.GPIO5.degrade(),
            peripherals.GPIO6.degrade(),
            peripherals.GPIO7.degrade(),
            peripherals.GPIO15.degrade(),
            peripherals.GPIO16.degrade(),
            peripherals.GPIO4.degrade(),
        ],
        blue: [
            peripherals.GPIO8.degrade(),
            peripherals.GPIO3.degrade(),
            peripherals.GPIO46.degrade(),
            peripherals.GPIO9.degrade(),
            peripherals.GPIO1.degrade(),
        ],
    };

    let (_, tx_descriptors) = esp_hal::dma_descriptors_chunk_size!(0, FRAME_BYTES, DMA_CHUNK);
    let scan_frame = alloc_scan_buffer();

    let panel = RgbPanel::new(
        DpiPanel::new(
            peripherals.LCD_CAM,
            peripherals.DMA_CH2,
            pins,
            tx_descriptors,
            scan_frame,
        ),
        panel_timing(),
    );

    // GT911 touch controller on I2C0
    let bus_config = vitrine_hal::i2c::I2cConfig::default();
    let i2c = I2c::new(
        peripherals.I2C0,
        I2cConfig::default().with_frequency(Rate::from_hz(bus_config.frequency)),
    )
    .unwrap()
    .with_sda(peripherals.GPIO19)
    .with_scl(peripherals.GPIO20);
    let touch_reset = Output::new(peripherals.GPIO38, Level::Low, OutputConfig::default());
    // INT is input-only: the GT911 samples it at reset release to pick
    // its bus address, so it must float at the module's pull-up
    let touch_int = Input::new(
        peripherals.GPIO18,
        InputConfig::default().with_pull(Pull::Up),
    );
    let touch = Gt911::new(i2c, touch_reset, Some(touch_int), Delay::new());

    let backlight = Backlight::new(Some(Output::new(
        peripherals.GPIO2,
        Level::Low,
        OutputConfig::default(),
    )));

    let draw = render::draw_frame as fn(&mut vitrine_core::framebuffer::FrameBuffer);
    let mut display = PanelDisplay::periodic(panel, Some(touch), backlight, draw);
    display.setup();
    if display.state().is_failed() {
        error!("display setup failed, component is inert");
    }
    display.dump_config();

    let display = DISPLAY.init(embassy_sync::mutex::Mutex::new(display));

    spawner.spawn(tasks::repaint_task(display)).unwrap();
    spawner.spawn(tasks::update_task(display)).unwrap();
    spawner.spawn(tasks::input_task(display)).unwrap();

    info!("all tasks spawned, firmware running");

    loop {
        Timer::after_secs(60).await;
    }
}

/// Reserve the DMA scan-out buffer from PSRAM
///
/// 64-byte aligned for the external-memory DMA burst, zeroed so the first
/// scanned frame is black, and never freed.
fn alloc_scan_buffer() -> &'static mut [u8] {
    let layout = match Layout::from_size_align(FRAME_BYTES, 64) {
        Ok(layout) => layout,
        Err(_) => defmt::panic!("invalid scan buffer layout"),
    };
    let ptr = unsafe { alloc::alloc::alloc_zeroed(layout) };
    if ptr.is_null() {
        defmt::panic!("PSRAM scan buffer allocation failed");
    }
    unsafe { core::slice::from_raw_parts_mut(ptr, FRAME_BYTES) }
}
