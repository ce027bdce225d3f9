//! RGB panel peripheral over the LCD_CAM DPI engine
//!
//! The DPI engine scans a frame out of a DMA buffer; the buffer lives in
//! PSRAM because a full 5-6-5 frame at panel resolution does not fit in
//! internal RAM. The caller provides the buffer and DMA descriptors as
//! `'static` slices (leaked PSRAM allocations in practice).
//!
//! `draw_bitmap` blits the rectangle into the scan buffer and sends one
//! frame, blocking until the DMA completes. The panel holds the last
//! scanned frame between pushes.

use esp_hal::dma::{DmaDescriptor, DmaTxBuf, ExternalBurstConfig, TxChannelFor};
use esp_hal::gpio::{AnyPin, Level};
use esp_hal::lcd_cam::lcd::dpi::{Config as DpiConfig, Dpi, Format, FrameTiming};
use esp_hal::lcd_cam::lcd::{ClockMode, Phase, Polarity};
use esp_hal::lcd_cam::LcdCam;
use esp_hal::peripherals::LCD_CAM;
use esp_hal::time::Rate;
use esp_hal::Blocking;
use vitrine_hal::panel::{PanelError, PanelPeripheral, PanelTimingConfig};

/// Physical pin assignment for the 16-bit RGB interface
///
/// Data lines are grouped per color channel, least-significant bit first.
/// On the wire B0 is LCD_DATA0 and R4 is LCD_DATA15, matching the 5-6-5
/// bit layout of the pixel words.
pub struct DpiPins<'d> {
    pub vsync: AnyPin<'d>,
    pub hsync: AnyPin<'d>,
    pub de: AnyPin<'d>,
    pub pclk: AnyPin<'d>,
    pub red: [AnyPin<'d>; 5],
    pub green: [AnyPin<'d>; 6],
    pub blue: [AnyPin<'d>; 5],
}

enum State<'d, CH> {
    /// Constructed, peripheral parts waiting for `configure`
    Idle {
        lcd_cam: LCD_CAM<'d>,
        channel: CH,
        pins: DpiPins<'d>,
        descriptors: &'static mut [DmaDescriptor],
        frame: &'static mut [u8],
    },
    /// Configured, scanning
    Ready { dpi: Dpi<'d, Blocking>, buf: DmaTxBuf },
    /// Transient state while a transfer owns the peripheral
    InFlight,
}

/// [`PanelPeripheral`] implementation for the ESP32-S3 LCD_CAM
pub struct DpiPanel<'d, CH> {
    state: State<'d, CH>,
    h_res: u16,
    v_res: u16,
}

impl<'d, CH> DpiPanel<'d, CH>
where
    CH: TxChannelFor<LCD_CAM<'d>>,
{
    /// Bind the LCD_CAM, a DMA channel, the pin map and the scan-out
    /// memory
    ///
    /// `frame` must hold exactly `h_res * v_res * 2` bytes for the timing
    /// configuration later passed to `configure`, and `descriptors` must
    /// cover it. For a PSRAM-backed frame both the slice and the DMA
    /// descriptor chunking must be 64-byte aligned.
    pub fn new(
        lcd_cam: LCD_CAM<'d>,
        channel: CH,
        pins: DpiPins<'d>,
        descriptors: &'static mut [DmaDescriptor],
        frame: &'static mut [u8],
    ) -> Self {
        Self {
            state: State::Idle {
                lcd_cam,
                channel,
                pins,
                descriptors,
                frame,
            },
            h_res: 0,
            v_res: 0,
        }
    }

    fn send_frame(&mut self) -> Result<(), PanelError> {
        match core::mem::replace(&mut self.state, State::InFlight) {
            State::Ready { dpi, buf } => match dpi.send(false, buf) {
                Ok(transfer) => {
                    let (result, dpi, buf) = transfer.wait();
                    self.state = State::Ready { dpi, buf };
                    result.map_err(|_| PanelError::Transfer)
                }
                Err((_, dpi, buf)) => {
                    self.state = State::Ready { dpi, buf };
                    Err(PanelError::Transfer)
                }
            },
            other => {
                self.state = other;
                Err(PanelError::Transfer)
            }
        }
    }
}

fn level(idle_high: bool) -> Level {
    if idle_high {
        Level::High
    } else {
        Level::Low
    }
}

fn dpi_config(timing: &PanelTimingConfig) -> DpiConfig {
    let h_total = timing.h_res
        + timing.hsync_pulse_width
        + timing.hsync_back_porch
        + timing.hsync_front_porch;
    let v_total = timing.v_res
        + timing.vsync_pulse_width
        + timing.vsync_back_porch
        + timing.vsync_front_porch;

    DpiConfig::default()
        .with_frequency(Rate::from_hz(timing.pclk_hz))
        .with_clock_mode(ClockMode {
            polarity: Polarity::IdleLow,
            phase: if timing.polarity.pclk_active_falling {
                Phase::ShiftHigh
            } else {
                Phase::ShiftLow
            },
        })
        .with_format(Format {
            enable_2byte_mode: true,
            ..Default::default()
        })
        .with_timing(FrameTiming {
            horizontal_active_width: timing.h_res as usize,
            horizontal_total_width: h_total as usize,
            horizontal_blank_front_porch: timing.hsync_front_porch as usize,
            vertical_active_height: timing.v_res as usize,
            vertical_total_height: v_total as usize,
            vertical_blank_front_porch: timing.vsync_front_porch as usize,
            hsync_width: timing.hsync_pulse_width as usize,
            vsync_width: timing.vsync_pulse_width as usize,
            hsync_position: 0,
        })
        .with_vsync_idle_level(level(timing.polarity.sync_idle_high))
        .with_hsync_idle_level(level(timing.polarity.sync_idle_high))
        .with_de_idle_level(level(timing.polarity.de_idle_high))
}

fn route_pins<'d>(dpi: Dpi<'d, Blocking>, pins: DpiPins<'d>) -> Dpi<'d, Blocking> {
    let [b0, b1, b2, b3, b4] = pins.blue;
    let [g0, g1, g2, g3, g4, g5] = pins.green;
    let [r0, r1, r2, r3, r4] = pins.red;
    dpi.with_vsync(pins.vsync)
        .with_hsync(pins.hsync)
        .with_de(pins.de)
        .with_pclk(pins.pclk)
        .with_data0(b0)
        .with_data1(b1)
        .with_data2(b2)
        .with_data3(b3)
        .with_data4(b4)
        .with_data5(g0)
        .with_data6(g1)
        .with_data7(g2)
        .with_data8(g3)
        .with_data9(g4)
        .with_data10(g5)
        .with_data11(r0)
        .with_data12(r1)
        .with_data13(r2)
        .with_data14(r3)
        .with_data15(r4)
}

impl<'d, CH> PanelPeripheral for DpiPanel<'d, CH>
where
    CH: TxChannelFor<LCD_CAM<'d>>,
{
    fn configure(&mut self, timing: &PanelTimingConfig) -> Result<(), PanelError> {
        match core::mem::replace(&mut self.state, State::InFlight) {
            State::Idle {
                lcd_cam,
                channel,
                pins,
                descriptors,
                frame,
            } => {
                let frame_bytes = timing.h_res as usize * timing.v_res as usize * 2;
                if frame.len() != frame_bytes {
                    self.state = State::Idle {
                        lcd_cam,
                        channel,
                        pins,
                        descriptors,
                        frame,
                    };
                    return Err(PanelError::InvalidTiming);
                }

                let lcd_cam = LcdCam::new(lcd_cam);
                let dpi = Dpi::new(lcd_cam.lcd, channel, dpi_config(timing))
                    .map_err(|_| PanelError::Init)?;
                let dpi = route_pins(dpi, pins);
                let buf =
                    DmaTxBuf::new_with_config(descriptors, frame, ExternalBurstConfig::Size64)
                        .map_err(|_| PanelError::Init)?;

                self.h_res = timing.h_res;
                self.v_res = timing.v_res;
                self.state = State::Ready { dpi, buf };
                Ok(())
            }
            // One-shot configuration, matching the trait contract
            other => {
                self.state = other;
                Err(PanelError::Init)
            }
        }
    }

    fn reset(&mut self) -> Result<(), PanelError> {
        // The RGB interface has no controller to pulse; clearing the scan
        // buffer is the closest equivalent of a panel reset.
        let State::Ready { buf, .. } = &mut self.state else {
            return Err(PanelError::Reset);
        };
        buf.as_mut_slice().fill(0);
        Ok(())
    }

    fn init(&mut self) -> Result<(), PanelError> {
        // No init commands either; scanning the first (black) frame out
        // proves the clock tree, the DMA path and the pin routing.
        self.send_frame().map_err(|_| PanelError::Init)
    }

    fn draw_bitmap(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        pixels: &[u8],
    ) -> Result<(), PanelError> {
        let stride = self.h_res as usize;
        let lines = self.v_res as usize;
        let State::Ready { buf, .. } = &mut self.state else {
            return Err(PanelError::Transfer);
        };

        let row_bytes = (x2 - x1 + 1) as usize * 2;
        let rows = (y2 - y1 + 1) as usize;
        if pixels.len() != row_bytes * rows || x2 as usize >= stride || y2 as usize >= lines {
            return Err(PanelError::Transfer);
        }

        let frame = buf.as_mut_slice();
        for (i, row) in (y1 as usize..=y2 as usize).enumerate() {
            let dst = (row * stride + x1 as usize) * 2;
            frame[dst..dst + row_bytes].copy_from_slice(&pixels[i * row_bytes..][..row_bytes]);
        }

        self.send_frame()
    }
}
