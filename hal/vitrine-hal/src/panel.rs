//! RGB timing-panel peripheral abstraction
//!
//! The display is a "dumb" RGB-parallel panel: once the peripheral is
//! configured with a pixel clock, sync timings and a pin map, the hardware
//! scans the active frame out continuously on its own. The only runtime
//! operation is pushing pixel data for a rectangle into the scan buffer.
//!
//! Chip HALs implement [`PanelPeripheral`] over their LCD peripheral
//! (LCD_CAM DPI on the ESP32-S3); host tests implement it as a recording
//! mock.

/// Errors from the panel peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// Timing values out of range (zero clock, zero resolution, ...)
    InvalidTiming,
    /// Two data/control lines mapped to the same physical pin
    PinConflict,
    /// Panel reset pulse failed
    Reset,
    /// Panel initialization handshake failed
    Init,
    /// A pixel transfer failed
    Transfer,
}

/// Signal polarity flags for the RGB interface
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelPolarity {
    /// Latch data on the falling pixel-clock edge
    pub pclk_active_falling: bool,
    /// Sync lines idle high
    pub sync_idle_high: bool,
    /// Data-enable idles high
    pub de_idle_high: bool,
}

/// Timing and pin-map configuration for an RGB-parallel panel
///
/// Populated once at configuration time and consumed by
/// [`PanelPeripheral::configure`]; immutable thereafter. The 16 data lines
/// carry 5-6-5 packed color, least-significant bit first within each
/// channel.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelTimingConfig {
    /// Pixel clock frequency in Hz
    pub pclk_hz: u32,
    /// Horizontal resolution in pixels
    pub h_res: u16,
    /// Vertical resolution in pixels
    pub v_res: u16,
    /// HSYNC pulse width in pixel clocks
    pub hsync_pulse_width: u16,
    /// Horizontal back porch in pixel clocks
    pub hsync_back_porch: u16,
    /// Horizontal front porch in pixel clocks
    pub hsync_front_porch: u16,
    /// VSYNC pulse width in lines
    pub vsync_pulse_width: u16,
    /// Vertical back porch in lines
    pub vsync_back_porch: u16,
    /// Vertical front porch in lines
    pub vsync_front_porch: u16,
    /// Signal polarity flags
    pub polarity: PanelPolarity,
    /// Red data line GPIOs, R0 first
    pub red_pins: [u8; 5],
    /// Green data line GPIOs, G0 first
    pub green_pins: [u8; 6],
    /// Blue data line GPIOs, B0 first
    pub blue_pins: [u8; 5],
    /// Data-enable GPIO
    pub de_pin: u8,
    /// Pixel clock GPIO
    pub pclk_pin: u8,
    /// HSYNC GPIO
    pub hsync_pin: u8,
    /// VSYNC GPIO
    pub vsync_pin: u8,
    /// Panel-enable GPIO, if the module has one
    pub enable_pin: Option<u8>,
}

impl PanelTimingConfig {
    /// All 16 data line GPIOs in channel order (red, green, blue)
    pub fn data_pins(&self) -> [u8; 16] {
        let mut pins = [0u8; 16];
        pins[..5].copy_from_slice(&self.red_pins);
        pins[5..11].copy_from_slice(&self.green_pins);
        pins[11..].copy_from_slice(&self.blue_pins);
        pins
    }

    /// Check timing values and pin-map consistency
    ///
    /// Timing values must be positive and each data line must map to a
    /// distinct physical pin.
    pub fn validate(&self) -> Result<(), PanelError> {
        if self.pclk_hz == 0
            || self.h_res == 0
            || self.v_res == 0
            || self.hsync_pulse_width == 0
            || self.vsync_pulse_width == 0
        {
            return Err(PanelError::InvalidTiming);
        }

        let pins = self.data_pins();
        for i in 0..pins.len() {
            for j in (i + 1)..pins.len() {
                if pins[i] == pins[j] {
                    return Err(PanelError::PinConflict);
                }
            }
        }

        Ok(())
    }
}

/// RGB timing-panel peripheral
///
/// Maps one-to-one onto the operations the pipeline needs from the LCD
/// peripheral driver: one-time configuration, a reset pulse, an init
/// handshake, and rectangular pixel transfers into the scan buffer.
pub trait PanelPeripheral {
    /// Apply timing and pin-map configuration (one-time)
    fn configure(&mut self, timing: &PanelTimingConfig) -> Result<(), PanelError>;

    /// Drive the panel reset pulse
    fn reset(&mut self) -> Result<(), PanelError>;

    /// Perform the panel initialization handshake
    fn init(&mut self) -> Result<(), PanelError>;

    /// Transfer pixel data for the inclusive rectangle `(x1,y1)..=(x2,y2)`
    ///
    /// `pixels` holds 16-bit 5-6-5 color, little-endian, row-major. The
    /// panel keeps scanning out the previous contents of any region a
    /// failed transfer did not update.
    fn draw_bitmap(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        pixels: &[u8],
    ) -> Result<(), PanelError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PanelTimingConfig {
        PanelTimingConfig {
            pclk_hz: 16_000_000,
            h_res: 800,
            v_res: 480,
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
            red_pins: [1, 2, 3, 4, 5],
            green_pins: [6, 7, 8, 9, 10, 11],
            blue_pins: [12, 13, 14, 15, 16],
            de_pin: 40,
            pclk_pin: 41,
            hsync_pin: 42,
            vsync_pin: 43,
            enable_pin: None,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert_eq!(config().validate(), Ok(()));
    }

    #[test]
    fn zero_timing_rejected() {
        let mut c = config();
        c.pclk_hz = 0;
        assert_eq!(c.validate(), Err(PanelError::InvalidTiming));

        let mut c = config();
        c.v_res = 0;
        assert_eq!(c.validate(), Err(PanelError::InvalidTiming));
    }

    #[test]
    fn duplicate_data_pin_rejected() {
        let mut c = config();
        c.blue_pins[4] = c.red_pins[0];
        assert_eq!(c.validate(), Err(PanelError::PinConflict));
    }

    #[test]
    fn data_pins_ordered_red_green_blue() {
        let pins = config().data_pins();
        assert_eq!(&pins[..5], &[1, 2, 3, 4, 5]);
        assert_eq!(&pins[5..11], &[6, 7, 8, 9, 10, 11]);
        assert_eq!(&pins[11..], &[12, 13, 14, 15, 16]);
    }
}
