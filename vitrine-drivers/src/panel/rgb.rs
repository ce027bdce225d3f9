//! RGB-parallel panel transport
//!
//! Wraps the chip's timing-panel peripheral behind the core transport
//! trait. Configuration happens once: validate the timing set, apply it to
//! the peripheral, pulse reset and run the init handshake. After that the
//! hardware scans continuously and the only runtime operation is pushing
//! pixel rectangles into its scan buffer.

use vitrine_core::region::Region;
use vitrine_core::traits::panel::{ConfigurationError, PanelTransport, TransportError};
use vitrine_hal::panel::{PanelError, PanelPeripheral, PanelTimingConfig};

/// Panel transport over a [`PanelPeripheral`]
pub struct RgbPanel<P> {
    peripheral: P,
    timing: PanelTimingConfig,
    configured: bool,
}

impl<P: PanelPeripheral> RgbPanel<P> {
    /// Bind a peripheral to one timing/pin-map configuration
    ///
    /// The configuration is consumed once by [`configure`]
    /// (`PanelTransport::configure`) and immutable afterwards.
    pub fn new(peripheral: P, timing: PanelTimingConfig) -> Self {
        Self {
            peripheral,
            timing,
            configured: false,
        }
    }

    /// The bound timing configuration
    pub fn timing(&self) -> &PanelTimingConfig {
        &self.timing
    }
}

fn map_config_error(e: PanelError) -> ConfigurationError {
    match e {
        PanelError::InvalidTiming => ConfigurationError::InvalidTiming,
        PanelError::PinConflict => ConfigurationError::PinConflict,
        PanelError::Reset => ConfigurationError::ResetFailed,
        PanelError::Init => ConfigurationError::InitFailed,
        PanelError::Transfer => ConfigurationError::PeripheralFailed,
    }
}

impl<P: PanelPeripheral> PanelTransport for RgbPanel<P> {
    fn configure(&mut self) -> Result<(), ConfigurationError> {
        self.timing.validate().map_err(map_config_error)?;
        self.peripheral
            .configure(&self.timing)
            .map_err(|_| ConfigurationError::PeripheralFailed)?;
        self.peripheral
            .reset()
            .map_err(|_| ConfigurationError::ResetFailed)?;
        self.peripheral
            .init()
            .map_err(|_| ConfigurationError::InitFailed)?;
        self.configured = true;
        Ok(())
    }

    fn push_region(&mut self, region: &Region, pixels: &[u8]) -> Result<(), TransportError> {
        if !self.configured {
            return Err(TransportError::NotConfigured);
        }
        if !region.fits(self.timing.h_res, self.timing.v_res) {
            return Err(TransportError::RegionOutOfBounds);
        }
        if pixels.len() != region.byte_len() {
            return Err(TransportError::LengthMismatch);
        }
        self.peripheral
            .draw_bitmap(region.x1, region.y1, region.x2, region.y2, pixels)
            .map_err(|_| TransportError::Transfer)
    }

    fn resolution(&self) -> (u16, u16) {
        (self.timing.h_res, self.timing.v_res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[derive(Debug, PartialEq, Eq, Clone, Copy)]
    enum Op {
        Configure,
        Reset,
        Init,
        Draw(u16, u16, u16, u16, usize),
    }

    #[derive(Default)]
    struct MockPeripheral {
        ops: Vec<Op>,
        fail_init: bool,
        fail_draw: bool,
    }

    impl PanelPeripheral for MockPeripheral {
        fn configure(&mut self, _timing: &PanelTimingConfig) -> Result<(), PanelError> {
            self.ops.push(Op::Configure);
            Ok(())
        }

        fn reset(&mut self) -> Result<(), PanelError> {
            self.ops.push(Op::Reset);
            Ok(())
        }

        fn init(&mut self) -> Result<(), PanelError> {
            if self.fail_init {
                return Err(PanelError::Init);
            }
            self.ops.push(Op::Init);
            Ok(())
        }

        fn draw_bitmap(
            &mut self,
            x1: u16,
            y1: u16,
            x2: u16,
            y2: u16,
            pixels: &[u8],
        ) -> Result<(), PanelError> {
            if self.fail_draw {
                return Err(PanelError::Transfer);
            }
            self.ops.push(Op::Draw(x1, y1, x2, y2, pixels.len()));
            Ok(())
        }
    }

    fn timing(width: u16, height: u16) -> PanelTimingConfig {
        PanelTimingConfig {
            pclk_hz: 16_000_000,
            h_res: width,
            v_res: height,
            hsync_pulse_width: 10,
            hsync_back_porch: 10,
            hsync_front_porch: 20,
            vsync_pulse_width: 10,
            vsync_back_porch: 10,
            vsync_front_porch: 10,
            polarity: Default::default(),
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
    fn configure_runs_setup_then_reset_then_init() {
        let mut panel = RgbPanel::new(MockPeripheral::default(), timing(8, 8));
        panel.configure().unwrap();
        assert_eq!(
            panel.peripheral.ops,
            std::vec![Op::Configure, Op::Reset, Op::Init]
        );
    }

    #[test]
    fn init_failure_is_fatal_configuration_error() {
        let peripheral = MockPeripheral {
            fail_init: true,
            ..Default::default()
        };
        let mut panel = RgbPanel::new(peripheral, timing(8, 8));
        assert_eq!(panel.configure(), Err(ConfigurationError::InitFailed));
    }

    #[test]
    fn invalid_timing_never_touches_the_peripheral() {
        let mut bad = timing(8, 8);
        bad.pclk_hz = 0;
        let mut panel = RgbPanel::new(MockPeripheral::default(), bad);
        assert_eq!(panel.configure(), Err(ConfigurationError::InvalidTiming));
        assert!(panel.peripheral.ops.is_empty());
    }

    #[test]
    fn push_before_configure_is_rejected() {
        let mut panel = RgbPanel::new(MockPeripheral::default(), timing(8, 8));
        let region = Region::full(8, 8);
        assert_eq!(
            panel.push_region(&region, &[0; 8 * 8 * 2]),
            Err(TransportError::NotConfigured)
        );
    }

    #[test]
    fn push_forwards_the_exact_rectangle() {
        let mut panel = RgbPanel::new(MockPeripheral::default(), timing(8, 8));
        panel.configure().unwrap();

        let region = Region::new(2, 3, 5, 6);
        let pixels = std::vec![0u8; region.byte_len()];
        panel.push_region(&region, &pixels).unwrap();
        assert_eq!(
            panel.peripheral.ops.last(),
            Some(&Op::Draw(2, 3, 5, 6, pixels.len()))
        );
    }

    #[test]
    fn push_validates_bounds_and_length() {
        let mut panel = RgbPanel::new(MockPeripheral::default(), timing(8, 8));
        panel.configure().unwrap();

        let outside = Region::new(0, 0, 8, 7);
        assert_eq!(
            panel.push_region(&outside, &[0; 9 * 8 * 2]),
            Err(TransportError::RegionOutOfBounds)
        );

        let region = Region::full(8, 8);
        assert_eq!(
            panel.push_region(&region, &[0; 4]),
            Err(TransportError::LengthMismatch)
        );
    }

    #[test]
    fn transfer_failure_is_transient() {
        let mut panel = RgbPanel::new(MockPeripheral::default(), timing(8, 8));
        panel.configure().unwrap();
        panel.peripheral.fail_draw = true;

        let region = Region::full(8, 8);
        let pixels = std::vec![0u8; region.byte_len()];
        assert_eq!(
            panel.push_region(&region, &pixels),
            Err(TransportError::Transfer)
        );

        // Still configured: the next push goes through
        panel.peripheral.fail_draw = false;
        panel.push_region(&region, &pixels).unwrap();
    }
}
