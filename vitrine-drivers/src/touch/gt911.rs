//! GT911 capacitive touch controller (I2C)
//!
//! The GT911 is a register-addressed multi-touch sensor polled over I2C
//! at 400 kHz. This driver reduces it to the single-point pointer stream
//! the host UI consumes.
//!
//! # Protocol
//!
//! Register addresses are 16 bits, sent big-endian. The 1-byte status
//! register holds a "data ready" flag in bit 7 and a touch-point count in
//! the low nibble. Each touch point is an 8-byte record; x and y are
//! 12-bit values packed low-byte-first (byte 0 plus the low nibble of
//! byte 1, and likewise bytes 2/3). After every poll that observed the
//! ready bit, zero must be written back to the status register - omitting
//! that clear makes the chip never report a new touch.

use vitrine_core::traits::touch::{TouchInitError, TouchPoint, TouchSampler};
use vitrine_hal::{DelayProvider, I2cBus, InputPin, OutputPin};

/// GT911 register addresses
pub mod reg {
    /// Command register (0 = normal operation)
    pub const COMMAND: u16 = 0x8040;
    /// 4-byte ASCII product identity ("911")
    pub const PRODUCT_ID: u16 = 0x8140;
    /// Status: bit7 = data ready, bits 0-3 = point count
    pub const STATUS: u16 = 0x814E;
    /// First 8-byte touch point record
    pub const POINT1: u16 = 0x8150;
}

/// Default 7-bit I2C address for this chip family
pub const DEFAULT_ADDRESS: u8 = 0x5D;

const STATUS_READY: u8 = 0x80;
const POINT_COUNT_MASK: u8 = 0x0F;

/// GT911 driver configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gt911Config {
    /// 7-bit I2C address
    pub address: u8,
    /// Reset assert time in ms (datasheet minimum 10)
    pub reset_hold_ms: u32,
    /// Internal boot time after reset release in ms (datasheet minimum 100)
    pub boot_wait_ms: u32,
}

impl Default for Gt911Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            reset_hold_ms: 10,
            boot_wait_ms: 100,
        }
    }
}

/// Unpack the 12-bit x/y coordinates from an 8-byte point record
///
/// Byte 0 is x-low, the low nibble of byte 1 is x-high; bytes 2/3 carry y
/// the same way. The remaining bytes (point size, track id) are unused.
pub const fn decode_point(record: &[u8; 8]) -> (u16, u16) {
    let x = record[0] as u16 | (((record[1] & 0x0F) as u16) << 8);
    let y = record[2] as u16 | (((record[3] & 0x0F) as u16) << 8);
    (x, y)
}

/// GT911 single-point touch sampler
///
/// Owns the bus address and register protocol; exposes the debounced
/// pointer state through [`TouchSampler`]. Additional simultaneous touch
/// points are discarded - the host pointer model is single-touch.
///
/// The INT line stays an input for the whole driver lifetime: the chip
/// samples it while reset releases to select the 0x5D bus address, so
/// driving it would change the address mid-boot. Sampling stays polled;
/// the pin is only held and checked during [`initialize`]
/// (`TouchSampler::initialize`).
pub struct Gt911<B, R, I, D> {
    bus: B,
    reset: R,
    interrupt: Option<I>,
    delay: D,
    config: Gt911Config,
    last: TouchPoint,
}

impl<B, R, I, D> Gt911<B, R, I, D>
where
    B: I2cBus,
    R: OutputPin,
    I: InputPin,
    D: DelayProvider,
{
    /// Create a driver with the default address and reset timings
    ///
    /// The interrupt pin must already be configured as an input (the
    /// module pulls the line up); pass `None` on boards that leave INT
    /// unrouted.
    pub fn new(bus: B, reset: R, interrupt: Option<I>, delay: D) -> Self {
        Self::with_config(bus, reset, interrupt, delay, Gt911Config::default())
    }

    /// Create a driver with explicit configuration
    pub fn with_config(
        bus: B,
        reset: R,
        interrupt: Option<I>,
        delay: D,
        config: Gt911Config,
    ) -> Self {
        Self {
            bus,
            reset,
            interrupt,
            delay,
            config,
            last: TouchPoint::idle(),
        }
    }

    fn read_reg(&mut self, register: u16, buf: &mut [u8]) -> Result<(), B::Error> {
        self.bus
            .write_read(self.config.address, &register.to_be_bytes(), buf)
    }

    fn write_reg_byte(&mut self, register: u16, value: u8) -> Result<(), B::Error> {
        let addr = register.to_be_bytes();
        self.bus
            .write(self.config.address, &[addr[0], addr[1], value])
    }
}

impl<B, R, I, D> TouchSampler for Gt911<B, R, I, D>
where
    B: I2cBus,
    R: OutputPin,
    I: InputPin,
    D: DelayProvider,
{
    fn initialize(&mut self) -> Result<(), TouchInitError> {
        // Reset pulse: assert low, hold, release, wait for internal boot.
        // INT is held as an input throughout so the chip comes up at the
        // default 0x5D address.
        self.reset.set_low();
        self.delay.delay_ms(self.config.reset_hold_ms);
        self.reset.set_high();
        self.delay.delay_ms(self.config.boot_wait_ms);

        if let Some(interrupt) = &self.interrupt {
            let _idle = interrupt.is_high();
            #[cfg(feature = "defmt")]
            defmt::debug!("GT911 INT idle level: {=bool}", _idle);
        }

        let mut id = [0u8; 4];
        self.read_reg(reg::PRODUCT_ID, &mut id)
            .map_err(|_| TouchInitError::NoAck)?;
        #[cfg(feature = "defmt")]
        defmt::debug!("GT911 product id: {=[u8]:a}", &id[..]);

        // Clear any pending command so the chip reports touches
        self.write_reg_byte(reg::COMMAND, 0)
            .map_err(|_| TouchInitError::NoAck)?;
        Ok(())
    }

    fn poll(&mut self) -> TouchPoint {
        let mut status = [0u8];
        if self.read_reg(reg::STATUS, &mut status).is_err() {
            // Transient bus contention reads as "not touched this tick"
            self.last.pressed = false;
            return self.last;
        }

        if status[0] & STATUS_READY == 0 {
            self.last.pressed = false;
            return self.last;
        }

        if status[0] & POINT_COUNT_MASK > 0 {
            let mut record = [0u8; 8];
            if self.read_reg(reg::POINT1, &mut record).is_ok() {
                let (x, y) = decode_point(&record);
                self.last = TouchPoint {
                    x,
                    y,
                    pressed: true,
                };
            } else {
                self.last.pressed = false;
            }
        } else {
            self.last.pressed = false;
        }

        // The ready flag must be cleared after every ready-bit read; a
        // failed clear just costs one missed sample on the next cycle
        let _ = self.write_reg_byte(reg::STATUS, 0);
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    /// Scripted I2C bus: serves queued register reads, records all writes
    struct MockBus {
        /// (register, response) pairs served in order
        reads: Vec<(u16, Vec<u8>)>,
        served: usize,
        /// (register, payload) pairs as written
        writes: Vec<(u16, Vec<u8>)>,
        fail_reads: bool,
    }

    impl MockBus {
        fn new(reads: Vec<(u16, Vec<u8>)>) -> Self {
            Self {
                reads,
                served: 0,
                writes: Vec::new(),
                fail_reads: false,
            }
        }
    }

    impl I2cBus for MockBus {
        type Error = ();

        fn write(&mut self, _address: u8, data: &[u8]) -> Result<(), ()> {
            let register = u16::from_be_bytes([data[0], data[1]]);
            self.writes.push((register, data[2..].to_vec()));
            Ok(())
        }

        fn write_read(
            &mut self,
            _address: u8,
            write_data: &[u8],
            read_buf: &mut [u8],
        ) -> Result<(), ()> {
            if self.fail_reads {
                return Err(());
            }
            let register = u16::from_be_bytes([write_data[0], write_data[1]]);
            let (expected, response) = self.reads.get(self.served).ok_or(())?;
            assert_eq!(register, *expected, "unexpected register read");
            read_buf.copy_from_slice(response);
            self.served += 1;
            Ok(())
        }
    }

    /// Output pin recording every level transition
    #[derive(Default)]
    struct MockPin {
        levels: Vec<bool>,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.levels.push(true);
        }
        fn set_low(&mut self) {
            self.levels.push(false);
        }
        fn is_set_high(&self) -> bool {
            *self.levels.last().unwrap_or(&false)
        }
    }

    /// Input pin with a fixed level, counting how often it is sampled
    struct MockInput {
        level: bool,
        reads: core::cell::Cell<usize>,
    }

    impl MockInput {
        fn idling(level: bool) -> Self {
            Self {
                level,
                reads: core::cell::Cell::new(0),
            }
        }
    }

    impl InputPin for MockInput {
        fn is_high(&self) -> bool {
            self.reads.set(self.reads.get() + 1);
            self.level
        }
    }

    /// Delay provider recording requested durations
    #[derive(Default)]
    struct MockDelay {
        us: Vec<u32>,
    }

    impl DelayProvider for MockDelay {
        fn delay_us(&mut self, us: u32) {
            self.us.push(us);
        }
    }

    /// Driver over the scripted bus, no interrupt line routed
    fn sampler(bus: MockBus) -> Gt911<MockBus, MockPin, MockInput, MockDelay> {
        Gt911::new(bus, MockPin::default(), None, MockDelay::default())
    }

    fn point_record(x: u16, y: u16) -> Vec<u8> {
        std::vec![
            (x & 0xFF) as u8,
            (x >> 8) as u8,
            (y & 0xFF) as u8,
            (y >> 8) as u8,
            0,
            0,
            0,
            0,
        ]
    }

    #[test]
    fn decode_masks_the_high_nibbles() {
        let record = [0x34, 0xF2, 0x67, 0xA5, 0, 0, 0, 0];
        assert_eq!(decode_point(&record), (0x234, 0x567));
    }

    #[test]
    fn initialize_drives_reset_then_reads_identity() {
        let bus = MockBus::new(std::vec![(
            reg::PRODUCT_ID,
            std::vec![b'9', b'1', b'1', 0]
        )]);
        let mut touch = sampler(bus);

        touch.initialize().unwrap();

        // Low then high, with the datasheet hold and boot waits between
        assert_eq!(touch.reset.levels, std::vec![false, true]);
        assert_eq!(touch.delay.us, std::vec![10_000, 100_000]);
        // Command register cleared after the identity read
        assert_eq!(touch.bus.writes, std::vec![(reg::COMMAND, std::vec![0])]);
    }

    #[test]
    fn initialize_holds_the_interrupt_line_as_input() {
        let bus = MockBus::new(std::vec![(
            reg::PRODUCT_ID,
            std::vec![b'9', b'1', b'1', 0]
        )]);
        let mut touch = Gt911::new(
            bus,
            MockPin::default(),
            Some(MockInput::idling(true)),
            MockDelay::default(),
        );

        touch.initialize().unwrap();

        // Never driven, sampled once after the boot wait
        let interrupt = touch.interrupt.as_ref().unwrap();
        assert_eq!(interrupt.reads.get(), 1);
        assert_eq!(touch.reset.levels, std::vec![false, true]);
    }

    #[test]
    fn initialize_nak_is_init_failure() {
        let mut bus = MockBus::new(Vec::new());
        bus.fail_reads = true;
        let mut touch = sampler(bus);
        assert_eq!(touch.initialize(), Err(TouchInitError::NoAck));
    }

    #[test]
    fn status_sequence_debounces_and_clears() {
        // Four polls: idle, press, press held, release
        let bus = MockBus::new(std::vec![
            (reg::STATUS, std::vec![0x00]),
            (reg::STATUS, std::vec![0x81]),
            (reg::POINT1, point_record(100, 200)),
            (reg::STATUS, std::vec![0x81]),
            (reg::POINT1, point_record(100, 200)),
            (reg::STATUS, std::vec![0x00]),
        ]);
        let mut touch = sampler(bus);

        let p1 = touch.poll();
        assert!(!p1.pressed);

        let p2 = touch.poll();
        assert_eq!(
            p2,
            TouchPoint {
                x: 100,
                y: 200,
                pressed: true
            }
        );

        let p3 = touch.poll();
        assert!(p3.pressed);

        let p4 = touch.poll();
        assert!(!p4.pressed);

        // Status cleared after polls 2 and 3 only (the ready-bit reads)
        let clears: Vec<_> = touch
            .bus
            .writes
            .iter()
            .filter(|(register, _)| *register == reg::STATUS)
            .collect();
        assert_eq!(clears.len(), 2);
        assert!(clears.iter().all(|(_, payload)| payload == &[0]));
    }

    #[test]
    fn ready_with_zero_count_reports_release_and_clears() {
        let bus = MockBus::new(std::vec![
            (reg::STATUS, std::vec![0x81]),
            (reg::POINT1, point_record(100, 200)),
            (reg::STATUS, std::vec![0x80]),
        ]);
        let mut touch = sampler(bus);

        assert!(touch.poll().pressed);
        let released = touch.poll();
        assert!(!released.pressed);
        // The count=0 poll still saw the ready bit, so it must clear too
        assert_eq!(
            touch
                .bus
                .writes
                .iter()
                .filter(|(register, _)| *register == reg::STATUS)
                .count(),
            2
        );
    }

    #[test]
    fn release_keeps_the_last_position() {
        let bus = MockBus::new(std::vec![
            (reg::STATUS, std::vec![0x81]),
            (reg::POINT1, point_record(100, 200)),
            (reg::STATUS, std::vec![0x00]),
        ]);
        let mut touch = sampler(bus);

        touch.poll();
        let released = touch.poll();
        assert_eq!(released.x, 100);
        assert_eq!(released.y, 200);
        assert!(!released.pressed);
    }

    #[test]
    fn bus_error_reads_as_not_touched() {
        let bus = MockBus::new(std::vec![
            (reg::STATUS, std::vec![0x81]),
            (reg::POINT1, point_record(50, 60)),
        ]);
        let mut touch = sampler(bus);
        touch.poll();

        touch.bus.fail_reads = true;
        let writes_before = touch.bus.writes.len();
        let point = touch.poll();
        assert!(!point.pressed);
        assert_eq!(point.x, 50);
        // No ready bit observed, so no status clear either
        assert_eq!(touch.bus.writes.len(), writes_before);
    }
}
