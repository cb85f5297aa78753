//! Bit-banged shift-register peripheral
//!
//! Stands in for a hardware USI-style shift register on parts that
//! lack one: three GPIO lines (clock, data-out, data-in) driven MSB
//! first, SPI mode 0. Data is presented on the falling edge and
//! sampled on the rising edge; the completion flag fires after 16
//! toggles, one full byte.

use embedded_hal::digital::{InputPin, OutputPin};

use super::ShiftRegister;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShifterError {
    Pin,
}

pub struct GpioShifter<SCK, MOSI, MISO> {
    sck: SCK,
    mosi: MOSI,
    miso: MISO,
    shift_out: u8,
    shift_in: u8,
    toggles: u8,
    clock_high: bool,
    overflow: bool,
}

impl<SCK, MOSI, MISO> GpioShifter<SCK, MOSI, MISO>
where
    SCK: OutputPin,
    MOSI: OutputPin,
    MISO: InputPin,
{
    /// Take the three bus lines, driving clock and data-out to idle low.
    pub fn new(mut sck: SCK, mut mosi: MOSI, miso: MISO) -> Result<Self, ShifterError> {
        sck.set_low().map_err(|_| ShifterError::Pin)?;
        mosi.set_low().map_err(|_| ShifterError::Pin)?;
        Ok(Self {
            sck,
            mosi,
            miso,
            shift_out: 0,
            shift_in: 0,
            toggles: 0,
            clock_high: false,
            overflow: false,
        })
    }

    fn present_msb(&mut self) -> Result<(), ShifterError> {
        if self.shift_out & 0x80 != 0 {
            self.mosi.set_high().map_err(|_| ShifterError::Pin)
        } else {
            self.mosi.set_low().map_err(|_| ShifterError::Pin)
        }
    }
}

impl<SCK, MOSI, MISO> ShiftRegister for GpioShifter<SCK, MOSI, MISO>
where
    SCK: OutputPin,
    MOSI: OutputPin,
    MISO: InputPin,
{
    type Error = ShifterError;

    fn load(&mut self, byte: u8) -> Result<(), ShifterError> {
        self.shift_out = byte;
        self.toggles = 0;
        self.overflow = false;
        // First outbound bit must be on the line before the first
        // rising edge. Once 8 bits have shifted out the register holds
        // zero, so extra byte periods clock out zeros.
        self.present_msb()
    }

    fn toggle_clock(&mut self) -> Result<(), ShifterError> {
        if self.clock_high {
            // Falling edge: shift and present the next outbound bit
            self.sck.set_low().map_err(|_| ShifterError::Pin)?;
            self.clock_high = false;
            self.shift_out <<= 1;
            self.present_msb()?;
        } else {
            // Rising edge: sample the inbound line
            self.sck.set_high().map_err(|_| ShifterError::Pin)?;
            self.clock_high = true;
            let bit = self.miso.is_high().map_err(|_| ShifterError::Pin)?;
            self.shift_in = (self.shift_in << 1) | u8::from(bit);
        }

        self.toggles += 1;
        if self.toggles == 16 {
            self.overflow = true;
            self.toggles = 0;
        }
        Ok(())
    }

    fn overflow(&self) -> bool {
        self.overflow
    }

    fn clear_overflow(&mut self) {
        self.overflow = false;
    }

    fn read(&self) -> u8 {
        self.shift_in
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;
    use core::convert::Infallible;

    use super::*;

    /// Output pin backed by a shared level cell.
    struct DrivePin<'a> {
        level: &'a Cell<bool>,
    }

    impl embedded_hal::digital::ErrorType for DrivePin<'_> {
        type Error = Infallible;
    }

    impl OutputPin for DrivePin<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.level.set(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.level.set(true);
            Ok(())
        }
    }

    /// Input pin reading a shared level cell.
    struct SensePin<'a> {
        level: &'a Cell<bool>,
    }

    impl embedded_hal::digital::ErrorType for SensePin<'_> {
        type Error = Infallible;
    }

    impl InputPin for SensePin<'_> {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.level.get())
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.level.get())
        }
    }

    fn loopback_shifter<'a>(
        sck: &'a Cell<bool>,
        data: &'a Cell<bool>,
    ) -> GpioShifter<DrivePin<'a>, DrivePin<'a>, SensePin<'a>> {
        // MOSI and MISO share one cell: whatever goes out comes back.
        GpioShifter::new(
            DrivePin { level: sck },
            DrivePin { level: data },
            SensePin { level: data },
        )
        .unwrap()
    }

    fn clock_one_byte<R: ShiftRegister>(reg: &mut R)
    where
        R::Error: core::fmt::Debug,
    {
        for _ in 0..16 {
            assert!(!reg.overflow());
            reg.toggle_clock().unwrap();
        }
        assert!(reg.overflow());
        reg.clear_overflow();
    }

    #[test]
    fn loopback_echoes_the_outbound_byte() {
        let sck = Cell::new(false);
        let data = Cell::new(false);
        let mut shifter = loopback_shifter(&sck, &data);

        for byte in [0xA5u8, 0x00, 0xFF, 0x3F, 0x80] {
            shifter.load(byte).unwrap();
            clock_one_byte(&mut shifter);
            assert_eq!(shifter.read(), byte);
        }
    }

    #[test]
    fn second_byte_period_shifts_out_zeros() {
        let sck = Cell::new(false);
        let data = Cell::new(false);
        let mut shifter = loopback_shifter(&sck, &data);

        shifter.load(0x88).unwrap();
        clock_one_byte(&mut shifter);
        clock_one_byte(&mut shifter);
        assert_eq!(shifter.read(), 0x00);
    }

    #[test]
    fn msb_is_on_the_line_before_the_first_edge() {
        let sck = Cell::new(false);
        let data = Cell::new(false);
        let mut shifter = loopback_shifter(&sck, &data);

        shifter.load(0x80).unwrap();
        assert!(data.get());
        shifter.load(0x7F).unwrap();
        assert!(!data.get());
    }
}
