//! # OPT4048 Driver
//!
//! This is a driver for the Texas Instruments OPT4048 four-channel colour /
//! ambient light sensor.
//!
//! It reads and writes the OPT4048's 16-bit registers over I²C, and decodes
//! the packed exponent / mantissa channel results into ADC codes.
//!
//! Each of the four channels reports its measurement across two registers:
//! a 4-bit exponent with the top 12 bits of a 20-bit mantissa, then the
//! bottom 8 bits of the mantissa with a conversion counter and CRC. See
//! [`ChannelResult`] for the layout.
//!
//! The OPT4048 is configured with two fixed configuration words
//! ([`CONFIG0_DEFAULT`] and [`CONFIG1_DEFAULT`]), which select continuous
//! conversions with auto-ranging and I²C burst reads.
//!
//! # Example
//!
//! You might read the sensor like this:
//!
//! ```rust
//! # use embedded_hal::blocking::i2c::{Write, WriteRead};
//! # use embedded_hal::blocking::delay::DelayMs;
//! # struct I2c;
//! # impl Write for I2c {
//! #     type Error = ();
//! #     fn write(&mut self, _address: u8, _bytes: &[u8]) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # impl WriteRead for I2c {
//! #     type Error = ();
//! #     fn write_read(&mut self, _address: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error> {
//! #         let value: u16 = if bytes[0] == 0x11 { 0x0821 } else { 0 };
//! #         buffer.copy_from_slice(&value.to_be_bytes());
//! #         Ok(())
//! #     }
//! # }
//! # struct Delay;
//! # impl DelayMs<u16> for Delay {
//! #     fn delay_ms(&mut self, _ms: u16) {}
//! # }
//! # let i2c = I2c;
//! # let mut delay = Delay;
//! let mut sensor = opt4048::Opt4048::new(i2c);
//! if let Err(e) = sensor.init(&mut delay) {
//!     // Sensor didn't respond, or isn't an OPT4048
//! }
//! match sensor.read_all_channels() {
//!     Ok([x, y, z, broadband]) => {
//!         // Use the ADC codes
//!     }
//!     Err(e) => {
//!         // Sensor didn't respond
//!     }
//! }
//! ```

#![no_std]
#![deny(unsafe_code)]
#![deny(missing_docs)]

#[cfg(test)]
#[macro_use]
extern crate std;

use core::fmt;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c::{Write, WriteRead};

mod registers;
mod result;
mod transport;

pub use registers::{Channel, Register, CONFIG0_DEFAULT, CONFIG1_DEFAULT, EXPECTED_DEVICE_ID};
pub use result::ChannelResult;
pub use transport::{I2cSession, Transport};

//
// Public Types
//

/// Errors from [`Opt4048::init`].
///
/// Everything else returns the transport's error unchanged.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// A bus transaction failed
    Bus(E),
    /// The device ID register didn't hold [`EXPECTED_DEVICE_ID`]
    UnexpectedDeviceId(u16),
}

/// Talks to one OPT4048.
pub struct Opt4048<T> {
    transport: T,
}

//
// Public Data
//

/// The OPT4048's default 7-bit I²C address.
pub const DEFAULT_ADDRESS: u8 = 0x44;

/// How long to wait after configuring the OPT4048 before reading results.
pub const SETTLING_TIME_MS: u16 = 1000;

//
// impls on Public Types
//

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "I²C error: {:?}", e),
            Error::UnexpectedDeviceId(id) => write!(
                f,
                "Unexpected device ID 0x{:04x} (expected 0x{:04x})",
                id, EXPECTED_DEVICE_ID
            ),
        }
    }
}

impl<I2C, E> Opt4048<I2cSession<I2C>>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    /// Create a driver for an OPT4048 at [`DEFAULT_ADDRESS`].
    pub fn new(i2c: I2C) -> Self {
        Self::new_with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a driver for an OPT4048 at some other 7-bit address.
    pub fn new_with_address(i2c: I2C, bus_address: u8) -> Self {
        Self::from_transport(I2cSession::new(i2c, bus_address))
    }
}

impl<T> Opt4048<T>
where
    T: Transport,
{
    /// Create a driver on top of any [`Transport`].
    pub fn from_transport(transport: T) -> Self {
        Opt4048 { transport }
    }

    /// Give back the transport.
    pub fn release(self) -> T {
        self.transport
    }

    /// Read a raw register.
    pub fn read_register(&mut self, register: u8) -> Result<u16, T::Error> {
        self.transport.read16(register)
    }

    /// Write a raw register.
    pub fn write_register(&mut self, register: u8, value: u16) -> Result<(), T::Error> {
        self.transport.write16(register, value)
    }

    /// Read the device ID register.
    ///
    /// The value is returned as-is. An OPT4048 should report
    /// [`EXPECTED_DEVICE_ID`].
    pub fn read_device_id(&mut self) -> Result<u16, T::Error> {
        self.transport.read16(Register::DeviceId.into())
    }

    /// Write [`CONFIG0_DEFAULT`] to CONFIG0.
    pub fn write_default_config0(&mut self) -> Result<(), T::Error> {
        self.transport.write16(Register::Config0.into(), CONFIG0_DEFAULT)
    }

    /// Write [`CONFIG1_DEFAULT`] to CONFIG1.
    pub fn write_default_config1(&mut self) -> Result<(), T::Error> {
        self.transport.write16(Register::Config1.into(), CONFIG1_DEFAULT)
    }

    /// Check the device ID, write both configuration words, then wait
    /// [`SETTLING_TIME_MS`] for the first conversions to complete.
    pub fn init<D>(&mut self, delay: &mut D) -> Result<(), Error<T::Error>>
    where
        D: DelayMs<u16>,
    {
        let device_id = self.read_device_id().map_err(Error::Bus)?;
        if device_id != EXPECTED_DEVICE_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!("OPT4048 reported device ID 0x{:04x}", device_id);
            return Err(Error::UnexpectedDeviceId(device_id));
        }
        #[cfg(feature = "defmt")]
        defmt::info!("Found OPT4048, device ID 0x{:04x}", device_id);

        self.write_default_config0().map_err(Error::Bus)?;
        self.write_default_config1().map_err(Error::Bus)?;
        delay.delay_ms(SETTLING_TIME_MS);
        Ok(())
    }

    /// Read and decode the register pair starting at `exponent_register`.
    ///
    /// Reads `exponent_register` and then the register after it. If either
    /// read fails, nothing is decoded.
    pub fn read_channel_result(
        &mut self,
        exponent_register: u8,
    ) -> Result<ChannelResult, T::Error> {
        let exponent_word = self.transport.read16(exponent_register)?;
        let result_word = self.transport.read16(exponent_register.wrapping_add(1))?;
        Ok(ChannelResult::from_registers(exponent_word, result_word))
    }

    /// Read the ADC code from the register pair starting at
    /// `exponent_register`.
    ///
    /// See [`ChannelResult::adc_code`].
    pub fn read_channel_adc_code(&mut self, exponent_register: u8) -> Result<u64, T::Error> {
        Ok(self.read_channel_result(exponent_register)?.adc_code())
    }

    /// Read the ADC code for one channel.
    pub fn read_channel(&mut self, channel: Channel) -> Result<u64, T::Error> {
        self.read_channel_adc_code(channel.exponent_register().into())
    }

    /// Read the ADC codes for all four channels, in channel order.
    ///
    /// Stops at the first failed read.
    pub fn read_all_channels(&mut self) -> Result<[u64; 4], T::Error> {
        let mut codes = [0u64; 4];
        for (code, channel) in codes.iter_mut().zip(Channel::ALL) {
            *code = self.read_channel(channel)?;
        }
        Ok(codes)
    }

    /// Read a single-register lux result, in hundredths of a lux.
    ///
    /// This is the older one-register format: a 4-bit exponent in bits
    /// 15..12 and a 12-bit mantissa in bits 11..0. The OPT4048 itself does
    /// not have such a register, so the caller must say where to find it.
    ///
    /// Divide by 100 to get lux.
    pub fn read_lux_fixed_point(&mut self, register: u8) -> Result<u32, T::Error> {
        let value = self.transport.read16(register)?;
        Ok(lux_fixed_point(value))
    }

    /// Read a single-register lux result, in lux.
    ///
    /// Always equal to [`Opt4048::read_lux_fixed_point`] times 0.01.
    pub fn read_lux_float(&mut self, register: u8) -> Result<f64, T::Error> {
        let value = self.transport.read16(register)?;
        Ok(f64::from(lux_fixed_point(value)) * 0.01)
    }
}

//
// Private Functions
//

/// `mantissa * 2^exponent`, at most `0xFFF << 15`
fn lux_fixed_point(value: u16) -> u32 {
    let mantissa = u32::from(value & 0x0FFF);
    let exponent = (value & 0xF000) >> 12;
    mantissa << exponent
}


//
// End of file
//
