//! Register map for the OPT4048.
//!
//! Every register is 16 bits wide and is addressed by an 8-bit offset.

//
// Public Types
//

/// The set of registers in the OPT4048
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Channel 0 exponent and result MSBs
    Exponent0 = 0x00,
    /// Channel 0 result LSBs, counter and CRC
    Result0 = 0x01,
    /// Channel 1 exponent and result MSBs
    Exponent1 = 0x02,
    /// Channel 1 result LSBs, counter and CRC
    Result1 = 0x03,
    /// Channel 2 exponent and result MSBs
    Exponent2 = 0x04,
    /// Channel 2 result LSBs, counter and CRC
    Result2 = 0x05,
    /// Channel 3 exponent and result MSBs
    Exponent3 = 0x06,
    /// Channel 3 result LSBs, counter and CRC
    Result3 = 0x07,
    /// Threshold high
    ThresholdHigh = 0x09,
    /// Operating-mode configuration
    Config0 = 0x0A,
    /// Interrupt and burst-read configuration
    Config1 = 0x0B,
    /// Device identification
    DeviceId = 0x11,
    /// Threshold low
    ThresholdLow = 0x19,
}

/// One of the four photodiode measurement paths.
///
/// Channels 0 to 2 are the tri-colour channels (X, Y, Z), channel 3 is the
/// broadband channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Channel 0
    Ch0,
    /// Channel 1
    Ch1,
    /// Channel 2
    Ch2,
    /// Channel 3
    Ch3,
}

//
// Public Data
//

/// Value to write to [`Register::Config0`].
///
/// The intended settings are auto-range, 100 ms conversion time, continuous
/// conversions, latched interrupt, INT active low and a fault count of zero.
/// Those settings encode to `0x3238`; this word is the one the device has
/// always been configured with and is written verbatim. Check it against the
/// datasheet before changing it.
pub const CONFIG0_DEFAULT: u16 = 0xC838;

/// Value to write to [`Register::Config1`].
///
/// | Bits  | Value | Meaning                                    |
/// |-------|-------|--------------------------------------------|
/// | 15..7 | 128   | Must be 128                                |
/// | 6..5  | 0     | Threshold logic on channel 0               |
/// | 4     | 1     | INT pin is an output                       |
/// | 3..2  | 0     | SMBus alert                                |
/// | 1     | 0     | Must be 0                                  |
/// | 0     | 1     | I²C burst reads enabled                    |
pub const CONFIG1_DEFAULT: u16 = 0x4011;

/// What [`Register::DeviceId`] reads back as, according to the datasheet.
pub const EXPECTED_DEVICE_ID: u16 = 0x0821;

//
// impls on Public Types
//

impl From<Register> for u8 {
    fn from(register: Register) -> u8 {
        register as u8
    }
}

impl Channel {
    /// All four channels, in register order.
    pub const ALL: [Channel; 4] = [Channel::Ch0, Channel::Ch1, Channel::Ch2, Channel::Ch3];

    /// The exponent register which starts this channel's result pair.
    pub fn exponent_register(self) -> Register {
        match self {
            Channel::Ch0 => Register::Exponent0,
            Channel::Ch1 => Register::Exponent1,
            Channel::Ch2 => Register::Exponent2,
            Channel::Ch3 => Register::Exponent3,
        }
    }

    /// The second register of this channel's result pair.
    pub fn result_register(self) -> Register {
        match self {
            Channel::Ch0 => Register::Result0,
            Channel::Ch1 => Register::Result1,
            Channel::Ch2 => Register::Result2,
            Channel::Ch3 => Register::Result3,
        }
    }
}
