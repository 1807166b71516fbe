//! Decoding of the packed per-channel result.
//!
//! Each channel's measurement is spread over two consecutive registers:
//!
//! ```text
//!            15..12     11..0
//! first:   EXPONENT | RESULT_MSB
//!
//!            15..8      7..4      3..0
//! second:  RESULT_LSB | COUNTER | CRC
//! ```
//!
//! The 20-bit mantissa is `RESULT_MSB:RESULT_LSB`, and the ADC code is that
//! mantissa shifted left by the exponent.

/// A channel result, decoded from its pair of registers.
///
/// The pair must come from back-to-back reads, otherwise the fields can
/// belong to different conversions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelResult {
    /// 4-bit exponent, from the top nibble of the first register
    pub exponent: u8,
    /// Upper 12 bits of the mantissa
    pub result_msb: u16,
    /// Lower 8 bits of the mantissa
    pub result_lsb: u8,
    /// 4-bit conversion counter
    pub counter: u8,
    /// The low 12 bits of the second register.
    ///
    /// This overlaps `counter`. The datasheet layout has a 4-bit CRC in bits
    /// 3..0, but the wider field is what this driver has always reported.
    /// Nothing checks it; a CRC validator would take a `ChannelResult` and
    /// use `exponent`, `mantissa()` and `counter`.
    pub crc: u16,
}

impl ChannelResult {
    /// Largest value the 20-bit mantissa can hold.
    pub const MANTISSA_MAX: u32 = 0xF_FFFF;

    /// Split a register pair into its fields.
    ///
    /// `exponent_word` is the value of the `EXPONENTn` register and
    /// `result_word` the value of the `RESULTn` register after it.
    pub const fn from_registers(exponent_word: u16, result_word: u16) -> ChannelResult {
        ChannelResult {
            exponent: (exponent_word >> 12) as u8,
            result_msb: exponent_word & 0x0FFF,
            result_lsb: (result_word >> 8) as u8,
            counter: ((result_word & 0xFF) >> 4) as u8,
            crc: result_word & 0x0FFF,
        }
    }

    /// The 20-bit mantissa, `result_msb:result_lsb`.
    pub const fn mantissa(&self) -> u32 {
        ((self.result_msb as u32) << 8) | self.result_lsb as u32
    }

    /// The full ADC code, `mantissa << exponent`.
    ///
    /// The largest possible code is `0xFFFFF << 15`, which needs 35 bits.
    pub const fn adc_code(&self) -> u64 {
        (self.mantissa() as u64) << self.exponent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_fields() {
        let result = ChannelResult::from_registers(0xC123, 0x4500);
        assert_eq!(result.exponent, 0xC);
        assert_eq!(result.result_msb, 0x123);
        assert_eq!(result.result_lsb, 0x45);
        assert_eq!(result.counter, 0);
        assert_eq!(result.crc, 0x500);
        assert_eq!(result.mantissa(), 0x12345);
        assert_eq!(result.adc_code(), 0x12345 << 12);
    }

    #[test]
    fn counter_and_crc_share_low_byte() {
        let result = ChannelResult::from_registers(0x0000, 0x12AB);
        assert_eq!(result.result_lsb, 0x12);
        assert_eq!(result.counter, 0xA);
        assert_eq!(result.crc, 0x2AB);
    }

    #[test]
    fn largest_code_does_not_truncate() {
        let result = ChannelResult::from_registers(0xFFFF, 0xFF00);
        assert_eq!(result.exponent, 15);
        assert_eq!(result.mantissa(), ChannelResult::MANTISSA_MAX);
        assert_eq!(result.adc_code(), 0x7_FFFF_8000);
        assert!(result.adc_code() > u64::from(u32::MAX));
    }

    #[test]
    fn zero_exponent_is_plain_mantissa() {
        let result = ChannelResult::from_registers(0x0ABC, 0xDE00);
        assert_eq!(result.adc_code(), 0xABCDE);
    }
}
