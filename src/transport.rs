//! 16-bit register access over I²C.

use embedded_hal::blocking::i2c::{Write, WriteRead};

//
// Public Types
//

/// Something that can read and write the OPT4048's 16-bit registers.
///
/// Every call is one bus transaction. Nothing is cached or retried, and the
/// caller must make sure only one transaction is in flight at a time.
pub trait Transport {
    /// The error raised when a transaction fails.
    type Error;

    /// Read the register at `register`.
    ///
    /// The two bytes on the wire are big-endian.
    fn read16(&mut self, register: u8) -> Result<u16, Self::Error>;

    /// Write `value` to the register at `register`, high byte first.
    fn write16(&mut self, register: u8, value: u16) -> Result<(), Self::Error>;
}

/// An I²C bus bound to the address of one OPT4048.
pub struct I2cSession<I2C> {
    i2c: I2C,
    bus_address: u8,
}

//
// impls on Public Types
//

impl<I2C> I2cSession<I2C> {
    /// Bind `i2c` to the device at the 7-bit `bus_address`.
    pub fn new(i2c: I2C, bus_address: u8) -> I2cSession<I2C> {
        I2cSession { i2c, bus_address }
    }

    /// The 7-bit address this session talks to.
    pub fn bus_address(&self) -> u8 {
        self.bus_address
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> Transport for I2cSession<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    type Error = E;

    fn read16(&mut self, register: u8) -> Result<u16, E> {
        let mut buffer = [0u8; 2];
        self.i2c
            .write_read(self.bus_address, &[register], &mut buffer)?;
        Ok(u16::from_be_bytes(buffer))
    }

    fn write16(&mut self, register: u8, value: u16) -> Result<(), E> {
        let [high, low] = value.to_be_bytes();
        #[cfg(feature = "defmt")]
        defmt::debug!("Setting OPT4048 0x{:02x} to 0x{:04x}", register, value);
        self.i2c.write(self.bus_address, &[register, high, low])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    use embedded_hal_mock::MockError;
    use std::io::ErrorKind;

    const ADDRESS: u8 = 0x44;

    #[test]
    fn read16_is_big_endian() {
        let expectations = [I2cTransaction::write_read(
            ADDRESS,
            vec![0x11],
            vec![0x08, 0x21],
        )];
        let i2c = I2cMock::new(&expectations);
        let mut i2c_clone = i2c.clone();

        let mut session = I2cSession::new(i2c, ADDRESS);
        assert_eq!(session.read16(0x11), Ok(0x0821));
        i2c_clone.done();
    }

    #[test]
    fn write16_sends_high_byte_first() {
        let expectations = [I2cTransaction::write(ADDRESS, vec![0x0A, 0xC8, 0x38])];
        let i2c = I2cMock::new(&expectations);
        let mut i2c_clone = i2c.clone();

        let mut session = I2cSession::new(i2c, ADDRESS);
        assert_eq!(session.write16(0x0A, 0xC838), Ok(()));
        i2c_clone.done();
    }

    #[test]
    fn write_then_read_round_trips() {
        let values = [0x0000u16, 0x0001, 0x00FF, 0x0100, 0x8000, 0xABCD, 0xFFFF];
        for value in values {
            let [high, low] = value.to_be_bytes();
            let expectations = [
                I2cTransaction::write(0x45, vec![0x19, high, low]),
                I2cTransaction::write_read(0x45, vec![0x19], vec![high, low]),
            ];
            let i2c = I2cMock::new(&expectations);
            let mut i2c_clone = i2c.clone();

            let mut session = I2cSession::new(i2c, 0x45);
            session.write16(0x19, value).unwrap();
            assert_eq!(session.read16(0x19), Ok(value));
            i2c_clone.done();
        }
    }

    #[test]
    fn bus_errors_are_passed_through() {
        let expectations = [
            I2cTransaction::write_read(ADDRESS, vec![0x00], vec![0x00, 0x00])
                .with_error(MockError::Io(ErrorKind::Other)),
            I2cTransaction::write(ADDRESS, vec![0x0B, 0x40, 0x11])
                .with_error(MockError::Io(ErrorKind::Other)),
        ];
        let i2c = I2cMock::new(&expectations);
        let mut i2c_clone = i2c.clone();

        let mut session = I2cSession::new(i2c, ADDRESS);
        assert_eq!(session.read16(0x00), Err(MockError::Io(ErrorKind::Other)));
        assert_eq!(
            session.write16(0x0B, 0x4011),
            Err(MockError::Io(ErrorKind::Other))
        );
        i2c_clone.done();
    }

    #[test]
    fn release_returns_bus() {
        let i2c = I2cMock::new(&[]);
        let session = I2cSession::new(i2c, ADDRESS);
        assert_eq!(session.bus_address(), ADDRESS);
        let mut i2c = session.release();
        i2c.done();
    }
}
