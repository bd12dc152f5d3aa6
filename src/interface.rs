//! Register-addressed access to the display controller. The SSD1306 on I2C has no separate D/C
//! line: every transaction starts with a control byte that plays the role of a register address,
//! so the driver only needs "write bytes to register" and "read bytes from register".

use crate::error::Error;

/// Pass as `max_tries` to keep retrying a failed transaction until it succeeds.
pub const RETRY_FOREVER: u32 = 0;

/// The bus capability the display engine depends on.
///
/// On success both transfer methods return the 1-based number of attempts it took, so `Ok(1)`
/// means the first try went through. A `max_tries` of `RETRY_FOREVER` never gives up.
pub trait RegisterInterface {
    /// Send register address `reg`, then receive `buf.len()` bytes into `buf`. An empty `buf`
    /// sends only the address.
    fn read(&mut self, reg: u8, buf: &mut [u8], max_tries: u32) -> Result<u32, Error>;

    /// Send register address `reg` followed by `data` as one transaction.
    fn write(&mut self, reg: u8, data: &[u8], max_tries: u32) -> Result<u32, Error>;

    /// Read a single byte from `reg`, returning it together with the attempt count.
    fn read_byte(&mut self, reg: u8, max_tries: u32) -> Result<(u8, u32), Error> {
        let mut value = [0u8];
        let tries = self.read(reg, &mut value, max_tries)?;
        Ok((value[0], tries))
    }

    /// Write a single byte to `reg`.
    fn write_byte(&mut self, reg: u8, value: u8, max_tries: u32) -> Result<u32, Error> {
        self.write(reg, &[value], max_tries)
    }
}

impl<'a, T> RegisterInterface for &'a mut T
where
    T: RegisterInterface + ?Sized,
{
    fn read(&mut self, reg: u8, buf: &mut [u8], max_tries: u32) -> Result<u32, Error> {
        (**self).read(reg, buf, max_tries)
    }

    fn write(&mut self, reg: u8, data: &[u8], max_tries: u32) -> Result<u32, Error> {
        (**self).write(reg, data, max_tries)
    }
}

/// Run `attempt` until it reports success or `max_tries` attempts have been made.
fn retry<F>(max_tries: u32, mut attempt: F) -> Result<u32, Error>
where
    F: FnMut() -> bool,
{
    let mut attempts = 0u32;
    while max_tries == RETRY_FOREVER || attempts < max_tries {
        attempts = attempts.saturating_add(1);
        if attempt() {
            return Ok(attempts);
        }
        debug!("bus transaction failed (attempt {})", attempts);
    }
    warn!("bus transaction failed after {} attempts", attempts);
    Err(Error::Bus)
}

pub mod i2c {
    //! Blocking I2C transport. Reads use a write-then-read transaction with a repeated start so
    //! the register address and the data phase are one bus transaction. Writes copy the register
    //! address and payload into a scratch buffer so they go out as one transaction too.

    use hal::blocking::i2c::{Write, WriteRead};

    use super::{retry, RegisterInterface};
    use crate::error::Error;

    /// Upper bound on the `max_payload` an `I2cInterface` can be built with.
    pub const MAX_PAYLOAD_LIMIT: usize = 256;

    pub struct I2cInterface<I2C> {
        /// The I2C master device the SSD1306 sits on.
        i2c: I2C,
        /// 7-bit bus address of the controller.
        address: u8,
        /// Byte 0 is the register address, bytes 1.. the payload.
        scratch: [u8; MAX_PAYLOAD_LIMIT + 1],
        max_payload: usize,
    }

    impl<I2C, E> I2cInterface<I2C>
    where
        I2C: Write<Error = E> + WriteRead<Error = E>,
    {
        /// Create a transport to the device at 7-bit `address` on `i2c`. Writes must carry
        /// fewer than `max_payload` bytes, which must be between 1 and `MAX_PAYLOAD_LIMIT`.
        pub fn new(i2c: I2C, address: u8, max_payload: usize) -> Result<Self, Error> {
            if max_payload == 0 || max_payload > MAX_PAYLOAD_LIMIT {
                return Err(Error::InvalidCapacity);
            }
            if address > 0x7F {
                return Err(Error::OutOfRange("address"));
            }
            debug!(
                "i2c transport for device 0x{:02x}, max payload {}",
                address, max_payload
            );
            Ok(Self {
                i2c,
                address,
                scratch: [0; MAX_PAYLOAD_LIMIT + 1],
                max_payload,
            })
        }

        pub fn address(&self) -> u8 {
            self.address
        }

        pub fn max_payload(&self) -> usize {
            self.max_payload
        }

        /// Give back the I2C device.
        pub fn release(self) -> I2C {
            self.i2c
        }
    }

    #[cfg(feature = "linux")]
    impl I2cInterface<linux_embedded_hal::I2cdev> {
        /// Open a Linux I2C character device such as `/dev/i2c-1` and create a transport on it.
        pub fn open<P>(path: P, address: u8, max_payload: usize) -> Result<Self, Error>
        where
            P: AsRef<std::path::Path>,
        {
            let path = path.as_ref();
            let dev = linux_embedded_hal::I2cdev::new(path).map_err(|e| {
                error!("cannot open {}: {}", path.display(), e);
                Error::BusOpen
            })?;
            Self::new(dev, address, max_payload)
        }
    }

    impl<I2C, E> RegisterInterface for I2cInterface<I2C>
    where
        I2C: Write<Error = E> + WriteRead<Error = E>,
    {
        fn read(&mut self, reg: u8, buf: &mut [u8], max_tries: u32) -> Result<u32, Error> {
            let Self { i2c, address, .. } = self;
            let address = *address;
            if buf.is_empty() {
                retry(max_tries, || i2c.write(address, &[reg]).is_ok())
            } else {
                retry(max_tries, || i2c.write_read(address, &[reg], buf).is_ok())
            }
        }

        fn write(&mut self, reg: u8, data: &[u8], max_tries: u32) -> Result<u32, Error> {
            if data.len() >= self.max_payload {
                return Err(Error::PayloadTooLarge {
                    len: data.len(),
                    max: self.max_payload,
                });
            }
            let Self {
                i2c,
                address,
                scratch,
                ..
            } = self;
            let address = *address;
            scratch[0] = reg;
            scratch[1..=data.len()].copy_from_slice(data);
            let msg = &scratch[..=data.len()];
            retry(max_tries, || i2c.write(address, msg).is_ok())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::interface::RETRY_FOREVER;
        use embedded_hal_mock::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
        use embedded_hal_mock::MockError;
        use std::io::ErrorKind;
        use std::vec::Vec;

        const ADDR: u8 = 0x3C;

        fn failing(t: I2cTransaction) -> I2cTransaction {
            t.with_error(MockError::Io(ErrorKind::Other))
        }

        /// `fails` failing writes of `bytes`, then `succeeds` successful ones.
        fn writes(bytes: &[u8], fails: usize, succeeds: usize) -> Vec<I2cTransaction> {
            let mut v = Vec::new();
            for _ in 0..fails {
                v.push(failing(I2cTransaction::write(ADDR, bytes.to_vec())));
            }
            for _ in 0..succeeds {
                v.push(I2cTransaction::write(ADDR, bytes.to_vec()));
            }
            v
        }

        #[test]
        fn construction_limits() {
            let none: [I2cTransaction; 0] = [];
            let mut i2c = I2cMock::new(&none);
            assert_eq!(
                I2cInterface::new(i2c.clone(), ADDR, 0).err(),
                Some(Error::InvalidCapacity)
            );
            assert_eq!(
                I2cInterface::new(i2c.clone(), ADDR, MAX_PAYLOAD_LIMIT + 1).err(),
                Some(Error::InvalidCapacity)
            );
            assert_eq!(
                I2cInterface::new(i2c.clone(), 0x80, 32).err(),
                Some(Error::OutOfRange("address"))
            );
            let iface = I2cInterface::new(i2c.clone(), ADDR, MAX_PAYLOAD_LIMIT).unwrap();
            assert_eq!(iface.address(), ADDR);
            assert_eq!(iface.max_payload(), MAX_PAYLOAD_LIMIT);
            i2c.done();
        }

        #[test]
        fn write_combines_register_and_payload() {
            let mut i2c = I2cMock::new(&writes(&[0x40, 1, 2, 3], 0, 1));
            let mut iface = I2cInterface::new(i2c.clone(), ADDR, 32).unwrap();
            assert_eq!(iface.write(0x40, &[1, 2, 3], 1), Ok(1));
            i2c.done();
        }

        #[test]
        fn write_empty_payload_sends_register_only() {
            let mut i2c = I2cMock::new(&writes(&[0x00], 0, 1));
            let mut iface = I2cInterface::new(i2c.clone(), ADDR, 1).unwrap();
            assert_eq!(iface.write(0x00, &[], 1), Ok(1));
            i2c.done();
        }

        #[test]
        fn write_payload_boundary() {
            let payload: Vec<u8> = (0..8).collect();
            let mut expected = vec![0x40];
            expected.extend_from_slice(&payload[..7]);
            let mut i2c = I2cMock::new(&writes(&expected, 0, 1));
            let mut iface = I2cInterface::new(i2c.clone(), ADDR, 8).unwrap();

            // Rejected before the bus is touched: the mock has no transaction for it.
            assert_eq!(
                iface.write(0x40, &payload, 1),
                Err(Error::PayloadTooLarge { len: 8, max: 8 })
            );
            assert_eq!(iface.write(0x40, &payload[..7], 1), Ok(1));
            i2c.done();
        }

        #[test]
        fn write_retry_accounting() {
            for k in 1..=4u32 {
                for max_tries in k..=5 {
                    let mut i2c = I2cMock::new(&writes(&[0x00, 0xAF], k as usize - 1, 1));
                    let mut iface = I2cInterface::new(i2c.clone(), ADDR, 4).unwrap();
                    assert_eq!(iface.write_byte(0x00, 0xAF, max_tries), Ok(k));
                    i2c.done();
                }
            }
        }

        #[test]
        fn write_gives_up_after_max_tries() {
            for max_tries in 1..=3u32 {
                let mut i2c = I2cMock::new(&writes(&[0x00, 0xAF], max_tries as usize, 0));
                let mut iface = I2cInterface::new(i2c.clone(), ADDR, 4).unwrap();
                assert_eq!(iface.write_byte(0x00, 0xAF, max_tries), Err(Error::Bus));
                i2c.done();
            }
        }

        #[test]
        fn transport_usable_after_failure() {
            let mut expectations = writes(&[0x00, 0xAE], 1, 0);
            expectations.extend(writes(&[0x00, 0xAF], 0, 1));
            let mut i2c = I2cMock::new(&expectations);
            let mut iface = I2cInterface::new(i2c.clone(), ADDR, 4).unwrap();
            assert_eq!(iface.write_byte(0x00, 0xAE, 1), Err(Error::Bus));
            assert_eq!(iface.write_byte(0x00, 0xAF, 1), Ok(1));
            i2c.done();
        }

        #[test]
        fn retry_forever_keeps_going() {
            let mut i2c = I2cMock::new(&writes(&[0x00, 0xAF], 9, 1));
            let mut iface = I2cInterface::new(i2c.clone(), ADDR, 4).unwrap();
            assert_eq!(iface.write_byte(0x00, 0xAF, RETRY_FOREVER), Ok(10));
            i2c.done();
        }

        #[test]
        fn read_is_one_write_read_transaction() {
            let mut i2c = I2cMock::new(&[I2cTransaction::write_read(
                ADDR,
                vec![0x75],
                vec![0x68, 0x01],
            )]);
            let mut iface = I2cInterface::new(i2c.clone(), ADDR, 4).unwrap();
            let mut buf = [0u8; 2];
            assert_eq!(iface.read(0x75, &mut buf, 1), Ok(1));
            assert_eq!(buf, [0x68, 0x01]);
            i2c.done();
        }

        #[test]
        fn read_empty_buffer_sends_address_only() {
            let mut i2c = I2cMock::new(&[I2cTransaction::write(ADDR, vec![0x75])]);
            let mut iface = I2cInterface::new(i2c.clone(), ADDR, 4).unwrap();
            assert_eq!(iface.read(0x75, &mut [], 1), Ok(1));
            i2c.done();
        }

        #[test]
        fn read_byte_retries() {
            let mut i2c = I2cMock::new(&[
                failing(I2cTransaction::write_read(ADDR, vec![0x00], vec![0x00])),
                I2cTransaction::write_read(ADDR, vec![0x00], vec![0x43]),
            ]);
            let mut iface = I2cInterface::new(i2c.clone(), ADDR, 4).unwrap();
            assert_eq!(iface.read_byte(0x00, 3), Ok((0x43, 2)));
            i2c.done();
        }

        #[test]
        fn read_gives_up_after_max_tries() {
            let mut i2c = I2cMock::new(&[
                failing(I2cTransaction::write_read(ADDR, vec![0x00], vec![0x00])),
                failing(I2cTransaction::write_read(ADDR, vec![0x00], vec![0x00])),
            ]);
            let mut iface = I2cInterface::new(i2c.clone(), ADDR, 4).unwrap();
            assert_eq!(iface.read_byte(0x00, 2), Err(Error::Bus));
            i2c.done();
        }
    }
}
