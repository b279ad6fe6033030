use crate::error::Error;

use super::Transport;

/// Plain function pointers returning a raw status code (0 on success).
pub type WriteFn = fn(bus_address: u8, data: &[u8]) -> i8;
pub type ReadFn = fn(bus_address: u8, buffer: &mut [u8]) -> i8;
pub type DelayFn = fn(period: u32);

/// Transport built from optional function pointers, for callers that only
/// have status-code based bus primitives.
///
/// A missing `write`/`read` fails with [`Error::NullReference`] when the
/// engine calls it; a missing `delay_us` does nothing.
#[derive(Clone, Copy, Default)]
pub struct FnTransport {
	pub write: Option<WriteFn>,
	pub read: Option<ReadFn>,
	pub delay_us: Option<DelayFn>,
}

impl FnTransport {
	pub fn new(write: WriteFn, read: ReadFn, delay_us: DelayFn) -> Self {
		FnTransport {
			write: Some(write),
			read: Some(read),
			delay_us: Some(delay_us),
		}
	}
}

fn check_status(status: i8) -> Result<(), Error> {
	if 0 == status {
		Ok(())
	} else {
		Err(Error::transport(status))
	}
}

impl Transport for FnTransport {
	fn write(&mut self, bus_address: u8, data: &[u8]) -> Result<(), Error> {
		let write = self.write.ok_or(Error::NullReference)?;
		check_status(write(bus_address, data))
	}

	fn read(&mut self, bus_address: u8, buffer: &mut [u8]) -> Result<(), Error> {
		let read = self.read.ok_or(Error::NullReference)?;
		check_status(read(bus_address, buffer))
	}

	fn delay_us(&mut self, period: u32) {
		if let Some(delay_us) = self.delay_us {
			delay_us(period);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ReturnCode;

	fn write_ok(_: u8, _: &[u8]) -> i8 { 0 }
	fn write_busy(_: u8, _: &[u8]) -> i8 { ReturnCode::Busy.code() }
	fn read_fill(_: u8, buffer: &mut [u8]) -> i8 {
		for b in buffer.iter_mut() {
			*b = 0xa5;
		}
		0
	}
	fn read_odd(_: u8, _: &mut [u8]) -> i8 { -17 }
	fn delay(_: u32) {}

	#[test]
	fn passes_status_codes_through() {
		let mut t = FnTransport::new(write_busy, read_odd, delay);
		assert_eq!(t.write(0xa0, &[0, 0]), Err(Error::transport(-2)));
		let mut buf = [0u8; 4];
		assert_eq!(t.read(0xa1, &mut buf), Err(Error::transport(-17)));
	}

	#[test]
	fn success_and_data() {
		let mut t = FnTransport::new(write_ok, read_fill, delay);
		assert_eq!(t.write(0xa0, &[0, 0]), Ok(()));
		let mut buf = [0u8; 3];
		assert_eq!(t.read(0xa1, &mut buf), Ok(()));
		assert_eq!(buf, [0xa5; 3]);
	}

	#[test]
	fn missing_capabilities() {
		let mut t = FnTransport::default();
		assert_eq!(t.write(0xa0, &[0, 0]), Err(Error::NullReference));
		let mut buf = [0u8; 1];
		assert_eq!(t.read(0xa1, &mut buf), Err(Error::NullReference));
		// no delay function: must not panic
		t.delay_us(10);
	}
}
