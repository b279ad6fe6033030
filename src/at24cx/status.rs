//! Status-code variants of the device operations.
//!
//! These accept optional handles and buffers and return the raw `i8` status
//! (see [`ReturnCode`](crate::ReturnCode)), for callers bridging to code that
//! expects the numeric C API.

use crate::error::{
	Error,
	ReturnCode,
};
use crate::transport::Transport;

use super::Device;

fn to_status(result: Result<(), Error>) -> i8 {
	match result {
		Ok(()) => ReturnCode::Ok.code(),
		Err(e) => {
			debug!("EEPROM operation failed: {}", e);
			e.code()
		}
	}
}

// page rule is checked by the engine first; only then may a short buffer
// be reported
fn require_len(len: usize, available: usize) -> Result<(), Error> {
	if available < len {
		return Err(Error::ShortBuffer {
			len,
			available,
		});
	}
	Ok(())
}

pub fn erase<T: Transport>(dev: Option<&mut Device<T>>, address: u16, len: u16) -> i8 {
	to_status(match dev {
		None => Err(Error::NullReference),
		Some(dev) => dev.erase(address, len),
	})
}

pub fn write<T: Transport>(dev: Option<&mut Device<T>>, address: u16, data: Option<&[u8]>, len: u16) -> i8 {
	to_status((|| {
		let (dev, data) = match (dev, data) {
			(Some(dev), Some(data)) => (dev, data),
			_ => return Err(Error::NullReference),
		};
		let len = usize::from(len);
		dev.check_transfer(len)?;
		require_len(len, data.len())?;
		dev.write(address, &data[..len])
	})())
}

pub fn read<T: Transport>(dev: Option<&mut Device<T>>, address: u16, data: Option<&mut [u8]>, len: u16) -> i8 {
	to_status((|| {
		let (dev, data) = match (dev, data) {
			(Some(dev), Some(data)) => (dev, data),
			_ => return Err(Error::NullReference),
		};
		let len = usize::from(len);
		dev.check_transfer(len)?;
		require_len(len, data.len())?;
		dev.read(address, &mut data[..len])
	})())
}
