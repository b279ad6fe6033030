use std::fs;
use std::io::{
	self,
	Read,
	Write,
};
use std::os::unix::io::AsRawFd;
use std::path::Path;

use libc::{
	EBUSY,
	ETIMEDOUT,
	c_ulong,
	ioctl,
};

use crate::error::{
	Error,
	ReturnCode,
};
use crate::transport::Transport;

// from <linux/i2c-dev.h>
const I2C_SLAVE: c_ulong = 0x0703;

/// I²C bus through the Linux `i2c-dev` character device.
#[derive(Debug)]
pub struct I2cDev {
	file: fs::File,
	// currently selected 7-bit slave address
	slave: Option<u8>,
}

fn transport_error(e: &io::Error) -> Error {
	let code = match e.raw_os_error() {
		Some(EBUSY) => ReturnCode::Busy,
		Some(ETIMEDOUT) => ReturnCode::Timeout,
		_ => ReturnCode::Error,
	};
	Error::transport(code.code())
}

impl I2cDev {
	fn select(&mut self, bus_address: u8) -> io::Result<()> {
		let slave = bus_address >> 1;
		if self.slave == Some(slave) {
			return Ok(());
		}

		let res = unsafe {
			ioctl(self.file.as_raw_fd(), I2C_SLAVE as _, c_ulong::from(slave))
		};
		if res < 0 {
			self.slave = None;
			return Err(io::Error::last_os_error());
		}
		self.slave = Some(slave);
		Ok(())
	}

	fn inner_write(&mut self, bus_address: u8, data: &[u8]) -> io::Result<()> {
		self.select(bus_address)?;
		// a single write(2) is a single bus transaction
		let l = self.file.write(data)?;
		if l != data.len() {
			return Err(io::Error::new(io::ErrorKind::Other, "failed to write whole buffer"));
		}
		Ok(())
	}

	fn inner_read(&mut self, bus_address: u8, buffer: &mut [u8]) -> io::Result<()> {
		self.select(bus_address)?;
		let l = self.file.read(buffer)?;
		if l != buffer.len() {
			return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "failed to fill whole buffer"));
		}
		Ok(())
	}
}

impl Transport for I2cDev {
	fn write(&mut self, bus_address: u8, data: &[u8]) -> Result<(), Error> {
		self.inner_write(bus_address, data).map_err(|e| {
			debug!("I2C write to 0x{:02x} ({} bytes) failed: {}", bus_address, data.len(), e);
			transport_error(&e)
		})
	}

	fn read(&mut self, bus_address: u8, buffer: &mut [u8]) -> Result<(), Error> {
		self.inner_read(bus_address, buffer).map_err(|e| {
			debug!("I2C read from 0x{:02x} ({} bytes) failed: {}", bus_address, buffer.len(), e);
			transport_error(&e)
		})
	}
}

pub fn inner_open(path: &Path) -> io::Result<I2cDev> {
	let file = fs::OpenOptions::new()
		.read(true)
		.write(true)
		.open(path)?;

	Ok(I2cDev {
		file,
		slave: None,
	})
}
