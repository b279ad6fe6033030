//! AT24Cx I²C serial EEPROM protocol
//!
//! Every memory access starts with a write transfer carrying the 16-bit
//! memory address, high byte first:
//! - page write: address followed by up to one page of data; bytes beyond
//!   the end of the page would roll over to the start of the same page, so
//!   transfers are limited to a single page.
//! - random / sequential read: write the address only, then a read transfer
//!   from the same device (R/W bit set).
//!
//! "Erasing" is a page write of 0xff bytes.

mod geometry;
pub mod status;

pub use self::geometry::{
	DeviceType,
	Geometry,
	MAX_PAGE_SIZE,
};

use crate::error::Error;
use crate::transport::Transport;

const ADDRESS_BYTES: usize = 2;
const ERASED: u8 = 0xff;

fn frame_address(address: u16) -> [u8; ADDRESS_BYTES] {
	address.to_be_bytes()
}

pub struct BusInterface<T> {
	/// 7-bit device address, unshifted
	pub address: u8,
	pub transport: T,
}

impl<T> BusInterface<T> {
	pub fn new(address: u8, transport: T) -> Self {
		BusInterface {
			address,
			transport,
		}
	}

	pub fn write_address(&self) -> u8 {
		self.address << 1
	}

	pub fn read_address(&self) -> u8 {
		(self.address << 1) | 0x01
	}
}

pub struct Device<T> {
	pub interface: BusInterface<T>,
	pub id: DeviceType,
}

impl<T: Transport> Device<T> {
	pub fn new(interface: BusInterface<T>, id: DeviceType) -> Self {
		Device {
			interface,
			id,
		}
	}

	pub fn geometry(&self) -> Result<&'static Geometry, Error> {
		self.id.geometry().ok_or(Error::InvalidDevice(self.id))
	}

	// device type first, then 0 < len <= page size
	fn check_transfer(&self, len: usize) -> Result<&'static Geometry, Error> {
		let geometry = self.geometry()?;
		if 0 == len || len > usize::from(geometry.page_size) {
			return Err(Error::InvalidLength {
				len,
				page_size: geometry.page_size,
			});
		}
		Ok(geometry)
	}

	// write header + payload in a single transfer
	fn program(&mut self, address: u16, len: usize, fill: impl FnOnce(&mut [u8])) -> Result<(), Error> {
		let mut buf = [0u8; ADDRESS_BYTES + MAX_PAGE_SIZE];
		let frame = &mut buf[..ADDRESS_BYTES + len];
		frame[..ADDRESS_BYTES].copy_from_slice(&frame_address(address));
		fill(&mut frame[ADDRESS_BYTES..]);

		let bus_address = self.interface.write_address();
		trace!("{}: write 0x{:04x} ({} bytes) via 0x{:02x}", self.id, address, len, bus_address);
		self.interface.transport.write(bus_address, frame)
	}

	/// Set `len` bytes starting at `address` to 0xff.
	pub fn erase(&mut self, address: u16, len: u16) -> Result<(), Error> {
		let len = usize::from(len);
		self.check_transfer(len)?;
		self.program(address, len, |payload| {
			for b in payload.iter_mut() {
				*b = ERASED;
			}
		})
	}

	/// Write `data` (at most one page) to `address`.
	///
	/// Returns as soon as the transfer is done; the device still needs its
	/// internal write cycle before it responds again.
	pub fn write(&mut self, address: u16, data: &[u8]) -> Result<(), Error> {
		self.check_transfer(data.len())?;
		self.program(address, data.len(), |payload| payload.copy_from_slice(data))
	}

	/// Fill `data` (at most one page) from `address`.
	///
	/// The content of `data` is unspecified on error.
	pub fn read(&mut self, address: u16, data: &mut [u8]) -> Result<(), Error> {
		self.check_transfer(data.len())?;

		let header = frame_address(address);
		let bus_address = self.interface.write_address();
		trace!("{}: select 0x{:04x} via 0x{:02x}", self.id, address, bus_address);
		self.interface.transport.write(bus_address, &header)?;

		let bus_address = self.interface.read_address();
		trace!("{}: read {} bytes via 0x{:02x}", self.id, data.len(), bus_address);
		self.interface.transport.read(bus_address, data)
	}
}
