//! In-memory AT24Cx model speaking the bus protocol.

use crate::at24cx::{
	DeviceType,
	Geometry,
};
use crate::error::{
	Error,
	ReturnCode,
};
use crate::transport::Transport;

pub struct SimulatedEeprom {
	/// 7-bit address the part answers to
	address: u8,
	page_size: usize,
	memory: Vec<u8>,
	pointer: usize,
}

impl SimulatedEeprom {
	// only geometries from the device table: page size and capacity are non-zero
	fn new(address: u8, geometry: &Geometry) -> Self {
		SimulatedEeprom {
			address,
			page_size: usize::from(geometry.page_size),
			memory: vec![0xff; geometry.capacity as usize],
			pointer: 0,
		}
	}

	pub fn for_device(address: u8, id: DeviceType) -> crate::AResult<Self> {
		match id.geometry() {
			Some(g) => Ok(Self::new(address, g)),
			None => bail!("can't simulate {} EEPROM", id),
		}
	}

	pub fn memory(&self) -> &[u8] {
		&self.memory
	}

	fn nack(&self, bus_address: u8) -> Error {
		debug!("simulated EEPROM 0x{:02x}: NACK for bus address 0x{:02x}", self.address, bus_address);
		Error::transport(ReturnCode::Error.code())
	}

	fn is_addressed(&self, bus_address: u8, read: bool) -> bool {
		bus_address >> 1 == self.address && (0 != bus_address & 0x01) == read
	}
}

impl Transport for SimulatedEeprom {
	fn write(&mut self, bus_address: u8, data: &[u8]) -> Result<(), Error> {
		if !self.is_addressed(bus_address, false) || data.len() < 2 {
			return Err(self.nack(bus_address));
		}

		// upper address bits beyond the capacity are "don't care"
		let address = usize::from(u16::from_be_bytes([data[0], data[1]])) % self.memory.len();
		let payload = &data[2..];

		// data rolls over within the addressed page
		let page_start = address - address % self.page_size;
		let mut column = address - page_start;
		for b in payload {
			self.memory[page_start + column] = *b;
			column = (column + 1) % self.page_size;
		}
		self.pointer = page_start + column;
		if payload.is_empty() {
			self.pointer = address;
		}

		debug!("simulated EEPROM 0x{:02x}: wrote {} bytes at 0x{:04x}", self.address, payload.len(), address);
		Ok(())
	}

	fn read(&mut self, bus_address: u8, buffer: &mut [u8]) -> Result<(), Error> {
		if !self.is_addressed(bus_address, true) {
			return Err(self.nack(bus_address));
		}

		debug!("simulated EEPROM 0x{:02x}: read {} bytes at 0x{:04x}", self.address, buffer.len(), self.pointer);
		// sequential reads wrap around the whole memory
		for b in buffer.iter_mut() {
			*b = self.memory[self.pointer];
			self.pointer = (self.pointer + 1) % self.memory.len();
		}
		Ok(())
	}

	// no internal write cycle to wait for
	fn delay_us(&mut self, _period: u32) {
	}
}
