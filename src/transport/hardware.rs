use std::thread;
use std::time::{
	Duration,
	Instant,
};

use crate::error::Error;

pub fn reliable_sleep(mut duration: Duration) {
	loop {
		let now = Instant::now();
		thread::sleep(duration);
		let elapsed = now.elapsed();
		if elapsed >= duration {
			return;
		}
		duration -= elapsed;
	}
}

pub trait Transport {
	/// Transmit `data` (starting with the address header) to `bus_address`.
	fn write(&mut self, bus_address: u8, data: &[u8]) -> Result<(), Error>;

	/// Receive `buffer.len()` bytes from `bus_address`.
	fn read(&mut self, bus_address: u8, buffer: &mut [u8]) -> Result<(), Error>;

	// sleep for (at least) `period` microseconds
	fn delay_us(&mut self, period: u32) {
		reliable_sleep(Duration::from_micros(u64::from(period)));
	}
}

impl<'a, T: ?Sized + Transport> Transport for &'a mut T {
	fn write(&mut self, bus_address: u8, data: &[u8]) -> Result<(), Error> {
		T::write(*self, bus_address, data)
	}
	fn read(&mut self, bus_address: u8, buffer: &mut [u8]) -> Result<(), Error> {
		T::read(*self, bus_address, buffer)
	}
	fn delay_us(&mut self, period: u32) {
		T::delay_us(*self, period)
	}
}

impl<T: ?Sized + Transport> Transport for Box<T> {
	fn write(&mut self, bus_address: u8, data: &[u8]) -> Result<(), Error> {
		T::write(self, bus_address, data)
	}
	fn read(&mut self, bus_address: u8, buffer: &mut [u8]) -> Result<(), Error> {
		T::read(self, bus_address, buffer)
	}
	fn delay_us(&mut self, period: u32) {
		T::delay_us(self, period)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reliable_sleep_waits_at_least_duration() {
		let duration = Duration::from_millis(2);
		let start = Instant::now();
		reliable_sleep(duration);
		assert!(start.elapsed() >= duration);
	}
}
