//! Bus access for the EEPROM engine.
//!
//! Addresses handed to a transport are already shifted: the 7-bit device
//! address occupies bits 7..1, bit 0 is clear for writes and set for reads.

mod function;
mod hardware;

pub use self::function::{
	DelayFn,
	FnTransport,
	ReadFn,
	WriteFn,
};

pub use self::hardware::{
	Transport,
	reliable_sleep,
};
