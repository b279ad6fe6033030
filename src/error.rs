use std::fmt;

use crate::at24cx::DeviceType;

/// Numeric status values of the C-compatible API.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ReturnCode {
	Ok,
	Error,
	Busy,
	Timeout,
	InvalidParameter,
	NullPointer,
}

impl ReturnCode {
	pub fn code(self) -> i8 {
		match self {
			ReturnCode::Ok => 0,
			ReturnCode::Error => -1,
			ReturnCode::Busy => -2,
			ReturnCode::Timeout => -3,
			ReturnCode::InvalidParameter => -4,
			ReturnCode::NullPointer => -5,
		}
	}

	pub fn from_code(code: i8) -> Option<Self> {
		match code {
			0 => Some(ReturnCode::Ok),
			-1 => Some(ReturnCode::Error),
			-2 => Some(ReturnCode::Busy),
			-3 => Some(ReturnCode::Timeout),
			-4 => Some(ReturnCode::InvalidParameter),
			-5 => Some(ReturnCode::NullPointer),
			_ => None,
		}
	}
}

impl fmt::Display for ReturnCode {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let name = match self {
			ReturnCode::Ok => "ok",
			ReturnCode::Error => "error",
			ReturnCode::Busy => "interface busy",
			ReturnCode::Timeout => "timeout",
			ReturnCode::InvalidParameter => "invalid parameter",
			ReturnCode::NullPointer => "null pointer",
		};
		f.write_str(name)
	}
}

/// Coarse classification of an [`Error`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ErrorKind {
	NullReference,
	InvalidParameter,
	Transport,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Fail)]
pub enum Error {
	/// A required handle, data buffer or transport capability is missing
	#[fail(display = "null reference")]
	NullReference,

	#[fail(display = "invalid device type: {}", _0)]
	InvalidDevice(DeviceType),

	/// Length is zero or larger than a page
	#[fail(display = "invalid transfer length {} (page size is {})", len, page_size)]
	InvalidLength {
		len: usize,
		page_size: u16,
	},

	#[fail(display = "data buffer too short: {} bytes requested, {} available", len, available)]
	ShortBuffer {
		len: usize,
		available: usize,
	},

	/// Raw status reported by the transport, passed through unchanged
	#[fail(display = "transport error: {}", _0)]
	Transport(TransportCode),
}

impl Error {
	pub fn transport(code: i8) -> Self {
		Error::Transport(TransportCode(code))
	}

	pub fn kind(&self) -> ErrorKind {
		match self {
			Error::NullReference => ErrorKind::NullReference,
			Error::InvalidDevice(_) => ErrorKind::InvalidParameter,
			Error::InvalidLength { .. } => ErrorKind::InvalidParameter,
			Error::ShortBuffer { .. } => ErrorKind::InvalidParameter,
			Error::Transport(_) => ErrorKind::Transport,
		}
	}

	pub fn code(&self) -> i8 {
		match self {
			Error::NullReference => ReturnCode::NullPointer.code(),
			Error::InvalidDevice(_)
			| Error::InvalidLength { .. }
			| Error::ShortBuffer { .. } => ReturnCode::InvalidParameter.code(),
			Error::Transport(c) => c.0,
		}
	}
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TransportCode(pub i8);

impl fmt::Display for TransportCode {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match ReturnCode::from_code(self.0) {
			Some(rc) => write!(f, "{} ({})", self.0, rc),
			None => write!(f, "{}", self.0),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn codes_match_c_api() {
		assert_eq!(ReturnCode::Ok.code(), 0);
		assert_eq!(ReturnCode::Timeout.code(), -3);
		assert_eq!(ReturnCode::NullPointer.code(), -5);
		assert_eq!(ReturnCode::from_code(-4), Some(ReturnCode::InvalidParameter));
		assert_eq!(ReturnCode::from_code(-42), None);
	}

	#[test]
	fn errors_map_to_codes() {
		assert_eq!(Error::NullReference.code(), -5);
		assert_eq!(Error::InvalidDevice(DeviceType::Unspecified).code(), -4);
		assert_eq!(Error::InvalidLength { len: 0, page_size: 32 }.code(), -4);
		assert_eq!(Error::transport(-2).code(), -2);
		assert_eq!(Error::transport(-77).code(), -77);
	}

	#[test]
	fn transport_display_names_known_codes() {
		assert_eq!(Error::transport(-3).to_string(), "transport error: -3 (timeout)");
		assert_eq!(Error::transport(-20).to_string(), "transport error: -20");
	}
}
