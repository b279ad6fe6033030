//! Driver for the AT24Cx family of I²C serial EEPROMs (AT24C32 up to
//! AT24C512).
//!
//! Every operation is limited to a single device page; callers split larger
//! transfers themselves.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

macro_rules! with_context {
	(( $fmt:tt $($t:tt)* ), $e:expr) => {{
		use failure::Error;

		match (|| { $e })() {
			Ok(v) => Ok(v),
			Err(e) => {
				let e: Error = e;
				let msg = format!(concat!($fmt, ": {}") $($t)*, e);
				Err(Error::from(e.context(msg)))
			}
		}
	}};

	($msg:expr, $e:expr) => {
		with_context!(("{}", $msg), $e)
	};
}

pub type AResult<T> = Result<T, failure::Error>;

mod at24cx;
pub mod error;
pub mod linux;
pub mod sim;
pub mod transport;

pub use self::at24cx::{
	BusInterface,
	Device,
	DeviceType,
	Geometry,
	MAX_PAGE_SIZE,
	status,
};

pub use self::error::{
	Error,
	ErrorKind,
	ReturnCode,
};

pub use self::transport::{
	FnTransport,
	Transport,
};
