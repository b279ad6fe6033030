use std::fmt;
use std::str;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Geometry {
	/// bytes
	pub capacity: u32,
	pub num_pages: u16,
	/// bytes
	pub page_size: u16,
}

/// Largest page size of all supported parts.
pub const MAX_PAGE_SIZE: usize = 128;

// indexed by `DeviceType as usize`
static GEOMETRY: [Geometry; 5] = [
	Geometry { capacity: 4096, num_pages: 128, page_size: 32 },   // AT24C32
	Geometry { capacity: 8192, num_pages: 256, page_size: 32 },   // AT24C64
	Geometry { capacity: 16384, num_pages: 256, page_size: 64 },  // AT24C128
	Geometry { capacity: 32768, num_pages: 512, page_size: 64 },  // AT24C256
	Geometry { capacity: 65536, num_pages: 512, page_size: 128 }, // AT24C512
];

/// Supported memory parts.
///
/// `Unspecified` marks a misconfigured handle; it has no geometry and every
/// operation on it fails with an invalid parameter error.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum DeviceType {
	At24c32 = 0,
	At24c64,
	At24c128,
	At24c256,
	At24c512,
	Unspecified,
}

impl DeviceType {
	pub const ALL: [DeviceType; 5] = [
		DeviceType::At24c32,
		DeviceType::At24c64,
		DeviceType::At24c128,
		DeviceType::At24c256,
		DeviceType::At24c512,
	];

	/// Anything at or beyond the sentinel maps to `Unspecified`.
	pub fn from_raw(id: u8) -> Self {
		match id {
			0 => DeviceType::At24c32,
			1 => DeviceType::At24c64,
			2 => DeviceType::At24c128,
			3 => DeviceType::At24c256,
			4 => DeviceType::At24c512,
			_ => DeviceType::Unspecified,
		}
	}

	pub fn geometry(self) -> Option<&'static Geometry> {
		GEOMETRY.get(self as usize)
	}

	fn part_number(self) -> Option<u16> {
		match self {
			DeviceType::At24c32 => Some(32),
			DeviceType::At24c64 => Some(64),
			DeviceType::At24c128 => Some(128),
			DeviceType::At24c256 => Some(256),
			DeviceType::At24c512 => Some(512),
			DeviceType::Unspecified => None,
		}
	}
}

impl fmt::Display for DeviceType {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self.part_number() {
			Some(n) => write!(f, "AT24C{}", n),
			None => f.write_str("unspecified"),
		}
	}
}

impl str::FromStr for DeviceType {
	type Err = ::failure::Error;

	// accepts "AT24C512", "24c512" and "512" (case insensitive)
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let lower = s.to_ascii_lowercase();
		let digits = lower.trim_start_matches("at").trim_start_matches("24c");

		let number = with_context!(("invalid EEPROM type: {:?}", s),
			Ok(digits.parse::<u16>()?)
		)?;

		match DeviceType::ALL.iter().find(|t| t.part_number() == Some(number)) {
			Some(t) => Ok(*t),
			None => bail!("unsupported EEPROM type: {:?}", s),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn table_is_consistent() {
		for t in DeviceType::ALL.iter() {
			let g = t.geometry().unwrap();
			assert_eq!(g.capacity, u32::from(g.num_pages) * u32::from(g.page_size), "{}", t);
			assert!(usize::from(g.page_size) <= MAX_PAGE_SIZE);
			assert!(g.capacity <= 0x1_0000, "{} not addressable with 16 bits", t);
		}
		assert_eq!(
			DeviceType::ALL.iter().map(|t| t.geometry().unwrap().page_size).max(),
			Some(MAX_PAGE_SIZE as u16)
		);
	}

	#[test]
	fn sentinel_has_no_geometry() {
		assert_eq!(DeviceType::Unspecified.geometry(), None);
		assert_eq!(DeviceType::from_raw(5), DeviceType::Unspecified);
		assert_eq!(DeviceType::from_raw(0xff), DeviceType::Unspecified);
		assert_eq!(DeviceType::from_raw(4), DeviceType::At24c512);
	}

	#[test]
	fn at24c512_geometry() {
		let g = DeviceType::At24c512.geometry().unwrap();
		assert_eq!(*g, Geometry { capacity: 65536, num_pages: 512, page_size: 128 });
	}

	#[test]
	fn parse_names() {
		assert_eq!("AT24C512".parse::<DeviceType>().unwrap(), DeviceType::At24c512);
		assert_eq!("24c32".parse::<DeviceType>().unwrap(), DeviceType::At24c32);
		assert_eq!("128".parse::<DeviceType>().unwrap(), DeviceType::At24c128);
		assert!("24c1024".parse::<DeviceType>().is_err());
		assert!("eeprom".parse::<DeviceType>().is_err());
		assert_eq!(DeviceType::At24c256.to_string(), "AT24C256");
	}
}
