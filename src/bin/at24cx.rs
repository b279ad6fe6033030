#[macro_use]
extern crate clap;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

extern crate at24cx;
use at24cx::*;

use std::process::exit;

use failure::ResultExt;

// maximum internal write cycle time (tWR) of the whole family
const WRITE_CYCLE_US: u32 = 5_000;

type Eeprom = Device<Box<dyn Transport>>;

fn parse_number(s: &str) -> AResult<u32> {
	if s.starts_with("0x") || s.starts_with("0X") {
		Ok(u32::from_str_radix(&s[2..], 16)?)
	} else {
		Ok(s.parse::<u32>()?)
	}
}

fn get_number(matches: &clap::ArgMatches, name: &str, default: Option<u32>) -> AResult<u32> {
	let param = match (matches.value_of(name), default) {
		(Some(p), _) => p,
		(None, Some(d)) => return Ok(d),
		(None, None) => bail!("missing parameter {}", name),
	};
	parse_number(param).map_err(|e| {
		let msg = format!("invalid parameter {}: {}", name, e);
		e.context(msg).into()
	})
}

fn parse_hex(s: &str) -> AResult<Vec<u8>> {
	let s = s.trim_start_matches("0x");
	ensure!(s.bytes().all(|b| b.is_ascii_hexdigit()), "invalid hex data: {:?}", s);
	ensure!(0 == s.len() % 2, "odd number of hex digits: {:?}", s);
	let mut data = Vec::with_capacity(s.len() / 2);
	for i in (0..s.len()).step_by(2) {
		let byte = s.get(i..i + 2).ok_or_else(|| format_err!("invalid hex data: {:?}", s))?;
		data.push(u8::from_str_radix(byte, 16).context(format!("invalid hex byte {:?}", byte))?);
	}
	Ok(data)
}

fn open_device(matches: &clap::ArgMatches) -> AResult<Eeprom> {
	let id: DeviceType = matches.value_of("device").unwrap_or("24c512").parse()?;
	let address = get_number(matches, "address", Some(0x50))?;
	ensure!(address < 0x80, "not a 7-bit I2C address: 0x{:x}", address);
	let address = address as u8;

	let transport: Box<dyn Transport> = match matches.value_of("bus") {
		Some(bus) => match bus.parse::<u32>() {
			Ok(number) => Box::new(linux::open_i2c_bus_number(number)?),
			Err(_) => Box::new(linux::open_i2c_bus(bus)?),
		},
		None => {
			info!("No I2C bus given, using a simulated {}", id);
			Box::new(sim::SimulatedEeprom::for_device(address, id)?)
		},
	};

	Ok(Device::new(BusInterface::new(address, transport), id))
}

// make sure [start, start+len) lies within the device
fn check_range(geometry: &Geometry, start: u32, len: u32) -> AResult<()> {
	ensure!(start < geometry.capacity, "address 0x{:x} beyond capacity ({} bytes)", start, geometry.capacity);
	ensure!(len <= geometry.capacity - start, "range 0x{:x}+{} beyond capacity ({} bytes)", start, len, geometry.capacity);
	Ok(())
}

// single page operations must not wrap around within the page
fn check_page(geometry: &Geometry, address: u32, len: u32) -> AResult<()> {
	let page_size = u32::from(geometry.page_size);
	let room = page_size - address % page_size;
	ensure!(len <= room, "range 0x{:x}+{} crosses a page boundary (page size {}, {} bytes left in page)", address, len, page_size, room);
	Ok(())
}

fn page_address(geometry: &Geometry, page: u16) -> u16 {
	(u32::from(page) * u32::from(geometry.page_size)) as u16
}

fn hexdump(start: u32, data: &[u8]) {
	for (i, b) in data.iter().enumerate() {
		if 0 == i % 16 {
			print!("{:08x} ", start as usize + i);
		} else if 0 == i % 8 {
			print!(" ");
		}
		print!(" {:02x}", b);
		if 15 == i % 16 {
			println!();
		}
	}
	if 0 != data.len() % 16 {
		println!();
	}
}

fn info(dev: &Eeprom) -> AResult<()> {
	let geometry = dev.geometry()?;
	println!("Device: {}", dev.id);
	println!("Device Capacity: {} bytes", geometry.capacity);
	println!("Number of pages: {} pages", geometry.num_pages);
	println!("Page size: {} bytes", geometry.page_size);
	Ok(())
}

fn demo(dev: &mut Eeprom) -> AResult<()> {
	info(dev)?;
	let geometry = dev.geometry()?;

	info!("Erasing {} pages", geometry.num_pages);
	for page in 0..geometry.num_pages {
		let address = page_address(geometry, page);
		dev.erase(address, geometry.page_size).context(format!("erasing page at 0x{:04x}", address))?;
		dev.interface.transport.delay_us(WRITE_CYCLE_US);
	}

	info!("Writing zeros");
	let zeros = vec![0u8; usize::from(geometry.page_size)];
	for page in 0..geometry.num_pages {
		let address = page_address(geometry, page);
		dev.write(address, &zeros).context(format!("writing page at 0x{:04x}", address))?;
		dev.interface.transport.delay_us(WRITE_CYCLE_US);
	}

	info!("Reading back");
	let mut buf = vec![0xffu8; usize::from(geometry.page_size)];
	for page in 0..geometry.num_pages {
		let address = page_address(geometry, page);
		dev.read(address, &mut buf).context(format!("reading page at 0x{:04x}", address))?;
		if let Some(offset) = buf.iter().position(|b| *b != 0) {
			bail!("Verify failed at 0x{:04x}: expected 00, EEPROM is {:02x}", usize::from(address) + offset, buf[offset]);
		}
	}

	println!("Verified {} bytes", geometry.capacity);
	Ok(())
}

fn read_range<T: Transport>(dev: &mut Device<T>, start: u32, len: u32) -> AResult<Vec<u8>> {
	let geometry = dev.geometry()?;
	check_range(geometry, start, len)?;

	let page_size = u32::from(geometry.page_size);
	let mut data = Vec::with_capacity(len as usize);
	let mut address = start;
	while address < start + len {
		// never cross a page boundary
		let chunk = (page_size - address % page_size).min(start + len - address);
		let mut buf = vec![0u8; chunk as usize];
		dev.read(address as u16, &mut buf).context(format!("reading 0x{:04x}", address))?;
		data.extend_from_slice(&buf);
		address += chunk;
	}
	Ok(data)
}

fn erase_in_page<T: Transport>(dev: &mut Device<T>, address: u32, len: u32) -> AResult<()> {
	let geometry = dev.geometry()?;
	check_range(geometry, address, len)?;
	check_page(geometry, address, len)?;

	dev.erase(address as u16, len as u16)?;
	dev.interface.transport.delay_us(WRITE_CYCLE_US);
	Ok(())
}

fn write_in_page<T: Transport>(dev: &mut Device<T>, address: u32, data: &[u8]) -> AResult<()> {
	let geometry = dev.geometry()?;
	ensure!(data.len() <= usize::from(geometry.page_size), "{} bytes don't fit in a page ({} bytes)", data.len(), geometry.page_size);
	check_range(geometry, address, data.len() as u32)?;
	check_page(geometry, address, data.len() as u32)?;

	dev.write(address as u16, data)?;
	dev.interface.transport.delay_us(WRITE_CYCLE_US);
	Ok(())
}

fn dump(dev: &mut Eeprom, sub_m: &clap::ArgMatches) -> AResult<()> {
	let geometry = dev.geometry()?;
	let start = get_number(sub_m, "START", Some(0))?;
	let len = get_number(sub_m, "LENGTH", Some(geometry.capacity.saturating_sub(start)))?;

	let data = read_range(dev, start, len)?;
	hexdump(start, &data);
	Ok(())
}

fn erase(dev: &mut Eeprom, sub_m: &clap::ArgMatches) -> AResult<()> {
	let geometry = dev.geometry()?;
	let address = get_number(sub_m, "ADDRESS", None)?;
	let page_size = u32::from(geometry.page_size);
	// default: up to the end of the page
	let len = get_number(sub_m, "LENGTH", Some(page_size - address % page_size))?;

	erase_in_page(dev, address, len)?;
	info!("Erased {} bytes at 0x{:04x}", len, address);
	Ok(())
}

fn write(dev: &mut Eeprom, sub_m: &clap::ArgMatches) -> AResult<()> {
	let address = get_number(sub_m, "ADDRESS", None)?;
	let data = match sub_m.value_of("DATA") {
		Some(d) => parse_hex(d)?,
		None => bail!("missing parameter DATA"),
	};

	write_in_page(dev, address, &data)?;
	info!("Wrote {} bytes at 0x{:04x}", data.len(), address);
	Ok(())
}

fn main_app() -> AResult<()> {
	let matches = clap_app!(@app (app_from_crate!())
		(@setting SubcommandRequiredElseHelp)
		(global_setting: clap::AppSettings::VersionlessSubcommands)
		(@arg device: -d --device +takes_value "EEPROM type (24c32, 24c64, 24c128, 24c256, 24c512; default 24c512)")
		(@arg address: -a --address +takes_value "7-bit I2C address (default 0x50)")
		(@arg bus: -b --bus +takes_value "I2C bus device or number (e.g. /dev/i2c-1 or 1); simulates an EEPROM if missing")
		(@subcommand info =>
			(about: "show EEPROM geometry")
		)
		(@subcommand demo =>
			(about: "erase, zero and verify the whole EEPROM page by page")
		)
		(@subcommand dump =>
			(about: "hex dump EEPROM contents")
			(@arg START: "first address to dump (default 0)")
			(@arg LENGTH: "number of bytes to dump (default: up to the end)")
		)
		(@subcommand erase =>
			(about: "erase (set to 0xff) bytes within a single page")
			(@arg ADDRESS: +required "first address to erase")
			(@arg LENGTH: "number of bytes to erase (default: up to the end of the page)")
		)
		(@subcommand write =>
			(about: "write bytes within a single page")
			(@arg ADDRESS: +required "address to write to")
			(@arg DATA: +required "data as hex string (e.g. deadbeef)")
		)
	).get_matches();

	let mut dev = open_device(&matches)?;

	match matches.subcommand() {
		("info", _) => {
			info(&dev)
		}
		("demo", _) => {
			demo(&mut dev)
		}
		("dump", Some(sub_m)) => {
			dump(&mut dev, sub_m)
		}
		("erase", Some(sub_m)) => {
			erase(&mut dev, sub_m)
		}
		("write", Some(sub_m)) => {
			write(&mut dev, sub_m)
		}
		("", _) => bail!("no subcommand"),
		(cmd, _) => bail!("not implemented subcommand {:?}", cmd),
	}
}

fn main() {
	env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();

	if let Err(e) = main_app() {
		error!("Error: {}", e);
		exit(1);
	}
}
