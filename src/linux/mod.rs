use std::path::Path;

mod i2c_dev;

pub use self::i2c_dev::I2cDev;

pub fn open_i2c_bus<P: AsRef<Path>>(path: P) -> crate::AResult<I2cDev> {
	let path = path.as_ref();
	with_context!(("couldn't open I2C bus {}", path.display()), {
		Ok(i2c_dev::inner_open(path)?)
	})
}

pub fn open_i2c_bus_number(bus: u32) -> crate::AResult<I2cDev> {
	open_i2c_bus(format!("/dev/i2c-{}", bus))
}
