use at24cx::sim::SimulatedEeprom;
use at24cx::{
	BusInterface,
	Device,
	DeviceType,
	ErrorKind,
	ReturnCode,
	status,
};

fn simulated(id: DeviceType) -> Device<SimulatedEeprom> {
	let eeprom = SimulatedEeprom::for_device(0x50, id).unwrap();
	Device::new(BusInterface::new(0x50, eeprom), id)
}

// erase, zero and read back every page, one call per page
#[test]
fn whole_device_page_by_page() {
	let mut dev = simulated(DeviceType::At24c512);
	let geometry = *dev.geometry().unwrap();
	let page = usize::from(geometry.page_size);

	for i in 0..u32::from(geometry.num_pages) {
		let address = (i * u32::from(geometry.page_size)) as u16;
		dev.erase(address, geometry.page_size).unwrap();
	}
	assert!(dev.interface.transport.memory().iter().all(|b| *b == 0xff));

	let zeros = vec![0u8; page];
	for i in 0..u32::from(geometry.num_pages) {
		let address = (i * u32::from(geometry.page_size)) as u16;
		dev.write(address, &zeros).unwrap();
	}

	let mut buf = vec![0xaau8; page];
	for i in 0..u32::from(geometry.num_pages) {
		let address = (i * u32::from(geometry.page_size)) as u16;
		dev.read(address, &mut buf).unwrap();
		assert!(buf.iter().all(|b| *b == 0), "page {} not zeroed", i);
	}
}

#[test]
fn status_api_on_simulated_part() {
	let mut dev = simulated(DeviceType::At24c512);
	let data: Vec<u8> = (0..128u32).map(|b| b as u8).collect();

	assert_eq!(status::write(Some(&mut dev), 0x0000, Some(&data), 128), ReturnCode::Ok.code());
	let mut buf = [0u8; 128];
	assert_eq!(status::read(Some(&mut dev), 0x0000, Some(&mut buf), 128), ReturnCode::Ok.code());
	assert_eq!(&buf[..], &data[..]);

	assert_eq!(status::erase(Some(&mut dev), 0x00, 129), ReturnCode::InvalidParameter.code());

	dev.id = DeviceType::Unspecified;
	assert_eq!(status::erase(Some(&mut dev), 0x00, 128), ReturnCode::InvalidParameter.code());
	assert_eq!(status::write(Some(&mut dev), 0x00, Some(&data), 128), ReturnCode::InvalidParameter.code());
	assert_eq!(status::read(Some(&mut dev), 0x00, Some(&mut buf), 128), ReturnCode::InvalidParameter.code());
}

#[test]
fn wrong_bus_address_is_a_transport_error() {
	let eeprom = SimulatedEeprom::for_device(0x50, DeviceType::At24c32).unwrap();
	let mut dev = Device::new(BusInterface::new(0x51, eeprom), DeviceType::At24c32);

	let err = dev.write(0, &[1, 2, 3]).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Transport);
	assert_eq!(err.code(), ReturnCode::Error.code());

	let mut buf = [0u8; 4];
	assert_eq!(dev.read(0, &mut buf).unwrap_err().kind(), ErrorKind::Transport);
}

#[test]
fn smaller_parts_ignore_upper_address_bits() {
	let mut dev = simulated(DeviceType::At24c32);
	dev.write(0x1000, &[0x42]).unwrap();

	let mut buf = [0u8; 1];
	dev.read(0x0000, &mut buf).unwrap();
	assert_eq!(buf, [0x42]);
}
