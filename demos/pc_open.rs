use gt511c3::{DeviceConfig, Gt511c3, RxTimeout};
use std::env;

mod pc_utils;
use pc_utils::{print_ports, SerialUart, HOST_BASE_ADDRESS};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => print_ports(),
        2 => run_open(args[1].as_str()),
        _ => panic!("Usage: pc_open [port_name]"),
    };
}

fn run_open(port_name: &str) {
    println!("Using port {}", port_name);
    let uart = SerialUart::open(port_name).unwrap();
    let mut scanner = Gt511c3::new(uart);

    // 50 polls of 100 ms each
    let config = DeviceConfig::new(HOST_BASE_ADDRESS, 0).with_rx_timeout(RxTimeout::Polls(50));

    println!("1. Opening with device info");
    match scanner.open(&config, true) {
        Ok(Some(info)) => {
            println!("Firmware version: {:#010x}", info.firmware_version);
            println!("ISO area max size: {}", info.iso_area_max_size);
            print!("Serial number: ");
            for byte in info.serial_number.iter() {
                print!("{:02x}", byte);
            }
            println!();
        }
        Ok(None) => println!("No device info returned"),
        Err(e) => panic!("Error: {:#?}", e),
    };

    println!("2. Blinking the LED");
    scanner.set_led(true).unwrap();
    scanner.set_led(false).unwrap();

    println!("3. Closing");
    if let Err(e) = scanner.close() {
        println!("Close reported: {}", e);
    }
}
