use gt511c3::{DeviceConfig, Error, Gt511c3, RxTimeout, TEMPLATE_SIZE};
use std::{env, thread, time::Duration};

mod pc_utils;
use pc_utils::{print_ports, SerialUart, HOST_BASE_ADDRESS};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => print_ports(),
        2 => run_identify(args[1].as_str()),
        3 => dump_template(args[1].as_str(), args[2].parse::<u32>().unwrap()),
        _ => panic!("Usage: pc_identify [port_name] [template_id]"),
    };
}

fn open(port_name: &str) -> Gt511c3<SerialUart> {
    println!("Using port {}", port_name);
    let uart = SerialUart::open(port_name).unwrap();
    let mut scanner = Gt511c3::new(uart);
    let config = DeviceConfig::new(HOST_BASE_ADDRESS, 0).with_rx_timeout(RxTimeout::Polls(50));
    scanner.open(&config, false).unwrap();
    scanner
}

fn run_identify(port_name: &str) {
    let mut scanner = open(port_name);
    scanner.set_led(true).unwrap();

    println!("Place your finger on the sensor");
    while !scanner.is_press_finger().unwrap() {
        thread::sleep(Duration::from_millis(100));
    }

    scanner.capture_finger(false).unwrap();
    match scanner.identify() {
        Ok(id) => println!("Matched ID {}", id),
        Err(Error::AccessDenied) => println!("No match"),
        Err(Error::NoData) => println!("The database is empty"),
        Err(e) => println!("Error: {:#?}", e),
    };

    scanner.set_led(false).unwrap();
    scanner.close().unwrap();
}

fn dump_template(port_name: &str, id: u32) {
    let mut scanner = open(port_name);

    let mut template = [0u8; TEMPLATE_SIZE];
    match scanner.get_template(id, &mut template) {
        Ok(()) => {
            for row in template.chunks(32) {
                for byte in row {
                    print!("{:02x}", byte);
                }
                println!();
            }
        }
        Err(e) => println!("Error: {:#?}", e),
    };

    scanner.close().unwrap();
}
