use gt511c3::{DeviceConfig, EnrollStage, Error, Gt511c3, RxTimeout, Uart};
use std::{env, thread, time::Duration};

mod pc_utils;
use pc_utils::{print_ports, SerialUart, HOST_BASE_ADDRESS};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => print_ports(),
        2 => print_enroll_count(args[1].as_str()),
        3 => enroll_to_id(args[1].as_str(), args[2].parse::<u32>().unwrap()),
        _ => panic!("Usage: pc_enrollment [port_name] [id]"),
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

fn print_enroll_count(port_name: &str) {
    let mut scanner = open(port_name);
    match scanner.enroll_count() {
        Ok(count) => println!("Enrolled fingerprints: {}", count),
        Err(e) => println!("Error: {:#?}", e),
    };
    scanner.close().unwrap();
}

fn wait_for_finger<U: Uart>(scanner: &mut Gt511c3<U>, pressed: bool) {
    while scanner.is_press_finger().unwrap() != pressed {
        thread::sleep(Duration::from_millis(100));
    }
}

fn enroll_to_id(port_name: &str, id: u32) {
    let mut scanner = open(port_name);

    match scanner.check_enrolled(id) {
        Ok(true) => panic!("ID {} is already enrolled", id),
        Ok(false) => {}
        Err(e) => panic!("Error: {:#?}", e),
    }

    scanner.set_led(true).unwrap();
    scanner.enroll_start(id).unwrap();

    let stages = [EnrollStage::First, EnrollStage::Second, EnrollStage::Third];
    for (i, stage) in stages.iter().enumerate() {
        println!("{}. Place your finger on the sensor", i + 1);
        wait_for_finger(&mut scanner, true);

        match scanner
            .capture_finger(true)
            .and_then(|_| scanner.enroll(*stage))
        {
            Ok(()) => println!("Captured"),
            Err(Error::BadState) => panic!("Bad capture: {:?}", scanner.last_status()),
            Err(e) => panic!("Error: {:#?}", e),
        }

        println!("Lift your finger");
        wait_for_finger(&mut scanner, false);
    }

    println!("Enrolled as ID {}", id);
    scanner.set_led(false).unwrap();
    scanner.close().unwrap();
}
