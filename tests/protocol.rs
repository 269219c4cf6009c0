mod common;

use common::{ack, data, nack, MockUart};
use gt511c3::{
    checksum, Command, DataFrame, DeviceStatus, Error, Protocol, ResponseFrame, ResponseKind,
    RxTimeout, MAX_PAYLOAD_SIZE,
};

#[test]
fn send_command_writes_one_packet_and_returns_ack_parameter() {
    let (uart, wire) = MockUart::new();
    wire.borrow_mut().queue(&ack(42));
    let mut protocol = Protocol::new(uart);

    assert_eq!(protocol.send_command(Command::GetEnrollCount, 0), Ok(42));

    let wire = wire.borrow();
    assert_eq!(
        wire.written,
        vec![0x55, 0xAA, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x20, 0x00, 0x20, 0x01]
    );
    assert_eq!(wire.reads, 12);
}

#[test]
fn written_checksum_covers_first_ten_bytes() {
    let (uart, wire) = MockUart::new();
    wire.borrow_mut().queue(&ack(0));
    let mut protocol = Protocol::new(uart);

    protocol
        .send_command(Command::Verify, 0x00C7_FFFF)
        .unwrap();

    let wire = wire.borrow();
    let sent = &wire.written;
    let trailer = u16::from_le_bytes([sent[10], sent[11]]);
    assert_eq!(trailer, checksum(&sent[..10]));
}

#[test]
fn nack_fails_with_translated_status() {
    let (uart, wire) = MockUart::new();
    wire.borrow_mut().queue(&nack(0x1009));
    let mut protocol = Protocol::new(uart);

    assert_eq!(
        protocol.send_command(Command::Enroll3, 0),
        Err(Error::OutOfMemory)
    );
    assert_eq!(protocol.last_status(), Some(DeviceStatus::DbIsFull));
}

#[test]
fn nack_carrying_success_is_still_a_failure() {
    let (uart, wire) = MockUart::new();
    wire.borrow_mut().queue(&nack(0));
    let mut protocol = Protocol::new(uart);

    assert_eq!(protocol.send_command(Command::Open, 0), Err(Error::Generic));
}

#[test]
fn last_status_is_cleared_by_the_next_command() {
    let (uart, wire) = MockUart::new();
    wire.borrow_mut().queue(&nack(0x1008));
    wire.borrow_mut().queue(&ack(0));
    let mut protocol = Protocol::new(uart);

    assert_eq!(
        protocol.send_command(Command::Identify, 0),
        Err(Error::AccessDenied)
    );
    assert_eq!(protocol.last_status(), Some(DeviceStatus::IdentifyFailed));
    assert_eq!(protocol.send_command(Command::Identify, 0), Ok(0));
    assert_eq!(protocol.last_status(), None);
}

#[test]
fn any_single_bit_flip_in_a_response_is_a_communication_error() {
    let valid = ack(0x0102_0304);
    for byte in 0..valid.len() {
        for bit in 0..8 {
            let mut corrupted = valid;
            corrupted[byte] ^= 1 << bit;

            let (uart, wire) = MockUart::new();
            wire.borrow_mut().queue(&corrupted);
            let mut protocol = Protocol::new(uart);

            assert_eq!(
                protocol.receive_response(),
                Err(Error::Communication),
                "byte {} bit {}",
                byte,
                bit
            );
        }
    }
}

#[test]
fn wrong_start_codes_with_valid_checksum_are_rejected() {
    let mut bytes = ack(0);
    bytes[0] = 0x5A;
    bytes[1] = 0xA5;
    let chk = checksum(&bytes[..10]).to_le_bytes();
    bytes[10] = chk[0];
    bytes[11] = chk[1];

    let (uart, wire) = MockUart::new();
    wire.borrow_mut().queue(&bytes);
    let mut protocol = Protocol::new(uart);

    assert_eq!(protocol.receive_response(), Err(Error::Communication));
}

#[test]
fn unknown_response_kind_is_rejected() {
    let bytes = ResponseFrame::encode(ResponseKind::Unknown(0x32), 0).to_bytes();
    let (uart, wire) = MockUart::new();
    wire.borrow_mut().queue(&bytes);
    let mut protocol = Protocol::new(uart);

    assert_eq!(protocol.receive_response(), Err(Error::Communication));
}

#[test]
fn receive_data_returns_payload() {
    let payload: Vec<u8> = (0..=255u8).cycle().take(498).collect();
    let (uart, wire) = MockUart::new();
    wire.borrow_mut().queue(&data(&payload));
    let mut protocol = Protocol::new(uart);

    assert_eq!(protocol.receive_data(498), Ok(&payload[..]));
    assert_eq!(wire.borrow().reads, DataFrame::frame_size(498));
}

#[test]
fn receive_data_checksum_wraps() {
    let payload = vec![0xFFu8; 4096];
    let (uart, wire) = MockUart::new();
    wire.borrow_mut().queue(&data(&payload));
    let mut protocol = Protocol::new(uart);

    assert_eq!(protocol.receive_data(4096).map(|p| p.len()), Ok(4096));
}

#[test]
fn receive_data_refuses_oversized_frames_without_reading() {
    let (uart, wire) = MockUart::new();
    wire.borrow_mut().queue(&ack(0));
    let mut protocol = Protocol::new(uart);

    assert_eq!(
        protocol.receive_data(MAX_PAYLOAD_SIZE + 1),
        Err(Error::BufferTooSmall)
    );
    assert_eq!(protocol.receive_data(256 * 256), Err(Error::BufferTooSmall));
    assert_eq!(wire.borrow().reads, 0);
}

#[test]
fn receive_data_rejects_packet_start_codes() {
    let mut frame = data(&[1, 2, 3, 4]);
    frame[0] = 0x55;
    frame[1] = 0xAA;
    let len = frame.len();
    let chk = checksum(&frame[..len - 2]).to_le_bytes();
    frame[len - 2] = chk[0];
    frame[len - 1] = chk[1];

    let (uart, wire) = MockUart::new();
    wire.borrow_mut().queue(&frame);
    let mut protocol = Protocol::new(uart);

    assert_eq!(protocol.receive_data(4), Err(Error::Communication));
}

#[test]
fn receive_data_rejects_bad_checksum() {
    let mut frame = data(&[1, 2, 3, 4]);
    frame[5] ^= 0x10;

    let (uart, wire) = MockUart::new();
    wire.borrow_mut().queue(&frame);
    let mut protocol = Protocol::new(uart);

    assert_eq!(protocol.receive_data(4), Err(Error::Communication));
}

#[test]
fn receive_exact_needs_room_for_a_checksum() {
    let (uart, _wire) = MockUart::new();
    let mut protocol = Protocol::new(uart);

    assert_eq!(protocol.receive_exact(1), Err(Error::BadParameters));
}

#[test]
fn polling_timeout_gives_up() {
    let (uart, wire) = MockUart::new();
    {
        let mut wire = wire.borrow_mut();
        wire.starve = true;
        wire.queue(&ack(0)[..5]);
    }
    let mut protocol = Protocol::new(uart);
    protocol.set_rx_timeout(RxTimeout::Polls(10));

    assert_eq!(protocol.receive_response(), Err(Error::Communication));
    let wire = wire.borrow();
    assert_eq!(wire.reads, 5);
    assert_eq!(wire.would_blocks, 10);
}

#[test]
fn polling_timeout_reads_ready_bytes() {
    let (uart, wire) = MockUart::new();
    wire.borrow_mut().queue(&ack(9));
    let mut protocol = Protocol::new(uart);
    protocol.set_rx_timeout(RxTimeout::Polls(1));

    assert_eq!(protocol.receive_response().map(|r| r.parameter), Ok(9));
}

#[test]
fn uart_failure_is_a_communication_error() {
    let (uart, wire) = MockUart::new();
    wire.borrow_mut().queue(&ack(0)[..7]);
    let mut protocol = Protocol::new(uart);

    assert_eq!(
        protocol.send_command(Command::Open, 0),
        Err(Error::Communication)
    );
}
