use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use libcdli::shell::line::{LINE_CAPACITY, LineAssembler, LineEvent};
use libcdli::shell::rx::{ByteSource, RX_BUFFER_SIZE, RxBuffer};
use libcdli::shell::Error;
use rand::Rng;

#[test]
fn test_fifo_order() {
    let mut rx: RxBuffer = RxBuffer::new();
    for &byte in b"abc" {
        rx.push(byte).unwrap();
    }
    assert_eq!(rx.len(), 3);
    assert_eq!(rx.pull(), Some(b'a'));
    assert_eq!(rx.pull(), Some(b'b'));
    assert_eq!(rx.pull(), Some(b'c'));
    assert_eq!(rx.pull(), None);
    assert!(rx.is_empty());
}

#[test]
fn test_overflow_drops_newest() {
    let mut rx: RxBuffer = RxBuffer::new();
    assert_eq!(rx.capacity(), RX_BUFFER_SIZE - 1);

    for i in 0..RX_BUFFER_SIZE + 9 {
        let result = rx.push(i as u8);
        if i < RX_BUFFER_SIZE - 1 {
            assert_eq!(result, Ok(()));
        } else {
            assert_eq!(result, Err(Error::BufferOverflow));
        }
    }
    assert_eq!(rx.len(), RX_BUFFER_SIZE - 1);
    assert_eq!(rx.dropped(), 10);

    // The oldest bytes survive.
    assert_eq!(rx.pull(), Some(0));
    assert_eq!(rx.pull(), Some(1));
}

#[test]
fn test_split_halves_share_drop_count() {
    let mut rx: RxBuffer<4> = RxBuffer::new();
    let (mut producer, consumer) = rx.split();
    for byte in 0..5 {
        let _ = producer.push(byte);
    }
    assert_eq!(consumer.dropped(), 2);
}

#[test]
fn test_producer_in_other_thread() {
    const SENT: usize = 20_000;

    let mut rx: RxBuffer<64> = RxBuffer::new();
    let (mut producer, mut consumer) = rx.split();
    let done = AtomicBool::new(false);
    let mut received = Vec::new();

    thread::scope(|scope| {
        scope.spawn(|| {
            for i in 0..SENT {
                let _ = producer.push(i as u8);
            }
            done.store(true, Ordering::Release);
        });

        loop {
            let finished = done.load(Ordering::Acquire);
            while let Some(byte) = consumer.pull() {
                received.push(byte);
            }
            if finished && consumer.is_empty() {
                break;
            }
        }
    });

    assert_eq!(received.len() + consumer.dropped(), SENT);
}

#[test]
fn test_random_lines_complete_once() {
    let mut rng = rand::thread_rng();
    let mut assembler = LineAssembler::new();

    for _ in 0..500 {
        let len = rng.gen_range(0..=LINE_CAPACITY - 2);
        // Printable bytes only: no terminator, no backspace.
        let line: Vec<u8> = (0..len).map(|_| rng.gen_range(0x20..0x7F)).collect();

        let mut completed = 0;
        for &byte in line.iter().chain(b"\r\n") {
            match assembler.feed(byte) {
                LineEvent::LineComplete => completed += 1,
                LineEvent::Continue => {}
                event => panic!("unexpected {:?}", event),
            }
        }
        assert_eq!(completed, 1);
        assert_eq!(assembler.line(), Some(line.as_slice()));
    }
}

#[test]
fn test_random_bytes_keep_cursor_bounded() {
    let mut rng = rand::thread_rng();
    let mut assembler = LineAssembler::new();

    for _ in 0..10_000 {
        let byte: u8 = rng.gen_range(0..=u8::MAX);
        assembler.feed(byte);
        assert!(assembler.cursor() <= LINE_CAPACITY);
    }

    // After a reset the noise is gone.
    assembler.reset();
    for &byte in b"help\r\n" {
        assembler.feed(byte);
    }
    assert_eq!(assembler.line(), Some(&b"help"[..]));
}
