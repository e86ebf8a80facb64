use criterion::{Criterion, Throughput};
use libcdli::platform::Platform;
use libcdli::shell::rx::RxBuffer;
use libcdli::shell::{Args, Config, Error, Io, Shell};
use std::hint::black_box;

struct BenchBoard;

impl Platform for BenchBoard {
    fn reset(&mut self) {}

    fn version(&self) -> &str {
        "bench"
    }

    fn board_info(&self) -> &str {
        "bench board"
    }
}

fn sum(io: &mut Io<'_>, args: &Args) -> Result<(), Error> {
    let mut total: i32 = 0;
    for param in args.params() {
        total += param.parse::<i32>().map_err(|_| Error::InvalidParameters)?;
    }
    io.line_fmt(format_args!("{}", total));
    Ok(())
}

fn setup_shell<'a>() -> Shell<'a, impl FnMut(&[u8]), BenchBoard> {
    let sink = |bytes: &[u8]| {
        black_box(bytes);
    };
    let mut shell = Shell::initialize(sink, BenchBoard, Config::new("bench"));
    shell
        .register_command("sum", "Add the parameters", sum)
        .expect("Failed to register");
    shell
}

pub fn bench_input(c: &mut Criterion) {
    let mut group = c.benchmark_group("input");
    let script: &[u8] = b"sum 1 2 3 4\r\nstat\r\nfoo\r\nhelp\r\n";
    group.throughput(Throughput::Bytes(script.len() as u64));

    group.bench_function("script", |b| {
        b.iter_batched_ref(
            setup_shell,
            |shell| shell.input(black_box(script)),
            criterion::BatchSize::SmallInput,
        )
    });
    group.finish();
}

pub fn bench_poll(c: &mut Criterion) {
    let mut group = c.benchmark_group("poll");
    let line: &[u8] = b"sum \"10\" 20 30\r\n";
    group.throughput(Throughput::Bytes(line.len() as u64 * 10));

    group.bench_function("rx_buffer", |b| {
        let mut shell = setup_shell();
        let mut rx: RxBuffer = RxBuffer::new();
        let (mut producer, mut consumer) = rx.split();
        b.iter(|| {
            for _ in 0..10 {
                for &byte in line {
                    producer.push(byte).expect("Failed to push");
                }
            }
            shell.poll(&mut consumer)
        })
    });
    group.finish();
}
