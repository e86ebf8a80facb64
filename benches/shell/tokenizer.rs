use criterion::{Criterion, Throughput};
use libcdli::shell::tokenizer::tokenize;
use libcdli::shell::{Args, Error, Io, Registry};
use std::hint::black_box;

pub fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    let lines: [&[u8]; 3] = [
        b"status",
        b"set name \"two words\" 42 -v",
        b"   log  \"unterminated quote with spaces",
    ];

    for line in lines {
        group.throughput(Throughput::Bytes(line.len() as u64));
        group.bench_function(String::from_utf8_lossy(line).trim(), |b| {
            b.iter(|| tokenize(black_box(line)).expect("Failed to tokenize"))
        });
    }
    group.finish();
}

fn noop(_io: &mut Io<'_>, _args: &Args) -> Result<(), Error> {
    Ok(())
}

pub fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    let mut registry = Registry::new();
    for i in 0..16 {
        let name = format!("command{}", i).leak();
        registry
            .register_command(name, "Bench command", noop)
            .expect("Failed to register");
    }

    group.bench_function("exact", |b| {
        b.iter(|| registry.lookup(black_box("command15")))
    });
    group.bench_function("abbreviated", |b| {
        b.iter(|| registry.lookup(black_box("rebo")))
    });
    group.bench_function("missing", |b| {
        b.iter(|| registry.lookup(black_box("nothing")))
    });
    group.finish();
}
