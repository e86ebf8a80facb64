use criterion::{criterion_group, criterion_main};

mod shell;

criterion_group!(
    benches,
    shell::tokenizer::bench_tokenize,
    shell::tokenizer::bench_lookup,
    shell::dispatch::bench_input,
    shell::dispatch::bench_poll
);
criterion_main!(benches);
