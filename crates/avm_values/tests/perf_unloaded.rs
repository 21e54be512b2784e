use avm_values::{U256, UnloadedDescriptor, UnloadedValue, ValueKind};
use std::time::Instant;

fn bench_scale() -> usize {
    std::env::var("BENCH_SCALE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(100_000)
}

#[test]
#[ignore]
fn perf_construct_and_clone() {
    let scale = bench_scale();
    let t0 = Instant::now();
    let mut inline = Vec::with_capacity(scale);
    for i in 0..scale {
        inline.push(UnloadedValue::new(UnloadedDescriptor::new(
            ValueKind::Tuple,
            U256::from(i as u64),
            U256::from(i as u64 + 1),
        )));
    }
    let t1 = Instant::now();
    let mut heaped = Vec::with_capacity(scale);
    for i in 0..scale {
        heaped.push(UnloadedValue::new(UnloadedDescriptor::new(
            ValueKind::Buffer,
            U256::from(i as u64),
            U256::from(i as u64 + 1),
        )));
    }
    let t2 = Instant::now();
    let cloned: Vec<_> = heaped.iter().cloned().collect();
    let t3 = Instant::now();
    println!(
        "PERF|perf_construct_and_clone|inline_ms={}|heap_ms={}|clone_ms={}",
        (t1 - t0).as_millis(),
        (t2 - t1).as_millis(),
        (t3 - t2).as_millis()
    );
    assert!(inline.iter().all(|v| v.is_inline()));
    assert_eq!(cloned.len(), scale);
}
