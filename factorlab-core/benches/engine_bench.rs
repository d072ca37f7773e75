//! Engine throughput: a five-symbol inverse-vol backtest over ten years.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use factorlab_core::algos::{Rebalance, RunQuarterly, SelectAll, Strategy, WeighInvVol};
use factorlab_core::data::{align_symbols, synthetic_prices};
use factorlab_core::engine::run_backtest;
use std::collections::HashMap;

fn ten_year_frame() -> factorlab_core::domain::PriceFrame {
    let symbols = ["vlue", "qual", "mtum", "size", "usmv"];
    let start = NaiveDate::from_ymd_opt(2010, 1, 4).unwrap();
    let end = NaiveDate::from_ymd_opt(2019, 12, 31).unwrap();

    let mut series = HashMap::new();
    for sym in symbols {
        series.insert(sym.to_string(), synthetic_prices(sym, start, end));
    }
    let order: Vec<String> = symbols.iter().map(|s| s.to_string()).collect();
    align_symbols(&series, &order)
}

fn bench_inv_vol_backtest(c: &mut Criterion) {
    let frame = ten_year_frame();
    let strategy = Strategy::new(
        "InvVol",
        vec![
            Box::new(RunQuarterly),
            Box::new(SelectAll),
            Box::new(WeighInvVol::default()),
            Box::new(Rebalance),
        ],
    );

    c.bench_function("inv_vol_backtest_10y_5sym", |b| {
        b.iter(|| run_backtest(black_box(&strategy), black_box(&frame), 100_000.0))
    });
}

criterion_group!(benches, bench_inv_vol_backtest);
criterion_main!(benches);
