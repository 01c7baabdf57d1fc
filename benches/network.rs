use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ttt_nn::nn::BoardEncoder;
use ttt_nn::{
    Board, Example, MoveSelector, NetworkConfig, SeededRng, SelfPlayConfig, SelfPlayHarness,
    SymbolEncoder,
};

fn bench_predict(c: &mut Criterion) {
    let network = NetworkConfig::default().build(&mut SeededRng::new(1));
    let input = SymbolEncoder::default().encode(&Board::new());

    c.bench_function("predict", |b| {
        b.iter(|| network.predict(black_box(&input)))
    });
}

fn bench_back_prop(c: &mut Criterion) {
    let network = NetworkConfig::default().build(&mut SeededRng::new(1));
    let encoder = SymbolEncoder::default();
    let before = Board::new();
    let mut after = before.clone();
    after.play(1, 1).unwrap();
    let data = vec![Example::from_boards(&before, &after, &encoder); 32];

    c.bench_function("back_prop_32", |b| {
        b.iter_batched(
            || network.clone(),
            |mut net| net.back_prop(black_box(&data), 2.0),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_self_play(c: &mut Criterion) {
    let network = NetworkConfig::default().build(&mut SeededRng::new(1));
    let harness = SelfPlayHarness::new(
        MoveSelector::default(),
        SelfPlayConfig::new().with_games(100),
    );

    c.bench_function("self_play_100", |b| b.iter(|| harness.run(black_box(&network))));
}

criterion_group!(benches, bench_predict, bench_back_prop, bench_self_play);
criterion_main!(benches);
