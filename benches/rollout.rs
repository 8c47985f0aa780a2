use retrosynth::adapter::mock::MockAdapter;
use retrosynth::{Config, Engine};

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        building_tree_one_step_route,
        building_tree_branching_route,
}

fn synthetic_adapter() -> MockAdapter {
    MockAdapter::new()
        .with_templates("TARGET", vec![0.6, 0.3, 0.1], vec![1, 2, 3])
        .with_outcomes("TARGET", 1, vec![vec!["A".to_string()]])
        .with_outcomes("TARGET", 2, vec![vec!["B".to_string()]])
        .with_outcomes("TARGET", 3, vec![vec!["C".to_string()]])
        .with_filter_score("A", "TARGET", 0.9)
        .with_filter_score("B", "TARGET", 0.9)
        .with_filter_score("C", "TARGET", 0.9)
        .with_price("A", Some(5.0))
        .with_price("B", Some(5.0))
        .with_price("C", Some(5.0))
}

fn building_tree_one_step_route(c: &mut criterion::Criterion) {
    c.bench_function("build_tree over a single-reaction target", |b| {
        b.iter(|| {
            let mut engine = Engine::new(synthetic_adapter(), Config {
                expansion_time: std::time::Duration::from_millis(5),
                ..Config::default()
            });
            engine.build_tree("TARGET").unwrap();
        })
    });
}

fn building_tree_branching_route(c: &mut criterion::Criterion) {
    c.bench_function("build_tree with three competing templates", |b| {
        b.iter(|| {
            let mut engine = Engine::new(synthetic_adapter(), Config {
                expansion_time: std::time::Duration::from_millis(20),
                max_branching: 3,
                ..Config::default()
            });
            engine.build_tree("TARGET").unwrap();
        })
    });
}
