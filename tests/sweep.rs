//! End-to-end sweeps through the public API.

use sdot_bench::prelude::*;

struct Collecting {
    sizes_seen: Vec<usize>,
    sanity_seen: bool,
}

impl ReportSink for Collecting {
    fn sweep(&mut self, report: &SweepReport) -> Result<()> {
        self.sizes_seen = report.sizes.iter().map(|r| r.size).collect();
        Ok(())
    }

    fn sanity(&mut self, _report: &SanityReport) -> Result<()> {
        self.sanity_seen = true;
        Ok(())
    }
}

fn runner(factory: VectorFactory) -> BenchmarkRunner {
    BenchmarkRunner::new(build_registry(), factory, RunnerConfig::default())
}

#[test]
fn sweep_continues_past_failed_allocation() {
    let factory = VectorFactory::new(SeedMode::Fixed(11), FillPolicy::default())
        .with_element_limit(1 << 12);
    let sweep = SweepConfig::new(vec![1 << 10, 1 << 14, 1 << 11, 1 << 12], 3);
    let report = runner(factory).run(&sweep).unwrap();

    let failed: Vec<usize> = report.failures().map(|(size, _)| size).collect();
    assert_eq!(failed, vec![1 << 14]);
    for size in [1 << 10, 1 << 11, 1 << 12] {
        let stats = report.stats_for("reference", size).expect("measured");
        assert_eq!(stats.count, 3);
    }
    assert!(matches!(
        report.size(1 << 14).unwrap().outcome,
        SizeOutcome::Failed(BenchError::Allocation { .. })
    ));
}

#[test]
fn sink_receives_report_in_sweep_order() {
    let factory = VectorFactory::new(SeedMode::Fixed(3), FillPolicy::default());
    let mut sink = Collecting {
        sizes_seen: Vec::new(),
        sanity_seen: false,
    };
    let sweep = SweepConfig::new(vec![300, 100, 200], 2);
    runner(factory).run_with_sink(&sweep, &mut sink).unwrap();
    assert_eq!(sink.sizes_seen, vec![300, 100, 200]);

    let registry = build_registry();
    let sanity = run_sanity_check(&registry, 3).unwrap();
    sink.sanity(&sanity).unwrap();
    assert!(sink.sanity_seen);
    assert!(sanity.passed());
}

#[test]
fn fixed_seed_reproduces_results() {
    let sweep = SweepConfig::new(vec![2048], 1);
    let first = runner(VectorFactory::new(SeedMode::Fixed(5), FillPolicy::FullRange))
        .run(&sweep)
        .unwrap();
    let second = runner(VectorFactory::new(SeedMode::Fixed(5), FillPolicy::FullRange))
        .run(&sweep)
        .unwrap();
    let results = |r: &SweepReport| -> Vec<u32> {
        r.sizes[0].kernels().iter().map(|k| k.result.to_bits()).collect()
    };
    assert_eq!(results(&first), results(&second));
}

#[test]
fn invalid_sweep_is_an_error_not_a_report() {
    let factory = VectorFactory::new(SeedMode::Fixed(1), FillPolicy::default());
    let err = runner(factory).run(&SweepConfig::new(vec![64], 0)).unwrap_err();
    assert!(matches!(err, BenchError::Config(_)));
}

#[test]
fn csv_export_contains_every_sample() {
    let factory = VectorFactory::new(SeedMode::Fixed(8), FillPolicy::default());
    let mut runner = runner(factory);
    let kernel_count = runner.registry().len();
    let report = runner.run(&SweepConfig::new(vec![64, 128], 4)).unwrap();

    let mut csv = CsvSink::new(Vec::new());
    csv.sweep(&report).unwrap();
    let text = String::from_utf8(csv.into_inner()).unwrap();
    assert_eq!(text.lines().count(), 1 + kernel_count * 2 * 4);
}
