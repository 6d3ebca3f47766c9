use covreport::aggregator::{Accumulator, ExclusionFilter, Summary};
use covreport::parser::{read_profile, BlockRecord, RawUnit};
use covreport::report::{
    evaluate_threshold, generate_report, generate_report_from_file, sort_summaries, Metric,
    ReportOptions, SortKey, SortOrder, ThresholdStatus,
};
use covreport::utils::Configuration;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::path::PathBuf;

const ROOT: &str = "github.com/acme/shop";

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn options(root: &str, exclusions: &[&str], package_mode: bool) -> ReportOptions {
    ReportOptions {
        root: root.to_string(),
        exclusions: ExclusionFilter::new(exclusions).unwrap(),
        package_mode,
        ..Default::default()
    }
}

fn names(report: &covreport::report::Report) -> Vec<&str> {
    report.files.iter().map(|s| s.name.as_str()).collect()
}

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("coverage should be defined");
    assert!((actual - expected).abs() < 0.01, "{actual} != {expected}");
}

#[test]
fn test_two_file_scenario() {
    let units = vec![
        RawUnit::new("a.go", vec![BlockRecord::new(4, 1), BlockRecord::new(2, 0)]),
        RawUnit::new("b.go", vec![BlockRecord::new(3, 1)]),
    ];

    let report = generate_report(units, &ReportOptions::default());

    assert_eq!(report.total.blocks, 3);
    assert_eq!(report.total.stmts, 9);
    assert_eq!(report.total.covered_stmts, 7);
    assert_close(report.total.block_coverage, 66.67);
    assert_close(report.total.stmt_coverage, 77.78);
    assert_eq!(names(&report), vec!["a.go", "b.go"]);
}

#[test]
fn test_report_from_fixture() {
    let report =
        generate_report_from_file(fixture("sample_coverage.out"), &ReportOptions::default())
            .unwrap();

    assert_eq!(report.total.blocks, 10);
    assert_eq!(report.total.stmts, 26);
    assert_eq!(report.total.missing_blocks, 4);
    assert_eq!(report.total.missing_stmts, 12);
    assert_close(report.total.block_coverage, 60.0);
    assert_eq!(report.files.len(), 4);
}

#[test]
fn test_fixture_root_and_exclusions() {
    let opts = options(ROOT, &["/vendor/**"], false);
    let report = generate_report_from_file(fixture("sample_coverage.out"), &opts).unwrap();

    assert_eq!(names(&report), vec!["/cart/cart.go", "/cart/price.go", "/main.go"]);
    assert_eq!(report.total.blocks, 8);
    assert_eq!(report.total.stmts, 16);
    assert_close(report.total.block_coverage, 75.0);
    assert_close(report.total.stmt_coverage, 87.5);
}

#[test]
fn test_fixture_package_mode() {
    let opts = options(ROOT, &[], true);
    let report = generate_report_from_file(fixture("sample_coverage.out"), &opts).unwrap();

    assert_eq!(names(&report), vec![".", "./cart", "./vendor/lib"]);

    let cart = &report.files[1];
    assert_eq!(cart.blocks, 5);
    assert_eq!(cart.stmts, 10);
    assert_eq!(cart.missing_blocks, 1);
    assert_eq!(cart.missing_stmts, 1);
}

#[test]
fn test_fixture_sorted_by_missing_stmts_desc() {
    let opts = ReportOptions {
        sort_key: SortKey::MissingStmts,
        sort_order: SortOrder::Desc,
        ..options(ROOT, &[], false)
    };
    let report = generate_report_from_file(fixture("sample_coverage.out"), &opts).unwrap();

    assert_eq!(report.files[0].name, "/vendor/lib/lib.go");
    assert_eq!(report.files[0].missing_stmts, 10);
    // Sorting never reorders the total into the rows
    assert_eq!(report.total.name, "Total");
}

#[test]
fn test_fixture_threshold() {
    let config = Configuration {
        root: ROOT.to_string(),
        exclusions: vec!["/vendor/**".to_string()],
        ..Default::default()
    };
    let opts = ReportOptions::from_config(&config, "filename", "asc", false).unwrap();
    let report = generate_report_from_file(fixture("sample_coverage.out"), &opts).unwrap();

    assert!(evaluate_threshold(&report.total, Metric::Block, 75.0).passed());
    assert!(!evaluate_threshold(&report.total, Metric::Block, 75.1).passed());
    assert!(evaluate_threshold(&report.total, Metric::Stmt, 87.5).passed());
}

#[test]
fn test_fully_excluded_profile_is_undefined() {
    let opts = options(ROOT, &["**"], false);
    let report = generate_report_from_file(fixture("sample_coverage.out"), &opts).unwrap();

    assert!(report.files.is_empty());
    assert_eq!(report.total.block_coverage, None);

    let result = evaluate_threshold(&report.total, Metric::Block, 10.0);
    assert_eq!(result.status, ThresholdStatus::Undefined);
    assert!(!result.passed());
}

#[test]
fn test_missing_fixture_is_parse_error() {
    let err =
        generate_report_from_file(fixture("nope.out"), &ReportOptions::default()).unwrap_err();
    assert!(err.to_string().contains("coverprofile"));
}

#[test]
fn test_read_profile_fixture_sorted() {
    let units = read_profile(fixture("sample_coverage.out")).unwrap();
    let unit_names: Vec<&str> = units.iter().map(|u| u.name.as_str()).collect();

    let mut sorted = unit_names.clone();
    sorted.sort();
    assert_eq!(unit_names, sorted);
}

// Property tests

fn arb_units() -> impl Strategy<Value = Vec<RawUnit>> {
    let dirs = prop::sample::select(vec!["", "pkg/", "pkg/sub/", "vendor/", "internal/"]);
    let files = prop::sample::select(vec!["a.go", "b.go", "c.go"]);
    let block =
        (0u32..20, prop_oneof![Just(0u64), 1u64..5]).prop_map(|(s, c)| BlockRecord::new(s, c));
    let unit = (dirs, files, prop::collection::vec(block, 0..6))
        .prop_map(|(dir, file, blocks)| RawUnit::new(format!("{dir}{file}"), blocks));
    prop::collection::vec(unit, 0..12)
}

fn arb_sort_key() -> impl Strategy<Value = SortKey> {
    prop::sample::select(vec![
        SortKey::Filename,
        SortKey::Package,
        SortKey::Block,
        SortKey::Stmt,
        SortKey::MissingBlocks,
        SortKey::MissingStmts,
    ])
}

proptest! {
    #[test]
    fn prop_per_key_sums_equal_total(units in arb_units(), package_mode in any::<bool>()) {
        let report = generate_report(units, &options("", &[], package_mode));

        let sum = |field: fn(&Summary) -> u64| report.files.iter().map(field).sum::<u64>();

        prop_assert_eq!(sum(|s| s.blocks), report.total.blocks);
        prop_assert_eq!(sum(|s| s.stmts), report.total.stmts);
        prop_assert_eq!(sum(|s| s.covered_blocks), report.total.covered_blocks);
        prop_assert_eq!(sum(|s| s.covered_stmts), report.total.covered_stmts);
    }

    #[test]
    fn prop_keys_unique(units in arb_units(), package_mode in any::<bool>()) {
        let report = generate_report(units, &options("", &[], package_mode));
        let mut keys: Vec<&str> = report.files.iter().map(|s| s.name.as_str()).collect();
        let count = keys.len();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), count);
    }

    #[test]
    fn prop_coverage_within_bounds(units in arb_units()) {
        let report = generate_report(units, &ReportOptions::default());

        for summary in report.files.iter().chain(std::iter::once(&report.total)) {
            prop_assert!(summary.missing_blocks <= summary.blocks);
            prop_assert!(summary.missing_stmts <= summary.stmts);
            prop_assert_eq!(summary.block_coverage.is_some(), summary.blocks > 0);
            prop_assert_eq!(summary.stmt_coverage.is_some(), summary.stmts > 0);
            for coverage in [summary.block_coverage, summary.stmt_coverage].into_iter().flatten() {
                prop_assert!((0.0..=100.0).contains(&coverage));
            }
        }
    }

    #[test]
    fn prop_desc_equals_reversed_asc(units in arb_units(), key in arb_sort_key()) {
        let report = generate_report(units, &ReportOptions::default());

        let mut asc = report.files.clone();
        sort_summaries(&mut asc, key, SortOrder::Asc);
        asc.reverse();

        let mut desc = report.files.clone();
        sort_summaries(&mut desc, key, SortOrder::Desc);

        prop_assert_eq!(asc, desc);
    }

    #[test]
    fn prop_exclusion_is_monotonic(units in arb_units()) {
        let without = generate_report(units.clone(), &ReportOptions::default());
        let with = generate_report(units, &options("", &["vendor/*"], false));

        prop_assert!(with.total.blocks <= without.total.blocks);
        prop_assert!(with.total.stmts <= without.total.stmts);
        prop_assert!(with.files.iter().all(|s| !s.name.starts_with("vendor/")));
    }

    #[test]
    fn prop_results_idempotent(blocks in prop::collection::vec((0u32..10, 0u64..3), 0..20)) {
        let mut acc = Accumulator::new("unit");
        for (stmts, count) in blocks {
            acc.add_block(&BlockRecord::new(stmts, count));
        }
        prop_assert_eq!(acc.results(), acc.results());
    }
}
