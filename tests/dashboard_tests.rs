use approx::assert_relative_eq;
use ecotech_dashboard::charts::{ChartBuilder, ChartSpec};
use ecotech_dashboard::config::{DashboardSettings, DataPolicy};
use ecotech_dashboard::data::{
    column_f64, column_i32, column_str, Dataset, DatasetGenerator, PRODUCT, PRODUCTS,
    PRODUCTION_FACTOR, REGION, REGIONS, ROWS_PER_COMBINATION, SALES, TOTAL_PRODUCTION, YEAR, YEARS,
};
use ecotech_dashboard::gui::{ChartContent, EcoTechApp};
use ecotech_dashboard::selection::Visualization;
use polars::prelude::*;

#[test]
fn same_seed_gives_identical_table() {
    let a = Dataset::generate(42).unwrap();
    let b = Dataset::generate(42).unwrap();
    assert!(a.records().equals(b.records()));
    assert!(a.aggregate().equals(b.aggregate()));
    assert_eq!(DatasetGenerator::records(7), DatasetGenerator::records(7));
}

#[test]
fn row_count_covers_every_combination() {
    let ds = Dataset::generate(42).unwrap();
    let expected = YEARS.len() * REGIONS.len() * PRODUCTS.len() * ROWS_PER_COMBINATION;
    assert_eq!(expected, 1000);
    assert_eq!(ds.records().height(), expected);
}

#[test]
fn aggregate_has_one_row_per_region_product() {
    let ds = Dataset::generate(42).unwrap();
    let agg = ds.aggregate();
    assert_eq!(agg.height(), REGIONS.len() * PRODUCTS.len());

    let sales = column_f64(agg, SALES).unwrap();
    let total = column_f64(agg, TOTAL_PRODUCTION).unwrap();
    for (s, t) in sales.iter().zip(&total) {
        assert_eq!(*t, s * PRODUCTION_FACTOR);
    }

    let regions = column_str(agg, REGION).unwrap();
    let mut sorted = regions.clone();
    sorted.sort();
    assert_eq!(regions, sorted);
}

#[test]
fn year_and_region_filter_keeps_only_matching_rows() {
    let ds = Dataset::generate(42).unwrap();
    let subset = ds
        .filter(col(YEAR).eq(lit(2023)).and(col(REGION).eq(lit("North America"))))
        .unwrap();
    assert_eq!(subset.height(), PRODUCTS.len() * ROWS_PER_COMBINATION);
    assert!(column_i32(&subset, YEAR).unwrap().iter().all(|&y| y == 2023));
    assert!(column_str(&subset, REGION)
        .unwrap()
        .iter()
        .all(|r| r == "North America"));
    let products = column_str(&subset, PRODUCT).unwrap();
    for p in PRODUCTS {
        assert_eq!(products.iter().filter(|x| *x == p).count(), ROWS_PER_COMBINATION);
    }
}

#[test]
fn polar_theta_follows_year_rank() {
    let ds = Dataset::generate(42).unwrap();
    let spec = ChartBuilder::polar_winds(&ds).unwrap();
    let step = 360.0 / YEARS.len() as f64;

    for (year, theta) in spec.years.iter().zip(&spec.year_thetas) {
        let rank = YEARS.iter().position(|y| y == year).unwrap();
        assert_relative_eq!(*theta, step * rank as f64);
    }

    let mut thetas = spec.year_thetas.clone();
    thetas.sort_by(f64::total_cmp);
    thetas.dedup();
    assert_eq!(thetas.len(), YEARS.len());

    for series in &spec.series {
        assert_eq!(series.r.len(), YEARS.len());
        assert!(series.r.iter().all(|&r| r <= spec.radial_max));
    }
}

#[test]
fn every_label_builds_its_own_chart() {
    let ds = Dataset::generate(42).unwrap();
    for viz in Visualization::ALL {
        assert_eq!(Visualization::from_label(viz.label()), Some(viz));
        let spec = viz.build(&ds).unwrap();
        assert_eq!(spec.visualization(), viz);
    }
}

#[test]
fn exported_json_is_tagged_by_kind() {
    let ds = Dataset::generate(42).unwrap();
    let spec = Visualization::Sunburst.build(&ds).unwrap();
    let json = spec.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["kind"], "sunburst");
    assert!(matches!(spec, ChartSpec::Sunburst(_)));
}

#[test]
fn cached_policy_generates_once() {
    let mut app = EcoTechApp::with_settings(DashboardSettings::default());
    assert_eq!(app.generations(), 1);
    for viz in Visualization::ALL {
        app.select(viz);
    }
    assert_eq!(app.generations(), 1);
    assert!(matches!(app.chart_viewer().content, ChartContent::Chart(_)));
}

#[test]
fn regenerate_policy_generates_every_cycle() {
    let settings = DashboardSettings {
        data_policy: DataPolicy::RegeneratePerCycle,
        ..DashboardSettings::default()
    };
    let mut app = EcoTechApp::with_settings(settings);
    app.select(Visualization::PolarWinds);
    app.select(Visualization::Sunburst);
    assert_eq!(app.generations(), 3);
}

#[test]
fn seed_change_regenerates_cached_dataset() {
    let mut app = EcoTechApp::with_settings(DashboardSettings::default());
    let settings = DashboardSettings {
        seed: 7,
        ..app.settings().clone()
    };
    app.apply_settings(settings);
    assert_eq!(app.generations(), 2);
    assert_eq!(app.settings().seed, 7);
}
