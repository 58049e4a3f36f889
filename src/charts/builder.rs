//! Chart Builder Module
//! Pure functions from the dataset to one chart specification each.

use super::colors::{midpoint_range, product_color, series_color, value_range};
use super::specs::*;
use super::ChartError;
use crate::data::{
    column_f64, column_i32, column_str, Aggregator, Dataset, CO2_REDUCTION, LATITUDE, LONGITUDE,
    PRODUCT, PRODUCTION_COST, REGION, SALES, SATISFACTION, WEIGHTED_SATISFACTION, YEAR,
};
use crate::stats::{ContourTracer, DensityEstimator, StatsCalculator};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::f64::consts::TAU;
use tracing::debug;

pub const FOCUS_REGION: &str = "North America";
pub const SATISFACTION_YEAR: i32 = 2023;
pub const BATTERY_YEAR: i32 = 2021;
pub const BATTERY_PRODUCT: &str = "Eco Batteries";

const DENSITY_GRID_SIZE: usize = 48;
const CONTOUR_LEVELS: usize = 8;
const HISTOGRAM_BINS: usize = 20;
const VIOLIN_POINTS: usize = 64;
const POLAR_BAR_WIDTH: f64 = 15.0;
const POLAR_HEADROOM: f64 = 1.1;
const COLOR_MIDPOINT: f64 = 0.5;

/// Distinct values in first-seen order.
fn first_seen<T: PartialEq + Clone>(values: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for v in values {
        if !out.contains(v) {
            out.push(v.clone());
        }
    }
    out
}

fn push_node(
    nodes: &mut Vec<SunburstNode>,
    label: String,
    path: String,
    parent: Option<usize>,
    depth: usize,
) -> usize {
    nodes.push(SunburstNode {
        label,
        path,
        parent,
        depth,
        sales: 0.0,
        satisfaction: 0.0,
        start_angle: 0.0,
        sweep: 0.0,
    });
    nodes.len() - 1
}

pub struct ChartBuilder;

impl ChartBuilder {
    /// Angular position of each year: `360 / years.len() * rank`, where rank
    /// is the year's position in ascending order.
    pub fn year_thetas(years: &[i32]) -> Vec<f64> {
        let mut sorted = years.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        let step = 360.0 / sorted.len().max(1) as f64;
        years
            .iter()
            .map(|y| {
                let rank = sorted.binary_search(y).unwrap_or(0);
                step * rank as f64
            })
            .collect()
    }

    /// Sales funnel from the Region/Product aggregate.
    pub fn sales_funnel(ds: &Dataset) -> Result<FunnelSpec, ChartError> {
        let agg = ds.aggregate();
        let regions = column_str(agg, REGION)?;
        let products = column_str(agg, PRODUCT)?;
        let sales = column_f64(agg, SALES)?;

        let region_order = first_seen(&regions);
        let mut by_product: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for ((region, product), s) in regions.iter().zip(&products).zip(&sales) {
            let row = by_product
                .entry(product.clone())
                .or_insert_with(|| vec![0.0; region_order.len()]);
            if let Some(idx) = region_order.iter().position(|r| r == region) {
                row[idx] += s;
            }
        }
        if by_product.is_empty() {
            return Err(ChartError::EmptySubset {
                chart: "Sales Funnel",
            });
        }

        let mut stages: Vec<FunnelStage> = by_product
            .into_iter()
            .map(|(product, sales)| FunnelStage {
                total: sales.iter().sum(),
                product,
                sales,
            })
            .collect();
        stages.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(stages = stages.len(), regions = region_order.len(), "built sales funnel");
        Ok(FunnelSpec {
            title: "Sales Funnel".to_string(),
            regions: region_order,
            stages,
        })
    }

    /// Production_Cost vs CO2_Reduction density for North America.
    pub fn density_flow(ds: &Dataset) -> Result<DensitySpec, ChartError> {
        let subset = ds.filter(col(REGION).eq(lit(FOCUS_REGION)))?;
        if subset.height() == 0 {
            return Err(ChartError::EmptySubset {
                chart: "Density Flow",
            });
        }
        let xs = column_f64(&subset, PRODUCTION_COST)?;
        let ys = column_f64(&subset, CO2_REDUCTION)?;

        let grid = DensityEstimator::kde_2d(&xs, &ys, DENSITY_GRID_SIZE);
        let levels = ContourTracer::levels(&grid, CONTOUR_LEVELS);
        let contours = ContourTracer::trace_all(&grid, &levels);

        debug!(points = xs.len(), levels = contours.len(), "built density flow");
        Ok(DensitySpec {
            title: "EcoTech Density Flow - North America".to_string(),
            x_label: "Production Cost ($)".to_string(),
            y_label: "CO₂ Reduction (tons)".to_string(),
            x_histogram: StatsCalculator::histogram(&xs, HISTOGRAM_BINS),
            y_histogram: StatsCalculator::histogram(&ys, HISTOGRAM_BINS),
            points: xs.into_iter().zip(ys).map(|(x, y)| [x, y]).collect(),
            grid,
            contours,
        })
    }

    /// Satisfaction violins per Product for North America in 2023.
    pub fn customer_satisfaction(ds: &Dataset) -> Result<ViolinSpec, ChartError> {
        let subset = ds.filter(
            col(YEAR)
                .eq(lit(SATISFACTION_YEAR))
                .and(col(REGION).eq(lit(FOCUS_REGION))),
        )?;
        let products = column_str(&subset, PRODUCT)?;
        let satisfaction = column_f64(&subset, SATISFACTION)?;

        let violins: Vec<Violin> = first_seen(&products)
            .into_iter()
            .filter_map(|product| {
                let values: Vec<f64> = products
                    .iter()
                    .zip(&satisfaction)
                    .filter(|(p, _)| **p == product)
                    .map(|(_, &v)| v)
                    .collect();
                let summary = StatsCalculator::box_summary(&values)?;
                let h = DensityEstimator::silverman_bandwidth(&values);
                let support = DensityEstimator::support(&values, 2.0 * h, VIOLIN_POINTS);
                let density = DensityEstimator::kde(&values, h, &support);
                Some(Violin {
                    product,
                    values,
                    support,
                    density,
                    summary,
                })
            })
            .collect();

        if violins.is_empty() {
            return Err(ChartError::EmptySubset {
                chart: "Customer Satisfaction",
            });
        }
        debug!(violins = violins.len(), "built customer satisfaction");
        Ok(ViolinSpec {
            title: "Customer Satisfaction by Product - North America".to_string(),
            violins,
        })
    }

    /// Region x Year pivot of summed Sales.
    pub fn sales_surface(ds: &Dataset) -> Result<SurfaceSpec, ChartError> {
        let pivot = Aggregator::sales_by_region_year(ds.records())?;
        let regions = column_str(&pivot, REGION)?;
        let years = column_i32(&pivot, YEAR)?;
        let sales = column_f64(&pivot, SALES)?;

        let row_keys = first_seen(&regions);
        let mut col_keys = first_seen(&years);
        col_keys.sort_unstable();
        if row_keys.is_empty() || col_keys.is_empty() {
            return Err(ChartError::EmptySubset {
                chart: "Sales Surface",
            });
        }

        let mut matrix = vec![vec![0.0; col_keys.len()]; row_keys.len()];
        for ((region, year), s) in regions.iter().zip(&years).zip(&sales) {
            let r = row_keys.iter().position(|k| k == region);
            let c = col_keys.iter().position(|k| k == year);
            if let (Some(r), Some(c)) = (r, c) {
                matrix[r][c] = *s;
            }
        }

        debug!(rows = row_keys.len(), cols = col_keys.len(), "built sales surface");
        Ok(SurfaceSpec {
            regions: row_keys,
            years: col_keys,
            sales: matrix,
        })
    }

    /// Longitude/Latitude/Sales scatter with one frame per Year.
    pub fn interactive_globe(ds: &Dataset) -> Result<GlobeSpec, ChartError> {
        let df = ds.records();
        let years = column_i32(df, YEAR)?;
        let longitude = column_f64(df, LONGITUDE)?;
        let latitude = column_f64(df, LATITUDE)?;
        let sales = column_f64(df, SALES)?;
        let co2 = column_f64(df, CO2_REDUCTION)?;
        let satisfaction = column_f64(df, SATISFACTION)?;
        let products = column_str(df, PRODUCT)?;
        let regions = column_str(df, REGION)?;

        let mut frame_years = first_seen(&years);
        frame_years.sort_unstable();
        if frame_years.is_empty() {
            return Err(ChartError::EmptySubset {
                chart: "Interactive Globe",
            });
        }

        let frames = frame_years
            .iter()
            .map(|&year| GlobeFrame {
                year,
                points: (0..years.len())
                    .filter(|&i| years[i] == year)
                    .map(|i| GlobePoint {
                        longitude: longitude[i],
                        latitude: latitude[i],
                        sales: sales[i],
                        co2_reduction: co2[i],
                        satisfaction: satisfaction[i],
                        product: products[i].clone(),
                        region: regions[i].clone(),
                    })
                    .collect(),
            })
            .collect();

        debug!(frames = frame_years.len(), "built interactive globe");
        Ok(GlobeSpec {
            title: "EcoTech Interactive Globe".to_string(),
            frames,
            longitude_range: value_range(longitude.iter().copied()),
            latitude_range: value_range(latitude.iter().copied()),
            sales_range: value_range(sales.iter().copied()),
            co2_range: value_range(co2.iter().copied()),
            satisfaction_range: value_range(satisfaction.iter().copied()),
        })
    }

    /// Grouped polar bars of summed CO2_Reduction per Year and Product.
    pub fn polar_winds(ds: &Dataset) -> Result<PolarSpec, ChartError> {
        let grouped = Aggregator::co2_by_year_product(ds.records())?;
        let years = column_i32(&grouped, YEAR)?;
        let products = column_str(&grouped, PRODUCT)?;
        let co2 = column_f64(&grouped, CO2_REDUCTION)?;
        if years.is_empty() {
            return Err(ChartError::EmptySubset {
                chart: "Polar Winds",
            });
        }

        let thetas = Self::year_thetas(&years);
        let series = first_seen(&products)
            .into_iter()
            .enumerate()
            .map(|(idx, product)| {
                let color = product_color(&product).unwrap_or_else(|| {
                    let c = series_color(idx);
                    [c.r(), c.g(), c.b()]
                });
                let rows: Vec<usize> = (0..products.len())
                    .filter(|&i| products[i] == product)
                    .collect();
                PolarSeries {
                    color,
                    r: rows.iter().map(|&i| co2[i]).collect(),
                    theta: rows.iter().map(|&i| thetas[i]).collect(),
                    product,
                }
            })
            .collect();

        let axis_years = first_seen(&years);
        let year_thetas = Self::year_thetas(&axis_years);
        let max = co2.iter().copied().fold(0.0, f64::max);

        debug!(years = axis_years.len(), "built polar winds");
        Ok(PolarSpec {
            title: "Eco Impact Polar Winds".to_string(),
            years: axis_years,
            year_thetas,
            series,
            radial_max: max * POLAR_HEADROOM,
            bar_width: POLAR_BAR_WIDTH,
        })
    }

    /// Parallel coordinates of Eco Batteries records in 2021.
    pub fn eco_batteries(ds: &Dataset) -> Result<ParallelSpec, ChartError> {
        let subset = ds.filter(
            col(YEAR)
                .eq(lit(BATTERY_YEAR))
                .and(col(PRODUCT).eq(lit(BATTERY_PRODUCT))),
        )?;
        if subset.height() == 0 {
            return Err(ChartError::EmptySubset {
                chart: "Eco Batteries",
            });
        }

        let regions = column_str(&subset, REGION)?;
        let legend: Vec<(String, usize)> = first_seen(&regions)
            .into_iter()
            .enumerate()
            .map(|(code, region)| (region, code))
            .collect();
        let codes: Vec<usize> = regions
            .iter()
            .map(|r| {
                legend
                    .iter()
                    .find(|(name, _)| name == r)
                    .map(|(_, code)| *code)
                    .unwrap_or(0)
            })
            .collect();

        let axes = [PRODUCTION_COST, SALES, SATISFACTION, CO2_REDUCTION]
            .into_iter()
            .map(|name| -> Result<ParallelAxis, ChartError> {
                let values = column_f64(&subset, name)?;
                Ok(ParallelAxis {
                    name: name.to_string(),
                    range: value_range(values.iter().copied()),
                    values,
                })
            })
            .collect::<Result<Vec<_>, ChartError>>()?;

        let max_code = legend.len().saturating_sub(1) as f64;
        debug!(lines = codes.len(), regions = legend.len(), "built eco batteries");
        Ok(ParallelSpec {
            title: "Eco Batteries in 2021".to_string(),
            axes,
            regions,
            codes,
            legend,
            color_range: midpoint_range(0.0, max_code, COLOR_MIDPOINT),
        })
    }

    /// Year -> Region -> Product sunburst sized by summed Sales.
    pub fn sunburst(ds: &Dataset) -> Result<SunburstSpec, ChartError> {
        let grouped = Aggregator::sales_by_path(ds.records())?;
        let years = column_i32(&grouped, YEAR)?;
        let regions = column_str(&grouped, REGION)?;
        let products = column_str(&grouped, PRODUCT)?;
        let sales = column_f64(&grouped, SALES)?;
        let weighted = column_f64(&grouped, WEIGHTED_SATISFACTION)?;

        let mut nodes: Vec<SunburstNode> = Vec::new();
        let mut weights: Vec<f64> = Vec::new();
        let mut year_idx: Option<usize> = None;
        let mut region_idx: Option<usize> = None;

        for i in 0..years.len() {
            let year_path = years[i].to_string();
            let new_year = year_idx.map_or(true, |idx| nodes[idx].path != year_path);
            if new_year {
                year_idx = Some(push_node(
                    &mut nodes,
                    year_path.clone(),
                    year_path.clone(),
                    None,
                    0,
                ));
                region_idx = None;
            }
            let region_path = format!("{}/{}", year_path, regions[i]);
            if region_idx.map_or(true, |idx| nodes[idx].path != region_path) {
                region_idx = Some(push_node(
                    &mut nodes,
                    regions[i].clone(),
                    region_path.clone(),
                    year_idx,
                    1,
                ));
            }
            let leaf = push_node(
                &mut nodes,
                products[i].clone(),
                format!("{}/{}", region_path, products[i]),
                region_idx,
                2,
            );

            weights.resize(nodes.len(), 0.0);
            for idx in [year_idx, region_idx, Some(leaf)].into_iter().flatten() {
                nodes[idx].sales += sales[i];
                weights[idx] += weighted[i];
            }
        }

        let total: f64 = nodes
            .iter()
            .filter(|n| n.parent.is_none())
            .map(|n| n.sales)
            .sum();
        if nodes.is_empty() || total <= 0.0 {
            return Err(ChartError::EmptySubset { chart: "Sunburst" });
        }

        // Nodes are in pre-order, so every parent is placed before its children.
        let mut cursor = vec![0.0; nodes.len()];
        let mut root_cursor = 0.0;
        for idx in 0..nodes.len() {
            let sweep = nodes[idx].sales / total * TAU;
            let start = match nodes[idx].parent {
                Some(p) => {
                    let s = cursor[p];
                    cursor[p] += sweep;
                    s
                }
                None => {
                    let s = root_cursor;
                    root_cursor += sweep;
                    s
                }
            };
            cursor[idx] = start;
            let node = &mut nodes[idx];
            node.start_angle = start;
            node.sweep = sweep;
            node.satisfaction = if node.sales > 0.0 {
                weights[idx] / node.sales
            } else {
                0.0
            };
        }

        let color_range = value_range(nodes.iter().map(|n| n.satisfaction));
        debug!(nodes = nodes.len(), "built sunburst");
        Ok(SunburstSpec {
            title: "EcoTech Sunburst Chart".to_string(),
            max_depth: 2,
            nodes,
            color_range,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PRODUCTS, REGIONS, ROWS_PER_COMBINATION, YEARS};
    use approx::assert_relative_eq;

    fn dataset() -> Dataset {
        Dataset::generate(42).unwrap()
    }

    #[test]
    fn funnel_stages_descend_by_sales() {
        let spec = ChartBuilder::sales_funnel(&dataset()).unwrap();
        assert_eq!(spec.stages.len(), PRODUCTS.len());
        assert_eq!(spec.regions.len(), REGIONS.len());
        for pair in spec.stages.windows(2) {
            assert!(pair[0].total >= pair[1].total);
        }
        for stage in &spec.stages {
            assert_relative_eq!(stage.sales.iter().sum::<f64>(), stage.total);
        }
    }

    #[test]
    fn density_uses_north_america_only() {
        let spec = ChartBuilder::density_flow(&dataset()).unwrap();
        let per_region = YEARS.len() * PRODUCTS.len() * ROWS_PER_COMBINATION;
        assert_eq!(spec.points.len(), per_region);
        assert_eq!(
            spec.x_histogram.iter().map(|b| b.count).sum::<usize>(),
            per_region
        );
        assert!(spec.contours.iter().any(|c| !c.segments.is_empty()));
    }

    #[test]
    fn one_violin_per_product() {
        let spec = ChartBuilder::customer_satisfaction(&dataset()).unwrap();
        let names: Vec<&str> = spec.violins.iter().map(|v| v.product.as_str()).collect();
        assert_eq!(names, PRODUCTS.to_vec());
        for v in &spec.violins {
            assert_eq!(v.values.len(), ROWS_PER_COMBINATION);
            assert_eq!(v.support.len(), v.density.len());
        }
    }

    #[test]
    fn surface_matrix_covers_every_region_and_year() {
        let spec = ChartBuilder::sales_surface(&dataset()).unwrap();
        assert_eq!(spec.years, YEARS.to_vec());
        assert_eq!(spec.regions.len(), REGIONS.len());
        let mut sorted = spec.regions.clone();
        sorted.sort();
        assert_eq!(spec.regions, sorted);
        assert!(spec.sales.iter().flatten().all(|&s| s > 0.0));
    }

    #[test]
    fn globe_has_a_frame_per_year() {
        let spec = ChartBuilder::interactive_globe(&dataset()).unwrap();
        let years: Vec<i32> = spec.frames.iter().map(|f| f.year).collect();
        assert_eq!(years, YEARS.to_vec());
        let per_year = REGIONS.len() * PRODUCTS.len() * ROWS_PER_COMBINATION;
        assert!(spec.frames.iter().all(|f| f.points.len() == per_year));
    }

    #[test]
    fn polar_series_follow_product_colors() {
        let spec = ChartBuilder::polar_winds(&dataset()).unwrap();
        assert_eq!(spec.series.len(), PRODUCTS.len());
        for s in &spec.series {
            assert_eq!(Some(s.color), product_color(&s.product));
            assert_eq!(s.r.len(), YEARS.len());
            assert!(s.r.iter().all(|&r| r <= spec.radial_max));
        }
        assert_eq!(spec.year_thetas, vec![0.0, 72.0, 144.0, 216.0, 288.0]);
    }

    #[test]
    fn year_thetas_ignore_input_order() {
        let thetas = ChartBuilder::year_thetas(&[2022, 2020, 2021, 2020]);
        assert_eq!(thetas, vec![240.0, 0.0, 120.0, 0.0]);
    }

    #[test]
    fn battery_codes_follow_first_seen_regions() {
        let spec = ChartBuilder::eco_batteries(&dataset()).unwrap();
        let order: Vec<&str> = spec.legend.iter().map(|(r, _)| r.as_str()).collect();
        let expected: Vec<&str> = REGIONS.iter().map(|s| s.name).collect();
        assert_eq!(order, expected);
        assert_eq!(spec.codes.len(), REGIONS.len() * ROWS_PER_COMBINATION);
        assert_eq!(spec.codes[0], 0);
        assert_eq!(spec.axes.len(), 4);
        assert_eq!(spec.color_range, (-3.0, 4.0));
    }

    #[test]
    fn sunburst_arcs_nest_inside_parents() {
        let spec = ChartBuilder::sunburst(&dataset()).unwrap();
        let expected_nodes = YEARS.len() * (1 + REGIONS.len() * (1 + PRODUCTS.len()));
        assert_eq!(spec.nodes.len(), expected_nodes);

        let roots: f64 = spec
            .nodes
            .iter()
            .filter(|n| n.parent.is_none())
            .map(|n| n.sweep)
            .sum();
        assert_relative_eq!(roots, TAU, epsilon = 1e-9);

        for node in &spec.nodes {
            if let Some(p) = node.parent {
                let parent = &spec.nodes[p];
                assert!(node.start_angle >= parent.start_angle - 1e-9);
                assert!(
                    node.start_angle + node.sweep <= parent.start_angle + parent.sweep + 1e-9
                );
            }
            assert!((3.5..5.0).contains(&node.satisfaction));
        }
    }
}
