//! Chart Plotter Module
//! Draws the cartesian charts (funnel, density contour, violin) with egui_plot.

use super::colors::{series_color, DENSITY_GREEN};
use super::specs::{DensitySpec, FunnelSpec, ViolinSpec};
use crate::stats::HistogramBin;
use egui::{Color32, Stroke};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points, Polygon,
};

const CHART_HEIGHT: f32 = 560.0;
const MARGINAL_SIZE: f32 = 120.0;
const VIOLIN_HALF_WIDTH: f64 = 0.4;

/// Label for a categorical axis tick, empty between categories.
fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Creates interactive cartesian charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Centered horizontal bars, widest stage on top, one stacked segment per region.
    pub fn draw_funnel(ui: &mut egui::Ui, spec: &FunnelSpec) {
        let n = spec.stages.len();
        // Stage 0 is drawn at the top.
        let labels: Vec<String> = spec
            .stages
            .iter()
            .rev()
            .map(|s| s.product.clone())
            .collect();

        Plot::new("sales_funnel")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Sales")
            .y_axis_label("Product")
            .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                for (r, region) in spec.regions.iter().enumerate() {
                    let color = series_color(r);
                    let bars: Vec<Bar> = spec
                        .stages
                        .iter()
                        .enumerate()
                        .map(|(i, stage)| {
                            let offset = -stage.total / 2.0 + stage.sales[..r].iter().sum::<f64>();
                            Bar::new((n - 1 - i) as f64, stage.sales[r])
                                .base_offset(offset)
                                .name(format!("{}: {:.0}", stage.product, stage.sales[r]))
                        })
                        .collect();

                    plot_ui.bar_chart(
                        BarChart::new(bars)
                            .horizontal()
                            .width(0.7)
                            .color(color)
                            .name(region),
                    );
                }
            });
    }

    /// Contour lines over the density grid with marginal histograms on top and right.
    pub fn draw_density(ui: &mut egui::Ui, spec: &DensitySpec) {
        let (x_min, x_max) = (
            spec.grid.x.first().copied().unwrap_or(0.0),
            spec.grid.x.last().copied().unwrap_or(1.0),
        );
        let (y_min, y_max) = (
            spec.grid.y.first().copied().unwrap_or(0.0),
            spec.grid.y.last().copied().unwrap_or(1.0),
        );
        let main_width = (ui.available_width() - MARGINAL_SIZE - 20.0).max(200.0);
        let levels = spec.contours.len().max(1) as f32;

        ui.label(egui::RichText::new(&spec.title).strong());
        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                Plot::new("density_top_histogram")
                    .width(main_width)
                    .height(MARGINAL_SIZE)
                    .allow_zoom(false)
                    .allow_drag(false)
                    .allow_scroll(false)
                    .include_x(x_min)
                    .include_x(x_max)
                    .show(ui, |plot_ui| {
                        plot_ui.bar_chart(Self::histogram_chart(&spec.x_histogram, false));
                    });

                Plot::new("density_main")
                    .width(main_width)
                    .height(CHART_HEIGHT - MARGINAL_SIZE)
                    .allow_scroll(false)
                    .include_x(x_min)
                    .include_x(x_max)
                    .include_y(y_min)
                    .include_y(y_max)
                    .x_axis_label(spec.x_label.clone())
                    .y_axis_label(spec.y_label.clone())
                    .show(ui, |plot_ui| {
                        let points: PlotPoints = spec.points.iter().copied().collect();
                        plot_ui.points(
                            Points::new(points)
                                .radius(1.5)
                                .color(DENSITY_GREEN.gamma_multiply(0.25)),
                        );

                        for (k, contour) in spec.contours.iter().enumerate() {
                            let alpha = 0.35 + 0.65 * (k as f32 + 1.0) / levels;
                            let stroke_color = DENSITY_GREEN.gamma_multiply(alpha);
                            for seg in &contour.segments {
                                plot_ui.line(
                                    Line::new(PlotPoints::from(seg.to_vec()))
                                        .color(stroke_color)
                                        .width(1.2),
                                );
                            }
                        }
                    });
            });

            ui.vertical(|ui| {
                ui.add_space(MARGINAL_SIZE + ui.spacing().item_spacing.y);
                Plot::new("density_right_histogram")
                    .width(MARGINAL_SIZE)
                    .height(CHART_HEIGHT - MARGINAL_SIZE)
                    .allow_zoom(false)
                    .allow_drag(false)
                    .allow_scroll(false)
                    .include_y(y_min)
                    .include_y(y_max)
                    .show(ui, |plot_ui| {
                        plot_ui.bar_chart(Self::histogram_chart(&spec.y_histogram, true));
                    });
            });
        });
    }

    fn histogram_chart(bins: &[HistogramBin], horizontal: bool) -> BarChart {
        let bars: Vec<Bar> = bins
            .iter()
            .map(|b| Bar::new(b.center(), b.count as f64).width(b.width()))
            .collect();
        let chart = BarChart::new(bars).color(DENSITY_GREEN.gamma_multiply(0.6));
        if horizontal {
            chart.horizontal()
        } else {
            chart
        }
    }

    /// Horizontal violins with inner box and all points overlaid.
    pub fn draw_violin(ui: &mut egui::Ui, spec: &ViolinSpec) {
        let labels: Vec<String> = spec.violins.iter().map(|v| v.product.clone()).collect();

        Plot::new("customer_satisfaction")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Customer Satisfaction")
            .y_axis_label("Product")
            .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                for (i, violin) in spec.violins.iter().enumerate() {
                    let color = series_color(i);
                    let y = i as f64;
                    let peak = violin.density.iter().copied().fold(0.0, f64::max);
                    let scale = if peak > 0.0 {
                        VIOLIN_HALF_WIDTH / peak
                    } else {
                        0.0
                    };

                    // Each strip between neighbouring support points is convex.
                    for k in 1..violin.support.len() {
                        let (x0, x1) = (violin.support[k - 1], violin.support[k]);
                        let (w0, w1) = (violin.density[k - 1] * scale, violin.density[k] * scale);
                        let strip = vec![[x0, y - w0], [x1, y - w1], [x1, y + w1], [x0, y + w0]];
                        plot_ui.polygon(
                            Polygon::new(PlotPoints::from(strip))
                                .fill_color(color.gamma_multiply(0.3))
                                .stroke(Stroke::NONE),
                        );
                    }

                    let upper = violin
                        .support
                        .iter()
                        .zip(&violin.density)
                        .map(|(&x, &d)| [x, y + d * scale]);
                    let lower = violin
                        .support
                        .iter()
                        .zip(&violin.density)
                        .rev()
                        .map(|(&x, &d)| [x, y - d * scale]);
                    let mut outline: Vec<[f64; 2]> = upper.chain(lower).collect();
                    if let Some(&first) = outline.first() {
                        outline.push(first);
                    }
                    plot_ui.line(
                        Line::new(PlotPoints::from(outline))
                            .color(color)
                            .width(1.5)
                            .name(&violin.product),
                    );

                    let s = violin.summary;
                    let elem = BoxElem::new(
                        y,
                        BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker),
                    )
                    .box_width(0.12)
                    .whisker_width(0.0)
                    .fill(color.gamma_multiply(0.5))
                    .stroke(Stroke::new(1.0, Color32::WHITE));
                    plot_ui.box_plot(BoxPlot::new(vec![elem]).horizontal().color(color));

                    let points: PlotPoints = violin
                        .values
                        .iter()
                        .enumerate()
                        .map(|(k, &v)| [v, y - 0.5 + Self::jitter(k)])
                        .collect();
                    plot_ui.points(Points::new(points).radius(2.5).color(color));
                }
            });
    }

    /// Deterministic vertical offset for overlaid points, below the violin.
    fn jitter(k: usize) -> f64 {
        let golden = (k as f64 * 0.618_033_988_75).fract();
        0.02 + golden * 0.06
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_integer_ticks() {
        let labels = vec!["A".to_string(), "B".to_string()];
        assert_eq!(category_label(&labels, 1.0), "B");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, -1.0), "");
        assert_eq!(category_label(&labels, 5.0), "");
    }

    #[test]
    fn jitter_stays_in_band() {
        for k in 0..100 {
            let j = ChartPlotter::jitter(k);
            assert!((0.02..=0.08).contains(&j));
        }
    }
}
