//! Chart Canvas Module
//! Painter-drawn charts that have no egui_plot primitive: 3D surface and
//! scatter, polar bars, parallel coordinates and sunburst.

use super::colors::{normalize, rgb, ColorScale};
use super::projection::{AxisScale, Camera, Projected};
use super::specs::{GlobeSpec, ParallelSpec, PolarSpec, SunburstSpec, SurfaceSpec};
use egui::{Align2, Color32, FontId, Mesh, Painter, Pos2, Rect, Response, Sense, Shape, Stroke};
use std::f32::consts::{FRAC_PI_2, PI};

const CANVAS_HEIGHT: f32 = 600.0;
const BACKGROUND: Color32 = Color32::from_rgb(17, 17, 17);
const GRID: Color32 = Color32::from_rgb(68, 68, 68);
const TEXT: Color32 = Color32::from_rgb(220, 220, 220);
const ARC_STEPS_PER_RADIAN: f32 = 24.0;
const HOVER_RADIUS: f32 = 12.0;

/// Year-indexed animation state of the globe.
#[derive(Debug, Clone)]
pub struct GlobeAnimation {
    pub frame: usize,
    pub playing: bool,
    pub interval: f64,
    last_step: f64,
}

impl GlobeAnimation {
    pub fn new(interval_secs: f64) -> Self {
        Self {
            frame: 0,
            playing: false,
            interval: interval_secs,
            last_step: 0.0,
        }
    }

    /// Advance to the next frame when `interval` has elapsed since the last step.
    ///
    /// Returns `true` when the frame changed.
    pub fn tick(&mut self, now: f64, frames: usize) -> bool {
        if !self.playing || frames == 0 {
            return false;
        }
        if now - self.last_step >= self.interval {
            self.frame = (self.frame + 1) % frames;
            self.last_step = now;
            return true;
        }
        false
    }

    pub fn toggle(&mut self, now: f64) {
        self.playing = !self.playing;
        self.last_step = now;
    }
}

fn canvas(ui: &mut egui::Ui) -> (Response, Painter) {
    let size = egui::vec2(ui.available_width(), CANVAS_HEIGHT);
    let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
    painter.rect_filled(response.rect, 4.0, BACKGROUND);
    (response, painter)
}

fn hover_label(painter: &Painter, at: Pos2, text: String) {
    let galley = painter.layout_no_wrap(text, FontId::proportional(13.0), Color32::WHITE);
    let pos = at + egui::vec2(14.0, -galley.size().y - 6.0);
    let rect = Rect::from_min_size(pos, galley.size()).expand(4.0);
    painter.rect_filled(rect, 3.0, Color32::from_black_alpha(220));
    painter.galley(pos, galley, Color32::WHITE);
}

/// Filled annular sector between screen angles `a0..a1` (radians, y down).
fn fill_sector(
    mesh: &mut Mesh,
    center: Pos2,
    r0: f32,
    r1: f32,
    a0: f32,
    a1: f32,
    color: Color32,
) {
    let steps = (((a1 - a0).abs() * ARC_STEPS_PER_RADIAN).ceil() as usize).max(1);
    let base = mesh.vertices.len() as u32;
    for k in 0..=steps {
        let a = a0 + (a1 - a0) * k as f32 / steps as f32;
        let dir = egui::vec2(a.cos(), a.sin());
        mesh.colored_vertex(center + dir * r0, color);
        mesh.colored_vertex(center + dir * r1, color);
    }
    for k in 0..steps as u32 {
        let i = base + 2 * k;
        mesh.add_triangle(i, i + 1, i + 3);
        mesh.add_triangle(i, i + 3, i + 2);
    }
}

fn arc_points(center: Pos2, r: f32, a0: f32, a1: f32) -> Vec<Pos2> {
    let steps = (((a1 - a0).abs() * ARC_STEPS_PER_RADIAN).ceil() as usize).max(1);
    (0..=steps)
        .map(|k| {
            let a = a0 + (a1 - a0) * k as f32 / steps as f32;
            center + egui::vec2(a.cos(), a.sin()) * r
        })
        .collect()
}

/// Vertical gradient bar with min/max labels.
fn colorbar(painter: &Painter, rect: Rect, scale: ColorScale, range: (f64, f64), title: &str) {
    let steps = 32;
    let mut mesh = Mesh::default();
    for k in 0..=steps {
        let t = k as f32 / steps as f32;
        let y = rect.bottom() - t * rect.height();
        let color = scale.sample(t as f64);
        mesh.colored_vertex(Pos2::new(rect.left(), y), color);
        mesh.colored_vertex(Pos2::new(rect.right(), y), color);
    }
    for k in 0..steps as u32 {
        let i = 2 * k;
        mesh.add_triangle(i, i + 1, i + 3);
        mesh.add_triangle(i, i + 3, i + 2);
    }
    painter.add(Shape::mesh(mesh));

    let font = FontId::proportional(11.0);
    painter.text(
        rect.center_top() - egui::vec2(0.0, 8.0),
        Align2::CENTER_BOTTOM,
        title,
        font.clone(),
        TEXT,
    );
    painter.text(
        rect.right_top() + egui::vec2(4.0, 0.0),
        Align2::LEFT_CENTER,
        format!("{:.1}", range.1),
        font.clone(),
        TEXT,
    );
    painter.text(
        rect.right_bottom() + egui::vec2(4.0, 0.0),
        Align2::LEFT_CENTER,
        format!("{:.1}", range.0),
        font,
        TEXT,
    );
}

/// Apply drag-to-rotate and scroll-to-zoom to `camera`.
fn orbit(ui: &egui::Ui, response: &Response, camera: &mut Camera) {
    if response.dragged() {
        let delta = response.drag_delta();
        camera.drag(delta.x, delta.y);
    }
    if response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            camera.zoom_by((scroll as f64 * 0.002).exp());
        }
    }
}

/// Screen position of a projected point inside `rect`.
fn to_screen(rect: Rect, camera: &Camera, p: Projected) -> Pos2 {
    let scale = rect.width().min(rect.height()) * 0.32 * camera.zoom as f32;
    rect.center() + egui::vec2(p.x as f32, -(p.y as f32)) * scale
}

/// Bottom edges of the unit cube with tick labels along x and y.
fn draw_floor(
    painter: &Painter,
    rect: Rect,
    camera: &Camera,
    x_ticks: &[(f64, String)],
    y_ticks: &[(f64, String)],
) {
    let corners = [
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0],
        [-1.0, 1.0, -1.0],
    ];
    let pts: Vec<Pos2> = corners
        .iter()
        .map(|&c| to_screen(rect, camera, camera.project(c)))
        .collect();
    for i in 0..4 {
        painter.line_segment([pts[i], pts[(i + 1) % 4]], Stroke::new(1.0, GRID));
    }
    let up = [
        to_screen(rect, camera, camera.project([-1.0, -1.0, -1.0])),
        to_screen(rect, camera, camera.project([-1.0, -1.0, 1.0])),
    ];
    painter.line_segment(up, Stroke::new(1.0, GRID));

    let font = FontId::proportional(11.0);
    for (x, label) in x_ticks {
        let pos = to_screen(rect, camera, camera.project([*x, -1.15, -1.0]));
        painter.text(pos, Align2::CENTER_CENTER, label, font.clone(), TEXT);
    }
    for (y, label) in y_ticks {
        let pos = to_screen(rect, camera, camera.project([-1.15, *y, -1.0]));
        painter.text(pos, Align2::RIGHT_CENTER, label, font.clone(), TEXT);
    }
}

fn axis_label(painter: &Painter, rect: Rect, camera: &Camera, at: [f64; 3], text: &str) {
    let pos = to_screen(rect, camera, camera.project(at));
    painter.text(
        pos,
        Align2::CENTER_CENTER,
        text,
        FontId::proportional(13.0),
        Color32::WHITE,
    );
}

/// Nearest of `candidates` to the pointer, within the hover radius.
fn nearest(
    hover: Option<Pos2>,
    candidates: impl Iterator<Item = (usize, Pos2)>,
) -> Option<(usize, Pos2)> {
    let hover = hover?;
    candidates
        .map(|(i, p)| (i, p, p.distance(hover)))
        .filter(|(_, _, d)| *d <= HOVER_RADIUS)
        .min_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, p, _)| (i, p))
}

pub struct ChartCanvas;

impl ChartCanvas {
    /// Rotatable 3D height surface of the Region x Year pivot.
    pub fn draw_surface(ui: &mut egui::Ui, spec: &SurfaceSpec, camera: &mut Camera) {
        let (response, painter) = canvas(ui);
        orbit(ui, &response, camera);
        let rect = response.rect;
        let camera = *camera;

        let cols = spec.years.len();
        let rows = spec.regions.len();
        let x_axis = AxisScale::new((0.0, cols.saturating_sub(1) as f64));
        let y_axis = AxisScale::new((0.0, rows.saturating_sub(1) as f64));
        let z_range = spec.z_range();
        let z_axis = AxisScale::new(z_range);

        let vertex = |r: usize, c: usize| -> [f64; 3] {
            [
                x_axis.normalize(c as f64),
                y_axis.normalize(r as f64),
                z_axis.normalize(spec.sales[r][c]),
            ]
        };

        let x_ticks: Vec<(f64, String)> = spec
            .years
            .iter()
            .enumerate()
            .map(|(c, y)| (x_axis.normalize(c as f64), y.to_string()))
            .collect();
        let y_ticks: Vec<(f64, String)> = spec
            .regions
            .iter()
            .enumerate()
            .map(|(r, name)| (y_axis.normalize(r as f64), name.clone()))
            .collect();
        draw_floor(&painter, rect, &camera, &x_ticks, &y_ticks);

        let mut quads: Vec<(f64, [Pos2; 4], Color32)> = Vec::new();
        for r in 0..rows.saturating_sub(1) {
            for c in 0..cols.saturating_sub(1) {
                let corners = [
                    vertex(r, c),
                    vertex(r, c + 1),
                    vertex(r + 1, c + 1),
                    vertex(r + 1, c),
                ];
                let projected = corners.map(|p| camera.project(p));
                let depth = projected.iter().map(|p| p.depth).sum::<f64>() / 4.0;
                let height = corners.iter().map(|p| p[2]).sum::<f64>() / 4.0;
                let color = ColorScale::Viridis.sample((height + 1.0) / 2.0);
                quads.push((depth, projected.map(|p| to_screen(rect, &camera, p)), color));
            }
        }
        // Far faces first.
        quads.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        for (_, pts, color) in quads {
            painter.add(Shape::convex_polygon(
                pts.to_vec(),
                color,
                Stroke::new(0.5, Color32::from_black_alpha(120)),
            ));
        }

        axis_label(&painter, rect, &camera, [0.0, -1.45, -1.0], "Year");
        axis_label(&painter, rect, &camera, [-1.6, 0.0, -1.0], "Region");
        axis_label(&painter, rect, &camera, [-1.0, -1.0, 1.15], "Sales");
        colorbar(
            &painter,
            Rect::from_min_size(rect.right_top() + egui::vec2(-70.0, 60.0), egui::vec2(16.0, 220.0)),
            ColorScale::Viridis,
            z_range,
            "Sales",
        );

        let cells = (0..rows).flat_map(|r| (0..cols).map(move |c| (r, c)));
        let screen: Vec<(usize, Pos2)> = cells
            .enumerate()
            .map(|(i, (r, c))| (i, to_screen(rect, &camera, camera.project(vertex(r, c)))))
            .collect();
        if let Some((i, pos)) = nearest(response.hover_pos(), screen.into_iter()) {
            let (r, c) = (i / cols, i % cols);
            hover_label(
                &painter,
                pos,
                format!("{} {}: {:.0}", spec.regions[r], spec.years[c], spec.sales[r][c]),
            );
        }
    }

    /// Animated 3D scatter of Longitude/Latitude/Sales.
    pub fn draw_globe(
        ui: &mut egui::Ui,
        spec: &GlobeSpec,
        camera: &mut Camera,
        animation: &mut GlobeAnimation,
    ) {
        let frames = spec.frames.len();
        if frames == 0 {
            return;
        }
        let now = ui.input(|i| i.time);
        animation.frame = animation.frame.min(frames - 1);
        if animation.tick(now, frames) {
            tracing::trace!(frame = animation.frame, "globe animation step");
        }
        if animation.playing {
            ui.ctx()
                .request_repaint_after(std::time::Duration::from_secs_f64(animation.interval));
        }

        ui.horizontal(|ui| {
            let label = if animation.playing { "⏸ Pause" } else { "▶ Play" };
            if ui.button(label).clicked() {
                animation.toggle(now);
            }
            let year = spec.frames[animation.frame].year;
            ui.add(
                egui::Slider::new(&mut animation.frame, 0..=frames - 1)
                    .show_value(false)
                    .text(format!("Year {}", year)),
            );
        });

        let (response, painter) = canvas(ui);
        orbit(ui, &response, camera);
        let rect = response.rect;
        let camera = *camera;

        let x_axis = AxisScale::new(spec.longitude_range);
        let y_axis = AxisScale::new(spec.latitude_range);
        let z_axis = AxisScale::new(spec.sales_range);
        draw_floor(&painter, rect, &camera, &[], &[]);
        axis_label(&painter, rect, &camera, [0.0, -1.3, -1.0], "Longitude");
        axis_label(&painter, rect, &camera, [-1.3, 0.0, -1.0], "Latitude");
        axis_label(&painter, rect, &camera, [-1.0, -1.0, 1.15], "Sales");

        let frame = &spec.frames[animation.frame];
        let mut dots: Vec<(usize, Projected)> = frame
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let at = [
                    x_axis.normalize(p.longitude),
                    y_axis.normalize(p.latitude),
                    z_axis.normalize(p.sales),
                ];
                (i, camera.project(at))
            })
            .collect();
        dots.sort_by(|a, b| b.1.depth.partial_cmp(&a.1.depth).unwrap_or(std::cmp::Ordering::Equal));

        let mut screen: Vec<(usize, Pos2)> = Vec::with_capacity(dots.len());
        for (i, proj) in dots {
            let p = &frame.points[i];
            let pos = to_screen(rect, &camera, proj);
            let radius = 3.0 + 5.0 * normalize(p.satisfaction, spec.satisfaction_range) as f32;
            let color = ColorScale::Viridis
                .sample_in(p.co2_reduction, spec.co2_range)
                .gamma_multiply(0.8);
            painter.circle_filled(pos, radius, color);
            screen.push((i, pos));
        }

        colorbar(
            &painter,
            Rect::from_min_size(rect.right_top() + egui::vec2(-70.0, 60.0), egui::vec2(16.0, 220.0)),
            ColorScale::Viridis,
            spec.co2_range,
            "CO2_Reduction",
        );
        painter.text(
            rect.left_top() + egui::vec2(12.0, 12.0),
            Align2::LEFT_TOP,
            format!("{} | Year = {}", spec.title, frame.year),
            FontId::proportional(15.0),
            Color32::WHITE,
        );

        if let Some((i, pos)) = nearest(response.hover_pos(), screen.into_iter()) {
            let p = &frame.points[i];
            hover_label(
                &painter,
                pos,
                format!(
                    "{} ({})\nSales: {:.0}\nCO2 Reduction: {:.1}\nSatisfaction: {:.2}",
                    p.product, p.region, p.sales, p.co2_reduction, p.satisfaction
                ),
            );
        }
    }

    /// Grouped polar bars, angles clockwise from three o'clock.
    pub fn draw_polar(ui: &mut egui::Ui, spec: &PolarSpec) {
        let (response, painter) = canvas(ui);
        let rect = response.rect;
        let center = rect.center() - egui::vec2(80.0, 0.0);
        let radius = rect.height().min(rect.width()) * 0.4;
        let r_max = if spec.radial_max > 0.0 { spec.radial_max } else { 1.0 };
        let font = FontId::proportional(11.0);

        for k in 1..=4 {
            let r = radius * k as f32 / 4.0;
            painter.circle_stroke(center, r, Stroke::new(1.0, GRID));
            painter.text(
                center + egui::vec2(2.0, -r),
                Align2::LEFT_BOTTOM,
                format!("{:.0}", r_max * k as f64 / 4.0),
                font.clone(),
                TEXT,
            );
        }
        for (year, theta) in spec.years.iter().zip(&spec.year_thetas) {
            let a = (*theta as f32).to_radians();
            let dir = egui::vec2(a.cos(), a.sin());
            painter.line_segment([center, center + dir * radius], Stroke::new(1.0, GRID));
            painter.text(
                center + dir * (radius + 18.0),
                Align2::CENTER_CENTER,
                year.to_string(),
                font.clone(),
                TEXT,
            );
        }

        let n = spec.series.len() as f64;
        let mut mesh = Mesh::default();
        let mut hit: Vec<(usize, usize, f32, f32, f32)> = Vec::new();
        for (s, series) in spec.series.iter().enumerate() {
            let offset = (s as f64 - (n - 1.0) / 2.0) * spec.bar_width;
            for (j, (&r, &theta)) in series.r.iter().zip(&series.theta).enumerate() {
                let mid = (theta + offset) as f32;
                let a0 = (mid - spec.bar_width as f32 / 2.0).to_radians();
                let a1 = (mid + spec.bar_width as f32 / 2.0).to_radians();
                let len = radius * (r / r_max) as f32;
                fill_sector(&mut mesh, center, 0.0, len, a0, a1, rgb(series.color));
                hit.push((s, j, a0, a1, len));
            }
        }
        painter.add(Shape::mesh(mesh));

        painter.text(
            center + egui::vec2(radius + 40.0, 0.0),
            Align2::LEFT_CENTER,
            "CO2 Reduction (tons)",
            font.clone(),
            TEXT,
        );
        painter.text(
            rect.left_top() + egui::vec2(12.0, 12.0),
            Align2::LEFT_TOP,
            &spec.title,
            FontId::proportional(15.0),
            Color32::WHITE,
        );

        let legend_x = rect.right() - 160.0;
        for (s, series) in spec.series.iter().enumerate() {
            let y = rect.top() + 40.0 + s as f32 * 22.0;
            painter.rect_filled(
                Rect::from_min_size(Pos2::new(legend_x, y), egui::vec2(14.0, 14.0)),
                2.0,
                rgb(series.color),
            );
            painter.text(
                Pos2::new(legend_x + 20.0, y + 7.0),
                Align2::LEFT_CENTER,
                &series.product,
                font.clone(),
                TEXT,
            );
        }

        if let Some(pos) = response.hover_pos() {
            let d = pos - center;
            let dist = d.length();
            let mut angle = d.y.atan2(d.x);
            if angle < 0.0 {
                angle += 2.0 * PI;
            }
            let found = hit.iter().find(|(_, _, a0, a1, len)| {
                let inside = |a: f32| a >= *a0 && a <= *a1;
                dist <= *len && (inside(angle) || inside(angle - 2.0 * PI) || inside(angle + 2.0 * PI))
            });
            if let Some(&(s, j, ..)) = found {
                let series = &spec.series[s];
                let year = spec
                    .years
                    .get(j)
                    .map(|y| y.to_string())
                    .unwrap_or_default();
                hover_label(
                    &painter,
                    pos,
                    format!("{} {}: {:.1}", series.product, year, series.r[j]),
                );
            }
        }
    }

    /// Parallel coordinates with one vertical axis per dimension.
    pub fn draw_parallel(ui: &mut egui::Ui, spec: &ParallelSpec) {
        let (response, painter) = canvas(ui);
        let rect = response.rect.shrink2(egui::vec2(80.0, 60.0));
        let axes = spec.axes.len();
        if axes == 0 {
            return;
        }
        let font = FontId::proportional(12.0);
        let axis_x = |k: usize| -> f32 {
            if axes == 1 {
                rect.center().x
            } else {
                rect.left() + rect.width() * k as f32 / (axes - 1) as f32
            }
        };
        let axis_y = |k: usize, v: f64| -> f32 {
            let t = normalize(v, spec.axes[k].range) as f32;
            rect.bottom() - t * rect.height()
        };

        for (line, &code) in spec.codes.iter().enumerate() {
            let pts: Vec<Pos2> = (0..axes)
                .map(|k| Pos2::new(axis_x(k), axis_y(k, spec.axes[k].values[line])))
                .collect();
            let color = ColorScale::Viridis.sample_in(code as f64, spec.color_range);
            painter.add(Shape::line(pts, Stroke::new(1.5, color)));
        }

        for (k, axis) in spec.axes.iter().enumerate() {
            let x = axis_x(k);
            painter.line_segment(
                [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
                Stroke::new(2.0, Color32::WHITE),
            );
            painter.text(
                Pos2::new(x, rect.top() - 24.0),
                Align2::CENTER_BOTTOM,
                &axis.name,
                font.clone(),
                Color32::WHITE,
            );
            painter.text(
                Pos2::new(x + 6.0, rect.top()),
                Align2::LEFT_CENTER,
                format!("{:.1}", axis.range.1),
                font.clone(),
                TEXT,
            );
            painter.text(
                Pos2::new(x + 6.0, rect.bottom()),
                Align2::LEFT_CENTER,
                format!("{:.1}", axis.range.0),
                font.clone(),
                TEXT,
            );
        }

        painter.text(
            response.rect.left_top() + egui::vec2(12.0, 12.0),
            Align2::LEFT_TOP,
            &spec.title,
            FontId::proportional(15.0),
            Color32::WHITE,
        );
        for (i, (region, code)) in spec.legend.iter().enumerate() {
            let pos = Pos2::new(
                response.rect.left() + 12.0 + i as f32 * 150.0,
                response.rect.bottom() - 20.0,
            );
            let color = ColorScale::Viridis.sample_in(*code as f64, spec.color_range);
            painter.circle_filled(pos, 6.0, color);
            painter.text(
                pos + egui::vec2(10.0, 0.0),
                Align2::LEFT_CENTER,
                format!("{} = {}", code, region),
                font.clone(),
                TEXT,
            );
        }
    }

    /// Concentric rings, innermost Year; arcs start at twelve o'clock.
    pub fn draw_sunburst(ui: &mut egui::Ui, spec: &SunburstSpec) {
        let (response, painter) = canvas(ui);
        let rect = response.rect;
        let center = rect.center();
        let ring = rect.height().min(rect.width()) * 0.45 / (spec.max_depth + 1) as f32;
        let separator = Stroke::new(1.0, BACKGROUND);
        let small = FontId::proportional(10.0);

        let mut mesh = Mesh::default();
        for node in &spec.nodes {
            let r0 = ring * node.depth as f32;
            let r1 = r0 + ring;
            let a0 = node.start_angle as f32 - FRAC_PI_2;
            let a1 = a0 + node.sweep as f32;
            let color = ColorScale::Blues.sample_in(node.satisfaction, spec.color_range);
            fill_sector(&mut mesh, center, r0, r1, a0, a1, color);
        }
        painter.add(Shape::mesh(mesh));

        for node in &spec.nodes {
            let r0 = ring * node.depth as f32;
            let r1 = r0 + ring;
            let a0 = node.start_angle as f32 - FRAC_PI_2;
            let a1 = a0 + node.sweep as f32;
            painter.add(Shape::line(arc_points(center, r1, a0, a1), separator));
            let dir = egui::vec2(a0.cos(), a0.sin());
            painter.line_segment([center + dir * r0, center + dir * r1], separator);

            let mid = (a0 + a1) / 2.0;
            let label_r = (r0 + r1) / 2.0;
            if node.sweep as f32 * label_r > 36.0 {
                let t = normalize(node.satisfaction, spec.color_range);
                let color = if t > 0.5 { Color32::WHITE } else { Color32::BLACK };
                painter.text(
                    center + egui::vec2(mid.cos(), mid.sin()) * label_r,
                    Align2::CENTER_CENTER,
                    &node.label,
                    small.clone(),
                    color,
                );
            }
        }

        colorbar(
            &painter,
            Rect::from_min_size(rect.right_top() + egui::vec2(-90.0, 60.0), egui::vec2(16.0, 220.0)),
            ColorScale::Blues,
            spec.color_range,
            "Customer_Satisfaction",
        );
        painter.text(
            rect.left_top() + egui::vec2(12.0, 12.0),
            Align2::LEFT_TOP,
            &spec.title,
            FontId::proportional(15.0),
            Color32::WHITE,
        );

        if let Some(pos) = response.hover_pos() {
            let d = pos - center;
            let depth = (d.length() / ring).floor() as usize;
            // Clockwise from twelve o'clock.
            let mut angle = d.x.atan2(-d.y) as f64;
            if angle < 0.0 {
                angle += std::f64::consts::TAU;
            }
            let found = spec.nodes.iter().find(|n| {
                n.depth == depth && angle >= n.start_angle && angle < n.start_angle + n.sweep
            });
            if let Some(node) = found {
                hover_label(
                    &painter,
                    pos,
                    format!(
                        "{}\nSales: {:.0}\nCustomer_Satisfaction: {:.3}",
                        node.path, node.sales, node.satisfaction
                    ),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_waits_for_interval() {
        let mut anim = GlobeAnimation::new(1.0);
        anim.toggle(0.0);
        assert!(!anim.tick(0.5, 5));
        assert!(anim.tick(1.0, 5));
        assert_eq!(anim.frame, 1);
    }

    #[test]
    fn animation_wraps_around() {
        let mut anim = GlobeAnimation::new(0.1);
        anim.frame = 4;
        anim.toggle(0.0);
        assert!(anim.tick(0.2, 5));
        assert_eq!(anim.frame, 0);
    }

    #[test]
    fn paused_animation_does_not_advance() {
        let mut anim = GlobeAnimation::new(0.1);
        assert!(!anim.tick(10.0, 5));
        assert_eq!(anim.frame, 0);
    }

    #[test]
    fn sector_mesh_is_closed_strip() {
        let mut mesh = Mesh::default();
        fill_sector(&mut mesh, Pos2::ZERO, 0.0, 10.0, 0.0, 1.0, Color32::RED);
        let steps = (1.0 * ARC_STEPS_PER_RADIAN).ceil() as usize;
        assert_eq!(mesh.vertices.len(), 2 * (steps + 1));
        assert_eq!(mesh.indices.len(), 6 * steps);
    }
}
