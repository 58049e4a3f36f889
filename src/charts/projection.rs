//! Orthographic camera for the 3D charts.
//!
//! Scene coordinates are normalized to the cube `[-1, 1]^3` with `z` up.
//! The camera first turns the scene by `yaw` around `z`, then tilts it by
//! `pitch` towards the viewer.

use std::f64::consts::FRAC_PI_2;

/// A projected point: screen `x` right, screen `y` up, `depth` away from the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub yaw: f64,
    pub pitch: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            yaw: -0.7,
            pitch: 0.45,
            zoom: 1.0,
        }
    }
}

const MIN_ZOOM: f64 = 0.3;
const MAX_ZOOM: f64 = 4.0;
const ROTATE_SPEED: f64 = 0.01;

impl Camera {
    pub fn project(&self, p: [f64; 3]) -> Projected {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();

        let x1 = p[0] * cy - p[1] * sy;
        let y1 = p[0] * sy + p[1] * cy;
        let z1 = p[2];

        Projected {
            x: x1,
            y: z1 * cp - y1 * sp,
            depth: y1 * cp + z1 * sp,
        }
    }

    /// Rotate by a pointer drag given in points.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx as f64 * ROTATE_SPEED;
        self.pitch = (self.pitch + dy as f64 * ROTATE_SPEED).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Multiply the zoom, keeping it within bounds.
    pub fn zoom_by(&mut self, factor: f64) {
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }
}

/// Linear map of a data range onto `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    pub min: f64,
    pub max: f64,
}

impl AxisScale {
    pub fn new(range: (f64, f64)) -> Self {
        Self {
            min: range.0,
            max: range.1,
        }
    }

    pub fn normalize(&self, v: f64) -> f64 {
        if self.max > self.min {
            2.0 * (v - self.min) / (self.max - self.min) - 1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn identity_view_looks_along_y() {
        let cam = Camera {
            yaw: 0.0,
            pitch: 0.0,
            zoom: 1.0,
        };
        let p = cam.project([1.0, 0.0, 0.0]);
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 0.0);

        let up = cam.project([0.0, 0.0, 1.0]);
        assert_relative_eq!(up.y, 1.0);

        let far = cam.project([0.0, 1.0, 0.0]);
        assert_relative_eq!(far.depth, 1.0);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = Camera::default();
        cam.drag(0.0, 10_000.0);
        assert_relative_eq!(cam.pitch, FRAC_PI_2);
    }

    #[test]
    fn zoom_is_bounded() {
        let mut cam = Camera::default();
        cam.zoom_by(100.0);
        assert_relative_eq!(cam.zoom, MAX_ZOOM);
        cam.zoom_by(0.0);
        assert_relative_eq!(cam.zoom, MIN_ZOOM);
    }

    #[test]
    fn axis_scale_maps_to_unit_cube() {
        let axis = AxisScale::new((10.0, 20.0));
        assert_relative_eq!(axis.normalize(10.0), -1.0);
        assert_relative_eq!(axis.normalize(15.0), 0.0);
        assert_relative_eq!(axis.normalize(20.0), 1.0);
        assert_relative_eq!(AxisScale::new((5.0, 5.0)).normalize(5.0), 0.0);
    }

    proptest! {
        #[test]
        fn projection_preserves_length(
            x in -1.0f64..1.0, y in -1.0f64..1.0, z in -1.0f64..1.0,
            yaw in -6.3f64..6.3, pitch in -1.5f64..1.5,
        ) {
            let cam = Camera { yaw, pitch, zoom: 1.0 };
            let p = cam.project([x, y, z]);
            let before = (x * x + y * y + z * z).sqrt();
            let after = (p.x * p.x + p.y * p.y + p.depth * p.depth).sqrt();
            prop_assert!((before - after).abs() < 1e-9);
        }
    }
}
