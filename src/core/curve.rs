//! SVG path-data generation for the chart's three shapes.
//!
//! `curve_basis` and `curve_monotone_x` follow the classic line
//! interpolators of declarative charting toolkits so the drawn shapes match
//! what designers expect from "basis" and "monotone" curves.

use std::fmt::Write as _;

use crate::core::types::CurvePoint;

/// Incremental writer of SVG path data (`M`, `L`, `C`, `Z`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathBuilder {
    data: String,
}

impl PathBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.command('M', &[x, y]);
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.command('L', &[x, y]);
    }

    pub fn bezier_curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        self.command('C', &[x1, y1, x2, y2, x, y]);
    }

    pub fn close_path(&mut self) {
        self.data.push('Z');
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.data
    }

    fn command(&mut self, op: char, values: &[f64]) {
        self.data.push(op);
        for (index, value) in values.iter().enumerate() {
            if index > 0 {
                self.data.push(',');
            }
            push_number(&mut self.data, *value);
        }
    }
}

/// Shortest round-trip representation, with negative zero printed as `0`.
pub(crate) fn push_number(out: &mut String, value: f64) {
    let value = if value == 0.0 { 0.0 } else { value };
    let _ = write!(out, "{value}");
}

#[must_use]
pub(crate) fn format_number(value: f64) -> String {
    let mut out = String::new();
    push_number(&mut out, value);
    out
}

/// Uniform cubic B-spline through the given control points.
///
/// The curve starts at the first point and ends at the last one; interior
/// points act as control points and are generally not touched.
#[must_use]
pub fn curve_basis(points: &[CurvePoint]) -> String {
    let mut path = PathBuilder::new();
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return path.finish();
    };
    path.move_to(first.x, first.y);

    match points.len() {
        1 => path.close_path(),
        2 => path.line_to(last.x, last.y),
        _ => {
            let (p0, p1) = (points[0], points[1]);
            path.line_to((5.0 * p0.x + p1.x) / 6.0, (5.0 * p0.y + p1.y) / 6.0);
            for window in points.windows(3) {
                basis_segment(&mut path, window[0], window[1], window[2]);
            }
            let tail = points.len() - 2;
            basis_segment(&mut path, points[tail], points[tail + 1], *last);
            path.line_to(last.x, last.y);
        }
    }

    path.finish()
}

fn basis_segment(path: &mut PathBuilder, p0: CurvePoint, p1: CurvePoint, p: CurvePoint) {
    path.bezier_curve_to(
        (2.0 * p0.x + p1.x) / 3.0,
        (2.0 * p0.y + p1.y) / 3.0,
        (p0.x + 2.0 * p1.x) / 3.0,
        (p0.y + 2.0 * p1.y) / 3.0,
        (p0.x + 4.0 * p1.x + p.x) / 6.0,
        (p0.y + 4.0 * p1.y + p.y) / 6.0,
    );
}

/// Cubic Hermite interpolation that preserves monotonicity in `y`,
/// assuming `x` is monotone. Consecutive coincident points are skipped.
#[must_use]
pub fn curve_monotone_x(points: &[CurvePoint]) -> String {
    let mut state = MonotoneX::default();
    for point in points {
        state.point(point.x, point.y);
    }
    state.finish()
}

#[derive(Default)]
struct MonotoneX {
    path: PathBuilder,
    accepted: usize,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    t0: f64,
}

impl MonotoneX {
    fn point(&mut self, x: f64, y: f64) {
        if self.accepted > 0 && x == self.x1 && y == self.y1 {
            return;
        }

        let mut t1 = f64::NAN;
        match self.accepted {
            0 => self.path.move_to(x, y),
            1 => {}
            2 => {
                t1 = self.slope3(x, y);
                let t0 = self.slope2(t1);
                self.hermite(t0, t1);
            }
            _ => {
                t1 = self.slope3(x, y);
                self.hermite(self.t0, t1);
            }
        }

        self.accepted += 1;
        self.x0 = self.x1;
        self.x1 = x;
        self.y0 = self.y1;
        self.y1 = y;
        self.t0 = t1;
    }

    fn finish(mut self) -> String {
        match self.accepted {
            1 => self.path.close_path(),
            2 => self.path.line_to(self.x1, self.y1),
            n if n >= 3 => {
                let t1 = self.slope2(self.t0);
                self.hermite(self.t0, t1);
            }
            _ => {}
        }
        self.path.finish()
    }

    /// Slope at the middle point of three, limited so the curve never
    /// overshoots either neighbour.
    fn slope3(&self, x2: f64, y2: f64) -> f64 {
        let h0 = self.x1 - self.x0;
        let h1 = x2 - self.x1;
        let s0 = (self.y1 - self.y0) / signed_denominator(h0, h1);
        let s1 = (y2 - self.y1) / signed_denominator(h1, h0);
        let p = (s0 * h1 + s1 * h0) / (h0 + h1);
        let limited = (sign(s0) + sign(s1)) * nan_min3(s0.abs(), s1.abs(), 0.5 * p.abs());
        if limited.is_nan() { 0.0 } else { limited }
    }

    /// One-sided slope at an end point from the neighbouring tangent.
    fn slope2(&self, t: f64) -> f64 {
        let h = self.x1 - self.x0;
        if h != 0.0 {
            (3.0 * (self.y1 - self.y0) / h - t) / 2.0
        } else {
            t
        }
    }

    fn hermite(&mut self, t0: f64, t1: f64) {
        let dx = (self.x1 - self.x0) / 3.0;
        self.path.bezier_curve_to(
            self.x0 + dx,
            self.y0 + dx * t0,
            self.x1 - dx,
            self.y1 - dx * t1,
            self.x1,
            self.y1,
        );
    }
}

/// Zero-width intervals divide by a zero that carries the direction of the
/// neighbouring interval, producing a signed infinity instead of `NaN`.
fn signed_denominator(h: f64, other: f64) -> f64 {
    if h != 0.0 {
        h
    } else if other < 0.0 {
        -0.0
    } else {
        0.0
    }
}

fn sign(value: f64) -> f64 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

fn nan_min3(a: f64, b: f64, c: f64) -> f64 {
    if a.is_nan() || b.is_nan() || c.is_nan() {
        f64::NAN
    } else {
        a.min(b).min(c)
    }
}

/// Equilateral triangle with area `size`, centred on the origin and
/// pointing towards negative `y`.
#[must_use]
pub fn symbol_triangle(size: f64) -> String {
    let sqrt3 = 3f64.sqrt();
    let size = if size.is_finite() { size.max(0.0) } else { 0.0 };
    let y = -(size / (sqrt3 * 3.0)).sqrt();

    let mut path = PathBuilder::new();
    path.move_to(0.0, y * 2.0);
    path.line_to(-sqrt3 * y, -y);
    path.line_to(sqrt3 * y, -y);
    path.close_path();
    path.finish()
}
