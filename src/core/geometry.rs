use ordered_float::OrderedFloat;
use tracing::{trace, warn};

use crate::core::density::KernelDensity;
use crate::core::kernel::Kernel;
use crate::core::scale::LinearScale;
use crate::core::types::{CurvePoint, Extent, Margin, extent};
use crate::error::ChartResult;

/// Number of ticks requested from the x scale when sampling the density.
pub const DENSITY_TICK_COUNT: usize = 100;

/// Highlight band half-width as a fraction of the data span.
pub const OFFSET_FRACTION: f64 = 0.01;

/// Everything the geometry pass reads.
#[derive(Debug, Clone, Copy)]
pub struct GeometryInput<'a> {
    pub samples: &'a [f64],
    pub point: f64,
    pub kernel: Kernel,
    pub bandwidth: f64,
    pub width_px: f64,
    pub height_px: f64,
    pub margin: Margin,
}

/// Ephemeral chart geometry, recomputed on every render.
///
/// `density_curve` and `highlight_band` are in data space; the two scales
/// project them into the translated plot group.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGeometry {
    pub extent: Option<Extent>,
    pub offset: f64,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub density_curve: Vec<CurvePoint>,
    pub highlight_band: Vec<CurvePoint>,
    pub pointer: PointerAnchor,
}

/// Pixel position and glyph area of the triangular pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerAnchor {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl PointerAnchor {
    /// Zero-area pointer resting on the baseline.
    #[must_use]
    pub fn hidden(baseline: f64) -> Self {
        Self {
            x: 0.0,
            y: baseline,
            size: 0.0,
        }
    }
}

impl DensityGeometry {
    pub fn compute(input: &GeometryInput<'_>) -> ChartResult<Self> {
        let plot_width = input.width_px - input.margin.horizontal();
        let plot_height = input.height_px - input.margin.vertical();

        let Some(extent) = extent(input.samples) else {
            warn!(
                sample_count = input.samples.len(),
                "no finite samples; drawing an empty density strip"
            );
            return Self::empty(plot_width, plot_height);
        };

        let density = KernelDensity::new(input.samples, input.kernel, input.bandwidth)?;
        // Halved so extents wider than `f64::MAX` keep a finite offset.
        let offset = (extent.max / 2.0 - extent.min / 2.0) * (2.0 * OFFSET_FRACTION);
        let x_scale = LinearScale::from_extent(extent, (0.0, plot_width))?;

        let ticks = x_scale.ticks(DENSITY_TICK_COUNT);
        let values = density.sample(&ticks);
        let mut density_curve = Vec::with_capacity(ticks.len() + 2);
        density_curve.push(CurvePoint::new(extent.min, 0.0));
        density_curve.extend(
            ticks
                .iter()
                .zip(values)
                .map(|(&x, y)| CurvePoint::new(x, y)),
        );
        density_curve.push(CurvePoint::new(extent.max, 0.0));

        let point = input.point;
        let (left, right) = (point - offset, point + offset);
        let highlight_band = if left.is_finite() && right.is_finite() {
            vec![
                CurvePoint::new(left, 0.0),
                CurvePoint::new(left, density.evaluate(left)),
                CurvePoint::new(right, density.evaluate(right)),
                CurvePoint::new(right, 0.0),
            ]
        } else {
            warn!(point, offset, "highlight band edges are not finite; skipping highlight band");
            Vec::new()
        };

        let max_density = density_curve
            .iter()
            .map(|p| OrderedFloat(p.y))
            .max()
            .map_or(0.0, |max| max.0);
        let y_scale = LinearScale::new((0.0, max_density), (plot_height, 0.0))?;

        let pointer = if point.is_finite() {
            PointerAnchor {
                x: x_scale.map(point),
                y: y_scale.map(density.evaluate(point)),
                size: y_scale.map(offset).max(0.0),
            }
        } else {
            PointerAnchor::hidden(plot_height)
        };

        trace!(
            min = extent.min,
            max = extent.max,
            offset,
            max_density,
            ticks = ticks.len(),
            "computed density geometry"
        );

        Ok(Self {
            extent: Some(extent),
            offset,
            x_scale,
            y_scale,
            density_curve,
            highlight_band,
            pointer,
        })
    }

    fn empty(plot_width: f64, plot_height: f64) -> ChartResult<Self> {
        Ok(Self {
            extent: None,
            offset: 0.0,
            x_scale: LinearScale::new((0.0, 1.0), (0.0, plot_width))?,
            y_scale: LinearScale::new((0.0, 1.0), (plot_height, 0.0))?,
            density_curve: Vec::new(),
            highlight_band: Vec::new(),
            pointer: PointerAnchor::hidden(plot_height),
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extent.is_none()
    }

    /// Density curve projected into plot pixels.
    #[must_use]
    pub fn density_pixels(&self) -> Vec<CurvePoint> {
        self.project(&self.density_curve)
    }

    /// Highlight band projected into plot pixels.
    #[must_use]
    pub fn highlight_pixels(&self) -> Vec<CurvePoint> {
        self.project(&self.highlight_band)
    }

    fn project(&self, points: &[CurvePoint]) -> Vec<CurvePoint> {
        points
            .iter()
            .map(|p| CurvePoint::new(self.x_scale.map(p.x), self.y_scale.map(p.y)))
            .collect()
    }
}
