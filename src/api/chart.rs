use tracing::debug;

use crate::core::curve::format_number;
use crate::core::{
    DensityGeometry, GeometryInput, curve_basis, curve_monotone_x, symbol_triangle,
};
use crate::error::ChartResult;
use crate::render::{Document, NodeId, append_select};

use super::props::{ChartProps, ChartPropsPatch};

/// Highlighted value used until [`DensityChart::set_point`] is called.
pub const DEFAULT_POINT: f64 = 0.5;

/// Vertical gap between the curve and the pointer glyph.
pub const POINTER_GAP_PX: f64 = 10.0;

/// Stable class names of the three plot paths.
pub const DENSITY_CLASS: &str = "density";
pub const HIGHLIGHT_CLASS: &str = "highlight";
pub const POINTER_CLASS: &str = "pointer";
pub const LEGEND_CLASS: &str = "legend";

/// Reusable density-strip renderer.
///
/// Rendering is idempotent: every element is upserted through
/// [`append_select`], so rendering the same target again only refreshes
/// attributes, styles and text.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityChart {
    props: ChartProps,
    point: f64,
}

impl Default for DensityChart {
    fn default() -> Self {
        Self::new()
    }
}

impl DensityChart {
    #[must_use]
    pub fn new() -> Self {
        Self {
            props: ChartProps::default(),
            point: DEFAULT_POINT,
        }
    }

    #[must_use]
    pub fn props(&self) -> &ChartProps {
        &self.props
    }

    /// Deep-merges `patch` onto the current props.
    pub fn set_props(&mut self, patch: &ChartPropsPatch) -> ChartResult<&mut Self> {
        self.props.merge(patch)?;
        Ok(self)
    }

    #[must_use]
    pub fn point(&self) -> f64 {
        self.point
    }

    pub fn set_point(&mut self, point: f64) -> &mut Self {
        self.point = point;
        self
    }

    /// Geometry the chart would draw for `samples` inside a container
    /// `width_px` wide.
    pub fn geometry(&self, samples: &[f64], width_px: f64) -> ChartResult<DensityGeometry> {
        DensityGeometry::compute(&GeometryInput {
            samples,
            point: self.point,
            kernel: self.props.kernel.function,
            bandwidth: self.props.kernel.bandwidth,
            width_px,
            height_px: self.props.height,
            margin: self.props.margin,
        })
    }

    /// Renders into every bound `(target, samples)` pair.
    pub fn render_each(&self, doc: &mut Document, bindings: &[(NodeId, &[f64])]) -> ChartResult<()> {
        for (target, samples) in bindings {
            self.render(doc, *target, samples)?;
        }
        Ok(())
    }

    /// Renders the strip under `target`, measuring its current layout width.
    pub fn render(&self, doc: &mut Document, target: NodeId, samples: &[f64]) -> ChartResult<()> {
        let width = doc.layout_width(target)?;
        let geometry = self.geometry(samples, width)?;
        let props = &self.props;
        debug!(
            target = target.index(),
            width,
            samples = samples.len(),
            point = self.point,
            "rendering density strip"
        );

        let heading = append_select(doc, target, "h5", None)?;
        doc.set_style(heading, "text-align", "center")?;
        doc.set_text(heading, props.title.as_str())?;

        append_select(doc, target, "svg", None)?;

        let legend = append_select(doc, target, "div", Some(LEGEND_CLASS))?;
        let min_label = append_select(doc, legend, "span", Some("min"))?;
        doc.set_style(min_label, "float", "left")?;
        doc.set_text(min_label, props.axis_labels.min.as_str())?;
        let max_label = append_select(doc, legend, "span", Some("max"))?;
        doc.set_style(max_label, "float", "right")?;
        doc.set_text(max_label, props.axis_labels.max.as_str())?;

        let svg = append_select(doc, target, "svg", None)?;
        doc.set_attr(svg, "width", format_number(width))?;
        doc.set_attr(svg, "height", format_number(props.height))?;
        let group = append_select(doc, svg, "g", None)?;
        doc.set_attr(
            group,
            "transform",
            format!(
                "translate({}, {})",
                format_number(props.margin.left),
                format_number(props.margin.top)
            ),
        )?;

        let density = append_select(doc, group, "path", Some(DENSITY_CLASS))?;
        doc.set_attr(density, "fill", props.density_fill.as_str())?;
        doc.set_attr(density, "d", curve_basis(&geometry.density_pixels()))?;

        let highlight = append_select(doc, group, "path", Some(HIGHLIGHT_CLASS))?;
        doc.set_attr(highlight, "fill", props.point_fill.as_str())?;
        doc.set_attr(highlight, "d", curve_monotone_x(&geometry.highlight_pixels()))?;

        let pointer = append_select(doc, group, "path", Some(POINTER_CLASS))?;
        let anchor = geometry.pointer;
        let (x, y) = (format_number(anchor.x), format_number(anchor.y));
        doc.set_attr(pointer, "fill", props.point_fill.as_str())?;
        doc.set_attr(pointer, "d", symbol_triangle(anchor.size))?;
        doc.set_attr(
            pointer,
            "transform",
            format!(
                "rotate(180 {x} {y}) translate({x}, {})",
                format_number(anchor.y + POINTER_GAP_PX)
            ),
        )?;

        Ok(())
    }
}
