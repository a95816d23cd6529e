use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};
use crate::render::{Document, NodeId};

use super::chart::DensityChart;
use super::default_data::default_samples;
use super::props::ChartPropsPatch;

/// Where a strip is mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Simple selector resolved from the document root, e.g. `#chart`.
    Selector(String),
    Node(NodeId),
}

impl Target {
    pub fn resolve(&self, doc: &Document) -> ChartResult<NodeId> {
        match self {
            Target::Node(node) => {
                if doc.contains(*node) {
                    Ok(*node)
                } else {
                    Err(ChartError::UnknownNode(node.index()))
                }
            }
            Target::Selector(selector) => doc
                .select(doc.root(), selector)?
                .ok_or_else(|| ChartError::TargetNotFound(selector.clone())),
        }
    }
}

impl From<NodeId> for Target {
    fn from(node: NodeId) -> Self {
        Target::Node(node)
    }
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Target::Selector(selector.to_owned())
    }
}

impl From<String> for Target {
    fn from(selector: String) -> Self {
        Target::Selector(selector)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct MountState {
    target: Target,
    point: f64,
    data: Vec<f64>,
    props: ChartPropsPatch,
}

/// Create/update/resize wrapper around [`DensityChart`].
///
/// Remembers the last target, point, samples and props patch. Every call
/// redraws with a fresh chart, so props patches are always merged onto the
/// defaults rather than onto the previous patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DensityStrip {
    state: Option<MountState>,
}

impl DensityStrip {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_created(&self) -> bool {
        self.state.is_some()
    }

    #[must_use]
    pub fn point(&self) -> Option<f64> {
        self.state.as_ref().map(|state| state.point)
    }

    #[must_use]
    pub fn data(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|state| state.data.as_slice())
    }

    #[must_use]
    pub fn props(&self) -> Option<&ChartPropsPatch> {
        self.state.as_ref().map(|state| &state.props)
    }

    #[must_use]
    pub fn target(&self) -> Option<&Target> {
        self.state.as_ref().map(|state| &state.target)
    }

    /// Draws and, on success, stores the mount state. Missing point defaults
    /// to `0`, missing data to the bundled samples, missing props to an empty
    /// patch. A failed create leaves the strip uncreated.
    pub fn create(
        &mut self,
        doc: &mut Document,
        target: impl Into<Target>,
        point: Option<f64>,
        data: Option<Vec<f64>>,
        props: Option<ChartPropsPatch>,
    ) -> ChartResult<()> {
        let state = MountState {
            target: target.into(),
            point: point.unwrap_or(0.0),
            data: data.unwrap_or_else(default_samples),
            props: props.unwrap_or_default(),
        };
        debug!(
            target = ?state.target,
            point = state.point,
            samples = state.data.len(),
            "create density strip"
        );
        draw(&state, doc)?;
        self.state = Some(state);
        Ok(())
    }

    /// Replaces the point and props; data is replaced only when a non-empty
    /// set is supplied.
    pub fn update(
        &mut self,
        doc: &mut Document,
        point: f64,
        data: Option<Vec<f64>>,
        props: Option<ChartPropsPatch>,
    ) -> ChartResult<()> {
        let state = self.state.as_mut().ok_or(ChartError::NotCreated)?;
        state.point = point;
        if let Some(data) = data.filter(|data| !data.is_empty()) {
            state.data = data;
        }
        state.props = props.unwrap_or_default();
        debug!(point, samples = state.data.len(), "update density strip");
        draw(state, doc)
    }

    /// Redraws with unchanged state so the chart picks up the target's
    /// current layout width.
    pub fn resize(&mut self, doc: &mut Document) -> ChartResult<()> {
        let state = self.state.as_ref().ok_or(ChartError::NotCreated)?;
        debug!("resize density strip");
        draw(state, doc)
    }

    /// Forgets the mount state without touching the document.
    pub fn reset(&mut self) {
        self.state = None;
    }
}

fn draw(state: &MountState, doc: &mut Document) -> ChartResult<()> {
    let target = state.target.resolve(doc).inspect_err(|err| {
        warn!(error = %err, target = ?state.target, "density strip target unavailable");
    })?;

    let mut chart = DensityChart::new();
    chart.set_point(state.point).set_props(&state.props)?;
    chart.render(doc, target, &state.data)
}
