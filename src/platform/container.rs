use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::api::{ChartPropsPatch, DensityStrip};
use crate::error::ChartResult;
use crate::render::{Document, NodeId};

use super::debounce::{DEFAULT_RESIZE_DEBOUNCE, Debouncer};
use super::window::{ResizeSubscription, WindowEvents};

pub const CONTAINER_CLASS: &str = "chart-container";
pub const MOUNT_POINT_ID: &str = "chart";

/// Point highlighted right after mounting.
pub const INITIAL_POINT: f64 = 0.29;
/// Bandwidth override applied right after mounting.
pub const INITIAL_BANDWIDTH: f64 = 0.07;

#[derive(Debug, Clone, PartialEq)]
pub struct ContainerConfig {
    pub initial_point: f64,
    pub initial_data: Option<Vec<f64>>,
    pub initial_props: ChartPropsPatch,
    pub resize_debounce: Duration,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            initial_point: INITIAL_POINT,
            initial_data: None,
            initial_props: ChartPropsPatch::default().with_bandwidth(INITIAL_BANDWIDTH),
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE,
        }
    }
}

impl ContainerConfig {
    #[must_use]
    pub fn with_initial_point(mut self, point: f64) -> Self {
        self.initial_point = point;
        self
    }

    #[must_use]
    pub fn with_initial_data(mut self, data: Vec<f64>) -> Self {
        self.initial_data = Some(data);
        self
    }

    #[must_use]
    pub fn with_initial_props(mut self, props: ChartPropsPatch) -> Self {
        self.initial_props = props;
        self
    }

    #[must_use]
    pub fn with_resize_debounce(mut self, interval: Duration) -> Self {
        self.resize_debounce = interval;
        self
    }
}

#[derive(Debug)]
struct Mounted {
    host: NodeId,
    container: NodeId,
    mount_point: NodeId,
    subscription: ResizeSubscription,
}

/// UI-side owner of one density strip.
///
/// Mounting builds `div.chart-container > div#chart` under a host element,
/// draws the strip and listens for window resizes. Resizes are debounced and
/// only redraw from [`ChartContainer::poll`]. Everything is a no-op once the
/// container is unmounted.
#[derive(Debug)]
pub struct ChartContainer {
    config: ContainerConfig,
    strip: DensityStrip,
    debouncer: Debouncer,
    mounted: Option<Mounted>,
}

impl Default for ChartContainer {
    fn default() -> Self {
        Self::new(ContainerConfig::default())
    }
}

impl ChartContainer {
    #[must_use]
    pub fn new(config: ContainerConfig) -> Self {
        let debouncer = Debouncer::new(config.resize_debounce);
        Self {
            config,
            strip: DensityStrip::new(),
            debouncer,
            mounted: None,
        }
    }

    #[must_use]
    pub fn strip(&self) -> &DensityStrip {
        &self.strip
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    #[must_use]
    pub fn mount_point(&self) -> Option<NodeId> {
        self.mounted.as_ref().map(|mounted| mounted.mount_point)
    }

    /// Mounts under `host` and returns the chart's mount point. Mounting an
    /// already mounted container returns the existing mount point. If the
    /// initial draw fails the container markup is removed again.
    pub fn mount(
        &mut self,
        doc: &mut Document,
        host: NodeId,
        window: &mut WindowEvents,
    ) -> ChartResult<NodeId> {
        if let Some(mounted) = &self.mounted {
            return Ok(mounted.mount_point);
        }

        let container = doc.create_element("div");
        doc.set_classed(container, CONTAINER_CLASS, true)?;
        let mount_point = doc.create_element("div");
        doc.set_attr(mount_point, "id", MOUNT_POINT_ID)?;
        doc.append_child(container, mount_point)?;
        doc.append_child(host, container)?;
        sync_layout(doc, host, container, mount_point)?;

        let created = self.strip.create(
            doc,
            mount_point,
            Some(self.config.initial_point),
            self.config.initial_data.clone(),
            Some(self.config.initial_props.clone()),
        );
        if let Err(err) = created {
            warn!(error = %err, "initial draw failed; detaching chart container");
            doc.remove(container)?;
            return Err(err);
        }

        self.mounted = Some(Mounted {
            host,
            container,
            mount_point,
            subscription: window.subscribe_resize(),
        });
        debug!(mount_point = mount_point.index(), "mounted chart container");
        Ok(mount_point)
    }

    /// Pushes new inputs to the strip. No-op while unmounted.
    pub fn on_props_changed(
        &mut self,
        doc: &mut Document,
        point: f64,
        data: Option<Vec<f64>>,
        props: Option<ChartPropsPatch>,
    ) -> ChartResult<()> {
        let Some(mounted) = &self.mounted else {
            return Ok(());
        };
        sync_layout(doc, mounted.host, mounted.container, mounted.mount_point)?;
        self.strip.update(doc, point, data, props)
    }

    /// Feeds pending window resizes through the debouncer and redraws when
    /// the burst settles. Returns whether a redraw happened.
    pub fn poll(&mut self, doc: &mut Document, now: Instant) -> ChartResult<bool> {
        let Some(mounted) = &self.mounted else {
            return Ok(false);
        };
        for at in mounted.subscription.drain() {
            self.debouncer.trigger(at);
        }
        if !self.debouncer.poll(now) {
            return Ok(false);
        }

        trace!("debounced resize fired");
        sync_layout(doc, mounted.host, mounted.container, mounted.mount_point)?;
        self.strip.resize(doc)?;
        Ok(true)
    }

    /// Stops listening for resizes and removes the container subtree.
    pub fn unmount(&mut self, doc: &mut Document, window: &mut WindowEvents) -> ChartResult<()> {
        let Some(mounted) = self.mounted.take() else {
            return Ok(());
        };
        window.unsubscribe(&mounted.subscription);
        self.debouncer.cancel();
        self.strip.reset();
        if doc.contains(mounted.container) {
            doc.remove(mounted.container)?;
        }
        debug!("unmounted chart container");
        Ok(())
    }
}

/// Block-level container and mount point span the host's full width.
fn sync_layout(
    doc: &mut Document,
    host: NodeId,
    container: NodeId,
    mount_point: NodeId,
) -> ChartResult<()> {
    let width = doc.layout_width(host)?;
    doc.set_layout_width(container, width)?;
    doc.set_layout_width(mount_point, width)
}
