mod chart;
mod default_data;
mod lifecycle;
mod props;

pub use chart::{
    DEFAULT_POINT, DENSITY_CLASS, DensityChart, HIGHLIGHT_CLASS, LEGEND_CLASS, POINTER_CLASS,
    POINTER_GAP_PX,
};
pub use default_data::{DEFAULT_SAMPLES, default_samples};
pub use lifecycle::{DensityStrip, Target};
pub use props::{
    AxisLabels, AxisLabelsPatch, ChartProps, ChartPropsPatch, KernelConfig, KernelPatch,
    MarginPatch,
};
