use serde::{Deserialize, Serialize};

use crate::core::{Kernel, Margin};
use crate::error::{ChartError, ChartResult};

/// Full chart configuration. Serialized with the camelCase keys hosts use
/// (`densityFill`, `axisLabels.min`, `kernel.bandwidth`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartProps {
    pub density_fill: String,
    pub point_fill: String,
    pub height: f64,
    pub margin: Margin,
    pub axis_labels: AxisLabels,
    pub title: String,
    pub kernel: KernelConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabels {
    pub min: String,
    pub max: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KernelConfig {
    #[serde(alias = "func")]
    pub function: Kernel,
    pub bandwidth: f64,
}

impl Default for ChartProps {
    fn default() -> Self {
        Self {
            density_fill: "#ddd".to_owned(),
            point_fill: "#333".to_owned(),
            height: 60.0,
            margin: Margin::new(15.0, 10.0, 0.0, 10.0),
            axis_labels: AxisLabels {
                min: "Least".to_owned(),
                max: "Most".to_owned(),
            },
            title: "Density".to_owned(),
            kernel: KernelConfig {
                function: Kernel::Epanechnikov,
                bandwidth: 0.05,
            },
        }
    }
}

impl ChartProps {
    /// Applies `patch` field by field; nested records are merged rather than
    /// replaced. The patch is validated as a whole: on error `self` is left
    /// unchanged.
    pub fn merge(&mut self, patch: &ChartPropsPatch) -> ChartResult<()> {
        let merged = self.merged(patch)?;
        *self = merged;
        Ok(())
    }

    /// Returns a copy of `self` with `patch` applied.
    pub fn merged(&self, patch: &ChartPropsPatch) -> ChartResult<Self> {
        let mut next = self.clone();
        if let Some(fill) = &patch.density_fill {
            next.density_fill.clone_from(fill);
        }
        if let Some(fill) = &patch.point_fill {
            next.point_fill.clone_from(fill);
        }
        if let Some(height) = patch.height {
            next.height = height;
        }
        if let Some(margin) = &patch.margin {
            margin.apply(&mut next.margin);
        }
        if let Some(labels) = &patch.axis_labels {
            if let Some(min) = &labels.min {
                next.axis_labels.min.clone_from(min);
            }
            if let Some(max) = &labels.max {
                next.axis_labels.max.clone_from(max);
            }
        }
        if let Some(title) = &patch.title {
            next.title.clone_from(title);
        }
        if let Some(kernel) = &patch.kernel {
            if let Some(function) = kernel.function {
                next.kernel.function = function;
            }
            if let Some(bandwidth) = kernel.bandwidth {
                next.kernel.bandwidth = bandwidth;
            }
        }
        next.validate()?;
        Ok(next)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "height must be finite and > 0".to_owned(),
            ));
        }
        for (side, value) in [
            ("top", self.margin.top),
            ("right", self.margin.right),
            ("bottom", self.margin.bottom),
            ("left", self.margin.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }
        if !self.kernel.bandwidth.is_finite() || self.kernel.bandwidth <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "kernel bandwidth must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize props: {e}")))
    }

    /// Parses a complete props document and validates it.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let props: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse props json: {e}")))?;
        props.validate()?;
        Ok(props)
    }
}

/// Partial configuration; every `None` leaf keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChartPropsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<MarginPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis_labels: Option<AxisLabelsPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel: Option<KernelPatch>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarginPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
}

impl MarginPatch {
    fn apply(&self, margin: &mut Margin) {
        margin.top = self.top.unwrap_or(margin.top);
        margin.right = self.right.unwrap_or(margin.right);
        margin.bottom = self.bottom.unwrap_or(margin.bottom);
        margin.left = self.left.unwrap_or(margin.left);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisLabelsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KernelPatch {
    #[serde(default, alias = "func", skip_serializing_if = "Option::is_none")]
    pub function: Option<Kernel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<f64>,
}

impl ChartPropsPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    #[must_use]
    pub fn with_density_fill(mut self, fill: impl Into<String>) -> Self {
        self.density_fill = Some(fill.into());
        self
    }

    #[must_use]
    pub fn with_point_fill(mut self, fill: impl Into<String>) -> Self {
        self.point_fill = Some(fill.into());
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: MarginPatch) -> Self {
        self.margin = Some(margin);
        self
    }

    #[must_use]
    pub fn with_axis_labels(mut self, min: impl Into<String>, max: impl Into<String>) -> Self {
        self.axis_labels = Some(AxisLabelsPatch {
            min: Some(min.into()),
            max: Some(max.into()),
        });
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_kernel_function(mut self, function: Kernel) -> Self {
        self.kernel.get_or_insert_with(KernelPatch::default).function = Some(function);
        self
    }

    #[must_use]
    pub fn with_bandwidth(mut self, bandwidth: f64) -> Self {
        self.kernel.get_or_insert_with(KernelPatch::default).bandwidth = Some(bandwidth);
        self
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize props patch: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to parse props patch json: {e}"))
        })
    }
}
