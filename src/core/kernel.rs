use std::f64::consts::{FRAC_2_PI, FRAC_PI_2, FRAC_PI_4, PI};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Smoothing kernel used by the density estimator.
///
/// Compact kernels integrate to one over `[-1, 1]` and vanish outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kernel {
    #[default]
    Epanechnikov,
    #[serde(alias = "boxcar")]
    Uniform,
    Triangular,
    Gaussian,
    #[serde(alias = "quartic")]
    Biweight,
    Triweight,
    Tricube,
    Cosine,
    Logistic,
    Sigmoid,
}

impl Kernel {
    pub const ALL: [Kernel; 10] = [
        Kernel::Epanechnikov,
        Kernel::Uniform,
        Kernel::Triangular,
        Kernel::Gaussian,
        Kernel::Biweight,
        Kernel::Triweight,
        Kernel::Tricube,
        Kernel::Cosine,
        Kernel::Logistic,
        Kernel::Sigmoid,
    ];

    #[must_use]
    pub fn evaluate(self, u: f64) -> f64 {
        let abs = u.abs();
        match self {
            Kernel::Epanechnikov => compact(abs, || 0.75 * (1.0 - u * u)),
            Kernel::Uniform => compact(abs, || 0.5),
            Kernel::Triangular => compact(abs, || 1.0 - abs),
            Kernel::Gaussian => (-0.5 * u * u).exp() / (2.0 * PI).sqrt(),
            Kernel::Biweight => compact(abs, || 15.0 / 16.0 * (1.0 - u * u).powi(2)),
            Kernel::Triweight => compact(abs, || 35.0 / 32.0 * (1.0 - u * u).powi(3)),
            Kernel::Tricube => compact(abs, || 70.0 / 81.0 * (1.0 - abs.powi(3)).powi(3)),
            Kernel::Cosine => compact(abs, || FRAC_PI_4 * (FRAC_PI_2 * u).cos()),
            Kernel::Logistic => 1.0 / (u.exp() + 2.0 + (-u).exp()),
            Kernel::Sigmoid => FRAC_2_PI / (u.exp() + (-u).exp()),
        }
    }

    /// Whether the kernel has bounded support `[-1, 1]`.
    #[must_use]
    pub fn is_compact(self) -> bool {
        !matches!(self, Kernel::Gaussian | Kernel::Logistic | Kernel::Sigmoid)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Kernel::Epanechnikov => "epanechnikov",
            Kernel::Uniform => "uniform",
            Kernel::Triangular => "triangular",
            Kernel::Gaussian => "gaussian",
            Kernel::Biweight => "biweight",
            Kernel::Triweight => "triweight",
            Kernel::Tricube => "tricube",
            Kernel::Cosine => "cosine",
            Kernel::Logistic => "logistic",
            Kernel::Sigmoid => "sigmoid",
        }
    }
}

#[inline]
fn compact(abs: f64, inside: impl FnOnce() -> f64) -> f64 {
    if abs <= 1.0 { inside() } else { 0.0 }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kernel {
    type Err = ChartError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "boxcar" => return Ok(Kernel::Uniform),
            "quartic" => return Ok(Kernel::Biweight),
            _ => {}
        }
        Kernel::ALL
            .into_iter()
            .find(|kernel| kernel.name() == normalized)
            .ok_or_else(|| ChartError::InvalidConfig(format!("unknown kernel `{input}`")))
    }
}
