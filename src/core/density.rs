use crate::core::kernel::Kernel;
use crate::error::{ChartError, ChartResult};

#[cfg(feature = "parallel-density")]
const PARALLEL_MIN_WORK: usize = 64 * 1024;

/// Kernel density estimate over a fixed sample set.
///
/// `evaluate(x) = 1 / (n * h) * sum(K((x - x_i) / h))`.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelDensity {
    samples: Vec<f64>,
    kernel: Kernel,
    bandwidth: f64,
}

impl KernelDensity {
    /// Builds an estimator. Non-finite samples are dropped.
    pub fn new(samples: &[f64], kernel: Kernel, bandwidth: f64) -> ChartResult<Self> {
        if !bandwidth.is_finite() || bandwidth <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "kernel bandwidth must be finite and > 0".to_owned(),
            ));
        }

        Ok(Self {
            samples: samples.iter().copied().filter(|v| v.is_finite()).collect(),
            kernel,
            bandwidth,
        })
    }

    #[must_use]
    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Density at `x`. Zero when the estimator holds no samples.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum: f64 = self
            .samples
            .iter()
            .map(|sample| self.kernel.evaluate((x - sample) / self.bandwidth))
            .sum();
        sum / (self.samples.len() as f64 * self.bandwidth)
    }

    /// Evaluates the density at every `xs` value, preserving order.
    #[must_use]
    pub fn sample(&self, xs: &[f64]) -> Vec<f64> {
        #[cfg(feature = "parallel-density")]
        {
            if xs.len().saturating_mul(self.samples.len()) >= PARALLEL_MIN_WORK {
                use rayon::prelude::*;
                return xs.par_iter().map(|&x| self.evaluate(x)).collect();
            }
        }

        xs.iter().map(|&x| self.evaluate(x)).collect()
    }
}
