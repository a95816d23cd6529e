use crate::core::types::Extent;
use crate::error::{ChartError, ChartResult};

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Upper bound on the number of ticks a single request may produce.
const MAX_TICKS: f64 = 1_000_000.0;
/// Tick indices must round-trip through `i64`.
const MAX_TICK_INDEX: f64 = 9_007_199_254_740_992.0; // 2^53

/// Continuous linear map from a data domain onto a pixel range.
///
/// A degenerate domain (`start == end`) maps every input to the middle of
/// the range so callers never observe `NaN` coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        let (range_start, range_end) = range;
        if !domain_start.is_finite()
            || !domain_end.is_finite()
            || !range_start.is_finite()
            || !range_end.is_finite()
        {
            return Err(ChartError::InvalidData(
                "scale domain and range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    pub fn from_extent(extent: Extent, range: (f64, f64)) -> ChartResult<Self> {
        Self::new((extent.min, extent.max), range)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain_start == self.domain_end
    }

    /// Maps a domain value to the range. Values outside the domain
    /// extrapolate linearly.
    ///
    /// Works on halved operands so domains spanning more than `f64::MAX`
    /// still map finite values to finite pixels.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let half_span = self.domain_end / 2.0 - self.domain_start / 2.0;
        let normalized = if self.is_degenerate() || half_span == 0.0 {
            0.5
        } else {
            (value / 2.0 - self.domain_start / 2.0) / half_span
        };
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    /// Maps a range value back into the domain.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        if self.range_start == self.range_end {
            return self.domain_start + (self.domain_end - self.domain_start) * 0.5;
        }
        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Returns roughly `count` evenly spaced "nice" values inside the domain.
    ///
    /// Steps are 1, 2 or 5 times a power of ten. Tick values are produced by
    /// integer multiples of the step so they carry no accumulated drift.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        ticks(self.domain_start, self.domain_end, count as f64)
    }
}

struct TickSpec {
    first: i64,
    last: i64,
    /// Positive: step size. Negative: reciprocal of the step size.
    increment: f64,
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<TickSpec> {
    let step = (stop / 2.0 - start / 2.0) / count.max(0.0) * 2.0;
    let power = step.log10().floor();
    if !power.is_finite() {
        return None;
    }
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut first, mut last, increment);
    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        first = (start * inc).round();
        last = (stop * inc).round();
        if first / inc < start {
            first += 1.0;
        }
        if last / inc > stop {
            last -= 1.0;
        }
        increment = -inc;
    } else {
        let inc = 10f64.powf(power) * factor;
        first = (start / inc).round();
        last = (stop / inc).round();
        if first * inc < start {
            first += 1.0;
        }
        if last * inc > stop {
            last -= 1.0;
        }
        increment = inc;
    }

    if !increment.is_finite() || !first.is_finite() || !last.is_finite() {
        return None;
    }
    if last < first && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    if first.abs() > MAX_TICK_INDEX
        || last.abs() > MAX_TICK_INDEX
        || last - first > MAX_TICKS
    {
        return None;
    }

    Some(TickSpec {
        first: first as i64,
        last: last as i64,
        increment,
    })
}

fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if count.is_nan() || count <= 0.0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let spec = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };
    let Some(spec) = spec else {
        return Vec::new();
    };
    if spec.last < spec.first {
        return Vec::new();
    }

    let value_at = |index: i64| {
        if spec.increment < 0.0 {
            index as f64 / -spec.increment
        } else {
            index as f64 * spec.increment
        }
    };

    let indices = spec.first..=spec.last;
    if reverse {
        indices.rev().map(value_at).collect()
    } else {
        indices.map(value_at).collect()
    }
}
