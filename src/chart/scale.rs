use super::ChartError;

/// Maps a value domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self, ChartError> {
        let (domain_start, domain_end) = domain;
        let span = domain_end - domain_start;
        if !span.is_finite() || span == 0.0 {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start: range.0,
            range_end: range.1,
        })
    }

    pub fn project(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }
}

/// Upper bound on tick positions per axis.
const MAX_TICKS: usize = 100;

/// Evenly spaced, human friendly tick positions covering `[min, max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticks {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Ticks {
    /// Pick a 1/2/5 x 10^k step giving roughly `target` intervals.
    ///
    /// Fails when the span between `min` and `max` is not representable.
    pub fn nice(min: f64, max: f64, target: u32) -> Result<Self, ChartError> {
        let (min, max) = if min == max {
            (min - 1.0, max + 1.0)
        } else {
            (min, max)
        };
        let span = max - min;
        if !span.is_finite() {
            return Err(ChartError::InvalidData(
                "values span too wide to plot".to_owned(),
            ));
        }
        let raw_step = span / f64::from(target.max(1));
        let magnitude = 10f64.powf(raw_step.log10().floor());
        let residual = raw_step / magnitude;
        let step = if residual <= 1.0 {
            magnitude
        } else if residual <= 2.0 {
            2.0 * magnitude
        } else if residual <= 5.0 {
            5.0 * magnitude
        } else {
            10.0 * magnitude
        };

        let ticks = Self {
            start: (min / step).floor() * step,
            end: (max / step).ceil() * step,
            step,
        };
        let intervals = (ticks.end - ticks.start) / ticks.step;
        if !intervals.is_finite() || step <= 0.0 {
            return Err(ChartError::InvalidData(
                "values span too wide to plot".to_owned(),
            ));
        }
        Ok(ticks)
    }

    pub fn values(&self) -> Vec<f64> {
        let intervals = ((self.end - self.start) / self.step).round();
        let count = if intervals.is_finite() && intervals > 0.0 {
            (intervals as usize).min(MAX_TICKS - 1)
        } else {
            0
        };
        (0..=count)
            .map(|i| self.start + i as f64 * self.step)
            .collect()
    }

    /// Format a tick value with just enough decimals for this step.
    pub fn label(&self, value: f64) -> String {
        let decimals = if self.step >= 1.0 {
            0
        } else {
            (-self.step.log10().floor()) as usize
        };
        let formatted = format!("{:.*}", decimals, value);
        if formatted.starts_with('-') && formatted[1..].chars().all(|c| c == '0' || c == '.') {
            formatted[1..].to_string()
        } else {
            formatted
        }
    }
}
