use crate::io::configuration::MAX_QUANTIZED_VALUES;
use rand::Rng;

/// Relative slack when deciding whether a quantized walk already reached `max`
const STEP_EPSILON: f64 = 1e-9;

/// Sampling range for one axis of a transformation
///
/// A positive `step` quantizes the range to `min, min + step, ...` with `max`
/// appended when the walk stops short of it. A zero step samples the range
/// continuously. A negative step marks an inverted range (`min > max`) that
/// is swapped before quantizing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    /// Lower end of the range
    pub min: f64,
    /// Upper end of the range
    pub max: f64,
    /// Quantization step
    pub step: f64,
}

impl AxisRange {
    /// Create a range from its three components
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Range that always samples to `value`
    pub const fn fixed(value: f64) -> Self {
        Self::new(value, value, 0.0)
    }

    /// Range with inverted bounds normalized
    pub fn normalized(self) -> Self {
        if self.step < 0.0 && self.min > self.max {
            Self::new(self.max, self.min, -self.step)
        } else {
            self
        }
    }

    /// Number of quantized values the range yields, or `None` when sampling is continuous
    ///
    /// Steps so fine that the walk would exceed [`MAX_QUANTIZED_VALUES`] are
    /// sampled continuously as well.
    pub fn quantized_len(self) -> Option<usize> {
        let range = self.normalized();
        let span = range.max - range.min;
        if range.step <= 0.0 || span < 0.0 || !span.is_finite() || !range.step.is_finite() {
            return None;
        }
        let ratio = span / range.step + STEP_EPSILON;
        if !ratio.is_finite() || ratio >= MAX_QUANTIZED_VALUES as f64 {
            return None;
        }
        let steps = ratio.floor() as usize;
        let last = (steps as f64).mul_add(range.step, range.min);
        if last < range.max - STEP_EPSILON * range.step {
            Some(steps + 2)
        } else {
            Some(steps + 1)
        }
    }

    /// Draw one value from the range
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        let range = self.normalized();
        match range.quantized_len() {
            Some(len) => {
                let index = rng.random_range(0..len);
                let value = (index as f64).mul_add(range.step, range.min);
                if index + 1 == len && value > range.max {
                    range.max
                } else {
                    value.min(range.max)
                }
            }
            None => (range.max - range.min).mul_add(rng.random::<f64>(), range.min),
        }
    }
}
