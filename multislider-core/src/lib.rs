use serde::{Deserialize, Serialize};

pub mod gesture;
pub mod knobs;
pub mod mapper;

pub use gesture::{Gestures, TrackGeometry};
pub use knobs::{Bar, Knob, KnobId, RefreshDebounce, Slider, SliderEvent};
pub use mapper::{round_to_precision, ValueMapper};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    Equal,
    Relative,
}

impl Default for Spacing {
    fn default() -> Self {
        Spacing::Relative
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderOptions {
    pub precision: u32,
    pub buffer: f64,
    pub steps: u32,
    pub values: Vec<f64>,
    pub spacing: Spacing,
    pub continuous: bool,
    pub vertical: bool,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            precision: 0,
            buffer: 0.0,
            steps: 0,
            values: Vec::new(),
            spacing: Spacing::Relative,
            continuous: false,
            vertical: false,
        }
    }
}

impl SliderOptions {
    pub fn use_values(&self) -> bool {
        self.values.len() > 1
    }

    pub fn is_equal_spacing(&self) -> bool {
        self.spacing == Spacing::Equal
    }

    pub fn is_relative_spacing(&self) -> bool {
        self.spacing == Spacing::Relative
    }

    pub fn validate(&self) -> Result<(), SliderConfigError> {
        if !self.buffer.is_finite() || self.buffer < 0.0 {
            return Err(SliderConfigError::NegativeBuffer {
                buffer: self.buffer,
            });
        }
        if self.values.iter().any(|value| !value.is_finite()) {
            return Err(SliderConfigError::NonFiniteValue);
        }
        if self.values.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(SliderConfigError::UnsortedValues);
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SliderConfigError {
    #[error("floor {floor} is above ceiling {ceiling}")]
    InvertedBounds { floor: f64, ceiling: f64 },
    #[error("floor and ceiling must be finite numbers")]
    NonFiniteBound,
    #[error("values must be finite numbers")]
    NonFiniteValue,
    #[error("values must be sorted ascending")]
    UnsortedValues,
    #[error("buffer {buffer} must be zero or positive")]
    NegativeBuffer { buffer: f64 },
}
