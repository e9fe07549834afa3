use crate::airfoil::DEFAULT_THICKNESS;
use crate::errors::ParameterError;
use crate::mesher::DEFAULT_CHARACTERISTIC_LENGTH;

pub const DEFAULT_NUM_POINTS: usize = 100;

/// The numeric inputs of a single boundary and mesh generation run
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Parameters {
    /// Chord samples per surface
    pub num_points: usize,
    pub thickness: f64,
    pub characteristic_length: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            num_points: DEFAULT_NUM_POINTS,
            thickness: DEFAULT_THICKNESS,
            characteristic_length: DEFAULT_CHARACTERISTIC_LENGTH,
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::NotPositive { name, value })
    }
}

impl Parameters {
    /// Checks every parameter before any work is done, reporting the first one out of range
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.num_points < 2 {
            return Err(ParameterError::TooFewSamples(self.num_points));
        }
        positive("thickness", self.thickness)?;
        positive("characteristic length", self.characteristic_length)
    }
}
