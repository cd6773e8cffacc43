//! Learning-rate and neighbourhood kernels.
//!
//! These belong to the self-organising map trainer that ships alongside
//! AIRS. Only their selection is handled here: a kernel is picked by string
//! code and evaluated as a plain function.

use airs_core::error::{AirsError, Result};
use serde::{Deserialize, Serialize};

pub const LEARNING_RATE_KERNELS: &[(&str, &str)] = &[
    ("linear", "Linear decay to zero"),
    ("inverse", "Inverse of the iteration count"),
    ("static", "Constant rate"),
];

pub const NEIGHBOURHOOD_KERNELS: &[(&str, &str)] = &[
    ("gaussian", "Gaussian falloff"),
    ("bubble", "Unit weight inside the radius"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LearningRateKernel {
    Linear,
    Inverse,
    Static,
}

impl LearningRateKernel {
    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "inverse" => Ok(Self::Inverse),
            "static" => Ok(Self::Static),
            _ => Err(AirsError::configuration(
                "learning_rate",
                code,
                "expected linear, inverse or static",
            )),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Inverse => "inverse",
            Self::Static => "static",
        }
    }

    /// Learning rate at `iteration` of `total`.
    pub fn rate(&self, initial: f64, iteration: usize, total: usize) -> f64 {
        match self {
            Self::Linear => {
                if total == 0 {
                    return initial;
                }
                let progress = (iteration as f64 / total as f64).min(1.0);
                initial * (1.0 - progress)
            }
            Self::Inverse => initial / (1.0 + iteration as f64),
            Self::Static => initial,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeighbourhoodKernel {
    Gaussian,
    Bubble,
}

impl NeighbourhoodKernel {
    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "gaussian" => Ok(Self::Gaussian),
            "bubble" => Ok(Self::Bubble),
            _ => Err(AirsError::configuration(
                "neighbourhood",
                code,
                "expected gaussian or bubble",
            )),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Gaussian => "gaussian",
            Self::Bubble => "bubble",
        }
    }

    /// Update weight for a unit `distance` away from the winner.
    pub fn weight(&self, distance: f64, radius: f64) -> f64 {
        match self {
            Self::Gaussian => {
                if radius <= 0.0 {
                    return if distance == 0.0 { 1.0 } else { 0.0 };
                }
                (-(distance * distance) / (2.0 * radius * radius)).exp()
            }
            Self::Bubble => {
                if distance <= radius {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Label for a learning-rate kernel code.
pub fn describe_learning_rate(code: &str) -> Result<&'static str> {
    let kernel = LearningRateKernel::from_code(code)?;
    Ok(label(LEARNING_RATE_KERNELS, kernel.code()))
}

/// Label for a neighbourhood kernel code.
pub fn describe_neighbourhood(code: &str) -> Result<&'static str> {
    let kernel = NeighbourhoodKernel::from_code(code)?;
    Ok(label(NEIGHBOURHOOD_KERNELS, kernel.code()))
}

fn label(table: &'static [(&'static str, &'static str)], code: &str) -> &'static str {
    table
        .iter()
        .find(|(c, _)| *c == code)
        .map_or("", |(_, l)| *l)
}
