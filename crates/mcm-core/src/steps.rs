// ABOUTME: Step sizes for nudging hue, value and chroma.
// ABOUTME: Maps modifier-selected step sizes and wheel direction to signed deltas.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Step size chosen by the user (fine with ctrl, coarse with shift)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepSize {
    Fine,
    #[default]
    Normal,
    Coarse,
}

impl StepSize {
    pub fn label(&self) -> &'static str {
        match self {
            StepSize::Fine => "fine",
            StepSize::Normal => "normal",
            StepSize::Coarse => "coarse",
        }
    }

    fn index(&self) -> usize {
        match self {
            StepSize::Fine => 0,
            StepSize::Normal => 1,
            StepSize::Coarse => 2,
        }
    }
}

/// Direction of travel around the drawn colour wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelDirection {
    Clockwise,
    AntiClockwise,
}

impl WheelDirection {
    /// Hue rotation for a wheel step. Positive rotation runs red to yellow,
    /// so clockwise is positive only on wheels drawn that way round.
    pub fn signed(&self, delta: f64, red_to_yellow_clockwise: bool) -> f64 {
        match (self, red_to_yellow_clockwise) {
            (WheelDirection::Clockwise, true) | (WheelDirection::AntiClockwise, false) => delta,
            _ => -delta,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepSettings {
    /// Hue steps in radians: fine, normal, coarse
    pub hue: [f64; 3],
    /// Value steps as proportions: fine, normal, coarse
    pub value: [f64; 3],
    /// Chroma steps as proportions: fine, normal, coarse
    pub chroma: [f64; 3],
}

impl Default for StepSettings {
    fn default() -> Self {
        Self {
            hue: [PI / 200.0, PI / 100.0, PI / 50.0],
            value: [0.0025, 0.005, 0.01],
            chroma: [0.0025, 0.005, 0.01],
        }
    }
}

impl StepSettings {
    pub fn hue_delta(&self, size: StepSize) -> f64 {
        self.hue[size.index()]
    }

    pub fn value_delta(&self, size: StepSize) -> f64 {
        self.value[size.index()]
    }

    pub fn chroma_delta(&self, size: StepSize) -> f64 {
        self.chroma[size.index()]
    }
}
