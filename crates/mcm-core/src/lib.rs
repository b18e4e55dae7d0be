// ABOUTME: Colour space model and RGB manipulation engine.
// ABOUTME: Defines channel triples, hue/chroma/value, the step-wise editor and config handling.

pub mod angle;
pub mod config;
pub mod hcv;
pub mod hue;
pub mod manipulator;
pub mod rgb;
pub mod steps;
pub mod xy;

pub use config::{Config, ConfigError};
pub use hcv::{ChromaSide, Hcv};
pub use hue::Hue;
pub use manipulator::RgbManipulator;
pub use rgb::{Channel, Rgb, Rgb16, Rgb8, RgbPn};
pub use steps::{StepSettings, StepSize, WheelDirection};
pub use xy::Xy;
