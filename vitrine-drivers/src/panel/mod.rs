//! Panel transport drivers

pub mod rgb;

pub use rgb::RgbPanel;
