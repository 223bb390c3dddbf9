pub mod sample_source;
pub mod calibration_curve;

pub use sample_source::{SampleSource, DomainMapping};
pub use calibration_curve::{CalibrationCurve, InputAxis, MappedCurve};
