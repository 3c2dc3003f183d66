// Analytics configuration
pub mod settings;

pub use settings::{AnalyticsSettings, CsvSettings};
