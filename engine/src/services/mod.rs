// Service layer: request-style entry points over the analytics
pub mod analytics_service;

pub use analytics_service::{AnalyticsService, PerformanceSummary};
