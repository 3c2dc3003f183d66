// Data access: loading price files and reshaping them into series
pub mod csv_parser;
pub mod market_data;

pub use csv_parser::PriceCsvParser;
pub use market_data::{field_series, panel_to_returns, series_from_observations, PriceField};
