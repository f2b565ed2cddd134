pub mod csv_bars;
pub mod feature_engineering;
pub mod mock;
