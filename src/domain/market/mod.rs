mod bar;
mod features;

pub use bar::{PriceBar, validate_series};
pub use features::{FeatureFrame, FeatureVector};
