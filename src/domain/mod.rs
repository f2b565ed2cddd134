pub mod errors;
pub mod forecast;
pub mod market;
