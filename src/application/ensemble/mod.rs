mod combiner;
mod context;

pub use combiner::combine;
pub use context::EnsembleContext;
