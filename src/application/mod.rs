pub mod backtest;
pub mod ensemble;
pub mod ml;
pub mod signal;
