//! Post-processing of WRENCH simulation output.

pub mod timing;

pub use timing::{format_delay, task_start_delays, task_start_delays_from_file, TaskStartDelay};
