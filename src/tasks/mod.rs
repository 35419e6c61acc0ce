//! Background Tasks Module

mod sweep;

pub use sweep::spawn_sweep_task;
