pub mod dynamics;
pub mod energy;
pub mod integrators;
pub mod math;
pub mod parameters;
pub mod state;
