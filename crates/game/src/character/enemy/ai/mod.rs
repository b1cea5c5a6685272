pub mod behavior;
pub mod state;
