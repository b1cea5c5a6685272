pub mod args;
pub mod audio;
pub mod character;
pub mod core;
pub mod cutscene;
pub mod frame;
pub mod global_asset;
pub mod pickups;
pub mod system_set;
pub mod ui;
pub mod waves;
pub mod weapons;
