pub mod body;
pub mod presets;
pub mod registry;
