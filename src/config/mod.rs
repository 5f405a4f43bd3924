/// Settings file loading and rule set resolution
pub mod settings;

pub use settings::Settings;
