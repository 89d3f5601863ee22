//! Configuration and path management for spendvault

pub mod paths;
pub mod settings;

pub use paths::VaultPaths;
pub use settings::Settings;
