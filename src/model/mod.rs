pub mod config;
pub mod prefs;
pub mod project;
pub mod site;

pub use config::*;
pub use prefs::*;
pub use project::*;
pub use site::*;
