pub mod config_io;
pub mod logging;
pub mod project_io;
pub mod state;
pub mod stats_client;
