pub mod logging;
pub mod settings;

pub mod channel;
pub mod config;
pub mod derive;
pub mod domain;
pub mod locale;
pub mod orchestrator;
pub mod session;
pub mod ui;
