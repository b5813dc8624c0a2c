pub mod cli;
pub mod config;
pub mod db;
pub mod deploy;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;
pub mod types;

pub use config::Config;
pub use error::TrackerError;
pub use router::{TrackerState, tracker_router};
