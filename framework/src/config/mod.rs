//! Configuration helpers
//!
//! Runtime settings come from environment variables, optionally seeded from
//! `.env` files in the project root.
//!
//! # Example
//!
//! ```rust,no_run
//! use typedflow::config::Config;
//! use typedflow::workflow::WorkflowConfig;
//!
//! Config::init(std::path::Path::new("."));
//! let config = WorkflowConfig::from_env();
//! println!("Task queue: {}", config.task_queue);
//! ```

pub mod env;

pub use env::{env, env_optional, load_dotenv};

use std::path::Path;

/// Entry point for loading configuration
pub struct Config;

impl Config {
    /// Load `.env` files from `project_root`
    ///
    /// Call this once at startup, before the first [`env`] lookup.
    pub fn init(project_root: &Path) {
        let loaded = env::load_dotenv(project_root);
        tracing::debug!(files = loaded, root = %project_root.display(), "loaded .env files");
    }
}
