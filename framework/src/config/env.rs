use std::path::Path;

/// Load environment variables from `.env` files in `project_root`
///
/// `.env.local` is read before `.env`. dotenvy never overwrites a variable
/// that is already set, so the process environment wins over both files and
/// `.env.local` wins over `.env`. Missing files are ignored.
///
/// Returns the number of files that were loaded.
pub fn load_dotenv(project_root: &Path) -> usize {
    [".env.local", ".env"]
        .iter()
        .filter(|name| dotenvy::from_path(project_root.join(name)).is_ok())
        .count()
}

/// Get an environment variable with a default value
///
/// # Example
/// ```
/// use typedflow::config::env;
///
/// let queue = env("TYPEDFLOW_TASK_QUEUE", "default".to_string());
/// let timeout: u64 = env("TYPEDFLOW_EXECUTION_TIMEOUT_SECS", 0);
/// ```
pub fn env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_optional(key).unwrap_or(default)
}

/// Get an optional environment variable
///
/// Unset variables and values that fail to parse both yield `None`.
pub fn env_optional<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
