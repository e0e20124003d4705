pub mod generate;
pub mod inspect;

use console::style;
use typedflow_cli::config::debug_from_env;

/// Install the stderr subscriber; `--debug` or `TYPEDFLOW_DEBUG` overrides `RUST_LOG`
pub fn init_tracing(debug: bool) {
    let filter = if debug || debug_from_env() {
        tracing_subscriber::EnvFilter::new("typedflow_cli=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print an error and exit 1
pub fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", style("Error:").red().bold(), message);
    std::process::exit(1);
}
