use console::style;
use std::path::{Path, PathBuf};
use typedflow_cli::{
    check_file, generate_directory, generate_file, CheckOutcome, Generated, GeneratorConfig,
};

pub struct Options {
    pub file: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub debug: bool,
    pub check: bool,
    pub watch: bool,
    pub dir: Option<PathBuf>,
}

/// Main entry point for the generate command
pub fn run(options: Options) {
    super::init_tracing(options.debug);

    if let Some(dir) = options.dir {
        run_directory(&dir, options.debug, options.check);
        return;
    }

    let config = GeneratorConfig::resolve(options.file, options.output, options.debug)
        .unwrap_or_else(|e| super::fail(e));

    if options.check {
        run_check(&config);
        return;
    }

    println!(
        "{} {}",
        style("Reading workflow registry from").cyan(),
        config.input.display()
    );

    match generate_file(&config) {
        Ok(generated) => report(&config, &generated),
        Err(e) => super::fail(e),
    }

    if options.watch {
        println!("{}", style("Watching for changes...").dim());
        if let Err(e) = start_watcher(&config) {
            super::fail(format!("Failed to start watcher: {}", e));
        }
    }
}

fn report(config: &GeneratorConfig, generated: &Generated) {
    if generated.records.is_empty() {
        println!("{}", style("Registry has no workflows.").yellow());
    } else {
        println!(
            "{} Found {} workflow(s)",
            style("->").green(),
            generated.records.len()
        );
    }
    println!("{} Generated {}", style("✓").green(), config.output.display());
}

fn run_check(config: &GeneratorConfig) {
    match check_file(config) {
        Ok(CheckOutcome::UpToDate) => {
            println!("{} {} is up to date", style("✓").green(), config.output.display());
        }
        Ok(CheckOutcome::Stale) => super::fail(format!(
            "{} is out of date, run `typedflow generate`",
            config.output.display()
        )),
        Ok(CheckOutcome::Missing) => super::fail(format!(
            "{} does not exist, run `typedflow generate`",
            config.output.display()
        )),
        Err(e) => super::fail(e),
    }
}

fn run_directory(dir: &Path, debug: bool, check: bool) {
    println!(
        "{} {}",
        style("Scanning for workflow registries in").cyan(),
        dir.display()
    );

    if check {
        let configs = typedflow_cli::generate::plan_directory(dir, debug)
            .unwrap_or_else(|e| super::fail(e));
        for config in &configs {
            run_check(config);
        }
        return;
    }

    match generate_directory(dir, debug) {
        Ok(results) if results.is_empty() => {
            println!("{}", style("No #[workflow_registry] found.").yellow());
        }
        Ok(results) => {
            for (config, generated) in &results {
                report(config, generated);
            }
        }
        Err(e) => super::fail(e),
    }
}

/// Start file watcher for automatic regeneration
fn start_watcher(config: &GeneratorConfig) -> Result<(), String> {
    use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
    use std::sync::mpsc::channel;
    use std::time::Duration;

    let (tx, rx) = channel();
    let watch_dir = match config.input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut watcher = RecommendedWatcher::new(
        move |res| {
            if let Ok(event) = res {
                let _ = tx.send(event);
            }
        },
        Config::default().with_poll_interval(Duration::from_secs(1)),
    )
    .map_err(|e| format!("Failed to create watcher: {}", e))?;

    watcher
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .map_err(|e| format!("Failed to watch directory: {}", e))?;

    println!(
        "{} Watching {} for changes",
        style("->").cyan(),
        config.input.display()
    );

    let input_name = config.input.file_name().map(|n| n.to_os_string());

    loop {
        match rx.recv() {
            Ok(event) => {
                // Our own writes land in the same directory; only the input matters
                let input_changed = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(|n| n.to_os_string()) == input_name);

                if input_changed {
                    println!("{}", style("Detected changes, regenerating...").dim());
                    match generate_file(config) {
                        Ok(generated) => {
                            println!(
                                "{} Regenerated {} workflow(s)",
                                style("✓").green(),
                                generated.records.len()
                            );
                        }
                        Err(e) => {
                            eprintln!("{} Failed to regenerate: {}", style("Error:").red(), e);
                        }
                    }
                }
            }
            Err(e) => {
                return Err(format!("Watch error: {}", e));
            }
        }
    }
}
