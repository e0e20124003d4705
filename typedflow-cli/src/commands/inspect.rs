use console::style;
use std::path::PathBuf;
use typedflow_cli::naming::{format_string, to_pascal_case, to_snake_case};
use typedflow_cli::source::read_source;
use typedflow_cli::{FuncReference, GeneratorConfig};

/// Main entry point for the inspect command
pub fn run(file: Option<PathBuf>, debug: bool) {
    super::init_tracing(debug);

    let config = GeneratorConfig::resolve(file, None, debug).unwrap_or_else(|e| super::fail(e));
    let source = read_source(&config.input).unwrap_or_else(|e| super::fail(e));
    let records = typedflow_cli::generate::resolve(&source).unwrap_or_else(|e| super::fail(e));

    if records.is_empty() {
        println!("{}", style("Registry has no workflows.").yellow());
        return;
    }

    println!(
        "{} {} workflow(s) in {}",
        style("->").green(),
        records.len(),
        config.input.display()
    );

    for record in &records {
        let origin = match &record.func {
            FuncReference::Named(_) => "",
            FuncReference::Inline { .. } => " (inline)",
        };

        println!();
        println!(
            "  {} {}",
            style(format_string(&record.name)).bold(),
            style(format!("line {}", record.line)).dim()
        );
        println!("    function: {}{}", record.func.ident(), origin);
        println!("    input:    {}", record.input_type);
        println!("    result:   {}", record.result_type);
        println!(
            "    emits:    execute_{}_workflow, {}Run, {}RunImpl",
            to_snake_case(&record.name),
            to_pascal_case(&record.name),
            to_pascal_case(&record.name)
        );
    }
}
