//! End-to-end runs of the generator against registry files on disk

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use typedflow_cli::{generate_file, generate_text, GenerateError, GeneratorConfig};

const HELLO: &str = r#"
use serde::{Deserialize, Serialize};
use typedflow::{workflow, workflow_registry, FrameworkError, Workflow, WorkflowContext};

#[workflow_registry]
pub static WORKFLOWS: &[Workflow] = &[
    Workflow {
        name: "sayHello",
        description: "This is the sayHello workflow",
        func: &hello_workflow,
    },
    Workflow {
        name: "sayHello2",
        description: "This is the sayHello workflow again",
        func: &hello_workflow,
    },
];

#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    pub res: String,
}

#[workflow]
pub async fn hello_workflow(_ctx: WorkflowContext, params: String) -> Result<Response, FrameworkError> {
    Ok(Response { res: format!("hello: {}", params) })
}
"#;

fn item_names(code: &str) -> Vec<String> {
    syn::parse_file(code)
        .expect("generated code parses")
        .items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Fn(f) => Some(f.sig.ident.to_string()),
            syn::Item::Trait(t) => Some(t.ident.to_string()),
            syn::Item::Struct(s) => Some(s.ident.to_string()),
            _ => None,
        })
        .collect()
}

#[test]
fn hello_registry_yields_two_wrapper_sets() {
    let generated = generate_text(Path::new("workflows.rs"), HELLO).unwrap();

    assert_eq!(
        item_names(&generated.code),
        vec![
            "execute_say_hello_workflow",
            "SayHelloRun",
            "SayHelloRunImpl",
            "execute_say_hello2_workflow",
            "SayHello2Run",
            "SayHello2RunImpl",
        ]
    );

    for record in &generated.records {
        assert_eq!(record.func.ident(), "hello_workflow");
        assert_eq!(record.input_type, "String");
        assert_eq!(record.result_type, "Response");
    }

    assert_eq!(generated.code.matches("input: &String,").count(), 2);
    assert_eq!(generated.code.matches("::typedflow::TypedRun<Response>").count(), 2);
    assert!(generated.code.contains("/// Start the `sayHello` workflow"));
    assert!(generated.code.contains("/// Start the `sayHello2` workflow"));
}

#[test]
fn execute_functions_follow_source_order() {
    let source = r#"
#[workflow_registry]
static WORKFLOWS: &[Workflow] = &[
    Workflow { name: "zeta", description: "", func: &run },
    Workflow { name: "alpha", description: "", func: &run },
    Workflow { name: "mid", description: "", func: &run },
];

async fn run(ctx: WorkflowContext, input: Order) -> Result<Receipt, FrameworkError> {
    todo!()
}
"#;
    let generated = generate_text(Path::new("workflows.rs"), source).unwrap();
    let executes: Vec<String> = item_names(&generated.code)
        .into_iter()
        .filter(|name| name.starts_with("execute_"))
        .collect();

    assert_eq!(
        executes,
        vec![
            "execute_zeta_workflow",
            "execute_alpha_workflow",
            "execute_mid_workflow",
        ]
    );
}

#[test]
fn wrong_arity_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("workflows.rs");
    fs::write(
        &input,
        HELLO.replace(
            "_ctx: WorkflowContext, params: String",
            "params: String",
        ),
    )
    .unwrap();

    let config = GeneratorConfig::for_input(input, false);
    let err = generate_file(&config).unwrap_err();

    assert!(matches!(err, GenerateError::SignatureShape { .. }));
    assert!(!config.output.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn unknown_function_is_reported_by_name() {
    let err = generate_text(
        Path::new("workflows.rs"),
        &HELLO.replacen("func: &hello_workflow", "func: &goodbye_workflow", 1),
    )
    .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("goodbye_workflow"), "{}", message);
    assert!(message.contains("sayHello"), "{}", message);
}

#[test]
fn inline_closure_is_lifted_into_output() {
    let source = r#"
#[workflow_registry]
static WORKFLOWS: &[Workflow] = &[
    Workflow {
        name: "echo",
        description: "returns its input",
        func: &|_ctx: WorkflowContext, input: String| -> Result<String, FrameworkError> {
            Ok(input)
        },
    },
];
"#;
    let generated = generate_text(Path::new("workflows.rs"), source).unwrap();

    assert_eq!(
        item_names(&generated.code),
        vec![
            "execute_echo_workflow",
            "EchoRun",
            "EchoRunImpl",
            "echo_inline_workflow",
        ]
    );
    assert!(generated.code.contains("\"echo_inline_workflow\""));
    assert!(generated.code.contains(
        "pub async fn echo_inline_workflow(_ctx: WorkflowContext, input: String) -> Result<String, FrameworkError> {\n    Ok(input)\n}\n"
    ));
}

#[test]
fn two_marked_registries_are_ambiguous() {
    let source = r#"
#[workflow_registry]
static FIRST: &[Workflow] = &[];
#[workflow_registry]
static SECOND: &[Workflow] = &[];
"#;
    let err = generate_text(Path::new("workflows.rs"), source).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("FIRST") && message.contains("SECOND"), "{}", message);
}

#[test]
fn file_without_registry_is_rejected() {
    let err = generate_text(Path::new("workflows.rs"), "pub fn nothing() {}").unwrap_err();
    assert!(matches!(err, GenerateError::RegistryNotFound { .. }));
}
