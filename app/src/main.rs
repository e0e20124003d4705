use std::path::Path;
use typedflow::config::Config;
use typedflow::{FrameworkError, InMemoryClient, StartWorkflowOptions};

mod workflows;

#[tokio::main]
async fn main() -> Result<(), FrameworkError> {
    Config::init(Path::new("."));

    let client = InMemoryClient::new().register("hello_workflow", workflows::hello_workflow);

    for workflow in workflows::WORKFLOWS {
        println!("registered: {} ({})", workflow.name, workflow.description);
    }

    let name = "typedflow".to_string();
    let run = workflows::execute_say_hello_workflow(
        &client,
        StartWorkflowOptions::default().with_id("say-hello-1"),
        &name,
    )
    .await?;
    let response = run.get().await?;
    println!("sayHello -> {}", response.res);

    let run = workflows::execute_say_hello2_workflow(&client, StartWorkflowOptions::default(), &name)
        .await?;
    println!("sayHello2 -> {}", run.get().await?.res);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::workflows;
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use typedflow::{InMemoryClient, StartWorkflowOptions};

    #[test]
    fn test_generated_file_is_current() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
        let source = std::fs::read_to_string(dir.join("workflows.rs")).unwrap();
        let committed = std::fs::read_to_string(dir.join("workflow_results_gen.rs")).unwrap();

        let generated = typedflow_cli::generate_text(Path::new("workflows.rs"), &source).unwrap();
        assert_eq!(generated.code, committed);
    }

    #[tokio::test]
    async fn test_generated_launcher_returns_typed_result() {
        let client = InMemoryClient::new().register("hello_workflow", workflows::hello_workflow);

        let run = workflows::execute_say_hello_workflow(
            &client,
            StartWorkflowOptions::default(),
            &"world".to_string(),
        )
        .await
        .unwrap();
        let response = run.get().await.unwrap();

        assert!(response.res.starts_with("hello: world"));
    }

    #[tokio::test]
    async fn test_unregistered_workflow_fails_to_start() {
        let client = InMemoryClient::new();
        let result = workflows::execute_say_hello2_workflow(
            &client,
            StartWorkflowOptions::default(),
            &"world".to_string(),
        )
        .await;

        assert!(matches!(
            result,
            Err(typedflow::FrameworkError::WorkflowNotRegistered(name)) if name == "hello_workflow"
        ));
    }
}
