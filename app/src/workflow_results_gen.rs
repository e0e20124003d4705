// Code generated by typedflow from workflows.rs. DO NOT EDIT.
//
// Typed launchers for the workflows registered in `workflows`.
// Pull this file in next to the registry with `include!`.

/// Start the `sayHello` workflow and return a typed handle to the run.
pub async fn execute_say_hello_workflow(
    client: &dyn ::typedflow::Client,
    options: ::typedflow::StartWorkflowOptions,
    input: &String,
) -> ::std::result::Result<::std::boxed::Box<dyn SayHelloRun>, ::typedflow::FrameworkError> {
    let run = client
        .execute_workflow(options, "hello_workflow", ::typedflow::to_payload(input)?)
        .await?;
    ::std::result::Result::Ok(::std::boxed::Box::new(SayHelloRunImpl {
        run: ::typedflow::TypedRun::new(run),
    }))
}

/// A started `sayHello` workflow.
#[::typedflow::async_trait]
pub trait SayHelloRun: ::std::marker::Send + ::std::marker::Sync {
    /// Wait for the run to finish and return its `Response` result.
    async fn get(&self) -> ::std::result::Result<Response, ::typedflow::FrameworkError>;
}

/// `SayHelloRun` backed by the runtime's narrowing adapter.
pub struct SayHelloRunImpl {
    run: ::typedflow::TypedRun<Response>,
}

#[::typedflow::async_trait]
impl SayHelloRun for SayHelloRunImpl {
    async fn get(&self) -> ::std::result::Result<Response, ::typedflow::FrameworkError> {
        self.run.get().await
    }
}

/// Start the `sayHello2` workflow and return a typed handle to the run.
pub async fn execute_say_hello2_workflow(
    client: &dyn ::typedflow::Client,
    options: ::typedflow::StartWorkflowOptions,
    input: &String,
) -> ::std::result::Result<::std::boxed::Box<dyn SayHello2Run>, ::typedflow::FrameworkError> {
    let run = client
        .execute_workflow(options, "hello_workflow", ::typedflow::to_payload(input)?)
        .await?;
    ::std::result::Result::Ok(::std::boxed::Box::new(SayHello2RunImpl {
        run: ::typedflow::TypedRun::new(run),
    }))
}

/// A started `sayHello2` workflow.
#[::typedflow::async_trait]
pub trait SayHello2Run: ::std::marker::Send + ::std::marker::Sync {
    /// Wait for the run to finish and return its `Response` result.
    async fn get(&self) -> ::std::result::Result<Response, ::typedflow::FrameworkError>;
}

/// `SayHello2Run` backed by the runtime's narrowing adapter.
pub struct SayHello2RunImpl {
    run: ::typedflow::TypedRun<Response>,
}

#[::typedflow::async_trait]
impl SayHello2Run for SayHello2RunImpl {
    async fn get(&self) -> ::std::result::Result<Response, ::typedflow::FrameworkError> {
        self.run.get().await
    }
}
