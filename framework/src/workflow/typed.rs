//! Narrowing adapter
//!
//! [`TypedRun`] is the single point where an untyped run result becomes a
//! concrete Rust type. Nothing checks at compile time that the workflow
//! function really returns `T`; the check happens here, at runtime, when the
//! JSON value is deserialized. Generated launchers pick `T` from the
//! workflow function's signature, so a mismatch means the registry and the
//! worker disagree.

use crate::error::FrameworkError;
use crate::workflow::{WorkflowRun, WorkflowStatus};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;

/// Typed view over an untyped [`WorkflowRun`]
pub struct TypedRun<T> {
    run: Box<dyn WorkflowRun>,
    _result: PhantomData<fn() -> T>,
}

impl<T> TypedRun<T>
where
    T: DeserializeOwned + Send,
{
    pub fn new(run: Box<dyn WorkflowRun>) -> Self {
        Self {
            run,
            _result: PhantomData,
        }
    }

    pub fn workflow_id(&self) -> &str {
        self.run.workflow_id()
    }

    pub fn run_id(&self) -> &str {
        self.run.run_id()
    }

    pub fn status(&self) -> WorkflowStatus {
        self.run.status()
    }

    /// Wait for the run and narrow its result to `T`
    pub async fn get(&self) -> Result<T, FrameworkError> {
        let value = self.run.get().await?;
        self.narrow(value)
    }

    fn narrow(&self, value: Value) -> Result<T, FrameworkError> {
        serde_json::from_value(value).map_err(|e| FrameworkError::ResultType {
            workflow_id: self.run.workflow_id().to_string(),
            expected: std::any::type_name::<T>(),
            message: e.to_string(),
        })
    }

    /// Give back the untyped handle
    pub fn into_inner(self) -> Box<dyn WorkflowRun> {
        self.run
    }
}

/// Serialize a workflow input into the payload sent to a client
pub fn to_payload<T: Serialize + ?Sized>(input: &T) -> Result<Value, FrameworkError> {
    Ok(serde_json::to_value(input)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    struct FinishedRun(Value);

    #[async_trait]
    impl WorkflowRun for FinishedRun {
        fn workflow_id(&self) -> &str {
            "finished"
        }

        fn run_id(&self) -> &str {
            "run-0"
        }

        fn status(&self) -> WorkflowStatus {
            WorkflowStatus::Succeeded
        }

        async fn get(&self) -> Result<Value, FrameworkError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Greeting {
        res: String,
    }

    #[tokio::test]
    async fn test_narrows_matching_value() {
        let run: TypedRun<Greeting> = TypedRun::new(Box::new(FinishedRun(json!({ "res": "hi" }))));
        let greeting = run.get().await.unwrap();
        assert_eq!(
            greeting,
            Greeting {
                res: "hi".to_string()
            }
        );
        assert_eq!(run.run_id(), "run-0");
    }

    #[tokio::test]
    async fn test_reports_mismatched_value() {
        let run: TypedRun<Greeting> = TypedRun::new(Box::new(FinishedRun(json!(42))));
        match run.get().await {
            Err(FrameworkError::ResultType {
                workflow_id,
                expected,
                ..
            }) => {
                assert_eq!(workflow_id, "finished");
                assert!(expected.ends_with("Greeting"));
            }
            other => panic!("expected ResultType error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_to_payload_accepts_unsized_input() {
        assert_eq!(to_payload("world").unwrap(), json!("world"));
    }
}
