// Generated-file templates

/// Name the results template is registered under; the `.rs` suffix keeps
/// auto-escaping off
pub const WORKFLOW_RESULTS: &str = "workflow_results.rs";

pub fn workflow_results() -> &'static str {
    include_str!("files/workflow_results.rs.tpl")
}
