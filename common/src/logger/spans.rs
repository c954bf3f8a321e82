use tracing::Span;

use super::FlowId;

/// Root span for one session-acquisition run.
pub fn flow_span(name: &'static str, flow_id: &FlowId) -> Span {
    tracing::info_span!("flow", name = %name, flow_id = %flow_id.as_str())
}

/// Child span for a step inside a flow (inherits flow_id from the parent).
pub fn step_span(name: &'static str) -> Span {
    tracing::info_span!("step", name = %name)
}
