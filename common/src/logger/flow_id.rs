use uuid::Uuid;

/// Correlation id for one session-acquisition run. Every log line emitted
/// under the flow span carries it, so interleaved runs stay separable.
#[derive(Clone, Debug)]
pub struct FlowId(String);

impl FlowId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FlowId {
    fn default() -> Self {
        Self(Uuid::new_v4().as_hyphenated().to_string())
    }
}
