mod flow_id;
mod init;
mod spans;

pub use flow_id::FlowId;
pub use init::init_logger;
pub use spans::{flow_span, step_span};
