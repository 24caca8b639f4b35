// Domain layer modules
pub mod query_result;
pub mod response_envelope;

// Re-exports
pub use query_result::QueryResult;
pub use response_envelope::{ErrorBody, ResponseEnvelope, STATUS_INTERNAL_ERROR, STATUS_OK};
