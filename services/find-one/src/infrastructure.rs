// Infrastructure layer modules
pub mod config;
pub mod document_store;
pub mod logging;

// Re-exports
pub use config::{ConfigError, MongoConfig};
pub use document_store::{
    DocumentConnection, DocumentStore, MongoConnection, MongoDocumentStore, StoreError,
};
pub use logging::init_logging;
