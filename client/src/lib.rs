//! Client library for the advocacy site's upstream services
//!
//! This library provides the document store abstraction and its HTTP and
//! in-memory implementations, the localized content resolver built on top of
//! it, and clients for the legacy blog REST API and the cloud file storage
//! that hosts publications.

pub mod blog;
pub mod cms;
pub mod error;
pub mod resolver;
pub mod storage;
pub mod store;

pub use blog::{BlogClient, BlogPost};
pub use cms::CmsDocumentStore;
pub use error::{ClientError, Result};
pub use resolver::LocalizedContentResolver;
pub use storage::{ClientCredentialsAuth, FileStorageClient, Publication, TokenCache};
pub use store::{DocumentQuery, DocumentStore, InMemoryDocumentStore};
