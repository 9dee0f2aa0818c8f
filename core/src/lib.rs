//! Typed REST client template for exercising entity-CRUD services.
//!
//! # Overview
//! `ClientTemplate` performs find/create/update/delete against one resource
//! collection over blocking HTTP. The resource-specific parts, its collection
//! URI and default principal, come from an `Endpoint`; bodies are handled by a
//! `Marshaller`; the round-trip is delegated to a `Transport`.
//!
//! # Design
//! - Every operation blocks until the transport answers. The template keeps
//!   no per-call state; only the authenticated principal persists between
//!   calls.
//! - "Not found" on `find_one` is `Ok(None)`, never an error.
//! - Unexpected statuses, ambiguous lookups and bad paging arguments abort the
//!   operation with a `TemplateError`. Nothing is retried.
//! - `UserClient` is the concrete client for the `users` collection served
//!   by the mock-server crate.

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod marshaller;
pub mod query;
pub mod template;
pub mod transport;
pub mod types;
pub mod users;

pub use auth::{AuthScheme, Authenticator, Credentials};
pub use config::ClientConfig;
pub use error::{Result, TemplateError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use marshaller::{JsonMarshaller, Marshaller};
pub use query::{ClientOperation, Constraint, PageRequest, SortOrder};
pub use template::{ClientTemplate, Endpoint, EntityFixture, NameableResource};
pub use transport::{Transport, UreqTransport};
pub use types::User;
pub use users::{UserClient, UserEndpoint};
