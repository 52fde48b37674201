//! # snipvault-database
//!
//! Storage for snippets and their version history. The [`SnippetStore`]
//! trait is implemented by a PostgreSQL store (sqlx) and a process-local
//! in-memory store; [`open_store`] picks one from configuration.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod provider;
pub mod repositories;
pub mod store;

pub use connection::connect_pool;
pub use memory::MemorySnippetStore;
pub use postgres::PgSnippetStore;
pub use provider::open_store;
pub use store::SnippetStore;
