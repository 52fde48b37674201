//! HTTP-level tests for the SnipVault API over the in-memory store.

mod helpers;

mod health_test;
mod snippet_test;
mod version_test;
