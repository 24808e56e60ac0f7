//! Shared test infrastructure for service tests.

mod context;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
