//! Caller identity resolution.

pub(crate) mod middleware;

/// Header carrying the caller's user UUID, set by the upstream gateway.
pub(crate) const USER_UUID_HEADER: &str = "x-user-uuid";
