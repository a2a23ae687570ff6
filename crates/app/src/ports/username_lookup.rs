//! Username lookup port — asks the issue tracker whether a user exists.

use std::future::Future;

use labsindex_domain::error::LabsIndexError;

/// Existence check against the issue tracker's public user endpoint.
///
/// Implementations are expected to bound their own latency and report a
/// timeout as an error. The futures are not `Send`: lookups run on the
/// browser's single event loop.
pub trait UsernameLookup {
    /// HTTP status returned for `username`.
    fn lookup(&self, username: &str) -> impl Future<Output = Result<u16, LabsIndexError>>;
}
