//! Shared fixtures for the integration tests.

use std::sync::Arc;

use ctre_phoenix::PhoenixLibrary;
use ctre_phoenix_mock::MockSession;

/// A library backed by the in-process mock, plus a fresh session for this thread.
pub fn mock_library() -> (MockSession, Arc<PhoenixLibrary>) {
    let session = MockSession::install();
    // SAFETY: the mock table points at functions linked into this binary and
    // implements the vendored contract for any argument values.
    let library = unsafe { PhoenixLibrary::from_api(ctre_phoenix_mock::api()) };
    (session, library)
}
