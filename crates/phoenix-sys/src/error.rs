//! Error type for symbol resolution.

use thiserror::Error;

/// A declared symbol could not be resolved from the loaded library.
#[derive(Error, Debug)]
#[error("Missing symbol `{symbol}`: {source}")]
pub struct SymbolError {
    /// Name of the symbol as declared in the vendored header.
    pub symbol: &'static str,
    /// Underlying loader error.
    #[source]
    pub source: libloading::Error,
}
