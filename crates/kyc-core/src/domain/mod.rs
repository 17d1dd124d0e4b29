//! Domain policy for the KYC webview bridge.
//!
//! Pure business rules with no serialization, I/O, or framework
//! dependencies.  The protocol layer depends on this module, never the
//! other way around.

pub mod heuristic;

pub use heuristic::{classify_by_name, NameVerdict};
