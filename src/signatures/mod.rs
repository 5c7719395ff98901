//! Abuse-signature catalog and store.
//!
//! Signatures are grouped by category (injection, manipulation,
//! diagnostic labeling, jailbreak, PII extraction) and compiled into an
//! immutable, versioned [`SignatureSet`]. The [`SignatureStore`] owns the
//! active set and supports out-of-band reloads after a blacklist audit.

pub mod catalog;
pub mod store;

pub use catalog::{adversarial_corpus, builtin_signature_file, SignalCategory, SignatureFile};
pub use store::{SignatureError, SignatureSet, SignatureStore};
