//! Address book core
//!
//! Reconciliation logic behind the address pickers and edit forms. All of it
//! is pure and synchronous: callers fetch the data, these functions decide.
//!
//! # Components
//!
//! - `resolver`: normalizes server, extracted and suggested records into a
//!   [`CanonicalAddress`](address_types::CanonicalAddress)
//! - `eligibility`: decides whether an address may be deleted
//! - `classifier`: maps categories and role flags to role sets and edit options
//! - `merger`: merges extracted, suggested and directory candidates into one
//!   ranked, deduplicated list
//!
//! # Example
//!
//! ```rust,ignore
//! use address_book::merge_candidates;
//!
//! let candidates = merge_candidates("", &server_page, &extracted, &suggested);
//! ```

pub mod classifier;
pub mod eligibility;
pub mod merger;
pub mod resolver;

pub use classifier::{classify, fill_types, roles_from_flags, FillTypesOptions};
pub use eligibility::evaluate_deletion;
pub use merger::{merge, merge_candidates};
pub use resolver::{resolve, resolve_all, ResolvedBatch};

// Re-export the data model for convenience
pub use address_types;
