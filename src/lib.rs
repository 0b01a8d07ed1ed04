//! formsite - Page metadata and form definitions for a form-builder website
//!
//! The core is the page-meta synchronizer in [`application::sync`]: it applies
//! a page's title, description and social-preview tags to a document head
//! and restores the previous head exactly when the page goes away. The head
//! is reached through the [`infrastructure::MetadataSink`] trait, so the same
//! code runs against an in-memory [`infrastructure::HeadDocument`] or any
//! other document implementation.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::FormsiteError;
