//! Infrastructure layer - Document heads, configuration and persistence

pub mod config;
pub mod head;
pub mod repository;
pub mod sink;

pub use config::{Config, MetaDefaults, PageEntry};
pub use head::{HeadDocument, HeadNode};
pub use repository::{FileSystemRepository, FormEntry, SiteRepository};
pub use sink::{DetachedDocument, MetadataSink};
