//! List pages use case

use crate::error::Result;
use crate::infrastructure::{FileSystemRepository, PageEntry, SiteRepository};

/// Service for listing the configured pages
pub struct ListPagesService {
    repository: FileSystemRepository,
}

impl ListPagesService {
    pub fn new(repository: FileSystemRepository) -> Self {
        Self { repository }
    }

    /// Pages in configuration order
    pub fn execute(&self) -> Result<Vec<PageEntry>> {
        Ok(self.repository.load_config()?.pages)
    }
}
