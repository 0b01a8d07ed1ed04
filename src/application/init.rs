//! Initialize site use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, SiteRepository};
use std::fs;
use std::path::Path;
use tracing::info;

/// Service for scaffolding a new site directory
pub struct InitService;

impl InitService {
    /// Initialize a new site at the specified path
    pub fn execute(path: &Path, site_name: &str, base_url: &str) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        let repo = FileSystemRepository::new(path.to_path_buf());

        // Fails if formsite.toml already exists
        repo.initialize(site_name)?;

        let config = Config::new(site_name, base_url);
        repo.save_config(&config)?;
        info!(root = %path.display(), pages = config.pages.len(), "initialized site");

        println!("Initialized formsite site at {}", path.display());
        println!("Site: {} ({})", config.site_name, config.base_url);

        Ok(())
    }
}
