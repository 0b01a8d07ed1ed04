//! File system repository

use crate::domain::Form;
use crate::error::{FormsiteError, Result};
use crate::infrastructure::config::CONFIG_FILE;
use crate::infrastructure::{Config, HeadDocument, MetadataSink};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub const HEAD_FILE: &str = "head.html";
pub const FORMS_DIR: &str = "forms";

/// A form definition together with the file it came from
#[derive(Debug, Clone, PartialEq)]
pub struct FormEntry {
    pub path: PathBuf,
    pub form: Form,
}

/// Abstract repository for site operations
pub trait SiteRepository {
    /// Get the root directory of this site
    fn root(&self) -> &Path;

    /// Load configuration from formsite.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to formsite.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if formsite.toml exists
    fn is_initialized(&self) -> bool;

    /// Load the base document head
    fn load_head(&self) -> Result<HeadDocument>;

    /// Load and validate every form definition
    fn load_forms(&self) -> Result<Vec<FormEntry>>;
}

/// File system implementation of SiteRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover site root by walking up from current directory
    /// First checks FORMSITE_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("FORMSITE_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_config(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(FormsiteError::Config(format!(
                    "FORMSITE_ROOT is set to '{}' but no {} found there. \
                    Run 'formsite init' in that directory or unset FORMSITE_ROOT.",
                    path.display(),
                    CONFIG_FILE
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover site root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_config(&current) {
                debug!(root = %current.display(), "discovered site root");
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(FormsiteError::NotSiteDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_config(path: &Path) -> bool {
        path.join(CONFIG_FILE).is_file()
    }

    /// Create the forms directory and base head for a new site
    pub fn initialize(&self, site_name: &str) -> Result<()> {
        if self.is_initialized() {
            return Err(FormsiteError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(self.root.join(FORMS_DIR))?;

        let head_path = self.root.join(HEAD_FILE);
        if !head_path.exists() {
            let mut head = HeadDocument::parse(
                "<meta charset=\"utf-8\">\n\
                <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
            )?;
            head.set_title(site_name)?;
            fs::write(&head_path, head.render())?;
        }

        Ok(())
    }

    fn read_form(path: &Path) -> Result<Form> {
        let contents = fs::read_to_string(path)?;
        let form: Form = serde_json::from_str(&contents).map_err(|e| {
            FormsiteError::InvalidForm(format!("{}: {}", path.display(), e))
        })?;
        form.validate()?;
        Ok(form)
    }
}

impl SiteRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_config(&self.root)
    }

    /// A missing head.html yields an empty head
    fn load_head(&self) -> Result<HeadDocument> {
        let path = self.root.join(HEAD_FILE);
        if !path.exists() {
            return Ok(HeadDocument::new());
        }
        HeadDocument::parse(&fs::read_to_string(path)?)
    }

    fn load_forms(&self) -> Result<Vec<FormEntry>> {
        let forms_dir = self.root.join(FORMS_DIR);
        if !forms_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&forms_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some("json")
            {
                continue;
            }

            let form = Self::read_form(path)?;
            if let Some(existing) = entries.iter().find(|e: &&FormEntry| e.form.id == form.id) {
                return Err(FormsiteError::InvalidForm(format!(
                    "form id '{}' is defined in both {} and {}",
                    form.id,
                    existing.path.display(),
                    path.display()
                )));
            }
            debug!(form = %form.id, path = %path.display(), "loaded form");
            entries.push(FormEntry {
                path: path.to_path_buf(),
                form,
            });
        }

        Ok(entries)
    }
}
