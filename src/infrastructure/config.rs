//! Site configuration management

use crate::domain::page_meta::{DEFAULT_OG_TYPE, DEFAULT_TWITTER_CARD};
use crate::domain::text::plain_text;
use crate::domain::PageMeta;
use crate::error::{FormsiteError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "formsite.toml";

/// Social-preview defaults applied to pages without overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaDefaults {
    pub og_type: String,
    pub twitter_card: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
}

impl Default for MetaDefaults {
    fn default() -> Self {
        MetaDefaults {
            og_type: DEFAULT_OG_TYPE.to_string(),
            twitter_card: DEFAULT_TWITTER_CARD.to_string(),
            og_image: None,
        }
    }
}

/// A marketing page and the metadata it publishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    pub slug: String,
    pub path: String,
    pub title: String,
    /// May contain Markdown; flattened before use
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_card: Option<String>,
}

impl PageEntry {
    pub fn new(
        slug: impl Into<String>,
        path: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        PageEntry {
            slug: slug.into(),
            path: path.into(),
            title: title.into(),
            description: description.into(),
            og_image: None,
            og_type: None,
            twitter_card: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site_name: String,
    pub base_url: String,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub defaults: MetaDefaults,
    #[serde(default)]
    pub pages: Vec<PageEntry>,
}

impl Config {
    /// Create a new config with the starter pages of a form-builder site
    pub fn new(site_name: impl Into<String>, base_url: impl Into<String>) -> Self {
        let site_name = site_name.into();
        let pages = vec![
            PageEntry::new(
                "home",
                "/",
                site_name.clone(),
                "Build beautiful forms and surveys in minutes.",
            ),
            PageEntry::new(
                "pricing",
                "/pricing",
                "Pricing",
                "Simple plans that grow with your **responses**.",
            ),
            PageEntry::new(
                "templates",
                "/templates",
                "Templates",
                "Start from a ready-made form template.",
            ),
        ];

        Config {
            site_name,
            base_url: base_url.into(),
            created: Utc::now(),
            defaults: MetaDefaults::default(),
            pages,
        }
    }

    /// Load config from formsite.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FormsiteError::NotSiteDirectory(path.to_path_buf())
            } else {
                FormsiteError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| FormsiteError::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to formsite.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| FormsiteError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path.join(CONFIG_FILE), contents)?;

        Ok(())
    }

    pub fn page(&self, slug: &str) -> Option<&PageEntry> {
        self.pages.iter().find(|page| page.slug == slug)
    }

    /// Resolve the metadata of a page, applying site defaults
    pub fn page_meta(&self, slug: &str) -> Result<PageMeta> {
        let page = self
            .page(slug)
            .ok_or_else(|| FormsiteError::PageNotFound(slug.to_string()))?;

        let og_image = page.og_image.clone().or_else(|| self.defaults.og_image.clone());
        Ok(PageMeta {
            title: page.title.clone(),
            description: plain_text(&page.description),
            og_image,
            og_type: page
                .og_type
                .clone()
                .unwrap_or_else(|| self.defaults.og_type.clone()),
            twitter_card: page
                .twitter_card
                .clone()
                .unwrap_or_else(|| self.defaults.twitter_card.clone()),
        })
    }

    fn validate(&self) -> Result<()> {
        for (index, page) in self.pages.iter().enumerate() {
            if page.slug.trim().is_empty() {
                return Err(FormsiteError::Config(format!(
                    "Page #{} has an empty slug",
                    index + 1
                )));
            }
            if page.title.trim().is_empty() || page.description.trim().is_empty() {
                return Err(FormsiteError::Config(format!(
                    "Page '{}' needs both a title and a description",
                    page.slug
                )));
            }
            if self.pages[..index].iter().any(|p| p.slug == page.slug) {
                return Err(FormsiteError::Config(format!(
                    "Duplicate page slug: '{}'",
                    page.slug
                )));
            }
        }
        Ok(())
    }
}
