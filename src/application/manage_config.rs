//! Config management use case

use crate::error::{FormsiteError, Result};
use crate::infrastructure::{Config, FileSystemRepository, SiteRepository};

const VALID_KEYS: &str = "site_name, base_url, og_type, twitter_card, og_image, created";

/// Service for managing site configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "site_name" => Ok(config.site_name),
            "base_url" => Ok(config.base_url),
            "og_type" => Ok(config.defaults.og_type),
            "twitter_card" => Ok(config.defaults.twitter_card),
            "og_image" => Ok(config.defaults.og_image.unwrap_or_default()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(FormsiteError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}",
                key, VALID_KEYS
            ))),
        }
    }

    /// Set a config value; an empty `og_image` clears it
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "site_name" => config.site_name = Self::non_empty(key, value)?,
            "base_url" => config.base_url = Self::non_empty(key, value)?,
            "og_type" => config.defaults.og_type = Self::non_empty(key, value)?,
            "twitter_card" => config.defaults.twitter_card = Self::non_empty(key, value)?,
            "og_image" => {
                config.defaults.og_image = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "created" => {
                return Err(FormsiteError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(FormsiteError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: {}",
                    key, VALID_KEYS
                )));
            }
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }

    fn non_empty(key: &str, value: &str) -> Result<String> {
        if value.trim().is_empty() {
            return Err(FormsiteError::Config(format!("'{}' must not be empty", key)));
        }
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::init::InitService;
    use tempfile::TempDir;

    fn service() -> (TempDir, ConfigService) {
        let temp = TempDir::new().unwrap();
        InitService::execute(temp.path(), "Formly", "https://formly.example").unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        (temp, ConfigService::new(repo))
    }

    #[test]
    fn test_get_and_set() {
        let (_temp, service) = service();
        assert_eq!(service.get("og_type").unwrap(), "website");

        service.set("og_type", "product").unwrap();
        assert_eq!(service.get("og_type").unwrap(), "product");
    }

    #[test]
    fn test_og_image_set_and_clear() {
        let (_temp, service) = service();
        assert_eq!(service.get("og_image").unwrap(), "");

        service.set("og_image", "https://formly.example/og.png").unwrap();
        assert_eq!(
            service.list().unwrap().defaults.og_image.as_deref(),
            Some("https://formly.example/og.png")
        );

        service.set("og_image", "").unwrap();
        assert!(service.list().unwrap().defaults.og_image.is_none());
    }

    #[test]
    fn test_created_is_read_only() {
        let (_temp, service) = service();
        let err = service.set("created", "2020-01-01T00:00:00Z").unwrap_err();
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_unknown_key() {
        let (_temp, service) = service();
        assert!(service.get("theme").is_err());
        assert!(service.set("theme", "dark").is_err());
    }

    #[test]
    fn test_empty_site_name_rejected() {
        let (_temp, service) = service();
        assert!(service.set("site_name", "  ").is_err());
    }
}
