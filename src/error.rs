//! Error types for formsite

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for formsite
#[derive(Debug, Error)]
pub enum FormsiteError {
    #[error("Not a formsite directory: {0}")]
    NotSiteDirectory(PathBuf),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Form not found: {0}")]
    FormNotFound(String),

    #[error("Invalid form: {0}")]
    InvalidForm(String),

    #[error("question '{id}': {reason}")]
    InvalidQuestion { id: String, reason: String },

    #[error("No document context available")]
    NoDocument,

    #[error("Head parse error: {0}")]
    Head(String),

    #[error("Head changed after restore: {0}")]
    HeadMismatch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl FormsiteError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            FormsiteError::NotSiteDirectory(_) => 2,
            FormsiteError::PageNotFound(_) => 3,
            FormsiteError::FormNotFound(_) => 4,
            FormsiteError::InvalidForm(_) | FormsiteError::InvalidQuestion { .. } => 5,
            FormsiteError::HeadMismatch(_) => 6,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            FormsiteError::NotSiteDirectory(path) => {
                format!(
                    "Not a formsite directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'formsite init' in this directory to create a new site\n\
                    • Navigate to an existing site directory\n\
                    • Set FORMSITE_ROOT environment variable to your site path",
                    path.display()
                )
            }
            FormsiteError::PageNotFound(slug) => {
                format!(
                    "Page not found: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'formsite pages' to see configured pages\n\
                    • Add a [[pages]] entry with slug = \"{}\" to formsite.toml",
                    slug, slug
                )
            }
            FormsiteError::FormNotFound(id) => {
                format!(
                    "Form not found: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'formsite forms' to list available forms\n\
                    • Form files live under forms/ and are matched by their \"id\" field",
                    id
                )
            }
            FormsiteError::InvalidForm(_) | FormsiteError::InvalidQuestion { .. } => {
                format!(
                    "{}\n\n\
                    Question types: shortText, longText, multipleChoice, rating, email, \
                    yesNo, number, date, dropdown\n\
                    • 'options' is only allowed on multipleChoice and dropdown\n\
                    • 'maxRating' is only allowed on rating (1-10)\n\
                    • 'allowMultiple' is only allowed on multipleChoice",
                    self
                )
            }
            FormsiteError::NoDocument => "No document context available\n\n\
                Page metadata can only be applied to a document head.\n\
                Check that head.html exists in the site directory."
                .to_string(),
            FormsiteError::Config(msg) => {
                if msg.contains("Unknown config key") {
                    format!(
                        "{}\n\n\
                        Example: formsite config og_type article",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using FormsiteError
pub type Result<T> = std::result::Result<T, FormsiteError>;
