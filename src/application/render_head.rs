//! Render page head use case

use crate::application::sync::activate;
use crate::error::{FormsiteError, Result};
use crate::infrastructure::{FileSystemRepository, HeadDocument, SiteRepository};
use tracing::info;

/// Outcome of a full activate/deactivate cycle on the base head
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadCheck {
    /// Head while the page meta was active
    pub active: String,
    /// Tags created by the activation
    pub created: usize,
    /// Existing tags overwritten by the activation
    pub updated: usize,
}

/// Service for rendering the head of a configured page
pub struct RenderHeadService {
    repository: FileSystemRepository,
}

impl RenderHeadService {
    pub fn new(repository: FileSystemRepository) -> Self {
        Self { repository }
    }

    /// Render the base head with the page's meta applied
    pub fn execute(&self, slug: &str) -> Result<String> {
        let meta = self.repository.load_config()?.page_meta(slug)?;
        let mut head = self.repository.load_head()?;

        let activation = activate(&mut head, &meta)?;
        let rendered = activation.sink().render();
        activation.deactivate()?;

        info!(page = slug, "rendered head");
        Ok(rendered)
    }

    /// Apply and then remove the page's meta, failing unless the head comes
    /// back unchanged
    pub fn check(&self, slug: &str) -> Result<HeadCheck> {
        let meta = self.repository.load_config()?.page_meta(slug)?;
        let original = self.repository.load_head()?;
        let mut head = original.clone();

        let activation = activate(&mut head, &meta)?;
        let active = activation.sink().render();
        let (created, updated) = activation
            .snapshots()
            .map(|s| {
                let created = s.tags().iter().filter(|t| t.was_created).count();
                (created, s.tags().len() - created)
            })
            .unwrap_or_default();
        activation.deactivate()?;

        verify_restored(&original, &head)?;
        info!(page = slug, created, updated, "head restored after cycle");

        Ok(HeadCheck {
            active,
            created,
            updated,
        })
    }
}

fn verify_restored(original: &HeadDocument, restored: &HeadDocument) -> Result<()> {
    if original == restored {
        return Ok(());
    }

    let expected = original.render();
    let actual = restored.render();
    let first_diff = expected
        .lines()
        .zip(actual.lines())
        .find(|(a, b)| a != b)
        .map(|(a, b)| format!("expected '{}', found '{}'", a, b))
        .unwrap_or_else(|| {
            format!(
                "expected {} nodes, found {}",
                original.nodes().len(),
                restored.nodes().len()
            )
        });
    Err(FormsiteError::HeadMismatch(first_diff))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::init::InitService;
    use std::fs;
    use tempfile::TempDir;

    fn site(head: &str) -> (TempDir, RenderHeadService) {
        let temp = TempDir::new().unwrap();
        InitService::execute(temp.path(), "Formly", "https://formly.example").unwrap();
        fs::write(temp.path().join("head.html"), head).unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        (temp, RenderHeadService::new(repo))
    }

    #[test]
    fn test_execute_renders_page_meta() {
        let (_temp, service) = site(r#"<title>Site</title><meta name="description" content="Home">"#);
        let head = service.execute("pricing").unwrap();

        assert!(head.contains("<title>Pricing</title>"));
        assert!(head.contains(
            r#"<meta name="description" content="Simple plans that grow with your responses.">"#
        ));
        assert!(head.contains(r#"<meta property="og:type" content="website">"#));
        assert!(!head.contains("og:image"));
    }

    #[test]
    fn test_check_counts_tags() {
        let (_temp, service) = site(r#"<title>Site</title><meta name="description" content="Home">"#);
        let check = service.check("home").unwrap();
        assert_eq!(check.updated, 1);
        assert_eq!(check.created, 6);
    }

    #[test]
    fn test_check_on_head_without_title() {
        let (_temp, service) = site(r#"<meta charset="utf-8">"#);
        let check = service.check("pricing").unwrap();
        assert!(check.active.starts_with("<title>Pricing</title>\n"));
        assert_eq!((check.created, check.updated), (7, 0));
    }

    #[test]
    fn test_unknown_page() {
        let (_temp, service) = site("<title>Site</title>");
        assert!(matches!(
            service.execute("careers"),
            Err(FormsiteError::PageNotFound(_))
        ));
    }

    #[test]
    fn test_verify_restored_reports_difference() {
        let original = HeadDocument::parse("<title>Site</title>").unwrap();
        let changed = HeadDocument::parse("<title>Other</title>").unwrap();
        let err = verify_restored(&original, &changed).unwrap_err();
        assert!(err.to_string().contains("expected '<title>Site</title>'"));
    }
}
