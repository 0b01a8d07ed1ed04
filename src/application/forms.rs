//! Form listing and lookup use cases

use crate::domain::Form;
use crate::error::{FormsiteError, Result};
use crate::infrastructure::{FileSystemRepository, FormEntry, SiteRepository};
use tracing::info;

/// Service for reading the site's form definitions
pub struct FormsService {
    repository: FileSystemRepository,
}

impl FormsService {
    pub fn new(repository: FileSystemRepository) -> Self {
        Self { repository }
    }

    /// Load and validate every form, sorted by id
    pub fn list(&self) -> Result<Vec<FormEntry>> {
        let mut forms = self.repository.load_forms()?;
        forms.sort_by(|a, b| a.form.id.cmp(&b.form.id));
        info!(count = forms.len(), "validated forms");
        Ok(forms)
    }

    /// Find a form by id
    pub fn show(&self, id: &str) -> Result<Form> {
        self.repository
            .load_forms()?
            .into_iter()
            .map(|entry| entry.form)
            .find(|form| form.id == id)
            .ok_or_else(|| FormsiteError::FormNotFound(id.to_string()))
    }
}
