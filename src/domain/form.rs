//! Form definitions

use crate::domain::question::Question;
use crate::error::{FormsiteError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Presentation settings shared by every question of a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormSettings {
    pub show_progress_bar: bool,
    pub allow_back_navigation: bool,
    pub submit_button_text: String,
    pub thank_you_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,
}

impl Default for FormSettings {
    fn default() -> Self {
        FormSettings {
            show_progress_bar: true,
            allow_back_navigation: true,
            submit_button_text: "Submit".to_string(),
            thank_you_message: "Thanks for your response!".to_string(),
            theme_color: None,
        }
    }
}

/// An ordered list of questions plus its settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub settings: FormSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Form {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Form {
            id: id.into(),
            title: title.into(),
            description: None,
            questions: Vec::new(),
            settings: FormSettings::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a question, rejecting it if its id is already taken
    pub fn push_question(&mut self, question: Question) -> Result<()> {
        question.validate()?;
        if self.question(&question.id).is_some() {
            return Err(FormsiteError::InvalidForm(format!(
                "form '{}': duplicate question id '{}'",
                self.id, question.id
            )));
        }
        self.questions.push(question);
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn required_count(&self) -> usize {
        self.questions.iter().filter(|q| q.required).count()
    }

    /// Check form-level invariants; questions validate themselves on load
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(FormsiteError::InvalidForm(
                "form id must not be empty".to_string(),
            ));
        }
        if self.title.trim().is_empty() {
            return Err(FormsiteError::InvalidForm(format!(
                "form '{}': title must not be empty",
                self.id
            )));
        }
        if self.updated_at < self.created_at {
            return Err(FormsiteError::InvalidForm(format!(
                "form '{}': updatedAt is earlier than createdAt",
                self.id
            )));
        }

        let mut ids = HashSet::new();
        for question in &self.questions {
            question.validate()?;
            if !ids.insert(question.id.as_str()) {
                return Err(FormsiteError::InvalidForm(format!(
                    "form '{}': duplicate question id '{}'",
                    self.id, question.id
                )));
            }
        }

        Ok(())
    }
}
