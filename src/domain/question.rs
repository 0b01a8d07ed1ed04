//! Question definitions
//!
//! A question's kind decides which extra fields it may carry. Files store the
//! flat shape (`type`, `options`, `maxRating`, `allowMultiple`); loading goes
//! through [`QuestionRecord`] and rejects fields that do not belong to the
//! declared type.

use crate::error::{FormsiteError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub const DEFAULT_MAX_RATING: u8 = 5;
pub const MAX_RATING_LIMIT: u8 = 10;

/// The nine supported question types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionType {
    ShortText,
    LongText,
    MultipleChoice,
    Rating,
    Email,
    YesNo,
    Number,
    Date,
    Dropdown,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::ShortText => "shortText",
            QuestionType::LongText => "longText",
            QuestionType::MultipleChoice => "multipleChoice",
            QuestionType::Rating => "rating",
            QuestionType::Email => "email",
            QuestionType::YesNo => "yesNo",
            QuestionType::Number => "number",
            QuestionType::Date => "date",
            QuestionType::Dropdown => "dropdown",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a question together with its kind-specific payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    ShortText,
    LongText,
    MultipleChoice {
        options: Vec<String>,
        allow_multiple: bool,
    },
    Rating {
        max_rating: u8,
    },
    Email,
    YesNo,
    Number,
    Date,
    Dropdown {
        options: Vec<String>,
    },
}

impl QuestionKind {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::ShortText => QuestionType::ShortText,
            QuestionKind::LongText => QuestionType::LongText,
            QuestionKind::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionKind::Rating { .. } => QuestionType::Rating,
            QuestionKind::Email => QuestionType::Email,
            QuestionKind::YesNo => QuestionType::YesNo,
            QuestionKind::Number => QuestionType::Number,
            QuestionKind::Date => QuestionType::Date,
            QuestionKind::Dropdown { .. } => QuestionType::Dropdown,
        }
    }

    /// Choice labels, for the kinds that have them
    pub fn options(&self) -> Option<&[String]> {
        match self {
            QuestionKind::MultipleChoice { options, .. } | QuestionKind::Dropdown { options } => {
                Some(options)
            }
            _ => None,
        }
    }
}

/// A single question in a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord", into = "QuestionRecord")]
pub struct Question {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub required: bool,
    pub kind: QuestionKind,
}

impl Question {
    fn with_kind(id: impl Into<String>, title: impl Into<String>, kind: QuestionKind) -> Self {
        Question {
            id: id.into(),
            title: title.into(),
            description: None,
            required: false,
            kind,
        }
    }

    pub fn short_text(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::with_kind(id, title, QuestionKind::ShortText)
    }

    pub fn long_text(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::with_kind(id, title, QuestionKind::LongText)
    }

    pub fn email(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::with_kind(id, title, QuestionKind::Email)
    }

    pub fn yes_no(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::with_kind(id, title, QuestionKind::YesNo)
    }

    pub fn number(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::with_kind(id, title, QuestionKind::Number)
    }

    pub fn date(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::with_kind(id, title, QuestionKind::Date)
    }

    /// Rating question; `max_rating` must be within `1..=10`
    pub fn rating(
        id: impl Into<String>,
        title: impl Into<String>,
        max_rating: u8,
    ) -> Result<Self> {
        let question = Self::with_kind(id, title, QuestionKind::Rating { max_rating });
        question.validate()?;
        Ok(question)
    }

    pub fn multiple_choice(
        id: impl Into<String>,
        title: impl Into<String>,
        options: Vec<String>,
        allow_multiple: bool,
    ) -> Result<Self> {
        let question = Self::with_kind(
            id,
            title,
            QuestionKind::MultipleChoice {
                options,
                allow_multiple,
            },
        );
        question.validate()?;
        Ok(question)
    }

    pub fn dropdown(
        id: impl Into<String>,
        title: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self> {
        let question = Self::with_kind(id, title, QuestionKind::Dropdown { options });
        question.validate()?;
        Ok(question)
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }

    /// Check the invariants that the type system cannot express
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(self.invalid("id must not be empty"));
        }
        if self.title.trim().is_empty() {
            return Err(self.invalid("title must not be empty"));
        }

        match &self.kind {
            QuestionKind::Rating { max_rating } => {
                if *max_rating == 0 || *max_rating > MAX_RATING_LIMIT {
                    return Err(self.invalid(&format!(
                        "maxRating must be between 1 and {}, got {}",
                        MAX_RATING_LIMIT, max_rating
                    )));
                }
            }
            QuestionKind::MultipleChoice { options, .. } | QuestionKind::Dropdown { options } => {
                self.validate_options(options)?;
            }
            _ => {}
        }

        Ok(())
    }

    fn validate_options(&self, options: &[String]) -> Result<()> {
        if options.is_empty() {
            return Err(self.invalid("at least one option is required"));
        }

        let mut seen = HashSet::new();
        for option in options {
            if option.trim().is_empty() {
                return Err(self.invalid("options must not be blank"));
            }
            if !seen.insert(option.as_str()) {
                return Err(self.invalid(&format!("duplicate option '{}'", option)));
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> FormsiteError {
        FormsiteError::InvalidQuestion {
            id: self.id.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Flat on-disk shape of a question
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_multiple: Option<bool>,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = FormsiteError;

    fn try_from(record: QuestionRecord) -> Result<Self> {
        let misplaced = |field: &str| FormsiteError::InvalidQuestion {
            id: record.id.clone(),
            reason: format!(
                "'{}' is not allowed on {} questions",
                field, record.question_type
            ),
        };

        let takes_options = matches!(
            record.question_type,
            QuestionType::MultipleChoice | QuestionType::Dropdown
        );
        if record.options.is_some() && !takes_options {
            return Err(misplaced("options"));
        }
        if record.max_rating.is_some() && record.question_type != QuestionType::Rating {
            return Err(misplaced("maxRating"));
        }
        if record.allow_multiple.is_some() && record.question_type != QuestionType::MultipleChoice
        {
            return Err(misplaced("allowMultiple"));
        }

        let kind = match record.question_type {
            QuestionType::ShortText => QuestionKind::ShortText,
            QuestionType::LongText => QuestionKind::LongText,
            QuestionType::MultipleChoice => QuestionKind::MultipleChoice {
                options: record.options.clone().unwrap_or_default(),
                allow_multiple: record.allow_multiple.unwrap_or(false),
            },
            QuestionType::Rating => QuestionKind::Rating {
                max_rating: record.max_rating.unwrap_or(DEFAULT_MAX_RATING),
            },
            QuestionType::Email => QuestionKind::Email,
            QuestionType::YesNo => QuestionKind::YesNo,
            QuestionType::Number => QuestionKind::Number,
            QuestionType::Date => QuestionKind::Date,
            QuestionType::Dropdown => QuestionKind::Dropdown {
                options: record.options.clone().unwrap_or_default(),
            },
        };

        let question = Question {
            id: record.id,
            title: record.title,
            description: record.description,
            required: record.required,
            kind,
        };
        question.validate()?;
        Ok(question)
    }
}

impl From<Question> for QuestionRecord {
    fn from(question: Question) -> Self {
        let question_type = question.question_type();
        let (options, max_rating, allow_multiple) = match question.kind {
            QuestionKind::MultipleChoice {
                options,
                allow_multiple,
            } => (Some(options), None, Some(allow_multiple)),
            QuestionKind::Dropdown { options } => (Some(options), None, None),
            QuestionKind::Rating { max_rating } => (None, Some(max_rating), None),
            _ => (None, None, None),
        };

        QuestionRecord {
            id: question.id,
            question_type,
            title: question.title,
            description: question.description,
            required: question.required,
            options,
            max_rating,
            allow_multiple,
        }
    }
}
