//! Domain layer - Page metadata and form models

pub mod form;
pub mod meta_tag;
pub mod page_meta;
pub mod question;
pub mod text;

pub use form::{Form, FormSettings};
pub use meta_tag::{AttributeKind, MetaKey};
pub use page_meta::PageMeta;
pub use question::{Question, QuestionKind, QuestionType};
