//! Page metadata applied to the document head

use crate::domain::meta_tag::MetaKey;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OG_TYPE: &str = "website";
pub const DEFAULT_TWITTER_CARD: &str = "summary_large_image";

/// Title, description and social-preview settings for one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(default = "default_og_type")]
    pub og_type: String,
    #[serde(default = "default_twitter_card")]
    pub twitter_card: String,
}

fn default_og_type() -> String {
    DEFAULT_OG_TYPE.to_string()
}

fn default_twitter_card() -> String {
    DEFAULT_TWITTER_CARD.to_string()
}

impl PageMeta {
    /// Create page meta with default `og:type` and `twitter:card`
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        PageMeta {
            title: title.into(),
            description: description.into(),
            og_image: None,
            og_type: default_og_type(),
            twitter_card: default_twitter_card(),
        }
    }

    pub fn with_og_image(mut self, url: impl Into<String>) -> Self {
        self.og_image = Some(url.into());
        self
    }

    pub fn with_og_type(mut self, og_type: impl Into<String>) -> Self {
        self.og_type = og_type.into();
        self
    }

    pub fn with_twitter_card(mut self, card: impl Into<String>) -> Self {
        self.twitter_card = card.into();
        self
    }

    /// Every managed tag paired with the value it takes while this meta is active.
    ///
    /// Image tags are only listed when an image is set, so they are never
    /// touched otherwise.
    pub fn tags(&self) -> Vec<(MetaKey, &str)> {
        let mut tags = vec![
            (MetaKey::name("description"), self.description.as_str()),
            (MetaKey::property("og:title"), self.title.as_str()),
            (MetaKey::property("og:description"), self.description.as_str()),
            (MetaKey::property("og:type"), self.og_type.as_str()),
        ];
        if let Some(image) = &self.og_image {
            tags.push((MetaKey::property("og:image"), image.as_str()));
        }
        tags.push((MetaKey::name("twitter:card"), self.twitter_card.as_str()));
        tags.push((MetaKey::name("twitter:title"), self.title.as_str()));
        tags.push((MetaKey::name("twitter:description"), self.description.as_str()));
        if let Some(image) = &self.og_image {
            tags.push((MetaKey::name("twitter:image"), image.as_str()));
        }
        tags
    }
}
