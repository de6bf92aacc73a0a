use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::ValidationError;

pub type ResourceId = uuid::Uuid;

const RESOURCE_TITLE_LENGTH_LIMIT: usize = 200;

/// Kind of gallery item, drives card rendering and the click action.
#[derive(
    Clone, Debug, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumString, EnumIter, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ResourceKind {
    Video,
    Pdf,
    Link,
    Image,
    Other,
}

impl From<String> for ResourceKind {
    fn from(value: String) -> Self {
        Self::parse_lossy(&value)
    }
}

impl ResourceKind {
    /// Unknown kinds fall back to [`ResourceKind::Other`].
    pub fn parse_lossy(value: &str) -> Self {
        value.parse().unwrap_or(Self::Other)
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Media store resource type an upload of this kind lands under.
    pub fn asset_class(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Pdf | Self::Link | Self::Other => "raw",
        }
    }

    /// Heading used by the single-column category feed, e.g. "Videos".
    pub fn feed_title(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => format!("{}{}s", first.to_uppercase(), chars.as_str()),
            None => String::new(),
        }
    }
}

fn default_public() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub featured: bool,
    /// Documents written before visibility existed carry no flag and count as public.
    #[serde(default = "default_public")]
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource {
    pub fn from_new(id: ResourceId, new: NewResource) -> Self {
        Self {
            id,
            title: new.title,
            category: new.category,
            kind: new.kind,
            url: new.url,
            thumbnail: new.thumbnail,
            public_id: new.public_id,
            resource_type: new.resource_type,
            description: new.description,
            featured: new.featured,
            is_public: new.is_public,
            created_at: new.created_at,
            updated_at: None,
        }
    }

    pub fn apply(&mut self, patch: &ResourcePatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(url) = &patch.url {
            self.url = non_empty(url);
        }
        if let Some(description) = &patch.description {
            self.description = non_empty(description);
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
        if let Some(is_public) = patch.is_public {
            self.is_public = is_public;
        }
        if let Some(updated_at) = patch.updated_at {
            self.updated_at = Some(updated_at);
        }
    }

    /// Case-insensitive substring match over title, description and category.
    /// `term` must already be lowercased.
    pub fn matches(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(term)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(term))
            || self.category.to_lowercase().contains(term)
    }
}

#[derive(Clone, Debug)]
pub struct NewResource {
    pub title: String,
    pub category: String,
    pub kind: ResourceKind,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
    pub public_id: Option<String>,
    pub resource_type: Option<String>,
    pub description: Option<String>,
    pub featured: bool,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

/// Partial update. `None` leaves a field alone; for `url` and `description`
/// an empty string clears the stored value.
#[derive(Clone, Debug, Default)]
pub struct ResourcePatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub kind: Option<ResourceKind>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub featured: Option<bool>,
    pub is_public: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ResourcePatch {
    pub fn visibility(is_public: bool) -> Self {
        Self {
            is_public: Some(is_public),
            ..Self::default()
        }
    }
}

/// Admin "add resource" form.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceForm {
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_public")]
    pub is_public: bool,
}

/// Admin edit modal; every field is written back.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResourceForm {
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    pub is_public: bool,
    #[serde(default)]
    pub featured: bool,
}

impl EditResourceForm {
    pub fn into_patch(self, now: DateTime<Utc>) -> ResourcePatch {
        ResourcePatch {
            title: Some(self.title),
            category: Some(self.category),
            kind: Some(self.kind),
            url: Some(self.url),
            description: Some(self.description),
            featured: Some(self.featured),
            is_public: Some(self.is_public),
            updated_at: Some(now),
        }
    }
}

pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn validate_resource_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::InvalidInput {
            value: title.to_string(),
            reason: "resource title cannot be empty".to_string(),
        });
    }
    if title.chars().count() > RESOURCE_TITLE_LENGTH_LIMIT {
        return Err(ValidationError::InvalidInput {
            value: title.to_string(),
            reason: format!(
                "resource title cannot be longer than {} chars",
                RESOURCE_TITLE_LENGTH_LIMIT
            ),
        });
    }
    Ok(())
}
