//! Markup fragments for the gallery and the admin panel.
//!
//! Everything here is a pure function of its inputs. All user-supplied text
//! goes through [`escape_html`] before it is embedded.

use crate::models::resource::{Resource, ResourceKind};

pub mod admin;
pub mod pages;

/// Width requested from the media CDN for card thumbnails.
pub const THUMBNAIL_WIDTH: u32 = 800;
/// Cards up to this position load eagerly with high fetch priority.
const EAGER_CARDS: usize = 2;
const MEDIA_DELIVERY_MARKER: &str = "cloudinary.com";
const UPLOAD_SEGMENT: &str = "/upload/";

pub const EMPTY_GALLERY: &str = "No resources available at the moment.";
pub const NO_MATCHES: &str = "No matching resources found.";
pub const EMPTY_CATEGORY: &str = "No resources found in this category.";
pub const LOAD_FAILED: &str = "Error loading content.";

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Inserts quality/format/crop/width transformations into media CDN URLs.
/// Any other URL is returned untouched.
pub fn optimize_media_url(url: &str, width: u32) -> String {
    if !url.contains(MEDIA_DELIVERY_MARKER) {
        return url.to_string();
    }
    let mut parts = url.split(UPLOAD_SEGMENT);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(head), Some(tail), None) => {
            format!("{head}{UPLOAD_SEGMENT}q_auto,f_auto,c_fill,w_{width}/{tail}")
        }
        _ => url.to_string(),
    }
}

pub fn placeholder_art(kind: ResourceKind) -> String {
    let (icon, class) = match kind {
        ResourceKind::Video => (r#"<polygon points="5 3 19 12 5 21 5 3"></polygon>"#, "placeholder-video"),
        ResourceKind::Pdf => (
            r#"<path d="M14 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V8z"></path><polyline points="14 2 14 8 20 8"></polyline><line x1="16" y1="13" x2="8" y2="13"></line><line x1="16" y1="17" x2="8" y2="17"></line><polyline points="10 9 9 9 8 9"></polyline>"#,
            "placeholder-pdf",
        ),
        ResourceKind::Link => (
            r#"<path d="M10 13a5 5 0 0 0 7.54.54l3-3a5 5 0 0 0-7.07-7.07l-1.72 1.71"></path><path d="M14 11a5 5 0 0 0-7.54-.54l-3 3a5 5 0 0 0 7.07 7.07l1.71-1.71"></path>"#,
            "placeholder-link",
        ),
        ResourceKind::Image => (
            r#"<rect x="3" y="3" width="18" height="18" rx="2" ry="2"></rect><circle cx="8.5" cy="8.5" r="1.5"></circle><polyline points="21 15 16 10 5 21"></polyline>"#,
            "placeholder-image",
        ),
        ResourceKind::Other => (
            r#"<circle cx="12" cy="12" r="10"></circle><line x1="12" y1="16" x2="12" y2="12"></line><line x1="12" y1="8" x2="12.01" y2="8"></line>"#,
            "placeholder-default",
        ),
    };
    format!(
        r#"<div class="placeholder-art {class}"><svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="1.5" stroke-linecap="round" stroke-linejoin="round">{icon}</svg></div>"#
    )
}

fn action_buttons(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Video => r#"<button class="btn-primary small">▶ Play Video</button>"#,
        ResourceKind::Pdf => {
            r#"<button class="btn-primary small">👁 View</button><button class="btn-ghost small">↓ Download</button>"#
        }
        ResourceKind::Link => r#"<button class="btn-primary small">🔗 Visit Link</button>"#,
        ResourceKind::Image => r#"<button class="btn-primary small">🖼 Expand</button>"#,
        ResourceKind::Other => r#"<button class="btn-primary small">View</button>"#,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardLayout {
    /// Grid card; featured resources span two columns.
    Grid,
    /// Single-column category feed, never spanning.
    Feed,
}

/// Card for one resource. `position` is 1-based.
pub fn resource_card(resource: &Resource, position: usize, layout: CardLayout) -> String {
    let class = match layout {
        CardLayout::Grid if resource.featured => "resource-card featured",
        CardLayout::Grid => "resource-card",
        CardLayout::Feed => "resource-card wide-feed-card",
    };
    let title = escape_html(&resource.title);
    let media = match resource.thumbnail.as_deref() {
        Some(thumbnail) => {
            let priority = if position <= EAGER_CARDS {
                r#"fetchpriority="high""#
            } else {
                r#"loading="lazy""#
            };
            format!(
                r#"<img src="{}" alt="{title}" class="card-thumb" {priority}>"#,
                escape_html(&optimize_media_url(thumbnail, THUMBNAIL_WIDTH))
            )
        }
        None => placeholder_art(resource.kind),
    };
    let category = if resource.category.trim().is_empty() {
        "General".to_string()
    } else {
        escape_html(&resource.category)
    };
    format!(
        r#"<article class="{class}" data-type="{kind}" data-id="{id}" data-url="{url}">{media}<div class="card-content"><h3 class="card-title">{title}</h3><p class="card-meta">{category}</p><div class="card-actions">{actions}</div></div></article>"#,
        kind = resource.kind,
        id = resource.id,
        url = escape_html(resource.url.as_deref().unwrap_or_default()),
        actions = action_buttons(resource.kind),
    )
}

pub fn empty_state(message: &str) -> String {
    format!(r#"<p class="empty-state">{}</p>"#, escape_html(message))
}

pub fn error_state(message: &str) -> String {
    format!(r#"<p class="error-state">{}</p>"#, escape_html(message))
}

/// Cards for `resources`, or `empty_message` when there are none.
pub fn card_list<'a, I>(resources: I, layout: CardLayout, empty_message: &str) -> String
where
    I: IntoIterator<Item = &'a Resource>,
{
    let mut html = String::new();
    for (index, resource) in resources.into_iter().enumerate() {
        html.push_str(&resource_card(resource, index + 1, layout));
    }
    if html.is_empty() {
        return empty_state(empty_message);
    }
    html
}

/// Fixed-height placeholders shown before data arrives.
pub fn skeleton_cards(count: usize) -> String {
    r#"<div class="resource-card skeleton" style="height: 350px; opacity: 0.1;"></div>"#
        .repeat(count)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn resource(kind: ResourceKind) -> Resource {
        Resource {
            id: Uuid::new_v4(),
            title: "Intro <Rust>".to_string(),
            category: String::new(),
            kind,
            url: Some("https://example.com/a?b=1&c=2".to_string()),
            thumbnail: None,
            public_id: None,
            resource_type: None,
            description: None,
            featured: true,
            is_public: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn media_urls_get_transformations() {
        assert_eq!(
            optimize_media_url(
                "https://res.cloudinary.com/demo/image/upload/v1/sample.jpg",
                800
            ),
            "https://res.cloudinary.com/demo/image/upload/q_auto,f_auto,c_fill,w_800/v1/sample.jpg"
        );
        assert_eq!(
            optimize_media_url("https://example.com/upload/a.jpg", 800),
            "https://example.com/upload/a.jpg"
        );
        let twice = "https://res.cloudinary.com/upload/x/upload/y.jpg";
        assert_eq!(optimize_media_url(twice, 400), twice);
    }

    #[test]
    fn card_escapes_text_and_falls_back_to_general() {
        let html = resource_card(&resource(ResourceKind::Link), 1, CardLayout::Grid);
        assert!(html.contains("Intro &lt;Rust&gt;"));
        assert!(html.contains(r#"<p class="card-meta">General</p>"#));
        assert!(html.contains(r#"data-url="https://example.com/a?b=1&amp;c=2""#));
        assert!(html.contains("resource-card featured"));
        assert!(html.contains("placeholder-link"));
        assert!(html.contains("Visit Link"));
    }

    #[test]
    fn feed_cards_never_span() {
        let html = resource_card(&resource(ResourceKind::Pdf), 1, CardLayout::Feed);
        assert!(html.contains("resource-card wide-feed-card"));
        assert!(!html.contains("featured"));
        assert!(html.contains("Download"));
    }

    #[test]
    fn first_two_thumbnails_load_eagerly() {
        let mut with_thumb = resource(ResourceKind::Image);
        with_thumb.thumbnail = Some("https://example.com/t.jpg".to_string());
        assert!(resource_card(&with_thumb, 2, CardLayout::Grid).contains(r#"fetchpriority="high""#));
        assert!(resource_card(&with_thumb, 3, CardLayout::Grid).contains(r#"loading="lazy""#));
    }

    #[test]
    fn empty_list_renders_message() {
        assert_eq!(
            card_list(std::iter::empty::<&Resource>(), CardLayout::Grid, NO_MATCHES),
            r#"<p class="empty-state">No matching resources found.</p>"#
        );
    }

    #[test]
    fn skeleton_renders_requested_count() {
        assert_eq!(skeleton_cards(4).matches("skeleton").count(), 4);
    }
}
