use crate::models::resource::Resource;
use crate::render::{error_state, escape_html};

pub const NO_RESOURCES: &str = "No resources found.";
pub const LOAD_FAILED: &str = "Error loading resources.";

/// Management row with status badge and Edit / Lock-Unlock / Delete actions.
/// The full record rides along in `data-resource` to pre-fill the edit modal.
pub fn resource_row(resource: &Resource) -> String {
    let (status_text, status_class, toggle_text) = if resource.is_public {
        ("Public", "public", "Lock")
    } else {
        ("Locked", "private", "Unlock")
    };
    let title = escape_html(&resource.title);
    let record = serde_json::to_string(resource).unwrap_or_default();
    format!(
        r#"<div class="resource-row" data-id="{id}" data-resource="{record}"><div class="row-title" title="{title}">{title}</div><div class="row-type">{kind}</div><div><span class="status-badge {status_class}">{status_text}</span></div><div class="row-actions"><button class="action-btn edit-btn" data-id="{id}">Edit</button><button class="action-btn toggle-btn" data-id="{id}" data-public="{is_public}">{toggle_text}</button><button class="action-btn delete-btn" data-id="{id}" data-title="{title}">Delete</button></div></div>"#,
        id = resource.id,
        record = escape_html(&record),
        kind = resource.kind,
        is_public = resource.is_public,
    )
}

pub fn resource_rows(resources: &[Resource]) -> String {
    if resources.is_empty() {
        return format!("<p>{NO_RESOURCES}</p>");
    }
    resources.iter().map(resource_row).collect()
}

pub fn rows_error() -> String {
    error_state(LOAD_FAILED)
}
