use strum::IntoEnumIterator;

use crate::models::resource::ResourceKind;
use crate::render::{escape_html, skeleton_cards};

const STYLE: &str = include_str!("../../assets/style.css");
const GALLERY_SCRIPT: &str = include_str!("../../assets/gallery.js");
const ADMIN_SCRIPT: &str = include_str!("../../assets/admin.js");
const UPLOAD_WIDGET_SCRIPT: &str = "https://upload-widget.cloudinary.com/global/all.js";

pub const ACCESS_DENIED: &str = "Access Denied: Admins only.";

pub const FAQ: [(&str, &str); 3] = [
    (
        "Is this platform free?",
        "Yes, all resources are completely free to access.",
    ),
    (
        "How do I contribute?",
        "Currently, only admins can upload resources.",
    ),
    (
        "Can I download videos?",
        "Videos are streamed, but PDFs are downloadable.",
    ),
];

fn document(title: &str, body_attrs: &str, body: &str, scripts: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{title}</title><style>{STYLE}</style></head><body{body_attrs}>{body}{scripts}</body></html>"#
    )
}

/// Sidebar filters: "all" followed by every concrete kind.
pub fn navigation() -> String {
    let mut html = String::from(
        r##"<nav class="sidebar"><a href="#" class="nav-item active" data-filter="all">All</a>"##,
    );
    for kind in ResourceKind::iter().filter(|k| *k != ResourceKind::Other) {
        html.push_str(&format!(
            r##"<a href="#" class="nav-item" data-filter="{kind}">{title}</a>"##,
            title = kind.feed_title()
        ));
    }
    html.push_str("</nav>");
    html
}

pub fn faq_accordion() -> String {
    let items: String = FAQ
        .iter()
        .map(|(question, answer)| {
            format!(
                r#"<div class="faq-item"><button class="faq-question">{}<span class="faq-icon">+</span></button><div class="faq-answer"><p>{}</p></div></div>"#,
                escape_html(question),
                escape_html(answer)
            )
        })
        .collect();
    format!(r#"<section class="faq-section"><h2>Frequently Asked Questions</h2>{items}</section>"#)
}

fn login_modal() -> &'static str {
    r#"<div id="admin-modal" class="modal hidden"><form id="admin-login-form" class="modal-content"><button type="button" class="modal-close" data-close="admin-modal">&times;</button><h2>Admin Login</h2><input type="email" id="admin-email" placeholder="Email" required><input type="password" id="admin-password" placeholder="Password" required><button type="submit" class="btn-primary">Sign In</button></form></div>"#
}

/// Public gallery shell. Cards arrive later over the page websocket.
pub fn gallery_page(skeletons: usize, denied: bool) -> String {
    let body = format!(
        r#"<header class="topbar"><h1 class="brand">Resource Gallery</h1><input type="search" id="searchInput" placeholder="Search resources..." autocomplete="off"></header><div class="layout">{nav}<main><section id="content-grid" class="grid">{skeletons}</section><section id="category-view" class="hidden"><button id="back-to-home" class="btn-ghost">&larr; Back</button><h2 id="category-title"></h2><div id="category-feed" class="feed"></div></section>{faq}</main></div><div id="lightbox" class="lightbox hidden"><button class="lightbox-close">&times;</button><img id="lightbox-img" alt=""></div>{login}"#,
        nav = navigation(),
        skeletons = skeleton_cards(skeletons),
        faq = faq_accordion(),
        login = login_modal(),
    );
    let notice = if denied {
        format!(r#" data-notice="{ACCESS_DENIED}""#)
    } else {
        String::new()
    };
    document(
        "Resource Gallery",
        &notice,
        &body,
        &format!("<script>{GALLERY_SCRIPT}</script>"),
    )
}

fn kind_options() -> String {
    ResourceKind::iter()
        .filter(|k| *k != ResourceKind::Other)
        .map(|kind| format!(r#"<option value="{kind}">{}</option>"#, kind.feed_title()))
        .collect()
}

/// Admin panel shell with the current management rows already rendered.
pub fn admin_page(rows: &str) -> String {
    let options = kind_options();
    let body = format!(
        r#"<header class="topbar"><h1 class="brand">Admin Panel</h1><button id="logout-btn" class="btn-ghost">Logout</button></header><main class="admin"><form id="resource-form" class="admin-form"><h2>Add Resource</h2><input name="title" placeholder="Title" required><input name="category" placeholder="Category"><select name="type">{options}</select><input name="url" placeholder="URL (optional if uploading)"><input name="thumbnail" placeholder="Thumbnail URL"><textarea name="description" placeholder="Description"></textarea><label><input type="checkbox" name="featured"> Featured</label><label><input type="checkbox" name="isPublic" checked> Public</label><div id="drop-zone" class="drop-zone">Click to upload a file</div><button type="submit" class="btn-primary">Add Resource</button></form><section class="admin-list"><h2>Resources</h2><div id="resource-rows">{rows}</div></section></main><div id="edit-modal" class="modal hidden"><form id="edit-form" class="modal-content"><button type="button" class="modal-close" data-close="edit-modal">&times;</button><h2>Edit Resource</h2><input type="hidden" name="id"><input name="title" required><input name="category"><select name="type">{options}</select><input name="url"><textarea name="description"></textarea><label><input type="checkbox" name="featured"> Featured</label><label><input type="checkbox" name="isPublic"> Public</label><button type="submit" class="btn-primary">Save</button></form></div>"#
    );
    document(
        "Admin Panel",
        "",
        &body,
        &format!(
            r#"<script src="{UPLOAD_WIDGET_SCRIPT}"></script><script>{ADMIN_SCRIPT}</script>"#
        ),
    )
}
