//! Public gallery page session.
//!
//! One [`GallerySession`] lives for as long as a gallery page keeps its
//! websocket open. It owns the fetched public resources and the current view,
//! and answers every browser event with a [`GalleryUpdate`] for the page.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::database::ResourceStore;
use crate::gallery::secret::SecretSequence;
use crate::models::resource::{Resource, ResourceId, ResourceKind};
use crate::render::{
    card_list, error_state, optimize_media_url, skeleton_cards, CardLayout, EMPTY_CATEGORY,
    EMPTY_GALLERY, LOAD_FAILED, NO_MATCHES, THUMBNAIL_WIDTH,
};

pub mod secret;
pub mod socket;

pub const NO_LINK: &str = "This resource has no attached link.";
const ALL_FILTER: &str = "all";

/// Browser to server.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GalleryEvent {
    Search { term: String },
    Navigate { filter: String },
    Back,
    Activate { id: ResourceId },
    Key { key: String },
}

/// Server to browser.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum GalleryUpdate {
    /// Replace the grid and show it.
    Grid { html: String },
    /// Show the single-column category feed.
    Feed { title: String, html: String },
    Lightbox { src: String },
    Open { url: String },
    Alert { message: String },
    RevealLogin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Grid,
    Feed(ResourceKind),
}

pub struct GallerySession {
    resources: Arc<dyn ResourceStore>,
    cache: Vec<Resource>,
    grid_html: String,
    view: View,
    secret: SecretSequence,
}

impl GallerySession {
    pub fn new(resources: Arc<dyn ResourceStore>, secret_word: &str, skeletons: usize) -> Self {
        Self {
            resources,
            cache: Vec::new(),
            grid_html: skeleton_cards(skeletons),
            view: View::Grid,
            secret: SecretSequence::new(secret_word),
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    #[cfg(test)]
    pub fn cached(&self) -> &[Resource] {
        &self.cache
    }

    /// The grid as currently rendered, skeletons until [`Self::load`] ran.
    pub fn grid(&self) -> GalleryUpdate {
        GalleryUpdate::Grid {
            html: self.grid_html.clone(),
        }
    }

    /// Fetches public resources into the cache and renders the grid.
    pub async fn load(&mut self) -> GalleryUpdate {
        self.view = View::Grid;
        match self.resources.list_public().await {
            Ok(resources) => {
                info!("gallery loaded {} public resources", resources.len());
                self.grid_html = card_list(&resources, CardLayout::Grid, EMPTY_GALLERY);
                self.cache = resources;
            }
            Err(e) => {
                error!("failed to load public resources: {e}");
                self.cache.clear();
                self.grid_html = error_state(LOAD_FAILED);
            }
        }
        self.grid()
    }

    /// Filters the cache by `term` and switches back to the grid.
    pub fn search(&mut self, term: &str) -> GalleryUpdate {
        let term = term.trim().to_lowercase();
        self.view = View::Grid;
        self.grid_html = if term.is_empty() {
            card_list(&self.cache, CardLayout::Grid, NO_MATCHES)
        } else {
            card_list(
                self.cache.iter().filter(|r| r.matches(&term)),
                CardLayout::Grid,
                NO_MATCHES,
            )
        };
        self.grid()
    }

    pub fn navigate(&mut self, filter: &str) -> GalleryUpdate {
        if filter == ALL_FILTER {
            return self.back();
        }
        let kind = ResourceKind::parse_lossy(filter);
        self.view = View::Feed(kind);
        GalleryUpdate::Feed {
            title: kind.feed_title(),
            html: card_list(
                self.cache.iter().filter(|r| r.kind == kind),
                CardLayout::Feed,
                EMPTY_CATEGORY,
            ),
        }
    }

    pub fn back(&mut self) -> GalleryUpdate {
        self.view = View::Grid;
        self.grid()
    }

    /// Click on a card: images go to the lightbox, everything else opens its link.
    pub fn activate(&self, id: ResourceId) -> GalleryUpdate {
        let Some(resource) = self.cache.iter().find(|r| r.id == id) else {
            warn!("activated unknown resource {id}");
            return no_link();
        };
        match resource.kind {
            ResourceKind::Image => resource
                .url
                .clone()
                .or_else(|| {
                    resource
                        .thumbnail
                        .as_deref()
                        .map(|t| optimize_media_url(t, THUMBNAIL_WIDTH))
                })
                .map(|src| GalleryUpdate::Lightbox { src })
                .unwrap_or_else(no_link),
            _ => resource
                .url
                .clone()
                .map(|url| GalleryUpdate::Open { url })
                .unwrap_or_else(no_link),
        }
    }

    pub fn key(&mut self, key: &str) -> Option<GalleryUpdate> {
        self.secret.push(key).then_some(GalleryUpdate::RevealLogin)
    }

    /// Handles every event except search, which the socket debounces first.
    pub fn handle(&mut self, event: GalleryEvent) -> Option<GalleryUpdate> {
        match event {
            GalleryEvent::Search { term } => Some(self.search(&term)),
            GalleryEvent::Navigate { filter } => Some(self.navigate(&filter)),
            GalleryEvent::Back => Some(self.back()),
            GalleryEvent::Activate { id } => Some(self.activate(id)),
            GalleryEvent::Key { key } => self.key(&key),
        }
    }
}

fn no_link() -> GalleryUpdate {
    GalleryUpdate::Alert {
        message: NO_LINK.to_string(),
    }
}
