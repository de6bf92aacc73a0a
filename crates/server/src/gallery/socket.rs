use std::fmt::Display;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::{Sink, SinkExt, Stream, StreamExt};
use tracing::{debug, info, warn};

use crate::gallery::{GalleryEvent, GallerySession, GalleryUpdate};
use crate::server::state::AppState;
use crate::utils::debounce::Debounce;

pub async fn gallery_socket(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| async move {
        let gallery = &state.config.gallery;
        let session = GallerySession::new(
            state.resources.clone(),
            &gallery.secret_word,
            gallery.skeleton_cards,
        );
        let search = Debounce::new(gallery.search_debounce());
        let (sender, receiver) = socket.split();
        drive(session, search, receiver, sender).await;
    })
}

async fn push<W>(sender: &mut W, update: &GalleryUpdate) -> Result<(), String>
where
    W: Sink<Message> + Unpin,
    W::Error: Display,
{
    let text = serde_json::to_string(update).map_err(|e| e.to_string())?;
    sender.send(Message::Text(text)).await.map_err(|e| e.to_string())
}

/// Runs one page session until the browser goes away.
pub async fn drive<R, W, E>(
    mut session: GallerySession,
    mut search: Debounce<String>,
    mut receiver: R,
    mut sender: W,
) where
    R: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
    W: Sink<Message> + Unpin,
    W::Error: Display,
{
    info!("gallery page connected");
    if let Err(e) = push(&mut sender, &session.grid()).await {
        warn!("failed to send skeletons: {e}");
        return;
    }
    let loaded = session.load().await;
    if let Err(e) = push(&mut sender, &loaded).await {
        warn!("failed to send gallery: {e}");
        return;
    }

    loop {
        let update = tokio::select! {
            message = receiver.next() => match message {
                Some(Ok(Message::Text(text))) => match serde_json::from_str::<GalleryEvent>(&text) {
                    Ok(GalleryEvent::Search { term }) => {
                        search.push(term);
                        None
                    }
                    Ok(event) => session.handle(event),
                    Err(e) => {
                        debug!("ignoring malformed gallery event: {e}");
                        None
                    }
                },
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => None,
                Some(Err(e)) => {
                    warn!("gallery socket receive error: {e}");
                    break;
                }
            },
            term = search.settled() => Some(session.search(&term)),
        };
        if let Some(update) = update {
            debug!("gallery view is now {:?}", session.view());
            if let Err(e) = push(&mut sender, &update).await {
                warn!("failed to send gallery update: {e}");
                break;
            }
        }
    }
    info!("gallery page disconnected");
}
