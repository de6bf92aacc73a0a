use dashmap::DashMap;
use tracing::debug;

use crate::models::session::SessionId;
use crate::models::upload::{UploadAccepted, UploadInfo};

/// The latest finished upload of each admin session, waiting for the create form.
#[derive(Default)]
pub struct PendingUploads {
    uploads: DashMap<SessionId, UploadInfo>,
}

impl PendingUploads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever the session uploaded before.
    pub fn record(&self, session_id: SessionId, upload: UploadInfo) -> UploadAccepted {
        let label = upload.drop_zone_label();
        debug!("session {session_id} uploaded {}", upload.public_id);
        self.uploads.insert(session_id, upload);
        UploadAccepted { label }
    }

    pub fn get(&self, session_id: SessionId) -> Option<UploadInfo> {
        self.uploads.get(&session_id).map(|u| u.clone())
    }

    pub fn clear(&self, session_id: SessionId) {
        self.uploads.remove(&session_id);
    }

    /// Clears `consumed` unless a newer upload replaced it in the meantime.
    pub fn consume(&self, session_id: SessionId, consumed: &UploadInfo) {
        let removed = self
            .uploads
            .remove_if(&session_id, |_, current| current == consumed);
        if removed.is_none() {
            debug!("session {session_id} has a newer upload than {}", consumed.public_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn upload(name: &str) -> UploadInfo {
        UploadInfo {
            secure_url: format!("https://res.cloudinary.com/demo/image/upload/{name}.png"),
            public_id: format!("gallery/{name}"),
            resource_type: "image".to_string(),
            original_filename: name.to_string(),
        }
    }

    #[test]
    fn uploads_are_kept_per_session() {
        let pending = PendingUploads::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(pending.record(a, upload("first")).label, "File Uploaded: first");
        pending.record(a, upload("second"));
        pending.record(b, upload("other"));

        assert_eq!(pending.get(a).map(|u| u.public_id).as_deref(), Some("gallery/second"));
        pending.clear(a);
        assert!(pending.get(a).is_none());
        assert!(pending.get(b).is_some());
    }

    #[test]
    fn consuming_keeps_a_newer_upload() {
        let pending = PendingUploads::new();
        let session = Uuid::new_v4();
        pending.record(session, upload("first"));
        let consumed = pending.get(session).unwrap();

        pending.record(session, upload("second"));
        pending.consume(session, &consumed);
        assert_eq!(
            pending.get(session).map(|u| u.public_id).as_deref(),
            Some("gallery/second")
        );

        let latest = pending.get(session).unwrap();
        pending.consume(session, &latest);
        assert!(pending.get(session).is_none());
    }
}
