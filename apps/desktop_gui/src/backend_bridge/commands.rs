//! Backend commands queued from UI to backend worker.

use shared::domain::PendingTag;

pub enum BackendCommand {
    Generate { tag: PendingTag, prompt: String },
    FetchImage { url: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Generate { .. } => "generate",
            Self::FetchImage { .. } => "fetch_image",
        }
    }
}
