//! Client-side core for Imageify: session/quota controller, identity token
//! decoding, persisted session store, generation API client and the view
//! model frontends render.

pub mod config;
pub mod controller;
pub mod driver;
pub mod error;
pub mod generation;
pub mod identity;
pub mod store;
pub mod view;

pub use config::{load_settings, normalize_api_url, Settings};
pub use controller::{
    AppState, Command, GenerationOutcome, GenerationRequest, Session, SessionController,
    ATTEMPTS_PER_SIGN_IN, GENERATION_FAILED_TEXT,
};
pub use driver::{run_generation, submit_and_wait};
pub use error::ClientError;
pub use generation::{GenerationClient, HttpGenerationClient};
pub use identity::{GoogleIdentityProvider, IdentityProvider};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
pub use view::{render, ChatView, RowView};
