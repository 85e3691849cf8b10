//! Session & chat controller: owns session and transcript state and applies
//! commands to it through a single reducer.

use std::{collections::BTreeSet, sync::Arc};

use shared::domain::{Identity, Message, PendingTag};
use tracing::{debug, error, info, warn};

use crate::{
    identity::IdentityProvider,
    store::{SessionStore, ATTEMPTS_KEY, EMAIL_KEY},
};

/// Attempts granted by every fresh sign-in.
pub const ATTEMPTS_PER_SIGN_IN: u32 = 3;
pub const GENERATION_FAILED_TEXT: &str = "Image generation failed. Try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<Identity>,
    pub attempts_remaining: u32,
}

impl Session {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub session: Session,
    pub transcript: Vec<Message>,
    pub prompt_input: String,
    in_flight: BTreeSet<PendingTag>,
    /// Bumped whenever the transcript changes; drives auto-scroll.
    pub transcript_revision: u64,
}

impl AppState {
    pub fn is_generating(&self) -> bool {
        !self.in_flight.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Image(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    RestoreSession,
    Login { credential: String },
    LoginFailed { reason: String },
    Logout,
    EditPrompt(String),
    SubmitPrompt { text: String },
    GenerationFinished {
        tag: PendingTag,
        outcome: GenerationOutcome,
    },
}

/// Work the caller must perform on the controller's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub tag: PendingTag,
    pub prompt: String,
}

pub struct SessionController {
    state: AppState,
    store: Box<dyn SessionStore>,
    identity: Arc<dyn IdentityProvider>,
    next_tag: u64,
}

impl SessionController {
    pub fn new(store: Box<dyn SessionStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            state: AppState::default(),
            store,
            identity,
            next_tag: 1,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    /// Applies one command. Returns the generation request to issue, if any.
    pub fn dispatch(&mut self, command: Command) -> Option<GenerationRequest> {
        match command {
            Command::RestoreSession => {
                self.restore_session();
                None
            }
            Command::Login { credential } => {
                self.login(&credential);
                None
            }
            Command::LoginFailed { reason } => {
                error!("Login Failed: {reason}");
                None
            }
            Command::Logout => {
                self.logout();
                None
            }
            Command::EditPrompt(text) => {
                self.state.prompt_input = text;
                None
            }
            Command::SubmitPrompt { text } => self.submit_prompt(text),
            Command::GenerationFinished { tag, outcome } => {
                self.finish_generation(tag, outcome);
                None
            }
        }
    }

    fn restore_session(&mut self) {
        let email = self.read_stored(EMAIL_KEY).filter(|v| !v.is_empty());
        let attempts = self.read_stored(ATTEMPTS_KEY).filter(|v| !v.is_empty());
        let (Some(email), Some(attempts)) = (email, attempts) else {
            debug!("no stored session to restore");
            return;
        };

        // Negative or partially numeric counters are rejected, not clamped.
        let attempts = match attempts.trim().parse::<u32>() {
            Ok(attempts) => attempts,
            Err(err) => {
                warn!(attempts = %attempts, "ignoring stored session with unreadable counter: {err}");
                return;
            }
        };

        info!(email = %email, attempts, "restored stored session");
        self.state.session = Session {
            user: Some(Identity::from_identifier(email)),
            attempts_remaining: attempts,
        };
    }

    fn login(&mut self, credential: &str) {
        let identity = match self.identity.decode_credential(credential) {
            Ok(identity) => identity,
            Err(err) => {
                error!("Login Failed: {err}");
                return;
            }
        };

        info!(email = %identity.email, "signed in");
        let email = identity.email.clone();
        self.state.session = Session {
            user: Some(identity),
            attempts_remaining: ATTEMPTS_PER_SIGN_IN,
        };
        self.write_stored(EMAIL_KEY, &email);
        self.write_stored(ATTEMPTS_KEY, &ATTEMPTS_PER_SIGN_IN.to_string());
    }

    fn logout(&mut self) {
        self.identity.sign_out();
        self.state.session = Session::default();
        self.state.transcript.clear();
        self.state.in_flight.clear();
        self.state.transcript_revision += 1;
        self.remove_stored(EMAIL_KEY);
        self.remove_stored(ATTEMPTS_KEY);
        info!("signed out");
    }

    fn submit_prompt(&mut self, text: String) -> Option<GenerationRequest> {
        if self.state.session.attempts_remaining == 0 {
            debug!("ignoring prompt: no attempts remaining");
            return None;
        }
        if text.trim().is_empty() {
            debug!("ignoring blank prompt");
            return None;
        }

        self.state.transcript.push(Message::user(text.clone()));
        self.state.prompt_input.clear();

        let tag = PendingTag(self.next_tag);
        self.next_tag += 1;
        self.state.transcript.push(Message::pending(tag));
        self.state.in_flight.insert(tag);
        self.state.transcript_revision += 1;

        Some(GenerationRequest { tag, prompt: text })
    }

    fn finish_generation(&mut self, tag: PendingTag, outcome: GenerationOutcome) {
        self.state.in_flight.remove(&tag);

        let Some(slot) = self
            .state
            .transcript
            .iter_mut()
            .find(|message| message.pending_tag() == Some(tag))
        else {
            debug!(tag = tag.0, "dropping result for a generation no longer in the transcript");
            return;
        };

        match outcome {
            GenerationOutcome::Image(url) => {
                *slot = Message::image(url);
                let attempts = self.state.session.attempts_remaining.saturating_sub(1);
                self.state.session.attempts_remaining = attempts;
                self.write_stored(ATTEMPTS_KEY, &attempts.to_string());
                info!(tag = tag.0, attempts, "image generated");
            }
            GenerationOutcome::Failed(reason) => {
                *slot = Message::error(GENERATION_FAILED_TEXT);
                error!(tag = tag.0, "Image generation failed: {reason}");
            }
        }
        self.state.transcript_revision += 1;
    }

    fn read_stored(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, "failed to read session store: {err}");
                None
            }
        }
    }

    fn write_stored(&mut self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            warn!(key, "failed to persist session value: {err}");
        }
    }

    fn remove_stored(&mut self, key: &str) {
        if let Err(err) = self.store.remove(key) {
            warn!(key, "failed to clear session value: {err}");
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
