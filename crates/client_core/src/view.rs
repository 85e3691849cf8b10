//! Presentation model derived from [`AppState`]; frontends only draw what
//! [`render`] returns.

use shared::domain::{BotMessage, Message};

use crate::controller::AppState;

pub const APP_TITLE: &str = "Imageify";
pub const PROMPT_PLACEHOLDER: &str = "Describe your image... (this is a minimum accuracy model)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowView {
    User { text: String },
    BotImage { url: String },
    BotText { text: String },
    BotPending,
}

impl RowView {
    pub fn alignment(&self) -> Alignment {
        match self {
            Self::User { .. } => Alignment::Right,
            _ => Alignment::Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountView {
    pub display_name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub title: &'static str,
    pub attempts_banner: Option<String>,
    pub account: Option<AccountView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerView {
    pub input: String,
    pub placeholder: &'static str,
    pub input_enabled: bool,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatView {
    pub header: HeaderView,
    pub rows: Vec<RowView>,
    pub composer: ComposerView,
    pub show_sign_in: bool,
    pub transcript_revision: u64,
}

pub fn render(state: &AppState) -> ChatView {
    let session = &state.session;
    let signed_in = session.is_signed_in();
    let generating = state.is_generating();
    let has_attempts = session.attempts_remaining > 0;

    let submit_label = match (signed_in, has_attempts, generating) {
        (false, _, _) => "Login to generate",
        (true, false, _) => "out of attempts",
        (true, true, true) => "Generating...",
        (true, true, false) => "Generate",
    };
    let enabled = signed_in && has_attempts && !generating;

    ChatView {
        header: HeaderView {
            title: APP_TITLE,
            attempts_banner: signed_in.then(|| {
                format!(
                    "you have {} attempts remaining!",
                    session.attempts_remaining
                )
            }),
            account: session.user.as_ref().map(|user| AccountView {
                display_name: user.display_name.clone(),
                avatar_url: user.has_avatar().then(|| user.avatar_url.clone()),
            }),
        },
        rows: state.transcript.iter().map(render_message).collect(),
        composer: ComposerView {
            input: state.prompt_input.clone(),
            placeholder: PROMPT_PLACEHOLDER,
            input_enabled: enabled,
            submit_enabled: enabled,
            submit_label,
        },
        show_sign_in: !signed_in,
        transcript_revision: state.transcript_revision,
    }
}

fn render_message(message: &Message) -> RowView {
    match message {
        Message::User { text } => RowView::User { text: text.clone() },
        Message::Bot(BotMessage::Pending { .. }) => RowView::BotPending,
        Message::Bot(BotMessage::Image { url }) => RowView::BotImage { url: url.clone() },
        Message::Bot(BotMessage::Error { text }) => RowView::BotText { text: text.clone() },
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
