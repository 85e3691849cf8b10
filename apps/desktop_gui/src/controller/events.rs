//! Backend-to-UI events and error modeling for the desktop controller.

use client_core::Command;

use crate::media::PreviewImage;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    /// Resolution of an in-flight generation, replayed into the session controller.
    Session(Command),
    ImageLoaded {
        url: String,
        image: PreviewImage,
    },
    ImageFailed {
        url: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Login,
    Generate,
    ImageFetch,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("401")
            || message_lower.contains("403")
            || message_lower.contains("unauthorized")
            || message_lower.contains("forbidden")
            || message_lower.contains("invalid identity token")
        {
            UiErrorCategory::Auth
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("failed to reach")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the error should be shown in the banner rather than only the
    /// status line.
    pub fn is_prominent(&self) -> bool {
        matches!(
            self.context,
            UiErrorContext::BackendStartup | UiErrorContext::General
        )
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Auth => "Authentication",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_worker_disconnect_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::General,
            "Backend worker disconnected (possible startup/runtime failure)",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert!(err.is_prominent());
    }

    #[test]
    fn classifies_rejected_token_as_auth_error() {
        let err = UiError::from_message(
            UiErrorContext::Login,
            "invalid identity token: InvalidToken",
        );
        assert_eq!(err.category(), UiErrorCategory::Auth);
        assert!(!err.is_prominent());
    }

    #[test]
    fn image_fetch_failures_stay_out_of_the_banner() {
        let err = UiError::from_message(UiErrorContext::ImageFetch, "image endpoint returned 404");
        assert_eq!(err.context(), UiErrorContext::ImageFetch);
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert!(!err.is_prominent());
        assert_eq!(err_label(err.category()), "Unexpected");
    }
}
