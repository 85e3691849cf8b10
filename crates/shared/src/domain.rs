use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);
    };
}

id_newtype!(PendingTag);

/// Signed-in user as decoded from the identity token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub display_name: String,
    /// Empty when the session was restored from local storage.
    pub avatar_url: String,
    pub email: String,
}

impl Identity {
    /// Identity rebuilt from a stored identifier only; the avatar is not persisted.
    pub fn from_identifier(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        Self {
            display_name: identifier.clone(),
            avatar_url: String::new(),
            email: identifier,
        }
    }

    pub fn has_avatar(&self) -> bool {
        !self.avatar_url.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BotMessage {
    Pending { tag: PendingTag },
    Image { url: String },
    Error { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Message {
    User { text: String },
    Bot(BotMessage),
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::User { text: text.into() }
    }

    pub fn pending(tag: PendingTag) -> Self {
        Self::Bot(BotMessage::Pending { tag })
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self::Bot(BotMessage::Image { url: url.into() })
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::Bot(BotMessage::Error { text: text.into() })
    }

    pub fn pending_tag(&self) -> Option<PendingTag> {
        match self {
            Self::Bot(BotMessage::Pending { tag }) => Some(*tag),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restored_identity_uses_identifier_for_name_and_email() {
        let identity = Identity::from_identifier("a@b.com");
        assert_eq!(identity.display_name, "a@b.com");
        assert_eq!(identity.email, "a@b.com");
        assert!(!identity.has_avatar());
    }

    #[test]
    fn only_pending_messages_carry_a_tag() {
        assert_eq!(Message::pending(PendingTag(4)).pending_tag(), Some(PendingTag(4)));
        assert_eq!(Message::user("hi").pending_tag(), None);
        assert_eq!(Message::image("http://x/cat.png").pending_tag(), None);
        assert_eq!(Message::error("nope").pending_tag(), None);
    }

    #[test]
    fn messages_serialize_with_role_and_kind() {
        let json = serde_json::to_value(Message::image("http://x/cat.png")).expect("serialize");
        assert_eq!(json["role"], "bot");
        assert_eq!(json["kind"], "image");
        assert_eq!(json["url"], "http://x/cat.png");
    }
}
