//! User-facing strings.

/// Every message the session or the terminal client shows to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    /// Greeting shown once when the client starts.
    pub greeting: String,
    /// Prefix for an error shown in place of a reply.
    pub error_prefix: String,
    /// Generic transport failure.
    pub network_error: String,
    /// Input longer than the server accepts.
    pub input_too_long: String,
    /// Failure with nothing more specific to say.
    pub fallback_error: String,
    /// Marker appended to a reply cut short by cancellation.
    pub cancelled: String,
}

impl Messages {
    /// English strings.
    pub fn english() -> Self {
        Self {
            greeting: "Hi! How can I help?".into(),
            error_prefix: "Error: ".into(),
            network_error: "network request failed".into(),
            input_too_long: "Message is too long.".into(),
            fallback_error: "request failed".into(),
            cancelled: "[reply interrupted]".into(),
        }
    }

    /// Russian strings.
    pub fn russian() -> Self {
        Self {
            greeting: "Привет! Чем могу помочь?".into(),
            error_prefix: "Ошибка: ".into(),
            network_error: "сеть".into(),
            input_too_long: "Сообщение слишком длинное.".into(),
            fallback_error: "Ошибка запроса".into(),
            cancelled: "[ответ прерван]".into(),
        }
    }

    /// Strings for a language tag (`en`, `ru`); English otherwise.
    pub fn for_language(tag: &str) -> Self {
        match tag.split(['-', '_']).next().map(str::to_ascii_lowercase).as_deref() {
            Some("ru") => Self::russian(),
            _ => Self::english(),
        }
    }

    /// The line shown in place of a failed reply.
    pub fn failure_line(&self, message: &str) -> String {
        format!("{}{message}", self.error_prefix)
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::english()
    }
}
