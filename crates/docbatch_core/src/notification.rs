#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStyle {
    /// In-progress message, replaced by the next one.
    Animated,
    Success,
    Failure,
}

/// Transient message shown on the notification surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub style: ToastStyle,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn animated(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToastStyle::Animated, title, message)
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToastStyle::Success, title, message)
    }

    pub fn failure(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToastStyle::Failure, title, message)
    }

    fn new(style: ToastStyle, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            style,
            title: title.into(),
            message: message.into(),
        }
    }
}
