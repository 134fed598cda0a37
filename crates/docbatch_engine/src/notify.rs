use docbatch_core::Notification;

/// Host notification surface: transient toasts, a HUD line and window closing.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
    fn show_hud(&self, message: &str);
    fn close_window(&self);
}
