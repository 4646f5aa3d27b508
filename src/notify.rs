//! Transient user notifications.
//!
//! Fire-and-forget: the controller reports outcomes here and never waits on
//! or inspects the result.

/// Visual flavour of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// A mutation completed.
    Success,

    /// A mutation failed.
    Error,

    /// Informational, e.g. input ignored while a request is in flight.
    Info,
}

/// Notification collaborator.
pub trait Notifier: Send + Sync {
    /// Show a transient on-screen message.
    fn notify(&self, kind: NoticeKind, message: &str);
}

impl<T: Notifier + ?Sized> Notifier for std::sync::Arc<T> {
    fn notify(&self, kind: NoticeKind, message: &str) {
        (**self).notify(kind, message);
    }
}

/// Notifier that discards every notice. Useful headless and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _kind: NoticeKind, _message: &str) {}
}
