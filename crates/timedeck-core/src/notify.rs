//! Notification collaborator seam.
//!
//! On every session-kind transition the driver invokes the notifier
//! exactly once, before rendering the new state. Implementations are
//! fire-and-forget: a notifier that cannot play (headless environment, no
//! audio device) must swallow the failure and never affect the machine.

pub trait Notifier {
    /// Play the transition chime. Must not panic or block indefinitely.
    fn chime(&self);
}

/// Notifier that does nothing. Used in tests and quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn chime(&self) {}
}
