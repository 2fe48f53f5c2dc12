use crate::controllers::session::events::SessionEvent;

/// Output port for session events. The worker thread calls `present`;
/// implementations must hand the event off without blocking for long.
pub trait DriverPresenterPort: Send + Sync {
    fn present(&self, event: SessionEvent);
}
