use std::time::Duration;

/// Cancellation and pacing capability handed to a running algorithm.
/// Deliberately read-only: an algorithm can observe a stop request but
/// never raise one.
pub trait StepControl: Send + Sync {
    fn is_stop_requested(&self) -> bool;

    /// Informational; authoritative pacing lives in the driver loop.
    fn pacing_delay(&self) -> Duration;
}

/// Control for synchronous drives: never stops, no pacing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeRun;

impl StepControl for FreeRun {
    #[inline]
    fn is_stop_requested(&self) -> bool {
        false
    }

    #[inline]
    fn pacing_delay(&self) -> Duration {
        Duration::ZERO
    }
}

impl<F> StepControl for F
where
    F: Fn() -> bool + Send + Sync,
{
    #[inline]
    fn is_stop_requested(&self) -> bool {
        self()
    }

    #[inline]
    fn pacing_delay(&self) -> Duration {
        Duration::ZERO
    }
}
