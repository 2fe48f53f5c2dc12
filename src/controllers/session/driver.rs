use crate::controllers::session::errors::DriverError;
use crate::controllers::session::events::SessionEvent;
use crate::controllers::session::ports::DriverPresenterPort;
use crate::core::algorithms::{AlgorithmRegistry, SortAlgorithm};
use crate::core::data::{Dataset, Snapshot};
use crate::core::step::{NullEventSink, SessionMarks, StepContext, StepControl, StepEventSink};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error};

/// Re-poll interval while a session sits paused. Resume and stop both wake
/// the worker early through the condvar.
const PAUSE_POLL_INTERVAL: Duration = Duration::from_millis(100);

struct SharedState {
    active: AtomicBool,
    paused: AtomicBool,
    delay_ms: AtomicU64,
    sleep_lock: Mutex<()>,
    wake: Condvar,
    dataset: Mutex<Dataset>,
    algorithm: Mutex<Option<Box<dyn SortAlgorithm>>>,
    presenter: Arc<dyn DriverPresenterPort>,
    events: Arc<dyn StepEventSink>,
}

impl StepControl for SharedState {
    fn is_stop_requested(&self) -> bool {
        !self.active.load(Ordering::Acquire)
    }

    fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms.load(Ordering::Relaxed))
    }
}

/// Owns the dataset and the selected algorithm, and runs sessions on a
/// dedicated worker thread. All public methods are callable from any
/// thread concurrently with the worker; the activity and pause flags are
/// the only cross-thread mutable state outside the session-boundary locks.
pub struct SortDriver {
    registry: AlgorithmRegistry,
    shared: Arc<SharedState>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl SortDriver {
    /// A driver with no audio/event observers attached.
    #[must_use]
    pub fn new(registry: AlgorithmRegistry, presenter: Arc<dyn DriverPresenterPort>) -> Self {
        Self::with_event_sink(registry, presenter, Arc::new(NullEventSink))
    }

    #[must_use]
    pub fn with_event_sink(
        registry: AlgorithmRegistry,
        presenter: Arc<dyn DriverPresenterPort>,
        events: Arc<dyn StepEventSink>,
    ) -> Self {
        Self {
            registry,
            shared: Arc::new(SharedState {
                active: AtomicBool::new(false),
                paused: AtomicBool::new(false),
                delay_ms: AtomicU64::new(100),
                sleep_lock: Mutex::new(()),
                wake: Condvar::new(),
                dataset: Mutex::new(Dataset::from_values(&[])),
                algorithm: Mutex::new(None),
                presenter,
                events,
            }),
            worker: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn algorithm_names(&self) -> Vec<&'static str> {
        self.registry.names()
    }

    #[must_use]
    pub fn selected_algorithm(&self) -> Option<&'static str> {
        self.shared
            .algorithm
            .lock()
            .unwrap()
            .as_ref()
            .map(|algorithm| algorithm.name())
    }

    pub fn select_algorithm(&self, name: &str) -> Result<(), DriverError> {
        if self.shared.active.load(Ordering::Acquire) {
            return Err(DriverError::SessionActive);
        }

        let algorithm = self
            .registry
            .create(name)
            .map_err(|unknown| DriverError::UnknownAlgorithm { name: unknown.name })?;
        *self.shared.algorithm.lock().unwrap() = Some(algorithm);
        debug!(name, "algorithm selected");
        Ok(())
    }

    /// Replaces the dataset, tearing down any running session first.
    pub fn generate_dataset(&self, size: usize, min: i32, max: i32) -> Result<(), DriverError> {
        self.stop();
        self.join_worker();

        let mut rng = StdRng::from_entropy();
        let dataset = Dataset::generate(size, min, max, &mut rng)?;
        let snapshot = Arc::new(Snapshot::of(&dataset));
        *self.shared.dataset.lock().unwrap() = dataset;
        self.shared
            .presenter
            .present(SessionEvent::Snapshot(snapshot));
        debug!(size, min, max, "dataset generated");
        Ok(())
    }

    /// Takes a working copy of the dataset, initializes the selected
    /// algorithm, and spawns the stepping worker.
    pub fn start(&self) -> Result<(), DriverError> {
        let working = self.shared.dataset.lock().unwrap().clone();
        let mut slot = self.shared.algorithm.lock().unwrap();

        let Some(mut algorithm) = slot.take() else {
            return Err(DriverError::NoAlgorithmSelected);
        };
        if working.is_empty() {
            *slot = Some(algorithm);
            return Err(DriverError::EmptyDataset);
        }
        if self
            .shared
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            *slot = Some(algorithm);
            return Err(DriverError::SessionActive);
        }
        drop(slot);

        self.shared.paused.store(false, Ordering::Release);

        let mut working = working;
        working.reset_states();
        algorithm.initialize(&working);
        debug!(algorithm = algorithm.name(), len = working.len(), "session started");

        let shared = Arc::clone(&self.shared);
        let handle = thread::spawn(move || worker_loop(&shared, working, algorithm));

        let mut worker = self.worker.lock().unwrap();
        if let Some(previous) = worker.take() {
            // The previous session already cleared the active flag; the
            // join only reaps the finished thread.
            let _ = previous.join();
        }
        *worker = Some(handle);
        Ok(())
    }

    /// Requests cooperative cancellation and interrupts any pacing sleep.
    /// The dataset is never touched here; the worker's exit path
    /// normalizes visual state.
    pub fn stop(&self) {
        if self.shared.active.swap(false, Ordering::AcqRel) {
            self.shared.wake.notify_all();
            debug!("stop requested");
        }
    }

    pub fn pause(&self) {
        if self.shared.active.load(Ordering::Acquire) {
            self.shared.paused.store(true, Ordering::Release);
        }
    }

    pub fn resume(&self) {
        if self.shared.active.load(Ordering::Acquire)
            && self.shared.paused.swap(false, Ordering::AcqRel)
        {
            self.shared.wake.notify_all();
        }
    }

    pub fn set_pacing_delay(&self, delay_ms: u64) {
        self.shared.delay_ms.store(delay_ms, Ordering::Relaxed);
    }

    #[must_use]
    pub fn pacing_delay(&self) -> Duration {
        self.shared.pacing_delay()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shared.active.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.shared.paused.load(Ordering::Acquire)
    }

    fn join_worker(&self) {
        let handle = self.worker.lock().unwrap().take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }
}

impl Drop for SortDriver {
    fn drop(&mut self) {
        self.stop();
        self.join_worker();
    }
}

fn worker_loop(shared: &Arc<SharedState>, mut data: Dataset, mut algorithm: Box<dyn SortAlgorithm>) {
    let mut marks = SessionMarks::new();
    let mut steps: u64 = 0;
    let mut failure: Option<String> = None;

    publish(shared, &data);
    pace(shared, shared.pacing_delay());

    let mut more = true;
    while more && shared.active.load(Ordering::Acquire) {
        if shared.paused.load(Ordering::Acquire) {
            pace(shared, PAUSE_POLL_INTERVAL);
            continue;
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut ctx = StepContext::new(
                &mut data,
                shared.events.as_ref(),
                shared.as_ref() as &dyn StepControl,
                &mut marks,
            );
            algorithm.next_step(&mut ctx)
        }));

        match outcome {
            Ok(has_more) => {
                more = has_more;
                steps += 1;
            }
            Err(payload) => {
                failure = Some(panic_message(payload.as_ref()));
                break;
            }
        }

        publish(shared, &data);
        if more && shared.active.load(Ordering::Acquire) {
            pace(shared, shared.pacing_delay());
        }
    }

    shared.active.store(false, Ordering::Release);
    shared.paused.store(false, Ordering::Release);

    let name = algorithm.name();
    let completed = failure.is_none() && algorithm.is_sorted();
    if completed {
        data.mark_all_sorted();
    } else {
        data.clear_transient_states();
    }
    publish(shared, &data);

    // Hand the dataset and the algorithm instance back before announcing
    // the outcome, so a caller reacting to the terminal event can start
    // the next session immediately.
    *shared.dataset.lock().unwrap() = data;
    {
        let mut slot = shared.algorithm.lock().unwrap();
        if slot.is_none() {
            *slot = Some(algorithm);
        }
    }

    if let Some(message) = failure {
        error!(algorithm = name, message = %message, "step panicked, session aborted");
        shared.presenter.present(SessionEvent::Failed {
            algorithm: name,
            message,
        });
    } else if completed {
        debug!(algorithm = name, steps, "sort completed");
        shared.presenter.present(SessionEvent::Completed {
            algorithm: name,
            steps,
        });
    } else {
        debug!(algorithm = name, steps, "sort stopped before completion");
        shared
            .presenter
            .present(SessionEvent::Stopped { algorithm: name });
    }
}

fn publish(shared: &SharedState, data: &Dataset) {
    shared
        .presenter
        .present(SessionEvent::Snapshot(Arc::new(Snapshot::of(data))));
}

/// Interruptible sleep: stop and resume cut it short via the condvar.
fn pace(shared: &SharedState, duration: Duration) {
    if duration.is_zero() {
        return;
    }
    let guard = shared.sleep_lock.lock().unwrap();
    let _ = shared.wake.wait_timeout(guard, duration).unwrap();
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_owned()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::ElementState;
    use std::time::Instant;

    #[derive(Default)]
    struct MockPresenterPort {
        events: Mutex<Vec<SessionEvent>>,
    }

    impl MockPresenterPort {
        fn events(&self) -> Vec<SessionEvent> {
            self.events.lock().unwrap().clone()
        }

        fn snapshot_count(&self) -> usize {
            self.events()
                .iter()
                .filter(|event| matches!(event, SessionEvent::Snapshot(_)))
                .count()
        }

        fn last_snapshot(&self) -> Option<Arc<Snapshot>> {
            self.events()
                .into_iter()
                .rev()
                .find_map(|event| match event {
                    SessionEvent::Snapshot(snapshot) => Some(snapshot),
                    _ => None,
                })
        }
    }

    impl DriverPresenterPort for MockPresenterPort {
        fn present(&self, event: SessionEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn wait_for_terminal_event(
        presenter: &MockPresenterPort,
        timeout: Duration,
    ) -> Option<SessionEvent> {
        let start = Instant::now();
        loop {
            let terminal = presenter.events().into_iter().find(|event| {
                matches!(
                    event,
                    SessionEvent::Completed { .. }
                        | SessionEvent::Stopped { .. }
                        | SessionEvent::Failed { .. }
                )
            });
            if terminal.is_some() {
                return terminal;
            }
            if start.elapsed() >= timeout {
                return None;
            }
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn driver_with_mock() -> (SortDriver, Arc<MockPresenterPort>) {
        let presenter = Arc::new(MockPresenterPort::default());
        let driver = SortDriver::new(
            AlgorithmRegistry::standard(),
            Arc::clone(&presenter) as Arc<dyn DriverPresenterPort>,
        );
        (driver, presenter)
    }

    #[test]
    fn start_without_algorithm_is_a_recoverable_error() {
        let (driver, _presenter) = driver_with_mock();
        driver.generate_dataset(8, 1, 50).unwrap();

        assert_eq!(driver.start(), Err(DriverError::NoAlgorithmSelected));
        assert!(!driver.is_running());
    }

    #[test]
    fn start_with_empty_dataset_is_a_recoverable_error() {
        let (driver, _presenter) = driver_with_mock();
        driver.select_algorithm("Quick Sort").unwrap();

        assert_eq!(driver.start(), Err(DriverError::EmptyDataset));
        assert!(!driver.is_running());
        // The algorithm selection survives the failed start.
        assert_eq!(driver.selected_algorithm(), Some("Quick Sort"));
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let (driver, _presenter) = driver_with_mock();

        let result = driver.select_algorithm("Sleep Sort");

        assert_eq!(
            result,
            Err(DriverError::UnknownAlgorithm {
                name: "Sleep Sort".to_owned()
            })
        );
    }

    #[test]
    fn completed_session_publishes_sorted_snapshot_and_terminal_event() {
        let (driver, presenter) = driver_with_mock();
        driver.generate_dataset(24, 1, 100).unwrap();
        driver.select_algorithm("Quick Sort").unwrap();
        driver.set_pacing_delay(0);

        driver.start().unwrap();
        let terminal = wait_for_terminal_event(&presenter, Duration::from_secs(5))
            .expect("session should finish");

        match terminal {
            SessionEvent::Completed { algorithm, steps } => {
                assert_eq!(algorithm, "Quick Sort");
                assert!(steps > 0);
            }
            other => panic!("expected completion, got {other:?}"),
        }

        let snapshot = presenter.last_snapshot().expect("snapshots were published");
        assert_eq!(snapshot.elements.len(), 24);
        assert!(
            snapshot
                .elements
                .windows(2)
                .all(|pair| pair[0].value() <= pair[1].value())
        );
        assert!(
            snapshot
                .elements
                .iter()
                .all(|element| element.state() == ElementState::Sorted)
        );
        assert!(!driver.is_running());
    }

    #[test]
    fn stop_mid_sort_leaves_a_transient_free_snapshot() {
        let (driver, presenter) = driver_with_mock();
        driver.generate_dataset(64, 1, 200).unwrap();
        driver.select_algorithm("Bubble Sort").unwrap();
        driver.set_pacing_delay(2);

        driver.start().unwrap();
        thread::sleep(Duration::from_millis(30));
        driver.stop();

        let terminal = wait_for_terminal_event(&presenter, Duration::from_secs(5))
            .expect("session should end after stop");
        assert!(matches!(terminal, SessionEvent::Stopped { algorithm: "Bubble Sort" }));

        let snapshot = presenter.last_snapshot().expect("snapshots were published");
        assert_eq!(snapshot.elements.len(), 64);
        assert!(
            snapshot
                .elements
                .iter()
                .all(|element| !element.state().is_transient())
        );
        assert!(!driver.is_running());
    }

    #[test]
    fn pause_suspends_stepping_until_resume() {
        let (driver, presenter) = driver_with_mock();
        driver.generate_dataset(48, 1, 100).unwrap();
        driver.select_algorithm("Cocktail Sort").unwrap();
        driver.set_pacing_delay(1);

        driver.start().unwrap();
        driver.pause();
        assert!(driver.is_paused());

        // Let any in-flight step drain, then verify publishing stalls.
        thread::sleep(Duration::from_millis(30));
        let count_when_paused = presenter.snapshot_count();
        thread::sleep(Duration::from_millis(60));
        assert_eq!(presenter.snapshot_count(), count_when_paused);

        driver.set_pacing_delay(0);
        driver.resume();
        let terminal = wait_for_terminal_event(&presenter, Duration::from_secs(10))
            .expect("session should finish after resume");
        assert!(matches!(terminal, SessionEvent::Completed { .. }));
    }

    #[test]
    fn pause_and_resume_are_no_ops_while_idle() {
        let (driver, _presenter) = driver_with_mock();

        driver.pause();
        assert!(!driver.is_paused());
        driver.resume();
        assert!(!driver.is_running());
    }

    #[test]
    fn selecting_an_algorithm_mid_session_is_rejected() {
        let (driver, presenter) = driver_with_mock();
        driver.generate_dataset(64, 1, 200).unwrap();
        driver.select_algorithm("Bubble Sort").unwrap();
        driver.set_pacing_delay(5);
        driver.start().unwrap();

        assert_eq!(
            driver.select_algorithm("Quick Sort"),
            Err(DriverError::SessionActive)
        );

        driver.stop();
        wait_for_terminal_event(&presenter, Duration::from_secs(5));
    }

    #[test]
    fn generating_a_dataset_tears_down_the_running_session() {
        let (driver, presenter) = driver_with_mock();
        driver.generate_dataset(64, 1, 200).unwrap();
        driver.select_algorithm("Bubble Sort").unwrap();
        driver.set_pacing_delay(5);
        driver.start().unwrap();

        driver.generate_dataset(10, 1, 20).unwrap();

        assert!(!driver.is_running());
        let snapshot = presenter.last_snapshot().expect("fresh snapshot published");
        assert_eq!(snapshot.elements.len(), 10);
    }

    #[test]
    fn driver_can_run_a_second_session_after_completion() {
        let (driver, presenter) = driver_with_mock();
        driver.generate_dataset(12, 1, 50).unwrap();
        driver.select_algorithm("Merge Sort").unwrap();
        driver.set_pacing_delay(0);

        driver.start().unwrap();
        wait_for_terminal_event(&presenter, Duration::from_secs(5))
            .expect("first session should finish");

        // The algorithm instance returns to its slot on worker exit.
        assert_eq!(driver.selected_algorithm(), Some("Merge Sort"));
        driver.start().unwrap();
        let start = Instant::now();
        while driver.is_running() && start.elapsed() < Duration::from_secs(5) {
            thread::sleep(Duration::from_millis(5));
        }
        assert!(!driver.is_running());
    }

    #[derive(Debug)]
    struct PanickingSort;

    impl SortAlgorithm for PanickingSort {
        fn name(&self) -> &'static str {
            "Panicking Sort"
        }

        fn reset(&mut self, _len: usize) {}

        fn next_step(&mut self, _ctx: &mut StepContext<'_>) -> bool {
            panic!("deliberate test failure");
        }

        fn is_sorted(&self) -> bool {
            false
        }
    }

    #[test]
    fn a_panicking_step_fails_the_session_without_crashing() {
        let mut registry = AlgorithmRegistry::standard();
        registry.register("Panicking Sort", || Box::new(PanickingSort));
        let presenter = Arc::new(MockPresenterPort::default());
        let driver = SortDriver::new(
            registry,
            Arc::clone(&presenter) as Arc<dyn DriverPresenterPort>,
        );
        driver.generate_dataset(8, 1, 50).unwrap();
        driver.select_algorithm("Panicking Sort").unwrap();
        driver.set_pacing_delay(0);

        driver.start().unwrap();
        let terminal = wait_for_terminal_event(&presenter, Duration::from_secs(5))
            .expect("session should fail");

        match terminal {
            SessionEvent::Failed { algorithm, message } => {
                assert_eq!(algorithm, "Panicking Sort");
                assert!(message.contains("deliberate test failure"));
            }
            other => panic!("expected failure event, got {other:?}"),
        }
        assert!(!driver.is_running());

        let snapshot = presenter.last_snapshot().expect("snapshots were published");
        assert!(
            snapshot
                .elements
                .iter()
                .all(|element| !element.state().is_transient())
        );
    }
}
