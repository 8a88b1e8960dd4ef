use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Period of the session clock.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Identifies the schedule a tick came from.
pub type TickId = u64;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick(TickId),
}

/// Source of application events (keyboard, resize, clock ticks)
pub trait EventSource {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source: a crossterm reader thread feeding a channel
/// that tick schedules can also send into.
pub struct CrosstermEventSource {
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let reader_tx = tx.clone();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => AppEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!(error = %err, "terminal event reader stopped");
                    break;
                }
            };
            if reader_tx.send(evt).is_err() {
                break;
            }
        });

        Self { tx, rx }
    }

    /// Sender for other producers, e.g. [`ThreadTickScheduler`].
    pub fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source fed by a plain channel
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that pulls one event at a time, serializing all state changes.
pub struct Runner<E: EventSource> {
    event_source: E,
    poll_interval: Duration,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E, poll_interval: Duration) -> Self {
        Self {
            event_source,
            poll_interval,
        }
    }

    /// Blocks up to the poll interval; `None` when nothing arrived.
    pub fn step(&self) -> Option<AppEvent> {
        self.event_source.recv_timeout(self.poll_interval).ok()
    }
}

/// Cancellation side of a recurring tick schedule.
///
/// Clones share the flag; cancelling any clone stops the schedule and
/// cancelling twice is a no-op.
#[derive(Clone, Debug)]
pub struct TickHandle {
    id: TickId,
    cancelled: Arc<AtomicBool>,
}

impl TickHandle {
    pub fn new(id: TickId) -> Self {
        Self {
            id,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> TickId {
        self.id
    }

    /// Returns true only for the call that actually cancelled.
    pub fn cancel(&self) -> bool {
        !self.cancelled.swap(true, Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Host facility that delivers a tick every `period` until the handle is cancelled.
pub trait TickScheduler {
    fn schedule(&mut self, period: Duration) -> TickHandle;
}

static NEXT_TICK_ID: AtomicU64 = AtomicU64::new(1);

fn next_tick_id() -> TickId {
    NEXT_TICK_ID.fetch_add(1, Ordering::Relaxed)
}

/// One sleeper thread per schedule, sending [`AppEvent::Tick`] into the app channel.
pub struct ThreadTickScheduler {
    tx: Sender<AppEvent>,
}

impl ThreadTickScheduler {
    pub fn new(tx: Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl TickScheduler for ThreadTickScheduler {
    fn schedule(&mut self, period: Duration) -> TickHandle {
        let handle = TickHandle::new(next_tick_id());
        let worker = handle.clone();
        let tx = self.tx.clone();

        std::thread::spawn(move || loop {
            std::thread::sleep(period);
            if worker.is_cancelled() || tx.send(AppEvent::Tick(worker.id())).is_err() {
                break;
            }
        });

        handle
    }
}

/// Records schedules without any timer; the driver delivers ticks by hand.
#[derive(Clone, Default)]
pub struct ManualTickScheduler {
    handles: Rc<RefCell<Vec<TickHandle>>>,
}

impl ManualTickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every handle created so far, oldest first.
    pub fn handles(&self) -> Vec<TickHandle> {
        self.handles.borrow().clone()
    }

    /// Handles that have not been cancelled.
    pub fn live(&self) -> Vec<TickHandle> {
        self.handles
            .borrow()
            .iter()
            .filter(|h| !h.is_cancelled())
            .cloned()
            .collect()
    }
}

impl TickScheduler for ManualTickScheduler {
    fn schedule(&mut self, _period: Duration) -> TickHandle {
        let handle = TickHandle::new(next_tick_id());
        self.handles.borrow_mut().push(handle.clone());
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn step_returns_none_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(1));

        assert_eq!(runner.step(), None);
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        tx.send(AppEvent::Key(key)).unwrap();
        tx.send(AppEvent::Tick(7)).unwrap();
        let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(10));

        assert_eq!(runner.step(), Some(AppEvent::Key(key)));
        assert_eq!(runner.step(), Some(AppEvent::Tick(7)));
    }

    #[test]
    fn cancel_is_idempotent() {
        let handle = TickHandle::new(1);
        let clone = handle.clone();

        assert!(!handle.is_cancelled());
        assert!(clone.cancel());
        assert!(handle.is_cancelled());
        assert!(!handle.cancel());
        assert!(!clone.cancel());
    }

    #[test]
    fn manual_scheduler_tracks_live_handles() {
        let mut scheduler = ManualTickScheduler::new();
        let observer = scheduler.clone();

        let a = scheduler.schedule(TICK_INTERVAL);
        let b = scheduler.schedule(TICK_INTERVAL);
        assert_ne!(a.id(), b.id());
        assert_eq!(observer.handles().len(), 2);

        a.cancel();
        let live = observer.live();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].id(), b.id());
    }

    #[test]
    fn thread_scheduler_ticks_until_cancelled() {
        let (tx, rx) = mpsc::channel();
        let mut scheduler = ThreadTickScheduler::new(tx);
        let handle = scheduler.schedule(Duration::from_millis(5));

        let first = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(first, AppEvent::Tick(handle.id()));

        handle.cancel();
        // Drain anything already in flight, then the schedule must go quiet.
        std::thread::sleep(Duration::from_millis(30));
        while rx.try_recv().is_ok() {}
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }
}
