//! Inactivity monitor.
//!
//! After a quiet period with no user activity the session is logged out.
//! [`IdleTimer`] holds the countdown rules on explicit instants;
//! [`InactivityMonitor`] runs one on a watcher thread for a live session.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Quiet period after which the session is logged out.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Kinds of user activity that restart the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivitySignal {
    PointerMove,
    PointerDown,
    KeyPress,
    Scroll,
    TouchStart,
}

/// Countdown that restarts from the full duration on every touch.
#[derive(Debug, Clone)]
pub struct IdleTimer {
    timeout: Duration,
    deadline: Instant,
    fired: bool,
}

impl IdleTimer {
    /// Start counting down from `now`.
    pub fn start(timeout: Duration, now: Instant) -> Self {
        Self {
            timeout,
            deadline: now + timeout,
            fired: false,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Restart the countdown. Ignored once the timer has fired.
    pub fn touch(&mut self, now: Instant) {
        if !self.fired {
            self.deadline = now + self.timeout;
        }
    }

    /// Time left before the timer fires.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }

    /// Returns `true` exactly once, the first time the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.fired || now < self.deadline {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

enum Event {
    Activity(ActivitySignal),
    Stop,
}

/// Cloneable handle feeding activity to an [`InactivityMonitor`].
#[derive(Clone)]
pub struct ActivityRecorder {
    sender: Sender<Event>,
}

impl ActivityRecorder {
    /// Restart the countdown.
    pub fn record(&self, signal: ActivitySignal) {
        // A send error means the monitor already fired or stopped.
        let _ = self.sender.send(Event::Activity(signal));
    }
}

impl std::fmt::Debug for ActivityRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityRecorder").finish_non_exhaustive()
    }
}

/// A live idle watcher.
///
/// Arming starts a thread that runs `on_idle` once when no activity was
/// recorded for the whole timeout. Dropping or disarming the monitor stops
/// the thread without firing.
pub struct InactivityMonitor {
    sender: Sender<Event>,
    handle: Option<JoinHandle<()>>,
}

impl InactivityMonitor {
    /// Arm a monitor.
    pub fn arm<F>(timeout: Duration, on_idle: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel::<Event>();

        let handle = thread::spawn(move || {
            let mut timer = IdleTimer::start(timeout, Instant::now());
            loop {
                match receiver.recv_timeout(timer.remaining(Instant::now())) {
                    Ok(Event::Activity(signal)) => {
                        tracing::trace!("Activity: {:?}", signal);
                        timer.touch(Instant::now());
                    }
                    Ok(Event::Stop) | Err(RecvTimeoutError::Disconnected) => return,
                    Err(RecvTimeoutError::Timeout) => {
                        if timer.poll(Instant::now()) {
                            tracing::info!("No activity for {:?}, logging out", timeout);
                            on_idle();
                            return;
                        }
                    }
                }
            }
        });

        tracing::debug!("Inactivity monitor armed ({:?})", timeout);
        Self {
            sender,
            handle: Some(handle),
        }
    }

    /// Record user activity.
    pub fn record(&self, signal: ActivitySignal) {
        self.recorder().record(signal);
    }

    /// A handle that records activity from wherever the user is typing.
    pub fn recorder(&self) -> ActivityRecorder {
        ActivityRecorder {
            sender: self.sender.clone(),
        }
    }

    /// Whether the idle routine has run (or the watcher otherwise ended).
    pub fn has_fired(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Stop watching without firing.
    pub fn disarm(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.sender.send(Event::Stop);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("Inactivity watcher panicked");
            }
        }
    }
}

impl Drop for InactivityMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn default_timeout_is_ten_minutes() {
        assert_eq!(DEFAULT_IDLE_TIMEOUT, Duration::from_secs(600));
    }

    #[test]
    fn timer_fires_once_after_deadline() {
        let start = Instant::now();
        let mut timer = IdleTimer::start(Duration::from_secs(600), start);

        assert!(!timer.poll(start + Duration::from_secs(599)));
        assert!(timer.poll(start + Duration::from_secs(600)));
        assert!(!timer.poll(start + Duration::from_secs(1200)));
        assert!(timer.has_fired());
    }

    #[test]
    fn touch_restarts_full_duration() {
        let start = Instant::now();
        let mut timer = IdleTimer::start(Duration::from_secs(600), start);

        timer.touch(start + Duration::from_secs(540));
        assert!(!timer.poll(start + Duration::from_secs(700)));
        assert_eq!(
            timer.remaining(start + Duration::from_secs(540)),
            Duration::from_secs(600)
        );
        assert!(timer.poll(start + Duration::from_secs(1140)));
    }

    #[test]
    fn touch_after_firing_is_ignored() {
        let start = Instant::now();
        let mut timer = IdleTimer::start(Duration::from_secs(1), start);
        assert!(timer.poll(start + Duration::from_secs(2)));
        timer.touch(start + Duration::from_secs(3));
        assert!(!timer.poll(start + Duration::from_secs(10)));
    }

    #[test]
    fn monitor_fires_after_quiet_period() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let monitor = InactivityMonitor::arm(Duration::from_millis(50), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        thread::sleep(Duration::from_millis(300));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(monitor.has_fired());
        monitor.record(ActivitySignal::KeyPress);
        drop(monitor);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn activity_keeps_monitor_quiet() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let monitor = InactivityMonitor::arm(Duration::from_millis(400), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        for signal in [
            ActivitySignal::PointerMove,
            ActivitySignal::Scroll,
            ActivitySignal::KeyPress,
            ActivitySignal::TouchStart,
        ] {
            thread::sleep(Duration::from_millis(100));
            monitor.record(signal);
        }
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        monitor.disarm();
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn recorder_outlives_a_stopped_monitor() {
        let monitor = InactivityMonitor::arm(Duration::from_secs(60), || {});
        let recorder = monitor.recorder();
        monitor.disarm();
        recorder.record(ActivitySignal::KeyPress);
    }

    #[test]
    fn disarm_stops_without_firing() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let monitor = InactivityMonitor::arm(Duration::from_secs(60), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(!monitor.has_fired());
        monitor.disarm();
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
