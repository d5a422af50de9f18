//! Frame driver
//!
//! Owns the single outstanding frame request. Every way out of the running
//! loop (pause, game over, teardown, drop) goes through `Driver::stop`.

use super::time::FrameClock;

/// Host-issued ID for a scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// Something that can call us back on the next display refresh
pub trait FrameHost {
    /// `None` when the host could not schedule a callback
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Schedules frames and measures the time between them
#[derive(Debug)]
pub struct Driver<H: FrameHost> {
    host: H,
    clock: FrameClock,
    pending: Option<FrameHandle>,
}

impl<H: FrameHost> Driver<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            clock: FrameClock::new(),
            pending: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// A frame callback is outstanding
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Begin a fresh run of frames; the first frame measures `dt = 0`
    pub fn start(&mut self) {
        self.stop();
        self.schedule();
    }

    /// Request the next frame unless one is already outstanding
    ///
    /// A refused request leaves nothing pending, so a later call retries.
    pub fn schedule(&mut self) {
        if self.pending.is_none() {
            self.pending = self.host.request_frame();
            if self.pending.is_none() {
                log::warn!("Host refused a frame request");
            }
        }
    }

    /// The outstanding frame fired; returns the elapsed seconds
    pub fn frame_fired(&mut self, now_ms: f64) -> f32 {
        self.pending = None;
        self.clock.advance(now_ms)
    }

    /// Cancel any outstanding frame and forget the clock; no-op when idle
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.host.cancel_frame(handle);
        }
        self.clock.reset();
    }
}

impl<H: FrameHost> Drop for Driver<H> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// In-memory host for headless runs and tests
///
/// Frames fire only when the owner calls `take_pending`.
#[derive(Debug, Default)]
pub struct RecordingHost {
    next_id: i32,
    outstanding: Vec<FrameHandle>,
    /// Total frames requested
    pub requests: usize,
    /// Total frames cancelled
    pub cancels: usize,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames requested but neither fired nor cancelled
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }

    /// Fire the oldest outstanding frame, if any
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        if self.outstanding.is_empty() {
            None
        } else {
            Some(self.outstanding.remove(0))
        }
    }
}

impl FrameHost for RecordingHost {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.outstanding.push(handle);
        self.requests += 1;
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.outstanding.retain(|h| *h != handle);
        self.cancels += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_is_single_flight() {
        let mut driver = Driver::new(RecordingHost::new());
        driver.schedule();
        driver.schedule();
        assert_eq!(driver.host().requests, 1);
        assert_eq!(driver.host().outstanding(), 1);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut driver = Driver::new(RecordingHost::new());
        driver.stop();
        assert_eq!(driver.host().cancels, 0);

        driver.start();
        driver.stop();
        driver.stop();
        assert_eq!(driver.host().cancels, 1);
        assert_eq!(driver.host().outstanding(), 0);
        assert!(!driver.is_scheduled());
    }

    #[test]
    fn test_frame_fired_measures_dt() {
        let mut driver = Driver::new(RecordingHost::new());
        driver.start();
        driver.host_mut().take_pending();
        assert_eq!(driver.frame_fired(100.0), 0.0);
        assert!(!driver.is_scheduled());

        driver.schedule();
        driver.host_mut().take_pending();
        let dt = driver.frame_fired(150.0);
        assert!((dt - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_restart_resets_clock() {
        let mut driver = Driver::new(RecordingHost::new());
        driver.start();
        driver.frame_fired(0.0);
        driver.start();
        assert_eq!(driver.frame_fired(60_000.0), 0.0);
    }

    /// Refuses the first `failures` requests, then grants them
    #[derive(Default)]
    struct FlakyHost {
        failures: usize,
        granted: usize,
        cancels: usize,
    }

    impl FrameHost for FlakyHost {
        fn request_frame(&mut self) -> Option<FrameHandle> {
            if self.failures > 0 {
                self.failures -= 1;
                return None;
            }
            self.granted += 1;
            Some(FrameHandle(self.granted as i32))
        }

        fn cancel_frame(&mut self, _handle: FrameHandle) {
            self.cancels += 1;
        }
    }

    #[test]
    fn test_refused_request_leaves_nothing_pending() {
        let mut driver = Driver::new(FlakyHost {
            failures: 1,
            ..Default::default()
        });
        driver.start();
        assert!(!driver.is_scheduled());

        driver.schedule();
        assert!(driver.is_scheduled());
        assert_eq!(driver.host().granted, 1);

        driver.stop();
        assert_eq!(driver.host().cancels, 1);
    }

    #[test]
    fn test_refused_request_is_never_cancelled() {
        let mut driver = Driver::new(FlakyHost {
            failures: 1,
            ..Default::default()
        });
        driver.start();
        driver.stop();
        assert_eq!(driver.host().cancels, 0);
    }

    #[test]
    fn test_fired_frame_is_not_cancelled() {
        let mut driver = Driver::new(RecordingHost::new());
        driver.start();
        driver.host_mut().take_pending();
        driver.frame_fired(0.0);
        driver.stop();
        assert_eq!(driver.host().cancels, 0);
    }
}
