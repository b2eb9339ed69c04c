//! Recurring per-frame work, decoupled from whatever clock drives it.
//!
//! `FrameLoop` owns a `Ticker` and a shared stop flag. The browser driver in
//! `web` calls `run_frame` from `requestAnimationFrame`; tests call it directly.
//! Once stopped (explicitly, by the ticker returning `Break`, or by dropping the
//! loop) no further frame reaches the ticker.

use std::cell::{Cell, RefCell};
use std::ops::ControlFlow;
use std::rc::Rc;

/// Work performed once per display refresh. Returning `Break` ends the loop.
pub trait Ticker {
    fn on_frame(&mut self, timestamp_ms: f64, elapsed_ms: f64) -> ControlFlow<()>;
}

impl<F: FnMut(f64, f64)> Ticker for F {
    fn on_frame(&mut self, timestamp_ms: f64, elapsed_ms: f64) -> ControlFlow<()> {
        self(timestamp_ms, elapsed_ms);
        ControlFlow::Continue(())
    }
}

/// Cloneable stop signal shared between the loop and whoever tears it down.
#[derive(Clone, Debug, Default)]
pub struct LoopHandle {
    stopped: Rc<Cell<bool>>,
}

impl LoopHandle {
    pub fn stop(&self) {
        self.stopped.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }

    /// True when both handles signal the same loop.
    pub fn same_loop(&self, other: &LoopHandle) -> bool {
        Rc::ptr_eq(&self.stopped, &other.stopped)
    }
}

/// At most one running loop per owner. Installing a new loop stops the previous one.
#[derive(Debug, Default)]
pub struct LoopSlot {
    active: RefCell<Option<LoopHandle>>,
}

impl LoopSlot {
    pub fn install(&self, handle: LoopHandle) {
        if let Some(prev) = self.active.replace(Some(handle)) {
            if !prev.is_stopped() {
                tracing::debug!("replacing running frame loop");
            }
            prev.stop();
        }
    }

    /// Stops whatever loop is installed. Returns whether one was running.
    pub fn stop_active(&self) -> bool {
        match self.active.take() {
            Some(handle) => {
                let running = !handle.is_stopped();
                handle.stop();
                running
            }
            None => false,
        }
    }

    /// Clears the slot if `handle` is the installed loop; a replaced loop leaves it alone.
    pub fn release(&self, handle: &LoopHandle) -> bool {
        let mut active = self.active.borrow_mut();
        if active.as_ref().is_some_and(|h| h.same_loop(handle)) {
            active.take();
            true
        } else {
            false
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.borrow().as_ref().is_some_and(|h| !h.is_stopped())
    }
}

pub struct FrameLoop<T: Ticker> {
    ticker: T,
    handle: LoopHandle,
    last_ts: Option<f64>,
    frames: u64,
}

impl<T: Ticker> FrameLoop<T> {
    pub fn new(ticker: T) -> Self {
        Self { ticker, handle: LoopHandle::default(), last_ts: None, frames: 0 }
    }

    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    /// Runs one frame unless stopped. `Break` tells the driver not to re-arm.
    pub fn run_frame(&mut self, timestamp_ms: f64) -> ControlFlow<()> {
        if self.handle.is_stopped() {
            return ControlFlow::Break(());
        }
        // First frame has no predecessor; report zero elapsed.
        let elapsed = self.last_ts.map(|prev| (timestamp_ms - prev).max(0.0)).unwrap_or(0.0);
        self.last_ts = Some(timestamp_ms);
        let flow = self.ticker.on_frame(timestamp_ms, elapsed);
        self.frames += 1;
        if flow.is_break() {
            tracing::debug!(frames = self.frames, "ticker ended frame loop");
            self.handle.stop();
        }
        flow
    }
}

impl<T: Ticker> Drop for FrameLoop<T> {
    fn drop(&mut self) {
        if !self.handle.is_stopped() {
            tracing::debug!(frames = self.frames, "frame loop dropped");
        }
        self.handle.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_stop_after_signal() {
        let seen = Rc::new(Cell::new(0u32));
        let counter = seen.clone();
        let mut fl = FrameLoop::new(move |_ts: f64, _dt: f64| counter.set(counter.get() + 1));
        let handle = fl.handle();
        assert_eq!(fl.run_frame(0.0), ControlFlow::Continue(()));
        assert_eq!(fl.run_frame(16.0), ControlFlow::Continue(()));
        handle.stop();
        assert_eq!(fl.run_frame(32.0), ControlFlow::Break(()));
        assert_eq!(seen.get(), 2);
        assert_eq!(fl.frames(), 2);
    }

    #[test]
    fn elapsed_is_delta_between_frames() {
        let last = Rc::new(Cell::new(-1.0f64));
        let sink = last.clone();
        let mut fl = FrameLoop::new(move |_ts: f64, dt: f64| sink.set(dt));
        fl.run_frame(100.0);
        assert_eq!(last.get(), 0.0);
        fl.run_frame(116.5);
        assert_eq!(last.get(), 16.5);
    }

    struct Countdown(u32);

    impl Ticker for Countdown {
        fn on_frame(&mut self, _ts: f64, _dt: f64) -> ControlFlow<()> {
            self.0 = self.0.saturating_sub(1);
            if self.0 == 0 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
        }
    }

    #[test]
    fn ticker_break_stops_loop() {
        let mut fl = FrameLoop::new(Countdown(2));
        let handle = fl.handle();
        assert_eq!(fl.run_frame(0.0), ControlFlow::Continue(()));
        assert_eq!(fl.run_frame(16.0), ControlFlow::Break(()));
        assert!(handle.is_stopped());
        assert_eq!(fl.run_frame(32.0), ControlFlow::Break(()));
        assert_eq!(fl.frames(), 2);
    }

    #[test]
    fn slot_keeps_one_loop_running() {
        let slot = LoopSlot::default();
        let first = LoopHandle::default();
        let second = LoopHandle::default();
        slot.install(first.clone());
        assert!(slot.is_running());
        slot.install(second.clone());
        assert!(first.is_stopped());
        assert!(!second.is_stopped());

        // The replaced loop can't clear its successor.
        assert!(!slot.release(&first));
        assert!(slot.is_running());
        assert!(slot.release(&second));
        assert!(!slot.is_running());
    }

    #[test]
    fn stop_active_reports_running_loop() {
        let slot = LoopSlot::default();
        assert!(!slot.stop_active());
        let handle = LoopHandle::default();
        slot.install(handle.clone());
        assert!(slot.stop_active());
        assert!(handle.is_stopped());
        assert!(!slot.stop_active());
    }

    #[test]
    fn dropping_loop_signals_stop() {
        let fl = FrameLoop::new(|_: f64, _: f64| {});
        let handle = fl.handle();
        drop(fl);
        assert!(handle.is_stopped());
    }
}
