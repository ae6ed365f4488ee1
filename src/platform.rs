//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
use crate::{Error, PlatformWindow, Size};

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// Identity of a timer handed out by [`crate::WindowLink::start_timer`].
/// Widgets compare the id delivered to `on_timer` against the ones they
/// armed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub(crate) u64);

/// Mouse cursor shapes a backend can show.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cursor {
    /// The default arrow pointer.
    Arrow,
    /// A pointing hand, shown over clickable elements.
    Hand,
    /// A text-insertion beam.
    IBeam,
}

/// Something that can arm and cancel native timers. Hosts never touch widget
/// state; they post the fired [`TimerId`] into a [`TimerQueue`] and the event
/// loop dispatches it on the single UI thread.
pub trait TimerHost {
    /// Arms a timer that fires once after `delay_ms`, then, when
    /// `interval_ms` is set, periodically at that interval until cancelled.
    fn start(&mut self, id: TimerId, delay_ms: u64, interval_ms: Option<u64>) -> Result<(), Error>;

    /// Cancels a timer. A firing already posted to the queue may still be
    /// delivered; widgets re-check their own state when it arrives.
    fn cancel(&mut self, id: TimerId);
}

/// Sending half of a [`TimerQueue`], cloned into timer contexts.
#[derive(Clone)]
pub struct TimerSender(crossbeam_channel::Sender<TimerId>);

impl TimerSender {
    /// Posts a firing. Returns `false` when the queue is gone.
    pub fn fire(&self, id: TimerId) -> bool { self.0.send(id).is_ok() }
}

/// Marshals timer firings from whatever context the platform runs them in
/// back onto the event-loop thread. The loop drains the queue between native
/// events, so handlers always run with exclusive access to the widget tree.
pub struct TimerQueue {
    tx: crossbeam_channel::Sender<TimerId>,
    rx: crossbeam_channel::Receiver<TimerId>,
}

impl TimerQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    /// Returns a sender for a timer host to post firings through.
    pub fn sender(&self) -> TimerSender { TimerSender(self.tx.clone()) }

    /// Removes and returns the oldest pending firing, if any.
    pub fn poll(&self) -> Option<TimerId> { self.rx.try_recv().ok() }

    /// Drains every pending firing in arrival order.
    pub fn drain(&self) -> Vec<TimerId> {
        let mut fired = Vec::new();
        while let Ok(id) = self.rx.try_recv() {
            fired.push(id);
        }
        fired
    }
}

impl Default for TimerQueue {
    fn default() -> Self { Self::new() }
}

/// Portable [`TimerHost`] backed by sleeper threads. Each armed timer owns a
/// thread that sleeps and posts into the queue; cancellation flips an atomic
/// flag the thread checks after every sleep. A firing that raced the
/// cancellation can still arrive, which is why widgets re-check their state
/// in `on_timer`.
pub struct ThreadTimers {
    sender: TimerSender,
    active: HashMap<TimerId, Arc<AtomicBool>>,
}

impl ThreadTimers {
    /// Creates a host posting into the given queue.
    pub fn new(sender: TimerSender) -> Self { Self { sender, active: HashMap::new() } }
}

impl TimerHost for ThreadTimers {
    fn start(&mut self, id: TimerId, delay_ms: u64, interval_ms: Option<u64>) -> Result<(), Error> {
        self.cancel(id);
        let cancelled = Arc::new(AtomicBool::new(false));
        self.active.insert(id, cancelled.clone());
        let sender = self.sender.clone();
        let builder = thread::Builder::new().name(format!("pixelui-timer-{}", id.0));
        builder
            .spawn(move || {
                thread::sleep(Duration::from_millis(delay_ms));
                if cancelled.load(Ordering::Acquire) || !sender.fire(id) {
                    return;
                }
                let interval = match interval_ms {
                    Some(ms) => ms,
                    None => return,
                };
                loop {
                    thread::sleep(Duration::from_millis(interval));
                    if cancelled.load(Ordering::Acquire) || !sender.fire(id) {
                        return;
                    }
                }
            })
            .map_err(|e| Error::TimerCreation(e.to_string()))?;
        Ok(())
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(flag) = self.active.remove(&id) {
            flag.store(true, Ordering::Release);
        }
    }
}

impl Drop for ThreadTimers {
    fn drop(&mut self) {
        for flag in self.active.values() {
            flag.store(true, Ordering::Release);
        }
    }
}

/// The only platform-facing entry points the core needs satisfied. Concrete
/// adapters translate native events into the core event structs, blit the
/// window's pixel buffer onto the native surface, and drive [`TimerQueue`]
/// draining from their loop.
pub trait PlatformBackend {
    /// Creates the native window for `window`'s title and size.
    fn open_window(&mut self, window: &PlatformWindow) -> Result<(), Error>;

    /// Makes the native window visible.
    fn show_window(&mut self) -> Result<(), Error>;

    /// Requests a redraw on the next loop iteration.
    fn invalidate(&mut self);

    /// Changes the pointer shape.
    fn set_cursor(&mut self, cursor: Cursor);

    /// Runs the blocking event loop until the native window closes. Events
    /// are dispatched synchronously into `window`; each iteration drains the
    /// timer queue and recomposites when the window is dirty.
    fn main_loop(&mut self, window: &mut PlatformWindow) -> Result<(), Error>;
}

/// Smallest window size a backend is expected to honor.
pub const MIN_WINDOW_SIZE: Size = Size { width: 64, height: 64 };

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_delivers_in_order() {
        let queue = TimerQueue::new();
        let sender = queue.sender();
        sender.fire(TimerId(1));
        sender.fire(TimerId(2));
        assert_eq!(queue.drain(), vec![TimerId(1), TimerId(2)]);
        assert!(queue.poll().is_none());
    }

    #[test]
    fn one_shot_timer_fires_once() {
        let queue = TimerQueue::new();
        let mut host = ThreadTimers::new(queue.sender());
        host.start(TimerId(7), 1, None).unwrap();
        thread::sleep(Duration::from_millis(50));
        assert_eq!(queue.drain(), vec![TimerId(7)]);
    }

    #[test]
    fn periodic_timer_repeats_until_cancelled() {
        let queue = TimerQueue::new();
        let mut host = ThreadTimers::new(queue.sender());
        host.start(TimerId(3), 1, Some(5)).unwrap();
        thread::sleep(Duration::from_millis(60));
        host.cancel(TimerId(3));
        let fired = queue.drain();
        assert!(fired.len() >= 2);
        thread::sleep(Duration::from_millis(30));
        // at most one straggler that raced the cancellation flag
        assert!(queue.drain().len() <= 1);
    }

    #[test]
    fn cancel_before_delay_suppresses_the_firing() {
        let queue = TimerQueue::new();
        let mut host = ThreadTimers::new(queue.sender());
        host.start(TimerId(9), 30, None).unwrap();
        host.cancel(TimerId(9));
        thread::sleep(Duration::from_millis(60));
        assert!(queue.drain().is_empty());
    }
}
