//! Waiting for the current transition to finish
//!
//! The controller publishes its finished flag through a [`FinishedSignal`].
//! [`WaitForFinished`] futures share that signal, so they can be held and
//! polled by a host task without borrowing the controller. Pending futures
//! park their waker and are woken when the flag flips to finished.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

#[derive(Debug)]
struct SignalInner {
    finished: Cell<bool>,
    wakers: RefCell<Vec<Waker>>,
}

/// Single-threaded shared finished flag
#[derive(Clone, Debug)]
pub(crate) struct FinishedSignal {
    inner: Rc<SignalInner>,
}

impl FinishedSignal {
    pub(crate) fn new(finished: bool) -> Self {
        Self {
            inner: Rc::new(SignalInner {
                finished: Cell::new(finished),
                wakers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.inner.finished.get()
    }

    /// Update the flag, waking parked waiters when it becomes true
    pub(crate) fn set(&self, finished: bool) {
        let was_finished = self.inner.finished.replace(finished);
        if finished && !was_finished {
            let wakers = std::mem::take(&mut *self.inner.wakers.borrow_mut());
            for waker in wakers {
                waker.wake();
            }
        }
    }

    pub(crate) fn wait(&self) -> WaitForFinished {
        WaitForFinished {
            signal: self.clone(),
        }
    }

    fn park(&self, waker: &Waker) {
        let mut wakers = self.inner.wakers.borrow_mut();
        if !wakers.iter().any(|w| w.will_wake(waker)) {
            wakers.push(waker.clone());
        }
    }
}

/// Future that resolves once no transition is running
///
/// Resolves on the first poll if the controller is already idle. Dropping
/// it is the only way to stop waiting.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct WaitForFinished {
    signal: FinishedSignal,
}

impl WaitForFinished {
    /// True if polling would resolve immediately
    pub fn is_ready(&self) -> bool {
        self.signal.is_finished()
    }
}

impl Future for WaitForFinished {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.signal.is_finished() {
            Poll::Ready(())
        } else {
            self.signal.park(cx.waker());
            Poll::Pending
        }
    }
}
