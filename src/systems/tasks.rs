//! Frame-polled local tasks
//!
//! Futures such as [`WaitForFinished`](curtains_core::WaitForFinished) are
//! spawned here and polled once per frame on the main thread. Nothing blocks:
//! a pending task is simply polled again next frame.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Wake, Waker};

type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Waker that does nothing; tasks are re-polled every frame anyway
struct FrameWaker;

impl Wake for FrameWaker {
    fn wake(self: Arc<Self>) {}
}

/// Tasks polled from the frame loop
#[derive(Default)]
pub struct FrameTasks {
    tasks: Vec<LocalTask>,
}

impl FrameTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a future to be polled from the next frame on
    pub fn spawn<F>(&mut self, future: F)
    where
        F: Future<Output = ()> + 'static,
    {
        self.tasks.push(Box::pin(future));
    }

    /// Poll every task once, dropping the ones that completed
    ///
    /// Returns the number of tasks that completed this frame.
    pub fn poll_all(&mut self) -> usize {
        let waker = Waker::from(Arc::new(FrameWaker));
        let mut cx = Context::from_waker(&waker);
        let before = self.tasks.len();
        self.tasks
            .retain_mut(|task| task.as_mut().poll(&mut cx).is_pending());
        before - self.tasks.len()
    }

    /// Number of tasks still pending
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curtains_core::{MaterialParams, Preset, TransitionController};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_ready_task_completes_on_first_poll() {
        let mut tasks = FrameTasks::new();
        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        tasks.spawn(async move { flag.set(true) });

        assert_eq!(tasks.poll_all(), 1);
        assert!(ran.get());
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_wait_task_completes_after_transition() {
        let mut controller = TransitionController::new(MaterialParams::default());
        controller.play(&Preset::new().with_duration(0.5)).unwrap();

        let done = Rc::new(Cell::new(false));
        let flag = done.clone();
        let wait = controller.wait_for_finished();
        let mut tasks = FrameTasks::new();
        tasks.spawn(async move {
            wait.await;
            flag.set(true);
        });

        controller.advance(0.25);
        assert_eq!(tasks.poll_all(), 0);
        assert_eq!(tasks.len(), 1);
        assert!(!done.get());

        controller.advance(0.25);
        assert_eq!(tasks.poll_all(), 1);
        assert!(done.get());
    }

    #[test]
    fn test_empty_poll() {
        let mut tasks = FrameTasks::new();
        assert_eq!(tasks.poll_all(), 0);
    }
}
