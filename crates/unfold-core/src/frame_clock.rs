//! "Next rendering frame" primitives on top of the runtime's callback queue.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use crate::runtime::RuntimeHandle;
use crate::FrameCallbackId;

#[derive(Clone)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.clone()
    }

    /// Runs `callback` once, during the next frame, with the frame time in
    /// nanoseconds. Dropping the returned registration cancels it.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let id = self.runtime.register_frame_callback(callback);
        FrameCallbackRegistration {
            runtime: self.runtime.clone(),
            id,
        }
    }

    pub fn with_frame_millis(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        self.with_frame_nanos(move |nanos| callback(nanos / 1_000_000))
    }

    /// Future resolving to the time of the next frame.
    pub fn next_frame(&self) -> NextFrame {
        NextFrame {
            clock: self.clone(),
            slot: Rc::new(RefCell::new(FrameSlot::default())),
        }
    }
}

/// A pending frame callback. Cancelled on drop.
pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.release();
    }
}

#[derive(Default)]
struct FrameSlot {
    registration: Option<FrameCallbackRegistration>,
    time: Option<u64>,
    waker: Option<Waker>,
}

/// Future returned by [`FrameClock::next_frame`].
///
/// Registers its frame callback on first poll, so a future created but never
/// awaited does not keep the runtime busy.
pub struct NextFrame {
    clock: FrameClock,
    slot: Rc<RefCell<FrameSlot>>,
}

impl Future for NextFrame {
    type Output = u64;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<u64> {
        let needs_registration = {
            let mut slot = self.slot.borrow_mut();
            if let Some(time) = slot.time {
                return Poll::Ready(time);
            }
            slot.waker = Some(cx.waker().clone());
            slot.registration.is_none()
        };

        if needs_registration {
            let weak = Rc::downgrade(&self.slot);
            let registration = self.clock.with_frame_nanos(move |time| {
                let Some(slot) = weak.upgrade() else {
                    return;
                };
                let waker = {
                    let mut slot = slot.borrow_mut();
                    slot.time = Some(time);
                    // Already fired; forget the id instead of cancelling it.
                    if let Some(mut registration) = slot.registration.take() {
                        registration.id = None;
                    }
                    slot.waker.take()
                };
                if let Some(waker) = waker {
                    waker.wake();
                }
            });
            if !registration.is_active() {
                log::trace!("next_frame polled after runtime shutdown");
            }
            self.slot.borrow_mut().registration = Some(registration);
        }

        Poll::Pending
    }
}

impl Drop for NextFrame {
    fn drop(&mut self) {
        let registration = self.slot.borrow_mut().registration.take();
        drop(registration);
    }
}
