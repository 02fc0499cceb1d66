//! Hand-driven execution of a routine.
//!
//! A routine is ordinary straight-line `async` code. [`Execution`] polls it with
//! a no-op waker; each time it returns `Pending` the routine has parked on an
//! [`ActionRequest`](super::context::ActionRequest) and the requested action is
//! sitting in the shared channel. The driver decides where the value comes from
//! and hands it back with [`Execution::supply`].

use std::cell::RefCell;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::future::LocalBoxFuture;
use futures::task::noop_waker_ref;

use super::action::{Action, Value};
use super::context::{Channel, RoutineContext};
use super::error::RoutineError;

/// A suspending computation.
///
/// Implementations must be deterministic given the values supplied to them:
/// the same sequence of values must produce the same sequence of actions.
/// Entropy, clocks and anything else that varies between runs belong behind an
/// action, never inside the routine.
pub trait Routine: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Build a fresh run of the routine.
    fn run(&self, ctx: RoutineContext) -> LocalBoxFuture<'static, Result<(), RoutineError>>;
}

/// One in-progress run of a routine.
pub struct Execution {
    future: LocalBoxFuture<'static, Result<(), RoutineError>>,
    channel: Rc<RefCell<Channel>>,
    awaiting: bool,
    finished: bool,
    steps: usize,
}

impl Execution {
    pub fn start(routine: &dyn Routine) -> Self {
        let channel = Rc::new(RefCell::new(Channel::default()));
        let future = routine.run(RoutineContext::new(Rc::clone(&channel)));
        Self {
            future,
            channel,
            awaiting: false,
            finished: false,
            steps: 0,
        }
    }

    /// Run the routine up to its next action.
    ///
    /// Returns `Ok(None)` once the routine has finished; calling again after
    /// that keeps returning `Ok(None)`.
    pub fn next_action(&mut self) -> Result<Option<Action>, RoutineError> {
        if self.finished {
            return Ok(None);
        }
        if self.awaiting {
            return Err(RoutineError::AwaitingValue);
        }

        let mut cx = Context::from_waker(noop_waker_ref());
        match self.future.as_mut().poll(&mut cx) {
            Poll::Ready(result) => {
                self.finished = true;
                result.map(|()| None)
            }
            Poll::Pending => match self.channel.borrow_mut().take_request()? {
                Some(action) => {
                    self.awaiting = true;
                    Ok(Some(action))
                }
                None => Err(RoutineError::Stalled),
            },
        }
    }

    /// Answer the action most recently returned by [`next_action`](Self::next_action).
    pub fn supply(&mut self, value: Value) -> Result<(), RoutineError> {
        if !self.awaiting {
            return Err(RoutineError::NothingPending);
        }
        self.channel.borrow_mut().reply = Some(value);
        self.awaiting = false;
        self.steps += 1;
        Ok(())
    }

    /// Number of actions answered so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
