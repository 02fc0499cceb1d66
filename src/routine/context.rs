//! The handle a routine uses to request actions.
//!
//! Every request is an awaitable that suspends the routine exactly once: the
//! first poll hands the action to whoever drives the routine, and a later poll
//! completes with the value that driver supplied. Nothing here knows whether the
//! value came from a log, a live effect or a human.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use super::action::{Action, ActionKind, Effect, InputKind, Prompt, Value};
use super::error::RoutineError;

/// Single-slot mailbox shared between a routine and its driver.
#[derive(Debug, Default)]
pub(crate) struct Channel {
    pub(crate) request: Option<Action>,
    pub(crate) reply: Option<Value>,
    /// Set when a request arrived while another one was still parked.
    pub(crate) overlapped: bool,
}

impl Channel {
    /// The action parked by the last poll, if exactly one was.
    pub(crate) fn take_request(&mut self) -> Result<Option<Action>, RoutineError> {
        if self.overlapped {
            return Err(RoutineError::OverlappingRequests);
        }
        Ok(self.request.take())
    }
}

/// Typed entry points for every action a routine may request.
#[derive(Clone)]
pub struct RoutineContext {
    channel: Rc<RefCell<Channel>>,
}

impl RoutineContext {
    pub(crate) fn new(channel: Rc<RefCell<Channel>>) -> Self {
        Self { channel }
    }

    /// Request an arbitrary action and wait for its raw value.
    pub fn perform(&self, action: Action) -> ActionRequest {
        ActionRequest {
            action: Some(action),
            channel: Rc::clone(&self.channel),
        }
    }

    pub async fn display(&self, text: impl Into<String>) -> Result<(), RoutineError> {
        let value = self
            .perform(Action::Effect(Effect::Display { text: text.into() }))
            .await;
        match value {
            Value::Unit => Ok(()),
            other => Err(unexpected(ActionKind::Display, "unit", &other)),
        }
    }

    /// Draw an integer in `low..=high`.
    pub async fn random_int(&self, low: i64, high: i64) -> Result<i64, RoutineError> {
        let value = self
            .perform(Action::Effect(Effect::RandomInt { low, high }))
            .await;
        match value {
            Value::Int(n) => Ok(n),
            other => Err(unexpected(ActionKind::Random, "int", &other)),
        }
    }

    pub async fn prompt_text(
        &self,
        label: impl Into<String>,
        field: impl Into<String>,
    ) -> Result<String, RoutineError> {
        match self.prompt(label.into(), field.into(), InputKind::Text).await {
            Value::Text(s) => Ok(s),
            other => Err(unexpected(ActionKind::Prompt, "text", &other)),
        }
    }

    pub async fn prompt_int(
        &self,
        label: impl Into<String>,
        field: impl Into<String>,
    ) -> Result<i64, RoutineError> {
        match self
            .prompt(label.into(), field.into(), InputKind::Integer)
            .await
        {
            Value::Int(n) => Ok(n),
            other => Err(unexpected(ActionKind::Prompt, "int", &other)),
        }
    }

    pub async fn prompt_yes_no(
        &self,
        label: impl Into<String>,
        field: impl Into<String>,
    ) -> Result<bool, RoutineError> {
        match self.prompt(label.into(), field.into(), InputKind::YesNo).await {
            Value::Bool(b) => Ok(b),
            other => Err(unexpected(ActionKind::Prompt, "bool", &other)),
        }
    }

    fn prompt(&self, label: String, field: String, kind: InputKind) -> ActionRequest {
        self.perform(Action::Prompt(Prompt { label, field, kind }))
    }
}

fn unexpected(action: ActionKind, expected: &'static str, found: &Value) -> RoutineError {
    RoutineError::UnexpectedValue {
        action,
        expected,
        found: found.type_name(),
    }
}

/// Awaitable for one action. Completes once the driver supplies a value.
pub struct ActionRequest {
    action: Option<Action>,
    channel: Rc<RefCell<Channel>>,
}

impl Future for ActionRequest {
    type Output = Value;

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Value> {
        let this = self.get_mut();
        let mut channel = this.channel.borrow_mut();

        if let Some(action) = this.action.take() {
            if channel.request.is_some() {
                channel.overlapped = true;
            } else {
                channel.request = Some(action);
            }
            return Poll::Pending;
        }

        match channel.reply.take() {
            Some(value) => Poll::Ready(value),
            None => Poll::Pending,
        }
    }
}
