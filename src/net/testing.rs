//! Scripted transport for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde_json::Value;

use super::transport::{RawResponse, Transport, TransportError};

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    pub url: String,
    pub bearer: Option<String>,
    pub body: Value,
}

/// Replays queued responses in order and records every call it receives.
#[derive(Clone, Default)]
pub struct FakeTransport {
    responses: Rc<RefCell<VecDeque<Result<RawResponse, TransportError>>>>,
    calls: Rc<RefCell<Vec<RecordedCall>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses.borrow_mut().push_back(Ok(RawResponse::new(status, body)));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Err(TransportError::Request(message.to_owned())));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }
}

impl Transport for FakeTransport {
    async fn post_json(&self, url: &str, bearer: Option<&str>, body: &Value) -> Result<RawResponse, TransportError> {
        self.calls.borrow_mut().push(RecordedCall {
            url: url.to_owned(),
            bearer: bearer.map(str::to_owned),
            body: body.clone(),
        });
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no scripted response".to_owned())))
    }
}
