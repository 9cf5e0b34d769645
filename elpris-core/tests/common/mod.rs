//! Scripted transport shared by the integration tests.

#![allow(dead_code)]

use elpris_core::data::{FeedError, Transport};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays canned responses in order and records every requested URL.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<String, FeedError>>>,
    pub requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<String, FeedError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for ScriptedTransport {
    fn get_text(&self, url: &str) -> Result<String, FeedError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FeedError::Network("script exhausted".into())))
    }
}

pub fn network_down() -> Result<String, FeedError> {
    Err(FeedError::Network("connection refused".into()))
}
