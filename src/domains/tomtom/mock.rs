//! Recording [`TomTomApi`] for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::client::{Binary, TomTomApi, TransportFailure};
use super::params::ParamMap;

/// One recorded outbound request.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub params: ParamMap,
}

/// Scripted response for the next call.
#[derive(Debug, Clone)]
pub enum Scripted {
    Json(Value),
    Binary(Binary),
    Fail(TransportFailure),
}

/// Answers calls from a queue; the last scripted response repeats.
#[derive(Debug, Default)]
pub struct MockApi {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockApi {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_json(body: Value) -> Self {
        Self::new(vec![Scripted::Json(body)])
    }

    pub fn failing(failure: TransportFailure) -> Self {
        Self::new(vec![Scripted::Fail(failure)])
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().unwrap().last().cloned()
    }

    fn next(&self, path: &str, params: &ParamMap) -> Scripted {
        self.calls.lock().unwrap().push(RecordedCall {
            path: path.to_string(),
            params: params.clone(),
        });
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script
                .front()
                .cloned()
                .unwrap_or_else(|| Scripted::Fail(TransportFailure::Other("no script".into())))
        }
    }
}

#[async_trait]
impl TomTomApi for MockApi {
    async fn get_json(&self, path: &str, params: &ParamMap) -> Result<Value, TransportFailure> {
        match self.next(path, params) {
            Scripted::Json(body) => Ok(body),
            Scripted::Binary(_) => Err(TransportFailure::Other("binary scripted".into())),
            Scripted::Fail(failure) => Err(failure),
        }
    }

    async fn get_binary(&self, path: &str, params: &ParamMap) -> Result<Binary, TransportFailure> {
        match self.next(path, params) {
            Scripted::Binary(binary) => Ok(binary),
            Scripted::Json(_) => Err(TransportFailure::Other("json scripted".into())),
            Scripted::Fail(failure) => Err(failure),
        }
    }
}
