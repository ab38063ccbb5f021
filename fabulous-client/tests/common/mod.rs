//! Shared test helpers.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fabulous_client::{
    ClientConfig, FabulousClient, ParamValue, Params, RawResponse, RegistrarError, Result,
    Transport,
};

/// Skip a live test when an environment variable is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping: {} is not set", $var);
                return;
            }
        )+
    };
}

/// One request seen by [`ScriptedTransport`].
#[derive(Debug, Clone)]
pub struct Call {
    pub action: String,
    pub params: Params,
}

impl Call {
    pub fn param(&self, key: &str) -> Option<String> {
        self.params.get(key).map(ParamValue::to_string)
    }
}

/// In-memory transport that replays queued replies in order and records
/// every call. Running out of replies is a transport failure.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<RawResponse>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(self: &Arc<Self>, body: impl Into<String>) -> Arc<Self> {
        self.push(Ok(RawResponse {
            status: 200,
            body: body.into(),
        }))
    }

    pub fn fail(self: &Arc<Self>, error: RegistrarError) -> Arc<Self> {
        self.push(Err(error))
    }

    fn push(self: &Arc<Self>, reply: Result<RawResponse>) -> Arc<Self> {
        self.replies
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push_back(reply);
        Arc::clone(self)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn call(&self, action: &str, params: &Params) -> Result<RawResponse> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(Call {
                action: action.to_string(),
                params: params.clone(),
            });
        self.replies
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(RegistrarError::Request {
                    code: None,
                    message: format!("no scripted reply for {action}"),
                })
            })
    }
}

/// Client wired to `transport` with dummy credentials.
pub fn client_with(transport: Arc<ScriptedTransport>) -> FabulousClient {
    FabulousClient::builder(ClientConfig::new("test_user", "test_pass"))
        .transport(transport)
        .build()
        .unwrap()
}

/// A full reply document around `body`.
pub fn xml_response(code: i64, text: &str, body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<response>\n  <statusCode>{code}</statusCode>\n  <statusText>{text}</statusText>\n  {body}\n</response>"
    )
}

/// Success reply with no payload.
pub fn ok_response() -> String {
    xml_response(200, "Success", "")
}
