//! Shared fixtures for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Mock executor that replays a queue of canned results and records
/// every request it receives.
#[derive(Debug, Default)]
pub struct MockClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Replies once with the given status and body.
    pub fn replying(status: u16, body: &str) -> Self {
        Self::new(vec![Ok(response(status, body))])
    }

    /// Replies once with 200 and a JSON body.
    pub fn json(body: &serde_json::Value) -> Self {
        Self::replying(200, &body.to_string())
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.captured_requests()
            .pop()
            .expect("no request was sent")
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock ran out of responses")
    }
}

pub fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse::new(
        http::StatusCode::from_u16(status).unwrap(),
        http::HeaderMap::new(),
        body.as_bytes().to_vec(),
    )
}
