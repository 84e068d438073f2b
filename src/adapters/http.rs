//! HTTP Adapter - axum Request-Timing Middleware
//!
//! Bridges axum's middleware model to the framework-agnostic
//! `RequestCycle` port. Install with `from_fn_with_state`:
//!
//! ```ignore
//! let timing = Arc::new(RequestTiming::new(reporter));
//! let app = Router::new()
//!     .route("/widgets/:id", get(show_widget))
//!     .layer(middleware::from_fn_with_state(timing, track_requests));
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{MatchedPath, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::ports::http::{HandlerError, RequestCycle};
use crate::usecases::middleware::RequestTiming;

/// axum middleware function timing every dispatched request.
pub async fn track_requests(
    State(timing): State<Arc<RequestTiming>>,
    req: Request,
    next: Next,
) -> Response {
    let mut cycle = AxumCycle::new(req, next);
    timing.handle(&mut cycle).await;
    cycle.finish()
}

/// `RequestCycle` over one axum request/`Next` pair.
pub struct AxumCycle {
    method: String,
    route: String,
    exchange: Option<(Request, Next)>,
    response: Option<Response>,
}

impl AxumCycle {
    /// Capture method and route before the request is consumed. The
    /// route comes from `MatchedPath` when the router provides one,
    /// falling back to the raw URI path.
    pub fn new(req: Request, next: Next) -> Self {
        let method = req.method().to_string();
        let route = req
            .extensions()
            .get::<MatchedPath>()
            .map_or_else(|| req.uri().path().to_owned(), |p| p.as_str().to_owned());

        Self { method, route, exchange: Some((req, next)), response: None }
    }

    /// Consume the cycle, yielding the downstream response. A missing
    /// response (the cycle was never dispatched) becomes a 500.
    pub fn finish(self) -> Response {
        self.response
            .unwrap_or_else(|| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }
}

#[async_trait]
impl RequestCycle for AxumCycle {
    fn method(&self) -> String {
        self.method.clone()
    }

    fn route(&self) -> String {
        self.route.clone()
    }

    fn status(&self) -> u16 {
        self.response.as_ref().map_or(0, |r| r.status().as_u16())
    }

    async fn dispatch(&mut self) -> Result<(), HandlerError> {
        // axum handlers are infallible; failures reach forward_error
        // only when an embedder drives the cycle manually.
        if let Some((req, next)) = self.exchange.take() {
            self.response = Some(next.run(req).await);
        }
        Ok(())
    }

    fn forward_error(&mut self, err: HandlerError) {
        error!(error = %err, "handler failure surfaced as 500");
        self.response = Some(StatusCode::INTERNAL_SERVER_ERROR.into_response());
    }
}
