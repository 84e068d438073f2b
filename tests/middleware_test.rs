//! Middleware Tests - Request Timing and Outcome Classification
//!
//! Mocks the `RequestCycle` port with mockall to pin down the state
//! machine (dispatch → classify → complete), then runs the axum
//! adapter end to end against a real router.

use std::sync::{Arc, Mutex};

use mockall::mock;

use metrics_relay::adapters::http::track_requests;
use metrics_relay::ports::backend::MetricBackend;
use metrics_relay::ports::http::{HandlerError, RequestCycle};
use metrics_relay::usecases::middleware::{REQUEST_METRIC, RequestTiming};
use metrics_relay::usecases::reporter::Reporter;

// ---- Test Doubles ----

#[derive(Debug, Clone)]
struct Sample {
    name: String,
    tags: Vec<String>,
}

/// Backend double recording histogram samples only.
#[derive(Clone, Default)]
struct RecordingBackend {
    samples: Arc<Mutex<Vec<Sample>>>,
}

impl RecordingBackend {
    fn samples(&self) -> Vec<Sample> {
        self.samples.lock().unwrap().clone()
    }
}

impl MetricBackend for RecordingBackend {
    fn count(&self, _: &str, _: i64, _: &[String], _: f64) -> anyhow::Result<()> {
        Ok(())
    }

    fn gauge(&self, _: &str, _: f64, _: &[String], _: f64) -> anyhow::Result<()> {
        Ok(())
    }

    fn histogram(&self, name: &str, _: f64, tags: &[String], _: f64) -> anyhow::Result<()> {
        self.samples.lock().unwrap().push(Sample {
            name: name.to_string(),
            tags: tags.to_vec(),
        });
        Ok(())
    }

    fn close(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

mock! {
    pub Cycle {}

    #[async_trait::async_trait]
    impl RequestCycle for Cycle {
        fn method(&self) -> String;
        fn route(&self) -> String;
        fn status(&self) -> u16;
        async fn dispatch(&mut self) -> Result<(), HandlerError>;
        fn forward_error(&mut self, err: HandlerError);
    }
}

fn timing_with(backend: &RecordingBackend) -> RequestTiming {
    RequestTiming::new(Arc::new(Reporter::with_backend(Box::new(backend.clone()))))
}

// ---- Cycle-level State Machine ----

#[tokio::test]
async fn success_emits_one_sample_with_method_status_and_path() {
    let backend = RecordingBackend::default();
    let timing = timing_with(&backend);

    let mut cycle = MockCycle::new();
    cycle.expect_method().return_const("GET".to_string());
    cycle.expect_route().return_const("/widgets/:id".to_string());
    cycle.expect_status().return_const(200u16);
    cycle.expect_dispatch().times(1).returning(|| Ok(()));
    cycle.expect_forward_error().never();

    timing.handle(&mut cycle).await;

    let samples = backend.samples();
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].name, REQUEST_METRIC);
    assert_eq!(
        samples[0].tags,
        vec![
            "method:GET".to_string(),
            "status_code:200".to_string(),
            "path:/widgets/:id".to_string(),
        ]
    );
}

#[tokio::test]
async fn failure_is_forwarded_and_still_timed() {
    let backend = RecordingBackend::default();
    let timing = timing_with(&backend);

    let mut cycle = MockCycle::new();
    cycle.expect_method().return_const("POST".to_string());
    cycle.expect_route().return_const("/widgets".to_string());
    // Status as mutated by the framework's error handler.
    cycle.expect_status().return_const(500u16);
    cycle
        .expect_dispatch()
        .times(1)
        .returning(|| Err("database exploded".into()));
    cycle
        .expect_forward_error()
        .times(1)
        .withf(|err| err.to_string() == "database exploded")
        .returning(|_| ());

    timing.handle(&mut cycle).await;

    let samples = backend.samples();
    assert_eq!(samples.len(), 1);
    assert_eq!(
        samples[0].tags,
        vec![
            "method:POST".to_string(),
            "status_code:500".to_string(),
            "path:/widgets".to_string(),
        ]
    );
}

#[tokio::test]
async fn ignorable_failure_is_swallowed_but_timed() {
    let backend = RecordingBackend::default();
    let reporter = Arc::new(Reporter::with_backend(Box::new(backend.clone())));
    let timing = RequestTiming::with_classifier(reporter, |err| {
        err.to_string().contains("broken pipe")
    });

    let mut cycle = MockCycle::new();
    cycle.expect_method().return_const("GET".to_string());
    cycle.expect_route().return_const("/stream".to_string());
    cycle.expect_status().return_const(200u16);
    cycle
        .expect_dispatch()
        .times(1)
        .returning(|| Err("broken pipe while writing response".into()));
    // Swallowed: the framework error path must not be fed.
    cycle.expect_forward_error().never();

    timing.handle(&mut cycle).await;

    assert_eq!(backend.samples().len(), 1);
}

#[tokio::test]
async fn classifier_rejects_unrelated_failures() {
    let backend = RecordingBackend::default();
    let reporter = Arc::new(Reporter::with_backend(Box::new(backend.clone())));
    let timing = RequestTiming::with_classifier(reporter, |err| {
        err.to_string().contains("broken pipe")
    });

    let mut cycle = MockCycle::new();
    cycle.expect_method().return_const("GET".to_string());
    cycle.expect_route().return_const("/widgets".to_string());
    cycle.expect_status().return_const(500u16);
    cycle
        .expect_dispatch()
        .times(1)
        .returning(|| Err("database exploded".into()));
    cycle.expect_forward_error().times(1).returning(|_| ());

    timing.handle(&mut cycle).await;

    assert_eq!(backend.samples().len(), 1);
}

// ---- axum Adapter ----

mod axum_adapter {
    use super::*;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    fn app(timing: Arc<RequestTiming>) -> Router {
        Router::new()
            .route("/widgets/:id", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn_with_state(timing, track_requests))
    }

    #[tokio::test]
    async fn routed_request_is_tagged_with_route_template() {
        let backend = RecordingBackend::default();
        let timing = Arc::new(timing_with(&backend));

        let response = app(timing)
            .oneshot(Request::builder().uri("/widgets/7").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let samples = backend.samples();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].name, REQUEST_METRIC);
        assert_eq!(
            samples[0].tags,
            vec![
                "method:GET".to_string(),
                "status_code:200".to_string(),
                "path:/widgets/:id".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn unrouted_request_is_still_timed() {
        let backend = RecordingBackend::default();
        let timing = Arc::new(timing_with(&backend));

        let response = app(timing)
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let samples = backend.samples();
        assert_eq!(samples.len(), 1);
        assert!(samples[0].tags.contains(&"status_code:404".to_string()));
    }
}
