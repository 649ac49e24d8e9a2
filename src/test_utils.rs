#[cfg(test)]
pub mod test_utils {
    use axum::{
        Json, Router,
        extract::{Query, RawQuery, State},
        http::{HeaderMap, StatusCode},
        response::{IntoResponse, Response},
        routing::{get, post},
    };
    use common::{HistoricalDataPoint, PredictionResponse};
    use std::collections::HashMap;
    use std::net::TcpListener;
    use std::sync::{Arc, Mutex};
    use std::thread::JoinHandle;
    use std::time::Duration;
    use tokio::sync::oneshot;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// What the mock answers to `POST /simulate`.
    #[derive(Debug, Clone)]
    pub enum SimulateReply {
        Success(PredictionResponse),
        Failure { status: StatusCode, body: String },
    }

    /// Scripted behaviour and recorded traffic of the mock service.
    #[derive(Debug, Clone)]
    pub struct MockState {
        /// `None` answers 500
        pub countries: Option<Vec<String>>,
        /// Countries missing from the map answer 404
        pub history: HashMap<String, Vec<HistoricalDataPoint>>,
        pub simulate: SimulateReply,
        /// Delay before answering `/simulate`
        pub simulate_delay: Option<Duration>,

        pub history_queries: Vec<String>,
        pub simulate_bodies: Vec<serde_json::Value>,
        pub authorization_headers: Vec<Option<String>>,
    }

    impl Default for MockState {
        fn default() -> Self {
            Self {
                countries: Some(vec!["India".to_string(), "United States".to_string()]),
                history: HashMap::from([
                    ("India".to_string(), sample_history("India", 2010, 12)),
                    ("United States".to_string(), sample_history("United States", 2015, 6)),
                ]),
                simulate: SimulateReply::Success(sample_prediction(3.456)),
                simulate_delay: None,
                history_queries: Vec::new(),
                simulate_bodies: Vec::new(),
                authorization_headers: Vec::new(),
            }
        }
    }

    type SharedState = Arc<Mutex<MockState>>;

    /// In-process mock of the prediction service, served from its own
    /// thread and tokio runtime. Shut down on drop.
    pub struct MockService {
        pub base_url: String,
        state: SharedState,
        shutdown: Option<oneshot::Sender<()>>,
        handle: Option<JoinHandle<()>>,
    }

    impl MockService {
        pub fn start(state: MockState) -> Self {
            let state = Arc::new(Mutex::new(state));
            let app = router(state.clone());

            // Bound before the server thread starts so early requests queue
            let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind mock service");
            listener
                .set_nonblocking(true)
                .expect("Failed to set mock listener non-blocking");
            let address = listener.local_addr().expect("Mock service has no address");

            let (shutdown, shutdown_rx) = oneshot::channel::<()>();
            let handle = std::thread::spawn(move || {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .expect("Failed to build mock runtime");
                runtime.block_on(async move {
                    let listener = tokio::net::TcpListener::from_std(listener)
                        .expect("Failed to adopt mock listener");
                    axum::serve(listener, app)
                        .with_graceful_shutdown(async {
                            let _ = shutdown_rx.await;
                        })
                        .await
                        .expect("Mock service failed");
                });
            });

            Self {
                base_url: format!("http://{}", address),
                state,
                shutdown: Some(shutdown),
                handle: Some(handle),
            }
        }

        /// Snapshot of the scripted state and recorded traffic.
        pub fn state(&self) -> MockState {
            self.state.lock().expect("Mock state poisoned").clone()
        }
    }

    impl Drop for MockService {
        fn drop(&mut self) {
            if let Some(shutdown) = self.shutdown.take() {
                let _ = shutdown.send(());
            }
            if let Some(handle) = self.handle.take() {
                let _ = handle.join();
            }
        }
    }

    fn router(state: SharedState) -> Router {
        Router::new()
            .route("/api/countries", get(countries))
            .route("/api/history", get(history))
            .route("/simulate", post(simulate))
            .with_state(state)
    }

    async fn countries(State(state): State<SharedState>) -> Response {
        let countries = state.lock().expect("Mock state poisoned").countries.clone();
        match countries {
            Some(countries) => Json(countries).into_response(),
            None => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        }
    }

    async fn history(
        State(state): State<SharedState>,
        RawQuery(raw): RawQuery,
        Query(params): Query<HashMap<String, String>>,
    ) -> Response {
        let mut state = state.lock().expect("Mock state poisoned");
        state.history_queries.push(raw.unwrap_or_default());

        let country = params.get("country").cloned().unwrap_or_default();
        match state.history.get(&country) {
            Some(points) => Json(points.clone()).into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        }
    }

    async fn simulate(
        State(state): State<SharedState>,
        headers: HeaderMap,
        Json(body): Json<serde_json::Value>,
    ) -> Response {
        let (reply, delay) = {
            let mut state = state.lock().expect("Mock state poisoned");
            state.simulate_bodies.push(body);
            state.authorization_headers.push(
                headers
                    .get("authorization")
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string),
            );
            (state.simulate.clone(), state.simulate_delay)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match reply {
            SimulateReply::Success(prediction) => Json(prediction).into_response(),
            SimulateReply::Failure { status, body } => (status, body).into_response(),
        }
    }

    /// `count` consecutive years of growth starting at `first_year`.
    pub fn sample_history(country: &str, first_year: i32, count: i32) -> Vec<HistoricalDataPoint> {
        (0..count)
            .map(|i| HistoricalDataPoint {
                country: country.to_string(),
                year: first_year + i,
                gdp_growth: 2.0 + f64::from(i) * 0.123,
                exports_growth: 4.0,
                imports_growth: 3.5,
            })
            .collect()
    }

    pub fn sample_prediction(predicted: f64) -> PredictionResponse {
        PredictionResponse {
            predicted_gdp_growth: predicted,
            model_type: "Ridge Regression".to_string(),
            interpretation: "Moderate growth expected".to_string(),
            note: "Scenario analysis only".to_string(),
        }
    }

    /// A base URL nothing listens on.
    pub fn unreachable_base_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind probe listener");
        let address = listener.local_addr().expect("Probe listener has no address");
        drop(listener);
        format!("http://{}", address)
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is read from RUST_LOG, defaulting to WARN.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }
}
