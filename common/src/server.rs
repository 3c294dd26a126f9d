use axum::{
	extract::{ rejection::{ JsonRejection, PathRejection }, Path, State },
	routing::{ get, post },
	Json,
	Router,
};
use serde::{ Deserialize, Serialize };
use serde_json::{ json, Value };
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use anyhow::Result;
use tracing::{ info, warn };

use crate::{
	config::Config,
	error::{ ApiError, ApiResult },
	industry::industry_defaults,
	models::{ CalculatorInput, IndustryDefault, NewCalculatorInput, Report, ResultRecord },
	service::{ load_report, submit },
	store::CalculatorStore,
};

// Shared state for the API
pub struct AppState<T: CalculatorStore + Send + Sync + 'static> {
	pub store: Arc<T>,
	pub config: Config,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
	pub id: i64,
	pub results: ResultRecord,
}

pub fn router<T: CalculatorStore + Send + Sync + 'static>(store: T, config: Config) -> Router {
	let state = Arc::new(AppState {
		store: Arc::new(store),
		config,
	});

	Router::new()
		.route("/", get(root_handler))
		.route("/health", get(health_handler::<T>))
		.route("/api/industries", get(industries_handler))
		.route("/api/calculator", post(submit_handler::<T>))
		.route("/api/calculator/:id", get(calculator_handler::<T>))
		.route("/api/results/:id", get(results_handler::<T>))
		.route("/api/report/:id", get(report_handler::<T>))
		.with_state(state)
}

// Run the API server with the provided store implementation
pub async fn run_server<T: CalculatorStore + Send + Sync + 'static>(
	store: T,
	config: Config
) -> Result<()> {
	// Initialize tracing
	tracing_subscriber::fmt::init();

	info!("Initializing {} store", store.store_name());
	store.init().await?;

	let port = config.port;
	let app = router(store, config);

	// Run the server
	let addr = SocketAddr::from(([0, 0, 0, 0], port));
	info!("Server listening on {}", addr);

	let listener = TcpListener::bind(addr).await?;
	axum::serve(listener, app).await?;

	Ok(())
}

fn parse_id(id: Result<Path<i64>, PathRejection>) -> ApiResult<i64> {
	id.map(|Path(id)| id).map_err(|rejection| {
		warn!("Rejected id: {}", rejection.body_text());
		ApiError::InvalidId
	})
}

async fn root_handler() -> &'static str {
	"AI ROI Calculator API. POST /api/calculator to submit, GET /api/results/:id to view results."
}

async fn health_handler<T: CalculatorStore + Send + Sync + 'static>(State(
	state,
): State<Arc<AppState<T>>>) -> Json<Value> {
	Json(json!({ "status": "ok", "store": state.store.store_name() }))
}

async fn industries_handler() -> Json<Vec<IndustryDefault>> {
	Json(industry_defaults())
}

async fn submit_handler<T: CalculatorStore + Send + Sync + 'static>(
	State(state): State<Arc<AppState<T>>>,
	payload: Result<Json<NewCalculatorInput>, JsonRejection>
) -> ApiResult<Json<SubmitResponse>> {
	let Json(input) = payload.map_err(|rejection| {
		warn!("Rejected calculator payload: {}", rejection.body_text());
		ApiError::InvalidPayload(rejection.body_text())
	})?;

	info!("Received calculator submission for {}", input.company_name);
	let submission = submit(state.store.as_ref(), &state.config, input).await?;

	Ok(
		Json(SubmitResponse {
			id: submission.calculator.id,
			results: submission.results,
		})
	)
}

async fn calculator_handler<T: CalculatorStore + Send + Sync + 'static>(
	State(state): State<Arc<AppState<T>>>,
	id: Result<Path<i64>, PathRejection>
) -> ApiResult<Json<CalculatorInput>> {
	let id = parse_id(id)?;

	state.store
		.get_calculator_by_id(id).await?
		.map(Json)
		.ok_or(ApiError::NotFound("Calculator not found"))
}

// Keyed by calculator id
async fn results_handler<T: CalculatorStore + Send + Sync + 'static>(
	State(state): State<Arc<AppState<T>>>,
	id: Result<Path<i64>, PathRejection>
) -> ApiResult<Json<ResultRecord>> {
	let id = parse_id(id)?;

	state.store
		.get_results_by_id(id).await?
		.map(Json)
		.ok_or(ApiError::NotFound("Results not found"))
}

async fn report_handler<T: CalculatorStore + Send + Sync + 'static>(
	State(state): State<Arc<AppState<T>>>,
	id: Result<Path<i64>, PathRejection>
) -> ApiResult<Json<Report>> {
	let id = parse_id(id)?;

	load_report(state.store.as_ref(), id).await?
		.map(Json)
		.ok_or(ApiError::NotFound("Data not found"))
}
