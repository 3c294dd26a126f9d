use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ CalculatorInput, NewCalculatorInput, NewResultRecord, ResultRecord };
use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum StoreError {
	/// Submission rejected before anything was written
	#[error("invalid calculator input: {0}")]
	Validation(#[from] ValidationErrors),

	/// A result referenced a calculator id that was never saved
	#[error("calculator not found: {0}")]
	UnknownCalculator(i64),

	/// Failure inside the underlying storage engine
	#[error("store backend error: {0}")]
	Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Keyed persistence for calculator inputs and their results.
///
/// Ids are assigned on save, start at 1, increase per entity and are never
/// reused. Lookups of unknown ids return `Ok(None)`.
#[async_trait]
pub trait CalculatorStore {
	/// Store name, used in logs and the health endpoint
	fn store_name(&self) -> String;

	/// Prepare schema or other backing structures
	async fn init(&self) -> StoreResult<()>;

	/// Validate and store a submission under a fresh id
	async fn save_calculator_inputs(
		&self,
		input: NewCalculatorInput
	) -> StoreResult<CalculatorInput>;

	/// Store a result under a fresh id. The referenced calculator must exist.
	async fn save_results(&self, result: NewResultRecord) -> StoreResult<ResultRecord>;

	async fn get_calculator_by_id(&self, id: i64) -> StoreResult<Option<CalculatorInput>>;

	/// Find the result computed for `calculator_id`.
	///
	/// This is keyed by the calculator id, not by the result's own id. If
	/// several results reference the calculator, the earliest one wins.
	async fn get_results_by_id(&self, calculator_id: i64) -> StoreResult<Option<ResultRecord>>;
}
