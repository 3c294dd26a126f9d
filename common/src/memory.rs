use std::collections::{ BTreeMap, HashMap };

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::models::{ CalculatorInput, NewCalculatorInput, NewResultRecord, ResultRecord };
use crate::store::{ CalculatorStore, StoreError, StoreResult };
use crate::validation::validate_calculator_input;

struct MemoryState {
	calculators: HashMap<i64, CalculatorInput>,
	// Ordered by id so the earliest result for a calculator is found first
	results: BTreeMap<i64, ResultRecord>,
	next_calculator_id: i64,
	next_result_id: i64,
}

/// Process-local store. Everything is lost on restart.
pub struct MemoryStore {
	state: Mutex<MemoryState>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self {
			state: Mutex::new(MemoryState {
				calculators: HashMap::new(),
				results: BTreeMap::new(),
				next_calculator_id: 1,
				next_result_id: 1,
			}),
		}
	}
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl CalculatorStore for MemoryStore {
	fn store_name(&self) -> String {
		"Memory".to_string()
	}

	async fn init(&self) -> StoreResult<()> {
		Ok(())
	}

	async fn save_calculator_inputs(
		&self,
		input: NewCalculatorInput
	) -> StoreResult<CalculatorInput> {
		validate_calculator_input(&input)?;

		let mut state = self.state.lock().await;
		let id = state.next_calculator_id;
		state.next_calculator_id += 1;

		let calculator = CalculatorInput { id, data: input };
		state.calculators.insert(id, calculator.clone());

		Ok(calculator)
	}

	async fn save_results(&self, result: NewResultRecord) -> StoreResult<ResultRecord> {
		let mut state = self.state.lock().await;
		if !state.calculators.contains_key(&result.calculator_id) {
			return Err(StoreError::UnknownCalculator(result.calculator_id));
		}

		let id = state.next_result_id;
		state.next_result_id += 1;

		let record = ResultRecord { id, data: result };
		state.results.insert(id, record.clone());

		Ok(record)
	}

	async fn get_calculator_by_id(&self, id: i64) -> StoreResult<Option<CalculatorInput>> {
		let state = self.state.lock().await;
		Ok(state.calculators.get(&id).cloned())
	}

	async fn get_results_by_id(&self, calculator_id: i64) -> StoreResult<Option<ResultRecord>> {
		let state = self.state.lock().await;
		Ok(
			state.results
				.values()
				.find(|record| record.data.calculator_id == calculator_id)
				.cloned()
		)
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;
	use crate::test_support::sample_input;

	fn result_for(calculator_id: i64, total: f64) -> NewResultRecord {
		NewResultRecord {
			calculator_id,
			email_revenue: total,
			social_savings: 0.0,
			chatbot_savings: 0.0,
			product_savings: 0.0,
			total_benefits: total,
			roi: 0.0,
			payback_months: 12.0,
		}
	}

	#[tokio::test]
	async fn calculator_round_trip() {
		let store = MemoryStore::new();
		let input = sample_input();

		let saved = store.save_calculator_inputs(input.clone()).await.unwrap();
		assert_eq!(saved.id, 1);
		assert_eq!(saved.data, input);

		let fetched = store.get_calculator_by_id(saved.id).await.unwrap();
		assert_eq!(fetched, Some(saved));
	}

	#[tokio::test]
	async fn ids_increase_per_entity() {
		let store = MemoryStore::new();

		let first = store.save_calculator_inputs(sample_input()).await.unwrap();
		let second = store.save_calculator_inputs(sample_input()).await.unwrap();
		assert_eq!((first.id, second.id), (1, 2));

		let result = store.save_results(result_for(second.id, 10.0)).await.unwrap();
		assert_eq!(result.id, 1);
	}

	#[tokio::test]
	async fn unknown_ids_are_not_found() {
		let store = MemoryStore::new();

		assert_eq!(store.get_calculator_by_id(42).await.unwrap(), None);
		assert_eq!(store.get_results_by_id(42).await.unwrap(), None);
	}

	#[tokio::test]
	async fn results_are_looked_up_by_calculator_id() {
		let store = MemoryStore::new();
		let first = store.save_calculator_inputs(sample_input()).await.unwrap();
		let second = store.save_calculator_inputs(sample_input()).await.unwrap();

		// Result id 1 belongs to calculator 2
		store.save_results(result_for(second.id, 200.0)).await.unwrap();
		assert_eq!(store.get_results_by_id(first.id).await.unwrap(), None);

		let found = store.get_results_by_id(second.id).await.unwrap().unwrap();
		assert_eq!(found.id, 1);
		assert_eq!(found.data.total_benefits, 200.0);
	}

	#[tokio::test]
	async fn earliest_result_wins() {
		let store = MemoryStore::new();
		let calculator = store.save_calculator_inputs(sample_input()).await.unwrap();

		store.save_results(result_for(calculator.id, 1.0)).await.unwrap();
		store.save_results(result_for(calculator.id, 2.0)).await.unwrap();

		let found = store.get_results_by_id(calculator.id).await.unwrap().unwrap();
		assert_eq!(found.data.total_benefits, 1.0);
	}

	#[tokio::test]
	async fn result_requires_existing_calculator() {
		let store = MemoryStore::new();

		let err = store.save_results(result_for(9, 1.0)).await.unwrap_err();
		assert!(matches!(err, StoreError::UnknownCalculator(9)));
	}

	#[tokio::test]
	async fn invalid_input_is_rejected() {
		let store = MemoryStore::new();
		let mut input = sample_input();
		input.email = "not-an-email".to_string();

		let err = store.save_calculator_inputs(input).await.unwrap_err();
		assert!(matches!(err, StoreError::Validation(_)));

		// Rejected saves do not consume an id
		let saved = store.save_calculator_inputs(sample_input()).await.unwrap();
		assert_eq!(saved.id, 1);
	}

	#[tokio::test]
	async fn concurrent_saves_get_distinct_ids() {
		let store = Arc::new(MemoryStore::new());

		let handles: Vec<_> = (0..20)
			.map(|_| {
				let store = Arc::clone(&store);
				tokio::spawn(async move {
					store.save_calculator_inputs(sample_input()).await.unwrap().id
				})
			})
			.collect();

		let mut ids = Vec::new();
		for handle in handles {
			ids.push(handle.await.unwrap());
		}
		ids.sort_unstable();

		assert_eq!(ids, (1..=20).collect::<Vec<i64>>());
	}
}
