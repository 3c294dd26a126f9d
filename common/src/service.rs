use serde::{ Deserialize, Serialize };
use tracing::{ info, warn };

use crate::calculations::BenefitBreakdown;
use crate::config::Config;
use crate::industry::get_improvement_percentage;
use crate::models::{ CalculatorInput, Improvements, NewCalculatorInput, NewResultRecord, Report, ResultRecord };
use crate::store::{ CalculatorStore, StoreResult };
use crate::validation::{ validate_breakdown, validate_calculator_input };

/// Outcome of a single submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
	pub calculator: CalculatorInput,
	pub results: ResultRecord,
}

/// Improvement percentages used for computing, as opposed to the ones stored.
pub fn effective_improvements(input: &NewCalculatorInput, config: &Config) -> Improvements {
	if config.industry_defaults {
		Improvements::uniform(get_improvement_percentage(&input.industry))
	} else {
		input.improvements()
	}
}

/// Validate, compute, then persist the input followed by its result.
///
/// The input is stored exactly as submitted even when the industry defaults
/// replaced its improvement percentages for the computation.
pub async fn submit<T>(store: &T, config: &Config, input: NewCalculatorInput) -> StoreResult<Submission>
	where T: CalculatorStore + Send + Sync + ?Sized
{
	if let Err(errors) = validate_calculator_input(&input) {
		warn!("Rejected calculator input: {}", errors);
		return Err(errors.into());
	}

	let improvements = effective_improvements(&input, config);
	let breakdown = BenefitBreakdown::compute(&input, improvements, config.investment_cost);
	if let Err(errors) = validate_breakdown(&breakdown) {
		warn!("Rejected calculator input for {}: {}", input.company_name, errors);
		return Err(errors.into());
	}

	let calculator = store.save_calculator_inputs(input).await?;
	info!(
		"Saved calculator {} for {} ({})",
		calculator.id,
		calculator.data.company_name,
		calculator.data.industry
	);

	let results = store.save_results(NewResultRecord::from_breakdown(calculator.id, &breakdown)).await?;
	info!(
		"Saved results {} for calculator {}: total {:.2}, roi {:.2}%, payback {:.2} months",
		results.id,
		calculator.id,
		results.data.total_benefits,
		results.data.roi,
		results.data.payback_months
	);

	Ok(Submission { calculator, results })
}

/// Both records for `calculator_id`, once both exist.
pub async fn load_report<T>(store: &T, calculator_id: i64) -> StoreResult<Option<Report>>
	where T: CalculatorStore + Send + Sync + ?Sized
{
	let Some(calculator) = store.get_calculator_by_id(calculator_id).await? else {
		return Ok(None);
	};
	let Some(results) = store.get_results_by_id(calculator_id).await? else {
		return Ok(None);
	};

	Ok(Some(Report::new(calculator, results)))
}
