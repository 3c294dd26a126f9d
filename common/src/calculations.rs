//! Benefit, ROI and payback formulas.
//!
//! Every function here is total: where an argument is zero or NaN the result
//! is a fixed sentinel instead of a computed value. A legitimately zero input
//! (say, a cost per ticket of 0) therefore yields a zero benefit.

use crate::models::{ Improvements, NewCalculatorInput };

/// Assumed average hourly labour rate for content and product work.
pub const HOURLY_RATE: f64 = 50.0;

/// Investment cost ROI and payback are measured against unless configured.
pub const DEFAULT_INVESTMENT_COST: f64 = 50_000.0;

/// ROI reported when there is no benefit at all.
pub const ROI_TOTAL_LOSS: f64 = -100.0;

/// Payback period meaning "never pays back".
pub const PAYBACK_NEVER: f64 = 999.0;

const MONTHS_PER_YEAR: f64 = 12.0;

fn is_falsy(value: f64) -> bool {
	value == 0.0 || value.is_nan()
}

fn any_falsy(values: &[f64]) -> bool {
	values.iter().copied().any(is_falsy)
}

/// Extra annual revenue from lifting the email conversion rate by
/// `improvement` percent of its current value.
pub fn calculate_email_revenue(
	list_size: f64,
	conversion_rate: f64,
	average_order: f64,
	improvement: f64
) -> f64 {
	if any_falsy(&[list_size, conversion_rate, average_order, improvement]) {
		return 0.0;
	}

	let additional_conversion = (conversion_rate / 100.0) * (improvement / 100.0);
	list_size * additional_conversion * average_order * MONTHS_PER_YEAR
}

/// Annual savings on content budget plus content-creation labour.
pub fn calculate_social_savings(monthly_spend: f64, hours: f64, improvement: f64) -> f64 {
	if any_falsy(&[monthly_spend, hours, improvement]) {
		return 0.0;
	}

	let fraction = improvement / 100.0;
	let monthly_savings = monthly_spend * fraction + hours * HOURLY_RATE * fraction;
	monthly_savings * MONTHS_PER_YEAR
}

/// Annual support cost deflected by a chatbot.
pub fn calculate_chatbot_savings(tickets: f64, cost_per_ticket: f64, improvement: f64) -> f64 {
	if any_falsy(&[tickets, cost_per_ticket, improvement]) {
		return 0.0;
	}

	tickets * cost_per_ticket * (improvement / 100.0) * MONTHS_PER_YEAR
}

/// Labour saved on product descriptions across the whole catalogue.
///
/// Unlike the other three benefits this is not multiplied by 12: the
/// catalogue size is already treated as an annual workload.
pub fn calculate_product_savings(products: f64, minutes_per_update: f64, improvement: f64) -> f64 {
	if any_falsy(&[products, minutes_per_update, improvement]) {
		return 0.0;
	}

	let total_hours = products * (minutes_per_update / 60.0);
	total_hours * HOURLY_RATE * (improvement / 100.0)
}

/// ROI as a percentage of `investment_cost`.
pub fn calculate_roi(total_benefits: f64, investment_cost: f64) -> f64 {
	if is_falsy(total_benefits) {
		return ROI_TOTAL_LOSS;
	}

	((total_benefits - investment_cost) / investment_cost) * 100.0
}

/// Months until cumulative benefit covers `investment_cost`.
pub fn calculate_payback_period(total_benefits: f64, investment_cost: f64) -> f64 {
	if total_benefits.is_nan() || total_benefits <= 0.0 {
		return PAYBACK_NEVER;
	}

	investment_cost / (total_benefits / MONTHS_PER_YEAR)
}

pub fn round_to_cents(value: f64) -> f64 {
	(value * 100.0).round() / 100.0
}

/// All derived figures for a single submission, unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenefitBreakdown {
	pub email_revenue: f64,
	pub social_savings: f64,
	pub chatbot_savings: f64,
	pub product_savings: f64,
	pub total_benefits: f64,
	pub roi: f64,
	pub payback_months: f64,
}

impl BenefitBreakdown {
	pub fn compute(
		input: &NewCalculatorInput,
		improvements: Improvements,
		investment_cost: f64
	) -> Self {
		let email_revenue = calculate_email_revenue(
			input.email_list_size as f64,
			input.current_conversion_rate,
			input.average_order_value,
			improvements.email
		);
		let social_savings = calculate_social_savings(
			input.monthly_content_spend,
			input.content_creation_hours as f64,
			improvements.social
		);
		let chatbot_savings = calculate_chatbot_savings(
			input.support_ticket_volume as f64,
			input.cost_per_inquiry,
			improvements.chatbot
		);
		let product_savings = calculate_product_savings(
			input.number_of_products as f64,
			input.description_update_time as f64,
			improvements.product
		);

		let total_benefits = email_revenue + social_savings + chatbot_savings + product_savings;

		Self {
			email_revenue,
			social_savings,
			chatbot_savings,
			product_savings,
			total_benefits,
			roi: calculate_roi(total_benefits, investment_cost),
			payback_months: calculate_payback_period(total_benefits, investment_cost),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::sample_input;

	fn approx(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-6
	}

	#[test]
	fn email_revenue_scenario() {
		// 10000 * 0.02 * 0.20 * 100 * 12
		let revenue = calculate_email_revenue(10_000.0, 2.0, 100.0, 20.0);
		assert!(approx(revenue, 48_000.0), "got {revenue}");
	}

	#[test]
	fn product_savings_scenario() {
		let savings = calculate_product_savings(1000.0, 30.0, 60.0);
		assert!(approx(savings, 15_000.0), "got {savings}");
	}

	#[test]
	fn social_savings_combines_budget_and_labour() {
		// (2000 * 0.4 + 40 * 50 * 0.4) * 12
		let savings = calculate_social_savings(2000.0, 40.0, 40.0);
		assert!(approx(savings, 19_200.0), "got {savings}");
	}

	#[test]
	fn chatbot_savings_annualizes() {
		let savings = calculate_chatbot_savings(500.0, 5.0, 50.0);
		assert!(approx(savings, 15_000.0), "got {savings}");
	}

	#[test]
	fn any_zero_argument_yields_zero() {
		assert_eq!(calculate_email_revenue(0.0, 2.0, 100.0, 20.0), 0.0);
		assert_eq!(calculate_email_revenue(10_000.0, 0.0, 100.0, 20.0), 0.0);
		assert_eq!(calculate_email_revenue(10_000.0, 2.0, 0.0, 20.0), 0.0);
		assert_eq!(calculate_email_revenue(10_000.0, 2.0, 100.0, 0.0), 0.0);

		assert_eq!(calculate_social_savings(0.0, 40.0, 40.0), 0.0);
		assert_eq!(calculate_social_savings(2000.0, 0.0, 40.0), 0.0);
		assert_eq!(calculate_social_savings(2000.0, 40.0, 0.0), 0.0);

		assert_eq!(calculate_chatbot_savings(0.0, 5.0, 50.0), 0.0);
		assert_eq!(calculate_chatbot_savings(500.0, 0.0, 50.0), 0.0);
		assert_eq!(calculate_chatbot_savings(500.0, 5.0, 0.0), 0.0);

		assert_eq!(calculate_product_savings(0.0, 30.0, 60.0), 0.0);
		assert_eq!(calculate_product_savings(1000.0, 0.0, 60.0), 0.0);
		assert_eq!(calculate_product_savings(1000.0, 30.0, 0.0), 0.0);
	}

	#[test]
	fn nan_argument_yields_zero() {
		assert_eq!(calculate_email_revenue(10_000.0, f64::NAN, 100.0, 20.0), 0.0);
		assert_eq!(calculate_chatbot_savings(500.0, 5.0, f64::NAN), 0.0);
	}

	#[test]
	fn roi_sentinel_and_formula() {
		assert_eq!(calculate_roi(0.0, DEFAULT_INVESTMENT_COST), -100.0);
		assert_eq!(calculate_roi(f64::NAN, DEFAULT_INVESTMENT_COST), -100.0);
		assert!(approx(calculate_roi(100_000.0, DEFAULT_INVESTMENT_COST), 100.0));
		assert!(approx(calculate_roi(25_000.0, DEFAULT_INVESTMENT_COST), -50.0));
	}

	#[test]
	fn payback_sentinel_and_formula() {
		assert_eq!(calculate_payback_period(0.0, DEFAULT_INVESTMENT_COST), 999.0);
		assert_eq!(calculate_payback_period(-5.0, DEFAULT_INVESTMENT_COST), 999.0);
		assert!(approx(calculate_payback_period(600_000.0, DEFAULT_INVESTMENT_COST), 1.0));
		assert!(approx(calculate_payback_period(50_000.0, DEFAULT_INVESTMENT_COST), 12.0));
	}

	#[test]
	fn breakdown_total_is_sum_of_parts() {
		let input = sample_input();
		let breakdown = BenefitBreakdown::compute(
			&input,
			input.improvements(),
			DEFAULT_INVESTMENT_COST
		);

		let sum =
			breakdown.email_revenue +
			breakdown.social_savings +
			breakdown.chatbot_savings +
			breakdown.product_savings;
		assert_eq!(breakdown.total_benefits, sum);
		assert_eq!(breakdown.roi, calculate_roi(sum, DEFAULT_INVESTMENT_COST));
		assert_eq!(breakdown.payback_months, calculate_payback_period(sum, DEFAULT_INVESTMENT_COST));
	}

	#[test]
	fn breakdown_with_empty_metrics_hits_sentinels() {
		let mut input = sample_input();
		input.email_list_size = 0;
		input.monthly_content_spend = 0.0;
		input.support_ticket_volume = 0;
		input.number_of_products = 0;

		let breakdown = BenefitBreakdown::compute(&input, input.improvements(), DEFAULT_INVESTMENT_COST);

		assert_eq!(breakdown.total_benefits, 0.0);
		assert_eq!(breakdown.roi, ROI_TOTAL_LOSS);
		assert_eq!(breakdown.payback_months, PAYBACK_NEVER);
	}

	#[test]
	fn rounds_to_cents() {
		assert_eq!(round_to_cents(1.234), 1.23);
		assert_eq!(round_to_cents(1.236), 1.24);
		assert_eq!(round_to_cents(999.0), 999.0);
	}
}
