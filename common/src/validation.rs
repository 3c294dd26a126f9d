//! Field checks for calculator submissions.
//!
//! Only what keeps the calculations well defined is checked: text fields are
//! present, percentages sit in 0..=100 and amounts are finite and non-negative.

use serde::Serialize;
use thiserror::Error;

use crate::calculations::{ round_to_cents, BenefitBreakdown };
use crate::models::NewCalculatorInput;

/// Maximum allowed length for email addresses.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum allowed length for company and industry names.
pub const MAX_NAME_LENGTH: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
	pub field: &'static str,
	pub message: String,
}

impl ValidationError {
	fn new(field: &'static str, message: impl Into<String>) -> Self {
		Self { field, message: message.into() }
	}
}

/// Every failing field of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("{}", join_errors(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

fn join_errors(errors: &[ValidationError]) -> String {
	errors
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join("; ")
}

impl ValidationErrors {
	pub fn fields(&self) -> Vec<&'static str> {
		self.0.iter().map(|e| e.field).collect()
	}
}

/// Validate an email address (basic `local@domain.tld` check).
pub fn validate_email(email: &str) -> Result<(), String> {
	let email = email.trim();

	if email.is_empty() {
		return Err("cannot be empty".to_string());
	}

	if email.len() > MAX_EMAIL_LENGTH {
		return Err(format!("is too long ({} chars, max {})", email.len(), MAX_EMAIL_LENGTH));
	}

	let Some((local, domain)) = email.split_once('@') else {
		return Err("must contain an @ symbol".to_string());
	};

	if domain.contains('@') {
		return Err("must contain exactly one @ symbol".to_string());
	}

	if local.is_empty() {
		return Err("missing local part (before @)".to_string());
	}

	if domain.is_empty() || !domain.contains('.') {
		return Err("domain must contain at least one dot".to_string());
	}

	if domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
		return Err("domain is malformed".to_string());
	}

	Ok(())
}

fn check_text(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
	let value = value.trim();
	if value.is_empty() {
		errors.push(ValidationError::new(field, "cannot be empty"));
	} else if value.len() > MAX_NAME_LENGTH {
		errors.push(
			ValidationError::new(field, format!("is too long ({} chars, max {})", value.len(), MAX_NAME_LENGTH))
		);
	}
}

fn check_percentage(errors: &mut Vec<ValidationError>, field: &'static str, value: f64) {
	if !value.is_finite() || !(0.0..=100.0).contains(&value) {
		errors.push(ValidationError::new(field, "must be between 0 and 100"));
	}
}

fn check_amount(errors: &mut Vec<ValidationError>, field: &'static str, value: f64) {
	if !value.is_finite() || value < 0.0 {
		errors.push(ValidationError::new(field, "must be a non-negative amount"));
	}
}

pub fn validate_calculator_input(input: &NewCalculatorInput) -> Result<(), ValidationErrors> {
	let mut errors = Vec::new();

	check_text(&mut errors, "companyName", &input.company_name);
	check_text(&mut errors, "industry", &input.industry);
	if let Err(message) = validate_email(&input.email) {
		errors.push(ValidationError::new("email", message));
	}

	check_percentage(&mut errors, "currentOpenRate", input.current_open_rate);
	check_percentage(&mut errors, "currentConversionRate", input.current_conversion_rate);
	check_amount(&mut errors, "averageOrderValue", input.average_order_value);
	check_amount(&mut errors, "monthlyContentSpend", input.monthly_content_spend);
	check_amount(&mut errors, "costPerInquiry", input.cost_per_inquiry);

	check_percentage(&mut errors, "emailImprovementPct", input.email_improvement_pct);
	check_percentage(&mut errors, "socialImprovementPct", input.social_improvement_pct);
	check_percentage(&mut errors, "chatbotImprovementPct", input.chatbot_improvement_pct);
	check_percentage(&mut errors, "productImprovementPct", input.product_improvement_pct);

	if errors.is_empty() {
		Ok(())
	} else {
		Err(ValidationErrors(errors))
	}
}

/// Rejects a computation whose figures do not fit in a stored amount.
///
/// Inputs that pass [`validate_calculator_input`] can still be large enough
/// for the products to overflow, and a non-finite amount has no JSON form.
pub fn validate_breakdown(breakdown: &BenefitBreakdown) -> Result<(), ValidationErrors> {
	let figures = [
		("emailRevenue", breakdown.email_revenue),
		("socialSavings", breakdown.social_savings),
		("chatbotSavings", breakdown.chatbot_savings),
		("productSavings", breakdown.product_savings),
		("totalBenefits", breakdown.total_benefits),
		("roi", breakdown.roi),
		("paybackMonths", breakdown.payback_months),
	];

	let errors: Vec<ValidationError> = figures
		.iter()
		.filter(|(_, value)| !round_to_cents(*value).is_finite())
		.map(|(field, _)| ValidationError::new(*field, "is too large to compute"))
		.collect();

	if errors.is_empty() {
		Ok(())
	} else {
		Err(ValidationErrors(errors))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::calculations::DEFAULT_INVESTMENT_COST;
	use crate::test_support::sample_input;

	#[test]
	fn test_valid_emails() {
		assert!(validate_email("user@example.com").is_ok());
		assert!(validate_email("user.name@example.co.uk").is_ok());
		assert!(validate_email("  user@example.com  ").is_ok());
	}

	#[test]
	fn test_invalid_emails() {
		assert!(validate_email("").is_err());
		assert!(validate_email("userexample.com").is_err());
		assert!(validate_email("user@@example.com").is_err());
		assert!(validate_email("@example.com").is_err());
		assert!(validate_email("user@").is_err());
		assert!(validate_email("user@example").is_err());
		assert!(validate_email("user@.example.com").is_err());
		assert!(validate_email("user@example..com").is_err());
	}

	#[test]
	fn sample_input_is_valid() {
		assert_eq!(validate_calculator_input(&sample_input()), Ok(()));
	}

	#[test]
	fn zero_metrics_are_allowed() {
		let mut input = sample_input();
		input.cost_per_inquiry = 0.0;
		input.email_improvement_pct = 0.0;

		assert!(validate_calculator_input(&input).is_ok());
	}

	#[test]
	fn reports_every_failing_field() {
		let mut input = sample_input();
		input.company_name = "   ".to_string();
		input.email = "nope".to_string();
		input.current_conversion_rate = 140.0;
		input.average_order_value = -1.0;
		input.product_improvement_pct = f64::NAN;

		let errors = validate_calculator_input(&input).unwrap_err();
		assert_eq!(
			errors.fields(),
			vec![
				"companyName",
				"email",
				"currentConversionRate",
				"averageOrderValue",
				"productImprovementPct"
			]
		);
	}

	#[test]
	fn errors_serialize_as_field_list() {
		let errors = ValidationErrors(vec![ValidationError::new("industry", "cannot be empty")]);
		let value = serde_json::to_value(&errors).unwrap();

		assert_eq!(value, serde_json::json!([{ "field": "industry", "message": "cannot be empty" }]));
		assert_eq!(errors.to_string(), "industry: cannot be empty");
	}

	#[test]
	fn sample_breakdown_fits() {
		let input = sample_input();
		let breakdown = BenefitBreakdown::compute(&input, input.improvements(), DEFAULT_INVESTMENT_COST);

		assert_eq!(validate_breakdown(&breakdown), Ok(()));
	}

	#[test]
	fn overflowing_breakdown_is_rejected() {
		let mut input = sample_input();
		input.average_order_value = 1e308;
		assert!(validate_calculator_input(&input).is_ok());

		let breakdown = BenefitBreakdown::compute(&input, input.improvements(), DEFAULT_INVESTMENT_COST);
		let errors = validate_breakdown(&breakdown).unwrap_err();

		assert_eq!(errors.fields(), vec!["emailRevenue", "totalBenefits", "roi"]);
	}

	#[test]
	fn amounts_that_overflow_only_when_rounded_are_rejected() {
		let mut input = sample_input();
		input.monthly_content_spend = 1e306;
		input.social_improvement_pct = 100.0;

		// 1.2e307 is finite, but not once scaled to cents
		let breakdown = BenefitBreakdown::compute(&input, input.improvements(), DEFAULT_INVESTMENT_COST);
		assert!(breakdown.social_savings.is_finite());

		let errors = validate_breakdown(&breakdown).unwrap_err();
		assert!(errors.fields().contains(&"socialSavings"));
	}
}
