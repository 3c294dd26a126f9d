use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };

use crate::calculations::{ round_to_cents, BenefitBreakdown };

/// Calculator payload as submitted by the client, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCalculatorInput {
	pub company_name: String,
	pub industry: String,
	pub email: String,

	// Email campaigns
	pub email_list_size: u32,
	#[serde(with = "decimal")]
	pub current_open_rate: f64,
	#[serde(with = "decimal")]
	pub current_conversion_rate: f64,
	#[serde(with = "decimal")]
	pub average_order_value: f64,

	// Social media
	#[serde(with = "decimal")]
	pub monthly_content_spend: f64,
	pub content_creation_hours: u32,

	// Chatbot
	pub monthly_visitors: u32,
	pub support_ticket_volume: u32,
	#[serde(with = "decimal")]
	pub cost_per_inquiry: f64,

	// Product descriptions
	pub number_of_products: u32,
	/// Minutes spent updating a single product description.
	pub description_update_time: u32,

	// Improvement assumptions, in percent
	#[serde(with = "decimal")]
	pub email_improvement_pct: f64,
	#[serde(with = "decimal")]
	pub social_improvement_pct: f64,
	#[serde(with = "decimal")]
	pub chatbot_improvement_pct: f64,
	#[serde(with = "decimal")]
	pub product_improvement_pct: f64,
}

impl NewCalculatorInput {
	/// The per-category improvement percentages as submitted.
	pub fn improvements(&self) -> Improvements {
		Improvements {
			email: self.email_improvement_pct,
			social: self.social_improvement_pct,
			chatbot: self.chatbot_improvement_pct,
			product: self.product_improvement_pct,
		}
	}
}

/// A stored calculator submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorInput {
	pub id: i64,
	#[serde(flatten)]
	pub data: NewCalculatorInput,
}

/// Improvement percentages (0-100) for the four benefit categories.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Improvements {
	pub email: f64,
	pub social: f64,
	pub chatbot: f64,
	pub product: f64,
}

impl Improvements {
	pub fn uniform(pct: f64) -> Self {
		Self {
			email: pct,
			social: pct,
			chatbot: pct,
			product: pct,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResultRecord {
	pub calculator_id: i64,
	pub email_revenue: f64,
	pub social_savings: f64,
	pub chatbot_savings: f64,
	pub product_savings: f64,
	pub total_benefits: f64,
	pub roi: f64,
	pub payback_months: f64,
}

impl NewResultRecord {
	/// Builds the record for `calculator_id`, rounding every amount to cents.
	pub fn from_breakdown(calculator_id: i64, breakdown: &BenefitBreakdown) -> Self {
		Self {
			calculator_id,
			email_revenue: round_to_cents(breakdown.email_revenue),
			social_savings: round_to_cents(breakdown.social_savings),
			chatbot_savings: round_to_cents(breakdown.chatbot_savings),
			product_savings: round_to_cents(breakdown.product_savings),
			total_benefits: round_to_cents(breakdown.total_benefits),
			roi: round_to_cents(breakdown.roi),
			payback_months: round_to_cents(breakdown.payback_months),
		}
	}
}

/// A stored result, linked to its calculator submission by `calculator_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
	pub id: i64,
	#[serde(flatten)]
	pub data: NewResultRecord,
}

/// Calculator input and result paired for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
	pub calculator: CalculatorInput,
	pub results: ResultRecord,
	pub summary: Vec<String>,
	pub generated_at: DateTime<Utc>,
}

impl Report {
	pub fn new(calculator: CalculatorInput, results: ResultRecord) -> Self {
		let r = &results.data;
		let summary = vec![
			"AI ROI Calculator Results".to_string(),
			format!("Company: {}", calculator.data.company_name),
			format!("Industry: {}", calculator.data.industry),
			"Annual Benefits:".to_string(),
			format!("Email Revenue: ${:.2}", r.email_revenue),
			format!("Social Media Savings: ${:.2}", r.social_savings),
			format!("Chatbot Savings: ${:.2}", r.chatbot_savings),
			format!("Product Description Savings: ${:.2}", r.product_savings),
			format!("Total Benefits: ${:.2}", r.total_benefits),
			format!("ROI: {:.2}%", r.roi),
			format!("Payback Period: {:.2} months", r.payback_months)
		];

		Self {
			calculator,
			results,
			summary,
			generated_at: Utc::now(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryDefault {
	pub industry: String,
	pub improvement_pct: f64,
}

/// Serde adapter for decimal fields. Browsers post these as strings ("2.5"),
/// so both JSON numbers and numeric strings are accepted.
mod decimal {
	use serde::{ de, Deserialize, Deserializer, Serializer };

	#[derive(Deserialize)]
	#[serde(untagged)]
	enum NumberOrString {
		Number(f64),
		Text(String),
	}

	pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
		where S: Serializer
	{
		serializer.serialize_f64(*value)
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
		where D: Deserializer<'de>
	{
		match NumberOrString::deserialize(deserializer)? {
			NumberOrString::Number(value) => Ok(value),
			NumberOrString::Text(text) =>
				text
					.trim()
					.parse::<f64>()
					.map_err(|_| de::Error::custom(format!("invalid decimal value: {:?}", text))),
		}
	}
}
