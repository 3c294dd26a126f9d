//! Fixtures shared by this crate's tests and, through the `test-support`
//! feature, by the backend crates' tests.

use crate::models::NewCalculatorInput;

pub fn sample_input() -> NewCalculatorInput {
	NewCalculatorInput {
		company_name: "Acme".to_string(),
		industry: "Technology".to_string(),
		email: "owner@acme.com".to_string(),
		email_list_size: 10_000,
		current_open_rate: 20.0,
		current_conversion_rate: 2.0,
		average_order_value: 100.0,
		monthly_content_spend: 2000.0,
		content_creation_hours: 40,
		monthly_visitors: 50_000,
		support_ticket_volume: 500,
		cost_per_inquiry: 5.0,
		number_of_products: 1000,
		description_update_time: 30,
		email_improvement_pct: 20.0,
		social_improvement_pct: 40.0,
		chatbot_improvement_pct: 50.0,
		product_improvement_pct: 60.0,
	}
}
