//! Default improvement percentages per industry.
//!
//! This is the only copy of the table. Both the recompute path and anything
//! that displays defaults read it from here.

use crate::models::IndustryDefault;

/// Improvement applied to any industry not in [`INDUSTRIES`].
pub const DEFAULT_IMPROVEMENT_PCT: f64 = 20.0;

pub const INDUSTRIES: &[(&str, f64)] = &[
	("Retail", 20.0),
	("E-commerce", 30.0),
	("Technology", 32.5),
	("Manufacturing", 25.0),
	("Healthcare", 22.5),
	("Education", 17.5),
	("Financial Services", 27.5),
	("Professional Services", 25.0),
	("Other", DEFAULT_IMPROVEMENT_PCT),
];

/// Looks up the default improvement for `industry`. Matching is exact and
/// case-sensitive.
pub fn get_improvement_percentage(industry: &str) -> f64 {
	INDUSTRIES.iter()
		.find(|(name, _)| *name == industry)
		.map(|(_, pct)| *pct)
		.unwrap_or(DEFAULT_IMPROVEMENT_PCT)
}

pub fn industry_defaults() -> Vec<IndustryDefault> {
	INDUSTRIES.iter()
		.map(|(name, pct)| IndustryDefault {
			industry: name.to_string(),
			improvement_pct: *pct,
		})
		.collect()
}
