use anyhow::Result;
use async_trait::async_trait;
use roi_common::{
	models::{ CalculatorInput, NewCalculatorInput, NewResultRecord, ResultRecord },
	store::{ CalculatorStore, StoreError, StoreResult },
	validation::validate_calculator_input,
};
use rusqlite::{ params, OptionalExtension, Row };
use tokio_rusqlite::Connection as AsyncConnection;
use std::path::Path;
use tracing::info;

const CALCULATOR_COLUMNS: &str =
	"id, company_name, industry, email, email_list_size, current_open_rate,
	current_conversion_rate, average_order_value, monthly_content_spend,
	content_creation_hours, monthly_visitors, support_ticket_volume, cost_per_inquiry,
	number_of_products, description_update_time, email_improvement_pct,
	social_improvement_pct, chatbot_improvement_pct, product_improvement_pct";

const RESULT_COLUMNS: &str =
	"id, calculator_id, email_revenue, social_savings, chatbot_savings,
	product_savings, total_benefits, roi, payback_months";

pub struct SqliteStore {
	conn: AsyncConnection,
	db_path: String,
}

impl SqliteStore {
	pub async fn new(db_path: &str) -> Result<Self> {
		// Create data directory if it doesn't exist
		if let Some(data_dir) = Path::new(db_path).parent() {
			if !data_dir.as_os_str().is_empty() && !data_dir.exists() {
				std::fs::create_dir_all(data_dir)?;
			}
		}

		let conn = AsyncConnection::open(db_path).await?;
		Self::configure(&conn).await?;

		Ok(Self {
			conn,
			db_path: db_path.to_string(),
		})
	}

	/// Private in-memory database, gone when the store is dropped.
	pub async fn in_memory() -> Result<Self> {
		let conn = AsyncConnection::open_in_memory().await?;
		Self::configure(&conn).await?;

		Ok(Self {
			conn,
			db_path: ":memory:".to_string(),
		})
	}

	async fn configure(conn: &AsyncConnection) -> Result<()> {
		conn.call(|conn| {
			// journal_mode answers with the resulting mode, so read it back
			conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))?;
			conn.execute_batch(
				"PRAGMA synchronous = NORMAL;
				PRAGMA foreign_keys = ON;
				PRAGMA busy_timeout = 5000;"
			)?;
			Ok(())
		}).await?;

		Ok(())
	}
}

fn backend(err: tokio_rusqlite::Error) -> StoreError {
	StoreError::Backend(err.to_string())
}

fn calculator_from_row(row: &Row<'_>) -> rusqlite::Result<CalculatorInput> {
	Ok(CalculatorInput {
		id: row.get(0)?,
		data: NewCalculatorInput {
			company_name: row.get(1)?,
			industry: row.get(2)?,
			email: row.get(3)?,
			email_list_size: row.get(4)?,
			current_open_rate: row.get(5)?,
			current_conversion_rate: row.get(6)?,
			average_order_value: row.get(7)?,
			monthly_content_spend: row.get(8)?,
			content_creation_hours: row.get(9)?,
			monthly_visitors: row.get(10)?,
			support_ticket_volume: row.get(11)?,
			cost_per_inquiry: row.get(12)?,
			number_of_products: row.get(13)?,
			description_update_time: row.get(14)?,
			email_improvement_pct: row.get(15)?,
			social_improvement_pct: row.get(16)?,
			chatbot_improvement_pct: row.get(17)?,
			product_improvement_pct: row.get(18)?,
		},
	})
}

fn result_from_row(row: &Row<'_>) -> rusqlite::Result<ResultRecord> {
	Ok(ResultRecord {
		id: row.get(0)?,
		data: NewResultRecord {
			calculator_id: row.get(1)?,
			email_revenue: row.get(2)?,
			social_savings: row.get(3)?,
			chatbot_savings: row.get(4)?,
			product_savings: row.get(5)?,
			total_benefits: row.get(6)?,
			roi: row.get(7)?,
			payback_months: row.get(8)?,
		},
	})
}

#[async_trait]
impl CalculatorStore for SqliteStore {
	fn store_name(&self) -> String {
		"SQLite".to_string()
	}

	async fn init(&self) -> StoreResult<()> {
		self.conn
			.call(|conn| {
				// AUTOINCREMENT keeps ids from ever being reused
				conn.execute(
					"CREATE TABLE IF NOT EXISTS calculator_inputs (
                        id INTEGER PRIMARY KEY AUTOINCREMENT,
                        company_name TEXT NOT NULL,
                        industry TEXT NOT NULL,
                        email TEXT NOT NULL,
                        email_list_size INTEGER NOT NULL,
                        current_open_rate REAL NOT NULL,
                        current_conversion_rate REAL NOT NULL,
                        average_order_value REAL NOT NULL,
                        monthly_content_spend REAL NOT NULL,
                        content_creation_hours INTEGER NOT NULL,
                        monthly_visitors INTEGER NOT NULL,
                        support_ticket_volume INTEGER NOT NULL,
                        cost_per_inquiry REAL NOT NULL,
                        number_of_products INTEGER NOT NULL,
                        description_update_time INTEGER NOT NULL,
                        email_improvement_pct REAL NOT NULL,
                        social_improvement_pct REAL NOT NULL,
                        chatbot_improvement_pct REAL NOT NULL,
                        product_improvement_pct REAL NOT NULL
                    )",
					[]
				)?;

				conn.execute(
					"CREATE TABLE IF NOT EXISTS results (
                        id INTEGER PRIMARY KEY AUTOINCREMENT,
                        calculator_id INTEGER NOT NULL,
                        email_revenue REAL NOT NULL,
                        social_savings REAL NOT NULL,
                        chatbot_savings REAL NOT NULL,
                        product_savings REAL NOT NULL,
                        total_benefits REAL NOT NULL,
                        roi REAL NOT NULL,
                        payback_months REAL NOT NULL,
                        FOREIGN KEY (calculator_id) REFERENCES calculator_inputs (id)
                    )",
					[]
				)?;

				conn.execute(
					"CREATE INDEX IF NOT EXISTS idx_results_calculator_id ON results (calculator_id)",
					[]
				)?;

				Ok(())
			}).await
			.map_err(backend)?;

		info!("SQLite schema ready at {}", self.db_path);
		Ok(())
	}

	async fn save_calculator_inputs(
		&self,
		input: NewCalculatorInput
	) -> StoreResult<CalculatorInput> {
		validate_calculator_input(&input)?;

		self.conn
			.call(move |conn| {
				conn.execute(
					"INSERT INTO calculator_inputs (
                        company_name, industry, email, email_list_size, current_open_rate,
                        current_conversion_rate, average_order_value, monthly_content_spend,
                        content_creation_hours, monthly_visitors, support_ticket_volume,
                        cost_per_inquiry, number_of_products, description_update_time,
                        email_improvement_pct, social_improvement_pct, chatbot_improvement_pct,
                        product_improvement_pct
                    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
					params![
						input.company_name,
						input.industry,
						input.email,
						input.email_list_size,
						input.current_open_rate,
						input.current_conversion_rate,
						input.average_order_value,
						input.monthly_content_spend,
						input.content_creation_hours,
						input.monthly_visitors,
						input.support_ticket_volume,
						input.cost_per_inquiry,
						input.number_of_products,
						input.description_update_time,
						input.email_improvement_pct,
						input.social_improvement_pct,
						input.chatbot_improvement_pct,
						input.product_improvement_pct
					]
				)?;

				Ok(CalculatorInput {
					id: conn.last_insert_rowid(),
					data: input,
				})
			}).await
			.map_err(backend)
	}

	async fn save_results(&self, result: NewResultRecord) -> StoreResult<ResultRecord> {
		let calculator_id = result.calculator_id;

		let saved = self.conn
			.call(move |conn| {
				let tx = conn.transaction()?;

				let exists: bool = tx.query_row(
					"SELECT EXISTS(SELECT 1 FROM calculator_inputs WHERE id = ?)",
					[result.calculator_id],
					|row| row.get(0)
				)?;
				if !exists {
					return Ok(None);
				}

				tx.execute(
					"INSERT INTO results (
                        calculator_id, email_revenue, social_savings, chatbot_savings,
                        product_savings, total_benefits, roi, payback_months
                    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
					params![
						result.calculator_id,
						result.email_revenue,
						result.social_savings,
						result.chatbot_savings,
						result.product_savings,
						result.total_benefits,
						result.roi,
						result.payback_months
					]
				)?;
				let id = tx.last_insert_rowid();

				tx.commit()?;

				Ok(Some(ResultRecord { id, data: result }))
			}).await
			.map_err(backend)?;

		saved.ok_or(StoreError::UnknownCalculator(calculator_id))
	}

	async fn get_calculator_by_id(&self, id: i64) -> StoreResult<Option<CalculatorInput>> {
		self.conn
			.call(move |conn| {
				let calculator = conn
					.query_row(
						&format!("SELECT {} FROM calculator_inputs WHERE id = ?", CALCULATOR_COLUMNS),
						[id],
						calculator_from_row
					)
					.optional()?;

				Ok(calculator)
			}).await
			.map_err(backend)
	}

	async fn get_results_by_id(&self, calculator_id: i64) -> StoreResult<Option<ResultRecord>> {
		self.conn
			.call(move |conn| {
				let result = conn
					.query_row(
						&format!(
							"SELECT {} FROM results WHERE calculator_id = ? ORDER BY id LIMIT 1",
							RESULT_COLUMNS
						),
						[calculator_id],
						result_from_row
					)
					.optional()?;

				Ok(result)
			}).await
			.map_err(backend)
	}
}
