use anyhow::Result;
mod sqlite_store;

use crate::sqlite_store::SqliteStore;
use roi_common::{ server::run_server, Config };

#[tokio::main]
async fn main() -> Result<()> {
	println!("Starting ROI calculator with SQLite store");
	let config = Config::from_env(3002)?;

	let store = SqliteStore::new(&config.database_path).await?;
	println!("Store opened at {}", config.database_path);

	run_server(store, config).await?;

	Ok(())
}
