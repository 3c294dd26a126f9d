use anyhow::Result;
use roi_common::{ server::run_server, Config, MemoryStore };

#[tokio::main]
async fn main() -> Result<()> {
	println!("Starting ROI calculator with in-memory store");
	let config = Config::from_env(3001)?;

	// Records live only as long as the process
	run_server(MemoryStore::new(), config).await?;

	Ok(())
}
