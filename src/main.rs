/*
 * Responsibility
 * - tokio runtime
 * - hand over to app::run() (no logic here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    api_auth::app::run().await
}
