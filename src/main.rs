/*
 * Responsibility
 * - tokio runtime start
 * - call app::run() (no logic here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    bank_api::app::run().await
}
