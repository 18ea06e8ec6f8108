use anyhow::Result;

// Timers and HTTP tasks share the one thread the engine loop runs on.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    termtoys::cli::run_cli().await
}
