use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    deepsource_mcp::cli::run().await
}
