use clap::Parser;

use pluckier_mcp::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	let args = Args::parse();
	pluckier_mcp::run(args).await
}
