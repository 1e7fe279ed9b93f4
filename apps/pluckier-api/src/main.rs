use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = pluckier_api::Args::parse();
	pluckier_api::run(args).await
}
