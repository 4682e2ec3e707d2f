use clap::Parser;

/// Chat with the PDF documents in a folder.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the YAML configuration file. Defaults to `config.yml` if present.
    #[arg(long, env = "ASKDOCS_CONFIG")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    askdocs_server::start(cli.config.as_deref()).await
}
