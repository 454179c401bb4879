use clap::Parser;

mod aws;
mod cli;
mod config;
mod deploy;
mod error;
mod format;
mod manage;
mod output;
mod version;

#[tokio::main]
async fn main() {
    let cmd = cli::RootCmd::parse();
    if let Err(err) = cli::run(cmd).await {
        output::error(&format!("{err:#}"));
        std::process::exit(1);
    }
}
