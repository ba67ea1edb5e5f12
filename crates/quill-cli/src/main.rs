use clap::Parser;

mod cli;
mod menu;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = cli::Cli::parse();
    menu::run(cli)
}
