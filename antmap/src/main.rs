use antmap::{
    cli::{self, Cli},
    config::AppConfig,
    console::Console,
    ctx::AppContext,
};
use clap::Parser;
use env_logger::Env;
use log::debug;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    debug!("effective config: {config:?}");

    let mut ctx = AppContext::new(config);
    let mut console = Console::stdio();
    cli::run(&mut ctx, &mut console, cli.command.unwrap_or_default())
}
