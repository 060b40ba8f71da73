use clap::Parser;
use color_eyre::eyre::Result;

use segtui::{
    app::App,
    infrastructure::{cli::Cli, config::Config, tui::real::RealTui},
    trace_dbg,
    utils::{initialize_logging, initialize_panic_handler},
};

async fn tokio_main() -> Result<()> {
    initialize_logging()?;

    initialize_panic_handler()?;

    let args = <Cli as Parser>::parse();

    let mut config = Config::new()?;
    if !args.segments.is_empty() {
        config.segments = args.segments;
        config.initial_index = 0;
    }
    if let Some(initial_index) = args.initial_index {
        config.initial_index = initial_index;
    }
    trace_dbg!(&config.segments);

    let mut app = App::new(config)?;
    let mut tui = RealTui::new()?
        .tick_rate(args.tick_rate)
        .frame_rate(args.frame_rate);
    app.run(&mut tui).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = tokio_main().await {
        eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
        Err(e)
    } else {
        Ok(())
    }
}
