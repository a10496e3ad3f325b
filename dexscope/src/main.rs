use clap::{Parser, Subcommand};
use dexscope_core::cli;
use dexscope_core::cli::config::ConfigCmd;
use dexscope_core::cli::replay::ReplayArgs;
use dexscope_core::cli::watch::WatchArgs;
use dexscope_core::logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "dexscope",
    version,
    about = "dexscope: live viewer for decoded DEX events"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Connect to the event stream and present events (default)
    Watch(WatchArgs),

    /// Present recorded newline-delimited messages
    Replay(ReplayArgs),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

fn main() {
    let cli = Cli::parse();

    init_logging();

    let result = match cli.command {
        Some(Command::Watch(args)) => cli::watch::run(args),
        Some(Command::Replay(args)) => cli::replay::run(args),
        Some(Command::Config { cmd }) => cli::config::run(cmd),
        None => cli::watch::run(WatchArgs::default()),
    };

    if let Err(e) = result {
        eprintln!("dexscope error: {e:#}");
        std::process::exit(1);
    }
}
