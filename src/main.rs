use arith_mahjong::api::MahjongState;
use arith_mahjong::config::Config;
use arith_mahjong::scorer::loader::load_point_overrides_from_path;
use arith_mahjong::MjResult;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON rule file; explicit command-line flags still win.
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    /// CSV of `category,points` overrides.
    #[arg(global = true, long)]
    points: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a completed 16-tile hand.
    Check(cmd::check::CheckArgs),
    /// List the faces that would complete a hand.
    Ready(cmd::ready::ReadyArgs),
    /// Score every shape that completes a hand.
    Score(cmd::score::ScoreArgs),
    /// Validate a single four-tile group.
    Group(cmd::group::GroupArgs),
}

impl Commands {
    fn name_and_config(&self) -> (&'static str, &Config) {
        match self {
            Commands::Check(args) => ("check", &args.config),
            Commands::Ready(args) => ("ready", &args.config),
            Commands::Score(args) => ("score", &args.config),
            Commands::Group(args) => ("group", &args.config),
        }
    }
}

fn main() {
    // 1. Parse raw matches so explicit flags can be told apart from defaults
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli, &matches) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(cli: Cli, matches: &ArgMatches) -> MjResult<()> {
    // 2. Config precedence: CLI flags > JSON file > defaults
    let config = resolve_config(&cli, matches)?;

    let overrides = match &cli.points {
        Some(path) => {
            info!("Loading point overrides from {}", path);
            load_point_overrides_from_path(path)?
        }
        None => Vec::new(),
    };
    let state = MahjongState::with_point_overrides(config, overrides)?;

    // 3. Execute
    match cli.command {
        Commands::Check(args) => cmd::check::run(args, &state, cli.json),
        Commands::Ready(args) => cmd::ready::run(args, &state, cli.json),
        Commands::Score(args) => cmd::score::run(args, &state, cli.json),
        Commands::Group(args) => cmd::group::run(args, &state, cli.json),
    }
}

fn resolve_config(cli: &Cli, matches: &ArgMatches) -> MjResult<Config> {
    let (name, cli_config) = cli.command.name_and_config();
    let Some(path) = &cli.config_file else {
        return Ok(cli_config.clone());
    };

    info!("Loading rules from {}", path);
    let mut config = Config::load_from_file(path)?;
    // Rule flags live in the subcommand's matches, not the root
    if let Some(sub_matches) = matches.subcommand_matches(name) {
        config.merge_from_cli(cli_config, sub_matches);
    }
    Ok(config)
}
