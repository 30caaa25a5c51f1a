//! Command-line interface for the pig farm simulation.

use lexopt::prelude::*;
use std::path::PathBuf;

/// Command-line arguments for the simulation.
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub command: Command,
    pub strategy: String,
    pub scenario_name: String,
    pub scenario_file: Option<PathBuf>,
    pub days: u32,
    pub random_seed: Option<u64>,
    pub save_file: Option<PathBuf>,
    pub journal_file: Option<PathBuf>,
    pub autosave_every: u32,
    pub verbose: bool,
    pub quiet: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run,
    Resume { save: PathBuf },
    Summary { journal: PathBuf },
    Scenarios,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            command: Command::Run,
            strategy: "steady".to_string(),
            scenario_name: "classic".to_string(),
            scenario_file: None,
            days: 30,
            random_seed: None,
            save_file: None,
            journal_file: None,
            autosave_every: 1,
            verbose: false,
            quiet: false,
        }
    }
}

pub fn parse_args() -> Result<CliArgs, lexopt::Error> {
    parse_from(lexopt::Parser::from_env())
}

pub fn parse_from(mut args: lexopt::Parser) -> Result<CliArgs, lexopt::Error> {
    let mut cli_args = CliArgs::default();
    let mut subcommand: Option<String> = None;
    let mut target: Option<PathBuf> = None;

    while let Some(arg) = args.next()? {
        match arg {
            Value(val) => {
                let val_str = val.string()?;
                if subcommand.is_none() {
                    subcommand = Some(val_str);
                } else if target.is_none() {
                    target = Some(PathBuf::from(val_str));
                } else {
                    return Err(lexopt::Error::from(format!("unexpected argument {}", val_str)));
                }
            }
            Long("strategy") | Short('s') => cli_args.strategy = args.value()?.string()?,
            Long("scenario") => cli_args.scenario_name = args.value()?.string()?,
            Long("scenario-file") => {
                cli_args.scenario_file = Some(PathBuf::from(args.value()?.string()?));
            }
            Long("days") | Short('d') => cli_args.days = args.value()?.parse()?,
            Long("seed") => cli_args.random_seed = Some(args.value()?.parse()?),
            Long("save") => cli_args.save_file = Some(PathBuf::from(args.value()?.string()?)),
            Long("journal") | Short('o') => {
                cli_args.journal_file = Some(PathBuf::from(args.value()?.string()?));
            }
            Long("autosave-every") => cli_args.autosave_every = args.value()?.parse()?,
            Long("verbose") | Short('v') => cli_args.verbose = true,
            Long("quiet") | Short('q') => cli_args.quiet = true,
            Long("help") | Short('h') => {
                print_help();
                std::process::exit(0);
            }
            _ => return Err(arg.unexpected()),
        }
    }

    cli_args.command = match subcommand.as_deref() {
        Some("run") | None => Command::Run,
        Some("resume") => Command::Resume {
            save: target
                .or_else(|| cli_args.save_file.clone())
                .ok_or_else(|| lexopt::Error::from("resume requires a save file"))?,
        },
        Some("summary") => Command::Summary {
            journal: target.ok_or_else(|| lexopt::Error::from("summary requires a journal file"))?,
        },
        Some("scenarios") => Command::Scenarios,
        Some(cmd) => return Err(lexopt::Error::from(format!("unknown command: {}", cmd))),
    };

    Ok(cli_args)
}

pub fn print_help() {
    println!("\nPig Farm Simulation\n");
    println!("USAGE:");
    println!("    pig-farm-sim [COMMAND] [OPTIONS]\n");

    println!("COMMANDS:");
    println!("    run                 Play a new game on autopilot (default)");
    println!("    resume SAVE         Continue a saved game");
    println!("    summary JOURNAL     Print metrics for a saved journal");
    println!("    scenarios           List built-in scenarios\n");

    println!("OPTIONS:");
    println!("    -s, --strategy <NAME>      Autopilot: idle, steady (default), expansion");
    println!("    --scenario <NAME>          Built-in scenario (default: classic)");
    println!("    --scenario-file <FILE>     Load scenario from JSON or YAML");
    println!("    -d, --days <N>             Days to play (default: 30)");
    println!("    --seed <N>                 Random seed for reproducible runs");
    println!("    --save <FILE>              Autosave the game to this file");
    println!("    --autosave-every <N>       Days between autosaves (default: 1, 0 = end only)");
    println!("    -o, --journal <FILE>       Write the activity journal to this file");
    println!("    -v, --verbose              Log every day and transaction");
    println!("    -q, --quiet                Only log warnings");
    println!("    -h, --help                 Print help information\n");

    println!("EXAMPLES:");
    println!("    pig-farm-sim run --scenario volatile -s expansion --days 90 --seed 7 --save farm.json");
    println!("    pig-farm-sim resume farm.json --days 30 -o journal.json");
    println!("    pig-farm-sim summary journal.json");
}
