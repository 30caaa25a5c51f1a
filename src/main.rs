use std::path::Path;
use std::process::ExitCode;

use log::{error, info};
use pig_farm::cli::{self, CliArgs, Command};
use pig_farm::game::GameState;
use pig_farm::journal::Journal;
use pig_farm::metrics::FarmMetrics;
use pig_farm::persistence::{JsonFileStore, MemoryStore, SaveStore};
use pig_farm::runner::Runner;
use pig_farm::scenario::{Scenario, create_standard_scenarios};
use pig_farm::strategies::{STRATEGY_NAMES, create_strategy};

fn init_logging(args: &CliArgs) {
    let default_level = if args.quiet {
        "warn"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn load_scenario(args: &CliArgs) -> Result<Scenario, String> {
    let mut scenario = match &args.scenario_file {
        Some(path) => Scenario::load_from_file(path).map_err(|e| e.to_string())?,
        None => create_standard_scenarios()
            .remove(&args.scenario_name)
            .ok_or_else(|| format!("Unknown scenario: {}", args.scenario_name))?,
    };
    if args.random_seed.is_some() {
        scenario.random_seed = args.random_seed;
    }
    scenario.validate()?;
    Ok(scenario)
}

fn play(args: &CliArgs, resume_from: Option<&Path>) -> Result<(), String> {
    let scenario = load_scenario(args)?;
    if !STRATEGY_NAMES.contains(&args.strategy.to_lowercase().as_str()) {
        log::warn!("Unknown strategy '{}', playing steady", args.strategy);
    }
    let strategy = create_strategy(&args.strategy);
    let mut game = GameState::new(&scenario);

    if let Some(path) = resume_from {
        let store = JsonFileStore::new(path);
        if !game.restore(&store).map_err(|e| e.to_string())? {
            return Err(format!("No saved game at {}", path.display()));
        }
    }

    let save_path = args.save_file.as_deref().or(resume_from);
    let mut file_store = save_path.map(|path| JsonFileStore::new(path));
    let mut memory_store = MemoryStore::new();
    let store: &mut dyn SaveStore = match file_store.as_mut() {
        Some(store) => store,
        None => &mut memory_store,
    };

    let outcome = Runner::new(strategy.as_ref())
        .with_store(store, args.autosave_every)
        .run(&mut game, args.days);

    let farmer = outcome.final_state.farmer;
    println!(
        "Day {}: money {}, feed {}, pigs {} fattening + {} ready of {}",
        outcome.final_state.day,
        farmer.money,
        farmer.feed_stock,
        farmer.fattening_pigs,
        farmer.ready_pigs,
        farmer.max_pigs
    );
    println!("{}", game.market_summary());
    println!("\n{}", outcome.metrics);

    if let Some(path) = &args.journal_file {
        game.take_journal()
            .save_to_file(path)
            .map_err(|e| format!("Failed to write journal: {}", e))?;
        info!("Journal written to {}", path.display());
    }
    if let Some(path) = save_path {
        info!("Game saved to {} ({} saves)", path.display(), outcome.saves_written);
    }
    Ok(())
}

fn summarize(path: &Path) -> Result<(), String> {
    let journal =
        Journal::load_from_file(path).map_err(|e| format!("Failed to read journal: {}", e))?;
    println!("{}", FarmMetrics::from_journal(journal.entries()));
    Ok(())
}

fn list_scenarios() {
    let scenarios = create_standard_scenarios();
    let mut names: Vec<_> = scenarios.keys().collect();
    names.sort();
    for name in names {
        println!("{}\n", scenarios[name]);
    }
}

fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            cli::print_help();
            return ExitCode::FAILURE;
        }
    };
    init_logging(&args);

    let result = match &args.command {
        Command::Run => play(&args, None),
        Command::Resume { save } => play(&args, Some(save.as_path())),
        Command::Summary { journal } => summarize(journal),
        Command::Scenarios => {
            list_scenarios();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
