//! Running the simulation without the interactive viewer.

use crate::args::{Args, Mode};
use lifesim_lib::{
    pattern::{save_pattern, PatternCache},
    rules::LifeLike,
    Config, Grid, RuleRegistry,
};
use log::info;
use std::{error::Error, io, thread};

/// Builds the registry, adding the configured rule if it is
/// a rule string rather than a known name.
pub(crate) fn registry(config: &Config) -> Result<RuleRegistry, lifesim_lib::Error> {
    let mut registry = RuleRegistry::with_builtins();
    if !registry.contains(&config.rule) && config.rule.parse::<LifeLike>().is_ok() {
        registry.register_rule_string(config.rule.as_str(), &config.rule)?;
        info!("Registered rule string {}", config.rule);
    }
    Ok(registry)
}

/// Prints a grid with a small header, framed by dashes.
pub(crate) fn display(grid: &Grid, config: &Config) {
    let frame = "-".repeat(grid.width() + 2);
    println!("Generation: {}", grid.generation());
    println!("Alive cells: {}", grid.count_alive());
    println!("{}", frame);
    for row in grid.render(&config.alive, &config.dead) {
        println!("{}", row);
    }
    println!("{}", frame);
}

pub(crate) fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = &args.config;
    let registry = registry(config)?;

    match args.mode {
        Mode::ListRules => {
            for name in registry.list() {
                println!("{}", name);
            }
            return Ok(());
        }
        Mode::DumpConfig => {
            print!("{}", toml::to_string(config)?);
            return Ok(());
        }
        _ => (),
    }

    let mut cache = PatternCache::new();
    let mut simulator = config.simulator_with(&registry, &mut cache)?;

    match args.mode {
        Mode::Run(generations) if args.animate => {
            let mut frame_error = None;
            simulator.run_with(generations, args.history, |grid, _| {
                if frame_error.is_none() {
                    frame_error = animate_frame(grid, config).err();
                    thread::sleep(args.delay);
                }
            })?;
            if let Some(e) = frame_error {
                return Err(e.into());
            }
        }
        Mode::Run(generations) => {
            let grid = simulator.run_with(generations, args.history, |_, _| ())?;
            display(grid, config);
        }
        Mode::UntilStable => {
            let (grid, stability) =
                simulator.run_until_stable(Some(config.max_generations), config.check_period);
            display(grid, config);
            println!("Stability: {}", stability);
        }
        #[cfg(feature = "tui")]
        Mode::Tui => {
            crate::tui::run_tui(&mut simulator, &registry, config, &mut cache, args.delay)?
        }
        _ => display(simulator.grid(), config),
    }

    if args.history {
        println!("Recorded {} generations", simulator.history().len());
    }
    if args.stats {
        println!("{}", simulator.statistics());
    }
    if let Some(path) = &args.save {
        save_pattern(path, simulator.grid(), args.name.as_deref(), &args.comments)?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn animate_frame(grid: &Grid, config: &Config) -> io::Result<()> {
    crate::tui::clear_screen(io::stdout())?;
    display(grid, config);
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn animate_frame(grid: &Grid, config: &Config) -> io::Result<()> {
    println!();
    display(grid, config);
    Ok(())
}
