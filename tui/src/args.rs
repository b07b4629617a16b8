//! Parsing command-line arguments.

use clap::{command, error::ErrorKind, value_parser, Arg, ArgAction, ArgMatches, Command, Error};
use lifesim_lib::{Config, Preset, RandomFill};
use std::{
    ffi::{OsStr, OsString},
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// What to do with the simulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Only display the initial grid.
    Show,
    /// Run for a number of generations.
    Run(usize),
    /// Run until extinction, a still life or an oscillator.
    UntilStable,
    /// Print the names of all known rules.
    ListRules,
    /// Print the effective configuration as TOML.
    DumpConfig,
    /// Start the interactive viewer.
    #[cfg(feature = "tui")]
    Tui,
}

/// A struct to store the parse results.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Args {
    pub(crate) config: Config,
    pub(crate) mode: Mode,
    pub(crate) history: bool,
    pub(crate) animate: bool,
    pub(crate) delay: Duration,
    pub(crate) save: Option<PathBuf>,
    pub(crate) name: Option<String>,
    pub(crate) comments: Vec<String>,
    pub(crate) stats: bool,
    pub(crate) verbosity: u8,
}

/// Parses `ROW,COL`.
fn parse_offset(s: &str) -> Result<(isize, isize), String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| String::from("offset must look like ROW,COL"))?;
    let row = row.trim().parse().map_err(|e| format!("invalid row: {}", e))?;
    let col = col.trim().parse().map_err(|e| format!("invalid column: {}", e))?;
    Ok((row, col))
}

fn parse_density(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(d) if (0.0..=1.0).contains(&d) => Ok(d),
        Ok(_) => Err(String::from("density must be between 0 and 1")),
        Err(e) => Err(e.to_string()),
    }
}

/// Reads a configuration file. The format is chosen by the extension.
fn read_config(path: &Path) -> Result<Config, Error> {
    let invalid = |e: String| {
        Error::raw(
            ErrorKind::InvalidValue,
            format!("Unable to read config file {}: {}\n", path.display(), e),
        )
    };
    let content = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    match path.extension().and_then(OsStr::to_str) {
        Some("json") => serde_json::from_str(&content).map_err(|e| invalid(e.to_string())),
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).map_err(|e| invalid(e.to_string()))
        }
        Some("toml") => toml::from_str(&content).map_err(|e| invalid(e.to_string())),
        _ => Err(invalid(String::from(
            "unknown format, expected .json, .yaml, .yml or .toml",
        ))),
    }
}

fn command() -> Command {
    let cmd = command!()
        .long_about(
            "Simulates Conway's Game of Life and its variants on a fixed-size grid.\n\
             \n\
             Cells outside the grid are always dead. The initial cells can come from \
             a preset, a pattern file (plaintext, coordinate list or RLE), or a random \
             fill, in any combination.\n\
             \n\
             Rules can be chosen by name (see --list-rules) or given as a Life-like \
             rule string such as B36/S23.\n",
        )
        .arg(
            Arg::new("CONFIG")
                .help("Reads the configuration from a .json, .yaml or .toml file")
                .long_help(
                    "Reads the configuration from a .json, .yaml or .toml file\n\
                     Other command-line options override the values in the file.\n",
                )
                .short('c')
                .long("config")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("WIDTH")
                .help("Width of the grid")
                .short('W')
                .long("width")
                .value_parser(value_parser!(i64).range(1..=1000)),
        )
        .arg(
            Arg::new("HEIGHT")
                .help("Height of the grid")
                .short('H')
                .long("height")
                .value_parser(value_parser!(i64).range(1..=1000)),
        )
        .arg(
            Arg::new("RULE")
                .help("Rule name or Life-like rule string")
                .long_help(
                    "Rule name or Life-like rule string\n\
                     Built-in names are standard, highlife and day_and_night.\n\
                     A rule string like B36/S23 is registered under its own name.\n",
                )
                .short('r')
                .long("rule"),
        )
        .arg(
            Arg::new("PRESET")
                .help("Puts a preset at the center of the grid")
                .long("preset")
                .value_parser(|s: &str| s.parse::<Preset>()),
        )
        .arg(
            Arg::new("PATTERN")
                .help("Loads a pattern file")
                .short('p')
                .long("pattern")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("OFFSET")
                .help("Where to put the top-left corner of the pattern file")
                .long("offset")
                .value_name("ROW,COL")
                .allow_hyphen_values(true)
                .value_parser(parse_offset),
        )
        .arg(
            Arg::new("RANDOM")
                .help("Fills the grid at random with the given density")
                .long("random")
                .value_name("DENSITY")
                .value_parser(parse_density),
        )
        .arg(
            Arg::new("SEED")
                .help("Seed for --random")
                .long("seed")
                .requires("RANDOM")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("GENERATIONS")
                .help("Runs for this many generations (at most 10000)")
                .short('g')
                .long("generations")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("UNTIL_STABLE")
                .help("Runs until extinction, a still life or an oscillator")
                .short('u')
                .long("until-stable")
                .action(ArgAction::SetTrue)
                .conflicts_with("GENERATIONS"),
        )
        .arg(
            Arg::new("MAX")
                .help("Upper limit of generations for --until-stable")
                .short('m')
                .long("max")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("CHECK_PERIOD")
                .help("Compares every n-th generation when looking for oscillators")
                .long("check-period")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("HISTORY")
                .help("Records every generation of --generations")
                .long("history")
                .action(ArgAction::SetTrue)
                .requires("GENERATIONS"),
        )
        .arg(
            Arg::new("ANIMATE")
                .help("Prints every generation of --generations")
                .short('a')
                .long("animate")
                .action(ArgAction::SetTrue)
                .requires("GENERATIONS"),
        )
        .arg(
            Arg::new("DELAY")
                .help("Milliseconds between frames of --animate or --tui")
                .long("delay")
                .default_value("100")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("ALIVE")
                .help("How living cells are displayed")
                .long("alive"),
        )
        .arg(
            Arg::new("DEAD")
                .help("How dead cells are displayed")
                .long("dead"),
        )
        .arg(
            Arg::new("SAVE")
                .help("Saves the final grid as a plaintext pattern")
                .short('s')
                .long("save")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("NAME")
                .help("Pattern name written by --save")
                .short('n')
                .long("name")
                .requires("SAVE"),
        )
        .arg(
            Arg::new("COMMENT")
                .help("Comment line written by --save, may be repeated")
                .long("comment")
                .action(ArgAction::Append)
                .requires("SAVE"),
        )
        .arg(
            Arg::new("STATS")
                .help("Prints statistics at the end")
                .long("stats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("LIST_RULES")
                .help("Prints the names of all known rules and exits")
                .short('l')
                .long("list-rules")
                .action(ArgAction::SetTrue)
                .exclusive(true),
        )
        .arg(
            Arg::new("DUMP_CONFIG")
                .help("Prints the effective configuration as TOML and exits")
                .long("dump-config")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("VERBOSE")
                .help("Logs more, may be repeated")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count),
        );

    #[cfg(feature = "tui")]
    let cmd = cmd.arg(
        Arg::new("TUI")
            .help("Starts the interactive viewer")
            .long_help(
                "Starts the interactive viewer\n\
                 [space] play/pause, [n] or [→] step, [s] run until stable, \
                 [t] next rule, [r] back to the initial grid, [c] clear, [q] quit.\n",
            )
            .short('t')
            .long("tui")
            .action(ArgAction::SetTrue)
            .conflicts_with_all(["GENERATIONS", "UNTIL_STABLE", "DUMP_CONFIG"]),
    );

    cmd
}

impl Args {
    /// Parses the command-line arguments.
    pub(crate) fn parse() -> Result<Self, Error> {
        Args::parse_from(std::env::args_os())
    }

    /// Parses the given arguments. The first one is the program name.
    pub(crate) fn parse_from<I, T>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args)?;
        Args::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self, Error> {
        let mut config = match matches.get_one::<PathBuf>("CONFIG") {
            Some(path) => read_config(path)?,
            None => Config::default(),
        };

        if let Some(&width) = matches.get_one::<i64>("WIDTH") {
            config.width = width as isize;
        }
        if let Some(&height) = matches.get_one::<i64>("HEIGHT") {
            config.height = height as isize;
        }
        if let Some(rule) = matches.get_one::<String>("RULE") {
            config.rule = rule.clone();
        }
        if let Some(&preset) = matches.get_one::<Preset>("PRESET") {
            config.preset = Some(preset);
        }
        if let Some(pattern) = matches.get_one::<PathBuf>("PATTERN") {
            config.pattern = Some(pattern.clone());
        }
        if let Some(&offset) = matches.get_one::<(isize, isize)>("OFFSET") {
            config.offset = offset;
        }
        if let Some(&density) = matches.get_one::<f64>("RANDOM") {
            let seed = matches
                .get_one::<u64>("SEED")
                .copied()
                .or_else(|| config.random.map(|random| random.seed))
                .unwrap_or_default();
            config.random = Some(RandomFill { density, seed });
        }
        if let Some(&max) = matches.get_one::<usize>("MAX") {
            config.max_generations = max;
        }
        if let Some(&check_period) = matches.get_one::<u64>("CHECK_PERIOD") {
            config.check_period = check_period as usize;
        }
        if let Some(alive) = matches.get_one::<String>("ALIVE") {
            config.alive = alive.clone();
        }
        if let Some(dead) = matches.get_one::<String>("DEAD") {
            config.dead = dead.clone();
        }

        let generations = matches.get_one::<usize>("GENERATIONS").copied();
        if let Some(generations) = generations {
            if generations > lifesim_lib::MAX_GENERATIONS {
                return Err(Error::raw(
                    ErrorKind::ValueValidation,
                    format!(
                        "Cannot run {} generations, the maximum is {}\n",
                        generations,
                        lifesim_lib::MAX_GENERATIONS
                    ),
                ));
            }
        }

        let mode = if matches.get_flag("LIST_RULES") {
            Mode::ListRules
        } else if matches.get_flag("DUMP_CONFIG") {
            Mode::DumpConfig
        } else if matches.get_flag("UNTIL_STABLE") {
            Mode::UntilStable
        } else if let Some(generations) = generations {
            Mode::Run(generations)
        } else {
            Args::default_mode(matches)
        };

        Ok(Args {
            config,
            mode,
            history: matches.get_flag("HISTORY"),
            animate: matches.get_flag("ANIMATE"),
            delay: Duration::from_millis(matches.get_one::<u64>("DELAY").copied().unwrap_or(100)),
            save: matches.get_one::<PathBuf>("SAVE").cloned(),
            name: matches.get_one::<String>("NAME").cloned(),
            comments: matches
                .get_many::<String>("COMMENT")
                .map(|comments| comments.cloned().collect())
                .unwrap_or_default(),
            stats: matches.get_flag("STATS"),
            verbosity: matches.get_count("VERBOSE"),
        })
    }

    #[cfg(feature = "tui")]
    fn default_mode(matches: &ArgMatches) -> Mode {
        if matches.get_flag("TUI") {
            Mode::Tui
        } else {
            Mode::Show
        }
    }

    #[cfg(not(feature = "tui"))]
    fn default_mode(_matches: &ArgMatches) -> Mode {
        Mode::Show
    }
}
