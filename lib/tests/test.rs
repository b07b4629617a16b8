use lifesim_lib::{
    pattern::{save_pattern, write_pattern, PatternCache},
    rules::{FnRule, LifeLike, Rule},
    Config, Error, Format, Grid, Pattern, Preset, RandomFill, RuleRegistry, Simulator, Stability,
    State, ALIVE, BUILTIN_RULES, DEAD, MAX_GENERATIONS,
};
use std::{env, error::Error as StdError, fs};

type TestResult = Result<(), Box<dyn StdError>>;

fn grid_with(width: isize, height: isize, cells: &[(isize, isize)]) -> Result<Grid, Error> {
    let mut grid = Grid::new(width, height)?;
    for &(row, col) in cells {
        grid.set(row, col, ALIVE)?;
    }
    Ok(grid)
}

fn blinker() -> Result<Grid, Error> {
    grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)])
}

fn block() -> Result<Grid, Error> {
    grid_with(4, 4, &[(1, 1), (1, 2), (2, 1), (2, 2)])
}

#[test]
fn dimensions() -> TestResult {
    assert_eq!(
        Grid::new(0, 5),
        Err(Error::DimensionError {
            width: 0,
            height: 5
        })
    );
    assert!(Grid::new(1001, 1).is_err());
    assert!(Grid::new(3, -1).is_err());
    let grid = Grid::new(1000, 1000)?;
    assert_eq!(grid.size(), 1_000_000);
    assert_eq!(grid.generation(), 0);
    assert_eq!(grid.count_alive(), 0);
    Ok(())
}

#[test]
fn set_and_get() -> TestResult {
    let mut grid = Grid::new(5, 5)?;
    grid.set(1, 2, ALIVE)?;
    assert_eq!(grid.get(1, 2), ALIVE);
    assert_eq!(grid.get(2, 1), DEAD);
    assert_eq!(grid.get(-1, -1), DEAD);
    assert_eq!(grid.get(5, 0), DEAD);
    assert_eq!(grid.set(5, 0, ALIVE), Err(Error::OutOfBounds((5, 0))));
    assert_eq!(grid.set(0, 0, State(2)), Err(Error::InvalidValue(State(2))));
    assert_eq!(grid.set(-1, 0, State(2)), Err(Error::OutOfBounds((-1, 0))));
    assert_eq!(grid.count_alive(), 1);
    Ok(())
}

#[test]
fn neighbors() -> TestResult {
    let grid = block()?;
    assert_eq!(grid.count_live_neighbors(1, 1), 3);
    assert_eq!(grid.count_live_neighbors(0, 0), 1);
    assert_eq!(grid.count_live_neighbors(0, 1), 2);
    assert_eq!(grid.count_live_neighbors(3, 3), 1);
    assert_eq!(grid.count_live_neighbors(-1, -1), 0);
    Ok(())
}

#[test]
fn neighbors_far_away() -> TestResult {
    let grid = block()?;
    assert_eq!(grid.count_live_neighbors(isize::MAX, isize::MAX), 0);
    assert_eq!(grid.count_live_neighbors(isize::MIN, 0), 0);
    assert_eq!(grid.count_live_neighbors(0, isize::MIN), 0);
    assert_eq!(grid.get(isize::MIN, isize::MAX), DEAD);
    Ok(())
}

#[test]
fn compact_cells() {
    assert_eq!(std::mem::size_of::<State>(), 1);
}

#[test]
fn copy_and_clear() -> TestResult {
    let mut simulator = Simulator::standard(blinker()?);
    simulator.step();
    let mut grid = simulator.grid().copy();
    assert_eq!(grid.generation(), 1);
    grid.clear();
    assert_eq!(grid.count_alive(), 0);
    assert_eq!(grid.generation(), 0);
    assert_eq!(simulator.grid().count_alive(), 3);
    Ok(())
}

#[test]
fn display_grid() -> TestResult {
    let grid = blinker()?;
    assert_eq!(
        grid.to_string(),
        String::from(
            ".....\n\
             .....\n\
             .OOO.\n\
             .....\n\
             ....."
        )
    );
    let rows: Vec<String> = grid.render("#", " ").collect();
    assert_eq!(rows[2], " ### ");
    assert_eq!(
        grid.alive_cells().collect::<Vec<_>>(),
        vec![(2, 1), (2, 2), (2, 3)]
    );
    Ok(())
}

#[test]
fn randomize() -> TestResult {
    let mut a = Grid::new(30, 30)?;
    let mut b = Grid::new(30, 30)?;
    a.randomize(0.5, 42);
    b.randomize(0.5, 42);
    assert_eq!(a, b);
    assert!(a.count_alive() > 0 && a.count_alive() < a.size());
    a.randomize(0.0, 1);
    assert_eq!(a.count_alive(), 0);
    a.randomize(1.0, 1);
    assert_eq!(a.count_alive(), a.size());
    Ok(())
}

#[test]
fn life_like_rules() -> TestResult {
    let standard = LifeLike::standard();
    assert_eq!(standard.next_state(DEAD, 3), ALIVE);
    assert_eq!(standard.next_state(DEAD, 6), DEAD);
    assert_eq!(standard.next_state(ALIVE, 2), ALIVE);
    assert_eq!(standard.next_state(ALIVE, 4), DEAD);

    let high_life = LifeLike::high_life();
    assert_eq!(high_life.next_state(DEAD, 6), ALIVE);
    assert_eq!(high_life.next_state(ALIVE, 6), DEAD);

    let day_and_night = LifeLike::day_and_night();
    assert_eq!(day_and_night.next_state(ALIVE, 2), DEAD);
    assert_eq!(day_and_night.next_state(ALIVE, 8), ALIVE);
    assert_eq!(day_and_night.next_state(DEAD, 7), ALIVE);
    Ok(())
}

#[test]
fn rule_strings() -> TestResult {
    assert_eq!("B3/S23".parse::<LifeLike>()?, LifeLike::standard());
    assert_eq!("B36/S23".parse::<LifeLike>()?, LifeLike::high_life());
    assert_eq!(
        "B3678/S34678".parse::<LifeLike>()?,
        LifeLike::day_and_night()
    );
    assert_eq!(LifeLike::high_life().to_string(), "B36/S23");
    assert!(matches!(
        "foo".parse::<LifeLike>(),
        Err(Error::ParseRuleError(_))
    ));
    Ok(())
}

#[test]
fn evolve_blinker() -> TestResult {
    let grid = blinker()?;
    let next = LifeLike::standard().evolve(&grid);
    assert_eq!(next.generation(), 1);
    assert_eq!(
        next.alive_cells().collect::<Vec<_>>(),
        vec![(1, 2), (2, 2), (3, 2)]
    );
    assert_eq!(grid.generation(), 0);
    assert_eq!(grid.count_alive(), 3);
    let again = LifeLike::standard().evolve(&next);
    assert!(again.same_cells(&grid));
    assert_ne!(again, grid);
    Ok(())
}

#[test]
fn builtin_registry() -> TestResult {
    let registry = RuleRegistry::with_builtins();
    assert_eq!(registry.list(), BUILTIN_RULES.to_vec());
    assert!(RuleRegistry::new().is_empty());
    assert_eq!(
        registry.get("nope").err(),
        Some(Error::RuleNotFound {
            name: String::from("nope"),
            known: BUILTIN_RULES.iter().map(|s| s.to_string()).collect(),
        })
    );
    let high_life = registry.get("highlife")?;
    let grid = grid_with(5, 5, &[(1, 1), (1, 2), (1, 3), (3, 1), (3, 2), (3, 3)])?;
    assert_eq!(high_life.evolve(&grid).get(2, 2), ALIVE);
    Ok(())
}

#[test]
fn registry_overwrite() -> TestResult {
    let mut registry = RuleRegistry::with_builtins();
    registry.register_fn("standard", |grid: &Grid| grid.next_generation());
    registry.register("custom", FnRule(|grid: &Grid| grid.copy()));
    assert_eq!(
        registry.list(),
        vec!["standard", "highlife", "day_and_night", "custom"]
    );

    let mut simulator = Simulator::new(block()?, &registry, "standard")?;
    assert_eq!(simulator.step().count_alive(), 0);
    Ok(())
}

#[test]
fn registry_rule_string() -> TestResult {
    let mut registry = RuleRegistry::new();
    registry.register_rule_string("seeds", "B2/S")?;
    assert!(registry.contains("seeds"));
    assert!(registry.register_rule_string("bad", "xyz").is_err());
    assert!(!registry.contains("bad"));

    let grid = grid_with(4, 4, &[(1, 1), (1, 2)])?;
    let mut simulator = Simulator::new(grid, &registry, "seeds")?;
    let next = simulator.step();
    assert_eq!(
        next.alive_cells().collect::<Vec<_>>(),
        vec![(0, 1), (0, 2), (2, 1), (2, 2)]
    );
    Ok(())
}

#[test]
fn oscillator() -> TestResult {
    let mut simulator = Simulator::standard(blinker()?);
    let (grid, stability) = simulator.run_until_stable(None, 1);
    assert_eq!(stability, Stability::Oscillator(2));
    assert_eq!(grid.generation(), 3);
    assert_eq!(stability.to_string(), "oscillator_period_2");
    Ok(())
}

#[test]
fn sparse_check_period() -> TestResult {
    let mut simulator = Simulator::standard(blinker()?);
    let (_, stability) = simulator.run_until_stable(None, 2);
    assert_eq!(stability, Stability::Oscillator(1));

    let mut simulator = Simulator::standard(blinker()?);
    let (_, stability) = simulator.run_until_stable(None, 0);
    assert_eq!(stability, Stability::Oscillator(2));
    Ok(())
}

#[test]
fn still_life() -> TestResult {
    let mut simulator = Simulator::standard(block()?);
    let (grid, stability) = simulator.run_until_stable(None, 1);
    assert_eq!(stability, Stability::StillLife);
    assert_eq!(grid.generation(), 1);
    assert_eq!(stability.to_string(), "still_life");
    Ok(())
}

#[test]
fn extinction() -> TestResult {
    let mut simulator = Simulator::standard(grid_with(5, 5, &[(2, 2)])?);
    let (grid, stability) = simulator.run_until_stable(None, 1);
    assert_eq!(stability, Stability::Extinction);
    assert_eq!(grid.generation(), 1);
    assert_eq!(stability.to_string(), "extinction");
    Ok(())
}

/// Moves every living cell one column to the right, wrapping around.
fn cycling_rule(width: isize) -> impl Fn(&Grid) -> Grid + Send + Sync + 'static {
    move |grid: &Grid| {
        let mut next = grid.next_generation();
        for (row, col) in grid.alive_cells() {
            next.set(row, (col + 1) % width, ALIVE).unwrap();
        }
        next
    }
}

#[test]
fn oscillation_window() -> TestResult {
    let mut registry = RuleRegistry::new();
    registry.register_fn("cycle_100", cycling_rule(100));
    registry.register_fn("cycle_101", cycling_rule(101));

    let grid = grid_with(100, 1, &[(0, 0)])?;
    let mut simulator = Simulator::new(grid, &registry, "cycle_100")?;
    let (grid, stability) = simulator.run_until_stable(None, 1);
    assert_eq!(stability, Stability::Oscillator(100));
    assert_eq!(grid.generation(), 101);

    let grid = grid_with(101, 1, &[(0, 0)])?;
    let mut simulator = Simulator::new(grid, &registry, "cycle_101")?;
    let (grid, stability) = simulator.run_until_stable(Some(1000), 1);
    assert_eq!(stability, Stability::MaxGenerationsReached);
    assert_eq!(grid.generation(), 1000);
    Ok(())
}

#[test]
fn max_generations_reached() -> TestResult {
    let mut grid = Grid::new(20, 20)?;
    grid.load_pattern(&Preset::Glider.pattern(), 0, 0);
    let mut simulator = Simulator::standard(grid);
    let (grid, stability) = simulator.run_until_stable(Some(5), 1);
    assert_eq!(stability, Stability::MaxGenerationsReached);
    assert_eq!(grid.generation(), 5);
    assert_eq!(stability.to_string(), "max_generations_reached");
    Ok(())
}

#[test]
fn run_limit() -> TestResult {
    let mut simulator = Simulator::standard(block()?);
    assert_eq!(
        simulator.run(MAX_GENERATIONS + 1).err(),
        Some(Error::OverflowError {
            requested: 10001,
            max: 10000
        })
    );
    assert_eq!(simulator.grid().generation(), 0);
    assert_eq!(simulator.run(MAX_GENERATIONS)?.generation(), 10000);
    assert_eq!(simulator.grid().count_alive(), 4);
    Ok(())
}

#[test]
fn run_stops_at_extinction() -> TestResult {
    let mut simulator = Simulator::standard(grid_with(5, 5, &[(2, 2)])?);
    let grid = simulator.run_with(10, true, |_, _| ())?;
    assert_eq!(grid.generation(), 1);
    assert_eq!(simulator.history().len(), 2);
    Ok(())
}

#[test]
fn run_callback_and_history() -> TestResult {
    let mut simulator = Simulator::standard(blinker()?);
    let mut seen = Vec::new();
    simulator.run_with(4, true, |grid, steps| {
        seen.push((steps, grid.generation(), grid.count_alive()))
    })?;
    assert_eq!(seen, vec![(1, 1, 3), (2, 2, 3), (3, 3, 3), (4, 4, 3)]);

    let history = simulator.history();
    assert_eq!(history.len(), 5);
    assert_eq!(history[0].generation(), 0);
    assert!(history[0].same_cells(&history[2]));
    assert!(history[1].same_cells(&history[3]));

    simulator.run(2)?;
    assert_eq!(simulator.history().len(), 5);
    simulator.run_with(1, true, |_, _| ())?;
    assert_eq!(simulator.history().len(), 2);
    assert_eq!(simulator.history()[0].generation(), 6);

    simulator.reset(None);
    assert!(simulator.history().is_empty());
    assert_eq!(simulator.grid().generation(), 7);
    simulator.reset(Some(blinker()?));
    assert_eq!(simulator.grid().generation(), 0);
    Ok(())
}

#[test]
fn statistics() -> TestResult {
    let mut grid = Grid::new(10, 10)?;
    grid.load_pattern(&Preset::Block.pattern(), 3, 3);
    let mut simulator = Simulator::standard(grid);
    simulator.step();
    let stats = simulator.statistics();
    assert_eq!(stats.generation, 1);
    assert_eq!(stats.alive_cells, 4);
    assert_eq!(stats.dead_cells, 96);
    assert!((stats.density - 0.04).abs() < 1e-12);
    assert_eq!(stats.rule, "standard");
    assert_eq!(stats.board_size, "10x10");
    assert!(stats.to_string().contains("density: 0.0400"));
    Ok(())
}

#[test]
fn switch_rule() -> TestResult {
    let registry = RuleRegistry::with_builtins();
    let mut simulator = Simulator::new(blinker()?, &registry, "standard")?;
    simulator.set_rule(&registry, "day_and_night")?;
    assert_eq!(simulator.rule_name(), "day_and_night");
    assert!(simulator.set_rule(&registry, "nope").is_err());
    assert_eq!(simulator.rule_name(), "day_and_night");
    assert_eq!(
        simulator.step().alive_cells().collect::<Vec<_>>(),
        vec![(1, 2), (3, 2)]
    );
    Ok(())
}

#[test]
fn plaintext() -> TestResult {
    let pattern = Pattern::parse(
        "#N Glider\n\
         #C A small spaceship\n\
         .O.\n\
         ..O\n\
         OOO\n",
    )?;
    assert_eq!(pattern.format, Format::Plaintext);
    assert_eq!(pattern.name.as_deref(), Some("Glider"));
    assert_eq!(pattern.comments, vec!["C A small spaceship"]);
    assert_eq!(pattern.cells, vec![(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);

    let pattern = Pattern::parse_plaintext("*.1\n")?;
    assert_eq!(pattern.cells, vec![(0, 0), (0, 2)]);
    Ok(())
}

#[test]
fn coordinates() -> TestResult {
    let content = "# a comment\n(1, 2)\n3,4\nnot a cell\n 5 , 6 \n";
    assert_eq!(Format::detect(content), Format::Coordinates);
    let pattern = Pattern::parse(content)?;
    assert_eq!(pattern.cells, vec![(1, 2), (3, 4), (5, 6)]);
    assert_eq!(pattern.comments, vec!["a comment"]);
    Ok(())
}

#[test]
fn rle() -> TestResult {
    let pattern = Pattern::parse_rle("2o$2o!")?;
    assert_eq!(pattern.cells, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);

    let content = "#N Glider\nx = 3, y = 3, rule = B3/S23\nbo$2bo$3o!\n3o!";
    assert_eq!(Format::detect(content), Format::Rle);
    let pattern = Pattern::parse(content)?;
    assert_eq!(pattern.format, Format::Rle);
    assert_eq!(pattern.name.as_deref(), Some("Glider"));
    assert_eq!(pattern.cells, Preset::Glider.cells().to_vec());

    let pattern = Pattern::parse_as("o2$o!", Format::Rle)?;
    assert_eq!(pattern.cells, vec![(0, 0), (2, 0)]);
    Ok(())
}

#[test]
fn rle_runs_out_of_range() -> TestResult {
    for content in [
        "9223372036854775807b2o!",
        "4611686018427387904o!",
        "99999999999o!",
        "99999999999999999999999o!",
        "1001o!",
        "999b2o!",
        "1001$o!",
    ] {
        assert!(
            matches!(Pattern::parse_rle(content), Err(Error::PatternParseError(_))),
            "{}",
            content
        );
    }
    let pattern = Pattern::parse_rle("998b2o!")?;
    assert_eq!(pattern.cells, vec![(0, 998), (0, 999)]);
    assert_eq!(Pattern::parse_rle("1000o!")?.cells.len(), 1000);
    Ok(())
}

#[test]
fn empty_patterns() {
    for format in [Format::Plaintext, Format::Coordinates, Format::Rle] {
        assert!(matches!(
            Pattern::parse_as("#N nothing\n", format),
            Err(Error::PatternParseError(_))
        ));
    }
    assert!(Pattern::parse("...\n...\n").is_err());
}

#[test]
fn formats() -> TestResult {
    assert_eq!("cells".parse::<Format>()?, Format::Plaintext);
    assert_eq!("coords".parse::<Format>()?, Format::Coordinates);
    assert_eq!("rle".parse::<Format>()?, Format::Rle);
    assert!("mc".parse::<Format>().is_err());
    assert_eq!(Format::Coordinates.to_string(), "coordinates");
    Ok(())
}

#[test]
fn load_pattern_offsets() -> TestResult {
    let pattern = Pattern::parse_rle("3o!")?;
    let mut grid = Grid::new(5, 5)?;
    assert_eq!(grid.load_pattern(&pattern, 1, 3), 1);
    assert_eq!(grid.alive_cells().collect::<Vec<_>>(), vec![(1, 3), (1, 4)]);
    assert_eq!(grid.load_pattern(&pattern, 4, -1), 1);
    assert_eq!(grid.count_alive(), 4);
    Ok(())
}

#[test]
fn load_pattern_far_away() -> TestResult {
    let pattern = Pattern::parse("9223372036854775807,0\n0,0\n")?;
    assert_eq!(pattern.format, Format::Coordinates);
    let mut grid = Grid::new(5, 5)?;
    assert_eq!(grid.load_pattern(&pattern, 1, 0), 1);
    assert_eq!(grid.alive_cells().collect::<Vec<_>>(), vec![(1, 0)]);

    let pattern = Pattern::parse_rle("2o!")?;
    assert_eq!(grid.load_pattern(&pattern, isize::MIN, isize::MAX), 2);
    assert_eq!(grid.count_alive(), 1);
    Ok(())
}

#[test]
fn write_and_parse() -> TestResult {
    let mut grid = Grid::new(6, 4)?;
    grid.load_pattern(&Preset::Glider.pattern(), 1, 1);
    let content = write_pattern(&grid, Some("glider"), &["made by a test"]);
    assert_eq!(
        content,
        String::from(
            "#N glider\n\
             # made by a test\n\
             # Generation: 0\n\
             # Alive cells: 5\n\
             #\n\
             ......\n\
             ..O...\n\
             ...O..\n\
             .OOO..\n"
        )
    );

    let pattern = Pattern::parse(&content)?;
    assert_eq!(pattern.format, Format::Plaintext);
    assert_eq!(pattern.name.as_deref(), Some("glider"));
    let mut loaded = Grid::new(6, 4)?;
    loaded.load_pattern(&pattern, 0, 0);
    assert_eq!(loaded, grid);
    Ok(())
}

#[test]
fn save_and_load() -> TestResult {
    let dir = env::temp_dir().join(format!("lifesim-test-{}", std::process::id()));
    fs::create_dir_all(&dir)?;
    let path = dir.join("blinker.cells");

    save_pattern(&path, &blinker()?, None, &[] as &[&str])?;
    let pattern = Pattern::load(&path)?;
    assert_eq!(pattern.name, None);
    assert_eq!(pattern.cells, vec![(2, 1), (2, 2), (2, 3)]);

    let mut cache = PatternCache::new();
    assert_eq!(cache.load(&path)?.cells.len(), 3);
    fs::remove_file(&path)?;
    assert_eq!(cache.load(&path)?.cells.len(), 3);
    assert_eq!(cache.len(), 1);
    cache.clear();
    assert!(matches!(
        cache.load(&path),
        Err(Error::FileHandlingError { .. })
    ));

    assert!(matches!(
        save_pattern(dir.join("missing").join("x.cells"), &blinker()?, None, &[] as &[&str]),
        Err(Error::FileHandlingError { .. })
    ));
    fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
fn presets() -> TestResult {
    let mut grid = Grid::new(5, 5)?;
    assert_eq!(Preset::Blinker.place(&mut grid), 0);
    assert_eq!(
        grid.alive_cells().collect::<Vec<_>>(),
        vec![(2, 2), (2, 3), (2, 4)]
    );

    let mut grid = Grid::new(10, 10)?;
    assert!(Preset::Pulsar.place(&mut grid) > 0);

    assert_eq!("GLIDER".parse::<Preset>()?, Preset::Glider);
    assert!("spaceship".parse::<Preset>().is_err());
    for preset in Preset::ALL.iter() {
        assert_eq!(preset.to_string().parse::<Preset>()?, *preset);
    }
    assert_eq!(Preset::Pulsar.cells().len(), 48);
    Ok(())
}

#[test]
fn preset_periods() -> TestResult {
    let periods = [
        (Preset::Blinker, Stability::Oscillator(2)),
        (Preset::Toad, Stability::Oscillator(2)),
        (Preset::Beacon, Stability::Oscillator(2)),
        (Preset::Pulsar, Stability::Oscillator(3)),
        (Preset::Block, Stability::StillLife),
    ];
    for &(preset, expected) in periods.iter() {
        let mut grid = Grid::new(30, 30)?;
        grid.load_pattern(&preset.pattern(), 8, 8);
        let mut simulator = Simulator::standard(grid);
        let (_, stability) = simulator.run_until_stable(None, 1);
        assert_eq!(stability, expected, "{}", preset);
    }
    Ok(())
}

#[test]
fn default_config() -> TestResult {
    let config = Config::default();
    assert_eq!((config.width, config.height), (40, 20));
    assert_eq!(config.rule, "standard");
    assert_eq!(config.check_period, 1);
    assert_eq!(config.max_generations, MAX_GENERATIONS);
    assert_eq!(config.grid()?.count_alive(), 0);
    Ok(())
}

#[test]
fn config_simulator() -> TestResult {
    let registry = RuleRegistry::with_builtins();
    let config = Config::new(10, 10).set_preset(Preset::Block);
    let mut simulator = config.simulator(&registry)?;
    assert_eq!(
        simulator.run_until_stable(None, config.check_period).1,
        Stability::StillLife
    );

    let config = Config::new(10, 10).set_rule("nope");
    assert!(matches!(
        config.simulator(&registry),
        Err(Error::RuleNotFound { .. })
    ));

    let config = Config::new(0, 10);
    assert!(matches!(
        config.simulator(&registry),
        Err(Error::DimensionError { .. })
    ));

    let config = Config::new(10, 10).set_pattern(env::temp_dir().join("lifesim-missing.rle"), (0, 0));
    assert!(matches!(
        config.grid(),
        Err(Error::FileHandlingError { .. })
    ));
    Ok(())
}

#[test]
fn config_pattern_cache() -> TestResult {
    let dir = env::temp_dir().join(format!("lifesim-cache-{}", std::process::id()));
    fs::create_dir_all(&dir)?;
    let path = dir.join("block.rle");
    fs::write(&path, "x = 2, y = 2\n2o$2o!\n")?;

    let config = Config::new(6, 6).set_pattern(path.clone(), (2, 2));
    let registry = RuleRegistry::with_builtins();
    let mut cache = PatternCache::new();
    let first = config.simulator_with(&registry, &mut cache)?.grid().copy();
    assert_eq!(
        first.alive_cells().collect::<Vec<_>>(),
        vec![(2, 2), (2, 3), (3, 2), (3, 3)]
    );

    fs::remove_file(&path)?;
    assert_eq!(config.grid_with(&mut cache)?, first);
    assert_eq!(cache.len(), 1);
    assert!(matches!(
        config.grid(),
        Err(Error::FileHandlingError { .. })
    ));
    fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
fn config_random() -> TestResult {
    let random = RandomFill {
        density: 0.5,
        seed: 7,
    };
    let config = Config::new(20, 20).set_random(random);
    assert_eq!(config.grid()?, config.grid()?);
    assert!(config.grid()?.count_alive() > 0);
    assert_eq!(RandomFill::default().density, 0.3);
    Ok(())
}
