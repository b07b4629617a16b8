use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{Print, PrintStyledContent, Stylize},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use lifesim_lib::{pattern::PatternCache, Config, RuleRegistry, Simulator, Stability};
use log::debug;
use std::{
    error::Error,
    io::{self, Stdout, Write},
    time::{Duration, Instant},
};

/// Clears the screen and moves the cursor to the top-left corner.
pub(crate) fn clear_screen<W: Write>(mut out: W) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Running,
    Paused,
    Stopped(Stability),
}

struct ViewerWindow<'a> {
    status: Status,
    config: &'a Config,
    stdout: Stdout,
}

impl<'a> ViewerWindow<'a> {
    fn new(config: &'a Config) -> io::Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, Hide)?;
        Ok(ViewerWindow {
            status: Status::Paused,
            config,
            stdout,
        })
    }

    fn update(&mut self, simulator: &Simulator) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let (cols, rows) = (cols as usize, rows as usize);
        let grid = simulator.grid();

        queue!(self.stdout, Clear(ClearType::All), MoveTo(0, 0))?;

        let top = format!(
            "Gen: {}  Cells: {}  Rule: {}",
            grid.generation(),
            grid.count_alive(),
            simulator.rule_name()
        );
        queue!(self.stdout, PrintStyledContent(pad(&top, cols).reverse()))?;

        let world_rows = rows.saturating_sub(2);
        for (y, row) in grid
            .render(&self.config.alive, &self.config.dead)
            .take(world_rows)
            .enumerate()
        {
            let row: String = row.chars().take(cols).collect();
            queue!(self.stdout, MoveTo(0, y as u16 + 1), Print(row))?;
        }

        let bottom = match self.status {
            Status::Running => "Running... [space] pause  [q] quit".to_string(),
            Status::Paused => {
                "Paused. [space] run  [n] step  [s] stable  [t] rule  [r] reset  [c] clear  [q] quit"
                    .to_string()
            }
            Status::Stopped(stability) => {
                format!("Stopped: {}. [r] reset  [c] clear  [q] quit", stability)
            }
        };
        queue!(
            self.stdout,
            MoveTo(0, rows.saturating_sub(1) as u16),
            PrintStyledContent(pad(&bottom, cols).reverse())
        )?;
        self.stdout.flush()
    }

    fn quit(&mut self) -> io::Result<()> {
        execute!(self.stdout, Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}

fn pad(text: &str, width: usize) -> String {
    let mut text: String = text.chars().take(width).collect();
    let len = text.chars().count();
    text.extend(std::iter::repeat(' ').take(width - len));
    text
}

fn step(simulator: &mut Simulator, status: &mut Status) {
    if simulator.step().count_alive() == 0 {
        *status = Status::Stopped(Stability::Extinction);
    }
}

/// Interactive viewer.
///
/// Keys: `space` runs or pauses, `n` or `→` steps once,
/// `s` runs until stable, `r` rebuilds the initial grid from the config,
/// `t` switches to the next registered rule, `c` clears the grid,
/// and `q` quits.
pub(crate) fn run_tui(
    simulator: &mut Simulator,
    registry: &RuleRegistry,
    config: &Config,
    cache: &mut PatternCache,
    delay: Duration,
) -> Result<(), Box<dyn Error>> {
    let mut window = ViewerWindow::new(config)?;
    debug!("Viewer started with {} rules available", registry.len());
    let mut last_tick = Instant::now();

    let result = (|| -> Result<(), Box<dyn Error>> {
        window.update(simulator)?;
        loop {
            let timeout = match window.status {
                Status::Running => delay.saturating_sub(last_tick.elapsed()),
                _ => Duration::from_secs(3600),
            };

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char(' ') | KeyCode::Enter => {
                            window.status = match window.status {
                                Status::Running => Status::Paused,
                                Status::Paused => Status::Running,
                                stopped => stopped,
                            };
                            last_tick = Instant::now();
                        }
                        KeyCode::Char('n') | KeyCode::Right
                            if window.status == Status::Paused =>
                        {
                            step(simulator, &mut window.status);
                        }
                        KeyCode::Char('s') if window.status == Status::Paused => {
                            let (_, stability) = simulator
                                .run_until_stable(Some(config.max_generations), config.check_period);
                            window.status = Status::Stopped(stability);
                        }
                        KeyCode::Char('r') => {
                            simulator.reset(Some(config.grid_with(cache)?));
                            window.status = Status::Paused;
                        }
                        KeyCode::Char('t') => {
                            let names = registry.list();
                            if !names.is_empty() {
                                let next = names
                                    .iter()
                                    .position(|&name| name == simulator.rule_name())
                                    .map_or(0, |i| (i + 1) % names.len());
                                simulator.set_rule(registry, names[next])?;
                            }
                        }
                        KeyCode::Char('c') => {
                            let mut grid = simulator.grid().copy();
                            grid.clear();
                            simulator.reset(Some(grid));
                            window.status = Status::Paused;
                        }
                        _ => continue,
                    },
                    Event::Resize(_, _) => (),
                    _ => continue,
                }
                window.update(simulator)?;
            } else if window.status == Status::Running {
                step(simulator, &mut window.status);
                last_tick = Instant::now();
                window.update(simulator)?;
            }
        }
        Ok(())
    })();

    window.quit()?;
    result
}
