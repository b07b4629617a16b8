//! Reading and writing pattern files.
//!
//! Three formats are supported:
//!
//! * [Plaintext](https://conwaylife.com/wiki/Plaintext): `O`, `*` or `1`
//!   marks a living cell, anything else is dead.
//! * Coordinate lists: one `row,col` or `(row,col)` per line.
//! * [RLE](https://conwaylife.com/wiki/Rle): `<count><tag>` runs,
//!   where the tag is `b` (dead), `o` (alive), `$` (end of line)
//!   or `!` (end of pattern).
//!
//! In all formats, lines starting with `#` are comments,
//! and a comment starting with `N ` names the pattern.

use crate::{
    cells::Coord,
    error::Error,
    grid::{Grid, MAX_DIMENSION},
};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

static COORDINATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(?\s*(\d+)\s*,\s*(\d+)\s*\)?").unwrap());

static RLE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d*)([bo$!])").unwrap());

/// Pattern file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Format {
    Plaintext,
    Coordinates,
    Rle,
}

impl Format {
    /// Guesses the format of a pattern file from its content.
    ///
    /// * RLE if it contains `x = ` (case-insensitive) or `#Life`;
    /// * otherwise a coordinate list if the first non-comment,
    ///   non-blank line looks like a coordinate;
    /// * otherwise plaintext.
    pub fn detect(content: &str) -> Self {
        if content.to_lowercase().contains("x = ") || content.contains("#Life") {
            return Format::Rle;
        }
        let first = content
            .lines()
            .filter(|line| !line.starts_with('#'))
            .map(str::trim)
            .find(|line| !line.is_empty());
        match first {
            Some(line) if COORDINATE.is_match(line) => Format::Coordinates,
            _ => Format::Plaintext,
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plaintext" | "cells" => Ok(Format::Plaintext),
            "coordinates" | "coords" => Ok(Format::Coordinates),
            "rle" => Ok(Format::Rle),
            _ => Err(format!("invalid pattern format: {}", s)),
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Format::Plaintext => "plaintext",
            Format::Coordinates => "coordinates",
            Format::Rle => "rle",
        };
        write!(f, "{}", s)
    }
}

/// A parsed pattern: a list of living cells plus its metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pattern {
    /// The name given by a `#N` comment.
    pub name: Option<String>,

    /// All other comments, without the leading `#`.
    pub comments: Vec<String>,

    /// Coordinates of living cells, relative to the top-left corner
    /// of the pattern.
    pub cells: Vec<Coord>,

    /// The format the pattern was read from.
    pub format: Format,
}

impl Pattern {
    fn empty(format: Format) -> Self {
        Pattern {
            name: None,
            comments: Vec::new(),
            cells: Vec::new(),
            format,
        }
    }

    /// Handles a comment line. Returns `false` if it is not a comment.
    fn comment(&mut self, line: &str) -> bool {
        match line.strip_prefix('#') {
            Some(comment) => {
                let comment = comment.trim();
                match comment.strip_prefix("N ") {
                    Some(name) => self.name = Some(name.trim().to_string()),
                    None => self.comments.push(comment.to_string()),
                }
                true
            }
            None => false,
        }
    }

    fn finish(self) -> Result<Self, Error> {
        if self.cells.is_empty() {
            return Err(Error::PatternParseError(format!(
                "no living cells found in {} pattern",
                self.format
            )));
        }
        info!(
            "Parsed {} pattern: {} ({} cells)",
            self.format,
            self.name.as_deref().unwrap_or("unnamed"),
            self.cells.len()
        );
        Ok(self)
    }

    /// Parses a pattern, detecting the format with [`Format::detect`].
    pub fn parse(content: &str) -> Result<Self, Error> {
        Pattern::parse_as(content, Format::detect(content))
    }

    /// Parses a pattern in the given format.
    pub fn parse_as(content: &str, format: Format) -> Result<Self, Error> {
        match format {
            Format::Plaintext => Pattern::parse_plaintext(content),
            Format::Coordinates => Pattern::parse_coordinates(content),
            Format::Rle => Pattern::parse_rle(content),
        }
    }

    /// Parses a plaintext pattern.
    ///
    /// Comment lines do not count as rows.
    pub fn parse_plaintext(content: &str) -> Result<Self, Error> {
        let mut pattern = Pattern::empty(Format::Plaintext);
        let mut row = 0;
        for line in content.lines() {
            let line = line.trim_end();
            if pattern.comment(line) {
                continue;
            }
            for (col, c) in line.chars().enumerate() {
                if matches!(c, 'O' | '*' | '1') {
                    pattern.cells.push((row, col as isize));
                }
            }
            row += 1;
        }
        pattern.finish()
    }

    /// Parses a coordinate list.
    ///
    /// Lines that are not coordinates are skipped.
    pub fn parse_coordinates(content: &str) -> Result<Self, Error> {
        let mut pattern = Pattern::empty(Format::Coordinates);
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || pattern.comment(line) {
                continue;
            }
            let coord = COORDINATE.captures(line).and_then(|caps| {
                let row = caps[1].parse().ok()?;
                let col = caps[2].parse().ok()?;
                Some((row, col))
            });
            match coord {
                Some(coord) => pattern.cells.push(coord),
                None => warn!("Invalid coordinate line: {}", line),
            }
        }
        pattern.finish()
    }

    /// Parses an RLE pattern.
    ///
    /// The header line (starting with `x`) is skipped,
    /// and so are characters that are not part of a run.
    /// Runs reaching beyond [`MAX_DIMENSION`] rows or columns are rejected.
    pub fn parse_rle(content: &str) -> Result<Self, Error> {
        let mut pattern = Pattern::empty(Format::Rle);
        let (mut row, mut col) = (0, 0);
        'lines: for line in content.lines() {
            let line = line.trim();
            if pattern.comment(line) || line.starts_with('x') || line.is_empty() {
                continue;
            }
            for caps in RLE_RUN.captures_iter(line) {
                let count = match &caps[1] {
                    "" => 1,
                    digits => digits.parse::<isize>().map_err(|_| {
                        Error::PatternParseError(format!("run count too large: {}", digits))
                    })?,
                };
                match &caps[2] {
                    "b" => col = run_end(col, count)?,
                    "o" => {
                        let end = run_end(col, count)?;
                        pattern.cells.extend((col..end).map(|c| (row, c)));
                        col = end;
                    }
                    "$" => {
                        row = run_end(row, count)?;
                        col = 0;
                    }
                    _ => break 'lines,
                }
            }
        }
        pattern.finish()
    }

    /// Reads and parses a pattern file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::FileHandlingError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let pattern = Pattern::parse(&content)?;
        debug!("Loaded pattern from {}", path.display());
        Ok(pattern)
    }
}

/// Where a run of `count` cells starting at `start` ends.
///
/// No grid is larger than [`MAX_DIMENSION`], so neither is an RLE pattern.
fn run_end(start: isize, count: isize) -> Result<isize, Error> {
    start
        .checked_add(count)
        .filter(|&end| end <= MAX_DIMENSION)
        .ok_or_else(|| {
            Error::PatternParseError(format!(
                "run of {} cells at {} goes beyond {}",
                count, start, MAX_DIMENSION
            ))
        })
}

/// Serializes a grid as a plaintext pattern.
///
/// The output starts with an optional `#N` name line, the comments,
/// the generation and the number of living cells, followed by the cells,
/// one line per row, `O` for living cells and `.` for dead cells.
pub fn write_pattern<S: AsRef<str>>(grid: &Grid, name: Option<&str>, comments: &[S]) -> String {
    let mut str = String::new();
    if let Some(name) = name {
        str.push_str(&format!("#N {}\n", name));
    }
    for comment in comments {
        str.push_str(&format!("# {}\n", comment.as_ref()));
    }
    str.push_str(&format!("# Generation: {}\n", grid.generation()));
    str.push_str(&format!("# Alive cells: {}\n", grid.count_alive()));
    str.push_str("#\n");
    for row in grid.render("O", ".") {
        str.push_str(&row);
        str.push('\n');
    }
    str
}

/// Saves a grid to a file with [`write_pattern`].
pub fn save_pattern<P: AsRef<Path>, S: AsRef<str>>(
    path: P,
    grid: &Grid,
    name: Option<&str>,
    comments: &[S],
) -> Result<(), Error> {
    let path = path.as_ref();
    fs::write(path, write_pattern(grid, name, comments)).map_err(|e| {
        Error::FileHandlingError {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    })?;
    info!("Saved pattern to {}", path.display());
    Ok(())
}

/// Remembers patterns already loaded from files.
///
/// A file is read at most once per cache.
#[derive(Clone, Debug, Default)]
pub struct PatternCache {
    patterns: HashMap<PathBuf, Pattern>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a pattern file, or returns the cached copy.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<&Pattern, Error> {
        let path = path.as_ref();
        if self.patterns.contains_key(path) {
            debug!("Retrieved cached pattern: {}", path.display());
        } else {
            let pattern = Pattern::load(path)?;
            self.patterns.insert(path.to_path_buf(), pattern);
        }
        Ok(&self.patterns[path])
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn clear(&mut self) {
        self.patterns.clear();
    }
}
