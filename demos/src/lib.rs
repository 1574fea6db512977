//! Terminal presentation layer for the gridstar search.
//!
//! Builds a grid the way an interactive session would (start, end, then
//! barriers), maps cell tags to glyphs, and renders search progress frame
//! by frame through a [`StepObserver`].

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use gridstar_core::{Cell, CellStatus, Coord, Editor, Grid, GridConfig, Paint};
use gridstar_paths::{Manhattan, SearchOutcome, Step, StepObserver, search, solve};
use rand::Rng;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Settings for one visualizer run, read from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub grid: GridConfig,
    /// Chance of each free cell becoming a barrier.
    pub barrier_density: f64,
    /// Seed for barrier placement; random when absent.
    pub seed: Option<u64>,
    /// Defaults to the top-left corner.
    pub start: Option<Coord>,
    /// Defaults to the bottom-right corner.
    pub end: Option<Coord>,
    /// Print a frame after every expansion.
    pub animate: bool,
    /// Cancel the search after this many expansions.
    pub max_steps: Option<usize>,
    pub log_level: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::with_dimension(20),
            barrier_density: 0.25,
            seed: None,
            start: None,
            end: None,
            animate: false,
            max_steps: None,
            log_level: "info".to_string(),
        }
    }
}

impl DemoConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("malformed visualizer config")?;
        config.grid.validate()?;
        anyhow::ensure!(
            (0.0..=1.0).contains(&config.barrier_density),
            "barrier_density must be within 0..=1, got {}",
            config.barrier_density
        );
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("loading {}", path.display()))
    }

    /// Start and end, falling back to opposite corners.
    pub fn endpoints(&self) -> (Coord, Coord) {
        let last = self.grid.dimension.saturating_sub(1) as i32;
        (
            self.start.unwrap_or(Coord::ZERO),
            self.end.unwrap_or(Coord::new(last, last)),
        )
    }
}

// ---------------------------------------------------------------------------
// Grid setup
// ---------------------------------------------------------------------------

/// Paint the endpoints, then scatter barriers over the remaining cells.
///
/// A start equal to the end occupies a single cell, which the editor holds
/// as the start only.
pub fn build_editor(config: &DemoConfig, rng: &mut impl Rng) -> Result<Editor> {
    let mut editor = Editor::new(config.grid)?;
    let (start, end) = config.endpoints();
    let placed = editor.paint(start).context("placing start")?;
    anyhow::ensure!(placed == Paint::Start, "start {start} could not be placed");
    if end != start {
        let placed = editor.paint(end).context("placing end")?;
        anyhow::ensure!(placed == Paint::End, "end {end} could not be placed");
    }

    let dim = config.grid.dimension as i32;
    for row in 0..dim {
        for col in 0..dim {
            let c = Coord::new(row, col);
            if c != start && c != end && rng.random_bool(config.barrier_density) {
                editor.grid_mut().set_barrier(c)?;
            }
        }
    }
    log::info!(
        "{0}x{0} grid, {1} barriers, {start} -> {end}",
        dim,
        editor.barriers()
    );
    Ok(editor)
}

/// Search between the configured endpoints with the Manhattan heuristic,
/// clearing the tags of any previous run first.
pub fn run_search<O>(config: &DemoConfig, editor: &mut Editor, observer: &mut O) -> Result<SearchOutcome>
where
    O: StepObserver + ?Sized,
{
    let (start, end) = config.endpoints();
    if start != end {
        return Ok(solve(editor, Manhattan, observer)?);
    }
    editor.grid_mut().reset_visits();
    Ok(search(editor.grid_mut(), start, end, Manhattan, observer)?)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Glyph drawn for a cell tag.
pub const fn glyph(status: CellStatus) -> char {
    match status {
        CellStatus::Unvisited => '.',
        CellStatus::Barrier => '#',
        CellStatus::Start => 'S',
        CellStatus::End => 'E',
        CellStatus::Open => 'o',
        CellStatus::Closed => 'x',
        CellStatus::Path => '*',
    }
}

/// One line per row, one glyph per cell.
pub fn render(grid: &Grid) -> String {
    let mut out = String::with_capacity(grid.len() + grid.dim());
    for row in grid.rows() {
        out.extend(row.iter().map(|cell: &Cell| glyph(cell.status)));
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Progress observer
// ---------------------------------------------------------------------------

/// Observer that optionally draws every expansion and cancels the search
/// once a step budget is spent.
pub struct Progress<W: Write> {
    out: W,
    animate: bool,
    budget: Option<usize>,
    steps: usize,
    write_error: Option<std::io::Error>,
}

impl<W: Write> Progress<W> {
    pub fn new(out: W, animate: bool, budget: Option<usize>) -> Self {
        Self {
            out,
            animate,
            budget,
            steps: 0,
            write_error: None,
        }
    }

    /// Expansions seen so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Hand back the writer, or the first error hit while drawing.
    pub fn finish(self) -> std::io::Result<W> {
        match self.write_error {
            Some(err) => Err(err),
            None => Ok(self.out),
        }
    }

    fn draw(&mut self, current: Coord, grid: &Grid) -> std::io::Result<()> {
        writeln!(self.out, "step {} at {current}", self.steps)?;
        self.out.write_all(render(grid).as_bytes())?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> StepObserver for Progress<W> {
    fn on_step(&mut self, current: Coord, grid: &Grid) -> Step {
        self.steps += 1;
        if self.animate && self.write_error.is_none() {
            if let Err(err) = self.draw(current, grid) {
                log::warn!("stopping: cannot draw frame: {err}");
                self.write_error = Some(err);
                return Step::Cancel;
            }
        }
        match self.budget {
            Some(budget) if self.steps >= budget => {
                log::info!("step budget of {budget} spent, cancelling");
                Step::Cancel
            }
            _ => Step::Continue,
        }
    }
}
