//! Incremental A* over a [`Grid`].
//!
//! [`AStar`] is a state machine advanced one frontier pop at a time with
//! [`AStar::step`], so a host can render or cancel between expansions.
//! [`search`] drives it to completion, handing every expanded cell to a
//! [`StepObserver`].

use gridstar_core::{CellStatus, Coord, Editor, Grid};

use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::heuristic::{Heuristic, Manhattan};
use crate::reconstruct::{CameFrom, reconstruct};
use crate::scores::ScoreTable;
use crate::Cost;

/// Every move between adjacent cells costs the same.
const STEP_COST: Cost = 1;

/// Where an [`AStar`] search stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchState {
    Running,
    Succeeded,
    Failed,
    /// Halted by the host before reaching a verdict. Not resumable.
    Cancelled,
}

/// An observer's answer after seeing an expansion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    Cancel,
}

/// Hook invoked once per expanded cell, after its neighbours are relaxed
/// and its tag updated.
pub trait StepObserver {
    fn on_step(&mut self, current: Coord, grid: &Grid) -> Step;
}

impl<F> StepObserver for F
where
    F: FnMut(Coord, &Grid) -> Step,
{
    #[inline]
    fn on_step(&mut self, current: Coord, grid: &Grid) -> Step {
        self(current, grid)
    }
}

/// An observer that never cancels.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoObserver;

impl StepObserver for NoObserver {
    #[inline]
    fn on_step(&mut self, _current: Coord, _grid: &Grid) -> Step {
        Step::Continue
    }
}

/// Result of a finished search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Path in start-to-goal order, excluding the start; empty when the
    /// start is the goal.
    Found(Vec<Coord>),
    /// The frontier ran dry: no path exists.
    NotFound,
    /// The observer stopped the search. Says nothing about reachability.
    Cancelled,
}

impl SearchOutcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The path, if one was found.
    pub fn path(&self) -> Option<&[Coord]> {
        match self {
            Self::Found(path) => Some(path),
            _ => None,
        }
    }
}

/// A single A* run from `start` to `end`.
///
/// Scores, frontier and predecessors live only as long as the run. The grid
/// is borrowed exclusively and receives Open, Closed and Path tags as side
/// effects; Barrier, Start and End tags are never overwritten.
pub struct AStar<'g, H> {
    grid: &'g mut Grid,
    heuristic: H,
    start: Coord,
    end: Coord,
    scores: ScoreTable,
    frontier: Frontier,
    came_from: CameFrom,
    state: SearchState,
    current: Option<Coord>,
    expanded: usize,
    path: Vec<Coord>,
    nbuf: Vec<Coord>,
}

impl<'g, H: Heuristic> AStar<'g, H> {
    /// Set up a search with `g[start] = 0`, `f[start] = h(start, end)` and
    /// the start alone in the frontier.
    pub fn new(grid: &'g mut Grid, start: Coord, end: Coord, heuristic: H) -> Result<Self, SearchError> {
        for c in [start, end] {
            if grid.cell(c)?.is_barrier() {
                return Err(SearchError::BlockedEndpoint(c));
            }
        }

        let mut scores = ScoreTable::new(grid.dim());
        let estimate = heuristic.estimate(start, end);
        scores.seed(start, estimate);

        let mut frontier = Frontier::new();
        frontier.push(estimate, start);

        log::debug!("A* {start} -> {end} on a {0}x{0} grid", grid.dim());

        Ok(Self {
            grid,
            heuristic,
            start,
            end,
            scores,
            frontier,
            came_from: CameFrom::new(),
            state: SearchState::Running,
            current: None,
            expanded: 0,
            path: Vec::new(),
            nbuf: Vec::with_capacity(4),
        })
    }

    /// Pop one frontier entry and process it.
    ///
    /// Returns the state afterwards; once terminal, further calls are no-ops.
    pub fn step(&mut self) -> Result<SearchState, SearchError> {
        if self.state != SearchState::Running {
            return Ok(self.state);
        }

        let Some(entry) = self.frontier.pop() else {
            self.current = None;
            self.finish(SearchState::Failed);
            return Ok(self.state);
        };
        let current = entry.coord;
        self.current = Some(current);

        if current == self.end {
            self.path = reconstruct(&self.came_from, self.end);
            self.path.reverse();
            for &c in &self.path {
                if c != self.start && c != self.end {
                    self.grid.mark_visit(c, CellStatus::Path)?;
                }
            }
            self.finish(SearchState::Succeeded);
            return Ok(self.state);
        }

        let tentative = self.scores.g(current).saturating_add(STEP_COST);
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.grid.neighbors_into(current, &mut nbuf)?;

        for &n in nbuf.iter() {
            let (heuristic, end) = (&self.heuristic, self.end);
            if !self.scores.relax(n, tentative, || heuristic.estimate(n, end)) {
                continue;
            }
            self.came_from.insert(n, current);
            // An already queued cell keeps its old key; the improved score
            // is still what later relaxations read.
            if self.frontier.push(self.scores.f(n), n) {
                self.grid.mark_visit(n, CellStatus::Open)?;
            }
        }
        self.nbuf = nbuf;

        if current != self.start {
            self.grid.mark_visit(current, CellStatus::Closed)?;
        }
        self.expanded += 1;
        log::trace!(
            "expanded {current} (f={}, g={}), frontier {}",
            entry.f,
            self.scores.g(current),
            self.frontier.len()
        );

        Ok(self.state)
    }

    /// Step until a verdict, consulting `observer` after every expansion.
    pub fn run<O: StepObserver + ?Sized>(&mut self, observer: &mut O) -> Result<SearchOutcome, SearchError> {
        loop {
            if self.step()? != SearchState::Running {
                break;
            }
            if let Some(current) = self.current {
                if observer.on_step(current, &*self.grid) == Step::Cancel {
                    self.cancel();
                }
            }
        }
        Ok(self.outcome().unwrap_or(SearchOutcome::Cancelled))
    }

    /// Stop a running search. Scores, predecessors and tags stay as they are.
    pub fn cancel(&mut self) {
        if self.state == SearchState::Running {
            self.finish(SearchState::Cancelled);
        }
    }

    fn finish(&mut self, state: SearchState) {
        self.state = state;
        log::debug!(
            "A* {} -> {}: {state:?} after {} expansions",
            self.start,
            self.end,
            self.expanded
        );
    }

    /// The verdict, or `None` while still running.
    pub fn outcome(&self) -> Option<SearchOutcome> {
        match self.state {
            SearchState::Running => None,
            SearchState::Succeeded => Some(SearchOutcome::Found(self.path.clone())),
            SearchState::Failed => Some(SearchOutcome::NotFound),
            SearchState::Cancelled => Some(SearchOutcome::Cancelled),
        }
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// The cell popped by the latest step.
    #[inline]
    pub fn current(&self) -> Option<Coord> {
        self.current
    }

    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Coord {
        self.end
    }

    /// Cells expanded so far (the goal pop is not an expansion).
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    #[inline]
    pub fn g_score(&self, c: Coord) -> Cost {
        self.scores.g(c)
    }

    #[inline]
    pub fn f_score(&self, c: Coord) -> Cost {
        self.scores.f(c)
    }

    #[inline]
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    #[inline]
    pub fn came_from(&self) -> &CameFrom {
        &self.came_from
    }

    /// Start-to-goal path once succeeded, empty otherwise.
    #[inline]
    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &*self.grid
    }
}

/// Run A* from `start` to `end` to completion.
pub fn search<H, O>(
    grid: &mut Grid,
    start: Coord,
    end: Coord,
    heuristic: H,
    observer: &mut O,
) -> Result<SearchOutcome, SearchError>
where
    H: Heuristic,
    O: StepObserver + ?Sized,
{
    AStar::new(grid, start, end, heuristic)?.run(observer)
}

/// [`search`] with the Manhattan heuristic and no observer.
pub fn find_path(grid: &mut Grid, start: Coord, end: Coord) -> Result<SearchOutcome, SearchError> {
    search(grid, start, end, Manhattan, &mut NoObserver)
}

/// Search between an editor's start and end after clearing the tags of any
/// previous run.
pub fn solve<H, O>(editor: &mut Editor, heuristic: H, observer: &mut O) -> Result<SearchOutcome, SearchError>
where
    H: Heuristic,
    O: StepObserver + ?Sized,
{
    let (start, end) = editor.prepare_search().ok_or(SearchError::MissingEndpoint)?;
    search(editor.grid_mut(), start, end, heuristic, observer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::bfs_distance;
    use crate::heuristic::manhattan;
    use gridstar_core::{GridConfig, GridError};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const MAZE: &str = "
        S.#......
        .##.####.
        ....#....
        ###.#.##.
        ....#..#.
        .####.##.
        .....#...
        ####.#.#.
        .......#E";

    fn assert_walkable(grid: &Grid, start: Coord, end: Coord, path: &[Coord]) {
        let mut prev = start;
        for &c in path {
            assert_eq!(manhattan(prev, c), 1, "{prev} -> {c} is not a single step");
            assert!(!grid.cell(c).unwrap().is_barrier(), "{c} is a barrier");
            prev = c;
        }
        assert_eq!(prev, end);
    }

    fn endpoints(grid: &Grid) -> (Coord, Coord) {
        (
            grid.find(CellStatus::Start).unwrap(),
            grid.find(CellStatus::End).unwrap(),
        )
    }

    #[test]
    fn open_grid_path_is_manhattan() {
        let mut grid = Grid::new(5);
        let (start, end) = (Coord::new(0, 0), Coord::new(4, 4));
        grid.set_start(start).unwrap();
        grid.set_end(end).unwrap();

        let outcome = find_path(&mut grid, start, end).unwrap();
        let path = outcome.path().unwrap();
        assert_eq!(path.len(), 8);
        assert_walkable(&grid, start, end, path);

        // Intermediate cells are tagged, endpoints keep their tags.
        assert_eq!(grid.count(CellStatus::Path), 7);
        assert_eq!(grid.status(start).unwrap(), CellStatus::Start);
        assert_eq!(grid.status(end).unwrap(), CellStatus::End);
    }

    #[test]
    fn open_grids_of_every_size() {
        for dim in 1..=8usize {
            let d = dim as i32 - 1;
            for (start, end) in [
                (Coord::new(0, 0), Coord::new(d, d)),
                (Coord::new(d, 0), Coord::new(0, d)),
                (Coord::new(d / 2, d), Coord::new(d, d / 3)),
            ] {
                let mut grid = Grid::new(dim);
                let outcome = find_path(&mut grid, start, end).unwrap();
                assert_eq!(
                    outcome.path().map(<[Coord]>::len),
                    Some(manhattan(start, end) as usize)
                );
            }
        }
    }

    #[test]
    fn start_equals_end_is_an_empty_path() {
        let mut grid = Grid::new(4);
        let c = Coord::new(1, 1);
        grid.set_start(c).unwrap();
        let before = grid.clone();

        let mut astar = AStar::new(&mut grid, c, c, Manhattan).unwrap();
        assert_eq!(astar.step().unwrap(), SearchState::Succeeded);
        assert_eq!(astar.outcome(), Some(SearchOutcome::Found(Vec::new())));
        assert_eq!(astar.expanded(), 0);
        assert_eq!(astar.g_score(c), 0);
        drop(astar);

        assert_eq!(grid, before);
    }

    #[test]
    fn walled_off_goal_is_not_found() {
        let mut grid = Grid::from_layout(
            "S..
             ###
             E..",
        )
        .unwrap();
        let (start, end) = endpoints(&grid);

        let outcome = find_path(&mut grid, start, end).unwrap();
        assert_eq!(outcome, SearchOutcome::NotFound);
        assert_eq!(grid.count(CellStatus::Path), 0);
        // The reachable part was fully explored.
        assert_eq!(grid.count(CellStatus::Closed), 2);
        assert_eq!(grid.count(CellStatus::Open), 0);
        assert_eq!(grid.status(start).unwrap(), CellStatus::Start);
    }

    #[test]
    fn maze_matches_bfs() {
        let mut grid = Grid::from_layout(MAZE).unwrap();
        let (start, end) = endpoints(&grid);
        let expected = bfs_distance(&grid, start, end).unwrap().unwrap();

        let mut astar = AStar::new(&mut grid, start, end, Manhattan).unwrap();
        let outcome = astar.run(&mut NoObserver).unwrap();
        assert_eq!(astar.g_score(end), expected);
        let path = outcome.path().unwrap().to_vec();
        assert_eq!(path.len() as Cost, expected);
        assert_eq!(astar.path(), path.as_slice());
        drop(astar);

        assert_walkable(&grid, start, end, &path);
    }

    #[test]
    fn random_grids_match_bfs() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let dim = rng.random_range(1..=12usize);
            let mut grid = Grid::new(dim);
            for r in 0..dim as i32 {
                for c in 0..dim as i32 {
                    if rng.random_bool(0.3) {
                        grid.set_barrier(Coord::new(r, c)).unwrap();
                    }
                }
            }
            let mut pick = || {
                Coord::new(
                    rng.random_range(0..dim as i32),
                    rng.random_range(0..dim as i32),
                )
            };
            let (start, end) = (pick(), pick());
            grid.clear(start).unwrap();
            grid.clear(end).unwrap();

            let expected = bfs_distance(&grid, start, end).unwrap();
            let mut astar = AStar::new(&mut grid, start, end, Manhattan).unwrap();
            match astar.run(&mut NoObserver).unwrap() {
                SearchOutcome::Found(path) => {
                    assert_eq!(Some(path.len() as Cost), expected);
                    assert_eq!(Some(astar.g_score(end)), expected);
                    drop(astar);
                    assert_walkable(&grid, start, end, &path);
                }
                SearchOutcome::NotFound => assert_eq!(expected, None),
                SearchOutcome::Cancelled => unreachable!(),
            }
        }
    }

    #[test]
    fn equal_f_expands_in_insertion_order() {
        // With a zero heuristic the four neighbours of the centre share f = 1
        // and must come out in the order they were queued: down, up, right,
        // left. Their own neighbours then tie at f = 2 the same way.
        let mut grid = Grid::new(3);
        let (start, end) = (Coord::new(1, 1), Coord::new(0, 0));
        let mut order = Vec::new();
        let mut record = |c: Coord, _: &Grid| {
            order.push(c);
            Step::Continue
        };
        let zero = |_: Coord, _: Coord| 0;

        let outcome = search(&mut grid, start, end, zero, &mut record).unwrap();
        assert_eq!(
            order,
            vec![
                Coord::new(1, 1),
                Coord::new(2, 1),
                Coord::new(0, 1),
                Coord::new(1, 2),
                Coord::new(1, 0),
                Coord::new(2, 2),
                Coord::new(2, 0),
                Coord::new(0, 2),
            ]
        );
        assert_eq!(
            outcome,
            SearchOutcome::Found(vec![Coord::new(0, 1), Coord::new(0, 0)])
        );
    }

    #[test]
    fn rerun_after_reset_is_identical() {
        let mut grid = Grid::from_layout(MAZE).unwrap();
        let (start, end) = endpoints(&grid);

        let first = find_path(&mut grid, start, end).unwrap();
        let tagged = grid.clone();
        grid.reset_visits();
        let second = find_path(&mut grid, start, end).unwrap();

        assert!(first.is_found());
        assert_eq!(first, second);
        assert_eq!(grid, tagged);
    }

    #[test]
    fn observer_sees_closed_cells_and_can_cancel() {
        let mut grid = Grid::new(10);
        let (start, end) = (Coord::new(0, 0), Coord::new(9, 9));
        let mut seen = Vec::new();
        let mut stop_after_three = |c: Coord, g: &Grid| {
            seen.push((c, g.status(c).unwrap()));
            if seen.len() == 3 { Step::Cancel } else { Step::Continue }
        };

        let mut astar = AStar::new(&mut grid, start, end, Manhattan).unwrap();
        let outcome = astar.run(&mut stop_after_three).unwrap();
        assert_eq!(outcome, SearchOutcome::Cancelled);
        assert_eq!(astar.state(), SearchState::Cancelled);
        assert_eq!(astar.expanded(), 3);
        assert!(!astar.came_from().is_empty());
        assert!(astar.path().is_empty());
        // Terminal: stepping again changes nothing.
        assert_eq!(astar.step().unwrap(), SearchState::Cancelled);
        assert_eq!(astar.expanded(), 3);
        drop(astar);

        assert_eq!(seen[0], (start, CellStatus::Unvisited));
        assert!(seen[1..].iter().all(|&(_, s)| s == CellStatus::Closed));
        assert_eq!(grid.count(CellStatus::Path), 0);
        assert!(grid.count(CellStatus::Open) > 0);
    }

    #[test]
    fn manual_stepping() {
        let mut grid = Grid::new(3);
        let (start, end) = (Coord::new(0, 0), Coord::new(0, 2));
        let mut astar = AStar::new(&mut grid, start, end, Manhattan).unwrap();
        assert_eq!(astar.outcome(), None);
        assert_eq!(astar.f_score(start), 2);
        assert!(astar.frontier().contains(start));

        assert_eq!(astar.step().unwrap(), SearchState::Running);
        assert_eq!(astar.current(), Some(start));
        assert!(!astar.frontier().contains(start));
        assert_eq!(astar.g_score(Coord::new(0, 1)), 1);
        assert_eq!(astar.f_score(Coord::new(0, 1)), 2);
        assert_eq!(astar.f_score(Coord::new(1, 0)), 4);
        assert_eq!(astar.grid().status(Coord::new(0, 1)).unwrap(), CellStatus::Open);

        while astar.step().unwrap() == SearchState::Running {}
        assert_eq!(astar.state(), SearchState::Succeeded);
        assert_eq!(astar.path(), &[Coord::new(0, 1), Coord::new(0, 2)]);
        assert_eq!(astar.came_from().get(&end), Some(&Coord::new(0, 1)));
        assert_eq!(astar.came_from().get(&start), None);
    }

    #[test]
    fn better_route_to_queued_cell_keeps_its_key() {
        // A high estimate on (0, 1) sends the search round the long side of
        // the ring first, so (0, 2) is queued with g = 6 before (0, 1) pops
        // and offers g = 2. The end is walled in and never reached.
        let mut grid = Grid::from_layout(
            "S..#
             .#.#
             ...#
             ###E",
        )
        .unwrap();
        let (start, end) = endpoints(&grid);
        let (detour, n) = (Coord::new(0, 1), Coord::new(0, 2));
        let h = move |c: Coord, _: Coord| if c == detour { 5 } else { 0 };

        let mut astar = AStar::new(&mut grid, start, end, h).unwrap();
        for _ in 0..6 {
            astar.step().unwrap();
        }
        assert_eq!(astar.current(), Some(Coord::new(1, 2)));
        assert_eq!(astar.g_score(n), 6);
        assert_eq!(astar.came_from()[&n], Coord::new(1, 2));
        assert_eq!(astar.frontier().len(), 2);

        assert_eq!(astar.step().unwrap(), SearchState::Running);
        assert_eq!(astar.current(), Some(detour));
        assert_eq!(astar.g_score(n), 2);
        assert_eq!(astar.f_score(n), 2);
        assert_eq!(astar.came_from()[&n], detour);
        // Only the pop changed the queue; the stale key still orders n.
        assert_eq!(astar.frontier().len(), 1);
        let queued = astar.frontier().peek().unwrap();
        assert_eq!((queued.coord, queued.f), (n, 6));

        assert_eq!(astar.run(&mut NoObserver).unwrap(), SearchOutcome::NotFound);
    }

    #[test]
    fn g_scores_never_increase() {
        let mut grid = Grid::from_layout(MAZE).unwrap();
        let (start, end) = endpoints(&grid);
        let dim = grid.dim() as i32;
        let mut astar = AStar::new(&mut grid, start, end, Manhattan).unwrap();
        let mut last: Vec<Cost> = (0..dim * dim)
            .map(|i| astar.g_score(Coord::new(i / dim, i % dim)))
            .collect();
        while astar.step().unwrap() == SearchState::Running {
            for (i, old) in last.iter_mut().enumerate() {
                let i = i as i32;
                let g = astar.g_score(Coord::new(i / dim, i % dim));
                assert!(g <= *old);
                *old = g;
            }
        }
    }

    #[test]
    fn rejects_bad_endpoints() {
        let mut grid = Grid::from_layout(
            "S#
             ..",
        )
        .unwrap();
        let blocked = Coord::new(0, 1);
        assert_eq!(
            find_path(&mut grid, Coord::ZERO, blocked).unwrap_err(),
            SearchError::BlockedEndpoint(blocked)
        );
        let outside = Coord::new(2, 0);
        assert_eq!(
            find_path(&mut grid, outside, Coord::ZERO).unwrap_err(),
            SearchError::Grid(GridError::OutOfBounds {
                coord: outside,
                dim: 2
            })
        );
    }

    #[test]
    fn solve_uses_editor_endpoints() {
        let mut editor = Editor::new(GridConfig::with_dimension(4)).unwrap();
        assert_eq!(
            solve(&mut editor, Manhattan, &mut NoObserver).unwrap_err(),
            SearchError::MissingEndpoint
        );

        editor.paint(Coord::new(0, 0)).unwrap();
        editor.paint(Coord::new(3, 0)).unwrap();
        for col in 0..3 {
            editor.paint(Coord::new(1, col)).unwrap();
        }
        let first = solve(&mut editor, Manhattan, &mut NoObserver).unwrap();
        assert_eq!(first.path().map(<[Coord]>::len), Some(9));

        // Stale tags from the first run do not leak into the second.
        editor.erase(Coord::new(1, 2)).unwrap();
        let second = solve(&mut editor, Manhattan, &mut NoObserver).unwrap();
        assert_eq!(second.path().map(<[Coord]>::len), Some(7));
        assert_eq!(editor.grid().count(CellStatus::Path), 6);
    }
}
