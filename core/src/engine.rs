use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::*;

/// Valid transitions:
/// - Ready -> Active (first click anywhere inside the grid)
/// - Active -> Finished (completion check passes during a commit)
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Active,
    Finished,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HeaderKind {
    Column,
    Row,
}

/// One tile of a header strip. `index` is the displayed multiplicand
/// (1-based); `highlighted` follows the row/column of the tile under edit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HeaderTile {
    pub index: Coord,
    pub kind: HeaderKind,
    pub highlighted: bool,
}

/// Outcome of clicking a tile
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EditOutcome {
    NoChange,
    Opened,
}

impl EditOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Opened => true,
        }
    }
}

/// Outcome of finalizing a text entry
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CommitOutcome {
    NoChange,
    Incorrect,
    Correct,
    /// The commit ended the session, either by reaching the target or by
    /// solving every tile.
    Finished,
}

impl CommitOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use CommitOutcome::*;
        match self {
            NoChange => false,
            Incorrect => true,
            Correct => true,
            Finished => true,
        }
    }
}

/// Owns one playthrough: the solution table, the progress board, the hint
/// marker, and the session counters. All clock reads are injected through the
/// `now` parameters.
#[derive(Clone, Debug)]
pub struct PlayEngine {
    table: ProductTable,
    board: Array2<Tile>,
    target: CellCount,
    correct_count: CellCount,
    state: EngineState,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    hinted: Option<Coord2>,
    active: Option<Coord2>,
    editing: Option<Coord2>,
    rng: SmallRng,
}

impl PlayEngine {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let table = ProductTable::new(config.size);
        let mut engine = Self {
            board: Array2::default(config.size.to_nd_index()),
            table,
            target: config.target,
            correct_count: 0,
            state: Default::default(),
            started_at: None,
            ended_at: None,
            hinted: None,
            active: None,
            editing: None,
            rng: SmallRng::seed_from_u64(seed),
        };
        // the opening hint exists before the first click; the clock does not
        // start until a tile is clicked
        engine.propose_tile();
        engine
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.table.size()
    }

    pub fn target(&self) -> CellCount {
        self.target
    }

    pub fn correct_count(&self) -> CellCount {
        self.correct_count
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            size: self.size(),
            target: self.target,
        }
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<&Tile> {
        let coords = self.table.validate_coords(coords)?;
        Ok(&self.board[coords.to_nd_index()])
    }

    pub fn product_at(&self, coords: Coord2) -> Result<CellCount> {
        self.table.product_at(coords)
    }

    pub fn table(&self) -> &ProductTable {
        &self.table
    }

    /// The tile currently drawn with the suggestion marker.
    pub fn hinted_tile(&self) -> Option<Coord2> {
        self.hinted
    }

    /// The tile whose correct commit counts toward the target. Diverges from
    /// `hinted_tile` once the suggested tile is clicked: the marker clears but
    /// the commit still counts.
    pub fn active_tile(&self) -> Option<Coord2> {
        self.active
    }

    pub fn editing_tile(&self) -> Option<Coord2> {
        self.editing
    }

    pub fn col_headers(&self) -> Vec<HeaderTile> {
        let (x_end, _) = self.size();
        let editing_x = self.editing.map(|(x, _)| x);
        (0..x_end)
            .map(|x| HeaderTile {
                index: x + 1,
                kind: HeaderKind::Column,
                highlighted: editing_x == Some(x),
            })
            .collect()
    }

    pub fn row_headers(&self) -> Vec<HeaderTile> {
        let (_, y_end) = self.size();
        let editing_y = self.editing.map(|(_, y)| y);
        (0..y_end)
            .map(|y| HeaderTile {
                index: y + 1,
                kind: HeaderKind::Row,
                highlighted: editing_y == Some(y),
            })
            .collect()
    }

    /// A click on a tile. Starts the clock on the first ever click, and opens
    /// a text-entry surface when the tile still takes edits.
    pub fn begin_edit(&mut self, coords: Coord2, now: Instant) -> Result<EditOutcome> {
        use EditOutcome::*;

        let coords = self.table.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(NoChange);
        }

        // any click inside the grid starts the clock, even one landing on an
        // already-correct tile
        self.mark_started(now);

        if !self.board[coords.to_nd_index()].accepts_edits() {
            return Ok(NoChange);
        }

        // clear the visual marker only; the counting flag stays so solving
        // the suggested tile still counts toward the target
        if self.hinted == Some(coords) {
            self.hinted = None;
        }

        self.editing = Some(coords);
        log::debug!("begin edit at {:?}", coords);
        Ok(Opened)
    }

    /// Finalized text entry for a tile. The raw text is compared, as entered,
    /// against the decimal form of the product: exact string match, no
    /// trimming, no parsing. An empty entry changes nothing.
    pub fn commit_edit(&mut self, coords: Coord2, raw_text: &str, now: Instant) -> Result<CommitOutcome> {
        use CommitOutcome::*;

        let coords = self.table.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(NoChange);
        }

        self.mark_started(now);

        // headers unhighlight in all cases
        self.editing = None;

        if !self.board[coords.to_nd_index()].accepts_edits() {
            return Ok(NoChange);
        }

        if raw_text.is_empty() {
            return Ok(if self.try_resolve(now) { Finished } else { NoChange });
        }

        let solution = self.table[coords];
        let outcome = if raw_text == solution.to_string() {
            self.board[coords.to_nd_index()] = Tile::Correct;
            if self.active == Some(coords) {
                // only suggestion-driven answers count toward the target
                self.correct_count += 1;
                log::debug!(
                    "correct at suggested {:?}, {}/{}",
                    coords,
                    self.correct_count,
                    self.target
                );
            } else {
                log::debug!("correct at {:?} (not suggested)", coords);
            }
            self.propose_tile();
            Correct
        } else {
            log::debug!("incorrect at {:?}: {:?} != {}", coords, raw_text, solution);
            self.board[coords.to_nd_index()] = Tile::Incorrect(raw_text.to_string());
            Incorrect
        };

        Ok(if self.try_resolve(now) { Finished } else { outcome })
    }

    /// True once the target is reached or every tile is correct. Monotonic:
    /// tiles never revert from correct and the count never decreases.
    pub fn check_solved(&self) -> bool {
        self.correct_count >= self.target || self.board.iter().all(|tile| tile.is_correct())
    }

    /// Ends the session: blanks every not-correct tile without revealing its
    /// product, drops the hint and any open edit surface, and freezes the
    /// clock. Returns whether this call ended the session; later calls are
    /// no-ops.
    pub fn resolve(&mut self, now: Instant) -> bool {
        if self.state.is_finished() {
            return false;
        }

        self.state = EngineState::Finished;
        self.ended_at = Some(now);

        for tile in self.board.iter_mut() {
            if !tile.is_correct() {
                *tile = Tile::Cleared;
            }
        }

        self.hinted = None;
        self.active = None;
        self.editing = None;

        log::debug!("resolved after {}s", self.elapsed_secs(now));
        true
    }

    /// Seconds from the first click to `now`, rounded to nearest; 0 before
    /// the first click, frozen at the end time once resolved.
    pub fn elapsed_secs(&self, now: Instant) -> u32 {
        match self.started_at {
            Some(started_at) => {
                let end = self.ended_at.unwrap_or(now);
                end.duration_since(started_at).as_secs_f64().round() as u32
            }
            None => 0,
        }
    }

    fn try_resolve(&mut self, now: Instant) -> bool {
        if self.check_solved() {
            self.resolve(now)
        } else {
            false
        }
    }

    fn mark_started(&mut self, now: Instant) {
        if self.state.is_ready() {
            log::debug!("first click, clock started");
            self.started_at = Some(now);
            self.state = EngineState::Active;
        }
    }

    /// Picks the next suggested tile uniformly among not-yet-correct tiles,
    /// or none when all are correct.
    fn propose_tile(&mut self) {
        self.hinted = None;
        self.active = None;

        let candidates: Vec<Coord2> = self
            .iter_coords()
            .filter(|&coords| !self.board[coords.to_nd_index()].is_correct())
            .collect();

        if let Some(choice) = suggest::choose(&mut self.rng, &candidates) {
            log::trace!("hint proposed at {:?}", choice);
            self.hinted = Some(choice);
            self.active = Some(choice);
        }
    }

    fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (x_end, y_end) = self.size();
        (0..x_end).flat_map(move |x| (0..y_end).map(move |y| (x, y)))
    }
}

/// Infallible in-bounds path used by iteration.
impl Index<Coord2> for PlayEngine {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.board[coords.to_nd_index()]
    }
}
