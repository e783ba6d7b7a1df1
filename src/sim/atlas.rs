//! Spawn pattern catalogue
//!
//! Patterns are small character grids: `G` benign, `R` hostile, `-` empty.
//! They are grouped into difficulty tiers that unlock progressively. The
//! catalogue is parsed once and shared read-only with the fishery.

use serde::Deserialize;

use super::state::FishKind;
use crate::error::SimError;

/// Catalogue shipped with the game
const BUILTIN_CATALOGUE: &str = include_str!("../../assets/patterns.json");

/// Symbol for an empty cell
pub const EMPTY_SYMBOL: char = '-';

/// Difficulty tiers, in unlock order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Easy,
    Medium,
    Hard,
    VeryHard,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Easy, Tier::Medium, Tier::Hard, Tier::VeryHard];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// An immutable grid of optional fish
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPattern {
    rows: Vec<Vec<Option<FishKind>>>,
    cols: usize,
}

impl SpawnPattern {
    /// Parse a newline-separated pattern. Surrounding whitespace is trimmed.
    pub fn parse(text: &str) -> Result<Self, SimError> {
        let lines: Vec<&str> = text.trim().lines().map(str::trim).collect();
        Self::from_rows(&lines)
    }

    /// Build a pattern from individual rows
    pub fn from_rows<S: AsRef<str>>(lines: &[S]) -> Result<Self, SimError> {
        if lines.is_empty() || lines.iter().all(|l| l.as_ref().is_empty()) {
            return Err(SimError::EmptyPattern);
        }

        let mut rows = Vec::with_capacity(lines.len());
        for (row, line) in lines.iter().enumerate() {
            let mut cells = Vec::with_capacity(line.as_ref().len());
            for (col, symbol) in line.as_ref().chars().enumerate() {
                let cell = match symbol {
                    EMPTY_SYMBOL => None,
                    other => Some(
                        FishKind::from_symbol(other)
                            .ok_or(SimError::UnknownSymbol { symbol: other, row, col })?,
                    ),
                };
                cells.push(cell);
            }
            rows.push(cells);
        }

        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        Ok(Self { rows, cols })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of fish symbols in the grid
    pub fn fish_count(&self) -> usize {
        self.cells().count()
    }

    /// Occupied cells as `(row, col, kind)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, FishKind)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|kind| (row, col, kind)))
        })
    }
}

#[derive(Deserialize)]
struct CatalogueFile {
    easy: Vec<Vec<String>>,
    medium: Vec<Vec<String>>,
    hard: Vec<Vec<String>>,
    very_hard: Vec<Vec<String>>,
}

/// All spawn patterns grouped by tier
#[derive(Debug, Clone)]
pub struct SpawnAtlas {
    tiers: [Vec<SpawnPattern>; 4],
}

impl SpawnAtlas {
    /// Build an atlas from per-tier patterns. Every tier must be non-empty.
    pub fn new(tiers: [Vec<SpawnPattern>; 4]) -> Result<Self, SimError> {
        for tier in Tier::ALL {
            if tiers[tier.index()].is_empty() {
                return Err(SimError::EmptyTier(tier));
            }
        }
        Ok(Self { tiers })
    }

    /// The catalogue shipped with the game
    pub fn builtin() -> Result<Self, SimError> {
        Self::from_json(BUILTIN_CATALOGUE)
    }

    /// Parse a catalogue of the form
    /// `{"easy": [["--G--", ...], ...], "medium": ..., "hard": ..., "very_hard": ...}`
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let file: CatalogueFile =
            serde_json::from_str(json).map_err(|e| SimError::Catalogue(e.to_string()))?;

        let parse_tier = |patterns: Vec<Vec<String>>| -> Result<Vec<SpawnPattern>, SimError> {
            patterns.iter().map(|rows| SpawnPattern::from_rows(rows)).collect()
        };

        let atlas = Self::new([
            parse_tier(file.easy)?,
            parse_tier(file.medium)?,
            parse_tier(file.hard)?,
            parse_tier(file.very_hard)?,
        ])?;
        log::debug!(
            "Loaded spawn atlas: {:?}",
            Tier::ALL.map(|t| atlas.patterns(t).len())
        );
        Ok(atlas)
    }

    pub fn patterns(&self, tier: Tier) -> &[SpawnPattern] {
        &self.tiers[tier.index()]
    }
}
