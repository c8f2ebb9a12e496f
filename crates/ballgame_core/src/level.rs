use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};

use crate::block::Block;

pub const GRID_ROWS: usize = 5;
pub const GRID_COLS: usize = 10;

const BLOCK_WIDTH: u32 = 90;
const BLOCK_HEIGHT: u32 = 30;
const GRID_ORIGIN_X: i32 = 40;
const GRID_ORIGIN_Y: i32 = 60;
const COLUMN_PITCH: i32 = 95;
const ROW_PITCH: i32 = 35;

/// One level as loaded from the data directory: summary values from
/// `levels.txt` plus the 5x10 block resistance grid from its pattern file.
/// Immutable once loaded; blocks are rebuilt from the grid on every level
/// start.
#[derive(Debug, Clone)]
pub struct LevelDefinition {
    pub id: u32,
    /// Number of grid rows that actually contain blocks, counted from the top.
    pub rows: u32,
    pub paddle_width_ini: u32,
    pub vx_ini: f32,
    pub vy_ini: f32,
    /// Cap on the magnitude of either velocity component for this level.
    pub v_max: f32,
    /// Per-block resistance, row-major; 0 means no block in that cell.
    pub grid: [[u32; GRID_COLS]; GRID_ROWS],
}

impl LevelDefinition {
    /// Expands the resistance grid into the fixed block layout.
    /// Block index = row * 10 + column.
    pub fn build_blocks(&self) -> Vec<Block> {
        let mut blocks = Vec::with_capacity(GRID_ROWS * GRID_COLS);
        for (row, columns) in self.grid.iter().enumerate() {
            for (column, &resistance) in columns.iter().enumerate() {
                let x = GRID_ORIGIN_X + COLUMN_PITCH * column as i32;
                let y = GRID_ORIGIN_Y + ROW_PITCH * row as i32;
                blocks.push(Block::new(BLOCK_WIDTH, BLOCK_HEIGHT, x, y, resistance));
            }
        }
        blocks
    }

    /// How many blocks this level starts with.
    pub fn live_block_count(&self) -> usize {
        self.grid.iter().flatten().filter(|&&r| r > 0).count()
    }
}

/// All level definitions, loaded once at startup and indexed by the 1-based
/// level number players see.
#[derive(Debug, Clone)]
pub struct LevelStore {
    levels: Vec<LevelDefinition>,
}

impl LevelStore {
    /// Loads `levels.txt` and every per-level pattern file under `dir`.
    /// A missing file or malformed field is a fatal error.
    pub fn load(dir: &Path) -> Result<LevelStore> {
        let summary_path = dir.join("levels.txt");
        let summary = fs::read_to_string(&summary_path)
            .with_context(|| format!("failed to read {}", summary_path.display()))?;
        let mut levels = parse_summary(&summary)
            .with_context(|| format!("malformed level summary {}", summary_path.display()))?;
        if levels.is_empty() {
            bail!("{} defines no levels", summary_path.display());
        }
        for (index, level) in levels.iter_mut().enumerate() {
            let pattern_path = dir.join(format!("levels/level{}.txt", index + 1));
            let pattern = fs::read_to_string(&pattern_path)
                .with_context(|| format!("failed to read {}", pattern_path.display()))?;
            level.grid = parse_pattern(&pattern)
                .with_context(|| format!("malformed level pattern {}", pattern_path.display()))?;
        }
        Ok(LevelStore { levels })
    }

    /// Builds a store from already-parsed definitions.
    pub fn from_levels(levels: Vec<LevelDefinition>) -> LevelStore {
        LevelStore { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Looks up a level by its 1-based number.
    pub fn get(&self, number: u32) -> Option<&LevelDefinition> {
        number
            .checked_sub(1)
            .and_then(|index| self.levels.get(index as usize))
    }

    /// 1-based number of the last level; clearing it wins the game.
    pub fn last_level(&self) -> u32 {
        self.levels.len() as u32
    }
}

/// Parses `levels.txt`: one line per level with six `_`-separated integers
/// (id, rows, paddle width, vx, vy, vMax). Grids start empty and are filled
/// in from the pattern files.
fn parse_summary(text: &str) -> Result<Vec<LevelDefinition>> {
    let mut levels = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields =
            parse_fields(line).with_context(|| format!("line {}", line_no + 1))?;
        let &[id, rows, paddle_width, vx, vy, v_max] = fields.as_slice() else {
            bail!(
                "line {}: expected 6 fields, got {}",
                line_no + 1,
                fields.len()
            );
        };
        levels.push(LevelDefinition {
            id: non_negative(id, "id")?,
            rows: non_negative(rows, "row count")?,
            paddle_width_ini: non_negative(paddle_width, "paddle width")?,
            vx_ini: vx as f32,
            vy_ini: vy as f32,
            v_max: v_max as f32,
            grid: [[0; GRID_COLS]; GRID_ROWS],
        });
    }
    Ok(levels)
}

/// Parses a pattern file: up to 5 lines of exactly 10 `_`-separated
/// resistances. Missing trailing rows stay empty.
fn parse_pattern(text: &str) -> Result<[[u32; GRID_COLS]; GRID_ROWS]> {
    let mut grid = [[0u32; GRID_COLS]; GRID_ROWS];
    let mut row = 0;
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if row >= GRID_ROWS {
            bail!("more than {GRID_ROWS} pattern rows");
        }
        let fields =
            parse_fields(line).with_context(|| format!("line {}", line_no + 1))?;
        if fields.len() != GRID_COLS {
            bail!(
                "line {}: expected {GRID_COLS} columns, got {}",
                line_no + 1,
                fields.len()
            );
        }
        for (column, &value) in fields.iter().enumerate() {
            grid[row][column] = non_negative(value, "resistance")
                .with_context(|| format!("line {} column {}", line_no + 1, column + 1))?;
        }
        row += 1;
    }
    Ok(grid)
}

/// Splits one `_`-separated line into integers. Trailing separators are
/// tolerated; anything that is not an integer is a fatal parse error.
fn parse_fields(line: &str) -> Result<Vec<i32>> {
    line.split('_')
        .filter(|field| !field.is_empty())
        .map(|field| {
            field
                .parse::<i32>()
                .with_context(|| format!("bad integer field {field:?}"))
        })
        .collect()
}

fn non_negative(value: i32, what: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| anyhow!("{what} must not be negative, got {value}"))
}
