//! Procedural corridor
//!
//! The corridor is a strip of grid columns, each holding the open rows
//! between the upper and lower wall. Generation is a clamped random walk on
//! the corridor centre and height; nothing older than the previous column is
//! remembered.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_CORRIDOR_H, MIN_CORRIDOR_H};

/// Open rows of one corridor column (`top` inclusive, `bottom` exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorridorColumn {
    pub top: i32,
    pub bottom: i32,
}

impl CorridorColumn {
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Per-advance wobble magnitudes (grid rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drift {
    pub center: i32,
    pub width: i32,
}

/// Build the column for a centre row and height, kept inside the grid
pub fn make_column(center: i32, height: i32, rows: i32) -> CorridorColumn {
    let top = (center - height / 2).clamp(0, rows - height);
    CorridorColumn {
        top,
        bottom: top + height,
    }
}

/// One random-walk step of the generator
///
/// Returns the new centre, the new height and the column they describe.
pub fn advance<R: Rng + ?Sized>(
    center: i32,
    height: i32,
    rows: i32,
    drift: Drift,
    rng: &mut R,
) -> (i32, i32, CorridorColumn) {
    let center = center + rng.random_range(-drift.center..=drift.center);
    let height = height + rng.random_range(-drift.width..=drift.width);

    let height = height.clamp(MIN_CORRIDOR_H, MAX_CORRIDOR_H);
    let half = height / 2;
    let center = center.clamp(half, rows - 1 - half);

    let column = make_column(center, height, rows);
    debug_assert!(column.top >= 0 && column.bottom <= rows);
    (center, height, column)
}

/// The visible corridor plus generator state and scroll accumulator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corridor {
    columns: VecDeque<CorridorColumn>,
    /// Generator state (grid rows)
    center: i32,
    height: i32,
    rows: i32,
    cols: usize,
    block: f32,
    /// Horizontal scroll into the first column, always in `[0, block)` between frames
    scroll: f32,
}

impl Corridor {
    /// Create a corridor and fill it with fresh columns
    pub fn new<R: Rng + ?Sized>(
        rows: i32,
        cols: usize,
        block: f32,
        drift: Drift,
        rng: &mut R,
    ) -> Self {
        let mut corridor = Self {
            columns: VecDeque::with_capacity(cols),
            center: 0,
            height: 0,
            rows,
            cols,
            block,
            scroll: 0.0,
        };
        corridor.reset(drift, rng);
        corridor
    }

    /// Generator state a run starts from: screen centre, mid height
    pub fn initial_params(rows: i32) -> (i32, i32) {
        (rows / 2, (MIN_CORRIDOR_H + MAX_CORRIDOR_H) / 2)
    }

    /// Recentre the generator and regenerate every column
    pub fn reset<R: Rng + ?Sized>(&mut self, drift: Drift, rng: &mut R) {
        let (center, height) = Self::initial_params(self.rows);
        self.center = center;
        self.height = height;
        self.scroll = 0.0;
        self.columns.clear();
        for _ in 0..self.cols {
            let (center, height, column) = advance(self.center, self.height, self.rows, drift, rng);
            self.center = center;
            self.height = height;
            self.columns.push_back(column);
        }
    }

    /// Accumulate horizontal scroll (pixels)
    pub fn scroll_by(&mut self, px: f32) {
        self.scroll += px;
    }

    /// Shift by one column if a full block has scrolled past
    ///
    /// Returns the newly appended column, or `None` when less than one block
    /// of scroll is pending. Callers loop until `None`.
    pub fn try_advance<R: Rng + ?Sized>(&mut self, drift: Drift, rng: &mut R) -> Option<CorridorColumn> {
        if self.scroll < self.block {
            return None;
        }
        self.scroll -= self.block;
        self.columns.pop_front();
        let (center, height, column) = advance(self.center, self.height, self.rows, drift, rng);
        self.center = center;
        self.height = height;
        self.columns.push_back(column);
        log::trace!("corridor column top={} bottom={}", column.top, column.bottom);
        Some(column)
    }

    /// Pixel `(top, bottom)` of the corridor at a screen x position
    ///
    /// Positions left or right of the stored columns use the nearest column.
    pub fn bounds_at(&self, screen_x: f32) -> (f32, f32) {
        let Some(column) = self.column_at(screen_x) else {
            return (0.0, self.rows as f32 * self.block);
        };
        (
            column.top as f32 * self.block,
            column.bottom as f32 * self.block,
        )
    }

    fn column_at(&self, screen_x: f32) -> Option<CorridorColumn> {
        let last = self.columns.len().checked_sub(1)?;
        let idx = ((screen_x + self.scroll) / self.block).floor();
        let idx = if idx < 0.0 { 0 } else { (idx as usize).min(last) };
        self.columns.get(idx).copied()
    }

    pub fn columns(&self) -> impl Iterator<Item = &CorridorColumn> {
        self.columns.iter()
    }

    /// Most recently generated column
    pub fn newest(&self) -> Option<CorridorColumn> {
        self.columns.back().copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn block(&self) -> f32 {
        self.block
    }

    /// Current generator `(center, height)` in grid rows
    pub fn params(&self) -> (i32, i32) {
        (self.center, self.height)
    }
}
