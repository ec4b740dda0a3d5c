//! # Terrain Chunk
//!
//! A chunk is a square heightmap grid plus the seed it was generated from.
//!
//! ## Storage
//!
//! Heights are stored in a flat row-major buffer: `index = y * width + x`.
//! The buffer length is exactly `width * width` for the chunk's lifetime.
//!
//! ## Access contract
//!
//! The `get`/`set`/`add` family performs no bounds checking of its own in
//! release builds; callers must keep `x`, `y` and `index` in range. This
//! keeps the per-cell path of generation branch-free. Debug builds assert.

use crate::generator::TerrainGenerator;
use crate::sample::bilinear;

/// A square heightmap chunk.
///
/// Created with a uniform base height, then mutated in place by direct
/// accessors and by [`TerrainGenerator`] passes. Generator passes *add*
/// into cells rather than overwrite them, so several passes layer on top
/// of each other.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainChunk {
    /// Grid side length. Never changes after construction.
    width: usize,
    /// Generation seed. Immutable; every generator pass is reseeded from it.
    seed: u64,
    /// Row-major height values, `width * width` entries.
    heights: Vec<f64>,
}

impl TerrainChunk {
    /// Creates a chunk with every cell at height `0.0`.
    ///
    /// `width` must be positive.
    #[must_use]
    pub fn new(seed: u64, width: usize) -> Self {
        Self::with_base_height(seed, width, 0.0)
    }

    /// Creates a chunk with every cell at `base_height`.
    ///
    /// `width` must be positive.
    #[must_use]
    pub fn with_base_height(seed: u64, width: usize, base_height: f64) -> Self {
        debug_assert!(width > 0, "chunk width must be positive");
        Self {
            width,
            seed,
            heights: vec![base_height; width * width],
        }
    }

    /// Grid side length.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Generation seed.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Total cell count (`width * width`).
    #[inline]
    #[must_use]
    pub const fn area(&self) -> usize {
        self.width * self.width
    }

    /// The raw row-major height buffer.
    #[inline]
    #[must_use]
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Height at cell `(x, y)`.
    ///
    /// Caller must keep `x` and `y` below `width`.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        debug_assert!(x < self.width && y < self.width, "cell out of range");
        self.heights[y * self.width + x]
    }

    /// Height at flat `index`.
    ///
    /// Caller must keep `index` below `area`.
    #[inline]
    #[must_use]
    pub fn get_index(&self, index: usize) -> f64 {
        debug_assert!(index < self.area(), "index out of range");
        self.heights[index]
    }

    /// Overwrites the height at cell `(x, y)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        debug_assert!(x < self.width && y < self.width, "cell out of range");
        self.heights[y * self.width + x] = value;
    }

    /// Overwrites the height at flat `index`.
    #[inline]
    pub fn set_index(&mut self, index: usize, value: f64) {
        debug_assert!(index < self.area(), "index out of range");
        self.heights[index] = value;
    }

    /// Accumulates `amount` into cell `(x, y)`.
    ///
    /// Generators use this rather than `set` so that multiple passes over
    /// one chunk compose additively.
    #[inline]
    pub fn add(&mut self, x: usize, y: usize, amount: f64) {
        debug_assert!(x < self.width && y < self.width, "cell out of range");
        self.heights[y * self.width + x] += amount;
    }

    /// Accumulates `amount` into the cell at flat `index`.
    #[inline]
    pub fn add_index(&mut self, index: usize, amount: f64) {
        debug_assert!(index < self.area(), "index out of range");
        self.heights[index] += amount;
    }

    /// Returns a fresh cursor positioned at the first cell.
    #[must_use]
    pub fn cursor(&mut self) -> ChunkCursor<'_> {
        ChunkCursor::new(self)
    }

    /// Runs one generator pass over this chunk.
    ///
    /// The generator is reseeded from this chunk's seed first, so its
    /// random stream is deterministic per chunk regardless of how many
    /// chunks were generated before this one.
    pub fn generate<G: TerrainGenerator + ?Sized>(&mut self, generator: &mut G) {
        tracing::debug!(seed = self.seed, width = self.width, "generator pass");
        generator.reseed(self.seed);
        generator.generate(self);
    }

    /// Samples the heightmap at a continuous position.
    ///
    /// Bilinear interpolation between the four surrounding grid points;
    /// coordinates are clamped into the grid. See [`bilinear`].
    #[inline]
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        bilinear(self.width, x, y, &self.heights)
    }
}

/// Stateful row-major traversal over a chunk's cells.
///
/// The cursor borrows its chunk mutably for its own lifetime, so the chunk
/// cannot be dropped or aliased while a cursor is live. It holds no state
/// beyond its position and is cheap to recreate per traversal.
///
/// ```
/// use ridgeline_terrain::TerrainChunk;
///
/// let mut chunk = TerrainChunk::new(1, 4);
/// let mut cursor = chunk.cursor();
/// while cursor.next() {
///     cursor.add(1.0);
/// }
/// assert_eq!(chunk.get(0, 0), 1.0);
/// ```
pub struct ChunkCursor<'a> {
    chunk: &'a mut TerrainChunk,
    width: usize,
    area: usize,
    index: usize,
    x: usize,
    y: usize,
    started: bool,
}

impl<'a> ChunkCursor<'a> {
    fn new(chunk: &'a mut TerrainChunk) -> Self {
        let width = chunk.width();
        let area = chunk.area();
        Self {
            chunk,
            width,
            area,
            index: 0,
            x: 0,
            y: 0,
            started: false,
        }
    }

    /// Current flat index.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Current column (`index % width`).
    #[inline]
    #[must_use]
    pub const fn x(&self) -> usize {
        self.x
    }

    /// Current row (`index / width`).
    #[inline]
    #[must_use]
    pub const fn y(&self) -> usize {
        self.y
    }

    /// Advances to the next cell in row-major order.
    ///
    /// Returns `false` once advancing would move past the final cell.
    /// The very first call yields the first cell, so a plain
    /// `while cursor.next() { .. }` loop visits every cell exactly once.
    pub fn next(&mut self) -> bool {
        if !self.started {
            self.started = true;
            return true;
        }
        if self.index + 1 >= self.area {
            return false;
        }
        self.index += 1;
        self.x = self.index % self.width;
        self.y = self.index / self.width;
        true
    }

    /// Jumps to an arbitrary flat index, clamped into `[0, area - 1]`.
    pub fn seek(&mut self, index: i64) {
        let last = self.area as i64 - 1;
        self.index = index.clamp(0, last) as usize;
        self.x = self.index % self.width;
        self.y = self.index / self.width;
        self.started = true;
    }

    /// Jumps to cell `(x, y)`, clamped into the grid.
    pub fn seek_xy(&mut self, x: i64, y: i64) {
        self.seek(y * self.width as i64 + x);
    }

    /// Height at the cursor's current cell.
    #[inline]
    #[must_use]
    pub fn get(&self) -> f64 {
        self.chunk.get_index(self.index)
    }

    /// Overwrites the cursor's current cell.
    #[inline]
    pub fn set(&mut self, value: f64) {
        self.chunk.set_index(self.index, value);
    }

    /// Accumulates into the cursor's current cell.
    #[inline]
    pub fn add(&mut self, amount: f64) {
        self.chunk.add_index(self.index, amount);
    }
}
