/// Core sequencer logic - light grid, sweep position and the strings it plucks
use log::{debug, info};

use crate::audio::AudioSource;
use crate::error::{Error, Result};
use crate::instrument::ResonantString;
use crate::render::{DrawSink, Rect, LIGHT_OFF_COLOR, LIGHT_ON_COLOR};

pub mod playback;
pub mod tuning;

use tuning::frequency_for_row;

/// Number of emitted samples between two sweep steps.
pub const STEP_PERIOD: u64 = 8192;

/// Square matrix of lights, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<bool>,
    size: usize,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![false; size * size],
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        if row >= self.size || col >= self.size {
            return false;
        }
        self.cells[row * self.size + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        if row < self.size && col < self.size {
            self.cells[row * self.size + col] = value;
        }
    }

    /// Flips a light and returns its new state.
    pub fn toggle(&mut self, row: usize, col: usize) -> bool {
        let value = !self.get(row, col);
        self.set(row, col, value);
        value
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn fill(&mut self) {
        self.cells.fill(true);
    }

    /// Rows whose light is on in `col`.
    pub fn column_rows(&self, col: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.size).filter(move |&row| self.get(row, col))
    }

    /// Copy at a new size. The overlapping top-left block keeps its lights,
    /// everything else starts off.
    pub fn resized(&self, size: usize) -> Self {
        let mut grid = Grid::new(size);
        let overlap = self.size.min(size);
        for row in 0..overlap {
            for col in 0..overlap {
                grid.set(row, col, self.get(row, col));
            }
        }
        grid
    }

    /// Reports every light to `sink` as a `light_size` square, row by row.
    /// Coordinates saturate at `i32::MAX`.
    pub fn draw<S: DrawSink + ?Sized>(&self, light_size: i32, sink: &mut S) {
        for row in 0..self.size {
            for col in 0..self.size {
                let x = i32::try_from(col).unwrap_or(i32::MAX).saturating_mul(light_size);
                let y = i32::try_from(row).unwrap_or(i32::MAX).saturating_mul(light_size);
                let color = if self.get(row, col) {
                    LIGHT_ON_COLOR
                } else {
                    LIGHT_OFF_COLOR
                };
                sink.emit_rectangle(Rect::new(x, y, light_size, light_size), color);
            }
        }
    }
}

/// Pixel width of a `grid_size x grid_size` grid of `light_size` lights.
/// Rejects sizes that are not positive or whose product overflows `i32`.
fn grid_extent(grid_size: usize, light_size: i32) -> Result<i32> {
    if grid_size == 0 {
        return Err(Error::invalid("grid size must be positive"));
    }
    if light_size <= 0 {
        return Err(Error::invalid(format!(
            "light size must be positive, got {light_size}"
        )));
    }
    i32::try_from(grid_size)
        .ok()
        .and_then(|size| size.checked_mul(light_size))
        .ok_or_else(|| {
            Error::invalid(format!(
                "{grid_size} lights of {light_size}px do not fit in i32 pixel coordinates"
            ))
        })
}

/// Step sequencer driving one plucked string per row.
///
/// Every [`STEP_PERIOD`] samples the strings lit in the current column are
/// plucked and the sweep moves one column to the right, wrapping at the edge.
/// Tempo therefore follows the sample rate; there is no separate clock.
#[derive(Debug, Clone)]
pub struct ToneMatrix {
    grid: Grid,
    instruments: Vec<ResonantString>,
    light_size: i32,
    sample_rate: u32,
    pressed: bool,
    time: u64,
    column: usize,
}

impl ToneMatrix {
    pub fn new(grid_size: usize, light_size: i32, sample_rate: u32) -> Result<Self> {
        grid_extent(grid_size, light_size)?;

        let instruments = (0..grid_size)
            .map(|row| ResonantString::new(frequency_for_row(row), sample_rate))
            .collect::<Result<Vec<_>>>()?;

        info!("tone matrix {grid_size}x{grid_size} at {sample_rate} Hz");

        Ok(Self {
            grid: Grid::new(grid_size),
            instruments,
            light_size,
            sample_rate,
            pressed: false,
            time: 0,
            column: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_size(&self) -> usize {
        self.grid.size()
    }

    pub fn light_size(&self) -> i32 {
        self.light_size
    }

    /// Width and height of the whole grid in pixels.
    pub fn extent(&self) -> i32 {
        // validated in `new` and `resize`
        self.light_size * self.grid.size() as i32
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    /// Column that will be plucked at the next step boundary.
    pub fn column(&self) -> usize {
        self.column
    }

    /// State the most recent press left its light in; drags paint with it.
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_on(&self, row: usize, col: usize) -> bool {
        self.grid.get(row, col)
    }

    pub fn instrument(&self, row: usize) -> Option<&ResonantString> {
        self.instruments.get(row)
    }

    pub fn instruments(&self) -> &[ResonantString] {
        &self.instruments
    }

    /// Maps grid-local pixel coordinates to `(row, col)`.
    pub fn cell_at(&self, x: i32, y: i32) -> Result<(usize, usize)> {
        if x < 0 || y < 0 {
            return Err(Error::invalid(format!("pointer ({x}, {y}) is outside the grid")));
        }
        let row = (y / self.light_size) as usize;
        let col = (x / self.light_size) as usize;
        if row >= self.grid.size() || col >= self.grid.size() {
            return Err(Error::invalid(format!("pointer ({x}, {y}) is outside the grid")));
        }
        Ok((row, col))
    }

    /// Mouse press: flips the light under the pointer and remembers the new
    /// state for subsequent drags. Returns that state.
    pub fn toggle_at(&mut self, x: i32, y: i32) -> Result<bool> {
        let (row, col) = self.cell_at(x, y)?;
        self.pressed = self.grid.toggle(row, col);
        debug!("light ({row}, {col}) -> {}", self.pressed);
        Ok(self.pressed)
    }

    /// Mouse drag: sets the light under the pointer to the state of the last press.
    pub fn paint_at(&mut self, x: i32, y: i32) -> Result<()> {
        let (row, col) = self.cell_at(x, y)?;
        if self.grid.get(row, col) != self.pressed {
            self.grid.set(row, col, self.pressed);
            debug!("light ({row}, {col}) -> {}", self.pressed);
        }
        Ok(())
    }

    /// Reports every light to `sink`, row by row.
    pub fn draw<S: DrawSink + ?Sized>(&self, sink: &mut S) {
        self.grid.draw(self.light_size, sink);
    }

    /// Produces one output sample. Called once per sample from the audio callback.
    pub fn next_sample(&mut self) -> f32 {
        if self.time % STEP_PERIOD == 0 {
            for row in self.grid.column_rows(self.column) {
                self.instruments[row].pluck();
            }
            self.column = (self.column + 1) % self.grid.size();
        }
        self.time += 1;

        self.instruments
            .iter_mut()
            .map(ResonantString::next_sample)
            .sum()
    }

    /// Changes the grid to `new_size x new_size`.
    ///
    /// Lights and strings in the overlapping range are kept as they are (a
    /// ringing string keeps ringing), new rows get freshly tuned silent strings
    /// and new lights start off. The sweep restarts from column 0. Nothing is
    /// modified if `new_size` is invalid.
    pub fn resize(&mut self, new_size: usize) -> Result<()> {
        grid_extent(new_size, self.light_size)?;

        let mut instruments = Vec::with_capacity(new_size);
        instruments.extend(self.instruments.iter().take(new_size).cloned());
        for row in instruments.len()..new_size {
            instruments.push(ResonantString::new(frequency_for_row(row), self.sample_rate)?);
        }
        let grid = self.grid.resized(new_size);

        info!("resizing tone matrix {0}x{0} -> {new_size}x{new_size}", self.grid.size());

        self.instruments = instruments;
        self.time = 0;
        self.column = 0;
        self.grid = grid;
        Ok(())
    }
}

impl AudioSource for ToneMatrix {
    fn fill_buffer(&mut self, samples: &mut [f32]) {
        for sample in samples.iter_mut() {
            *sample = self.next_sample();
        }
    }
}
