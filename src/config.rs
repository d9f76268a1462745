/// Front-end configuration - window geometry, selectable grid sizes and audio fallback
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Used to tune the strings when no output device could be opened.
    pub fallback_sample_rate: u32,
    pub grid_size: usize,
    pub grid_sizes: Vec<usize>,
    pub min_light_size: i32,
    pub window_padding: f32,
    pub window_size: [f32; 2],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fallback_sample_rate: 44100,
            grid_size: 16,
            grid_sizes: vec![4, 6, 8, 9, 12, 16, 18],
            min_light_size: 5,
            window_padding: 20.0,
            window_size: [800.0, 800.0],
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.grid_sizes.is_empty() || self.grid_sizes.contains(&0) {
            return Err(Error::invalid("grid sizes must be a non-empty list of positive sizes"));
        }
        if !self.grid_sizes.contains(&self.grid_size) {
            return Err(Error::invalid(format!(
                "grid size {} is not one of {:?}",
                self.grid_size, self.grid_sizes
            )));
        }
        if self.min_light_size <= 0 {
            return Err(Error::invalid("minimum light size must be positive"));
        }
        Ok(())
    }

    /// Largest light size that fits the biggest selectable grid inside a padded
    /// canvas whose shorter side is `canvas_min_dimension` pixels.
    pub fn light_size_for(&self, canvas_min_dimension: f32) -> i32 {
        let largest = self
            .grid_sizes
            .iter()
            .copied()
            .max()
            .unwrap_or(self.grid_size)
            .max(1);
        let usable = canvas_min_dimension - 2.0 * self.window_padding;
        ((usable / largest as f32) as i32).max(self.min_light_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_size, 16);
    }

    #[test]
    fn test_validate_rejects_unknown_size() {
        let config = Config {
            grid_size: 7,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidParameter(_))));

        let config = Config {
            grid_sizes: vec![],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_light_size_fits_largest_grid() {
        let config = Config::default();
        // (800 - 40) / 18
        assert_eq!(config.light_size_for(800.0), 42);
        assert!(config.light_size_for(800.0) * 18 <= 760);
        assert_eq!(config.light_size_for(50.0), config.min_light_size);
    }
}
