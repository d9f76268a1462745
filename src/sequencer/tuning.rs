/// Row tuning - stacked major pentatonic scales descending from a high C

/// Half-step offsets of the five notes in one octave of the scale, counted downwards.
pub const PENTATONIC_STEPS: [i32; 5] = [0, -3, -5, -8, -10];

/// Frequency of row 0, the high C at `220 * 2^(39/12)` Hz.
pub fn base_frequency() -> f32 {
    220.0 * 2.0_f32.powf((30.0 + 9.0) / 12.0)
}

/// Frequency of the string on `row`. Every five rows drop one octave.
/// Depends only on the row index, not on the grid size.
pub fn frequency_for_row(row: usize) -> f32 {
    let octave = (row / PENTATONIC_STEPS.len()) as i32;
    let half_steps = -12 * octave + PENTATONIC_STEPS[row % PENTATONIC_STEPS.len()];
    base_frequency() * 2.0_f32.powf(half_steps as f32 / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-3 * a.abs().max(b.abs())
    }

    #[test]
    fn test_row_zero_is_base() {
        assert!(approx_eq(frequency_for_row(0), 2093.0045));
    }

    #[test]
    fn test_rows_descend() {
        for row in 1..40 {
            assert!(frequency_for_row(row) < frequency_for_row(row - 1));
        }
    }

    #[test]
    fn test_octave_every_five_rows() {
        for row in 0..20 {
            assert!(approx_eq(
                frequency_for_row(row + 5) * 2.0,
                frequency_for_row(row)
            ));
        }
    }

    #[test]
    fn test_pentatonic_offsets() {
        // C, A, G, E, D
        let expected = [2093.0045, 1760.0, 1567.9817, 1318.5103, 1174.6592];
        for (row, hz) in expected.into_iter().enumerate() {
            assert!(approx_eq(frequency_for_row(row), hz), "row {row}");
        }
    }
}
