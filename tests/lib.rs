use std::collections::HashSet;
use std::sync::Once;

use tonematrix::{
    instrument::PLUCK_AMPLITUDE,
    render::{LIGHT_OFF_COLOR, LIGHT_ON_COLOR},
    AudioSource, Error, RectangleCatcher, ResonantString, SharedToneMatrix, ToneMatrix,
    STEP_PERIOD,
};

static INIT: Once = Once::new();

fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

const SAMPLE_RATE: u32 = 44100;

#[test]
fn test_single_row_plucked_on_first_sample() {
    init_logger();

    let row = 5;
    let light = 10;
    let mut matrix = ToneMatrix::new(16, light, SAMPLE_RATE).unwrap();
    matrix.toggle_at(light / 2, row as i32 * light + light / 2).unwrap();

    let sample = matrix.next_sample();
    assert_eq!(sample, PLUCK_AMPLITUDE);

    for (r, string) in matrix.instruments().iter().enumerate() {
        assert_eq!(string.cursor(), 1);
        if r == row {
            assert_eq!(string.samples()[1], PLUCK_AMPLITUDE);
        } else {
            assert!(string.samples().iter().all(|&s| s == 0.0));
        }
    }

    // column 0 stays dormant while the sweep is elsewhere
    for _ in 0..STEP_PERIOD {
        matrix.next_sample();
    }
    assert_eq!(matrix.column(), 2);
    let string = matrix.instrument(row).unwrap();
    assert_eq!(string.cursor(), (1 + STEP_PERIOD as usize) % string.buffer_len());
}

#[test]
fn test_audio_pull_through_shared_handle() {
    init_logger();

    let light = 8;
    let shared = SharedToneMatrix::new(ToneMatrix::new(4, light, SAMPLE_RATE).unwrap());
    // rows 0 and 3 in column 1
    shared.toggle_at(light + 1, 1).unwrap();
    shared.toggle_at(light + 1, 3 * light + 1).unwrap();

    let mut source = shared.clone();
    let mut buffer = vec![0.0f32; STEP_PERIOD as usize];
    source.fill_buffer(&mut buffer);
    assert!(buffer.iter().all(|&s| s == 0.0));

    let mut next = [0.0f32; 1];
    source.fill_buffer(&mut next);
    assert!((next[0] - 2.0 * PLUCK_AMPLITUDE).abs() < 1e-6);
    assert_eq!(shared.column(), 2);
}

#[test]
fn test_draw_tiles_grid() {
    init_logger();

    for (size, light) in [(4, 3), (9, 17), (18, 5)] {
        let mut matrix = ToneMatrix::new(size, light, SAMPLE_RATE).unwrap();
        matrix.toggle_at(0, 0).unwrap();

        let mut catcher = RectangleCatcher::new();
        matrix.draw(&mut catcher);
        assert_eq!(catcher.len(), size * size);

        let mut covered = HashSet::new();
        for drawn in catcher.iter() {
            let r = drawn.bounds;
            assert_eq!((r.width, r.height), (light, light));
            assert!(covered.insert((r.x / light, r.y / light)));
            let expected = if (r.x, r.y) == (0, 0) {
                LIGHT_ON_COLOR
            } else {
                LIGHT_OFF_COLOR
            };
            assert_eq!(drawn.color, expected);
        }
        assert_eq!(covered.len(), size * size);
    }
}

#[test]
fn test_grow_then_replay() {
    init_logger();

    let light = 4;
    let mut matrix = ToneMatrix::new(4, light, SAMPLE_RATE).unwrap();
    for row in 0..4 {
        matrix.toggle_at(1, row * light + 1).unwrap();
    }
    matrix.next_sample();
    let ringing: Vec<ResonantString> = matrix.instruments().to_vec();

    matrix.resize(9).unwrap();
    assert_eq!(&matrix.instruments()[..4], ringing.as_slice());
    for row in 0..9 {
        for col in 0..9 {
            assert_eq!(matrix.is_on(row, col), col == 0 && row < 4);
        }
    }
    for string in &matrix.instruments()[4..] {
        assert!(string.samples().iter().all(|&s| s == 0.0));
    }

    // sweep restarted: column 0 fires again on the very next sample
    assert_eq!((matrix.time(), matrix.column()), (0, 0));
    matrix.next_sample();
    for row in 0..4 {
        let string = matrix.instrument(row).unwrap();
        assert_eq!(string.cursor(), 1);
        assert_eq!(string.samples()[1], PLUCK_AMPLITUDE);
    }
}

#[test]
fn test_invalid_parameters() {
    init_logger();

    assert!(matches!(
        ResonantString::new(SAMPLE_RATE as f32, SAMPLE_RATE),
        Err(Error::InvalidParameter(_))
    ));
    assert!(matches!(
        ToneMatrix::new(0, 10, SAMPLE_RATE),
        Err(Error::InvalidParameter(_))
    ));

    let mut matrix = ToneMatrix::new(4, 10, SAMPLE_RATE).unwrap();
    assert!(matches!(matrix.resize(0), Err(Error::InvalidParameter(_))));
    assert!(matches!(matrix.toggle_at(40, 0), Err(Error::InvalidParameter(_))));
    assert_eq!(matrix.grid_size(), 4);
}

#[test]
fn test_ten_hz_string_scenario() {
    let mut string = ResonantString::new(1.0, 10).unwrap();
    assert_eq!(string.buffer_len(), 10);
    string.pluck();

    let first_cycle: Vec<f32> = (0..10).map(|_| string.next_sample()).collect();
    assert_eq!(&first_cycle[..5], &[0.05; 5]);
    assert_eq!(&first_cycle[5..], &[-0.05; 5]);

    let second_cycle: Vec<f32> = (0..10).map(|_| string.next_sample()).collect();
    assert!(second_cycle[0] > 0.0 && second_cycle[0] < 0.05);
    assert!(second_cycle.iter().all(|s| s.abs() < 0.05));
}
