//! End-to-end pipeline tests: config -> dispersion -> grid -> contours.

use std::collections::BTreeMap;
use wave_diffraction::analytical::wiegel::THETA_KNOTS_DEG;
use wave_diffraction::dispersion::WaveCondition;
use wave_diffraction::field::{
    extract_contours, CancelToken, FieldGrid, GridEngine, GridOutcome, PointModel,
};
use wave_diffraction::{DiffractionConfig, WiegelTable};

fn run_to_field(engine: &GridEngine) -> FieldGrid {
    match engine.run(&CancelToken::new()).finish() {
        GridOutcome::Done(field) => field,
        GridOutcome::Stopped => panic!("run was not cancelled"),
    }
}

fn uniform_table(value: f64) -> WiegelTable {
    let mut rows = BTreeMap::new();
    for &theta in THETA_KNOTS_DEG.iter() {
        rows.insert(theta as u32, vec![vec![value; 13]; 6]);
    }
    WiegelTable::from_rows(&rows).unwrap()
}

#[test]
fn test_sommerfeld_pipeline() {
    let text = r#"{
        "period": 8.0,
        "depth": 10.0,
        "breakwater_length": 80.0,
        "incidence_deg": 90.0,
        "dx": 5.0,
        "x_max": 200.0,
        "y_max": 160.0,
        "levels": "0.2:0.2:0.8"
    }"#;
    let config: DiffractionConfig = serde_json::from_str(text).unwrap();

    let wave = WaveCondition::new(config.period, config.depth).unwrap();
    println!(
        "\n=== Pipeline: T = {} s, h = {} m, L = {:.1} m ===",
        config.period, config.depth, wave.wavelength
    );

    let engine = GridEngine::new(
        wave,
        PointModel::Sommerfeld,
        config.breakwater_length,
        config.incidence_deg,
        config.dx,
        config.dy(),
        config.x_max,
        config.y_max,
    )
    .unwrap();

    // Progress events must be monotone and end at the full row count
    let token = CancelToken::new();
    let mut run = engine.run(&token);
    let mut rows_done = 0;
    for progress in run.by_ref() {
        assert!(progress.rows_done > rows_done);
        rows_done = progress.rows_done;
        assert!(progress.fraction() <= 1.0);
    }
    assert_eq!(rows_done, 33);

    let field = match run.finish() {
        GridOutcome::Done(field) => field,
        GridOutcome::Stopped => panic!("run was not cancelled"),
    };
    assert_eq!(field.nx(), 41);
    assert_eq!(field.ny(), 33);

    let stats = field.finite_stats();
    println!(
        "  field: {}/{} finite, Kd in [{:.3}, {:.3}]",
        stats.finite, stats.total, stats.min, stats.max
    );
    assert_eq!(stats.finite, stats.total);
    assert!(stats.min >= 0.0 && stats.max <= 1.0);
    // A real diffraction field has both sheltered and exposed zones
    assert!(stats.min < 0.5);
    assert!(stats.max > 0.7);

    let levels = config.contour_levels();
    assert_eq!(levels.len(), 4);
    for (&got, want) in levels.iter().zip([0.2, 0.4, 0.6, 0.8]) {
        assert!((got - want).abs() < 1e-9);
    }

    let contours = extract_contours(&field, &levels);
    assert_eq!(contours.len(), 4);
    let total_segments: usize = contours.iter().map(|c| c.segments.len()).sum();
    println!("  contours: {} segments over {} levels", total_segments, contours.len());
    assert!(total_segments > 0);

    // Segments live in grid-index space, inside the grid
    for contour in &contours {
        for seg in &contour.segments {
            for &x in &[seg.x1, seg.x2] {
                assert!((0.0..=(field.nx() - 1) as f64).contains(&x));
            }
            for &y in &[seg.y1, seg.y2] {
                assert!((0.0..=(field.ny() - 1) as f64).contains(&y));
            }
            let (mx, my) = seg.midpoint();
            assert!(mx.is_finite() && my.is_finite());
        }
    }
}

#[test]
fn test_wiegel_pipeline() {
    let wave = WaveCondition::new(8.0, 10.0).unwrap();
    let table = uniform_table(0.5);

    let engine = GridEngine::new(
        wave,
        PointModel::Wiegel(&table),
        60.0,
        90.0,
        10.0,
        10.0,
        100.0,
        100.0,
    )
    .unwrap();
    let field = run_to_field(&engine);

    let stats = field.finite_stats();
    println!(
        "\n=== Wiegel pipeline ===\n  Kd in [{:.3}, {:.3}]",
        stats.min, stats.max
    );
    assert_eq!(stats.finite, stats.total);
    // Two coherent tips of equal strength 0.5 interfere between fully
    // destructive and fully constructive
    assert!(stats.min >= 0.0);
    assert!(stats.max <= 1.0);
    assert!(stats.max > stats.min);

    let (y0, line) = field.centerline();
    assert_eq!(y0, 0.0);
    assert_eq!(line.len(), field.nx());
    assert!(line.iter().all(|v| v.is_finite()));
}

#[test]
fn test_cancellation_discards_field() {
    let wave = WaveCondition::new(8.0, 10.0).unwrap();
    let engine = GridEngine::new(
        wave,
        PointModel::Sommerfeld,
        80.0,
        90.0,
        1.0,
        1.0,
        500.0,
        500.0,
    )
    .unwrap();

    let token = CancelToken::new();
    let mut run = engine.run(&token);

    let first = run.next().expect("at least one chunk before cancelling");
    assert!(first.rows_done < first.rows_total);
    token.cancel();

    assert!(run.next().is_none());
    match run.finish() {
        GridOutcome::Stopped => {}
        GridOutcome::Done(_) => panic!("cancelled run must not produce a field"),
    }
}

#[test]
fn test_sommerfeld_and_wiegel_agree_on_bounds() {
    // The two point models answer the same question; for the same geometry
    // both stay in [0, 1] and produce shading behind the structure
    let wave = WaveCondition::new(6.0, 8.0).unwrap();
    let table = uniform_table(0.4);

    for model in [PointModel::Sommerfeld, PointModel::Wiegel(&table)] {
        let engine =
            GridEngine::new(wave, model, 40.0, 90.0, 5.0, 5.0, 100.0, 80.0).unwrap();
        let field = run_to_field(&engine);
        let stats = field.finite_stats();
        assert_eq!(stats.finite, stats.total);
        assert!(stats.min >= 0.0 && stats.max <= 1.0);
    }
}
