mod common;

use std::fs;
use std::thread;

use common::{assert_pixel_density, assert_png, cleanup, renderer, test_style};
use rulemaker::{BifurcationScan, PlotError, Timeseries};

fn reference_scan() -> BifurcationScan<'static> {
    BifurcationScan {
        p_values: &[0.1, 0.2, 0.3, 0.4, 0.5],
        asym_low: &[0.0, 0.0, 0.0, 0.1, 0.4],
        asym_high: &[1.0, 1.0, 0.95, 0.9, 0.6],
        p_c: 0.35,
    }
}

#[test]
fn reference_scenario_writes_default_bifurcation_png() {
    let renderer = renderer("bif_default");

    let path = renderer
        .render_bifurcation(&reference_scan(), None)
        .expect("render bifurcation");

    assert!(path.ends_with("bifurcation.png"));
    assert_eq!(path, renderer.figure_dir().path().join("bifurcation.png"));
    assert!(fs::metadata(&path).unwrap().len() > 0);
    assert_png(&path);
    assert_pixel_density(&path, test_style().dpi);

    cleanup(&renderer);
}

#[test]
fn threshold_outside_scan_still_renders() {
    let renderer = renderer("bif_outside");
    let scan = BifurcationScan {
        p_c: 0.9,
        ..reference_scan()
    };
    let target = renderer.figure_dir().path().join("outside.png");

    let path = renderer.render_bifurcation(&scan, Some(&target)).unwrap();
    assert_eq!(path, target);
    assert_png(&path);

    cleanup(&renderer);
}

#[test]
fn unequal_series_are_rejected_without_writing() {
    let renderer = renderer("bif_shape");
    let short_low = BifurcationScan {
        asym_low: &[0.0, 0.0, 0.1],
        ..reference_scan()
    };
    let err = renderer.render_bifurcation(&short_low, None).unwrap_err();
    assert!(
        matches!(
            err,
            PlotError::ShapeMismatch {
                expected: 5,
                actual: 3,
                ..
            }
        ),
        "unexpected error: {err}"
    );

    let long_high = BifurcationScan {
        asym_high: &[1.0, 1.0, 0.95, 0.9, 0.6, 0.5],
        ..reference_scan()
    };
    assert!(
        renderer
            .render_bifurcation(&long_high, None)
            .unwrap_err()
            .is_shape_mismatch()
    );
    assert!(!renderer.figure_dir().path().join("bifurcation.png").exists());

    cleanup(&renderer);
}

#[test]
fn rendering_twice_overwrites_the_same_file() {
    let renderer = renderer("bif_twice");
    let first = renderer.render_bifurcation(&reference_scan(), None).unwrap();
    fs::write(&first, b"clobbered").unwrap();

    let second = renderer.render_bifurcation(&reference_scan(), None).unwrap();
    assert_eq!(first, second);
    assert_png(&second);

    cleanup(&renderer);
}

#[test]
fn distinct_paths_render_in_parallel() {
    let renderer = renderer("bif_parallel");
    let trajectories = vec![vec![0.1, 0.2, 0.3], vec![0.9, 0.8, 0.7]];
    let series = Timeseries {
        time: &[0.0, 1.0, 2.0],
        trajectories: &trajectories,
        p: 0.3,
        p_c: 0.42,
        initial_conditions: (0.1, 0.9),
    };

    let (ts, bif) = thread::scope(|s| {
        let ts = s.spawn(|| renderer.render_timeseries(&series, None));
        let bif = s.spawn(|| renderer.render_bifurcation(&reference_scan(), None));
        (ts.join().unwrap(), bif.join().unwrap())
    });
    assert_png(&ts.unwrap());
    assert_png(&bif.unwrap());

    cleanup(&renderer);
}

#[test]
fn csv_sidecar_round_trips_through_table() {
    let renderer = renderer("bif_csv").with_csv_export(true);
    let path = renderer.render_bifurcation(&reference_scan(), None).unwrap();

    let text = fs::read_to_string(path.with_extension("csv")).unwrap();
    let table = rulemaker::data::BifurcationTable::parse(&text).unwrap();
    assert_eq!(table.p_values, reference_scan().p_values);
    assert_eq!(table.asym_high, reference_scan().asym_high);

    cleanup(&renderer);
}

#[test]
fn single_point_and_wide_scans_render() {
    let renderer = renderer("bif_shapes");
    let single = BifurcationScan {
        p_values: &[0.4],
        asym_low: &[0.2],
        asym_high: &[0.8],
        p_c: 0.4,
    };
    let path = renderer
        .render_bifurcation(&single, Some(&renderer.figure_dir().path_for("single.png")))
        .expect("render single point");
    assert_png(&path);

    let wide = BifurcationScan {
        p_values: &[1e3, 1e5, 1e7, 1e9],
        asym_low: &[0.0, 0.0, 0.5, 1.0],
        asym_high: &[1.0, 1.0, 1.0, 1.0],
        p_c: 5e6,
    };
    let path = renderer
        .render_bifurcation(&wide, Some(&renderer.figure_dir().path_for("wide.png")))
        .expect("render wide scan");
    assert_png(&path);

    cleanup(&renderer);
}

#[test]
fn unplottable_p_range_is_a_render_error() {
    let renderer = renderer("bif_extreme");
    let scan = BifurcationScan {
        p_values: &[-f64::MAX, f64::MAX],
        asym_low: &[0.0, 0.0],
        asym_high: &[1.0, 1.0],
        p_c: 0.0,
    };
    let err = renderer.render_bifurcation(&scan, None).unwrap_err();
    assert!(matches!(err, PlotError::Render(_)), "unexpected error: {err}");
    assert!(!renderer.figure_dir().path().join("bifurcation.png").exists());

    cleanup(&renderer);
}
