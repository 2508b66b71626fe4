#![allow(clippy::uninlined_format_args)]
use approx::assert_abs_diff_eq;
use seispick_core::{Grid, Transformation, ViewTransform};
use seispick_render::{compose, render_composition, ColorRamp, Colormap, Error, Record};

fn grid(rows: Vec<Vec<f64>>) -> Grid<f64> {
    Grid::from_rows(rows).unwrap()
}

fn gray() -> ColorRamp {
    ColorRamp::parse("gray", &["rgb(0,0,0, 0.0)", "rgb(255,255,255, 1.0)"]).unwrap()
}

#[test]
fn test_equal_weights_average() {
    let records = vec![
        Record::new("A", grid(vec![vec![0.0, 2.0], vec![4.0, 6.0]])).with_weight(50.0),
        Record::new("B", grid(vec![vec![2.0, 0.0], vec![0.0, 2.0]])).with_weight(50.0),
    ];
    let out = compose(&records).unwrap();
    assert_eq!(out.to_rows(), vec![vec![1.0, 1.0], vec![2.0, 4.0]]);
}

#[test]
fn test_unequal_weights() {
    let records = vec![
        Record::new("A", grid(vec![vec![10.0]])).with_weight(3.0),
        Record::new("B", grid(vec![vec![2.0]])).with_weight(1.0),
    ];
    let out = compose(&records).unwrap();
    assert_abs_diff_eq!(out[(0, 0)], 8.0, epsilon = 1e-12);
}

#[test]
fn test_zero_weight_sum() {
    let records = vec![
        Record::new("A", grid(vec![vec![1.0]])).with_weight(0.0),
        Record::new("B", grid(vec![vec![5.0]])).with_weight(0.0),
    ];
    let view = ViewTransform::identity();
    assert!(matches!(
        render_composition(&records, &view, &gray()),
        Err(Error::ZeroWeightSum)
    ));
}

#[test]
fn test_render_follows_view() {
    let records = vec![Record::new(
        "A",
        grid(vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 6.0]]),
    )];
    let view = ViewTransform::from_transformations(vec![Transformation::RotateClockwise]);
    let tex = render_composition(&records, &view, &gray()).unwrap();
    // 2x3 rotated clockwise is 3 rows by 2 columns.
    assert_eq!((tex.width(), tex.height()), (2, 3));
    // Bottom-left source sample (3.0) lands top-left.
    assert_eq!(tex.image.get_pixel(0, 0).0, [128, 128, 128, 255]);
    assert_eq!(tex.image.get_pixel(0, 2).0, [255, 255, 255, 255]);
    assert_abs_diff_eq!(tex.min, 0.0);
    assert_abs_diff_eq!(tex.max, 6.0);
}

#[test]
fn test_preset_endpoints() {
    let ramp = Colormap::VsSurf2.ramp().unwrap();
    assert_eq!(ramp.apply(0.0), [49, 54, 149, 255]);
    assert_eq!(ramp.apply(1.0), [165, 0, 38, 255]);
}
