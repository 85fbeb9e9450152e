use sparsenet::model::Affine2;
use sparsenet::transform::{
    flattened_to_image_matrix, flattened_to_matrix, image_matrix_to_flattened,
    matrix_to_flattened, GradientParams, ImageTransformParams,
};

#[test]
fn gradient_round_trip_is_exact() {
    let p = GradientParams { start_x: 0.0, start_y: 0.5, end_x: 1.0, end_y: 0.5, scale: Some(1.0) };
    let m = flattened_to_matrix(&p);
    assert_eq!(m, Affine2([[1.0, -0.0, 0.0], [0.0, 1.0, 0.5]]));
    let back = matrix_to_flattened(&m);
    assert_eq!(back.start_x, 0.0);
    assert_eq!(back.start_y, 0.5);
    assert_eq!(back.end_x, 1.0);
    assert_eq!(back.end_y, 0.5);
    assert_eq!(back.scale, Some(1.0));
}

#[test]
fn gradient_scale_renormalizes_direction() {
    let p = GradientParams { start_x: 1.0, start_y: 1.0, end_x: 4.0, end_y: 5.0, scale: Some(10.0) };
    let m = flattened_to_matrix(&p);
    // direction (3,4) has length 5 -> (6,8)
    assert_eq!(m.x_axis().x, 6.0);
    assert_eq!(m.x_axis().y, 8.0);
    // perpendicular basis is the direction rotated by 90 degrees
    assert_eq!(m.y_axis().x, -8.0);
    assert_eq!(m.y_axis().y, 6.0);
    let back = matrix_to_flattened(&m);
    assert_eq!((back.end_x, back.end_y), (7.0, 9.0));
    assert_eq!(back.scale, Some(10.0));

    let unscaled = flattened_to_matrix(&GradientParams { scale: None, ..p });
    assert_eq!(unscaled.x_axis().x, 3.0);
    assert_eq!(unscaled.x_axis().y, 4.0);
}

#[test]
fn rotated_non_uniform_image_matrix_round_trips() {
    let (s, c) = 30f64.to_radians().sin_cos();
    let (sx, sy) = (2.0, 0.5);
    let m = Affine2([[c * sx, -s * sy, 12.0], [s * sx, c * sy, -4.0]]);
    let p = image_matrix_to_flattened(&m);
    assert_eq!(p.rotation, 30.0);
    assert_eq!(p.scale_x, 2.0);
    assert_eq!(p.scale_y, 0.5);
    assert_eq!(p.skew_x, 0.0);
    assert_eq!((p.offset_x, p.offset_y), (12.0, -4.0));
    assert!(!p.flip_x && !p.flip_y);
    let back = flattened_to_image_matrix(&p);
    assert!(back.approx_eq(&m, 1e-2), "{:?} vs {:?}", back, m);
}

#[test]
fn skewed_matrix_recovers_x_skew() {
    let p = ImageTransformParams {
        rotation: 15.0,
        scale_x: 1.5,
        scale_y: 0.75,
        skew_x: 20.0,
        offset_x: 3.0,
        ..Default::default()
    };
    let m = flattened_to_image_matrix(&p);
    let q = image_matrix_to_flattened(&m);
    assert_eq!(q.rotation, 15.0);
    assert_eq!(q.skew_x, 20.0);
    assert_eq!(q.scale_x, 1.5);
    assert_eq!(q.scale_y, 0.75);
    assert!(flattened_to_image_matrix(&q).approx_eq(&m, 1e-2));
}

#[test]
fn reflection_is_reported_as_flip_y() {
    let p = ImageTransformParams { flip_y: true, scale_y: 2.0, ..Default::default() };
    let m = flattened_to_image_matrix(&p);
    assert_eq!(m, Affine2([[1.0, 0.0, 0.0], [0.0, -2.0, 0.0]]));
    let q = image_matrix_to_flattened(&m);
    assert!(q.flip_y);
    assert_eq!(q.scale_y, 2.0);
    assert!(flattened_to_image_matrix(&q).approx_eq(&m, 1e-9));

    // A horizontal flip reads back as a half-turn plus a vertical flip.
    let h = flattened_to_image_matrix(&ImageTransformParams { flip_x: true, ..Default::default() });
    let r = image_matrix_to_flattened(&h);
    assert_eq!(r.rotation.abs(), 180.0);
    assert!(r.flip_y);
    assert!(flattened_to_image_matrix(&r).approx_eq(&h, 1e-2));
}

#[test]
fn decomposition_rounds_outputs() {
    let m = Affine2([[1.0, 0.0, 0.123456], [0.0, 1.0, 9.87654]]);
    let p = image_matrix_to_flattened(&m);
    assert_eq!(p.offset_x, 0.123);
    assert_eq!(p.offset_y, 9.877);
}
