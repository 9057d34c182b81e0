mod common;

use cgmath::{Deg, InnerSpace, Matrix4, Rad, SquareMatrix, Vector4};
use common::test_utils::{assert_close, assert_matrix_close};
use instant::Duration;
use obamoid::{
    settings::Settings,
    transform::{
        Matrix, OPENGL_TO_WGPU_MATRIX, Transforms, orthographic, orthonormalize, projection,
        rotate_x, rotate_y, rotate_z,
    },
};

fn project(m: &Matrix, z: f32) -> f32 {
    let clip = *m * Vector4::new(0.0, 0.0, z, 1.0);
    clip.z / clip.w
}

#[test]
fn rotations_match_cgmath() {
    let angle = Rad(0.7);
    let mut m = Matrix::identity();
    rotate_x(&mut m, angle);
    assert_matrix_close(&m, &Matrix4::from_angle_x(angle));

    let mut m = Matrix::identity();
    rotate_y(&mut m, angle);
    assert_matrix_close(&m, &Matrix4::from_angle_y(angle));

    let mut m = Matrix::identity();
    rotate_z(&mut m, angle);
    assert_matrix_close(&m, &Matrix4::from_angle_z(angle));
}

#[test]
fn rotations_compose_on_the_left() {
    let mut m = Matrix::identity();
    rotate_y(&mut m, Rad(0.3));
    rotate_x(&mut m, Rad(-1.1));
    let expected = Matrix4::from_angle_x(Rad(-1.1)) * Matrix4::from_angle_y(Rad(0.3));
    assert_matrix_close(&m, &expected);
}

#[test]
fn rotation_keeps_translation() {
    let mut m = Matrix::from_translation([0.0, 0.3, 0.0].into());
    rotate_y(&mut m, Deg(90.0));
    rotate_x(&mut m, Deg(45.0));
    assert_eq!(m.w, Vector4::new(0.0, 0.3, 0.0, 1.0));
}

#[test]
fn opposite_rotations_cancel() {
    let angles = [
        -7.5,
        -std::f32::consts::PI,
        -0.9,
        0.0,
        0.9,
        std::f32::consts::FRAC_PI_2,
        std::f32::consts::PI,
        7.5,
        20.0,
    ];
    let rotations: [fn(&mut Matrix, Rad<f32>); 3] = [
        rotate_x::<Rad<f32>>,
        rotate_y::<Rad<f32>>,
        rotate_z::<Rad<f32>>,
    ];
    for rotate in rotations {
        for angle in angles {
            let mut m = Matrix::identity();
            rotate(&mut m, Rad(angle));
            rotate(&mut m, Rad(-angle));
            assert_matrix_close(&m, &Matrix::identity());
        }
    }
}

#[test]
fn rotation_round_trips() {
    let mut m = Matrix::from_translation([1.0, 2.0, 3.0].into());
    let original = m;
    rotate_z(&mut m, Rad(2.5));
    rotate_z(&mut m, Rad(-2.5));
    assert_matrix_close(&m, &original);
}

#[test]
fn projection_maps_near_and_far_planes() {
    let p = projection(Deg(40.0), 800.0, 600.0, 1.0, 10.0);
    assert_close(project(&p, -1.0), -1.0);
    assert_close(project(&p, -10.0), 1.0);

    let wgpu = OPENGL_TO_WGPU_MATRIX * p;
    assert_close(project(&wgpu, -1.0), 0.0);
    assert_close(project(&wgpu, -10.0), 1.0);
}

#[test]
fn projection_scales_by_the_longer_side() {
    let focal = 0.5 / (20.0f32.to_radians()).tan();

    let landscape = projection(Deg(40.0), 800.0, 400.0, 1.0, 10.0);
    assert_close(landscape.x.x, focal * 0.5);
    assert_close(landscape.y.y, focal);

    let portrait = projection(Deg(40.0), 400.0, 800.0, 1.0, 10.0);
    assert_close(portrait.x.x, focal);
    assert_close(portrait.y.y, focal * 0.5);

    assert_eq!(landscape.z.w, -1.0);
    assert_eq!(landscape.w.w, 0.0);
}

#[test]
fn orthographic_has_no_perspective() {
    let o = orthographic(600.0, 300.0, 4.0, 2.0);
    assert_close(o.x.x, 1.0);
    assert_close(o.y.y, 2.0);
    assert_close(o.z.z, -0.25);
    assert_eq!(o.w.w, 1.0);
    assert_eq!(o.z.w, 0.0);
}

#[test]
fn orthonormalize_removes_drift() {
    let mut m = Matrix::from_translation([0.0, 0.3, 0.0].into());
    for _ in 0..10_000 {
        rotate_y(&mut m, Rad(0.0137));
        rotate_x(&mut m, Rad(-0.0071));
    }
    orthonormalize(&mut m);

    let x = m.x.truncate();
    let y = m.y.truncate();
    let z = m.z.truncate();
    assert_close(x.magnitude(), 1.0);
    assert_close(y.magnitude(), 1.0);
    assert_close(z.magnitude(), 1.0);
    assert!(x.dot(y).abs() < 1e-5);
    assert!(x.dot(z).abs() < 1e-5);
    assert_close(m.w.y, 0.3);
}

#[test]
fn initial_transforms_place_camera_and_model() {
    let settings = Settings::default();
    let t = Transforms::new(&settings, 800, 600);
    assert_eq!(t.model, Matrix::from_translation([0.0, 0.3, 0.0].into()));
    assert_eq!(t.view, Matrix::from_translation([0.0, 0.0, -3.0].into()));
    assert_eq!(t.projection, projection(Deg(40.0), 800.0, 600.0, 1.0, 10.0));
}

#[test]
fn auto_rotation_follows_elapsed_time() {
    let settings = Settings::default();
    let mut t = Transforms::new(&settings, 800, 600);
    t.auto_rotate(Duration::from_millis(1000), settings.auto_rotation_speed);

    let mut expected = Matrix::from_translation([0.0, 0.3, 0.0].into());
    rotate_y(&mut expected, Rad(1.0));
    assert_matrix_close(&t.model, &expected);

    let before = t.model;
    t.auto_rotate(Duration::ZERO, settings.auto_rotation_speed);
    assert_eq!(t.model, before);
}

#[test]
fn uniform_carries_wgpu_depth_range() {
    let settings = Settings::default();
    let t = Transforms::new(&settings, 640, 480);
    let uniform = t.to_uniform();
    let model: [[f32; 4]; 4] = t.model.into();
    let projection: [[f32; 4]; 4] = (OPENGL_TO_WGPU_MATRIX * t.projection).into();
    assert_eq!(uniform.model, model);
    assert_eq!(uniform.projection, projection);
    assert_eq!(std::mem::size_of_val(&uniform), 3 * 64);
}
