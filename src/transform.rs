//! Model, view and projection matrices.
//!
//! All matrices are column-major [`cgmath::Matrix4<f32>`]; `AsRef<[f32; 16]>`
//! gives the flat layout the shaders consume. Rotations are applied
//! incrementally and in place: every call left-multiplies a rotation into
//! the upper 3x3 block, which keeps the translation column intact.
//!
//! [`projection`] follows the GL clip convention (z in `[-1, 1]`). The
//! remapping to the `[0, 1]` depth range wgpu expects happens once, when the
//! matrices are packed into a [`TransformUniform`].

use cgmath::{InnerSpace, Matrix4, Rad, SquareMatrix, Vector3};
use instant::Duration;

use crate::settings::Settings;

pub type Matrix = Matrix4<f32>;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Left-multiply a rotation about `axis` into the rotation block of `m`.
///
/// Only the first three rows of the first three columns change; the
/// translation column stays where it is. For a matrix without translation the
/// result equals `R(axis, angle) * m`.
pub fn rotate<A: Into<Rad<f32>>>(m: &mut Matrix, axis: Axis, angle: A) {
    let (s, c) = angle.into().0.sin_cos();
    for col in [&mut m.x, &mut m.y, &mut m.z] {
        match axis {
            Axis::X => {
                let (y, z) = (col.y, col.z);
                col.y = c * y - s * z;
                col.z = c * z + s * y;
            }
            Axis::Y => {
                let (x, z) = (col.x, col.z);
                col.x = c * x + s * z;
                col.z = c * z - s * x;
            }
            Axis::Z => {
                let (x, y) = (col.x, col.y);
                col.x = c * x - s * y;
                col.y = c * y + s * x;
            }
        }
    }
}

pub fn rotate_x<A: Into<Rad<f32>>>(m: &mut Matrix, angle: A) {
    rotate(m, Axis::X, angle)
}

pub fn rotate_y<A: Into<Rad<f32>>>(m: &mut Matrix, angle: A) {
    rotate(m, Axis::Y, angle)
}

pub fn rotate_z<A: Into<Rad<f32>>>(m: &mut Matrix, angle: A) {
    rotate(m, Axis::Z, angle)
}

/// Perspective projection with a vertical field of view.
///
/// Unlike `cgmath::perspective`, the x and y scales are corrected by the
/// *longer* canvas side (`height / max` and `width / max`) rather than by the
/// aspect ratio, and the focal length is `0.5 / tan(fov / 2)`. Keep it that
/// way: the framing of the mesh depends on it.
pub fn projection<A: Into<Rad<f32>>>(
    fov: A,
    width: f32,
    height: f32,
    z_near: f32,
    z_far: f32,
) -> Matrix {
    let focal = 0.5 / (fov.into().0 * 0.5).tan();
    let max = width.max(height);
    let depth = z_far - z_near;
    #[rustfmt::skip]
    let m = Matrix4::new(
        focal * (height / max), 0.0, 0.0, 0.0,
        0.0, focal * (width / max), 0.0, 0.0,
        0.0, 0.0, -(z_far + z_near) / depth, -1.0,
        0.0, 0.0, (-2.0 * z_far * z_near) / depth, 0.0,
    );
    m
}

/// Flat projection without perspective divide, scaled the same way as
/// [`projection`].
pub fn orthographic(width: f32, height: f32, depth: f32, scale: f32) -> Matrix {
    let max = width.max(height);
    #[rustfmt::skip]
    let m = Matrix4::new(
        scale * height / max, 0.0, 0.0, 0.0,
        0.0, scale * width / max, 0.0, 0.0,
        0.0, 0.0, -1.0 / depth, 0.0,
        0.0, 0.0, 0.0, 1.0,
    );
    m
}

/// Gram-Schmidt on the rotation block, removing drift from long chains of
/// incremental rotations. Assumes the block carries no scale.
pub fn orthonormalize(m: &mut Matrix) {
    let x = m.x.truncate().normalize();
    let y = m.y.truncate();
    let y = (y - x * x.dot(y)).normalize();
    let z: Vector3<f32> = x.cross(y);
    m.x = x.extend(m.x.w);
    m.y = y.extend(m.y.w);
    m.z = z.extend(m.z.w);
}

/// The raw matrices as stored in the uniform buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

/// The model/view/projection triple of the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Transforms {
    pub model: Matrix,
    pub view: Matrix,
    pub projection: Matrix,
}

impl Transforms {
    pub fn new(settings: &Settings, width: u32, height: u32) -> Self {
        let mut model = Matrix::identity();
        model.w.y += settings.model_lift;
        let mut view = Matrix::identity();
        view.w.z -= settings.camera_distance;
        Self {
            model,
            view,
            projection: Self::mk_projection(settings, width, height),
        }
    }

    pub fn resize(&mut self, settings: &Settings, width: u32, height: u32) {
        self.projection = Self::mk_projection(settings, width, height);
    }

    /// Spin the model about y by `speed` radians per elapsed millisecond.
    pub fn auto_rotate(&mut self, elapsed: Duration, speed: f32) {
        let millis = elapsed.as_secs_f32() * 1000.0;
        rotate_y(&mut self.model, Rad(millis * speed));
    }

    pub fn to_uniform(&self) -> TransformUniform {
        TransformUniform {
            model: self.model.into(),
            view: self.view.into(),
            projection: (OPENGL_TO_WGPU_MATRIX * self.projection).into(),
        }
    }

    fn mk_projection(settings: &Settings, width: u32, height: u32) -> Matrix {
        projection(
            settings.fov,
            width as f32,
            height as f32,
            settings.z_near,
            settings.z_far,
        )
    }
}
