use bytemuck::{Pod, Zeroable};
use ultraviolet::{projection, Mat4, Vec3};

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::identity().into(),
        }
    }

    pub fn from_matrix(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.into(),
        }
    }

    /// Перспектива (глубина 0..1) + взгляд из `eye` в `target`
    pub fn looking_at(eye: Vec3, target: Vec3, aspect: f32, fov_degrees: f32) -> Self {
        let proj = projection::perspective_wgpu_dx(fov_degrees.to_radians(), aspect, 0.1, 1000.0);
        let view = Mat4::look_at(eye, target, Vec3::unit_y());
        Self::from_matrix(proj * view)
    }
}

impl Default for CameraUniform {
    fn default() -> Self { Self::new() }
}
