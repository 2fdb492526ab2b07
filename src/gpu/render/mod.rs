// ============================================
// GPU Render Module - Пайплайн terrain
// ============================================

mod bind_groups;
mod depth;
mod pipelines;
mod target;
mod uniforms;

pub use bind_groups::{create_camera_layout, create_model_layout, CameraBinding};
pub use depth::{create_depth_texture, DEPTH_FORMAT};
pub use pipelines::TerrainShader;
pub use target::{FrameTarget, COLOR_FORMAT};
pub use uniforms::CameraUniform;
