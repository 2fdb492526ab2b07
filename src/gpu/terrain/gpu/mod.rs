mod backend;
mod chunk;
mod wgpu_backend;

pub use backend::{ChunkPass, MeshBackend};
pub use chunk::Chunk;
pub use wgpu_backend::{GpuMesh, WgpuBackend};
