pub mod gpu;

pub use gpu::render::TerrainShader;
pub use gpu::terrain::{
    ChunkKey, ChunkManager, ChunkStrategy, MeshBackend, ReconcileReport, TerrainConfig,
    TerrainError, WgpuBackend,
};
