// ============================================
// Terrain Module - Бесконечный terrain из чанков
// ============================================

pub mod cache;
pub mod error;
pub mod generation;
pub mod gpu;
pub mod manager;
pub mod mesh;

// Re-exports
pub use cache::{clamp_center, required_window, ChunkKey};
pub use error::TerrainError;
pub use generation::ChunkStrategy;
pub use gpu::{Chunk, ChunkPass, GpuMesh, MeshBackend, WgpuBackend};
pub use manager::{ChunkManager, ReconcileReport, TerrainConfig};
pub use mesh::{
    generate_plane, generate_plane_at, HeightSampling, MeshData, TerrainVertex,
    PRIMITIVE_RESTART_INDEX,
};
