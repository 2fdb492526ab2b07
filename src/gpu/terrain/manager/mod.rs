mod config;
mod report;
mod chunk_manager;

pub use config::{TerrainConfig, DEFAULT_CHUNK_SIZE, DEFAULT_RENDER_DISTANCE, DEFAULT_SEGMENTS};
pub use report::ReconcileReport;
pub use chunk_manager::ChunkManager;
