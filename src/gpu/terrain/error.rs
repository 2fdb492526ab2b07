// ============================================
// Terrain Error - Ошибки подсистемы terrain
// ============================================

use std::fmt;

use crate::gpu::terrain::cache::ChunkKey;

/// Ошибки конфигурации, генерации и загрузки чанков
#[derive(Debug)]
pub enum TerrainError {
    /// Размер чанка должен быть конечным и > 0
    InvalidChunkSize(f32),
    /// render_distance == 0
    InvalidRenderDistance,
    /// segments == 0 или сетка не помещается в 16-битные индексы
    InvalidSegments(u32),
    /// GPU не смог выделить ресурсы под чанк
    ResourceExhausted { key: ChunkKey, reason: String },
    Io(std::io::Error),
    Config(String),
}

impl TerrainError {
    /// Ошибка конкретного чанка (можно повторить на следующем тике)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TerrainError::ResourceExhausted { .. })
    }
}

impl fmt::Display for TerrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerrainError::InvalidChunkSize(size) => {
                write!(f, "chunk size must be finite and positive, got {}", size)
            }
            TerrainError::InvalidRenderDistance => write!(f, "render distance must be at least 1"),
            TerrainError::InvalidSegments(segments) => write!(
                f,
                "segment count {} is out of range (1..={})",
                segments,
                crate::gpu::terrain::mesh::MAX_SEGMENTS
            ),
            TerrainError::ResourceExhausted { key, reason } => {
                write!(f, "failed to allocate GPU resources for chunk {:?}: {}", key, reason)
            }
            TerrainError::Io(e) => write!(f, "io error: {}", e),
            TerrainError::Config(msg) => write!(f, "invalid terrain config: {}", msg),
        }
    }
}

impl std::error::Error for TerrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerrainError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TerrainError {
    fn from(e: std::io::Error) -> Self {
        TerrainError::Io(e)
    }
}

impl From<serde_json::Error> for TerrainError {
    fn from(e: serde_json::Error) -> Self {
        TerrainError::Config(e.to_string())
    }
}
