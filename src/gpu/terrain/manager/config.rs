// ============================================
// Terrain Config - Параметры стриминга чанков
// ============================================
// Data-driven: загружается из JSON, отсутствующие поля
// берутся по умолчанию

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::gpu::terrain::error::TerrainError;
use crate::gpu::terrain::generation::ChunkStrategy;
use crate::gpu::terrain::mesh::{validate_segments, HeightSampling};

pub const DEFAULT_CHUNK_SIZE: f32 = 16.0;
pub const DEFAULT_RENDER_DISTANCE: u32 = 4;
pub const DEFAULT_SEGMENTS: u32 = 16;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Сторона чанка в мировых единицах
    pub chunk_size: f32,
    /// Радиус окна в чанках (окно (2r - 1)^2)
    pub render_distance: u32,
    /// Сегментов сетки на сторону чанка
    pub segments: u32,
    pub strategy: ChunkStrategy,
    pub sampling: HeightSampling,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            render_distance: DEFAULT_RENDER_DISTANCE,
            segments: DEFAULT_SEGMENTS,
            strategy: ChunkStrategy::Flat,
            sampling: HeightSampling::Local,
        }
    }
}

impl TerrainConfig {
    /// Загрузить конфиг из JSON строки
    pub fn load_from_json(json: &str) -> Result<Self, TerrainError> {
        let config: TerrainConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Загрузить конфиг из файла
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, TerrainError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::load_from_json(&content)
    }

    pub fn validate(&self) -> Result<(), TerrainError> {
        validate_chunk_size(self.chunk_size)?;
        validate_render_distance(self.render_distance)?;
        validate_segments(self.segments)
    }

    /// Число чанков в окне
    pub fn window_len(&self) -> usize {
        let side = (self.render_distance as usize).saturating_mul(2).saturating_sub(1);
        side.saturating_mul(side)
    }
}

fn validate_chunk_size(chunk_size: f32) -> Result<(), TerrainError> {
    if !chunk_size.is_finite() || chunk_size <= 0.0 {
        return Err(TerrainError::InvalidChunkSize(chunk_size));
    }
    Ok(())
}

pub(crate) fn validate_render_distance(render_distance: u32) -> Result<(), TerrainError> {
    if render_distance == 0 {
        return Err(TerrainError::InvalidRenderDistance);
    }
    Ok(())
}
