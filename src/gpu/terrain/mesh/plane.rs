// ============================================
// Plane Mesh - Сетка чанка из triangle strip
// ============================================
// (segments+1)^2 вершин в локальных координатах чанка,
// по одной полосе треугольников на ряд сетки, ряды разделены
// индексом 65535 (primitive restart для 16-битных индексов).

use serde::{Deserialize, Serialize};

use crate::gpu::terrain::cache::ChunkKey;
use crate::gpu::terrain::error::TerrainError;
use crate::gpu::terrain::generation::ChunkStrategy;

use super::vertex::TerrainVertex;

/// Индекс-разделитель полос
pub const PRIMITIVE_RESTART_INDEX: u16 = u16::MAX;

/// Максимум сегментов: (segments + 1)^2 вершин должны быть < 65535
pub const MAX_SEGMENTS: u32 = 254;

/// Какие индексы сетки получает стратегия высоты
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightSampling {
    /// (ix, iz): все чанки одинаковой формы
    #[default]
    Local,
    /// (key.x * segments + ix, key.z * segments + iz): непрерывная поверхность
    World,
}

/// CPU-данные меша одного чанка
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Количество рестартов в индексном буфере
    pub fn restart_count(&self) -> usize {
        self.indices.iter().filter(|&&i| i == PRIMITIVE_RESTART_INDEX).count()
    }
}

/// Проверка количества сегментов
pub fn validate_segments(segments: u32) -> Result<(), TerrainError> {
    if segments == 0 || segments > MAX_SEGMENTS {
        return Err(TerrainError::InvalidSegments(segments));
    }
    Ok(())
}

/// Индекс вершины для позиции `j` полосы в ряду `row`.
///
/// Зигзаг: чётные `j` идут по ряду `row`, нечётные по ряду `row + 1`.
/// Позиция `2 * segments + 2`: рестарт.
#[inline]
pub fn strip_index(row: u32, j: u32, segments: u32) -> u16 {
    if j == segments * 2 + 2 {
        return PRIMITIVE_RESTART_INDEX;
    }
    let column = if j % 2 == 0 { j } else { j + segments };
    (row * (segments + 1) + column - j / 2) as u16
}

/// Сетка в локальных координатах, стратегия получает (ix, iz)
pub fn generate_plane(
    size_x: f32,
    size_z: f32,
    segments: u32,
    strategy: &ChunkStrategy,
) -> Result<MeshData, TerrainError> {
    generate_plane_at(ChunkKey::default(), size_x, size_z, segments, strategy, HeightSampling::Local)
}

/// Сетка чанка `key`; от `sampling` зависит только то, какие индексы видит стратегия
pub fn generate_plane_at(
    key: ChunkKey,
    size_x: f32,
    size_z: f32,
    segments: u32,
    strategy: &ChunkStrategy,
    sampling: HeightSampling,
) -> Result<MeshData, TerrainError> {
    validate_segments(segments)?;
    for size in [size_x, size_z] {
        if !size.is_finite() || size <= 0.0 {
            return Err(TerrainError::InvalidChunkSize(size));
        }
    }

    let row = segments + 1;
    let step_x = size_x / segments as f32;
    let step_z = size_z / segments as f32;

    let (base_x, base_z) = match sampling {
        HeightSampling::Local => (0i64, 0i64),
        HeightSampling::World => (key.x as i64 * segments as i64, key.z as i64 * segments as i64),
    };

    let mut vertices = Vec::with_capacity((row * row) as usize);
    for iz in 0..row {
        for ix in 0..row {
            let height = strategy.height_at((base_x + ix as i64) as f32, (base_z + iz as i64) as f32);
            vertices.push(TerrainVertex::new(
                [ix as f32 * step_x, height, iz as f32 * step_z],
                [ix as f32, iz as f32],
            ));
        }
    }

    let strip_len = segments * 2 + 3;
    let mut indices = Vec::with_capacity((strip_len * segments) as usize);
    for i in 0..segments {
        for j in 0..strip_len {
            indices.push(strip_index(i, j, segments));
        }
    }

    Ok(MeshData { vertices, indices })
}
