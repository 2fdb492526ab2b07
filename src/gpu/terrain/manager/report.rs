use crate::gpu::terrain::cache::ChunkKey;
use crate::gpu::terrain::error::TerrainError;

/// Результат одного прохода reconcile
#[derive(Debug, Default)]
pub struct ReconcileReport {
    /// Чанк наблюдателя
    pub center: ChunkKey,
    pub created: Vec<ChunkKey>,
    pub evicted: Vec<ChunkKey>,
    /// Чанки, которые не удалось загрузить; повторяются на следующем тике
    pub failed: Vec<(ChunkKey, TerrainError)>,
}

impl ReconcileReport {
    pub fn new(center: ChunkKey) -> Self {
        Self { center, ..Default::default() }
    }

    /// Окно заполнено полностью
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Ничего не создано и не удалено
    pub fn is_noop(&self) -> bool {
        self.created.is_empty() && self.evicted.is_empty() && self.failed.is_empty()
    }
}
