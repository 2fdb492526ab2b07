// ============================================
// Chunk - Меш чанка на GPU + его позиция
// ============================================

use ultraviolet::Vec3;

use crate::gpu::terrain::cache::ChunkKey;
use super::backend::ChunkPass;

/// Чанк terrain. Неизменяем после создания, ресурсы освобождаются при drop
pub struct Chunk<M> {
    key: ChunkKey,
    position: Vec3,
    mesh: M,
}

impl<M> Chunk<M> {
    pub fn new(key: ChunkKey, position: Vec3, mesh: M) -> Self {
        Self { key, position, mesh }
    }

    /// Координата чанка, сохранённая при создании
    pub fn key(&self) -> ChunkKey {
        self.key
    }

    /// Мировой origin чанка
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn mesh(&self) -> &M {
        &self.mesh
    }

    pub fn render<P: ChunkPass<M>>(&self, pass: &mut P) {
        pass.draw_strip(&self.mesh);
    }
}

impl<M> std::fmt::Debug for Chunk<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunk")
            .field("key", &self.key)
            .field("position", &(self.position.x, self.position.y, self.position.z))
            .finish_non_exhaustive()
    }
}
