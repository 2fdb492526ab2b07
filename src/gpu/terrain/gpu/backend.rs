// ============================================
// Mesh Backend - Граница с GPU
// ============================================

use ultraviolet::Vec3;

use crate::gpu::terrain::cache::ChunkKey;
use crate::gpu::terrain::error::TerrainError;
use crate::gpu::terrain::mesh::MeshData;

/// Создание GPU-меша чанка.
///
/// `Mesh` владеет своими GPU-ресурсами: они освобождаются ровно один раз,
/// в `Drop`. Handle не копируется и не разделяется между чанками.
pub trait MeshBackend {
    type Mesh;

    /// Загрузить вершины/индексы; `origin` применяется как трансляция при отрисовке
    ///
    /// Любая ошибка попадает в `ReconcileReport::failed`, чанк повторяется
    /// на следующем reconcile.
    fn create_mesh(
        &mut self,
        key: ChunkKey,
        origin: Vec3,
        data: &MeshData,
    ) -> Result<Self::Mesh, TerrainError>;
}

/// Проход отрисовки, умеющий рисовать меши `M` полосами треугольников
pub trait ChunkPass<M> {
    /// Шейдер/материал: непрозрачный handle для draw-вызова
    type Shader: ?Sized;

    fn bind_shader(&mut self, shader: &Self::Shader);

    /// Один indexed triangle-strip draw с primitive restart
    fn draw_strip(&mut self, mesh: &M);
}
