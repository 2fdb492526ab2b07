// ============================================
// Chunk Manager - Окно живых чанков вокруг наблюдателя
// ============================================
// Каждый тик: вычисляем нужное окно, выгружаем лишние чанки,
// генерируем недостающие. Меши считаются параллельно (rayon),
// загрузка на GPU идёт последовательно в вызывающем потоке.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use ultraviolet::Vec3;

use crate::gpu::terrain::cache::{clamp_center, required_window, ChunkKey};
use crate::gpu::terrain::error::TerrainError;
use crate::gpu::terrain::generation::ChunkStrategy;
use crate::gpu::terrain::gpu::{Chunk, ChunkPass, MeshBackend};
use crate::gpu::terrain::mesh::{generate_plane_at, HeightSampling, MeshData};

use super::config::{validate_render_distance, TerrainConfig, DEFAULT_SEGMENTS};
use super::report::ReconcileReport;

/// Больше этого заранее не резервируем: огромный радиус допустим,
/// но память под него выделяется по мере заполнения
const MAX_PREALLOCATED_CHUNKS: usize = 4096;

/// Менеджер чанков terrain поверх бэкенда `B`
pub struct ChunkManager<B: MeshBackend> {
    chunk_size: f32,
    render_distance: u32,
    segments: u32,
    strategy: ChunkStrategy,
    sampling: HeightSampling,
    chunks: HashMap<ChunkKey, Chunk<B::Mesh>>,
    center: Option<ChunkKey>,
    backend: B,
}

impl<B: MeshBackend> ChunkManager<B> {
    pub fn new(
        chunk_size: f32,
        render_distance: u32,
        strategy: ChunkStrategy,
        backend: B,
    ) -> Result<Self, TerrainError> {
        let config = TerrainConfig {
            chunk_size,
            render_distance,
            segments: DEFAULT_SEGMENTS,
            strategy,
            ..Default::default()
        };
        Self::from_config(&config, backend)
    }

    pub fn from_config(config: &TerrainConfig, backend: B) -> Result<Self, TerrainError> {
        config.validate()?;

        Ok(Self {
            chunk_size: config.chunk_size,
            render_distance: config.render_distance,
            segments: config.segments,
            strategy: config.strategy,
            sampling: config.sampling,
            chunks: HashMap::with_capacity(config.window_len().min(MAX_PREALLOCATED_CHUNKS)),
            center: None,
            backend,
        })
    }

    /// Привести набор живых чанков к окну вокруг `observer`.
    ///
    /// Ошибки отдельных чанков (генерация или загрузка, любые) не прерывают
    /// проход: они попадают в `ReconcileReport::failed`, а сами чанки будут
    /// созданы повторно на следующем вызове. Живой набор и отчёт всегда
    /// согласованы. Наблюдатель у края сетки i32 прижимает окно внутрь.
    pub fn reconcile(&mut self, observer: Vec3) -> Result<ReconcileReport, TerrainError> {
        let center = clamp_center(ChunkKey::from_world(observer, self.chunk_size), self.render_distance);
        let required: HashSet<ChunkKey> = required_window(center, self.render_distance).collect();
        let mut report = ReconcileReport::new(center);
        self.center = Some(center);

        // 1. Выгрузка: drop чанка сразу освобождает его GPU буферы
        report.evicted = self.chunks.keys()
            .filter(|key| !required.contains(*key))
            .copied()
            .collect();
        for key in &report.evicted {
            self.chunks.remove(key);
            log::trace!("Evicted chunk {:?}", key);
        }

        // 2. Генерация недостающих мешей параллельно, стратегия только читается
        let missing: Vec<ChunkKey> = required_window(center, self.render_distance)
            .filter(|key| !self.chunks.contains_key(key))
            .collect();

        let (size, segments, sampling, strategy) =
            (self.chunk_size, self.segments, self.sampling, self.strategy);
        let generated: Vec<(ChunkKey, Result<MeshData, TerrainError>)> = missing
            .par_iter()
            .map(|&key| (key, generate_plane_at(key, size, size, segments, &strategy, sampling)))
            .collect();

        // 3. Загрузка на GPU в потоке, который владеет устройством
        for (key, data) in generated {
            let origin = key.origin(self.chunk_size);
            let mesh = data.and_then(|data| self.backend.create_mesh(key, origin, &data));

            match mesh {
                Ok(mesh) => {
                    self.chunks.insert(key, Chunk::new(key, origin, mesh));
                    report.created.push(key);
                    log::trace!("Created chunk {:?}", key);
                }
                Err(e) => {
                    if e.is_recoverable() {
                        log::warn!("Chunk {:?} upload failed, will retry: {}", key, e);
                    } else {
                        log::error!("Chunk {:?} failed: {}", key, e);
                    }
                    report.failed.push((key, e));
                }
            }
        }

        if report.is_complete() {
            debug_assert!(
                self.chunks.len() == required.len()
                    && self.chunks.keys().all(|key| required.contains(key)),
                "live chunks diverged from the required window around {:?}",
                center
            );
        }

        if !report.is_noop() {
            log::debug!(
                "Terrain reconcile at {:?}: +{} -{} failed {} (live {})",
                center,
                report.created.len(),
                report.evicted.len(),
                report.failed.len(),
                self.chunks.len()
            );
        }

        Ok(report)
    }

    /// Отрисовать все живые чанки; генерацию не запускает
    pub fn render<P: ChunkPass<B::Mesh>>(&self, pass: &mut P, shader: &P::Shader) {
        pass.bind_shader(shader);
        for chunk in self.chunks.values() {
            chunk.render(pass);
        }
    }

    /// Сменить стратегию: все текущие меши устарели и выгружаются
    pub fn set_strategy(&mut self, strategy: ChunkStrategy) {
        self.strategy = strategy;
        self.clear();
    }

    /// Новый радиус применяется на следующем reconcile
    pub fn set_render_distance(&mut self, render_distance: u32) -> Result<(), TerrainError> {
        validate_render_distance(render_distance)?;
        self.render_distance = render_distance;
        Ok(())
    }

    /// Выгрузить все чанки
    pub fn clear(&mut self) {
        let count = self.chunks.len();
        self.chunks.clear();
        self.center = None;
        if count > 0 {
            log::debug!("Cleared {} terrain chunks", count);
        }
    }

    /// Окно, которое должно быть живым после reconcile в текущем центре
    pub fn required_keys(&self) -> HashSet<ChunkKey> {
        self.center
            .map(|center| required_window(center, self.render_distance).collect())
            .unwrap_or_default()
    }

    pub fn chunk(&self, key: ChunkKey) -> Option<&Chunk<B::Mesh>> {
        self.chunks.get(&key)
    }

    pub fn contains(&self, key: ChunkKey) -> bool {
        self.chunks.contains_key(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = ChunkKey> + '_ {
        self.chunks.keys().copied()
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk<B::Mesh>> {
        self.chunks.values()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Чанк наблюдателя на последнем reconcile
    pub fn center(&self) -> Option<ChunkKey> {
        self.center
    }

    pub fn chunk_size(&self) -> f32 {
        self.chunk_size
    }

    pub fn render_distance(&self) -> u32 {
        self.render_distance
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    pub fn strategy(&self) -> &ChunkStrategy {
        &self.strategy
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<B: MeshBackend> std::fmt::Debug for ChunkManager<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkManager")
            .field("chunk_size", &self.chunk_size)
            .field("render_distance", &self.render_distance)
            .field("segments", &self.segments)
            .field("strategy", &self.strategy.name())
            .field("live", &self.chunks.len())
            .field("center", &self.center)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct TestMesh {
        key: ChunkKey,
        first_height: f32,
        released: Rc<RefCell<Vec<ChunkKey>>>,
    }

    impl Drop for TestMesh {
        fn drop(&mut self) {
            self.released.borrow_mut().push(self.key);
        }
    }

    #[derive(Default)]
    struct TestBackend {
        uploads: usize,
        released: Rc<RefCell<Vec<ChunkKey>>>,
        // Чанки, для которых загрузка падает без возможности восстановления
        broken: HashSet<ChunkKey>,
    }

    impl MeshBackend for TestBackend {
        type Mesh = TestMesh;

        fn create_mesh(&mut self, key: ChunkKey, _origin: Vec3, data: &MeshData) -> Result<TestMesh, TerrainError> {
            if self.broken.contains(&key) {
                return Err(TerrainError::Config(format!("no storage for {:?}", key)));
            }
            self.uploads += 1;
            Ok(TestMesh {
                key,
                first_height: data.vertices[1].position[1],
                released: Rc::clone(&self.released),
            })
        }
    }

    struct CountingPass {
        shader_binds: usize,
        drawn: Vec<ChunkKey>,
    }

    impl ChunkPass<TestMesh> for CountingPass {
        type Shader = str;

        fn bind_shader(&mut self, _shader: &str) {
            self.shader_binds += 1;
        }

        fn draw_strip(&mut self, mesh: &TestMesh) {
            self.drawn.push(mesh.key);
        }
    }

    fn manager(render_distance: u32) -> ChunkManager<TestBackend> {
        ChunkManager::new(16.0, render_distance, ChunkStrategy::Flat, TestBackend::default()).unwrap()
    }

    #[test]
    fn test_initial_reconcile_fills_window() {
        let mut terrain = manager(3);
        let report = terrain.reconcile(Vec3::new(8.0, 0.0, 8.0)).unwrap();

        assert_eq!(report.center, ChunkKey::new(0, 0));
        assert_eq!(report.created.len(), 25);
        assert!(report.evicted.is_empty());
        assert_eq!(terrain.len(), 25);
        assert_eq!(terrain.keys().collect::<HashSet<_>>(), terrain.required_keys());
    }

    #[test]
    fn test_chunk_keeps_origin_and_key() {
        let mut terrain = manager(2);
        terrain.reconcile(Vec3::new(-8.0, 5.0, 40.0)).unwrap();

        let chunk = terrain.chunk(ChunkKey::new(-2, 3)).unwrap();
        assert_eq!(chunk.key(), ChunkKey::new(-2, 3));
        let p = chunk.position();
        assert_eq!((p.x, p.y, p.z), (-32.0, 0.0, 48.0));
    }

    #[test]
    fn test_render_draws_each_live_chunk_once() {
        let mut terrain = manager(2);
        let mut pass = CountingPass { shader_binds: 0, drawn: Vec::new() };

        terrain.render(&mut pass, "terrain");
        assert_eq!(pass.shader_binds, 1);
        assert!(pass.drawn.is_empty());

        terrain.reconcile(Vec3::zero()).unwrap();
        terrain.render(&mut pass, "terrain");
        let drawn: HashSet<_> = pass.drawn.iter().copied().collect();
        assert_eq!(pass.drawn.len(), 9);
        assert_eq!(drawn, terrain.required_keys());
    }

    #[test]
    fn test_strategy_swap_regenerates_window() {
        let mut terrain = manager(2);
        terrain.reconcile(Vec3::zero()).unwrap();
        assert!(terrain.chunks().all(|c| c.mesh().first_height == 0.0));

        terrain.set_strategy(ChunkStrategy::Sinusoidal);
        assert!(terrain.is_empty());
        assert_eq!(terrain.backend().released.borrow().len(), 9);

        let report = terrain.reconcile(Vec3::zero()).unwrap();
        assert_eq!(report.created.len(), 9);
        assert!(terrain.chunks().all(|c| c.mesh().first_height == 1.0_f32.sin()));
    }

    #[test]
    fn test_render_distance_change_applies_on_next_reconcile() {
        let mut terrain = manager(3);
        terrain.reconcile(Vec3::zero()).unwrap();
        assert_eq!(terrain.len(), 25);

        assert!(matches!(terrain.set_render_distance(0), Err(TerrainError::InvalidRenderDistance)));
        terrain.set_render_distance(1).unwrap();
        assert_eq!(terrain.len(), 25);

        let report = terrain.reconcile(Vec3::zero()).unwrap();
        assert_eq!(report.evicted.len(), 24);
        assert_eq!(terrain.keys().collect::<Vec<_>>(), vec![ChunkKey::new(0, 0)]);
    }

    #[test]
    fn test_fatal_upload_error_keeps_report_consistent() {
        let mut terrain = manager(2);
        terrain.backend_mut().broken.insert(ChunkKey::new(1, 0));

        let report = terrain.reconcile(Vec3::zero()).unwrap();
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, ChunkKey::new(1, 0));
        assert!(!report.failed[0].1.is_recoverable());
        assert_eq!(report.created.len(), 8);
        assert_eq!(terrain.len(), 8);
        assert!(report.created.iter().all(|&key| terrain.contains(key)));

        terrain.backend_mut().broken.clear();
        let report = terrain.reconcile(Vec3::zero()).unwrap();
        assert_eq!(report.created, vec![ChunkKey::new(1, 0)]);
        assert_eq!(terrain.keys().collect::<HashSet<_>>(), terrain.required_keys());
    }

    #[test]
    fn test_far_observer_gets_full_window() {
        let mut terrain = manager(3);
        let report = terrain.reconcile(Vec3::new(1.0e12, 0.0, -1.0e12)).unwrap();

        assert_eq!(report.center, ChunkKey::new(i32::MAX - 2, i32::MIN + 2));
        assert_eq!(terrain.len(), 25);
        assert_eq!(terrain.keys().collect::<HashSet<_>>(), terrain.required_keys());

        // Дальше края сетки окно уже не сдвигается
        let report = terrain.reconcile(Vec3::new(3.0e12, 0.0, -3.0e12)).unwrap();
        assert!(report.is_noop());
    }

    #[test]
    fn test_huge_render_distance_constructs_lazily() {
        let terrain = manager(u32::MAX);
        assert!(terrain.is_empty());
        assert!(terrain.required_keys().is_empty());
    }

    #[test]
    fn test_construction_validates_input() {
        assert!(matches!(
            ChunkManager::new(0.0, 2, ChunkStrategy::Flat, TestBackend::default()),
            Err(TerrainError::InvalidChunkSize(_))
        ));
        assert!(matches!(
            ChunkManager::new(16.0, 0, ChunkStrategy::Flat, TestBackend::default()),
            Err(TerrainError::InvalidRenderDistance)
        ));
        let config = TerrainConfig { segments: 0, ..Default::default() };
        assert!(matches!(
            ChunkManager::from_config(&config, TestBackend::default()),
            Err(TerrainError::InvalidSegments(0))
        ));
    }
}
