// ============================================
// App - Пролёт наблюдателя над terrain
// ============================================
// Без окна: рендерим в offscreen текстуру, наблюдатель
// движется по +X и пересекает границы чанков.

use std::error::Error;
use std::path::PathBuf;

use ultraviolet::Vec3;

use crate::gpu::render::{CameraUniform, FrameTarget, TerrainShader, COLOR_FORMAT};
use crate::gpu::terrain::{ChunkManager, TerrainConfig, WgpuBackend};

use super::resources::init_headless;

const FRAME_WIDTH: u32 = 640;
const FRAME_HEIGHT: u32 = 360;
const EYE_HEIGHT: f32 = 12.0;
const FRAMES: u32 = 240;
const SPEED: f32 = 0.5;

const SKY: wgpu::Color = wgpu::Color { r: 0.86, g: 0.86, b: 0.86, a: 1.0 };

/// Параметры запуска
#[derive(Debug, Default)]
pub struct RunOptions {
    pub config_path: Option<PathBuf>,
    pub frames: Option<u32>,
}

impl RunOptions {
    /// `chunkstream [config.json] [frames]`
    pub fn from_args<I: Iterator<Item = String>>(mut args: I) -> Result<Self, String> {
        let config_path = args.next().map(PathBuf::from);
        let frames = match args.next() {
            Some(n) => Some(n.parse::<u32>().map_err(|e| format!("invalid frame count {:?}: {}", n, e))?),
            None => None,
        };
        Ok(Self { config_path, frames })
    }
}

pub struct App {
    terrain: ChunkManager<WgpuBackend>,
    shader: TerrainShader,
    target: FrameTarget,
    queue: std::sync::Arc<wgpu::Queue>,
    observer: Vec3,
}

impl App {
    pub fn new(config: &TerrainConfig) -> Result<Self, Box<dyn Error>> {
        let gpu = pollster::block_on(init_headless())?;
        log::info!("Using adapter {}", gpu.adapter_name);

        let backend = WgpuBackend::new(std::sync::Arc::clone(&gpu.device));
        let shader = TerrainShader::new(&gpu.device, COLOR_FORMAT, backend.model_layout());
        let target = FrameTarget::new(&gpu.device, FRAME_WIDTH, FRAME_HEIGHT);
        let terrain = ChunkManager::from_config(config, backend)?;

        Ok(Self {
            terrain,
            shader,
            target,
            queue: gpu.queue,
            observer: Vec3::new(config.chunk_size * 0.5, EYE_HEIGHT, config.chunk_size * 0.5),
        })
    }

    /// Один кадр: update (reconcile) + render
    pub fn frame(&mut self) -> Result<(), Box<dyn Error>> {
        let report = self.terrain.reconcile(self.observer)?;
        if !report.is_complete() {
            log::warn!("{} chunks missing around {:?}", report.failed.len(), report.center);
        }

        let look = self.observer + Vec3::new(10.0, -EYE_HEIGHT * 0.5, 0.0);
        let camera = CameraUniform::looking_at(self.observer, look, self.target.aspect(), 60.0);
        self.shader.update_camera(&self.queue, &camera);

        let mut encoder = self.terrain.backend().device().create_command_encoder(
            &wgpu::CommandEncoderDescriptor { label: Some("Frame Encoder") },
        );
        {
            let mut pass = self.target.begin_pass(&mut encoder, SKY);
            self.terrain.render(&mut pass, &self.shader);
        }
        self.queue.submit(std::iter::once(encoder.finish()));

        self.observer.x += SPEED;
        Ok(())
    }

    pub fn terrain(&self) -> &ChunkManager<WgpuBackend> {
        &self.terrain
    }
}

/// Запуск демо
pub fn run(options: RunOptions) -> Result<(), Box<dyn Error>> {
    let config = match &options.config_path {
        Some(path) => TerrainConfig::load_from_file(path)?,
        None => TerrainConfig::default(),
    };
    log::info!(
        "Terrain: chunk {} units, render distance {}, {} segments, strategy {}",
        config.chunk_size,
        config.render_distance,
        config.segments,
        config.strategy.name()
    );

    let mut app = App::new(&config)?;
    let frames = options.frames.unwrap_or(FRAMES);
    for _ in 0..frames {
        app.frame()?;
    }

    log::info!(
        "Done: {} frames, {} live chunks around {:?}",
        frames,
        app.terrain().len(),
        app.terrain().center()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_args() {
        let args = vec!["terrain.json".to_string(), "10".to_string()];
        let options = RunOptions::from_args(args.into_iter()).unwrap();
        assert_eq!(options.config_path, Some(PathBuf::from("terrain.json")));
        assert_eq!(options.frames, Some(10));

        let options = RunOptions::from_args(std::iter::empty()).unwrap();
        assert!(options.config_path.is_none());
        assert!(options.frames.is_none());

        assert!(RunOptions::from_args(vec!["a.json".to_string(), "many".to_string()].into_iter()).is_err());
    }
}
