// ============================================
// Resources - GPU устройство без окна
// ============================================

use std::fmt;
use std::sync::Arc;

/// Не удалось получить GPU
#[derive(Debug)]
pub enum GpuInitError {
    NoAdapter(String),
    Device(String),
}

impl fmt::Display for GpuInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuInitError::NoAdapter(e) => write!(f, "no suitable GPU adapter: {}", e),
            GpuInitError::Device(e) => write!(f, "failed to open GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuInitError {}

pub struct GpuContext {
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
    pub adapter_name: String,
}

/// Инициализация GPU устройства без surface
pub async fn init_headless() -> Result<GpuContext, GpuInitError> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .map_err(|e| GpuInitError::NoAdapter(e.to_string()))?;

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("GPU Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            },
        )
        .await
        .map_err(|e| GpuInitError::Device(e.to_string()))?;

    Ok(GpuContext {
        device: Arc::new(device),
        queue: Arc::new(queue),
        adapter_name: adapter.get_info().name,
    })
}
