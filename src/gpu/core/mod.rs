// ============================================
// Core Module - Запуск и GPU ресурсы
// ============================================

pub mod app;
mod resources;

pub use app::{run, App, RunOptions};
pub use resources::{init_headless, GpuContext, GpuInitError};
