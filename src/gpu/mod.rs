// ============================================
// GPU Module - Бесконечный terrain из чанков
// ============================================
// Стриминг чанков вокруг наблюдателя + wgpu бэкенд для их мешей

pub mod terrain;
pub mod render;
pub mod core;

pub use core::app::run;
