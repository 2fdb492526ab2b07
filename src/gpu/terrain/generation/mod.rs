pub mod noise;
mod strategy;

pub use noise::{fbm2d, noise2d};
pub use strategy::ChunkStrategy;
