mod chunk_key;

pub use chunk_key::{clamp_center, required_window, window_side, ChunkKey};
