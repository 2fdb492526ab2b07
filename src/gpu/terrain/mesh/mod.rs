mod vertex;
mod plane;

pub use vertex::TerrainVertex;
pub use plane::{
    generate_plane, generate_plane_at, strip_index, validate_segments,
    HeightSampling, MeshData, MAX_SEGMENTS, PRIMITIVE_RESTART_INDEX,
};
