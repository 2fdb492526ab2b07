// ============================================
// Terrain Vertex - Структура вершины
// ============================================

/// 8 float на вершину: позиция, цвет (legacy), текстурные координаты
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Default)]
pub struct TerrainVertex {
    /// Локальная позиция относительно origin чанка
    pub position: [f32; 3],
    /// Не используется шейдером, оставлено ради совместимости layout
    pub color: [f32; 3],
    /// Целые индексы сетки (ix, iz), не нормализованы в 0..1
    pub tex_coords: [f32; 2],
}

impl TerrainVertex {
    pub const FLOATS: usize = 8;

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TerrainVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }

    pub fn new(position: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self { position, color: [0.0; 3], tex_coords }
    }
}
