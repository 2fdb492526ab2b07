// ============================================
// Wgpu Backend - Буферы чанков на GPU
// ============================================

use std::sync::Arc;

use ultraviolet::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::gpu::render::{create_model_layout, TerrainShader};
use crate::gpu::terrain::cache::ChunkKey;
use crate::gpu::terrain::error::TerrainError;
use crate::gpu::terrain::mesh::MeshData;

use super::backend::{ChunkPass, MeshBackend};

/// GPU буферы одного чанка
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    // Uniform буфер для матрицы модели (трансляция в origin чанка)
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
}

impl GpuMesh {
    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

impl Drop for GpuMesh {
    fn drop(&mut self) {
        // Синхронно освобождаем память, не дожидаясь сборки wgpu
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        self.model_buffer.destroy();
    }
}

/// Создаёт GPU-меши чанков на устройстве wgpu
pub struct WgpuBackend {
    device: Arc<wgpu::Device>,
    model_layout: wgpu::BindGroupLayout,
}

impl WgpuBackend {
    pub fn new(device: Arc<wgpu::Device>) -> Self {
        let model_layout = create_model_layout(&device);
        Self { device, model_layout }
    }

    pub fn device(&self) -> &Arc<wgpu::Device> {
        &self.device
    }

    /// Layout группы 1 (матрица модели) для пайплайна terrain
    pub fn model_layout(&self) -> &wgpu::BindGroupLayout {
        &self.model_layout
    }

    fn upload(&self, key: ChunkKey, origin: Vec3, data: &MeshData) -> GpuMesh {
        let vertex_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("Chunk {:?} Vertices", key)),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("Chunk {:?} Indices", key)),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let model_matrix: [[f32; 4]; 4] = Mat4::from_translation(origin).into();
        let model_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("Chunk {:?} Model", key)),
            contents: bytemuck::cast_slice(&model_matrix),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let model_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("Chunk {:?} Model Bind Group", key)),
            layout: &self.model_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_buffer.as_entire_binding(),
            }],
        });

        GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
            model_buffer,
            model_bind_group,
        }
    }
}

impl MeshBackend for WgpuBackend {
    type Mesh = GpuMesh;

    fn create_mesh(
        &mut self,
        key: ChunkKey,
        origin: Vec3,
        data: &MeshData,
    ) -> Result<GpuMesh, TerrainError> {
        if data.is_empty() {
            return Err(TerrainError::ResourceExhausted {
                key,
                reason: "empty mesh".to_string(),
            });
        }

        // Ошибки wgpu асинхронные: ловим их через error scope
        self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let mesh = self.upload(key, origin, data);

        let validation = pollster::block_on(self.device.pop_error_scope());
        let out_of_memory = pollster::block_on(self.device.pop_error_scope());

        match out_of_memory.or(validation) {
            // mesh уходит в drop и сразу освобождает то, что успело создаться
            Some(error) => Err(TerrainError::ResourceExhausted {
                key,
                reason: error.to_string(),
            }),
            None => Ok(mesh),
        }
    }
}

impl ChunkPass<GpuMesh> for wgpu::RenderPass<'_> {
    type Shader = TerrainShader;

    fn bind_shader(&mut self, shader: &TerrainShader) {
        shader.bind(self);
    }

    fn draw_strip(&mut self, mesh: &GpuMesh) {
        self.set_bind_group(1, &mesh.model_bind_group, &[]);
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}
