//! 渲染器模块
//!
//! 把 [`Mesh`] 交给实现了 [`RenderAdapter`] 的图形后端。
//!
//! # 架构设计
//!
//! - `RenderAdapter`：后端接口，负责 GPU 缓冲区和绘制调用
//! - `MeshRenderer`：驱动器，检查网格脏标记并按需重新上传，然后逐表面绑定材质并绘制
//! - `vertex`：顶点输入布局描述

use tracing::debug;

use crate::core::error::Result;
use crate::geometry::material::{Material, PropertyKind};
use crate::geometry::Mesh;
use crate::math::matrix::texture_transform;

pub mod backend_trait;
pub mod vertex;

pub use backend_trait::{MaterialBinding, RenderAdapter, WrapMode};
pub use vertex::{AttributeLayout, VertexAttribute, VertexLayout};

/// 生成材质六个属性槽的绑定数据
pub fn material_bindings(material: &Material) -> [MaterialBinding<'_>; 6] {
    PropertyKind::ALL.map(|slot| {
        let property = material.property(slot);
        let matrix = texture_transform(property.scale, property.offset);

        let mut texture_matrix = [0.0; 16];
        texture_matrix.copy_from_slice(matrix.as_slice());

        MaterialBinding {
            slot,
            color: property.color,
            texture: property.texture.as_ref(),
            wrap: if property.clamp {
                WrapMode::ClampToEdge
            } else {
                WrapMode::Repeat
            },
            texture_matrix,
        }
    })
}

/// 网格渲染驱动器
///
/// 第一次渲染以及每次网格被标记为脏之后，会先重新上传全部顶点和索引数据。
pub struct MeshRenderer<A: RenderAdapter> {
    adapter: A,
    uploaded: bool,
}

impl<A: RenderAdapter> MeshRenderer<A> {
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            uploaded: false,
        }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn into_adapter(self) -> A {
        self.adapter
    }

    /// 丢弃已上传的数据，下次渲染时重新上传（例如后端设备重建之后）
    pub fn invalidate(&mut self) {
        self.uploaded = false;
    }

    fn upload(&mut self, mesh: &Mesh) -> Result<()> {
        debug!(
            vertices = mesh.vertex_count(),
            surfaces = mesh.surface_count(),
            "Uploading mesh buffers"
        );

        self.adapter
            .upload_vertices(&VertexLayout::of_vertex(), mesh.vertices())?;

        for (si, surface) in mesh.surfaces().iter().enumerate() {
            let triangles = Some(surface.polygon_indices()).filter(|i| !i.is_empty());
            let lines = Some(surface.line_indices()).filter(|i| !i.is_empty());
            self.adapter.upload_surface(si, triangles, lines)?;
        }
        Ok(())
    }

    /// 渲染整个网格
    pub fn render(&mut self, mesh: &mut Mesh) -> Result<()> {
        if !self.uploaded || mesh.is_dirty() {
            self.upload(mesh)?;
            mesh.mark_clean();
            self.uploaded = true;
        }

        for (si, surface) in mesh.surfaces().iter().enumerate() {
            if let Some(material) = mesh.materials().get(surface.material) {
                self.adapter.bind_material(&material_bindings(material))?;
            }
            self.adapter
                .draw_surface(si, surface.polygons.len(), surface.lines.len())?;
        }
        Ok(())
    }
}
