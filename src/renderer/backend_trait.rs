//! 渲染适配器接口
//!
//! 网格库本身不接触图形 API。具体后端实现 [`RenderAdapter`]，
//! 接收交错顶点数据、每个表面的索引数据以及按六个属性槽组织的材质绑定。
//! GPU 侧缓冲区由适配器持有；何时重新上传由 [`super::MeshRenderer`] 根据脏标记决定。

use crate::core::error::Result;
use crate::geometry::material::PropertyKind;
use crate::geometry::{Index, Vertex};
use crate::texture::TextureData;

use super::vertex::VertexLayout;

/// 纹理寻址模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    ClampToEdge,
    Repeat,
}

/// 单个材质属性槽的绑定数据
#[derive(Debug, Clone, Copy)]
pub struct MaterialBinding<'a> {
    pub slot: PropertyKind,
    pub color: [f32; 4],
    pub texture: Option<&'a TextureData>,
    pub wrap: WrapMode,
    /// 列主序纹理坐标变换矩阵
    pub texture_matrix: [f32; 16],
}

/// 由具体图形后端实现的适配器
pub trait RenderAdapter {
    /// 上传（或替换）整份顶点数据
    fn upload_vertices(&mut self, layout: &VertexLayout, vertices: &[Vertex]) -> Result<()>;

    /// 上传表面 `si` 的索引数据；没有三角形或线段时对应参数为 `None`
    fn upload_surface(
        &mut self,
        si: usize,
        triangles: Option<&[Index]>,
        lines: Option<&[Index]>,
    ) -> Result<()>;

    /// 绑定表面所用材质的六个属性槽
    fn bind_material(&mut self, bindings: &[MaterialBinding<'_>]) -> Result<()>;

    /// 绘制表面 `si`
    fn draw_surface(&mut self, si: usize, triangle_count: usize, line_count: usize) -> Result<()>;
}
