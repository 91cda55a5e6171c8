//! 顶点输入布局
//!
//! 描述 [`Vertex`] 在交错顶点缓冲区中的排列，供图形后端设置顶点输入绑定。
//!
//! # 内存布局
//!
//! | 属性 | 偏移 | 分量 |
//! |---|---|---|
//! | position | 0 | 3 × f32 |
//! | normal | 12 | 3 × f32 |
//! | texcoord | 24 | 2 × f32 |
//! | tangent | 32 | 3 × f32 |
//!
//! 步长 44 字节。

use std::mem::{offset_of, size_of};

use crate::geometry::Vertex;

/// 顶点属性语义
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexAttribute {
    Position,
    Normal,
    Texcoord,
    Tangent,
}

/// 单个属性在顶点中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeLayout {
    pub attribute: VertexAttribute,
    /// 距顶点起始的字节偏移
    pub offset: usize,
    /// f32 分量个数
    pub components: usize,
}

/// 交错顶点缓冲区的完整布局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    pub stride: usize,
    pub attributes: [AttributeLayout; 4],
}

impl VertexLayout {
    /// [`Vertex`] 的布局
    pub const fn of_vertex() -> Self {
        Self {
            stride: size_of::<Vertex>(),
            attributes: [
                AttributeLayout {
                    attribute: VertexAttribute::Position,
                    offset: offset_of!(Vertex, position),
                    components: 3,
                },
                AttributeLayout {
                    attribute: VertexAttribute::Normal,
                    offset: offset_of!(Vertex, normal),
                    components: 3,
                },
                AttributeLayout {
                    attribute: VertexAttribute::Texcoord,
                    offset: offset_of!(Vertex, texcoord),
                    components: 2,
                },
                AttributeLayout {
                    attribute: VertexAttribute::Tangent,
                    offset: offset_of!(Vertex, tangent),
                    components: 3,
                },
            ],
        }
    }

    pub fn attribute(&self, attribute: VertexAttribute) -> Option<&AttributeLayout> {
        self.attributes.iter().find(|a| a.attribute == attribute)
    }
}
