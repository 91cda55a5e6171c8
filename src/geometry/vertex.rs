/// 几何体顶点与图元定义模块
///
/// 定义网格使用的顶点结构，以及通过索引引用顶点的三角形和线段。
/// 三种类型都是 `Pod`，可以直接作为 GPU 缓冲区内容上传。

use bytemuck::{Pod, Zeroable};

/// 顶点索引类型
///
/// 32 位无符号整数，足以覆盖实际可用的顶点数量。
pub type Index = u32;

/// 完整的3D顶点结构
///
/// # 内存布局
///
/// - position: 12 bytes (3 * f32)，偏移 0
/// - normal: 12 bytes (3 * f32)，偏移 12
/// - texcoord: 8 bytes (2 * f32)，偏移 24
/// - tangent: 12 bytes (3 * f32)，偏移 32
/// - **总计**: 44 bytes
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// 顶点位置 (x, y, z)
    pub position: [f32; 3],

    /// 法线向量 (nx, ny, nz)
    ///
    /// 解析平滑组时作为累加器使用，后处理阶段才会归一化。
    pub normal: [f32; 3],

    /// 纹理坐标 (u, v)
    pub texcoord: [f32; 2],

    /// 切线向量 (tx, ty, tz)
    ///
    /// 用于法线贴图的切线空间计算，后处理后与法线正交且归一化。
    pub tangent: [f32; 3],
}

impl Vertex {
    /// 创建一个新的顶点
    #[inline]
    pub fn new(
        position: [f32; 3],
        normal: [f32; 3],
        texcoord: [f32; 2],
        tangent: [f32; 3],
    ) -> Self {
        Self {
            position,
            normal,
            texcoord,
            tangent,
        }
    }

    /// 只指定位置的顶点，其余属性为零
    #[inline]
    pub fn at(position: [f32; 3]) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// 三角形：三个顶点索引
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Polygon {
    pub indices: [Index; 3],
}

impl Polygon {
    #[inline]
    pub fn new(a: Index, b: Index, c: Index) -> Self {
        Self { indices: [a, b, c] }
    }

    /// 是否引用了指定顶点
    #[inline]
    pub fn references(&self, vertex: Index) -> bool {
        self.indices.contains(&vertex)
    }
}

/// 线段：两个顶点索引
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Line {
    pub indices: [Index; 2],
}

impl Line {
    #[inline]
    pub fn new(a: Index, b: Index) -> Self {
        Self { indices: [a, b] }
    }

    /// 是否引用了指定顶点
    #[inline]
    pub fn references(&self, vertex: Index) -> bool {
        self.indices.contains(&vertex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_vertex_size() {
        // 3*4 + 3*4 + 2*4 + 3*4 = 44 bytes
        assert_eq!(size_of::<Vertex>(), 44);
        assert_eq!(std::mem::align_of::<Vertex>(), 4);
    }

    #[test]
    fn test_primitive_sizes() {
        assert_eq!(size_of::<Polygon>(), 12);
        assert_eq!(size_of::<Line>(), 8);
    }

    #[test]
    fn test_polygons_cast_to_index_buffer() {
        let polygons = [Polygon::new(0, 1, 2), Polygon::new(2, 1, 3)];
        let indices: &[Index] = bytemuck::cast_slice(&polygons);

        assert_eq!(indices, &[0, 1, 2, 2, 1, 3]);
    }

    #[test]
    fn test_references() {
        assert!(Polygon::new(4, 5, 6).references(5));
        assert!(!Polygon::new(4, 5, 6).references(7));
        assert!(Line::new(1, 9).references(9));
    }

    #[test]
    fn test_vertex_at() {
        let vertex = Vertex::at([1.0, 2.0, 3.0]);

        assert_eq!(vertex.position, [1.0, 2.0, 3.0]);
        assert_eq!(vertex.normal, [0.0, 0.0, 0.0]);
        assert_eq!(vertex.texcoord, [0.0, 0.0]);
        assert_eq!(vertex.tangent, [0.0, 0.0, 0.0]);
    }
}
