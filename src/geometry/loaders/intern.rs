/// 解析期顶点去重缓存
///
/// 保存文件中的原始位置、纹理坐标和法线，并把
/// (位置, 纹理坐标, 法线, 平滑组) 组合映射到唯一的输出顶点。
///
/// 每个原始位置挂一条索引集链表；查找时只遍历该位置的链表，
/// 未命中时新建输出顶点并插到链表头部。
///
/// 缓存只在一次解析内有效，由解析器显式持有，不存在全局状态。

use crate::core::error::Result;
use crate::geometry::mesh::Mesh;
use crate::geometry::vertex::{Index, Vertex};

/// 面或线段中一个顶点引用的原始索引（文件中的写法，1 起始，负数为相对索引）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawIndices {
    pub position: i64,
    pub texcoord: Option<i64>,
    pub normal: Option<i64>,
}

impl RawIndices {
    /// 解析 `v`、`v/vt`、`v//vn`、`v/vt/vn` 四种写法
    ///
    /// 位置索引无法解析时返回 `None`；纹理坐标或法线无法解析时视为缺省。
    pub fn parse(token: &str) -> Option<Self> {
        let mut parts = token.split('/');

        let position = parts.next()?.parse().ok()?;
        let texcoord = parts.next().and_then(|s| s.parse().ok());
        let normal = parts.next().and_then(|s| s.parse().ok());

        Some(Self {
            position,
            texcoord,
            normal,
        })
    }
}

/// 去重键：解析后的 0 起始原始索引与平滑组
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexKey {
    pub position: usize,
    pub texcoord: Option<usize>,
    pub normal: Option<usize>,
    pub group: i32,
}

#[derive(Debug, Clone)]
struct IndexSet {
    key: VertexKey,
    vertex: Index,
    next: Option<usize>,
}

/// 把 OBJ 索引转换为 0 起始索引
///
/// 负数相对于当前已解析的数量（`-1` 为最近一个），正数减一；
/// 0 和越界索引返回 `None`。
pub fn resolve_index(raw: i64, count: usize) -> Option<usize> {
    let resolved = if raw < 0 {
        count as i64 + raw
    } else {
        raw - 1
    };

    if (0..count as i64).contains(&resolved) {
        Some(resolved as usize)
    } else {
        None
    }
}

/// 一次解析的上下文
#[derive(Debug, Default)]
pub struct ParseContext {
    positions: Vec<[f32; 3]>,
    /// 每个原始位置的链表头
    chains: Vec<Option<usize>>,
    texcoords: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
    sets: Vec<IndexSet>,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_position(&mut self, position: [f32; 3]) {
        self.positions.push(position);
        self.chains.push(None);
    }

    pub fn push_texcoord(&mut self, texcoord: [f32; 2]) {
        self.texcoords.push(texcoord);
    }

    pub fn push_normal(&mut self, normal: [f32; 3]) {
        self.normals.push(normal);
    }

    /// 去重记录的数量（等于创建的输出顶点数）
    #[inline]
    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    #[inline]
    pub fn position(&self, i: usize) -> [f32; 3] {
        self.positions[i]
    }

    /// 按当前数量解析原始索引
    ///
    /// 位置索引越界时返回 `None`；纹理坐标或法线越界时视为缺省。
    pub fn key(&self, raw: RawIndices, group: i32) -> Option<VertexKey> {
        Some(VertexKey {
            position: resolve_index(raw.position, self.positions.len())?,
            texcoord: raw
                .texcoord
                .and_then(|t| resolve_index(t, self.texcoords.len())),
            normal: raw.normal.and_then(|n| resolve_index(n, self.normals.len())),
            group,
        })
    }

    /// 查找或创建与 `key` 对应的输出顶点
    pub fn intern(&mut self, mesh: &mut Mesh, key: VertexKey) -> Result<Index> {
        let head = self.chains[key.position];

        let mut cursor = head;
        while let Some(i) = cursor {
            let set = &self.sets[i];
            if set.key == key {
                return Ok(set.vertex);
            }
            cursor = set.next;
        }

        let vertex = Vertex {
            position: self.positions[key.position],
            normal: key.normal.map_or([0.0; 3], |n| self.normals[n]),
            texcoord: key.texcoord.map_or([0.0; 2], |t| self.texcoords[t]),
            tangent: [0.0; 3],
        };
        let vi = mesh.add_vertex(vertex)?;

        self.sets.push(IndexSet {
            key,
            vertex: vi,
            next: head,
        });
        self.chains[key.position] = Some(self.sets.len() - 1);

        Ok(vi)
    }
}
