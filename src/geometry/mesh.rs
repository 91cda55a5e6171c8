/// 网格数据结构模块
///
/// CPU 侧的网格存储：材质、顶点和表面（三角形/线段列表）。
/// 所有修改都通过本模块的 CRUD 接口进行，接口负责维持引用完整性：
///
/// - 所有三角形/线段的顶点索引都在 `[0, vertex_count)` 内
/// - 所有表面的材质索引都在 `[0, material_count)` 内
/// - 数组始终紧凑，删除会立即压缩并重新编号
///
/// 带索引参数的修改操作会校验索引并返回 [`MeshError::InvalidIndex`]；
/// `vertex(i)`、`polygon(s, p)` 等只读访问器把越界视为编程错误，直接 panic。

use std::path::PathBuf;

use crate::core::error::{MeshError, Result};
use crate::texture::TextureData;

use super::material::{Material, PropertyKind};
use super::vertex::{Index, Line, Polygon, Vertex};

/// 表面
///
/// 一组共享同一材质的三角形和线段。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Surface {
    /// 材质索引
    pub material: usize,

    /// 三角形列表
    pub polygons: Vec<Polygon>,

    /// 线段列表
    pub lines: Vec<Line>,
}

impl Surface {
    /// 三角形索引缓冲区（每 3 个索引一个三角形）
    #[inline]
    pub fn polygon_indices(&self) -> &[Index] {
        bytemuck::cast_slice(&self.polygons)
    }

    /// 线段索引缓冲区（每 2 个索引一条线段）
    #[inline]
    pub fn line_indices(&self) -> &[Index] {
        bytemuck::cast_slice(&self.lines)
    }

    /// 是否既没有三角形也没有线段
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty() && self.lines.is_empty()
    }

    fn remove_vertex(&mut self, vi: Index) {
        self.polygons.retain(|p| !p.references(vi));
        self.lines.retain(|l| !l.references(vi));

        for index in self
            .polygons
            .iter_mut()
            .flat_map(|p| p.indices.iter_mut())
            .chain(self.lines.iter_mut().flat_map(|l| l.indices.iter_mut()))
        {
            if *index > vi {
                *index -= 1;
            }
        }
    }

    fn redirect_vertex(&mut self, from: Index, to: Index) {
        for index in self
            .polygons
            .iter_mut()
            .flat_map(|p| p.indices.iter_mut())
            .chain(self.lines.iter_mut().flat_map(|l| l.indices.iter_mut()))
        {
            if *index == from {
                *index = to;
            }
        }
    }
}

/// 轴对齐包围盒
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Bounds {
    /// 点是否在包围盒内（含边界）
    pub fn contains(&self, point: [f32; 3]) -> bool {
        (0..3).all(|k| self.min[k] <= point[k] && point[k] <= self.max[k])
    }

    pub fn center(&self) -> [f32; 3] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        ]
    }

    pub fn size(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}

/// 追加元素；容量不足时按倍数增长（从 2 开始）
fn push_grow<T>(items: &mut Vec<T>, item: T, what: &'static str) -> Result<usize> {
    if items.len() == items.capacity() {
        let additional = items.capacity().max(2);
        items
            .try_reserve_exact(additional)
            .map_err(|_| MeshError::OutOfMemory { what })?;
    }
    items.push(item);
    Ok(items.len() - 1)
}

#[inline]
fn check(kind: &'static str, index: usize, count: usize) -> Result<()> {
    if index < count {
        Ok(())
    } else {
        Err(MeshError::invalid_index(kind, index, count))
    }
}

/// CPU 侧网格
///
/// # 示例
///
/// ```rust
/// use wavefront_mesh::geometry::{Mesh, Vertex};
///
/// let mut mesh = Mesh::new();
/// let mi = mesh.add_material()?;
/// let si = mesh.add_surface(mi)?;
/// let a = mesh.add_vertex(Vertex::at([0.0, 0.0, 0.0]))?;
/// let b = mesh.add_vertex(Vertex::at([1.0, 0.0, 0.0]))?;
/// let c = mesh.add_vertex(Vertex::at([0.0, 1.0, 0.0]))?;
/// mesh.add_polygon(si, [a, b, c])?;
///
/// assert_eq!(mesh.triangle_count(), 1);
/// # Ok::<(), wavefront_mesh::core::error::MeshError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    materials: Vec<Material>,
    vertices: Vec<Vertex>,
    surfaces: Vec<Surface>,

    /// 自上次上传以来几何数据是否被修改
    dirty: bool,
}

impl Mesh {
    /// 创建一个空网格
    pub fn new() -> Self {
        Self::default()
    }

    // ---- 数量 ----

    #[inline]
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    #[inline]
    pub fn polygon_count(&self, si: usize) -> usize {
        self.surfaces[si].polygons.len()
    }

    #[inline]
    pub fn line_count(&self, si: usize) -> usize {
        self.surfaces[si].lines.len()
    }

    /// 所有表面的三角形总数
    pub fn triangle_count(&self) -> usize {
        self.surfaces.iter().map(|s| s.polygons.len()).sum()
    }

    /// 所有表面的线段总数
    pub fn total_line_count(&self) -> usize {
        self.surfaces.iter().map(|s| s.lines.len()).sum()
    }

    // ---- 只读访问 ----

    #[inline]
    pub fn material(&self, mi: usize) -> &Material {
        &self.materials[mi]
    }

    #[inline]
    pub fn vertex(&self, vi: Index) -> &Vertex {
        &self.vertices[vi as usize]
    }

    #[inline]
    pub fn surface(&self, si: usize) -> &Surface {
        &self.surfaces[si]
    }

    #[inline]
    pub fn polygon(&self, si: usize, pi: usize) -> &Polygon {
        &self.surfaces[si].polygons[pi]
    }

    #[inline]
    pub fn line(&self, si: usize, li: usize) -> &Line {
        &self.surfaces[si].lines[li]
    }

    #[inline]
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    // ---- 脏标记 ----

    /// 几何数据是否在上次上传后被修改
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// 渲染适配器上传完成后调用
    #[inline]
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    // ---- 添加 ----

    /// 添加一个默认材质，返回其索引
    pub fn add_material(&mut self) -> Result<usize> {
        push_grow(&mut self.materials, Material::default(), "materials")
    }

    /// 添加一个顶点，返回其索引
    pub fn add_vertex(&mut self, vertex: Vertex) -> Result<Index> {
        if self.vertices.len() >= Index::MAX as usize {
            return Err(MeshError::OutOfMemory { what: "vertices" });
        }
        let vi = push_grow(&mut self.vertices, vertex, "vertices")?;
        self.dirty = true;
        Ok(vi as Index)
    }

    /// 添加一个使用 `material` 的空表面，返回其索引
    pub fn add_surface(&mut self, material: usize) -> Result<usize> {
        check("material", material, self.materials.len())?;
        let si = push_grow(
            &mut self.surfaces,
            Surface {
                material,
                ..Surface::default()
            },
            "surfaces",
        )?;
        self.dirty = true;
        Ok(si)
    }

    /// 向表面添加一个三角形，返回其在表面内的索引
    pub fn add_polygon(&mut self, si: usize, indices: [Index; 3]) -> Result<usize> {
        check("surface", si, self.surfaces.len())?;
        self.check_vertices(&indices)?;
        let pi = push_grow(
            &mut self.surfaces[si].polygons,
            Polygon { indices },
            "polygons",
        )?;
        self.dirty = true;
        Ok(pi)
    }

    /// 向表面添加一条线段，返回其在表面内的索引
    pub fn add_line(&mut self, si: usize, indices: [Index; 2]) -> Result<usize> {
        check("surface", si, self.surfaces.len())?;
        self.check_vertices(&indices)?;
        let li = push_grow(&mut self.surfaces[si].lines, Line { indices }, "lines")?;
        self.dirty = true;
        Ok(li)
    }

    fn check_vertices(&self, indices: &[Index]) -> Result<()> {
        for &vi in indices {
            check("vertex", vi as usize, self.vertices.len())?;
        }
        Ok(())
    }

    // ---- 修改：材质 ----

    pub fn set_material_name(&mut self, mi: usize, name: Option<String>) -> Result<()> {
        check("material", mi, self.materials.len())?;
        self.materials[mi].name = name;
        Ok(())
    }

    pub fn set_material_color(&mut self, mi: usize, kind: PropertyKind, color: [f32; 4]) -> Result<()> {
        check("material", mi, self.materials.len())?;
        self.materials[mi].property_mut(kind).color = color;
        Ok(())
    }

    /// 设置贴图路径；已解码的贴图会被丢弃
    pub fn set_material_map(&mut self, mi: usize, kind: PropertyKind, path: Option<PathBuf>) -> Result<()> {
        check("material", mi, self.materials.len())?;
        let property = self.materials[mi].property_mut(kind);
        property.map_path = path;
        property.texture = None;
        Ok(())
    }

    pub fn set_material_texture(
        &mut self,
        mi: usize,
        kind: PropertyKind,
        texture: Option<TextureData>,
    ) -> Result<()> {
        check("material", mi, self.materials.len())?;
        self.materials[mi].property_mut(kind).texture = texture;
        Ok(())
    }

    pub fn set_material_clamp(&mut self, mi: usize, kind: PropertyKind, clamp: bool) -> Result<()> {
        check("material", mi, self.materials.len())?;
        self.materials[mi].property_mut(kind).clamp = clamp;
        Ok(())
    }

    pub fn set_material_offset(&mut self, mi: usize, kind: PropertyKind, offset: [f32; 3]) -> Result<()> {
        check("material", mi, self.materials.len())?;
        self.materials[mi].property_mut(kind).offset = offset;
        Ok(())
    }

    pub fn set_material_scale(&mut self, mi: usize, kind: PropertyKind, scale: [f32; 3]) -> Result<()> {
        check("material", mi, self.materials.len())?;
        self.materials[mi].property_mut(kind).scale = scale;
        Ok(())
    }

    // ---- 修改：顶点 ----

    fn vertex_mut(&mut self, vi: Index) -> Result<&mut Vertex> {
        check("vertex", vi as usize, self.vertices.len())?;
        self.dirty = true;
        Ok(&mut self.vertices[vi as usize])
    }

    pub fn set_vertex_position(&mut self, vi: Index, position: [f32; 3]) -> Result<()> {
        self.vertex_mut(vi)?.position = position;
        Ok(())
    }

    pub fn set_vertex_normal(&mut self, vi: Index, normal: [f32; 3]) -> Result<()> {
        self.vertex_mut(vi)?.normal = normal;
        Ok(())
    }

    pub fn set_vertex_texcoord(&mut self, vi: Index, texcoord: [f32; 2]) -> Result<()> {
        self.vertex_mut(vi)?.texcoord = texcoord;
        Ok(())
    }

    pub fn set_vertex_tangent(&mut self, vi: Index, tangent: [f32; 3]) -> Result<()> {
        self.vertex_mut(vi)?.tangent = tangent;
        Ok(())
    }

    // ---- 修改：表面与图元 ----

    pub fn set_surface_material(&mut self, si: usize, material: usize) -> Result<()> {
        check("surface", si, self.surfaces.len())?;
        check("material", material, self.materials.len())?;
        self.surfaces[si].material = material;
        self.dirty = true;
        Ok(())
    }

    pub fn set_polygon(&mut self, si: usize, pi: usize, indices: [Index; 3]) -> Result<()> {
        check("surface", si, self.surfaces.len())?;
        check("polygon", pi, self.surfaces[si].polygons.len())?;
        self.check_vertices(&indices)?;
        self.surfaces[si].polygons[pi].indices = indices;
        self.dirty = true;
        Ok(())
    }

    pub fn set_line(&mut self, si: usize, li: usize, indices: [Index; 2]) -> Result<()> {
        check("surface", si, self.surfaces.len())?;
        check("line", li, self.surfaces[si].lines.len())?;
        self.check_vertices(&indices)?;
        self.surfaces[si].lines[li].indices = indices;
        self.dirty = true;
        Ok(())
    }

    /// 交换表面内的两个三角形
    pub fn swap_polygons(&mut self, si: usize, a: usize, b: usize) -> Result<()> {
        check("surface", si, self.surfaces.len())?;
        let count = self.surfaces[si].polygons.len();
        check("polygon", a, count)?;
        check("polygon", b, count)?;
        self.surfaces[si].polygons.swap(a, b);
        self.dirty = true;
        Ok(())
    }

    /// 交换两个表面的位置
    pub fn swap_surfaces(&mut self, a: usize, b: usize) -> Result<()> {
        check("surface", a, self.surfaces.len())?;
        check("surface", b, self.surfaces.len())?;
        self.surfaces.swap(a, b);
        self.dirty = true;
        Ok(())
    }

    /// 把所有三角形和线段中对 `from` 的引用改为 `to`
    pub fn redirect_vertex(&mut self, from: Index, to: Index) -> Result<()> {
        self.check_vertices(&[from, to])?;
        for surface in &mut self.surfaces {
            surface.redirect_vertex(from, to);
        }
        self.dirty = true;
        Ok(())
    }

    // ---- 删除 ----

    /// 删除顶点
    ///
    /// 引用该顶点的三角形和线段一并删除，其余大于 `vi` 的索引减一。
    pub fn delete_vertex(&mut self, vi: Index) -> Result<()> {
        check("vertex", vi as usize, self.vertices.len())?;

        for surface in &mut self.surfaces {
            surface.remove_vertex(vi);
        }
        self.vertices.remove(vi as usize);
        self.dirty = true;
        Ok(())
    }

    /// 删除材质
    ///
    /// 使用该材质的表面一并删除，其余表面中大于 `mi` 的材质索引减一。
    pub fn delete_material(&mut self, mi: usize) -> Result<()> {
        check("material", mi, self.materials.len())?;

        self.surfaces.retain(|s| s.material != mi);
        for surface in &mut self.surfaces {
            if surface.material > mi {
                surface.material -= 1;
            }
        }

        self.materials.remove(mi);
        self.dirty = true;
        Ok(())
    }

    pub fn delete_surface(&mut self, si: usize) -> Result<()> {
        check("surface", si, self.surfaces.len())?;
        self.surfaces.remove(si);
        self.dirty = true;
        Ok(())
    }

    pub fn delete_polygon(&mut self, si: usize, pi: usize) -> Result<()> {
        check("surface", si, self.surfaces.len())?;
        check("polygon", pi, self.surfaces[si].polygons.len())?;
        self.surfaces[si].polygons.remove(pi);
        self.dirty = true;
        Ok(())
    }

    pub fn delete_line(&mut self, si: usize, li: usize) -> Result<()> {
        check("surface", si, self.surfaces.len())?;
        check("line", li, self.surfaces[si].lines.len())?;
        self.surfaces[si].lines.remove(li);
        self.dirty = true;
        Ok(())
    }

    /// 精简网格
    ///
    /// 先删除没有任何图元的表面，再删除没有表面引用的材质。
    pub fn minimize(&mut self) -> Result<()> {
        for si in (0..self.surfaces.len()).rev() {
            if self.surfaces[si].is_empty() {
                self.delete_surface(si)?;
            }
        }

        for mi in (0..self.materials.len()).rev() {
            if !self.surfaces.iter().any(|s| s.material == mi) {
                self.delete_material(mi)?;
            }
        }
        Ok(())
    }

    /// 所有顶点位置的轴对齐包围盒；空网格返回 `None`
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.vertices.first()?;
        let mut bounds = Bounds {
            min: first.position,
            max: first.position,
        };

        for vertex in &self.vertices[1..] {
            for k in 0..3 {
                bounds.min[k] = bounds.min[k].min(vertex.position[k]);
                bounds.max[k] = bounds.max[k].max(vertex.position[k]);
            }
        }
        Some(bounds)
    }

    /// 检查引用完整性
    pub fn validate(&self) -> Result<()> {
        for surface in &self.surfaces {
            check("material", surface.material, self.materials.len())?;
            self.check_vertices(surface.polygon_indices())?;
            self.check_vertices(surface.line_indices())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 两个三角形组成的正方形，外加一条对角线
    fn quad() -> Mesh {
        let mut mesh = Mesh::new();
        let mi = mesh.add_material().unwrap();
        let si = mesh.add_surface(mi).unwrap();

        for p in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]] {
            mesh.add_vertex(Vertex::at(p)).unwrap();
        }
        mesh.add_polygon(si, [0, 1, 2]).unwrap();
        mesh.add_polygon(si, [0, 2, 3]).unwrap();
        mesh.add_line(si, [1, 3]).unwrap();
        mesh
    }

    #[test]
    fn test_mesh_creation() {
        let mesh = Mesh::new();

        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.surface_count(), 0);
        assert_eq!(mesh.material_count(), 0);
        assert!(!mesh.is_dirty());
        assert!(mesh.bounds().is_none());
    }

    #[test]
    fn test_capacity_doubles() {
        let mut mesh = Mesh::new();
        let mut capacities = Vec::new();
        for i in 0..9 {
            mesh.add_vertex(Vertex::at([i as f32, 0.0, 0.0])).unwrap();
            capacities.push(mesh.vertices.capacity());
        }

        assert_eq!(capacities, vec![2, 2, 4, 4, 8, 8, 8, 8, 16]);
    }

    #[test]
    fn test_counts() {
        let mesh = quad();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.polygon_count(0), 2);
        assert_eq!(mesh.line_count(0), 1);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.total_line_count(), 1);
        assert_eq!(mesh.surface(0).polygon_indices(), &[0, 1, 2, 0, 2, 3]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_invalid_indices_are_rejected() {
        let mut mesh = quad();

        assert!(matches!(
            mesh.add_polygon(0, [0, 1, 4]),
            Err(MeshError::InvalidIndex { kind: "vertex", index: 4, count: 4 })
        ));
        assert!(matches!(
            mesh.add_line(3, [0, 1]),
            Err(MeshError::InvalidIndex { kind: "surface", .. })
        ));
        assert!(matches!(
            mesh.add_surface(1),
            Err(MeshError::InvalidIndex { kind: "material", .. })
        ));
        assert!(mesh.set_vertex_position(9, [0.0; 3]).is_err());
        assert!(mesh.delete_polygon(0, 2).is_err());

        // 失败的操作不改变已有数据
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.surface_count(), 1);
    }

    #[test]
    #[should_panic]
    fn test_read_out_of_range_panics() {
        let mesh = quad();
        let _ = mesh.vertex(10);
    }

    #[test]
    fn test_delete_vertex_cascades() {
        let mut mesh = quad();
        mesh.delete_vertex(1).unwrap();

        // [0,1,2] 与线段 [1,3] 被删除，[0,2,3] 重新编号为 [0,1,2]
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.polygon_count(0), 1);
        assert_eq!(mesh.polygon(0, 0).indices, [0, 1, 2]);
        assert_eq!(mesh.line_count(0), 0);
        assert_eq!(mesh.vertex(1).position, [1.0, 1.0, 0.0]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_delete_unreferenced_vertex_renumbers() {
        let mut mesh = quad();
        let extra = mesh.add_vertex(Vertex::at([5.0, 5.0, 5.0])).unwrap();
        mesh.add_polygon(0, [extra, 2, 3]).unwrap();
        mesh.delete_vertex(0).unwrap();

        // 引用 0 的两个三角形被删，其余索引减一
        assert_eq!(mesh.polygon_count(0), 1);
        assert_eq!(mesh.polygon(0, 0).indices, [3, 1, 2]);
        assert_eq!(mesh.line(0, 0).indices, [0, 2]);
    }

    #[test]
    fn test_delete_material_cascades() {
        let mut mesh = quad();
        let m1 = mesh.add_material().unwrap();
        let m2 = mesh.add_material().unwrap();
        let s1 = mesh.add_surface(m1).unwrap();
        mesh.add_polygon(s1, [1, 2, 3]).unwrap();
        let s2 = mesh.add_surface(m2).unwrap();
        mesh.add_line(s2, [0, 2]).unwrap();

        mesh.delete_material(m1).unwrap();

        assert_eq!(mesh.material_count(), 2);
        assert_eq!(mesh.surface_count(), 2);
        assert_eq!(mesh.surface(0).material, 0);
        assert_eq!(mesh.surface(1).material, 1);
        assert_eq!(mesh.line(1, 0).indices, [0, 2]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_delete_shifts_elements() {
        let mut mesh = quad();
        mesh.delete_polygon(0, 0).unwrap();
        assert_eq!(mesh.polygon(0, 0).indices, [0, 2, 3]);

        mesh.delete_line(0, 0).unwrap();
        assert_eq!(mesh.line_count(0), 0);

        mesh.delete_surface(0).unwrap();
        assert_eq!(mesh.surface_count(), 0);
        assert_eq!(mesh.material_count(), 1);
    }

    #[test]
    fn test_minimize() {
        let mut mesh = quad();
        let unused = mesh.add_material().unwrap();
        let _empty = mesh.add_surface(unused).unwrap();
        let _orphan = mesh.add_material().unwrap();

        mesh.minimize().unwrap();

        assert_eq!(mesh.surface_count(), 1);
        assert_eq!(mesh.material_count(), 1);
        assert_eq!(mesh.surface(0).material, 0);
    }

    #[test]
    fn test_redirect_vertex() {
        let mut mesh = quad();
        mesh.redirect_vertex(3, 1).unwrap();

        assert_eq!(mesh.polygon(0, 1).indices, [0, 2, 1]);
        assert_eq!(mesh.line(0, 0).indices, [1, 1]);
    }

    #[test]
    fn test_dirty_flag() {
        let mut mesh = quad();
        assert!(mesh.is_dirty());

        mesh.mark_clean();
        mesh.set_material_color(0, PropertyKind::Diffuse, [1.0; 4]).unwrap();
        assert!(!mesh.is_dirty());

        mesh.set_vertex_normal(0, [0.0, 0.0, 1.0]).unwrap();
        assert!(mesh.is_dirty());

        mesh.mark_clean();
        mesh.delete_line(0, 0).unwrap();
        assert!(mesh.is_dirty());

        // 删除任何元素都会使已上传的数据失效
        mesh.mark_clean();
        let unused = mesh.add_material().unwrap();
        mesh.delete_material(unused).unwrap();
        assert!(mesh.is_dirty());
    }

    #[test]
    fn test_bounds_contains_all_vertices() {
        let mut mesh = quad();
        mesh.add_vertex(Vertex::at([-2.0, 0.5, 3.0])).unwrap();

        let bounds = mesh.bounds().unwrap();
        assert_eq!(bounds.min, [-2.0, 0.0, 0.0]);
        assert_eq!(bounds.max, [1.0, 1.0, 3.0]);
        assert_eq!(bounds.size(), [3.0, 1.0, 3.0]);
        for vertex in mesh.vertices() {
            assert!(bounds.contains(vertex.position));
        }
    }
}
