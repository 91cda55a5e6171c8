/// 几何后处理
///
/// 在网格存储之上推导顶点法线和切线空间，并按材质透明度调整表面顺序。

use crate::core::error::Result;
use crate::math::geometry::{accumulate, face_normal, face_tangent, orthonormalize};

use super::mesh::Mesh;
use super::vertex::Index;

impl Mesh {
    /// 重新计算顶点法线
    ///
    /// 所有法线清零后，把每个三角形未归一化的面法线累加到它的三个顶点。
    /// 此阶段不做归一化（由 [`Mesh::derive_tangents`] 完成）。
    pub fn derive_normals(&mut self) -> Result<()> {
        let mut normals = vec![[0.0f32; 3]; self.vertex_count()];

        for surface in self.surfaces() {
            for polygon in &surface.polygons {
                let [a, b, c] = polygon.indices.map(|i| i as usize);
                let n = face_normal(
                    self.vertices()[a].position,
                    self.vertices()[b].position,
                    self.vertices()[c].position,
                );
                accumulate(&mut normals[a], n);
                accumulate(&mut normals[b], n);
                accumulate(&mut normals[c], n);
            }
        }

        for (vi, normal) in normals.into_iter().enumerate() {
            self.set_vertex_normal(vi as Index, normal)?;
        }
        Ok(())
    }

    /// 计算切线空间
    ///
    /// 累加每个三角形的纹理空间切线，然后逐顶点归一化法线并把切线正交化。
    pub fn derive_tangents(&mut self) -> Result<()> {
        let mut tangents = vec![[0.0f32; 3]; self.vertex_count()];

        for surface in self.surfaces() {
            for polygon in &surface.polygons {
                let [a, b, c] = polygon.indices.map(|i| i as usize);
                let v = self.vertices();
                let u = face_tangent(
                    [v[a].position, v[b].position, v[c].position],
                    [v[a].texcoord, v[b].texcoord, v[c].texcoord],
                );
                accumulate(&mut tangents[a], u);
                accumulate(&mut tangents[b], u);
                accumulate(&mut tangents[c], u);
            }
        }

        for (vi, tangent) in tangents.into_iter().enumerate() {
            let vi = vi as Index;
            let (normal, tangent) = orthonormalize(self.vertex(vi).normal, tangent);
            self.set_vertex_normal(vi, normal)?;
            self.set_vertex_tangent(vi, tangent)?;
        }
        Ok(())
    }

    /// 按材质不透明度排序表面
    ///
    /// 不透明度（Kd alpha）较低的表面移到后面，相同不透明度保持原有顺序。
    /// 只是近似的从后往前绘制顺序，不是深度排序。
    pub fn order_by_transparency(&mut self) -> Result<()> {
        // 相邻交换的插入排序，保持稳定
        for si in 1..self.surface_count() {
            let mut sj = si;
            while sj > 0 && self.surface_alpha(sj - 1) < self.surface_alpha(sj) {
                self.swap_surfaces(sj - 1, sj)?;
                sj -= 1;
            }
        }
        Ok(())
    }

    fn surface_alpha(&self, si: usize) -> f32 {
        self.material(self.surface(si).material).alpha()
    }

    /// 加载后的标准处理：切线空间 + 透明度排序
    pub fn process(&mut self) -> Result<()> {
        self.derive_tangents()?;
        self.order_by_transparency()
    }
}
