/// 网格优化
///
/// - [`Mesh::weld_vertices`]：合并容差范围内相同的顶点
/// - [`Mesh::optimize_vertex_cache`]：按模拟的 FIFO 顶点缓存贪心重排三角形
/// - [`Mesh::acmr`]：平均缓存缺失率（每个三角形的缓存缺失次数）

use crate::core::error::Result;
use crate::{optimizer_debug, span_trace};

use super::mesh::Mesh;
use super::vertex::{Index, Vertex};

/// 两个顶点是否可以合并
///
/// 位置和纹理坐标逐分量相差小于 `eps`，且法线点积不小于 `dot`。
pub fn vertices_match(a: &Vertex, b: &Vertex, eps: f32, dot: f32) -> bool {
    let close = |x: f32, y: f32| (x - y).abs() < eps;

    (0..3).all(|k| close(a.position[k], b.position[k]))
        && (0..2).all(|k| close(a.texcoord[k], b.texcoord[k]))
        && a.normal[0] * b.normal[0] + a.normal[1] * b.normal[1] + a.normal[2] * b.normal[2] >= dot
}

impl Mesh {
    /// 焊接顶点
    ///
    /// 按原始顺序，把每个顶点合并到第一个与之匹配的更早顶点上：
    /// 引用改为指向较早的顶点，然后删除该顶点（后续索引随之减一）。
    /// 复杂度 O(n²)。使用相同参数再次执行不会再合并任何顶点。
    ///
    /// 返回合并的顶点数量。
    pub fn weld_vertices(&mut self, eps: f32, dot: f32) -> Result<usize> {
        let span = span_trace!("weld_vertices");
        let _guard = span.enter();

        let mut merged = 0;
        let mut vi: Index = 0;

        while (vi as usize) < self.vertex_count() {
            let target = (0..vi).find(|&vj| vertices_match(self.vertex(vi), self.vertex(vj), eps, dot));

            match target {
                Some(vj) => {
                    optimizer_debug!("Merging vertex {} into {}", vi, vj);
                    self.redirect_vertex(vi, vj)?;
                    self.delete_vertex(vi)?;
                    merged += 1;
                }
                None => vi += 1,
            }
        }

        optimizer_debug!("Welded {} vertices, {} remain", merged, self.vertex_count());
        Ok(merged)
    }

    /// 顶点缓存优化
    ///
    /// 模拟大小为 `cache_size` 的 FIFO 顶点缓存，逐个表面贪心重排三角形。
    /// 对当前扫描位置，从缓存中各顶点引用的三角形里选出得分最高者换到该位置：
    ///
    /// - 近期使用奖励：三个顶点中仍在缓存窗口内的，越新加分越多
    /// - 度数惩罚：减去三个顶点剩余的引用数，优先消耗低度数顶点
    ///
    /// 缓存状态在表面之间保留。线段不受影响。`cache_size == 0` 时不做任何事。
    ///
    /// 按 [`Mesh::acmr`] 的方式回放，重排后缺失更多的表面恢复原顺序，
    /// 因此结果的 ACMR 不会高于输入。
    pub fn optimize_vertex_cache(&mut self, cache_size: usize) -> Result<()> {
        if cache_size == 0 {
            return Ok(());
        }

        let span = span_trace!("optimize_vertex_cache");
        let _guard = span.enter();

        let qc = cache_size as i64;
        let vc = self.vertex_count();

        let mut cache: Vec<Option<Index>> = vec![None; cache_size];
        let mut serial: i64 = 1;
        let mut cursor = 0;

        for si in 0..self.surface_count() {
            let pc = self.polygon_count(si);
            let original = self.surface(si).polygons.clone();
            let original_misses = self.surface_misses(si, cache_size);

            // 每个顶点最近一次入缓存的序号，以及引用它的三角形列表
            let mut inserted = vec![-qc; vc];
            let mut refs: Vec<Vec<usize>> = vec![Vec::new(); vc];
            for (pi, polygon) in self.surface(si).polygons.iter().enumerate() {
                for &v in &polygon.indices {
                    refs[v as usize].push(pi);
                }
            }

            for pi in 0..pc {
                let window = serial - qc;

                let mut best_score = -1;
                let mut best = pi;

                for &cached in cache.iter().flatten() {
                    for &pj in &refs[cached as usize] {
                        let candidate = self.polygon(si, pj).indices;

                        let mut score = 0;
                        for &v in &candidate {
                            let s = inserted[v as usize];
                            if s > window {
                                score += s - window;
                            }
                        }
                        for &v in &candidate {
                            score -= refs[v as usize].len() as i64;
                        }

                        if best_score < score {
                            best_score = score;
                            best = pj;
                        }
                    }
                }

                if best != pi {
                    // 原来位于 pi 的三角形将被换到 best
                    for &v in &self.polygon(si, pi).indices {
                        if let Some(slot) = refs[v as usize].iter_mut().find(|r| **r == pi) {
                            *slot = best;
                        }
                    }
                    self.swap_polygons(si, pi, best)?;
                }

                for &v in &self.polygon(si, pi).indices {
                    let v = v as usize;

                    if serial - inserted[v] >= qc {
                        inserted[v] = serial;
                        serial += 1;
                        cache[cursor] = Some(v as Index);
                        cursor = (cursor + 1) % cache_size;
                    }

                    if let Some(pos) = refs[v].iter().position(|&r| r == best) {
                        refs[v].swap_remove(pos);
                    }
                }
            }

            // 贪心结果比原顺序差时恢复原顺序
            if self.surface_misses(si, cache_size) > original_misses {
                optimizer_debug!("Surface {}: keeping original triangle order", si);
                for (pi, polygon) in original.iter().enumerate() {
                    self.set_polygon(si, pi, polygon.indices)?;
                }
            }
        }

        optimizer_debug!("Reordered {} triangles for a {}-entry cache", self.triangle_count(), cache_size);
        Ok(())
    }

    /// 用空的 FIFO 缓存回放表面 `si` 的三角形流，返回缓存缺失次数
    fn surface_misses(&self, si: usize, cache_size: usize) -> usize {
        let qc = cache_size as i64;
        let mut inserted = vec![-qc; self.vertex_count()];
        let mut serial: i64 = 1;
        let mut misses = 0;

        for polygon in &self.surface(si).polygons {
            for &v in &polygon.indices {
                let v = v as usize;
                if serial - inserted[v] >= qc {
                    inserted[v] = serial;
                    serial += 1;
                    misses += 1;
                }
            }
        }
        misses
    }

    /// 平均缓存缺失率
    ///
    /// 用大小为 `cache_size` 的 FIFO 缓存回放三角形流，返回缺失次数 / 三角形数。
    /// 每个表面开始时缓存视为空。没有三角形时返回 0。
    pub fn acmr(&self, cache_size: usize) -> f32 {
        let triangles = self.triangle_count();
        if triangles == 0 {
            return 0.0;
        }

        let misses: usize = (0..self.surface_count())
            .map(|si| self.surface_misses(si, cache_size))
            .sum();
        misses as f32 / triangles as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::vertex::Polygon;

    /// n x n 的网格，每个格子两个三角形
    fn grid(n: u32) -> Mesh {
        let mut mesh = Mesh::new();
        let mi = mesh.add_material().unwrap();
        let si = mesh.add_surface(mi).unwrap();

        for y in 0..=n {
            for x in 0..=n {
                mesh.add_vertex(Vertex::at([x as f32, y as f32, 0.0])).unwrap();
            }
        }
        for y in 0..n {
            for x in 0..n {
                let a = y * (n + 1) + x;
                let b = a + 1;
                let c = a + n + 1;
                let d = c + 1;
                mesh.add_polygon(si, [a, b, d]).unwrap();
                mesh.add_polygon(si, [a, d, c]).unwrap();
            }
        }
        mesh
    }

    /// 确定性的 Fisher-Yates 洗牌
    fn shuffle(mesh: &mut Mesh, seed: u64) {
        let mut state = seed;
        for i in (1..mesh.polygon_count(0)).rev() {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let j = ((state >> 33) % (i as u64 + 1)) as usize;
            mesh.swap_polygons(0, i, j).unwrap();
        }
    }

    #[test]
    fn test_acmr_single_triangle() {
        let mut mesh = Mesh::new();
        let mi = mesh.add_material().unwrap();
        let si = mesh.add_surface(mi).unwrap();
        for _ in 0..4 {
            mesh.add_vertex(Vertex::default()).unwrap();
        }
        mesh.add_polygon(si, [0, 1, 2]).unwrap();
        assert_eq!(mesh.acmr(16), 3.0);

        // 第二个三角形共享一条边，只有一次缺失
        mesh.add_polygon(si, [2, 1, 3]).unwrap();
        assert_eq!(mesh.acmr(16), 2.0);
        assert_eq!(mesh.acmr(3), 2.0);
    }

    #[test]
    fn test_acmr_empty() {
        assert_eq!(Mesh::new().acmr(16), 0.0);
    }

    #[test]
    fn test_sort_improves_acmr() {
        let mut mesh = grid(8);
        shuffle(&mut mesh, 42);
        let before_polygons = polygon_multiset(&mesh, 0);
        let before = mesh.acmr(16);

        mesh.optimize_vertex_cache(16).unwrap();
        let after = mesh.acmr(16);

        assert!(after <= before, "ACMR {} -> {}", before, after);
        assert!(after < 1.5, "ACMR after sort: {}", after);
        assert_eq!(polygon_multiset(&mesh, 0), before_polygons);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_sort_small_cache() {
        let mut mesh = grid(6);
        shuffle(&mut mesh, 3);
        let before = mesh.acmr(3);

        mesh.optimize_vertex_cache(3).unwrap();
        assert!(mesh.acmr(3) <= before);
    }

    /// 随机网格：`surfaces` 个表面，每个表面若干个顶点互不相同的三角形
    fn random_mesh(seed: u64, surfaces: usize) -> Mesh {
        let mut state = seed;
        let mut next = |bound: u64| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) % bound
        };

        let mut mesh = Mesh::new();
        let mi = mesh.add_material().unwrap();
        let vc = 4 + next(40) as u32;
        for i in 0..vc {
            mesh.add_vertex(Vertex::at([i as f32, 0.0, 0.0])).unwrap();
        }

        for _ in 0..surfaces {
            let si = mesh.add_surface(mi).unwrap();
            for _ in 0..1 + next(60) {
                let a = next(vc as u64) as u32;
                let b = (a + 1 + next(vc as u64 - 1) as u32) % vc;
                let mut c = next(vc as u64) as u32;
                while c == a || c == b {
                    c = (c + 1) % vc;
                }
                mesh.add_polygon(si, [a, b, c]).unwrap();
            }
        }
        mesh
    }

    fn polygon_multiset(mesh: &Mesh, si: usize) -> Vec<Polygon> {
        let mut polygons = mesh.surface(si).polygons.clone();
        polygons.sort_by_key(|p| p.indices);
        polygons
    }

    #[test]
    fn test_sort_never_worsens_random_meshes() {
        for seed in 0..200 {
            for surfaces in [1, 3] {
                for cache_size in [3, 4, 8, 16, 32] {
                    let mut mesh = random_mesh(seed, surfaces);
                    let before = mesh.acmr(cache_size);
                    let triangles: Vec<_> = (0..surfaces).map(|si| polygon_multiset(&mesh, si)).collect();

                    mesh.optimize_vertex_cache(cache_size).unwrap();
                    let after = mesh.acmr(cache_size);

                    assert!(
                        after <= before,
                        "seed {} surfaces {} cache {}: ACMR {} -> {}",
                        seed, surfaces, cache_size, before, after
                    );
                    for (si, expected) in triangles.iter().enumerate() {
                        assert_eq!(&polygon_multiset(&mesh, si), expected);
                    }
                }
            }
        }
    }

    #[test]
    fn test_acmr_resets_cache_per_surface() {
        let mut mesh = Mesh::new();
        let mi = mesh.add_material().unwrap();
        for _ in 0..3 {
            mesh.add_vertex(Vertex::default()).unwrap();
        }
        for _ in 0..2 {
            let si = mesh.add_surface(mi).unwrap();
            mesh.add_polygon(si, [0, 1, 2]).unwrap();
        }
        assert_eq!(mesh.acmr(16), 3.0);
    }

    #[test]
    fn test_sort_zero_cache_is_noop() {
        let mut mesh = grid(3);
        shuffle(&mut mesh, 9);
        let before = mesh.surface(0).polygons.clone();

        mesh.optimize_vertex_cache(0).unwrap();
        assert_eq!(mesh.surface(0).polygons, before);
    }

    #[test]
    fn test_weld_merges_duplicates() {
        let mut mesh = Mesh::new();
        let mi = mesh.add_material().unwrap();
        let si = mesh.add_surface(mi).unwrap();

        let n = [0.0, 0.0, 1.0];
        for p in [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 0.0, 0.0000001], // 与 0 重合
            [1.0, 1.0, 0.0],       // 与 2 重合
            [0.0, 1.0, 0.0],
        ] {
            mesh.add_vertex(Vertex::new(p, n, [0.0; 2], [0.0; 3])).unwrap();
        }
        mesh.add_polygon(si, [0, 1, 2]).unwrap();
        mesh.add_polygon(si, [3, 4, 5]).unwrap();
        mesh.add_line(si, [5, 3]).unwrap();

        assert_eq!(mesh.weld_vertices(1e-5, 0.999).unwrap(), 2);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.polygon(0, 1).indices, [0, 2, 3]);
        assert_eq!(mesh.line(0, 0).indices, [3, 0]);

        // 再次执行不会合并
        assert_eq!(mesh.weld_vertices(1e-5, 0.999).unwrap(), 0);
    }

    #[test]
    fn test_weld_respects_normals() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Vertex::new([0.0; 3], [0.0, 0.0, 1.0], [0.0; 2], [0.0; 3])).unwrap();
        mesh.add_vertex(Vertex::new([0.0; 3], [0.0, 0.0, -1.0], [0.0; 2], [0.0; 3])).unwrap();
        mesh.add_vertex(Vertex::new([0.0; 3], [0.0, 0.0, 1.0], [0.5, 0.0], [0.0; 3])).unwrap();

        assert_eq!(mesh.weld_vertices(1e-5, 0.5).unwrap(), 0);
        assert_eq!(mesh.weld_vertices(1e-5, -1.0).unwrap(), 1);
        assert_eq!(mesh.vertex_count(), 2);
    }

    #[test]
    fn test_vertices_match() {
        let a = Vertex::at([1.0, 2.0, 3.0]);
        let mut b = a;
        assert!(vertices_match(&a, &b, 1e-3, 0.0));

        b.position[2] += 0.01;
        assert!(!vertices_match(&a, &b, 1e-3, 0.0));
        assert!(vertices_match(&a, &b, 0.1, 0.0));
    }
}
