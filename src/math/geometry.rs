//! 几何数学工具模块
//!
//! 提供网格后处理使用的逐三角形/逐顶点计算：
//! - 面法线（未归一化，长度为三角形面积的两倍）
//! - 纹理空间切线
//! - 切线空间正交化
//!
//! 这些函数只做数值计算，网格遍历在 `geometry::process` 中完成。

use super::{normalize_or_zero, to_array, vec3, Vector3};

/// 三角形的面法线
///
/// 返回 `cross(p1 - p0, p2 - p0)`，不做归一化，
/// 累加到顶点时较大的三角形权重更高。
///
/// # 示例
///
/// ```rust
/// use wavefront_mesh::math::geometry::face_normal;
///
/// let n = face_normal([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]);
/// assert_eq!(n, [0.0, 0.0, 4.0]);
/// ```
pub fn face_normal(p0: [f32; 3], p1: [f32; 3], p2: [f32; 3]) -> [f32; 3] {
    let edge1 = vec3(p1) - vec3(p0);
    let edge2 = vec3(p2) - vec3(p0);
    to_array(&edge1.cross(&edge2))
}

/// 三角形的纹理空间切线（单位向量）
///
/// 只使用纹理坐标的 V 分量差：
///
/// ```text
/// tangent = normalize(dv2 * (p1 - p0) - dv1 * (p2 - p0))
/// ```
///
/// 纹理坐标退化时返回零向量。
pub fn face_tangent(
    positions: [[f32; 3]; 3],
    texcoords: [[f32; 2]; 3],
) -> [f32; 3] {
    let [p0, p1, p2] = positions.map(vec3);

    let dv1 = texcoords[1][1] - texcoords[0][1];
    let dv2 = texcoords[2][1] - texcoords[0][1];

    let tangent: Vector3 = (p1 - p0) * dv2 - (p2 - p0) * dv1;
    to_array(&normalize_or_zero(tangent))
}

/// 正交化切线空间
///
/// 归一化法线，再把切线投影到垂直于法线的平面上并归一化：
/// `tangent = normalize(cross(cross(normal, tangent), normal))`。
///
/// 返回 `(normal, tangent)`。
pub fn orthonormalize(normal: [f32; 3], tangent: [f32; 3]) -> ([f32; 3], [f32; 3]) {
    let n = normalize_or_zero(vec3(normal));
    let u = vec3(tangent);

    let bitangent = n.cross(&u);
    let u = normalize_or_zero(bitangent.cross(&n));

    (to_array(&n), to_array(&u))
}

/// 向量累加
#[inline]
pub fn accumulate(target: &mut [f32; 3], value: [f32; 3]) {
    target[0] += value[0];
    target[1] += value[1];
    target[2] += value[2];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    fn length(a: [f32; 3]) -> f32 {
        dot(a, a).sqrt()
    }

    #[test]
    fn test_face_normal_is_unnormalized() {
        // XZ 平面上的三角形
        let n = face_normal([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 3.0]);

        assert!((n[1] + 3.0).abs() < 1e-6, "法线应指向 -Y 且长度为 3: {:?}", n);
        assert!(n[0].abs() < 1e-6);
        assert!(n[2].abs() < 1e-6);
    }

    #[test]
    fn test_face_normal_degenerate() {
        let n = face_normal([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]);
        assert_eq!(n, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_face_tangent() {
        // UV 的 V 沿 +Y 增加，切线应沿 +X
        let tangent = face_tangent(
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
        );

        assert!((tangent[0] - 1.0).abs() < 1e-6, "{:?}", tangent);
        assert!(tangent[1].abs() < 1e-6);
        assert!((length(tangent) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_face_tangent_degenerate_uv() {
        let tangent = face_tangent(
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            [[0.5, 0.5]; 3],
        );
        assert_eq!(tangent, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_orthonormalize() {
        let (n, u) = orthonormalize([0.0, 0.0, 2.0], [1.0, 0.0, 1.0]);

        assert!((length(n) - 1.0).abs() < 1e-6);
        assert!((length(u) - 1.0).abs() < 1e-6);
        assert!(dot(n, u).abs() < 1e-6, "切线应与法线正交: {:?} {:?}", n, u);
        assert!((u[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_accumulate() {
        let mut sum = [1.0, 2.0, 3.0];
        accumulate(&mut sum, [0.5, 0.5, -3.0]);
        assert_eq!(sum, [1.5, 2.5, 0.0]);
    }
}
