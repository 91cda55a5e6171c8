//! 数学库模块
//!
//! 基于 `nalgebra` 提供网格处理所需的向量和矩阵类型。
//!
//! 顶点数据以 `[f32; N]` 原始数组存储（便于 `bytemuck` 零拷贝上传），
//! 计算时通过本模块的辅助函数与 `nalgebra` 类型互转。
//!
//! # 模块组织
//!
//! - **基础类型**：Vector3, Matrix4
//! - **常量**：EPSILON
//! - **矩阵辅助函数**：纹理坐标变换
//! - **几何处理**：面法线、法线累加、切线空间（见 geometry 子模块）

pub use nalgebra::{Matrix4 as Mat4, Vector3 as Vec3};

// 类型别名，使用更简洁的名称
pub type Vector3 = Vec3<f32>;
pub type Matrix4 = Mat4<f32>;

/// 数学常量
pub mod constants {
    /// 归一化时视为零长度的阈值
    pub const EPSILON: f32 = 1e-6;
}

/// 数组转向量
#[inline]
pub fn vec3(a: [f32; 3]) -> Vector3 {
    Vector3::from(a)
}

/// 向量转数组
#[inline]
pub fn to_array(v: &Vector3) -> [f32; 3] {
    [v.x, v.y, v.z]
}

/// 归一化；长度接近零时返回零向量
#[inline]
pub fn normalize_or_zero(v: Vector3) -> Vector3 {
    v.try_normalize(constants::EPSILON).unwrap_or_else(Vector3::zeros)
}

/// 矩阵辅助函数
pub mod matrix {
    use super::*;

    /// 纹理坐标变换矩阵：先缩放，再平移
    ///
    /// 列主序下 `as_slice()[0]`、`[5]`、`[10]` 为缩放，`[12..15]` 为平移。
    pub fn texture_transform(scale: [f32; 3], offset: [f32; 3]) -> Matrix4 {
        Matrix4::new_translation(&vec3(offset)) * Matrix4::new_nonuniform_scaling(&vec3(scale))
    }
}

// 几何处理模块（面法线、切线等）
pub mod geometry;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_or_zero() {
        let n = normalize_or_zero(Vector3::new(3.0, 4.0, 0.0));
        assert!((n.x - 0.6).abs() < 1e-6);
        assert!((n.y - 0.8).abs() < 1e-6);

        assert_eq!(normalize_or_zero(Vector3::zeros()), Vector3::zeros());
    }

    #[test]
    fn test_texture_transform_layout() {
        let m = matrix::texture_transform([2.0, 3.0, 4.0], [0.5, 0.25, 0.0]);
        let s = m.as_slice();

        assert_eq!(s[0], 2.0);
        assert_eq!(s[5], 3.0);
        assert_eq!(s[10], 4.0);
        assert_eq!(s[12], 0.5);
        assert_eq!(s[13], 0.25);
        assert_eq!(s[14], 0.0);
        assert_eq!(s[15], 1.0);
    }
}
