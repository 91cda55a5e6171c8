//! 纹理加载和数据结构
//!
//! 材质的 `map_*` 属性引用的 TGA 图像在 CPU 侧的表示。
//! 像素统一转换为 RGBA8，首行为图像顶部。

pub mod tga;

use std::path::Path;

use image::ImageFormat;

use crate::core::error::{Result, TextureError};

/// 上传到 GPU 之前的纹理数据
#[derive(Clone, Debug, PartialEq)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// 源文件的像素深度（24 或 32）
    pub source_depth: u8,
}

impl TextureData {
    /// RGBA8 像素数据应有的字节数
    fn rgba8_len(width: u32, height: u32) -> Option<usize> {
        (width as usize).checked_mul(height as usize)?.checked_mul(4)
    }

    /// 用 RGBA8 像素创建纹理
    pub fn new_rgba8(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(
            Some(data.len()),
            Self::rgba8_len(width, height),
            "Data size doesn't match RGBA8 format"
        );
        Self {
            data,
            width,
            height,
            source_depth: 32,
        }
    }

    /// 从内存中的 TGA 数据解码
    pub fn from_tga_bytes(bytes: &[u8]) -> Result<Self> {
        let header = tga::inspect(bytes)?;

        let img = image::load_from_memory_with_format(bytes, ImageFormat::Tga)
            .map_err(|e| TextureError::Decode(e.to_string()))?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(Self {
            data: rgba.into_raw(),
            width,
            height,
            source_depth: header.image_depth,
        })
    }

    /// 从 TGA 文件加载
    pub fn load_tga<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading texture from {:?}", path);

        let (_, bytes) = tga::read_tga_bytes(path)?;
        let texture = Self::from_tga_bytes(&bytes)?;

        tracing::debug!(
            "Loaded texture {}x{} ({} bit source)",
            texture.width,
            texture.height,
            texture.source_depth
        );
        Ok(texture)
    }

    /// 文件顺序的 BGRA 像素（首行为图像底部）
    fn file_pixels(&self) -> Result<(u16, u16, Vec<u8>)> {
        let width = u16::try_from(self.width).map_err(|_| TextureError::SizeMismatch {
            expected: u16::MAX as usize,
            actual: self.width as usize,
        })?;
        let height = u16::try_from(self.height).map_err(|_| TextureError::SizeMismatch {
            expected: u16::MAX as usize,
            actual: self.height as usize,
        })?;

        if !self.is_valid() {
            // 空纹理按一个像素计
            let expected = Self::rgba8_len(self.width.max(1), self.height.max(1));
            return Err(TextureError::SizeMismatch {
                expected: expected.unwrap_or(usize::MAX),
                actual: self.data.len(),
            }
            .into());
        }

        // 行序自底向上，通道顺序 BGRA
        let row_len = self.width as usize * 4;
        let mut pixels = Vec::with_capacity(self.data.len());
        for row in self.data.chunks_exact(row_len).rev() {
            for px in row.chunks_exact(4) {
                pixels.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
            }
        }
        Ok((width, height, pixels))
    }

    /// 编码为 32 位 TGA（左下角原点）
    pub fn to_tga_bytes(&self) -> Result<Vec<u8>> {
        let (width, height, pixels) = self.file_pixels()?;
        tga::encode_tga(width, height, 32, &pixels)
    }

    /// 保存为 32 位 TGA 文件
    pub fn save_tga<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let (width, height, pixels) = self.file_pixels()?;
        tga::write_tga(path.as_ref(), width, height, 32, &pixels)
    }

    /// 检查纹理数据是否有效
    pub fn is_valid(&self) -> bool {
        self.width > 0
            && self.height > 0
            && Self::rgba8_len(self.width, self.height) == Some(self.data.len())
    }
}
