//! TGA 图像读写
//!
//! 只支持未压缩真彩色（`image_type == 2`）、24 或 32 位深度的子集。
//! 写出时总是生成同一种 18 字节文件头。

use std::fs;
use std::path::Path;

use crate::core::error::{Result, TextureError};

/// TGA 文件头长度
pub const HEADER_LEN: usize = 18;

/// 未压缩真彩色
pub const IMAGE_TYPE_TRUE_COLOR: u8 = 2;

/// TGA 文件头（小端序）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TgaHeader {
    pub id_length: u8,
    pub color_map_type: u8,
    pub image_type: u8,
    pub color_map_offset: u16,
    pub color_map_length: u16,
    pub color_map_size: u8,
    pub image_x_origin: u16,
    pub image_y_origin: u16,
    pub image_width: u16,
    pub image_height: u16,
    pub image_depth: u8,
    pub image_descriptor: u8,
}

impl TgaHeader {
    /// 为真彩色图像构造文件头
    pub fn true_color(width: u16, height: u16, depth: u8) -> Self {
        Self {
            image_type: IMAGE_TYPE_TRUE_COLOR,
            image_width: width,
            image_height: height,
            image_depth: depth,
            image_descriptor: if depth == 32 { 8 } else { 0 },
            ..Self::default()
        }
    }

    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let b: &[u8; HEADER_LEN] = bytes
            .get(..HEADER_LEN)
            .and_then(|s| s.try_into().ok())
            .ok_or(TextureError::TruncatedHeader)?;

        let u16_at = |i: usize| u16::from_le_bytes([b[i], b[i + 1]]);

        Ok(Self {
            id_length: b[0],
            color_map_type: b[1],
            image_type: b[2],
            color_map_offset: u16_at(3),
            color_map_length: u16_at(5),
            color_map_size: b[7],
            image_x_origin: u16_at(8),
            image_y_origin: u16_at(10),
            image_width: u16_at(12),
            image_height: u16_at(14),
            image_depth: b[16],
            image_descriptor: b[17],
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut b = [0u8; HEADER_LEN];

        b[0] = self.id_length;
        b[1] = self.color_map_type;
        b[2] = self.image_type;
        b[3..5].copy_from_slice(&self.color_map_offset.to_le_bytes());
        b[5..7].copy_from_slice(&self.color_map_length.to_le_bytes());
        b[7] = self.color_map_size;
        b[8..10].copy_from_slice(&self.image_x_origin.to_le_bytes());
        b[10..12].copy_from_slice(&self.image_y_origin.to_le_bytes());
        b[12..14].copy_from_slice(&self.image_width.to_le_bytes());
        b[14..16].copy_from_slice(&self.image_height.to_le_bytes());
        b[16] = self.image_depth;
        b[17] = self.image_descriptor;
        b
    }

    /// 像素数据的字节数
    pub fn pixel_bytes(&self) -> usize {
        self.image_width as usize * self.image_height as usize * (self.image_depth as usize / 8)
    }

    /// 检查是否属于支持的子集
    pub fn check_supported(&self) -> Result<()> {
        if self.image_type != IMAGE_TYPE_TRUE_COLOR {
            return Err(TextureError::UnsupportedImageType(self.image_type).into());
        }
        if self.image_depth != 24 && self.image_depth != 32 {
            return Err(TextureError::UnsupportedDepth(self.image_depth).into());
        }
        Ok(())
    }
}

/// 校验一段 TGA 数据是否属于支持的子集，并返回文件头
pub fn inspect(bytes: &[u8]) -> Result<TgaHeader> {
    let header = TgaHeader::parse(bytes)?;
    header.check_supported()?;

    let expected = HEADER_LEN + header.id_length as usize + header.pixel_bytes();
    if bytes.len() < expected {
        return Err(TextureError::SizeMismatch {
            expected,
            actual: bytes.len(),
        }
        .into());
    }

    Ok(header)
}

/// 读取 TGA 文件的原始字节
pub fn read_tga_bytes(path: &Path) -> Result<(TgaHeader, Vec<u8>)> {
    let bytes = fs::read(path)?;
    let header = inspect(&bytes)?;
    Ok((header, bytes))
}

/// 编码 TGA 数据
///
/// `pixels` 为文件顺序的 BGR(A) 像素（首行为图像底部）。
pub fn encode_tga(width: u16, height: u16, depth: u8, pixels: &[u8]) -> Result<Vec<u8>> {
    let header = TgaHeader::true_color(width, height, depth);
    header.check_supported()?;

    if pixels.len() != header.pixel_bytes() {
        return Err(TextureError::SizeMismatch {
            expected: header.pixel_bytes(),
            actual: pixels.len(),
        }
        .into());
    }

    let mut out = Vec::with_capacity(HEADER_LEN + pixels.len());
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(pixels);
    Ok(out)
}

/// 写出 24 或 32 位未压缩真彩色 TGA 文件
pub fn write_tga(path: &Path, width: u16, height: u16, depth: u8, pixels: &[u8]) -> Result<()> {
    let bytes = encode_tga(width, height, depth, pixels)?;
    fs::write(path, bytes)?;
    Ok(())
}
