//! 隐写核心的错误类型。
//!
//! 比特编解码、扫描和嵌入/提取都返回 [`StegoError`]；
//! 上层 `handler` 再用 `anyhow` 附加上下文。

use std::string::FromUtf8Error;
use thiserror::Error;

/// 核心模块的 `Result` 别名。
pub type Result<T> = std::result::Result<T, StegoError>;

#[derive(Error, Debug)]
pub enum StegoError {
    /// 长度头加载荷比特数超过像素总数。在修改任何像素之前报告。
    #[error("Not enough space in the image: need {required} pixels, have {available}")]
    CapacityExceeded { required: usize, available: usize },

    /// 按字节分组的比特序列长度不是 8 的倍数。
    #[error("Bit sequence of length {bits} is not a multiple of 8")]
    LengthMismatch { bits: usize },

    /// 比特长度无法放进给定宽度的长度头。
    #[error("Bit length {bit_length} does not fit in a {width}-bit header")]
    HeaderOverflow { bit_length: usize, width: usize },

    /// 图像像素太少，无法容纳长度头。
    #[error("Image has {pixels} pixel(s); at least 2 are required")]
    ImageTooSmall { pixels: usize },

    /// 长度头声明的载荷比特数超出了剩余像素。
    #[error("Header declares {declared} payload bits but only {available} pixels follow it")]
    TruncatedPayload { declared: usize, available: usize },

    /// 提取出的字节不是合法的 UTF-8。
    #[error("Recovered data is not valid UTF-8: {0}")]
    DecodeFailure(#[from] FromUtf8Error),

    /// 模式选择错误或载荷为空。
    #[error("{0}")]
    Usage(String),
}
