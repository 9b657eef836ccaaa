//! # blue_parity 库
//!
//! 把文本藏进图像蓝色通道的奇偶性里，再原样取出。
//!
//! 数据流：载荷字节 → [`bits`] (比特流 + 长度头) → [`steganography`] (逐像素写入)。
//! 解码方向相反。图像读写和命令行位于 [`handler`] 与 [`cli`]。

pub mod bits;
pub mod cli;
pub mod constants;
pub mod error;
pub mod grid;
pub mod handler;
pub mod steganography;
