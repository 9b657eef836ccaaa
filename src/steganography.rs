//! # 嵌入与提取
//!
//! 按行优先扫描顺序，把 `长度头 ++ 载荷比特` 写进每个像素蓝色通道的奇偶性，
//! 或者反向读出。位置 `[0, H)` 存长度头，`[H, H + n)` 存载荷，之后的像素不碰。
//!
//! 两个方向共用同一个状态机：`ReadingHeader → ReadingPayload → Done`。
//! 到达 `Done` 立即停止扫描，所以短消息的提取代价与图像大小无关。

use crate::bits::{bits_to_bytes, decode_header, encode_header, header_width};
use crate::constants::BITS_PER_BYTE;
use crate::error::{Result, StegoError};
use crate::grid::{PixelGrid, ScanOrder};
use log::debug;

/// 长度头读写完成后，每处理一个载荷比特回调一次。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 已处理的载荷比特数。
    pub done: usize,
    /// 载荷比特总数。
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    ReadingHeader,
    ReadingPayload,
    Done,
}

impl Phase {
    fn at(idx: usize, header_width: usize, end: usize) -> Self {
        if idx < header_width {
            Phase::ReadingHeader
        } else if idx < end {
            Phase::ReadingPayload
        } else {
            Phase::Done
        }
    }
}

/// 容量为 `pixels` 个像素的网格最多能承载的载荷字节数。
///
/// # Errors
///
/// 像素数少于 2 时返回 [`StegoError::ImageTooSmall`]。
pub fn capacity(pixels: usize) -> Result<usize> {
    let width = header_width(pixels)?;
    Ok(pixels.saturating_sub(width) / BITS_PER_BYTE)
}

/// 把 `payload_bits` 嵌入 `grid`，不报告进度。
pub fn embed<G: PixelGrid + ?Sized>(grid: &mut G, payload_bits: &[bool]) -> Result<()> {
    embed_with_progress(grid, payload_bits, |_| {})
}

/// 把 `payload_bits` 连同长度头嵌入 `grid`。
///
/// 容量检查先于任何像素修改，失败时网格保持原样。
///
/// # Errors
///
/// * [`StegoError::ImageTooSmall`]：像素少于 2 个。
/// * [`StegoError::CapacityExceeded`]：`H + payload_bits.len() > P`。
pub fn embed_with_progress<G, F>(
    grid: &mut G,
    payload_bits: &[bool],
    mut on_progress: F,
) -> Result<()>
where
    G: PixelGrid + ?Sized,
    F: FnMut(Progress),
{
    let pixels = grid.pixel_count();
    let width = header_width(pixels)?;
    let required = width + payload_bits.len();
    if required > pixels {
        return Err(StegoError::CapacityExceeded {
            required,
            available: pixels,
        });
    }

    let header = encode_header(payload_bits.len(), width)?;
    debug!(
        "embedding {} payload bits behind a {}-bit header into {} pixels",
        payload_bits.len(),
        width,
        pixels
    );

    let order = ScanOrder::of(&*grid);
    let total = payload_bits.len();
    let mut idx = 0;
    loop {
        let bit = match Phase::at(idx, width, required) {
            Phase::ReadingHeader => header[idx],
            Phase::ReadingPayload => payload_bits[idx - width],
            Phase::Done => break,
        };

        let (x, y) = order.position(idx);
        let pixel = grid.pixel(x, y);
        grid.set_pixel(x, y, pixel.with_parity(bit));
        idx += 1;

        if idx > width {
            on_progress(Progress {
                done: idx - width,
                total,
            });
        }
    }

    Ok(())
}

/// 从 `grid` 提取载荷字节，不报告进度。
pub fn extract<G: PixelGrid + ?Sized>(grid: &G) -> Result<Vec<u8>> {
    extract_with_progress(grid, |_| {})
}

/// 读取长度头，再按它声明的比特数读取载荷并还原为字节。
///
/// 只读取 `H + 声明长度` 个像素，之后的像素无论内容如何都不影响结果。
/// 不做 UTF-8 解码。
///
/// # Errors
///
/// * [`StegoError::ImageTooSmall`]：像素少于 2 个。
/// * [`StegoError::TruncatedPayload`]：声明长度超出剩余像素。
/// * [`StegoError::LengthMismatch`]：声明长度不是 8 的倍数。
pub fn extract_with_progress<G, F>(grid: &G, mut on_progress: F) -> Result<Vec<u8>>
where
    G: PixelGrid + ?Sized,
    F: FnMut(Progress),
{
    let pixels = grid.pixel_count();
    let width = header_width(pixels)?;
    let order = ScanOrder::of(grid);

    let mut header = Vec::with_capacity(width);
    let mut payload = Vec::new();
    let mut total = 0;
    // 在长度头读完之前，终点暂定为长度头末尾。
    let mut end = width;
    let mut idx = 0;

    loop {
        match Phase::at(idx, width, end) {
            Phase::ReadingHeader => {
                let (x, y) = order.position(idx);
                header.push(grid.pixel(x, y).parity());
                idx += 1;

                if idx == width {
                    total = decode_header(&header);
                    let available = pixels - width;
                    if total > available {
                        return Err(StegoError::TruncatedPayload {
                            declared: total,
                            available,
                        });
                    }
                    debug!("header declares {total} payload bits");
                    end = width + total;
                    payload.reserve_exact(total);
                }
            }
            Phase::ReadingPayload => {
                let (x, y) = order.position(idx);
                payload.push(grid.pixel(x, y).parity());
                idx += 1;
                on_progress(Progress {
                    done: payload.len(),
                    total,
                });
            }
            Phase::Done => break,
        }
    }

    bits_to_bytes(&payload)
}
