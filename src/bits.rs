//! # 比特编解码
//!
//! 字节序列与比特序列 (`bool`，`true` 即 1) 之间的互转，以及定宽长度头。
//! 所有转换都是大端：每个字节、长度头都是最高位在前。

use crate::constants::{BITS_PER_BYTE, MIN_PIXELS};
use crate::error::{Result, StegoError};

/// 把字节序列展开为比特序列，每个字节按大端输出 8 个比特。
///
/// 输出长度恒为 `8 * payload.len()`。
pub fn bytes_to_bits(payload: &[u8]) -> Vec<bool> {
    payload
        .iter()
        .flat_map(|&byte| (0..BITS_PER_BYTE).rev().map(move |i| (byte >> i) & 1 == 1))
        .collect()
}

/// 把比特序列按 8 个一组还原为字节。
///
/// # Errors
///
/// 长度不是 8 的倍数时返回 [`StegoError::LengthMismatch`]。
pub fn bits_to_bytes(bits: &[bool]) -> Result<Vec<u8>> {
    if bits.len() % BITS_PER_BYTE != 0 {
        return Err(StegoError::LengthMismatch { bits: bits.len() });
    }

    Ok(bits
        .chunks_exact(BITS_PER_BYTE)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8))
        .collect())
}

/// 把 `bit_length` 写成 `width` 位宽、左侧补零的大端二进制。
///
/// # Errors
///
/// `bit_length >= 2^width` 时返回 [`StegoError::HeaderOverflow`]，不做截断。
pub fn encode_header(bit_length: usize, width: usize) -> Result<Vec<bool>> {
    let fits = width >= usize::BITS as usize || bit_length >> width == 0;
    if !fits {
        return Err(StegoError::HeaderOverflow { bit_length, width });
    }

    Ok((0..width)
        .rev()
        .map(|i| i < usize::BITS as usize && (bit_length >> i) & 1 == 1)
        .collect())
}

/// 把长度头比特按大端无符号整数解析。
pub fn decode_header(bits: &[bool]) -> usize {
    bits.iter().fold(0usize, |acc, &bit| (acc << 1) | bit as usize)
}

/// 长度头宽度：`ceil(log2(pixel_count))`。
///
/// # Errors
///
/// 像素数少于 2 时返回 [`StegoError::ImageTooSmall`]。
pub fn header_width(pixel_count: usize) -> Result<usize> {
    if pixel_count < MIN_PIXELS {
        return Err(StegoError::ImageTooSmall {
            pixels: pixel_count,
        });
    }

    Ok((usize::BITS - (pixel_count - 1).leading_zeros()) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn bytes_expand_big_endian() {
        assert_eq!(bytes_to_bits(b"H"), bits("01001000"));
        assert_eq!(bytes_to_bits(&[0x01, 0x80]), bits("0000000110000000"));
        assert!(bytes_to_bits(&[]).is_empty());
    }

    #[test]
    fn bits_group_into_bytes() {
        assert_eq!(bits_to_bytes(&bits("0100100001101001")).unwrap(), b"Hi");
    }

    #[test]
    fn unaligned_bits_are_rejected() {
        let err = bits_to_bytes(&bits("0100100")).unwrap_err();
        assert!(matches!(err, StegoError::LengthMismatch { bits: 7 }));
    }

    #[test]
    fn header_is_zero_padded() {
        assert_eq!(encode_header(16, 7).unwrap(), bits("0010000"));
        assert_eq!(encode_header(0, 3).unwrap(), bits("000"));
        assert_eq!(decode_header(&bits("0010000")), 16);
    }

    #[test]
    fn header_refuses_to_truncate() {
        assert!(encode_header(15, 4).is_ok());
        let err = encode_header(16, 4).unwrap_err();
        assert!(matches!(err, StegoError::HeaderOverflow { bit_length: 16, width: 4 }));
    }

    #[test]
    fn header_width_is_ceil_log2() {
        assert_eq!(header_width(2).unwrap(), 1);
        assert_eq!(header_width(3).unwrap(), 2);
        assert_eq!(header_width(16).unwrap(), 4);
        assert_eq!(header_width(17).unwrap(), 5);
        assert_eq!(header_width(100).unwrap(), 7);
    }

    #[test]
    fn header_width_covers_every_payload_length() {
        for pixels in 2..5000usize {
            let width = header_width(pixels).unwrap();
            assert!(1usize << width >= pixels, "P = {pixels}");
            // 载荷最多占 P - H 个像素，必须可表示。
            assert!(encode_header(pixels - width, width).is_ok(), "P = {pixels}");
        }
    }

    #[test]
    fn degenerate_grids_have_no_header_width() {
        assert!(matches!(header_width(0), Err(StegoError::ImageTooSmall { pixels: 0 })));
        assert!(matches!(header_width(1), Err(StegoError::ImageTooSmall { pixels: 1 })));
    }
}
