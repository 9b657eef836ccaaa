//! # 命令处理逻辑模块
//!
//! 包含处理编码与解码两种模式的高级业务逻辑。
//! 本模块负责协调图像 I/O、标准输入/输出、调用核心隐写算法以及向用户报告结果。

use crate::bits::bytes_to_bits;
use crate::cli::{DecodeArgs, EncodeArgs};
use crate::constants::{OUTPUT_EXTENSION, OUTPUT_PREFIX, PROGRESS_STEP_PERCENT};
use crate::error::StegoError;
use crate::grid::PixelGrid;
use crate::steganography::{Progress, capacity, embed_with_progress, extract_with_progress};
use anyhow::{Context, Result};
use colored::Colorize;
use image::{DynamicImage, ImageFormat};
use log::{debug, info, warn};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// 处理编码模式的执行逻辑。
///
/// 确定载荷文本 (参数或标准输入) 和输出路径，拒绝空载荷与意外覆盖，
/// 然后把文本隐藏进图像并保存为 PNG。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 载荷为空 (在读取图像之前报告)。
/// * 输出文件已存在且未指定 `--force`。
/// * 无法读取输入图像，或图像容量不足。
/// * 无法写入输出图像。
pub fn handle_encode(args: EncodeArgs) -> Result<()> {
    let text = read_payload(args.text, io::stdin())?;

    let dest = args
        .dest
        .unwrap_or_else(|| default_output_path(&args.image));

    anyhow::ensure!(
        args.force || !dest.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        dest.to_string_lossy().red().bold()
    );

    let payload_bits = hide_text(&args.image, &text, &dest)?;

    println!("btext: {}", payload_bits.to_string().green().bold());
    println!("save to: {}", dest.to_string_lossy().green().bold());
    println!("done!");

    Ok(())
}

/// 确定要隐藏的文本：优先使用 `text`，否则从 `input` 读取并去掉首尾空白。
///
/// 只有 `text` 为 `None` 时才会读取 `input`。
///
/// # Errors
///
/// 读取 `input` 失败时返回 I/O 错误；得到的文本为空时返回 [`StegoError::Usage`]。
pub fn read_payload(text: Option<String>, input: impl Read) -> Result<String> {
    let text = match text {
        Some(text) => text,
        None => io::read_to_string(input)
            .context("Unable to read the text to hide from standard input")?
            .trim()
            .to_owned(),
    };

    if text.is_empty() {
        return Err(StegoError::Usage(
            "No input text provided for encryption. Use -e '<text>' or pipe input.".into(),
        )
        .into());
    }

    Ok(text)
}

/// 处理解码模式的执行逻辑：恢复文本并原样写到标准输出。
///
/// # Errors
///
/// 如果无法读取图像、图像中没有合法的隐写数据或写标准输出失败，将返回错误。
pub fn handle_decode(args: DecodeArgs) -> Result<()> {
    let text = recover_text(&args.image)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .context("Unable to write the recovered text to standard output")?;

    Ok(())
}

/// 把 `text` 隐藏进 `image`，结果以 PNG 保存到 `dest`。返回写入的载荷比特数。
///
/// 带 alpha 通道的图像按 RGBA8 处理并保留 alpha，其余按 RGB8 处理。
///
/// # Errors
///
/// 无法读取图像、容量不足或无法写入 `dest` 时返回错误。
pub fn hide_text(image: &Path, text: &str, dest: &Path) -> Result<usize> {
    let picture = open_image(image)?;

    let color = picture.color();
    if color.bits_per_pixel() / u16::from(color.channel_count()) > 8 {
        warn!(
            "{} has more than 8 bits per channel; the output is reduced to 8-bit",
            image.display()
        );
    }

    let payload_bits = bytes_to_bits(text.as_bytes());
    info!("total bit: {}", payload_bits.len());

    let doctored = if color.has_alpha() {
        let mut buffer = picture.to_rgba8();
        embed_into(&mut buffer, &payload_bits, image)?;
        DynamicImage::ImageRgba8(buffer)
    } else {
        let mut buffer = picture.to_rgb8();
        embed_into(&mut buffer, &payload_bits, image)?;
        DynamicImage::ImageRgb8(buffer)
    };

    doctored
        .save_with_format(dest, ImageFormat::Png)
        .with_context(|| {
            format!(
                "Unable to write to target image file: {}",
                dest.to_string_lossy().red().bold()
            )
        })?;

    info!("saved to {}", dest.display());
    Ok(payload_bits.len())
}

/// 从 `image` 中恢复隐藏的文本。
///
/// # Errors
///
/// 无法读取图像、长度头损坏或提取出的字节不是合法 UTF-8 时返回错误。
pub fn recover_text(image: &Path) -> Result<String> {
    if matches!(ImageFormat::from_path(image), Ok(ImageFormat::Jpeg)) {
        warn!(
            "{} is a lossy format; any hidden text has most likely been destroyed",
            image.display()
        );
    }

    let grid = open_image(image)?.to_rgb8();

    let bytes = extract_with_progress(&grid, progress_logger("decrypt")).with_context(|| {
        format!(
            "Failed to recover hidden data from '{}'. \nThe image may not contain a hidden message or is corrupted.",
            image.to_string_lossy().red().bold()
        )
    })?;

    String::from_utf8(bytes)
        .map_err(StegoError::from)
        .with_context(|| {
            format!(
                "Recovered data from '{}' is not text. \nThe image was not encoded by this tool or was altered afterwards.",
                image.to_string_lossy().red().bold()
            )
        })
}

/// 默认输出路径：输入图像所在目录下的 `encrypt_<文件名>.png`。
pub fn default_output_path(image: &Path) -> PathBuf {
    let stem = image.file_stem().unwrap_or_default().to_string_lossy();
    let name = format!("{OUTPUT_PREFIX}{stem}.{OUTPUT_EXTENSION}");
    image.parent().unwrap_or(Path::new("")).join(name)
}

fn open_image(image: &Path) -> Result<DynamicImage> {
    image::open(image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            image.to_string_lossy().red().bold()
        )
    })
}

fn embed_into<G: PixelGrid>(grid: &mut G, payload_bits: &[bool], image: &Path) -> Result<()> {
    let pixels = grid.pixel_count();
    embed_with_progress(grid, payload_bits, progress_logger("encrypt")).with_context(|| {
        format!(
            "Failed to hide {} bytes in {}. \nAvailable: {} bytes",
            (payload_bits.len() / 8).to_string().red().bold(),
            image.to_string_lossy().red().bold(),
            capacity(pixels).unwrap_or(0).to_string().green().bold()
        )
    })
}

/// 每推进 `PROGRESS_STEP_PERCENT` 记录一条调试日志。
fn progress_logger(label: &'static str) -> impl FnMut(Progress) {
    let mut next = PROGRESS_STEP_PERCENT;
    move |Progress { done, total }| {
        let percent = done * 100 / total.max(1);
        if percent >= next {
            debug!("{label}: {done}/{total} bits ({percent}%)");
            next = percent - percent % PROGRESS_STEP_PERCENT + PROGRESS_STEP_PERCENT;
        }
    }
}
