//! # 命令行接口模块
//!
//! 使用 `clap` 定义程序的命令行结构。两种模式 (`-e` 编码、`-d` 解码) 必须且只能选一个，
//! 都需要 `-i` 指定图像。解析结果经 [`Cli::into_command`] 转为具体的 [`Command`]。

use crate::error::StegoError;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// 把文本藏进图像蓝色通道的奇偶性 (LSB)，或从中恢复文本。输出总是无损 PNG。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "把文本藏进图像蓝色通道的奇偶性 (LSB)，或从中恢复文本。\n编码结果总是保存为 PNG；从有损格式 (如 JPEG) 中无法恢复数据。"
)]
#[command(group(ArgGroup::new("mode").required(true).args(["encrypt", "decrypt"])))]
pub struct Cli {
    /// 输入图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 编码模式：要隐藏的文本。省略时从标准输入读取。
    #[arg(short, long, value_name = "TEXT", num_args = 0..=1)]
    pub encrypt: Option<Option<String>>,

    /// 解码模式：把恢复的文本写到标准输出。
    #[arg(short, long)]
    pub decrypt: bool,

    /// 编码结果的保存路径，默认为输入图像旁的 `encrypt_<文件名>.png`。
    #[arg(short = 'o', long, conflicts_with = "decrypt")]
    pub dest: Option<PathBuf>,

    /// 允许覆盖已存在的输出文件。
    #[arg(short, long, conflicts_with = "decrypt")]
    pub force: bool,

    /// 输出调试日志 (包括进度)。
    #[arg(short, long)]
    pub verbose: bool,
}

/// 解析后的具体操作。
#[derive(Debug)]
pub enum Command {
    /// 把文本隐藏到图像中。
    Encode(EncodeArgs),

    /// 从图像中恢复文本。
    Decode(DecodeArgs),
}

/// 编码所需的参数。
#[derive(Debug, Clone)]
pub struct EncodeArgs {
    /// 载体图像路径。
    pub image: PathBuf,

    /// 要隐藏的文本；`None` 表示从标准输入读取。
    pub text: Option<String>,

    /// 输出路径；`None` 时使用默认命名。
    pub dest: Option<PathBuf>,

    /// 是否允许覆盖已存在的输出文件。
    pub force: bool,
}

/// 解码所需的参数。
#[derive(Debug, Clone)]
pub struct DecodeArgs {
    /// 已隐藏文本的图像路径。
    pub image: PathBuf,
}

impl Cli {
    /// 把命令行参数转为要执行的操作。
    ///
    /// `clap` 已经保证两种模式互斥且必选；这里对直接构造的 `Cli` 再检查一次。
    ///
    /// # Errors
    ///
    /// 同时选择或都未选择两种模式，或在解码模式下给出 `--dest`/`--force` 时
    /// 返回 [`StegoError::Usage`]。
    pub fn into_command(self) -> Result<Command, StegoError> {
        match (self.encrypt, self.decrypt) {
            (Some(text), false) => Ok(Command::Encode(EncodeArgs {
                image: self.image,
                text,
                dest: self.dest,
                force: self.force,
            })),
            (None, true) if self.dest.is_some() || self.force => Err(StegoError::Usage(
                "--dest and --force only apply to encrypt (-e) mode.".into(),
            )),
            (None, true) => Ok(Command::Decode(DecodeArgs { image: self.image })),
            (Some(_), true) => Err(StegoError::Usage(
                "You can only choose one mode: either encrypt (-e) or decrypt (-d).".into(),
            )),
            (None, false) => Err(StegoError::Usage(
                "Please specify either -e to encrypt or -d to decrypt.".into(),
            )),
        }
    }
}
