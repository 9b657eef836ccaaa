use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

use blue_parity::{
    cli::{Cli, Command},
    handler::{handle_decode, handle_encode},
};

/// 初始化日志：默认只输出警告，`--verbose` 时输出调试信息 (包括进度)。
/// 设置了 `RUST_LOG` 时以它为准。日志写到标准错误，不会混进解码输出。
fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    Builder::new()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// 程序的主入口点
///
/// 负责解析命令行参数，并根据所选模式（编码或解码）
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.into_command()? {
        Command::Encode(args) => handle_encode(args),
        Command::Decode(args) => handle_decode(args),
    }
}
