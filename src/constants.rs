/// 每个字节展开后的比特数。
pub const BITS_PER_BYTE: usize = 8;

/// 可用于隐写的最小像素数。
/// 少于 2 个像素时长度头宽度 `ceil(log2(P))` 为 0，协议无意义。
pub const MIN_PIXELS: usize = 2;

/// 编码输出文件名前缀：`encrypt_<原文件名>.png`。
pub const OUTPUT_PREFIX: &str = "encrypt_";

/// 编码输出总是 PNG，无损格式才能保住最低位。
pub const OUTPUT_EXTENSION: &str = "png";

/// 进度日志的步长 (百分比)。
pub const PROGRESS_STEP_PERCENT: usize = 10;
