//! # 像素网格
//!
//! 定义定形的像素记录 [`Pixel`]、嵌入/提取所依赖的 [`PixelGrid`] 抽象，
//! 以及把线性扫描位置映射到坐标的 [`ScanOrder`]。
//!
//! 扫描顺序固定为行优先：`idx = y * width + x`，先走完一行再换下一行。

use image::{ImageBuffer, Rgb, Rgba};

/// 一个像素的 RGB 分量。alpha (若有) 不参与隐写。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Pixel {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// 蓝色通道的奇偶性，奇数为 `true`。
    pub fn parity(&self) -> bool {
        self.blue & 1 == 1
    }

    /// 以 ±1 的调整让蓝色通道的奇偶性等于 `bit`。
    ///
    /// 已经匹配时原样返回；红、绿分量永不改变。
    pub fn with_parity(self, bit: bool) -> Self {
        let blue = match (bit, self.parity()) {
            (true, false) => self.blue + 1,
            (false, true) => self.blue - 1,
            _ => self.blue,
        };
        Self { blue, ..self }
    }
}

/// 可被逐像素读写的二维 RGB 网格。
pub trait PixelGrid {
    /// `(width, height)`。
    fn dimensions(&self) -> (u32, u32);

    fn pixel(&self, x: u32, y: u32) -> Pixel;

    fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel);

    fn pixel_count(&self) -> usize {
        let (width, height) = self.dimensions();
        width as usize * height as usize
    }
}

impl PixelGrid for ImageBuffer<Rgb<u8>, Vec<u8>> {
    fn dimensions(&self) -> (u32, u32) {
        ImageBuffer::dimensions(self)
    }

    fn pixel(&self, x: u32, y: u32) -> Pixel {
        let Rgb([red, green, blue]) = *self.get_pixel(x, y);
        Pixel::new(red, green, blue)
    }

    fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        self.put_pixel(x, y, Rgb([pixel.red, pixel.green, pixel.blue]));
    }
}

impl PixelGrid for ImageBuffer<Rgba<u8>, Vec<u8>> {
    fn dimensions(&self) -> (u32, u32) {
        ImageBuffer::dimensions(self)
    }

    fn pixel(&self, x: u32, y: u32) -> Pixel {
        let Rgba([red, green, blue, _]) = *self.get_pixel(x, y);
        Pixel::new(red, green, blue)
    }

    fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        let alpha = self.get_pixel(x, y)[3];
        self.put_pixel(x, y, Rgba([pixel.red, pixel.green, pixel.blue, alpha]));
    }
}

/// 行优先的扫描顺序。
#[derive(Debug, Clone, Copy)]
pub struct ScanOrder {
    width: u32,
}

impl ScanOrder {
    pub fn of<G: PixelGrid + ?Sized>(grid: &G) -> Self {
        Self {
            width: grid.dimensions().0,
        }
    }

    /// 线性扫描位置 `idx` 对应的 `(x, y)`。调用方保证 `idx < pixel_count`。
    pub fn position(&self, idx: usize) -> (u32, u32) {
        let width = self.width as usize;
        ((idx % width) as u32, (idx / width) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn parity_adjusts_by_one() {
        assert_eq!(Pixel::new(9, 9, 10).with_parity(true).blue, 11);
        assert_eq!(Pixel::new(9, 9, 11).with_parity(false).blue, 10);
        assert_eq!(Pixel::new(9, 9, 0).with_parity(true).blue, 1);
        assert_eq!(Pixel::new(9, 9, 255).with_parity(false).blue, 254);
    }

    #[test]
    fn matching_parity_is_left_alone() {
        for blue in 0..=255u8 {
            let pixel = Pixel::new(1, 2, blue);
            assert_eq!(pixel.with_parity(pixel.parity()), pixel);
        }
    }

    #[test]
    fn red_and_green_never_change() {
        let pixel = Pixel::new(200, 100, 7).with_parity(false);
        assert_eq!((pixel.red, pixel.green, pixel.blue), (200, 100, 6));
    }

    #[test]
    fn scan_is_row_major_on_wide_images() {
        let grid = RgbImage::new(5, 2);
        let order = ScanOrder::of(&grid);
        assert_eq!(order.position(0), (0, 0));
        assert_eq!(order.position(4), (4, 0));
        assert_eq!(order.position(5), (0, 1));
        assert_eq!(order.position(9), (4, 1));
    }

    #[test]
    fn scan_is_row_major_on_tall_images() {
        let grid = RgbImage::new(2, 5);
        let order = ScanOrder::of(&grid);
        assert_eq!(order.position(1), (1, 0));
        assert_eq!(order.position(2), (0, 1));
        assert_eq!(order.position(9), (1, 4));
    }

    #[test]
    fn rgba_alpha_survives_writes() {
        let mut grid = image::RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 77]));
        grid.set_pixel(0, 0, Pixel::new(4, 5, 6));
        assert_eq!(*grid.get_pixel(0, 0), Rgba([4, 5, 6, 77]));
    }
}
