//! Render output: where finished pixel colors go.

use std::path::{Path, PathBuf};

use lux_math::Color;

use crate::RenderResult;

/// Destination for rendered pixels.
pub trait ImageSink {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Store the color of pixel (`col`, `row`). Row 0 is the top.
    fn write_pixel(&mut self, col: u32, row: u32, color: Color);

    /// Called once after the last pixel is written.
    fn flush(&mut self) -> RenderResult<()> {
        Ok(())
    }
}

/// Clamp to [0, 1] and convert a linear color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let c = color.clamp(Color::ZERO, Color::ONE) * 255.0;
    [c.x as u8, c.y as u8, c.z as u8, 255]
}

/// In-memory image, row-major with row 0 at the top.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to RGBA bytes.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgba(*c)).collect()
    }
}

impl ImageSink for ImageBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn write_pixel(&mut self, col: u32, row: u32, color: Color) {
        self.set(col, row, color);
    }
}

/// Named image that is saved as a PNG file on flush.
#[derive(Debug, Clone)]
pub struct ImageWriter {
    name: String,
    output_dir: PathBuf,
    buffer: ImageBuffer,
}

impl ImageWriter {
    pub const DEFAULT_OUTPUT_DIR: &'static str = "images";

    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            output_dir: PathBuf::from(Self::DEFAULT_OUTPUT_DIR),
            buffer: ImageBuffer::new(width, height),
        }
    }

    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// File the image is written to.
    pub fn path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.png", self.name))
    }

    pub fn buffer(&self) -> &ImageBuffer {
        &self.buffer
    }

    /// Encode the buffer as PNG, creating the output directory if needed.
    pub fn write_to_image(&self) -> RenderResult<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let image = image::RgbImage::from_fn(self.buffer.width, self.buffer.height, |x, y| {
            let [r, g, b, _] = color_to_rgba(self.buffer.get(x, y));
            image::Rgb([r, g, b])
        });
        let path = self.path();
        image.save(&path)?;

        log::info!("Wrote {}", path.display());
        Ok(path)
    }
}

impl ImageSink for ImageWriter {
    fn width(&self) -> u32 {
        self.buffer.width
    }

    fn height(&self) -> u32 {
        self.buffer.height
    }

    fn write_pixel(&mut self, col: u32, row: u32, color: Color) {
        self.buffer.set(col, row, color);
    }

    fn flush(&mut self) -> RenderResult<()> {
        self.write_to_image().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Color::ZERO), [0, 0, 0, 255]);
        assert_eq!(color_to_rgba(Color::ONE), [255, 255, 255, 255]);
        assert_eq!(color_to_rgba(Color::new(2.0, -1.0, 0.5)), [255, 0, 127, 255]);
    }

    #[test]
    fn test_image_buffer() {
        let mut buffer = ImageBuffer::new(4, 3);
        assert_eq!(buffer.pixels.len(), 12);

        buffer.write_pixel(3, 2, Color::ONE);
        assert_eq!(buffer.get(3, 2), Color::ONE);
        assert_eq!(buffer.pixels[11], Color::ONE);

        let rgba = buffer.to_rgba();
        assert_eq!(rgba.len(), 48);
        assert_eq!(&rgba[44..48], &[255, 255, 255, 255]);
        assert_eq!(&rgba[0..4], &[0, 0, 0, 255]);
    }

    #[test]
    fn test_image_writer_writes_png() {
        let dir = std::env::temp_dir().join(format!("lux_image_writer_{}", std::process::id()));
        let mut writer = ImageWriter::new("red_dot", 2, 2).with_output_dir(&dir);
        writer.write_pixel(1, 0, Color::new(1.0, 0.0, 0.0));
        writer.flush().unwrap();

        let path = writer.path();
        assert_eq!(path, dir.join("red_dot.png"));

        let image = image::open(&path).unwrap().to_rgb8();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(1, 0).0, [255, 0, 0]);
        assert_eq!(image.get_pixel(0, 1).0, [0, 0, 0]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
