use raylib::core::texture::RaylibTexture2D;
use raylib::prelude::*;

/// CPU-side color buffer the renderer paints into each frame.
pub struct Framebuffer {
    pub color_buffer: Vec<Color>,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let bg = Color::BLACK;
        Self {
            color_buffer: vec![bg; (width * height) as usize],
            width,
            height,
            background_color: bg,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    /// Writes are clipped to the buffer bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            self.color_buffer[(y as u32 * self.width + x as u32) as usize] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            return self.color_buffer[(y * self.width + x) as usize];
        }
        self.background_color
    }

    #[inline]
    pub fn set_background_color(&mut self, c: Color) {
        self.background_color = c;
    }

    /// Copies the pixels into a texture of the same size.
    pub fn upload_to_texture(&self, tex: &mut Texture2D) {
        let byte_len = self.color_buffer.len() * std::mem::size_of::<Color>();
        // Color is four packed u8 channels, matching the RGBA8 texture layout.
        let bytes: &[u8] = unsafe {
            std::slice::from_raw_parts(self.color_buffer.as_ptr() as *const u8, byte_len)
        };
        let _ = tex.update_texture(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_outside_bounds_are_ignored() {
        let mut fb = Framebuffer::new(4, 3);
        fb.set_pixel(-1, 0, Color::RED);
        fb.set_pixel(4, 0, Color::RED);
        fb.set_pixel(0, 3, Color::RED);
        assert!(fb.color_buffer.iter().all(|&c| c == Color::BLACK));
        fb.set_pixel(3, 2, Color::RED);
        assert_eq!(fb.get_pixel(3, 2), Color::RED);
    }

    #[test]
    fn clear_restores_background() {
        let mut fb = Framebuffer::new(2, 2);
        fb.set_background_color(Color::BLUE);
        fb.set_pixel(1, 1, Color::RED);
        fb.clear();
        assert_eq!(fb.get_pixel(1, 1), Color::BLUE);
        assert_eq!(fb.get_pixel(9, 9), Color::BLUE);
    }
}
