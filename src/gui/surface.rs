//! Drawing surface for screen-space windows
//!
//! Windows never touch the SDL2 canvas directly. They draw through
//! [`WindowSurface`], which keeps their layout logic testable without a video
//! context. [`SdlSurface`] is the real implementation.

use crate::text::draw_simple_text;
use sdl2::image::LoadTexture;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Icon cell size in the icon sheet
pub const ICON_SIZE: u32 = 32;

/// Icons per row in the icon sheet
pub const ICON_COLUMNS: u32 = 16;

/// Configuration for window chrome
#[derive(Debug, Clone)]
pub struct WindowStyle {
    /// Background fill color (alpha is the window opacity)
    pub background_color: Color,

    /// Border color
    pub border_color: Color,

    /// Border thickness (draws double border if > 1)
    pub border_thickness: u32,
}

impl Default for WindowStyle {
    fn default() -> Self {
        WindowStyle {
            background_color: Color::RGBA(20, 24, 48, 200),
            border_color: Color::RGB(200, 200, 220),
            border_thickness: 2,
        }
    }
}

impl WindowStyle {
    /// Same chrome with a different background opacity
    pub fn with_opacity(&self, opacity: u8) -> Self {
        let mut style = self.clone();
        style.background_color.a = opacity;
        style
    }

    /// Fully transparent windows draw no chrome at all
    pub fn is_invisible(&self) -> bool {
        self.background_color.a == 0
    }
}

/// Draw primitives windows render with
pub trait WindowSurface {
    /// Window background and border
    fn draw_frame(&mut self, frame: Rect, style: &WindowStyle) -> Result<(), String>;

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color, scale: u32)
        -> Result<(), String>;

    /// Icon `icon_index` of the icon sheet at (`x`, `y`)
    fn draw_icon(&mut self, icon_index: u32, x: i32, y: i32) -> Result<(), String>;

    /// Copies `source` of face sheet `sheet` into `dest`, optionally mirrored
    fn blit_face(&mut self, sheet: &str, source: Rect, dest: Rect, mirrored: bool)
        -> Result<(), String>;
}

/// Face sheet textures keyed by sheet name
///
/// Sheets are loaded from `<directory>/<name>.png` on first use. A sheet that
/// fails to load is remembered so the error is logged only once.
pub struct FaceAtlas<'a> {
    texture_creator: &'a TextureCreator<WindowContext>,
    directory: PathBuf,
    sheets: HashMap<String, Option<Texture<'a>>>,
}

impl<'a> FaceAtlas<'a> {
    pub fn new(
        texture_creator: &'a TextureCreator<WindowContext>,
        directory: impl AsRef<Path>,
    ) -> Self {
        FaceAtlas {
            texture_creator,
            directory: directory.as_ref().to_path_buf(),
            sheets: HashMap::new(),
        }
    }

    /// Loads `name` if it has not been requested before
    pub fn preload(&mut self, name: &str) {
        if self.sheets.contains_key(name) {
            return;
        }

        let path = self.directory.join(format!("{}.png", name));
        let texture = match self.texture_creator.load_texture(&path) {
            Ok(texture) => {
                log::debug!("Loaded face sheet {}", path.display());
                Some(texture)
            }
            Err(e) => {
                log::warn!("Failed to load face sheet {}: {}", path.display(), e);
                None
            }
        };
        self.sheets.insert(name.to_string(), texture);
    }

    pub fn get(&self, name: &str) -> Option<&Texture<'a>> {
        self.sheets.get(name).and_then(|t| t.as_ref())
    }
}

/// [`WindowSurface`] backed by an SDL2 canvas
pub struct SdlSurface<'c, 'a> {
    canvas: &'c mut Canvas<Window>,
    faces: &'c FaceAtlas<'a>,
    icons: Option<&'c Texture<'a>>,
}

impl<'c, 'a> SdlSurface<'c, 'a> {
    pub fn new(
        canvas: &'c mut Canvas<Window>,
        faces: &'c FaceAtlas<'a>,
        icons: Option<&'c Texture<'a>>,
    ) -> Self {
        SdlSurface {
            canvas,
            faces,
            icons,
        }
    }

    /// Stand-in for a missing texture so layout stays visible
    fn draw_placeholder(&mut self, dest: Rect, color: Color) -> Result<(), String> {
        self.canvas.set_draw_color(color);
        self.canvas.fill_rect(dest)?;
        self.canvas.set_draw_color(Color::RGB(0, 0, 0));
        self.canvas.draw_rect(dest)?;
        Ok(())
    }
}

impl WindowSurface for SdlSurface<'_, '_> {
    fn draw_frame(&mut self, frame: Rect, style: &WindowStyle) -> Result<(), String> {
        if style.is_invisible() {
            return Ok(());
        }

        self.canvas.set_blend_mode(BlendMode::Blend);
        self.canvas.set_draw_color(style.background_color);
        self.canvas.fill_rect(frame)?;
        self.canvas.set_blend_mode(BlendMode::None);

        self.canvas.set_draw_color(style.border_color);
        self.canvas.draw_rect(frame)?;
        if style.border_thickness > 1 && frame.width() > 4 && frame.height() > 4 {
            self.canvas.draw_rect(Rect::new(
                frame.x() + 2,
                frame.y() + 2,
                frame.width() - 4,
                frame.height() - 4,
            ))?;
        }

        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        color: Color,
        scale: u32,
    ) -> Result<(), String> {
        draw_simple_text(self.canvas, text, x, y, color, scale)
    }

    fn draw_icon(&mut self, icon_index: u32, x: i32, y: i32) -> Result<(), String> {
        let dest = Rect::new(x, y, ICON_SIZE, ICON_SIZE);
        match self.icons {
            Some(icons) => {
                let source = Rect::new(
                    ((icon_index % ICON_COLUMNS) * ICON_SIZE) as i32,
                    ((icon_index / ICON_COLUMNS) * ICON_SIZE) as i32,
                    ICON_SIZE,
                    ICON_SIZE,
                );
                self.canvas.copy(icons, source, dest)
            }
            None => self.draw_placeholder(dest, Color::RGB(220, 180, 40)),
        }
    }

    fn blit_face(
        &mut self,
        sheet: &str,
        source: Rect,
        dest: Rect,
        mirrored: bool,
    ) -> Result<(), String> {
        match self.faces.get(sheet) {
            Some(texture) => self.canvas.copy_ex(
                texture,
                source,
                dest,
                0.0,
                None::<Point>,
                mirrored,
                false,
            ),
            None => {
                self.draw_placeholder(dest, Color::RGB(90, 110, 160))?;
                // Mark the facing side so mirroring is still visible
                let marker_x = if mirrored { dest.right() - 12 } else { dest.x() + 4 };
                self.canvas.set_draw_color(Color::RGB(240, 240, 240));
                self.canvas.fill_rect(Rect::new(marker_x, dest.y() + 4, 8, 8))?;
                Ok(())
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_style_opacity() {
        let style = WindowStyle::default();
        assert!(!style.is_invisible());

        let hidden = style.with_opacity(0);
        assert!(hidden.is_invisible());
        assert_eq!(hidden.border_color, style.border_color);
    }
}
