//! Face sprite sheet addressing
//!
//! Face sheets are grids of equally sized portraits. A [`FaceImageRef`] names a
//! sheet and an index into it; [`FaceSheetLayout`] turns that into the source
//! rectangle to copy and the offset to copy it to.

use sdl2::rect::Rect;

/// Sheet name plus portrait index (row-major)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceImageRef {
    pub name: String,
    pub index: u32,
}

impl FaceImageRef {
    pub fn new(name: impl Into<String>, index: u32) -> Self {
        FaceImageRef {
            name: name.into(),
            index,
        }
    }

    /// An empty sheet name means no face is shown
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// Source region and destination offset for one portrait copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceBlit {
    pub source: Rect,
    pub offset_x: i32,
    pub offset_y: i32,
}

/// Cell geometry of a face sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceSheetLayout {
    pub face_width: u32,
    pub face_height: u32,
    pub columns: u32,
}

impl Default for FaceSheetLayout {
    fn default() -> Self {
        FaceSheetLayout {
            face_width: 144,
            face_height: 144,
            columns: 4,
        }
    }
}

impl FaceSheetLayout {
    /// Computes what to copy for portrait `index` into a `width` x `height` box
    ///
    /// A box smaller than a cell crops the cell around its centre; a larger box
    /// centres the full cell inside it.
    pub fn blit_region(&self, index: u32, width: u32, height: u32) -> FaceBlit {
        let pw = self.face_width;
        let ph = self.face_height;
        let columns = self.columns.max(1);

        let sw = width.min(pw);
        let sh = height.min(ph);
        let sx = (index % columns) * pw + (pw - sw) / 2;
        let sy = (index / columns) * ph + (ph - sh) / 2;

        FaceBlit {
            source: Rect::new(sx as i32, sy as i32, sw, sh),
            offset_x: (width.saturating_sub(pw) / 2) as i32,
            offset_y: (height.saturating_sub(ph) / 2) as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cell_addressing() {
        let layout = FaceSheetLayout::default();

        let first = layout.blit_region(0, 144, 144);
        assert_eq!(first.source, Rect::new(0, 0, 144, 144));
        assert_eq!((first.offset_x, first.offset_y), (0, 0));

        // Index 5 is column 1 of the second row
        let sixth = layout.blit_region(5, 144, 144);
        assert_eq!(sixth.source, Rect::new(144, 144, 144, 144));

        let last = layout.blit_region(7, 144, 144);
        assert_eq!(last.source, Rect::new(432, 144, 144, 144));
    }

    #[test]
    fn test_small_box_crops_centre() {
        let layout = FaceSheetLayout::default();
        let blit = layout.blit_region(1, 144, 100);
        assert_eq!(blit.source, Rect::new(144, 22, 144, 100));
        assert_eq!((blit.offset_x, blit.offset_y), (0, 0));
    }

    #[test]
    fn test_large_box_centres_cell() {
        let layout = FaceSheetLayout::default();
        let blit = layout.blit_region(0, 200, 160);
        assert_eq!(blit.source, Rect::new(0, 0, 144, 144));
        assert_eq!((blit.offset_x, blit.offset_y), (28, 8));
    }

    #[test]
    fn test_empty_face_ref() {
        assert!(FaceImageRef::new("", 0).is_empty());
        assert!(!FaceImageRef::new("Actor1", 2).is_empty());
    }
}
