use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

pub type Rgb = [u8; 3];

/// Colors used to paint the spymaster key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub red: Rgb,
    pub blue: Rgb,
    pub neutral: Rgb,
    pub assassin: Rgb,
    pub border: Rgb,
}

impl Palette {
    pub const fn color(&self, color: TeamColor) -> Rgb {
        match color {
            TeamColor::Red => self.red,
            TeamColor::Blue => self.blue,
            TeamColor::Neutral => self.neutral,
            TeamColor::Assassin => self.assassin,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            red: [200, 0, 0],
            blue: [0, 0, 128],
            neutral: [154, 205, 50],
            assassin: [20, 20, 20],
            border: [240, 240, 240],
        }
    }
}

/// Pixel geometry of the key: square cells with a border painted inside every cell edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyLayout {
    pub cell_px: u32,
    pub border_px: u32,
}

impl KeyLayout {
    fn is_border(&self, offset: u32) -> bool {
        let offset = offset % self.cell_px;
        offset < self.border_px || offset >= self.cell_px.saturating_sub(self.border_px)
    }
}

impl Default for KeyLayout {
    fn default() -> Self {
        Self {
            cell_px: 100,
            border_px: 5,
        }
    }
}

/// Tightly packed RGB8 pixels, row by row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl KeyImage {
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let start = ((y * self.width + x) * 3) as usize;
        [
            self.pixels[start],
            self.pixels[start + 1],
            self.pixels[start + 2],
        ]
    }
}

/// Paints `assignment` as a grid of solid color blocks, one per cell.
pub fn render_key(assignment: &BoardAssignment, layout: KeyLayout, palette: &Palette) -> KeyImage {
    let side = u32::from(assignment.size()) * layout.cell_px;
    let mut pixels = Vec::with_capacity((side * side * 3) as usize);

    for y in 0..side {
        for x in 0..side {
            let rgb = if layout.is_border(y) || layout.is_border(x) {
                palette.border
            } else {
                let row = (y / layout.cell_px) as Coord;
                let col = (x / layout.cell_px) as Coord;
                palette.color(assignment[(row, col)])
            };
            pixels.extend_from_slice(&rgb);
        }
    }

    KeyImage {
        width: side,
        height: side,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment() -> BoardAssignment {
        let config = BoardConfig::classic();
        BoardAssignment::from_row_major(config, config.color_multiset(Team::Blue)).unwrap()
    }

    #[test]
    fn key_has_fixed_resolution() {
        let image = render_key(&assignment(), KeyLayout::default(), &Palette::default());

        assert_eq!((image.width, image.height), (500, 500));
        assert_eq!(image.pixels.len(), 500 * 500 * 3);
    }

    #[test]
    fn border_and_cell_pixels_match_the_grid() {
        let palette = Palette::default();
        let image = render_key(&assignment(), KeyLayout::default(), &palette);

        // every cell edge carries a five pixel border
        for offset in [0, 4, 95, 99, 100, 104, 195, 499] {
            assert_eq!(image.pixel(offset, 50), palette.border, "x = {offset}");
            assert_eq!(image.pixel(50, offset), palette.border, "y = {offset}");
        }

        assert_eq!(image.pixel(5, 5), palette.red);
        assert_eq!(image.pixel(94, 94), palette.red);
        // first row is red, second row starts red and turns blue at the ninth card
        assert_eq!(image.pixel(350, 150), palette.blue);
        assert_eq!(image.pixel(250, 150), palette.red);
        assert_eq!(image.pixel(450, 450), palette.assassin);
        assert_eq!(image.pixel(50, 450), palette.neutral);
    }

    #[test]
    fn layout_is_configurable() {
        let layout = KeyLayout {
            cell_px: 10,
            border_px: 1,
        };
        let palette = Palette::default();
        let image = render_key(&assignment(), layout, &palette);

        assert_eq!(image.width, 50);
        assert_eq!(image.pixel(0, 5), palette.border);
        assert_eq!(image.pixel(9, 5), palette.border);
        assert_eq!(image.pixel(1, 1), palette.red);
        assert_eq!(image.pixel(8, 8), palette.red);
    }
}
