#![forbid(unsafe_code)]

//! Character grid render target.
//!
//! [`TextBuffer`] is the host-agnostic surface slots draw into: one `char`
//! per cell, row-major. Hosts translate it to whatever they display; tests
//! and the demo compare it as text.
//!
//! ```
//! use docshell_runtime::buffer::TextBuffer;
//! use docshell_layout::Rect;
//!
//! let mut buf = TextBuffer::new(6, 2);
//! buf.print(1, 0, "hello world", Rect::new(0, 0, 4, 2));
//! assert_eq!(buf.row(0), " hel  ");
//! ```

use docshell_layout::Rect;

/// A fixed-size grid of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    width: u16,
    height: u16,
    cells: Vec<char>,
}

impl TextBuffer {
    /// A blank buffer.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; usize::from(width) * usize::from(height)],
        }
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The whole buffer as a rect at the origin.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<char> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Write one cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u16, y: u16, ch: char) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = ch;
        }
    }

    /// Fill `rect` (clipped to the buffer) with `ch`.
    pub fn fill(&mut self, rect: Rect, ch: char) {
        self.map_cells(rect, |_| ch);
    }

    /// Replace every cell in `rect` (clipped to the buffer) with `f(cell)`.
    pub fn map_cells(&mut self, rect: Rect, mut f: impl FnMut(char) -> char) {
        let Some(rect) = rect.intersection_opt(&self.bounds()) else {
            return;
        };
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                if let Some(i) = self.index(x, y) {
                    self.cells[i] = f(self.cells[i]);
                }
            }
        }
    }

    /// Print `text` starting at `(x, y)`, clipped to `clip` and the buffer.
    ///
    /// Returns the number of cells written.
    pub fn print(&mut self, x: u16, y: u16, text: &str, clip: Rect) -> u16 {
        let Some(clip) = clip.intersection_opt(&self.bounds()) else {
            return 0;
        };
        if y < clip.y || y >= clip.bottom() {
            return 0;
        }
        let mut written = 0;
        let mut col = x;
        for ch in text.chars() {
            if col >= clip.right() {
                break;
            }
            if col >= clip.x {
                self.set(col, y, ch);
                written += 1;
            }
            col = match col.checked_add(1) {
                Some(next) => next,
                None => break,
            };
        }
        written
    }

    /// One row as a string. Empty if `y` is out of bounds.
    #[must_use]
    pub fn row(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = usize::from(y) * usize::from(self.width);
        self.cells[start..start + usize::from(self.width)]
            .iter()
            .collect()
    }

    /// All rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.height).map(|y| self.row(y))
    }

    /// All rows joined with newlines, trailing spaces trimmed.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.rows()
            .map(|row| row.trim_end().to_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Reset every cell to a space.
    pub fn clear(&mut self) {
        self.cells.fill(' ');
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_blank() {
        let buf = TextBuffer::new(3, 2);
        assert_eq!(buf.row(0), "   ");
        assert_eq!(buf.to_text(), "\n");
        assert_eq!(buf.get(3, 0), None);
    }

    #[test]
    fn fill_is_clipped() {
        let mut buf = TextBuffer::new(4, 3);
        buf.fill(Rect::new(2, 1, 10, 10), '#');
        assert_eq!(buf.to_text(), "\n  ##\n  ##");
    }

    #[test]
    fn print_clips_to_rect() {
        let mut buf = TextBuffer::new(8, 1);
        let written = buf.print(2, 0, "abcdef", Rect::new(3, 0, 3, 1));
        assert_eq!(written, 3);
        assert_eq!(buf.row(0), "   bcd  ");
    }

    #[test]
    fn print_outside_rows_writes_nothing() {
        let mut buf = TextBuffer::new(4, 2);
        assert_eq!(buf.print(0, 1, "x", Rect::new(0, 0, 4, 1)), 0);
        assert_eq!(buf.print(0, 5, "x", buf.bounds()), 0);
    }

    #[test]
    fn map_cells_transforms_in_place() {
        let mut buf = TextBuffer::new(3, 1);
        buf.set(1, 0, 'x');
        buf.map_cells(buf.bounds(), |c| if c == ' ' { '.' } else { c });
        assert_eq!(buf.row(0), ".x.");
        buf.clear();
        assert_eq!(buf.row(0), "   ");
    }
}
