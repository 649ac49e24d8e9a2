//! Page-oriented layout model.
//!
//! Coordinates are millimetres from the top-left corner of the page. Text
//! `y` is the baseline. The model is backend-agnostic: [`crate::pdf`] turns
//! it into a PDF, tests inspect it directly.

use tracing::trace;

use crate::metrics::{line_height_mm, split_text_to_size, text_width_mm};

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// Cursor position on a freshly started continuation page.
pub const PAGE_TOP_MM: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Normal,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub font: FontStyle,
    pub color: Rgb,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 12.0,
            font: FontStyle::Normal,
            color: Rgb::BLACK,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        x: f32,
        y: f32,
        text: String,
        style: TextStyle,
        align: Align,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgb,
    },
}

impl Element {
    /// Left edge of the element once alignment is applied.
    pub fn left(&self) -> f32 {
        match self {
            Element::Text { x, text, style, align, .. } => match align {
                Align::Left => *x,
                Align::Center => x - text_width_mm(text, style.size) / 2.0,
                Align::Right => x - text_width_mm(text, style.size),
            },
            Element::Rect { x, .. } => *x,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub elements: Vec<Element>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text { text, .. } => Some(text.as_str()),
            Element::Rect { .. } => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| matches!(e, Element::Rect { .. }))
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub width: f32,
    pub height: f32,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Stateful writer in the style of a drawing context: a current page, a
/// current text style and fill colour, and a vertical cursor `y` managed by
/// the caller.
#[derive(Debug)]
pub struct LayoutWriter {
    document: Document,
    current: usize,
    style: TextStyle,
    fill: Rgb,
    pub y: f32,
}

impl LayoutWriter {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            document: Document {
                width,
                height,
                pages: vec![Page::default()],
            },
            current: 0,
            style: TextStyle::default(),
            fill: Rgb::BLACK,
            y: 0.0,
        }
    }

    pub fn a4() -> Self {
        Self::new(A4_WIDTH_MM, A4_HEIGHT_MM)
    }

    pub fn page_width(&self) -> f32 {
        self.document.width
    }

    pub fn page_height(&self) -> f32 {
        self.document.height
    }

    pub fn page_count(&self) -> usize {
        self.document.pages.len()
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn set_font(&mut self, size: f32, font: FontStyle) {
        self.style.size = size;
        self.style.font = font;
    }

    pub fn set_text_color(&mut self, color: Rgb) {
        self.style.color = color;
    }

    pub fn set_fill_color(&mut self, color: Rgb) {
        self.fill = color;
    }

    pub fn text(&mut self, x: f32, y: f32, text: impl Into<String>) {
        self.text_aligned(x, y, text, Align::Left);
    }

    pub fn text_aligned(&mut self, x: f32, y: f32, text: impl Into<String>, align: Align) {
        let element = Element::Text {
            x,
            y,
            text: text.into(),
            style: self.style,
            align,
        };
        self.document.pages[self.current].elements.push(element);
    }

    /// Wrap `text` to `max_width` and write it line by line from `y`.
    /// Returns the number of lines written.
    pub fn text_wrapped(&mut self, x: f32, y: f32, text: &str, max_width: f32) -> usize {
        let lines = split_text_to_size(text, max_width, self.style.size);
        let step = line_height_mm(self.style.size);
        for (i, line) in lines.iter().enumerate() {
            self.text(x, y + step * i as f32, line.clone());
        }
        lines.len()
    }

    /// Filled rectangle in the current fill colour.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let element = Element::Rect {
            x,
            y,
            width,
            height,
            fill: self.fill,
        };
        self.document.pages[self.current].elements.push(element);
    }

    /// Append a page and make it current. The cursor is left to the caller.
    pub fn add_page(&mut self) {
        self.document.pages.push(Page::default());
        self.current = self.document.pages.len() - 1;
        trace!(page = self.current + 1, "Page added");
    }

    /// Start a new page when the cursor is past `page_height - reserve`.
    pub fn break_page_if_below(&mut self, reserve: f32) -> bool {
        if self.y > self.document.height - reserve {
            self.add_page();
            self.y = PAGE_TOP_MM;
            return true;
        }
        false
    }

    /// Make an already written page current (0-based).
    pub fn set_page(&mut self, index: usize) {
        self.current = index.min(self.document.pages.len() - 1);
    }

    /// Stamp a centred footer and a right-aligned "Page X of N" marker on
    /// every page. Must run after all content is laid out.
    pub fn stamp_footers(&mut self, footer: &str, margin: f32, style: TextStyle) {
        let total = self.page_count();
        let baseline = self.document.height - 10.0;
        let center = self.document.width / 2.0;
        let right = self.document.width - margin;
        self.style = style;
        for index in 0..total {
            self.set_page(index);
            self.text_aligned(center, baseline, footer, Align::Center);
            self.text_aligned(
                right,
                baseline,
                format!("Page {} of {}", index + 1, total),
                Align::Right,
            );
        }
    }

    pub fn finish(self) -> Document {
        self.document
    }
}
