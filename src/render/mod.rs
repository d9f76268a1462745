/// Draw sink contract - the matrix reports one rectangle per light

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Half-intensity version, used for light outlines.
    pub fn halved(self) -> Self {
        Self::rgb(self.r / 2, self.g / 2, self.b / 2)
    }
}

pub const LIGHT_OFF_COLOR: Color = Color::rgb(64, 64, 64);
pub const LIGHT_ON_COLOR: Color = Color::rgb(250, 250, 100);
pub const BACKGROUND_COLOR: Color = Color::rgb(0x10, 0x10, 0x10);

pub trait DrawSink {
    fn emit_rectangle(&mut self, bounds: Rect, color: Color);
}

impl<F> DrawSink for F
where
    F: FnMut(Rect, Color),
{
    fn emit_rectangle(&mut self, bounds: Rect, color: Color) {
        self(bounds, color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawnRectangle {
    pub bounds: Rect,
    pub color: Color,
}

/// Sink that writes down every rectangle instead of rendering it.
#[derive(Debug, Default, Clone)]
pub struct RectangleCatcher {
    drawn: Vec<DrawnRectangle>,
}

impl RectangleCatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.drawn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawn.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DrawnRectangle> {
        self.drawn.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawnRectangle> {
        self.drawn.iter()
    }

    pub fn reset(&mut self) {
        self.drawn.clear();
    }
}

impl DrawSink for RectangleCatcher {
    fn emit_rectangle(&mut self, bounds: Rect, color: Color) {
        self.drawn.push(DrawnRectangle { bounds, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catcher_records_in_order() {
        let mut catcher = RectangleCatcher::new();
        assert!(catcher.is_empty());

        catcher.emit_rectangle(Rect::new(0, 0, 4, 4), LIGHT_OFF_COLOR);
        catcher.emit_rectangle(Rect::new(4, 0, 4, 4), LIGHT_ON_COLOR);

        assert_eq!(catcher.len(), 2);
        assert_eq!(catcher.get(1).unwrap().bounds.x, 4);
        assert_eq!(catcher.get(1).unwrap().color, LIGHT_ON_COLOR);
        assert!(catcher.get(2).is_none());

        catcher.reset();
        assert!(catcher.is_empty());
    }

    #[test]
    fn test_closure_sink() {
        let mut count = 0;
        let mut sink = |_: Rect, _: Color| count += 1;
        sink.emit_rectangle(Rect::new(0, 0, 1, 1), LIGHT_OFF_COLOR);
        sink.emit_rectangle(Rect::new(1, 0, 1, 1), LIGHT_OFF_COLOR);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_halved() {
        assert_eq!(LIGHT_ON_COLOR.halved(), Color::rgb(125, 125, 50));
    }
}
