//! Command-recording host used by unit tests.

use crate::context::{Canvas2d, Drawable};
use crate::style::RgbaColor;
use kurbo::{Affine, Point, Rect, Size};
use peniko::Color;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Save,
    Restore,
    SetTransform(Affine),
    Scale(f64, f64),
    ClearRect(Rect),
    FillRect(Rect),
    FillStyle(RgbaColor),
    StrokeStyle(RgbaColor),
    LineWidth(f64),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Stroke,
}

pub struct RecordingElement {
    size: Size,
    ratio: f64,
    has_context: bool,
    backing: (u32, u32),
    display: Size,
    log: Rc<RefCell<Vec<Command>>>,
}

impl RecordingElement {
    pub fn new(size: Size, ratio: f64) -> Self {
        Self {
            size,
            ratio,
            has_context: true,
            backing: (0, 0),
            display: Size::ZERO,
            log: Rc::default(),
        }
    }

    pub fn without_context(size: Size, ratio: f64) -> Self {
        Self {
            has_context: false,
            ..Self::new(size, ratio)
        }
    }

    pub fn set_host(&mut self, size: Size, ratio: f64) {
        self.size = size;
        self.ratio = ratio;
    }

    pub fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    pub fn display_size(&self) -> Size {
        self.display
    }

    pub fn commands(&self) -> Vec<Command> {
        self.log.borrow().clone()
    }

    pub fn take_commands(&self) -> Vec<Command> {
        std::mem::take(&mut *self.log.borrow_mut())
    }
}

impl Drawable for RecordingElement {
    type Context = RecordingContext;

    fn context_2d(&self) -> Option<RecordingContext> {
        self.has_context.then(|| RecordingContext {
            log: Rc::clone(&self.log),
        })
    }

    fn logical_size(&self) -> Size {
        self.size
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.ratio
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
    }

    fn set_display_size(&mut self, size: Size) {
        self.display = size;
    }
}

pub struct RecordingContext {
    log: Rc<RefCell<Vec<Command>>>,
}

impl RecordingContext {
    fn push(&mut self, command: Command) {
        self.log.borrow_mut().push(command);
    }
}

impl Canvas2d for RecordingContext {
    fn save(&mut self) {
        self.push(Command::Save);
    }

    fn restore(&mut self) {
        self.push(Command::Restore);
    }

    fn set_transform(&mut self, transform: Affine) {
        self.push(Command::SetTransform(transform));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.push(Command::Scale(sx, sy));
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.push(Command::ClearRect(rect));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.push(Command::FillRect(rect));
    }

    fn set_fill_style(&mut self, color: Color) {
        self.push(Command::FillStyle(color.into()));
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.push(Command::StrokeStyle(color.into()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(Command::LineWidth(width));
    }

    fn begin_path(&mut self) {
        self.push(Command::BeginPath);
    }

    fn move_to(&mut self, point: Point) {
        self.push(Command::MoveTo(point));
    }

    fn line_to(&mut self, point: Point) {
        self.push(Command::LineTo(point));
    }

    fn stroke(&mut self) {
        self.push(Command::Stroke);
    }
}
