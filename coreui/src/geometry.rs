//! Window geometry and frame insets.

use crate::style::NativeWindowStyles;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Rectangle in screen coordinates.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[inline]
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { x: origin.x, y: origin.y, width: size.width, height: size.height }
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// System metrics used to size the window frame.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct FrameMetrics {
    /// Thin border drawn around fixed size windows.
    pub border: Size,

    /// Sizing frame drawn around resizeable windows.
    pub size_frame: Size,

    /// Height of the caption bar.
    pub caption: u32,
}

/// Space taken by the frame on each side of the client area.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Insets {
    #[inline]
    pub fn horizontal(&self) -> u32 {
        self.left + self.right
    }

    #[inline]
    pub fn vertical(&self) -> u32 {
        self.top + self.bottom
    }
}

/// Frame insets produced by `styles`.
pub fn frame_insets(styles: NativeWindowStyles, metrics: &FrameMetrics) -> Insets {
    let styles = styles.normalized();

    let edge = if styles.contains(NativeWindowStyles::RESIZEABLE) {
        metrics.size_frame
    } else if styles.contains(NativeWindowStyles::BORDER) {
        metrics.border
    } else {
        Size::default()
    };

    let mut insets =
        Insets { left: edge.width, right: edge.width, top: edge.height, bottom: edge.height };

    if styles.contains(NativeWindowStyles::CAPTION) {
        insets.top += metrics.caption;
    }

    insets
}

/// Outer window rectangle for a client area of `client` size placed at `origin`.
///
/// The origin is the top-left corner of the frame.
pub fn client_to_frame(
    origin: Point,
    client: Size,
    styles: NativeWindowStyles,
    metrics: &FrameMetrics,
) -> Rect {
    let insets = frame_insets(styles, metrics);
    let size = Size::new(client.width + insets.horizontal(), client.height + insets.vertical());
    Rect::new(origin, size)
}

/// Client area size of a window whose frame has `frame` size.
pub fn frame_to_client_size(
    frame: Size,
    styles: NativeWindowStyles,
    metrics: &FrameMetrics,
) -> Size {
    let insets = frame_insets(styles, metrics);
    Size::new(
        frame.width.saturating_sub(insets.horizontal()),
        frame.height.saturating_sub(insets.vertical()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const METRICS: FrameMetrics =
        FrameMetrics { border: Size::new(1, 1), size_frame: Size::new(4, 4), caption: 23 };

    #[test]
    fn border_and_caption_frame() {
        let styles = NativeWindowStyles::BORDER | NativeWindowStyles::CAPTION;
        let frame = client_to_frame(Point::new(10, 20), Size::new(640, 480), styles, &METRICS);

        assert_eq!(frame, Rect { x: 10, y: 20, width: 640 + 2, height: 480 + 23 + 2 });
    }

    #[test]
    fn resizeable_uses_sizing_frame() {
        let styles = NativeWindowStyles::all();
        let frame = client_to_frame(Point::default(), Size::new(100, 100), styles, &METRICS);

        assert_eq!(frame.size(), Size::new(108, 131));
    }

    #[test]
    fn borderless_has_no_insets() {
        let styles = NativeWindowStyles::CAPTION | NativeWindowStyles::RESIZEABLE;
        assert_eq!(frame_insets(styles, &METRICS), Insets::default());
    }

    #[test]
    fn frame_to_client_inverts() {
        let styles = NativeWindowStyles::BORDER | NativeWindowStyles::CAPTION;
        let client = Size::new(320, 200);
        let frame = client_to_frame(Point::default(), client, styles, &METRICS);

        assert_eq!(frame_to_client_size(frame.size(), styles, &METRICS), client);
        assert_eq!(frame_to_client_size(Size::new(1, 1), styles, &METRICS), Size::default());
    }
}
