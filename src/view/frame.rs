//! Display lists for one surface frame.
//!
//! [`render`] turns a [`SurfaceState`] into a flat list of draw operations in
//! paint order. Hosts replay the list on their canvas; tests and the CLI
//! print it with [`frame_to_text`].

use std::fmt::Write as _;

use crate::model::{Color, Rgba};
use crate::state::SurfaceState;

/// Title text color.
pub const TITLE_COLOR: Color = Color::rgb(0xbb, 0xbb, 0xbb);

/// The highlight rectangle extends this far past the text on every side.
pub const HIGHLIGHT_INFLATE_PX: f64 = 5.0;

/// One paint operation. Coordinates are canvas pixels, text is top-aligned.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Filled rectangle.
    FillRect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Fill color.
        color: Rgba,
    },
    /// A single line of text.
    Text {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Line content.
        text: String,
        /// Font size in pixels.
        size_px: f64,
        /// Text color.
        color: Color,
    },
}

/// Everything painted for one frame, background first.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Color the canvas is cleared to.
    pub background: Color,
    /// Operations in paint order.
    pub ops: Vec<DrawOp>,
}

impl DisplayList {
    /// Text operations only, in paint order.
    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::FillRect { .. } => None,
        })
    }
}

/// Paint `state` as it looks at time `now`.
///
/// Lines are emitted only while some part of them can be visible: at or
/// below one line height above the canvas, at or above its bottom edge and
/// not fully under the pinned title band. A pinned title is painted last,
/// over a band of background color.
pub fn render(state: &SurfaceState, now: f64) -> DisplayList {
    let viewport = state.viewport();
    let style = state.style();
    let mut list = DisplayList {
        width: viewport.width,
        height: viewport.height,
        background: style.background_color,
        ops: Vec::new(),
    };

    let layout = state.layout();
    let Some(title) = layout.title() else {
        return list;
    };

    let params = layout.params();
    let padding = params.padding_x();
    let line_height = params.line_height();
    let font_px = params.font_size_px();
    let band = params.pinned_title_height();
    let offset = state.scroll_offset();
    let to_screen = |content_y: f64| band + content_y - offset;

    if !params.fixed_title {
        let y = to_screen(0.0);
        if y > -params.title_height() {
            list.ops.push(title_op(title, padding, y, params.title_font_size_px()));
        }
    }

    for block in layout.blocks() {
        let top = to_screen(block.top_offset);
        if top > viewport.height {
            break;
        }
        if top + block.height < band - HIGHLIGHT_INFLATE_PX {
            continue;
        }

        let colors = state.verse_colors(block.verse_index, now);
        if let Some(fill) = colors.background {
            list.ops.push(DrawOp::FillRect {
                x: padding - HIGHLIGHT_INFLATE_PX,
                y: top - HIGHLIGHT_INFLATE_PX,
                width: viewport.width - 2.0 * padding + 2.0 * HIGHLIGHT_INFLATE_PX,
                height: block.height + 2.0 * HIGHLIGHT_INFLATE_PX,
                color: fill,
            });
        }

        for (k, line) in block.wrapped_lines.iter().enumerate() {
            let y = top + k as f64 * line_height;
            let visible = y >= -line_height && y <= viewport.height && y + line_height > band;
            if visible {
                list.ops.push(DrawOp::Text {
                    x: padding,
                    y,
                    text: line.clone(),
                    size_px: font_px,
                    color: colors.text,
                });
            }
        }
    }

    if params.fixed_title {
        list.ops.push(DrawOp::FillRect {
            x: 0.0,
            y: 0.0,
            width: viewport.width,
            height: band,
            color: style.background_color.with_alpha(1.0),
        });
        list.ops.push(title_op(title, padding, 0.0, params.title_font_size_px()));
    }

    list
}

fn title_op(title: &str, x: f64, y: f64, size_px: f64) -> DrawOp {
    DrawOp::Text {
        x,
        y,
        text: title.to_string(),
        size_px,
        color: TITLE_COLOR,
    }
}

/// One line per operation, pixels to one decimal place.
pub fn frame_to_text(list: &DisplayList) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "canvas {:.1}x{:.1} background {}",
        list.width, list.height, list.background
    );
    for op in &list.ops {
        let _ = match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => writeln!(
                out,
                "rect ({x:.1}, {y:.1}) {width:.1}x{height:.1} rgba({},{},{},{:.2})",
                color.r, color.g, color.b, color.a
            ),
            DrawOp::Text {
                x,
                y,
                text,
                size_px,
                color,
            } => writeln!(out, "text ({x:.1}, {y:.1}) {size_px:.1}px {color} {text:?}"),
        };
    }
    out
}
