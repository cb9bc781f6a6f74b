//! Visual theming for the note graph.
//!
//! Colors and labels are keyed by [`NoteType`]; the matches below are
//! exhaustive so adding a note type fails to compile until it has both.

use crate::document::NoteType;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity, 0..1.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color at opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * (1.0 - t) + other.r as f64 * t) as u8,
			g: (self.g as f64 * (1.0 - t) + other.g as f64 * t) as u8,
			b: (self.b as f64 * (1.0 - t) + other.b as f64 * t) as u8,
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	/// CSS `rgba()` notation.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Node fill for a note type.
pub fn type_color(note_type: NoteType) -> Color {
	match note_type {
		NoteType::Learning => Color::rgb(0xb8, 0xbb, 0x26),
		NoteType::Dialogue => Color::rgb(0x83, 0xa5, 0x98),
		NoteType::Journal => Color::rgb(0xd3, 0x86, 0x9b),
		NoteType::Clips => Color::rgb(0xfa, 0xbd, 0x2f),
	}
}

/// Display label for a note type, used by the legend and the detail badge.
pub fn type_label(note_type: NoteType) -> &'static str {
	match note_type {
		NoteType::Learning => "学習",
		NoteType::Dialogue => "対話",
		NoteType::Journal => "思考",
		NoteType::Clips => "クリップ",
	}
}

/// Canvas background.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Fill behind the graph.
	pub color: Color,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Stroke at rest.
	pub color: Color,
	/// Color edges fade toward when touching the hovered node.
	pub highlight_color: Color,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Fill opacity at rest.
	pub fill_alpha: f64,
	/// Opacity multiplier for nodes outside the hover neighborhood.
	pub dim_alpha: f64,
	/// Ring around the hovered node.
	pub hover_outline: Color,
	/// Ring around the selected node.
	pub selected_outline: Color,
}

/// Hover label style, applied to the floating label element.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	/// Label box fill.
	pub background: Color,
	/// Text color.
	pub color: Color,
	/// Text size.
	pub font_size_px: f64,
	/// Label position relative to the pointer, in pixels.
	pub offset: (f64, f64),
}

impl LabelStyle {
	/// Inline CSS for a label at screen position `(x, y)`.
	pub fn css(&self, x: f64, y: f64) -> String {
		format!(
			"position: absolute; left: {}px; top: {}px; pointer-events: none; \
			 background: {}; color: {}; font-size: {}px; padding: 4px 8px; \
			 border-radius: 4px; z-index: 50; max-width: 200px; white-space: nowrap; \
			 overflow: hidden; text-overflow: ellipsis;",
			x + self.offset.0,
			y + self.offset.1,
			self.background.to_css(),
			self.color.to_css(),
			self.font_size_px,
		)
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Canvas fill.
	pub background: BackgroundStyle,
	/// Edge strokes.
	pub edge: EdgeStyle,
	/// Node fills and outlines.
	pub node: NodeStyle,
	/// Hover label.
	pub label: LabelStyle,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: BackgroundStyle {
				color: Color::rgb(10, 10, 10),
			},
			edge: EdgeStyle {
				color: Color::rgba(0x33, 0x33, 0x33, 0.3),
				highlight_color: Color::rgba(0x99, 0x99, 0x99, 0.8),
			},
			node: NodeStyle {
				fill_alpha: 0.8,
				dim_alpha: 0.3,
				hover_outline: Color::rgb(255, 255, 255),
				selected_outline: Color::rgba(255, 255, 255, 0.7),
			},
			label: LabelStyle {
				background: Color::rgb(0x1a, 0x1a, 0x1a),
				color: Color::rgb(0xdd, 0xdd, 0xdd),
				font_size_px: 12.0,
				offset: (10.0, -10.0),
			},
		}
	}
}
