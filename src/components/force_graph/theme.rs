//! Visual theming for the force graph.
//!
//! Node fill colors come from the graph itself (one per category); the theme
//! covers everything around them: background, edges, borders, shadows and
//! label text.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		self.lerp(Color::rgba(0, 0, 0, self.a), factor)
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
		Self {
			r: mix(self.r, other.r),
			g: mix(self.g, other.g),
			b: mix(self.b, other.b),
			a: self.a + (other.a - self.a) * t,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parse `#RRGGBB` (any case). Anything else yields `None`.
	pub fn from_hex(s: &str) -> Option<Self> {
		let hex = s.strip_prefix('#')?;
		if hex.len() != 6 || !hex.is_ascii() {
			return None;
		}
		let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
		Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
	}
}

impl Default for Color {
	/// Neutral slate gray.
	fn default() -> Self {
		Color::rgb(113, 128, 150)
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	pub color: Color,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
	/// Alpha of edges not touching the hovered node while a hover is active.
	pub dimmed_alpha: f64,
}

/// Node box style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Border stroke width in screen pixels (0 = no border).
	pub border_width: f64,
	/// How much darker than the fill the border is drawn.
	pub border_darken: f64,
	pub shadow_color: Color,
	/// Shadow blur in screen pixels (0 = no shadow).
	pub shadow_blur: f64,
	pub shadow_offset: f64,
	pub label_color: Color,
	/// Alpha of nodes outside the hover neighbourhood while a hover is active.
	pub dimmed_alpha: f64,
	/// Ring drawn around the hovered node.
	pub hover_ring: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
}

impl Theme {
	/// Dark slate theme (default).
	pub fn default_theme() -> Self {
		Self {
			background: BackgroundStyle {
				color: Color::rgb(26, 32, 44),
			},
			edge: EdgeStyle {
				color: Color::rgb(113, 128, 150),
				dimmed_alpha: 0.2,
			},
			node: NodeStyle {
				border_width: 2.0,
				border_darken: 0.3,
				shadow_color: Color::rgba(0, 0, 0, 0.5),
				shadow_blur: 8.0,
				shadow_offset: 2.0,
				label_color: Color::rgb(255, 255, 255),
				dimmed_alpha: 0.3,
				hover_ring: Color::rgba(255, 255, 255, 0.85),
			},
		}
	}

}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_category_colors() {
		assert_eq!(Color::from_hex("#2B6CB0"), Some(Color::rgb(0x2b, 0x6c, 0xb0)));
		assert_eq!(Color::from_hex("#718096").map(Color::to_css).as_deref(), Some("#718096"));
		assert_eq!(Color::from_hex("2B6CB0"), None);
		assert_eq!(Color::from_hex("#2B6"), None);
		assert_eq!(Color::from_hex("#zzzzzz"), None);
	}

	#[test]
	fn darkens_toward_black() {
		let c = Color::rgb(100, 50, 0);
		assert_eq!(c.darken(1.0), Color::rgb(0, 0, 0));
		assert_eq!(c.darken(0.0), c);
		assert_eq!(c.darken(0.5), Color::rgb(50, 25, 0));
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(26, 32, 44).to_css(), "#1a202c");
		assert_eq!(
			Color::rgba(0, 0, 0, 0.5).to_css(),
			"rgba(0, 0, 0, 0.5)"
		);
	}

	#[test]
	fn background_matches_edge_palette() {
		let theme = Theme::default();
		assert_eq!(theme.background.color.to_css(), "#1a202c");
		assert_eq!(theme.edge.color.to_css(), "#718096");
	}
}
