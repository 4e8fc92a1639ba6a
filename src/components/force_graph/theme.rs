//! Visual theming for the force graph.
//!
//! Provides color palettes and visual style configuration.

/// RGBA color representation.
#[derive(Clone, Copy, Debug)]
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

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// A curated color palette for nodes.
#[derive(Clone, Debug)]
pub struct NodePalette {
	pub colors: Vec<Color>,
}

impl NodePalette {
	/// Muted, harmonious palette - slate blues and teals (default)
	pub fn slate() -> Self {
		Self {
			colors: vec![
				Color::rgb(94, 129, 172),  // Steel blue
				Color::rgb(129, 161, 193), // Light steel
				Color::rgb(100, 148, 160), // Teal gray
				Color::rgb(136, 160, 175), // Cadet blue
				Color::rgb(108, 142, 173), // Air force blue
				Color::rgb(119, 158, 165), // Desaturated cyan
				Color::rgb(143, 163, 180), // Cool gray
				Color::rgb(122, 153, 168), // Dusty blue
			],
		}
	}

	/// Ocean depths palette - blues and teals
	pub fn ocean() -> Self {
		Self {
			colors: vec![
				Color::rgb(70, 110, 140),  // Deep blue
				Color::rgb(80, 130, 150),  // Cerulean
				Color::rgb(100, 145, 160), // Steel teal
				Color::rgb(90, 125, 145),  // Slate blue
				Color::rgb(85, 135, 155),  // Ocean
				Color::rgb(95, 120, 140),  // Denim
				Color::rgb(75, 115, 135),  // Navy gray
				Color::rgb(88, 128, 148),  // Cadet
			],
		}
	}

	/// Aurora palette - cool teals and purples
	pub fn aurora() -> Self {
		Self {
			colors: vec![
				Color::rgb(100, 145, 135), // Eucalyptus
				Color::rgb(115, 135, 155), // Slate
				Color::rgb(130, 120, 150), // Wisteria
				Color::rgb(105, 140, 145), // Teal
				Color::rgb(120, 130, 160), // Periwinkle
				Color::rgb(125, 145, 140), // Sage
				Color::rgb(110, 125, 155), // Storm
				Color::rgb(135, 140, 150), // Pewter
			],
		}
	}

	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Edge line color
	pub color: Color,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
	/// Stroke color marking nodes that can be expanded
	pub outline_color: Color,
	/// Ring color marking nodes that are currently expanded
	pub ring_color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub palette: NodePalette,
}

impl Theme {
	/// Clean modern theme with subtle effects (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
				vignette: 0.15,
			},
			edge: EdgeStyle {
				color: Color::rgba(140, 160, 180, 0.5),
			},
			node: NodeStyle {
				use_gradient: true,
				outline_color: Color::rgba(205, 220, 235, 0.75),
				ring_color: Color::rgba(150, 185, 215, 0.85),
			},
			palette: NodePalette::slate(),
		}
	}

	/// Elegant dark theme with subtle effects
	pub fn midnight() -> Self {
		Self {
			name: "midnight",
			background: BackgroundStyle {
				color: Color::rgb(18, 20, 28),
				color_secondary: Color::rgb(25, 28, 38),
				use_gradient: true,
				vignette: 0.2,
			},
			edge: EdgeStyle {
				color: Color::rgba(100, 120, 150, 0.45),
			},
			node: NodeStyle {
				use_gradient: true,
				outline_color: Color::rgba(185, 195, 220, 0.7),
				ring_color: Color::rgba(145, 155, 205, 0.85),
			},
			palette: NodePalette::aurora(),
		}
	}

	/// Ocean/deep blue theme
	pub fn deep_sea() -> Self {
		Self {
			name: "deep_sea",
			background: BackgroundStyle {
				color: Color::rgb(15, 25, 35),
				color_secondary: Color::rgb(20, 32, 45),
				use_gradient: true,
				vignette: 0.2,
			},
			edge: EdgeStyle {
				color: Color::rgba(90, 130, 160, 0.45),
			},
			node: NodeStyle {
				use_gradient: true,
				outline_color: Color::rgba(165, 200, 225, 0.7),
				ring_color: Color::rgba(120, 175, 205, 0.85),
			},
			palette: NodePalette::ocean(),
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
	fn opaque_colors_format_as_hex() {
		assert_eq!(Color::rgb(94, 129, 172).to_css(), "#5e81ac");
	}

	#[test]
	fn translucent_colors_format_as_rgba() {
		assert_eq!(
			Color::rgba(140, 160, 180, 0.5).to_css(),
			"rgba(140, 160, 180, 0.5)"
		);
	}

	#[test]
	fn lighten_and_darken_hit_their_extremes() {
		let c = Color::rgb(100, 150, 200);
		let white = c.lighten(1.0);
		assert_eq!((white.r, white.g, white.b), (255, 255, 255));
		let black = c.darken(1.0);
		assert_eq!((black.r, black.g, black.b), (0, 0, 0));
		let same = c.lighten(0.0);
		assert_eq!((same.r, same.g, same.b), (c.r, c.g, c.b));
	}

	#[test]
	fn palette_lookup_wraps_around() {
		let palette = NodePalette::slate();
		let n = palette.colors.len();
		let a = palette.get(1);
		let b = palette.get(1 + n);
		assert_eq!((a.r, a.g, a.b), (b.r, b.g, b.b));
	}
}
