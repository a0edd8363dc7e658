//! Colour palettes for the shell chrome and the tools panel.

pub const DEFAULT_THEME: &str = "dark_pastel";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub accent: &'static str,
    pub background_light: &'static str,
    pub surface_light: &'static str,
    pub accent_light: &'static str,
    pub text: &'static str,
    pub border: &'static str,
}

pub const DARK_PASTEL: Palette = Palette {
    name: DEFAULT_THEME,
    background: "#4a3428",
    surface: "#3a3a3a",
    accent: "#8b4a4a",
    background_light: "#5c4136",
    surface_light: "#4a4a4a",
    accent_light: "#a55a5a",
    text: "#f5e6c0",
    border: "#2a2a2a",
};

const PALETTES: &[Palette] = &[DARK_PASTEL];

impl Palette {
    /// Looks up a palette by its stored name, falling back to dark pastel.
    pub fn for_name(name: &str) -> Palette {
        PALETTES
            .iter()
            .copied()
            .find(|palette| palette.name == name)
            .unwrap_or_else(|| {
                tracing::warn!("unknown theme {name:?}, using {DEFAULT_THEME}");
                DARK_PASTEL
            })
    }

    /// The palette as CSS custom properties for the panel front end.
    pub fn css_variables(&self) -> String {
        [
            ("--kit-bg", self.background),
            ("--kit-surface", self.surface),
            ("--kit-accent", self.accent),
            ("--kit-bg-light", self.background_light),
            ("--kit-surface-light", self.surface_light),
            ("--kit-accent-light", self.accent_light),
            ("--kit-text", self.text),
            ("--kit-border", self.border),
        ]
        .iter()
        .map(|(name, value)| format!("{name}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Title bar colour as a `0x00BBGGRR` value, the layout Windows' DWM expects.
    pub fn caption_colorref(&self) -> Option<u32> {
        let hex = self.background.strip_prefix('#')?;
        let rgb = u32::from_str_radix(hex, 16).ok()?;
        let (r, g, b) = ((rgb >> 16) & 0xff, (rgb >> 8) & 0xff, rgb & 0xff);
        Some((b << 16) | (g << 8) | r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_falls_back() {
        assert_eq!(Palette::for_name("neon"), DARK_PASTEL);
        assert_eq!(Palette::for_name(DEFAULT_THEME), DARK_PASTEL);
    }

    #[test]
    fn css_variables_include_every_colour() {
        let css = DARK_PASTEL.css_variables();
        assert!(css.contains("--kit-bg: #4a3428;"));
        assert!(css.contains("--kit-text: #f5e6c0;"));
        assert_eq!(css.matches(';').count(), 8);
    }

    #[test]
    fn caption_colour_is_bgr() {
        assert_eq!(DARK_PASTEL.caption_colorref(), Some(0x0028_344a));
    }
}
