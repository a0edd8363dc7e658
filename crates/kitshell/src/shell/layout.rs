use serde::Serialize;

use super::MIN_GAME_WIDTH;
use crate::preferences::Geometry;

/// Height of the tab bar above the game area.
pub const TAB_BAR_HEIGHT: u32 = 34;

/// Placement of the three surfaces inside the main window, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellLayout {
    pub tab_bar: Geometry,
    pub content: Geometry,
    pub panel: Geometry,
}

impl ShellLayout {
    /// Lays out a `width` x `height` client area with a right panel of
    /// `panel_width`; the game side keeps at least [`MIN_GAME_WIDTH`] when
    /// the window is wide enough for it.
    pub fn compute(width: u32, height: u32, panel_width: u32) -> Self {
        let game = width.saturating_sub(panel_width).max(MIN_GAME_WIDTH).min(width);
        let panel = width - game;
        let body = height.saturating_sub(TAB_BAR_HEIGHT);
        Self {
            tab_bar: rect(0, 0, game, TAB_BAR_HEIGHT.min(height)),
            content: rect(0, TAB_BAR_HEIGHT.min(height), game, body),
            panel: rect(game, 0, panel, height),
        }
    }
}

fn rect(x: u32, y: u32, width: u32, height: u32) -> Geometry {
    let clamp = |value: u32| i32::try_from(value).unwrap_or(i32::MAX);
    Geometry::new(clamp(x), clamp(y), clamp(width), clamp(height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_default_window() {
        let layout = ShellLayout::compute(1280, 720, 250);
        assert_eq!(layout.tab_bar, Geometry::new(0, 0, 1030, 34));
        assert_eq!(layout.content, Geometry::new(0, 34, 1030, 686));
        assert_eq!(layout.panel, Geometry::new(1030, 0, 250, 720));
    }

    #[test]
    fn panel_yields_to_minimum_game_width() {
        let layout = ShellLayout::compute(800, 600, 700);
        assert_eq!(layout.content.width, 400);
        assert_eq!(layout.panel, Geometry::new(400, 0, 400, 600));
    }

    #[test]
    fn tiny_windows_do_not_overflow() {
        let layout = ShellLayout::compute(300, 20, 250);
        assert_eq!(layout.content.width, 300);
        assert_eq!(layout.panel.width, 0);
        assert_eq!(layout.content.height, 0);
    }
}
