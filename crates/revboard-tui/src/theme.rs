//! Color language for the revboard TUI

use ratatui::style::Color;
use revboard_core::models::Category;

/// Background for a row in the top-contributors band.
///
/// `shade` is the channel value derived by the aggregator
/// (`230 - contribution * 100`, already clamped); darker shade means a
/// larger marginal contribution.
pub fn contribution_bg(shade: u8) -> Color {
    // Keep the blue channel fixed so heavier contributors read warmer
    Color::Rgb(shade / 3, shade / 4, 90)
}

/// Accent color per engagement category
pub fn category_color(category: Category) -> Color {
    match category {
        Category::Consulting => Color::Cyan,
        Category::HandsOn => Color::Magenta,
        Category::Squad => Color::Green,
        Category::Internal => Color::Yellow,
    }
}

/// Border/label color for de-emphasised chrome
pub fn dim() -> Color {
    Color::DarkGray
}

/// Highlight for the focused cell or row
pub fn focus() -> Color {
    Color::Cyan
}

/// Holiday marker color
pub fn holiday() -> Color {
    Color::Red
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contribution_bg_is_rgb() {
        assert!(matches!(contribution_bg(130), Color::Rgb(..)));
        assert!(matches!(contribution_bg(0), Color::Rgb(0, 0, 90)));
    }

    #[test]
    fn test_category_colors_are_distinct() {
        let colors: Vec<Color> = Category::all()
            .iter()
            .map(|c| category_color(*c))
            .collect();
        for (i, a) in colors.iter().enumerate() {
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
