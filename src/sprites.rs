//! Icon art with multi-color layer support
//!
//! Each icon is drawn from one or more layers of plain text. Layers are
//! composited back-to-front with spaces treated as transparent, so a cloud
//! can sit in front of a sun in a different color.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};

use crate::icons::Icon;

// ============================================================================
// Sprite data
// ============================================================================

mod sprite_data {
    pub const SUN: &str = "    \\   /    \n     .-.     \n  ― (   ) ―  \n     `-’     \n    /   \\    ";

    pub const CLOUD_BACK: &str = "             \n     .--.    \n  .-(    ).  \n (___.__)__) \n             ";
    pub const CLOUD_SUN: &str = "   \\  /      \n _ /\"\"       \n   \\_        \n   /         \n             ";

    pub const DRIZZLE_CLOUD: &str = "     .-.     \n    (   ).   \n   (___(__)  \n             \n             ";
    pub const DRIZZLE_DROPS: &str = "             \n             \n             \n    ‘ ‘ ‘ ‘  \n   ‘ ‘ ‘ ‘   ";

    pub const RAIN_CLOUD: &str = "     .-.     \n    (   ).   \n   (___(__)  \n             \n             ";
    pub const RAIN_DROPS: &str = "             \n             \n             \n   ‚‘‚‘‚‘‚‘  \n   ‚’‚’‚’‚’  ";

    pub const SNOW_CLOUD: &str = "     .-.     \n    (   ).   \n   (___(__)  \n             \n             ";
    pub const SNOW_FLAKES: &str = "             \n             \n             \n    *  *  *  \n   *  *  *   ";
}

/// Rows every icon sprite occupies
pub const SPRITE_HEIGHT: u16 = 5;

// ============================================================================
// Layer compositing
// ============================================================================

/// A single sprite layer with its content and color
struct SpriteLayer {
    content: &'static str,
    color: Color,
}

/// Composite multiple layers into Text, treating spaces as transparent
fn composite_layers(layers: &[SpriteLayer]) -> Text<'static> {
    if layers.is_empty() {
        return Text::default();
    }

    let layer_lines: Vec<Vec<Vec<char>>> = layers
        .iter()
        .map(|l| l.content.lines().map(|line| line.chars().collect()).collect())
        .collect();

    let max_lines = layer_lines.iter().map(|l| l.len()).max().unwrap_or(0);
    let max_width = layer_lines
        .iter()
        .flat_map(|lines| lines.iter())
        .map(|line| line.len())
        .max()
        .unwrap_or(0);

    let mut result_lines = Vec::with_capacity(max_lines);

    for line_idx in 0..max_lines {
        let mut spans = Vec::with_capacity(max_width);

        for col_idx in 0..max_width {
            // Last layer is the foreground
            let (ch, color) = layers
                .iter()
                .enumerate()
                .rev()
                .find_map(|(layer_idx, layer)| {
                    let ch = *layer_lines[layer_idx].get(line_idx)?.get(col_idx)?;
                    (ch != ' ').then_some((ch, layer.color))
                })
                .unwrap_or((' ', Color::Reset));

            spans.push(Span::styled(ch.to_string(), Style::default().fg(color)));
        }

        result_lines.push(Line::from(spans));
    }

    Text::from(result_lines)
}

// ============================================================================
// Public API
// ============================================================================

/// Sprite for the icon, or `None` if the area is too short to hold it.
pub fn icon_sprite(icon: Icon, available_height: u16) -> Option<Text<'static>> {
    (available_height >= SPRITE_HEIGHT).then(|| get_sprite(icon))
}

/// Get art for the given icon
pub fn get_sprite(icon: Icon) -> Text<'static> {
    let gray = Color::Rgb(160, 160, 175);
    let layers: Vec<SpriteLayer> = match icon {
        Icon::Clear => vec![SpriteLayer {
            content: sprite_data::SUN,
            color: icon.accent(),
        }],
        Icon::Cloud => vec![
            SpriteLayer {
                content: sprite_data::CLOUD_SUN,
                color: Color::Yellow,
            },
            SpriteLayer {
                content: sprite_data::CLOUD_BACK,
                color: icon.accent(),
            },
        ],
        Icon::Drizzle => vec![
            SpriteLayer {
                content: sprite_data::DRIZZLE_CLOUD,
                color: gray,
            },
            SpriteLayer {
                content: sprite_data::DRIZZLE_DROPS,
                color: icon.accent(),
            },
        ],
        Icon::Rain => vec![
            SpriteLayer {
                content: sprite_data::RAIN_CLOUD,
                color: gray,
            },
            SpriteLayer {
                content: sprite_data::RAIN_DROPS,
                color: icon.accent(),
            },
        ],
        Icon::Snow => vec![
            SpriteLayer {
                content: sprite_data::SNOW_CLOUD,
                color: gray,
            },
            SpriteLayer {
                content: sprite_data::SNOW_FLAKES,
                color: icon.accent(),
            },
        ],
    };

    composite_layers(&layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_sprite_returns_none_when_too_small() {
        assert!(icon_sprite(Icon::Clear, SPRITE_HEIGHT - 1).is_none());
        assert!(icon_sprite(Icon::Clear, SPRITE_HEIGHT).is_some());
    }

    #[test]
    fn test_all_sprites_load() {
        for icon in [Icon::Clear, Icon::Cloud, Icon::Drizzle, Icon::Rain, Icon::Snow] {
            let text = get_sprite(icon);
            assert_eq!(
                text.lines.len(),
                SPRITE_HEIGHT as usize,
                "Sprite {:?} should span the full height",
                icon
            );
        }
    }

    #[test]
    fn test_foreground_layer_wins() {
        let text = get_sprite(Icon::Rain);
        let drops_row = &text.lines[3];
        assert!(drops_row
            .spans
            .iter()
            .any(|span| span.style.fg == Some(Icon::Rain.accent())));
    }
}
