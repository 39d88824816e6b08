//! Named colors used by highlight tags and page chrome.

/// Color table keyed by name. Values are CSS hex colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub red: &'static str,
    pub green: &'static str,
    pub blue: &'static str,
    pub yellow: &'static str,
    pub orange: &'static str,
    pub pink: &'static str,
    pub light_gray: &'static str,
    pub dark_gray: &'static str,
    pub highlighter_red: &'static str,
    pub highlighter_green: &'static str,
    pub highlighter_blue: &'static str,
    pub highlighter_yellow: &'static str,
    pub highlighter_orange: &'static str,
}

pub const DEFAULT_PALETTE: Palette = Palette {
    red: "#FF0000",
    green: "#00FF00",
    blue: "#0000FF",
    yellow: "#FFFF00",
    orange: "#FFA500",
    pink: "#FFD1DC",
    light_gray: "#F0F0F0",
    dark_gray: "#A9A9A9",
    highlighter_red: "#FF7792",
    highlighter_green: "#AEFF77",
    highlighter_blue: "#77C9FF",
    highlighter_yellow: "#FFFF77",
    highlighter_orange: "#FFAE77",
};

impl Default for Palette {
    fn default() -> Self {
        DEFAULT_PALETTE
    }
}

impl Palette {
    /// Color for a highlight category.
    ///
    /// Accepts lowercase color names (`red`, `lightgray`, `highlighterblue`, ...),
    /// the keyword category `name`, and the short aliases `b` to `e`.
    pub fn category_color(&self, category: &str) -> Option<&'static str> {
        let color = match category {
            "red" => self.red,
            "green" => self.green,
            "blue" => self.blue,
            "yellow" => self.yellow,
            "orange" => self.orange,
            "pink" => self.pink,
            "lightgray" => self.light_gray,
            "darkgray" => self.dark_gray,
            "highlighterred" | "name" => self.highlighter_red,
            "highlightergreen" | "b" => self.highlighter_green,
            "highlighterblue" | "c" => self.highlighter_blue,
            "highlighteryellow" | "d" => self.highlighter_yellow,
            "highlighterorange" | "e" => self.highlighter_orange,
            _ => return None,
        };
        Some(color)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_category_aliases() {
        let palette = Palette::default();
        assert_eq!(palette.category_color("name"), Some("#FF7792"));
        assert_eq!(palette.category_color("b"), Some("#AEFF77"));
        assert_eq!(palette.category_color("c"), Some("#77C9FF"));
        assert_eq!(palette.category_color("d"), Some("#FFFF77"));
        assert_eq!(palette.category_color("e"), Some("#FFAE77"));
        assert_eq!(palette.category_color("lightgray"), Some("#F0F0F0"));
        assert_eq!(palette.category_color("purple"), None);
    }
}
