//! Condition themes for the terminal renderer.
//!
//! Icon codes follow the `{condition}{d|n}` pattern (`"01d"` is daytime
//! clear sky). The renderer passes the code through unchanged and consumes
//! the returned descriptors opaquely.

/// Styling descriptors for one weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// ANSI escape applied to the hero accent.
    pub accent: &'static str,
    pub glyph: &'static str,
    /// Fill character for the temperature bar.
    pub chart: char,
}

const YELLOW: &str = "\x1b[33m";
const BRIGHT_YELLOW: &str = "\x1b[93m";
const BLUE: &str = "\x1b[34m";
const BRIGHT_BLUE: &str = "\x1b[94m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const WHITE: &str = "\x1b[97m";
const MAGENTA: &str = "\x1b[35m";

const DEFAULT_THEME: Theme = Theme {
    accent: WHITE,
    glyph: "☀",
    chart: '█',
};

/// Resolve the theme for an icon code. Unknown codes fall back to the
/// default theme.
pub fn theme_for(icon: &str) -> Theme {
    let night = icon.ends_with('n');
    let code = icon.get(..2).unwrap_or("");

    match (code, night) {
        ("01", false) => Theme {
            accent: BRIGHT_YELLOW,
            glyph: "☀",
            chart: '█',
        },
        ("01", true) => Theme {
            accent: MAGENTA,
            glyph: "☾",
            chart: '█',
        },
        ("02", false) => Theme {
            accent: CYAN,
            glyph: "⛅",
            chart: '█',
        },
        ("02", true) => Theme {
            accent: BLUE,
            glyph: "☁",
            chart: '█',
        },
        ("03", _) | ("04", _) => Theme {
            accent: GRAY,
            glyph: "☁",
            chart: '▓',
        },
        ("09", _) | ("10", _) => Theme {
            accent: BRIGHT_BLUE,
            glyph: "☔",
            chart: '▒',
        },
        ("11", _) => Theme {
            accent: YELLOW,
            glyph: "⚡",
            chart: '▒',
        },
        ("13", _) => Theme {
            accent: WHITE,
            glyph: "❄",
            chart: '░',
        },
        ("50", _) => Theme {
            accent: GRAY,
            glyph: "≋",
            chart: '░',
        },
        _ => DEFAULT_THEME,
    }
}
