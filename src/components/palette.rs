//! Fixed style palettes for component variants
//!
//! JSON supplies keys ("orange", "warning", "h3"); the classes live here so
//! every page looks the same. An unknown key falls back to the variant's
//! default palette instead of failing the component.

fn lookup_or_default<T: Default>(
    palette: &'static str,
    key: Option<&str>,
    parse: impl Fn(&str) -> Option<T>,
) -> T {
    match key {
        None => T::default(),
        Some(k) => parse(k).unwrap_or_else(|| {
            tracing::warn!("Unknown {} key '{}', using default", palette, k);
            T::default()
        }),
    }
}

// ============================================================================
// Module header
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderTheme {
    #[default]
    Orange,
    Navy,
    Blue,
    White,
}

impl HeaderTheme {
    pub fn lookup(key: Option<&str>) -> Self {
        lookup_or_default("header theme", key, |k| match k {
            "orange" => Some(Self::Orange),
            "navy" => Some(Self::Navy),
            "blue" => Some(Self::Blue),
            "white" => Some(Self::White),
            _ => None,
        })
    }

    pub fn background(&self) -> &'static str {
        match self {
            Self::Orange => "bg-gradient-to-br from-orange-500 to-red-600",
            Self::Navy => "bg-gradient-to-br from-blue-800 to-indigo-900",
            Self::Blue => "bg-gradient-to-br from-blue-600 to-indigo-700",
            Self::White => "bg-gradient-to-br from-gray-50 to-gray-100 text-gray-900 border border-gray-200",
        }
    }

    pub fn text_color(&self) -> &'static str {
        match self {
            Self::White => "text-gray-900",
            _ => "text-white",
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            Self::White => "bg-gray-900/10 text-gray-700",
            _ => "bg-white/20",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Self::White => "text-gray-600",
            _ => "text-orange-100",
        }
    }
}

// ============================================================================
// Info box
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InfoKind {
    #[default]
    Default,
    Primary,
    Success,
    Warning,
    Error,
    Navy,
}

impl InfoKind {
    pub fn lookup(key: Option<&str>) -> Self {
        lookup_or_default("info type", key, |k| match k {
            "default" => Some(Self::Default),
            "primary" => Some(Self::Primary),
            "success" => Some(Self::Success),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            "navy" => Some(Self::Navy),
            _ => None,
        })
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Default => "bg-gray-50 border-gray-200 text-gray-800 dark:bg-gray-800 dark:border-gray-700 dark:text-gray-200",
            Self::Primary => "bg-orange-50 border-orange-200 text-orange-800 dark:bg-orange-900/20 dark:border-orange-800 dark:text-orange-200",
            Self::Success => "bg-green-50 border-green-200 text-green-800 dark:bg-green-900/20 dark:border-green-800 dark:text-green-200",
            Self::Warning => "bg-yellow-50 border-yellow-200 text-yellow-800 dark:bg-yellow-900/20 dark:border-yellow-800 dark:text-yellow-200",
            Self::Error => "bg-red-50 border-red-200 text-red-800 dark:bg-red-900/20 dark:border-red-800 dark:text-red-200",
            Self::Navy => "bg-blue-50 border-blue-200 text-blue-800 dark:bg-blue-900/20 dark:border-blue-800 dark:text-blue-200",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Default => "fas fa-info-circle",
            Self::Primary => "fas fa-lightbulb",
            Self::Success => "fas fa-check-circle",
            Self::Warning => "fas fa-exclamation-triangle",
            Self::Error => "fas fa-times-circle",
            Self::Navy => "fas fa-anchor",
        }
    }
}

// ============================================================================
// Material section
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingLevel {
    H1,
    #[default]
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    pub fn lookup(key: Option<&str>) -> Self {
        lookup_or_default("heading level", key, |k| match k {
            "h1" => Some(Self::H1),
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            "h4" => Some(Self::H4),
            "h5" => Some(Self::H5),
            "h6" => Some(Self::H6),
            _ => None,
        })
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
        }
    }

    /// Size class paired with the tag.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::H1 => "text-3xl font-bold mb-6",
            Self::H2 => "text-2xl font-bold mb-4",
            Self::H3 => "text-xl font-semibold mb-3",
            Self::H4 => "text-lg font-semibold mb-2",
            Self::H5 => "text-base font-semibold mb-2",
            Self::H6 => "text-sm font-semibold mb-2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialTheme {
    #[default]
    Default,
    Orange,
    Navy,
}

impl MaterialTheme {
    pub fn lookup(key: Option<&str>) -> Self {
        lookup_or_default("material theme", key, |k| match k {
            "default" => Some(Self::Default),
            "orange" => Some(Self::Orange),
            "navy" => Some(Self::Navy),
            _ => None,
        })
    }

    pub fn heading_color(&self) -> &'static str {
        match self {
            Self::Default => "text-gray-900 dark:text-white",
            Self::Orange => "text-orange-700 dark:text-orange-300",
            Self::Navy => "text-blue-800 dark:text-blue-300",
        }
    }
}

// ============================================================================
// Shared accent (code, command, cards, accordion, video, table)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccentTheme {
    #[default]
    Orange,
    Navy,
    Blue,
}

impl AccentTheme {
    pub fn lookup(key: Option<&str>) -> Self {
        lookup_or_default("accent theme", key, |k| match k {
            "orange" => Some(Self::Orange),
            "navy" => Some(Self::Navy),
            "blue" => Some(Self::Blue),
            _ => None,
        })
    }

    pub fn heading_color(&self) -> &'static str {
        match self {
            Self::Orange => "text-orange-700 dark:text-orange-300",
            Self::Navy => "text-blue-800 dark:text-blue-300",
            Self::Blue => "text-blue-700 dark:text-blue-300",
        }
    }

    /// Hover color for toolbar icons on dark code headers.
    pub fn icon_hover(&self) -> &'static str {
        match self {
            Self::Orange => "hover:text-orange-400",
            Self::Navy | Self::Blue => "hover:text-blue-400",
        }
    }
}

// ============================================================================
// Command terminal
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalKind {
    #[default]
    Terminal,
    Powershell,
    Cmd,
}

impl TerminalKind {
    pub fn lookup(key: Option<&str>) -> Self {
        lookup_or_default("terminal type", key, |k| match k {
            "terminal" => Some(Self::Terminal),
            "powershell" => Some(Self::Powershell),
            "cmd" => Some(Self::Cmd),
            _ => None,
        })
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Terminal => "bg-gray-900 text-green-400",
            Self::Powershell => "bg-blue-900 text-white",
            Self::Cmd => "bg-black text-white",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Terminal => "$",
            Self::Powershell => "PS>",
            Self::Cmd => "C:\\>",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Terminal => "TERMINAL",
            Self::Powershell => "POWERSHELL",
            Self::Cmd => "CMD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keys_fall_back() {
        assert_eq!(HeaderTheme::lookup(Some("purple")), HeaderTheme::Orange);
        assert_eq!(InfoKind::lookup(Some("danger")), InfoKind::Default);
        assert_eq!(HeadingLevel::lookup(Some("h7")), HeadingLevel::H2);
        assert_eq!(AccentTheme::lookup(Some("green")), AccentTheme::Orange);
        assert_eq!(TerminalKind::lookup(Some("bash")), TerminalKind::Terminal);
    }

    #[test]
    fn test_absent_keys_use_default() {
        assert_eq!(HeaderTheme::lookup(None), HeaderTheme::Orange);
        assert_eq!(MaterialTheme::lookup(None), MaterialTheme::Default);
    }

    #[test]
    fn test_white_header_uses_dark_text() {
        let theme = HeaderTheme::lookup(Some("white"));
        assert_eq!(theme.text_color(), "text-gray-900");
        assert_eq!(HeaderTheme::Navy.text_color(), "text-white");
    }

    #[test]
    fn test_heading_pairs() {
        let level = HeadingLevel::lookup(Some("h4"));
        assert_eq!(level.tag(), "h4");
        assert_eq!(level.css_class(), "text-lg font-semibold mb-2");
    }

    #[test]
    fn test_terminal_prompts() {
        assert_eq!(TerminalKind::Powershell.prompt(), "PS>");
        assert_eq!(TerminalKind::Cmd.prompt(), "C:\\>");
        assert_eq!(TerminalKind::Cmd.label(), "CMD");
    }
}
