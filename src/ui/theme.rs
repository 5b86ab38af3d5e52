//! Color schemes and styling.

use gpui::{rgba, Hsla};

/// Light/dark selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

/// Semantic color set used by every view.
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    pub background: Hsla,
    pub surface: Hsla,
    pub surface_elevated: Hsla,
    pub border: Hsla,
    pub text_primary: Hsla,
    pub text_secondary: Hsla,
    pub text_muted: Hsla,
    pub accent: Hsla,
    pub success: Hsla,
    pub warning: Hsla,
    pub error: Hsla,
}

impl ThemeColors {
    /// The default dark scheme.
    pub fn dark() -> Self {
        Self {
            background: rgba(0x09090bff).into(),
            surface: rgba(0x18181bff).into(),
            surface_elevated: rgba(0x27272aff).into(),
            border: rgba(0x27272aff).into(),
            text_primary: rgba(0xe4e4e7ff).into(),
            text_secondary: rgba(0xa1a1aaff).into(),
            text_muted: rgba(0x71717aff).into(),
            accent: rgba(0x3b82f6ff).into(),
            success: rgba(0x22c55eff).into(),
            warning: rgba(0xf59e0bff).into(),
            error: rgba(0xef4444ff).into(),
        }
    }

    /// The light scheme.
    pub fn light() -> Self {
        Self {
            background: rgba(0xfafafaff).into(),
            surface: rgba(0xffffffff).into(),
            surface_elevated: rgba(0xf4f4f5ff).into(),
            border: rgba(0xe4e4e7ff).into(),
            text_primary: rgba(0x18181bff).into(),
            text_secondary: rgba(0x52525bff).into(),
            text_muted: rgba(0xa1a1aaff).into(),
            accent: rgba(0x2563ebff).into(),
            success: rgba(0x16a34aff).into(),
            warning: rgba(0xd97706ff).into(),
            error: rgba(0xdc2626ff).into(),
        }
    }
}

/// Theme wrapper carrying the active mode and its colors.
#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,
    pub colors: ThemeColors,
}

impl Theme {
    /// Dark theme.
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            colors: ThemeColors::dark(),
        }
    }

    /// Light theme.
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            colors: ThemeColors::light(),
        }
    }

    /// Theme for the given mode.
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_selects_scheme() {
        let dark = Theme::for_mode(ThemeMode::Dark);
        let light = Theme::for_mode(ThemeMode::Light);
        assert_eq!(dark.mode, ThemeMode::Dark);
        assert_eq!(light.mode, ThemeMode::Light);
        assert_ne!(dark.colors.background, light.colors.background);
    }
}
