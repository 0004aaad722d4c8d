//! Button theme
//!
//! Every recognised size, variant and interaction state is enumerated here and
//! resolved to a concrete style when the button is composed.

use ratatui::style::{Color, Modifier, Style};

/// Layout breakpoints, from narrowest to widest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    Base,
    Md,
    Lg,
}

impl Breakpoint {
    /// Breakpoint for a terminal `width` in columns
    pub fn for_width(width: u16) -> Self {
        match width {
            0..=79 => Breakpoint::Base,
            80..=139 => Breakpoint::Md,
            _ => Breakpoint::Lg,
        }
    }
}

/// A value that varies per breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Responsive<T> {
    pub base: T,
    pub md: T,
    pub lg: T,
}

impl<T: Copy> Responsive<T> {
    pub const fn fixed(value: T) -> Self {
        Self { base: value, md: value, lg: value }
    }

    pub fn at(&self, breakpoint: Breakpoint) -> T {
        match breakpoint {
            Breakpoint::Base => self.base,
            Breakpoint::Md => self.md,
            Breakpoint::Lg => self.lg,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorToken {
    InteractiveDark,
    InteractiveWhite,
    InteractivePurple,
    InteractiveDarkPurple,
    InteractiveGray,
    InteractiveTransparentWhite,
    Transparent,
}

impl ColorToken {
    pub fn color(&self) -> Color {
        match self {
            ColorToken::InteractiveDark => Color::Rgb(0x1e, 0x1e, 0x2e),
            ColorToken::InteractiveWhite => Color::Rgb(0xff, 0xff, 0xff),
            ColorToken::InteractivePurple => Color::Rgb(0x74, 0x5d, 0xdf),
            ColorToken::InteractiveDarkPurple => Color::Rgb(0x4b, 0x36, 0xa8),
            ColorToken::InteractiveGray => Color::Rgb(0x8a, 0x8a, 0x8a),
            ColorToken::InteractiveTransparentWhite => Color::Rgb(0xcc, 0xcc, 0xcc),
            ColorToken::Transparent => Color::Reset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonSize {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonVariant {
    Solid { on_dark: bool },
    Outline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Normal,
    Hover,
    Active,
    Disabled,
}

/// Spacing of a button size, in pixels of the web layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeMetrics {
    pub padding_x: Responsive<u16>,
    pub padding_y: Responsive<u16>,
    pub border_radius: Responsive<u16>,
    pub font_size: Responsive<u16>,
}

/// Horizontal margin shared by every button
pub const BASE_MARGIN_X: u16 = 20;

impl ButtonSize {
    pub fn metrics(&self) -> SizeMetrics {
        match self {
            ButtonSize::Primary => SizeMetrics {
                padding_x: Responsive { base: 20, md: 28, lg: 51 },
                padding_y: Responsive { base: 12, md: 14, lg: 23 },
                border_radius: Responsive { base: 13, md: 13, lg: 24 },
                font_size: Responsive { base: 18, md: 18, lg: 24 },
            },
            ButtonSize::Secondary => SizeMetrics {
                padding_x: Responsive::fixed(20),
                padding_y: Responsive::fixed(10),
                border_radius: Responsive::fixed(13),
                font_size: Responsive::fixed(16),
            },
        }
    }

    /// Padding in terminal cells: one cell per 10px horizontally, one row per 12px
    pub fn cell_padding(&self, breakpoint: Breakpoint) -> (u16, u16) {
        let metrics = self.metrics();
        (
            (metrics.padding_x.at(breakpoint) / 10).max(1),
            metrics.padding_y.at(breakpoint) / 12,
        )
    }
}

/// Fully resolved colours of a button in one state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStyle {
    pub background: Option<ColorToken>,
    pub foreground: ColorToken,
    /// Border colour; `None` means no border
    pub border: Option<ColorToken>,
}

impl ButtonStyle {
    pub fn resolve(variant: ButtonVariant, state: ButtonState) -> Self {
        use ColorToken::*;

        if state == ButtonState::Disabled {
            let border = match variant {
                ButtonVariant::Solid { on_dark: false } => None,
                ButtonVariant::Solid { on_dark: true } => Some(InteractivePurple),
                ButtonVariant::Outline => Some(InteractiveDark),
            };
            return Self {
                background: Some(InteractiveGray),
                foreground: InteractiveTransparentWhite,
                border,
            };
        }

        match (variant, state) {
            (ButtonVariant::Solid { on_dark }, ButtonState::Normal) => Self {
                background: (!on_dark).then_some(InteractiveDark),
                foreground: InteractiveWhite,
                border: on_dark.then_some(InteractivePurple),
            },
            (ButtonVariant::Solid { on_dark }, ButtonState::Hover) => Self {
                background: Some(InteractiveDarkPurple),
                foreground: InteractiveWhite,
                border: on_dark.then_some(InteractivePurple),
            },
            (ButtonVariant::Solid { on_dark }, _) => Self {
                background: Some(if on_dark { InteractiveDarkPurple } else { InteractiveDark }),
                foreground: InteractiveWhite,
                border: on_dark.then_some(InteractivePurple),
            },
            (ButtonVariant::Outline, ButtonState::Normal) => Self {
                background: None,
                foreground: InteractiveDark,
                border: Some(InteractiveDark),
            },
            (ButtonVariant::Outline, ButtonState::Hover) => Self {
                background: Some(InteractiveDarkPurple),
                foreground: InteractiveWhite,
                border: Some(Transparent),
            },
            (ButtonVariant::Outline, _) => Self {
                background: Some(InteractiveDark),
                foreground: InteractiveDark,
                border: Some(InteractiveDark),
            },
        }
    }

    pub fn text_style(&self) -> Style {
        let style = Style::default()
            .fg(self.foreground.color())
            .add_modifier(Modifier::BOLD);
        match self.background {
            Some(bg) => style.bg(bg.color()),
            None => style,
        }
    }

    pub fn border_style(&self) -> Style {
        self.border
            .map(|b| Style::default().fg(b.color()))
            .unwrap_or_default()
    }
}

/// Size and variant picked when a button is composed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonTheme {
    pub size: ButtonSize,
    pub variant: ButtonVariant,
}

impl Default for ButtonTheme {
    fn default() -> Self {
        Self {
            size: ButtonSize::Primary,
            variant: ButtonVariant::Solid { on_dark: false },
        }
    }
}

impl ButtonTheme {
    pub fn style(&self, state: ButtonState) -> ButtonStyle {
        ButtonStyle::resolve(self.variant, state)
    }

    /// Button label padded for the given breakpoint
    pub fn padded_label(&self, label: &str, breakpoint: Breakpoint) -> String {
        let (pad_x, _) = self.size.cell_padding(breakpoint);
        let pad = " ".repeat(pad_x as usize);
        format!("{pad}{label}{pad}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoints() {
        assert_eq!(Breakpoint::for_width(60), Breakpoint::Base);
        assert_eq!(Breakpoint::for_width(100), Breakpoint::Md);
        assert_eq!(Breakpoint::for_width(200), Breakpoint::Lg);
    }

    #[test]
    fn test_primary_metrics_are_responsive() {
        let metrics = ButtonSize::Primary.metrics();
        assert_eq!(metrics.padding_x.at(Breakpoint::Base), 20);
        assert_eq!(metrics.padding_x.at(Breakpoint::Lg), 51);
        assert_eq!(ButtonSize::Secondary.metrics().padding_x.at(Breakpoint::Lg), 20);
    }

    #[test]
    fn test_solid_on_light_background() {
        let style = ButtonStyle::resolve(ButtonVariant::Solid { on_dark: false }, ButtonState::Normal);
        assert_eq!(style.background, Some(ColorToken::InteractiveDark));
        assert_eq!(style.border, None);
    }

    #[test]
    fn test_solid_on_dark_background() {
        let variant = ButtonVariant::Solid { on_dark: true };
        let normal = ButtonStyle::resolve(variant, ButtonState::Normal);
        assert_eq!(normal.background, None);
        assert_eq!(normal.border, Some(ColorToken::InteractivePurple));

        let active = ButtonStyle::resolve(variant, ButtonState::Active);
        assert_eq!(active.background, Some(ColorToken::InteractiveDarkPurple));
    }

    #[test]
    fn test_disabled_overrides_variant_colours() {
        for variant in [ButtonVariant::Solid { on_dark: false }, ButtonVariant::Outline] {
            let style = ButtonStyle::resolve(variant, ButtonState::Disabled);
            assert_eq!(style.background, Some(ColorToken::InteractiveGray));
            assert_eq!(style.foreground, ColorToken::InteractiveTransparentWhite);
        }
    }

    #[test]
    fn test_outline_hover() {
        let style = ButtonStyle::resolve(ButtonVariant::Outline, ButtonState::Hover);
        assert_eq!(style.foreground, ColorToken::InteractiveWhite);
        assert_eq!(style.border, Some(ColorToken::Transparent));
    }

    #[test]
    fn test_padded_label() {
        let theme = ButtonTheme::default();
        assert_eq!(theme.padded_label("Open Trove", Breakpoint::Base), "  Open Trove  ");
    }
}
