use ratatui::style::Modifier;
use ratatui::style::Style;

/// Colors shared by the table's header, body and footer.
///
/// Widget options can override individual styles; a default (`Style::default()`) option falls
/// back to the matching theme entry.
#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub header: Style,
    pub drop_target: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            header: Style::default().add_modifier(Modifier::BOLD),
            drop_target: Style::default().black().on_cyan(),
        }
    }
}
