use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

pub const ELLIPSIS: char = '…';

/// Truncates `input` to at most `max_cols` terminal columns, ending in `…` when something was
/// cut.
///
/// Tabs count as four spaces. Control and zero-width characters are dropped. A wide character that
/// would straddle the limit is left out rather than split.
pub fn fit_to_width(input: &str, max_cols: u16) -> String {
    let max_cols = max_cols as usize;
    if max_cols == 0 {
        return String::new();
    }

    let cleaned: String = input
        .replace('\t', "    ")
        .chars()
        .filter(|c| UnicodeWidthChar::width(*c).unwrap_or(0) > 0)
        .collect();
    if cleaned.width() <= max_cols {
        return cleaned;
    }

    let budget = max_cols - 1;
    let mut used = 0usize;
    let mut out = String::new();
    for ch in cleaned.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}

/// Writes `text` fitted into `area`'s first line and fills the remainder of the line with `style`.
pub fn render_fitted(area: Rect, buf: &mut Buffer, text: &str, style: Style) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    buf.set_style(Rect::new(area.x, area.y, area.width, 1), style);
    let fitted = fit_to_width(text, area.width);
    buf.set_stringn(area.x, area.y, fitted, area.width as usize, style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(fit_to_width("Ada", 5), "Ada");
        assert_eq!(fit_to_width("Ada", 3), "Ada");
        assert_eq!(fit_to_width("Ada", 0), "");
    }

    #[test]
    fn long_text_gets_an_ellipsis() {
        assert_eq!(fit_to_width("Lovelace", 5), "Love…");
        assert_eq!(fit_to_width("Lovelace", 1), "…");
    }

    #[test]
    fn wide_chars_are_not_split() {
        assert_eq!(fit_to_width("你好世界", 4), "你…");
        assert_eq!(fit_to_width("你好世界", 5), "你好…");
        assert_eq!(fit_to_width("\tx", 3), "  …");
    }

    #[test]
    fn control_chars_are_dropped() {
        assert_eq!(fit_to_width("a\u{7}b", 5), "ab");
    }

    #[test]
    fn render_fitted_clears_the_line() {
        let area = Rect::new(0, 0, 6, 1);
        let mut buf = Buffer::empty(area);
        buf.set_string(0, 0, "xxxxxx", Style::default());
        render_fitted(area, &mut buf, "Grace Hopper", Style::default());
        let line: String = (0..6).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert_eq!(line, "Grace…");
    }
}
