use unicode_width::UnicodeWidthStr;

/// Format an average, dropping the decimal for whole numbers
pub fn format_average(value: f64) -> String {
    if value == value.floor() {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Group thousands with commas: 12345 -> "12,345"
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u64, total: u64, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Same as `progress_bar` but for fractional values such as averages
pub fn ratio_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    let filled_count = ((value / max).clamp(0.0, 1.0) * width as f64).round() as usize;
    format!(
        "{}{}",
        "█".repeat(filled_count),
        "░".repeat(width.saturating_sub(filled_count))
    )
}

/// Pad to a display width, counting wide glyphs correctly
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

/// Glyph for a heatmap cell at the feed's level (0-4)
pub fn level_glyph(level: u8) -> &'static str {
    match level {
        0 => "·",
        1 => "░",
        2 => "▒",
        3 => "▓",
        _ => "█",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_drop_trailing_zero() {
        assert_eq!(format_average(3.0), "3");
        assert_eq!(format_average(1.7), "1.7");
        assert_eq!(format_average(0.0), "0");
    }

    #[test]
    fn counts_are_grouped() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn bars_fill_proportionally() {
        assert_eq!(progress_bar(5, 10, 4), "██░░");
        assert_eq!(progress_bar(0, 0, 3), "░░░");
        assert_eq!(progress_bar(20, 10, 2), "██");
        assert_eq!(ratio_bar(1.5, 3.0, 4), "██░░");
        assert_eq!(ratio_bar(1.0, 0.0, 2), "░░");
    }

    #[test]
    fn padding_uses_display_width() {
        assert_eq!(pad_right("Mon", 5), "Mon  ");
        assert_eq!(pad_right("—", 2), "— ");
        assert_eq!(pad_right("toolong", 3), "toolong");
    }

    #[test]
    fn level_glyphs_saturate() {
        assert_eq!(level_glyph(0), "·");
        assert_eq!(level_glyph(4), "█");
        assert_eq!(level_glyph(9), "█");
    }
}
