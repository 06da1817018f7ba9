use std::time::Duration;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Marker appended to text cut to fit a column
pub const ELLIPSIS: char = '…';

/// Format a size the way `df -h` does: powers of 1024, rounded up,
/// one decimal below 10 (e.g. `4.5G`, `45G`, `512B`)
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["K", "M", "G", "T", "P", "E"];

    if bytes < 1024 {
        return format!("{}B", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if value < 10.0 {
        let rounded = (value * 10.0).ceil() / 10.0;
        if rounded < 10.0 {
            return format!("{:.1}{}", rounded, UNITS[unit]);
        }
        return format!("{:.0}{}", rounded, UNITS[unit]);
    }

    let rounded = value.ceil();
    if rounded >= 1024.0 && unit < UNITS.len() - 1 {
        return format!("1.0{}", UNITS[unit + 1]);
    }
    format!("{:.0}{}", rounded, UNITS[unit])
}

/// Format time since boot like `uptime -p`: `up 2 days, 1 hour, 5 minutes`
pub fn format_uptime(uptime: Duration) -> String {
    let total_minutes = uptime.as_secs() / 60;
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes / 60) % 24;
    let minutes = total_minutes % 60;

    let mut parts = Vec::new();
    for (amount, unit) in [(days, "day"), (hours, "hour"), (minutes, "minute")] {
        if amount > 0 {
            let plural = if amount == 1 { "" } else { "s" };
            parts.push(format!("{} {}{}", amount, unit, plural));
        }
    }

    if parts.is_empty() {
        return "up 0 minutes".to_string();
    }
    format!("up {}", parts.join(", "))
}

/// Terminal columns taken by `text`
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Cut `text` to at most `width` columns. Cut text ends with [`ELLIPSIS`]
/// and is exactly `width` columns wide.
pub fn truncate(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    // a double-width char may stop us one column short
    while used < budget {
        out.push(' ');
        used += 1;
    }
    out.push(ELLIPSIS);
    out
}

/// Left-align `text` in exactly `width` columns, truncating when needed
pub fn fit(text: &str, width: usize) -> String {
    pad_right(&truncate(text, width), width)
}

/// Right-align `text` in exactly `width` columns, truncating when needed
pub fn fit_right(text: &str, width: usize) -> String {
    pad_left(&truncate(text, width), width)
}

pub fn pad_right(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(text));
    format!("{}{}", text, " ".repeat(pad))
}

pub fn pad_left(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(text));
    format!("{}{}", " ".repeat(pad), text)
}

/// Center `text` in `width` columns using `fill`. Odd padding goes to the
/// right unless the width is odd too (same split as Python's `str.center`).
pub fn center(text: &str, width: usize, fill: char) -> String {
    let text = truncate(text, width);
    let margin = width.saturating_sub(display_width(&text));
    let left = margin / 2 + (margin & width & 1);
    let right = margin - left;
    format!(
        "{}{}{}",
        fill.to_string().repeat(left),
        text,
        fill.to_string().repeat(right)
    )
}

/// Right-align `text` in `width` columns using `fill`
pub fn rjust(text: &str, width: usize, fill: char) -> String {
    let text = truncate(text, width);
    let margin = width.saturating_sub(display_width(&text));
    format!("{}{}", fill.to_string().repeat(margin), text)
}
