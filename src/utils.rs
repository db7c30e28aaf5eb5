//! Shared formatting helpers.

/// Format a byte count for people.
///
/// # Examples
///
/// ```
/// use pibox_gallery::utils::human_size;
///
/// assert_eq!(human_size(0), "0 B");
/// assert_eq!(human_size(2048), "2.0 KB");
/// assert_eq!(human_size(10 * 1024 * 1024), "10.0 MB");
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    match bytes {
        b if b >= GB => format!("{:.1} GB", b as f64 / GB as f64),
        b if b >= MB => format!("{:.1} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{b} B"),
    }
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
