use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of a string in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate to at most `max_cells` terminal cells, appending `…` when
/// anything was cut. Truncation happens on grapheme boundaries so wide
/// characters are never split.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1;
    let mut out = String::new();
    let mut used = 0;
    for g in s.graphemes(true) {
        let w = UnicodeWidthStr::width(g);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Byte offset of the grapheme boundary after `offset`, or `s.len()` when
/// already at the end.
pub fn next_boundary(s: &str, offset: usize) -> usize {
    if offset >= s.len() {
        return s.len();
    }
    s[offset..]
        .grapheme_indices(true)
        .nth(1)
        .map(|(i, _)| offset + i)
        .unwrap_or(s.len())
}

/// Byte offset of the grapheme boundary before `offset`, or 0 when already
/// at the start.
pub fn prev_boundary(s: &str, offset: usize) -> usize {
    s[..offset]
        .grapheme_indices(true)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn width_counts_cells_not_bytes() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width("你好"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn truncate_fits_and_marks() {
        assert_eq!(truncate_to_width("hi", 10), "hi");
        assert_eq!(truncate_to_width("hello world", 8), "hello w\u{2026}");
        assert_eq!(truncate_to_width("hello", 0), "");
        assert_eq!(truncate_to_width("hello", 1), "\u{2026}");
    }

    #[test]
    fn truncate_never_splits_wide_chars() {
        let out = truncate_to_width("你好世界", 5);
        assert_eq!(out, "你好\u{2026}");
        assert!(display_width(&out) <= 5);
    }

    #[test]
    fn boundaries_step_over_graphemes() {
        let s = "a🎉b";
        assert_eq!(next_boundary(s, 0), 1);
        assert_eq!(next_boundary(s, 1), 5);
        assert_eq!(next_boundary(s, 5), 6);
        assert_eq!(next_boundary(s, 6), 6);
        assert_eq!(prev_boundary(s, 6), 5);
        assert_eq!(prev_boundary(s, 5), 1);
        assert_eq!(prev_boundary(s, 1), 0);
        assert_eq!(prev_boundary(s, 0), 0);
    }
}
