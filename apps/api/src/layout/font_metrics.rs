//! Static font-metric tables used to estimate rendered text size.
//!
//! Advance widths are the Helvetica / Helvetica-Bold AFM values in 1/1000 em.
//! This is an approximation of what the final renderer draws (no kerning, no
//! ligatures), which is enough to decide where pages break.
//! Tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

// ────────────────────────────────────────────────────────────────────────────
// Font weight
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static advance-width table for one font face.
///
/// `widths[i]` = advance of ASCII character `(i + 32)` in 1/1000 em.
pub struct FontMetricTable {
    widths: [u16; 95],
    /// Fallback advance for characters outside the table.
    pub average_char_width: u16,
}

impl FontMetricTable {
    /// Rendered width of `s` in points at `font_size` points.
    pub fn measure_str(&self, s: &str, font_size: f32) -> f32 {
        let units: u32 = s
            .chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    u32::from(self.widths[code - 32])
                } else {
                    u32::from(self.average_char_width)
                }
            })
            .sum();
        units as f32 * font_size / 1000.0
    }

    pub fn space_width(&self, font_size: f32) -> f32 {
        self.measure_str(" ", font_size)
    }

    /// Number of lines `text` occupies when greedily word-wrapped at `max_width` points.
    ///
    /// Explicit newlines force a break; a blank line still takes a line.
    /// A single word wider than the line is given a line of its own.
    /// Empty or whitespace-only text occupies zero lines.
    pub fn wrapped_lines(&self, text: &str, font_size: f32, max_width: f32) -> u32 {
        if text.trim().is_empty() {
            return 0;
        }
        text.trim_end()
            .split('\n')
            .map(|paragraph| self.wrap_paragraph(paragraph, font_size, max_width))
            .sum()
    }

    fn wrap_paragraph(&self, paragraph: &str, font_size: f32, max_width: f32) -> u32 {
        let space_w = self.space_width(font_size);
        let mut line_count = 1u32;
        let mut current_width = 0.0_f32;
        let mut first = true;

        for word in paragraph.split_whitespace() {
            let word_w = self.measure_str(word, font_size);

            if !first && current_width + space_w + word_w > max_width {
                line_count += 1;
                current_width = word_w;
            } else if first {
                current_width = word_w;
                first = false;
            } else {
                current_width += space_w + word_w;
            }
        }
        line_count
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0-9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    average_char_width: 520,
};

static HELVETICA_BOLD: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0-9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    average_char_width: 570,
};

/// Returns the static metric table for a weight.
pub fn get_metrics(weight: FontWeight) -> &'static FontMetricTable {
    match weight {
        FontWeight::Regular => &HELVETICA,
        FontWeight::Bold => &HELVETICA_BOLD,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(FontWeight::Regular);
        assert_eq!(metrics.measure_str("", 12.0), 0.0);
    }

    #[test]
    fn test_measure_str_scales_with_font_size() {
        let metrics = get_metrics(FontWeight::Regular);
        // "Hi" = H(722) + i(222) = 944 units
        let at_10 = metrics.measure_str("Hi", 10.0);
        assert!((at_10 - 9.44).abs() < 1e-3, "got {at_10}");
        let at_20 = metrics.measure_str("Hi", 20.0);
        assert!((at_20 - 2.0 * at_10).abs() < 1e-3);
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(FontWeight::Regular);
        let width = metrics.measure_str("é", 10.0);
        assert!((width - 5.2).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Reflective listening";
        let regular = get_metrics(FontWeight::Regular).measure_str(text, 12.0);
        let bold = get_metrics(FontWeight::Bold).measure_str(text, 12.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_wrapped_lines_empty_is_zero() {
        let metrics = get_metrics(FontWeight::Regular);
        assert_eq!(metrics.wrapped_lines("", 10.0, 200.0), 0);
        assert_eq!(metrics.wrapped_lines("   \n  ", 10.0, 200.0), 0);
    }

    #[test]
    fn test_wrapped_lines_short_text_is_one_line() {
        let metrics = get_metrics(FontWeight::Regular);
        assert_eq!(metrics.wrapped_lines("Good rapport", 10.0, 200.0), 1);
    }

    #[test]
    fn test_wrapped_lines_wraps_long_text() {
        let metrics = get_metrics(FontWeight::Regular);
        // "word" = 722+556+333+556 = 2167 units → 21.67pt at 10pt, plus 2.78pt space.
        // 20 words need ~485pt, so at 100pt width they cannot fit on one or two lines.
        let text = "word ".repeat(20);
        let lines = metrics.wrapped_lines(&text, 10.0, 100.0);
        assert!(lines >= 5, "expected at least 5 lines, got {lines}");
    }

    #[test]
    fn test_wrapped_lines_respects_explicit_newlines() {
        let metrics = get_metrics(FontWeight::Regular);
        assert_eq!(metrics.wrapped_lines("one\ntwo\n\nfour", 10.0, 500.0), 4);
    }

    #[test]
    fn test_wrapped_lines_overlong_word_gets_own_line() {
        let metrics = get_metrics(FontWeight::Regular);
        let long_word = "x".repeat(200);
        let text = format!("a {long_word} b");
        assert_eq!(metrics.wrapped_lines(&text, 10.0, 100.0), 3);
    }
}
