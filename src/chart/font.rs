//! Built-in 3x5 bitmap font used for chart labels.
//!
//! Lowercase letters render as uppercase; characters without a glyph render
//! as `?`.

pub const GLYPH_WIDTH: u32 = 3;
pub const GLYPH_HEIGHT: u32 = 5;

type Glyph = [&'static str; 5];

const UNKNOWN: Glyph = ["##.", "..#", ".#.", "...", ".#."];

/// Rows of the glyph for `c`, top to bottom. `#` marks a lit pixel.
pub fn glyph(c: char) -> Glyph {
    match c.to_ascii_uppercase() {
        '0' => ["###", "#.#", "#.#", "#.#", "###"],
        '1' => [".#.", "##.", ".#.", ".#.", "###"],
        '2' => ["###", "..#", "###", "#..", "###"],
        '3' => ["###", "..#", ".##", "..#", "###"],
        '4' => ["#.#", "#.#", "###", "..#", "..#"],
        '5' => ["###", "#..", "###", "..#", "###"],
        '6' => ["###", "#..", "###", "#.#", "###"],
        '7' => ["###", "..#", "..#", ".#.", ".#."],
        '8' => ["###", "#.#", "###", "#.#", "###"],
        '9' => ["###", "#.#", "###", "..#", "###"],
        'A' => [".#.", "#.#", "###", "#.#", "#.#"],
        'B' => ["##.", "#.#", "##.", "#.#", "##."],
        'C' => [".##", "#..", "#..", "#..", ".##"],
        'D' => ["##.", "#.#", "#.#", "#.#", "##."],
        'E' => ["###", "#..", "##.", "#..", "###"],
        'F' => ["###", "#..", "##.", "#..", "#.."],
        'G' => [".##", "#..", "#.#", "#.#", ".##"],
        'H' => ["#.#", "#.#", "###", "#.#", "#.#"],
        'I' => ["###", ".#.", ".#.", ".#.", "###"],
        'J' => ["..#", "..#", "..#", "#.#", ".#."],
        'K' => ["#.#", "#.#", "##.", "#.#", "#.#"],
        'L' => ["#..", "#..", "#..", "#..", "###"],
        'M' => ["#.#", "###", "###", "#.#", "#.#"],
        'N' => ["##.", "#.#", "#.#", "#.#", "#.#"],
        'O' => [".#.", "#.#", "#.#", "#.#", ".#."],
        'P' => ["##.", "#.#", "##.", "#..", "#.."],
        'Q' => [".#.", "#.#", "#.#", "##.", ".##"],
        'R' => ["##.", "#.#", "##.", "#.#", "#.#"],
        'S' => [".##", "#..", ".#.", "..#", "##."],
        'T' => ["###", ".#.", ".#.", ".#.", ".#."],
        'U' => ["#.#", "#.#", "#.#", "#.#", "###"],
        'V' => ["#.#", "#.#", "#.#", "#.#", ".#."],
        'W' => ["#.#", "#.#", "###", "###", "#.#"],
        'X' => ["#.#", "#.#", ".#.", "#.#", "#.#"],
        'Y' => ["#.#", "#.#", ".#.", ".#.", ".#."],
        'Z' => ["###", "..#", ".#.", "#..", "###"],
        ' ' => ["...", "...", "...", "...", "..."],
        '.' => ["...", "...", "...", "...", ".#."],
        ',' => ["...", "...", "...", ".#.", "#.."],
        '-' => ["...", "...", "###", "...", "..."],
        '+' => ["...", ".#.", "###", ".#.", "..."],
        '=' => ["...", "###", "...", "###", "..."],
        '_' => ["...", "...", "...", "...", "###"],
        '%' => ["#..", "..#", ".#.", "#..", "..#"],
        '/' => ["..#", "..#", ".#.", "#..", "#.."],
        ':' => ["...", ".#.", "...", ".#.", "..."],
        '(' => [".#.", "#..", "#..", "#..", ".#."],
        ')' => [".#.", "..#", "..#", "..#", ".#."],
        '<' => ["..#", ".#.", "#..", ".#.", "..#"],
        '>' => ["#..", ".#.", "..#", ".#.", "#.."],
        '$' => [".##", "##.", ".#.", ".##", "##."],
        '!' => [".#.", ".#.", ".#.", "...", ".#."],
        '\'' => [".#.", ".#.", "...", "...", "..."],
        '"' => ["#.#", "#.#", "...", "...", "..."],
        _ => UNKNOWN,
    }
}

/// Advance of one character at `scale`, including spacing.
pub fn char_advance(scale: u32) -> u32 {
    (GLYPH_WIDTH + 1) * scale
}

/// Pixel width of `text` at `scale`.
pub fn text_width(text: &str, scale: u32) -> u32 {
    let count = text.chars().count() as u32;
    if count == 0 {
        return 0;
    }
    count * char_advance(scale) - scale
}

/// Shorten `text` so it fits in `max_width` pixels, marking the cut with `..`.
pub fn fit_text(text: &str, max_width: u32, scale: u32) -> String {
    if text_width(text, scale) <= max_width {
        return text.to_string();
    }
    let max_chars = (max_width + scale) / char_advance(scale);
    if max_chars <= 2 {
        return text.chars().take(max_chars as usize).collect();
    }
    let mut shortened: String = text.chars().take(max_chars as usize - 2).collect();
    shortened.push_str("..");
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_glyph_is_three_wide() {
        let sample = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ .,-+=_%/:()<>$!'\"~";
        for c in sample.chars() {
            for row in glyph(c) {
                assert_eq!(row.len(), GLYPH_WIDTH as usize, "glyph {:?}", c);
            }
        }
    }

    #[test]
    fn test_lowercase_matches_uppercase() {
        assert_eq!(glyph('a'), glyph('A'));
        assert_eq!(glyph('z'), glyph('Z'));
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("", 2), 0);
        assert_eq!(text_width("A", 2), 6);
        assert_eq!(text_width("AB", 2), 14);
    }

    #[test]
    fn test_fit_text_truncates() {
        assert_eq!(fit_text("short", 100, 1), "short");
        let fitted = fit_text("a much longer label", 40, 1);
        assert!(text_width(&fitted, 1) <= 40);
        assert!(fitted.ends_with(".."));
    }
}
