/// Resolves a recommendation icon tag to a terminal glyph. The tag set
/// is open on the wire, so unknown tags fall back to the cup.
pub fn glyph(tag: &str) -> &'static str {
    match tag {
        "lemon" => "\u{1f34b}",
        "chocolate" => "\u{1f36b}",
        "salt" => "\u{1f9c2}",
        "cactus" => "\u{1f335}",
        "water" => "\u{1f4a7}",
        "muscle" => "\u{1f4aa}",
        "ghost" => "\u{1f47b}",
        "magic" => "\u{2728}",
        "fix" => "\u{1f527}",
        _ => "\u{2615}",
    }
}

/// Single-character scatter-plot marker per taste tag, with an explicit
/// default for anything unrecognized.
pub fn taste_marker(taste: Option<&str>) -> char {
    match taste.map(|t| t.to_ascii_lowercase()).as_deref() {
        Some("sour") | Some("acidic") => 's',
        Some("bitter") => 'b',
        Some("balanced") => 'O',
        Some("weak") => 'w',
        Some("strong") => 'S',
        Some("salty") => 'n',
        Some("hollow") => 'h',
        Some("astringent") => 'a',
        Some("muddled") => 'm',
        _ => '?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tag_gets_default_glyph() {
        assert_eq!(glyph("magic"), "\u{2728}");
        assert_eq!(glyph("no-such-tag"), "\u{2615}");
        assert_eq!(glyph(""), "\u{2615}");
    }

    #[test]
    fn unknown_taste_gets_default_marker() {
        assert_eq!(taste_marker(Some("balanced")), 'O');
        assert_eq!(taste_marker(Some("SOUR")), 's');
        assert_eq!(taste_marker(Some("mystery")), '?');
        assert_eq!(taste_marker(None), '?');
    }
}
