/// Colours offered by the level colour picker, in picker order.
pub const COLOR_PALETTE: [&str; 20] = [
    "#64748b", "#6b7280", "#78716c", "#71717a", "#ef4444", "#f97316", "#f59e0b", "#eab308",
    "#84cc16", "#22c55e", "#10b981", "#14b8a6", "#06b6d4", "#3b82f6", "#6366f1", "#8b5cf6",
    "#a855f7", "#d946ef", "#ec4899", "#f43f5e",
];

/// Colour given to a band that was stored without one.
pub const FALLBACK_COLOR: &str = "#64748b";

/// Pick the colour for a level added to a list of `level_count` levels.
///
/// Walks the palette starting at `level_count % len` and returns the first colour no existing
/// level uses; when every colour is taken, the starting colour is reused.
pub fn next_unused_color<'a, I>(palette: &[String], used: I, level_count: usize) -> Option<String>
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    if palette.is_empty() {
        return None;
    }
    let start = level_count % palette.len();
    let pick = (0..palette.len())
        .map(|offset| &palette[(start + offset) % palette.len()])
        .find(|candidate| {
            !used
                .clone()
                .into_iter()
                .any(|u| u.eq_ignore_ascii_case(candidate))
        })
        .unwrap_or(&palette[start]);
    Some(pick.clone())
}

/// True for `#rrggbb` / `#rrggbbaa` hex tokens.
pub fn is_hex_color(token: &str) -> bool {
    let Some(hex) = token.trim().strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
#[path = "../../tests/unit/editor/palette.rs"]
mod tests;
