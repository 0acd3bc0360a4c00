pub(crate) const GREEN_CHECK: &str = "\u{2705}";
pub(crate) const RED_X: &str = "\u{274c}";

/// "1 file", "2 files"
pub(crate) fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
