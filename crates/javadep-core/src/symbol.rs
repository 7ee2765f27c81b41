//! Splitting fully qualified Javadoc symbol names.
//!
//! Member labels carry their parameter list, and parameter types may be
//! qualified themselves (`a.B.m(java.lang.String)`), so only dots outside
//! parentheses separate name segments.

/// Split a symbol at its last top-level dot into `(owner, local)`.
///
/// `org.bukkit.Bukkit.getServer()` → `(Some("org.bukkit.Bukkit"), "getServer()")`
pub fn split_symbol(symbol: &str) -> (Option<&str>, &str) {
    let mut depth = 0usize;
    let mut split_at = None;
    for (i, c) in symbol.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => split_at = Some(i),
            _ => {}
        }
    }
    match split_at {
        Some(i) => (Some(&symbol[..i]), &symbol[i + 1..]),
        None => (None, symbol),
    }
}

/// Final name segment, used as the lookup key into detail-page sections.
pub fn local_name(symbol: &str) -> &str {
    split_symbol(symbol).1
}

/// Everything before the final segment; an undotted symbol is its own class path.
pub fn class_path(symbol: &str) -> &str {
    split_symbol(symbol).0.unwrap_or(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_split() {
        assert_eq!(
            split_symbol("org.bukkit.Bukkit.getServer()"),
            (Some("org.bukkit.Bukkit"), "getServer()")
        );
    }

    #[test]
    fn qualified_parameters_stay_whole() {
        assert_eq!(
            local_name("org.bukkit.Bukkit.getOfflinePlayer(java.lang.String)"),
            "getOfflinePlayer(java.lang.String)"
        );
        assert_eq!(
            class_path("org.bukkit.Bukkit.getOfflinePlayer(java.lang.String)"),
            "org.bukkit.Bukkit"
        );
    }

    #[test]
    fn nested_class_member() {
        assert_eq!(local_name("outer.inner.member"), "member");
        assert_eq!(class_path("outer.inner.member"), "outer.inner");
    }

    #[test]
    fn undotted_symbol() {
        assert_eq!(split_symbol("Foo"), (None, "Foo"));
        assert_eq!(class_path("Foo"), "Foo");
        assert_eq!(local_name("Foo"), "Foo");
    }
}
