//! Display-name derivation.
//!
//! Commands declare their own names; the registry normalises them with
//! [`display_name`] so that names written in type style
//! (`"&mut commands::IpCommand"`) and plain style (`"ip"`) both list
//! cleanly. The module path is kept, so same-named types from different
//! modules stay distinct. The function is pure and deterministic.

/// Suffix conventionally carried by command type names.
const COMMAND_SUFFIX: &str = "Command";

/// Reference and pointer decorations, longest first.
const DECORATIONS: [&str; 5] = ["&mut ", "*const ", "*mut ", "&", "*"];

/// Normalise a declared command name.
///
/// Strips reference/pointer decoration and a trailing `Command` suffix
/// from the last path segment; the `::` module path is kept. If the last
/// segment is nothing but the suffix, the undecorated name is returned
/// instead (so `"Command"` stays `"Command"`).
pub fn display_name(declared: &str) -> String {
    let mut name = declared.trim();
    while let Some(rest) = DECORATIONS.iter().find_map(|d| name.strip_prefix(d)) {
        name = rest.trim_start();
    }
    match name.strip_suffix(COMMAND_SUFFIX) {
        Some(stem) if !stem.is_empty() && !stem.ends_with("::") => stem.to_string(),
        _ => name.to_string(),
    }
}
