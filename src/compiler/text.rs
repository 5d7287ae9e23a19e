/// Re-indents a block of generated code.
///
/// Outer blank lines are dropped, the common leading indentation (ASCII
/// spaces and tabs) is removed and every non-empty line is prefixed with
/// `width` spaces. No trailing newline is added.
pub fn indent_block(code: &str, width: usize) -> String {
    let trimmed = code.trim_matches('\n');
    if trimmed.trim().is_empty() {
        return String::new();
    }

    let lines: Vec<&str> = trimmed.lines().collect();
    let common = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    let pad = " ".repeat(width);
    lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, &line[common..])
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The variable name standing for a data pin's value in generated code.
///
/// Plain alphanumeric ids and pins give `_<node>_<pin>`. Anything else is
/// escaped (`_` plus six hex digits per character) and the halves are joined
/// with `__`, so distinct pairs never share a name.
pub fn pin_var_name(node_id: &str, pin_name: &str) -> String {
    if is_plain_identifier(node_id) && is_plain_identifier(pin_name) {
        format!("_{}_{}", node_id, pin_name)
    } else {
        format!("_{}__{}", escape_identifier(node_id), escape_identifier(pin_name))
    }
}

fn is_plain_identifier(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(|c| c.is_ascii_alphanumeric())
}

fn escape_identifier(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_string()
            } else {
                format!("_{:06x}", c as u32)
            }
        })
        .collect()
}
