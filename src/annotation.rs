/// Splits an annotated header into its bare field name and modifier tokens.
///
/// Modifiers are trailing `:name` or `:name(param)` suffixes; stripping
/// proceeds right to left, testing the simple form before the parametrized
/// one at every step, so the returned tokens are ordered rightmost-suffix
/// first. `"dept:item_link(dept_id):yesno"` yields
/// `("dept", ["yesno", "item_link(dept_id)"])`; a header with no recognized
/// suffix comes back unchanged with no tokens.
pub fn split_annotations(header: &str) -> (String, Vec<String>) {
    let mut rest = header;
    let mut tokens = Vec::new();
    loop {
        let at = match simple_suffix(rest).or_else(|| parametrized_suffix(rest)) {
            Some(at) => at,
            None => break,
        };
        tokens.push(rest[at + 1..].to_string());
        rest = &rest[..at];
    }
    (rest.to_string(), tokens)
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_lowercase() || b == b'_'
}

// Position of the `:` opening a trailing `:[a-z_]+` suffix, if any.
fn simple_suffix(s: &str) -> Option<usize> {
    let b = s.as_bytes();
    let mut i = s.len();
    while i > 0 && is_name_byte(b[i - 1]) {
        i -= 1;
    }
    (i < s.len() && i > 0 && b[i - 1] == b':').then(|| i - 1)
}

// Position of the `:` opening a trailing `:[a-z_]+([a-z_]+)` suffix, if any.
fn parametrized_suffix(s: &str) -> Option<usize> {
    let b = s.as_bytes();
    let mut i = s.len();
    if i == 0 || b[i - 1] != b')' {
        return None;
    }
    i -= 1;
    let param_end = i;
    while i > 0 && is_name_byte(b[i - 1]) {
        i -= 1;
    }
    if i == param_end || i == 0 || b[i - 1] != b'(' {
        return None;
    }
    i -= 1;
    let name_end = i;
    while i > 0 && is_name_byte(b[i - 1]) {
        i -= 1;
    }
    if i == name_end || i == 0 || b[i - 1] != b':' {
        return None;
    }
    Some(i - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn split(header: &str) -> (String, Vec<String>) {
        split_annotations(header)
    }

    #[test]
    fn plain_header_passes_through() {
        assert_eq!(split("amount"), ("amount".into(), vec![]));
    }

    #[test]
    fn single_simple_modifier() {
        assert_eq!(split("amount:number"), ("amount".into(), vec!["number".into()]));
    }

    #[test]
    fn single_parametrized_modifier() {
        assert_eq!(
            split("dept:item_link(dept_id)"),
            ("dept".into(), vec!["item_link(dept_id)".into()])
        );
    }

    #[test]
    fn chained_modifiers_come_out_rightmost_first() {
        assert_eq!(
            split("dept:item_link(dept_id):yesno"),
            ("dept".into(), vec!["yesno".into(), "item_link(dept_id)".into()])
        );
    }

    #[test]
    fn unrecognized_suffixes_stay_in_the_field() {
        // Uppercase, digits and broken parens don't match either form.
        assert_eq!(split("a:Number"), ("a:Number".into(), vec![]));
        assert_eq!(split("a:n1"), ("a:n1".into(), vec![]));
        assert_eq!(split("a:link(x"), ("a:link(x".into(), vec![]));
        assert_eq!(split("a:link()"), ("a:link()".into(), vec![]));
    }

    #[test]
    fn stripping_stops_at_first_non_modifier() {
        // "a:b c" keeps its colon; only the trailing suffix is a modifier.
        assert_eq!(split("a:b c:yesno"), ("a:b c".into(), vec!["yesno".into()]));
    }

    #[test]
    fn annotation_only_header_leaves_empty_field() {
        assert_eq!(split(":number"), ("".into(), vec!["number".into()]));
        assert_eq!(split(""), ("".into(), vec![]));
    }
}
