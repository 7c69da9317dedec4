//! Turning counts and lists into English fragments for the report body.

/// Joins items into running prose: `A`, `A and B`, `A, B, and C` (Oxford
/// comma before the last item).
///
/// Panics on an empty slice; callers guarantee at least one item.
pub fn list_text<S: AsRef<str>>(items: &[S]) -> String {
    assert!(!items.is_empty(), "list_text needs at least one item");
    match items {
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        _ => {
            let (last, rest) = items.split_last().unwrap();
            let rest: Vec<&str> = rest.iter().map(AsRef::as_ref).collect();
            format!("{}, and {}", rest.join(", "), last.as_ref())
        }
    }
}

/// `"no modules were"` / `"one module was"` / `"{n} modules were"`.
pub fn plural_modules(count: usize) -> String {
    match count {
        0 => "no modules were".to_string(),
        1 => "one module was".to_string(),
        n => format!("{} modules were", n),
    }
}
