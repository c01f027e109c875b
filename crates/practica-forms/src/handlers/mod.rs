pub mod choice;
pub mod complaint;
pub mod date;
pub mod file_upload;
pub mod numeric;
pub mod text;
pub mod yes_no;

use std::collections::HashSet;

/// Problems with a list of selectable ids: empty list, blank ids, duplicates.
pub(crate) fn check_selectable_ids<'a>(
    kind: &str,
    ids: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let mut problems = Vec::new();
    let mut seen = HashSet::new();
    let mut count = 0usize;

    for id in ids {
        count += 1;
        if id.trim().is_empty() {
            problems.push(format!("{kind} values must not be blank"));
        } else if !seen.insert(id) {
            problems.push(format!("duplicate {kind} value '{id}'"));
        }
    }

    if count == 0 {
        problems.push(format!("at least one {kind} is required"));
    }
    problems
}

/// Whether `value` lands on the `step` grid starting at `min`.
pub(crate) fn on_step(value: f64, min: f64, step: f64) -> bool {
    let offset = value - min;
    let remainder = offset % step;
    // Allow floating point tolerance
    remainder < 1e-9 || (step - remainder) < 1e-9
}
