//! Phone numbers are kept as at most eight digits and displayed grouped
//! as `DDD-DD-DD-D`.

pub const MAX_DIGITS: usize = 8;

const GROUPS: [usize; 4] = [3, 2, 2, 1];

/// Drops every non-digit character and keeps the first [`MAX_DIGITS`] digits.
pub fn extract_digits(input: &str) -> String {
    input.chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DIGITS)
        .collect()
}

/// Formats raw input into the dashed display form. Partial trailing groups
/// are emitted as they are, without a trailing dash.
pub fn format(input: &str) -> String {
    let digits = extract_digits(input);
    let mut parts = Vec::with_capacity(GROUPS.len());
    let mut rest = digits.as_str();

    for len in GROUPS {
        if rest.is_empty() {
            break;
        }
        let at = len.min(rest.len());
        let (group, tail) = rest.split_at(at);
        parts.push(group);
        rest = tail;
    }

    parts.join("-")
}

/// Whether the input carries a full eight-digit number.
pub fn is_complete(input: &str) -> bool {
    extract_digits(input).len() == MAX_DIGITS
}
