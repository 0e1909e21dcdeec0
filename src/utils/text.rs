/// Title-case a string the way `str.title()` does: a cased character that
/// follows another cased character is lower-cased, any other character gets
/// its titlecase form. Uncased characters (digits, punctuation, CJK) end a word.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_cased = false;

    for ch in input.chars() {
        if previous_cased {
            out.extend(ch.to_lowercase());
        } else {
            push_titlecase(ch, &mut out);
        }
        previous_cased = is_cased(ch);
    }

    out
}

/// Digraphs whose titlecase form differs from their uppercase form.
const TITLECASE_DIGRAPHS: &[(char, char)] = &[
    ('\u{01C4}', '\u{01C5}'),
    ('\u{01C5}', '\u{01C5}'),
    ('\u{01C6}', '\u{01C5}'),
    ('\u{01C7}', '\u{01C8}'),
    ('\u{01C8}', '\u{01C8}'),
    ('\u{01C9}', '\u{01C8}'),
    ('\u{01CA}', '\u{01CB}'),
    ('\u{01CB}', '\u{01CB}'),
    ('\u{01CC}', '\u{01CB}'),
    ('\u{01F1}', '\u{01F2}'),
    ('\u{01F2}', '\u{01F2}'),
    ('\u{01F3}', '\u{01F2}'),
];

fn is_cased(ch: char) -> bool {
    ch.is_lowercase() || ch.is_uppercase() || TITLECASE_DIGRAPHS.iter().any(|&(_, t)| t == ch)
}

fn push_titlecase(ch: char, out: &mut String) {
    if let Some(&(_, title)) = TITLECASE_DIGRAPHS.iter().find(|&&(c, _)| c == ch) {
        out.push(title);
        return;
    }

    // Multi-char expansions (ß, ligatures) keep only their head upper-case.
    let mut upper = ch.to_uppercase();
    if let Some(head) = upper.next() {
        out.push(head);
    }
    for rest in upper {
        out.extend(rest.to_lowercase());
    }
}

/// Form flag to boolean. Any non-empty choice counts as set, so "No" is true.
pub fn flag(value: &str) -> bool {
    !value.is_empty()
}

pub fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}
