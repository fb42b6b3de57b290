use std::ops::Range;

/// Case-insensitive literal search.
///
/// Returns the char range (not byte range) of the first occurrence of
/// `needle` in `haystack`. Case folding uses `char::to_lowercase`, so a
/// folded needle may span part of a multi-char expansion; the range then
/// covers every source char it touches.
#[must_use]
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return None;
    }

    let folded: Vec<(char, usize)> = haystack
        .chars()
        .enumerate()
        .flat_map(|(index, ch)| ch.to_lowercase().map(move |lower| (lower, index)))
        .collect();

    folded
        .windows(needle.len())
        .find(|window| window.iter().map(|(ch, _)| ch).eq(needle.iter()))
        .map(|window| {
            let start = window[0].1;
            let end = window[window.len() - 1].1 + 1;
            start..end
        })
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    find_ignore_case(haystack, needle).is_some()
}
