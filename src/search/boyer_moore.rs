/// Boyer-Moore with the bad-character rule only.
///
/// `last[b]` holds one past the last position of byte `b` in the pattern,
/// so 0 means "absent" and the shift `m - min(j, last[b])` never underflows.
pub fn boyer_moore(text: &[u8], pattern: &[u8]) -> Option<usize> {
    let (n, m) = (text.len(), pattern.len());
    if m == 0 || n == 0 || m > n {
        return None;
    }

    let mut last = [0usize; 256];
    for (k, &b) in pattern.iter().enumerate() {
        last[b as usize] = k + 1;
    }

    let mut i = m - 1;
    let mut j = m - 1;
    while i < n {
        if text[i] == pattern[j] {
            if j == 0 {
                return Some(i);
            }
            // i >= j holds for the whole comparison, so neither wraps
            i -= 1;
            j -= 1;
        } else {
            i += m - j.min(last[text[i] as usize]);
            j = m - 1;
        }
    }
    None
}
