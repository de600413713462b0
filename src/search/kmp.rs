/// Longest proper prefix of `pattern[..=i]` that is also its suffix, for every `i`.
pub fn failure_table(pattern: &[u8]) -> Vec<usize> {
    let mut lps = vec![0; pattern.len()];
    let mut k = 0;
    for i in 1..pattern.len() {
        while k > 0 && pattern[i] != pattern[k] {
            k = lps[k - 1];
        }
        if pattern[i] == pattern[k] {
            k += 1;
        }
        lps[i] = k;
    }
    lps
}

/// Knuth-Morris-Pratt. The text index only advances on a match or when the
/// pattern index is already at 0, which keeps the scan linear.
pub fn kmp(text: &[u8], pattern: &[u8]) -> Option<usize> {
    let (n, m) = (text.len(), pattern.len());
    if m == 0 || n == 0 || m > n {
        return None;
    }

    let lps = failure_table(pattern);
    let (mut i, mut j) = (0, 0);
    while i < n {
        if text[i] == pattern[j] {
            i += 1;
            j += 1;
            if j == m {
                return Some(i - j);
            }
        } else if j > 0 {
            j = lps[j - 1];
        } else {
            i += 1;
        }
    }
    None
}
