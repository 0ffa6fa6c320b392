/// Levenshtein distance over Unicode scalar values, using two DP rows.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let needle: Vec<char> = b.chars().collect();
    let n = needle.len();
    if n == 0 {
        return a.chars().count();
    }

    // prev[j]: distance between the consumed prefix of `a` and `needle[..j]`
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr: Vec<usize> = vec![0; n + 1];

    for (i, c) in a.chars().enumerate() {
        curr[0] = i + 1;
        for j in 1..=n {
            let cost = if c == needle[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Case-insensitive variant used for ranking against the user's query.
pub fn levenshtein_ignore_case(a: &str, b: &str) -> usize {
    levenshtein(&a.to_lowercase(), &b.to_lowercase())
}
