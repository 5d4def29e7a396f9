/// Lowercases, strips Latin diacritics via a fixed substitution table, and
/// drops everything but letters/digits/spaces. Hand-rolled rather than
/// pulling in a normalization crate: the accent set needed here is small and
/// fixed (the upstream producer only ever sends Portuguese/Spanish team and
/// league names), matching the original's own fixed-replacer approach.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.to_lowercase().chars() {
        let replaced = strip_diacritic(ch);
        if replaced.is_alphanumeric() || replaced == ' ' {
            out.push(replaced);
        }
    }
    out
}

fn strip_diacritic(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

/// Levenshtein edit distance via the standard DP matrix, operating on
/// Unicode scalar values rather than bytes.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Word similarity: exact match after normalization scores 1.0, containment
/// scores 0.8, otherwise `1 - levenshtein(a,b) / max(|a|,|b|)`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let na = normalize(a);
    let nb = normalize(b);

    if na == nb {
        return 1.0;
    }
    if !na.is_empty() && !nb.is_empty() && (na.contains(&nb) || nb.contains(&na)) {
        return 0.8;
    }

    let max_len = na.chars().count().max(nb.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    1.0 - (levenshtein(&na, &nb) as f64 / max_len as f64)
}

/// True if `query` matches `candidate` by substring containment or a
/// similarity score ≥ `threshold`, after normalization.
pub fn matches(candidate: &str, query: &str, threshold: f64) -> bool {
    if query.is_empty() {
        return true;
    }
    let normalized_candidate = normalize(candidate);
    let normalized_query = normalize(query);
    if normalized_candidate.contains(&normalized_query) {
        return true;
    }
    similarity(candidate, query) >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_diacritics_and_punctuation() {
        assert_eq!(normalize("São Paulo!"), "sao paulo");
    }

    #[test]
    fn similarity_exact_match() {
        assert_eq!(similarity("Flamengo", "flamengo"), 1.0);
    }

    #[test]
    fn similarity_containment() {
        assert_eq!(similarity("São Paulo", "sao paulo"), 1.0);
        assert_eq!(similarity("São Paulo FC", "sao paulo"), 0.8);
    }

    #[test]
    fn search_matches_on_substring_after_normalization() {
        assert!(matches("São Paulo", "sao paulo", 0.4));
    }
}
