/// Keyword lists are truncated to this many entries in advice strings.
const MAX_LISTED: usize = 10;

const GENERAL_ADVICE: [&str; 3] = [
    "Include a Skills section listing core technologies from the JD.",
    "Tailor the resume summary to include 3–5 of the JD's top keywords.",
    "Use exact phrasing from the JD for key responsibilities where it matches your experience.",
];

/// Builds ordered advice: missing keywords, weak keywords, then the fixed items.
pub fn generate_recommendations(missing: &[String], weak: &[String]) -> Vec<String> {
    let mut recs = Vec::with_capacity(GENERAL_ADVICE.len() + 2);

    if !missing.is_empty() {
        recs.push(format!(
            "Add missing technical keywords/skills: {}.",
            first_n(missing)
        ));
    }
    if !weak.is_empty() {
        recs.push(format!(
            "Strengthen mentions of: {} (add measurable impact).",
            first_n(weak)
        ));
    }

    recs.extend(GENERAL_ADVICE.iter().map(|s| s.to_string()));
    recs
}

fn first_n(terms: &[String]) -> String {
    terms
        .iter()
        .take(MAX_LISTED)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_keywords_gives_only_general_advice() {
        let recs = generate_recommendations(&[], &[]);
        assert_eq!(recs.len(), 3);
        assert!(recs[0].contains("Skills section"));
    }

    #[test]
    fn test_missing_then_weak_then_general() {
        let recs = generate_recommendations(&terms(&["kafka", "go"]), &terms(&["docker"]));
        assert_eq!(recs.len(), 5);
        assert_eq!(recs[0], "Add missing technical keywords/skills: kafka, go.");
        assert_eq!(
            recs[1],
            "Strengthen mentions of: docker (add measurable impact)."
        );
        assert!(recs[4].contains("exact phrasing"));
    }

    #[test]
    fn test_weak_only_skips_missing_item() {
        let recs = generate_recommendations(&[], &terms(&["sql"]));
        assert_eq!(recs.len(), 4);
        assert!(recs[0].starts_with("Strengthen mentions of: sql"));
    }

    #[test]
    fn test_lists_capped_at_ten_terms() {
        let missing: Vec<String> = (0..15).map(|i| format!("kw{i}")).collect();
        let recs = generate_recommendations(&missing, &[]);
        assert!(recs[0].contains("kw9"));
        assert!(!recs[0].contains("kw10"));
    }
}
