//! Resume synthesis: summary extraction and rewriting, per-role achievement
//! bullets, and the full optimized resume document.

use std::sync::OnceLock;

use regex::Regex;

use crate::matching::text::tokenize;
use crate::matching::Keyword;

const MAX_MATCHED_SKILLS: usize = 6;
const MAX_BULLETS: usize = 5;
const SKILLS_IN_SECTION: usize = 20;
const FALLBACK_ROLE_LINES: usize = 6;
const FALLBACK_SKILLS: &str = "relevant technologies";
const FALLBACK_TOOL: &str = "relevant tools";

fn summary_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(professional summary|summary|profile)[:\n\r]+(.{20,300})")
            .expect("summary pattern is valid")
    })
}

fn experience_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)experience|professional experience").expect("experience pattern is valid")
    })
}

/// Percent, currency, multiplier and "reduced ... N%" patterns, in collection order.
fn metric_regexes() -> &'static [Regex; 4] {
    static RE: OnceLock<[Regex; 4]> = OnceLock::new();
    RE.get_or_init(|| {
        [
            Regex::new(r"\b\d{1,3}%").expect("percent pattern is valid"),
            Regex::new(r"\$\s?\d+[\d,.]*[kKmM]?").expect("currency pattern is valid"),
            Regex::new(r"\b\d+(?:\.\d+)?x\b").expect("multiplier pattern is valid"),
            Regex::new(r"(?i)reduced[^.\n]{0,60}?\b\d{1,3}%").expect("reduction pattern is valid"),
        ]
    })
}

/// Finds literal metrics in `text`, grouped by pattern then by position.
pub fn detect_metrics(text: &str) -> Vec<String> {
    metric_regexes()
        .iter()
        .flat_map(|re| re.find_iter(text).map(|m| m.as_str().to_string()))
        .collect()
}

/// Returns the content after a summary/profile header, or the first two
/// non-empty lines joined by a space, or "".
pub fn extract_summary_section(resume: &str) -> String {
    if let Some(caps) = summary_regex().captures(resume) {
        if let Some(content) = caps.get(2) {
            return content.as_str().trim().to_string();
        }
    }

    non_empty_lines(resume)
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn generate_summary(keywords: &[Keyword], existing_summary: &str) -> String {
    if !existing_summary.is_empty() {
        let skills = terms(keywords, 5).join(" ");
        format!("{existing_summary} Key skills: {skills}.")
    } else {
        format!(
            "Experienced professional with expertise in {}. Proven track record delivering results in related responsibilities.",
            terms(keywords, 6).join(", ")
        )
    }
}

/// Produces 1–5 achievement-oriented bullets for one role.
///
/// The first line of `role_text` is the title; the rest is the body. A
/// single-line role uses its only line as the body.
pub fn generate_bullets_for_role(role_text: &str, keywords: &[Keyword]) -> Vec<String> {
    let lines: Vec<&str> = non_empty_lines(role_text).collect();
    let body = if lines.len() > 1 {
        lines[1..].join(" ")
    } else {
        lines.join(" ")
    };

    let body_tokens = tokenize(&body);
    let skills: Vec<&str> = keywords
        .iter()
        .filter(|k| body_tokens.contains(&k.term))
        .map(|k| k.term.as_str())
        .take(MAX_MATCHED_SKILLS)
        .collect();

    let metrics = detect_metrics(&body);
    let metric = metrics.first();

    let mut bullets = Vec::with_capacity(MAX_BULLETS);

    match skills.first() {
        Some(first) => {
            bullets.push(match metric {
                Some(m) => format!(
                    "Improved {first}-related processes, {m}, delivering measurable improvements."
                ),
                None => format!(
                    "Improved {first}-related process, resulting in measurable improvements (e.g., reduced time or cost by X%)."
                ),
            });
            if let Some(second) = skills.get(1) {
                let third = skills.get(2).copied().unwrap_or("related tools");
                bullets.push(format!(
                    "Optimized system performance using {second} and {third}, achieving improved scalability and reliability."
                ));
            }
        }
        None => bullets.push(
            "Led cross-functional initiatives to deliver key business outcomes and improve processes."
                .to_string(),
        ),
    }

    let skills_list = if skills.is_empty() {
        FALLBACK_SKILLS.to_string()
    } else {
        skills.iter().take(4).copied().collect::<Vec<_>>().join(", ")
    };
    bullets.push(format!(
        "Applied {skills_list} to deliver on core responsibilities and exceed stakeholder expectations."
    ));

    let tool = skills.first().copied().unwrap_or(FALLBACK_TOOL);
    bullets.push(match metric {
        Some(m) => format!(
            "Automated routine workflows and reporting using {tool}, reducing manual effort and errors; example impact: {m}."
        ),
        None => format!(
            "Automated routine workflows and reporting using {tool}, reducing manual effort and errors."
        ),
    });

    bullets.truncate(MAX_BULLETS);
    bullets
}

/// Builds the SUMMARY / SKILLS / EXPERIENCE document.
pub fn generate_improved_resume(keywords: &[Keyword], resume_text: &str) -> String {
    let summary = generate_summary(keywords, &extract_summary_section(resume_text));
    let skills = terms(keywords, SKILLS_IN_SECTION).join(", ");

    let mut out = vec![
        "SUMMARY".to_string(),
        summary,
        String::new(),
        "SKILLS".to_string(),
        skills,
        String::new(),
        "EXPERIENCE".to_string(),
    ];

    for role in split_roles(resume_text) {
        let title = role.lines().next().unwrap_or("Role");
        out.push(format!("- {title}"));
        for bullet in generate_bullets_for_role(&role, keywords) {
            out.push(format!("  - {bullet}"));
        }
    }

    out.join("\n")
}

/// Roles are blank-line-separated blocks after the first experience header.
/// Without any, the first few non-empty lines form a single synthetic role.
fn split_roles(resume_text: &str) -> Vec<String> {
    let mut roles = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut in_experience = false;

    for line in resume_text.lines() {
        if experience_regex().is_match(line) {
            in_experience = true;
            continue;
        }
        if !in_experience {
            continue;
        }
        if line.trim().is_empty() {
            if !current.is_empty() {
                roles.push(current.join("\n"));
                current.clear();
            }
            continue;
        }
        current.push(line);
    }
    if !current.is_empty() {
        roles.push(current.join("\n"));
    }

    if roles.is_empty() {
        let first_lines: Vec<&str> = resume_text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .take(FALLBACK_ROLE_LINES)
            .collect();
        roles.push(first_lines.join("\n"));
    }

    roles
}

fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}

fn terms(keywords: &[Keyword], n: usize) -> Vec<&str> {
    keywords.iter().take(n).map(|k| k.term.as_str()).collect()
}
