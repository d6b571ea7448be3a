// LLM prompt constants for bullet rewriting.

/// System prompt for the resume-writing assistant.
pub const BULLET_REWRITE_SYSTEM: &str = "You are a helpful resume writer.";

/// Bullet rewrite prompt template. Replace `{jd}` and `{role_text}` before sending.
pub const BULLET_REWRITE_PROMPT_TEMPLATE: &str = "You are a resume-writing assistant. \
Given a role description and the job description, rewrite the role as 3-4 concise, \
achievement-focused resume bullets. Include measurable results if present. \
Output each bullet on a separate line without numbering.

Job description:
{jd}

Role text:
{role_text}

Bullets:
";

pub fn build_bullet_rewrite_prompt(jd: &str, role_text: &str) -> String {
    BULLET_REWRITE_PROMPT_TEMPLATE
        .replace("{jd}", jd)
        .replace("{role_text}", role_text)
}
