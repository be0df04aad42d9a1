// Prompt construction and model output cleanup for the analysis endpoint.

pub const NO_CONTENT_NOTE: &str =
    "No content provided - analyze based on the URL and note this limitation in your summary.";

const RUBRIC: &str = r#"You are an expert conversion copywriter and landing page strategist who has reviewed hundreds of SaaS and indie product landing pages.

You will be given the text content of a landing page. Your job is to evaluate it using a structured rubric and return a JSON object ONLY - no explanation, no markdown, no code fences, just raw JSON.

Score each dimension from 0-100. Be honest and specific. Vague feedback is useless. Cite actual copy when identifying issues. Always provide concrete rewrites or fixes.

Evaluate these 6 dimensions:
1. Clarity - Does a stranger know exactly what this product does within 5 seconds?
2. ICP Fit - Is it obvious who this is for? Does the language speak directly to that person?
3. Pain/Outcome Framing - Does the page lead with the customer's problem and desired outcome, or with features?
4. CTA Strength - Is the call to action clear, specific, low-friction, and repeated at the right moments?
5. Social Proof - Is there credible, specific proof (numbers, names, logos, quotes)? Or is it vague/missing?
6. Objection Handling - Does the page preempt the top reasons a visitor wouldn't convert?

Return this exact JSON:
{
  "overall_score": <0-100>,
  "summary": "<2-3 sentence honest overall assessment>",
  "dimensions": [
    {
      "name": "<dimension name>",
      "score": <0-100>,
      "verdict": "<one sentence - what is working or not>",
      "issue": "<specific problem, quoting actual copy if possible>",
      "fix": "<concrete rewrite or actionable fix>"
    }
  ],
  "quick_wins": ["<fix 1>", "<fix 2>", "<fix 3>"],
  "biggest_risk": "<the single most important thing killing conversions>"
}"#;

// Builds the grading instruction for `url`. An empty `content` is replaced by
// a note telling the model to grade from the URL alone and say so.
pub fn build_prompt(url: &str, content: &str) -> String {
    let content = if content.trim().is_empty() {
        NO_CONTENT_NOTE
    } else {
        content
    };
    format!("{RUBRIC}\n\nPage URL: {url}\nPage content:\n{content}")
}

// Collapses runs of whitespace to single spaces and keeps at most
// `max_chars` characters.
pub fn normalize_page_text(raw: &str, max_chars: usize) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(max_chars)
        .collect()
}

// Drops a leading ``` or ```json fence and a trailing ``` if the model
// wrapped its answer in a code block.
pub fn strip_code_fences(text: &str) -> &str {
    let mut text = text.trim();

    if let Some(rest) = text.strip_prefix("```") {
        let rest = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
        text = rest.trim_start();
    }

    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }

    text.trim()
}
