//! Prompt assembly and post-processing for AI code assist.
//!
//! The HTTP client lives in the API crate; everything here is pure text
//! handling so it can be tested without a provider.

/// Strip a Markdown code fence wrapping the whole completion.
///
/// Handles ```` ```html ```` and bare ```` ``` ```` openers. The opener is
/// only removed when followed by a newline and the closer only when preceded
/// by one; anything else is returned untouched.
pub fn strip_code_fence(content: &str) -> &str {
    let inner = if let Some(rest) = content.strip_prefix("```html") {
        rest.strip_prefix('\n').unwrap_or(content)
    } else if let Some(rest) = content.strip_prefix("```") {
        rest.strip_prefix('\n').unwrap_or(content)
    } else {
        return content;
    };
    inner.strip_suffix("\n```").unwrap_or(inner)
}

/// Instructions sent as the system message of every generation request.
pub const SYSTEM_PROMPT: &str = "You are an expert web developer and UI designer. \
Your task is to generate or modify HTML/Tailwind CSS code based on the user's request.

If 'currentCode' is provided, you should modify it according to the user's instructions. \
If 'currentCode' is not provided, you should generate a new page from scratch.

Return ONLY the HTML code. Do not include markdown backticks or explanations. \
Ensure the code is a complete HTML fragment or full page as appropriate, but primarily focus \
on the body content or the specific component requested. \
If the user asks for a full page, include <html>, <head>, <body> tags. \
Use Tailwind CSS for styling.";

/// Build the user message, embedding the current editor contents when present.
pub fn user_message(prompt: &str, current_code: Option<&str>) -> String {
    match current_code.filter(|c| !c.is_empty()) {
        Some(code) => format!("Current Code:\n{code}\n\nUser Request: {prompt}"),
        None => format!("User Request: {prompt}"),
    }
}

/// Keep model ids containing any allowed keyword (case-insensitive) and move
/// the default model to the front. Relative order is otherwise preserved.
pub fn select_models(ids: Vec<String>, keywords: &[String], default_model: &str) -> Vec<String> {
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    let mut selected: Vec<String> = ids
        .into_iter()
        .filter(|id| {
            let id = id.to_lowercase();
            keywords.iter().any(|k| id.contains(k.as_str()))
        })
        .collect();
    selected.sort_by_key(|id| id != default_model);
    selected
}
