// All LLM prompt constants for the story-generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for outline generation. `call_json` appends the JSON-only
/// output rules; this only describes the payload shape.
pub const OUTLINE_SYSTEM: &str = "You are a children's picture-book author \
    planning a story arc across a fixed number of pages. \
    Respond with a JSON array of page objects.";

/// Outline prompt template.
/// Replace: {age_instruction}, {page_count}, {child_names}, {story_type}
pub const OUTLINE_PROMPT_TEMPLATE: &str = r#"{age_instruction}

Plan a {page_count}-page children's storybook.

Heroes of the story: {child_names}
Story type: {story_type}

Return a JSON ARRAY with exactly {page_count} entries:
[
  {
    "page_number": 1,
    "summary": "One or two sentences describing what happens on this page"
  }
]

HARD RULES:
1. page_number values MUST be exactly 1 through {page_count}, each used once
2. Each summary is a plan for ONE page — a single scene or beat
3. The arc must have a beginning, a gentle challenge, and a happy resolution
4. The heroes appear by name throughout"#;

/// System prompt for writing one page.
pub const PAGE_WRITE_SYSTEM: &str = "You are a children's picture-book author \
    writing the body text of a single page. \
    Respond with a single JSON object.";

/// Page-writing prompt template.
/// Replace: {age_instruction}, {page_number}, {page_count}, {summary},
///          {outline_json}, {child_names}, {story_type}, {min_words}, {max_words}
pub const PAGE_WRITE_PROMPT_TEMPLATE: &str = r#"{age_instruction}

Write the body text for page {page_number} of {page_count} of a children's
storybook ({story_type}, starring {child_names}).

THIS PAGE'S PLAN:
{summary}

FULL STORY OUTLINE (for continuity — write ONLY this page):
{outline_json}

Return a JSON object:
{
  "text": "The full body text of the page"
}

HARD RULES:
1. Between {min_words} and {max_words} words — count carefully
2. Cover only this page's plan; do not run ahead of the outline
3. Simple sentences suited to a child being read to
4. No headings, no quotation of the page number, prose only"#;

/// System prompt for the expand/compress adjustment calls.
pub const ADJUST_SYSTEM: &str = "You are a children's picture-book editor \
    adjusting the length of one page without changing its story. \
    Respond with a single JSON object with a \"text\" field.";

/// Expand prompt — the page came in under the reading-level band.
/// Replace: {page_text}, {word_count}, {min_words}, {max_words}
pub const EXPAND_PROMPT_TEMPLATE: &str = r#"This storybook page has {word_count} words but needs between {min_words} and {max_words}.

CURRENT PAGE TEXT:
{page_text}

Lengthen it by adding sensory detail and dialogue — do NOT add new plot
events. Keep every existing story beat. Return JSON: {"text": "..."}"#;

/// Compress prompt — the page came in over the reading-level band.
/// Replace: {page_text}, {word_count}, {min_words}, {max_words}
pub const COMPRESS_PROMPT_TEMPLATE: &str = r#"This storybook page has {word_count} words but needs between {min_words} and {max_words}.

CURRENT PAGE TEXT:
{page_text}

Shorten it by tightening sentences — do NOT drop any story beat.
Return JSON: {"text": "..."}"#;

/// Illustration prompt template for the image provider.
/// Replace: {summary}, {story_type}, {child_names}
pub const IMAGE_PROMPT_TEMPLATE: &str = "Children's picture-book illustration, \
    soft watercolor style, warm colors, no text or lettering anywhere. \
    Story type: {story_type}. Heroes: {child_names}. \
    Scene: {summary}";
