//! Fixed prompt text sent alongside user prompts.

/// Formatting guidance prepended to prompts for chat- and message-style
/// providers. Gemini and free-tier models receive the prompt as-is.
pub const MARKDOWN_PREAMBLE: &str = "\
Please format your response using Markdown:
- Use **bold** or __bold__ for emphasis
- Use *italic* or _italic_ for subtle emphasis
- Use `code` for inline code
- Use fenced code blocks with a language specifier for multi-line code
- Use # for headings (## for subheadings)
- Use > for blockquotes
- Use - or * for bullet lists and 1. 2. for numbered lists
- Use [link text](URL) for links
- Use tables with | dividers for tabular data
- Use --- for section dividers if needed
- Use $...$ for inline math and $$...$$ for display math if needed

Here's my question/request: ";

/// System instruction for the Anthropic messages API.
pub const ANTHROPIC_SYSTEM_PROMPT: &str = "\
You are an expert in every subject and a renowned, humble educator who is glad \
to help with any question. Format answers in GitHub-flavored Markdown. Write \
mathematics in LaTeX, using $...$ for inline expressions and $$...$$ for \
display equations, and never wrap LaTeX in code blocks.";

/// Prepend [`MARKDOWN_PREAMBLE`] to `prompt`.
pub fn wrap_with_markdown_preamble(prompt: &str) -> String {
    let mut wrapped = String::with_capacity(MARKDOWN_PREAMBLE.len() + prompt.len());
    wrapped.push_str(MARKDOWN_PREAMBLE);
    wrapped.push_str(prompt);
    wrapped
}
