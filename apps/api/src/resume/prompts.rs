// Prompt templates for the resume pipelines.
// Placeholders are substituted with str::replace; see extraction.rs / critique.rs.

/// Structured extraction prompt. Replace `{template}` then `{cv_text}`,
/// and `{json_only}` with the shared JSON-only instruction.
pub const EXTRACTION_PROMPT_TEMPLATE: &str = r#"Below is the text of a CV. Extract the important information from it as JSON.

CV text:
{cv_text}

Extract following this JSON template. Leave a field empty if the CV does not contain it, keep the value formats used in the template, include all information present and do not add or drop anything:
{template}

{json_only}"#;

/// Critique instruction block. Replace `{application}` with `ApplicationContext::describe()`.
pub const CRITIQUE_PROMPT_TEMPLATE: &str = r#"Review the CV below and suggest improvements:
1. List the strengths of the CV.
2. Comment on its visual presentation (layout, formatting, readability) and suggest improvements if needed.
3. Assess whether the content fits the application below, naming the specific parts that need improvement.
Present the answer under clear, easy-to-read headings.

Target application:
{application}

The candidate's CV follows, both as extracted content and as page images:
"#;

/// Heading for the text part carrying the structured extraction.
pub const EXTRACTED_CONTENT_HEADING: &str = "CV content (extracted):\n";
