//! Prompt templates for LLM-based resume extraction.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — the target JSON schema appears in exactly
//!    one place, so schema changes cannot drift between providers.
//!
//! 2. **Testability** — unit tests can inspect prompts directly without
//!    calling a model.
//!
//! The schema in the prompt is *advisory*: nothing forces the model to obey
//! it, which is why [`crate::pipeline::normalize`] treats every reply as
//! untrusted input.

/// System message sent with every extraction request.
pub const EXTRACTION_SYSTEM_PROMPT: &str =
    "You are a resume parser. Extract structured information from resumes and return valid JSON only.";

/// The JSON schema the model is asked to produce.
///
/// Mirrors the [`crate::schema::Resume`] record field for field.
const TARGET_SCHEMA: &str = r#"{
  "user_info": {
    "name": "",
    "date_of_birth": "YYYY-MM-DD or empty",
    "gender": "male|female|other",
    "email": "",
    "phone_number": ""
  },
  "addresses": [
    {
      "type": "present|permanent",
      "address": "full address line",
      "post_name": "",
      "post_code": ""
    }
  ],
  "academic_education": [
    {
      "level": "jsc|ssc|hsc|o_level|a_level|bachelors|masters|phd|diploma|ca_qualified|ca_cc|cma_qualified|cma_student|acca|cs|mbbs|bds|llb|llm|other",
      "subject": "",
      "board": "",
      "institute": "",
      "passing_year": "",
      "result": ""
    }
  ],
  "employment": [
    {
      "company_name": "",
      "company_type": "",
      "position": "",
      "joining_date": "YYYY-MM-DD or empty",
      "leaving_date": "YYYY-MM-DD or empty",
      "currently_working": true,
      "responsibility": ""
    }
  ],
  "skills": ["skill one", "skill two"]
}"#;

/// Build the user prompt for a given resume text.
pub fn extraction_prompt(resume_text: &str) -> String {
    format!(
        r#"Extract structured information from the following resume text.
Return the result as a valid JSON object that matches this schema:

{TARGET_SCHEMA}

Guidelines:
- Fill missing values with empty strings.
- Use arrays even if there is only one item.
- Only include address types that appear in the resume.
- Use ISO date format when possible.

Resume text:
{resume_text}

Return only the JSON object, no additional text or explanation."#
    )
}
