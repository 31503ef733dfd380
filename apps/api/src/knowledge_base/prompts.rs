// Retrieval query text sent to the knowledge base.
// The service embeds this string and runs vector search on it, so the resume
// itself carries most of the signal; the instruction only frames it.

/// Instruction used when no resume text is attached.
pub const JD_MATCH_INSTRUCTION: &str = "Return the job descriptions that match the user's resume.";

/// Query template with a resume attached. Replace `{resume}` before sending.
pub const JD_MATCH_TEMPLATE: &str =
    "Return the job descriptions that match the user's resume. <resume>{resume}</resume>";

/// Builds the retrieval query, embedding the resume when one was extracted.
pub fn build_jd_match_query(resume: Option<&str>) -> String {
    match resume {
        Some(text) => JD_MATCH_TEMPLATE.replace("{resume}", text),
        None => JD_MATCH_INSTRUCTION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_wraps_resume_in_tags() {
        let query = build_jd_match_query(Some("Rust engineer, 6 years"));
        assert_eq!(
            query,
            "Return the job descriptions that match the user's resume. \
             <resume>Rust engineer, 6 years</resume>"
        );
    }

    #[test]
    fn test_query_without_resume_is_bare_instruction() {
        let query = build_jd_match_query(None);
        assert_eq!(query, JD_MATCH_INSTRUCTION);
        assert!(!query.contains("<resume>"));
    }

    #[test]
    fn test_resume_containing_placeholder_is_inserted_once() {
        let query = build_jd_match_query(Some("literal {resume} token"));
        assert!(query.ends_with("<resume>literal {resume} token</resume>"));
    }
}
