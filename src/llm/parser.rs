use crate::models::QualitativeResult;

/// Outcome of checking one model response against the qualitative schema.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResponse {
    Valid(QualitativeResult),
    Malformed { raw: String, reason: MalformedReason },
}

#[derive(Debug, Clone, PartialEq)]
pub enum MalformedReason {
    /// The text is not JSON at all.
    NotJson(String),
    /// Well-formed JSON with a wrong field type or an out-of-range multiplier.
    Schema(String),
}

/// Strip fences, isolate the JSON object, then check syntax and schema as two separate steps.
pub fn parse_qualitative_response(raw: &str) -> ParsedResponse {
    let candidate = extract_json(raw).unwrap_or_else(|| raw.trim());

    let malformed = |reason| ParsedResponse::Malformed {
        raw: raw.to_string(),
        reason,
    };

    let value: serde_json::Value = match serde_json::from_str(candidate) {
        Ok(value) => value,
        Err(e) => return malformed(MalformedReason::NotJson(e.to_string())),
    };

    match serde_json::from_value::<QualitativeResult>(value) {
        Ok(result) => ParsedResponse::Valid(result),
        Err(e) => malformed(MalformedReason::Schema(e.to_string())),
    }
}

fn extract_json(text: &str) -> Option<&str> {
    let unfenced = strip_code_fence(text);
    first_object(unfenced)
}

/// Contents of the fenced block the reply opens with, or the whole text otherwise.
///
/// Fences later in the text are left alone: they may sit inside a note.
fn strip_code_fence(text: &str) -> &str {
    let Some(fenced) = text.trim_start().strip_prefix("```") else {
        return text;
    };
    // Skip a language tag such as `json`.
    let body = fenced.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    match body.find("```") {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}

/// The first balanced `{ ... }` region, ignoring braces inside strings.
fn first_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0u32;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContextMultiplier;

    const VALID: &str = r#"{"context_multiplier": 1.1, "qualitative_analysis": {"contribution_notes": "steady"}, "strengths": ["a", "b", "c"], "weaknesses": ["d", "e"], "summary": "Solid."}"#;

    #[test]
    fn test_extract_json_from_markdown() {
        let input = format!("Here's the analysis:\n```json\n{}\n```\n", VALID);
        assert_eq!(extract_json(&input), Some(VALID));
    }

    #[test]
    fn test_extract_json_from_leading_fence() {
        let input = format!("```json\n{}\n```", VALID);
        assert_eq!(extract_json(&input), Some(VALID));
    }

    #[test]
    fn test_fence_inside_a_note_is_not_stripped() {
        let input = r#"{"summary": "wrap it as ```{}``` first", "context_multiplier": 1.1}"#;
        assert_eq!(extract_json(input), Some(input));
        match parse_qualitative_response(input) {
            ParsedResponse::Valid(result) => {
                assert_eq!(result.context_multiplier, ContextMultiplier::new(1.1).unwrap());
                assert_eq!(result.summary, "wrap it as ```{}``` first");
            }
            other => panic!("expected valid, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_raw_json() {
        let input = r#"The result is {"summary": "a {braced} note"} as requested"#;
        assert_eq!(extract_json(input), Some(r#"{"summary": "a {braced} note"}"#));
    }

    #[test]
    fn test_valid_response() {
        match parse_qualitative_response(VALID) {
            ParsedResponse::Valid(result) => {
                assert_eq!(result.context_multiplier, ContextMultiplier::new(1.1).unwrap());
                assert_eq!(result.notes.contribution_notes, "steady");
                assert_eq!(result.notes.impact_notes, "");
                assert_eq!(result.strengths.len(), 3);
                assert_eq!(result.summary, "Solid.");
            }
            other => panic!("expected valid, got {:?}", other),
        }
    }

    #[test]
    fn test_prose_is_not_json() {
        let parsed = parse_qualitative_response("I cannot rate this developer.");
        assert!(matches!(
            parsed,
            ParsedResponse::Malformed {
                reason: MalformedReason::NotJson(_),
                ..
            }
        ));
    }

    #[test]
    fn test_unterminated_object_is_not_json() {
        let parsed = parse_qualitative_response(r#"{"summary": "cut off"#);
        assert!(matches!(
            parsed,
            ParsedResponse::Malformed {
                reason: MalformedReason::NotJson(_),
                ..
            }
        ));
    }

    #[test]
    fn test_out_of_range_multiplier_is_schema_failure() {
        let parsed = parse_qualitative_response(r#"{"context_multiplier": 1.5}"#);
        match parsed {
            ParsedResponse::Malformed {
                raw,
                reason: MalformedReason::Schema(_),
            } => assert!(raw.contains("1.5")),
            other => panic!("expected schema failure, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_type_is_schema_failure() {
        let parsed = parse_qualitative_response(r#"{"weaknesses": [1, 2]}"#);
        assert!(matches!(
            parsed,
            ParsedResponse::Malformed {
                reason: MalformedReason::Schema(_),
                ..
            }
        ));
    }
}
