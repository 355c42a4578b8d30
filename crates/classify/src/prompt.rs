//! Prompt construction for the classification call.

/// Builds the single classification prompt for a feedback message.
///
/// The prompt pins down the entire output contract: one JSON object, no
/// surrounding prose, closed category and priority sets. The parser on the
/// other side still treats the reply as untrusted; this just maximizes the
/// odds it doesn't have to reject anything.
pub fn build_prompt(message: &str) -> String {
    format!(
        r#"You are triaging user feedback for a product team. A visitor submitted the feedback below, possibly with a screenshot attached to this request.

Feedback:
{message}

Respond with a single JSON object and nothing else - no markdown fences, no prose before or after. The object must have exactly these fields:

- "title": short issue-tracker style title
- "summary": 1-2 sentence summary
- "key_details": array of salient facts as strings
- "suggested_category": one of "bug", "feature", "question", "billing", "praise", "other"
- "feature_area": short free-form label for the affected product area
- "suggested_priority": one of "low", "medium", "high"
- "steps": array of reproduction steps as strings (empty array if none described)
- "expected": what the user expected to happen, or null
- "confidence": number between 0 and 1
- "clarifying_questions": array of at most 2 follow-up questions worth asking the user
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_the_message() {
        let p = build_prompt("Export button does nothing");
        assert!(p.contains("Export button does nothing"));
    }

    #[test]
    fn prompt_names_every_schema_field() {
        let p = build_prompt("x");
        for field in [
            "title",
            "summary",
            "key_details",
            "suggested_category",
            "feature_area",
            "suggested_priority",
            "steps",
            "expected",
            "confidence",
            "clarifying_questions",
        ] {
            assert!(p.contains(field), "prompt is missing field {field}");
        }
    }

    #[test]
    fn prompt_pins_the_closed_sets() {
        let p = build_prompt("x");
        for value in ["\"bug\"", "\"billing\"", "\"praise\"", "\"high\""] {
            assert!(p.contains(value));
        }
    }
}
