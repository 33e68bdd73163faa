use crate::classifier::Query;

const LINK_LINE: &str = "      \"link\": \"Sample direct buy link\",\n";

/// Builds the single instruction sent to the model.
///
/// The `link` line is only requested when the query mentions buying; the
/// model may still add or drop it.
pub fn build_prompt(query: &Query) -> String {
    let link_line = if query.wants_purchase_links() {
        LINK_LINE
    } else {
        ""
    };

    format!(
        r#"
You are an AI Personalized Birthday Reminder and Gift Suggestion Assistant.

Based on user input (recipient, relation, age, interests, upcoming birthday date), suggest gift ideas + optionally reminder suggestions.

Format:

{{
  "recipient": "e.g., Best Friend (turning 25)",
  "occasion": "Birthday",
  "gift_recommendations": [
    {{
      "gift": "Gift Name",
      "description": "Why it's a good fit",
      "estimated_price": "Price range",
{link_line}    }},
    ...
  ],
  "reminder_message": "Reminder to buy/make arrangements 1 week before the birthday!",
  "pro_tips": "Bonus tip to personalize the gift or event"
}}

Provide clean JSON only.

USER QUERY: "{text}"
"#,
        text = query.text()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt_for(raw: &str) -> String {
        build_prompt(&Query::accept(raw).unwrap())
    }

    #[test]
    fn requests_every_documented_field() {
        let prompt = prompt_for("Gift ideas for sister turning 18");
        for field in [
            "\"recipient\"",
            "\"occasion\"",
            "\"gift_recommendations\"",
            "\"gift\"",
            "\"description\"",
            "\"estimated_price\"",
            "\"reminder_message\"",
            "\"pro_tips\"",
        ] {
            assert!(prompt.contains(field), "missing {field}");
        }
        assert!(prompt.contains("USER QUERY: \"Gift ideas for sister turning 18\""));
    }

    #[test]
    fn link_field_only_for_purchase_queries() {
        assert!(!prompt_for("Birthday gift for my mentor").contains("\"link\""));
        assert!(prompt_for("Where to buy a birthday gift for mom").contains("\"link\""));
        assert!(prompt_for("Gift for dad, PURCHASE online").contains("\"link\""));
    }

    #[test]
    fn prompt_is_deterministic() {
        let query = Query::accept("remind me about Sam's birthday").unwrap();
        assert_eq!(build_prompt(&query), build_prompt(&query));
    }
}
