use serde_json::Value;

enum Match {
    Contains(&'static str),
    Equals(&'static [&'static str]),
}

/// Name rules in priority order.
const RULES: &[(Match, &str)] = &[
    (Match::Contains("id"), "Unique identifier"),
    (Match::Equals(&["created", "createdtime"]), "Creation timestamp"),
    (Match::Equals(&["updated", "updatedtime"]), "Last update timestamp"),
    (Match::Contains("email"), "Email address"),
    (Match::Contains("name"), "Name field"),
    (Match::Contains("phone"), "Phone number"),
    (Match::Contains("fax"), "Fax number"),
    (Match::Contains("company"), "Company information"),
    (Match::Contains("time"), "Timestamp"),
    (Match::Contains("state"), "State information"),
    (Match::Contains("count"), "Count value"),
    (Match::Contains("info"), "Information object"),
];

/// Advisory description for a field, from its name and then its sample value.
pub fn describe(name: &str, sample: Option<&Value>) -> String {
    let lower = name.to_lowercase();
    let by_name = RULES.iter().find(|(rule, _)| match rule {
        Match::Contains(needle) => lower.contains(needle),
        Match::Equals(names) => names.contains(&lower.as_str()),
    });
    if let Some((_, text)) = by_name {
        return (*text).to_string();
    }

    match sample {
        Some(Value::Array(items)) => format!("Array of {} items", items.len()),
        Some(Value::Object(_)) => "Nested object".to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_name_rules() {
        assert_eq!(describe("userId", None), "Unique identifier");
        assert_eq!(describe("created", None), "Creation timestamp");
        assert_eq!(describe("UpdatedTime", None), "Last update timestamp");
        assert_eq!(describe("contactEmail", None), "Email address");
        assert_eq!(describe("firstName", None), "Name field");
        assert_eq!(describe("phone", None), "Phone number");
        assert_eq!(describe("fax", None), "Fax number");
        assert_eq!(describe("company", None), "Company information");
        assert_eq!(describe("startTime", None), "Timestamp");
        assert_eq!(describe("state", None), "State information");
        assert_eq!(describe("viewCount", None), "Count value");
        assert_eq!(describe("carinfo", None), "Information object");
    }

    #[test]
    fn test_first_rule_wins() {
        // "id" is checked before "name"
        assert_eq!(describe("idName", None), "Unique identifier");
        // "createdAt" is not an exact match, so it falls through to nothing
        assert_eq!(describe("createdAt", Some(&json!("x"))), "");
        // "createdtime" matches exactly before the generic "time" rule
        assert_eq!(describe("createdTime", None), "Creation timestamp");
        // "provider" contains "id"
        assert_eq!(describe("provider", None), "Unique identifier");
    }

    #[test]
    fn test_value_fallback() {
        assert_eq!(describe("tags", Some(&json!(["a", "b", "c"]))), "Array of 3 items");
        assert_eq!(describe("meta", Some(&json!({"a": 1}))), "Nested object");
        assert_eq!(describe("title", Some(&json!("Hello"))), "");
        assert_eq!(describe("title", Some(&Value::Null)), "");
        assert_eq!(describe("title", None), "");
    }
}
