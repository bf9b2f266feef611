use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One candidate submission as sent by the client.
/// Fields are lenient: a missing or non-string value just makes the entry invalid.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumeRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(rename = "resumeURL", default, deserialize_with = "lenient_string")]
    pub resume_url: Option<String>,
}

impl ResumeRequest {
    /// `(name, url)` when both are present and non-empty.
    pub fn valid_parts(&self) -> Option<(&str, &str)> {
        let name = self.name.as_deref().filter(|s| !s.is_empty())?;
        let url = self.resume_url.as_deref().filter(|s| !s.is_empty())?;
        Some((name, url))
    }
}

/// Request body for `POST /api/resumeshortlist`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShortlistRequest {
    pub count: Option<i64>,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub resumes: Vec<ResumeRequest>,
}

/// A resume that made it through the pipeline. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredResume {
    pub name: String,
    #[serde(rename = "resumeUrl")]
    pub resume_url: String,
    /// 0 – 100
    pub score: u8,
}

#[derive(Debug, Serialize)]
pub struct ShortlistResponse {
    pub shortlisted: Vec<ScoredResume>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_str().map(str::to_owned)))
}

/// Entries that are not objects (`"junk"`, `null`, `42`) become empty requests,
/// so they are dropped by `valid_parts` instead of failing the whole body.
fn lenient_entries<'de, D>(deserializer: D) -> Result<Vec<ResumeRequest>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .map(|entry| serde_json::from_value::<ResumeRequest>(entry).unwrap_or_default())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_deserializes_wire_names() {
        let req: ShortlistRequest = serde_json::from_value(json!({
            "count": 2,
            "resumes": [{"name": "Alice", "resumeURL": "https://cdn.example/a.pdf"}]
        }))
        .unwrap();
        assert_eq!(req.count, Some(2));
        assert_eq!(
            req.resumes[0].valid_parts(),
            Some(("Alice", "https://cdn.example/a.pdf"))
        );
    }

    #[test]
    fn test_missing_or_non_string_fields_are_invalid_not_errors() {
        let req: ShortlistRequest = serde_json::from_value(json!({
            "count": 1,
            "resumes": [
                {"name": "NoUrl"},
                {"name": 42, "resumeURL": "https://cdn.example/b.pdf"},
                {"name": "", "resumeURL": "https://cdn.example/c.pdf"},
                {}
            ]
        }))
        .unwrap();
        assert!(req.resumes.iter().all(|r| r.valid_parts().is_none()));
    }

    #[test]
    fn test_non_object_entries_are_dropped_not_errors() {
        let req: ShortlistRequest = serde_json::from_str(
            r#"{"count": 1, "resumes": ["junk", null, 42, {"name": "Alice", "resumeURL": "https://cdn.example/a.pdf"}]}"#,
        )
        .unwrap();
        assert_eq!(req.resumes.len(), 4);
        let valid: Vec<_> = req.resumes.iter().filter_map(ResumeRequest::valid_parts).collect();
        assert_eq!(valid, vec![("Alice", "https://cdn.example/a.pdf")]);
    }

    #[test]
    fn test_null_resumes_defaults_to_empty() {
        let req: ShortlistRequest = serde_json::from_value(json!({"count": 1, "resumes": null})).unwrap();
        assert!(req.resumes.is_empty());
    }

    #[test]
    fn test_missing_count_and_resumes_default() {
        let req: ShortlistRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.count, None);
        assert!(req.resumes.is_empty());
    }

    #[test]
    fn test_scored_resume_serializes_resume_url_camel_case() {
        let scored = ScoredResume {
            name: "Alice".into(),
            resume_url: "https://cdn.example/a.pdf".into(),
            score: 90,
        };
        let value = serde_json::to_value(&scored).unwrap();
        assert_eq!(
            value,
            json!({"name": "Alice", "resumeUrl": "https://cdn.example/a.pdf", "score": 90})
        );
    }
}
