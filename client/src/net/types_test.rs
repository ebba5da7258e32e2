use super::*;

#[test]
fn user_without_email_deserializes() {
    let user: User = serde_json::from_str(r#"{"id":"u-1"}"#).unwrap();
    assert_eq!(user.id, "u-1");
    assert_eq!(user.email, None);
}

#[test]
fn generate_response_defaults_missing_fields() {
    let resp: GenerateResponse = serde_json::from_str(r#"{"paper_id":"p-9"}"#).unwrap();
    assert_eq!(resp.paper_id, "p-9");
    assert!(resp.hypotheses.is_empty());
    assert!(resp.latex.is_none());
}

#[test]
fn generate_response_reads_hypotheses_and_latex() {
    let raw = r#"{
        "paper_id": "p-1",
        "hypotheses": [{"title": "A", "description": "first"}],
        "latex": "\\section{Intro}"
    }"#;
    let resp: GenerateResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(resp.hypotheses, vec![Hypothesis { title: "A".into(), description: "first".into() }]);
    assert_eq!(resp.latex.as_deref(), Some("\\section{Intro}"));
}

#[test]
fn research_query_uses_camel_case_keys() {
    let query = ResearchQuery { project_id: "p".into(), selection_id: 3 };
    let value = serde_json::to_value(&query).unwrap();
    assert_eq!(value, serde_json::json!({ "projectId": "p", "selectionId": 3 }));
}
