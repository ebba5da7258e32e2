use super::*;

#[test]
fn renders_headings_and_emphasis() {
    let html = render_markdown_html("# Findings\n\nSleep is **important**.");
    assert!(html.contains("<h1>Findings</h1>"));
    assert!(html.contains("<strong>important</strong>"));
}

#[test]
fn drops_raw_html() {
    let html = render_markdown_html("before <script>alert(1)</script> after\n\n<div>block</div>\n");
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<div>"));
    assert!(html.contains("before"));
}

#[test]
fn keeps_paragraph_breaks_of_research_text() {
    let html = render_markdown_html("In-depth analysis for Selection #1:\n\nBody");
    assert_eq!(html.matches("<p>").count(), 2);
}

#[test]
fn renders_tables() {
    let html = render_markdown_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
    assert!(html.contains("<table>"));
}
