use scraper::{Html, Selector};

/// Concatenated text of the `<script>` tags inside `div#charts` on a player page.
///
/// Returns `None` when the page has no chart div, no scripts in it, or only empty ones.
pub fn chart_script(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let charts = Selector::parse("div#charts").ok()?;
    let scripts = Selector::parse("script").ok()?;

    let div = document.select(&charts).next()?;
    let text: String = div
        .select(&scripts)
        .flat_map(|script| script.text())
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripts_inside_chart_div() {
        let html = r#"<html><body>
            <script>var datasets: [1];</script>
            <div id="charts">
                <canvas></canvas>
                <script>var a = 1;</script>
                <script>labels: ['01.01']</script>
            </div>
        </body></html>"#;
        let text = chart_script(html).unwrap();
        assert!(text.contains("var a = 1;"));
        assert!(text.contains("labels: ['01.01']"));
        assert!(!text.contains("datasets"));
    }

    #[test]
    fn test_missing_div() {
        assert_eq!(chart_script("<html><body><p>no chart</p></body></html>"), None);
    }

    #[test]
    fn test_empty_scripts() {
        let html = r#"<div id="charts"><script>  </script></div>"#;
        assert_eq!(chart_script(html), None);
    }
}
