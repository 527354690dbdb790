/// Escapes text for use in HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serializes a value as JSON that is safe inside a `<script>` element
pub fn script_json<T: serde::Serialize>(value: &T) -> serde_json::Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Renders a simple table with escaped cells
pub fn table<H, R, C>(headers: H, rows: R) -> String
where
    H: IntoIterator,
    H::Item: AsRef<str>,
    R: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: AsRef<str>,
{
    let mut out = String::from("<table class=\"data\"><thead><tr>");
    for header in headers {
        out.push_str("<th>");
        out.push_str(&escape(header.as_ref()));
        out.push_str("</th>");
    }
    out.push_str("</tr></thead><tbody>");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str("<td>");
            out.push_str(&escape(cell.as_ref()));
            out.push_str("</td>");
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&\"c\"'"), "a&lt;b&gt;&amp;&quot;c&quot;&#39;");
        assert_eq!(escape("Los Ángeles"), "Los Ángeles");
    }

    #[test]
    fn test_script_json() {
        let json = script_json(&vec!["</script><b>"]).unwrap();
        assert!(!json.contains("</script>"));
        assert_eq!(json, "[\"<\\/script><b>\"]");
    }

    #[test]
    fn test_table() {
        let html = table(["a", "b"], vec![vec!["1", "<2>"]]);
        assert_eq!(
            html,
            "<table class=\"data\"><thead><tr><th>a</th><th>b</th></tr></thead>\
             <tbody><tr><td>1</td><td>&lt;2&gt;</td></tr></tbody></table>"
        );
    }
}
