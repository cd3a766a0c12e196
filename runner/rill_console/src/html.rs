//! Severity-styled HTML rendering.
//!
//! Line text is escaped at render time and the severity only ever
//! selects a fixed CSS class, so captured output cannot inject markup.

use crate::OutputLine;

/// Render one line as a `<span>` with its severity's CSS class.
pub fn render_line(line: &OutputLine) -> String {
    format!(
        r#"<span class="{}">{}</span>"#,
        line.severity.css_class(),
        escape(&line.text)
    )
}

/// Render a whole buffer snapshot, one span per line.
pub fn render_lines(lines: &[OutputLine]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&render_line(line));
        out.push('\n');
    }
    out
}

/// Escape text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_span_with_severity_class() {
        let line = OutputLine::new(Severity::Warning, "careful");
        assert_eq!(
            render_line(&line),
            r#"<span class="console-warn">careful</span>"#
        );
    }

    #[test]
    fn escapes_markup_in_line_text() {
        let line = OutputLine::new(Severity::Info, r#"<img src="x">&'"#);
        assert_eq!(
            render_line(&line),
            r#"<span class="console-log">&lt;img src=&quot;x&quot;&gt;&amp;&#39;</span>"#
        );
    }

    #[test]
    fn renders_buffer_snapshot_in_order() {
        let lines = vec![
            OutputLine::new(Severity::Info, "a"),
            OutputLine::new(Severity::Error, "b"),
        ];
        assert_eq!(
            render_lines(&lines),
            "<span class=\"console-log\">a</span>\n<span class=\"console-error\">b</span>\n"
        );
    }
}
