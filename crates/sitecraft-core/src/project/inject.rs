//! Post-processing applied to every compiled page

/// Admin-mode bootstrap script (inert unless the page is opened with `?is_admin=true`)
pub const ADMIN_SCRIPT: &str = include_str!("../../assets/admin_script.html");

/// Add `data-source-path="<source_path>"` to the first `<body` tag
///
/// Pages without a `<body` tag are returned unchanged.
pub fn inject_source_path(html: &str, source_path: &str) -> String {
    html.replacen(
        "<body",
        &format!("<body data-source-path=\"{}\"", source_path),
        1,
    )
}

/// Insert the admin script before the first `</body>`, or append it
pub fn inject_admin_script(html: &str) -> String {
    match html.find("</body>") {
        Some(pos) => {
            let mut out = String::with_capacity(html.len() + ADMIN_SCRIPT.len() + 1);
            out.push_str(&html[..pos]);
            out.push('\n');
            out.push_str(ADMIN_SCRIPT);
            out.push_str(&html[pos..]);
            out
        }
        None => format!("{}\n{}", html, ADMIN_SCRIPT),
    }
}

/// Which post-processing steps run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostProcess {
    pub source_path_attr: bool,
    pub admin_script: bool,
}

impl Default for PostProcess {
    fn default() -> Self {
        Self {
            source_path_attr: true,
            admin_script: true,
        }
    }
}

impl PostProcess {
    /// Apply the enabled steps; the admin script always goes last
    pub fn apply(&self, html: String, source_path: &str) -> String {
        let html = if self.source_path_attr {
            inject_source_path(&html, source_path)
        } else {
            html
        };

        if self.admin_script {
            inject_admin_script(&html)
        } else {
            html
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_path_on_first_body_only() {
        let html = "<body class=\"a\"><p>x</p></body><body>";
        let out = inject_source_path(html, "templates/index.html");
        assert_eq!(
            out,
            "<body data-source-path=\"templates/index.html\" class=\"a\"><p>x</p></body><body>"
        );
    }

    #[test]
    fn test_source_path_without_body_is_noop() {
        let html = "<p>fragment</p>";
        assert_eq!(inject_source_path(html, "templates/a.html"), html);
    }

    #[test]
    fn test_admin_script_before_body_close() {
        let out = inject_admin_script("<body><p>x</p></body></html>");
        let script = out.find("<script>").unwrap();
        let close = out.find("</body>").unwrap();
        assert!(script < close);
        assert!(out.starts_with("<body><p>x</p>"));
        assert!(out.ends_with("</script>\n</body></html>"));
    }

    #[test]
    fn test_admin_script_appended_without_body_close() {
        let out = inject_admin_script("<p>fragment</p>");
        assert!(out.starts_with("<p>fragment</p>\n<script>"));
        assert!(out.trim_end().ends_with("</script>"));
    }

    #[test]
    fn test_admin_script_mentions_markers_and_query_flag() {
        assert!(ADMIN_SCRIPT.contains("is_admin"));
        assert!(ADMIN_SCRIPT.contains("__TP_INC__"));
        assert!(ADMIN_SCRIPT.contains("__TP_END_INC__"));
        assert!(ADMIN_SCRIPT.contains("data-source-path"));
    }

    #[test]
    fn test_post_process_order_and_toggles() {
        let page = "<html><body></body></html>".to_string();

        let all = PostProcess::default().apply(page.clone(), "templates/x.html");
        assert!(all.starts_with("<html><body data-source-path=\"templates/x.html\">"));
        assert!(all.contains("<script>"));

        let none = PostProcess {
            source_path_attr: false,
            admin_script: false,
        }
        .apply(page.clone(), "templates/x.html");
        assert_eq!(none, page);

        let attr_only = PostProcess {
            source_path_attr: true,
            admin_script: false,
        }
        .apply(page, "templates/x.html");
        assert_eq!(
            attr_only,
            "<html><body data-source-path=\"templates/x.html\"></body></html>"
        );
    }
}
