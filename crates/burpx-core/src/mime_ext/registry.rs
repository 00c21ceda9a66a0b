//! `mime.types` file format.

/// Parses `mime.types` text into `(essence, extensions)` pairs.
///
/// Each non-comment line is a media type followed by whitespace-separated
/// extensions without dots. Types are lower-cased; lines without extensions
/// are dropped.
pub fn parse_mime_types(text: &str) -> Vec<(String, Vec<String>)> {
    text.lines()
        .filter_map(|line| {
            let line = line.split('#').next().unwrap_or("");
            let mut fields = line.split_whitespace();
            let essence = fields.next()?;
            if !essence.contains('/') {
                return None;
            }
            let exts: Vec<String> = fields
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .filter(|e| !e.is_empty())
                .collect();
            if exts.is_empty() {
                return None;
            }
            Some((essence.to_ascii_lowercase(), exts))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries_and_skips_comments() {
        let text = "# comment\n\ntext/html html htm\nText/CSS css # trailing\napplication/x-none\n";
        let parsed = parse_mime_types(text);
        assert_eq!(
            parsed,
            vec![
                ("text/html".to_string(), vec!["html".to_string(), "htm".to_string()]),
                ("text/css".to_string(), vec!["css".to_string()]),
            ]
        );
    }

    #[test]
    fn dotted_extensions_are_accepted() {
        let parsed = parse_mime_types("image/png .PNG\n");
        assert_eq!(parsed[0].1, vec!["png".to_string()]);
    }
}
