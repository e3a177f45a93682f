use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref ANCHOR_PATTERN: Regex = Regex::new(
        r#"(?is)<a\s[^>]*?href\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a>"#
    ).unwrap();

    static ref TAG_PATTERN: Regex = Regex::new(r"(?s)<[^>]*>").unwrap();
    static ref WHITESPACE_PATTERN: Regex = Regex::new(r"\s+").unwrap();
}

/// Path fragment identifying links to journal pages on the ranking site
const JOURNAL_HREF_MARKER: &str = "/journal/";

/// Extract journal names from a ranking page, in page order, without repeats
pub fn extract_journal_names(html: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::new();

    for cap in ANCHOR_PATTERN.captures_iter(html) {
        if !cap[1].contains(JOURNAL_HREF_MARKER) {
            continue;
        }

        let text = TAG_PATTERN.replace_all(&cap[2], " ");
        let text = html_escape::decode_html_entities(&text);
        let name = WHITESPACE_PATTERN.replace_all(text.trim(), " ").to_string();

        if !name.is_empty() && seen.insert(name.clone()) {
            names.push(name);
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_journal_links_only() {
        let html = r#"
            <a href="/about">About</a>
            <a class="title" href="https://research.com/journal/neuron">Neuron</a>
            <a href="/journal/nature-neuroscience"><span>Nature</span> Neuroscience</a>
        "#;
        assert_eq!(
            extract_journal_names(html),
            vec!["Neuron".to_string(), "Nature Neuroscience".to_string()]
        );
    }

    #[test]
    fn test_entities_and_repeats() {
        let html = r#"
            <a href="/journal/a">Brain &amp; Behavior</a>
            <a href="/journal/a">Brain &amp; Behavior</a>
            <a href='/journal/b'>
                Neurobiology of
                Aging
            </a>
        "#;
        assert_eq!(
            extract_journal_names(html),
            vec!["Brain & Behavior".to_string(), "Neurobiology of Aging".to_string()]
        );
    }

    #[test]
    fn test_named_and_numeric_entities() {
        let html = r#"<a href="/journal/a">Revue Neurologique &eacute;dition</a><a href="/journal/b">Alzheimer&#8217;s &amp; Dementia</a><a href="/journal/c">Brain &#x26; Language</a><a href="/journal/d">Cortex&nbsp;Reports</a>"#;
        assert_eq!(
            extract_journal_names(html),
            vec![
                "Revue Neurologique édition".to_string(),
                "Alzheimer\u{2019}s & Dementia".to_string(),
                "Brain & Language".to_string(),
                "Cortex Reports".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_anchor_skipped() {
        let html = r#"<a href="/journal/x"><img src="logo.png"></a>"#;
        assert!(extract_journal_names(html).is_empty());
    }
}
