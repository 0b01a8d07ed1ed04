//! In-memory document head

use crate::domain::MetaKey;
use crate::error::{FormsiteError, Result};
use crate::infrastructure::sink::MetadataSink;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Matches a `<title>` element or a `<meta>` tag
fn node_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r#"(?is)<title\b[^>]*>(.*?)</title\s*>|<meta\b((?:[^>"']|"[^"]*"|'[^']*')*?)/?>"#)
            .unwrap()
    })
}

/// One attribute: double-quoted, single-quoted, unquoted or valueless
fn attribute_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#,
        )
        .unwrap()
    })
}

/// A named or numeric character reference such as `&eacute;` or `&#169;`
fn reference_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);").unwrap()
    })
}

/// The references decoded on parse. `&amp;` in front of another reference
/// is left encoded so that the reference stays literal text.
fn decode_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r"&(quot|#39|lt|gt);|&amp;((?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);)?",
        )
        .unwrap()
    })
}

/// One node of the head, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadNode {
    Title(String),
    /// `<meta>` attributes in source order
    Meta(Vec<(String, String)>),
    /// Any other markup, kept verbatim
    Raw(String),
}

impl HeadNode {
    fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            HeadNode::Meta(attrs) => attrs
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    fn matches(&self, key: &MetaKey) -> bool {
        self.attribute(key.kind.as_str()) == Some(key.key.as_str())
    }
}

/// A parsed `<head>` fragment implementing [`MetadataSink`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadDocument {
    nodes: Vec<HeadNode>,
}

impl HeadDocument {
    pub fn new() -> Self {
        HeadDocument::default()
    }

    /// Parse a head fragment. Markup other than `<title>` and `<meta>` is
    /// kept as raw segments so rendering preserves it.
    ///
    /// Character references other than the ones [`render`](Self::render)
    /// produces are kept as written. A valueless attribute reads as an empty
    /// value and renders as `name=""`.
    pub fn parse(html: &str) -> Result<Self> {
        let mut nodes = Vec::new();
        let mut last = 0;

        for captures in node_regex().captures_iter(html) {
            let whole = captures.get(0).map(|m| m.range()).unwrap_or(last..last);
            push_raw(&mut nodes, &html[last..whole.start])?;
            last = whole.end;

            if let Some(title) = captures.get(1) {
                nodes.push(HeadNode::Title(unescape(title.as_str().trim())));
            } else if let Some(attrs) = captures.get(2) {
                nodes.push(HeadNode::Meta(parse_attributes(attrs.as_str())?));
            }
        }
        push_raw(&mut nodes, &html[last..])?;

        Ok(HeadDocument { nodes })
    }

    pub fn nodes(&self) -> &[HeadNode] {
        &self.nodes
    }

    /// Number of `<meta>` nodes
    pub fn meta_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, HeadNode::Meta(_)))
            .count()
    }

    /// Render the head fragment, one node per line
    pub fn render(&self) -> String {
        let mut output = String::new();
        for node in &self.nodes {
            match node {
                HeadNode::Title(title) => {
                    output.push_str(&format!("<title>{}</title>", escape_text(title)));
                }
                HeadNode::Meta(attrs) => {
                    output.push_str("<meta");
                    for (name, value) in attrs {
                        output.push_str(&format!(" {}=\"{}\"", name, escape_attribute(value)));
                    }
                    output.push('>');
                }
                HeadNode::Raw(raw) => output.push_str(raw),
            }
            output.push('\n');
        }
        output
    }

    fn position(&self, key: &MetaKey) -> Option<usize> {
        self.nodes.iter().position(|node| node.matches(key))
    }

    fn missing(key: &MetaKey) -> FormsiteError {
        FormsiteError::Head(format!("no <meta {}> in document", key))
    }
}

impl fmt::Display for HeadDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl MetadataSink for HeadDocument {
    fn title(&self) -> Result<Option<String>> {
        Ok(self.nodes.iter().find_map(|node| match node {
            HeadNode::Title(title) => Some(title.clone()),
            _ => None,
        }))
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        let existing = self.nodes.iter_mut().find_map(|node| match node {
            HeadNode::Title(current) => Some(current),
            _ => None,
        });
        match existing {
            Some(current) => *current = title.to_string(),
            None => self.nodes.insert(0, HeadNode::Title(title.to_string())),
        }
        Ok(())
    }

    /// Removes the first title node; a head without one is left as is
    fn remove_title(&mut self) -> Result<()> {
        if let Some(index) = self
            .nodes
            .iter()
            .position(|node| matches!(node, HeadNode::Title(_)))
        {
            self.nodes.remove(index);
        }
        Ok(())
    }

    fn get(&self, key: &MetaKey) -> Result<Option<String>> {
        Ok(self
            .nodes
            .iter()
            .find(|node| node.matches(key))
            .map(|node| node.attribute("content").unwrap_or_default().to_string()))
    }

    fn set(&mut self, key: &MetaKey, content: &str) -> Result<()> {
        let index = self.position(key).ok_or_else(|| Self::missing(key))?;
        if let HeadNode::Meta(attrs) = &mut self.nodes[index] {
            match attrs
                .iter_mut()
                .find(|(name, _)| name.eq_ignore_ascii_case("content"))
            {
                Some((_, value)) => *value = content.to_string(),
                None => attrs.push(("content".to_string(), content.to_string())),
            }
        }
        Ok(())
    }

    fn create(&mut self, key: &MetaKey, content: &str) -> Result<()> {
        self.nodes.push(HeadNode::Meta(vec![
            (key.kind.as_str().to_string(), key.key.clone()),
            ("content".to_string(), content.to_string()),
        ]));
        Ok(())
    }

    fn remove(&mut self, key: &MetaKey) -> Result<()> {
        let index = self.position(key).ok_or_else(|| Self::missing(key))?;
        self.nodes.remove(index);
        Ok(())
    }
}

fn push_raw(nodes: &mut Vec<HeadNode>, segment: &str) -> Result<()> {
    let segment = segment.trim();
    if segment.is_empty() {
        return Ok(());
    }
    let lower = segment.to_ascii_lowercase();
    if lower.contains("<title") {
        return Err(FormsiteError::Head("unterminated <title> element".to_string()));
    }
    if lower.contains("<meta") {
        return Err(FormsiteError::Head("unterminated <meta> tag".to_string()));
    }
    nodes.push(HeadNode::Raw(segment.to_string()));
    Ok(())
}

/// Every character between attributes must be whitespace; anything else
/// is rejected rather than dropped.
fn parse_attributes(source: &str) -> Result<Vec<(String, String)>> {
    let mut attrs = Vec::new();
    let mut last = 0;

    for cap in attribute_regex().captures_iter(source) {
        let whole = cap.get(0).map(|m| m.range()).unwrap_or(last..last);
        check_gap(&source[last..whole.start])?;
        last = whole.end;

        let value = cap
            .get(2)
            .or_else(|| cap.get(3))
            .or_else(|| cap.get(4))
            .map_or("", |m| m.as_str());
        attrs.push((cap[1].to_ascii_lowercase(), unescape(value)));
    }

    let rest = source[last..].trim();
    if rest != "/" {
        check_gap(rest)?;
    }
    Ok(attrs)
}

fn check_gap(gap: &str) -> Result<()> {
    let gap = gap.trim();
    if gap.is_empty() {
        return Ok(());
    }
    Err(FormsiteError::Head(format!(
        "unreadable <meta> attribute text '{}'",
        gap
    )))
}

/// Escapes markup characters. An `&` that starts a character reference is
/// kept, so references read from the source are written back unchanged.
fn escape_text(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut last = 0;
    for reference in reference_regex().find_iter(value) {
        output.push_str(&escape_markup(&value[last..reference.start()]));
        output.push_str(reference.as_str());
        last = reference.end();
    }
    output.push_str(&escape_markup(&value[last..]));
    output
}

fn escape_markup(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

fn unescape(value: &str) -> String {
    decode_regex()
        .replace_all(value, |cap: &regex::Captures| match cap.get(1).map(|m| m.as_str()) {
            Some("quot") => "\"".to_string(),
            Some("#39") => "'".to_string(),
            Some("lt") => "<".to_string(),
            Some("gt") => ">".to_string(),
            _ if cap.get(2).is_some() => cap[0].to_string(),
            _ => "&".to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEAD: &str = r#"
        <meta charset="utf-8">
        <title>Site</title>
        <meta name="description" content="Home">
        <link rel="icon" href="/favicon.ico">
        <meta property="og:site_name" content="Formly" />
    "#;

    #[test]
    fn test_parse_nodes() {
        let doc = HeadDocument::parse(HEAD).unwrap();
        assert_eq!(doc.nodes().len(), 5);
        assert_eq!(doc.meta_count(), 3);
        assert_eq!(doc.title().unwrap().as_deref(), Some("Site"));
        assert_eq!(
            doc.nodes()[3],
            HeadNode::Raw(r#"<link rel="icon" href="/favicon.ico">"#.to_string())
        );
    }

    #[test]
    fn test_get_by_kind_and_key() {
        let doc = HeadDocument::parse(HEAD).unwrap();
        assert_eq!(
            doc.get(&MetaKey::name("description")).unwrap(),
            Some("Home".to_string())
        );
        assert_eq!(
            doc.get(&MetaKey::property("og:site_name")).unwrap(),
            Some("Formly".to_string())
        );
        // Same key under the other attribute kind is a different tag
        assert_eq!(doc.get(&MetaKey::property("description")).unwrap(), None);
    }

    #[test]
    fn test_meta_without_content_reads_empty() {
        let doc = HeadDocument::parse(r#"<meta name="robots">"#).unwrap();
        assert_eq!(doc.get(&MetaKey::name("robots")).unwrap(), Some(String::new()));
    }

    #[test]
    fn test_render_round_trip_is_stable() {
        let doc = HeadDocument::parse(HEAD).unwrap();
        let rendered = doc.render();
        assert_eq!(HeadDocument::parse(&rendered).unwrap(), doc);
        assert!(rendered.contains(r#"<meta name="description" content="Home">"#));
    }

    #[test]
    fn test_escaping() {
        let mut doc = HeadDocument::new();
        doc.set_title("Forms & <Surveys>").unwrap();
        doc.create(&MetaKey::name("description"), "Say \"hi\"").unwrap();
        let rendered = doc.render();
        assert!(rendered.contains("<title>Forms &amp; &lt;Surveys&gt;</title>"));
        assert!(rendered.contains(r#"content="Say &quot;hi&quot;""#));
        assert_eq!(HeadDocument::parse(&rendered).unwrap(), doc);
    }

    #[test]
    fn test_set_title_inserts_when_missing() {
        let mut doc = HeadDocument::parse(r#"<meta charset="utf-8">"#).unwrap();
        assert_eq!(doc.title().unwrap(), None);
        doc.set_title("Pricing").unwrap();
        assert_eq!(doc.nodes()[0], HeadNode::Title("Pricing".to_string()));

        doc.remove_title().unwrap();
        assert_eq!(doc, HeadDocument::parse(r#"<meta charset="utf-8">"#).unwrap());
        doc.remove_title().unwrap();
        assert_eq!(doc.title().unwrap(), None);
    }

    #[test]
    fn test_unquoted_attributes() {
        let doc = HeadDocument::parse("<meta name=description content=Home>").unwrap();
        assert_eq!(
            doc.get(&MetaKey::name("description")).unwrap(),
            Some("Home".to_string())
        );
        assert_eq!(
            doc.render(),
            "<meta name=\"description\" content=\"Home\">\n"
        );
    }

    #[test]
    fn test_valueless_attribute_reads_empty() {
        let doc =
            HeadDocument::parse(r#"<meta itemscope name="robots" content=noindex />"#).unwrap();
        assert_eq!(
            doc.nodes()[0],
            HeadNode::Meta(vec![
                ("itemscope".to_string(), String::new()),
                ("name".to_string(), "robots".to_string()),
                ("content".to_string(), "noindex".to_string()),
            ])
        );
        assert_eq!(HeadDocument::parse(&doc.render()).unwrap(), doc);
    }

    #[test]
    fn test_unreadable_attributes_rejected() {
        let err = HeadDocument::parse(r#"<meta name="description" =Home>"#).unwrap_err();
        assert!(matches!(err, FormsiteError::Head(_)));
        assert!(err.to_string().contains("unreadable <meta> attribute text '='"));
    }

    #[test]
    fn test_character_references_kept() {
        let html = "<title>Caf&eacute; &amp; Bar</title>\n\
                    <meta name=\"description\" content=\"Caf&eacute; &#169; Team &#x2014; &amp;copy;\">\n";
        let doc = HeadDocument::parse(html).unwrap();
        assert_eq!(doc.title().unwrap().as_deref(), Some("Caf&eacute; & Bar"));
        assert_eq!(
            doc.get(&MetaKey::name("description")).unwrap().as_deref(),
            Some("Caf&eacute; &#169; Team &#x2014; &amp;copy;")
        );
        assert_eq!(doc.render(), html);
    }

    #[test]
    fn test_create_appends_and_remove_deletes() {
        let mut doc = HeadDocument::parse(HEAD).unwrap();
        let key = MetaKey::property("og:title");
        doc.create(&key, "Pricing").unwrap();
        assert_eq!(
            doc.nodes().last(),
            Some(&HeadNode::Meta(vec![
                ("property".to_string(), "og:title".to_string()),
                ("content".to_string(), "Pricing".to_string()),
            ]))
        );
        doc.remove(&key).unwrap();
        assert_eq!(doc, HeadDocument::parse(HEAD).unwrap());
    }

    #[test]
    fn test_set_missing_tag_fails() {
        let mut doc = HeadDocument::new();
        assert!(doc.set(&MetaKey::name("description"), "x").is_err());
        assert!(doc.remove(&MetaKey::name("description")).is_err());
    }

    #[test]
    fn test_set_first_match_only() {
        let mut doc = HeadDocument::parse(
            r#"<meta name="description" content="one"><meta name="description" content="two">"#,
        )
        .unwrap();
        doc.set(&MetaKey::name("description"), "new").unwrap();
        assert!(doc.render().contains(r#"content="new""#));
        assert!(doc.render().contains(r#"content="two""#));
    }

    #[test]
    fn test_unterminated_title_rejected() {
        assert!(HeadDocument::parse("<title>Site").is_err());
    }
}
