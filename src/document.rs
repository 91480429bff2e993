use crate::context::Variables;

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Document {
    pub path: String,
    pub content: String,
    pub metadata: Variables,
}

impl Document {
    /// Builds a document from raw source, splitting off YAML front matter.
    pub fn parse(path: impl Into<String>, raw: &str) -> Self {
        let (metadata, content) = parse_front_matter(raw);
        Self {
            path: path.into(),
            content,
            metadata,
        }
    }
}

/// Splits `---`-delimited YAML front matter from the body. Unparsable front
/// matter yields empty metadata.
pub fn parse_front_matter(raw: &str) -> (Variables, String) {
    if let Some(striped) = raw.strip_prefix("---") {
        if let Some(end) = striped.find("---") {
            let meta_str = &striped[..end];
            let body = &striped[end + 3..];
            let metadata: Variables = serde_yaml::from_str(meta_str).unwrap_or_else(|err| {
                log::warn!("ignoring invalid front matter: {err}");
                Variables::new()
            });
            return (metadata, body.trim().to_string());
        }
    }
    (Variables::new(), raw.to_string())
}
