use crate::{FULL_ROUTE_PLACEHOLDER, prelude::*};

///
/// DeepLink
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DeepLink {
    pub uri_pattern: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl DeepLink {
    #[must_use]
    pub fn new(uri_pattern: impl Into<String>) -> Self {
        Self {
            uri_pattern: uri_pattern.into(),
            action: None,
            mime_type: None,
        }
    }

    /// Uri pattern with the full-route placeholder expanded.
    #[must_use]
    pub fn resolved_pattern(&self, route_template: &str) -> String {
        self.uri_pattern
            .replace(FULL_ROUTE_PLACEHOLDER, route_template)
    }

    /// Names bound by `{name}` segments of the pattern, in order of appearance.
    /// The full-route placeholder binds every argument and contributes nothing.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = self.uri_pattern.as_str();

        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else {
                break;
            };
            let name = after[..end].trim();
            if !name.is_empty() {
                names.push(name);
            }
            rest = &after[end + 1..];
        }

        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_in_path_and_query() {
        let link = DeepLink::new("app://profile/{userId}?tab={tab}");

        assert_eq!(link.placeholders(), vec!["userId", "tab"]);
    }

    #[test]
    fn unterminated_brace_is_ignored() {
        assert!(DeepLink::new("app://x/{oops").placeholders().is_empty());
    }

    #[test]
    fn full_route_placeholder_expands() {
        let link = DeepLink::new(format!("app://host/{FULL_ROUTE_PLACEHOLDER}"));

        assert_eq!(
            link.resolved_pattern("profile/{userId}"),
            "app://host/profile/{userId}"
        );
        assert!(link.placeholders().is_empty());
    }
}
