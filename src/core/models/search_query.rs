/// Text to search paired with the keyword the user typed.
///
/// An empty keyword means no search was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    keyword: String,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyword: keyword.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn is_search_requested(&self) -> bool {
        !self.keyword.is_empty()
    }
}
