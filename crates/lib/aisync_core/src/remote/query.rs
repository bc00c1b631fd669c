//! Query-string parameters with repeated-key encoding.

use url::Url;
use url::form_urlencoded;

/// Ordered query parameters. Multi-valued parameters repeat their key
/// (`a=1&a=2`); no brackets, no comma joining.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// One pair per value, all under `key`.
    pub fn push_all<I, V>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        for value in values {
            self.pairs.push((key.to_string(), value.into()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    /// Append to `url`, keeping any pairs it already carries.
    pub fn apply_to(&self, url: &mut Url) {
        if self.is_empty() {
            return;
        }
        url.query_pairs_mut().extend_pairs(self.pairs.iter());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_keys_not_brackets_or_commas() {
        let params = QueryParams::new()
            .push_all("jobType", ["HOURLY", "FIXED"])
            .push("title", "rust dev");
        assert_eq!(params.encode(), "jobType=HOURLY&jobType=FIXED&title=rust+dev");
    }

    #[test]
    fn apply_to_url_appends_pairs() {
        let mut url = Url::parse("http://remote.test/api/jobs?x=1").unwrap();
        QueryParams::new().push_all("a", ["1", "2"]).apply_to(&mut url);
        assert_eq!(url.query(), Some("x=1&a=1&a=2"));
    }

    #[test]
    fn empty_params_leave_url_untouched() {
        let mut url = Url::parse("http://remote.test/api/jobs").unwrap();
        QueryParams::new().apply_to(&mut url);
        assert_eq!(url.as_str(), "http://remote.test/api/jobs");
    }
}
