use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// `encodeURIComponent` leaves `-_.!~*'()` alone; BBB wants `!` escaped too.
const BBB_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single key or value for a BBB query string
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, BBB_COMPONENT).to_string()
}

/// Ordered query parameters. Insertion order is preserved exactly, since the
/// encoded string is both the checksum input and the URL query.
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

    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exclamation_mark_is_escaped() {
        let params = QueryParams::new().push("msg", "Hello!");
        assert_eq!(params.to_query_string(), "msg=Hello%21");
    }

    #[test]
    fn test_uri_component_unreserved_set() {
        assert_eq!(encode_component("aZ09-_.~*'()"), "aZ09-_.~*'()");
        assert_eq!(encode_component("a b&c=d/e?f"), "a%20b%26c%3Dd%2Fe%3Ff");
        assert_eq!(encode_component("+#%"), "%2B%23%25");
    }

    #[test]
    fn test_non_ascii_is_utf8_encoded() {
        assert_eq!(encode_component("café"), "caf%C3%A9");
    }

    #[test]
    fn test_keys_are_encoded_too() {
        let params = QueryParams::new().push("a b!", "1");
        assert_eq!(params.to_query_string(), "a%20b%21=1");
    }

    #[test]
    fn test_insertion_order_kept_without_dedup() {
        let params = QueryParams::new()
            .push("z", "1")
            .push("a", "2")
            .push("z", "3");

        assert_eq!(params.to_query_string(), "z=1&a=2&z=3");
    }

    #[test]
    fn test_empty_params() {
        let params = QueryParams::new();
        assert_eq!(params.to_query_string(), "");
    }

    #[test]
    fn test_welcome_message_encoding() {
        let params = QueryParams::new().push("welcome", "Welcome to Intro - Live Session!");

        assert_eq!(
            params.to_query_string(),
            "welcome=Welcome%20to%20Intro%20-%20Live%20Session%21"
        );
    }
}
