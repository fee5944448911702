use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except RFC 3986 unreserved characters is escaped in query values.
const QUERY_VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Marker the WeChat mobile client requires on in-app authorization links.
pub(crate) const WECHAT_REDIRECT_FRAGMENT: &str = "#wechat_redirect";

/// Encode `params` as a query string, keeping their order.
pub(crate) fn encode_query(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, QUERY_VALUE_ENCODE_SET),
                utf8_percent_encode(value, QUERY_VALUE_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// `{endpoint}?{query}`
pub(crate) fn build_url(endpoint: &str, params: &[(&str, &str)]) -> String {
    format!("{}?{}", endpoint, encode_query(params))
}
