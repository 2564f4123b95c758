//! `Link` header parsing (RFC 8288), just enough to find the next page.

/// The target of the `rel="next"` entry of a `Link` header value.
///
/// ```text
/// <https://lms/api/v1/x?page=1>; rel="current", <https://lms/api/v1/x?page=2>; rel="next"
/// ```
pub(crate) fn next_url(header: &str) -> Option<String> {
  let mut rest = header;
  while let Some(start) = rest.find('<') {
    let after = &rest[start + 1..];
    let end = after.find('>')?;
    let target = &after[..end];
    let tail = &after[end + 1..];
    let params = tail.split_once('<').map_or(tail, |(params, _)| params);
    if params.split(';').any(is_rel_next) {
      return Some(target.to_string());
    }
    rest = &tail[params.len()..];
  }
  None
}

fn is_rel_next(param: &str) -> bool {
  let Some((key, value)) = param.split_once('=') else {
    return false;
  };
  key.trim().eq_ignore_ascii_case("rel")
    && value
      .trim()
      .trim_matches(|c| c == '"' || c == ',')
      .split_whitespace()
      .any(|rel| rel.eq_ignore_ascii_case("next"))
}
