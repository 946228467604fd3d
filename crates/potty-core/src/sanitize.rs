//! Markup stripping for free-text fields.
//!
//! Entities are decoded once before scanning so that `&lt;script&gt;` cannot
//! slip through, then every tag is removed in a single left-to-right pass.
//! Elements that carry executable or embedded content are removed together
//! with everything up to their closing tag. Text that was entity-encoded more
//! than once stays encoded and is stored as text.
//!
//! The result never contains `<` immediately followed by a character that
//! could open a tag. A bare `<` that would end up in front of such a
//! character once a tag between them is removed is dropped instead.

/// Elements dropped along with their content.
const STRIPPED_ELEMENTS: &[&str] = &[
  "script", "style", "iframe", "object", "embed", "noscript", "template",
];

/// Remove executable markup and all remaining tags from `input`.
pub fn strip_markup(input: &str) -> String {
  let decoded = html_escape::decode_html_entities(input);
  let text: &str = &decoded;
  // ASCII lowercasing keeps byte offsets intact.
  let lower = text.to_ascii_lowercase();
  let mut out = String::with_capacity(text.len());
  let mut pos = 0;

  while let Some(rel) = text[pos..].find('<') {
    let lt = pos + rel;
    push_text(&mut out, &text[pos..lt]);
    let after = lt + 1;

    if !text[after..].chars().next().is_some_and(opens_tag) {
      out.push('<');
      pos = after;
      continue;
    }

    // Unterminated tag: keep its text without the bracket.
    let Some(gt) = text[after..].find('>') else {
      push_text(&mut out, &text[after..]);
      return out;
    };

    let tag = &text[after..after + gt];
    pos = after + gt + 1;

    if let Some(element) = stripped_element(tag) {
      pos = past_close(&lower, pos, element);
    }
  }

  push_text(&mut out, &text[pos..]);
  out
}

/// Whether `c`, directly after a `<`, starts a tag, a closing tag, a comment,
/// or a processing instruction.
fn opens_tag(c: char) -> bool {
  c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?')
}

/// Append `text`, dropping any trailing `<` in `out` that a character of
/// `text` would turn into a tag opener.
fn push_text(out: &mut String, text: &str) {
  for c in text.chars() {
    if opens_tag(c) {
      while out.ends_with('<') {
        out.pop();
      }
    }
    out.push(c);
  }
}

/// If `tag` (the text between `<` and `>`) opens one of
/// [`STRIPPED_ELEMENTS`], return that element's name.
fn stripped_element(tag: &str) -> Option<&'static str> {
  if tag.starts_with('/') || tag.trim_end().ends_with('/') {
    return None;
  }
  let name = tag
    .split(|c: char| c.is_whitespace() || c == '/')
    .next()
    .unwrap_or_default();
  STRIPPED_ELEMENTS
    .iter()
    .copied()
    .find(|e| e.eq_ignore_ascii_case(name))
}

/// Offset just past `</element ...>` at or after `from` in the lowercased
/// text. A missing closing tag swallows the rest of the input.
fn past_close(lower: &str, from: usize, element: &str) -> usize {
  let needle = format!("</{element}");
  let Some(rel) = lower[from..].find(&needle) else {
    return lower.len();
  };
  let start = from + rel;
  match lower[start..].find('>') {
    Some(gt) => start + gt + 1,
    None => lower.len(),
  }
}
