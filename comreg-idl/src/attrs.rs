//! Strict parsing of a declaration's attribute list.

use std::ops::Range;

use crate::{
    Result,
    error::SourceContext,
    scan::{is_ident_continue, is_ident_start},
};

/// One `name` or `name(argument)` item of an attribute block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attribute<'a> {
    pub name: &'a str,
    /// Raw argument text between the parentheses, trimmed.
    pub arg: Option<&'a str>,
    /// Absolute span of the argument (or of the name when there is none).
    pub span: Range<usize>,
}

impl<'a> Attribute<'a> {
    /// Argument with one level of surrounding double quotes removed.
    pub fn unquoted_arg(&self) -> Option<&'a str> {
        self.arg.map(|arg| {
            arg.strip_prefix('"')
                .and_then(|a| a.strip_suffix('"'))
                .unwrap_or(arg)
                .trim()
        })
    }
}

/// Find an attribute by name (case-insensitive).
pub(crate) fn find<'b, 'a>(attrs: &'b [Attribute<'a>], name: &str) -> Option<&'b Attribute<'a>> {
    attrs.iter().find(|a| a.name.eq_ignore_ascii_case(name))
}

/// Parse the contents of an attribute block.
///
/// `text` is the slice between the brackets and `base` its offset in the
/// full source, so reported spans point into the original file.
pub(crate) fn parse<'a>(ctx: &SourceContext, text: &'a str, base: usize) -> Result<Vec<Attribute<'a>>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    split_items(ctx, text, base)?
        .into_iter()
        .map(|item| parse_item(ctx, &text[item.clone()], base + item.start))
        .collect()
}

/// Split at top-level commas, respecting parentheses and string literals.
fn split_items(ctx: &SourceContext, text: &str, base: usize) -> Result<Vec<Range<usize>>> {
    let bytes = text.as_bytes();
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => i = skip_string(bytes, i),
            b'(' => depth += 1,
            b')' => {
                if depth == 0 {
                    return Err(ctx.malformed("unmatched `)`", base + i..base + i + 1));
                }
                depth -= 1;
            }
            b',' if depth == 0 => {
                items.push(start..i);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if depth > 0 {
        return Err(ctx.malformed("unclosed `(`", base + start..base + text.len()));
    }
    items.push(start..text.len());
    Ok(items)
}

/// Index of the closing quote of the string starting at `open` (or the last byte).
fn skip_string(bytes: &[u8], open: usize) -> usize {
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'"' => return i,
            _ => {}
        }
        i += 1;
    }
    bytes.len().saturating_sub(1)
}

fn parse_item<'a>(ctx: &SourceContext, item: &'a str, base: usize) -> Result<Attribute<'a>> {
    let bytes = item.as_bytes();
    let lead = item.len() - item.trim_start().len();
    let trimmed_end = item.trim_end().len();

    if lead == item.len() {
        return Err(ctx.malformed("empty attribute", base..base + item.len().max(1)));
    }
    if !is_ident_start(bytes[lead]) {
        return Err(ctx.malformed(
            "expected an attribute name",
            base + lead..base + trimmed_end,
        ));
    }

    let mut i = lead;
    while i < bytes.len() && is_ident_continue(bytes[i]) {
        i += 1;
    }
    let name = &item[lead..i];
    let name_span = base + lead..base + i;

    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if i == bytes.len() {
        return Ok(Attribute {
            name,
            arg: None,
            span: name_span,
        });
    }
    if bytes[i] != b'(' {
        return Err(ctx.malformed(
            format!("unexpected text after attribute `{}`", name),
            base + i..base + trimmed_end,
        ));
    }

    // split_items guarantees the parentheses balance within the item.
    let open = i;
    let mut depth = 0usize;
    let mut close = open;
    while close < bytes.len() {
        match bytes[close] {
            b'"' => close = skip_string(bytes, close),
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            _ => {}
        }
        close += 1;
    }

    if close + 1 < trimmed_end {
        return Err(ctx.malformed(
            format!("unexpected text after `{}(...)`", name),
            base + close + 1..base + trimmed_end,
        ));
    }

    let raw = &item[open + 1..close];
    let arg_lead = raw.len() - raw.trim_start().len();
    let arg = raw.trim();
    let arg_start = base + open + 1 + arg_lead;

    Ok(Attribute {
        name,
        arg: Some(arg),
        span: arg_start..arg_start + arg.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(text: &str) -> Vec<(String, Option<String>)> {
        let ctx = SourceContext::new(text, "test.idl");
        parse(&ctx, text, 0)
            .unwrap()
            .into_iter()
            .map(|a| (a.name.to_string(), a.arg.map(str::to_string)))
            .collect()
    }

    fn parse_err(text: &str) -> String {
        let ctx = SourceContext::new(text, "test.idl");
        match *parse(&ctx, text, 0).unwrap_err() {
            crate::Error::MalformedAttributes { reason, .. } => reason,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_flags_and_arguments() {
        assert_eq!(
            parse_ok(" uuid(ABC), version( 1.0 ), helpstring(\"x, (y)\"), noncreatable "),
            vec![
                ("uuid".to_string(), Some("ABC".to_string())),
                ("version".to_string(), Some("1.0".to_string())),
                ("helpstring".to_string(), Some("\"x, (y)\"".to_string())),
                ("noncreatable".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_nested_parentheses_stay_in_one_item() {
        assert_eq!(
            parse_ok("custom(a, (b, c))"),
            vec![("custom".to_string(), Some("a, (b, c)".to_string()))]
        );
    }

    #[test]
    fn test_empty_block() {
        assert!(parse_ok("   ").is_empty());
    }

    #[test]
    fn test_span_points_at_argument() {
        let src = "[uuid( ABC )]";
        let ctx = SourceContext::new(src, "test.idl");
        let attrs = parse(&ctx, &src[1..12], 1).unwrap();
        assert_eq!(&src[attrs[0].span.clone()], "ABC");
    }

    #[test]
    fn test_unquoted_arg() {
        let ctx = SourceContext::new("", "test.idl");
        let attrs = parse(&ctx, "uuid(\"ABC\")", 0).unwrap();
        assert_eq!(attrs[0].unquoted_arg(), Some("ABC"));
    }

    #[test]
    fn test_malformed_items() {
        assert_eq!(parse_err("uuid(a),"), "empty attribute");
        assert_eq!(parse_err("uuid(a),,version(1)"), "empty attribute");
        assert_eq!(parse_err("uuid(a"), "unclosed `(`");
        assert_eq!(parse_err("uuid a)"), "unmatched `)`");
        assert_eq!(parse_err("42"), "expected an attribute name");
        assert_eq!(parse_err("uuid(a) b"), "unexpected text after `uuid(...)`");
        assert_eq!(parse_err("uuid = a"), "unexpected text after attribute `uuid`");
    }
}
