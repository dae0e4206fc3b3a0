use super::*;

struct StartTag {
    name: String,
    attrs: HashMap<String, String>,
    self_closing: bool,
}

/// Position in the fixture source. Markup delimiters are ASCII, so every
/// place the cursor stops at is a char boundary.
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn starts_with(&self, needle: &str) -> bool {
        self.rest().starts_with(needle)
    }

    fn bump(&mut self, len: usize) {
        self.pos = (self.pos + len).min(self.src.len());
    }

    fn skip_ws(&mut self) {
        self.take_while(|b| b.is_ascii_whitespace());
    }

    fn take_while(&mut self, accept: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&accept) {
            self.pos += 1;
        }
        &self.src[start..self.pos]
    }

    /// Text before the next `needle`; the cursor ends up past the needle.
    fn take_until(&mut self, needle: &str) -> Option<&'a str> {
        let rest = self.rest();
        let offset = rest.find(needle)?;
        self.pos += offset + needle.len();
        Some(&rest[..offset])
    }

    fn take_text(&mut self) -> &'a str {
        let rest = self.rest();
        let len = rest.find('<').unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }
}

pub(crate) fn parse_html(html: &str) -> Result<Dom> {
    let mut dom = Dom::new();
    let mut open = vec![dom.root];
    let mut cursor = Cursor::new(html);

    while !cursor.at_end() {
        if cursor.starts_with("<!--") {
            cursor.bump(4);
            cursor
                .take_until("-->")
                .ok_or_else(|| Error::HtmlParse("unclosed HTML comment".into()))?;
        } else if cursor.starts_with("</") {
            let tag = read_end_tag(&mut cursor)?;
            close_element(&dom, &mut open, &tag);
        } else if cursor.starts_with("<!") {
            cursor
                .take_until(">")
                .ok_or_else(|| Error::HtmlParse("unclosed declaration tag".into()))?;
        } else if cursor.starts_with("<") {
            let tag = read_start_tag(&mut cursor)?;
            close_implied_elements(&dom, &mut open, &tag.name);
            let parent = innermost(&open)?;
            let node = dom.create_element(parent, tag.name.clone(), tag.attrs);
            if tag.self_closing {
                continue;
            }
            if is_raw_text_tag(&tag.name) {
                read_raw_text(&mut dom, &mut cursor, node, &tag.name)?;
            } else if !is_void_tag(&tag.name) {
                open.push(node);
            }
        } else {
            let text = decode_character_references(cursor.take_text());
            if !text.is_empty() {
                dom.create_text(innermost(&open)?, text);
            }
        }
    }

    Ok(dom)
}

fn innermost(open: &[NodeId]) -> Result<NodeId> {
    open.last()
        .copied()
        .ok_or_else(|| Error::HtmlParse("missing parent element".into()))
}

// An end tag closes the innermost open element with that name and
// everything inside it. Without one it is dropped.
fn close_element(dom: &Dom, open: &mut Vec<NodeId>, tag: &str) {
    if let Some(index) = open
        .iter()
        .skip(1)
        .rposition(|node| dom.tag_name(*node) == Some(tag))
    {
        open.truncate(index + 1);
    }
}

/// `<li>` ends an open `<li>` of the same list, and block elements end an
/// open `<p>`.
fn close_implied_elements(dom: &Dom, open: &mut Vec<NodeId>, tag: &str) {
    let (implied, boundaries): (&str, &[&str]) = if tag == "li" {
        ("li", &["ol", "ul"])
    } else if ends_paragraph(tag) {
        ("p", &[])
    } else {
        return;
    };

    for index in (1..open.len()).rev() {
        match dom.tag_name(open[index]) {
            Some(name) if name == implied => {
                open.truncate(index);
                return;
            }
            Some(name) if boundaries.contains(&name) => return,
            _ => {}
        }
    }
}

fn ends_paragraph(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "div"
            | "ul"
            | "ol"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "section"
            | "article"
            | "header"
            | "footer"
            | "nav"
            | "main"
            | "form"
            | "table"
            | "pre"
            | "blockquote"
            | "hr"
    )
}

fn is_raw_text_tag(tag: &str) -> bool {
    matches!(tag, "script" | "style" | "title" | "textarea")
}

pub(crate) fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
            | "source" | "track" | "wbr"
    )
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn is_attr_name_byte(b: u8) -> bool {
    is_name_byte(b) || b == b':'
}

fn read_start_tag(cursor: &mut Cursor<'_>) -> Result<StartTag> {
    cursor.bump(1);
    cursor.skip_ws();
    let name = cursor.take_while(is_name_byte).to_ascii_lowercase();
    if name.is_empty() {
        return Err(Error::HtmlParse("empty tag name".into()));
    }

    let mut attrs = HashMap::new();
    loop {
        cursor.skip_ws();
        match cursor.peek() {
            None => return Err(Error::HtmlParse(format!("unclosed start tag <{name}"))),
            Some(b'>') => {
                cursor.bump(1);
                return Ok(StartTag {
                    name,
                    attrs,
                    self_closing: false,
                });
            }
            Some(b'/') if cursor.starts_with("/>") => {
                cursor.bump(2);
                return Ok(StartTag {
                    name,
                    attrs,
                    self_closing: true,
                });
            }
            Some(b) if is_attr_name_byte(b) => {
                let attr = cursor.take_while(is_attr_name_byte).to_ascii_lowercase();
                cursor.skip_ws();
                let value = if cursor.peek() == Some(b'=') {
                    cursor.bump(1);
                    cursor.skip_ws();
                    read_attr_value(cursor)?
                } else {
                    String::new()
                };
                // First occurrence wins.
                attrs.entry(attr).or_insert(value);
            }
            Some(_) => {
                cursor.take_while(|b| !b.is_ascii_whitespace() && b != b'>' && b != b'/');
                if cursor.peek() == Some(b'/') && !cursor.starts_with("/>") {
                    cursor.bump(1);
                }
            }
        }
    }
}

fn read_attr_value(cursor: &mut Cursor<'_>) -> Result<String> {
    match cursor.peek() {
        None => Err(Error::HtmlParse("missing attribute value".into())),
        Some(quote @ (b'"' | b'\'')) => {
            cursor.bump(1);
            let closing = if quote == b'"' { "\"" } else { "'" };
            let raw = cursor
                .take_until(closing)
                .ok_or_else(|| Error::HtmlParse("unclosed quoted attribute value".into()))?;
            Ok(decode_character_references(raw))
        }
        Some(_) => {
            let raw = cursor.take_while(|b| !b.is_ascii_whitespace() && b != b'>');
            // `<input value=x/>` keeps the slash for the self-closing marker.
            let raw = match raw.strip_suffix('/') {
                Some(trimmed) if cursor.peek() == Some(b'>') => {
                    cursor.pos -= 1;
                    trimmed
                }
                _ => raw,
            };
            Ok(decode_character_references(raw))
        }
    }
}

fn read_end_tag(cursor: &mut Cursor<'_>) -> Result<String> {
    cursor.bump(2);
    cursor.skip_ws();
    let name = cursor.take_while(is_name_byte).to_ascii_lowercase();
    cursor
        .take_until(">")
        .ok_or_else(|| Error::HtmlParse(format!("unclosed end tag </{name}")))?;
    Ok(name)
}

/// Copies everything up to the matching end tag verbatim. A textarea also
/// takes it as its value.
fn read_raw_text(dom: &mut Dom, cursor: &mut Cursor<'_>, node: NodeId, tag: &str) -> Result<()> {
    let rest = cursor.rest();
    let len = raw_text_len(rest, tag).ok_or_else(|| Error::HtmlParse(format!("unclosed <{tag}>")))?;
    let body = &rest[..len];
    cursor.bump(len);
    if !body.is_empty() {
        dom.create_text(node, body.to_string());
    }
    if tag == "textarea" {
        dom.set_value(node, body);
    }
    read_end_tag(cursor)?;
    Ok(())
}

fn raw_text_len(rest: &str, tag: &str) -> Option<usize> {
    rest.match_indices("</").map(|(index, _)| index).find(|index| {
        rest.get(index + 2..index + 2 + tag.len())
            .is_some_and(|name| name.eq_ignore_ascii_case(tag))
    })
}

fn decode_character_references(src: &str) -> String {
    if !src.contains('&') {
        return src.to_string();
    }

    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let reference = after
            .find(';')
            .and_then(|end| Some((character_reference(&after[..end])?, end + 1)));
        match reference {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &after[consumed..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn character_reference(name: &str) -> Option<char> {
    if let Some(numeric) = name.strip_prefix('#') {
        let codepoint = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return char::from_u32(codepoint);
    }
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{00A0}'),
        "copy" => Some('©'),
        _ => None,
    }
}
