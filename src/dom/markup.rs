//! Markup tokenizer
//!
//! A small state machine over the markup the renderers emit: start and end
//! tags with quoted or bare attributes, text, and comments/doctypes (skipped).
//! `<script>` and `<style>` bodies are raw text. It is not a conforming HTML
//! parser and does not need to be.

use crate::html::unescape_html;

/// Elements that never have children.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose body is kept as raw text.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

pub fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupToken {
    StartTag {
        tag: String,
        attributes: Vec<(String, String)>,
        self_closing: bool,
    },
    EndTag {
        tag: String,
    },
    /// Decoded text run.
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Data,
    TagOpen,
    EndTagOpen,
    TagName,
    BeforeAttributeName,
    AttributeName,
    AfterAttributeName,
    BeforeAttributeValue,
    AttributeValueDoubleQuoted,
    AttributeValueSingleQuoted,
    AttributeValueUnquoted,
    SelfClosingStartTag,
    Bogus,
    RawText,
}

#[derive(Debug)]
pub struct MarkupTokenizer {
    input: Vec<char>,
    pos: usize,
    state: State,
    /// Tag being built, with the attribute currently being named/valued.
    tag: String,
    is_end: bool,
    self_closing: bool,
    attributes: Vec<(String, String)>,
    /// Open raw-text element, if inside one.
    raw_tag: Option<String>,
}

impl MarkupTokenizer {
    pub fn new(markup: &str) -> Self {
        Self {
            input: markup.chars().collect(),
            pos: 0,
            state: State::Data,
            tag: String::new(),
            is_end: false,
            self_closing: false,
            attributes: Vec::new(),
            raw_tag: None,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        let mut i = self.pos;
        for c in s.chars() {
            match self.input.get(i) {
                Some(x) if x.eq_ignore_ascii_case(&c) => i += 1,
                _ => return false,
            }
        }
        true
    }

    fn begin_tag(&mut self, is_end: bool) {
        self.tag.clear();
        self.is_end = is_end;
        self.self_closing = false;
        self.attributes.clear();
    }

    fn emit_tag(&mut self) -> MarkupToken {
        self.state = State::Data;
        let tag = std::mem::take(&mut self.tag);
        if self.is_end {
            return MarkupToken::EndTag { tag };
        }
        if is_raw_text(&tag) && !self.self_closing {
            self.raw_tag = Some(tag.clone());
            self.state = State::RawText;
        }
        MarkupToken::StartTag {
            tag,
            attributes: std::mem::take(&mut self.attributes),
            self_closing: self.self_closing,
        }
    }

    fn current_attribute(&mut self) -> &mut (String, String) {
        if self.attributes.is_empty() {
            self.attributes.push((String::new(), String::new()));
        }
        let last = self.attributes.len() - 1;
        &mut self.attributes[last]
    }

    fn finish_attribute_value(&mut self) {
        let attr = self.current_attribute();
        attr.1 = unescape_html(&attr.1);
    }

    /// `<` at the cursor followed by something that starts a tag.
    fn opens_markup(&self) -> bool {
        self.peek() == Some('<')
            && matches!(
                self.input.get(self.pos + 1).copied(),
                Some(n) if n.is_ascii_alphabetic() || matches!(n, '/' | '!' | '?')
            )
    }

    /// Text up to the next `<` that could open markup.
    fn read_text(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if self.opens_markup() {
                break;
            }
            text.push(c);
            self.pos += 1;
        }
        unescape_html(&text)
    }

    /// Raw body of a script/style element, up to its closing tag.
    fn read_raw_text(&mut self) -> Option<MarkupToken> {
        let closing = format!("</{}", self.raw_tag.as_deref().unwrap_or_default());
        let mut text = String::new();
        while self.peek().is_some() && !self.starts_with(&closing) {
            text.push(self.input[self.pos]);
            self.pos += 1;
        }
        self.raw_tag = None;
        self.state = State::Data;
        (!text.is_empty()).then_some(MarkupToken::Text(text))
    }
}

impl Iterator for MarkupTokenizer {
    type Item = MarkupToken;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.state == State::RawText {
                if let Some(token) = self.read_raw_text() {
                    return Some(token);
                }
                continue;
            }

            if self.state == State::Data {
                self.peek()?;
                if !self.opens_markup() {
                    let text = self.read_text();
                    if !text.is_empty() {
                        return Some(MarkupToken::Text(text));
                    }
                    if self.peek().is_none() {
                        return None;
                    }
                    continue;
                }
                if self.starts_with("<!--") {
                    self.pos += 4;
                    while self.peek().is_some() && !self.starts_with("-->") {
                        self.pos += 1;
                    }
                    self.pos = (self.pos + 3).min(self.input.len());
                    continue;
                }
                self.pos += 1;
                self.state = State::TagOpen;
                continue;
            }

            let Some(c) = self.peek() else {
                // unterminated tag at end of input is dropped
                return None;
            };
            self.pos += 1;

            match self.state {
                State::TagOpen => match c {
                    '/' => self.state = State::EndTagOpen,
                    '!' | '?' => self.state = State::Bogus,
                    c if c.is_ascii_alphabetic() => {
                        self.begin_tag(false);
                        self.tag.push(c.to_ascii_lowercase());
                        self.state = State::TagName;
                    }
                    _ => self.state = State::Data,
                },
                State::EndTagOpen => {
                    if c.is_ascii_alphabetic() {
                        self.begin_tag(true);
                        self.tag.push(c.to_ascii_lowercase());
                        self.state = State::TagName;
                    } else {
                        self.state = State::Bogus;
                    }
                }
                State::Bogus => {
                    if c == '>' {
                        self.state = State::Data;
                    }
                }
                State::TagName => match c {
                    '>' => return Some(self.emit_tag()),
                    '/' => self.state = State::SelfClosingStartTag,
                    c if c.is_whitespace() => self.state = State::BeforeAttributeName,
                    c => self.tag.push(c.to_ascii_lowercase()),
                },
                State::BeforeAttributeName => match c {
                    '>' => return Some(self.emit_tag()),
                    '/' => self.state = State::SelfClosingStartTag,
                    c if c.is_whitespace() => {}
                    c => {
                        self.attributes
                            .push((c.to_ascii_lowercase().to_string(), String::new()));
                        self.state = State::AttributeName;
                    }
                },
                State::AttributeName => match c {
                    '=' => self.state = State::BeforeAttributeValue,
                    '>' => return Some(self.emit_tag()),
                    '/' => self.state = State::SelfClosingStartTag,
                    c if c.is_whitespace() => self.state = State::AfterAttributeName,
                    c => self.current_attribute().0.push(c.to_ascii_lowercase()),
                },
                State::AfterAttributeName => match c {
                    '=' => self.state = State::BeforeAttributeValue,
                    '>' => return Some(self.emit_tag()),
                    '/' => self.state = State::SelfClosingStartTag,
                    c if c.is_whitespace() => {}
                    c => {
                        self.attributes
                            .push((c.to_ascii_lowercase().to_string(), String::new()));
                        self.state = State::AttributeName;
                    }
                },
                State::BeforeAttributeValue => match c {
                    '"' => self.state = State::AttributeValueDoubleQuoted,
                    '\'' => self.state = State::AttributeValueSingleQuoted,
                    '>' => return Some(self.emit_tag()),
                    c if c.is_whitespace() => {}
                    c => {
                        self.current_attribute().1.push(c);
                        self.state = State::AttributeValueUnquoted;
                    }
                },
                State::AttributeValueDoubleQuoted => match c {
                    '"' => {
                        self.finish_attribute_value();
                        self.state = State::BeforeAttributeName;
                    }
                    c => self.current_attribute().1.push(c),
                },
                State::AttributeValueSingleQuoted => match c {
                    '\'' => {
                        self.finish_attribute_value();
                        self.state = State::BeforeAttributeName;
                    }
                    c => self.current_attribute().1.push(c),
                },
                State::AttributeValueUnquoted => match c {
                    '>' => {
                        self.finish_attribute_value();
                        return Some(self.emit_tag());
                    }
                    c if c.is_whitespace() => {
                        self.finish_attribute_value();
                        self.state = State::BeforeAttributeName;
                    }
                    c => self.current_attribute().1.push(c),
                },
                State::SelfClosingStartTag => match c {
                    '>' => {
                        self.self_closing = true;
                        return Some(self.emit_tag());
                    }
                    c if c.is_whitespace() => {}
                    _ => {
                        self.pos -= 1;
                        self.state = State::BeforeAttributeName;
                    }
                },
                // handled above
                State::Data | State::RawText => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(tag: &str, attributes: &[(&str, &str)], self_closing: bool) -> MarkupToken {
        MarkupToken::StartTag {
            tag: tag.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            self_closing,
        }
    }

    fn end(tag: &str) -> MarkupToken {
        MarkupToken::EndTag { tag: tag.to_string() }
    }

    fn text(s: &str) -> MarkupToken {
        MarkupToken::Text(s.to_string())
    }

    #[test]
    fn test_tags_attributes_and_text() {
        let tokens: Vec<_> =
            MarkupTokenizer::new(r#"<div id="a" class='b c' hidden>x &amp; y</div>"#).collect();
        assert_eq!(
            tokens,
            vec![
                start("div", &[("id", "a"), ("class", "b c"), ("hidden", "")], false),
                text("x & y"),
                end("div"),
            ]
        );
    }

    #[test]
    fn test_self_closing_and_comments() {
        let tokens: Vec<_> = MarkupTokenizer::new("<!-- note --><br/><img src=x.png>").collect();
        assert_eq!(
            tokens,
            vec![start("br", &[], true), start("img", &[("src", "x.png")], false)]
        );
    }

    #[test]
    fn test_handler_attribute_keeps_quotes() {
        let tokens: Vec<_> =
            MarkupTokenizer::new(r#"<button onclick="go('a', 'b')">Go</button>"#).collect();
        assert_eq!(tokens[0], start("button", &[("onclick", "go('a', 'b')")], false));
    }

    #[test]
    fn test_style_body_is_raw() {
        let tokens: Vec<_> = MarkupTokenizer::new("<style>a > b { x: 1 }</style><p>t</p>").collect();
        assert_eq!(
            tokens,
            vec![
                start("style", &[], false),
                text("a > b { x: 1 }"),
                end("style"),
                start("p", &[], false),
                text("t"),
                end("p"),
            ]
        );
    }

    #[test]
    fn test_lone_less_than_is_text() {
        let tokens: Vec<_> = MarkupTokenizer::new("1 < 2").collect();
        assert_eq!(tokens, vec![text("1 < 2")]);
    }
}
