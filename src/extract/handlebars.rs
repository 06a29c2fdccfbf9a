// Copyright 2023 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Gettext calls in Handlebars templates.
//!
//! A call is a configured helper at the start of a mustache or of a
//! subexpression, such as `{{_ "Hello"}}` or `{{link (p_ "nav" "Home")}}`.
//! Its arguments are matched against the helper's [`ArgumentRoles`];
//! only string literals are extracted.

use super::{Extraction, Extractor, TranslationCallRecord};
use crate::config::{ArgumentRoles, HelperRoles};
use anyhow::{anyhow, bail};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Extracts gettext helper calls from Handlebars templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandlebarsExtractor;

impl Extractor for HandlebarsExtractor {
    fn extract(&self, source: &str, roles: &HelperRoles) -> anyhow::Result<Extraction> {
        let template = Template::new(source);
        let mut extraction = Extraction::new();
        for (body_start, body) in template.mustaches()? {
            let tokens = template.tokenize(body, body_start)?;
            let nodes = template.parse_sequence(&mut tokens.into_iter(), None)?;
            template.collect_calls(&nodes, roles, &mut extraction);
        }
        Ok(extraction)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token<'a> {
    Literal(&'a str),
    Word(&'a str),
    /// The `key=` part of a hash argument.
    HashKey,
    Open,
    Close,
}

#[derive(Debug, PartialEq)]
enum Node<'a> {
    Literal(&'a str),
    Word { name: &'a str, offset: usize },
    Group(Vec<Node<'a>>),
    Hash(Option<Box<Node<'a>>>),
}

struct Template<'a> {
    source: &'a str,
    /// Offsets of each newline, used to turn byte offsets into line
    /// numbers.
    newlines: Vec<usize>,
}

impl<'a> Template<'a> {
    fn new(source: &'a str) -> Self {
        let newlines = source
            .match_indices('\n')
            .map(|(offset, _)| offset)
            .collect();
        Self { source, newlines }
    }

    fn line(&self, offset: usize) -> usize {
        self.newlines.partition_point(|&o| o < offset) + 1
    }

    /// The bodies of all mustaches with their byte offset, skipping
    /// comments, whitespace control and block sigils.
    ///
    /// A mustache ends at the first `}}` outside of a string literal.
    fn mustaches(&self) -> anyhow::Result<Vec<(usize, &'a str)>> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            let pattern = r"(?x)
                  \{\{
                  (?<triple>\{)?         # triple-stash
                  (?<comment>!(?:--)?)?  # comment or block comment
            ";
            Regex::new(pattern).expect("well-formed regex")
        });

        let source = self.source;
        let mut mustaches = Vec::new();
        let mut pos = 0;
        while let Some(captures) = re.captures_at(source, pos) {
            let Some(opening) = captures.get(0) else {
                break;
            };
            let body_start = opening.end();

            if let Some(comment) = captures.name("comment") {
                let terminator = if comment.as_str() == "!--" { "--}}" } else { "}}" };
                match source[body_start..].find(terminator) {
                    Some(idx) => pos = body_start + idx + terminator.len(),
                    None => break,
                }
                continue;
            }

            let Some(body_len) = self.closing_braces(body_start)? else {
                break;
            };
            let text = &source[body_start..body_start + body_len];
            pos = body_start + body_len + 2;
            if captures.name("triple").is_some() && source[pos..].starts_with('}') {
                pos += 1;
            }

            let trimmed = text.trim_start_matches('~');
            let trimmed = trimmed.strip_prefix(['#', '&']).unwrap_or(trimmed);
            let start = body_start + (text.len() - trimmed.len());
            mustaches.push((start, trimmed.trim_end_matches('~')));
        }
        Ok(mustaches)
    }

    /// Length of the mustache body starting at `body_start`, up to the
    /// closing `}}`. `None` if the mustache is never closed.
    fn closing_braces(&self, body_start: usize) -> anyhow::Result<Option<usize>> {
        let text = &self.source[body_start..];
        let mut quote = None;
        let mut chars = text.char_indices();
        while let Some((idx, ch)) = chars.next() {
            match quote {
                Some((delimiter, _)) => {
                    if ch == '\\' {
                        chars.next();
                    } else if ch == delimiter {
                        quote = None;
                    }
                }
                None => match ch {
                    '"' | '\'' => quote = Some((ch, idx)),
                    '}' if text[idx..].starts_with("}}") => return Ok(Some(idx)),
                    _ => {}
                },
            }
        }
        match quote {
            Some((_, idx)) => bail!(
                "Unterminated string literal on line {}",
                self.line(body_start + idx)
            ),
            None => Ok(None),
        }
    }

    fn tokenize(
        &self,
        body: &'a str,
        body_start: usize,
    ) -> anyhow::Result<Vec<(usize, Token<'a>)>> {
        let mut tokens = Vec::new();
        let mut chars = body.char_indices().peekable();
        while let Some(&(start, ch)) = chars.peek() {
            let offset = body_start + start;
            match ch {
                _ if ch.is_whitespace() => {
                    chars.next();
                }
                '(' | ')' => {
                    chars.next();
                    let token = if ch == '(' { Token::Open } else { Token::Close };
                    tokens.push((offset, token));
                }
                '"' | '\'' => {
                    chars.next();
                    let mut end = None;
                    while let Some((idx, c)) = chars.next() {
                        if c == '\\' {
                            chars.next();
                        } else if c == ch {
                            end = Some(idx);
                            break;
                        }
                    }
                    let end = end.ok_or_else(|| {
                        anyhow!("Unterminated string literal on line {}", self.line(offset))
                    })?;
                    tokens.push((offset, Token::Literal(&body[start + 1..end])));
                }
                _ => {
                    let mut end = body.len();
                    while let Some(&(idx, c)) = chars.peek() {
                        if c.is_whitespace() || matches!(c, '(' | ')' | '"' | '\'') {
                            end = idx;
                            break;
                        }
                        chars.next();
                        if c == '=' {
                            end = idx + 1;
                            break;
                        }
                    }
                    let word = &body[start..end];
                    let token = if word.ends_with('=') {
                        Token::HashKey
                    } else {
                        Token::Word(word)
                    };
                    tokens.push((offset, token));
                }
            }
        }
        Ok(tokens)
    }

    /// Parse tokens up to the `)` matching the `(` at `open`, or up to
    /// the end of the mustache if `open` is `None`.
    fn parse_sequence<I>(
        &self,
        tokens: &mut I,
        open: Option<usize>,
    ) -> anyhow::Result<Vec<Node<'a>>>
    where
        I: Iterator<Item = (usize, Token<'a>)>,
    {
        let mut nodes = Vec::new();
        while let Some((offset, token)) = tokens.next() {
            if token == Token::Close {
                if open.is_none() {
                    bail!("Unexpected `)` on line {}", self.line(offset));
                }
                return Ok(nodes);
            }
            nodes.push(self.parse_node(offset, token, tokens)?);
        }
        match open {
            Some(offset) => bail!("Unclosed `(` on line {}", self.line(offset)),
            None => Ok(nodes),
        }
    }

    fn parse_node<I>(
        &self,
        offset: usize,
        token: Token<'a>,
        tokens: &mut I,
    ) -> anyhow::Result<Node<'a>>
    where
        I: Iterator<Item = (usize, Token<'a>)>,
    {
        Ok(match token {
            Token::Literal(value) => Node::Literal(value),
            Token::Word(name) => Node::Word { name, offset },
            Token::Open => Node::Group(self.parse_sequence(tokens, Some(offset))?),
            Token::HashKey => match tokens.next() {
                Some((value_offset, value)) => {
                    Node::Hash(Some(Box::new(self.parse_node(value_offset, value, tokens)?)))
                }
                None => Node::Hash(None),
            },
            Token::Close => bail!("Unexpected `)` on line {}", self.line(offset)),
        })
    }

    fn collect_calls(
        &self,
        nodes: &[Node<'a>],
        roles: &HelperRoles,
        extraction: &mut Extraction,
    ) {
        if let Some((Node::Word { name, offset }, args)) = nodes.split_first() {
            if let Some(helper_roles) = roles.get(*name) {
                self.add_call(name, self.line(*offset), args, helper_roles, extraction);
            }
        }
        for node in nodes {
            match node {
                Node::Group(children) => self.collect_calls(children, roles, extraction),
                Node::Hash(Some(value)) => {
                    if let Node::Group(children) = value.as_ref() {
                        self.collect_calls(children, roles, extraction);
                    }
                }
                _ => {}
            }
        }
    }

    fn add_call(
        &self,
        helper: &str,
        lineno: usize,
        args: &[Node<'a>],
        roles: &ArgumentRoles,
        extraction: &mut Extraction,
    ) {
        let positional = args
            .iter()
            .filter(|arg| !matches!(arg, Node::Hash(_)))
            .collect::<Vec<_>>();
        let literal = |position: usize| match positional.get(position) {
            Some(Node::Literal(value)) => Some(*value),
            _ => None,
        };

        let Some(msgid) = literal(roles.msgid) else {
            debug!("Skipping {helper} on line {lineno}: msgid is not a string literal");
            return;
        };
        let key = (0..roles.arity())
            .filter_map(|position| literal(position).map(|value| format!("\"{value}\"")))
            .collect::<Vec<_>>()
            .join(" ");
        let record = TranslationCallRecord {
            msgid: String::from(msgid),
            msgid_plural: roles
                .msgid_plural
                .and_then(literal)
                .filter(|value| !value.is_empty())
                .map(String::from),
            msgctxt: roles
                .msgctxt
                .and_then(literal)
                .filter(|value| !value.is_empty())
                .map(String::from),
            line_numbers: vec![lineno],
        };
        extraction.insert(format!("{helper}:{key}"), record);
    }
}
