//! Tolerant scanner for attributed declarations.
//!
//! The scanner does not understand IDL. It walks the text skipping comments
//! and literals, treats every balanced `[ ... ]` as a candidate attribute
//! block, and only keeps blocks that are directly followed by `library` or
//! `coclass` and a name. Everything else is ignored.

use std::ops::Range;

use crate::{Result, attrs::Attribute, error::SourceContext};

/// Kind of declaration extracted from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeclKind {
    Library,
    CoClass,
}

impl DeclKind {
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            DeclKind::Library => "library",
            DeclKind::CoClass => "coclass",
        }
    }

    fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "library" => Some(DeclKind::Library),
            "coclass" => Some(DeclKind::CoClass),
            _ => None,
        }
    }
}

/// An attributed declaration, e.g. `[uuid(...), version(1.0)] coclass Foo`.
#[derive(Debug)]
pub(crate) struct Declaration<'a> {
    pub kind: DeclKind,
    pub name: &'a str,
    pub name_span: Range<usize>,
    pub attrs: Vec<Attribute<'a>>,
}

pub(crate) struct Scanner<'a> {
    ctx: &'a SourceContext,
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(ctx: &'a SourceContext) -> Self {
        let src = ctx.src();
        Self {
            ctx,
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    /// Collect every attributed `library` and `coclass` declaration in source order.
    pub(crate) fn declarations(mut self) -> Result<Vec<Declaration<'a>>> {
        let mut decls = Vec::new();

        loop {
            self.skip_trivia();
            let Some(b) = self.peek() else { break };

            match b {
                b'"' | b'\'' => self.skip_quoted(b),
                b'[' => {
                    let inner = self.bracket_block()?;
                    if let Some(decl) = self.declaration_after(inner)? {
                        tracing::trace!(kind = decl.kind.keyword(), name = decl.name, "found declaration");
                        decls.push(decl);
                    }
                }
                b if is_ident_start(b) => {
                    self.ident();
                }
                _ => self.pos += 1,
            }
        }

        Ok(decls)
    }

    fn declaration_after(&mut self, inner: Range<usize>) -> Result<Option<Declaration<'a>>> {
        self.skip_trivia();
        let start = self.pos;
        let Some((word, keyword_span)) = self.ident() else {
            return Ok(None);
        };
        let Some(kind) = DeclKind::from_keyword(word) else {
            // Not a declaration we care about; rescan from the word.
            self.pos = start;
            return Ok(None);
        };

        self.skip_trivia();
        let Some((name, name_span)) = self.ident() else {
            return Err(self.ctx.missing_name(kind.keyword(), keyword_span));
        };

        let attrs = crate::attrs::parse(self.ctx, &self.src[inner.clone()], inner.start)?;

        Ok(Some(Declaration {
            kind,
            name,
            name_span,
            attrs,
        }))
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// Skip whitespace, line comments and block comments.
    fn skip_trivia(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if !self.skip_comment() {
                break;
            }
        }
    }

    fn skip_comment(&mut self) -> bool {
        match (self.peek(), self.peek_at(1)) {
            (Some(b'/'), Some(b'/')) => {
                while let Some(b) = self.peek() {
                    if b == b'\n' {
                        break;
                    }
                    self.pos += 1;
                }
                true
            }
            (Some(b'/'), Some(b'*')) => {
                self.pos += 2;
                while self.pos < self.bytes.len() {
                    if self.peek() == Some(b'*') && self.peek_at(1) == Some(b'/') {
                        self.pos += 2;
                        return true;
                    }
                    self.pos += 1;
                }
                true
            }
            _ => false,
        }
    }

    /// Skip a string or character literal starting at the current quote.
    ///
    /// An unterminated literal runs to the end of the source.
    fn skip_quoted(&mut self, quote: u8) {
        self.pos += 1;
        while let Some(b) = self.peek() {
            self.pos += 1;
            if b == b'\\' {
                self.pos += 1;
            } else if b == quote {
                return;
            }
        }
        self.pos = self.pos.min(self.bytes.len());
    }

    fn ident(&mut self) -> Option<(&'a str, Range<usize>)> {
        let start = self.pos;
        if !self.peek().is_some_and(is_ident_start) {
            return None;
        }
        while self.peek().is_some_and(is_ident_continue) {
            self.pos += 1;
        }
        Some((&self.src[start..self.pos], start..self.pos))
    }

    /// Consume a balanced `[ ... ]` block and return the range of its contents.
    fn bracket_block(&mut self) -> Result<Range<usize>> {
        let open = self.pos;
        self.pos += 1;
        let mut depth = 1usize;

        while let Some(b) = self.peek() {
            match b {
                b'"' | b'\'' => self.skip_quoted(b),
                b'/' if self.skip_comment() => {}
                b'[' => {
                    depth += 1;
                    self.pos += 1;
                }
                b']' => {
                    depth -= 1;
                    self.pos += 1;
                    if depth == 0 {
                        return Ok(open + 1..self.pos - 1);
                    }
                }
                _ => self.pos += 1,
            }
        }

        Err(self.ctx.malformed("unterminated attribute block", open..open + 1))
    }
}

pub(crate) fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

pub(crate) fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
