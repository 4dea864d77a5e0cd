//! Convenience predicates on tokens, used heavily by the parser.

use crate::lexer::tokens::{Token, TokenKind};
use drover_core::lang::builtins::BuiltinFn;
use drover_core::lang::keywords::KeywordId;
use drover_core::lang::operators::OperatorId;
use drover_core::lang::punctuation::PunctuationId;

impl Token {
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(&self.kind, TokenKind::Keyword(k) if *k == id)
    }

    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(&self.kind, TokenKind::Operator(op) if *op == id)
    }

    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(&self.kind, TokenKind::Punctuation(p) if *p == id)
    }

    pub fn is_newline(&self) -> bool {
        matches!(self.kind, TokenKind::Newline)
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    pub fn keyword_id(&self) -> Option<KeywordId> {
        match &self.kind {
            TokenKind::Keyword(k) => Some(*k),
            _ => None,
        }
    }

    pub fn operator_id(&self) -> Option<OperatorId> {
        match &self.kind {
            TokenKind::Operator(op) => Some(*op),
            _ => None,
        }
    }

    pub fn builtin_fn(&self) -> Option<BuiltinFn> {
        match &self.kind {
            TokenKind::Builtin(b) => Some(*b),
            _ => None,
        }
    }

    pub fn ident_name(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }
}
