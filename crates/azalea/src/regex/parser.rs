//! Pattern tokenizer and infix-to-postfix conversion.

use super::class::{CharClass, ClassUniverse};
use crate::error::{PatternError, PatternErrorKind, PatternResult};
use compact_str::CompactString;
use std::fmt;

/// Largest bound accepted in `{m,n}`.
pub const REPEAT_LIMIT: u32 = 1000;

/// One token of a pattern, tagged with the char index it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexToken {
    pub kind: RegexTokenKind,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegexTokenKind {
    Literal(char),
    /// Bracket class, shorthand escape or `.`, negation already applied.
    Class(CharClass),
    Union,
    /// Implicit concatenation made explicit before the postfix pass.
    Concat,
    Star,
    Plus,
    Question,
    Repeat { min: u32, max: Option<u32> },
    LParen,
    RParen,
}

impl RegexTokenKind {
    const fn precedence(&self) -> u8 {
        match self {
            Self::Union => 1,
            Self::Concat => 2,
            Self::Star | Self::Plus | Self::Question | Self::Repeat { .. } => 3,
            _ => 0,
        }
    }

    /// Operand-like tokens that may end a concatenation's left side.
    const fn ends_operand(&self) -> bool {
        matches!(
            self,
            Self::Literal(_)
                | Self::Class(_)
                | Self::RParen
                | Self::Star
                | Self::Plus
                | Self::Question
                | Self::Repeat { .. }
        )
    }

    const fn starts_operand(&self) -> bool {
        matches!(self, Self::Literal(_) | Self::Class(_) | Self::LParen)
    }

    /// Name used in `MissingOperand` errors; repetitions show their bounds.
    #[must_use]
    pub fn operator_label(&self) -> CompactString {
        match self {
            Self::Repeat { .. } => self.to_string().into(),
            other => other.operator_name().into(),
        }
    }

    const fn is_operator(&self) -> bool {
        matches!(self, Self::Union | Self::Star | Self::Plus | Self::Question | Self::Repeat { .. })
    }

    #[must_use]
    pub const fn operator_name(&self) -> &'static str {
        match self {
            Self::Union => "|",
            Self::Concat => "concatenation",
            Self::Star => "*",
            Self::Plus => "+",
            Self::Question => "?",
            Self::Repeat { .. } => "{}",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Literal(_) | Self::Class(_) => "operand",
        }
    }
}

impl fmt::Display for RegexTokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(c) => write!(f, "{}", c.escape_debug()),
            Self::Class(class) => {
                f.write_str("[")?;
                for &(lo, hi) in class.ranges() {
                    if lo == hi {
                        write!(f, "{}", lo.escape_debug())?;
                    } else {
                        write!(f, "{}-{}", lo.escape_debug(), hi.escape_debug())?;
                    }
                }
                f.write_str("]")
            }
            Self::Concat => f.write_str("·"),
            Self::Repeat { min, max: Some(max) } if min == max => write!(f, "{{{min}}}"),
            Self::Repeat { min, max: Some(max) } => write!(f, "{{{min},{max}}}"),
            Self::Repeat { min, max: None } => write!(f, "{{{min},}}"),
            other => f.write_str(other.operator_name()),
        }
    }
}

/// Render a postfix stream with spaces between tokens.
#[must_use]
pub fn postfix_string(tokens: &[RegexToken]) -> String {
    tokens
        .iter()
        .map(|t| t.kind.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tokenizer over the characters of one pattern.
pub struct Parser {
    chars: Vec<char>,
    pos: usize,
    universe: ClassUniverse,
}

impl Parser {
    #[must_use]
    pub fn new(pattern: &str, universe: ClassUniverse) -> Self {
        Self {
            chars: pattern.chars().collect(),
            pos: 0,
            universe,
        }
    }

    /// Tokenize, insert explicit concatenation, and reorder to postfix.
    ///
    /// # Errors
    ///
    /// Returns the first [`PatternError`] found, left to right.
    pub fn parse(mut self) -> PatternResult<Vec<RegexToken>> {
        if self.chars.is_empty() {
            return Err(PatternError::new(0, PatternErrorKind::EmptyPattern));
        }
        let tokens = self.tokenize()?;
        Ok(to_postfix(insert_concat(tokens)))
    }

    /// Infix token stream with balanced parentheses.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] for malformed escapes, classes, groups or
    /// quantifiers.
    pub fn tokenize(&mut self) -> PatternResult<Vec<RegexToken>> {
        let mut tokens: Vec<RegexToken> = Vec::new();
        let mut open_groups: Vec<usize> = Vec::new();

        while let Some(c) = self.peek() {
            let offset = self.pos;
            self.pos += 1;

            let kind = match c {
                '\\' => self.escape(offset)?,
                '[' => RegexTokenKind::Class(self.bracket_class(offset)?),
                '.' => RegexTokenKind::Class(CharClass::any(self.universe)),
                '|' => RegexTokenKind::Union,
                '*' => RegexTokenKind::Star,
                '+' => RegexTokenKind::Plus,
                '?' => RegexTokenKind::Question,
                '(' => {
                    if self.peek() == Some(')') {
                        return Err(PatternError::new(offset, PatternErrorKind::EmptyGroup));
                    }
                    open_groups.push(offset);
                    RegexTokenKind::LParen
                }
                ')' => {
                    if open_groups.pop().is_none() {
                        return Err(PatternError::new(offset, PatternErrorKind::UnmatchedParen));
                    }
                    RegexTokenKind::RParen
                }
                '{' => match self.quantifier(offset)? {
                    Some(repeat) => repeat,
                    None => RegexTokenKind::Literal('{'),
                },
                other => RegexTokenKind::Literal(other),
            };

            let prev = tokens.last();
            if kind.is_operator() && prev.is_none_or(|p| matches!(p.kind, RegexTokenKind::LParen | RegexTokenKind::Union)) {
                return Err(missing_operand(offset, &kind));
            }
            if let Some(p) = prev
                && matches!(kind, RegexTokenKind::RParen)
                && matches!(p.kind, RegexTokenKind::Union)
            {
                return Err(missing_operand(p.offset, &p.kind));
            }

            tokens.push(RegexToken { kind, offset });
        }

        if let Some(&offset) = open_groups.last() {
            return Err(PatternError::new(offset, PatternErrorKind::UnclosedGroup));
        }
        if let Some(last) = tokens.last()
            && matches!(last.kind, RegexTokenKind::Union)
        {
            return Err(missing_operand(last.offset, &last.kind));
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    /// Escape after a consumed `\`, outside brackets.
    fn escape(&mut self, offset: usize) -> PatternResult<RegexTokenKind> {
        Ok(match self.escape_atom(offset)? {
            Atom::Char(c) => RegexTokenKind::Literal(c),
            Atom::Class(class) => RegexTokenKind::Class(class),
        })
    }

    fn escape_atom(&mut self, offset: usize) -> PatternResult<Atom> {
        let Some(c) = self.peek() else {
            return Err(PatternError::new(offset, PatternErrorKind::DanglingEscape));
        };
        self.pos += 1;

        Ok(match c {
            'd' => Atom::Class(CharClass::digit()),
            'w' => Atom::Class(CharClass::word()),
            's' => Atom::Class(CharClass::space()),
            't' => Atom::Char('\t'),
            'n' => Atom::Char('\n'),
            'r' => Atom::Char('\r'),
            'f' => Atom::Char('\x0c'),
            'v' => Atom::Char('\x0b'),
            '0' => Atom::Char('\0'),
            c if c.is_alphanumeric() => {
                return Err(PatternError::new(offset, PatternErrorKind::InvalidEscape { escape: c }));
            }
            c => Atom::Char(c),
        })
    }

    /// Bracket class after a consumed `[`.
    fn bracket_class(&mut self, open: usize) -> PatternResult<CharClass> {
        let negated = self.peek() == Some('^');
        if negated {
            self.pos += 1;
        }

        let mut ranges: Vec<(char, char)> = Vec::new();
        loop {
            let offset = self.pos;
            let Some(c) = self.peek() else {
                return Err(PatternError::new(open, PatternErrorKind::UnterminatedClass));
            };
            self.pos += 1;

            let lo = match c {
                ']' => break,
                '\\' => match self.escape_atom(offset)? {
                    Atom::Char(c) => c,
                    Atom::Class(class) => {
                        ranges.extend_from_slice(class.ranges());
                        continue;
                    }
                },
                c => c,
            };

            // `-` is a range operator only between two endpoints
            let is_range = self.peek() == Some('-') && !matches!(self.peek_at(1), None | Some(']'));
            if !is_range {
                ranges.push((lo, lo));
                continue;
            }
            self.pos += 1;

            let hi_offset = self.pos;
            let hi = match self.peek() {
                Some('\\') => {
                    self.pos += 1;
                    match self.escape_atom(hi_offset)? {
                        Atom::Char(c) => c,
                        Atom::Class(class) => {
                            ranges.push((lo, lo));
                            ranges.push(('-', '-'));
                            ranges.extend_from_slice(class.ranges());
                            continue;
                        }
                    }
                }
                Some(c) => {
                    self.pos += 1;
                    c
                }
                None => return Err(PatternError::new(open, PatternErrorKind::UnterminatedClass)),
            };

            if lo > hi {
                return Err(PatternError::new(offset, PatternErrorKind::InvalidRange { lo, hi }));
            }
            ranges.push((lo, hi));
        }

        if ranges.is_empty() {
            return Err(PatternError::new(open, PatternErrorKind::EmptyClass));
        }

        let class = CharClass::from_ranges(ranges);
        let class = if negated { class.negate(self.universe) } else { class };
        if class.is_empty() {
            return Err(PatternError::new(open, PatternErrorKind::EmptyClass));
        }
        Ok(class)
    }

    /// `{m}`, `{m,}` or `{m,n}` after a consumed `{`.
    ///
    /// Returns `None` and consumes nothing when the brace does not open a
    /// well-formed quantifier, so it reads as a literal.
    fn quantifier(&mut self, open: usize) -> PatternResult<Option<RegexTokenKind>> {
        let start = self.pos;
        let Some(min) = self.number() else {
            return Ok(None);
        };

        let max = match self.peek() {
            Some('}') => Some(min),
            Some(',') => {
                self.pos += 1;
                if self.peek() == Some('}') {
                    None
                } else if let Some(max) = self.number()
                    && self.peek() == Some('}')
                {
                    Some(max)
                } else {
                    self.pos = start;
                    return Ok(None);
                }
            }
            _ => {
                self.pos = start;
                return Ok(None);
            }
        };
        // closing brace
        self.pos += 1;

        let invalid = |reason: String| PatternError::new(open, PatternErrorKind::InvalidRepetition { reason });
        if min > REPEAT_LIMIT || max.is_some_and(|max| max > REPEAT_LIMIT) {
            return Err(invalid(format!("bound exceeds {REPEAT_LIMIT}")));
        }
        if let Some(max) = max
            && max < min
        {
            return Err(invalid(format!("{{{min},{max}}} has max below min")));
        }

        Ok(Some(RegexTokenKind::Repeat { min, max }))
    }

    /// Decimal digits, saturating at `u32::MAX`.
    fn number(&mut self) -> Option<u32> {
        let start = self.pos;
        let mut value: u32 = 0;
        while let Some(d) = self.peek().and_then(|c| c.to_digit(10)) {
            value = value.saturating_mul(10).saturating_add(d);
            self.pos += 1;
        }
        (self.pos > start).then_some(value)
    }
}

fn missing_operand(offset: usize, kind: &RegexTokenKind) -> PatternError {
    PatternError::new(offset, PatternErrorKind::MissingOperand {
        operator: kind.operator_label(),
    })
}

enum Atom {
    Char(char),
    Class(CharClass),
}

/// Make concatenation explicit between adjacent operands.
#[must_use]
pub fn insert_concat(tokens: Vec<RegexToken>) -> Vec<RegexToken> {
    let mut out: Vec<RegexToken> = Vec::with_capacity(tokens.len() * 2);
    for token in tokens {
        if let Some(prev) = out.last()
            && prev.kind.ends_operand()
            && token.kind.starts_operand()
        {
            out.push(RegexToken {
                kind: RegexTokenKind::Concat,
                offset: token.offset,
            });
        }
        out.push(token);
    }
    out
}

/// Shunting-yard reordering of a balanced infix stream.
///
/// Postfix operators bind tightest and go straight to the output.
#[must_use]
pub fn to_postfix(tokens: Vec<RegexToken>) -> Vec<RegexToken> {
    let mut output: Vec<RegexToken> = Vec::with_capacity(tokens.len());
    let mut operators: Vec<RegexToken> = Vec::new();

    for token in tokens {
        match token.kind {
            RegexTokenKind::Literal(_)
            | RegexTokenKind::Class(_)
            | RegexTokenKind::Star
            | RegexTokenKind::Plus
            | RegexTokenKind::Question
            | RegexTokenKind::Repeat { .. } => output.push(token),
            RegexTokenKind::Union | RegexTokenKind::Concat => {
                while let Some(top) = operators.last()
                    && top.kind.precedence() >= token.kind.precedence()
                {
                    if let Some(op) = operators.pop() {
                        output.push(op);
                    }
                }
                operators.push(token);
            }
            RegexTokenKind::LParen => operators.push(token),
            RegexTokenKind::RParen => {
                while let Some(op) = operators.pop() {
                    if matches!(op.kind, RegexTokenKind::LParen) {
                        break;
                    }
                    output.push(op);
                }
            }
        }
    }

    while let Some(op) = operators.pop() {
        if !matches!(op.kind, RegexTokenKind::LParen) {
            output.push(op);
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postfix(pattern: &str) -> String {
        let tokens = Parser::new(pattern, ClassUniverse::ASCII).parse().unwrap();
        postfix_string(&tokens)
    }

    fn error(pattern: &str) -> PatternError {
        Parser::new(pattern, ClassUniverse::ASCII).parse().unwrap_err()
    }

    #[test]
    fn test_concat_and_precedence() {
        assert_eq!(postfix("ab"), "a b ·");
        assert_eq!(postfix("a|bc"), "a b c · |");
        assert_eq!(postfix("ab*"), "a b * ·");
        assert_eq!(postfix("(a|b)*c"), "a b | * c ·");
        assert_eq!(postfix("a?b+"), "a ? b + ·");
    }

    #[test]
    fn test_classes_and_escapes() {
        assert_eq!(postfix("[a-c_]"), "[_a-c]");
        assert_eq!(postfix(r"\d"), "[0-9]");
        assert_eq!(postfix(r"\.\t"), ". \\t ·");
        assert_eq!(postfix("[-+]"), "[+-]");
        assert_eq!(postfix("[a-]"), "[-a]");
        assert_eq!(postfix(r"[\]]"), "[]]");
    }

    #[test]
    fn test_negated_class() {
        let tokens = Parser::new("[^a-z]", ClassUniverse::ASCII).parse().unwrap();
        let RegexTokenKind::Class(class) = &tokens[0].kind else {
            panic!("expected class");
        };
        assert!(!class.contains('q'));
        assert!(class.contains('Q'));
        assert!(class.contains('\n'));
    }

    #[test]
    fn test_quantifiers() {
        assert_eq!(postfix("a{3}"), "a {3}");
        assert_eq!(postfix("a{2,}"), "a {2,}");
        assert_eq!(postfix("a{1,5}b"), "a {1,5} b ·");
    }

    #[test]
    fn test_brace_without_quantifier_is_literal() {
        assert_eq!(postfix("{x}"), "{ x · } ·");
        assert_eq!(postfix("a{,2}"), "a { · , · 2 · } ·");
        assert_eq!(postfix("{"), "{");
    }

    #[test]
    fn test_group_errors() {
        assert_eq!(error("(ab").kind, PatternErrorKind::UnclosedGroup);
        assert_eq!(error("(ab").offset, 0);
        assert_eq!(error("ab)").kind, PatternErrorKind::UnmatchedParen);
        assert_eq!(error("ab)").offset, 2);
        assert_eq!(error("a()").kind, PatternErrorKind::EmptyGroup);
        assert_eq!(error("((a)").offset, 0);
    }

    #[test]
    fn test_class_errors() {
        assert_eq!(error("[]").kind, PatternErrorKind::EmptyClass);
        assert_eq!(error("[^]").kind, PatternErrorKind::EmptyClass);
        assert_eq!(error("x[abc").kind, PatternErrorKind::UnterminatedClass);
        assert_eq!(error("x[abc").offset, 1);
        assert_eq!(error("[z-a]").kind, PatternErrorKind::InvalidRange { lo: 'z', hi: 'a' });
        assert_eq!(error("[^\0-\x7f]").kind, PatternErrorKind::EmptyClass);
    }

    #[test]
    fn test_escape_errors() {
        assert_eq!(error(r"a\1").kind, PatternErrorKind::InvalidEscape { escape: '1' });
        assert_eq!(error(r"a\1").offset, 1);
        assert_eq!(error("ab\\").kind, PatternErrorKind::DanglingEscape);
    }

    #[test]
    fn test_repetition_errors() {
        assert!(matches!(error("a{3,1}").kind, PatternErrorKind::InvalidRepetition { .. }));
        assert!(matches!(error("a{1001}").kind, PatternErrorKind::InvalidRepetition { .. }));
    }

    #[test]
    fn test_empty_pattern() {
        assert_eq!(error("").kind, PatternErrorKind::EmptyPattern);
    }
}
