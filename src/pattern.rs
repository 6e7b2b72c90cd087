//! PII pattern recognition
//!
//! Recognizes Social Security Number and credit card shaped text in raw line
//! bytes. Matching is purely syntactic; there is no checksum validation.
//!
//! Every recognized span has exactly the length of its mask, because masks
//! are written over a fixed-size mapped region. A new PII kind whose mask
//! cannot match its pattern length byte for byte does not fit this module.

use clap::ValueEnum;
use regex::bytes::Regex;
use std::fmt;

use crate::error::Result;

/// Bare SSN mask (`ddd-dd-dddd`)
pub const SSN_MASK: &[u8] = b"xxx-xx-xxxx";

/// Bare credit card mask (`dddd-dddd-dddd-dddd`)
pub const CC_MASK: &[u8] = b"xxxx-xxxx-xxxx-xxxx";

/// Keyed SSN mask (`SSN="ddd-dd-dddd"`)
pub const SSN_KEYED_MASK: &[u8] = b"SSN=\"xxx-xx-xxxx\"";

/// Keyed credit card mask (`CC="dddd-dddd-dddd-dddd"`)
pub const CC_KEYED_MASK: &[u8] = b"CC=\"xxxx-xxxx-xxxx-xxxx\"";

/// Recognizer regexes, ASCII digits only
pub mod patterns {
    pub const SSN: &str = r"(?-u)[0-9]{3}-[0-9]{2}-[0-9]{4}";
    pub const CC: &str = r"(?-u)[0-9]{4}-[0-9]{4}-[0-9]{4}-[0-9]{4}";
    pub const SSN_KEYED: &str = r#"(?-u)SSN="[0-9]{3}-[0-9]{2}-[0-9]{4}""#;
    pub const CC_KEYED: &str = r#"(?-u)CC="[0-9]{4}-[0-9]{4}-[0-9]{4}-[0-9]{4}""#;
}

/// Kind of personally-identifying data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PiiKind {
    Ssn,
    CreditCard,
}

impl PiiKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ssn => "SSN",
            Self::CreditCard => "CC",
        }
    }
}

impl fmt::Display for PiiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which textual forms are recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MatchStyle {
    /// Bare values anywhere in the line (`123-45-6789`)
    #[default]
    Bare,
    /// Only keyed entries (`SSN="123-45-6789"`, `CC="4111-2222-3333-4444"`)
    Keyed,
}

impl MatchStyle {
    /// Mask literal written over a match of `kind`
    pub fn mask(&self, kind: PiiKind) -> &'static [u8] {
        match (self, kind) {
            (Self::Bare, PiiKind::Ssn) => SSN_MASK,
            (Self::Bare, PiiKind::CreditCard) => CC_MASK,
            (Self::Keyed, PiiKind::Ssn) => SSN_KEYED_MASK,
            (Self::Keyed, PiiKind::CreditCard) => CC_KEYED_MASK,
        }
    }

    fn sources(&self) -> (&'static str, &'static str) {
        match self {
            Self::Bare => (patterns::SSN, patterns::CC),
            Self::Keyed => (patterns::SSN_KEYED, patterns::CC_KEYED),
        }
    }
}

/// A recognized span, offsets relative to the start of its line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiiMatch {
    pub kind: PiiKind,
    pub start: usize,
    pub end: usize,
}

impl PiiMatch {
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    fn overlaps(&self, other: &PiiMatch) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Stateless SSN / credit card recognizer
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    ssn: Regex,
    cc: Regex,
}

impl PatternMatcher {
    pub fn new(style: MatchStyle) -> Result<Self> {
        let (ssn, cc) = style.sources();
        Ok(Self {
            ssn: Regex::new(ssn)?,
            cc: Regex::new(cc)?,
        })
    }

    /// Find all matches in `line`, ordered by start and non-overlapping
    pub fn find(&self, line: &[u8]) -> Vec<PiiMatch> {
        let mut out = Vec::new();
        self.find_into(line, &mut out);
        out
    }

    /// Like [`find`](Self::find), reusing `out` to avoid a per-line allocation
    pub fn find_into(&self, line: &[u8], out: &mut Vec<PiiMatch>) {
        out.clear();

        // Both formats need a hyphen
        if memchr::memchr(b'-', line).is_none() {
            return;
        }

        out.extend(self.cc.find_iter(line).map(|m| PiiMatch {
            kind: PiiKind::CreditCard,
            start: m.start(),
            end: m.end(),
        }));
        let cc_count = out.len();

        // Step past a CC span instead of past a discarded SSN candidate, so an
        // SSN starting inside the candidate's digits is still seen
        let mut at = 0;
        while let Some(m) = self.ssn.find_at(line, at) {
            let candidate = PiiMatch {
                kind: PiiKind::Ssn,
                start: m.start(),
                end: m.end(),
            };
            let blocking_cc = out[..cc_count]
                .iter()
                .find(|cc| cc.overlaps(&candidate))
                .map(|cc| cc.end);
            match blocking_cc {
                Some(cc_end) => at = cc_end,
                None => {
                    out.push(candidate);
                    at = m.end();
                }
            }
        }

        if cc_count > 0 && out.len() > cc_count {
            out.sort_unstable_by_key(|m| m.start);
        }
    }

    /// Quick check whether `line` contains anything to redact
    pub fn contains_pii(&self, line: &[u8]) -> bool {
        memchr::memchr(b'-', line).is_some() && (self.cc.is_match(line) || self.ssn.is_match(line))
    }
}
