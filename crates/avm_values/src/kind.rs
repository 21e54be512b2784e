//! Kinds of values in the value graph.

use crate::error::UnknownValueKind;
use std::fmt;

/// The kind of a materialized value, with its stable type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ValueKind {
    Num = 0,
    CodePoint = 1,
    HashPreImage = 2,
    Tuple = 3,
    Buffer = 12,
    CodePointStub = 13,
}

impl ValueKind {
    pub const ALL: [ValueKind; 6] = [
        ValueKind::Num,
        ValueKind::CodePoint,
        ValueKind::HashPreImage,
        ValueKind::Tuple,
        ValueKind::Buffer,
        ValueKind::CodePointStub,
    ];

    #[inline(always)]
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ValueKind::Num),
            1 => Some(ValueKind::CodePoint),
            2 => Some(ValueKind::HashPreImage),
            3 => Some(ValueKind::Tuple),
            12 => Some(ValueKind::Buffer),
            13 => Some(ValueKind::CodePointStub),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn is_tuple(self) -> bool {
        self == ValueKind::Tuple
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Num => "num",
            ValueKind::CodePoint => "codepoint",
            ValueKind::HashPreImage => "hashpreimage",
            ValueKind::Tuple => "tuple",
            ValueKind::Buffer => "buffer",
            ValueKind::CodePointStub => "codepointstub",
        }
    }
}

impl TryFrom<u8> for ValueKind {
    type Error = UnknownValueKind;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(UnknownValueKind(code))
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for kind in ValueKind::ALL {
            assert_eq!(ValueKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(ValueKind::Tuple.code(), 3);
        assert_eq!(ValueKind::Buffer.code(), 12);
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert_eq!(ValueKind::try_from(4), Err(UnknownValueKind(4)));
        assert_eq!(ValueKind::try_from(255), Err(UnknownValueKind(255)));
        assert_eq!(UnknownValueKind(7).to_string(), "unknown value type code 7");
    }

    #[test]
    fn only_tuple_is_tuple() {
        let tuples: Vec<_> = ValueKind::ALL.iter().filter(|k| k.is_tuple()).collect();
        assert_eq!(tuples, [&ValueKind::Tuple]);
        assert_eq!(ValueKind::CodePoint.to_string(), "codepoint");
    }
}
