//! Declaration modifiers for classes, fields and methods.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Modifier keywords attached to a declaration.
    ///
    /// Access keywords (`public`, `private`, `protected`, `global`) are
    /// mutually exclusive in well-formed source but are stored as flags so
    /// the registrar can keep whatever the parser handed over.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u16 {
        const PUBLIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const PROTECTED = 1 << 2;
        const GLOBAL = 1 << 3;
        const STATIC = 1 << 4;
        const FINAL = 1 << 5;
        const ABSTRACT = 1 << 6;
        const VIRTUAL = 1 << 7;
        const OVERRIDE = 1 << 8;
    }
}

impl Modifiers {
    /// Parse a single modifier keyword, ignoring case.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let flag = match keyword.to_ascii_lowercase().as_str() {
            "public" => Self::PUBLIC,
            "private" => Self::PRIVATE,
            "protected" => Self::PROTECTED,
            "global" => Self::GLOBAL,
            "static" => Self::STATIC,
            "final" => Self::FINAL,
            "abstract" => Self::ABSTRACT,
            "virtual" => Self::VIRTUAL,
            "override" => Self::OVERRIDE,
            _ => return None,
        };
        Some(flag)
    }

    /// The access level these modifiers grant.
    pub fn visibility(self) -> Visibility {
        if self.contains(Self::PRIVATE) {
            Visibility::Private
        } else if self.contains(Self::PROTECTED) {
            Visibility::Protected
        } else if self.contains(Self::GLOBAL) {
            Visibility::Global
        } else if self.contains(Self::PUBLIC) {
            Visibility::Public
        } else {
            Visibility::Default
        }
    }

    #[inline]
    pub fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }
}

/// Access level of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// No access keyword was written.
    #[default]
    Default,
    Public,
    Protected,
    Private,
    Global,
}

impl Visibility {
    /// Whether a call through an explicit receiver may reach the member.
    pub fn is_externally_callable(self) -> bool {
        !matches!(self, Visibility::Private | Visibility::Protected)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Visibility::Default => "default",
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
            Visibility::Global => "global",
        };
        f.write_str(text)
    }
}
