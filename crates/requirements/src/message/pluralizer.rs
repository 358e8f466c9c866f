/// The noun a size is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pluralizer {
    /// Characters of a string.
    Character,
    /// Elements of an array or set.
    Element,
    /// Entries of a map.
    Entry,
    /// Keys of a map.
    Key,
    /// Values of a map.
    Value,
}

impl Pluralizer {
    /// The singular noun.
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Element => "element",
            Self::Entry => "entry",
            Self::Key => "key",
            Self::Value => "value",
        }
    }

    /// The plural noun.
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Character => "characters",
            Self::Element => "elements",
            Self::Entry => "entries",
            Self::Key => "keys",
            Self::Value => "values",
        }
    }

    /// The noun that agrees with `count`.
    pub const fn name_of(self, count: usize) -> &'static str {
        if count == 1 {
            self.singular()
        } else {
            self.plural()
        }
    }

    /// Formats `count` with its noun, e.g. `3 characters`.
    pub fn describe(self, count: usize) -> String {
        format!("{count} {}", self.name_of(count))
    }
}
