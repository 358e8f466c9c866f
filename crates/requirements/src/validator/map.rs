use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};

use super::{ArrayValidator, EqualityValidator, SizeValidator, Validatable, Validator, ValidatorCore};
use crate::mappers::StringMappers;
use crate::message::{self, Pluralizer};
use crate::target::ValidationTarget;

/// Map types understood by [`MapValidator`].
pub trait MapCollection {
    /// The key type.
    type Key;

    /// The value type.
    type Value;

    /// Returns the number of entries.
    fn size(&self) -> usize;

    /// Returns the entries in iteration order.
    fn entries(&self) -> Vec<(&Self::Key, &Self::Value)>;

    /// Consumes the map and returns its entries in iteration order.
    fn into_entries(self) -> Vec<(Self::Key, Self::Value)>;
}

impl<K: Eq + Hash, V, H: BuildHasher> MapCollection for HashMap<K, V, H> {
    type Key = K;
    type Value = V;

    fn size(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    fn into_entries(self) -> Vec<(K, V)> {
        self.into_iter().collect()
    }
}

impl<K: Ord, V> MapCollection for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn size(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    fn into_entries(self) -> Vec<(K, V)> {
        self.into_iter().collect()
    }
}

/// Validates a `HashMap` or `BTreeMap`.
#[derive(Debug)]
#[must_use = "validators record failures that must be checked"]
pub struct MapValidator<M> {
    core: ValidatorCore<M>,
}

impl<M> MapValidator<M>
where
    M: MapCollection,
    M::Key: fmt::Debug + 'static,
    M::Value: fmt::Debug + 'static,
{
    /// Requires the map to be empty.
    pub fn is_empty(self) -> Self {
        self.check(|value| value.size() == 0, message::collection::is_empty)
    }

    /// Requires the map to have at least one entry.
    pub fn is_not_empty(self) -> Self {
        self.check(|value| value.size() != 0, message::collection::is_not_empty)
    }

    /// Validates the keys.
    pub fn keys(self) -> ArrayValidator<M::Key> {
        self.derive_array("keys", Pluralizer::Key, |(key, _)| key)
    }

    /// Validates the values.
    pub fn values(self) -> ArrayValidator<M::Value> {
        self.derive_array("values", Pluralizer::Value, |(_, value)| value)
    }

    /// Validates the entries as `(key, value)` pairs.
    pub fn entries(self) -> ArrayValidator<(M::Key, M::Value)> {
        self.derive_array("entries", Pluralizer::Entry, |entry| entry)
    }

    /// Validates the number of entries.
    pub fn size(self) -> SizeValidator {
        let parent_value = self.actual_repr();
        let parent_name = self.core.name().to_owned();
        let core = self.core.derive("size", parent_value, |value| value.size());
        SizeValidator::new(core, parent_name, Pluralizer::Entry)
    }

    fn derive_array<T>(
        self,
        method: &str,
        pluralizer: Pluralizer,
        select: impl Fn((M::Key, M::Value)) -> T,
    ) -> ArrayValidator<T> {
        let parent_value = self.actual_repr();
        let core = self.core.derive(method, parent_value, |value| {
            value.into_entries().into_iter().map(select).collect()
        });
        ArrayValidator::new(core, pluralizer)
    }
}

impl<M> Validator for MapValidator<M>
where
    M: MapCollection,
    M::Key: fmt::Debug + 'static,
    M::Value: fmt::Debug + 'static,
{
    type Value = M;

    fn core(&self) -> &ValidatorCore<M> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ValidatorCore<M> {
        &mut self.core
    }

    fn into_core(self) -> ValidatorCore<M> {
        self.core
    }

    fn render(&self, value: &M) -> String {
        let mappers = self.core.configuration().string_mappers();
        StringMappers::join(
            "{",
            value.entries().into_iter().map(|(key, value)| {
                format!("{}: {}", mappers.to_string(key), mappers.to_string(value))
            }),
            "}",
        )
    }
}

impl<M> EqualityValidator for MapValidator<M>
where
    M: MapCollection,
    M::Key: fmt::Debug + 'static,
    M::Value: fmt::Debug + 'static,
{
}

impl<K, V, H> Validatable for HashMap<K, V, H>
where
    K: Eq + Hash + fmt::Debug + 'static,
    V: fmt::Debug + 'static,
    H: BuildHasher,
{
    type Value = Self;
    type Validator = MapValidator<Self>;

    fn into_target(self) -> ValidationTarget<Self> {
        ValidationTarget::Valid(self)
    }

    fn validator(core: ValidatorCore<Self>) -> MapValidator<Self> {
        MapValidator { core }
    }
}

impl<K, V> Validatable for BTreeMap<K, V>
where
    K: Ord + fmt::Debug + 'static,
    V: fmt::Debug + 'static,
{
    type Value = Self;
    type Validator = MapValidator<Self>;

    fn into_target(self) -> ValidationTarget<Self> {
        ValidationTarget::Valid(self)
    }

    fn validator(core: ValidatorCore<Self>) -> MapValidator<Self> {
        MapValidator { core }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::validator::tests::check;

    fn limits() -> BTreeMap<&'static str, u32> {
        BTreeMap::from([("cpu", 2), ("memory", 512)])
    }

    #[test]
    fn test_map_rendering() {
        assert_eq!(
            check(limits(), "limits").is_empty().else_get_messages(),
            vec!["\"limits\" must be empty.\nlimits: {\"cpu\": 2, \"memory\": 512}"]
        );
    }

    #[test]
    fn test_keys_and_values() {
        assert!(!check(limits(), "limits")
            .keys()
            .contains_exactly(&["memory", "cpu"])
            .validation_failed());
        assert!(!check(limits(), "limits")
            .values()
            .contains(&512)
            .validation_failed());
    }

    #[test]
    fn test_values_are_named_after_the_map() {
        let messages = check(limits(), "limits")
            .values()
            .contains(&1024)
            .else_get_messages();
        assert_eq!(
            messages,
            vec![
                "limits.values() must contain 1024.\nlimits.values(): [2, 512]\nlimits         : {\"cpu\": 2, \"memory\": 512}"
            ]
        );
    }

    #[test]
    fn test_entries_size_uses_entry_plural() {
        assert_eq!(
            check(limits(), "limits")
                .size()
                .is_less_than_or_equal_to(1)
                .else_get_messages(),
            vec![
                "\"limits\" must contain at most 1 entry.\nlimits.size(): 2\nlimits       : {\"cpu\": 2, \"memory\": 512}"
            ]
        );
    }

    #[test]
    fn test_entries() {
        assert!(!check(limits(), "limits")
            .entries()
            .contains(&("cpu", 2))
            .validation_failed());
    }
}
