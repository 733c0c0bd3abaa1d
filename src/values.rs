//! The multi-valued dictionary both directions work on.

use std::borrow::Borrow;
use std::fmt;

#[cfg(feature = "indexmap")]
type Map<K, V> = indexmap::IndexMap<K, V>;
#[cfg(not(feature = "indexmap"))]
type Map<K, V> = std::collections::BTreeMap<K, V>;

/// Keys mapped to their ordered raw values.
///
/// Order within a key is arrival order, which drives positional sequence
/// decoding. Keys iterate sorted, or in insertion order with the `indexmap`
/// feature.
///
/// ```
/// use urlform::Values;
///
/// let mut values = Values::new();
/// values.set("page", "2");
/// values.add("tag", "a");
/// values.add("tag", "b");
///
/// assert_eq!(values.get("tag"), Some("a"));
/// assert_eq!(values.get_all("tag"), ["a", "b"]);
/// assert!(values.get_all("missing").is_empty());
/// assert_eq!(values.encode(), "page=2&tag=a&tag=b");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Values(Map<String, Vec<String>>);

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&str>
    where
        String: Borrow<Q>,
        Q: Ord + std::hash::Hash + Eq + ?Sized,
    {
        self.0
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Every value for `key`, empty when the key is absent.
    pub fn get_all<Q>(&self, key: &Q) -> &[String]
    where
        String: Borrow<Q>,
        Q: Ord + std::hash::Hash + Eq + ?Sized,
    {
        self.0.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Append `value` to the values for `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// Replace the values for `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), vec![value.into()]);
    }

    /// Remove `key`, returning its values.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Vec<String>>
    where
        String: Borrow<Q>,
        Q: Ord + std::hash::Hash + Eq + ?Sized,
    {
        #[cfg(feature = "indexmap")]
        {
            self.0.shift_remove(key)
        }
        #[cfg(not(feature = "indexmap"))]
        {
            self.0.remove(key)
        }
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        String: Borrow<Q>,
        Q: Ord + std::hash::Hash + Eq + ?Sized,
    {
        self.0.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// The values in wire form, key by key, using query escaping.
    pub fn encode(&self) -> String {
        let mut output = String::new();
        for (key, values) in self.iter() {
            for value in values {
                crate::ser::write_pair(&mut output, key, value, false);
            }
        }
        output
    }
}

impl fmt::Debug for Values {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Values::new();
        values.extend(iter);
        values
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Values {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl IntoIterator for Values {
    type Item = (String, Vec<String>);
    type IntoIter = <Map<String, Vec<String>> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use std::fmt;

    use serde::de::{self, MapAccess, SeqAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Values;

    impl Serialize for Values {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, values) in self.iter() {
                map.serialize_entry(key, values)?;
            }
            map.end()
        }
    }

    /// A map value: one string or a sequence of strings.
    struct OneOrMany(Vec<String>);

    impl<'de> Deserialize<'de> for OneOrMany {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            struct OneOrManyVisitor;

            impl<'de> Visitor<'de> for OneOrManyVisitor {
                type Value = OneOrMany;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("a string or a sequence of strings")
                }

                fn visit_str<E: de::Error>(self, v: &str) -> Result<OneOrMany, E> {
                    Ok(OneOrMany(vec![v.to_owned()]))
                }

                fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<OneOrMany, A::Error> {
                    let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                    while let Some(value) = seq.next_element::<String>()? {
                        values.push(value);
                    }
                    Ok(OneOrMany(values))
                }
            }

            deserializer.deserialize_any(OneOrManyVisitor)
        }
    }

    impl<'de> Deserialize<'de> for Values {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            struct ValuesVisitor;

            impl<'de> Visitor<'de> for ValuesVisitor {
                type Value = Values;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("a map of keys to strings")
                }

                fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Values, A::Error> {
                    let mut values = Values::new();
                    while let Some((key, OneOrMany(raw))) =
                        map.next_entry::<String, OneOrMany>()?
                    {
                        for value in raw {
                            values.add(key.clone(), value);
                        }
                    }
                    Ok(values)
                }
            }

            deserializer.deserialize_map(ValuesVisitor)
        }
    }
}

#[cfg(test)]
mod test {
    use super::Values;

    use pretty_assertions::assert_eq;

    #[test]
    fn add_set_remove() {
        let mut values: Values = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        assert_eq!(values.len(), 2);
        assert_eq!(values.get_all("a"), ["1", "3"]);

        values.set("a", "4");
        assert_eq!(values.get_all("a"), ["4"]);

        assert_eq!(values.remove("b"), Some(vec!["2".to_owned()]));
        assert!(!values.contains_key("b"));
        assert_eq!(values.get("b"), None);
        assert!(!values.is_empty());
    }

    #[test]
    fn encode_escapes_keys_and_values() {
        let values: Values = [("first name", "Ada Lovelace"), ("x", "a&b=c")]
            .into_iter()
            .collect();
        assert_eq!(values.encode(), "first+name=Ada+Lovelace&x=a%26b%3Dc");
    }

    #[test]
    fn into_iter_yields_groups() {
        let values: Values = [("k", "1"), ("k", "2")].into_iter().collect();
        let groups: Vec<_> = values.into_iter().collect();
        assert_eq!(groups, [("k".to_owned(), vec!["1".to_owned(), "2".to_owned()])]);
    }
}
