use std::fmt;

use serde::{de::Visitor, ser::SerializeMap, Deserialize, Serialize};

pub type RecordTag = (String, String);

/// Plaintext tags attached to a record. Kept sorted so that equality ignores insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordTags {
    inner: Vec<RecordTag>,
}

impl Serialize for RecordTags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.inner.len()))?;
        for tag in self.inner.iter() {
            map.serialize_entry(&tag.0, &tag.1)?
        }
        map.end()
    }
}

struct RecordTagsVisitor;

impl<'de> Visitor<'de> for RecordTagsVisitor {
    type Value = RecordTags;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a map representing tags")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut tags = RecordTags::new(vec![]);

        while let Some(tag) = map.next_entry()? {
            tags.add(tag);
        }

        Ok(tags)
    }
}

impl<'de> Deserialize<'de> for RecordTags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordTagsVisitor)
    }
}

impl RecordTags {
    pub fn new(inner: Vec<RecordTag>) -> Self {
        let mut items = inner;
        items.sort();

        Self { inner: items }
    }

    pub fn add(&mut self, tag: RecordTag) {
        self.inner.retain(|(name, _)| name != &tag.0);
        self.inner.push(tag);
        self.inner.sort();
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(tag_name, _)| tag_name == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// True when every tag of `filter` is present here with the same value.
    pub fn matches(&self, filter: &RecordTags) -> bool {
        filter
            .inner
            .iter()
            .all(|(name, value)| self.get(name) == Some(value.as_str()))
    }

    pub fn into_inner(self) -> Vec<RecordTag> {
        self.inner
    }
}

impl From<Vec<RecordTag>> for RecordTags {
    fn from(value: Vec<RecordTag>) -> Self {
        Self::new(value)
    }
}

impl From<RecordTags> for Vec<RecordTag> {
    fn from(value: RecordTags) -> Self {
        value.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str, value: &str) -> RecordTag {
        (name.to_string(), value.to_string())
    }

    #[test]
    fn tags_filter_matching() {
        let tags = RecordTags::new(vec![tag("did", "did:polygon:0x1"), tag("role", "created")]);
        assert!(tags.matches(&RecordTags::new(vec![tag("role", "created")])));
        assert!(tags.matches(&RecordTags::default()));
        assert!(!tags.matches(&RecordTags::new(vec![tag("role", "received")])));
    }

    #[test]
    fn adding_existing_tag_replaces_value() {
        let mut tags = RecordTags::new(vec![tag("role", "received")]);
        tags.add(tag("role", "created"));
        assert_eq!(tags.get("role"), Some("created"));
        assert_eq!(tags.into_inner().len(), 1);
    }

    #[test]
    fn tags_serialize_as_map() {
        let tags = RecordTags::new(vec![tag("b", "2"), tag("a", "1")]);
        let json = serde_json::to_string(&tags).unwrap();
        assert_eq!(json, r#"{"a":"1","b":"2"}"#);
        let back: RecordTags = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tags);
    }
}
