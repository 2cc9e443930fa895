use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum OneOrList<T> {
    One(T),
    List(Vec<T>),
}

impl<T> Default for OneOrList<T> {
    fn default() -> Self {
        OneOrList::List(Vec::new())
    }
}

impl<T> From<Vec<T>> for OneOrList<T> {
    fn from(mut value: Vec<T>) -> Self {
        match value.len() {
            1 => OneOrList::One(value.remove(0)),
            _ => OneOrList::List(value),
        }
    }
}

impl<T> OneOrList<T> {
    pub fn is_empty(&self) -> bool {
        match self {
            OneOrList::One(_) => false,
            OneOrList::List(list) => list.is_empty(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            OneOrList::One(item) => std::slice::from_ref(item).iter(),
            OneOrList::List(list) => list.iter(),
        }
    }

    pub fn first(&self) -> Option<&T> {
        self.iter().next()
    }
}

impl<T: PartialEq> OneOrList<T> {
    pub fn contains(&self, item: &T) -> bool {
        self.iter().any(|i| i == item)
    }
}

impl<T: Display + Debug> Display for OneOrList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OneOrList::One(t) => write!(f, "{}", t),
            OneOrList::List(t) => write!(f, "{:?}", t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_or_list_deserializes_both_shapes() {
        let one: OneOrList<String> = serde_json::from_str(r#""a""#).unwrap();
        let list: OneOrList<String> = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(one.first().map(String::as_str), Some("a"));
        assert!(list.contains(&"b".to_string()));
        assert_eq!(list.iter().count(), 2);
        assert!(OneOrList::<String>::default().is_empty());
    }
}
