use super::{Orig, Wrap};
use crate::pcommon::AnyValue;
use crate::proto::otlpcommon::{self, KeyValue};

/// Attributes: an ordered list of key/value pairs viewed as a mapping.
///
/// Entries keep insertion order. Keys are expected to be unique, but the underlying
/// list does not enforce it: when a key appears more than once, lookups and updates
/// act on the first occurrence and `remove` deletes only that one.
#[derive(Debug)]
pub struct Map<'a> {
    orig: Orig<'a, Vec<KeyValue>>,
}

impl Map<'static> {
    pub fn new() -> Self {
        Map {
            orig: Orig::default(),
        }
    }
}

impl Default for Map<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Map<'a> {
    pub fn from_orig(orig: &'a mut Vec<KeyValue>) -> Self {
        Map {
            orig: Orig::Borrowed(orig),
        }
    }

    pub fn orig(&self) -> &[KeyValue] {
        &self.orig
    }

    pub fn len(&self) -> usize {
        self.orig.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orig.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.orig.clear();
    }

    /// Makes room for at least `new_cap` entries in total.
    pub fn ensure_capacity(&mut self, new_cap: usize) {
        let len = self.orig.len();
        self.orig.reserve(new_cap.saturating_sub(len));
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.orig.iter().position(|kv| kv.key == key)
    }

    /// Returns the value stored under `key`, or `None` when the key is absent.
    pub fn get(&mut self, key: &str) -> Option<AnyValue<'_>> {
        let idx = self.position(key)?;
        Some(AnyValue::from_orig(&mut self.orig[idx].value))
    }

    /// Returns the stored value under `key` for reading through a shared borrow.
    pub fn get_ref(&self, key: &str) -> Option<&otlpcommon::AnyValue> {
        let idx = self.position(key)?;
        Some(&self.orig[idx].value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.orig.iter().map(|kv| kv.key.as_str())
    }

    /// Removes the entry for `key`, keeping the order of the others. Returns whether
    /// an entry was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.position(key) {
            Some(idx) => {
                self.orig.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Removes every entry for which `f` returns true.
    pub fn remove_if<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, AnyValue<'_>) -> bool,
    {
        self.orig
            .retain_mut(|kv| !f(&kv.key, AnyValue::from_orig(&mut kv.value)));
    }

    /// Resets the value under `key` to empty, inserting the key at the end if absent,
    /// and returns a view over the value.
    pub fn put_empty(&mut self, key: &str) -> AnyValue<'_> {
        let idx = match self.position(key) {
            Some(idx) => {
                self.orig[idx].value = Default::default();
                idx
            }
            None => {
                self.orig.push(KeyValue {
                    key: key.to_string(),
                    value: Default::default(),
                });
                self.orig.len() - 1
            }
        };
        AnyValue::from_orig(&mut self.orig[idx].value)
    }

    pub fn put_str(&mut self, key: &str, v: impl Into<String>) {
        self.put_empty(key).set_str(v);
    }

    pub fn put_int(&mut self, key: &str, v: i64) {
        self.put_empty(key).set_int(v);
    }

    pub fn put_double(&mut self, key: &str, v: f64) {
        self.put_empty(key).set_double(v);
    }

    pub fn put_bool(&mut self, key: &str, v: bool) {
        self.put_empty(key).set_bool(v);
    }

    pub fn put_bytes(&mut self, key: &str, v: &[u8]) {
        self.put_empty(key).set_bytes(v);
    }

    /// Calls `f` for every entry in insertion order until it returns false.
    pub fn range<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, AnyValue<'_>) -> bool,
    {
        for kv in self.orig.iter_mut() {
            if !f(&kv.key, AnyValue::from_orig(&mut kv.value)) {
                break;
            }
        }
    }

    /// Moves every entry into `dest`, replacing its content, and leaves this map empty.
    pub fn move_to(&mut self, dest: &mut Map<'_>) {
        *dest.orig = std::mem::take(&mut *self.orig);
    }

    /// Overwrites `dest` with a deep copy of this map.
    pub fn copy_to(&self, dest: &mut Map<'_>) {
        Self::copy_orig(&mut dest.orig, &self.orig);
    }

    /// Deep-copies `src` into `dest`, reusing `dest`'s entries where possible.
    pub fn copy_orig(dest: &mut Vec<KeyValue>, src: &[KeyValue]) {
        dest.truncate(src.len());
        let (overlap, rest) = src.split_at(dest.len());
        for (d, s) in dest.iter_mut().zip(overlap) {
            d.key.clone_from(&s.key);
            Wrap::copy_orig(&mut d.value, &s.value);
        }
        dest.reserve(rest.len());
        for s in rest {
            let mut value = Default::default();
            Wrap::copy_orig(&mut value, &s.value);
            dest.push(KeyValue {
                key: s.key.clone(),
                value,
            });
        }
    }
}

impl PartialEq<Map<'_>> for Map<'_> {
    fn eq(&self, other: &Map<'_>) -> bool {
        *self.orig == *other.orig
    }
}

#[cfg(test)]
pub(crate) fn generate_test_map() -> Map<'static> {
    let mut m = Map::new();
    fill_test_map(&mut m);
    m
}

#[cfg(test)]
pub(crate) fn fill_test_map(m: &mut Map<'_>) {
    m.clear();
    m.put_str("str_key", "value");
    m.put_int("int_key", 123);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pcommon::AnyValueType;
    use pretty_assertions::assert_eq;

    #[test]
    fn fixture_has_two_entries_in_order() {
        let m = generate_test_map();
        assert_eq!(2, m.len());
        assert_eq!(vec!["str_key", "int_key"], m.keys().collect::<Vec<_>>());
    }

    #[test]
    fn get_absent_key_is_none() {
        let mut m = generate_test_map();
        assert!(m.get("missing").is_none());
        assert!(!m.contains_key("missing"));
        assert_eq!("value", m.get("str_key").expect("present").str());
        assert_eq!(123, m.get("int_key").expect("present").int());
    }

    #[test]
    fn get_ref_reads_through_shared_borrow() {
        fn lookup<'m>(m: &'m Map<'_>, key: &str) -> Option<&'m otlpcommon::AnyValue> {
            m.get_ref(key)
        }
        let m = generate_test_map();
        assert!(lookup(&m, "missing").is_none());
        assert_eq!(
            Some(&otlpcommon::any_value::Value::IntValue(123)),
            lookup(&m, "int_key").and_then(|v| v.value.as_ref())
        );
        assert_eq!(
            Some(&otlpcommon::any_value::Value::StringValue("value".into())),
            lookup(&m, "str_key").and_then(|v| v.value.as_ref())
        );
    }

    #[test]
    fn put_overwrites_in_place() {
        let mut m = generate_test_map();
        m.put_bool("str_key", true);
        assert_eq!(2, m.len());
        assert_eq!(vec!["str_key", "int_key"], m.keys().collect::<Vec<_>>());
        let v = m.get("str_key").expect("present");
        assert_eq!(AnyValueType::Bool, v.value_type());
        assert!(v.bool());
    }

    #[test]
    fn put_appends_new_keys() {
        let mut m = Map::new();
        m.put_double("a", 1.5);
        m.put_bytes("b", &[1, 2]);
        m.put_empty("c");
        assert_eq!(vec!["a", "b", "c"], m.keys().collect::<Vec<_>>());
        assert_eq!(&[1, 2], m.get("b").expect("present").bytes());
        assert_eq!(AnyValueType::Empty, m.get("c").expect("present").value_type());
    }

    #[test]
    fn duplicate_keys_act_on_first_match() {
        let mut raw = vec![
            KeyValue {
                key: "k".into(),
                value: Default::default(),
            },
            KeyValue {
                key: "k".into(),
                value: Default::default(),
            },
        ];
        let mut m = Map::from_orig(&mut raw);
        m.put_int("k", 1);
        assert_eq!(1, m.get("k").expect("present").int());
        assert!(m.remove("k"));
        assert_eq!(1, m.len());
        assert_eq!(AnyValueType::Empty, m.get("k").expect("present").value_type());
    }

    #[test]
    fn remove_preserves_order() {
        let mut m = Map::new();
        for k in ["a", "b", "c", "d"] {
            m.put_str(k, k);
        }
        assert!(m.remove("b"));
        assert!(!m.remove("b"));
        assert_eq!(vec!["a", "c", "d"], m.keys().collect::<Vec<_>>());
    }

    #[test]
    fn remove_if_filters_by_value() {
        let mut m = generate_test_map();
        m.put_int("other_int", 7);
        m.remove_if(|_, v| v.value_type() == AnyValueType::Int);
        assert_eq!(vec!["str_key"], m.keys().collect::<Vec<_>>());
    }

    #[test]
    fn range_visits_in_insertion_order_and_stops() {
        let mut m = Map::new();
        for k in ["z", "a", "m"] {
            m.put_str(k, k);
        }
        let mut seen = Vec::new();
        m.range(|k, v| {
            seen.push(format!("{k}={}", v.str()));
            k != "a"
        });
        assert_eq!(vec!["z=z", "a=a"], seen);
    }

    #[test]
    fn move_and_copy() {
        let mut src = generate_test_map();
        let mut dest = Map::new();
        dest.put_str("stale", "x");
        src.copy_to(&mut dest);
        assert_eq!(src, dest);

        let mut moved = Map::new();
        src.move_to(&mut moved);
        assert!(src.is_empty());
        assert_eq!(generate_test_map(), moved);
    }

    #[test]
    fn ensure_capacity_keeps_entries() {
        let mut m = generate_test_map();
        m.ensure_capacity(10);
        assert_eq!(2, m.len());
        assert!(m.orig.capacity() >= 10);
    }
}
