use lasso::{Spur, ThreadedRodeo};
use once_cell::sync::Lazy;
use std::{borrow::Borrow, cmp::Ordering, fmt, hash, ops::Deref, sync::Arc};

pub(crate) static STRING_INTERNER: Lazy<Arc<ThreadedRodeo>> =
  Lazy::new(|| Arc::new(Default::default()));

/// A device-type hardware identifier.
///
/// Identifiers name a device model, not an instance, so the same value shows
/// up once per plugged-in unit. They are interned: the backing text lives for
/// the process lifetime and handing copies around is free.
#[repr(transparent)]
#[derive(Clone, Copy)]
pub struct HardwareId(Spur);

impl HardwareId {
  pub fn new<T>(text: T) -> HardwareId
  where
    T: AsRef<str>,
  {
    HardwareId(STRING_INTERNER.get_or_intern(text))
  }

  pub fn new_static(text: &'static str) -> HardwareId {
    HardwareId(STRING_INTERNER.get_or_intern_static(text))
  }

  #[inline(always)]
  pub fn as_str(&self) -> &str {
    &*self
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.as_str().is_empty()
  }

  /// Case-insensitive full-string comparison.
  ///
  /// This is the comparison the affected-device match loop uses: a configured
  /// entry matches a device identifier regardless of casing, but never on a
  /// prefix or substring.
  pub fn matches(&self, other: &HardwareId) -> bool {
    if self.0 == other.0 {
      return true;
    }

    let lhs = self.as_str().chars().flat_map(char::to_lowercase);
    let rhs = other.as_str().chars().flat_map(char::to_lowercase);
    lhs.eq(rhs)
  }
}

impl Deref for HardwareId {
  type Target = str;

  fn deref(&self) -> &str {
    STRING_INTERNER.resolve(&self.0)
  }
}

impl PartialEq<HardwareId> for HardwareId {
  fn eq(&self, other: &HardwareId) -> bool {
    self.0 == other.0 || self.as_str() == other.as_str()
  }
}

impl Eq for HardwareId {}

impl PartialEq<str> for HardwareId {
  fn eq(&self, other: &str) -> bool {
    self.as_str() == other
  }
}

impl<'a> PartialEq<&'a str> for HardwareId {
  fn eq(&self, other: &&'a str) -> bool {
    self.as_str() == *other
  }
}

impl Ord for HardwareId {
  fn cmp(&self, other: &HardwareId) -> Ordering {
    self.as_str().cmp(other.as_str())
  }
}

impl PartialOrd for HardwareId {
  fn partial_cmp(&self, other: &HardwareId) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl hash::Hash for HardwareId {
  fn hash<H: hash::Hasher>(&self, hasher: &mut H) {
    self.as_str().hash(hasher)
  }
}

impl fmt::Debug for HardwareId {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    fmt::Debug::fmt(self.as_str(), f)
  }
}

impl fmt::Display for HardwareId {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    fmt::Display::fmt(self.as_str(), f)
  }
}

impl<T> From<T> for HardwareId
where
  T: Into<String> + AsRef<str>,
{
  fn from(text: T) -> Self {
    Self::new(text)
  }
}

impl From<HardwareId> for String {
  fn from(text: HardwareId) -> Self {
    text.as_str().into()
  }
}

impl Borrow<str> for HardwareId {
  fn borrow(&self) -> &str {
    self.as_str()
  }
}

mod serde {
  use super::HardwareId;
  use serde::{
    de::Error,
    de::{Unexpected, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
  };

  impl Serialize for HardwareId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
      S: Serializer,
    {
      self.as_str().serialize(serializer)
    }
  }

  struct HardwareIdVisitor;
  impl<'de> Visitor<'de> for HardwareIdVisitor {
    type Value = HardwareId;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
      formatter.write_str("a hardware identifier string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
      E: Error,
    {
      Ok(HardwareId::from(v))
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
      E: Error,
    {
      match std::str::from_utf8(v) {
        Ok(s) => Ok(HardwareId::from(s)),
        Err(_) => Err(Error::invalid_value(Unexpected::Bytes(v), &self)),
      }
    }
  }

  impl<'de> Deserialize<'de> for HardwareId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
      D: Deserializer<'de>,
    {
      deserializer.deserialize_str(HardwareIdVisitor)
    }
  }
}
