/*!
 * Inline String
 * Zero-allocation strings for short error payloads
 */

use serde::{Deserialize, Serialize};
use smartstring::alias::String as SmartString;
use std::fmt;

/// String that keeps short values (≤23 bytes) inline
///
/// Error payloads such as "weight 0 below 1" fit inline, so building an
/// error on a rejected syscall does not touch the allocator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct InlineString {
    inner: SmartString,
}

impl InlineString {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }

    /// Check if string is stored inline (no heap allocation)
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.inner.is_inline()
    }
}

impl From<&str> for InlineString {
    #[inline]
    fn from(s: &str) -> Self {
        Self {
            inner: SmartString::from(s),
        }
    }
}

impl From<String> for InlineString {
    #[inline]
    fn from(s: String) -> Self {
        Self {
            inner: SmartString::from(s),
        }
    }
}

impl From<InlineString> for String {
    #[inline]
    fn from(s: InlineString) -> Self {
        s.inner.into()
    }
}

impl std::ops::Deref for InlineString {
    type Target = str;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for InlineString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_payload_inline() {
        let s = InlineString::from("pid must fit in u32");
        assert!(s.is_inline());
        assert_eq!(s.as_str(), "pid must fit in u32");
    }

    #[test]
    fn test_long_payload_roundtrips() {
        let long = InlineString::from(
            "weight argument 99999999999 does not fit in a 32-bit signed integer",
        );
        assert!(!long.is_inline());
        let back: String = long.into();
        assert!(back.starts_with("weight argument"));
    }
}
