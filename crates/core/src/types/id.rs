//! Newtype IDs for type-safe record references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different record types. Record IDs are
//! strings: locally created records get a millisecond timestamp, while the
//! sample data and remote API use arbitrary strings (`"1"`, `"RD-1001"`,
//! Mongo object IDs).

use chrono::{DateTime, Utc};

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use reeldeal_core::define_id;
/// define_id!(WidgetId);
/// define_id!(GadgetId);
///
/// let widget_id = WidgetId::new("1");
/// let gadget_id = GadgetId::new("1");
///
/// // These are different types, so this won't compile:
/// // let _: WidgetId = gadget_id;
/// # let _ = (widget_id, gadget_id);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard record IDs
define_id!(ProductId);
define_id!(CategoryId);
define_id!(OrderId);
define_id!(CustomerId);

/// Produce a timestamp-derived identifier that is not already taken.
///
/// Starts from the milliseconds since the Unix epoch at `now` and counts
/// upward until `is_taken` returns false, so two records created within the
/// same millisecond still get distinct IDs.
#[must_use]
pub fn next_timestamp_id(now: DateTime<Utc>, is_taken: impl Fn(&str) -> bool) -> String {
    let mut millis = now.timestamp_millis();
    loop {
        let candidate = millis.to_string();
        if !is_taken(&candidate) {
            return candidate;
        }
        millis += 1;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_id_serializes_transparently() {
        let id = ProductId::new("RD-1001");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"RD-1001\"");

        let parsed: ProductId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(parsed.as_str(), "42");
    }

    #[test]
    fn test_next_timestamp_id_uses_millis() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(next_timestamp_id(now, |_| false), "1700000000123");
    }

    #[test]
    fn test_next_timestamp_id_skips_taken() {
        let now = Utc.timestamp_millis_opt(1_000).unwrap();
        let taken = ["1000", "1001"];
        let id = next_timestamp_id(now, |candidate| taken.contains(&candidate));
        assert_eq!(id, "1002");
    }
}
