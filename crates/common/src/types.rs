use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the identifier is empty or only whitespace.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }

            /// Consumes the identifier, returning the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Customer identifier as issued by the onboarding service.
    CustomerId
);

string_id!(
    /// Bank account identifier (source or destination of a transfer).
    AccountId
);

string_id!(
    /// Transaction identifier assigned by the transaction processing service.
    ///
    /// Never generated locally: the only source of a `TransactionId` is a
    /// successful submit response.
    TransactionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_detection_ignores_whitespace() {
        assert!(CustomerId::new("").is_blank());
        assert!(CustomerId::new("   ").is_blank());
        assert!(!CustomerId::new("C1").is_blank());
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id = TransactionId::new("T1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"T1\"");

        let back: AccountId = serde_json::from_str("\"A1\"").unwrap();
        assert_eq!(back.as_str(), "A1");
    }

    #[test]
    fn test_display_matches_inner_value() {
        assert_eq!(AccountId::from("A2").to_string(), "A2");
        assert_eq!(CustomerId::from(String::from("C9")).into_inner(), "C9");
    }
}
