//! Identifier newtypes.
//!
//! Dataset identifiers are free-form strings ("ZINDABAZAR", "R1-AM-03").
//! Each kind gets its own type so a route id can never be passed where a
//! node id is expected. Identifiers are cheap to clone; they are shared by
//! every leg and index entry that mentions them.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Error returned when an identifier is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} id: {reason}")]
pub struct InvalidId {
    kind: &'static str,
    reason: &'static str,
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Arc<str>);

        impl $name {
            /// Parse an identifier.
            ///
            /// Must be non-empty and carry no leading or trailing whitespace.
            pub fn parse(s: &str) -> Result<Self, InvalidId> {
                if s.is_empty() {
                    return Err(InvalidId {
                        kind: $kind,
                        reason: "must not be empty",
                    });
                }
                if s.trim() != s {
                    return Err(InvalidId {
                        kind: $kind,
                        reason: "must not have surrounding whitespace",
                    });
                }
                Ok(Self(Arc::from(s)))
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        // Lets maps keyed by the id be queried with a plain `&str`.
        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a location in the graph.
    ///
    /// ```
    /// use bus_server::domain::NodeId;
    ///
    /// let id = NodeId::parse("ZINDABAZAR").unwrap();
    /// assert_eq!(id.as_str(), "ZINDABAZAR");
    ///
    /// assert!(NodeId::parse("").is_err());
    /// assert!(NodeId::parse(" ZINDABAZAR").is_err());
    /// ```
    NodeId,
    "node"
);

string_id!(
    /// Identifier of a scheduled bus route.
    RouteId,
    "route"
);

string_id!(
    /// Identifier of one scheduled run of a route.
    TripId,
    "trip"
);
