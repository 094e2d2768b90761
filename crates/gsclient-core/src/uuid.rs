//! Strongly-typed UUID wrappers for gridscale objects.
//!
//! Every gridscale object is addressed by a UUID. Wrapping each kind in its own
//! type keeps a storage UUID from being passed where a server UUID is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Macro to generate strongly-typed UUID wrapper types.
macro_rules! uuid_type {
    ($(#[$meta:meta])* $name:ident, $doc:expr) => {
        $(#[$meta])*
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new UUID wrapper from a [`Uuid`].
            #[must_use]
            pub const fn new(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Creates a new random UUID (v4).
            #[must_use]
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }

            /// Returns the inner [`Uuid`].
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Converts to the inner [`Uuid`].
            #[must_use]
            pub const fn into_uuid(self) -> Uuid {
                self.0
            }

            /// Parses a UUID from a string.
            ///
            /// # Errors
            ///
            /// Returns an error if the string is not a valid UUID.
            pub fn parse_str(input: &str) -> Result<Self> {
                Uuid::parse_str(input)
                    .map(Self)
                    .map_err(|_| Error::InvalidUuid(input.to_string()))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(wrapper: $name) -> Self {
                wrapper.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse_str(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }
    };
}

// Generate all UUID types
uuid_type!(ObjectUuid, "UUID of an arbitrary gridscale object");
uuid_type!(RequestUuid, "Asynchronous request UUID");
uuid_type!(UserUuid, "User UUID");
uuid_type!(LocationUuid, "Location (data center) UUID");
uuid_type!(IpUuid, "IP address UUID");
uuid_type!(StorageUuid, "Storage UUID");
uuid_type!(SnapshotUuid, "Storage snapshot UUID");
uuid_type!(SnapshotScheduleUuid, "Storage snapshot schedule UUID");
uuid_type!(TemplateUuid, "Template UUID");
uuid_type!(SshkeyUuid, "SSH key UUID");
uuid_type!(IsoImageUuid, "ISO image UUID");
uuid_type!(ServerUuid, "Server UUID");
uuid_type!(NetworkUuid, "Network UUID");
uuid_type!(LoadbalancerUuid, "Load balancer UUID");
uuid_type!(FirewallTemplateUuid, "Firewall template UUID");
uuid_type!(PaasServiceUuid, "PaaS service UUID");
uuid_type!(PaasTemplateUuid, "PaaS service template UUID");
uuid_type!(SecurityZoneUuid, "PaaS security zone UUID");

/// Validates a UUID string.
///
/// # Errors
///
/// Returns an error if the string is not a valid UUID.
pub fn validate_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s)
        .map_err(|_| Error::InvalidUuid(s.to_string()))
}
