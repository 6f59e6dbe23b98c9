//! Typed identifier newtypes backed by database-assigned integers.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw row id.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Access the raw row id.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Identifier for a [`ContactMessage`](crate::contact_message::ContactMessage).
    ContactMessageId
);

define_id!(
    /// Identifier for a [`JobApplication`](crate::job_application::JobApplication).
    JobApplicationId
);

define_id!(
    /// Identifier for an [`UploadedImage`](crate::image::UploadedImage).
    ImageId
);

define_id!(
    /// Identifier for a [`Form`](crate::form::Form).
    FormId
);

define_id!(
    /// Identifier for a [`FormResponse`](crate::form::FormResponse).
    FormResponseId
);

define_id!(
    /// Identifier for a [`QuoteRequest`](crate::quote::QuoteRequest).
    QuoteRequestId
);
