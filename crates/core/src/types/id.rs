//! Newtype IDs for type-safe entity references.
//!
//! The hospital records use two id shapes: numeric ids (`1`, `2`, ...) for
//! catalog entries such as medicines and hospitals, and prefixed codes
//! (`"P001"`, `"DOC002"`, `"RX003"`) for people and clinical records. Use
//! `define_id!` for the former and `define_code!` for the latter.

/// Macro to define a numeric, type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>`, `Into<i32>` and `FromStr` implementations
///
/// # Example
///
/// ```rust
/// # use medidesk_core::define_id;
/// define_id!(WardId);
/// define_id!(BedId);
///
/// let ward = WardId::new(1);
/// let bed = BedId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: WardId = bed;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<i32>().map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// Macro to define a string-coded, type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` for codes like `"P001"`, with the
/// same derives as [`define_id!`] (minus `Copy`) plus `as_str()`, `AsRef<str>`
/// and infallible `From<&str>`.
///
/// # Example
///
/// ```rust
/// # use medidesk_core::define_code;
/// define_code!(WardCode);
///
/// let code = WardCode::from("W01");
/// assert_eq!(code.as_str(), "W01");
/// ```
#[macro_export]
macro_rules! define_code {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new code.
            #[must_use]
            pub fn new(code: impl Into<String>) -> Self {
                Self(code.into())
            }

            /// Get the code as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(code: &str) -> Self {
                Self(code.to_string())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::convert::Infallible;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Ok(Self(s.trim().to_string()))
            }
        }
    };
}

// Numeric catalog ids
define_id!(HospitalId);
define_id!(MedicineId);
define_id!(LabTestId);
define_id!(InventoryItemId);
define_id!(AppointmentId);

// Prefixed record codes
define_code!(PatientId);
define_code!(DoctorId);
define_code!(LabOrderId);
define_code!(PrescriptionId);
