//! Status enums for hospital records.
//!
//! Each enum serializes to the exact label the portal shows and filters on
//! (e.g. `"On Leave"`, `"in-progress"`). Category filters compare these labels
//! case-sensitively, so the casing differs between record kinds on purpose.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a status label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseStatusError {
    /// Name of the status type being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

macro_rules! define_status {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The display and filter label.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseStatusError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)+
                    _ => Err(ParseStatusError {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

define_status! {
    /// Hospital registration status (system admin view).
    HospitalStatus, "hospital status" {
        Active => "active",
        /// Awaiting system admin approval.
        Pending => "pending",
        Suspended => "suspended",
    }
}

define_status! {
    /// Doctor employment status (hospital admin view).
    DoctorStatus, "doctor status" {
        Active => "Active",
        OnLeave => "On Leave",
        Inactive => "Inactive",
    }
}

define_status! {
    /// Patient care status.
    PatientStatus, "patient status" {
        Active => "Active",
        Inactive => "Inactive",
        InTreatment => "In Treatment",
        Discharged => "Discharged",
    }
}

define_status! {
    /// Appointment request status.
    AppointmentStatus, "appointment status" {
        Pending => "pending",
        Confirmed => "confirmed",
        Rejected => "rejected",
        Completed => "completed",
    }
}

define_status! {
    /// Lab order processing status.
    LabOrderStatus, "lab order status" {
        Pending => "pending",
        InProgress => "in-progress",
        Completed => "completed",
        Overdue => "overdue",
    }
}

define_status! {
    /// Lab order priority.
    Priority, "priority" {
        Normal => "Normal",
        High => "High",
        Urgent => "Urgent",
    }
}

define_status! {
    /// Prescription status.
    PrescriptionStatus, "prescription status" {
        Active => "Active",
        Completed => "Completed",
        Cancelled => "Cancelled",
    }
}

define_status! {
    /// Pharmacy stock level.
    StockStatus, "stock status" {
        InStock => "In Stock",
        LowStock => "Low Stock",
        OutOfStock => "Out of Stock",
    }
}

impl StockStatus {
    /// Derive the stock level from on-hand quantity and the reorder threshold.
    #[must_use]
    pub const fn from_levels(quantity: u32, min_stock: u32) -> Self {
        if quantity == 0 {
            Self::OutOfStock
        } else if quantity < min_stock {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    /// Short key used by the inventory stock filter (`in`, `low`, `out`).
    #[must_use]
    pub const fn bucket(self) -> &'static str {
        match self {
            Self::InStock => "in",
            Self::LowStock => "low",
            Self::OutOfStock => "out",
        }
    }
}
