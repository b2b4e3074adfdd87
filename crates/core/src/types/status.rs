//! Status enums for orders and payments.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// The backend reports a numeric `state`; the client renders the three
/// in-flight states as a linear stepper with every stage at or below the
/// current state marked complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created but not yet accepted by the kitchen.
    #[default]
    Pending,
    /// Accepted, awaiting preparation.
    Processing,
    /// Food is being prepared.
    Preparing,
    /// Courier is on the way.
    Delivering,
    /// Handed over to the customer.
    Delivered,
    /// Cancelled before delivery.
    Cancelled,
}

impl OrderStatus {
    /// Map the backend's numeric `state` field onto a status.
    #[must_use]
    pub const fn from_state(state: u8) -> Option<Self> {
        match state {
            0 => Some(Self::Pending),
            1 => Some(Self::Processing),
            2 => Some(Self::Preparing),
            3 => Some(Self::Delivering),
            4 => Some(Self::Delivered),
            _ => None,
        }
    }

    /// The numeric progression index, `None` for cancelled orders.
    #[must_use]
    pub const fn state(self) -> Option<u8> {
        match self {
            Self::Pending => Some(0),
            Self::Processing => Some(1),
            Self::Preparing => Some(2),
            Self::Delivering => Some(3),
            Self::Delivered => Some(4),
            Self::Cancelled => None,
        }
    }

    /// Whether the given stepper stage (1-3) should render as complete.
    #[must_use]
    pub const fn stage_complete(self, stage: u8) -> bool {
        match self.state() {
            Some(state) => state >= stage,
            None => false,
        }
    }

    /// Whether the order can no longer change state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Human-readable label for the status.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Preparing => "Preparing food",
            Self::Delivering => "Out for delivery",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// Payment status of an order.
///
/// Maps the backend's `isPaid` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
}
