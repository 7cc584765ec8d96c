//! Order records and their closed enumerations

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Current status of an order in the fulfillment process
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Placed but fulfillment has not started
    #[default]
    Placed,
    /// Being picked, packed or handed off
    Fulfillment,
    /// Delivered to the customer
    Completed,
    /// Canceled before completion (a "red light")
    Canceled,
}

impl OrderStatus {
    /// All statuses in ordinal order
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Placed,
        OrderStatus::Fulfillment,
        OrderStatus::Completed,
        OrderStatus::Canceled,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Placed => "Placed",
            OrderStatus::Fulfillment => "Fulfillment",
            OrderStatus::Completed => "Completed",
            OrderStatus::Canceled => "Canceled",
        }
    }

    /// Whether the order can still move forward in the workflow
    pub fn is_active(self) -> bool {
        matches!(self, OrderStatus::Placed | OrderStatus::Fulfillment)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant::new("order status", s))
    }
}

/// How an order reaches the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum FulfillmentType {
    /// Customer collects the order at the store
    #[default]
    Pickup,
    /// Order is driven to the customer's address
    Delivery,
    /// Order is shipped through a courier
    Shipping,
}

impl FulfillmentType {
    /// All fulfillment types in ordinal order
    pub const ALL: [FulfillmentType; 3] = [
        FulfillmentType::Pickup,
        FulfillmentType::Delivery,
        FulfillmentType::Shipping,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FulfillmentType::Pickup => "Pickup",
            FulfillmentType::Delivery => "Delivery",
            FulfillmentType::Shipping => "Shipping",
        }
    }
}

impl fmt::Display for FulfillmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FulfillmentType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant::new("fulfillment type", s))
    }
}

/// Returned when a string names no variant of an order enumeration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// A customer order as shown on the dashboard
///
/// Orders are value objects: providers build them per request and nothing
/// mutates them afterwards. `Default` yields a placeholder with order
/// number 0, which never appears in real data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_number: i32,
    pub status: OrderStatus,
    pub store_id: String,
    pub store_name: String,
    pub number_of_items: i32,
    pub fulfillment_type: FulfillmentType,
    #[serde(default)]
    pub fulfillment_partner: String,
    pub order_date: NaiveDateTime,
}
