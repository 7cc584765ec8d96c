//! Deterministic sample order generator
//!
//! Used whenever no search index is configured or the index cannot be
//! reached. The generator always seeds a ChaCha8 stream with the same value,
//! so every call returns the same ten orders for a given "today". ChaCha8 is
//! named explicitly because `StdRng` may change algorithm between releases.

use crate::core::{Clock, FulfillmentType, Order, OrderProvider, OrderStatus};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{Days, NaiveDate, NaiveTime};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed of the sample data PRNG
pub const SAMPLE_SEED: u64 = 42;

/// Number of generated orders
pub const SAMPLE_ORDER_COUNT: i32 = 10;

/// Base added to the 1-based index to form order numbers
pub const ORDER_NUMBER_BASE: i32 = 1000;

/// Stores sample orders are assigned to, as (store id, store name)
pub const SAMPLE_STORES: [(&str, &str); 5] = [
    ("ST001", "Downtown Store"),
    ("ST002", "Mall Location"),
    ("ST003", "Suburban Branch"),
    ("ST004", "Airport Store"),
    ("ST005", "City Center"),
];

/// Sample orders are dated up to this many days before today
const MAX_AGE_DAYS: u64 = 13;

/// Generates the fixed set of sample orders
#[derive(Debug, Clone, Default)]
pub struct SampleOrderGenerator {
    clock: Clock,
}

impl SampleOrderGenerator {
    pub fn new(clock: Clock) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Generate the sample orders relative to `today`
    ///
    /// Per order, draws happen in a fixed sequence from one stream: store,
    /// fulfillment type, partner (delivery only), status, item count, age.
    pub fn generate(&self, today: NaiveDate) -> Vec<Order> {
        tracing::debug!("Generating sample order data");

        let mut rng = ChaCha8Rng::seed_from_u64(SAMPLE_SEED);
        let midnight = today.and_time(NaiveTime::MIN);

        let orders: Vec<Order> = (1..=SAMPLE_ORDER_COUNT)
            .map(|i| {
                let (store_id, store_name) = SAMPLE_STORES[rng.random_range(0..SAMPLE_STORES.len())];
                let fulfillment_type = FulfillmentType::ALL[rng.random_range(0..FulfillmentType::ALL.len())];
                let fulfillment_partner = match fulfillment_type {
                    FulfillmentType::Delivery => {
                        if rng.random::<f64>() > 0.5 {
                            "Shipt"
                        } else {
                            "FedEx"
                        }
                    }
                    FulfillmentType::Pickup => "Mi9",
                    FulfillmentType::Shipping => "FedEx",
                };
                let status = OrderStatus::ALL[rng.random_range(0..OrderStatus::ALL.len())];
                let number_of_items = rng.random_range(1..=14);
                let age = rng.random_range(0..=MAX_AGE_DAYS);

                Order {
                    order_number: ORDER_NUMBER_BASE + i,
                    status,
                    store_id: store_id.to_string(),
                    store_name: store_name.to_string(),
                    number_of_items,
                    fulfillment_type,
                    fulfillment_partner: fulfillment_partner.to_string(),
                    order_date: midnight - Days::new(age),
                }
            })
            .collect();

        tracing::debug!(order_count = orders.len(), "Generated sample orders");
        orders
    }
}

#[async_trait]
impl OrderProvider for SampleOrderGenerator {
    async fn orders(&self) -> Result<Vec<Order>> {
        Ok(self.generate(self.clock.today()))
    }
}
