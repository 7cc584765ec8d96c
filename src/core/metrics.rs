//! Dashboard metrics aggregation

use super::order::{Order, OrderStatus};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of days in the trailing window of the placed-order average
pub const AVERAGE_WINDOW_DAYS: u64 = 7;

/// Summary figures shown in the dashboard header cards
///
/// A snapshot derived from an order collection at a given date; it has no
/// identity of its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    /// Placed orders whose order date falls on "today"
    pub placed_orders_today: usize,

    /// Average placed orders per day over the trailing window, one decimal
    pub average_7day_placed_orders: f64,

    /// Orders with status `Completed`
    pub completed_orders: usize,

    /// Orders with status `Canceled`
    pub red_lights: usize,
}

/// Compute the dashboard metrics for `orders` as seen on `today`
///
/// The trailing window starts at midnight seven days before `today` and has
/// no upper bound, so future-dated placed orders still count toward the
/// average. Rounding is half away from zero.
pub fn compute_metrics(orders: &[Order], today: NaiveDate) -> DashboardMetrics {
    let window_start = today
        .checked_sub_days(Days::new(AVERAGE_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN)
        .and_time(chrono::NaiveTime::MIN);

    let mut metrics = DashboardMetrics::default();
    let mut placed_in_window = 0usize;

    for order in orders {
        match order.status {
            OrderStatus::Placed => {
                if order.order_date.date() == today {
                    metrics.placed_orders_today += 1;
                }
                if order.order_date >= window_start {
                    placed_in_window += 1;
                }
            }
            OrderStatus::Completed => metrics.completed_orders += 1,
            OrderStatus::Canceled => metrics.red_lights += 1,
            OrderStatus::Fulfillment => {}
        }
    }

    metrics.average_7day_placed_orders =
        round_one_decimal(placed_in_window as f64 / AVERAGE_WINDOW_DAYS as f64);
    metrics
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
