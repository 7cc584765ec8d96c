//! Orders grid: search, filtering, sorting and row presentation rules

use super::order::{Order, OrderStatus};
use super::query::{GridQuery, GridSort, SortColumn, SortDirection};
use serde::Serialize;
use std::cmp::Ordering;

/// Indicator shown instead of an empty table
pub const NO_RESULTS_MESSAGE: &str = "No orders found matching your criteria";

/// Case-insensitive substring match over the searchable fields
///
/// Only an empty search matches every order; whitespace is part of the needle.
pub fn matches_search(order: &Order, search: &str) -> bool {
    let needle = search.to_lowercase();
    if needle.is_empty() {
        return true;
    }

    order.order_number.to_string().contains(&needle)
        || order.store_id.to_lowercase().contains(&needle)
        || order.store_name.to_lowercase().contains(&needle)
        || order.fulfillment_partner.to_lowercase().contains(&needle)
}

/// Whether `order` passes every filter of `query`
pub fn matches(order: &Order, query: &GridQuery) -> bool {
    query.status.is_none_or(|status| order.status == status)
        && query
            .fulfillment
            .is_none_or(|fulfillment| order.fulfillment_type == fulfillment)
        && matches_search(order, &query.search)
}

/// Compare two orders on a single column, ascending
pub fn compare(a: &Order, b: &Order, column: SortColumn) -> Ordering {
    match column {
        SortColumn::OrderNumber => a.order_number.cmp(&b.order_number),
        SortColumn::Status => a.status.cmp(&b.status),
        SortColumn::StoreId => a.store_id.cmp(&b.store_id),
        SortColumn::StoreName => a.store_name.cmp(&b.store_name),
        SortColumn::Items => a.number_of_items.cmp(&b.number_of_items),
        SortColumn::FulfillmentType => a.fulfillment_type.cmp(&b.fulfillment_type),
    }
}

/// Stable sort; ties keep their relative order in both directions
pub fn apply_sort(mut orders: Vec<Order>, sort: GridSort) -> Vec<Order> {
    orders.sort_by(|a, b| {
        let ordering = compare(a, b, sort.column);
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    orders
}

/// Filter then sort, producing the visible rows in display order
pub fn apply(orders: &[Order], query: &GridQuery) -> Vec<Order> {
    let visible = orders
        .iter()
        .filter(|order| matches(order, query))
        .cloned()
        .collect();

    apply_sort(visible, query.sort)
}

/// Action offered on a grid row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowAction {
    StartFulfillment,
    Complete,
    Cancel,
    Reopen,
}

impl RowAction {
    pub const ALL: [RowAction; 4] = [
        RowAction::StartFulfillment,
        RowAction::Complete,
        RowAction::Cancel,
        RowAction::Reopen,
    ];

    /// Serialized name, also used as the `data-action` of page buttons
    pub fn key(self) -> &'static str {
        match self {
            RowAction::StartFulfillment => "start_fulfillment",
            RowAction::Complete => "complete",
            RowAction::Cancel => "cancel",
            RowAction::Reopen => "reopen",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RowAction::StartFulfillment => "Start Fulfillment",
            RowAction::Complete => "Mark Completed",
            RowAction::Cancel => "Cancel Order",
            RowAction::Reopen => "Reopen",
        }
    }
}

/// Actions visible for an order in the given status
///
/// Active orders get an actions menu, canceled orders only offer reopening
/// and completed orders offer nothing.
pub fn row_actions(status: OrderStatus) -> &'static [RowAction] {
    match status {
        OrderStatus::Placed => &[RowAction::StartFulfillment, RowAction::Cancel],
        OrderStatus::Fulfillment => &[RowAction::Complete, RowAction::Cancel],
        OrderStatus::Canceled => &[RowAction::Reopen],
        OrderStatus::Completed => &[],
    }
}

/// Bootstrap badge class for a status
pub fn status_badge(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Placed => "bg-primary",
        OrderStatus::Fulfillment => "bg-warning",
        OrderStatus::Completed => "bg-success",
        OrderStatus::Canceled => "bg-danger",
    }
}

/// A visible grid row: the order plus its presentation attributes
#[derive(Debug, Clone, Serialize)]
pub struct GridRow {
    #[serde(flatten)]
    pub order: Order,
    pub badge: &'static str,
    pub actions: Vec<RowAction>,
    pub has_actions_menu: bool,
}

impl From<Order> for GridRow {
    fn from(order: Order) -> Self {
        let actions = row_actions(order.status).to_vec();
        Self {
            badge: status_badge(order.status),
            has_actions_menu: order.status.is_active(),
            actions,
            order,
        }
    }
}

/// Visible grid content for one query
#[derive(Debug, Clone, Serialize)]
pub struct GridView {
    pub orders: Vec<GridRow>,

    /// Number of visible rows
    pub count: usize,

    /// Number of orders before filtering
    pub total: usize,

    /// No-results indicator, set only when nothing matched
    pub message: Option<&'static str>,
}

impl GridView {
    pub fn build(orders: &[Order], query: &GridQuery) -> Self {
        let rows: Vec<GridRow> = apply(orders, query).into_iter().map(GridRow::from).collect();
        let count = rows.len();

        Self {
            orders: rows,
            count,
            total: orders.len(),
            message: (count == 0).then_some(NO_RESULTS_MESSAGE),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
