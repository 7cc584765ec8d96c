//! Dashboard page rendering
//!
//! The page is a single tera template fed with a [`DashboardPage`] context:
//! the metric cards, the filter form state, one header per sortable column
//! and the visible rows.

use crate::core::{
    DashboardMetrics, FulfillmentType, GridQuery, GridSort, GridView, OrderStatus, RowAction,
    SortColumn, SortDirection,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tera::{Context, Tera};

/// Name the page template is registered under
pub const DASHBOARD_TEMPLATE_NAME: &str = "dashboard.html";

/// Page template source
pub const DASHBOARD_TEMPLATE: &str = include_str!("../../templates/dashboard.html");

/// One summary card
#[derive(Debug, Clone, Serialize)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub text_class: &'static str,
    pub icon: &'static str,
}

impl MetricCard {
    /// The four header cards, in display order
    pub fn from_metrics(metrics: &DashboardMetrics) -> Vec<Self> {
        vec![
            Self {
                title: "Placed Orders Today",
                value: metrics.placed_orders_today.to_string(),
                text_class: "text-primary",
                icon: "bi bi-bag-plus",
            },
            Self {
                title: "Average 7-Day Placed Orders",
                value: format!("{:.1}", metrics.average_7day_placed_orders),
                text_class: "text-info",
                icon: "bi bi-graph-up",
            },
            Self {
                title: "Completed Orders",
                value: metrics.completed_orders.to_string(),
                text_class: "text-success",
                icon: "bi bi-check-circle",
            },
            Self {
                title: "Red Lights",
                value: metrics.red_lights.to_string(),
                text_class: "text-danger",
                icon: "bi bi-exclamation-triangle",
            },
        ]
    }
}

/// A sortable column header
///
/// `sort` is the sort expression the header links to: the same column with
/// the direction flipped when it is already active, ascending otherwise.
#[derive(Debug, Clone, Serialize)]
pub struct SortHeader {
    pub title: &'static str,
    pub sort: String,
    pub indicator: &'static str,
}

impl SortHeader {
    pub fn for_columns(current: GridSort) -> Vec<Self> {
        SortColumn::ALL
            .iter()
            .map(|&column| Self {
                title: column.title(),
                sort: current.toggled(column).to_string(),
                indicator: if current.column != column {
                    ""
                } else if current.direction == SortDirection::Ascending {
                    "▲"
                } else {
                    "▼"
                },
            })
            .collect()
    }
}

/// An entry of a filter select
#[derive(Debug, Clone, Serialize)]
pub struct FilterOption {
    pub value: &'static str,
    pub selected: bool,
}

/// Filter form state echoed back into the page
#[derive(Debug, Clone, Serialize)]
pub struct FilterForm {
    pub search: String,
    pub status: &'static str,
    pub fulfillment: &'static str,
    pub sort: String,
    pub status_options: Vec<FilterOption>,
    pub fulfillment_options: Vec<FilterOption>,
}

impl FilterForm {
    pub fn from_query(query: &GridQuery) -> Self {
        Self {
            search: query.search.clone(),
            status: query.status.map(OrderStatus::as_str).unwrap_or(""),
            fulfillment: query.fulfillment.map(FulfillmentType::as_str).unwrap_or(""),
            sort: query.sort.to_string(),
            status_options: OrderStatus::ALL
                .iter()
                .map(|&s| FilterOption {
                    value: s.as_str(),
                    selected: query.status == Some(s),
                })
                .collect(),
            fulfillment_options: FulfillmentType::ALL
                .iter()
                .map(|&f| FilterOption {
                    value: f.as_str(),
                    selected: query.fulfillment == Some(f),
                })
                .collect(),
        }
    }
}

/// Template context of the dashboard page
#[derive(Debug, Clone, Serialize)]
pub struct DashboardPage<'a> {
    pub service_name: &'a str,
    pub cards: Vec<MetricCard>,
    pub filters: FilterForm,
    pub headers: Vec<SortHeader>,
    pub grid: &'a GridView,

    /// Button text per serialized row action
    pub action_labels: BTreeMap<&'static str, &'static str>,
}

impl<'a> DashboardPage<'a> {
    pub fn new(
        service_name: &'a str,
        metrics: &DashboardMetrics,
        query: &GridQuery,
        grid: &'a GridView,
    ) -> Self {
        Self {
            service_name,
            cards: MetricCard::from_metrics(metrics),
            filters: FilterForm::from_query(query),
            headers: SortHeader::for_columns(query.sort),
            grid,
            action_labels: RowAction::ALL
                .iter()
                .map(|action| (action.key(), action.label()))
                .collect(),
        }
    }

    pub fn render(&self, templates: &Tera) -> Result<String, tera::Error> {
        let context = Context::from_serialize(self)?;
        templates.render(DASHBOARD_TEMPLATE_NAME, &context)
    }
}
