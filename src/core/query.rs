//! Grid query parameters and their parsing
//!
//! The orders grid is driven by a small set of query-string parameters:
//!
//! ```text
//! GET /api/orders?search=downtown
//! GET /api/orders?status=Canceled&fulfillment=Delivery
//! GET /api/orders?sort=store_name:desc
//! ```
//!
//! Empty values and `all` mean "no filter", mirroring the "All Statuses" and
//! "All Fulfillment Types" entries of the dashboard selects.

use super::error::RequestError;
use super::order::{FulfillmentType, OrderStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw grid parameters as they arrive in the query string
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GridParams {
    /// Free-text search over order number, store and partner
    pub search: Option<String>,

    /// Status name, empty or `all` for no filter
    pub status: Option<String>,

    /// Fulfillment type name, empty or `all` for no filter
    pub fulfillment: Option<String>,

    /// Sort expression
    ///
    /// # Format
    /// - `column` or `column:asc` (ascending)
    /// - `column:desc` (descending)
    pub sort: Option<String>,
}

/// Columns the grid can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    #[default]
    OrderNumber,
    Status,
    StoreId,
    StoreName,
    Items,
    FulfillmentType,
}

impl SortColumn {
    pub const ALL: [SortColumn; 6] = [
        SortColumn::OrderNumber,
        SortColumn::Status,
        SortColumn::StoreId,
        SortColumn::StoreName,
        SortColumn::Items,
        SortColumn::FulfillmentType,
    ];

    /// Name used in query strings
    pub fn key(self) -> &'static str {
        match self {
            SortColumn::OrderNumber => "order_number",
            SortColumn::Status => "status",
            SortColumn::StoreId => "store_id",
            SortColumn::StoreName => "store_name",
            SortColumn::Items => "items",
            SortColumn::FulfillmentType => "fulfillment_type",
        }
    }

    /// Column header text
    pub fn title(self) -> &'static str {
        match self {
            SortColumn::OrderNumber => "Order Number",
            SortColumn::Status => "Status",
            SortColumn::StoreId => "Store ID",
            SortColumn::StoreName => "Store Name",
            SortColumn::Items => "Items",
            SortColumn::FulfillmentType => "Fulfillment Type",
        }
    }
}

impl FromStr for SortColumn {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let key = match key.as_str() {
            "number_of_items" => "items",
            "fulfillment" => "fulfillment_type",
            other => other,
        };

        Self::ALL
            .into_iter()
            .find(|column| column.key() == key)
            .ok_or_else(|| RequestError::InvalidQueryParam {
                param: "sort".to_string(),
                value: s.to_string(),
                message: "unknown sort column".to_string(),
            })
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn key(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active sort of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridSort {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl GridSort {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Sort that results from clicking the header of `column`
    ///
    /// Clicking the active column flips the direction; any other column
    /// starts ascending.
    pub fn toggled(self, column: SortColumn) -> Self {
        if self.column == column {
            Self::new(column, self.direction.reversed())
        } else {
            Self::new(column, SortDirection::Ascending)
        }
    }
}

impl fmt::Display for GridSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.column.key(), self.direction.key())
    }
}

impl FromStr for GridSort {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, direction) = match s.split_once(':') {
            Some((column, direction)) => (column, Some(direction)),
            None => (s, None),
        };

        let direction = match direction.map(|d| d.trim().to_ascii_lowercase()) {
            None => SortDirection::Ascending,
            Some(d) if d == "asc" || d.is_empty() => SortDirection::Ascending,
            Some(d) if d == "desc" => SortDirection::Descending,
            Some(_) => {
                return Err(RequestError::InvalidQueryParam {
                    param: "sort".to_string(),
                    value: s.to_string(),
                    message: "direction must be 'asc' or 'desc'".to_string(),
                });
            }
        };

        Ok(Self::new(column.parse()?, direction))
    }
}

/// Parsed, validated grid state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GridQuery {
    pub search: String,
    pub status: Option<OrderStatus>,
    pub fulfillment: Option<FulfillmentType>,
    pub sort: GridSort,
}

impl GridQuery {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_fulfillment(mut self, fulfillment: FulfillmentType) -> Self {
        self.fulfillment = Some(fulfillment);
        self
    }

    pub fn with_sort(mut self, column: SortColumn, direction: SortDirection) -> Self {
        self.sort = GridSort::new(column, direction);
        self
    }

    /// Validate raw query-string parameters
    pub fn from_params(params: &GridParams) -> Result<Self, RequestError> {
        let status = parse_filter::<OrderStatus>("status", params.status.as_deref())?;
        let fulfillment =
            parse_filter::<FulfillmentType>("fulfillment", params.fulfillment.as_deref())?;

        let sort = match params.sort.as_deref().map(str::trim) {
            None | Some("") => GridSort::default(),
            Some(expr) => expr.parse()?,
        };

        Ok(Self {
            search: params.search.clone().unwrap_or_default(),
            status,
            fulfillment,
            sort,
        })
    }
}

fn parse_filter<T>(param: &str, raw: Option<&str>) -> Result<Option<T>, RequestError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|e: T::Err| RequestError::InvalidQueryParam {
                param: param.to_string(),
                value: value.to_string(),
                message: e.to_string(),
            }),
    }
}
