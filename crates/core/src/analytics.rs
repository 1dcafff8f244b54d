//! Sales analytics over the order collection.
//!
//! Everything here is a pure function of the orders passed in and an explicit
//! `now`, so callers (screens, JSON API, CLI, tests) decide the clock.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Order, Price, Product};

/// Number of products kept in the top-products ranking.
pub const TOP_PRODUCTS_LIMIT: usize = 5;

/// Number of orders and low-stock products listed on the dashboard.
pub const DASHBOARD_LIST_LIMIT: usize = 5;

// =============================================================================
// Date Ranges
// =============================================================================

/// Date window selector for sales reports.
///
/// The windows are not uniform: `Today` and `ThisMonth` are
/// calendar-aligned (UTC), while `ThisWeek` and `ThisQuarter` are rolling
/// windows of 7 and 90 days ending at `now` with no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateRange {
    Today,
    #[serde(alias = "thisWeek")]
    ThisWeek,
    #[default]
    #[serde(alias = "thisMonth")]
    ThisMonth,
    #[serde(alias = "thisQuarter")]
    ThisQuarter,
}

impl DateRange {
    /// All ranges in selector order.
    pub const ALL: [Self; 4] = [Self::Today, Self::ThisWeek, Self::ThisMonth, Self::ThisQuarter];

    /// Query-string tag (e.g., `this-week`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::ThisWeek => "this-week",
            Self::ThisMonth => "this-month",
            Self::ThisQuarter => "this-quarter",
        }
    }

    /// Human label for the selector.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::ThisWeek => "This Week",
            Self::ThisMonth => "This Month",
            Self::ThisQuarter => "This Quarter",
        }
    }

    /// Whether an order created at `created_at` falls inside this window.
    #[must_use]
    pub fn contains(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            Self::Today => created_at.date_naive() == now.date_naive(),
            Self::ThisWeek => created_at >= now - Duration::days(7),
            Self::ThisMonth => {
                created_at.year() == now.year() && created_at.month() == now.month()
            }
            Self::ThisQuarter => created_at >= now - Duration::days(90),
        }
    }

    /// Keep the orders inside this window, preserving their order.
    #[must_use]
    pub fn filter<'a>(&self, orders: &'a [Order], now: DateTime<Utc>) -> Vec<&'a Order> {
        orders
            .iter()
            .filter(|order| self.contains(order.created_at, now))
            .collect()
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DateRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(Self::Today),
            "this-week" | "thisWeek" => Ok(Self::ThisWeek),
            "this-month" | "thisMonth" => Ok(Self::ThisMonth),
            "this-quarter" | "thisQuarter" => Ok(Self::ThisQuarter),
            _ => Err(format!("invalid date range: {s}")),
        }
    }
}

// =============================================================================
// Sales Summary
// =============================================================================

/// Units and revenue for one product name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub name: String,
    pub quantity: u64,
    pub revenue: Price,
}

/// Aggregated sales for a date window.
///
/// Serializes with camelCase keys and money rounded to cents:
/// `{ range, totalRevenue, totalOrders, averageOrderValue, topProducts }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub range: DateRange,
    pub total_revenue: Price,
    pub total_orders: usize,
    pub average_order_value: Price,
    pub top_products: Vec<ProductSales>,
}

impl SalesSummary {
    /// Aggregate the orders that fall inside `range` at `now`.
    #[must_use]
    pub fn compute(orders: &[Order], range: DateRange, now: DateTime<Utc>) -> Self {
        let filtered = range.filter(orders, now);
        let mut summary = Self::from_orders(filtered.iter().copied());
        summary.range = range;
        summary
    }

    /// Aggregate an already-filtered set of orders.
    ///
    /// The average is zero when there are no orders. Products are keyed by
    /// name; the ranking sorts by revenue descending with a stable sort, so
    /// ties keep the order in which the names were first seen.
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        let mut total_revenue = Price::ZERO;
        let mut total_orders = 0_usize;
        let mut products: Vec<ProductSales> = Vec::new();
        let mut index: HashMap<&'a str, usize> = HashMap::new();

        for order in orders {
            total_revenue += order.total;
            total_orders += 1;

            for item in &order.items {
                let slot = *index.entry(item.product_name.as_str()).or_insert_with(|| {
                    products.push(ProductSales {
                        name: item.product_name.clone(),
                        quantity: 0,
                        revenue: Price::ZERO,
                    });
                    products.len() - 1
                });
                if let Some(entry) = products.get_mut(slot) {
                    entry.quantity += u64::from(item.quantity);
                    entry.revenue += item.line_total();
                }
            }
        }

        products.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        products.truncate(TOP_PRODUCTS_LIMIT);
        for product in &mut products {
            product.revenue = product.revenue.round_to_cents();
        }

        Self {
            range: DateRange::default(),
            total_revenue: total_revenue.round_to_cents(),
            total_orders,
            average_order_value: (total_revenue / total_orders).round_to_cents(),
            top_products: products,
        }
    }
}

// =============================================================================
// Dashboard
// =============================================================================

/// Store overview shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub today_sales: Price,
    pub month_sales: Price,
    /// Orders still pending or processing.
    pub new_orders: usize,
    pub low_stock_count: usize,
    pub customer_count: usize,
    /// First orders in collection order.
    pub recent_orders: Vec<Order>,
    /// First products under the low-stock threshold.
    pub low_stock_products: Vec<Product>,
}

impl DashboardStats {
    /// Compute the dashboard overview.
    #[must_use]
    pub fn compute(
        orders: &[Order],
        products: &[Product],
        customer_count: usize,
        now: DateTime<Utc>,
    ) -> Self {
        let sales_in = |range: DateRange| -> Price {
            range
                .filter(orders, now)
                .iter()
                .map(|order| order.total)
                .sum::<Price>()
                .round_to_cents()
        };

        let low_stock: Vec<&Product> = products
            .iter()
            .filter(|product| product.stock < crate::StockLevel::LOW_STOCK_THRESHOLD)
            .collect();

        Self {
            today_sales: sales_in(DateRange::Today),
            month_sales: sales_in(DateRange::ThisMonth),
            new_orders: orders.iter().filter(|order| order.status.is_open()).count(),
            low_stock_count: low_stock.len(),
            customer_count,
            recent_orders: orders.iter().take(DASHBOARD_LIST_LIMIT).cloned().collect(),
            low_stock_products: low_stock
                .into_iter()
                .take(DASHBOARD_LIST_LIMIT)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{
        CustomerId, OrderId, OrderItem, OrderStatus, ProductId, ShippingAddress,
    };
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn item(name: &str, quantity: u32, cents: i64) -> OrderItem {
        OrderItem {
            product_id: ProductId::new(name),
            product_name: name.to_string(),
            quantity,
            price: Price::from_cents(cents),
        }
    }

    fn order(id: &str, created_at: DateTime<Utc>, items: Vec<OrderItem>) -> Order {
        let total = items.iter().map(OrderItem::line_total).sum();
        Order {
            id: OrderId::new(id),
            customer_id: CustomerId::new("1"),
            customer_name: "John Angler".to_string(),
            customer_email: "john.angler@example.com".to_string(),
            shipping_address: ShippingAddress::default(),
            items,
            total,
            status: OrderStatus::Pending,
            tracking_number: None,
            created_at,
        }
    }

    #[test]
    fn test_empty_orders() {
        let summary = SalesSummary::compute(&[], DateRange::ThisMonth, now());
        assert_eq!(summary.total_revenue, Price::ZERO);
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.average_order_value, Price::ZERO);
        assert!(summary.top_products.is_empty());
    }

    #[test]
    fn test_revenue_count_and_average() {
        let orders = vec![
            order("a", now(), vec![item("A", 1, 10_000)]),
            order("b", now(), vec![item("B", 2, 2_500)]),
        ];
        let summary = SalesSummary::compute(&orders, DateRange::ThisMonth, now());

        assert_eq!(summary.total_revenue, Price::from_cents(15_000));
        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.average_order_value, Price::from_cents(7_500));
        assert_eq!(summary.range, DateRange::ThisMonth);
    }

    #[test]
    fn test_top_products_sorted_and_truncated() {
        let orders = vec![
            order(
                "a",
                now(),
                vec![item("Rod", 1, 20_000), item("Lure", 3, 1_000), item("Line", 1, 3_500)],
            ),
            order(
                "b",
                now(),
                vec![
                    item("Lure", 2, 1_000),
                    item("Reel", 1, 9_000),
                    item("Box", 1, 4_000),
                    item("Hook", 10, 50),
                ],
            ),
        ];
        let summary = SalesSummary::compute(&orders, DateRange::Today, now());
        let names: Vec<&str> = summary.top_products.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["Rod", "Reel", "Lure", "Box", "Line"]);
        assert_eq!(summary.top_products[2].quantity, 5);
        assert_eq!(summary.top_products[2].revenue, Price::from_cents(5_000));
        assert!(
            summary
                .top_products
                .windows(2)
                .all(|pair| pair[0].revenue >= pair[1].revenue)
        );
    }

    #[test]
    fn test_top_products_ties_keep_first_seen_order() {
        let orders = vec![order(
            "a",
            now(),
            vec![item("Zebra Spinner", 1, 1_000), item("Alpha Jig", 2, 500)],
        )];
        let summary = SalesSummary::compute(&orders, DateRange::Today, now());
        let names: Vec<&str> = summary.top_products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Zebra Spinner", "Alpha Jig"]);
    }

    #[test]
    fn test_today_is_calendar_day() {
        let start_of_day = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        let yesterday_late = Utc.with_ymd_and_hms(2024, 3, 14, 23, 59, 59).unwrap();
        assert!(DateRange::Today.contains(start_of_day, now()));
        assert!(!DateRange::Today.contains(yesterday_late, now()));
    }

    #[test]
    fn test_week_is_rolling() {
        let six_days_ago = now() - Duration::days(6);
        let eight_days_ago = now() - Duration::days(8);
        let tomorrow = now() + Duration::days(1);
        assert!(DateRange::ThisWeek.contains(six_days_ago, now()));
        assert!(!DateRange::ThisWeek.contains(eight_days_ago, now()));
        // No upper bound on rolling windows.
        assert!(DateRange::ThisWeek.contains(tomorrow, now()));
    }

    #[test]
    fn test_month_is_calendar_aligned() {
        let first_of_month = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let last_month = Utc.with_ymd_and_hms(2024, 2, 29, 23, 0, 0).unwrap();
        let last_year = Utc.with_ymd_and_hms(2023, 3, 15, 12, 0, 0).unwrap();
        assert!(DateRange::ThisMonth.contains(first_of_month, now()));
        assert!(!DateRange::ThisMonth.contains(last_month, now()));
        assert!(!DateRange::ThisMonth.contains(last_year, now()));
    }

    #[test]
    fn test_quarter_is_ninety_days() {
        assert!(DateRange::ThisQuarter.contains(now() - Duration::days(89), now()));
        assert!(DateRange::ThisQuarter.contains(now() - Duration::days(90), now()));
        assert!(!DateRange::ThisQuarter.contains(now() - Duration::days(91), now()));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let orders: Vec<Order> = (0..40)
            .map(|day| order(&day.to_string(), now() - Duration::days(day), vec![]))
            .collect();

        for range in DateRange::ALL {
            let once: Vec<Order> = range.filter(&orders, now()).into_iter().cloned().collect();
            let twice: Vec<Order> = range.filter(&once, now()).into_iter().cloned().collect();
            assert_eq!(once, twice, "{range} filter is not idempotent");
        }
    }

    #[test]
    fn test_out_of_range_orders_excluded() {
        let orders = vec![
            order("new", now(), vec![item("A", 1, 1_000)]),
            order("old", now() - Duration::days(120), vec![item("B", 1, 9_000)]),
        ];
        let summary = SalesSummary::compute(&orders, DateRange::ThisQuarter, now());
        assert_eq!(summary.total_orders, 1);
        assert_eq!(summary.total_revenue, Price::from_cents(1_000));
        assert_eq!(summary.top_products.len(), 1);
    }

    #[test]
    fn test_summary_json_keys_and_money_scale() {
        let empty = serde_json::to_value(SalesSummary::compute(&[], DateRange::Today, now())).unwrap();
        assert_eq!(
            empty,
            serde_json::json!({
                "range": "today",
                "totalRevenue": "0.00",
                "totalOrders": 0,
                "averageOrderValue": "0.00",
                "topProducts": []
            })
        );

        let orders = vec![
            order("1", now(), vec![item("Rod", 1, 10_000)]),
            order("2", now(), vec![item("Line", 2, 2_500)]),
        ];
        let json = serde_json::to_value(SalesSummary::compute(&orders, DateRange::Today, now())).unwrap();
        assert_eq!(json["totalRevenue"], "150.00");
        assert_eq!(json["averageOrderValue"], "75.00");
        assert_eq!(json["topProducts"][0]["name"], "Rod");
        assert_eq!(json["topProducts"][0]["revenue"], "100.00");
    }

    #[test]
    fn test_dashboard_json_uses_camel_case() {
        let stats = DashboardStats::compute(&[], &[], 2, now());
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["customerCount"], 2);
        assert_eq!(json["todaySales"], "0.00");
        assert!(json.get("recentOrders").is_some());
        assert!(json.get("low_stock_count").is_none());
    }

    #[test]
    fn test_date_range_parsing() {
        assert_eq!("today".parse::<DateRange>().unwrap(), DateRange::Today);
        assert_eq!("thisWeek".parse::<DateRange>().unwrap(), DateRange::ThisWeek);
        assert_eq!("this-quarter".parse::<DateRange>().unwrap(), DateRange::ThisQuarter);
        assert!("last-year".parse::<DateRange>().is_err());

        let parsed: DateRange = serde_json::from_str("\"thisMonth\"").unwrap();
        assert_eq!(parsed, DateRange::ThisMonth);
        assert_eq!(serde_json::to_string(&DateRange::ThisWeek).unwrap(), "\"this-week\"");
    }

    #[test]
    fn test_dashboard_stats() {
        let mut shipped = order("c", now() - Duration::days(40), vec![item("C", 1, 3_000)]);
        shipped.status = OrderStatus::Shipped;
        let orders = vec![
            order("a", now(), vec![item("A", 1, 1_000)]),
            order("b", now() - Duration::days(3), vec![item("B", 1, 2_000)]),
            shipped,
        ];

        let product = |stock: u32| Product {
            id: ProductId::new(stock.to_string()),
            name: format!("P{stock}"),
            description: String::new(),
            specifications: String::new(),
            price: Price::from_cents(100),
            compare_at_price: None,
            sku: String::new(),
            category: String::new(),
            weight: 0.0,
            images: vec![],
            stock,
            created_at: now(),
        };
        let products = vec![product(15), product(3), product(0), product(10)];

        let stats = DashboardStats::compute(&orders, &products, 2, now());
        assert_eq!(stats.today_sales, Price::from_cents(1_000));
        assert_eq!(stats.month_sales, Price::from_cents(3_000));
        assert_eq!(stats.new_orders, 2);
        assert_eq!(stats.low_stock_count, 2);
        assert_eq!(stats.customer_count, 2);
        assert_eq!(stats.recent_orders.len(), 3);
        assert_eq!(stats.low_stock_products[0].stock, 3);
    }
}
