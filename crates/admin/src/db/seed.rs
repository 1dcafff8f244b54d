//! Sample data written into absent collections on first read.

use chrono::{DateTime, TimeZone, Utc};

use reeldeal_core::{
    Category, CategoryId, Customer, CustomerId, Order, OrderId, OrderItem, OrderStatus,
    Price, Product, ProductId, ShippingAddress,
};

const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// The five starter categories.
#[must_use]
pub fn categories(now: DateTime<Utc>) -> Vec<Category> {
    ["Fishing Rods", "Fishing Line", "Lures", "Reels", "Tackle Boxes"]
        .iter()
        .zip(1..)
        .map(|(name, id): (&&str, u32)| Category::new(CategoryId::new(id.to_string()), name, now))
        .collect()
}

/// Three sample products; the fishing line starts low on stock.
#[must_use]
pub fn products(now: DateTime<Utc>) -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new("1"),
            name: "OceanMaster Pro Rod".to_string(),
            description: "Professional grade fishing rod for deep sea fishing".to_string(),
            specifications: "7ft length, medium-heavy action, carbon fiber construction"
                .to_string(),
            price: Price::from_cents(19_999),
            compare_at_price: Some(Price::from_cents(24_999)),
            sku: "ROD-001".to_string(),
            category: "Fishing Rods".to_string(),
            weight: 8.5,
            images: vec![PLACEHOLDER_IMAGE.to_string()],
            stock: 15,
            created_at: now,
        },
        Product {
            id: ProductId::new("2"),
            name: "Bass Assassin Lure".to_string(),
            description: "Highly effective lure for bass fishing".to_string(),
            specifications: "3.5 inches, realistic swimming action, multiple color options"
                .to_string(),
            price: Price::from_cents(1_299),
            compare_at_price: None,
            sku: "LURE-023".to_string(),
            category: "Lures".to_string(),
            weight: 0.5,
            images: vec![PLACEHOLDER_IMAGE.to_string()],
            stock: 45,
            created_at: now,
        },
        Product {
            id: ProductId::new("3"),
            name: "Braided Fishing Line 20lb".to_string(),
            description: "High-strength braided fishing line".to_string(),
            specifications: "300 yards, 20lb test, low stretch".to_string(),
            price: Price::from_cents(3_499),
            compare_at_price: None,
            sku: "LINE-009".to_string(),
            category: "Fishing Line".to_string(),
            weight: 1.2,
            images: vec![PLACEHOLDER_IMAGE.to_string()],
            stock: 3,
            created_at: now,
        },
    ]
}

/// Two sample customers with fixed registration dates.
#[must_use]
pub fn customers() -> Vec<Customer> {
    vec![
        Customer {
            id: CustomerId::new("1"),
            name: "John Angler".to_string(),
            email: "john.angler@example.com".to_string(),
            registered_at: fixed(2023, 10, 15, 10, 0),
            total_orders: 3,
        },
        Customer {
            id: CustomerId::new("2"),
            name: "Sarah Fisher".to_string(),
            email: "sarah.fisher@example.com".to_string(),
            registered_at: fixed(2023, 10, 20, 14, 30),
            total_orders: 1,
        },
    ]
}

/// Two sample orders matching the sample customers and products.
#[must_use]
pub fn orders() -> Vec<Order> {
    vec![
        Order {
            id: OrderId::new("RD-1001"),
            customer_id: CustomerId::new("1"),
            customer_name: "John Angler".to_string(),
            customer_email: "john.angler@example.com".to_string(),
            shipping_address: ShippingAddress {
                street: "123 Harbor Lane".to_string(),
                city: "Coastal Bay".to_string(),
                state: "CA".to_string(),
                zip: "90210".to_string(),
            },
            items: vec![
                OrderItem {
                    product_id: ProductId::new("1"),
                    product_name: "OceanMaster Pro Rod".to_string(),
                    quantity: 1,
                    price: Price::from_cents(19_999),
                },
                OrderItem {
                    product_id: ProductId::new("2"),
                    product_name: "Bass Assassin Lure".to_string(),
                    quantity: 2,
                    price: Price::from_cents(1_299),
                },
            ],
            total: Price::from_cents(22_597),
            status: OrderStatus::Processing,
            tracking_number: None,
            created_at: fixed(2023, 10, 27, 9, 0),
        },
        Order {
            id: OrderId::new("RD-1002"),
            customer_id: CustomerId::new("2"),
            customer_name: "Sarah Fisher".to_string(),
            customer_email: "sarah.fisher@example.com".to_string(),
            shipping_address: ShippingAddress {
                street: "456 Marina Drive".to_string(),
                city: "Seaside".to_string(),
                state: "FL".to_string(),
                zip: "33139".to_string(),
            },
            items: vec![OrderItem {
                product_id: ProductId::new("3"),
                product_name: "Braided Fishing Line 20lb".to_string(),
                quantity: 1,
                price: Price::from_cents(3_499),
            }],
            total: Price::from_cents(3_499),
            status: OrderStatus::Shipped,
            tracking_number: Some("TRK123456789".to_string()),
            created_at: fixed(2023, 10, 26, 15, 30),
        },
    ]
}

fn fixed(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}
