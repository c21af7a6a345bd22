//! Shop models used by the integration tests.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Shipped,
    #[serde(skip)]
    Archived,
    Delivered,
}

/// A thing that can be ordered.
#[derive(Serialize, Deserialize)]
pub struct Widget {
    pub sku: String,
    /// Price in cents
    #[apidoc(required, allowable_values = "range[0, infinity]")]
    pub price: u64,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    pub created_by: String,
    #[serde(skip_deserializing)]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: uuid::Uuid,
    pub line_items: Vec<Widget>,
    pub tags: BTreeSet<String>,
    pub widgets_by_sku: HashMap<String, Widget>,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<String>,
    #[serde(skip_serializing)]
    pub payment_token: String,
    #[serde(flatten)]
    pub audit: Audit,
    #[apidoc(example = "leave at the door")]
    pub note: Option<Box<String>>,
}

pub mod paging {
    #[derive(Serialize, Deserialize)]
    pub struct Page<T> {
        pub items: Vec<T>,
        pub total: u64,
        pub next: Option<Box<Page<T>>>,
    }
}

#[derive(Serialize, Deserialize)]
pub struct Node {
    pub id: u32,
    #[serde(flatten)]
    pub next: Link,
}

#[derive(Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    #[serde(flatten)]
    pub node: Box<Node>,
}
