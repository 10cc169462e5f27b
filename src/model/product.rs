/// Represents a product in the inventory.
///
/// The backend owns products: it assigns the `identifier` and is the only
/// authority on `quantity`. The dashboard keeps a cached copy that is
/// resynchronised from every mutation response.
///
/// See [`InventoryApi`](crate::clients::InventoryApi) for the operations that
/// read and mutate products.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub identifier: String,
    pub name: String,
    pub description: String,
    pub quantity: u32,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `identifier` - Business identifier assigned by the backend
    /// * `name` - Product name
    /// * `description` - Free-form description
    /// * `quantity` - Stock currently held
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            description: description.into(),
            quantity,
        }
    }
}

/// Authoritative quantity returned by an increase/decrease call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUpdate {
    pub quantity: u32,
}

/// Payload for creating a new product. The backend starts it at zero stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
}

/// Payload for updating a product's name and/or description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Success envelope used by the mutation endpoints:
/// `{"success": true, "information": "...", "object": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub information: String,
    pub object: T,
}

/// Structured failure body: `{"information": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct FailureBody {
    pub information: String,
}
