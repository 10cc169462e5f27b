//! # Product Detail Controller
//!
//! Drives the detail view of one selected product: stock adjustments, the
//! quantity input and the failure alert.
//!
//! The displayed quantity only changes once the server has answered, and it
//! always takes the server's value. A failed call leaves the product alone and
//! raises a [`AlertKind::Danger`] alert carrying the server's explanation.

pub mod alert;

pub use alert::*;

use std::sync::Arc;
use tokio::time::Instant;
use tracing::{info, instrument, warn};

use crate::clients::{InventoryApi, InventoryError};
use crate::model::{Product, ProductStat, QuantityUpdate};

/// The controller's own alert flag, kind and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertState {
    pub visible: bool,
    pub kind: AlertKind,
    pub message: String,
}

impl Default for AlertState {
    fn default() -> Self {
        Self {
            visible: false,
            kind: AlertKind::default(),
            message: String::new(),
        }
    }
}

pub struct ProductDetail {
    inventory: Arc<dyn InventoryApi>,
    product: Product,
    input: String,
    alert: AlertState,
    banner: TransientAlert,
}

impl ProductDetail {
    pub fn new(inventory: Arc<dyn InventoryApi>, product: Product) -> Self {
        Self {
            inventory,
            product,
            input: String::new(),
            alert: AlertState::default(),
            banner: TransientAlert::new(),
        }
    }

    /// Displays a different product.
    pub fn select(&mut self, product: Product) {
        self.product = product;
        self.input.clear();
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Chart data for the displayed product, derived afresh.
    pub fn stat(&self) -> ProductStat {
        ProductStat::from_product(&self.product)
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn alert(&self) -> &AlertState {
        &self.alert
    }

    pub fn banner(&self) -> &TransientAlert {
        &self.banner
    }

    #[instrument(skip(self), fields(identifier = %self.product.identifier))]
    pub async fn increase_quantity(&mut self, amount: i32) -> Result<u32, InventoryError> {
        let result = self
            .inventory
            .increase_quantity(&self.product.identifier, amount)
            .await;
        self.reconcile(result)
    }

    #[instrument(skip(self), fields(identifier = %self.product.identifier))]
    pub async fn decrease_quantity(&mut self, amount: i32) -> Result<u32, InventoryError> {
        let result = self
            .inventory
            .decrease_quantity(&self.product.identifier, amount)
            .await;
        self.reconcile(result)
    }

    /// Clears the alert flag. Called when the alert's timer fires, or earlier
    /// if the user dismisses it.
    pub fn hide_alert(&mut self) {
        self.alert.visible = false;
        self.banner.dismiss();
    }

    /// Hides the alert if its deadline has passed by `now`.
    ///
    /// For owners that redraw on their own schedule instead of awaiting
    /// [`run_alert_timer`](Self::run_alert_timer).
    pub fn poll_alert(&mut self, now: Instant) -> Option<AlertTimedOut> {
        let timed_out = self.banner.poll(now)?;
        self.hide_alert();
        Some(timed_out)
    }

    /// Waits for the visible alert to time out, then hides it.
    ///
    /// Returns `false` without waiting if no alert is shown.
    pub async fn run_alert_timer(&mut self) -> bool {
        match self.banner.wait_for_timeout().await {
            Some(AlertTimedOut) => {
                self.hide_alert();
                true
            }
            None => false,
        }
    }

    fn reconcile(
        &mut self,
        result: Result<QuantityUpdate, InventoryError>,
    ) -> Result<u32, InventoryError> {
        match result {
            Ok(update) => {
                info!(
                    previous = self.product.quantity,
                    quantity = update.quantity,
                    "Quantity updated"
                );
                self.product.quantity = update.quantity;
                self.input.clear();
                Ok(update.quantity)
            }
            Err(e) => {
                warn!(error = %e, "Quantity change rejected");
                let message = e.user_message();
                self.alert = AlertState {
                    visible: true,
                    kind: AlertKind::Danger,
                    message: message.clone(),
                };
                self.banner.show(AlertKind::Danger, message);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::mock::{Call, MockInventory};
    use std::time::Duration;

    fn widget() -> Product {
        Product::new("a", "Widget", "Blue", 200)
    }

    #[tokio::test]
    async fn test_success_takes_server_quantity() {
        let mock = MockInventory::new();
        // Server answers with a value unrelated to 200 + 5.
        mock.expect_increase().return_ok(QuantityUpdate { quantity: 999 });

        let mut detail = ProductDetail::new(Arc::new(mock.clone()), widget());
        detail.set_input("5");

        let quantity = detail.increase_quantity(5).await.unwrap();

        assert_eq!(quantity, 999);
        assert_eq!(detail.product().quantity, 999);
        assert_eq!(detail.input(), "");
        assert!(!detail.alert().visible);
        assert_eq!(mock.calls(), vec![Call::Increase("a".into(), 5)]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_failure_keeps_quantity_and_raises_danger() {
        let mock = MockInventory::new();
        mock.expect_decrease().return_err(InventoryError::Application {
            status: 400,
            information: "Invalid quantity obtained while trying to decrease".into(),
        });

        let mut detail = ProductDetail::new(Arc::new(mock.clone()), widget());
        detail.set_input("500");

        let result = detail.decrease_quantity(500).await;

        assert!(result.is_err());
        assert_eq!(detail.product().quantity, 200);
        assert_eq!(detail.input(), "500");
        assert!(detail.alert().visible);
        assert_eq!(detail.alert().kind.as_str(), "danger");
        assert_eq!(
            detail.alert().message,
            "Invalid quantity obtained while trying to decrease"
        );
        assert!(detail.banner().is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_alert_timer_hides_alert() {
        let mock = MockInventory::new();
        mock.expect_increase()
            .return_err(InventoryError::Network("connection refused".into()));

        let mut detail = ProductDetail::new(Arc::new(mock), widget());
        let _ = detail.increase_quantity(1).await;
        assert!(detail.alert().visible);

        assert!(detail.run_alert_timer().await);
        assert!(!detail.alert().visible);
        assert!(!detail.banner().is_visible());
        assert!(!detail.run_alert_timer().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_alert_hides_after_deadline_without_waiting() {
        let mock = MockInventory::new();
        mock.expect_increase()
            .return_err(InventoryError::Network("connection refused".into()));

        let mut detail = ProductDetail::new(Arc::new(mock), widget());
        let _ = detail.increase_quantity(1).await;

        tokio::time::advance(Duration::from_millis(1999)).await;
        assert_eq!(detail.poll_alert(Instant::now()), None);
        assert!(detail.alert().visible);

        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(detail.poll_alert(Instant::now()), Some(AlertTimedOut));
        assert!(!detail.alert().visible);
        assert!(!detail.banner().is_visible());

        // Fires once per appearance.
        assert_eq!(detail.poll_alert(Instant::now()), None);
    }

    #[tokio::test]
    async fn test_select_switches_product_and_stat() {
        let mock = MockInventory::new();
        let mut detail = ProductDetail::new(Arc::new(mock), widget());
        detail.set_input("3");

        detail.select(Product::new("b", "Bolt", "", 40));

        assert_eq!(detail.product().identifier, "b");
        assert_eq!(detail.input(), "");
        assert_eq!(detail.stat().data_points(), &[40, 960]);
    }
}
