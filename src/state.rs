// src/state.rs
use std::sync::Arc;

use crate::payment::PaymentGateway;
use crate::realtime::RoomHub;
use crate::store::ShopStore;

#[derive(Clone)]
pub struct AppState {
    pub shops: Arc<dyn ShopStore>,
    pub payments: Arc<dyn PaymentGateway>,
    pub hub: RoomHub,
}

impl AppState {
    pub fn new(shops: Arc<dyn ShopStore>, payments: Arc<dyn PaymentGateway>) -> Self {
        Self {
            shops,
            payments,
            hub: RoomHub::new(),
        }
    }
}
