pub mod payment;
pub mod shop;
