//! Business logic services.

pub mod error;
pub mod subscription_service;
