//! Order List Query (`GET /orders`)

use std::cmp::Ordering;

use kernel::query::{PageRequest, SortDirection};

use crate::domain::entity::order::Order;
use crate::error::{CheckoutError, CheckoutResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSortField {
    TotalAmount,
    TotalItems,
    Status,
    CreatedAt,
}

impl OrderSortField {
    pub fn parse(value: &str) -> CheckoutResult<Self> {
        match value.trim() {
            "totalAmount" => Ok(Self::TotalAmount),
            "totalItems" => Ok(Self::TotalItems),
            "status" => Ok(Self::Status),
            "createdAt" => Ok(Self::CreatedAt),
            other => Err(CheckoutError::validation(format!("Cannot sort by {other}"))),
        }
    }

    pub const fn column(&self) -> &'static str {
        match self {
            Self::TotalAmount => "total_amount",
            Self::TotalItems => "total_items",
            Self::Status => "status",
            Self::CreatedAt => "created_at",
        }
    }

    fn compare(&self, a: &Order, b: &Order) -> Ordering {
        match self {
            Self::TotalAmount => a.total_amount.cmp(&b.total_amount),
            Self::TotalItems => a.total_items.cmp(&b.total_items),
            Self::Status => a.status.code().cmp(b.status.code()),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSort {
    pub field: OrderSortField,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderQuery {
    pub sort: Option<OrderSort>,
    pub page: Option<PageRequest>,
}

impl OrderQuery {
    pub fn compare(&self, a: &Order, b: &Order) -> Ordering {
        self.sort
            .map(|sort| sort.direction.apply(sort.field.compare(a, b)))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
    }
}
