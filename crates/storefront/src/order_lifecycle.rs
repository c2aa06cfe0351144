//! # Order Lifecycle
//!
//! The status state machine. [`RULES`] is the only place that says which
//! transitions exist and who may perform them; everything else
//! (`allowed_next`, `is_terminal`, [`authorize_transition`]) reads from it.
//!
//! ```text
//! pending ──admin──▶ processing ──admin──▶ shipped ──admin──▶ delivered
//!    │                   │
//!    └──owner/admin──────┴──────────▶ cancelled
//! ```
//!
//! Legality is decided before permission: asking to ship a pending order is
//! an invalid transition for everybody, not an authorization failure.

use crate::model::{Actor, OrderId, UserId};
use crate::order_actor::LifecycleError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// Who may perform a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    AdminOnly,
    OwnerOrAdmin,
}

impl Permission {
    fn allows(self, actor: &Actor, owner_id: UserId) -> bool {
        match self {
            Permission::AdminOnly => actor.is_admin(),
            Permission::OwnerOrAdmin => actor.is_admin() || actor.owns(owner_id),
        }
    }
}

/// `(from, to, who)` for every legal transition.
pub const RULES: [(OrderStatus, OrderStatus, Permission); 5] = [
    (OrderStatus::Pending, OrderStatus::Processing, Permission::AdminOnly),
    (OrderStatus::Processing, OrderStatus::Shipped, Permission::AdminOnly),
    (OrderStatus::Shipped, OrderStatus::Delivered, Permission::AdminOnly),
    (OrderStatus::Pending, OrderStatus::Cancelled, Permission::OwnerOrAdmin),
    (OrderStatus::Processing, OrderStatus::Cancelled, Permission::OwnerOrAdmin),
];

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Wire name, as used in `PUT {status}`.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Customer-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Menunggu Pembayaran",
            OrderStatus::Processing => "Sedang Diproses",
            OrderStatus::Shipped => "Dalam Pengiriman",
            OrderStatus::Delivered => "Selesai",
            OrderStatus::Cancelled => "Dibatalkan",
        }
    }

    /// The permission needed to move from `self` to `to`, if that move exists.
    pub fn permission_to(&self, to: OrderStatus) -> Option<Permission> {
        RULES
            .iter()
            .find(|(from, target, _)| from == self && *target == to)
            .map(|(_, _, who)| *who)
    }

    pub fn allowed_next(&self) -> Vec<OrderStatus> {
        RULES
            .iter()
            .filter(|(from, _, _)| from == self)
            .map(|(_, to, _)| *to)
            .collect()
    }

    pub fn is_terminal(&self) -> bool {
        !RULES.iter().any(|(from, _, _)| from == self)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status name is not one of the five wire names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Decides whether `actor` may move order `order_id` (owned by `owner_id`)
/// from `from` to `to`.
pub fn authorize_transition(
    order_id: OrderId,
    owner_id: UserId,
    from: OrderStatus,
    to: OrderStatus,
    actor: &Actor,
) -> Result<(), LifecycleError> {
    let permission = from
        .permission_to(to)
        .ok_or(LifecycleError::InvalidTransition { order_id, from, to })?;

    if !permission.allows(actor, owner_id) {
        return Err(LifecycleError::Unauthorized {
            order_id,
            actor: *actor,
            action: format!("{from} -> {to}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: UserId = UserId(7);
    const ORDER: OrderId = OrderId(1);

    fn admin() -> Actor {
        Actor::Admin(UserId(1))
    }

    fn owner() -> Actor {
        Actor::Customer(OWNER)
    }

    fn stranger() -> Actor {
        Actor::Customer(UserId(99))
    }

    #[test]
    fn test_admin_walks_the_linear_path() {
        let path = [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
        ];
        for pair in path.windows(2) {
            authorize_transition(ORDER, OWNER, pair[0], pair[1], &admin()).unwrap();
        }
    }

    #[test]
    fn test_owner_cannot_advance() {
        let admin_only = [
            (OrderStatus::Pending, OrderStatus::Processing),
            (OrderStatus::Processing, OrderStatus::Shipped),
            (OrderStatus::Shipped, OrderStatus::Delivered),
        ];
        for (from, to) in admin_only {
            assert_eq!(from.permission_to(to), Some(Permission::AdminOnly));
            for actor in [owner(), stranger()] {
                let err = authorize_transition(ORDER, OWNER, from, to, &actor).unwrap_err();
                assert!(
                    matches!(err, LifecycleError::Unauthorized { .. }),
                    "{actor} moving {from} -> {to} gave {err:?}"
                );
            }
        }
    }

    #[test]
    fn test_cancel_rules() {
        for from in [OrderStatus::Pending, OrderStatus::Processing] {
            authorize_transition(ORDER, OWNER, from, OrderStatus::Cancelled, &owner()).unwrap();
            authorize_transition(ORDER, OWNER, from, OrderStatus::Cancelled, &admin()).unwrap();
            let err = authorize_transition(ORDER, OWNER, from, OrderStatus::Cancelled, &stranger())
                .unwrap_err();
            assert!(matches!(err, LifecycleError::Unauthorized { .. }));
        }
        for from in [OrderStatus::Shipped, OrderStatus::Delivered, OrderStatus::Cancelled] {
            let err = authorize_transition(ORDER, OWNER, from, OrderStatus::Cancelled, &admin())
                .unwrap_err();
            assert!(matches!(err, LifecycleError::InvalidTransition { .. }));
        }
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        for from in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            assert!(from.is_terminal());
            assert!(from.allowed_next().is_empty());
            for to in OrderStatus::ALL {
                let err = authorize_transition(ORDER, OWNER, from, to, &admin()).unwrap_err();
                assert!(matches!(err, LifecycleError::InvalidTransition { .. }));
            }
        }
    }

    #[test]
    fn test_skipping_a_step_is_invalid_even_for_admin() {
        let err = authorize_transition(
            ORDER,
            OWNER,
            OrderStatus::Pending,
            OrderStatus::Shipped,
            &admin(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            LifecycleError::InvalidTransition {
                order_id: ORDER,
                from: OrderStatus::Pending,
                to: OrderStatus::Shipped,
            }
        );
    }

    #[test]
    fn test_legality_is_checked_before_permission() {
        let err = authorize_transition(
            ORDER,
            OWNER,
            OrderStatus::Shipped,
            OrderStatus::Cancelled,
            &stranger(),
        )
        .unwrap_err();
        assert!(matches!(err, LifecycleError::InvalidTransition { .. }));
    }

    #[test]
    fn test_names_and_labels() {
        assert_eq!("shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert!("lost".parse::<OrderStatus>().is_err());
        assert_eq!(OrderStatus::Pending.label(), "Menunggu Pembayaran");
        assert_eq!(
            OrderStatus::Pending.allowed_next(),
            vec![OrderStatus::Processing, OrderStatus::Cancelled]
        );
    }
}
