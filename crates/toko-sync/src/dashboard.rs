//! Admin dashboard loader.
//!
//! One call fans out to the three sources the overview screen needs
//! (orders, user count, product count), runs them concurrently, and folds
//! the results into a [`DashboardSnapshot`]. The load is all-or-nothing: a
//! dashboard showing live revenue next to a stale customer count is worse
//! than an explicit error, so if any leg fails the whole snapshot fails
//! and the caller keeps whatever it rendered last.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use toko_api::SessionStore;
use toko_core::{recent_orders, CoreError, OrderStats, RecentOrder, RECENT_ORDERS_LIMIT};

use crate::backend::StatsBackend;
use crate::error::SyncResult;

/// Everything the dashboard overview renders, computed from one load.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    /// Per-status counts and the delivered-and-paid revenue sum.
    pub stats: OrderStats,
    /// Newest orders first, at most [`RECENT_ORDERS_LIMIT`] rows.
    pub recent: Vec<RecentOrder>,
    pub user_count: usize,
    pub product_count: usize,
}

/// Fetches and aggregates the admin overview.
pub struct Dashboard {
    backend: Arc<dyn StatsBackend>,
    sessions: Arc<SessionStore>,
}

impl Dashboard {
    pub fn new(backend: Arc<dyn StatsBackend>, sessions: Arc<SessionStore>) -> Self {
        Self { backend, sessions }
    }

    /// Loads a fresh snapshot. Admin only.
    pub async fn load(&self) -> SyncResult<DashboardSnapshot> {
        let session = self.sessions.require().await?;
        if !session.is_admin() {
            return Err(CoreError::ActorNotPermitted {
                actor: session.actor().as_str(),
                action: "view the dashboard",
            }
            .into());
        }

        let (orders, user_count, product_count) = tokio::try_join!(
            self.backend.orders(),
            self.backend.user_count(),
            self.backend.product_count(),
        )?;

        let stats = OrderStats::compute(&orders);
        debug!(
            total_orders = stats.total_orders,
            revenue = %stats.revenue,
            user_count,
            product_count,
            "Dashboard snapshot loaded"
        );

        Ok(DashboardSnapshot {
            recent: recent_orders(&orders, RECENT_ORDERS_LIMIT),
            stats,
            user_count,
            product_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use toko_api::{ApiError, Session};
    use toko_core::{
        Grams, Order, OrderStatus, PaymentMethod, PaymentStatus, Role, Rupiah, ShippingInfo,
        ShippingMethod, User,
    };

    use crate::error::SyncError;

    struct FakeReporting {
        orders: Vec<Order>,
        users: usize,
        products: usize,
        fail_users: AtomicBool,
        hits: AtomicUsize,
    }

    impl FakeReporting {
        fn new(orders: Vec<Order>, users: usize, products: usize) -> Arc<Self> {
            Arc::new(Self {
                orders,
                users,
                products,
                fail_users: AtomicBool::new(false),
                hits: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl StatsBackend for FakeReporting {
        async fn orders(&self) -> SyncResult<Vec<Order>> {
            self.hits.fetch_add(1, Ordering::SeqCst);
            Ok(self.orders.clone())
        }
        async fn user_count(&self) -> SyncResult<usize> {
            self.hits.fetch_add(1, Ordering::SeqCst);
            if self.fail_users.load(Ordering::SeqCst) {
                return Err(SyncError::Api(ApiError::Network(
                    "connection refused".to_string(),
                )));
            }
            Ok(self.users)
        }
        async fn product_count(&self) -> SyncResult<usize> {
            self.hits.fetch_add(1, Ordering::SeqCst);
            Ok(self.products)
        }
    }

    fn order(
        id: &str,
        status: OrderStatus,
        payment: PaymentStatus,
        total: i64,
        age_minutes: i64,
    ) -> Order {
        Order {
            id: id.to_string(),
            order_number: format!("TK-2026-{id}"),
            user_id: "u-1".to_string(),
            status,
            payment_status: payment,
            shipping_info: ShippingInfo {
                full_name: "Sari Dewi".to_string(),
                email: "sari@example.com".to_string(),
                phone: "081234567890".to_string(),
                address: "Jl. Merdeka No. 10, RT 02".to_string(),
                city: "Bandung".to_string(),
                postal_code: "40111".to_string(),
                notes: None,
            },
            payment_method: PaymentMethod::BankTransfer,
            shipping_method: ShippingMethod::Standard,
            subtotal: Rupiah::new(total),
            shipping_cost: Rupiah::zero(),
            total_amount: Rupiah::new(total),
            total_weight: Grams::zero(),
            items: vec![],
            created_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    async fn admin_sessions() -> Arc<SessionStore> {
        let sessions = Arc::new(SessionStore::new());
        sessions
            .set(Session::new(
                "tok-1",
                User {
                    id: "u-staff".to_string(),
                    name: "Pak Budi".to_string(),
                    email: "budi@example.com".to_string(),
                    role: Role::Admin,
                },
            ))
            .await;
        sessions
    }

    #[tokio::test]
    async fn test_snapshot_aggregates_all_three_sources() {
        let fake = FakeReporting::new(
            vec![
                order("a", OrderStatus::Delivered, PaymentStatus::Paid, 200_000, 30),
                order("b", OrderStatus::Delivered, PaymentStatus::Pending, 100_000, 20),
                order("c", OrderStatus::Pending, PaymentStatus::Paid, 50_000, 10),
            ],
            4,
            9,
        );
        let dashboard = Dashboard::new(fake.clone(), admin_sessions().await);

        let snapshot = dashboard.load().await.unwrap();
        assert_eq!(snapshot.stats.total_orders, 3);
        assert_eq!(snapshot.stats.delivered, 2);
        // Revenue needs delivered AND paid; only order "a" qualifies.
        assert_eq!(snapshot.stats.revenue.amount(), 200_000);
        assert_eq!(snapshot.user_count, 4);
        assert_eq!(snapshot.product_count, 9);
        assert_eq!(fake.hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_recent_rows_capped_and_newest_first() {
        let orders = (0..8)
            .map(|i| {
                order(
                    &format!("o-{i}"),
                    OrderStatus::Pending,
                    PaymentStatus::Pending,
                    10_000,
                    // Unsorted input: ages alternate around the middle.
                    if i % 2 == 0 { 60 - i } else { i },
                )
            })
            .collect();
        let fake = FakeReporting::new(orders, 1, 1);
        let dashboard = Dashboard::new(fake, admin_sessions().await);

        let snapshot = dashboard.load().await.unwrap();
        assert_eq!(snapshot.recent.len(), RECENT_ORDERS_LIMIT);
        // Age 1 minute (i = 1) beats age 3, 5, 7 and all the even rows.
        assert_eq!(snapshot.recent[0].id, "o-1");
        for pair in snapshot.recent.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn test_one_failing_source_fails_the_load() {
        let fake = FakeReporting::new(
            vec![order(
                "a",
                OrderStatus::Delivered,
                PaymentStatus::Paid,
                200_000,
                5,
            )],
            4,
            9,
        );
        fake.fail_users.store(true, Ordering::SeqCst);
        let dashboard = Dashboard::new(fake, admin_sessions().await);

        let err = dashboard.load().await.unwrap_err();
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_dashboard_requires_admin() {
        let fake = FakeReporting::new(vec![], 0, 0);
        let sessions = Arc::new(SessionStore::new());
        sessions
            .set(Session::new(
                "tok-1",
                User {
                    id: "u-1".to_string(),
                    name: "Sari Dewi".to_string(),
                    email: "sari@example.com".to_string(),
                    role: Role::Customer,
                },
            ))
            .await;
        let dashboard = Dashboard::new(fake.clone(), sessions);

        let err = dashboard.load().await.unwrap_err();
        assert!(matches!(
            err,
            SyncError::Core(CoreError::ActorNotPermitted { .. })
        ));
        assert_eq!(fake.hits.load(Ordering::SeqCst), 0);

        let signed_out = Dashboard::new(fake.clone(), Arc::new(SessionStore::new()));
        let err = signed_out.load().await.unwrap_err();
        assert!(err.requires_login());
        assert_eq!(fake.hits.load(Ordering::SeqCst), 0);
    }
}
