//! Macro-generated test suite for CRM store contract validation.
//!
//! The `store_contract_tests!` macro generates a test module that validates
//! any store implementing `CustomerService + ProductService + OrderService`
//! against the full contract: lookups, default orderings, email uniqueness,
//! cascade deletes, atomic order creation, restock increments and total
//! recomputation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use crm::storage::InMemoryStore;
//!
//! store_contract_tests!(InMemoryStore::new());
//! ```

/// Generate a full CRM store conformance test suite.
///
/// `$factory` must be an expression that evaluates to a fresh, empty store.
/// It is re-evaluated for each test to ensure isolation. For the concurrency
/// tests the store must also implement `Clone + 'static` (shared state).
#[macro_export]
macro_rules! store_contract_tests {
    ($factory:expr) => {
        mod store_contract_tests {
            use super::*;
            use crm::core::error::EntityError;
            use crm::core::service::{CustomerService, OrderService, ProductService};
            use uuid::Uuid;

            fn entity_error(err: &anyhow::Error) -> Option<&EntityError> {
                err.downcast_ref::<EntityError>()
            }

            // ==================================================================
            // Customers
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get_customer() {
                let store = $factory;
                let mut alice = customer("Alice");
                alice.phone = Some("+1234567890".to_string());

                let created = store.create_customer(alice.clone()).await.unwrap();
                assert_eq!(created.id, alice.id);

                let fetched = store.get_customer(&alice.id).await.unwrap().unwrap();
                assert_eq!(fetched.name, "Alice");
                assert_eq!(fetched.email, "alice@example.com");
                assert_eq!(fetched.phone.as_deref(), Some("+1234567890"));

                assert!(store.get_customer(&Uuid::new_v4()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_duplicate_email_is_rejected() {
                let store = $factory;
                store.create_customer(customer("Alice")).await.unwrap();

                let err = store.create_customer(customer("Alice")).await.unwrap_err();

                assert!(matches!(
                    entity_error(&err),
                    Some(EntityError::Conflict { field, .. }) if field == "email"
                ));
                assert_count(&store.list_customers().await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_find_customer_by_email() {
                let store = $factory;
                let bob = store.create_customer(customer("Bob")).await.unwrap();

                let found = store
                    .find_customer_by_email("bob@example.com")
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(found.id, bob.id);

                assert!(
                    store
                        .find_customer_by_email("nobody@example.com")
                        .await
                        .unwrap()
                        .is_none()
                );
            }

            #[tokio::test]
            async fn test_customers_list_newest_first() {
                let store = $factory;
                for (name, minutes_ago) in [("Old", 30), ("Newest", 1), ("Middle", 10)] {
                    store
                        .create_customer(customer_created_ago(name, minutes_ago))
                        .await
                        .unwrap();
                }

                let listed: Vec<String> = store
                    .list_customers()
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|c| c.name)
                    .collect();
                assert_eq!(listed, vec!["Newest", "Middle", "Old"]);
            }

            #[tokio::test]
            async fn test_delete_customer_cascades_to_orders() {
                let store = $factory;
                let carol = store.create_customer(customer("Carol")).await.unwrap();
                let dave = store.create_customer(customer("Dave")).await.unwrap();
                let lamp = store.create_product(product("Lamp", "20.00", 5)).await.unwrap();

                let doomed = store
                    .create_order(order_for(carol.id), &[lamp.id])
                    .await
                    .unwrap();
                let kept = store
                    .create_order(order_for(dave.id), &[lamp.id])
                    .await
                    .unwrap();

                store.delete_customer(&carol.id).await.unwrap();

                assert!(store.get_customer(&carol.id).await.unwrap().is_none());
                assert!(store.get_order(&doomed.id).await.unwrap().is_none());
                assert!(store.get_order(&kept.id).await.unwrap().is_some());
                assert!(store.get_product(&lamp.id).await.unwrap().is_some());
            }

            // ==================================================================
            // Products
            // ==================================================================

            #[tokio::test]
            async fn test_products_list_alphabetical() {
                let store = $factory;
                for name in ["Mouse", "Keyboard", "Laptop"] {
                    store.create_product(product(name, "10.00", 1)).await.unwrap();
                }

                let products = store.list_products().await.unwrap();
                assert_eq!(names(&products), vec!["Keyboard", "Laptop", "Mouse"]);
            }

            #[tokio::test]
            async fn test_update_product() {
                let store = $factory;
                let mut pen = store.create_product(product("Pen", "1.50", 3)).await.unwrap();

                pen.price = price("2.25");
                pen.stock = 7;
                let updated = store.update_product(pen.clone()).await.unwrap();

                assert_eq!(updated.price, price("2.25"));
                assert_eq!(updated.stock, 7);
                assert_eq!(store.get_product(&pen.id).await.unwrap().unwrap().stock, 7);
            }

            #[tokio::test]
            async fn test_update_missing_product_is_not_found() {
                let store = $factory;
                let ghost = product("Ghost", "1.00", 0);

                let err = store.update_product(ghost.clone()).await.unwrap_err();

                assert_eq!(
                    entity_error(&err),
                    Some(&EntityError::not_found("Product", ghost.id))
                );
            }

            #[tokio::test]
            async fn test_list_products_below_stock_is_strict() {
                let store = $factory;
                for (name, stock) in [("A", 9), ("B", 10), ("C", 0), ("D", 11)] {
                    store.create_product(product(name, "1.00", stock)).await.unwrap();
                }

                let low = store.list_products_below_stock(10).await.unwrap();
                assert_eq!(names(&low), vec!["A", "C"]);
            }

            #[tokio::test]
            async fn test_increment_stock_reports_previous_stock() {
                let store = $factory;
                let pen = store.create_product(product("Pen", "1.50", 3)).await.unwrap();

                let restocked = store.increment_stock(&pen.id, 10).await.unwrap().unwrap();

                assert_eq!(restocked.previous_stock, 3);
                assert_eq!(restocked.product.stock, 13);
                assert_eq!(store.get_product(&pen.id).await.unwrap().unwrap().stock, 13);

                assert!(
                    store
                        .increment_stock(&Uuid::new_v4(), 10)
                        .await
                        .unwrap()
                        .is_none()
                );
            }

            #[tokio::test]
            async fn test_concurrent_increments_are_not_lost() {
                let store = $factory;
                let pen = store.create_product(product("Pen", "1.50", 0)).await.unwrap();

                let handles: Vec<_> = (0..4)
                    .map(|_| {
                        let store = store.clone();
                        let id = pen.id;
                        tokio::spawn(async move { store.increment_stock(&id, 10).await })
                    })
                    .collect();

                for handle in handles {
                    tokio::time::timeout(std::time::Duration::from_secs(30), handle)
                        .await
                        .expect("Concurrent increments timed out after 30s")
                        .unwrap()
                        .unwrap();
                }

                assert_eq!(store.get_product(&pen.id).await.unwrap().unwrap().stock, 40);
            }

            // ==================================================================
            // Orders
            // ==================================================================

            #[tokio::test]
            async fn test_create_order_computes_total() {
                let store = $factory;
                let alice = store.create_customer(customer("Alice")).await.unwrap();
                let laptop = store
                    .create_product(product("Laptop", "999.99", 5))
                    .await
                    .unwrap();
                let mouse = store.create_product(product("Mouse", "25.50", 5)).await.unwrap();

                let order = store
                    .create_order(order_for(alice.id), &[mouse.id, laptop.id])
                    .await
                    .unwrap();

                assert_eq!(order.customer_id, alice.id);
                assert_eq!(order.total_amount, price("1025.49"));

                let stored = store.get_order(&order.id).await.unwrap().unwrap();
                assert_eq!(stored.total_amount, price("1025.49"));

                let products = store.order_products(&order.id).await.unwrap();
                assert_eq!(names(&products), vec!["Laptop", "Mouse"]);
            }

            #[tokio::test]
            async fn test_create_order_collapses_duplicate_products() {
                let store = $factory;
                let alice = store.create_customer(customer("Alice")).await.unwrap();
                let mouse = store.create_product(product("Mouse", "25.50", 5)).await.unwrap();

                let order = store
                    .create_order(order_for(alice.id), &[mouse.id, mouse.id, mouse.id])
                    .await
                    .unwrap();

                assert_eq!(order.total_amount, price("25.50"));
                assert_count(&store.order_products(&order.id).await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_create_order_for_missing_customer_writes_nothing() {
                let store = $factory;
                let mouse = store.create_product(product("Mouse", "25.50", 5)).await.unwrap();
                let ghost = Uuid::new_v4();

                let err = store
                    .create_order(order_for(ghost), &[mouse.id])
                    .await
                    .unwrap_err();

                assert_eq!(
                    entity_error(&err),
                    Some(&EntityError::not_found("Customer", ghost))
                );
                assert!(store.list_orders().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_create_order_with_missing_product_writes_nothing() {
                let store = $factory;
                let alice = store.create_customer(customer("Alice")).await.unwrap();
                let mouse = store.create_product(product("Mouse", "25.50", 5)).await.unwrap();
                let missing = Uuid::new_v4();

                let err = store
                    .create_order(order_for(alice.id), &[mouse.id, missing])
                    .await
                    .unwrap_err();

                assert_eq!(
                    entity_error(&err),
                    Some(&EntityError::not_found("Product", missing))
                );
                assert!(store.list_orders().await.unwrap().is_empty());
                assert!(
                    store
                        .list_orders_for_customer(&alice.id)
                        .await
                        .unwrap()
                        .is_empty()
                );
            }

            #[tokio::test]
            async fn test_orders_list_newest_first_and_filter_by_date() {
                let store = $factory;
                let alice = store.create_customer(customer("Alice")).await.unwrap();
                let bob = store.create_customer(customer("Bob")).await.unwrap();
                let pen = store.create_product(product("Pen", "1.00", 5)).await.unwrap();

                let old = store
                    .create_order(order_dated(alice.id, days_ago(30)), &[pen.id])
                    .await
                    .unwrap();
                let recent = store
                    .create_order(order_dated(alice.id, days_ago(2)), &[pen.id])
                    .await
                    .unwrap();
                let newest = store
                    .create_order(order_dated(bob.id, days_ago(1)), &[pen.id])
                    .await
                    .unwrap();

                let all: Vec<Uuid> = store
                    .list_orders()
                    .await
                    .unwrap()
                    .iter()
                    .map(|o| o.id)
                    .collect();
                assert_eq!(all, vec![newest.id, recent.id, old.id]);

                let since: Vec<Uuid> = store
                    .list_orders_since(days_ago(7))
                    .await
                    .unwrap()
                    .iter()
                    .map(|o| o.id)
                    .collect();
                assert_eq!(since, vec![newest.id, recent.id]);

                let alices: Vec<Uuid> = store
                    .list_orders_for_customer(&alice.id)
                    .await
                    .unwrap()
                    .iter()
                    .map(|o| o.id)
                    .collect();
                assert_eq!(alices, vec![recent.id, old.id]);
            }

            #[tokio::test]
            async fn test_recompute_order_total_uses_current_prices() {
                let store = $factory;
                let alice = store.create_customer(customer("Alice")).await.unwrap();
                let mut lamp = store.create_product(product("Lamp", "20.00", 5)).await.unwrap();
                let bulb = store.create_product(product("Bulb", "3.00", 5)).await.unwrap();

                let order = store
                    .create_order(order_for(alice.id), &[lamp.id, bulb.id])
                    .await
                    .unwrap();
                assert_eq!(order.total_amount, price("23.00"));

                lamp.price = price("25.00");
                store.update_product(lamp).await.unwrap();

                let stale = store.get_order(&order.id).await.unwrap().unwrap();
                assert_eq!(stale.total_amount, price("23.00"));

                let fresh = store
                    .recompute_order_total(&order.id)
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(fresh.total_amount, price("28.00"));

                assert!(
                    store
                        .recompute_order_total(&Uuid::new_v4())
                        .await
                        .unwrap()
                        .is_none()
                );
            }

            #[tokio::test]
            async fn test_concurrent_orders_for_one_customer() {
                let store = $factory;
                let alice = store.create_customer(customer("Alice")).await.unwrap();
                let pen = store.create_product(product("Pen", "1.00", 5)).await.unwrap();

                let s1 = store.clone();
                let s2 = store.clone();
                let (alice_id, pen_id) = (alice.id, pen.id);

                let h1 = tokio::spawn(async move { s1.create_order(order_for(alice_id), &[pen_id]).await });
                let h2 = tokio::spawn(async move { s2.create_order(order_for(alice_id), &[pen_id]).await });

                let (r1, r2) = tokio::time::timeout(std::time::Duration::from_secs(30), async {
                    tokio::try_join!(h1, h2).unwrap()
                })
                .await
                .expect("Concurrent orders timed out after 30s: possible deadlock");

                r1.unwrap();
                r2.unwrap();
                assert_count(&store.list_orders_for_customer(&alice.id).await.unwrap(), 2);
            }
        }
    };
}
