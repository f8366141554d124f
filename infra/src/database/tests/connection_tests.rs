//! Unit tests for database connection pool

use crate::config::DatabaseConfig;
use crate::database::connection::{DatabasePool, PoolStatistics};
use crate::InfrastructureError;

#[tokio::test]
async fn test_pool_creation_with_unparseable_url() {
    let config = DatabaseConfig::new("not a database url");

    let result = DatabasePool::new(&config).await;

    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[tokio::test]
#[ignore] // Requires actual database
async fn test_pool_health_check() {
    let pool = DatabasePool::new(&super::mysql_tests::test_config())
        .await
        .unwrap();

    assert!(pool.health_check().await.unwrap());
    pool.close().await;
}

#[test]
fn test_pool_statistics_display() {
    let stats = PoolStatistics {
        connections: 5,
        idle_connections: 3,
        max_connections: 10,
    };

    let display = format!("{}", stats);
    assert!(display.contains("5/10"));
    assert!(display.contains("3 idle"));
}
