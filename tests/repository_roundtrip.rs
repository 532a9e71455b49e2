//! SQLite repository round-trips against an in-memory database.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm_migration::MigratorTrait;

use komunalka::domain::{NewAddress, NewBill, RepositoryProvider, TariffTable};
use komunalka::infrastructure::database::migrator::Migrator;
use komunalka::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

async fn provider() -> SeaOrmRepositoryProvider {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
    };
    let db = init_database(&config).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    SeaOrmRepositoryProvider::new(db)
}

async fn seed_address(repos: &SeaOrmRepositoryProvider) -> (i32, i32) {
    let user = repos.users().get_or_create(42, "Olena").await.unwrap();
    let address = repos
        .addresses()
        .create(NewAddress {
            user_id: user.id,
            city: "Kyiv".to_string(),
            street: "Khreshchatyk".to_string(),
            house: "12".to_string(),
            entrance: None,
            floor: None,
            apartment: Some("7".to_string()),
        })
        .await
        .unwrap();
    (user.id, address.id)
}

#[tokio::test]
async fn user_registration_is_idempotent() {
    let repos = provider().await;
    let first = repos.users().get_or_create(42, "Olena").await.unwrap();
    let second = repos.users().get_or_create(42, "Olena").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn address_optional_fields_survive_storage() {
    let repos = provider().await;
    let (user_id, address_id) = seed_address(&repos).await;

    let stored = repos
        .addresses()
        .find_by_id(address_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.user_id, user_id);
    assert_eq!(stored.entrance, None);
    assert_eq!(stored.floor, None);
    assert_eq!(stored.apartment.as_deref(), Some("7"));
    assert_eq!(stored.summary(), "Kyiv, Khreshchatyk, 12, apt. 7");
}

#[tokio::test]
async fn every_breakdown_variant_round_trips() {
    let repos = provider().await;
    let (user_id, address_id) = seed_address(&repos).await;
    let tariffs = TariffTable::default();

    let breakdowns = vec![
        tariffs.single_zone(dec("150"), dec("100")).unwrap(),
        tariffs
            .two_zone(dec("250"), dec("200"), dec("130"), dec("100"))
            .unwrap(),
        tariffs
            .three_zone(
                dec("110"),
                dec("100"),
                dec("220"),
                dec("200"),
                dec("330"),
                dec("300"),
            )
            .unwrap(),
        tariffs.gas_bill(dec("520.5"), dec("500.25")).unwrap(),
        tariffs.trash_bill(4, 2).unwrap(),
    ];

    for breakdown in breakdowns {
        let created = repos
            .bills()
            .create(NewBill {
                user_id,
                address_id,
                created_at: Utc::now(),
                breakdown: breakdown.clone(),
            })
            .await
            .unwrap();
        assert_eq!(created.breakdown, breakdown);

        let fetched = repos
            .bills()
            .find_by_id(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.breakdown, breakdown);
        assert_eq!(fetched.address_id, address_id);
    }
}

#[tokio::test]
async fn history_is_newest_first() {
    let repos = provider().await;
    let (user_id, address_id) = seed_address(&repos).await;
    let tariffs = TariffTable::default();

    for days_ago in [30, 5, 15] {
        repos
            .bills()
            .create(NewBill {
                user_id,
                address_id,
                created_at: Utc::now() - Duration::days(days_ago),
                breakdown: tariffs.trash_bill(1, 1).unwrap(),
            })
            .await
            .unwrap();
    }

    let rows = repos.bills().list_for_address(address_id).await.unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    assert!(rows.iter().all(|r| r.service == "Trash"));
}

#[tokio::test]
async fn purge_removes_only_expired_bills() {
    let repos = provider().await;
    let (user_id, address_id) = seed_address(&repos).await;
    let tariffs = TariffTable::default();

    let old = repos
        .bills()
        .create(NewBill {
            user_id,
            address_id,
            created_at: Utc::now() - Duration::days(3 * 365),
            breakdown: tariffs.gas_bill(dec("520"), dec("500")).unwrap(),
        })
        .await
        .unwrap();
    let recent = repos
        .bills()
        .create(NewBill {
            user_id,
            address_id,
            created_at: Utc::now(),
            breakdown: tariffs.gas_bill(dec("540"), dec("520")).unwrap(),
        })
        .await
        .unwrap();

    let removed = repos
        .bills()
        .purge_older_than(Utc::now() - Duration::days(730))
        .await
        .unwrap();

    assert_eq!(removed, 1);
    assert!(repos.bills().find_by_id(old.id).await.unwrap().is_none());
    assert!(repos.bills().find_by_id(recent.id).await.unwrap().is_some());
}
