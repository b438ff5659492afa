use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use uuid::Uuid;

use engine::{
    BusinessCode, Category, Engine, EngineError, EntryRole, Money, MovementBehavior, MovementCmd,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn engine_with_file_db() -> (Engine, DatabaseConnection, String, std::path::PathBuf) {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_dbs");
    std::fs::create_dir_all(&root).unwrap();

    let path = root.join(format!("engine_{}.db", Uuid::new_v4()));
    let url = format!("sqlite:{}?mode=rwc", path.display());

    let db = Database::connect(&url).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();

    (engine, db, url, path)
}

async fn seed_account(db: &DatabaseConnection, name: &str, category: Category) -> Uuid {
    seed_account_with_status(db, name, category, true).await
}

async fn seed_account_with_status(
    db: &DatabaseConnection,
    name: &str,
    category: Category,
    active: bool,
) -> Uuid {
    let id = Uuid::new_v4();
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO accounts (id, name, category, active) VALUES (?, ?, ?, ?)",
        vec![
            id.to_string().into(),
            name.into(),
            category.as_str().into(),
            active.into(),
        ],
    ))
    .await
    .unwrap();
    id
}

async fn count_rows(db: &DatabaseConnection, sql: &str) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(backend, sql.to_string()))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "n").unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entry_pair(
    entries: &[engine::LedgerEntry],
) -> (&engine::LedgerEntry, &engine::LedgerEntry) {
    assert_eq!(entries.len(), 2);
    let source = entries
        .iter()
        .find(|e| e.role == EntryRole::Source)
        .unwrap();
    let destination = entries
        .iter()
        .find(|e| e.role == EntryRole::Destination)
        .unwrap();
    (source, destination)
}

#[tokio::test]
async fn asset_to_asset_movement_is_a_transfer() {
    let (engine, db) = engine_with_db().await;
    let checking = seed_account(&db, "Checking", Category::Asset).await;
    let savings = seed_account(&db, "Savings", Category::Asset).await;

    let movement = engine
        .execute(MovementCmd::new(
            checking,
            savings,
            Money::new(100_00),
            date(2026, 3, 1),
        ))
        .await
        .unwrap();

    assert_eq!(movement.behavior, MovementBehavior::Transfer);
    assert_eq!(movement.amount, Money::new(100_00));
    assert_eq!(movement.movement_date, date(2026, 3, 1));
    assert!(movement.active);

    let entries = engine.find_movement_entries(movement.id).await.unwrap();
    let (source, destination) = entry_pair(&entries);
    assert_eq!(source.amount, Money::new(-100_00));
    assert_eq!(destination.amount, Money::new(100_00));
    assert_eq!(source.account_id, checking);
    assert_eq!(destination.account_id, savings);
    assert_eq!(source.entry_date, date(2026, 3, 1));
    assert_eq!(destination.entry_date, date(2026, 3, 1));
    assert_eq!(source.movement_id, movement.id);
    assert_eq!(destination.movement_id, movement.id);
    assert_eq!(movement.source_entry_id, source.id);
    assert_eq!(movement.destination_entry_id, destination.id);
}

#[tokio::test]
async fn asset_to_liability_movement_is_a_bill_payment() {
    let (engine, db) = engine_with_db().await;
    let checking = seed_account(&db, "Checking", Category::Asset).await;
    let credit_card = seed_account(&db, "CreditCard", Category::Liability).await;

    let movement = engine
        .execute(MovementCmd::new(
            checking,
            credit_card,
            Money::new(100_00),
            date(2026, 3, 1),
        ))
        .await
        .unwrap();

    assert_eq!(movement.behavior, MovementBehavior::BillPayment);

    let entries = engine.find_movement_entries(movement.id).await.unwrap();
    let (source, destination) = entry_pair(&entries);
    assert_eq!(source.amount, Money::new(-100_00));
    assert_eq!(destination.amount, Money::new(-100_00));
}

#[tokio::test]
async fn liability_to_asset_movement_is_a_cash_advance() {
    let (engine, db) = engine_with_db().await;
    let credit_card = seed_account(&db, "CreditCard", Category::Liability).await;
    let checking = seed_account(&db, "Checking", Category::Asset).await;

    let movement = engine
        .execute(MovementCmd::new(
            credit_card,
            checking,
            Money::new(50_00),
            date(2026, 3, 1),
        ))
        .await
        .unwrap();

    assert_eq!(movement.behavior, MovementBehavior::CashAdvance);

    let entries = engine.find_movement_entries(movement.id).await.unwrap();
    let (source, destination) = entry_pair(&entries);
    assert_eq!(source.amount, Money::new(50_00));
    assert_eq!(destination.amount, Money::new(50_00));
}

#[tokio::test]
async fn liability_to_liability_movement_is_a_balance_transfer() {
    let (engine, db) = engine_with_db().await;
    let card_a = seed_account(&db, "CardA", Category::Liability).await;
    let card_b = seed_account(&db, "CardB", Category::Liability).await;

    let movement = engine
        .execute(MovementCmd::new(
            card_a,
            card_b,
            Money::new(25_00),
            date(2026, 3, 1),
        ))
        .await
        .unwrap();

    assert_eq!(movement.behavior, MovementBehavior::BalanceTransfer);

    let entries = engine.find_movement_entries(movement.id).await.unwrap();
    let (source, destination) = entry_pair(&entries);
    assert_eq!(source.amount, Money::new(25_00));
    assert_eq!(destination.amount, Money::new(-25_00));
}

#[tokio::test]
async fn identical_resubmission_is_a_duplicate_conflict() {
    let (engine, db) = engine_with_db().await;
    let checking = seed_account(&db, "Checking", Category::Asset).await;
    let savings = seed_account(&db, "Savings", Category::Asset).await;

    let cmd = MovementCmd::new(checking, savings, Money::new(100_00), date(2026, 3, 1));
    engine.execute(cmd.clone()).await.unwrap();

    let err = engine.execute(cmd).await.unwrap_err();
    match err {
        EngineError::Business { code, .. } => assert_eq!(code, BusinessCode::DuplicateMovement),
        other => panic!("expected a business conflict, got {other:?}"),
    }

    // Only the first submission produced rows.
    assert_eq!(count_rows(&db, "SELECT COUNT(*) AS n FROM movements").await, 1);
    assert_eq!(count_rows(&db, "SELECT COUNT(*) AS n FROM entries").await, 2);
}

#[tokio::test]
async fn same_tuple_with_different_date_or_amount_is_not_a_duplicate() {
    let (engine, db) = engine_with_db().await;
    let checking = seed_account(&db, "Checking", Category::Asset).await;
    let savings = seed_account(&db, "Savings", Category::Asset).await;

    engine
        .execute(MovementCmd::new(
            checking,
            savings,
            Money::new(100_00),
            date(2026, 3, 1),
        ))
        .await
        .unwrap();
    engine
        .execute(MovementCmd::new(
            checking,
            savings,
            Money::new(100_00),
            date(2026, 3, 2),
        ))
        .await
        .unwrap();
    engine
        .execute(MovementCmd::new(
            checking,
            savings,
            Money::new(100_01),
            date(2026, 3, 1),
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn missing_account_names_the_failing_side() {
    let (engine, db) = engine_with_db().await;
    let savings = seed_account(&db, "Savings", Category::Asset).await;
    let ghost = Uuid::new_v4();

    let err = engine
        .execute(MovementCmd::new(
            ghost,
            savings,
            Money::new(10_00),
            date(2026, 3, 1),
        ))
        .await
        .unwrap_err();
    match err {
        EngineError::NotFound(message) => {
            assert!(message.contains("source"), "message was: {message}");
        }
        other => panic!("expected not found, got {other:?}"),
    }

    let err = engine
        .execute(MovementCmd::new(
            savings,
            ghost,
            Money::new(10_00),
            date(2026, 3, 1),
        ))
        .await
        .unwrap_err();
    match err {
        EngineError::NotFound(message) => {
            assert!(message.contains("destination"), "message was: {message}");
        }
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn inactive_account_is_not_a_valid_endpoint() {
    let (engine, db) = engine_with_db().await;
    let checking = seed_account(&db, "Checking", Category::Asset).await;
    let closed = seed_account_with_status(&db, "Closed", Category::Asset, false).await;

    let err = engine
        .execute(MovementCmd::new(
            checking,
            closed,
            Money::new(10_00),
            date(2026, 3, 1),
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn same_account_movement_is_rejected_before_storage() {
    let (engine, db) = engine_with_db().await;
    let checking = seed_account(&db, "Checking", Category::Asset).await;

    let err = engine
        .execute(MovementCmd::new(
            checking,
            checking,
            Money::new(10_00),
            date(2026, 3, 1),
        ))
        .await
        .unwrap_err();
    match err {
        EngineError::Validation(fields) => {
            assert!(fields.get("destination_account_id").is_some());
        }
        other => panic!("expected a validation error, got {other:?}"),
    }

    assert_eq!(count_rows(&db, "SELECT COUNT(*) AS n FROM movements").await, 0);
    assert_eq!(count_rows(&db, "SELECT COUNT(*) AS n FROM entries").await, 0);
}

#[tokio::test]
async fn non_positive_amount_is_rejected_before_storage() {
    let (engine, db) = engine_with_db().await;
    let checking = seed_account(&db, "Checking", Category::Asset).await;
    let savings = seed_account(&db, "Savings", Category::Asset).await;

    for cents in [0, -10_00] {
        let err = engine
            .execute(MovementCmd::new(
                checking,
                savings,
                Money::new(cents),
                date(2026, 3, 1),
            ))
            .await
            .unwrap_err();
        match err {
            EngineError::Validation(fields) => assert!(fields.get("amount").is_some()),
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    assert_eq!(count_rows(&db, "SELECT COUNT(*) AS n FROM movements").await, 0);
}

#[tokio::test]
async fn delete_deactivates_the_movement_and_both_entries_together() {
    let (engine, db) = engine_with_db().await;
    let checking = seed_account(&db, "Checking", Category::Asset).await;
    let savings = seed_account(&db, "Savings", Category::Asset).await;

    let movement = engine
        .execute(MovementCmd::new(
            checking,
            savings,
            Money::new(100_00),
            date(2026, 3, 1),
        ))
        .await
        .unwrap();

    engine.delete_movement(movement.id).await.unwrap();

    let err = engine.find_movement(movement.id).await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)), "got {err:?}");
    let err = engine.find_movement_entries(movement.id).await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)), "got {err:?}");

    // Soft delete: the rows survive, flipped inactive in the same
    // transaction.
    assert_eq!(count_rows(&db, "SELECT COUNT(*) AS n FROM movements").await, 1);
    assert_eq!(
        count_rows(&db, "SELECT COUNT(*) AS n FROM movements WHERE active = 1").await,
        0
    );
    assert_eq!(count_rows(&db, "SELECT COUNT(*) AS n FROM entries").await, 2);
    assert_eq!(
        count_rows(&db, "SELECT COUNT(*) AS n FROM entries WHERE active = 1").await,
        0
    );
}

#[tokio::test]
async fn delete_of_missing_or_deleted_movement_is_not_found() {
    let (engine, db) = engine_with_db().await;
    let checking = seed_account(&db, "Checking", Category::Asset).await;
    let savings = seed_account(&db, "Savings", Category::Asset).await;

    let err = engine.delete_movement(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)), "got {err:?}");

    let movement = engine
        .execute(MovementCmd::new(
            checking,
            savings,
            Money::new(100_00),
            date(2026, 3, 1),
        ))
        .await
        .unwrap();
    engine.delete_movement(movement.id).await.unwrap();

    let err = engine.delete_movement(movement.id).await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn deleting_a_movement_frees_its_tuple_for_resubmission() {
    let (engine, db) = engine_with_db().await;
    let checking = seed_account(&db, "Checking", Category::Asset).await;
    let savings = seed_account(&db, "Savings", Category::Asset).await;

    let cmd = MovementCmd::new(checking, savings, Money::new(100_00), date(2026, 3, 1));
    let movement = engine.execute(cmd.clone()).await.unwrap();
    engine.delete_movement(movement.id).await.unwrap();

    // The duplicate guard only covers active movements.
    engine.execute(cmd).await.unwrap();
}

#[tokio::test]
async fn movement_created_inactive_is_invisible_to_reads() {
    let (engine, db) = engine_with_db().await;
    let checking = seed_account(&db, "Checking", Category::Asset).await;
    let savings = seed_account(&db, "Savings", Category::Asset).await;

    let cmd = MovementCmd::new(checking, savings, Money::new(100_00), date(2026, 3, 1));
    let movement = engine.execute(cmd.active(false)).await.unwrap();
    assert!(!movement.active);

    let err = engine.find_movement(movement.id).await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)), "got {err:?}");

    // The rows exist; they are just outside the active ledger (and outside
    // the duplicate guard, which covers active movements only).
    assert_eq!(count_rows(&db, "SELECT COUNT(*) AS n FROM movements").await, 1);
    assert_eq!(
        count_rows(&db, "SELECT COUNT(*) AS n FROM entries WHERE active = 1").await,
        0
    );
}

#[tokio::test]
async fn persistence_failure_leaves_no_partial_movement() {
    let (engine, db) = engine_with_db().await;
    let checking = seed_account(&db, "Checking", Category::Asset).await;
    let savings = seed_account(&db, "Savings", Category::Asset).await;

    // Force the entry insert to fail mid-transaction.
    db.execute_unprepared("DROP TABLE entries").await.unwrap();

    let err = engine
        .execute(MovementCmd::new(
            checking,
            savings,
            Money::new(100_00),
            date(2026, 3, 1),
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::System(_)), "got {err:?}");

    // The movement row written before the failure was rolled back.
    assert_eq!(count_rows(&db, "SELECT COUNT(*) AS n FROM movements").await, 0);
}

#[tokio::test]
async fn restart_engine_reads_same_state() {
    let (engine, db, url, path) = engine_with_file_db().await;
    let checking = seed_account(&db, "Checking", Category::Asset).await;
    let savings = seed_account(&db, "Savings", Category::Asset).await;

    let movement = engine
        .execute(MovementCmd::new(
            checking,
            savings,
            Money::new(100_00),
            date(2026, 3, 1),
        ))
        .await
        .unwrap();

    drop(engine);
    drop(db);

    let db2 = Database::connect(&url).await.unwrap();
    let engine2 = Engine::builder()
        .database(db2.clone())
        .build()
        .await
        .unwrap();

    let found = engine2.find_movement(movement.id).await.unwrap();
    assert_eq!(found, movement);
    assert_eq!(found.movement_date, date(2026, 3, 1));

    drop(db2);
    let _ = std::fs::remove_file(path);
}
