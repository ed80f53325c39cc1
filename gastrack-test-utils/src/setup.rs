use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::error::TestError;

pub struct TestSetup {
    pub db: DatabaseConnection,
}

impl TestSetup {
    pub async fn new() -> Result<Self, TestError> {
        let db = Database::connect("sqlite::memory:").await?;

        // sqlx enables `PRAGMA foreign_keys = ON` by default on SQLite. Tests
        // intentionally create only a subset of tables, so leaving enforcement
        // on makes inserts fail with "no such table" for absent parent tables.
        db.execute_unprepared("PRAGMA foreign_keys = OFF;").await?;

        Ok(TestSetup { db })
    }

    pub async fn with_tables(&self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Re-enables SQLite foreign-key enforcement. Used once every referenced
    /// parent table exists (e.g. the full-schema setup) so tests that assert on
    /// constraint violations behave as they would against Postgres.
    pub async fn enable_foreign_keys(&self) -> Result<(), TestError> {
        self.db
            .execute_unprepared("PRAGMA foreign_keys = ON;")
            .await?;

        Ok(())
    }
}

/// Creates an in-memory SQLite database with tables for the listed entities.
///
/// Without arguments no tables are created, which is useful for asserting
/// that repositories surface database errors.
#[macro_export]
macro_rules! test_setup_with_tables {
    // Pattern 1: No entities provided
    () => {{
        TestSetup::new().await
    }};

    // Pattern 2: Entities provided
    ($($entity:expr),+ $(,)?) => {{
        async {
            let setup = TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                $(schema.create_table_from_entity($entity),)+
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}

/// Creates an in-memory SQLite database with every application table.
#[macro_export]
macro_rules! test_setup_with_all_tables {
    () => {{
        async {
            let setup = $crate::test_setup_with_tables!(
                entity::prelude::Address,
                entity::prelude::Subscriber,
                entity::prelude::EquipmentType,
                entity::prelude::Equipment,
                entity::prelude::EquipmentStatus,
                entity::prelude::Agreement,
                entity::prelude::InstalledEquipment,
                entity::prelude::Organization,
                entity::prelude::Verification,
            )?;
            // All parent tables now exist, so enforce foreign keys to match
            // production (Postgres) behaviour for constraint-violation tests.
            setup.enable_foreign_keys().await?;
            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}
