use sqlx::PgPool;
use vagas_core::candidatura::ALL_STATUSES;
use vagas_core::roles::Role;
use vagas_db::models::status::VagaStatus;

/// Connect, migrate and check the seeded lookup tables.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    vagas_db::health_check(&pool).await.unwrap();

    for (table, expected) in [("roles", 3_i64), ("vaga_statuses", 3), ("candidatura_statuses", 6)] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, expected, "{table} seed rows");
    }
}

/// Enum discriminants must agree with the seeded ids.
#[sqlx::test(migrations = "./migrations")]
async fn test_lookup_ids_match_enums(pool: PgPool) {
    for status in ALL_STATUSES {
        let (code,): (String,) =
            sqlx::query_as("SELECT code FROM candidatura_statuses WHERE id = $1")
                .bind(status.id())
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(code, status.code());
    }

    for status in [VagaStatus::Aberta, VagaStatus::Pausada, VagaStatus::Encerrada] {
        let (name,): (String,) = sqlx::query_as("SELECT name FROM vaga_statuses WHERE id = $1")
            .bind(status.id())
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(name, status.name());
    }

    for role in [Role::Candidato, Role::Recrutador, Role::Admin] {
        let found = vagas_db::repositories::RoleRepo::find_by_id(&pool, role.id())
            .await
            .unwrap()
            .expect("seeded role");
        assert_eq!(found.name, role.as_str());
    }
}

/// Every unique constraint is named `uq_*` so the API can map it to 409.
#[sqlx::test(migrations = "./migrations")]
async fn test_unique_constraints_are_prefixed(pool: PgPool) {
    let names: Vec<(String,)> = sqlx::query_as(
        "SELECT conname::TEXT FROM pg_constraint
         WHERE contype = 'u' AND connamespace = 'public'::regnamespace",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!names.is_empty());
    for (name,) in names {
        assert!(name.starts_with("uq_"), "unique constraint {name} should start with uq_");
    }
}
