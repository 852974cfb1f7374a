use crate::error::StoreError;
use crate::models::account::Account;
use sqlx::{SqliteConnection, SqlitePool};

/// Inserts a new account. A duplicate email surfaces as `StoreError::Constraint`
/// from the table's UNIQUE index.
pub async fn create_account(
    conn: &mut SqliteConnection,
    id: &str,
    full_name: &str,
    email: &str,
    password_hash: &str,
) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        INSERT INTO accounts (id, full_name, email, password_hash)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(full_name)
    .bind(email)
    .bind(password_hash)
    .execute(conn)
    .await?;

    Ok(())
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Account>, StoreError> {
    let account = sqlx::query_as::<_, Account>(
        r#"
        SELECT id, full_name, email, password_hash, created_at
        FROM accounts
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect;

    #[tokio::test]
    async fn duplicate_email_is_a_constraint_violation() {
        let pool = connect("sqlite::memory:", 1).await.unwrap();
        let mut conn = pool.acquire().await.unwrap();

        create_account(&mut conn, "a1", "Anna", "anna@example.com", "hash")
            .await
            .unwrap();
        let err = create_account(&mut conn, "a2", "Anna Again", "ANNA@example.com", "hash")
            .await
            .unwrap_err();
        assert!(err.is_constraint());
        drop(conn);

        let found = find_by_email(&pool, "anna@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, "a1");
        assert_eq!(found.full_name, "Anna");
        assert!(find_by_email(&pool, "bob@example.com").await.unwrap().is_none());
    }
}
