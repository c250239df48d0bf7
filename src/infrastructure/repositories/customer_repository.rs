//! Customer Repository Implementation
//!
//! PostgreSQL implementation of the CustomerRepository trait.
//! Maps between the database schema and domain Customer entity.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Customer, CustomerRepository};
use crate::infrastructure::database::TransactionContext;
use crate::shared::error::AppError;

/// Database row representation matching the customer table schema.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    customer_id: i64,
    name: String,
    email: String,
    mobile_number: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl CustomerRow {
    /// Convert database row to domain Customer entity.
    fn into_customer(self) -> Customer {
        Customer {
            customer_id: Some(self.customer_id),
            name: self.name,
            email: self.email,
            mobile_number: self.mobile_number,
            created_at: Some(self.created_at),
            updated_at: self.updated_at,
        }
    }
}

fn map_write_error(e: sqlx::Error, mobile_number: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::Conflict(
            format!("Customer with mobile number {} already exists", mobile_number),
        ),
        _ => AppError::Database(e),
    }
}

#[async_trait]
impl CustomerRepository for TransactionContext {
    async fn find_by_mobile_number(
        &mut self,
        mobile_number: &str,
    ) -> Result<Option<Customer>, AppError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT customer_id, name, email, mobile_number, created_at, updated_at
            FROM customer
            WHERE mobile_number = $1
            "#,
        )
        .bind(mobile_number)
        .fetch_optional(&mut **self.as_mut())
        .await?;

        Ok(row.map(|r| r.into_customer()))
    }

    async fn find_by_id(&mut self, customer_id: i64) -> Result<Option<Customer>, AppError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT customer_id, name, email, mobile_number, created_at, updated_at
            FROM customer
            WHERE customer_id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&mut **self.as_mut())
        .await?;

        Ok(row.map(|r| r.into_customer()))
    }

    async fn save(&mut self, customer: Customer) -> Result<Customer, AppError> {
        let row = match customer.customer_id {
            None => sqlx::query_as::<_, CustomerRow>(
                r#"
                INSERT INTO customer (name, email, mobile_number)
                VALUES ($1, $2, $3)
                RETURNING customer_id, name, email, mobile_number, created_at, updated_at
                "#,
            )
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.mobile_number)
            .fetch_one(&mut **self.as_mut())
            .await
            .map_err(|e| map_write_error(e, &customer.mobile_number))?,

            Some(id) => sqlx::query_as::<_, CustomerRow>(
                r#"
                UPDATE customer
                SET name = $2,
                    email = $3,
                    mobile_number = $4,
                    updated_at = NOW()
                WHERE customer_id = $1
                RETURNING customer_id, name, email, mobile_number, created_at, updated_at
                "#,
            )
            .bind(id)
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.mobile_number)
            .fetch_optional(&mut **self.as_mut())
            .await
            .map_err(|e| map_write_error(e, &customer.mobile_number))?
            .ok_or_else(|| AppError::NotFound(format!("Customer with id {} not found", id)))?,
        };

        Ok(row.into_customer())
    }

    async fn delete_by_id(&mut self, customer_id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM customer WHERE customer_id = $1")
            .bind(customer_id)
            .execute(&mut **self.as_mut())
            .await?;

        Ok(())
    }
}
