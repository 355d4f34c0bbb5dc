//! Unit of Work
//!
//! Transactional boundary for writes that span several tables. Statement
//! helpers take a `&mut PgConnection`, so the same helper serves a plain
//! pool connection or a `TransactionContext`.

use std::future::Future;

use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::shared::error::AppError;

/// Transaction context that wraps a SQLx transaction.
///
/// Dropping the context without calling `commit` rolls the transaction back.
pub struct TransactionContext {
    tx: Transaction<'static, Postgres>,
}

impl TransactionContext {
    /// Begin a new transaction on the pool.
    pub async fn begin(pool: &PgPool) -> Result<Self, AppError> {
        let tx = pool.begin().await.map_err(AppError::Database)?;
        Ok(Self { tx })
    }

    /// Connection to run statements on.
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut *self.tx
    }

    pub async fn commit(self) -> Result<(), AppError> {
        self.tx.commit().await.map_err(AppError::Database)
    }
}

/// Run `f` inside a transaction, committing when it succeeds.
///
/// `f` hands the context back with its result; an error drops the context
/// and every statement issued through it is rolled back.
///
/// ```ignore
/// let pet = with_transaction(&pool, |mut ctx| async move {
///     let pet = insert_pet(ctx.conn(), &pet).await?;
///     insert_owner(ctx.conn(), pet.id, owner_id).await?;
///     Ok((pet, ctx))
/// })
/// .await?;
/// ```
pub async fn with_transaction<F, Fut, T>(pool: &PgPool, f: F) -> Result<T, AppError>
where
    F: FnOnce(TransactionContext) -> Fut,
    Fut: Future<Output = Result<(T, TransactionContext), AppError>>,
{
    let ctx = TransactionContext::begin(pool).await?;

    let (result, ctx) = f(ctx).await?;
    ctx.commit().await?;

    Ok(result)
}
