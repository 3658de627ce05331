use sqlx::{MySql, MySqlPool, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

use bazaar_app::{
    repository::PlayerRepository,
    uow::{UnitOfWork, UnitOfWorkProvider},
};
use bazaar_types::errors::{ApplicationError, DbError};

use crate::repository::MysqlPlayerRepository;

#[derive(Debug, Clone)]
pub struct MysqlUnitOfWorkProvider {
    pool: MySqlPool,
}

impl MysqlUnitOfWorkProvider {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UnitOfWorkProvider for MysqlUnitOfWorkProvider {
    async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        // Transaction must be 'static to be stored in Arc.
        let tx_arc = Arc::new(Mutex::new(tx));

        Ok(Box::new(MysqlUnitOfWork { tx: tx_arc }))
    }
}

#[derive(Debug, Clone)]
pub struct MysqlUnitOfWork<'a> {
    tx: Arc<Mutex<Transaction<'a, MySql>>>,
}

#[async_trait::async_trait]
impl<'a> UnitOfWork<'a> for MysqlUnitOfWork<'a> {
    fn players(&self) -> Arc<dyn PlayerRepository + 'a> {
        Arc::new(MysqlPlayerRepository::new(self.tx.clone()))
    }

    async fn commit(self: Box<Self>) -> Result<(), ApplicationError> {
        // Try to unwrap the Arc to get ownership of the Mutex<Transaction>.
        // If this fails, it means there are other references to the Arc,
        // the transaction cannot be committed (logical error) and will rollback on Drop.
        if let Ok(mutex) = Arc::try_unwrap(self.tx) {
            mutex
                .into_inner()
                .commit()
                .await
                .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;
        } else {
            return Err(ApplicationError::Db(DbError::Transaction(
                "transaction still has multiple owners".to_string(),
            )));
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), ApplicationError> {
        if let Ok(mutex) = Arc::try_unwrap(self.tx) {
            mutex
                .into_inner()
                .rollback()
                .await
                .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;
        }
        Ok(())
    }
}
