use async_trait::async_trait;
use service_core::error::AppError;
use std::sync::Arc;

/// The tables the admin dashboard reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountedTable {
    Departments,
    DocumentTypes,
    DocumentActions,
    Users,
}

impl CountedTable {
    pub fn table_name(self) -> &'static str {
        match self {
            CountedTable::Departments => "Department",
            CountedTable::DocumentTypes => "DocumentType",
            CountedTable::DocumentActions => "DocumentAction",
            CountedTable::Users => "User",
        }
    }
}

/// Row counts per table. Implemented by [`crate::services::Database`] and by
/// in-memory fakes in tests.
#[async_trait]
pub trait CountRepository: Send + Sync {
    async fn count(&self, table: CountedTable) -> Result<i64, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

pub struct CountService {
    repository: Arc<dyn CountRepository>,
}

impl CountService {
    pub fn new(repository: Arc<dyn CountRepository>) -> Self {
        Self { repository }
    }

    async fn count(&self, table: CountedTable) -> Result<u64, AppError> {
        let count = self.repository.count(table).await.map_err(|e| {
            tracing::error!(table = table.table_name(), error = %e, "Count query failed");
            e
        })?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    pub async fn department_count(&self) -> Result<u64, AppError> {
        self.count(CountedTable::Departments).await
    }

    pub async fn document_type_count(&self) -> Result<u64, AppError> {
        self.count(CountedTable::DocumentTypes).await
    }

    pub async fn document_action_count(&self) -> Result<u64, AppError> {
        self.count(CountedTable::DocumentActions).await
    }

    pub async fn user_count(&self) -> Result<u64, AppError> {
        self.count(CountedTable::Users).await
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
