// ==========================================
// 商城后台批量导入 - 目录 Repository 实现
// ==========================================
// 职责: 实现目录批量写入（使用 rusqlite）
// 红线: Repository 不含业务规则，只做数据写入
// ==========================================

use crate::db::{configure_sqlite_connection, init_schema, open_sqlite_connection};
use crate::domain::{DomainType, GameRecord, NormalizedRecord, ProductRecord, ServiceRecord};
use crate::repository::catalog_repo::CatalogRepository;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, Transaction};
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument};
use uuid::Uuid;

// ==========================================
// CatalogRepositoryImpl
// ==========================================
pub struct CatalogRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl CatalogRepositoryImpl {
    /// 创建新的 Repository 实例（自动建表）
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建（对传入连接再次应用统一 PRAGMA，幂等）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
        }
        Ok(Self { conn })
    }

    /// 统计指定目录表的记录数
    pub fn count_records(&self, table: DomainType) -> RepositoryResult<usize> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        let sql = format!("SELECT COUNT(*) FROM {}", table.table_name());
        let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn insert_game_tx(tx: &Transaction, games: &[&GameRecord]) -> RepositoryResult<usize> {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO games (
                id, cover, name, size, year, platform, price, currency,
                description, status, genre, views, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#,
        )?;

        let now = Utc::now().to_rfc3339();
        let mut count = 0;
        for game in games {
            stmt.execute(params![
                Uuid::new_v4().to_string(),
                game.cover,
                game.name,
                game.size,
                game.year,
                game.platform.as_str(),
                game.price,
                game.currency.as_str(),
                game.description,
                game.status.map(|s| s.as_str()),
                game.genre,
                game.views,
                now,
                now,
            ])?;
            count += 1;
        }
        Ok(count)
    }

    fn insert_product_tx(tx: &Transaction, products: &[&ProductRecord]) -> RepositoryResult<usize> {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO products (
                id, name, price, currency, description, image, category,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )?;

        let now = Utc::now().to_rfc3339();
        let mut count = 0;
        for product in products {
            stmt.execute(params![
                Uuid::new_v4().to_string(),
                product.name,
                product.price,
                product.currency.as_str(),
                product.description,
                product.image,
                product.category.as_str(),
                now,
                now,
            ])?;
            count += 1;
        }
        Ok(count)
    }

    fn insert_service_tx(tx: &Transaction, services: &[&ServiceRecord]) -> RepositoryResult<usize> {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO services (
                id, cover, name, price, currency, description, duration,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )?;

        let now = Utc::now().to_rfc3339();
        let mut count = 0;
        for service in services {
            stmt.execute(params![
                Uuid::new_v4().to_string(),
                service.cover,
                service.name,
                service.price,
                service.currency.as_str(),
                service.description,
                service.duration,
                now,
                now,
            ])?;
            count += 1;
        }
        Ok(count)
    }
}

/// 校验记录类型与目标表一致
fn ensure_table<'a, T>(
    table: DomainType,
    records: &'a [NormalizedRecord],
    pick: impl Fn(&'a NormalizedRecord) -> Option<&'a T>,
) -> RepositoryResult<Vec<&'a T>> {
    records
        .iter()
        .map(|record| {
            pick(record).ok_or_else(|| RepositoryError::RecordTypeMismatch {
                table: table.table_name().to_string(),
                got: record.domain().to_string(),
            })
        })
        .collect()
}

#[async_trait]
impl CatalogRepository for CatalogRepositoryImpl {
    /// 批量插入（事务化）
    #[instrument(skip(self, records), fields(table = %table, count = records.len()))]
    async fn bulk_insert(
        &self,
        table: DomainType,
        records: Vec<NormalizedRecord>,
    ) -> RepositoryResult<usize> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let count = match table {
            DomainType::Game => {
                let games = ensure_table(table, &records, |r| match r {
                    NormalizedRecord::Game(g) => Some(g),
                    _ => None,
                })?;
                Self::insert_game_tx(&tx, &games)?
            }
            DomainType::Product => {
                let products = ensure_table(table, &records, |r| match r {
                    NormalizedRecord::Product(p) => Some(p),
                    _ => None,
                })?;
                Self::insert_product_tx(&tx, &products)?
            }
            DomainType::Service => {
                let services = ensure_table(table, &records, |r| match r {
                    NormalizedRecord::Service(s) => Some(s),
                    _ => None,
                })?;
                Self::insert_service_tx(&tx, &services)?
            }
        };

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        debug!(count = count, "目录批量写入完成");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Currency, GameStatus, Platform, ProductCategory};

    fn memory_repo() -> CatalogRepositoryImpl {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        CatalogRepositoryImpl::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    fn game(name: &str) -> NormalizedRecord {
        NormalizedRecord::Game(GameRecord {
            cover: "http://x/c.jpg".to_string(),
            name: name.to_string(),
            size: "10 GB".to_string(),
            year: 2024,
            platform: Platform::PcGame,
            price: 9.99,
            currency: Currency::Usd,
            description: "Gran juego".to_string(),
            status: Some(GameStatus::NewlyAdded),
            genre: Some("Action".to_string()),
            views: 0,
        })
    }

    #[tokio::test]
    async fn test_bulk_insert_games() {
        let repo = memory_repo();
        let written = repo
            .bulk_insert(DomainType::Game, vec![game("Foo"), game("Bar")])
            .await
            .unwrap();

        assert_eq!(written, 2);
        assert_eq!(repo.count_records(DomainType::Game).unwrap(), 2);
        assert_eq!(repo.count_records(DomainType::Product).unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bulk_insert_rejects_mismatched_records_atomically() {
        let repo = memory_repo();
        let product = NormalizedRecord::Product(ProductRecord {
            name: "Mouse".to_string(),
            price: 5.0,
            currency: Currency::Cup,
            description: "Ratón".to_string(),
            image: String::new(),
            category: ProductCategory::Accessory,
        });

        let result = repo
            .bulk_insert(DomainType::Game, vec![game("Foo"), product])
            .await;

        assert!(matches!(
            result,
            Err(RepositoryError::RecordTypeMismatch { .. })
        ));
        assert_eq!(repo.count_records(DomainType::Game).unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bulk_insert_fails_without_schema() {
        let conn = Connection::open_in_memory().unwrap();
        let repo = CatalogRepositoryImpl::from_connection(Arc::new(Mutex::new(conn))).unwrap();

        let result = repo.bulk_insert(DomainType::Game, vec![game("Foo")]).await;
        assert!(result.is_err());
    }
}
