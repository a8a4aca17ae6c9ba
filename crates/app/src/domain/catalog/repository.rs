//! Catalog Repository

use async_trait::async_trait;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};
use vitrina::products::{Color, Product, ProductId, Size};

use crate::storage::{Offline, StorageError, json_list_column};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");

/// Remote product table.
#[automock]
#[async_trait]
pub trait RemoteCatalogRepository: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, StorageError>;
}

/// PostgreSQL-backed catalog repository.
#[derive(Debug, Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RemoteCatalogRepository for PgCatalogRepository {
    async fn list_products(&self) -> Result<Vec<Product>, StorageError> {
        let rows = query_as::<Postgres, ProductRow>(LIST_PRODUCTS_SQL)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|ProductRow(product)| product).collect())
    }
}

#[async_trait]
impl RemoteCatalogRepository for Offline {
    async fn list_products(&self) -> Result<Vec<Product>, StorageError> {
        Err(StorageError::Unavailable)
    }
}

struct ProductRow(Product);

impl<'r> FromRow<'r, PgRow> for ProductRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let stock_quantity: i32 = row.try_get("stock_quantity")?;
        let stock_quantity =
            u32::try_from(stock_quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "stock_quantity".to_string(),
                source: Box::new(e),
            })?;

        let images: Vec<String> = json_list_column(row, "images")?;
        let sizes: Vec<Size> = json_list_column(row, "sizes")?;
        let colors: Vec<Color> = json_list_column(row, "colors")?;

        Ok(Self(Product {
            id: ProductId::new(row.try_get::<String, _>("id")?),
            title: row.try_get("title")?,
            description: row
                .try_get::<Option<String>, _>("description")?
                .unwrap_or_default(),
            price: row.try_get("price")?,
            image_url: row.try_get("image_url")?,
            images,
            sizes,
            colors,
            stock_quantity,
            card_color: row.try_get("card_color")?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::test::TestDb;

    use super::*;

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn products_decode_from_jsonb_columns() -> TestResult {
        let db = TestDb::new().await;

        sqlx::query(
            r##"INSERT INTO products (id, title, price, images, sizes, colors, stock_quantity)
                VALUES (
                    'tee',
                    'Tee',
                    18.50,
                    '["/a.png", "/b.png"]',
                    '[{"id": "m", "name": "M", "available": true, "isChildSize": false}]',
                    '[{"id": "red", "name": "Rojo", "hex": "#FF0000"}]',
                    4
                )"##,
        )
        .execute(db.pool())
        .await?;

        let products = PgCatalogRepository::new(db.pool().clone())
            .list_products()
            .await?;

        let tee = products.first().ok_or("no products")?;

        assert_eq!(tee.id.as_str(), "tee");
        assert_eq!(tee.price, Decimal::new(18_50, 2));
        assert_eq!(tee.primary_image(), Some("/a.png"));
        assert_eq!(tee.size("m").map(|s| s.name.as_str()), Some("M"));
        assert_eq!(tee.color("red").map(|c| c.hex.as_str()), Some("#FF0000"));
        assert_eq!(tee.description, "");

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn string_encoded_lists_are_accepted() -> TestResult {
        let db = TestDb::new().await;

        sqlx::query(
            r##"INSERT INTO products (id, title, price, images, sizes, colors, stock_quantity)
                VALUES
                    (
                        'tee',
                        'Tee',
                        18.50,
                        to_jsonb('["/a.png"]'::text),
                        to_jsonb('[{"id": "m", "name": "M", "available": true}]'::text),
                        to_jsonb('[{"id": "red", "name": "Rojo", "hex": "#FF0000"}]'::text),
                        4
                    ),
                    ('cap', 'Cap', 12.99, NULL, to_jsonb('not json'::text), '{}', 2)"##,
        )
        .execute(db.pool())
        .await?;

        let products = PgCatalogRepository::new(db.pool().clone())
            .list_products()
            .await?;

        assert_eq!(products.len(), 2, "one odd row must not drop the catalog");

        let tee = products
            .iter()
            .find(|p| p.id.as_str() == "tee")
            .ok_or("tee missing")?;
        assert_eq!(tee.images, ["/a.png"]);
        assert_eq!(tee.size("m").map(|s| s.name.as_str()), Some("M"));
        assert_eq!(tee.color("red").map(|c| c.name.as_str()), Some("Rojo"));

        let cap = products
            .iter()
            .find(|p| p.id.as_str() == "cap")
            .ok_or("cap missing")?;
        assert!(cap.images.is_empty(), "missing images decode as empty");
        assert!(cap.sizes.is_empty(), "garbage sizes decode as empty");
        assert!(cap.colors.is_empty(), "non-list colors decode as empty");

        Ok(())
    }
}
