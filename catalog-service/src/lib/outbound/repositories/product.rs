use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Gtin;
use crate::domain::product::models::NutritionalFact;
use crate::domain::product::models::Page;
use crate::domain::product::models::PageRequest;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductText;
use crate::domain::product::ports::ProductRepository;

const PRODUCT_COLUMNS: &str = r#"
    id, manufacturer, name, weight, photo_url, gtin,
    calories, kilojoules, fat, carbohydrates, sugars, polyols,
    fibers, protein, sodium, vitamin_c, calcium
"#;

// Substring on name/manufacturer or exact GTIN, all case-insensitive.
// $1 is the LIKE-escaped query, $2 the raw one.
const SEARCH_FILTER: &str = r#"
    name ILIKE '%' || $1 || '%' ESCAPE '\'
    OR manufacturer ILIKE '%' || $1 || '%' ESCAPE '\'
    OR LOWER(gtin) = LOWER($2)
"#;

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: PgRow) -> Result<Product, ProductError> {
        let database_error = |e: sqlx::Error| ProductError::DatabaseError(e.to_string());

        // A row without energy values carries no nutrition label
        let calories: Option<i32> = row.try_get("calories").map_err(database_error)?;
        let kilojoules: Option<i32> = row.try_get("kilojoules").map_err(database_error)?;
        let nutritional_fact = match (calories, kilojoules) {
            (Some(calories), Some(kilojoules)) => Some(NutritionalFact {
                calories,
                kilojoules,
                fat: row.try_get("fat").map_err(database_error)?,
                carbohydrates: row.try_get("carbohydrates").map_err(database_error)?,
                sugars: row.try_get("sugars").map_err(database_error)?,
                polyols: row.try_get("polyols").map_err(database_error)?,
                fibers: row.try_get("fibers").map_err(database_error)?,
                protein: row.try_get("protein").map_err(database_error)?,
                sodium: row.try_get("sodium").map_err(database_error)?,
                vitamin_c: row.try_get("vitamin_c").map_err(database_error)?,
                calcium: row.try_get("calcium").map_err(database_error)?,
            }),
            _ => None,
        };

        let gtin: Option<String> = row.try_get("gtin").map_err(database_error)?;
        let weight: Option<Decimal> = row.try_get("weight").map_err(database_error)?;

        Ok(Product {
            id: ProductId(row.try_get("id").map_err(database_error)?),
            manufacturer: ProductText::new(row.try_get("manufacturer").map_err(database_error)?)?,
            name: ProductText::new(row.try_get("name").map_err(database_error)?)?,
            weight,
            nutritional_fact,
            photo_url: row.try_get("photo_url").map_err(database_error)?,
            gtin: gtin.map(Gtin::new).transpose()?,
        })
    }

    fn rows_to_page(
        rows: Vec<PgRow>,
        page: PageRequest,
        total: i64,
    ) -> Result<Page<Product>, ProductError> {
        let content = rows
            .into_iter()
            .map(Self::row_to_product)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(content, page, u64::try_from(total).unwrap_or(0)))
    }
}

/// Escapes LIKE metacharacters so the query matches literally.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn limit_offset(page: PageRequest) -> (i64, i64) {
    (
        i64::from(page.size()),
        i64::try_from(page.offset()).unwrap_or(i64::MAX),
    )
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        let fact = product.nutritional_fact.clone().unwrap_or_default();
        let has_fact = product.nutritional_fact.is_some();

        sqlx::query(
            r#"
            INSERT INTO products (
                id, manufacturer, name, weight, photo_url, gtin,
                calories, kilojoules, fat, carbohydrates, sugars, polyols,
                fibers, protein, sodium, vitamin_c, calcium
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(product.id.0)
        .bind(product.manufacturer.as_str())
        .bind(product.name.as_str())
        .bind(product.weight)
        .bind(product.photo_url.as_deref())
        .bind(product.gtin.as_ref().map(|gtin| gtin.as_str()))
        .bind(has_fact.then_some(fact.calories))
        .bind(has_fact.then_some(fact.kilojoules))
        .bind(fact.fat)
        .bind(fact.carbohydrates)
        .bind(fact.sugars)
        .bind(fact.polyols)
        .bind(fact.fibers)
        .bind(fact.protein)
        .bind(fact.sodium)
        .bind(fact.vitamin_c)
        .bind(fact.calcium)
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(product)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM products WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_product).transpose()
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        let fact = product.nutritional_fact.clone().unwrap_or_default();
        let has_fact = product.nutritional_fact.is_some();

        let result = sqlx::query(
            r#"
            UPDATE products
            SET manufacturer = $2, name = $3, weight = $4, photo_url = $5, gtin = $6,
                calories = $7, kilojoules = $8, fat = $9, carbohydrates = $10,
                sugars = $11, polyols = $12, fibers = $13, protein = $14,
                sodium = $15, vitamin_c = $16, calcium = $17
            WHERE id = $1
            "#,
        )
        .bind(product.id.0)
        .bind(product.manufacturer.as_str())
        .bind(product.name.as_str())
        .bind(product.weight)
        .bind(product.photo_url.as_deref())
        .bind(product.gtin.as_ref().map(|gtin| gtin.as_str()))
        .bind(has_fact.then_some(fact.calories))
        .bind(has_fact.then_some(fact.kilojoules))
        .bind(fact.fat)
        .bind(fact.carbohydrates)
        .bind(fact.sugars)
        .bind(fact.polyols)
        .bind(fact.fibers)
        .bind(fact.protein)
        .bind(fact.sodium)
        .bind(fact.vitamin_c)
        .bind(fact.calcium)
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(product.id.to_string()));
        }

        Ok(product)
    }

    async fn delete(&self, id: ProductId) -> Result<(), ProductError> {
        let result = sqlx::query(
            r#"
            DELETE FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn find_page(&self, page: PageRequest) -> Result<Page<Product>, ProductError> {
        let (limit, offset) = limit_offset(page);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        let rows = sqlx::query(&format!(
            "SELECT {} FROM products ORDER BY name ASC, id ASC LIMIT $1 OFFSET $2",
            PRODUCT_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Self::rows_to_page(rows, page, total)
    }

    async fn search(
        &self,
        query: &str,
        page: PageRequest,
    ) -> Result<Page<Product>, ProductError> {
        let (limit, offset) = limit_offset(page);
        let pattern = escape_like(query);

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM products WHERE {}",
            SEARCH_FILTER
        ))
        .bind(&pattern)
        .bind(query)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        let rows = sqlx::query(&format!(
            "SELECT {} FROM products WHERE {} ORDER BY name ASC, id ASC LIMIT $3 OFFSET $4",
            PRODUCT_COLUMNS, SEARCH_FILTER
        ))
        .bind(&pattern)
        .bind(query)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Self::rows_to_page(rows, page, total)
    }
}
