//! Site Content Repository

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as, types::Json};
use vitrina::site::SiteInfo;

use crate::storage::{Offline, StorageError, json_list, json_list_column};

const FIND_SITE_INFO_SQL: &str = include_str!("sql/find_site_info.sql");

/// Remote site content table. Only the newest row is used.
#[automock]
#[async_trait]
pub trait RemoteSiteRepository: Send + Sync {
    async fn find_site_info(&self) -> Result<Option<SiteInfo>, StorageError>;
}

/// PostgreSQL-backed site content repository.
#[derive(Debug, Clone)]
pub struct PgSiteRepository {
    pool: PgPool,
}

impl PgSiteRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RemoteSiteRepository for PgSiteRepository {
    async fn find_site_info(&self) -> Result<Option<SiteInfo>, StorageError> {
        let row = query_as::<Postgres, SiteInfoRow>(FIND_SITE_INFO_SQL)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|SiteInfoRow(info)| info))
    }
}

#[async_trait]
impl RemoteSiteRepository for Offline {
    async fn find_site_info(&self) -> Result<Option<SiteInfo>, StorageError> {
        Err(StorageError::Unavailable)
    }
}

/// Carousel images also accept a bare URL string.
fn carousel_images(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::String(raw)) if serde_json::from_str::<Value>(&raw).is_err() => vec![raw],
        value => json_list(value),
    }
}

struct SiteInfoRow(SiteInfo);

impl<'r> FromRow<'r, PgRow> for SiteInfoRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let text = |column: &str| -> sqlx::Result<String> {
            Ok(row
                .try_get::<Option<String>, _>(column)?
                .unwrap_or_default())
        };

        let carousel = row
            .try_get::<Option<Json<Value>>, _>("carousel_images")?
            .map(|Json(value)| value);

        Ok(Self(SiteInfo {
            slogan: text("slogan")?,
            whatsapp_number: text("whatsapp_number")?,
            instagram_link: text("instagram_link")?,
            facebook_link: text("facebook_link")?,
            carousel_images: carousel_images(carousel),
            unique_style_title: text("unique_style_title")?,
            materials_title: text("materials_title")?,
            materials_description: text("materials_description")?,
            design_title: text("design_title")?,
            design_description: text("design_description")?,
            service_title: text("service_title")?,
            service_description: text("service_description")?,
            faq_title: text("faq_title")?,
            faq_items: json_list_column(row, "faq_items")?,
            footer_logo_url: text("footer_logo_url")?,
            footer_about_text: text("footer_about_text")?,
            footer_links_title: text("footer_links_title")?,
            footer_contact_title: text("footer_contact_title")?,
            footer_custom_links: json_list_column(row, "footer_custom_links")?,
            email_address: text("email_address")?,
            address: text("address")?,
            footer_additional_info: text("footer_additional_info")?,
            footer_copyright_text: text("footer_copyright_text")?,
            products_title: text("products_title")?,
            products_subtitle: text("products_subtitle")?,
            products_description: text("products_description")?,
        }))
    }
}
