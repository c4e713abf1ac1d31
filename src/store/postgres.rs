//! Postgres backend built on sqlx.
//!
//! Queries are plain SQL against the schema in `migrations/`. Order
//! submission runs inside one transaction: the header and every detail row
//! commit together or not at all.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, PgPool};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{CatalogStore, OrderStore, SettingsStore, StoreError, StoreResult};
use crate::catalog::Catalog;
use crate::models::{
    Bouquet, BouquetFlag, BouquetPatch, CatalogOption, CategoryOption, ColorOption,
    ComplementOption, CreateOrderRequest, CustomizationCategory, CustomizationOptions,
    FlowerOption, NewBouquet, NewCategory, OptionDraft, OptionKind, OptionPatch, Order,
    OrderColor, OrderComplement, OrderFlower, OrderHeader, OrderStatus, SettingsPatch,
    SiteSettings, SizeOption, UpdateCategory,
};
use crate::orders::plan_order;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Apply the embedded migrations.
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_option(&self, kind: OptionKind, id: Uuid) -> StoreResult<Option<CatalogOption>> {
        let option = match kind {
            OptionKind::Flowers => sqlx::query_as::<_, FlowerOption>("SELECT * FROM flowers WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .map(CatalogOption::Flower),
            OptionKind::Colors => sqlx::query_as::<_, ColorOption>("SELECT * FROM colors WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .map(CatalogOption::Color),
            OptionKind::Sizes => sqlx::query_as::<_, SizeOption>("SELECT * FROM sizes WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .map(CatalogOption::Size),
            OptionKind::Complements => {
                sqlx::query_as::<_, ComplementOption>("SELECT * FROM complements WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
                    .map(CatalogOption::Complement)
            }
        };
        Ok(option)
    }

    async fn category_options(&self, category_ids: &[Uuid]) -> StoreResult<Vec<CategoryOption>> {
        let options = sqlx::query_as::<_, CategoryOption>(
            r#"
            SELECT * FROM customization_options
            WHERE category_id = ANY($1) AND is_active
            ORDER BY display_order
            "#,
        )
        .bind(category_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(options)
    }
}

/// Load every option list on one connection, so a transaction sees a
/// consistent catalog.
async fn load_options(
    conn: &mut PgConnection,
    include_inactive: bool,
) -> Result<CustomizationOptions, sqlx::Error> {
    let flowers = sqlx::query_as::<_, FlowerOption>(
        "SELECT * FROM flowers WHERE ($1 OR is_active) ORDER BY display_order",
    )
    .bind(include_inactive)
    .fetch_all(&mut *conn)
    .await?;
    let colors = sqlx::query_as::<_, ColorOption>(
        "SELECT * FROM colors WHERE ($1 OR is_active) ORDER BY display_order",
    )
    .bind(include_inactive)
    .fetch_all(&mut *conn)
    .await?;
    let sizes = sqlx::query_as::<_, SizeOption>(
        "SELECT * FROM sizes WHERE ($1 OR is_active) ORDER BY display_order",
    )
    .bind(include_inactive)
    .fetch_all(&mut *conn)
    .await?;
    let complements = sqlx::query_as::<_, ComplementOption>(
        "SELECT * FROM complements WHERE ($1 OR is_active) ORDER BY display_order",
    )
    .bind(include_inactive)
    .fetch_all(&mut *conn)
    .await?;

    Ok(CustomizationOptions {
        flowers,
        colors,
        sizes,
        complements,
    })
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn list_bouquets(&self, include_inactive: bool) -> StoreResult<Vec<Bouquet>> {
        let bouquets = sqlx::query_as::<_, Bouquet>(
            "SELECT * FROM bouquets WHERE ($1 OR is_active) ORDER BY display_order, created_at",
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await?;
        Ok(bouquets)
    }

    async fn get_bouquet(&self, id: Uuid) -> StoreResult<Option<Bouquet>> {
        let bouquet = sqlx::query_as::<_, Bouquet>("SELECT * FROM bouquets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(bouquet)
    }

    async fn create_bouquet(&self, new: NewBouquet) -> StoreResult<Bouquet> {
        let bouquet: Bouquet = sqlx::query_as(
            r#"
            INSERT INTO bouquets (name, description, short_description, price, images, category,
                                  allows_customization, is_featured, is_active, display_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.short_description)
        .bind(new.price)
        .bind(&new.images)
        .bind(&new.category)
        .bind(new.allows_customization)
        .bind(new.featured)
        .bind(new.active)
        .bind(new.display_order)
        .fetch_one(&self.pool)
        .await?;

        info!("Bouquet {} created: {}", bouquet.id, bouquet.name);
        Ok(bouquet)
    }

    async fn update_bouquet(&self, id: Uuid, patch: BouquetPatch) -> StoreResult<Option<Bouquet>> {
        let bouquet = sqlx::query_as::<_, Bouquet>(
            r#"
            UPDATE bouquets SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                short_description = COALESCE($4, short_description),
                price = COALESCE($5, price),
                images = COALESCE($6, images),
                category = COALESCE($7, category),
                allows_customization = COALESCE($8, allows_customization),
                is_featured = COALESCE($9, is_featured),
                is_active = COALESCE($10, is_active),
                display_order = COALESCE($11, display_order)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.description)
        .bind(patch.short_description)
        .bind(patch.price)
        .bind(patch.images)
        .bind(patch.category)
        .bind(patch.allows_customization)
        .bind(patch.featured)
        .bind(patch.active)
        .bind(patch.display_order)
        .fetch_optional(&self.pool)
        .await?;
        Ok(bouquet)
    }

    async fn delete_bouquet(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM bouquets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn toggle_bouquet(&self, id: Uuid, flag: BouquetFlag) -> StoreResult<Option<Bouquet>> {
        let sql = match flag {
            BouquetFlag::Active => {
                "UPDATE bouquets SET is_active = NOT is_active WHERE id = $1 RETURNING *"
            }
            BouquetFlag::Featured => {
                "UPDATE bouquets SET is_featured = NOT is_featured WHERE id = $1 RETURNING *"
            }
        };
        let bouquet = sqlx::query_as::<_, Bouquet>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(bouquet)
    }

    async fn customization_options(
        &self,
        include_inactive: bool,
    ) -> StoreResult<CustomizationOptions> {
        let mut conn = self.pool.acquire().await?;
        Ok(load_options(&mut *conn, include_inactive).await?)
    }

    async fn create_option(&self, draft: OptionDraft) -> StoreResult<CatalogOption> {
        let option = match draft {
            OptionDraft::Flower {
                name,
                price,
                active,
                display_order,
            } => CatalogOption::Flower(
                sqlx::query_as(
                    r#"
                    INSERT INTO flowers (name, price, is_active, display_order)
                    VALUES ($1, $2, $3, $4)
                    RETURNING *
                    "#,
                )
                .bind(name)
                .bind(price)
                .bind(active)
                .bind(display_order)
                .fetch_one(&self.pool)
                .await?,
            ),
            OptionDraft::Color {
                name,
                hex_code,
                price,
                active,
                display_order,
            } => CatalogOption::Color(
                sqlx::query_as(
                    r#"
                    INSERT INTO colors (name, hex_code, price, is_active, display_order)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING *
                    "#,
                )
                .bind(name)
                .bind(hex_code)
                .bind(price)
                .bind(active)
                .bind(display_order)
                .fetch_one(&self.pool)
                .await?,
            ),
            OptionDraft::Size {
                name,
                price,
                price_modifier,
                active,
                display_order,
            } => CatalogOption::Size(
                sqlx::query_as(
                    r#"
                    INSERT INTO sizes (name, price, price_modifier, is_active, display_order)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING *
                    "#,
                )
                .bind(name)
                .bind(price)
                .bind(price_modifier)
                .bind(active)
                .bind(display_order)
                .fetch_one(&self.pool)
                .await?,
            ),
            OptionDraft::Complement {
                name,
                complement_type,
                price,
                active,
                display_order,
            } => CatalogOption::Complement(
                sqlx::query_as(
                    r#"
                    INSERT INTO complements (name, type, price, is_active, display_order)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING *
                    "#,
                )
                .bind(name)
                .bind(complement_type.as_str())
                .bind(price)
                .bind(active)
                .bind(display_order)
                .fetch_one(&self.pool)
                .await?,
            ),
        };

        info!("Created option {}", option.id());
        Ok(option)
    }

    async fn update_option(
        &self,
        kind: OptionKind,
        id: Uuid,
        patch: OptionPatch,
    ) -> StoreResult<Option<CatalogOption>> {
        let extra = match kind {
            OptionKind::Flowers => "",
            OptionKind::Colors => ", hex_code = COALESCE($6, hex_code)",
            OptionKind::Sizes => ", price_modifier = COALESCE($6, price_modifier)",
            OptionKind::Complements => ", type = COALESCE($6, type)",
        };
        let sql = format!(
            "UPDATE {table} SET \
                name = COALESCE($2, name), \
                price = COALESCE($3, price), \
                is_active = COALESCE($4, is_active), \
                display_order = COALESCE($5, display_order){extra} \
             WHERE id = $1",
            table = kind.as_str(),
        );

        let query = sqlx::query(&sql)
            .bind(id)
            .bind(patch.name)
            .bind(patch.price)
            .bind(patch.active)
            .bind(patch.display_order);
        let query = match kind {
            OptionKind::Flowers => query,
            OptionKind::Colors => query.bind(patch.hex_code),
            OptionKind::Sizes => query.bind(patch.price_modifier),
            OptionKind::Complements => query.bind(patch.complement_type.map(|t| t.as_str())),
        };

        if query.execute(&self.pool).await?.rows_affected() == 0 {
            return Ok(None);
        }
        self.fetch_option(kind, id).await
    }

    async fn delete_option(&self, kind: OptionKind, id: Uuid) -> StoreResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", kind.as_str());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn toggle_option(
        &self,
        kind: OptionKind,
        id: Uuid,
    ) -> StoreResult<Option<CatalogOption>> {
        let sql = format!(
            "UPDATE {} SET is_active = NOT is_active WHERE id = $1",
            kind.as_str()
        );
        if sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected()
            == 0
        {
            return Ok(None);
        }
        self.fetch_option(kind, id).await
    }

    async fn list_categories(&self) -> StoreResult<Vec<CustomizationCategory>> {
        let mut categories = sqlx::query_as::<_, CustomizationCategory>(
            "SELECT * FROM customization_categories WHERE is_active ORDER BY display_order",
        )
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = categories.iter().map(|c| c.id).collect();
        let mut by_category: HashMap<Uuid, Vec<CategoryOption>> = HashMap::new();
        for option in self.category_options(&ids).await? {
            by_category.entry(option.category_id).or_default().push(option);
        }
        for category in &mut categories {
            category.options = by_category.remove(&category.id).unwrap_or_default();
        }
        Ok(categories)
    }

    async fn create_category(&self, new: NewCategory) -> StoreResult<CustomizationCategory> {
        let category: CustomizationCategory = sqlx::query_as(
            r#"
            INSERT INTO customization_categories
                (name, type, allow_multiple, is_required, is_active, display_order)
            VALUES ($1, $2, $3, $4, TRUE, $5)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.category_type)
        .bind(new.allow_multiple)
        .bind(new.is_required)
        .bind(new.display_order)
        .fetch_one(&self.pool)
        .await?;

        info!("Customization category {} created: {}", category.id, category.name);
        Ok(category)
    }

    async fn update_category(
        &self,
        update: UpdateCategory,
    ) -> StoreResult<Option<CustomizationCategory>> {
        let category = sqlx::query_as::<_, CustomizationCategory>(
            r#"
            UPDATE customization_categories SET
                name = COALESCE($2, name),
                type = COALESCE($3, type),
                allow_multiple = COALESCE($4, allow_multiple),
                is_required = COALESCE($5, is_required),
                is_active = COALESCE($6, is_active),
                display_order = COALESCE($7, display_order)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(update.id)
        .bind(update.name)
        .bind(update.category_type)
        .bind(update.allow_multiple)
        .bind(update.is_required)
        .bind(update.active)
        .bind(update.display_order)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut category) = category else {
            return Ok(None);
        };
        category.options = self.category_options(&[category.id]).await?;
        Ok(Some(category))
    }

    async fn delete_category(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM customization_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Orders
// ============================================================================

#[derive(sqlx::FromRow)]
struct FlowerLineRow {
    order_id: Uuid,
    #[sqlx(flatten)]
    line: OrderFlower,
}

#[derive(sqlx::FromRow)]
struct ColorLineRow {
    order_id: Uuid,
    #[sqlx(flatten)]
    line: OrderColor,
}

#[derive(sqlx::FromRow)]
struct ComplementLineRow {
    order_id: Uuid,
    #[sqlx(flatten)]
    line: OrderComplement,
}

impl PgStore {
    /// Attach detail lines to the given headers, keeping header order.
    async fn with_details(&self, headers: Vec<OrderHeader>) -> StoreResult<Vec<Order>> {
        let ids: Vec<Uuid> = headers.iter().map(|h| h.id).collect();

        let flowers = sqlx::query_as::<_, FlowerLineRow>(
            r#"
            SELECT order_id, flower_id, flower_name, quantity, unit_price
            FROM order_flowers WHERE order_id = ANY($1) ORDER BY id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        let colors = sqlx::query_as::<_, ColorLineRow>(
            r#"
            SELECT order_id, color_id, color_name, hex_code
            FROM order_colors WHERE order_id = ANY($1) ORDER BY id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        let complements = sqlx::query_as::<_, ComplementLineRow>(
            r#"
            SELECT order_id, complement_id, complement_name, price
            FROM order_complements WHERE order_id = ANY($1) ORDER BY id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut orders: Vec<Order> = headers
            .into_iter()
            .map(|header| Order {
                header,
                flowers: Vec::new(),
                colors: Vec::new(),
                complements: Vec::new(),
            })
            .collect();
        let index: HashMap<Uuid, usize> = orders
            .iter()
            .enumerate()
            .map(|(i, o)| (o.header.id, i))
            .collect();

        for row in flowers {
            if let Some(&i) = index.get(&row.order_id) {
                orders[i].flowers.push(row.line);
            }
        }
        for row in colors {
            if let Some(&i) = index.get(&row.order_id) {
                orders[i].colors.push(row.line);
            }
        }
        for row in complements {
            if let Some(&i) = index.get(&row.order_id) {
                orders[i].complements.push(row.line);
            }
        }
        Ok(orders)
    }
}

#[async_trait]
impl OrderStore for PgStore {
    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        let headers = sqlx::query_as::<_, OrderHeader>("SELECT * FROM orders ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        self.with_details(headers).await
    }

    async fn get_order(&self, id: Uuid) -> StoreResult<Option<Order>> {
        let header = sqlx::query_as::<_, OrderHeader>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match header {
            Some(header) => Ok(self.with_details(vec![header]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn submit_order(&self, req: CreateOrderRequest) -> StoreResult<OrderHeader> {
        let mut tx = self.pool.begin().await?;

        let catalog = Catalog::including_inactive(load_options(&mut *tx, true).await?);
        let plan = plan_order(req, &catalog).map_err(|reason| {
            warn!("Order rejected: {}", reason);
            StoreError::Rejected(reason)
        })?;

        let header: OrderHeader = sqlx::query_as(
            r#"
            INSERT INTO orders (customer_name, customer_phone, total_price, status, notes, selected_size_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&plan.customer_name)
        .bind(&plan.customer_phone)
        .bind(plan.total_price)
        .bind(plan.status.as_str())
        .bind(&plan.notes)
        .bind(plan.selected_size_id)
        .fetch_one(&mut *tx)
        .await?;

        for line in &plan.flowers {
            sqlx::query(
                r#"
                INSERT INTO order_flowers (order_id, flower_id, flower_name, quantity, unit_price)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(header.id)
            .bind(line.flower_id)
            .bind(&line.flower_name)
            .bind(line.quantity)
            .bind(line.unit_price)
            .execute(&mut *tx)
            .await
            .inspect_err(|e| error!("Failed to insert flower line for order {}: {}", header.id, e))?;
        }

        for line in &plan.colors {
            sqlx::query(
                r#"
                INSERT INTO order_colors (order_id, color_id, color_name, hex_code)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(header.id)
            .bind(line.color_id)
            .bind(&line.color_name)
            .bind(&line.hex_code)
            .execute(&mut *tx)
            .await
            .inspect_err(|e| error!("Failed to insert color line for order {}: {}", header.id, e))?;
        }

        for line in &plan.complements {
            sqlx::query(
                r#"
                INSERT INTO order_complements (order_id, complement_id, complement_name, price)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(header.id)
            .bind(line.complement_id)
            .bind(&line.complement_name)
            .bind(line.price)
            .execute(&mut *tx)
            .await
            .inspect_err(|e| {
                error!("Failed to insert complement line for order {}: {}", header.id, e)
            })?;
        }

        tx.commit().await?;
        info!(
            "Order {} created for {} ({} rows)",
            header.id,
            header.customer_name,
            plan.row_count()
        );
        Ok(header)
    }

    async fn update_order_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> StoreResult<Option<OrderHeader>> {
        let header = sqlx::query_as::<_, OrderHeader>(
            "UPDATE orders SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;
        if let Some(header) = &header {
            info!("Order {} moved to {}", header.id, header.status);
        }
        Ok(header)
    }
}

#[async_trait]
impl SettingsStore for PgStore {
    async fn load_settings(&self) -> StoreResult<SiteSettings> {
        let settings = sqlx::query_as::<_, SiteSettings>("SELECT * FROM site_settings WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(settings.unwrap_or_default())
    }

    async fn update_settings(&self, patch: SettingsPatch) -> StoreResult<SiteSettings> {
        let mut tx = self.pool.begin().await?;
        let mut settings =
            sqlx::query_as::<_, SiteSettings>("SELECT * FROM site_settings WHERE id = 1 FOR UPDATE")
                .fetch_optional(&mut *tx)
                .await?
                .unwrap_or_default();
        patch.apply(&mut settings);

        sqlx::query(
            r#"
            INSERT INTO site_settings (id, site_name, hero_title, hero_subtitle, cta_main_text,
                                       cta_secondary_text, whatsapp_number, whatsapp_default_message)
            VALUES (1, $1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                site_name = EXCLUDED.site_name,
                hero_title = EXCLUDED.hero_title,
                hero_subtitle = EXCLUDED.hero_subtitle,
                cta_main_text = EXCLUDED.cta_main_text,
                cta_secondary_text = EXCLUDED.cta_secondary_text,
                whatsapp_number = EXCLUDED.whatsapp_number,
                whatsapp_default_message = EXCLUDED.whatsapp_default_message,
                updated_at = NOW()
            "#,
        )
        .bind(&settings.site_name)
        .bind(&settings.hero_title)
        .bind(&settings.hero_subtitle)
        .bind(&settings.cta_main_text)
        .bind(&settings.cta_secondary_text)
        .bind(&settings.whatsapp_number)
        .bind(&settings.whatsapp_default_message)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        info!("Site settings updated");
        Ok(settings)
    }
}
