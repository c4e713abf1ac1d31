//! In-process backend holding everything behind one lock.
//!
//! Writes take the single write lock for their whole duration, which makes
//! every operation (including multi-row order submission) atomic.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::{seed, CatalogStore, OrderStore, SettingsStore, StoreError, StoreResult};
use crate::catalog::Catalog;
use crate::models::{
    Bouquet, BouquetFlag, BouquetPatch, CatalogOption, CreateOrderRequest, CustomizationCategory,
    CustomizationOptions, NewBouquet, NewCategory, OptionDraft, OptionKind, OptionPatch, Order,
    OrderHeader, OrderStatus, SettingsPatch, SiteSettings, UpdateCategory,
};
use crate::orders::plan_order;

#[derive(Debug, Default)]
struct MemoryState {
    bouquets: Vec<Bouquet>,
    options: CustomizationOptions,
    categories: Vec<CustomizationCategory>,
    orders: Vec<Order>,
    settings: SiteSettings,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// An empty store with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with the demo catalog.
    pub fn seeded() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                bouquets: seed::bouquets(),
                options: seed::customization_options(),
                ..Default::default()
            }),
        }
    }

    /// Number of orders currently held.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }
}

fn find_option(options: &CustomizationOptions, kind: OptionKind, id: Uuid) -> Option<CatalogOption> {
    match kind {
        OptionKind::Flowers => options
            .flowers
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .map(CatalogOption::Flower),
        OptionKind::Colors => options
            .colors
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .map(CatalogOption::Color),
        OptionKind::Sizes => options
            .sizes
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .map(CatalogOption::Size),
        OptionKind::Complements => options
            .complements
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .map(CatalogOption::Complement),
    }
}

/// Replace the stored option with `option`, matched by kind and id.
fn put_option(options: &mut CustomizationOptions, option: CatalogOption) {
    fn put<T>(items: &mut Vec<T>, item: T, same: impl Fn(&T) -> bool) {
        match items.iter_mut().find(|existing| same(existing)) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
    }
    match option {
        CatalogOption::Flower(o) => {
            let id = o.id;
            put(&mut options.flowers, o, |e| e.id == id);
        }
        CatalogOption::Color(o) => {
            let id = o.id;
            put(&mut options.colors, o, |e| e.id == id);
        }
        CatalogOption::Size(o) => {
            let id = o.id;
            put(&mut options.sizes, o, |e| e.id == id);
        }
        CatalogOption::Complement(o) => {
            let id = o.id;
            put(&mut options.complements, o, |e| e.id == id);
        }
    }
}

fn set_option_active(option: &mut CatalogOption, active: bool) {
    match option {
        CatalogOption::Flower(o) => o.active = active,
        CatalogOption::Color(o) => o.active = active,
        CatalogOption::Size(o) => o.active = active,
        CatalogOption::Complement(o) => o.active = active,
    }
}

fn sorted_options(options: &CustomizationOptions, include_inactive: bool) -> CustomizationOptions {
    if include_inactive {
        let mut all = options.clone();
        all.flowers.sort_by_key(|o| o.display_order);
        all.colors.sort_by_key(|o| o.display_order);
        all.sizes.sort_by_key(|o| o.display_order);
        all.complements.sort_by_key(|o| o.display_order);
        all
    } else {
        Catalog::from_options(options.clone()).to_options()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_bouquets(&self, include_inactive: bool) -> StoreResult<Vec<Bouquet>> {
        let state = self.state.read().await;
        let mut bouquets: Vec<Bouquet> = state
            .bouquets
            .iter()
            .filter(|b| include_inactive || b.active)
            .cloned()
            .collect();
        bouquets.sort_by_key(|b| b.display_order);
        Ok(bouquets)
    }

    async fn get_bouquet(&self, id: Uuid) -> StoreResult<Option<Bouquet>> {
        let state = self.state.read().await;
        Ok(state.bouquets.iter().find(|b| b.id == id).cloned())
    }

    async fn create_bouquet(&self, new: NewBouquet) -> StoreResult<Bouquet> {
        let bouquet = Bouquet {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            short_description: new.short_description,
            price: new.price,
            images: new.images,
            category: new.category,
            allows_customization: new.allows_customization,
            featured: new.featured,
            active: new.active,
            display_order: new.display_order,
            created_at: Utc::now().naive_utc(),
        };
        self.state.write().await.bouquets.push(bouquet.clone());
        info!("Bouquet {} created: {}", bouquet.id, bouquet.name);
        Ok(bouquet)
    }

    async fn update_bouquet(&self, id: Uuid, patch: BouquetPatch) -> StoreResult<Option<Bouquet>> {
        let mut state = self.state.write().await;
        Ok(state.bouquets.iter_mut().find(|b| b.id == id).map(|bouquet| {
            patch.apply(bouquet);
            bouquet.clone()
        }))
    }

    async fn delete_bouquet(&self, id: Uuid) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        let before = state.bouquets.len();
        state.bouquets.retain(|b| b.id != id);
        Ok(state.bouquets.len() != before)
    }

    async fn toggle_bouquet(&self, id: Uuid, flag: BouquetFlag) -> StoreResult<Option<Bouquet>> {
        let mut state = self.state.write().await;
        Ok(state.bouquets.iter_mut().find(|b| b.id == id).map(|bouquet| {
            match flag {
                BouquetFlag::Active => bouquet.active = !bouquet.active,
                BouquetFlag::Featured => bouquet.featured = !bouquet.featured,
            }
            bouquet.clone()
        }))
    }

    async fn customization_options(
        &self,
        include_inactive: bool,
    ) -> StoreResult<CustomizationOptions> {
        let state = self.state.read().await;
        Ok(sorted_options(&state.options, include_inactive))
    }

    async fn create_option(&self, draft: OptionDraft) -> StoreResult<CatalogOption> {
        let kind = draft.kind();
        let option = draft.into_option(Uuid::new_v4());
        put_option(&mut self.state.write().await.options, option.clone());
        info!("Created {} option {}", kind, option.id());
        Ok(option)
    }

    async fn update_option(
        &self,
        kind: OptionKind,
        id: Uuid,
        patch: OptionPatch,
    ) -> StoreResult<Option<CatalogOption>> {
        let mut state = self.state.write().await;
        let Some(mut option) = find_option(&state.options, kind, id) else {
            return Ok(None);
        };
        patch.apply(&mut option);
        put_option(&mut state.options, option.clone());
        Ok(Some(option))
    }

    async fn delete_option(&self, kind: OptionKind, id: Uuid) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        let options = &mut state.options;
        let removed = match kind {
            OptionKind::Flowers => remove_by_id(&mut options.flowers, |o| o.id == id),
            OptionKind::Colors => remove_by_id(&mut options.colors, |o| o.id == id),
            OptionKind::Sizes => remove_by_id(&mut options.sizes, |o| o.id == id),
            OptionKind::Complements => remove_by_id(&mut options.complements, |o| o.id == id),
        };
        if removed {
            // detail snapshots keep their name and price but lose the link
            for order in &mut state.orders {
                unlink_option(order, kind, id);
            }
        }
        Ok(removed)
    }

    async fn toggle_option(
        &self,
        kind: OptionKind,
        id: Uuid,
    ) -> StoreResult<Option<CatalogOption>> {
        let mut state = self.state.write().await;
        let Some(mut option) = find_option(&state.options, kind, id) else {
            return Ok(None);
        };
        let active = !option.is_active();
        set_option_active(&mut option, active);
        put_option(&mut state.options, option.clone());
        Ok(Some(option))
    }

    async fn list_categories(&self) -> StoreResult<Vec<CustomizationCategory>> {
        let state = self.state.read().await;
        let mut categories: Vec<CustomizationCategory> = state
            .categories
            .iter()
            .filter(|c| c.active)
            .cloned()
            .map(|mut c| {
                c.options.retain(|o| o.active);
                c.options.sort_by_key(|o| o.display_order);
                c
            })
            .collect();
        categories.sort_by_key(|c| c.display_order);
        Ok(categories)
    }

    async fn create_category(&self, new: NewCategory) -> StoreResult<CustomizationCategory> {
        let category = CustomizationCategory {
            id: Uuid::new_v4(),
            name: new.name,
            category_type: new.category_type,
            allow_multiple: new.allow_multiple,
            is_required: new.is_required,
            active: true,
            display_order: new.display_order,
            options: Vec::new(),
        };
        self.state.write().await.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        update: UpdateCategory,
    ) -> StoreResult<Option<CustomizationCategory>> {
        let mut state = self.state.write().await;
        let id = update.id;
        Ok(state.categories.iter_mut().find(|c| c.id == id).map(|category| {
            update.apply(category);
            category.clone()
        }))
    }

    async fn delete_category(&self, id: Uuid) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        Ok(remove_by_id(&mut state.categories, |c| c.id == id))
    }
}

fn remove_by_id<T>(items: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
    let before = items.len();
    items.retain(|item| !matches(item));
    items.len() != before
}

fn unlink_option(order: &mut Order, kind: OptionKind, id: Uuid) {
    let target = Some(id);
    match kind {
        OptionKind::Flowers => order
            .flowers
            .iter_mut()
            .filter(|l| l.flower_id == target)
            .for_each(|l| l.flower_id = None),
        OptionKind::Colors => order
            .colors
            .iter_mut()
            .filter(|l| l.color_id == target)
            .for_each(|l| l.color_id = None),
        OptionKind::Complements => order
            .complements
            .iter_mut()
            .filter(|l| l.complement_id == target)
            .for_each(|l| l.complement_id = None),
        OptionKind::Sizes => {
            if order.header.selected_size_id == target {
                order.header.selected_size_id = None;
            }
        }
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        let state = self.state.read().await;
        let mut orders = state.orders.clone();
        orders.sort_by(|a, b| b.header.created_at.cmp(&a.header.created_at));
        Ok(orders)
    }

    async fn get_order(&self, id: Uuid) -> StoreResult<Option<Order>> {
        let state = self.state.read().await;
        Ok(state.orders.iter().find(|o| o.header.id == id).cloned())
    }

    async fn submit_order(&self, req: CreateOrderRequest) -> StoreResult<OrderHeader> {
        let mut state = self.state.write().await;
        let catalog = Catalog::including_inactive(state.options.clone());
        let plan = plan_order(req, &catalog).map_err(StoreError::Rejected)?;

        let header = OrderHeader {
            id: Uuid::new_v4(),
            customer_name: plan.customer_name,
            customer_phone: plan.customer_phone,
            total_price: plan.total_price,
            status: plan.status,
            notes: plan.notes,
            selected_size_id: plan.selected_size_id,
            created_at: Utc::now().naive_utc(),
        };
        debug!(
            "Order {} carries {} flower, {} color and {} complement lines",
            header.id,
            plan.flowers.len(),
            plan.colors.len(),
            plan.complements.len()
        );
        state.orders.push(Order {
            header: header.clone(),
            flowers: plan.flowers,
            colors: plan.colors,
            complements: plan.complements,
        });
        info!("Order {} created for {}", header.id, header.customer_name);
        Ok(header)
    }

    async fn update_order_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> StoreResult<Option<OrderHeader>> {
        let mut state = self.state.write().await;
        Ok(state
            .orders
            .iter_mut()
            .find(|o| o.header.id == id)
            .map(|order| {
                order.header.status = status;
                order.header.clone()
            }))
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn load_settings(&self) -> StoreResult<SiteSettings> {
        Ok(self.state.read().await.settings.clone())
    }

    async fn update_settings(&self, patch: SettingsPatch) -> StoreResult<SiteSettings> {
        let mut state = self.state.write().await;
        patch.apply(&mut state.settings);
        Ok(state.settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderColorInput, OrderComplementInput, OrderFlowerInput};
    use rust_decimal::Decimal;

    fn order_request(flowers: Vec<OrderFlowerInput>) -> CreateOrderRequest {
        CreateOrderRequest {
            customer_name: "Joana".into(),
            customer_phone: "11988887777".into(),
            total_price: Decimal::new(3960, 2),
            notes: None,
            selected_size_id: None,
            flowers,
            colors: vec![],
            complements: vec![],
        }
    }

    #[tokio::test]
    async fn rejected_submission_leaves_no_header() {
        let store = MemoryStore::seeded();
        let options = store.customization_options(false).await.unwrap();
        let mut req = order_request(vec![OrderFlowerInput {
            flower_id: options.flowers[0].id,
            quantity: 2,
            unit_price: None,
        }]);
        req.complements = vec![OrderComplementInput {
            complement_id: Uuid::from_u128(7),
        }];

        let err = store.submit_order(req).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));
        assert_eq!(store.order_count().await, 0);
    }

    #[tokio::test]
    async fn snapshots_survive_catalog_changes() {
        let store = MemoryStore::seeded();
        let options = store.customization_options(false).await.unwrap();
        let rose = options.flowers[0].clone();
        let pink = options.colors[0].clone();
        let mut req = order_request(vec![OrderFlowerInput {
            flower_id: rose.id,
            quantity: 2,
            unit_price: None,
        }]);
        req.colors = vec![OrderColorInput { color_id: pink.id }];
        let header = store.submit_order(req).await.unwrap();

        store
            .update_option(
                OptionKind::Flowers,
                rose.id,
                OptionPatch {
                    price: Some(Decimal::new(9900, 2)),
                    name: Some("Rosa Colombiana".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(store.delete_option(OptionKind::Colors, pink.id).await.unwrap());

        let order = store.get_order(header.id).await.unwrap().unwrap();
        assert_eq!(order.flowers[0].flower_name, "Rosa");
        assert_eq!(order.flowers[0].unit_price, rose.price);
        assert_eq!(order.colors[0].color_name, pink.name);
        assert_eq!(order.colors[0].color_id, None);
    }

    #[tokio::test]
    async fn status_updates_are_unconstrained() {
        let store = MemoryStore::seeded();
        let header = store.submit_order(order_request(vec![])).await.unwrap();
        assert_eq!(header.status, OrderStatus::Pending);

        for status in [
            OrderStatus::Delivered,
            OrderStatus::Pending,
            OrderStatus::Cancelled,
            OrderStatus::Preparing,
        ] {
            let updated = store
                .update_order_status(header.id, status)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(updated.status, status);
        }
        assert!(store
            .update_order_status(Uuid::nil(), OrderStatus::Ready)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn toggles_flip_flags() {
        let store = MemoryStore::seeded();
        let bouquet = store.list_bouquets(false).await.unwrap()[0].clone();
        let toggled = store
            .toggle_bouquet(bouquet.id, BouquetFlag::Active)
            .await
            .unwrap()
            .unwrap();
        assert!(!toggled.active);
        assert_eq!(
            store.list_bouquets(false).await.unwrap().len(),
            store.list_bouquets(true).await.unwrap().len() - 1
        );

        let sizes = store.customization_options(true).await.unwrap().sizes;
        let flipped = store
            .toggle_option(OptionKind::Sizes, sizes[0].id)
            .await
            .unwrap()
            .unwrap();
        assert!(!flipped.is_active());
        assert_eq!(store.customization_options(false).await.unwrap().sizes.len(), 3);
    }

    #[tokio::test]
    async fn categories_hide_inactive_records() {
        let store = MemoryStore::new();
        let kept = store
            .create_category(NewCategory {
                name: "Embalagem".into(),
                category_type: "wrapping".into(),
                allow_multiple: false,
                is_required: true,
                display_order: 2,
            })
            .await
            .unwrap();
        let hidden = store
            .create_category(NewCategory {
                name: "Extras".into(),
                category_type: "other".into(),
                allow_multiple: true,
                is_required: false,
                display_order: 1,
            })
            .await
            .unwrap();
        store
            .update_category(UpdateCategory {
                id: hidden.id,
                name: None,
                category_type: None,
                allow_multiple: None,
                is_required: None,
                active: Some(false),
                display_order: None,
            })
            .await
            .unwrap();

        let listed = store.list_categories().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, kept.id);
        assert!(store.delete_category(kept.id).await.unwrap());
        assert!(!store.delete_category(kept.id).await.unwrap());
    }
}
