//! Domain models for the storefront service.
//!
//! Persisted entities map to the tables created by `migrations/` and double as
//! the JSON shapes served to the storefront and admin clients. All JSON is
//! camelCase; all money is `Decimal` and travels as a JSON number.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Catalog Models (sqlx::FromRow)
// ============================================================================

/// A ready-made bouquet shown in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Bouquet {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub short_description: String,
    pub price: Decimal,
    pub images: Vec<String>,
    pub category: String,
    pub allows_customization: bool,
    #[sqlx(rename = "is_featured")]
    pub featured: bool,
    #[sqlx(rename = "is_active")]
    pub active: bool,
    #[serde(rename = "order")]
    pub display_order: i32,
    pub created_at: NaiveDateTime,
}

/// A flower that can be picked by the unit in the customizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FlowerOption {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    #[sqlx(rename = "is_active")]
    pub active: bool,
    #[serde(rename = "order")]
    pub display_order: i32,
}

/// A color choice; `price` is added once per chosen color and is often zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ColorOption {
    pub id: Uuid,
    pub name: String,
    pub hex_code: String,
    pub price: Decimal,
    #[sqlx(rename = "is_active")]
    pub active: bool,
    #[serde(rename = "order")]
    pub display_order: i32,
}

/// A bouquet size.
///
/// `price` is the absolute price charged when the size is chosen. The modifier
/// is display information only and is never added on top of a base price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SizeOption {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub price_modifier: Decimal,
    #[sqlx(rename = "is_active")]
    pub active: bool,
    #[serde(rename = "order")]
    pub display_order: i32,
}

/// Complement grouping used by the admin screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplementType {
    Ribbon,
    Wrapping,
    Card,
    Other,
}

impl ComplementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ribbon => "ribbon",
            Self::Wrapping => "wrapping",
            Self::Card => "card",
            Self::Other => "other",
        }
    }
}

impl TryFrom<String> for ComplementType {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "ribbon" => Ok(Self::Ribbon),
            "wrapping" => Ok(Self::Wrapping),
            "card" => Ok(Self::Card),
            "other" => Ok(Self::Other),
            _ => Err(UnknownVariant {
                kind: "complement type",
                value,
            }),
        }
    }
}

/// An extra (ribbon, wrapping, card, chocolate...) priced per unit chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ComplementOption {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type", try_from = "String")]
    pub complement_type: ComplementType,
    pub price: Decimal,
    #[sqlx(rename = "is_active")]
    pub active: bool,
    #[serde(rename = "order")]
    pub display_order: i32,
}

/// The customization bundle served to the customizer screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomizationOptions {
    pub flowers: Vec<FlowerOption>,
    pub colors: Vec<ColorOption>,
    pub sizes: Vec<SizeOption>,
    pub complements: Vec<ComplementOption>,
}

/// Which option table an admin request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Flowers,
    Colors,
    Sizes,
    Complements,
}

impl OptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flowers => "flowers",
            Self::Colors => "colors",
            Self::Sizes => "sizes",
            Self::Complements => "complements",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any one customization option, serialized as its concrete shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CatalogOption {
    Flower(FlowerOption),
    Color(ColorOption),
    Size(SizeOption),
    Complement(ComplementOption),
}

impl CatalogOption {
    pub fn id(&self) -> Uuid {
        match self {
            Self::Flower(o) => o.id,
            Self::Color(o) => o.id,
            Self::Size(o) => o.id,
            Self::Complement(o) => o.id,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Self::Flower(o) => o.active,
            Self::Color(o) => o.active,
            Self::Size(o) => o.active,
            Self::Complement(o) => o.active,
        }
    }
}

/// A generic customization category record with its nested options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationCategory {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub category_type: String,
    pub allow_multiple: bool,
    pub is_required: bool,
    #[sqlx(rename = "is_active")]
    pub active: bool,
    #[serde(rename = "order")]
    pub display_order: i32,
    #[sqlx(skip)]
    #[serde(default)]
    pub options: Vec<CategoryOption>,
}

/// An option nested under a [`CustomizationCategory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOption {
    pub id: Uuid,
    #[serde(skip)]
    pub category_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub hex_code: Option<String>,
    pub image_url: Option<String>,
    #[sqlx(rename = "is_active")]
    pub active: bool,
    #[serde(rename = "order")]
    pub display_order: i32,
}

// ============================================================================
// Order Models
// ============================================================================

/// Lifecycle status of an order. Any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Preparing,
        Self::Ready,
        Self::Delivered,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "order status",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Raised when a text column or request field holds an unknown enum value.
#[derive(Debug, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// The order header row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderHeader {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub total_price: Decimal,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub selected_size_id: Option<Uuid>,
    pub created_at: NaiveDateTime,
}

/// Flower line of an order, captured at submission time.
///
/// The option id becomes `None` once the flower is deleted from the catalog;
/// name and price stay as they were when the order was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderFlower {
    pub flower_id: Option<Uuid>,
    pub flower_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Color line of an order, captured at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderColor {
    pub color_id: Option<Uuid>,
    pub color_name: String,
    pub hex_code: String,
}

/// Complement line of an order, captured at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderComplement {
    pub complement_id: Option<Uuid>,
    pub complement_name: String,
    pub price: Decimal,
}

/// An order with its detail snapshots, as listed in the admin back-office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(flatten)]
    pub header: OrderHeader,
    pub flowers: Vec<OrderFlower>,
    pub colors: Vec<OrderColor>,
    pub complements: Vec<OrderComplement>,
}

/// Singleton display and contact configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub site_name: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub cta_main_text: String,
    pub cta_secondary_text: String,
    pub whatsapp_number: String,
    pub whatsapp_default_message: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: "Flor & Arte".to_string(),
            hero_title: "Flores que Falam por Você".to_string(),
            hero_subtitle: "Presenteie quem você ama com buquês exclusivos, feitos com carinho \
                            e flores frescas selecionadas especialmente para você."
                .to_string(),
            cta_main_text: "Monte seu Buquê".to_string(),
            cta_secondary_text: "Falar no WhatsApp".to_string(),
            whatsapp_number: "5511981713690".to_string(),
            whatsapp_default_message: "Olá! Gostaria de fazer um pedido.".to_string(),
        }
    }
}

// ============================================================================
// Request Models (Deserialize from JSON input)
// ============================================================================

fn default_true() -> bool {
    true
}

/// Request body for creating a bouquet.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBouquet {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: String,
    pub price: Decimal,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: String,
    #[serde(default = "default_true")]
    pub allows_customization: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default, rename = "order")]
    pub display_order: i32,
}

impl NewBouquet {
    pub fn validate(&self) -> Result<(), String> {
        require_text("name", &self.name)?;
        require_text("category", &self.category)?;
        require_price("price", self.price)
    }
}

/// Partial bouquet update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BouquetPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub price: Option<Decimal>,
    pub images: Option<Vec<String>>,
    pub category: Option<String>,
    pub allows_customization: Option<bool>,
    pub featured: Option<bool>,
    pub active: Option<bool>,
    #[serde(rename = "order")]
    pub display_order: Option<i32>,
}

impl BouquetPatch {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(category) = &self.category {
            require_text("category", category)?;
        }
        if let Some(price) = self.price {
            require_price("price", price)?;
        }
        Ok(())
    }

    pub fn apply(self, bouquet: &mut Bouquet) {
        if let Some(v) = self.name {
            bouquet.name = v;
        }
        if let Some(v) = self.description {
            bouquet.description = v;
        }
        if let Some(v) = self.short_description {
            bouquet.short_description = v;
        }
        if let Some(v) = self.price {
            bouquet.price = v;
        }
        if let Some(v) = self.images {
            bouquet.images = v;
        }
        if let Some(v) = self.category {
            bouquet.category = v;
        }
        if let Some(v) = self.allows_customization {
            bouquet.allows_customization = v;
        }
        if let Some(v) = self.featured {
            bouquet.featured = v;
        }
        if let Some(v) = self.active {
            bouquet.active = v;
        }
        if let Some(v) = self.display_order {
            bouquet.display_order = v;
        }
    }
}

/// Boolean bouquet flags the admin can flip with one click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BouquetFlag {
    Active,
    Featured,
}

/// Request body for creating a customization option of any kind.
///
/// Kind-specific fields are checked by [`NewOption::into_draft`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOption {
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
    pub hex_code: Option<String>,
    pub price_modifier: Option<Decimal>,
    #[serde(rename = "type")]
    pub complement_type: Option<ComplementType>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default, rename = "order")]
    pub display_order: i32,
}

/// A validated, kind-specific option ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionDraft {
    Flower {
        name: String,
        price: Decimal,
        active: bool,
        display_order: i32,
    },
    Color {
        name: String,
        hex_code: String,
        price: Decimal,
        active: bool,
        display_order: i32,
    },
    Size {
        name: String,
        price: Decimal,
        price_modifier: Decimal,
        active: bool,
        display_order: i32,
    },
    Complement {
        name: String,
        complement_type: ComplementType,
        price: Decimal,
        active: bool,
        display_order: i32,
    },
}

impl OptionDraft {
    pub fn kind(&self) -> OptionKind {
        match self {
            Self::Flower { .. } => OptionKind::Flowers,
            Self::Color { .. } => OptionKind::Colors,
            Self::Size { .. } => OptionKind::Sizes,
            Self::Complement { .. } => OptionKind::Complements,
        }
    }

    /// Materialize the draft under the given id.
    pub fn into_option(self, id: Uuid) -> CatalogOption {
        match self {
            Self::Flower {
                name,
                price,
                active,
                display_order,
            } => CatalogOption::Flower(FlowerOption {
                id,
                name,
                price,
                active,
                display_order,
            }),
            Self::Color {
                name,
                hex_code,
                price,
                active,
                display_order,
            } => CatalogOption::Color(ColorOption {
                id,
                name,
                hex_code,
                price,
                active,
                display_order,
            }),
            Self::Size {
                name,
                price,
                price_modifier,
                active,
                display_order,
            } => CatalogOption::Size(SizeOption {
                id,
                name,
                price,
                price_modifier,
                active,
                display_order,
            }),
            Self::Complement {
                name,
                complement_type,
                price,
                active,
                display_order,
            } => CatalogOption::Complement(ComplementOption {
                id,
                name,
                complement_type,
                price,
                active,
                display_order,
            }),
        }
    }
}

impl NewOption {
    pub fn into_draft(self, kind: OptionKind) -> Result<OptionDraft, String> {
        require_text("name", &self.name)?;
        require_price("price", self.price)?;
        if let Some(modifier) = self.price_modifier {
            require_modifier(modifier)?;
        }
        let Self {
            name,
            price,
            hex_code,
            price_modifier,
            complement_type,
            active,
            display_order,
        } = self;

        Ok(match kind {
            OptionKind::Flowers => OptionDraft::Flower {
                name,
                price,
                active,
                display_order,
            },
            OptionKind::Colors => {
                let hex_code = hex_code
                    .filter(|hex| !hex.trim().is_empty())
                    .ok_or_else(|| "hexCode is required for colors".to_string())?;
                OptionDraft::Color {
                    name,
                    hex_code,
                    price,
                    active,
                    display_order,
                }
            }
            OptionKind::Sizes => OptionDraft::Size {
                name,
                price,
                price_modifier: price_modifier.unwrap_or(Decimal::ZERO),
                active,
                display_order,
            },
            OptionKind::Complements => OptionDraft::Complement {
                name,
                complement_type: complement_type
                    .ok_or_else(|| "type is required for complements".to_string())?,
                price,
                active,
                display_order,
            },
        })
    }
}

/// Partial option update; fields that do not apply to the target kind are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionPatch {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub hex_code: Option<String>,
    pub price_modifier: Option<Decimal>,
    #[serde(rename = "type")]
    pub complement_type: Option<ComplementType>,
    pub active: Option<bool>,
    #[serde(rename = "order")]
    pub display_order: Option<i32>,
}

impl OptionPatch {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(price) = self.price {
            require_price("price", price)?;
        }
        if let Some(modifier) = self.price_modifier {
            require_modifier(modifier)?;
        }
        if let Some(hex) = &self.hex_code {
            require_text("hexCode", hex)?;
        }
        Ok(())
    }

    pub fn apply(self, option: &mut CatalogOption) {
        match option {
            CatalogOption::Flower(o) => {
                apply_common(&mut o.name, &mut o.price, &mut o.active, &mut o.display_order, &self);
            }
            CatalogOption::Color(o) => {
                apply_common(&mut o.name, &mut o.price, &mut o.active, &mut o.display_order, &self);
                if let Some(hex) = self.hex_code {
                    o.hex_code = hex;
                }
            }
            CatalogOption::Size(o) => {
                apply_common(&mut o.name, &mut o.price, &mut o.active, &mut o.display_order, &self);
                if let Some(modifier) = self.price_modifier {
                    o.price_modifier = modifier;
                }
            }
            CatalogOption::Complement(o) => {
                apply_common(&mut o.name, &mut o.price, &mut o.active, &mut o.display_order, &self);
                if let Some(t) = self.complement_type {
                    o.complement_type = t;
                }
            }
        }
    }
}

fn apply_common(
    name: &mut String,
    price: &mut Decimal,
    active: &mut bool,
    display_order: &mut i32,
    patch: &OptionPatch,
) {
    if let Some(v) = &patch.name {
        *name = v.clone();
    }
    if let Some(v) = patch.price {
        *price = v;
    }
    if let Some(v) = patch.active {
        *active = v;
    }
    if let Some(v) = patch.display_order {
        *display_order = v;
    }
}

/// Request body for creating a customization category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: String,
    #[serde(default)]
    pub allow_multiple: bool,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default, rename = "order")]
    pub display_order: i32,
}

impl NewCategory {
    pub fn validate(&self) -> Result<(), String> {
        require_text("name", &self.name)?;
        require_text("type", &self.category_type)
    }
}

/// Request body for updating a customization category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    pub id: Uuid,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub category_type: Option<String>,
    pub allow_multiple: Option<bool>,
    pub is_required: Option<bool>,
    pub active: Option<bool>,
    #[serde(rename = "order")]
    pub display_order: Option<i32>,
}

impl UpdateCategory {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(t) = &self.category_type {
            require_text("type", t)?;
        }
        Ok(())
    }

    pub fn apply(self, category: &mut CustomizationCategory) {
        if let Some(v) = self.name {
            category.name = v;
        }
        if let Some(v) = self.category_type {
            category.category_type = v;
        }
        if let Some(v) = self.allow_multiple {
            category.allow_multiple = v;
        }
        if let Some(v) = self.is_required {
            category.is_required = v;
        }
        if let Some(v) = self.active {
            category.active = v;
        }
        if let Some(v) = self.display_order {
            category.display_order = v;
        }
    }
}

/// Request body for submitting an order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub total_price: Decimal,
    pub notes: Option<String>,
    pub selected_size_id: Option<Uuid>,
    #[serde(default)]
    pub flowers: Vec<OrderFlowerInput>,
    #[serde(default)]
    pub colors: Vec<OrderColorInput>,
    #[serde(default)]
    pub complements: Vec<OrderComplementInput>,
}

/// A flower line in an order submission.
///
/// `unit_price` is what the client displayed; the persisted snapshot always
/// uses the catalog price at submission time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFlowerInput {
    pub flower_id: Uuid,
    pub quantity: i64,
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderColorInput {
    pub color_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderComplementInput {
    pub complement_id: Uuid,
}

/// Request body for changing an order's status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub id: Uuid,
    pub status: String,
}

/// Partial site settings update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub site_name: Option<String>,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub cta_main_text: Option<String>,
    pub cta_secondary_text: Option<String>,
    pub whatsapp_number: Option<String>,
    pub whatsapp_default_message: Option<String>,
}

impl SettingsPatch {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(number) = &self.whatsapp_number {
            if !number.chars().any(|c| c.is_ascii_digit()) {
                return Err("whatsappNumber must contain digits".to_string());
            }
        }
        if let Some(name) = &self.site_name {
            require_text("siteName", name)?;
        }
        Ok(())
    }

    pub fn apply(self, settings: &mut SiteSettings) {
        if let Some(v) = self.site_name {
            settings.site_name = v;
        }
        if let Some(v) = self.hero_title {
            settings.hero_title = v;
        }
        if let Some(v) = self.hero_subtitle {
            settings.hero_subtitle = v;
        }
        if let Some(v) = self.cta_main_text {
            settings.cta_main_text = v;
        }
        if let Some(v) = self.cta_secondary_text {
            settings.cta_secondary_text = v;
        }
        if let Some(v) = self.whatsapp_number {
            settings.whatsapp_number = v;
        }
        if let Some(v) = self.whatsapp_default_message {
            settings.whatsapp_default_message = v;
        }
    }
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    Ok(())
}

/// Largest amount a `NUMERIC(10, 2)` money column holds.
pub(crate) fn max_price() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

pub(crate) fn require_price(field: &str, value: Decimal) -> Result<(), String> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(format!("{field} must not be negative"));
    }
    if value > max_price() {
        return Err(format!("{field} must not exceed {}", max_price()));
    }
    Ok(())
}

fn require_modifier(value: Decimal) -> Result<(), String> {
    if value.abs() > max_price() {
        return Err(format!("priceModifier must not exceed {}", max_price()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_parses_all_six_values() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn new_option_requires_kind_specific_fields() {
        let color = NewOption {
            name: "Lilás".into(),
            price: Decimal::new(500, 2),
            hex_code: None,
            price_modifier: None,
            complement_type: None,
            active: true,
            display_order: 6,
        };
        assert!(color.clone().into_draft(OptionKind::Colors).is_err());
        assert!(color.clone().into_draft(OptionKind::Complements).is_err());
        assert_eq!(
            color.into_draft(OptionKind::Flowers).unwrap().kind(),
            OptionKind::Flowers
        );
    }

    #[test]
    fn negative_prices_are_rejected() {
        let patch = BouquetPatch {
            price: Some(Decimal::new(-1, 2)),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
        assert!(require_price("price", Decimal::ZERO).is_ok());
    }

    #[test]
    fn prices_beyond_the_column_range_are_rejected() {
        assert!(require_price("price", Decimal::new(9_999_999_999, 2)).is_ok());
        assert!(require_price("price", Decimal::new(10_000_000_000, 2)).is_err());

        let patch = BouquetPatch {
            price: Some(Decimal::new(100_000_000, 0)),
            ..Default::default()
        };
        assert!(patch.validate().unwrap_err().contains("must not exceed"));

        let patch = OptionPatch {
            price_modifier: Some(Decimal::new(-100_000_000, 0)),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn order_serializes_flat_with_camel_case() {
        let order = Order {
            header: OrderHeader {
                id: Uuid::nil(),
                customer_name: "Ana".into(),
                customer_phone: "11999990000".into(),
                total_price: Decimal::new(3960, 2),
                status: OrderStatus::Pending,
                notes: None,
                selected_size_id: None,
                created_at: chrono::DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
            },
            flowers: vec![],
            colors: vec![],
            complements: vec![],
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["customerName"], "Ana");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["totalPrice"], 39.6);
        assert!(json["flowers"].as_array().unwrap().is_empty());
    }
}
