//! # Domain Types
//!
//! Catalog types used throughout PCForge.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌──────────────────────────────────────┐   │
//! │  │   Component     │        │   Compatibility (tagged union)       │   │
//! │  │  ─────────────  │        │  ──────────────────────────────────  │   │
//! │  │  id             │        │  Cpu(ProcessorSpec)   socket, tdp    │   │
//! │  │  name           │        │  Motherboard(..)      socket, ram,   │   │
//! │  │  category ──────┼──┐     │                       form factor    │   │
//! │  │  price_cents    │  │     │  Ram(MemorySpec)      type, MHz      │   │
//! │  │  allow_in_      │  │     │  Gpu(GpuSpec)         length, PSU W  │   │
//! │  │   configurator  │  │     │  Case(CaseSpec)       max GPU, forms │   │
//! │  │  compatibility ─┼──┼────►│  Psu(PsuSpec)         wattage        │   │
//! │  └─────────────────┘  │     │  Cooling(CoolingSpec) socket?        │   │
//! │                       │     │  Storage(StorageSpec) kind, GB       │   │
//! │                       ▼     └──────────────────────────────────────┘   │
//! │  ┌───────────────────────────────────────┐                             │
//! │  │ Category                              │                             │
//! │  │ cpu motherboard ram gpu storage psu   │ ← build slots               │
//! │  │ case cooling                          │                             │
//! │  │ prebuilt peripheral                   │ ← catalogue only            │
//! │  └───────────────────────────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each attribute bag variant carries only the fields its category needs,
//! so the compatibility rules never probe for fields that cannot exist.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// Category tag of a catalog entry.
///
/// The first eight variants are the configurator build slots, in the order
/// the configurator presents them. Variant order drives `Ord`, so maps keyed
/// by category iterate in slot order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Processor.
    Cpu,
    Motherboard,
    /// Memory modules.
    Ram,
    /// Graphics card.
    Gpu,
    Storage,
    /// Power supply.
    Psu,
    Case,
    Cooling,
    /// Assembled PC sold as a single product.
    Prebuilt,
    Peripheral,
}

impl Category {
    /// The fixed list of slots a complete build must fill.
    pub const BUILD_SLOTS: [Category; 8] = [
        Category::Cpu,
        Category::Motherboard,
        Category::Ram,
        Category::Gpu,
        Category::Storage,
        Category::Psu,
        Category::Case,
        Category::Cooling,
    ];

    /// Every category, build slots first.
    pub const ALL: [Category; 10] = [
        Category::Cpu,
        Category::Motherboard,
        Category::Ram,
        Category::Gpu,
        Category::Storage,
        Category::Psu,
        Category::Case,
        Category::Cooling,
        Category::Prebuilt,
        Category::Peripheral,
    ];

    /// Wire name, identical to the serde representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Cpu => "cpu",
            Category::Motherboard => "motherboard",
            Category::Ram => "ram",
            Category::Gpu => "gpu",
            Category::Storage => "storage",
            Category::Psu => "psu",
            Category::Case => "case",
            Category::Cooling => "cooling",
            Category::Prebuilt => "prebuilt",
            Category::Peripheral => "peripheral",
        }
    }

    /// Human-readable name used in notices and slot headers.
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Cpu => "processor",
            Category::Motherboard => "motherboard",
            Category::Ram => "memory",
            Category::Gpu => "graphics card",
            Category::Storage => "storage",
            Category::Psu => "power supply",
            Category::Case => "case",
            Category::Cooling => "cooling",
            Category::Prebuilt => "prebuilt PC",
            Category::Peripheral => "peripheral",
        }
    }

    /// Whether this category is one of the configurator build slots.
    pub fn is_build_slot(&self) -> bool {
        Category::BUILD_SLOTS.contains(self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Hardware Enumerations
// =============================================================================

/// Processor socket standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Socket {
    #[serde(rename = "AM4")]
    Am4,
    #[serde(rename = "AM5")]
    Am5,
    #[serde(rename = "LGA1200")]
    Lga1200,
    #[serde(rename = "LGA1700")]
    Lga1700,
    #[serde(rename = "LGA1851")]
    Lga1851,
}

impl Socket {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Socket::Am4 => "AM4",
            Socket::Am5 => "AM5",
            Socket::Lga1200 => "LGA1200",
            Socket::Lga1700 => "LGA1700",
            Socket::Lga1851 => "LGA1851",
        }
    }
}

impl fmt::Display for Socket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Memory generation supported by a motherboard or provided by a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MemoryType {
    #[serde(rename = "DDR4")]
    Ddr4,
    #[serde(rename = "DDR5")]
    Ddr5,
}

impl MemoryType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MemoryType::Ddr4 => "DDR4",
            MemoryType::Ddr5 => "DDR5",
        }
    }
}

impl fmt::Display for MemoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Motherboard size standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum FormFactor {
    #[serde(rename = "ATX")]
    Atx,
    #[serde(rename = "Micro-ATX")]
    MicroAtx,
    #[serde(rename = "Mini-ITX")]
    MiniItx,
}

impl FormFactor {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FormFactor::Atx => "ATX",
            FormFactor::MicroAtx => "Micro-ATX",
            FormFactor::MiniItx => "Mini-ITX",
        }
    }
}

impl fmt::Display for FormFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage device technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum StorageKind {
    #[serde(rename = "M.2 NVMe")]
    NvmeM2,
    #[serde(rename = "SATA SSD")]
    SataSsd,
    #[serde(rename = "HDD 3.5")]
    Hdd,
}

impl StorageKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            StorageKind::NvmeM2 => "M.2 NVMe",
            StorageKind::SataSsd => "SATA SSD",
            StorageKind::Hdd => "HDD 3.5",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Compatibility Attribute Bag
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProcessorSpec {
    pub socket: Socket,
    /// Thermal design power in watts. Absent counts as 0 W.
    #[serde(default)]
    pub tdp_watts: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MotherboardSpec {
    pub socket: Socket,
    pub memory_type: MemoryType,
    pub form_factor: FormFactor,
    #[serde(default)]
    pub chipset: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MemorySpec {
    pub memory_type: MemoryType,
    pub frequency_mhz: u32,
    #[serde(default)]
    pub capacity_gb: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GpuSpec {
    /// Physical card length in millimetres.
    pub length_mm: u32,
    /// Vendor-recommended system PSU rating, not the card's own draw.
    pub recommended_psu_watts: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CaseSpec {
    pub max_gpu_length_mm: u32,
    /// Older records store a single form factor instead of a list.
    #[serde(deserialize_with = "one_or_many")]
    pub supported_form_factors: Vec<FormFactor>,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<FormFactor>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(FormFactor),
        Many(Vec<FormFactor>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(form_factor) => vec![form_factor],
        OneOrMany::Many(form_factors) => form_factors,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PsuSpec {
    pub wattage: u32,
    #[serde(default)]
    pub modularity: Option<String>,
}

/// Cooler attributes. A cooler without a socket is universal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CoolingSpec {
    #[serde(default)]
    pub socket: Option<Socket>,
    #[serde(default)]
    pub radiator_size_mm: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StorageSpec {
    pub kind: StorageKind,
    pub capacity_gb: u32,
}

/// Category-specific compatibility attributes.
///
/// Serialized internally tagged, e.g.
/// `{"kind":"cpu","socket":"AM5","tdp_watts":120}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Compatibility {
    Cpu(ProcessorSpec),
    Motherboard(MotherboardSpec),
    Ram(MemorySpec),
    Gpu(GpuSpec),
    Storage(StorageSpec),
    Psu(PsuSpec),
    Case(CaseSpec),
    Cooling(CoolingSpec),
}

impl Compatibility {
    /// The category this attribute bag belongs to.
    pub const fn category(&self) -> Category {
        match self {
            Compatibility::Cpu(_) => Category::Cpu,
            Compatibility::Motherboard(_) => Category::Motherboard,
            Compatibility::Ram(_) => Category::Ram,
            Compatibility::Gpu(_) => Category::Gpu,
            Compatibility::Storage(_) => Category::Storage,
            Compatibility::Psu(_) => Category::Psu,
            Compatibility::Case(_) => Category::Case,
            Compatibility::Cooling(_) => Category::Cooling,
        }
    }
}

// =============================================================================
// Component
// =============================================================================

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Component {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    pub category: Category,

    /// Price in cents.
    pub price_cents: i64,

    /// Previous price shown struck through, in cents.
    pub original_price_cents: Option<i64>,

    pub image_url: Option<String>,

    /// Marketing badge ("Nouveau", "Promo", ...).
    pub badge: Option<String>,

    pub description: Option<String>,

    pub in_stock: bool,

    /// Average review score, 0 to 5.
    pub rating: f64,

    pub review_count: i64,

    /// Whether the configurator may offer this component.
    pub allow_in_configurator: bool,

    /// Compatibility attributes; `None` means no data, never an error.
    pub compatibility: Option<Compatibility>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Component {
    /// Creates an in-stock, configurator-enabled component with no attributes.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        price: Money,
    ) -> Self {
        let now = Utc::now();
        Component {
            id: id.into(),
            name: name.into(),
            category,
            price_cents: price.cents(),
            original_price_cents: None,
            image_url: None,
            badge: None,
            description: None,
            in_stock: true,
            rating: 0.0,
            review_count: 0,
            allow_in_configurator: true,
            compatibility: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attaches a compatibility attribute bag.
    pub fn with_compatibility(mut self, compatibility: Compatibility) -> Self {
        self.compatibility = Some(compatibility);
        self
    }

    /// Sets whether the configurator may offer this component.
    pub fn configurable(mut self, allow: bool) -> Self {
        self.allow_in_configurator = allow;
        self
    }

    /// Returns the price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Whether the configurator may offer this component in `category`.
    pub fn offerable_in(&self, category: Category) -> bool {
        self.allow_in_configurator && self.category == category
    }

    pub fn processor(&self) -> Option<&ProcessorSpec> {
        match &self.compatibility {
            Some(Compatibility::Cpu(spec)) => Some(spec),
            _ => None,
        }
    }

    pub fn motherboard(&self) -> Option<&MotherboardSpec> {
        match &self.compatibility {
            Some(Compatibility::Motherboard(spec)) => Some(spec),
            _ => None,
        }
    }

    pub fn memory(&self) -> Option<&MemorySpec> {
        match &self.compatibility {
            Some(Compatibility::Ram(spec)) => Some(spec),
            _ => None,
        }
    }

    pub fn graphics_card(&self) -> Option<&GpuSpec> {
        match &self.compatibility {
            Some(Compatibility::Gpu(spec)) => Some(spec),
            _ => None,
        }
    }

    pub fn case(&self) -> Option<&CaseSpec> {
        match &self.compatibility {
            Some(Compatibility::Case(spec)) => Some(spec),
            _ => None,
        }
    }

    pub fn power_supply(&self) -> Option<&PsuSpec> {
        match &self.compatibility {
            Some(Compatibility::Psu(spec)) => Some(spec),
            _ => None,
        }
    }

    pub fn cooling(&self) -> Option<&CoolingSpec> {
        match &self.compatibility {
            Some(Compatibility::Cooling(spec)) => Some(spec),
            _ => None,
        }
    }

    pub fn storage(&self) -> Option<&StorageSpec> {
        match &self.compatibility {
            Some(Compatibility::Storage(spec)) => Some(spec),
            _ => None,
        }
    }

    /// One-line technical label shown under the product name.
    ///
    /// ## Example
    /// ```rust
    /// use pcforge_core::{Category, Compatibility, Component, Money, ProcessorSpec, Socket};
    ///
    /// let cpu = Component::new("c1", "Ryzen 7 7800X3D", Category::Cpu, Money::from_cents(44900))
    ///     .with_compatibility(Compatibility::Cpu(ProcessorSpec {
    ///         socket: Socket::Am5,
    ///         tdp_watts: Some(120),
    ///     }));
    /// assert_eq!(cpu.spec_summary(), "AM5 | 120W");
    /// ```
    pub fn spec_summary(&self) -> String {
        match &self.compatibility {
            None => String::new(),
            Some(Compatibility::Cpu(c)) => match c.tdp_watts {
                Some(tdp) => format!("{} | {}W", c.socket, tdp),
                None => c.socket.to_string(),
            },
            Some(Compatibility::Motherboard(m)) => {
                format!("{} | {} | {}", m.socket, m.memory_type, m.form_factor)
            }
            Some(Compatibility::Ram(r)) => format!("{} | {}MHz", r.memory_type, r.frequency_mhz),
            Some(Compatibility::Gpu(g)) => {
                format!("{}mm | PSU {}W", g.length_mm, g.recommended_psu_watts)
            }
            Some(Compatibility::Case(c)) => format!("GPU Max {}mm", c.max_gpu_length_mm),
            Some(Compatibility::Psu(p)) => format!("{}W", p.wattage),
            Some(Compatibility::Storage(s)) => format!("{} | {}GB", s.kind, s.capacity_gb),
            Some(Compatibility::Cooling(c)) => match c.socket {
                Some(socket) => socket.to_string(),
                None => "Universal".to_string(),
            },
        }
    }
}

// =============================================================================
// Component Draft
// =============================================================================

/// Product form submitted by the admin editor.
///
/// Validated by [`crate::validation::validate_draft`] before it reaches the
/// repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDraft {
    pub name: String,
    pub category: Category,
    pub price_cents: i64,
    #[serde(default)]
    pub original_price_cents: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    /// `None` on a new product means [`DEFAULT_RATING`].
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default = "default_true")]
    pub allow_in_configurator: bool,
    #[serde(default)]
    pub compatibility: Option<Compatibility>,
}

/// Rating given to products created without one.
pub const DEFAULT_RATING: f64 = 5.0;

fn default_true() -> bool {
    true
}

impl ComponentDraft {
    pub fn new(name: impl Into<String>, category: Category, price: Money) -> Self {
        ComponentDraft {
            name: name.into(),
            category,
            price_cents: price.cents(),
            original_price_cents: None,
            image_url: None,
            badge: None,
            description: None,
            in_stock: true,
            rating: None,
            allow_in_configurator: true,
            compatibility: None,
        }
    }

    pub fn with_compatibility(mut self, compatibility: Compatibility) -> Self {
        self.compatibility = Some(compatibility);
        self
    }

    /// Builds a fresh catalog entry with the given ID.
    pub fn into_component(self, id: impl Into<String>) -> Component {
        let now = Utc::now();
        Component {
            id: id.into(),
            name: self.name.trim().to_string(),
            category: self.category,
            price_cents: self.price_cents,
            original_price_cents: self.original_price_cents,
            image_url: self.image_url,
            badge: self.badge,
            description: self.description,
            in_stock: self.in_stock,
            rating: self.rating.unwrap_or(DEFAULT_RATING),
            review_count: 0,
            allow_in_configurator: self.allow_in_configurator,
            compatibility: self.compatibility,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the form onto an existing entry, keeping its ID, review count
    /// and creation time. A missing rating keeps the current one.
    pub fn apply_to(self, existing: &Component) -> Component {
        Component {
            id: existing.id.clone(),
            name: self.name.trim().to_string(),
            category: self.category,
            price_cents: self.price_cents,
            original_price_cents: self.original_price_cents,
            image_url: self.image_url,
            badge: self.badge,
            description: self.description,
            in_stock: self.in_stock,
            rating: self.rating.unwrap_or(existing.rating),
            review_count: existing.review_count,
            allow_in_configurator: self.allow_in_configurator,
            compatibility: self.compatibility,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
