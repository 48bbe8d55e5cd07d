//! # Build Session
//!
//! One user's in-progress configuration: a catalog snapshot plus the
//! selection, with every derived view recomputed on demand.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  BuildSession::new(catalog)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  select(cpu, "…") ──► select(motherboard, "…") ──► … (8 slots)          │
//! │       │                     │                                           │
//! │       │                     └── may return notices (cascade)            │
//! │       ▼                                                                 │
//! │  view() ──► option sets, power, total, completion                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  composite_line() ──► one cart line "PC Gamer Custom (<cpu>)"           │
//! │                                                                         │
//! │  replace_catalog(fresh) at any point drops vanished picks               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::NewCartLine;
use crate::catalog::Catalog;
use crate::compat::{
    is_compatible, option_sets, prune_unavailable, validate_and_prune, Notice, OptionSets,
    PowerReport, SelectedParts, Selection,
};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Category, Component};
use crate::COMPOSITE_BUILD_PREFIX;

/// Name used when the build has no processor name to show.
const FALLBACK_BUILD_NAME: &str = "Config";

// =============================================================================
// Session
// =============================================================================

/// A catalog snapshot and the picks made against it.
#[derive(Debug, Clone, Default)]
pub struct BuildSession {
    catalog: Catalog,
    selection: Selection,
}

impl BuildSession {
    pub fn new(catalog: Catalog) -> Self {
        BuildSession {
            catalog,
            selection: Selection::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    fn parts(&self) -> SelectedParts<'_> {
        SelectedParts::resolve(&self.catalog, &self.selection)
    }

    /// Commits a pick and runs the cascade.
    ///
    /// ## Errors
    /// - `NotABuildSlot`: prebuilt or peripheral category
    /// - `ComponentNotFound`: unknown ID
    /// - `WrongCategory`: the component belongs to another slot
    /// - `NotConfigurable`: the component is hidden from the configurator
    /// - `Incompatible`: the component is not in the slot's option set
    ///
    /// Re-selecting the current pick is a no-op.
    pub fn select(&mut self, category: Category, component_id: &str) -> CoreResult<Vec<Notice>> {
        if !category.is_build_slot() {
            return Err(CoreError::NotABuildSlot(category));
        }

        let component = self
            .catalog
            .get(component_id)
            .ok_or_else(|| CoreError::ComponentNotFound(component_id.to_string()))?;

        if component.category != category {
            return Err(CoreError::WrongCategory {
                component_id: component_id.to_string(),
                expected: category,
                actual: component.category,
            });
        }
        if !component.allow_in_configurator {
            return Err(CoreError::NotConfigurable(component_id.to_string()));
        }
        if self.selection.get(category) == Some(component_id) {
            return Ok(Vec::new());
        }
        if !is_compatible(component, &self.parts()) {
            return Err(CoreError::Incompatible {
                component_id: component_id.to_string(),
                category,
            });
        }

        let mut selection = std::mem::take(&mut self.selection);
        selection.insert(category, component_id);
        let (selection, notices) = validate_and_prune(selection, &self.catalog, category);
        self.selection = selection;
        Ok(notices)
    }

    /// Clears one slot. Never cascades.
    pub fn deselect(&mut self, category: Category) -> Option<String> {
        self.selection.remove(category)
    }

    /// Clears every slot.
    pub fn clear(&mut self) {
        self.selection.clear();
    }

    /// Swaps in a fresh catalog snapshot.
    pub fn replace_catalog(&mut self, catalog: Catalog) -> Vec<Notice> {
        let selection = std::mem::take(&mut self.selection);
        let (selection, notices) = prune_unavailable(selection, &catalog);
        self.catalog = catalog;
        self.selection = selection;
        notices
    }

    pub fn option_sets(&self) -> OptionSets {
        option_sets(&self.catalog, &self.selection)
    }

    pub fn power(&self) -> PowerReport {
        PowerReport::from_parts(&self.parts())
    }

    pub fn total_price(&self) -> Money {
        self.parts().total_price()
    }

    pub fn is_complete(&self) -> bool {
        self.selection.is_complete()
    }

    /// Full snapshot for rendering the configurator page.
    pub fn view(&self) -> BuildView {
        let parts = self.parts();
        let mut options = self.option_sets();

        let slots = Category::BUILD_SLOTS
            .into_iter()
            .map(|category| SlotView {
                category,
                label: category.label().to_string(),
                selected: parts.get(category).cloned(),
                options: options.remove(&category).unwrap_or_default(),
            })
            .collect();

        BuildView {
            slots,
            power: PowerReport::from_parts(&parts),
            total_cents: parts.total_price().cents(),
            selected_count: self.selection.len(),
            complete: self.selection.is_complete(),
            missing: self.selection.missing_slots(),
        }
    }

    /// The whole build as one cart line, priced at the build total.
    ///
    /// ## Example
    /// ```rust
    /// use pcforge_core::{BuildSession, Catalog, CoreError};
    ///
    /// let session = BuildSession::new(Catalog::default());
    /// assert!(matches!(
    ///     session.composite_line(),
    ///     Err(CoreError::BuildIncomplete { .. })
    /// ));
    /// ```
    pub fn composite_line(&self) -> CoreResult<NewCartLine> {
        if !self.selection.is_complete() {
            return Err(CoreError::BuildIncomplete {
                missing: self.selection.missing_slots(),
            });
        }

        let parts = self.parts();
        let cpu_name = parts
            .get(Category::Cpu)
            .map(|c| c.name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_BUILD_NAME);

        Ok(NewCartLine {
            product_name: format!("{} ({})", COMPOSITE_BUILD_PREFIX, cpu_name),
            image_url: None,
            unit_price_cents: parts.total_price().cents(),
            quantity: 1,
        })
    }
}

// =============================================================================
// Views
// =============================================================================

/// One configurator slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub category: Category,
    pub label: String,
    pub selected: Option<Component>,
    pub options: Vec<Component>,
}

/// Everything the configurator page shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BuildView {
    pub slots: Vec<SlotView>,
    pub power: PowerReport,
    pub total_cents: i64,
    pub selected_count: usize,
    pub complete: bool,
    pub missing: Vec<Category>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        CaseSpec, Compatibility, CoolingSpec, FormFactor, GpuSpec, MemorySpec, MemoryType,
        MotherboardSpec, ProcessorSpec, PsuSpec, Socket,
    };

    fn catalog() -> Catalog {
        let c = |id: &str, name: &str, category, cents, bag| {
            Component::new(id, name, category, Money::from_cents(cents)).with_compatibility(bag)
        };
        Catalog::new(vec![
            c("cpu1", "Ryzen 7 7800X3D", Category::Cpu, 44900, Compatibility::Cpu(ProcessorSpec {
                socket: Socket::Am5,
                tdp_watts: Some(120),
            })),
            c("cpu2", "Core i5-12400F", Category::Cpu, 14900, Compatibility::Cpu(ProcessorSpec {
                socket: Socket::Lga1700,
                tdp_watts: Some(65),
            })),
            c("mb1", "B650 Tomahawk", Category::Motherboard, 21900, Compatibility::Motherboard(MotherboardSpec {
                socket: Socket::Am5,
                memory_type: MemoryType::Ddr5,
                form_factor: FormFactor::Atx,
                chipset: Some("B650".to_string()),
            })),
            c("mb2", "B760M DDR4", Category::Motherboard, 12900, Compatibility::Motherboard(MotherboardSpec {
                socket: Socket::Lga1700,
                memory_type: MemoryType::Ddr4,
                form_factor: FormFactor::MicroAtx,
                chipset: None,
            })),
            c("ram1", "32GB DDR5-6000", Category::Ram, 11900, Compatibility::Ram(MemorySpec {
                memory_type: MemoryType::Ddr5,
                frequency_mhz: 6000,
                capacity_gb: Some(32),
            })),
            c("gpu1", "RTX 4070", Category::Gpu, 59900, Compatibility::Gpu(GpuSpec {
                length_mm: 300,
                recommended_psu_watts: 650,
            })),
            Component::new("ssd1", "990 Pro 2TB", Category::Storage, Money::from_cents(17900)),
            c("psu1", "RM850x", Category::Psu, 13900, Compatibility::Psu(PsuSpec {
                wattage: 850,
                modularity: None,
            })),
            c("psu2", "CV450", Category::Psu, 4500, Compatibility::Psu(PsuSpec {
                wattage: 450,
                modularity: None,
            })),
            c("case1", "Lancool 216", Category::Case, 9900, Compatibility::Case(CaseSpec {
                max_gpu_length_mm: 392,
                supported_form_factors: vec![FormFactor::Atx, FormFactor::MicroAtx],
            })),
            c("cool1", "AK620", Category::Cooling, 6500, Compatibility::Cooling(CoolingSpec::default())),
            Component::new("pc1", "PC Gamer Nova", Category::Prebuilt, Money::from_cents(199900)),
        ])
    }

    fn full_build() -> BuildSession {
        let mut session = BuildSession::new(catalog());
        for (category, id) in [
            (Category::Cpu, "cpu1"),
            (Category::Motherboard, "mb1"),
            (Category::Ram, "ram1"),
            (Category::Gpu, "gpu1"),
            (Category::Storage, "ssd1"),
            (Category::Psu, "psu1"),
            (Category::Case, "case1"),
            (Category::Cooling, "cool1"),
        ] {
            session.select(category, id).unwrap();
        }
        session
    }

    #[test]
    fn test_select_rejections() {
        let mut session = BuildSession::new(catalog());

        assert!(matches!(
            session.select(Category::Prebuilt, "pc1"),
            Err(CoreError::NotABuildSlot(Category::Prebuilt))
        ));
        assert!(matches!(
            session.select(Category::Cpu, "nope"),
            Err(CoreError::ComponentNotFound(_))
        ));
        assert!(matches!(
            session.select(Category::Cpu, "gpu1"),
            Err(CoreError::WrongCategory { .. })
        ));

        session.select(Category::Gpu, "gpu1").unwrap();
        assert!(matches!(
            session.select(Category::Psu, "psu2"),
            Err(CoreError::Incompatible { .. })
        ));
        assert!(session.selection().get(Category::Psu).is_none());
    }

    #[test]
    fn test_processor_swap_cascades_with_one_notice() {
        let mut session = BuildSession::new(catalog());
        session.select(Category::Cpu, "cpu1").unwrap();
        session.select(Category::Motherboard, "mb1").unwrap();
        session.select(Category::Ram, "ram1").unwrap();

        let notices = session.select(Category::Cpu, "cpu2").unwrap();

        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].removed(), vec![Category::Motherboard, Category::Ram]);
        assert_eq!(session.selection().len(), 1);
    }

    #[test]
    fn test_reselect_same_component_is_noop() {
        let mut session = BuildSession::new(catalog());
        session.select(Category::Cpu, "cpu1").unwrap();
        session.select(Category::Motherboard, "mb1").unwrap();
        assert!(session.select(Category::Cpu, "cpu1").unwrap().is_empty());
        assert_eq!(session.selection().get(Category::Motherboard), Some("mb1"));
    }

    #[test]
    fn test_view_reports_progress() {
        let mut session = BuildSession::new(catalog());
        session.select(Category::Cpu, "cpu1").unwrap();
        session.select(Category::Gpu, "gpu1").unwrap();

        let view = session.view();
        assert_eq!(view.slots.len(), 8);
        assert_eq!(view.selected_count, 2);
        assert!(!view.complete);
        assert_eq!(view.missing.len(), 6);
        assert_eq!(view.total_cents, 44900 + 59900);
        assert_eq!(view.power.estimated_watts, 120 + 100 + 390);

        let boards: Vec<_> = view.slots[1].options.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(boards, vec!["mb1"]);
        assert_eq!(view.slots[0].selected.as_ref().map(|c| c.id.as_str()), Some("cpu1"));
    }

    #[test]
    fn test_composite_line_for_complete_build() {
        let session = full_build();
        assert!(session.is_complete());

        let line = session.composite_line().unwrap();
        assert_eq!(line.product_name, "PC Gamer Custom (Ryzen 7 7800X3D)");
        assert_eq!(line.quantity, 1);
        assert_eq!(
            line.unit_price_cents,
            44900 + 21900 + 11900 + 59900 + 17900 + 13900 + 9900 + 6500
        );
    }

    #[test]
    fn test_longest_processor_name_still_reaches_the_cart() {
        let long_name = "R".repeat(200);
        let mut draft = crate::types::ComponentDraft::new(
            long_name.clone(),
            Category::Cpu,
            Money::from_cents(44900),
        );
        draft.compatibility = Some(Compatibility::Cpu(ProcessorSpec {
            socket: Socket::Am5,
            tdp_watts: Some(120),
        }));
        crate::validation::validate_draft(&draft).unwrap();

        let renamed: Vec<Component> = catalog()
            .into_components()
            .into_iter()
            .map(|mut c| {
                if c.id == "cpu1" {
                    c.name = long_name.clone();
                }
                c
            })
            .collect();
        let mut session = full_build();
        session.replace_catalog(Catalog::new(renamed));
        assert!(session.is_complete());

        let mut cart = crate::cart::Cart::new();
        let line = cart.add_line(session.composite_line().unwrap()).unwrap();
        assert_eq!(line.product_name, format!("PC Gamer Custom ({})", long_name));
    }

    #[test]
    fn test_composite_line_requires_every_slot() {
        let mut session = full_build();
        session.deselect(Category::Cooling);
        match session.composite_line() {
            Err(CoreError::BuildIncomplete { missing }) => {
                assert_eq!(missing, vec![Category::Cooling])
            }
            other => panic!("expected BuildIncomplete, got {:?}", other),
        }
    }

    #[test]
    fn test_replace_catalog_drops_vanished_picks() {
        let mut session = full_build();
        let fresh: Vec<Component> = catalog()
            .into_components()
            .into_iter()
            .filter(|c| c.id != "gpu1")
            .map(|c| if c.id == "ssd1" { c.configurable(false) } else { c })
            .collect();

        let notices = session.replace_catalog(Catalog::new(fresh));

        assert_eq!(notices.len(), 2);
        assert!(session.selection().get(Category::Gpu).is_none());
        assert!(session.selection().get(Category::Storage).is_none());
        assert_eq!(session.selection().len(), 6);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut session = full_build();
        session.clear();
        assert!(session.selection().is_empty());
        assert_eq!(session.total_price(), Money::zero());
        assert_eq!(session.power().estimated_watts, 100);
    }
}
