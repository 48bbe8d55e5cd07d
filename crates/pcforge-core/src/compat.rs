//! # Compatibility Engine
//!
//! Pure derivations from (catalog, selection): per-slot option sets, the
//! power estimate, completion, and the post-commit pruning pass.
//!
//! ## Rule Table
//! ```text
//! ┌──────────────┬──────────────────────────────────────────────────────────┐
//! │ Slot         │ Offered only if (each check skipped when referent absent)│
//! ├──────────────┼──────────────────────────────────────────────────────────┤
//! │ motherboard  │ board.socket == cpu.socket                               │
//! │ ram          │ ram.memory_type == board.memory_type                     │
//! │ case         │ board.form_factor ∈ case.supported_form_factors          │
//! │              │ AND gpu.length_mm <= case.max_gpu_length_mm              │
//! │ gpu          │ gpu.length_mm <= case.max_gpu_length_mm                  │
//! │ psu          │ psu.wattage >= gpu.recommended_psu_watts                 │
//! │ cooling      │ cooler.socket == cpu.socket (no socket = universal)      │
//! │ cpu, storage │ always                                                   │
//! └──────────────┴──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recompute Cycle
//! ```text
//!   select(slot, id)
//!        │
//!        ▼
//!   commit into Selection
//!        │
//!        ▼
//!   validate_and_prune(selection, catalog, slot)   ← cpu / motherboard only
//!        │            │
//!        │            └──► notices ──► notification surface
//!        ▼
//!   option_sets() + estimate_power()               ← full recompute, no cache
//! ```
//!
//! Nothing here keeps state between calls: the same inputs always yield the
//! same outputs.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::money::Money;
use crate::types::{CaseSpec, Category, Component, GpuSpec, MotherboardSpec, ProcessorSpec};
use crate::{BASE_SYSTEM_WATTS, GPU_DRAW_PERCENT};

// =============================================================================
// Selection
// =============================================================================

/// The user's picks: at most one component ID per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Selection(BTreeMap<Category, String>);

impl Selection {
    pub fn new() -> Self {
        Selection(BTreeMap::new())
    }

    pub fn get(&self, category: Category) -> Option<&str> {
        self.0.get(&category).map(String::as_str)
    }

    /// Sets the pick for a slot, returning the previous one.
    pub fn insert(&mut self, category: Category, component_id: impl Into<String>) -> Option<String> {
        self.0.insert(category, component_id.into())
    }

    pub fn remove(&mut self, category: Category) -> Option<String> {
        self.0.remove(&category)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0.contains_key(&category)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &str)> {
        self.0.iter().map(|(c, id)| (*c, id.as_str()))
    }

    /// Build slots with no pick, in slot order.
    pub fn missing_slots(&self) -> Vec<Category> {
        Category::BUILD_SLOTS
            .into_iter()
            .filter(|c| !self.contains(*c))
            .collect()
    }

    /// A build is complete when every build slot has exactly one pick.
    pub fn is_complete(&self) -> bool {
        Category::BUILD_SLOTS.iter().all(|c| self.contains(*c))
    }
}

impl FromIterator<(Category, String)> for Selection {
    fn from_iter<I: IntoIterator<Item = (Category, String)>>(iter: I) -> Self {
        Selection(iter.into_iter().collect())
    }
}

// =============================================================================
// Selected Parts
// =============================================================================

/// A selection resolved against a catalog snapshot.
///
/// IDs that no longer exist in the catalog are skipped, so they constrain
/// nothing and contribute nothing to prices or power.
#[derive(Debug, Clone, Default)]
pub struct SelectedParts<'a> {
    parts: BTreeMap<Category, &'a Component>,
}

impl<'a> SelectedParts<'a> {
    pub fn resolve(catalog: &'a Catalog, selection: &Selection) -> Self {
        let parts = selection
            .iter()
            .filter_map(|(category, id)| catalog.get(id).map(|component| (category, component)))
            .collect();
        SelectedParts { parts }
    }

    pub fn get(&self, category: Category) -> Option<&'a Component> {
        self.parts.get(&category).copied()
    }

    pub fn processor(&self) -> Option<&'a ProcessorSpec> {
        self.get(Category::Cpu).and_then(Component::processor)
    }

    pub fn motherboard(&self) -> Option<&'a MotherboardSpec> {
        self.get(Category::Motherboard).and_then(Component::motherboard)
    }

    pub fn graphics_card(&self) -> Option<&'a GpuSpec> {
        self.get(Category::Gpu).and_then(Component::graphics_card)
    }

    pub fn case(&self) -> Option<&'a CaseSpec> {
        self.get(Category::Case).and_then(Component::case)
    }

    /// Exact sum of the selected prices.
    pub fn total_price(&self) -> Money {
        self.parts.values().map(|c| c.price()).sum()
    }
}

// =============================================================================
// Compatibility Predicate
// =============================================================================

/// Checks a candidate against the picks in the *other* slots.
///
/// A rule whose referent is not selected (or carries no attributes) is
/// vacuously satisfied. A candidate without the attribute an equality rule
/// needs cannot be shown compatible and is excluded; a candidate without a
/// size or wattage bound is not limited by it.
pub fn is_compatible(candidate: &Component, parts: &SelectedParts<'_>) -> bool {
    match candidate.category {
        Category::Motherboard => match parts.processor() {
            Some(cpu) => candidate
                .motherboard()
                .is_some_and(|board| board.socket == cpu.socket),
            None => true,
        },

        Category::Ram => match parts.motherboard() {
            Some(board) => candidate
                .memory()
                .is_some_and(|ram| ram.memory_type == board.memory_type),
            None => true,
        },

        Category::Case => {
            let fits_board = match parts.motherboard() {
                Some(board) => candidate
                    .case()
                    .is_some_and(|case| case.supported_form_factors.contains(&board.form_factor)),
                None => true,
            };
            let fits_gpu = match (parts.graphics_card(), candidate.case()) {
                (Some(gpu), Some(case)) => gpu.length_mm <= case.max_gpu_length_mm,
                _ => true,
            };
            fits_board && fits_gpu
        }

        Category::Gpu => match (parts.case(), candidate.graphics_card()) {
            (Some(case), Some(gpu)) => gpu.length_mm <= case.max_gpu_length_mm,
            _ => true,
        },

        Category::Psu => match (parts.graphics_card(), candidate.power_supply()) {
            (Some(gpu), Some(psu)) => psu.wattage >= gpu.recommended_psu_watts,
            _ => true,
        },

        Category::Cooling => {
            let cooler_socket = candidate.cooling().and_then(|c| c.socket);
            match (parts.processor(), cooler_socket) {
                (Some(cpu), Some(socket)) => socket == cpu.socket,
                _ => true,
            }
        }

        Category::Cpu | Category::Storage | Category::Prebuilt | Category::Peripheral => true,
    }
}

/// Offerable components per build slot.
pub type OptionSets = BTreeMap<Category, Vec<Component>>;

/// Offerable components for one slot, in catalog order.
pub fn options_for<'a>(
    catalog: &'a Catalog,
    parts: &SelectedParts<'_>,
    category: Category,
) -> Vec<&'a Component> {
    catalog
        .offerable(category)
        .filter(|candidate| is_compatible(candidate, parts))
        .collect()
}

/// Computes the option set of every build slot. Every slot is present in
/// the result, possibly with an empty list.
pub fn option_sets(catalog: &Catalog, selection: &Selection) -> OptionSets {
    let parts = SelectedParts::resolve(catalog, selection);
    Category::BUILD_SLOTS
        .into_iter()
        .map(|category| {
            let options = options_for(catalog, &parts, category)
                .into_iter()
                .cloned()
                .collect();
            (category, options)
        })
        .collect()
}

// =============================================================================
// Power Estimate
// =============================================================================

/// Estimated system draw in watts.
///
/// `cpu TDP + 100 W base + 60% of the GPU's recommended PSU rating`,
/// rounded to the nearest watt. Missing values count as 0.
///
/// ```rust
/// use pcforge_core::compat::gpu_draw_watts;
///
/// assert_eq!(125 + 100 + gpu_draw_watts(750), 675);
/// ```
pub fn estimate_power(parts: &SelectedParts<'_>) -> u32 {
    let cpu = parts.processor().and_then(|p| p.tdp_watts).unwrap_or(0);
    let gpu = parts
        .graphics_card()
        .map_or(0, |g| gpu_draw_watts(g.recommended_psu_watts));

    cpu.saturating_add(BASE_SYSTEM_WATTS).saturating_add(gpu)
}

/// Share of a GPU's recommended PSU rating counted as actual draw, rounded
/// half up.
pub fn gpu_draw_watts(recommended_psu_watts: u32) -> u32 {
    recommended_psu_watts
        .saturating_mul(GPU_DRAW_PERCENT)
        .saturating_add(50)
        / 100
}

/// Power meter shown next to the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PowerReport {
    pub estimated_watts: u32,
    /// Wattage of the selected power supply, if any.
    pub psu_watts: Option<u32>,
    /// Whether the selected PSU covers the estimate.
    pub psu_sufficient: Option<bool>,
    /// Estimate as a share of the PSU rating, capped at 100.
    pub load_percent: Option<u32>,
}

impl PowerReport {
    pub fn from_parts(parts: &SelectedParts<'_>) -> Self {
        let estimated_watts = estimate_power(parts);
        let psu_watts = parts
            .get(Category::Psu)
            .and_then(Component::power_supply)
            .map(|psu| psu.wattage)
            .filter(|w| *w > 0);

        PowerReport {
            estimated_watts,
            psu_watts,
            psu_sufficient: psu_watts.map(|w| w >= estimated_watts),
            load_percent: psu_watts.map(|w| {
                let pct = u64::from(estimated_watts) * 100 / u64::from(w);
                pct.min(100) as u32
            }),
        }
    }
}

// =============================================================================
// Post-Commit Pruning
// =============================================================================

/// A user-facing message produced when selections are cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The processor changed to a socket the board does not have.
    MotherboardRemoved { memory_removed: bool },
    /// The motherboard changed to a memory type the modules do not match.
    MemoryRemoved,
    /// The picked component left the catalog or the configurator.
    Unavailable {
        category: Category,
        component_id: String,
    },
}

impl Notice {
    /// Slots this notice cleared.
    pub fn removed(&self) -> Vec<Category> {
        match self {
            Notice::MotherboardRemoved { memory_removed: true } => {
                vec![Category::Motherboard, Category::Ram]
            }
            Notice::MotherboardRemoved { memory_removed: false } => vec![Category::Motherboard],
            Notice::MemoryRemoved => vec![Category::Ram],
            Notice::Unavailable { category, .. } => vec![*category],
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::MotherboardRemoved { .. } => {
                f.write_str("motherboard removed: incompatible with new processor")
            }
            Notice::MemoryRemoved => f.write_str("memory removed: incompatible with new motherboard"),
            Notice::Unavailable { category, .. } => {
                write!(f, "{} removed: no longer available", category.label())
            }
        }
    }
}

/// Runs the cascade rules after `changed` was committed.
///
/// - processor changed: a board that no longer fits is dropped together
///   with the memory that depended on it.
/// - motherboard changed: memory of the wrong type is dropped.
///
/// Any other slot never cascades. At most one notice is produced.
pub fn validate_and_prune(
    mut selection: Selection,
    catalog: &Catalog,
    changed: Category,
) -> (Selection, Vec<Notice>) {
    let parts = SelectedParts::resolve(catalog, &selection);
    let mut notices = Vec::new();

    match changed {
        Category::Cpu => {
            let board_invalid = parts.get(Category::Cpu).is_some()
                && parts
                    .get(Category::Motherboard)
                    .is_some_and(|board| !is_compatible(board, &parts));
            if board_invalid {
                selection.remove(Category::Motherboard);
                let memory_removed = selection.remove(Category::Ram).is_some();
                notices.push(Notice::MotherboardRemoved { memory_removed });
            }
        }
        Category::Motherboard => {
            let memory_invalid = parts.get(Category::Motherboard).is_some()
                && parts
                    .get(Category::Ram)
                    .is_some_and(|ram| !is_compatible(ram, &parts));
            if memory_invalid {
                selection.remove(Category::Ram);
                notices.push(Notice::MemoryRemoved);
            }
        }
        _ => {}
    }

    (selection, notices)
}

/// Drops picks whose component is gone from the catalog or no longer
/// offerable in its slot. Used when a fresh catalog snapshot arrives.
pub fn prune_unavailable(mut selection: Selection, catalog: &Catalog) -> (Selection, Vec<Notice>) {
    let stale: Vec<(Category, String)> = selection
        .iter()
        .filter(|(category, id)| !catalog.get(id).is_some_and(|c| c.offerable_in(*category)))
        .map(|(category, id)| (category, id.to_string()))
        .collect();

    let notices = stale
        .into_iter()
        .map(|(category, component_id)| {
            selection.remove(category);
            Notice::Unavailable {
                category,
                component_id,
            }
        })
        .collect();

    (selection, notices)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Compatibility, CoolingSpec, FormFactor, MemorySpec, MemoryType, PsuSpec, Socket,
        StorageKind, StorageSpec,
    };

    fn cpu(id: &str, socket: Socket, tdp: Option<u32>) -> Component {
        Component::new(id, format!("CPU {id}"), Category::Cpu, Money::from_cents(30000))
            .with_compatibility(Compatibility::Cpu(ProcessorSpec {
                socket,
                tdp_watts: tdp,
            }))
    }

    fn board(id: &str, socket: Socket, memory: MemoryType, form: FormFactor) -> Component {
        Component::new(id, format!("Board {id}"), Category::Motherboard, Money::from_cents(18999))
            .with_compatibility(Compatibility::Motherboard(MotherboardSpec {
                socket,
                memory_type: memory,
                form_factor: form,
                chipset: None,
            }))
    }

    fn ram(id: &str, memory: MemoryType) -> Component {
        Component::new(id, format!("RAM {id}"), Category::Ram, Money::from_cents(8999))
            .with_compatibility(Compatibility::Ram(MemorySpec {
                memory_type: memory,
                frequency_mhz: 6000,
                capacity_gb: Some(32),
            }))
    }

    fn gpu(id: &str, length: u32, recommended: u32) -> Component {
        Component::new(id, format!("GPU {id}"), Category::Gpu, Money::from_cents(59999))
            .with_compatibility(Compatibility::Gpu(GpuSpec {
                length_mm: length,
                recommended_psu_watts: recommended,
            }))
    }

    fn case(id: &str, max_gpu: u32, forms: &[FormFactor]) -> Component {
        Component::new(id, format!("Case {id}"), Category::Case, Money::from_cents(9999))
            .with_compatibility(Compatibility::Case(CaseSpec {
                max_gpu_length_mm: max_gpu,
                supported_form_factors: forms.to_vec(),
            }))
    }

    fn psu(id: &str, wattage: u32) -> Component {
        Component::new(id, format!("PSU {id}"), Category::Psu, Money::from_cents(11999))
            .with_compatibility(Compatibility::Psu(PsuSpec {
                wattage,
                modularity: None,
            }))
    }

    fn cooler(id: &str, socket: Option<Socket>) -> Component {
        Component::new(id, format!("Cooler {id}"), Category::Cooling, Money::from_cents(4999))
            .with_compatibility(Compatibility::Cooling(CoolingSpec {
                socket,
                radiator_size_mm: None,
            }))
    }

    fn storage(id: &str) -> Component {
        Component::new(id, format!("SSD {id}"), Category::Storage, Money::from_cents(7999))
            .with_compatibility(Compatibility::Storage(StorageSpec {
                kind: StorageKind::NvmeM2,
                capacity_gb: 2000,
            }))
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            cpu("cpu-am5", Socket::Am5, Some(125)),
            cpu("cpu-am4", Socket::Am4, Some(65)),
            cpu("cpu-lga", Socket::Lga1700, None),
            board("mb-am5", Socket::Am5, MemoryType::Ddr5, FormFactor::Atx),
            board("mb-am5-itx", Socket::Am5, MemoryType::Ddr5, FormFactor::MiniItx),
            board("mb-am4", Socket::Am4, MemoryType::Ddr4, FormFactor::MicroAtx),
            board("mb-am5-ddr4", Socket::Am5, MemoryType::Ddr4, FormFactor::Atx),
            ram("ram-ddr5", MemoryType::Ddr5),
            ram("ram-ddr4", MemoryType::Ddr4),
            gpu("gpu-long", 340, 750),
            gpu("gpu-short", 240, 550),
            case("case-big", 400, &[FormFactor::Atx, FormFactor::MicroAtx]),
            case("case-small", 300, &[FormFactor::MiniItx, FormFactor::MicroAtx]),
            psu("psu-650", 650),
            psu("psu-850", 850),
            cooler("cool-am5", Some(Socket::Am5)),
            cooler("cool-lga", Some(Socket::Lga1700)),
            cooler("cool-any", None),
            storage("ssd-1"),
            cpu("cpu-hidden", Socket::Am5, Some(105)).configurable(false),
        ])
    }

    fn ids(options: &OptionSets, category: Category) -> Vec<&str> {
        options[&category].iter().map(|c| c.id.as_str()).collect()
    }

    fn pick(pairs: &[(Category, &str)]) -> Selection {
        pairs
            .iter()
            .map(|(c, id)| (*c, id.to_string()))
            .collect()
    }

    #[test]
    fn test_every_slot_present_and_flag_respected() {
        let options = option_sets(&catalog(), &Selection::new());
        assert_eq!(options.len(), Category::BUILD_SLOTS.len());
        for (category, components) in &options {
            for c in components {
                assert!(c.allow_in_configurator);
                assert_eq!(c.category, *category);
            }
        }
        assert!(!ids(&options, Category::Cpu).contains(&"cpu-hidden"));
    }

    #[test]
    fn test_motherboards_follow_processor_socket() {
        let catalog = catalog();
        let all = option_sets(&catalog, &Selection::new());
        assert_eq!(ids(&all, Category::Motherboard).len(), 4);

        let options = option_sets(&catalog, &pick(&[(Category::Cpu, "cpu-am5")]));
        assert_eq!(
            ids(&options, Category::Motherboard),
            vec!["mb-am5", "mb-am5-itx", "mb-am5-ddr4"]
        );
    }

    #[test]
    fn test_memory_follows_motherboard_type() {
        let options = option_sets(&catalog(), &pick(&[(Category::Motherboard, "mb-am4")]));
        assert_eq!(ids(&options, Category::Ram), vec!["ram-ddr4"]);
    }

    #[test]
    fn test_case_needs_form_factor_and_gpu_clearance() {
        let catalog = catalog();

        let options = option_sets(&catalog, &pick(&[(Category::Gpu, "gpu-long")]));
        assert_eq!(ids(&options, Category::Case), vec!["case-big"]);

        let options = option_sets(&catalog, &pick(&[(Category::Motherboard, "mb-am5-itx")]));
        assert_eq!(ids(&options, Category::Case), vec!["case-small"]);

        let options = option_sets(
            &catalog,
            &pick(&[(Category::Motherboard, "mb-am5-itx"), (Category::Gpu, "gpu-long")]),
        );
        assert!(ids(&options, Category::Case).is_empty());
    }

    #[test]
    fn test_gpu_must_fit_selected_case() {
        let options = option_sets(&catalog(), &pick(&[(Category::Case, "case-small")]));
        assert_eq!(ids(&options, Category::Gpu), vec!["gpu-short"]);
    }

    #[test]
    fn test_psu_uses_full_recommended_power() {
        let options = option_sets(&catalog(), &pick(&[(Category::Gpu, "gpu-long")]));
        assert_eq!(ids(&options, Category::Psu), vec!["psu-850"]);
    }

    #[test]
    fn test_cooling_socket_or_universal() {
        let options = option_sets(&catalog(), &pick(&[(Category::Cpu, "cpu-am5")]));
        assert_eq!(ids(&options, Category::Cooling), vec!["cool-am5", "cool-any"]);
    }

    #[test]
    fn test_unconstrained_slots_ignore_selection() {
        let catalog = catalog();
        let selection = pick(&[(Category::Cpu, "cpu-am5"), (Category::Motherboard, "mb-am5")]);
        let options = option_sets(&catalog, &selection);
        assert_eq!(ids(&options, Category::Cpu).len(), 3);
        assert_eq!(ids(&options, Category::Storage), vec!["ssd-1"]);
    }

    #[test]
    fn test_referent_without_attributes_is_vacuous() {
        let mut components = catalog().into_components();
        components.push(Component::new(
            "cpu-bare",
            "Unknown CPU",
            Category::Cpu,
            Money::from_cents(10000),
        ));
        let catalog = Catalog::new(components);

        let options = option_sets(&catalog, &pick(&[(Category::Cpu, "cpu-bare")]));
        assert_eq!(ids(&options, Category::Motherboard).len(), 4);
        assert_eq!(ids(&options, Category::Cooling).len(), 3);
    }

    #[test]
    fn test_power_estimate_formula() {
        let catalog = catalog();
        let selection = pick(&[(Category::Cpu, "cpu-am5"), (Category::Gpu, "gpu-long")]);
        let parts = SelectedParts::resolve(&catalog, &selection);
        assert_eq!(estimate_power(&parts), 675);
    }

    #[test]
    fn test_power_estimate_defaults() {
        let catalog = catalog();
        let empty = SelectedParts::resolve(&catalog, &Selection::new());
        assert_eq!(estimate_power(&empty), 100);

        let no_tdp = pick(&[(Category::Cpu, "cpu-lga")]);
        assert_eq!(estimate_power(&SelectedParts::resolve(&catalog, &no_tdp)), 100);

        assert_eq!(gpu_draw_watts(1), 1);
        assert_eq!(gpu_draw_watts(550), 330);
    }

    #[test]
    fn test_power_report_against_psu() {
        let catalog = catalog();
        let selection = pick(&[
            (Category::Cpu, "cpu-am5"),
            (Category::Gpu, "gpu-long"),
            (Category::Psu, "psu-650"),
        ]);
        let report = PowerReport::from_parts(&SelectedParts::resolve(&catalog, &selection));
        assert_eq!(report.estimated_watts, 675);
        assert_eq!(report.psu_watts, Some(650));
        assert_eq!(report.psu_sufficient, Some(false));
        assert_eq!(report.load_percent, Some(100));

        let report = PowerReport::from_parts(&SelectedParts::resolve(&catalog, &Selection::new()));
        assert_eq!(report.psu_watts, None);
        assert_eq!(report.load_percent, None);
    }

    #[test]
    fn test_processor_change_clears_board_and_memory() {
        let catalog = catalog();
        let selection = pick(&[
            (Category::Cpu, "cpu-am4"),
            (Category::Motherboard, "mb-am5"),
            (Category::Ram, "ram-ddr5"),
            (Category::Gpu, "gpu-long"),
        ]);

        let (pruned, notices) = validate_and_prune(selection, &catalog, Category::Cpu);

        assert_eq!(notices, vec![Notice::MotherboardRemoved { memory_removed: true }]);
        assert!(!pruned.contains(Category::Motherboard));
        assert!(!pruned.contains(Category::Ram));
        assert_eq!(pruned.get(Category::Cpu), Some("cpu-am4"));
        assert_eq!(pruned.get(Category::Gpu), Some("gpu-long"));
        assert_eq!(
            notices[0].to_string(),
            "motherboard removed: incompatible with new processor"
        );
    }

    #[test]
    fn test_processor_change_keeps_matching_board() {
        let selection = pick(&[(Category::Cpu, "cpu-am5"), (Category::Motherboard, "mb-am5")]);
        let (pruned, notices) = validate_and_prune(selection.clone(), &catalog(), Category::Cpu);
        assert!(notices.is_empty());
        assert_eq!(pruned, selection);
    }

    #[test]
    fn test_board_change_clears_only_memory() {
        let catalog = catalog();
        let selection = pick(&[
            (Category::Cpu, "cpu-am5"),
            (Category::Motherboard, "mb-am5-ddr4"),
            (Category::Ram, "ram-ddr5"),
        ]);

        let (pruned, notices) = validate_and_prune(selection, &catalog, Category::Motherboard);

        assert_eq!(notices, vec![Notice::MemoryRemoved]);
        assert_eq!(notices[0].removed(), vec![Category::Ram]);
        assert_eq!(pruned.get(Category::Cpu), Some("cpu-am5"));
        assert_eq!(pruned.get(Category::Motherboard), Some("mb-am5-ddr4"));
        assert!(!pruned.contains(Category::Ram));
    }

    #[test]
    fn test_other_slots_never_cascade() {
        let catalog = catalog();
        let selection = pick(&[(Category::Gpu, "gpu-long"), (Category::Case, "case-small")]);
        let (pruned, notices) = validate_and_prune(selection.clone(), &catalog, Category::Case);
        assert!(notices.is_empty());
        assert_eq!(pruned, selection);
    }

    #[test]
    fn test_prune_unavailable_drops_stale_ids() {
        let catalog = catalog();
        let selection = pick(&[
            (Category::Cpu, "cpu-hidden"),
            (Category::Gpu, "gpu-gone"),
            (Category::Storage, "ssd-1"),
        ]);
        let (pruned, notices) = prune_unavailable(selection, &catalog);
        assert_eq!(notices.len(), 2);
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned.get(Category::Storage), Some("ssd-1"));
        assert_eq!(notices[0].to_string(), "processor removed: no longer available");
    }

    #[test]
    fn test_completion_and_exact_total() {
        let catalog = catalog();
        let mut selection = pick(&[
            (Category::Cpu, "cpu-am5"),
            (Category::Motherboard, "mb-am5"),
            (Category::Ram, "ram-ddr5"),
            (Category::Gpu, "gpu-long"),
            (Category::Storage, "ssd-1"),
            (Category::Psu, "psu-850"),
            (Category::Case, "case-big"),
        ]);
        assert!(!selection.is_complete());
        assert_eq!(selection.missing_slots(), vec![Category::Cooling]);

        selection.insert(Category::Cooling, "cool-am5");
        assert!(selection.is_complete());

        let total = SelectedParts::resolve(&catalog, &selection).total_price();
        assert_eq!(
            total.cents(),
            30000 + 18999 + 8999 + 59999 + 7999 + 11999 + 9999 + 4999
        );
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let catalog = catalog();
        let selection = pick(&[(Category::Cpu, "cpu-am5"), (Category::Gpu, "gpu-short")]);
        let first = option_sets(&catalog, &selection);
        let second = option_sets(&catalog, &selection);
        assert_eq!(first, second);

        let parts = SelectedParts::resolve(&catalog, &selection);
        assert_eq!(estimate_power(&parts), estimate_power(&parts));
    }
}
