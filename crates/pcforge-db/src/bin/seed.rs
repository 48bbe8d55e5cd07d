//! # Seed Data Generator
//!
//! Populates the database with a demo hardware catalog for development.
//!
//! ## Usage
//! ```bash
//! cargo run -p pcforge-db --bin seed
//!
//! # Specify database path
//! cargo run -p pcforge-db --bin seed -- --db ./data/pcforge.db
//! ```
//!
//! ## Generated Products
//! One or more entries per configurator slot, covering both AMD and Intel
//! platforms so the cascade rules have something to do, plus a prebuilt PC
//! and a peripheral that only appear on the catalogue page.

use std::env;

use pcforge_core::{
    CaseSpec, Category, Compatibility, ComponentDraft, CoolingSpec, FormFactor, GpuSpec,
    MemorySpec, MemoryType, Money, MotherboardSpec, ProcessorSpec, PsuSpec, Socket, StorageKind,
    StorageSpec,
};
use pcforge_db::{Database, DbConfig};
use uuid::Uuid;

fn cpu(name: &str, cents: i64, socket: Socket, tdp: u32) -> ComponentDraft {
    ComponentDraft::new(name, Category::Cpu, Money::from_cents(cents)).with_compatibility(
        Compatibility::Cpu(ProcessorSpec {
            socket,
            tdp_watts: Some(tdp),
        }),
    )
}

fn board(
    name: &str,
    cents: i64,
    socket: Socket,
    memory_type: MemoryType,
    form_factor: FormFactor,
    chipset: &str,
) -> ComponentDraft {
    ComponentDraft::new(name, Category::Motherboard, Money::from_cents(cents)).with_compatibility(
        Compatibility::Motherboard(MotherboardSpec {
            socket,
            memory_type,
            form_factor,
            chipset: Some(chipset.to_string()),
        }),
    )
}

fn ram(name: &str, cents: i64, memory_type: MemoryType, mhz: u32, gb: u32) -> ComponentDraft {
    ComponentDraft::new(name, Category::Ram, Money::from_cents(cents)).with_compatibility(
        Compatibility::Ram(MemorySpec {
            memory_type,
            frequency_mhz: mhz,
            capacity_gb: Some(gb),
        }),
    )
}

fn gpu(name: &str, cents: i64, length_mm: u32, psu_watts: u32) -> ComponentDraft {
    ComponentDraft::new(name, Category::Gpu, Money::from_cents(cents)).with_compatibility(
        Compatibility::Gpu(GpuSpec {
            length_mm,
            recommended_psu_watts: psu_watts,
        }),
    )
}

fn storage(name: &str, cents: i64, kind: StorageKind, gb: u32) -> ComponentDraft {
    ComponentDraft::new(name, Category::Storage, Money::from_cents(cents)).with_compatibility(
        Compatibility::Storage(StorageSpec {
            kind,
            capacity_gb: gb,
        }),
    )
}

fn psu(name: &str, cents: i64, wattage: u32, modularity: &str) -> ComponentDraft {
    ComponentDraft::new(name, Category::Psu, Money::from_cents(cents)).with_compatibility(
        Compatibility::Psu(PsuSpec {
            wattage,
            modularity: Some(modularity.to_string()),
        }),
    )
}

fn case(name: &str, cents: i64, max_gpu_mm: u32, forms: &[FormFactor]) -> ComponentDraft {
    ComponentDraft::new(name, Category::Case, Money::from_cents(cents)).with_compatibility(
        Compatibility::Case(CaseSpec {
            max_gpu_length_mm: max_gpu_mm,
            supported_form_factors: forms.to_vec(),
        }),
    )
}

fn cooler(name: &str, cents: i64, socket: Option<Socket>, radiator: Option<u32>) -> ComponentDraft {
    ComponentDraft::new(name, Category::Cooling, Money::from_cents(cents)).with_compatibility(
        Compatibility::Cooling(CoolingSpec {
            socket,
            radiator_size_mm: radiator,
        }),
    )
}

fn demo_catalog() -> Vec<ComponentDraft> {
    use FormFactor::{Atx, MicroAtx, MiniItx};
    use MemoryType::{Ddr4, Ddr5};

    let mut prebuilt =
        ComponentDraft::new("PC Gamer Nova RTX 4070", Category::Prebuilt, Money::from_cents(169900));
    prebuilt.badge = Some("Promo".to_string());
    prebuilt.original_price_cents = Some(189900);
    prebuilt.allow_in_configurator = false;

    let mut mouse = ComponentDraft::new("Logitech G502 X", Category::Peripheral, Money::from_cents(8999));
    mouse.allow_in_configurator = false;

    vec![
        cpu("AMD Ryzen 7 7800X3D", 44900, Socket::Am5, 120),
        cpu("AMD Ryzen 5 7600", 21900, Socket::Am5, 65),
        cpu("AMD Ryzen 5 5600X", 13900, Socket::Am4, 65),
        cpu("Intel Core i7-14700K", 42900, Socket::Lga1700, 125),
        cpu("Intel Core i5-12400F", 13900, Socket::Lga1700, 65),
        board("MSI MAG B650 Tomahawk", 21900, Socket::Am5, Ddr5, Atx, "B650"),
        board("ASUS ROG Strix B650-I", 28900, Socket::Am5, Ddr5, MiniItx, "B650"),
        board("MSI B550M PRO-VDH", 10900, Socket::Am4, Ddr4, MicroAtx, "B550"),
        board("Gigabyte Z790 Aorus Elite", 25900, Socket::Lga1700, Ddr5, Atx, "Z790"),
        board("ASUS Prime B760M-A D4", 12900, Socket::Lga1700, Ddr4, MicroAtx, "B760"),
        ram("Corsair Vengeance 32GB DDR5-6000", 11900, Ddr5, 6000, 32),
        ram("G.Skill Trident Z5 64GB DDR5-6400", 22900, Ddr5, 6400, 64),
        ram("Kingston Fury 16GB DDR4-3200", 4900, Ddr4, 3200, 16),
        gpu("NVIDIA GeForce RTX 4090", 189900, 336, 850),
        gpu("NVIDIA GeForce RTX 4070 Super", 64900, 267, 650),
        gpu("AMD Radeon RX 7800 XT", 54900, 276, 700),
        gpu("NVIDIA GeForce RTX 4060", 32900, 200, 550),
        storage("Samsung 990 Pro 2TB", 17900, StorageKind::NvmeM2, 2000),
        storage("Crucial MX500 1TB", 6900, StorageKind::SataSsd, 1000),
        storage("Seagate BarraCuda 4TB", 8900, StorageKind::Hdd, 4000),
        psu("Corsair RM1000x", 18900, 1000, "Full"),
        psu("Corsair RM850x", 13900, 850, "Full"),
        psu("be quiet! Pure Power 12 650W", 8900, 650, "Semi"),
        psu("Corsair CV550", 5900, 550, "Non-modular"),
        case("Lian Li Lancool 216", 9900, 392, &[Atx, MicroAtx, MiniItx]),
        case("Fractal Design North", 13900, 355, &[Atx, MicroAtx, MiniItx]),
        case("NZXT H1 V2", 34900, 324, &[MiniItx]),
        case("Cooler Master Q300L", 4900, 360, &[MicroAtx, MiniItx]),
        cooler("Noctua NH-D15", 10900, None, None),
        cooler("Arctic Liquid Freezer III 360", 11900, None, Some(360)),
        cooler("AMD Wraith Prism", 2900, Some(Socket::Am4), None),
        cooler("Intel Laminar RM1", 1900, Some(Socket::Lga1700), None),
        prebuilt,
        mouse,
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./pcforge_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("PCForge Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./pcforge_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("PCForge Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let repo = db.components();
    let existing = repo.count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut generated = 0;
    for draft in demo_catalog() {
        let component = draft.into_component(Uuid::new_v4().to_string());
        if let Err(e) = repo.insert(&component).await {
            eprintln!("Failed to insert {}: {}", component.name, e);
            continue;
        }
        generated += 1;
    }

    println!();
    println!("✓ Inserted {} products", generated);
    for category in Category::ALL {
        let count = repo.list_by_category(category).await?.len();
        println!("  {:<12} {}", category.as_str(), count);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
