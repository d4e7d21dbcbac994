//! Shipyard Demo
//!
//! Run with: `cargo run --bin shipyard`
//!
//! Headless walkthrough of the aggregation core: builds a small airship out
//! of cubes, prints its mass books, then cuts it apart and shows the split.
//! Set `RUST_LOG=debug` to watch ship lifecycle events.

use glam::{Quat, Vec3};
use skyforge_engine::{BlockCatalog, BlockManager, AIRSHIP_LAYER};

const CATALOG_JSON: &str = r#"[
    { "name": "hull",    "weight": 1.0 },
    { "name": "ballast", "weight": 4.0 },
    { "name": "slab",    "weight": 0.5,
      "half_extents": [0.5, 0.25, 0.5],
      "attachable": { "up": false } }
]"#;

fn main() {
    env_logger::init();

    let catalog = match BlockCatalog::from_json(CATALOG_JSON) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("catalog error: {err}");
            std::process::exit(1);
        }
    };
    let hull = catalog.id_by_name("hull").expect("hull type");
    let ballast = catalog.id_by_name("ballast").expect("ballast type");

    let mut manager = BlockManager::new(catalog);

    println!("=== Building a 5-block airship ===");
    let mut line = Vec::new();
    for x in 0..4 {
        line.push(manager.place_block(
            hull,
            Vec3::new(x as f32, 0.0, 0.0),
            Quat::IDENTITY,
            AIRSHIP_LAYER,
        ));
    }
    // Heavy ballast hanging under the second hull block.
    manager.place_block(
        ballast,
        Vec3::new(1.0, -1.0, 0.0),
        Quat::IDENTITY,
        AIRSHIP_LAYER,
    );
    print_ships(&manager);

    println!("=== Cutting the line at x=2 ===");
    manager.detach_block(line[2]);
    print_ships(&manager);

    println!("=== Re-placing the cut block ===");
    manager.relocate_block(line[2], Vec3::new(2.0, 0.0, 0.0), Quat::IDENTITY);
    print_ships(&manager);

    manager.check_invariants();
    println!("invariants hold, {} block(s) registered", manager.block_count());
}

fn print_ships(manager: &BlockManager) {
    let mut ships: Vec<_> = manager.ships().collect();
    ships.sort_by_key(|(id, _)| *id);
    for (id, ship) in ships {
        let com = ship.world_center_of_mass();
        println!(
            "  {:?}: {} block(s), mass {:.1} kg, COM ({:.2}, {:.2}, {:.2})",
            id,
            ship.member_count(),
            ship.mass(),
            com.x,
            com.y,
            com.z
        );
    }
}
