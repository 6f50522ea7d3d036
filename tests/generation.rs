use atoll::terrain::{downstream, is_sea_level};
use atoll::{AtollError, CancelFlag, GenerationParams, World};
use std::thread;

fn island_params(seed: u64) -> GenerationParams {
    GenerationParams {
        seed,
        grid_size: 72,
        noise_scale: 0.07,
        island_threshold: 0.2,
        erosion_rate: 0.5,
        erosion_iterations: 4,
        ..Default::default()
    }
}

#[test]
fn test_same_seed_same_world() {
    let params = island_params(2024);
    let first = World::generate(&params).unwrap();
    let second = World::generate(&params).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_different_seeds_differ() {
    let first = World::generate(&island_params(1)).unwrap();
    let second = World::generate(&island_params(2)).unwrap();
    assert_ne!(first.heightmap(), second.heightmap());
}

#[test]
fn test_world_invariants() {
    for seed in [7, 19, 311] {
        let world = World::generate(&island_params(seed)).unwrap();
        let heightmap = world.heightmap();

        assert!(heightmap.cells().iter().all(|h| (0.0..=1.0).contains(h)));

        for (cell, &is_ocean) in world.ocean_tiles().iter() {
            if is_ocean {
                assert!(is_sea_level(heightmap[cell]));
            }
        }

        for (cell, _) in world.flow_directions().iter() {
            if let Some(target) = downstream(world.flow_directions(), cell) {
                assert!(heightmap[target] <= heightmap[cell]);
            }
        }

        let routed = world
            .flow_directions()
            .cells()
            .iter()
            .filter(|direction| direction.is_some())
            .count();
        assert!(world.max_accumulation() as usize <= routed);

        if let Some(path) = world.temple_path() {
            let max_slope = f64::from(island_params(seed).max_road_slope);
            for pair in path.windows(2) {
                let step = pair[0].euclidean_distance(&pair[1]);
                let climb = f64::from((heightmap[pair[1]] - heightmap[pair[0]]).abs());
                assert!(climb / step <= max_slope + 1e-9);
            }
        }
    }
}

#[test]
fn test_all_ocean_has_no_land() {
    let params = GenerationParams {
        island_threshold: 1.0,
        ..island_params(5)
    };
    assert!(matches!(
        World::generate(&params),
        Err(AtollError::NoLandAvailable)
    ));
}

#[test]
fn test_invalid_params() {
    let params = GenerationParams {
        noise_scale: 0.9,
        temple_min_radius: 12,
        temple_max_radius: 4,
        ..island_params(5)
    };
    match World::generate(&params) {
        Err(AtollError::InvalidParams { reason }) => {
            assert!(reason.contains("noise_scale"));
        }
        other => panic!("expected invalid params, got {other:?}"),
    }
}

#[test]
fn test_cancel_from_another_thread() {
    let cancel = CancelFlag::new();
    let handle = cancel.clone();
    thread::spawn(move || handle.cancel()).join().unwrap();

    let result = World::generate_with_cancel(&island_params(9), &cancel);
    assert!(matches!(result, Err(AtollError::Cancelled { .. })));
}

#[test]
fn test_uncancelled_flag_completes() {
    let cancel = CancelFlag::new();
    let world = World::generate_with_cancel(&island_params(9), &cancel).unwrap();
    assert_eq!(world, World::generate(&island_params(9)).unwrap());
}
