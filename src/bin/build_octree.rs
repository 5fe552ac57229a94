//! Octree builder binary: places a batch of points and reports the result.
//!
//! Usage: cargo run --release --bin build_octree -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>      Octree config JSON (default: center (100, 101, 102), size 100)
//!   --positions <PATH>   JSON array of [x, y, z] points
//!   --count <N>          Without --positions: N points along the cube diagonal (default: 5)
//!   --visit              Log every node in depth-first order

use std::path::Path;
use std::process;
use std::time::Instant;

use glam::Vec3;

use loctree::octree::{LocationCode, Node, Octree, OctreeConfig};
use loctree::{Error, Result};

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format_timestamp_millis()
    .init();

    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        if e.is_fatal() {
            process::abort();
        }
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let config = match parse_str_arg(args, "--config") {
        Some(path) => OctreeConfig::load(&path)?,
        None => OctreeConfig::new(Vec3::new(100.0, 101.0, 102.0), 100.0),
    };
    let positions = match parse_str_arg(args, "--positions") {
        Some(path) => load_positions(&path)?,
        None => diagonal_positions(&config, parse_usize_arg(args, "--count").unwrap_or(5)),
    };

    println!("=== Loctree Builder ===");
    println!("Center:    {:?}", config.center);
    println!("Size:      {}", config.size);
    println!("Max depth: {}", config.max_depth);
    println!("Objects:   {}", positions.len());
    println!();

    let mut tree = Octree::with_config(&config)?;
    let start = Instant::now();
    tree.build(&positions)?;
    let elapsed = start.elapsed();

    if args.iter().any(|a| a == "--visit") {
        for node in tree.visit_all(LocationCode::ROOT) {
            let indent = "  ".repeat(node.depth() as usize);
            match node {
                Node::Branch(branch) => {
                    log::info!("{}{} branch mask={:08b}", indent, branch.code, branch.child_mask)
                }
                Node::Leaf(leaf) => match leaf.object {
                    Some(object) => log::info!("{}{} leaf object={}", indent, leaf.code, object),
                    None => log::info!("{}{} leaf (empty)", indent, leaf.code),
                },
            }
        }
    }

    let stats = tree.stats();
    println!("Leaves:    {}", tree.leaf_count());
    println!("Branches:  {}", tree.branch_count());
    println!("Depth:     {}", stats.depth);
    for (depth, count) in stats.leaves_per_depth.iter().enumerate().filter(|(_, c)| **c > 0) {
        println!("  depth {:2}: {} leaves", depth, count);
    }
    println!("Built in {:.2}ms", elapsed.as_secs_f64() * 1000.0);
    Ok(())
}

fn load_positions(path: &str) -> Result<Vec<Vec3>> {
    let json = std::fs::read_to_string(Path::new(path))?;
    let points: Vec<[f32; 3]> = serde_json::from_str(&json)?;
    if let Some(index) = points.iter().position(|p| !Vec3::from_array(*p).is_finite()) {
        return Err(Error::InvalidConfig(format!("position {} is not finite", index)));
    }
    log::info!("Loaded {} positions from {}", points.len(), path);
    Ok(points.into_iter().map(Vec3::from_array).collect())
}

/// `count` points evenly spaced along the main diagonal of the configured cube.
fn diagonal_positions(config: &OctreeConfig, count: usize) -> Vec<Vec3> {
    let min = config.center() - Vec3::splat(config.size);
    let extent = Vec3::splat(config.size * 2.0);
    (0..count)
        .map(|i| min + extent * ((i as f32 + 0.5) / count as f32))
        .collect()
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    parse_str_arg(args, flag).and_then(|s| s.parse().ok())
}
