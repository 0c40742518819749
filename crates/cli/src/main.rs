//! Easel CLI - exercise a scene description from the terminal.
//!
//! Loads a scene graph from a JSON file, resolves hit-tests against it, and
//! triggers `click` events so the bubble path can be observed on stdout.
//! This stands in for the rendering surface and input capture layers, which
//! are external collaborators of the core crates.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use events::{Event, EventManager};
use glam::Vec2;
use scene_graph::{Node, NodeId, SceneGraph};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Easel CLI - hit-test and event-dispatch harness for scene files
#[derive(Parser)]
#[command(name = "easel")]
#[command(about = "Inspect and hit-test easel scene files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the node tree of a scene file
    Show {
        /// Path to the scene JSON file
        scene: PathBuf,
    },

    /// Hit-test points against a scene and dispatch click events
    Hit {
        /// Path to the scene JSON file
        scene: PathBuf,

        /// Canvas-space point to test, as X,Y (repeatable)
        #[arg(short, long = "point", value_parser = parse_point, required = true)]
        points: Vec<(f32, f32)>,

        /// Stop propagation at the named node to demonstrate cancellation
        #[arg(long)]
        stop_at: Option<String>,
    },
}

/// One node in the scene file. Nodes refer to their parent by name; a node
/// without a parent is a root.
#[derive(Debug, Deserialize)]
struct NodeEntry {
    name: String,
    #[serde(default)]
    parent: Option<String>,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    #[serde(default = "default_scale")]
    scale_x: f32,
    #[serde(default = "default_scale")]
    scale_y: f32,
    #[serde(default)]
    rotation: f32,
}

fn default_scale() -> f32 {
    1.0
}

#[derive(Debug, Deserialize)]
struct SceneFile {
    nodes: Vec<NodeEntry>,
}

/// Payload carried by the click events the CLI dispatches.
#[derive(Debug, Clone, Copy)]
struct ClickData {
    global: Vec2,
    local: Vec2,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Show { scene } => show_scene(&scene),
        Commands::Hit {
            scene,
            points,
            stop_at,
        } => hit_scene(&scene, &points, stop_at.as_deref()),
    }
}

fn parse_point(s: &str) -> std::result::Result<(f32, f32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{s}'"))?;
    let x = x.trim().parse().map_err(|_| format!("bad X in '{s}'"))?;
    let y = y.trim().parse().map_err(|_| format!("bad Y in '{s}'"))?;
    Ok((x, y))
}

/// A scene loaded from disk: the graph plus the name bookkeeping the file
/// format uses for parent references.
struct LoadedScene {
    graph: SceneGraph,
    names: HashMap<NodeId, String>,
    root: NodeId,
}

fn load_scene(path: &PathBuf) -> Result<LoadedScene> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene file: {}", path.display()))?;
    let file: SceneFile = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse scene file: {}", path.display()))?;
    let scene = build_scene(file)?;
    log::debug!("loaded {} nodes from {}", scene.graph.len(), path.display());
    Ok(scene)
}

fn build_scene(file: SceneFile) -> Result<LoadedScene> {
    if file.nodes.is_empty() {
        bail!("Scene file has no nodes");
    }

    let mut graph = SceneGraph::new();
    let mut ids: HashMap<String, NodeId> = HashMap::new();
    let mut names: HashMap<NodeId, String> = HashMap::new();

    // First pass: insert every node detached, so parents may be declared in
    // any order.
    for entry in &file.nodes {
        let node = Node::new(entry.x, entry.y, entry.width, entry.height)
            .with_scale(entry.scale_x, entry.scale_y)
            .with_rotation(entry.rotation);
        let id = graph.add_node(node);
        if ids.insert(entry.name.clone(), id).is_some() {
            bail!("Duplicate node name '{}'", entry.name);
        }
        names.insert(id, entry.name.clone());
    }

    // Second pass: link children under their parents.
    for entry in &file.nodes {
        if let Some(parent_name) = &entry.parent {
            let parent = *ids
                .get(parent_name)
                .with_context(|| format!("Unknown parent '{parent_name}' for '{}'", entry.name))?;
            if !graph.add_child(parent, ids[&entry.name]) {
                bail!("Could not attach '{}' under '{parent_name}'", entry.name);
            }
        }
    }

    let root = file
        .nodes
        .iter()
        .find(|entry| entry.parent.is_none())
        .map(|entry| ids[&entry.name])
        .context("Scene file has no root node (every node names a parent)")?;

    Ok(LoadedScene { graph, names, root })
}

fn show_scene(path: &PathBuf) -> Result<()> {
    let scene = load_scene(path)?;
    print_tree(&scene, scene.root, 0);
    Ok(())
}

fn print_tree(scene: &LoadedScene, node_id: NodeId, depth: usize) {
    let Some(node) = scene.graph.node(node_id) else {
        return;
    };
    let name = scene.names.get(&node_id).map_or("?", String::as_str);

    let mut line = format!(
        "{:indent$}{name} at ({}, {}) size {}x{}",
        "",
        node.position.x,
        node.position.y,
        node.size.x,
        node.size.y,
        indent = depth * 2
    );
    if node.scale != Vec2::ONE {
        line.push_str(&format!(" scale ({}, {})", node.scale.x, node.scale.y));
    }
    if node.rotation != 0.0 {
        line.push_str(&format!(" rotation {}deg", node.rotation));
    }
    println!("{line}");

    for &child in scene.graph.children(node_id) {
        print_tree(scene, child, depth + 1);
    }
}

fn hit_scene(path: &PathBuf, points: &[(f32, f32)], stop_at: Option<&str>) -> Result<()> {
    let scene = load_scene(path)?;

    if let Some(name) = stop_at {
        if !scene.names.values().any(|n| n == name) {
            bail!("--stop-at names '{name}', which is not in the scene");
        }
    }

    let events: EventManager<ClickData> = EventManager::new();

    // Every node reports clicks that reach it, so the bubble path is
    // visible; the stop_at node additionally cancels propagation.
    for (&id, name) in &scene.names {
        let name = name.clone();
        let stop = stop_at == Some(name.as_str());
        events.on(id, "click", move |_, _, event: &mut Event<ClickData>| {
            if event.target == id {
                println!(
                    "  {name}: click at global ({:.2}, {:.2}), local ({:.2}, {:.2})",
                    event.data.global.x,
                    event.data.global.y,
                    event.data.local.x,
                    event.data.local.y
                );
            } else {
                println!("  {name}: click bubbled up");
            }
            if stop {
                println!("  {name}: propagation stopped");
                event.stop_propagation();
            }
        });
    }

    for &(x, y) in points {
        let point = Vec2::new(x, y);
        println!("click ({x}, {y})");

        let Some(target) = scene.graph.pick(scene.root, point) else {
            println!("  no node hit");
            continue;
        };

        let local = scene
            .graph
            .local_point(target, point)
            .context("picked node disappeared from the graph")?;
        events.trigger(
            &scene.graph,
            target,
            "click",
            ClickData {
                global: point,
                local,
            },
        );
    }

    Ok(())
}
