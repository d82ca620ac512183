//! GDScript (`.gd`) fact extraction.

use gdcruiser_core::{Dependency, DependencyKind};

use crate::extractor::{Extraction, SourceExtractor};
use crate::patterns::{load_targets, CLASS_NAME, EXTENDS_CLASS, EXTENDS_PATH, PRELOAD};

/// Engine classes a script may extend without creating a project dependency.
const GODOT_BUILTINS: &[&str] = &[
    "AnimatedSprite",
    "AnimatedSprite2D",
    "AnimationPlayer",
    "AnimationTree",
    "Area",
    "Area2D",
    "AudioStreamPlayer",
    "AudioStreamPlayer2D",
    "AudioStreamPlayer3D",
    "Button",
    "CPUParticles2D",
    "CPUParticles3D",
    "Camera",
    "Camera2D",
    "Camera3D",
    "CanvasItem",
    "CanvasLayer",
    "CenterContainer",
    "CharacterBody2D",
    "CharacterBody3D",
    "CollisionPolygon2D",
    "CollisionPolygon3D",
    "CollisionShape",
    "CollisionShape2D",
    "CollisionShape3D",
    "Container",
    "Control",
    "EditorPlugin",
    "EditorScript",
    "GPUParticles2D",
    "GPUParticles3D",
    "GridContainer",
    "HBoxContainer",
    "HTTPRequest",
    "KinematicBody",
    "KinematicBody2D",
    "Label",
    "Light",
    "Light2D",
    "LineEdit",
    "MainLoop",
    "MarginContainer",
    "MultiplayerSpawner",
    "MultiplayerSynchronizer",
    "NavigationAgent2D",
    "NavigationAgent3D",
    "Node",
    "Node2D",
    "Node3D",
    "Object",
    "Panel",
    "PanelContainer",
    "ParticleEmitter",
    "Path",
    "Path2D",
    "PathFollow",
    "PathFollow2D",
    "PathFollow3D",
    "RayCast",
    "RayCast2D",
    "RayCast3D",
    "RefCounted",
    "Reference",
    "Resource",
    "RichTextLabel",
    "RigidBody",
    "RigidBody2D",
    "SceneTree",
    "ScrollContainer",
    "ShapeCast2D",
    "ShapeCast3D",
    "Spatial",
    "Sprite",
    "Sprite2D",
    "Sprite3D",
    "StaticBody",
    "StaticBody2D",
    "SubViewport",
    "TabContainer",
    "TextEdit",
    "TileMap",
    "TileSet",
    "Timer",
    "Tween",
    "VBoxContainer",
    "Viewport",
    "WebSocketClient",
    "WebSocketServer",
    "Window",
];

/// Returns true for Godot engine classes.
#[must_use]
pub fn is_builtin_class(name: &str) -> bool {
    GODOT_BUILTINS.binary_search(&name).is_ok()
}

/// Extracts `class_name`, `extends`, `preload` and `load` references.
///
/// Lines whose first non-blank character is `#` are skipped. An `extends`
/// line yields at most one edge and is not scanned for loads.
#[derive(Debug, Clone, Copy, Default)]
pub struct GdscriptExtractor;

impl GdscriptExtractor {
    /// Creates the extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SourceExtractor for GdscriptExtractor {
    fn language_id(&self) -> &'static str {
        "gdscript"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["gd"]
    }

    fn extract(&self, source: &str) -> Extraction {
        let class_name = source
            .lines()
            .find_map(|line| CLASS_NAME.captures(line))
            .map(|caps| caps[1].to_string());

        let mut dependencies = Vec::new();

        for (index, line) in source.lines().enumerate() {
            let line_no = index + 1;
            if line.trim_start().starts_with('#') {
                continue;
            }

            if let Some(caps) = EXTENDS_PATH.captures(line) {
                dependencies.push(
                    Dependency::by_path(&caps[1], DependencyKind::ExtendsPath).at_line(line_no),
                );
                continue;
            }

            if let Some(caps) = EXTENDS_CLASS.captures(line) {
                let base = &caps[1];
                if !is_builtin_class(base) {
                    dependencies.push(Dependency::by_type_name(base).at_line(line_no));
                }
                continue;
            }

            for caps in PRELOAD.captures_iter(line) {
                dependencies
                    .push(Dependency::by_path(&caps[1], DependencyKind::Preload).at_line(line_no));
            }
            for target in load_targets(line) {
                dependencies.push(Dependency::by_path(target, DependencyKind::Load).at_line(line_no));
            }
        }

        Extraction {
            class_name,
            dependencies,
        }
    }
}
