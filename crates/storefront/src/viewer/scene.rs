//! Scene description for the 3D product viewer.
//!
//! The storefront does not render; it assembles a scene description
//! (camera, orbit constraints, lights, mesh tree, materials) that the
//! client-side engine consumes. Re-tinting mutates materials in place by
//! traversing the mesh tree, so geometry and any animation state the host
//! keeps against it survive color changes.

use serde::Serialize;

use solstice_core::ColorHex;

/// A point or direction in scene space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
}

/// Perspective camera placement.
#[derive(Debug, Clone, Serialize)]
pub struct Camera {
    pub position: Vec3,
    pub fov_degrees: f32,
}

/// Orbit-control constraints for the camera rig.
///
/// Zoom distance and polar angle are clamped; panning is disabled so the
/// product stays centered.
#[derive(Debug, Clone, Serialize)]
pub struct OrbitConstraints {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub pan_enabled: bool,
    pub zoom_enabled: bool,
}

impl Default for OrbitConstraints {
    fn default() -> Self {
        Self {
            min_distance: 3.0,
            max_distance: 10.0,
            min_polar_angle: std::f32::consts::FRAC_PI_4,
            max_polar_angle: std::f32::consts::FRAC_PI_2,
            pan_enabled: false,
            zoom_enabled: true,
        }
    }
}

/// A light in the rig.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Light {
    Ambient {
        intensity: f32,
    },
    Spot {
        position: Vec3,
        angle: f32,
        penumbra: f32,
        intensity: f32,
        cast_shadow: bool,
    },
    Point {
        position: Vec3,
        intensity: f32,
        color: ColorHex,
    },
}

/// Soft shadow plane under the product.
#[derive(Debug, Clone, Serialize)]
pub struct ContactShadow {
    pub position: Vec3,
    pub opacity: f32,
    pub scale: f32,
    pub blur: f32,
    pub far: f32,
}

/// Surface material.
///
/// `tintable` marks materials that follow the user's color selection;
/// fixed-color parts (sole, accent stripes) keep their own color across
/// re-tints.
#[derive(Debug, Clone, Serialize)]
pub struct Material {
    pub color: ColorHex,
    pub roughness: f32,
    pub metalness: f32,
    pub emissive: Option<ColorHex>,
    pub emissive_intensity: f32,
    pub tintable: bool,
}

/// Mesh geometry: either a parametric box or an external model reference.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geometry {
    Box { width: f32, height: f32, depth: f32 },
    External { url: String },
}

/// One node of the mesh tree.
#[derive(Debug, Clone, Serialize)]
pub struct MeshNode {
    pub name: String,
    pub geometry: Geometry,
    pub position: Vec3,
    pub rotation: Vec3,
    pub material: Material,
    pub cast_shadow: bool,
    pub children: Vec<MeshNode>,
}

/// The assembled viewer scene.
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    pub camera: Camera,
    pub orbit: OrbitConstraints,
    pub lights: Vec<Light>,
    pub contact_shadow: ContactShadow,
    pub root: MeshNode,
    pub tint: ColorHex,
}

impl Scene {
    /// Assemble the scene around the placeholder product mesh.
    #[must_use]
    pub fn with_placeholder(tint: ColorHex) -> Self {
        let mut scene = Self {
            camera: Camera {
                position: Vec3::new(3.0, 2.0, 5.0),
                fov_degrees: 50.0,
            },
            orbit: OrbitConstraints::default(),
            lights: lighting_rig(),
            contact_shadow: ContactShadow {
                position: Vec3::new(0.0, -0.8, 0.0),
                opacity: 0.5,
                scale: 10.0,
                blur: 2.0,
                far: 1.0,
            },
            root: placeholder_sneaker(&tint),
            tint: tint.clone(),
        };
        scene.set_tint(tint);
        scene
    }

    /// Assemble the scene around an uploaded external mesh.
    ///
    /// Uploaded models have no fixed-color parts, so their single material
    /// is tintable.
    #[must_use]
    pub fn with_model(url: String, tint: ColorHex) -> Self {
        let mut scene = Self::with_placeholder(tint.clone());
        scene.root = MeshNode {
            name: "external-model".to_string(),
            geometry: Geometry::External { url },
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            material: Material {
                color: tint.clone(),
                roughness: 0.4,
                metalness: 0.2,
                emissive: None,
                emissive_intensity: 0.0,
                tintable: true,
            },
            cast_shadow: true,
            children: Vec::new(),
        };
        scene.set_tint(tint);
        scene
    }

    /// Re-apply a chosen color to the active mesh.
    ///
    /// Traverses every sub-mesh and updates tintable materials in place
    /// (base color, and emissive where the material glows in its own
    /// color). The mesh tree itself is untouched.
    pub fn set_tint(&mut self, tint: ColorHex) {
        retint(&mut self.root, &tint);
        self.tint = tint;
    }

    /// All materials in the active mesh, depth-first.
    #[must_use]
    pub fn materials(&self) -> Vec<&Material> {
        let mut out = Vec::new();
        collect_materials(&self.root, &mut out);
        out
    }
}

fn retint(node: &mut MeshNode, tint: &ColorHex) {
    if node.material.tintable {
        node.material.color = tint.clone();
        if node.material.emissive.is_some() {
            node.material.emissive = Some(tint.clone());
        }
    }
    for child in &mut node.children {
        retint(child, tint);
    }
}

fn collect_materials<'a>(node: &'a MeshNode, out: &mut Vec<&'a Material>) {
    out.push(&node.material);
    for child in &node.children {
        collect_materials(child, out);
    }
}

fn lighting_rig() -> Vec<Light> {
    vec![
        Light::Ambient { intensity: 0.4 },
        Light::Spot {
            position: Vec3::new(10.0, 10.0, 10.0),
            angle: 0.3,
            penumbra: 1.0,
            intensity: 1.5,
            cast_shadow: true,
        },
        Light::Point {
            position: Vec3::new(-10.0, -10.0, -10.0),
            intensity: 0.5,
            color: accent_violet(),
        },
        Light::Point {
            position: Vec3::new(10.0, 5.0, -5.0),
            intensity: 0.5,
            color: accent_cyan(),
        },
    ]
}

// Fill-light and stripe colors are fixed brand accents, not user tints.
fn accent_violet() -> ColorHex {
    fixed_color("#a855f7")
}

fn accent_cyan() -> ColorHex {
    fixed_color("#00d9ff")
}

fn fixed_color(hex: &str) -> ColorHex {
    // Literals here are verified by tests; white keeps the scene
    // renderable if one is ever edited badly.
    ColorHex::parse(hex).unwrap_or_else(|_| ColorHex::from_rgb(255, 255, 255))
}

/// The built-in placeholder product: a parametric sneaker built from boxes.
///
/// Body and tongue follow the selected tint; the sole stays white and the
/// accent stripes stay cyan.
fn placeholder_sneaker(tint: &ColorHex) -> MeshNode {
    let stripe = |name: &str, x: f32| MeshNode {
        name: name.to_string(),
        geometry: Geometry::Box {
            width: 0.1,
            height: 0.6,
            depth: 2.6,
        },
        position: Vec3::new(x, 0.2, 0.0),
        rotation: Vec3::ZERO,
        material: Material {
            color: accent_cyan(),
            roughness: 0.2,
            metalness: 0.6,
            emissive: Some(accent_cyan()),
            emissive_intensity: 0.3,
            tintable: false,
        },
        cast_shadow: true,
        children: Vec::new(),
    };

    MeshNode {
        name: "sneaker".to_string(),
        geometry: Geometry::Box {
            width: 1.8,
            height: 0.8,
            depth: 2.8,
        },
        position: Vec3::new(0.0, 0.2, 0.0),
        rotation: Vec3::ZERO,
        material: Material {
            color: tint.clone(),
            roughness: 0.4,
            metalness: 0.2,
            emissive: Some(tint.clone()),
            emissive_intensity: 0.1,
            tintable: true,
        },
        cast_shadow: true,
        children: vec![
            MeshNode {
                name: "sole".to_string(),
                geometry: Geometry::Box {
                    width: 2.0,
                    height: 0.3,
                    depth: 3.0,
                },
                position: Vec3::new(0.0, -0.3, 0.0),
                rotation: Vec3::ZERO,
                material: Material {
                    color: fixed_color("#ffffff"),
                    roughness: 0.3,
                    metalness: 0.1,
                    emissive: None,
                    emissive_intensity: 0.0,
                    tintable: false,
                },
                cast_shadow: true,
                children: Vec::new(),
            },
            MeshNode {
                name: "tongue".to_string(),
                geometry: Geometry::Box {
                    width: 0.8,
                    height: 0.6,
                    depth: 0.4,
                },
                position: Vec3::new(0.0, 0.5, 1.2),
                rotation: Vec3::new(0.3, 0.0, 0.0),
                material: Material {
                    color: tint.clone(),
                    roughness: 0.5,
                    metalness: 0.1,
                    emissive: None,
                    emissive_intensity: 0.0,
                    tintable: true,
                },
                cast_shadow: true,
                children: Vec::new(),
            },
            stripe("stripe-right", 0.9),
            stripe("stripe-left", -0.9),
        ],
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn color(hex: &str) -> ColorHex {
        ColorHex::parse(hex).unwrap()
    }

    #[test]
    fn test_accent_literals_parse() {
        assert_eq!(accent_violet().as_str(), "#a855f7");
        assert_eq!(accent_cyan().as_str(), "#00d9ff");
    }

    #[test]
    fn test_placeholder_has_tintable_and_fixed_parts() {
        let scene = Scene::with_placeholder(color("#a855f7"));
        let materials = scene.materials();
        assert_eq!(materials.len(), 5);
        assert_eq!(materials.iter().filter(|m| m.tintable).count(), 2);
    }

    #[test]
    fn test_set_tint_updates_every_tintable_material() {
        let mut scene = Scene::with_placeholder(color("#a855f7"));
        scene.set_tint(color("#22c55e"));

        for material in scene.materials() {
            if material.tintable {
                assert_eq!(material.color, color("#22c55e"));
                if let Some(emissive) = &material.emissive {
                    assert_eq!(emissive, &color("#22c55e"));
                }
            }
        }
        assert_eq!(scene.tint, color("#22c55e"));
    }

    #[test]
    fn test_set_tint_leaves_fixed_materials_alone() {
        let mut scene = Scene::with_placeholder(color("#a855f7"));
        scene.set_tint(color("#ff006e"));

        let fixed: Vec<_> = scene
            .materials()
            .into_iter()
            .filter(|m| !m.tintable)
            .collect();
        assert!(fixed.iter().any(|m| m.color == color("#ffffff")));
        assert!(fixed.iter().any(|m| m.color == color("#00d9ff")));
    }

    #[test]
    fn test_set_tint_preserves_geometry() {
        let mut scene = Scene::with_placeholder(color("#a855f7"));
        let before = serde_json::to_value(&scene.root.geometry).unwrap();
        let names_before: Vec<String> =
            scene.root.children.iter().map(|c| c.name.clone()).collect();

        scene.set_tint(color("#6366f1"));

        assert_eq!(serde_json::to_value(&scene.root.geometry).unwrap(), before);
        let names_after: Vec<String> =
            scene.root.children.iter().map(|c| c.name.clone()).collect();
        assert_eq!(names_before, names_after);
    }

    #[test]
    fn test_uploaded_model_is_fully_tintable() {
        let mut scene = Scene::with_model("/models/custom.glb".to_string(), color("#a855f7"));
        scene.set_tint(color("#fb923c"));

        let materials = scene.materials();
        assert_eq!(materials.len(), 1);
        assert!(materials[0].tintable);
        assert_eq!(materials[0].color, color("#fb923c"));
    }

    #[test]
    fn test_every_catalog_color_round_trips_through_tint() {
        // Selecting any selectable color updates every tintable material
        let catalog = crate::catalog::Catalog::load().unwrap();
        for product in catalog.all() {
            let mut scene = Scene::with_placeholder(product.default_color.clone());
            for c in &product.colors {
                scene.set_tint(c.clone());
                for material in scene.materials() {
                    if material.tintable {
                        assert_eq!(&material.color, c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_orbit_constraints_defaults() {
        let orbit = OrbitConstraints::default();
        assert!(!orbit.pan_enabled);
        assert!(orbit.zoom_enabled);
        assert!((orbit.min_distance - 3.0).abs() < f32::EPSILON);
        assert!((orbit.max_distance - 10.0).abs() < f32::EPSILON);
        assert!((orbit.min_polar_angle - std::f32::consts::FRAC_PI_4).abs() < f32::EPSILON);
        assert!((orbit.max_polar_angle - std::f32::consts::FRAC_PI_2).abs() < f32::EPSILON);
    }
}
