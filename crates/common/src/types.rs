use serde::{Deserialize, Serialize};

/// Opaque handle to a renderable node owned by a [`Scene`](crate::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeHandle(pub u32);

/// Primitive solid a node is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geometry {
    /// Axis-aligned box centred on the node origin.
    Box { width: f32, height: f32, depth: f32 },
    /// UV sphere centred on the node origin.
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
}

/// Surface shading for a node.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Material {
    /// Colour derived from surface normals.
    #[default]
    Normal,
    /// Flat unlit colour, `0xRRGGBB`.
    Basic { color: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_order_by_index() {
        assert!(NodeHandle(1) < NodeHandle(2));
        assert_eq!(NodeHandle(3), NodeHandle(3));
    }

    #[test]
    fn material_default_is_normal() {
        assert_eq!(Material::default(), Material::Normal);
    }

    #[test]
    fn geometry_serializes_with_kind_tag() {
        let g = Geometry::Sphere {
            radius: 0.5,
            width_segments: 3,
            height_segments: 2,
        };
        let json = serde_json::to_string(&g).unwrap();
        assert!(json.contains("\"kind\":\"sphere\""));
    }
}
