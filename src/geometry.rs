//! Fixed scene geometry: a twelve-sided gem and the textured backdrop quad.
//!
//! The gem's point sits at the origin and it opens towards +Z. Its faces are
//! listed counter-clockwise when seen from outside, and every triangle carries
//! the normal of the face it belongs to.

use crate::vertex::{LitVertex, TexturedVertex};

const APEX: [f32; 3] = [0.0, 0.0, 0.0];

const RIM_DEPTH: f32 = 1.75;
const TABLE_DEPTH: f32 = 2.0;

/// Widest ring of the gem, radius 1, starting at -Y and turning clockwise
/// when seen from +Z.
const RIM: [[f32; 2]; 12] = [
    [0.0, -1.0],
    [-0.5, -0.866],
    [-0.866, -0.5],
    [-1.0, 0.0],
    [-0.866, 0.5],
    [-0.5, 0.866],
    [0.0, 1.0],
    [0.5, 0.866],
    [0.866, 0.5],
    [1.0, 0.0],
    [0.866, -0.5],
    [0.5, -0.866],
];

/// Flat top ring, radius 0.75, aligned with [`RIM`].
const TABLE: [[f32; 2]; 12] = [
    [0.0, -0.75],
    [-0.375, -0.6495],
    [-0.6495, -0.375],
    [-0.75, 0.0],
    [-0.6495, 0.375],
    [-0.375, 0.6495],
    [0.0, 0.75],
    [0.375, 0.6495],
    [0.6495, 0.375],
    [0.75, 0.0],
    [0.6495, -0.375],
    [0.375, -0.6495],
];

/// Normals of the twelve apex triangles; entry `i` belongs to the face between
/// `RIM[i]` and `RIM[i + 1]`.
const PAVILION_NORMALS: [[f32; 3]; 12] = [
    [-0.22663, -0.84565, -0.48323],
    [-0.61907, -0.61907, -0.48323],
    [-0.84565, -0.22663, -0.48323],
    [-0.84565, 0.22663, -0.48323],
    [-0.61907, 0.61907, -0.48323],
    [-0.22663, 0.84565, -0.48323],
    [0.22663, 0.84565, -0.48323],
    [0.61907, 0.61907, -0.48323],
    [0.84565, 0.22663, -0.48323],
    [0.84565, -0.22663, -0.48323],
    [0.61907, -0.61907, -0.48323],
    [0.22663, -0.84565, -0.48323],
];

/// Normals of the twelve quads between the rim and the table.
const CROWN_NORMALS: [[f32; 3]; 12] = [
    [-0.18619, -0.69474, 0.69474],
    [-0.50589, -0.50589, 0.69474],
    [-0.69474, -0.18619, 0.69474],
    [-0.69474, 0.18619, 0.69474],
    [-0.50589, 0.50589, 0.69474],
    [-0.18619, 0.69474, 0.69474],
    [0.18619, 0.69474, 0.69474],
    [0.50589, 0.50589, 0.69474],
    [0.69474, 0.18619, 0.69474],
    [0.69474, -0.18619, 0.69474],
    [0.50589, -0.50589, 0.69474],
    [0.18619, -0.69474, 0.69474],
];

const TABLE_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

/// Apex fan, rim band and table cap.
pub const GEM_TRIANGLE_COUNT: usize = 12 + 12 * 2 + 10;

const BACKDROP_HALF_WIDTH: f32 = 2.0;

pub const BACKDROP_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

fn rim(index: usize) -> [f32; 3] {
    let [x, y] = RIM[index % RIM.len()];
    [x, y, RIM_DEPTH]
}

fn table(index: usize) -> [f32; 3] {
    let [x, y] = TABLE[index % TABLE.len()];
    [x, y, TABLE_DEPTH]
}

fn push_triangle(vertices: &mut Vec<LitVertex>, normal: [f32; 3], corners: [[f32; 3]; 3]) {
    vertices.extend(corners.map(|position| LitVertex { position, normal }));
}

/// Builds the gem as a plain triangle list with flat per-face normals.
pub fn build_gem() -> Vec<LitVertex> {
    let mut vertices = Vec::with_capacity(GEM_TRIANGLE_COUNT * 3);

    for (i, normal) in PAVILION_NORMALS.iter().enumerate() {
        push_triangle(&mut vertices, *normal, [APEX, rim(i), rim(i + 1)]);
    }

    // Each rim-to-table quad is split along one diagonal and both halves share
    // the quad's normal.
    for (i, normal) in CROWN_NORMALS.iter().enumerate() {
        push_triangle(&mut vertices, *normal, [rim(i + 1), rim(i), table(i)]);
        push_triangle(&mut vertices, *normal, [rim(i + 1), table(i), table(i + 1)]);
    }

    // Cap: fan over the table ring anchored at its last vertex.
    let anchor = table(TABLE.len() - 1);
    for i in (0..TABLE.len() - 2).rev() {
        push_triangle(&mut vertices, TABLE_NORMAL, [anchor, table(i + 1), table(i)]);
    }

    vertices
}

/// Builds the backdrop: a square of half-width 2 in the z = 0 plane. The top
/// left corner samples the first texel of the first image row, so the image
/// shows upright and unmirrored.
pub fn build_backdrop() -> [TexturedVertex; 4] {
    let h = BACKDROP_HALF_WIDTH;
    [
        TexturedVertex {
            position: [-h, h, 0.0],
            tex_coords: [0.0, 0.0],
        },
        TexturedVertex {
            position: [-h, -h, 0.0],
            tex_coords: [0.0, 1.0],
        },
        TexturedVertex {
            position: [h, -h, 0.0],
            tex_coords: [1.0, 1.0],
        },
        TexturedVertex {
            position: [h, h, 0.0],
            tex_coords: [1.0, 0.0],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    fn normalize(v: [f32; 3]) -> [f32; 3] {
        let length = dot(v, v).sqrt();
        [v[0] / length, v[1] / length, v[2] / length]
    }

    #[test]
    fn gem_has_expected_triangle_count() {
        let gem = build_gem();
        assert_eq!(gem.len(), GEM_TRIANGLE_COUNT * 3);
        assert_eq!(GEM_TRIANGLE_COUNT, 46);
    }

    #[test]
    fn every_triangle_winds_towards_its_normal() {
        let gem = build_gem();
        for (index, triangle) in gem.chunks_exact(3).enumerate() {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]];
            assert_eq!(a.normal, b.normal, "triangle {index} is not flat shaded");
            assert_eq!(a.normal, c.normal, "triangle {index} is not flat shaded");

            let geometric = normalize(cross(
                sub(b.position, a.position),
                sub(c.position, a.position),
            ));
            let agreement = dot(geometric, normalize(a.normal));
            assert!(
                agreement > 0.99,
                "triangle {index} normal disagrees with winding: {agreement}"
            );
        }
    }

    #[test]
    fn gem_starts_at_the_apex() {
        let gem = build_gem();
        assert_eq!(gem[0].position, [0.0, 0.0, 0.0]);
        assert_eq!(gem[1].position, [0.0, -1.0, 1.75]);
        assert_eq!(gem[2].position, [-0.5, -0.866, 1.75]);
        assert_eq!(gem[0].normal, [-0.22663, -0.84565, -0.48323]);
    }

    #[test]
    fn cap_lies_on_the_table_plane() {
        let gem = build_gem();
        let cap = &gem[(12 + 24) * 3..];
        assert_eq!(cap.len(), 30);
        assert!(cap
            .iter()
            .all(|vertex| vertex.position[2] == 2.0 && vertex.normal == [0.0, 0.0, 1.0]));
    }

    #[test]
    fn gem_is_built_identically_every_time() {
        let first = build_gem();
        let second = build_gem();
        assert_eq!(
            bytemuck::cast_slice::<LitVertex, u8>(&first),
            bytemuck::cast_slice::<LitVertex, u8>(&second)
        );

        let first = build_backdrop();
        let second = build_backdrop();
        assert_eq!(
            bytemuck::cast_slice::<TexturedVertex, u8>(&first),
            bytemuck::cast_slice::<TexturedVertex, u8>(&second)
        );
    }

    #[test]
    fn backdrop_corners_map_to_texture_corners() {
        let expected = [
            ([-2.0, 2.0, 0.0], [0.0, 0.0]),
            ([-2.0, -2.0, 0.0], [0.0, 1.0]),
            ([2.0, -2.0, 0.0], [1.0, 1.0]),
            ([2.0, 2.0, 0.0], [1.0, 0.0]),
        ];
        for (vertex, (position, tex_coords)) in build_backdrop().iter().zip(expected) {
            assert_eq!(vertex.position, position);
            assert_eq!(vertex.tex_coords, tex_coords);
        }
    }

    #[test]
    fn backdrop_indices_cover_the_quad_once() {
        let quad = build_backdrop();
        let mut area = 0.0;
        for triangle in BACKDROP_INDICES.chunks_exact(3) {
            let [a, b, c] = [
                quad[triangle[0] as usize].position,
                quad[triangle[1] as usize].position,
                quad[triangle[2] as usize].position,
            ];
            let normal = cross(sub(b, a), sub(c, a));
            assert!(normal[2] > 0.0, "backdrop triangles face the viewer");
            area += normal[2] / 2.0;
        }
        assert_eq!(area, 16.0);
    }
}
