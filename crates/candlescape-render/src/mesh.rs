//! Static unit cube shared by every instance.

use crate::gpu_types::Vertex;

pub const CUBE_VERTEX_COUNT: usize = 24;
pub const CUBE_INDEX_COUNT: usize = 36;

/// Cube of edge 1 centered at the origin, four vertices per face so each face
/// carries its own normal and texture coordinates.
pub fn unit_cube() -> (Vec<Vertex>, Vec<u16>) {
    // (normal, four corners in winding order)
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        // Front (z = +0.5)
        (
            [0.0, 0.0, 1.0],
            [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]],
        ),
        // Back (z = -0.5)
        (
            [0.0, 0.0, -1.0],
            [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5]],
        ),
        // Left (x = -0.5)
        (
            [-1.0, 0.0, 0.0],
            [[-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [-0.5, 0.5, 0.5], [-0.5, -0.5, 0.5]],
        ),
        // Right (x = +0.5)
        (
            [1.0, 0.0, 0.0],
            [[0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5], [0.5, -0.5, 0.5]],
        ),
        // Bottom (y = -0.5)
        (
            [0.0, -1.0, 0.0],
            [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5]],
        ),
        // Top (y = +0.5)
        (
            [0.0, 1.0, 0.0],
            [[-0.5, 0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]],
        ),
    ];
    const TEX_COORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    let mut vertices = Vec::with_capacity(CUBE_VERTEX_COUNT);
    let mut indices = Vec::with_capacity(CUBE_INDEX_COUNT);

    for (face, (normal, corners)) in faces.iter().enumerate() {
        let base = (face * 4) as u16;
        for (corner, tex_coord) in corners.iter().zip(TEX_COORDS) {
            vertices.push(Vertex::new(
                [corner[0], corner[1], corner[2], 1.0],
                *normal,
                tex_coord,
            ));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}
