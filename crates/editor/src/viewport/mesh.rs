use glam::Vec3;

/// Floats per vertex: position(3) + normal(3)
pub const STRIDE: usize = 6;

/// CPU-side triangle mesh in local space: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Position of vertex `i`
    pub fn position(&self, i: usize) -> Vec3 {
        let base = i * STRIDE;
        Vec3::new(
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        )
    }

    /// The three corner positions of triangle `tri`
    pub fn triangle(&self, tri: usize) -> [Vec3; 3] {
        [
            self.position(self.indices[tri * 3] as usize),
            self.position(self.indices[tri * 3 + 1] as usize),
            self.position(self.indices[tri * 3 + 2] as usize),
        ]
    }

    /// Iterate all triangles as corner positions
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        (0..self.triangle_count()).map(|t| self.triangle(t))
    }

    fn push_vertex(&mut self, p: Vec3, n: Vec3) -> u32 {
        let idx = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z]);
        idx
    }
}

// ── Primitive generation ─────────────────────────────────────

/// Axis-aligned box centered at the origin
pub fn cube(w: f32, h: f32, d: f32) -> MeshData {
    let hw = w * 0.5;
    let hh = h * 0.5;
    let hd = d * 0.5;

    let faces: [([Vec3; 4], Vec3); 6] = [
        // Front (+Z)
        ([Vec3::new(-hw, -hh, hd), Vec3::new(hw, -hh, hd), Vec3::new(hw, hh, hd), Vec3::new(-hw, hh, hd)], Vec3::Z),
        // Back (-Z)
        ([Vec3::new(hw, -hh, -hd), Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, hh, -hd), Vec3::new(hw, hh, -hd)], Vec3::NEG_Z),
        // Right (+X)
        ([Vec3::new(hw, -hh, hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, hh, -hd), Vec3::new(hw, hh, hd)], Vec3::X),
        // Left (-X)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, -hh, hd), Vec3::new(-hw, hh, hd), Vec3::new(-hw, hh, -hd)], Vec3::NEG_X),
        // Top (+Y)
        ([Vec3::new(-hw, hh, hd), Vec3::new(hw, hh, hd), Vec3::new(hw, hh, -hd), Vec3::new(-hw, hh, -hd)], Vec3::Y),
        // Bottom (-Y)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, -hh, hd), Vec3::new(-hw, -hh, hd)], Vec3::NEG_Y),
    ];

    let mut mesh = MeshData {
        vertices: Vec::with_capacity(24 * STRIDE),
        indices: Vec::with_capacity(36),
    };

    for (quad, normal) in &faces {
        let base = mesh.vertex_count() as u32;
        for v in quad {
            mesh.push_vertex(*v, *normal);
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    mesh
}

/// UV sphere centered at the origin. Pole rows emit one triangle per sector so
/// that no zero-area triangles end up in the mesh.
pub fn sphere(radius: f32, rings: u32, sectors: u32) -> MeshData {
    let mut mesh = MeshData::default();

    for r in 0..=rings {
        let phi = std::f32::consts::PI * r as f32 / rings as f32;
        let sp = phi.sin();
        let cp = phi.cos();

        for s in 0..=sectors {
            let theta = std::f32::consts::TAU * s as f32 / sectors as f32;
            let n = Vec3::new(sp * theta.cos(), cp, sp * theta.sin());
            mesh.push_vertex(n * radius, n);
        }
    }

    for r in 0..rings {
        for s in 0..sectors {
            let i0 = r * (sectors + 1) + s;
            let i1 = i0 + 1;
            let i2 = i0 + sectors + 1;
            let i3 = i2 + 1;
            if r != 0 {
                mesh.indices.extend_from_slice(&[i0, i1, i2]);
            }
            if r != rings - 1 {
                mesh.indices.extend_from_slice(&[i1, i3, i2]);
            }
        }
    }

    mesh
}

/// Regular polygon outline in the XZ plane, counter-clockwise from +X towards +Z
pub fn circle_outline(radius: f32, segments: u32) -> Vec<[f32; 2]> {
    (0..segments)
        .map(|i| {
            let a = i as f32 * std::f32::consts::TAU / segments as f32;
            [radius * a.cos(), radius * a.sin()]
        })
        .collect()
}

/// Straight sweep of a convex XZ outline along +Y, centered vertically on the origin.
///
/// The outline must be ordered by increasing angle (from +X towards +Z).
pub fn prism(outline: &[[f32; 2]], height: f32) -> MeshData {
    let hh = height * 0.5;
    let n = outline.len();
    let mut mesh = MeshData::default();
    if n < 3 {
        return mesh;
    }

    // Sides: one quad per outline segment
    for i in 0..n {
        let [x0, z0] = outline[i];
        let [x1, z1] = outline[(i + 1) % n];
        let normal = Vec3::new(z1 - z0, 0.0, -(x1 - x0)).normalize_or_zero();

        let b0 = mesh.push_vertex(Vec3::new(x0, -hh, z0), normal);
        let b1 = mesh.push_vertex(Vec3::new(x1, -hh, z1), normal);
        let t1 = mesh.push_vertex(Vec3::new(x1, hh, z1), normal);
        let t0 = mesh.push_vertex(Vec3::new(x0, hh, z0), normal);

        mesh.indices.extend_from_slice(&[b0, t1, b1, b0, t0, t1]);
    }

    add_cap(&mut mesh, outline, hh, true);
    add_cap(&mut mesh, outline, -hh, false);

    mesh
}

/// Closed cylinder centered at the origin
pub fn cylinder(radius: f32, height: f32, segments: u32) -> MeshData {
    prism(&circle_outline(radius, segments), height)
}

// ── Helpers ──────────────────────────────────────────────────

/// Fan-triangulate a convex outline at height `y`, facing up or down
fn add_cap(mesh: &mut MeshData, outline: &[[f32; 2]], y: f32, up: bool) {
    let normal = if up { Vec3::Y } else { Vec3::NEG_Y };
    let base = mesh.vertex_count() as u32;
    for [x, z] in outline {
        mesh.push_vertex(Vec3::new(*x, y, *z), normal);
    }

    for i in 1..(outline.len() as u32 - 1) {
        if up {
            mesh.indices.extend_from_slice(&[base, base + i + 1, base + i]);
        } else {
            mesh.indices.extend_from_slice(&[base, base + i, base + i + 1]);
        }
    }
}
