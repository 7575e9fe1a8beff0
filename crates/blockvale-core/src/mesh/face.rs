//! The six axis-aligned cube faces

use blockvale_blocks::FaceSlot;
use glam::{IVec3, Vec3};

/// Triangle pattern over a face's four corners
pub const FACE_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// One cube face
///
/// `dir` points at the neighbour that decides visibility and doubles as the
/// normal. Corners are unit-cube offsets, counter-clockwise seen from outside.
#[derive(Debug, Clone, Copy)]
pub struct FaceDescriptor {
    pub dir: IVec3,
    pub corners: [Vec3; 4],
    pub slot: FaceSlot,
}

impl FaceDescriptor {
    pub fn normal(&self) -> Vec3 {
        self.dir.as_vec3()
    }
}

const fn face(dir: IVec3, corners: [[f32; 3]; 4], slot: FaceSlot) -> FaceDescriptor {
    FaceDescriptor {
        dir,
        corners: [
            Vec3::new(corners[0][0], corners[0][1], corners[0][2]),
            Vec3::new(corners[1][0], corners[1][1], corners[1][2]),
            Vec3::new(corners[2][0], corners[2][1], corners[2][2]),
            Vec3::new(corners[3][0], corners[3][1], corners[3][2]),
        ],
        slot,
    }
}

pub const FACES: [FaceDescriptor; 6] = [
    // +X
    face(
        IVec3::new(1, 0, 0),
        [[1.0, 0.0, 1.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0]],
        FaceSlot::Side,
    ),
    // -X
    face(
        IVec3::new(-1, 0, 0),
        [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0]],
        FaceSlot::Side,
    ),
    // +Y
    face(
        IVec3::new(0, 1, 0),
        [[0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        FaceSlot::Top,
    ),
    // -Y
    face(
        IVec3::new(0, -1, 0),
        [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]],
        FaceSlot::Bottom,
    ),
    // +Z
    face(
        IVec3::new(0, 0, 1),
        [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]],
        FaceSlot::Side,
    ),
    // -Z
    face(
        IVec3::new(0, 0, -1),
        [[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
        FaceSlot::Side,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winding_faces_outward() {
        for face in FACES {
            let [a, b, c, d] = face.corners;
            let n1 = (b - a).cross(c - a);
            let n2 = (c - a).cross(d - a);
            assert_eq!(n1.normalize(), face.normal(), "{:?}", face.dir);
            assert_eq!(n2.normalize(), face.normal(), "{:?}", face.dir);
        }
    }

    #[test]
    fn test_corners_lie_on_face_plane() {
        for face in FACES {
            let dir = face.dir.as_vec3();
            // Face plane sits at 1 along positive axes and 0 along negative ones
            let plane = if dir.max_element() > 0.0 { 1.0 } else { 0.0 };
            for corner in face.corners {
                assert_eq!(corner.dot(dir.abs()), plane);
            }
        }
    }

    #[test]
    fn test_every_direction_once() {
        let dirs: Vec<IVec3> = FACES.iter().map(|f| f.dir).collect();
        for axis in [IVec3::X, IVec3::Y, IVec3::Z] {
            assert!(dirs.contains(&axis));
            assert!(dirs.contains(&-axis));
        }
    }

    #[test]
    fn test_texture_slots() {
        let top = FACES.iter().find(|f| f.dir == IVec3::Y).unwrap();
        let bottom = FACES.iter().find(|f| f.dir == IVec3::NEG_Y).unwrap();
        assert_eq!(top.slot, FaceSlot::Top);
        assert_eq!(bottom.slot, FaceSlot::Bottom);
        assert_eq!(FACES.iter().filter(|f| f.slot == FaceSlot::Side).count(), 4);
    }
}
