//! Screen-space picking of systems and lanes
//!
//! Picking is brute force: every candidate is projected with the current MVP
//! and compared against the cursor in pixels.

use starmap_core::{Galaxy, LaneKey};
use starmap_math::{distance_point_to_segment, project_to_screen, Mat4, Viewport};

/// Default radius for picking a system, in pixels
pub const SYSTEM_PICK_RADIUS: f32 = 18.0;

/// Default distance for picking a lane, in pixels
pub const LANE_PICK_RADIUS: f32 = 20.0;

/// Id of the system closest to the cursor, if one lies strictly within `radius`
///
/// Ties go to the system that comes first in document order.
pub fn find_nearest_system(
    galaxy: &Galaxy,
    cursor: (f32, f32),
    mvp: Mat4,
    viewport: Viewport,
    radius: f32,
) -> Option<String> {
    let mut best: Option<&str> = None;
    let mut best_d2 = radius * radius;

    for (system, position) in galaxy.positioned_systems() {
        let Some(screen) = project_to_screen(position, mvp, viewport) else {
            continue;
        };
        let d2 = screen.distance_squared_to(cursor.0, cursor.1);
        if d2 < best_d2 {
            best_d2 = d2;
            best = Some(system.id.as_str());
        }
    }

    best.map(str::to_string)
}

/// Lane closest to the cursor, if its on-screen distance is below `max_distance`
pub fn find_nearest_lane(
    galaxy: &Galaxy,
    cursor: (f32, f32),
    mvp: Mat4,
    viewport: Viewport,
    max_distance: f32,
) -> Option<LaneKey> {
    let mut best: Option<(LaneKey, f32)> = None;

    for (lane, a, b) in galaxy.lane_segments() {
        let (Some(sa), Some(sb)) = (
            project_to_screen(a, mvp, viewport),
            project_to_screen(b, mvp, viewport),
        ) else {
            continue;
        };
        let d = distance_point_to_segment([cursor.0, cursor.1], [sa.x, sa.y], [sb.x, sb.y]);
        if best.as_ref().map_or(true, |(_, best_d)| d < *best_d) {
            best = Some((lane, d));
        }
    }

    best.filter(|(_, d)| *d < max_distance).map(|(lane, _)| lane)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::OrbitCamera;
    use starmap_core::{StarMapDocument, SystemRecord};

    // 1000x1000 image so one normalized unit is 2200 world units on both axes
    fn galaxy() -> Galaxy {
        let doc = StarMapDocument {
            image_size: Some(starmap_core::ImageSize::new(1000.0, 1000.0)),
            systems: vec![
                SystemRecord::new("CENTER", "Center", 0.5, 0.5),
                SystemRecord::new("RIGHT", "Right", 0.6, 0.5),
                SystemRecord::new("TWIN", "Twin", 0.5, 0.5),
            ],
            lanes: vec![("CENTER".into(), "RIGHT".into())],
            ..Default::default()
        };
        Galaxy::from_document(doc)
    }

    fn setup() -> (Galaxy, Mat4, Viewport) {
        let vp = Viewport::new(800.0, 600.0);
        let mvp = OrbitCamera::new().mvp(vp.aspect());
        (galaxy(), mvp, vp)
    }

    #[test]
    fn test_pick_center_prefers_first_on_tie() {
        let (g, mvp, vp) = setup();
        let id = find_nearest_system(&g, (402.0, 301.0), mvp, vp, SYSTEM_PICK_RADIUS);
        assert_eq!(id.as_deref(), Some("CENTER"));
    }

    #[test]
    fn test_pick_outside_radius() {
        let (g, mvp, vp) = setup();
        assert!(find_nearest_system(&g, (400.0, 330.0), mvp, vp, SYSTEM_PICK_RADIUS).is_none());
    }

    #[test]
    fn test_pick_radius_is_strict() {
        let (g, mvp, vp) = setup();
        // Exactly 18px below the centre star
        assert!(find_nearest_system(&g, (400.0, 318.0), mvp, vp, 18.0).is_none());
        assert!(find_nearest_system(&g, (400.0, 317.0), mvp, vp, 18.0).is_some());
    }

    #[test]
    fn test_pick_lane() {
        let (g, mvp, vp) = setup();
        let right = project_to_screen(g.position("RIGHT").unwrap(), mvp, vp).unwrap();
        let mid_x = (400.0 + right.x) / 2.0;
        let lane = find_nearest_lane(&g, (mid_x, 310.0), mvp, vp, LANE_PICK_RADIUS);
        assert_eq!(lane, Some(LaneKey::new("CENTER", "RIGHT")));
        assert!(find_nearest_lane(&g, (mid_x, 340.0), mvp, vp, LANE_PICK_RADIUS).is_none());
    }

    #[test]
    fn test_pick_lane_with_no_lanes() {
        let (mut g, mvp, vp) = setup();
        g.clear_lanes();
        assert!(find_nearest_lane(&g, (400.0, 300.0), mvp, vp, LANE_PICK_RADIUS).is_none());
    }
}
