//! Geometrie-Kern: reine Funktionen ohne Interaktionszustand.
//!
//! Alle Koordinaten sind projizierte Kartenkoordinaten (`f64`).

pub mod arc;
pub mod endpoints;
pub mod measure;
pub mod offset;
pub mod ortho;
pub mod projection;
pub mod revision_cloud;
pub mod split;
pub mod transform;

pub use arc::{
    derive_control_points, fit_circle_through_three_points, generate_arc, generate_arc_preview,
    Circle,
};
pub use endpoints::{find_nearby_endpoint, merge_lines, EndpointMatch, LineEnd};
pub use hit_test::{
    closest_point_on_polyline, nearest_vertex, point_in_ring, rotate_point, Extent, PolylineHit,
};
pub use measure::{polyline_length, polyline_length_meters, signed_ring_area};
pub use offset::{offset_line, OffsetSide};
pub use ortho::{apply_ortho_segments, constrain_to_orthogonal};
pub use projection::Projection;
pub use revision_cloud::{generate_revision_cloud, generate_revision_cloud_with, CloudParams};
pub use split::split_line_at;
pub use transform::AffineTransform;
