//! JSON renderings for command output

use crate::OutputFormat;
use constellation_geometry::{
    ConstellationShape, EcefPosition, FootprintPolygon, MapCanvas, Result,
};
use serde::Serialize;
use serde_json::{json, Value};

/// Result of a single link eligibility query
#[derive(Debug, Clone, Serialize)]
pub struct LinkReport {
    pub a: usize,
    pub b: usize,
    pub plane_a: usize,
    pub plane_b: usize,
    pub relation: String,
    pub eligible: bool,
}

pub fn position(p: &EcefPosition) -> Value {
    json!({
        "x_m": p.x_m(),
        "y_m": p.y_m(),
        "z_m": p.z_m(),
        "latitude_deg": p.latitude_deg(),
        "longitude_deg": p.longitude_deg(),
        "altitude_m": p.altitude_m()
    })
}

pub fn link(shape: &ConstellationShape, a: usize, b: usize) -> Result<LinkReport> {
    let eligible = shape.is_inter_satellite_link(a, b)?;
    let plane_a = shape.slot_of(a)?.plane;
    let plane_b = shape.slot_of(b)?.plane;

    Ok(LinkReport {
        a,
        b,
        plane_a,
        plane_b,
        relation: format!("{:?}", shape.plane_relation(plane_a, plane_b)),
        eligible,
    })
}

pub fn partners(shape: &ConstellationShape, index: usize) -> Result<Value> {
    let slot = shape.slot_of(index)?;
    let partners = shape.link_partners(index)?;

    Ok(json!({
        "index": index,
        "plane": slot.plane,
        "slot": slot.slot,
        "partners": partners
    }))
}

pub fn footprint(polygon: &FootprintPolygon, format: OutputFormat, canvas: &MapCanvas) -> Value {
    match format {
        OutputFormat::Json => footprint_json(polygon),
        OutputFormat::Geojson => footprint_geojson(polygon),
        OutputFormat::Canvas => footprint_canvas(polygon, canvas),
    }
}

fn footprint_json(polygon: &FootprintPolygon) -> Value {
    let points: Vec<Value> = polygon.points().iter().map(position).collect();

    json!({
        "sub_satellite": position(polygon.sub_satellite()),
        "half_angle_deg": polygon.half_angle_rad().to_degrees(),
        "point_count": polygon.len(),
        "points": points
    })
}

/// GeoJSON positions are `[longitude, latitude]`
fn footprint_geojson(polygon: &FootprintPolygon) -> Value {
    let ring: Vec<[f64; 2]> = polygon
        .points()
        .iter()
        .map(|p| [p.longitude_deg(), p.latitude_deg()])
        .collect();
    let center = polygon.sub_satellite();

    json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [ring]
                },
                "properties": {
                    "kind": "footprint",
                    "half_angle_deg": polygon.half_angle_rad().to_degrees()
                }
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [center.longitude_deg(), center.latitude_deg()]
                },
                "properties": {
                    "kind": "sub_satellite"
                }
            }
        ]
    })
}

fn footprint_canvas(polygon: &FootprintPolygon, canvas: &MapCanvas) -> Value {
    json!({
        "width": canvas.width,
        "height": canvas.height,
        "center": canvas.project(&polygon.sub_satellite().geodetic()),
        "points": canvas.project_polygon(polygon)
    })
}
