//! Attribute parsing helpers.
//!
//! Markup attributes are plain strings; every build re-derives its typed
//! values from them, so all parsers here are pure functions with a declared
//! default for absent or malformed input. Asset references are the one
//! exception: a missing or unresolved reference is an author error and
//! surfaces as a [`SceneError`](crate::error::SceneError) instead of a
//! fallback value.

use std::collections::HashMap;

use cgmath::Vector3;

use crate::{
    error::{Result, SceneError},
    markup::Element,
};

/// Parses `rgb(r,g,b)` with integer channels in 0..=255, flexible whitespace
/// and a case-insensitive keyword. Channels come back divided by 255.
pub fn parse_color(value: &str) -> Option<[f32; 3]> {
    let value = value.trim();
    if !value.get(..3)?.eq_ignore_ascii_case("rgb") {
        return None;
    }
    let body = value[3..]
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')?;
    let mut channels = body.split(',');
    let mut color = [0.0; 3];
    for slot in &mut color {
        let channel: u32 = channels.next()?.trim().parse().ok()?;
        if channel > 255 {
            return None;
        }
        *slot = channel as f32 / 255.0;
    }
    if channels.next().is_some() {
        return None;
    }
    Some(color)
}

/// Parses `x,y,z` into a vector of floats.
pub fn parse_vec3(value: &str) -> Option<Vector3<f32>> {
    let mut parts = value.split(',');
    let x: f32 = parts.next()?.trim().parse().ok()?;
    let y: f32 = parts.next()?.trim().parse().ok()?;
    let z: f32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Vector3::new(x, y, z))
}

pub fn color(element: &Element, name: &str, default: [f32; 3]) -> [f32; 3] {
    element
        .attribute(name)
        .and_then(parse_color)
        .unwrap_or(default)
}

pub fn vec3(element: &Element, name: &str, default: Vector3<f32>) -> Vector3<f32> {
    element
        .attribute(name)
        .and_then(parse_vec3)
        .unwrap_or(default)
}

/// `true` only for the exact string `"true"`; any other present value is
/// `false`, absence yields the default.
pub fn boolean(element: &Element, name: &str, default: bool) -> bool {
    match element.attribute(name) {
        Some(value) => value == "true",
        None => default,
    }
}

pub fn float(element: &Element, name: &str, default: f32) -> f32 {
    element
        .attribute(name)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Resolves an asset-reference attribute against the scene root's asset map.
///
/// The attribute must be present and its value must name a declared asset;
/// each violation gets its own error so authors can tell a typo in the
/// markup apart from a missing `pbr-asset` declaration.
pub fn asset_url<'a>(
    element: &Element,
    name: &str,
    assets: &'a HashMap<String, String>,
) -> Result<&'a str> {
    let id = element
        .attribute(name)
        .ok_or_else(|| SceneError::MissingAttribute {
            attribute: name.to_owned(),
            tag: element.tag().name().to_owned(),
        })?;
    assets
        .get(id)
        .map(String::as_str)
        .ok_or_else(|| SceneError::UnresolvedAsset { id: id.to_owned() })
}
