//! Remote map operations.
//!
//! A [`Command`] is an immutable description of one operation on the peer.
//! It renders itself to script text for a peer exposing a global `map`
//! object (and the `mapboxgl` namespace for markers).
//!
//! Commands whose result is not a primitive end with a `null;` completion
//! statement, so the peer always yields something decodable.
//!
//! # JSON Form
//!
//! Commands deserialize from JSON tagged by `op`:
//!
//! ```
//! use maplink_runtime::Command;
//!
//! let cmd: Command = serde_json::from_str(r#"{"op":"set_zoom","zoom":4}"#)
//!     .expect("valid command");
//! assert_eq!(cmd.render(), "map.setZoom(4.0);\nnull;");
//! assert!(!cmd.is_primitive_return());
//! ```

mod script;

use maplink_types::{EdgeInsets, LayerId, LngLat, LngLatBounds, MarkerId, SourceId};
use script::{bounds, lit, quote, with_null_completion, CameraOptions};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One remote operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    // --- camera ---
    /// Animated flight to a camera position.
    FlyTo {
        center: LngLat,
        #[serde(default)]
        zoom: Option<f64>,
        #[serde(default)]
        bearing: Option<f64>,
        #[serde(default)]
        pitch: Option<f64>,
        #[serde(default)]
        duration_ms: Option<u64>,
    },
    /// Eased transition to a camera position.
    EaseTo {
        center: LngLat,
        #[serde(default)]
        zoom: Option<f64>,
        #[serde(default)]
        bearing: Option<f64>,
        #[serde(default)]
        pitch: Option<f64>,
        #[serde(default)]
        duration_ms: Option<u64>,
    },
    /// Instant camera change.
    JumpTo {
        center: LngLat,
        #[serde(default)]
        zoom: Option<f64>,
        #[serde(default)]
        bearing: Option<f64>,
        #[serde(default)]
        pitch: Option<f64>,
    },
    FitBounds {
        bounds: LngLatBounds,
        #[serde(default)]
        padding: EdgeInsets,
        #[serde(default)]
        max_zoom: Option<f64>,
    },
    SetZoom {
        zoom: f64,
    },
    SetCenter {
        center: LngLat,
    },
    SetBearing {
        bearing: f64,
    },
    SetPitch {
        pitch: f64,
    },

    // --- queries ---
    GetZoom,
    GetBearing,
    GetPitch,
    /// Returns `{lng, lat}`.
    GetCenter,
    /// Returns `{west, south, east, north}`.
    GetBounds,
    IsStyleLoaded,
    IsSourceLoaded {
        source: SourceId,
    },
    HasSource {
        source: SourceId,
    },
    HasLayer {
        layer: LayerId,
    },

    // --- style ---
    /// Adds a source. `definition` is the engine's source definition.
    AddSource {
        id: SourceId,
        definition: Value,
    },
    RemoveSource {
        id: SourceId,
    },
    /// Replaces the data of a GeoJSON source.
    SetSourceData {
        id: SourceId,
        data: Value,
    },
    /// Adds a layer.
    ///
    /// `definition` carries the engine's layer fields (`type`, `paint`,
    /// `layout`, ...). `id` and `source` override any values it contains.
    AddLayer {
        id: LayerId,
        #[serde(default)]
        source: Option<SourceId>,
        definition: Value,
        #[serde(default)]
        before: Option<LayerId>,
    },
    RemoveLayer {
        id: LayerId,
    },
    SetLayoutProperty {
        layer: LayerId,
        name: String,
        value: Value,
    },
    SetPaintProperty {
        layer: LayerId,
        name: String,
        value: Value,
    },
    /// Sets or clears (`None`) a layer filter.
    SetFilter {
        layer: LayerId,
        #[serde(default)]
        filter: Option<Value>,
    },
    /// Replaces the whole style with a URL or a style document.
    SetStyle {
        style: Value,
    },

    // --- annotations ---
    AddMarker {
        id: MarkerId,
        position: LngLat,
        #[serde(default)]
        options: Option<Value>,
    },
    MoveMarker {
        id: MarkerId,
        position: LngLat,
    },
    RemoveMarker {
        id: MarkerId,
    },

    // --- raw ---
    /// Caller-supplied script, sent as is.
    Evaluate {
        script: String,
        #[serde(default)]
        primitive: bool,
    },
}

impl Command {
    /// Renders the command to peer script text.
    ///
    /// Pure: the same command always renders the same text.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::FlyTo {
                center,
                zoom,
                bearing,
                pitch,
                duration_ms,
            } => {
                let opts = camera(*center, *zoom, *bearing, *pitch).duration(*duration_ms);
                with_null_completion(format!("map.flyTo({});", opts.render()))
            }
            Self::EaseTo {
                center,
                zoom,
                bearing,
                pitch,
                duration_ms,
            } => {
                let opts = camera(*center, *zoom, *bearing, *pitch).duration(*duration_ms);
                with_null_completion(format!("map.easeTo({});", opts.render()))
            }
            Self::JumpTo {
                center,
                zoom,
                bearing,
                pitch,
            } => {
                let opts = camera(*center, *zoom, *bearing, *pitch);
                with_null_completion(format!("map.jumpTo({});", opts.render()))
            }
            Self::FitBounds {
                bounds: b,
                padding,
                max_zoom,
            } => {
                let opts = CameraOptions::default()
                    .padding(*padding)
                    .number("maxZoom", *max_zoom);
                with_null_completion(format!("map.fitBounds({}, {});", bounds(*b), opts.render()))
            }
            Self::SetZoom { zoom } => with_null_completion(format!("map.setZoom({});", lit(zoom))),
            Self::SetCenter { center } => {
                with_null_completion(format!("map.setCenter({});", lit(&center.to_array())))
            }
            Self::SetBearing { bearing } => {
                with_null_completion(format!("map.setBearing({});", lit(bearing)))
            }
            Self::SetPitch { pitch } => {
                with_null_completion(format!("map.setPitch({});", lit(pitch)))
            }

            Self::GetZoom => "map.getZoom();".to_string(),
            Self::GetBearing => "map.getBearing();".to_string(),
            Self::GetPitch => "map.getPitch();".to_string(),
            Self::GetCenter => {
                "(function () { var c = map.getCenter(); return { lng: c.lng, lat: c.lat }; })();"
                    .to_string()
            }
            Self::GetBounds => "(function () { var b = map.getBounds(); return { west: b.getWest(), \
                 south: b.getSouth(), east: b.getEast(), north: b.getNorth() }; })();"
                .to_string(),
            Self::IsStyleLoaded => "!!map.isStyleLoaded();".to_string(),
            Self::IsSourceLoaded { source } => {
                let id = quote(source.as_str());
                format!("!!map.getSource({id}) && !!map.isSourceLoaded({id});")
            }
            Self::HasSource { source } => format!("!!map.getSource({});", quote(source.as_str())),
            Self::HasLayer { layer } => format!("!!map.getLayer({});", quote(layer.as_str())),

            Self::AddSource { id, definition } => with_null_completion(format!(
                "map.addSource({}, {});",
                quote(id.as_str()),
                lit(definition)
            )),
            Self::RemoveSource { id } => {
                let id = quote(id.as_str());
                with_null_completion(format!("if (map.getSource({id})) {{ map.removeSource({id}); }}"))
            }
            Self::SetSourceData { id, data } => with_null_completion(format!(
                "map.getSource({}).setData({});",
                quote(id.as_str()),
                lit(data)
            )),
            Self::AddLayer {
                id,
                source,
                definition,
                before,
            } => {
                let layer = layer_object(id, source.as_ref(), definition);
                let statement = match before {
                    Some(before) => format!("map.addLayer({layer}, {});", quote(before.as_str())),
                    None => format!("map.addLayer({layer});"),
                };
                with_null_completion(statement)
            }
            Self::RemoveLayer { id } => {
                let id = quote(id.as_str());
                with_null_completion(format!("if (map.getLayer({id})) {{ map.removeLayer({id}); }}"))
            }
            Self::SetLayoutProperty { layer, name, value } => with_null_completion(format!(
                "map.setLayoutProperty({}, {}, {});",
                quote(layer.as_str()),
                quote(name),
                lit(value)
            )),
            Self::SetPaintProperty { layer, name, value } => with_null_completion(format!(
                "map.setPaintProperty({}, {}, {});",
                quote(layer.as_str()),
                quote(name),
                lit(value)
            )),
            Self::SetFilter { layer, filter } => with_null_completion(format!(
                "map.setFilter({}, {});",
                quote(layer.as_str()),
                lit(filter)
            )),
            Self::SetStyle { style } => with_null_completion(format!("map.setStyle({});", lit(style))),

            Self::AddMarker {
                id,
                position,
                options,
            } => {
                let options = options.clone().unwrap_or_else(|| Value::Object(Default::default()));
                with_null_completion(format!(
                    "window.__markers = window.__markers || {{}}; \
                     window.__markers[{}] = new mapboxgl.Marker({}).setLngLat({}).addTo(map);",
                    quote(id.as_str()),
                    lit(&options),
                    lit(&position.to_array())
                ))
            }
            Self::MoveMarker { id, position } => with_null_completion(format!(
                "var m = (window.__markers || {{}})[{}]; if (m) {{ m.setLngLat({}); }}",
                quote(id.as_str()),
                lit(&position.to_array())
            )),
            Self::RemoveMarker { id } => {
                let id = quote(id.as_str());
                with_null_completion(format!(
                    "var m = (window.__markers || {{}})[{id}]; \
                     if (m) {{ m.remove(); delete window.__markers[{id}]; }}"
                ))
            }

            Self::Evaluate { script, primitive } => {
                if *primitive {
                    script.clone()
                } else {
                    with_null_completion(script.clone())
                }
            }
        }
    }

    /// Returns `true` if the peer's result is a primitive value the caller
    /// is interested in.
    #[must_use]
    pub fn is_primitive_return(&self) -> bool {
        match self {
            Self::GetZoom
            | Self::GetBearing
            | Self::GetPitch
            | Self::GetCenter
            | Self::GetBounds
            | Self::IsStyleLoaded
            | Self::IsSourceLoaded { .. }
            | Self::HasSource { .. }
            | Self::HasLayer { .. } => true,
            Self::Evaluate { primitive, .. } => *primitive,
            _ => false,
        }
    }

    /// Short operation name for logs.
    #[must_use]
    pub fn op(&self) -> &'static str {
        match self {
            Self::FlyTo { .. } => "fly_to",
            Self::EaseTo { .. } => "ease_to",
            Self::JumpTo { .. } => "jump_to",
            Self::FitBounds { .. } => "fit_bounds",
            Self::SetZoom { .. } => "set_zoom",
            Self::SetCenter { .. } => "set_center",
            Self::SetBearing { .. } => "set_bearing",
            Self::SetPitch { .. } => "set_pitch",
            Self::GetZoom => "get_zoom",
            Self::GetBearing => "get_bearing",
            Self::GetPitch => "get_pitch",
            Self::GetCenter => "get_center",
            Self::GetBounds => "get_bounds",
            Self::IsStyleLoaded => "is_style_loaded",
            Self::IsSourceLoaded { .. } => "is_source_loaded",
            Self::HasSource { .. } => "has_source",
            Self::HasLayer { .. } => "has_layer",
            Self::AddSource { .. } => "add_source",
            Self::RemoveSource { .. } => "remove_source",
            Self::SetSourceData { .. } => "set_source_data",
            Self::AddLayer { .. } => "add_layer",
            Self::RemoveLayer { .. } => "remove_layer",
            Self::SetLayoutProperty { .. } => "set_layout_property",
            Self::SetPaintProperty { .. } => "set_paint_property",
            Self::SetFilter { .. } => "set_filter",
            Self::SetStyle { .. } => "set_style",
            Self::AddMarker { .. } => "add_marker",
            Self::MoveMarker { .. } => "move_marker",
            Self::RemoveMarker { .. } => "remove_marker",
            Self::Evaluate { .. } => "evaluate",
        }
    }
}

fn camera(
    center: LngLat,
    zoom: Option<f64>,
    bearing: Option<f64>,
    pitch: Option<f64>,
) -> CameraOptions {
    CameraOptions::default()
        .center(Some(center))
        .number("zoom", zoom)
        .number("bearing", bearing)
        .number("pitch", pitch)
}

/// Merges `id` and `source` into a layer definition.
///
/// A non-object definition is replaced by an object holding just the ids.
fn layer_object(id: &LayerId, source: Option<&SourceId>, definition: &Value) -> String {
    let mut obj = match definition {
        Value::Object(map) => map.clone(),
        _ => serde_json::Map::new(),
    };
    obj.insert("id".into(), Value::from(id.as_str()));
    match source {
        Some(source) => {
            obj.insert("source".into(), Value::from(source.as_str()));
        }
        None => {
            obj.remove("source");
        }
    }
    lit(&Value::Object(obj))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn layer(s: &str) -> LayerId {
        s.parse().expect("valid layer id")
    }

    fn source(s: &str) -> SourceId {
        s.parse().expect("valid source id")
    }

    #[test]
    fn render_is_deterministic() {
        let cmd = Command::AddLayer {
            id: layer("quakes"),
            source: Some(source("eq")),
            definition: json!({"type": "circle", "paint": {"circle-radius": 4, "circle-color": "#f00"}}),
            before: None,
        };
        assert_eq!(cmd.render(), cmd.clone().render());
    }

    #[test]
    fn non_primitive_commands_end_with_null() {
        let cmds = vec![
            Command::SetZoom { zoom: 3.0 },
            Command::RemoveLayer { id: layer("a") },
            Command::SetStyle {
                style: json!("mapbox://styles/mapbox/streets-v12"),
            },
            Command::RemoveMarker {
                id: "m1".parse().expect("valid"),
            },
        ];
        for cmd in cmds {
            assert!(!cmd.is_primitive_return());
            assert!(cmd.render().ends_with("\nnull;"), "{}", cmd.render());
        }
    }

    #[test]
    fn queries_are_primitive_and_have_no_null_completion() {
        let cmds = vec![
            Command::GetZoom,
            Command::GetCenter,
            Command::IsSourceLoaded { source: source("s") },
            Command::HasLayer { layer: layer("l") },
        ];
        for cmd in cmds {
            assert!(cmd.is_primitive_return());
            assert!(!cmd.render().ends_with("\nnull;"));
        }
    }

    #[test]
    fn fly_to_renders_options() {
        let cmd = Command::FlyTo {
            center: LngLat::new(13.4, 52.5),
            zoom: Some(9.0),
            bearing: None,
            pitch: None,
            duration_ms: Some(1500),
        };
        assert_eq!(
            cmd.render(),
            concat!(r#"map.flyTo({"center":[13.4,52.5],"duration":1500,"zoom":9.0});"#, "\nnull;")
        );
    }

    #[test]
    fn fit_bounds_renders_array_form() {
        let cmd = Command::FitBounds {
            bounds: LngLatBounds::new(LngLat::new(-1.0, -2.0), LngLat::new(3.0, 4.0)),
            padding: EdgeInsets::default(),
            max_zoom: Some(12.0),
        };
        assert_eq!(
            cmd.render(),
            concat!(r#"map.fitBounds([[-1.0,-2.0],[3.0,4.0]], {"maxZoom":12.0});"#, "\nnull;")
        );
    }

    #[test]
    fn add_layer_merges_ids_into_definition() {
        let cmd = Command::AddLayer {
            id: layer("quakes"),
            source: Some(source("eq")),
            definition: json!({"type": "circle", "id": "ignored"}),
            before: Some(layer("labels")),
        };
        assert_eq!(
            cmd.render(),
            concat!(r#"map.addLayer({"id":"quakes","source":"eq","type":"circle"}, "labels");"#, "\nnull;")
        );
    }

    #[test]
    fn identifiers_are_escaped() {
        let cmd = Command::HasSource {
            source: source(r#"x"); evil(); ("#),
        };
        assert_eq!(cmd.render(), r#"!!map.getSource("x\"); evil(); (");"#);
    }

    #[test]
    fn removals_tolerate_missing_entities() {
        let cmd = Command::RemoveLayer { id: layer("gone") };
        assert_eq!(
            cmd.render(),
            concat!(r#"if (map.getLayer("gone")) { map.removeLayer("gone"); }"#, "\nnull;")
        );
    }

    #[test]
    fn is_source_loaded_guards_missing_source() {
        let cmd = Command::IsSourceLoaded { source: source("eq") };
        assert_eq!(
            cmd.render(),
            r#"!!map.getSource("eq") && !!map.isSourceLoaded("eq");"#
        );
    }

    #[test]
    fn set_filter_none_clears() {
        let cmd = Command::SetFilter {
            layer: layer("l"),
            filter: None,
        };
        assert_eq!(cmd.render(), concat!(r#"map.setFilter("l", null);"#, "\nnull;"));
    }

    #[test]
    fn evaluate_respects_primitive_flag() {
        let raw = Command::Evaluate {
            script: "1 + 1;".into(),
            primitive: true,
        };
        assert!(raw.is_primitive_return());
        assert_eq!(raw.render(), "1 + 1;");

        let effect = Command::Evaluate {
            script: "console.log(1);".into(),
            primitive: false,
        };
        assert_eq!(effect.render(), "console.log(1);\nnull;");

        let bare = Command::Evaluate {
            script: "foo()".into(),
            primitive: false,
        };
        assert_eq!(bare.render(), "foo()\nnull;");
    }

    #[test]
    fn deserializes_from_tagged_json() {
        let cmd: Command = serde_json::from_str(
            r#"{"op":"add_layer","id":"bg","definition":{"type":"background"}}"#,
        )
        .expect("valid");
        assert_eq!(cmd.op(), "add_layer");
        assert_eq!(
            cmd.render(),
            concat!(r#"map.addLayer({"id":"bg","type":"background"});"#, "\nnull;")
        );

        let err = serde_json::from_str::<Command>(r#"{"op":"remove_layer","id":""}"#);
        assert!(err.is_err(), "empty ids are rejected");
    }
}
