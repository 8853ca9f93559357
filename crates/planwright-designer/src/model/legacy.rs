//! Free-form room/door/window nodes from the first-generation editor.
//!
//! Each kind carries its own defaults and a static field schema describing
//! which properties the inspector may edit and how values are validated.
//!
//! Stored nodes round-trip unchanged. Fields outside a kind's schema are
//! kept alongside the typed ones, and a node whose type is unknown or whose
//! fields do not fit its kind is kept as raw JSON. Raw nodes use the room
//! schema in the inspector and take patches by field merge.

use planwright_core::{DesignError, Point};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Placement and appearance shared by every node kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeFrame {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomNode {
    #[serde(flatten)]
    pub frame: NodeFrame,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    /// Fields written by other editors.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Hinge side of a door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorSwing {
    #[default]
    Left,
    Right,
}

impl DoorSwing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorNode {
    #[serde(flatten)]
    pub frame: NodeFrame,
    #[serde(default)]
    pub swing: DoorSwing,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowStyle {
    Single,
    #[default]
    Double,
    Bay,
}

impl WindowStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Bay => "bay",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowNode {
    #[serde(flatten)]
    pub frame: NodeFrame,
    #[serde(default)]
    pub style: WindowStyle,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A stored node that does not fit any known kind, kept as it was read.
#[derive(Debug, Clone, PartialEq)]
pub struct RawNode {
    id: String,
    value: Value,
}

impl RawNode {
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The stored `type` tag, if any.
    pub fn type_name(&self) -> Option<&str> {
        self.value.get("type").and_then(Value::as_str)
    }

    /// Numeric field, accepting numbers written as strings.
    fn number(&self, key: &str) -> Option<f64> {
        match self.value.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// A legacy canvas node, tagged on the wire by `"type"`.
#[derive(Debug, Clone, PartialEq)]
pub enum LegacyNode {
    Room(RoomNode),
    Door(DoorNode),
    Window(WindowNode),
    Unrecognized(RawNode),
}

#[derive(Serialize)]
struct Tagged<'a, T> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(flatten)]
    node: &'a T,
}

impl Serialize for LegacyNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.kind().as_str();
        match self {
            Self::Room(node) => Tagged { kind, node }.serialize(serializer),
            Self::Door(node) => Tagged { kind, node }.serialize(serializer),
            Self::Window(node) => Tagged { kind, node }.serialize(serializer),
            Self::Unrecognized(raw) => raw.value.serialize(serializer),
        }
    }
}

/// Discriminant of [`LegacyNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    #[default]
    Room,
    Door,
    Window,
}

/// Default size, label and color for a node kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeDefaults {
    pub w: f64,
    pub h: f64,
    pub label: &'static str,
    pub color: &'static str,
}

/// How an editable property is presented and validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldInput {
    Text,
    Color,
    Number { min: f64, step: f64 },
    Select(&'static [&'static str]),
}

/// One editable property of a node kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldMeta {
    pub key: &'static str,
    pub label: &'static str,
    pub input: FieldInput,
}

const fn field(key: &'static str, label: &'static str, input: FieldInput) -> FieldMeta {
    FieldMeta { key, label, input }
}

const ROOM_FIELDS: &[FieldMeta] = &[
    field("label", "Label", FieldInput::Text),
    field("w", "Width", FieldInput::Number { min: 20.0, step: 10.0 }),
    field("h", "Height", FieldInput::Number { min: 20.0, step: 10.0 }),
    field("color", "Color", FieldInput::Color),
    field("floor", "Floor", FieldInput::Select(&["Basement", "1", "2", "3"])),
];

const DOOR_FIELDS: &[FieldMeta] = &[
    field("label", "Label", FieldInput::Text),
    field("w", "Width", FieldInput::Number { min: 20.0, step: 5.0 }),
    field("swing", "Swing", FieldInput::Select(&["left", "right"])),
    field("color", "Color", FieldInput::Color),
];

const WINDOW_FIELDS: &[FieldMeta] = &[
    field("label", "Label", FieldInput::Text),
    field("w", "Width", FieldInput::Number { min: 20.0, step: 5.0 }),
    field("style", "Style", FieldInput::Select(&["single", "double", "bay"])),
    field("color", "Color", FieldInput::Color),
];

impl NodeKind {
    pub const ALL: [NodeKind; 3] = [NodeKind::Room, NodeKind::Door, NodeKind::Window];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Room => "room",
            Self::Door => "door",
            Self::Window => "window",
        }
    }

    pub fn defaults(&self) -> NodeDefaults {
        match self {
            Self::Room => NodeDefaults {
                w: 160.0,
                h: 100.0,
                label: "Room",
                color: "#ffffff",
            },
            Self::Door => NodeDefaults {
                w: 60.0,
                h: 12.0,
                label: "Door",
                color: "#f5f5f5",
            },
            Self::Window => NodeDefaults {
                w: 80.0,
                h: 10.0,
                label: "Window",
                color: "#e0f2fe",
            },
        }
    }

    /// Inspector schema for this kind.
    pub fn fields(&self) -> &'static [FieldMeta] {
        match self {
            Self::Room => ROOM_FIELDS,
            Self::Door => DOOR_FIELDS,
            Self::Window => WINDOW_FIELDS,
        }
    }

    pub fn field(&self, key: &str) -> Option<&'static FieldMeta> {
        self.fields().iter().find(|f| f.key == key)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "room" => Ok(Self::Room),
            "door" => Ok(Self::Door),
            "window" => Ok(Self::Window),
            other => Err(format!("Unknown node type: {}", other)),
        }
    }
}

impl LegacyNode {
    /// Creates a node of `kind` at `(x, y)` with the kind's defaults.
    pub fn new(kind: NodeKind, id: impl Into<String>, x: f64, y: f64) -> Self {
        let defaults = kind.defaults();
        let frame = NodeFrame {
            id: id.into(),
            x,
            y,
            w: defaults.w,
            h: defaults.h,
            label: defaults.label.to_string(),
            color: defaults.color.to_string(),
        };
        let extra = Map::new();
        match kind {
            NodeKind::Room => Self::Room(RoomNode {
                frame,
                floor: None,
                extra,
            }),
            NodeKind::Door => Self::Door(DoorNode {
                frame,
                swing: DoorSwing::default(),
                extra,
            }),
            NodeKind::Window => Self::Window(WindowNode {
                frame,
                style: WindowStyle::default(),
                extra,
            }),
        }
    }

    /// Reads a stored node kept under `key`.
    ///
    /// An untyped node is a room. Missing frame fields take the kind's
    /// defaults and a missing id takes the key. Anything that still does
    /// not fit its kind is kept unchanged as [`LegacyNode::Unrecognized`].
    pub fn from_value(key: &str, value: Value) -> Self {
        let stored_id = value.get("id").and_then(Value::as_str).map(str::to_string);
        let Value::Object(mut obj) = value.clone() else {
            return Self::raw(key, stored_id, value);
        };

        let kind = match obj.remove("type") {
            None | Some(Value::Null) => NodeKind::Room,
            Some(Value::String(tag)) => match tag.parse::<NodeKind>() {
                Ok(kind) => kind,
                Err(_) => return Self::raw(key, stored_id, value),
            },
            Some(_) => return Self::raw(key, stored_id, value),
        };

        if obj.get("id").is_none_or(Value::is_null) {
            obj.insert("id".to_string(), Value::from(key));
        }
        let defaults = kind.defaults();
        for (field, fallback) in [
            ("x", Value::from(0.0)),
            ("y", Value::from(0.0)),
            ("w", Value::from(defaults.w)),
            ("h", Value::from(defaults.h)),
            ("label", Value::from(defaults.label)),
            ("color", Value::from(defaults.color)),
        ] {
            if obj.get(field).is_none_or(Value::is_null) {
                obj.insert(field.to_string(), fallback);
            }
        }

        let obj = Value::Object(obj);
        let typed = match kind {
            NodeKind::Room => serde_json::from_value(obj).map(Self::Room),
            NodeKind::Door => serde_json::from_value(obj).map(Self::Door),
            NodeKind::Window => serde_json::from_value(obj).map(Self::Window),
        };
        typed.unwrap_or_else(|e| {
            tracing::debug!("Keeping legacy node '{}' as stored: {}", key, e);
            Self::raw(key, stored_id, value)
        })
    }

    fn raw(key: &str, stored_id: Option<String>, value: Value) -> Self {
        Self::Unrecognized(RawNode {
            id: stored_id.unwrap_or_else(|| key.to_string()),
            value,
        })
    }

    /// Kind used for defaults and the inspector schema. Raw nodes with an
    /// unknown type are treated as rooms.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Room(_) => NodeKind::Room,
            Self::Door(_) => NodeKind::Door,
            Self::Window(_) => NodeKind::Window,
            Self::Unrecognized(raw) => raw
                .type_name()
                .and_then(|tag| tag.parse().ok())
                .unwrap_or_default(),
        }
    }

    /// Typed frame; `None` for raw nodes.
    pub fn frame(&self) -> Option<&NodeFrame> {
        match self {
            Self::Room(n) => Some(&n.frame),
            Self::Door(n) => Some(&n.frame),
            Self::Window(n) => Some(&n.frame),
            Self::Unrecognized(_) => None,
        }
    }

    fn frame_mut(&mut self) -> Option<&mut NodeFrame> {
        match self {
            Self::Room(n) => Some(&mut n.frame),
            Self::Door(n) => Some(&mut n.frame),
            Self::Window(n) => Some(&mut n.frame),
            Self::Unrecognized(_) => None,
        }
    }

    /// Fields outside the kind's schema.
    pub fn extra(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Room(n) => Some(&n.extra),
            Self::Door(n) => Some(&n.extra),
            Self::Window(n) => Some(&n.extra),
            Self::Unrecognized(raw) => raw.value.as_object(),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Unrecognized(raw) => &raw.id,
            _ => self.frame().map_or("", |frame| frame.id.as_str()),
        }
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        match self {
            Self::Unrecognized(raw) => {
                if let Value::Object(fields) = &mut raw.value {
                    fields.insert("id".to_string(), Value::from(id.as_str()));
                }
                raw.id = id;
            }
            _ => {
                if let Some(frame) = self.frame_mut() {
                    frame.id = id;
                }
            }
        }
    }

    /// Top-left corner. Raw nodes read `x`/`y` leniently and fall back to
    /// the origin.
    pub fn position(&self) -> Point {
        match self {
            Self::Unrecognized(raw) => Point::new(
                raw.number("x").unwrap_or(0.0),
                raw.number("y").unwrap_or(0.0),
            ),
            _ => self
                .frame()
                .map_or(Point::new(0.0, 0.0), |frame| Point::new(frame.x, frame.y)),
        }
    }

    /// `(w, h)`. Raw nodes fall back to their kind's defaults.
    pub fn size(&self) -> (f64, f64) {
        match self {
            Self::Unrecognized(raw) => {
                let defaults = self.kind().defaults();
                (
                    raw.number("w").unwrap_or(defaults.w),
                    raw.number("h").unwrap_or(defaults.h),
                )
            }
            _ => self.frame().map_or((0.0, 0.0), |frame| (frame.w, frame.h)),
        }
    }
}

/// Partial update for a [`LegacyNode`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
    pub label: Option<String>,
    pub color: Option<String>,
    pub floor: Option<Option<String>>,
    pub swing: Option<DoorSwing>,
    pub style: Option<WindowStyle>,
}

fn invalid_field(key: &str, reason: impl Into<String>) -> DesignError {
    DesignError::InvalidField {
        field: key.to_string(),
        reason: reason.into(),
    }
}

impl NodePatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(w: f64, h: f64) -> Self {
        Self {
            w: Some(w),
            h: Some(h),
            ..Self::default()
        }
    }

    /// Builds a single-field patch from inspector input, validated against
    /// the schema of `kind`.
    pub fn from_field(kind: NodeKind, key: &str, raw: &str) -> Result<Self, DesignError> {
        let meta = kind
            .field(key)
            .ok_or_else(|| invalid_field(key, format!("not editable on a {}", kind)))?;

        let raw = raw.trim();
        match meta.input {
            FieldInput::Number { min, .. } => {
                let value: f64 = raw
                    .parse()
                    .map_err(|_| invalid_field(key, format!("'{}' is not a number", raw)))?;
                if !(value >= min) {
                    return Err(invalid_field(key, format!("{} is below minimum {}", value, min)));
                }
                Ok(match key {
                    "w" => Self {
                        w: Some(value),
                        ..Self::default()
                    },
                    _ => Self {
                        h: Some(value),
                        ..Self::default()
                    },
                })
            }
            FieldInput::Select(options) => {
                if !options.contains(&raw) {
                    return Err(invalid_field(
                        key,
                        format!("'{}' is not one of {}", raw, options.join(", ")),
                    ));
                }
                Ok(match key {
                    "swing" => Self {
                        swing: Some(if raw == "right" {
                            DoorSwing::Right
                        } else {
                            DoorSwing::Left
                        }),
                        ..Self::default()
                    },
                    "style" => Self {
                        style: Some(match raw {
                            "single" => WindowStyle::Single,
                            "bay" => WindowStyle::Bay,
                            _ => WindowStyle::Double,
                        }),
                        ..Self::default()
                    },
                    _ => Self {
                        floor: Some(Some(raw.to_string())),
                        ..Self::default()
                    },
                })
            }
            FieldInput::Color => {
                if !raw.starts_with('#') || raw.len() < 4 {
                    return Err(invalid_field(key, format!("'{}' is not a hex color", raw)));
                }
                Ok(Self {
                    color: Some(raw.to_string()),
                    ..Self::default()
                })
            }
            FieldInput::Text => Ok(Self {
                label: Some(raw.to_string()),
                ..Self::default()
            }),
        }
    }

    /// Applies the patch; kind-specific fields must match the node kind.
    /// Raw nodes take the patched fields merged over their stored ones.
    pub(crate) fn apply(&self, node: &mut LegacyNode) -> Result<(), DesignError> {
        let kind = node.kind();
        let foreign = match kind {
            NodeKind::Room => self.swing.is_some() || self.style.is_some(),
            NodeKind::Door => self.floor.is_some() || self.style.is_some(),
            NodeKind::Window => self.floor.is_some() || self.swing.is_some(),
        };
        if foreign {
            let field = match kind {
                NodeKind::Room => "swing/style",
                NodeKind::Door => "floor/style",
                NodeKind::Window => "floor/swing",
            };
            return Err(invalid_field(field, format!("not applicable to a {}", kind)));
        }

        match node {
            LegacyNode::Room(room) => {
                if let Some(floor) = &self.floor {
                    room.floor = floor.clone();
                }
                self.apply_frame(&mut room.frame);
            }
            LegacyNode::Door(door) => {
                if let Some(swing) = self.swing {
                    door.swing = swing;
                }
                self.apply_frame(&mut door.frame);
            }
            LegacyNode::Window(window) => {
                if let Some(style) = self.style {
                    window.style = style;
                }
                self.apply_frame(&mut window.frame);
            }
            LegacyNode::Unrecognized(raw) => {
                let Value::Object(fields) = &mut raw.value else {
                    return Err(invalid_field(&raw.id, "stored node is not an object"));
                };
                self.merge_into(fields);
            }
        }
        Ok(())
    }

    fn apply_frame(&self, frame: &mut NodeFrame) {
        if let Some(x) = self.x {
            frame.x = x;
        }
        if let Some(y) = self.y {
            frame.y = y;
        }
        if let Some(w) = self.w {
            frame.w = w;
        }
        if let Some(h) = self.h {
            frame.h = h;
        }
        if let Some(label) = &self.label {
            frame.label = label.clone();
        }
        if let Some(color) = &self.color {
            frame.color = color.clone();
        }
    }

    fn merge_into(&self, fields: &mut Map<String, Value>) {
        for (key, value) in [("x", self.x), ("y", self.y), ("w", self.w), ("h", self.h)] {
            if let Some(value) = value {
                fields.insert(key.to_string(), Value::from(value));
            }
        }
        for (key, value) in [("label", &self.label), ("color", &self.color)] {
            if let Some(value) = value {
                fields.insert(key.to_string(), Value::from(value.as_str()));
            }
        }
        match &self.floor {
            Some(Some(floor)) => {
                fields.insert("floor".to_string(), Value::from(floor.as_str()));
            }
            Some(None) => {
                fields.remove("floor");
            }
            None => {}
        }
        if let Some(swing) = self.swing {
            fields.insert("swing".to_string(), Value::from(swing.as_str()));
        }
        if let Some(style) = self.style {
            fields.insert("style".to_string(), Value::from(style.as_str()));
        }
    }
}
