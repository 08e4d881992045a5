//! Component kinds - the closed set of data the world knows how to store
//!
//! Built-in kinds are strongly typed. External tooling that needs to attach
//! ad hoc data uses [`Component::Custom`], keyed by name.

use serde::{Deserialize, Serialize};

use crate::types::Rgb;

/// Location in cell units. Fractional values are kept; the renderer floors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Velocity in cells per second.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned extent in cells, measured from the position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimension {
    pub width: f32,
    pub height: f32,
}

impl Dimension {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Glyph drawn for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    pub glyph: char,
    pub color: Rgb,
}

impl Sprite {
    pub const fn new(glyph: char, color: Rgb) -> Self {
        Self { glyph, color }
    }
}

/// Marks an entity as taking part in collision checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collider {
    pub active: bool,
}

impl Default for Collider {
    fn default() -> Self {
        Self { active: true }
    }
}

/// Type tag of a component.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentKind {
    Position,
    Velocity,
    Dimension,
    Sprite,
    Collider,
    Custom(String),
}

impl ComponentKind {
    /// Parse a kind from its name.
    ///
    /// Built-in names are matched case-insensitively; anything else becomes a
    /// custom kind with the name as given.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_arcade_core::ComponentKind;
    ///
    /// assert_eq!(ComponentKind::from_name("position"), ComponentKind::Position);
    /// assert_eq!(ComponentKind::from_name("Velocity"), ComponentKind::Velocity);
    /// assert_eq!(
    ///     ComponentKind::from_name("health"),
    ///     ComponentKind::Custom("health".to_string())
    /// );
    /// ```
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "position" => ComponentKind::Position,
            "velocity" => ComponentKind::Velocity,
            "dimension" => ComponentKind::Dimension,
            "sprite" => ComponentKind::Sprite,
            "collider" => ComponentKind::Collider,
            _ => ComponentKind::Custom(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ComponentKind::Position => "position",
            ComponentKind::Velocity => "velocity",
            ComponentKind::Dimension => "dimension",
            ComponentKind::Sprite => "sprite",
            ComponentKind::Collider => "collider",
            ComponentKind::Custom(name) => name,
        }
    }
}

/// A component value attached to an entity.
///
/// Serialized as `{"type": "position", "data": {...}}` so tools can describe
/// components as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Component {
    Position(Position),
    Velocity(Velocity),
    Dimension(Dimension),
    Sprite(Sprite),
    Collider(Collider),
    Custom {
        name: String,
        data: serde_json::Value,
    },
}

impl Component {
    pub fn custom(name: impl Into<String>, data: serde_json::Value) -> Self {
        Component::Custom {
            name: name.into(),
            data,
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Position(_) => ComponentKind::Position,
            Component::Velocity(_) => ComponentKind::Velocity,
            Component::Dimension(_) => ComponentKind::Dimension,
            Component::Sprite(_) => ComponentKind::Sprite,
            Component::Collider(_) => ComponentKind::Collider,
            Component::Custom { name, .. } => ComponentKind::Custom(name.clone()),
        }
    }
}

/// Statically typed view onto one built-in component kind.
///
/// Lets systems borrow `&Position` / `&mut Velocity` directly instead of
/// matching on [`Component`] at every use site.
pub trait ComponentType: Sized + Into<Component> {
    const KIND: ComponentKind;

    fn from_component(component: &Component) -> Option<&Self>;

    fn from_component_mut(component: &mut Component) -> Option<&mut Self>;
}

macro_rules! builtin_component {
    ($ty:ident) => {
        impl From<$ty> for Component {
            fn from(value: $ty) -> Self {
                Component::$ty(value)
            }
        }

        impl ComponentType for $ty {
            const KIND: ComponentKind = ComponentKind::$ty;

            fn from_component(component: &Component) -> Option<&Self> {
                match component {
                    Component::$ty(value) => Some(value),
                    _ => None,
                }
            }

            fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
                match component {
                    Component::$ty(value) => Some(value),
                    _ => None,
                }
            }
        }
    };
}

builtin_component!(Position);
builtin_component!(Velocity);
builtin_component!(Dimension);
builtin_component!(Sprite);
builtin_component!(Collider);
