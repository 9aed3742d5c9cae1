//! Abstract input events delivered to the engine one at a time.

use serde::{Deserialize, Serialize};

use crate::surface::TimerId;

/// A single input notification.
///
/// Coordinates are canvas coordinates with the y axis pointing down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Pointer button went down.
    Press { x: f64, y: f64 },
    /// Pointer moved with the button held.
    Drag { x: f64, y: f64 },
    /// Pointer button went up.
    Release { x: f64, y: f64 },
    /// A timer fired.
    Tick { timer: TimerId },
    /// A hyperlink in the side panel was activated.
    Link { target: String },
}

impl InputEvent {
    /// Build a link activation event.
    pub fn link(target: impl Into<String>) -> Self {
        Self::Link {
            target: target.into(),
        }
    }

    /// Target of a link activation.
    pub fn link_target(&self) -> Option<&str> {
        match self {
            InputEvent::Link { target } => Some(target),
            _ => None,
        }
    }

    /// Whether this is a pointer event.
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            InputEvent::Press { .. } | InputEvent::Drag { .. } | InputEvent::Release { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let event: InputEvent = serde_json::from_str(r#"{"type":"press","x":1.5,"y":2}"#).unwrap();
        assert_eq!(event, InputEvent::Press { x: 1.5, y: 2.0 });

        let event: InputEvent = serde_json::from_str(r#"{"type":"link","target":"next"}"#).unwrap();
        assert_eq!(event, InputEvent::link("next"));
        assert!(!event.is_pointer());
        assert_eq!(event.link_target(), Some("next"));

        let event: InputEvent = serde_json::from_str(r#"{"type":"tick","timer":3}"#).unwrap();
        assert_eq!(event, InputEvent::Tick { timer: TimerId(3) });
    }
}
