//! Preset shape geometries.

/// The preset geometries exposed to callers, mapped to the drawing
/// schema's `prstGeom` names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    RoundedRectangle,
    Oval,
    Diamond,
    Triangle,
    RightArrow,
    LeftArrow,
    UpArrow,
    DownArrow,
    Star,
    Hexagon,
    Pentagon,
}

impl ShapeKind {
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "rectangle" => Some(Self::Rectangle),
            "rounded_rectangle" => Some(Self::RoundedRectangle),
            "oval" => Some(Self::Oval),
            "diamond" => Some(Self::Diamond),
            "triangle" => Some(Self::Triangle),
            "right_arrow" => Some(Self::RightArrow),
            "left_arrow" => Some(Self::LeftArrow),
            "up_arrow" => Some(Self::UpArrow),
            "down_arrow" => Some(Self::DownArrow),
            "star" => Some(Self::Star),
            "hexagon" => Some(Self::Hexagon),
            "pentagon" => Some(Self::Pentagon),
            _ => None,
        }
    }

    /// The `prstGeom` preset name.
    #[must_use]
    pub const fn preset(self) -> &'static str {
        match self {
            Self::Rectangle => "rect",
            Self::RoundedRectangle => "roundRect",
            Self::Oval => "ellipse",
            Self::Diamond => "diamond",
            Self::Triangle => "triangle",
            Self::RightArrow => "rightArrow",
            Self::LeftArrow => "leftArrow",
            Self::UpArrow => "upArrow",
            Self::DownArrow => "downArrow",
            Self::Star => "star5",
            Self::Hexagon => "hexagon",
            Self::Pentagon => "pentagon",
        }
    }

    /// All advertised keys, in schema order.
    #[must_use]
    pub const fn keys() -> [&'static str; 12] {
        [
            "rectangle",
            "rounded_rectangle",
            "oval",
            "diamond",
            "triangle",
            "right_arrow",
            "left_arrow",
            "up_arrow",
            "down_arrow",
            "star",
            "hexagon",
            "pentagon",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_advertised_key() {
        for key in ShapeKind::keys() {
            assert!(ShapeKind::from_key(key).is_some(), "{key} must map");
        }
    }

    #[test]
    fn rejects_unknown_key() {
        assert_eq!(ShapeKind::from_key("blob"), None);
    }

    #[test]
    fn oval_uses_ellipse_preset() {
        assert_eq!(ShapeKind::Oval.preset(), "ellipse");
    }
}
