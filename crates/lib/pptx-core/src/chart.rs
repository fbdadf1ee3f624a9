//! Category chart kinds and data.

/// The chart families a slide can embed.
///
/// Keys match the strings the tool schema advertises; `from_key` is the
/// single lookup every caller goes through, so an unknown key is reported
/// instead of faulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Clustered horizontal bars.
    Bar,
    /// Clustered vertical bars.
    Column,
    Line,
    Pie,
    Area,
}

impl ChartKind {
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "bar" => Some(Self::Bar),
            "column" => Some(Self::Column),
            "line" => Some(Self::Line),
            "pie" => Some(Self::Pie),
            "area" => Some(Self::Area),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Column => "column",
            Self::Line => "line",
            Self::Pie => "pie",
            Self::Area => "area",
        }
    }

    /// All advertised keys, in schema order.
    #[must_use]
    pub const fn keys() -> [&'static str; 5] {
        ["bar", "column", "line", "pie", "area"]
    }
}

/// One named series of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl Series {
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Category data shared by every chart kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartData {
    #[must_use]
    pub const fn new(categories: Vec<String>, series: Vec<Series>) -> Self {
        Self { categories, series }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_advertised_key() {
        for key in ChartKind::keys() {
            let kind = ChartKind::from_key(key).expect("advertised key must map");
            assert_eq!(kind.as_key(), key);
        }
    }

    #[test]
    fn rejects_unknown_key() {
        assert_eq!(ChartKind::from_key("not-a-type"), None);
        assert_eq!(ChartKind::from_key("BAR"), None);
    }
}
