//! The advertised tool catalog.
//!
//! One [`ToolSpec`] per tool is the single source of truth: `list_tools`
//! renders JSON schemas from it, the dispatcher registers exactly one
//! handler per entry, and declared defaults are applied here rather than
//! hand-checked inside handlers.

use pptx_core::{ChartKind, ShapeKind};
use serde_json::{Map, Value, json};

/// JSON shape of one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    /// Array of strings; scalar elements are coerced.
    StringArray,
    /// Array of string arrays (table rows).
    StringMatrix,
    /// Array of objects with the given fields.
    ObjectArray(&'static [FieldSpec]),
}

/// One field of an object-array parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Empty when the field needs no description.
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Bool,
    NumberArray,
}

/// A default the dispatcher fills in before the handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamDefault {
    Str(&'static str),
    Int(i64),
}

impl ParamDefault {
    fn to_value(self) -> Value {
        match self {
            Self::Str(text) => Value::String(text.to_string()),
            Self::Int(number) => Value::Number(number.into()),
        }
    }
}

/// One declared parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
    pub required: bool,
    /// Allowed values for enum-constrained strings; empty means open.
    pub allowed: &'static [&'static str],
    pub default: Option<ParamDefault>,
}

impl ParamSpec {
    fn schema(&self) -> Value {
        let mut schema = match self.kind {
            ParamKind::String => json!({ "type": "string" }),
            ParamKind::Integer => json!({ "type": "integer" }),
            ParamKind::StringArray => json!({ "type": "array", "items": { "type": "string" } }),
            ParamKind::StringMatrix => json!({
                "type": "array",
                "items": { "type": "array", "items": { "type": "string" } },
            }),
            ParamKind::ObjectArray(fields) => {
                let mut properties = Map::new();
                for field in fields {
                    properties.insert(field.name.to_string(), field.schema());
                }
                json!({ "type": "array", "items": { "type": "object", "properties": properties } })
            }
        };
        if let Some(object) = schema.as_object_mut() {
            object.insert(
                "description".to_string(),
                Value::String(self.description.to_string()),
            );
            if !self.allowed.is_empty() {
                let values = self
                    .allowed
                    .iter()
                    .map(|value| Value::String((*value).to_string()))
                    .collect();
                object.insert("enum".to_string(), Value::Array(values));
            }
            if let Some(default) = self.default {
                object.insert("default".to_string(), default.to_value());
            }
        }
        schema
    }
}

impl FieldSpec {
    fn schema(&self) -> Value {
        let mut schema = match self.kind {
            FieldKind::String => json!({ "type": "string" }),
            FieldKind::Number => json!({ "type": "number" }),
            FieldKind::Bool => json!({ "type": "boolean" }),
            FieldKind::NumberArray => json!({ "type": "array", "items": { "type": "number" } }),
        };
        if !self.description.is_empty() {
            if let Some(object) = schema.as_object_mut() {
                object.insert(
                    "description".to_string(),
                    Value::String(self.description.to_string()),
                );
            }
        }
        schema
    }
}

/// One advertised tool.
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
}

impl ToolSpec {
    /// Renders the `inputSchema` object for `list_tools`.
    #[must_use]
    pub fn input_schema(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for param in self.params {
            properties.insert(param.name.to_string(), param.schema());
            if param.required {
                required.push(Value::String(param.name.to_string()));
            }
        }
        let mut schema = Map::new();
        schema.insert("type".to_string(), Value::String("object".to_string()));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }
        schema
    }

    /// Fills declared defaults into an argument map; caller-provided values
    /// win.
    pub fn apply_defaults(&self, values: &mut Map<String, Value>) {
        for param in self.params {
            if let Some(default) = param.default {
                values
                    .entry(param.name)
                    .or_insert_with(|| default.to_value());
            }
        }
    }
}

/// Every advertised tool, in catalog order.
#[must_use]
pub fn catalog() -> &'static [ToolSpec] {
    CATALOG
}

/// Looks a tool up by its exact name.
#[must_use]
pub fn find(name: &str) -> Option<&'static ToolSpec> {
    CATALOG.iter().find(|spec| spec.name == name)
}

const fn required(name: &'static str, kind: ParamKind, description: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        kind,
        description,
        required: true,
        allowed: &[],
        default: None,
    }
}

const fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        kind,
        description,
        required: false,
        allowed: &[],
        default: None,
    }
}

const FILENAME: ParamSpec = required(
    "filename",
    ParamKind::String,
    "The presentation filename",
);

const SLIDE_INDEX: ParamSpec = ParamSpec {
    name: "slide_index",
    kind: ParamKind::Integer,
    description: "Slide index (0-based, -1 for last slide)",
    required: false,
    allowed: &[],
    default: Some(ParamDefault::Int(-1)),
};

const CHART_KINDS: [&str; 5] = ChartKind::keys();
const SHAPE_KINDS: [&str; 12] = ShapeKind::keys();

const SERIES_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        kind: FieldKind::String,
        description: "",
    },
    FieldSpec {
        name: "values",
        kind: FieldKind::NumberArray,
        description: "",
    },
];

const EVENT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "date",
        kind: FieldKind::String,
        description: "",
    },
    FieldSpec {
        name: "event",
        kind: FieldKind::String,
        description: "",
    },
];

const TEXT_BLOCK_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "text",
        kind: FieldKind::String,
        description: "",
    },
    FieldSpec {
        name: "font_size",
        kind: FieldKind::Number,
        description: "Font size in points",
    },
    FieldSpec {
        name: "bold",
        kind: FieldKind::Bool,
        description: "",
    },
    FieldSpec {
        name: "italic",
        kind: FieldKind::Bool,
        description: "",
    },
    FieldSpec {
        name: "color",
        kind: FieldKind::String,
        description: "Hex color code (e.g., '#FF0000')",
    },
    FieldSpec {
        name: "font_name",
        kind: FieldKind::String,
        description: "Font family name",
    },
];

static CATALOG: &[ToolSpec] = &[
    ToolSpec {
        name: "create_presentation",
        description: "Creates a new PowerPoint presentation with a title slide",
        params: &[
            required("title", ParamKind::String, "Title for the presentation"),
            ParamSpec {
                name: "subtitle",
                kind: ParamKind::String,
                description: "Subtitle for the title slide (optional)",
                required: false,
                allowed: &[],
                default: Some(ParamDefault::Str("")),
            },
            required(
                "filename",
                ParamKind::String,
                "Filename to save as (e.g., 'presentation.pptx')",
            ),
        ],
    },
    ToolSpec {
        name: "open_presentation",
        description: "Opens an existing PowerPoint presentation from disk",
        params: &[
            required(
                "file_path",
                ParamKind::String,
                "Path to the existing PowerPoint file",
            ),
            optional(
                "filename",
                ParamKind::String,
                "Internal name to reference this presentation (optional, defaults to basename)",
            ),
        ],
    },
    ToolSpec {
        name: "add_title_slide",
        description: "Adds a title slide to an existing presentation",
        params: &[
            FILENAME,
            required("title", ParamKind::String, "Slide title"),
            ParamSpec {
                name: "subtitle",
                kind: ParamKind::String,
                description: "Slide subtitle (optional)",
                required: false,
                allowed: &[],
                default: Some(ParamDefault::Str("")),
            },
        ],
    },
    ToolSpec {
        name: "add_content_slide",
        description: "Adds a content slide with title and bullet points",
        params: &[
            FILENAME,
            required("title", ParamKind::String, "Slide title"),
            required(
                "content",
                ParamKind::StringArray,
                "List of bullet points or content items",
            ),
        ],
    },
    ToolSpec {
        name: "add_two_column_slide",
        description: "Adds a slide with two columns of content",
        params: &[
            FILENAME,
            required("title", ParamKind::String, "Slide title"),
            required(
                "left_content",
                ParamKind::StringArray,
                "Content for left column",
            ),
            required(
                "right_content",
                ParamKind::StringArray,
                "Content for right column",
            ),
        ],
    },
    ToolSpec {
        name: "save_presentation",
        description: "Saves the presentation to disk",
        params: &[
            FILENAME,
            optional(
                "output_path",
                ParamKind::String,
                "Full path where to save (optional, defaults to the Downloads folder)",
            ),
        ],
    },
    ToolSpec {
        name: "list_presentations",
        description: "Lists all presentations currently in memory",
        params: &[],
    },
    ToolSpec {
        name: "add_image_slide",
        description: "Adds a slide with an image and optional title/caption",
        params: &[
            FILENAME,
            required("image_path", ParamKind::String, "Path to the image file"),
            optional("title", ParamKind::String, "Slide title (optional)"),
            optional("caption", ParamKind::String, "Image caption (optional)"),
            ParamSpec {
                name: "layout",
                kind: ParamKind::String,
                description: "Image layout style (default: centered)",
                required: false,
                allowed: &["centered", "title_and_image", "image_left", "image_right"],
                default: Some(ParamDefault::Str("centered")),
            },
        ],
    },
    ToolSpec {
        name: "add_table_slide",
        description: "Adds a slide with a table",
        params: &[
            FILENAME,
            required("title", ParamKind::String, "Slide title"),
            required(
                "headers",
                ParamKind::StringArray,
                "Table column headers",
            ),
            required(
                "rows",
                ParamKind::StringMatrix,
                "Table rows (array of arrays)",
            ),
        ],
    },
    ToolSpec {
        name: "add_chart_slide",
        description: "Adds a slide with a chart/graph",
        params: &[
            FILENAME,
            required("title", ParamKind::String, "Slide title"),
            ParamSpec {
                name: "chart_type",
                kind: ParamKind::String,
                description: "Type of chart to create",
                required: true,
                allowed: &CHART_KINDS,
                default: None,
            },
            required(
                "categories",
                ParamKind::StringArray,
                "Chart categories (x-axis labels)",
            ),
            required(
                "series",
                ParamKind::ObjectArray(SERIES_FIELDS),
                "Chart data series",
            ),
        ],
    },
    ToolSpec {
        name: "analyze_and_chart",
        description: "Analyzes a data file (CSV, JSON, Excel) and creates a chart slide",
        params: &[
            FILENAME,
            required(
                "data_file",
                ParamKind::String,
                "Path to data file (CSV, JSON, or Excel)",
            ),
            ParamSpec {
                name: "chart_type",
                kind: ParamKind::String,
                description: "Type of chart to create",
                required: true,
                allowed: &CHART_KINDS,
                default: None,
            },
            optional(
                "title",
                ParamKind::String,
                "Slide title (optional, auto-generated if not provided)",
            ),
            required(
                "x_column",
                ParamKind::String,
                "Column name for x-axis/categories",
            ),
            required(
                "y_columns",
                ParamKind::StringArray,
                "Column name(s) for y-axis/values",
            ),
        ],
    },
    ToolSpec {
        name: "add_comparison_slide",
        description: "Adds a comparison slide with two items side-by-side",
        params: &[
            FILENAME,
            required("title", ParamKind::String, "Slide title"),
            required("left_title", ParamKind::String, "Title for left side"),
            required(
                "left_content",
                ParamKind::StringArray,
                "Left side content",
            ),
            required("right_title", ParamKind::String, "Title for right side"),
            required(
                "right_content",
                ParamKind::StringArray,
                "Right side content",
            ),
        ],
    },
    ToolSpec {
        name: "add_timeline_slide",
        description: "Adds a timeline slide showing events chronologically",
        params: &[
            FILENAME,
            required("title", ParamKind::String, "Slide title"),
            required(
                "events",
                ParamKind::ObjectArray(EVENT_FIELDS),
                "Timeline events with dates and descriptions",
            ),
        ],
    },
    ToolSpec {
        name: "format_text",
        description: "Adds a text slide with advanced formatting options",
        params: &[
            FILENAME,
            required("title", ParamKind::String, "Slide title"),
            required(
                "text_blocks",
                ParamKind::ObjectArray(TEXT_BLOCK_FIELDS),
                "Text blocks with formatting",
            ),
        ],
    },
    ToolSpec {
        name: "set_slide_background",
        description: "Sets the background color or image for the last added slide",
        params: &[
            FILENAME,
            SLIDE_INDEX,
            optional(
                "color",
                ParamKind::String,
                "Hex color code (e.g., '#FF0000') for solid color background",
            ),
            optional(
                "image_path",
                ParamKind::String,
                "Path to background image",
            ),
        ],
    },
    ToolSpec {
        name: "add_speaker_notes",
        description: "Adds speaker notes to a slide",
        params: &[
            FILENAME,
            SLIDE_INDEX,
            required("notes", ParamKind::String, "Speaker notes text"),
        ],
    },
    ToolSpec {
        name: "read_data_file",
        description: "Reads and analyzes a data file (CSV, JSON, Excel) and returns summary statistics",
        params: &[
            required("data_file", ParamKind::String, "Path to data file"),
            optional(
                "sheet_name",
                ParamKind::String,
                "Sheet name for Excel files (optional)",
            ),
        ],
    },
    ToolSpec {
        name: "add_shape_slide",
        description: "Adds a slide with a preset shape and optional label text",
        params: &[
            FILENAME,
            ParamSpec {
                name: "shape_type",
                kind: ParamKind::String,
                description: "Preset shape to draw",
                required: true,
                allowed: &SHAPE_KINDS,
                default: None,
            },
            optional("title", ParamKind::String, "Slide title (optional)"),
            optional(
                "text",
                ParamKind::String,
                "Label text centered in the shape (optional)",
            ),
            ParamSpec {
                name: "color",
                kind: ParamKind::String,
                description: "Hex color for fill and outline (default: '#4472C4')",
                required: false,
                allowed: &[],
                default: Some(ParamDefault::Str("#4472C4")),
            },
        ],
    },
    ToolSpec {
        name: "add_qr_slide",
        description: "Adds a slide with a QR code generated from the given data",
        params: &[
            FILENAME,
            required("data", ParamKind::String, "Text or URL to encode"),
            optional("title", ParamKind::String, "Slide title (optional)"),
            optional(
                "caption",
                ParamKind::String,
                "Caption under the QR code (optional)",
            ),
        ],
    },
    ToolSpec {
        name: "delete_slide",
        description: "Deletes a slide from the presentation",
        params: &[FILENAME, SLIDE_INDEX],
    },
    ToolSpec {
        name: "duplicate_slide",
        description: "Duplicates a slide (not implemented)",
        params: &[FILENAME, SLIDE_INDEX],
    },
    ToolSpec {
        name: "merge_presentations",
        description: "Merges source presentations into a target (not implemented)",
        params: &[
            required(
                "target",
                ParamKind::String,
                "Presentation that receives the slides",
            ),
            required(
                "sources",
                ParamKind::StringArray,
                "Presentations to merge in",
            ),
        ],
    },
    ToolSpec {
        name: "export_pdf",
        description: "Exports a presentation to PDF (not implemented)",
        params: &[
            FILENAME,
            optional(
                "output_path",
                ParamKind::String,
                "Full path for the PDF (optional)",
            ),
        ],
    },
    ToolSpec {
        name: "apply_theme",
        description: "Applies a named theme to a presentation (not implemented)",
        params: &[FILENAME, required("theme", ParamKind::String, "Theme name")],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tool_names_are_unique() {
        let names: HashSet<_> = catalog().iter().map(|spec| spec.name).collect();
        assert_eq!(names.len(), catalog().len());
    }

    #[test]
    fn every_schema_is_an_object_with_declared_required_params() {
        for spec in catalog() {
            let schema = spec.input_schema();
            assert_eq!(
                schema.get("type").and_then(Value::as_str),
                Some("object"),
                "{}",
                spec.name
            );
            let properties = schema
                .get("properties")
                .and_then(Value::as_object)
                .expect("properties object");
            assert_eq!(properties.len(), spec.params.len(), "{}", spec.name);

            let declared: Vec<_> = spec
                .params
                .iter()
                .filter(|param| param.required)
                .map(|param| param.name)
                .collect();
            let rendered: Vec<_> = schema
                .get("required")
                .and_then(Value::as_array)
                .map(|names| names.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();
            assert_eq!(rendered, declared, "{}", spec.name);
        }
    }

    #[test]
    fn chart_type_choices_track_the_model() {
        let spec = find("add_chart_slide").expect("catalog entry");
        let chart_type = spec
            .params
            .iter()
            .find(|param| param.name == "chart_type")
            .expect("chart_type param");
        assert_eq!(chart_type.allowed, ChartKind::keys());
        for key in chart_type.allowed {
            assert!(ChartKind::from_key(key).is_some());
        }
    }

    #[test]
    fn shape_type_choices_track_the_model() {
        let spec = find("add_shape_slide").expect("catalog entry");
        let shape_type = spec
            .params
            .iter()
            .find(|param| param.name == "shape_type")
            .expect("shape_type param");
        assert_eq!(shape_type.allowed, ShapeKind::keys());
    }

    #[test]
    fn declared_defaults_render_into_the_schema() {
        let spec = find("set_slide_background").expect("catalog entry");
        let schema = spec.input_schema();
        let slide_index = schema
            .get("properties")
            .and_then(Value::as_object)
            .and_then(|props| props.get("slide_index"))
            .and_then(Value::as_object)
            .expect("slide_index schema");
        assert_eq!(slide_index.get("default"), Some(&Value::from(-1)));
        assert_eq!(
            slide_index.get("type").and_then(Value::as_str),
            Some("integer")
        );
    }

    #[test]
    fn apply_defaults_never_overwrites_caller_values() {
        let spec = find("add_image_slide").expect("catalog entry");
        let mut values = Map::new();
        values.insert("layout".to_string(), Value::String("image_left".into()));
        spec.apply_defaults(&mut values);
        assert_eq!(
            values.get("layout").and_then(Value::as_str),
            Some("image_left")
        );

        let mut empty = Map::new();
        spec.apply_defaults(&mut empty);
        assert_eq!(
            empty.get("layout").and_then(Value::as_str),
            Some("centered")
        );
    }

    #[test]
    fn find_is_exact() {
        assert!(find("create_presentation").is_some());
        assert!(find("CREATE_PRESENTATION").is_none());
        assert!(find("unknown").is_none());
    }
}
